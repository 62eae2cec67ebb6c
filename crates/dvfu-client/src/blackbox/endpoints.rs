//! BlackBox endpoint paths, template names and wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use dvfu_core::{RawResponse, ShortToken};

/// POST: exchange login and password for a short token.
pub(crate) const TOKEN: &str = "v1/token";

/// POST: register a device id under the short token.
pub(crate) const DEVICE_REGISTER: &str = "v1/device/register";

/// POST: GraphQL gateway for schedule, news and profile queries.
pub(crate) const GRAPHQL_SCHEDULE: &str = "v2/graphql/schedule";

/// GET: multifunctional center units.
pub(crate) const MFC_UNITS: &str = "v2/mfc/units";

/// GET: the user's requests to the multifunctional center.
pub(crate) const USER_REQUESTS: &str = "v2/user-requests";

/// Names of the query templates the endpoint methods look up.
pub mod template {
    pub const READ_PROFILE: &str = "ReadProfile";
    pub const READ_NEWS: &str = "ReadNews";
    pub const NEWS_ITEM: &str = "newsItem";
    pub const USER_QR_PASS_KEY: &str = "userQrPassKey";
    pub const READ_LESSONS: &str = "ReadLessons";
    pub const READ_LESSON_FEEDBACK: &str = "ReadLessonFeedback";
    pub const UPDATE_LESSON_FEEDBACK: &str = "UpdateLessonFeedback";
}

/// Request body for `v1/token`.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    #[serde(default)]
    token: Option<String>,
}

/// Request body for `v1/device/register`.
#[derive(Debug, Serialize)]
pub(crate) struct RegisterDeviceRequest<'a> {
    pub device_id: &'a str,
    pub device_code: &'static str,
    pub device_description: &'static str,
}

impl<'a> RegisterDeviceRequest<'a> {
    pub fn new(device_id: &'a str) -> Self {
        Self {
            device_id,
            device_code: "fcm",
            device_description: "flutter;null",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegisterDeviceData {
    #[serde(default)]
    user_id: Option<Value>,
}

/// Request body for the GraphQL gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphqlRequest {
    pub operation_name: Option<String>,
    pub variables: Value,
    pub query: String,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            operation_name: None,
            variables: Value::Object(Default::default()),
            query: query.into(),
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }
}

/// Extract `data.token` from a `v1/token` response.
pub(crate) fn short_token_from(response: &RawResponse) -> Option<ShortToken> {
    response
        .data::<TokenData>(TOKEN)?
        .token
        .map(ShortToken::new)
}

/// Extract `data.user_id` from a device registration response.
pub(crate) fn user_id_from(response: &RawResponse) -> Option<String> {
    match response
        .data::<RegisterDeviceData>(DEVICE_REGISTER)?
        .user_id?
    {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
