//! Blocking BlackBox session.
//!
//! Mirrors [`super::BlackBoxSession`] with two differences: every call
//! blocks the calling thread, and the short token is requested once, during
//! construction, and never again.

use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use dvfu_core::{
    BearerToken, ClientConfig, Credentials, Error, LessonFeedback, LessonGuid, LessonsQuery,
    Result, ServiceUrl, ShortToken, TemplateStore, TokenState,
};

use crate::http::blocking::HttpClient;
use crate::http::{Auth, blackbox_headers};

use super::endpoints::{
    DEVICE_REGISTER, GRAPHQL_SCHEDULE, GraphqlRequest, MFC_UNITS, RegisterDeviceRequest, TOKEN,
    TokenRequest, USER_REQUESTS, short_token_from, user_id_from,
};
use super::requests;

/// A blocking session against the BlackBox gateway.
///
/// Must not be created, used or dropped from within an async runtime.
pub struct BlackBoxSession {
    client: HttpClient,
    credentials: Credentials,
    bearer: BearerToken,
    templates: TemplateStore,
    short_token: TokenState<ShortToken>,
}

impl BlackBoxSession {
    /// Create a session using the bundled query templates and request the
    /// short token.
    ///
    /// A failed short token request does not fail construction; it leaves
    /// the session without a short token for its whole lifetime.
    pub fn new(config: ClientConfig, credentials: Credentials, bearer: BearerToken) -> Result<Self> {
        Self::with_templates(config, credentials, bearer, requests::bundled_templates())
    }

    /// Create a session with an explicit template store.
    #[instrument(skip_all, fields(base = %config.base_url, login = %credentials.login()))]
    pub fn with_templates(
        config: ClientConfig,
        credentials: Credentials,
        bearer: BearerToken,
        templates: TemplateStore,
    ) -> Result<Self> {
        Auth::Bearer(bearer.as_str()).header_value()?;
        let client = HttpClient::new(&config, blackbox_headers(&config.base_url)?)?;

        let short_token = TokenState::from_fetch(create_short_token(&client, &credentials));
        debug!(has_short_token = short_token.token().is_some(), "BlackBox session created");

        Ok(Self {
            client,
            credentials,
            bearer,
            templates,
            short_token,
        })
    }

    pub fn base_url(&self) -> &ServiceUrl {
        self.client.base()
    }

    pub fn login(&self) -> &str {
        self.credentials.login()
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Returns the short token obtained at construction, if any.
    pub fn short_token(&self) -> Option<&ShortToken> {
        self.short_token.token()
    }

    /// Returns the short token state fixed at construction.
    pub fn short_token_state(&self) -> &TokenState<ShortToken> {
        &self.short_token
    }

    /// Register a device under the short token and return the user id.
    ///
    /// A random UUID is generated for each call without an explicit id.
    #[instrument(skip(self))]
    pub fn register_device(&self, device_id: Option<&str>) -> Option<String> {
        let Some(short_token) = self.short_token() else {
            warn!("No short token available, device not registered");
            return None;
        };

        let generated;
        let device_id = match device_id {
            Some(id) => id,
            None => {
                generated = Uuid::new_v4().to_string();
                &generated
            }
        };
        debug!(device_id, "Registering device");

        let response = self.client.post(
            DEVICE_REGISTER,
            &RegisterDeviceRequest::new(device_id),
            Auth::Bearer(short_token.as_str()),
        )?;
        user_id_from(&response)
    }

    /// Send a raw GraphQL query to the schedule gateway and return `data`.
    #[instrument(skip(self, query, variables))]
    pub fn graphql(&self, query: &str, variables: Value) -> Option<Value> {
        self.send_graphql(GraphqlRequest::new(query).with_variables(variables))
    }

    fn send_graphql(&self, request: GraphqlRequest) -> Option<Value> {
        let response = self.client.post(
            GRAPHQL_SCHEDULE,
            &request,
            Auth::Bearer(self.bearer.as_str()),
        )?;
        response.data(GRAPHQL_SCHEDULE)
    }

    fn get_data(&self, path: &str) -> Option<Value> {
        let response = self.client.get(path, Auth::Bearer(self.bearer.as_str()))?;
        response.data(path)
    }

    #[instrument(skip(self))]
    pub fn profile(&self) -> Result<Option<Value>> {
        Ok(self.send_graphql(requests::profile(&self.templates)?))
    }

    #[instrument(skip(self))]
    pub fn news(&self) -> Result<Option<Value>> {
        Ok(self.send_graphql(requests::news(&self.templates)?))
    }

    #[instrument(skip(self))]
    pub fn news_item(&self, news_id: u64) -> Result<Option<Value>> {
        Ok(self.send_graphql(requests::news_item(&self.templates, news_id)?))
    }

    #[instrument(skip(self))]
    pub fn qr_code(&self) -> Result<Option<Value>> {
        Ok(self.send_graphql(requests::qr_code(&self.templates)?))
    }

    #[instrument(skip(self))]
    pub fn lessons(&self, query: &LessonsQuery) -> Result<Option<Value>> {
        Ok(self.send_graphql(requests::lessons(&self.templates, query)?))
    }

    #[instrument(skip(self))]
    pub fn can_lesson_feedback(&self, guid: &LessonGuid) -> Result<Option<Value>> {
        Ok(self.send_graphql(requests::can_lesson_feedback(&self.templates, guid)?))
    }

    /// Always returns [`Error::Unsupported`]; nothing is sent.
    #[deprecated(note = "lesson feedback is not accepted by the server")]
    pub fn lesson_feedback(&self, _feedback: &LessonFeedback) -> Result<Option<Value>> {
        Err(Error::Unsupported {
            operation: "lesson_feedback",
        })
    }

    #[instrument(skip(self))]
    pub fn mfc_units(&self) -> Option<Value> {
        self.get_data(MFC_UNITS)
    }

    #[instrument(skip(self))]
    pub fn user_requests(&self) -> Option<Value> {
        self.get_data(USER_REQUESTS)
    }
}

fn create_short_token(client: &HttpClient, credentials: &Credentials) -> Option<ShortToken> {
    info!("Requesting short token");

    let request = TokenRequest {
        username: credentials.login(),
        password: credentials.password(),
    };
    let response = client.post(TOKEN, &request, Auth::None)?;
    short_token_from(&response)
}

impl std::fmt::Debug for BlackBoxSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlackBoxSession")
            .field("base_url", self.client.base())
            .field("credentials", &self.credentials)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
