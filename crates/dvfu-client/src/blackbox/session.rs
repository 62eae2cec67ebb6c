//! Async BlackBox session.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use dvfu_core::{
    BearerToken, ClientConfig, Credentials, Error, LessonFeedback, LessonGuid, LessonsQuery,
    Result, ServiceUrl, ShortToken, TemplateStore, TokenState,
};

use crate::http::{Auth, HttpClient, blackbox_headers};

use super::endpoints::{
    DEVICE_REGISTER, GRAPHQL_SCHEDULE, GraphqlRequest, MFC_UNITS, RegisterDeviceRequest, TOKEN,
    TokenRequest, USER_REQUESTS, short_token_from, user_id_from,
};
use super::requests;

/// An async session against the BlackBox gateway.
///
/// Construction does no I/O. The short token is requested when it is
/// needed and none is held, then reused until [`reset_short_token`] is
/// called.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Authorization headers are built per request.
///
/// [`reset_short_token`]: BlackBoxSession::reset_short_token
#[derive(Clone)]
pub struct BlackBoxSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: HttpClient,
    credentials: Credentials,
    bearer: BearerToken,
    templates: TemplateStore,
    short_token: Mutex<TokenState<ShortToken>>,
}

impl BlackBoxSession {
    /// Create a session using the bundled query templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the bearer token cannot be sent as a header or
    /// the HTTP client cannot be built.
    pub fn new(config: ClientConfig, credentials: Credentials, bearer: BearerToken) -> Result<Self> {
        Self::with_templates(config, credentials, bearer, requests::bundled_templates())
    }

    /// Create a session with an explicit template store.
    pub fn with_templates(
        config: ClientConfig,
        credentials: Credentials,
        bearer: BearerToken,
        templates: TemplateStore,
    ) -> Result<Self> {
        Auth::Bearer(bearer.as_str()).header_value()?;
        let client = HttpClient::new(&config, blackbox_headers(&config.base_url)?)?;

        debug!(base = %config.base_url, templates = templates.len(), "BlackBox session created");

        Ok(Self {
            inner: Arc::new(SessionInner {
                client,
                credentials,
                bearer,
                templates,
                short_token: Mutex::new(TokenState::Unfetched),
            }),
        })
    }

    /// Returns the base URL this session talks to.
    pub fn base_url(&self) -> &ServiceUrl {
        self.inner.client.base()
    }

    /// Returns the login this session authenticates as.
    pub fn login(&self) -> &str {
        self.inner.credentials.login()
    }

    /// Returns the templates the endpoint methods use.
    pub fn templates(&self) -> &TemplateStore {
        &self.inner.templates
    }

    // ========================================================================
    // Short Token
    // ========================================================================

    /// Returns the short token, requesting it while none is held.
    ///
    /// A fetched token is kept until
    /// [`reset_short_token`](Self::reset_short_token); a failed request is
    /// tried again on the next call. Concurrent callers wait for the same
    /// request.
    #[instrument(skip(self), fields(login = %self.inner.credentials.login()))]
    pub async fn short_token(&self) -> Option<ShortToken> {
        let mut state = self.inner.short_token.lock().await;
        if state.token().is_none() {
            *state = TokenState::from_fetch(self.create_short_token().await);
        }
        state.token().cloned()
    }

    /// Returns the current short token state without requesting anything.
    pub async fn short_token_state(&self) -> TokenState<ShortToken> {
        self.inner.short_token.lock().await.clone()
    }

    /// Forget the short token so the next use requests a new one.
    pub async fn reset_short_token(&self) {
        *self.inner.short_token.lock().await = TokenState::Unfetched;
    }

    async fn create_short_token(&self) -> Option<ShortToken> {
        info!("Requesting short token");

        let request = TokenRequest {
            username: self.inner.credentials.login(),
            password: self.inner.credentials.password(),
        };
        let response = self.inner.client.post(TOKEN, &request, Auth::None).await?;
        short_token_from(&response)
    }

    // ========================================================================
    // Device
    // ========================================================================

    /// Register a device under the short token and return the user id.
    ///
    /// A random UUID is generated for each call without an explicit id.
    #[instrument(skip(self))]
    pub async fn register_device(&self, device_id: Option<&str>) -> Option<String> {
        let Some(short_token) = self.short_token().await else {
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

        let response = self
            .inner
            .client
            .post(
                DEVICE_REGISTER,
                &RegisterDeviceRequest::new(device_id),
                Auth::Bearer(short_token.as_str()),
            )
            .await?;
        user_id_from(&response)
    }

    // ========================================================================
    // GraphQL Gateway
    // ========================================================================

    /// Send a raw GraphQL query to the schedule gateway and return `data`.
    #[instrument(skip(self, query, variables))]
    pub async fn graphql(&self, query: &str, variables: Value) -> Option<Value> {
        self.send_graphql(GraphqlRequest::new(query).with_variables(variables))
            .await
    }

    async fn send_graphql(&self, request: GraphqlRequest) -> Option<Value> {
        let response = self
            .inner
            .client
            .post(
                GRAPHQL_SCHEDULE,
                &request,
                Auth::Bearer(self.inner.bearer.as_str()),
            )
            .await?;
        response.data(GRAPHQL_SCHEDULE)
    }

    async fn get_data(&self, path: &str) -> Option<Value> {
        let response = self
            .inner
            .client
            .get(path, Auth::Bearer(self.inner.bearer.as_str()))
            .await?;
        response.data(path)
    }

    /// The user's profile.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<Option<Value>> {
        let request = requests::profile(&self.inner.templates)?;
        Ok(self.send_graphql(request).await)
    }

    /// News from the mobile catalog.
    #[instrument(skip(self))]
    pub async fn news(&self) -> Result<Option<Value>> {
        let request = requests::news(&self.inner.templates)?;
        Ok(self.send_graphql(request).await)
    }

    /// A single news item.
    #[instrument(skip(self))]
    pub async fn news_item(&self, news_id: u64) -> Result<Option<Value>> {
        let request = requests::news_item(&self.inner.templates, news_id)?;
        Ok(self.send_graphql(request).await)
    }

    /// The key behind the user's campus pass QR code.
    #[instrument(skip(self))]
    pub async fn qr_code(&self) -> Result<Option<Value>> {
        let request = requests::qr_code(&self.inner.templates)?;
        Ok(self.send_graphql(request).await)
    }

    /// Lessons of a group within a time window.
    #[instrument(skip(self))]
    pub async fn lessons(&self, query: &LessonsQuery) -> Result<Option<Value>> {
        let request = requests::lessons(&self.inner.templates, query)?;
        Ok(self.send_graphql(request).await)
    }

    /// Whether feedback can be left for a lesson.
    #[instrument(skip(self))]
    pub async fn can_lesson_feedback(&self, guid: &LessonGuid) -> Result<Option<Value>> {
        let request = requests::can_lesson_feedback(&self.inner.templates, guid)?;
        Ok(self.send_graphql(request).await)
    }

    /// Leave feedback for a lesson.
    ///
    /// The server rejects this mutation, so nothing is sent.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    #[deprecated(note = "lesson feedback is not accepted by the server")]
    pub async fn lesson_feedback(&self, _feedback: &LessonFeedback) -> Result<Option<Value>> {
        Err(Error::Unsupported {
            operation: "lesson_feedback",
        })
    }

    // ========================================================================
    // MFC
    // ========================================================================

    /// Multifunctional center units.
    #[instrument(skip(self))]
    pub async fn mfc_units(&self) -> Option<Value> {
        self.get_data(MFC_UNITS).await
    }

    /// The user's requests to the multifunctional center.
    #[instrument(skip(self))]
    pub async fn user_requests(&self) -> Option<Value> {
        self.get_data(USER_REQUESTS).await
    }
}

impl std::fmt::Debug for BlackBoxSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlackBoxSession")
            .field("base_url", self.inner.client.base())
            .field("credentials", &self.inner.credentials)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
