//! Async ESA session.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use dvfu_core::{AppCode, BearerToken, ClientConfig, Credentials, Result, ServiceUrl, TokenState};

use crate::http::{Auth, HttpClient, esa_headers};

use super::EsaToken;
use super::endpoints::{TOKEN_CREATE, TokenCreateRequest, token_from};

/// An async session holding an ESA access token.
///
/// Sessions are cheap to clone (they use internal `Arc`).
#[derive(Clone)]
pub struct EsaSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    base_url: ServiceUrl,
    credentials: Credentials,
    token: TokenState<EsaToken>,
}

impl EsaSession {
    /// Request an access token with the password grant and build a session.
    ///
    /// A token request that fails on the network or the server leaves the
    /// session without a token; it does not fail construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the app code cannot be sent as a header or the
    /// HTTP client cannot be built.
    #[instrument(skip(config, credentials, app_code), fields(base = %config.base_url, login = %credentials.login()))]
    pub async fn login(
        config: ClientConfig,
        credentials: Credentials,
        app_code: AppCode,
    ) -> Result<Self> {
        info!("Requesting ESA token");

        let basic = Auth::Basic(app_code.as_str());
        basic.header_value()?;
        let client = HttpClient::new(&config, esa_headers(&config.base_url)?)?;

        let request = TokenCreateRequest::password_grant(credentials.login(), credentials.password());
        let token = match client.post(TOKEN_CREATE, &request, basic).await {
            Some(response) => token_from(&response),
            None => None,
        };
        let token = TokenState::from_fetch(token);
        debug!(has_token = token.token().is_some(), "ESA session created");

        Ok(Self {
            inner: Arc::new(SessionInner {
                base_url: config.base_url,
                credentials,
                token,
            }),
        })
    }

    /// Returns the access token, if the service issued one.
    pub fn token(&self) -> Option<&BearerToken> {
        self.inner.token.token().map(|t| &t.access_token)
    }

    /// Returns the issued token with its metadata.
    pub fn token_info(&self) -> Option<&EsaToken> {
        self.inner.token.token()
    }

    pub fn base_url(&self) -> &ServiceUrl {
        &self.inner.base_url
    }

    pub fn login_name(&self) -> &str {
        self.inner.credentials.login()
    }
}

impl std::fmt::Debug for EsaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsaSession")
            .field("base_url", &self.inner.base_url)
            .field("credentials", &self.inner.credentials)
            .field("token", &self.inner.token)
            .finish()
    }
}
