//! Blocking ESA session.

use tracing::{debug, info, instrument};

use dvfu_core::{AppCode, BearerToken, ClientConfig, Credentials, Result, ServiceUrl, TokenState};

use crate::http::blocking::HttpClient;
use crate::http::{Auth, esa_headers};

use super::EsaToken;
use super::endpoints::{TOKEN_CREATE, TokenCreateRequest, token_from};

/// A blocking session holding an ESA access token.
#[derive(Debug)]
pub struct EsaSession {
    base_url: ServiceUrl,
    credentials: Credentials,
    token: TokenState<EsaToken>,
}

impl EsaSession {
    /// Request an access token with the password grant and build a session.
    ///
    /// Same contract as the async [`login`](super::EsaSession::login).
    #[instrument(skip(config, credentials, app_code), fields(base = %config.base_url, login = %credentials.login()))]
    pub fn login(config: ClientConfig, credentials: Credentials, app_code: AppCode) -> Result<Self> {
        info!("Requesting ESA token");

        let basic = Auth::Basic(app_code.as_str());
        basic.header_value()?;
        let client = HttpClient::new(&config, esa_headers(&config.base_url)?)?;

        let request = TokenCreateRequest::password_grant(credentials.login(), credentials.password());
        let token = TokenState::from_fetch(
            client
                .post(TOKEN_CREATE, &request, basic)
                .and_then(|response| token_from(&response)),
        );
        debug!(has_token = token.token().is_some(), "ESA session created");

        Ok(Self {
            base_url: client.base().clone(),
            credentials,
            token,
        })
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.token.token().map(|t| &t.access_token)
    }

    pub fn token_info(&self) -> Option<&EsaToken> {
        self.token.token()
    }

    pub fn base_url(&self) -> &ServiceUrl {
        &self.base_url
    }

    pub fn login_name(&self) -> &str {
        self.credentials.login()
    }
}
