//! HTTP transport shared by the BlackBox and ESA sessions.
//!
//! Fixed headers live on the client as defaults. Credentials are attached
//! per request, so a session never mutates shared header state.

#[cfg(feature = "blocking")]
pub(crate) mod blocking;

use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HOST, HeaderMap,
    HeaderName, HeaderValue, USER_AGENT,
};
use serde::Serialize;
use tracing::{debug, error, instrument, trace, warn};

use dvfu_core::config::USER_AGENT as APP_USER_AGENT;
use dvfu_core::error::{InvalidInputError, TransportError};
use dvfu_core::{ClientConfig, Error, RawResponse, ServiceUrl};

/// Credential attached to a single request.
#[derive(Clone, Copy)]
pub(crate) enum Auth<'a> {
    None,
    Bearer(&'a str),
    Basic(&'a str),
}

impl Auth<'_> {
    /// Build the `Authorization` header value, if any.
    pub(crate) fn header_value(self) -> Result<Option<HeaderValue>, Error> {
        let value = match self {
            Auth::None => return Ok(None),
            Auth::Bearer(token) => format!("Bearer {}", token),
            Auth::Basic(code) => format!("Basic {}", code),
        };
        let mut value = HeaderValue::from_str(&value).map_err(|_| InvalidInputError::Header {
            header: "authorization",
        })?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

/// Default headers mimicking the mobile app against BlackBox.
pub(crate) fn blackbox_headers(base: &ServiceUrl) -> Result<HeaderMap, Error> {
    build_headers(&[
        (USER_AGENT, APP_USER_AGENT),
        (ACCEPT, "*/*"),
        (ACCEPT_LANGUAGE, "ru-RU"),
        (HOST, base.authority().as_str()),
        (CONTENT_TYPE, "application/json"),
    ])
}

/// Default headers mimicking the mobile app against ESA.
pub(crate) fn esa_headers(base: &ServiceUrl) -> Result<HeaderMap, Error> {
    build_headers(&[
        (USER_AGENT, APP_USER_AGENT),
        (ACCEPT, "application/json"),
        (CACHE_CONTROL, "no-cache"),
        (HOST, base.authority().as_str()),
        (CONTENT_TYPE, "application/json"),
    ])
}

fn build_headers(pairs: &[(HeaderName, &str)]) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let value = HeaderValue::from_str(value).map_err(|_| InvalidInputError::Other {
            message: format!("invalid value for header {}", name),
        })?;
        headers.insert(name.clone(), value);
    }
    Ok(headers)
}

fn build_error(err: reqwest::Error) -> Error {
    TransportError::Build {
        message: err.to_string(),
    }
    .into()
}

/// Async HTTP client bound to one service base URL.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base: ServiceUrl,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, headers: HeaderMap) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(build_error)?;

        Ok(Self {
            client,
            base: config.base_url.clone(),
        })
    }

    pub fn base(&self) -> &ServiceUrl {
        &self.base
    }

    /// POST a JSON body. Returns `None` on transport failure.
    #[instrument(skip(self, body, auth), fields(base = %self.base))]
    pub async fn post<B>(&self, path: &str, body: &B, auth: Auth<'_>) -> Option<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!(path, "POST");
        let request = self.client.post(self.base.endpoint(path)).json(body);
        self.execute(path, request, auth).await
    }

    /// GET a path. Returns `None` on transport failure.
    #[instrument(skip(self, auth), fields(base = %self.base))]
    pub async fn get(&self, path: &str, auth: Auth<'_>) -> Option<RawResponse> {
        debug!(path, "GET");
        let request = self.client.get(self.base.endpoint(path));
        self.execute(path, request, auth).await
    }

    async fn execute(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
        auth: Auth<'_>,
    ) -> Option<RawResponse> {
        let request = match auth.header_value() {
            Ok(Some(value)) => request.header(AUTHORIZATION, value),
            Ok(None) => request,
            Err(e) => {
                warn!(path, error = %e, "request not sent");
                return None;
            }
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(path, error = %e, "request failed");
                return None;
            }
        };

        let status = response.status().as_u16();
        trace!(path, status, "response");
        match response.bytes().await {
            Ok(body) => Some(RawResponse::new(status, body.to_vec())),
            Err(e) => {
                error!(path, status, error = %e, "failed to read response body");
                None
            }
        }
    }
}
