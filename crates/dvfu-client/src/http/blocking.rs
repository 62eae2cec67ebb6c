//! Blocking counterpart of [`HttpClient`](super::HttpClient).

use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::Serialize;
use tracing::{debug, error, instrument, trace, warn};

use dvfu_core::{ClientConfig, Error, RawResponse, ServiceUrl};

use super::{Auth, build_error};

/// Blocking HTTP client bound to one service base URL.
///
/// Must not be created or dropped inside an async runtime.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::blocking::Client,
    base: ServiceUrl,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, headers: HeaderMap) -> Result<Self, Error> {
        let mut builder = reqwest::blocking::Client::builder().default_headers(headers);
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

    #[instrument(skip(self, body, auth), fields(base = %self.base))]
    pub fn post<B>(&self, path: &str, body: &B, auth: Auth<'_>) -> Option<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!(path, "POST");
        let request = self.client.post(self.base.endpoint(path)).json(body);
        self.execute(path, request, auth)
    }

    #[instrument(skip(self, auth), fields(base = %self.base))]
    pub fn get(&self, path: &str, auth: Auth<'_>) -> Option<RawResponse> {
        debug!(path, "GET");
        let request = self.client.get(self.base.endpoint(path));
        self.execute(path, request, auth)
    }

    fn execute(
        &self,
        path: &str,
        request: reqwest::blocking::RequestBuilder,
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

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => {
                error!(path, error = %e, "request failed");
                return None;
            }
        };

        let status = response.status().as_u16();
        trace!(path, status, "response");
        match response.bytes() {
            Ok(body) => Some(RawResponse::new(status, body.to_vec())),
            Err(e) => {
                error!(path, status, error = %e, "failed to read response body");
                None
            }
        }
    }
}
