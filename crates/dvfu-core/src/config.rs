//! Client configuration.

use std::time::Duration;

use crate::types::ServiceUrl;

/// Production BlackBox base URL.
pub const BLACKBOX_URL: &str = "https://blackbox.dvfu.ru/";

/// Production ESA base URL.
pub const ESA_URL: &str = "https://esa.dvfu.ru/";

/// User agent of the official mobile app, sent by both clients.
pub const USER_AGENT: &str = "Dart/3.3 (dart:io)";

/// Transport configuration for one service.
///
/// Timeouts are unset by default, leaving the HTTP client's own defaults in
/// effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: ServiceUrl,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: ServiceUrl) -> Self {
        Self {
            base_url,
            timeout: None,
            connect_timeout: None,
        }
    }

    /// Configuration for the production BlackBox gateway.
    pub fn blackbox() -> Self {
        Self::new(ServiceUrl::new(BLACKBOX_URL).expect("default BlackBox URL is valid"))
    }

    /// Configuration for the production ESA service.
    pub fn esa() -> Self {
        Self::new(ServiceUrl::new(ESA_URL).expect("default ESA URL is valid"))
    }

    /// Set the total per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}
