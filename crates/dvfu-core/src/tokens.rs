//! Token types for BlackBox and ESA authentication.

use std::fmt;

/// A long-lived bearer token.
///
/// For BlackBox this is supplied by the caller; for ESA it is issued by the
/// OAuth password grant. Sent as `Authorization: Bearer <token>`.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Create a new bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}

/// An ephemeral BlackBox token used only to register a device.
///
/// Obtained from `POST v1/token` and never refreshed.
///
/// # Security
///
/// - Never logged or displayed in Debug output
#[derive(Clone, PartialEq, Eq)]
pub struct ShortToken(String);

impl ShortToken {
    /// Create a new short token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ShortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShortToken").field(&"[REDACTED]").finish()
    }
}

/// Acquisition state of a token a session mints for itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenState<T> {
    /// No request has been made yet.
    #[default]
    Unfetched,
    /// The last request produced this token.
    Fetched(T),
    /// The last request did not produce a token.
    FetchFailed,
}

impl<T> TokenState<T> {
    /// Record the outcome of a token request.
    pub fn from_fetch(token: Option<T>) -> Self {
        match token {
            Some(token) => TokenState::Fetched(token),
            None => TokenState::FetchFailed,
        }
    }

    /// Returns the token if one was fetched.
    pub fn token(&self) -> Option<&T> {
        match self {
            TokenState::Fetched(token) => Some(token),
            _ => None,
        }
    }

    /// Returns true if no request has been made yet.
    pub fn is_unfetched(&self) -> bool {
        matches!(self, TokenState::Unfetched)
    }
}
