//! Login credentials and the ESA application code.

use std::fmt;

/// University account login and password.
///
/// BlackBox trades the pair for a short token and ESA for an access token.
/// `Debug` prints the login and masks the password.
///
/// ```
/// use dvfu_core::Credentials;
///
/// let creds = Credentials::new("ivanov.ii", "hunter2");
/// assert_eq!(creds.login(), "ivanov.ii");
/// assert!(!format!("{:?}", creds).contains("hunter2"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Account login, e.g. `ivanov.ii`.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Plain password, for request bodies only.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Base64-encoded client application credential for ESA.
///
/// Sent as `Authorization: Basic <code>` on the token request only.
#[derive(Clone)]
pub struct AppCode(String);

impl AppCode {
    /// Wrap an already Base64-encoded application code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the encoded code for use in the Basic authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AppCode").field(&"[REDACTED]").finish()
    }
}
