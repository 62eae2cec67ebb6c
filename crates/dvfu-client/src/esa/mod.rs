//! ESA: the OAuth token service.
//!
//! An [`EsaSession`] trades a login and password for an access token using
//! the password grant. Only the token call exists so far.

#[cfg(feature = "blocking")]
pub mod blocking;
mod endpoints;
mod session;

use std::time::Duration;

use dvfu_core::BearerToken;

pub use session::EsaSession;

/// An access token issued by ESA, with the metadata it came with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsaToken {
    pub access_token: BearerToken,
    pub token_type: Option<String>,
    pub expires_in: Option<Duration>,
}
