//! BlackBox: the schedule, news and profile gateway of the mobile app.
//!
//! A [`BlackBoxSession`] holds two credentials. The long-lived bearer token
//! is supplied by the caller and authorizes the GraphQL and MFC endpoints.
//! The short token is minted from the login and password and is only used to
//! register a device.

#[cfg(feature = "blocking")]
pub mod blocking;
mod endpoints;
mod requests;
mod session;

pub use endpoints::template;
pub use requests::bundled_templates;
pub use session::BlackBoxSession;
