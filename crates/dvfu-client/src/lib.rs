//! dvfu-client - Clients for the DVFU BlackBox and ESA APIs.
//!
//! Both services come in two flavors: an async session built on tokio and
//! `reqwest`, and a blocking session under each module's `blocking`
//! submodule (enabled by the default `blocking` feature).
//!
//! Network failures never surface as errors: non-200 statuses, unreachable
//! hosts and malformed bodies are logged through `tracing` and reported as
//! `None`. [`Error`] is reserved for contract violations such as a missing
//! query template or invalid input.
//!
//! # Example
//!
//! ```no_run
//! use dvfu_client::{BearerToken, BlackBoxSession, ClientConfig, Credentials};
//!
//! # async fn example() -> Result<(), dvfu_client::Error> {
//! let session = BlackBoxSession::new(
//!     ClientConfig::blackbox(),
//!     Credentials::new("ivanov.ii", "password"),
//!     BearerToken::new("long-lived-token"),
//! )?;
//!
//! if let Some(profile) = session.profile().await? {
//!     println!("{profile:#}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod blackbox;
pub mod esa;
mod http;

pub use blackbox::{BlackBoxSession, bundled_templates};
pub use dvfu_core::{
    AppCode, BearerToken, ClientConfig, Credentials, Error, LessonFeedback, LessonGuid,
    LessonsQuery, QueryTemplate, Rating, Result, ServiceUrl, ShortToken, TemplateStore, TokenState,
    Violation,
};
pub use esa::{EsaSession, EsaToken};
