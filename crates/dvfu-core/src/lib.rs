//! dvfu-core - Core types for the BlackBox and ESA API clients.
//!
//! This crate holds everything that does not touch the network: credentials
//! and token types, service URLs and client configuration, the GraphQL query
//! template store, typed lesson inputs, response envelope decoding and the
//! shared error type.

pub mod config;
pub mod credentials;
pub mod error;
pub mod response;
pub mod templates;
pub mod tokens;
pub mod types;

pub use config::ClientConfig;
pub use credentials::{AppCode, Credentials};
pub use error::Error;
pub use response::RawResponse;
pub use templates::{QueryTemplate, TemplateStore};
pub use tokens::{BearerToken, ShortToken, TokenState};
pub use types::{LessonFeedback, LessonGuid, LessonsQuery, Rating, ServiceUrl, Violation};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
