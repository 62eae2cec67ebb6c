//! Error types for the dvfu clients.
//!
//! Network-level failures (non-200 statuses, unreachable hosts, bodies that
//! do not parse) are logged and surfaced as absent values by the sessions.
//! This error type covers the rest: contract violations such as a missing
//! query template, invalid input, or an operation the server no longer
//! supports.

use thiserror::Error;

/// The unified error type for dvfu operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client could not be constructed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Query template lookup or loading failed.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Input validation errors (bad GUID, rating, URL, header value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The operation exists on the server API but does not work there.
    #[error("unsupported operation: {operation}")]
    Unsupported { operation: &'static str },
}

/// Transport-level errors that cannot be reported as an absent result.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Building the HTTP client failed (TLS backend, invalid default header).
    #[error("failed to build HTTP client: {message}")]
    Build { message: String },
}

/// Query template errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template with this name is loaded.
    #[error("no query template named '{name}'")]
    Missing { name: String },

    /// Reading the template directory or a template file failed.
    #[error("failed to read templates from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service base URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Invalid lesson GUID.
    #[error("invalid lesson GUID '{value}': {reason}")]
    LessonGuid { value: String, reason: String },

    /// Lesson rating outside -2..=2.
    #[error("invalid rating {value}: must be between -2 and 2")]
    Rating { value: i64 },

    /// Unknown violation id.
    #[error("invalid violation id {value}: must be between 0 and 4")]
    Violation { value: i64 },

    /// A value that cannot be sent as an HTTP header.
    #[error("invalid header value for {header}")]
    Header { header: &'static str },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl Error {
    /// Shorthand for a missing template error.
    pub fn missing_template(name: impl Into<String>) -> Self {
        Error::Template(TemplateError::Missing { name: name.into() })
    }

    /// Returns true if this error reports an unsupported operation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_message_names_template() {
        let err = Error::missing_template("ReadLessons");
        assert_eq!(
            err.to_string(),
            "template error: no query template named 'ReadLessons'"
        );
    }

    #[test]
    fn unsupported_is_detected() {
        let err = Error::Unsupported {
            operation: "lesson_feedback",
        };
        assert!(err.is_unsupported());
        assert!(!Error::missing_template("x").is_unsupported());
    }
}
