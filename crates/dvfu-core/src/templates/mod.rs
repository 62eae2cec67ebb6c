//! GraphQL query templates.
//!
//! Queries are stored as plain `.gql` text with `#NAME#` placeholders that
//! are replaced textually, first occurrence only.

mod store;

pub use store::{QueryTemplate, TemplateStore};

/// Placeholder markers used by the bundled BlackBox templates.
pub mod placeholder {
    pub const START_TIME: &str = "#START_TIME#";
    pub const END_TIME: &str = "#END_TIME#";
    /// Matched with its surrounding quotes.
    pub const GROUP: &str = "\"#GROUP#\"";
    pub const LESSON_GUID: &str = "#LESSON_GUID#";
    pub const LESSON_INTEREST: &str = "#LESSON_INTEREST#";
    pub const LESSON_USEFULNESS: &str = "#LESSON_USEFULNESS#";
    pub const LESSON_CLARITY: &str = "#LESSON_CLARITY#";
    pub const LESSON_VIOLATION_ID: &str = "#LESSON_VIOLATION_ID#";
    pub const LESSON_COMMENT: &str = "#LESSON_COMMENT#";
}

/// Replace the first occurrence of `placeholder` in `text` with `value`.
pub fn replace_first(text: &str, placeholder: &str, value: &str) -> String {
    text.replacen(placeholder, value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_only_first() {
        assert_eq!(replace_first("#A# #A#", "#A#", "x"), "x #A#");
    }

    #[test]
    fn missing_placeholder_is_noop() {
        assert_eq!(replace_first("query {}", "#A#", "x"), "query {}");
    }
}
