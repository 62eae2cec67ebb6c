//! Validated input types.
//!
//! These types check their invariants at construction time, so values that
//! end up substituted into query templates or URLs are always well-formed.

mod lesson;
mod service_url;

pub use lesson::{LessonFeedback, LessonGuid, LessonsQuery, Rating, Violation};
pub use service_url::ServiceUrl;
