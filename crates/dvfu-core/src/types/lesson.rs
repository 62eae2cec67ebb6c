//! Lesson query inputs and their template renderers.

use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::templates::{placeholder, replace_first};

/// A lesson identifier as used by the schedule API.
///
/// Restricted to ASCII alphanumerics and `-`, which covers GUIDs and keeps
/// the value safe to splice into a query template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LessonGuid(String);

impl LessonGuid {
    /// Create a new lesson GUID, validating its characters.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidInputError::LessonGuid {
                value: s,
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if let Some(c) = s.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
            return Err(InvalidInputError::LessonGuid {
                reason: format!("unexpected character {:?}", c),
                value: s,
            }
            .into());
        }
        Ok(Self(s))
    }

    /// Returns the GUID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LessonGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LessonGuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A lesson rating in the range -2..=2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rating(i8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, Error> {
        if (-2..=2).contains(&value) {
            Ok(Self(value as i8))
        } else {
            Err(InvalidInputError::Rating { value }.into())
        }
    }

    pub fn value(self) -> i8 {
        self.0
    }
}

/// The problem reported with a lesson, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Violation {
    #[default]
    None,
    TeacherStudentConflict,
    BrokenEquipment,
    UncomfortableConditions,
    TeacherAbsent,
}

impl Violation {
    /// Returns the numeric id the API expects.
    pub fn id(self) -> u8 {
        match self {
            Violation::None => 0,
            Violation::TeacherStudentConflict => 1,
            Violation::BrokenEquipment => 2,
            Violation::UncomfortableConditions => 3,
            Violation::TeacherAbsent => 4,
        }
    }
}

impl TryFrom<i64> for Violation {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Violation::None),
            1 => Ok(Violation::TeacherStudentConflict),
            2 => Ok(Violation::BrokenEquipment),
            3 => Ok(Violation::UncomfortableConditions),
            4 => Ok(Violation::TeacherAbsent),
            _ => Err(InvalidInputError::Violation { value }.into()),
        }
    }
}

/// Parameters of the `ReadLessons` query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonsQuery {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub group: u64,
}

impl LessonsQuery {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>, group: u64) -> Self {
        Self { start, end, group }
    }

    /// Substitute the time window and group into a `ReadLessons` template.
    ///
    /// The group placeholder is matched together with its quotes, so the
    /// group id lands in the query as a bare number.
    pub fn render(&self, template: &str) -> String {
        let query = replace_first(template, placeholder::START_TIME, &self.start.to_rfc3339());
        let query = replace_first(&query, placeholder::END_TIME, &self.end.to_rfc3339());
        replace_first(&query, placeholder::GROUP, &self.group.to_string())
    }
}

/// A lesson evaluation for the `UpdateLessonFeedback` mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonFeedback {
    pub guid: LessonGuid,
    pub interest: Rating,
    pub usefulness: Rating,
    pub clarity: Rating,
    pub violation: Violation,
    pub comment: String,
}

impl LessonFeedback {
    /// Feedback with neutral ratings, no violation and an empty comment.
    pub fn new(guid: LessonGuid) -> Self {
        Self {
            guid,
            interest: Rating::default(),
            usefulness: Rating::default(),
            clarity: Rating::default(),
            violation: Violation::default(),
            comment: String::new(),
        }
    }

    pub fn interest(mut self, rating: Rating) -> Self {
        self.interest = rating;
        self
    }

    pub fn usefulness(mut self, rating: Rating) -> Self {
        self.usefulness = rating;
        self
    }

    pub fn clarity(mut self, rating: Rating) -> Self {
        self.clarity = rating;
        self
    }

    pub fn violation(mut self, violation: Violation) -> Self {
        self.violation = violation;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Substitute every field into an `UpdateLessonFeedback` template.
    ///
    /// The comment is escaped as GraphQL string content and expects the
    /// template to quote its placeholder.
    pub fn render(&self, template: &str) -> String {
        let query = replace_first(template, placeholder::LESSON_GUID, self.guid.as_str());
        let query = replace_first(
            &query,
            placeholder::LESSON_INTEREST,
            &self.interest.value().to_string(),
        );
        let query = replace_first(
            &query,
            placeholder::LESSON_USEFULNESS,
            &self.usefulness.value().to_string(),
        );
        let query = replace_first(
            &query,
            placeholder::LESSON_CLARITY,
            &self.clarity.value().to_string(),
        );
        let query = replace_first(
            &query,
            placeholder::LESSON_VIOLATION_ID,
            &self.violation.id().to_string(),
        );
        replace_first(
            &query,
            placeholder::LESSON_COMMENT,
            &escape_graphql_string(&self.comment),
        )
    }
}

/// Escape text for use inside a double-quoted GraphQL string literal.
pub(crate) fn escape_graphql_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
