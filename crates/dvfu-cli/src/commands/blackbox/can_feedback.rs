//! Lesson feedback availability command implementation.

use anyhow::{Context, Result};
use clap::Args;

use dvfu_client::{BlackBoxSession, LessonGuid};

use crate::output;

#[derive(Args, Debug)]
pub struct CanFeedbackArgs {
    /// Lesson GUID
    pub guid: String,
}

pub async fn run(args: CanFeedbackArgs, session: &BlackBoxSession, compact: bool) -> Result<()> {
    let guid = LessonGuid::new(args.guid).context("Invalid lesson GUID")?;
    let answer = session.can_lesson_feedback(&guid).await?;
    output::data(answer, "lesson feedback status", compact)
}
