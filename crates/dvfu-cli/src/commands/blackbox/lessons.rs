//! Lessons command implementation.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset};
use clap::Args;

use dvfu_client::{BlackBoxSession, LessonsQuery};

use crate::output;

#[derive(Args, Debug)]
pub struct LessonsArgs {
    /// Range start, RFC 3339 (e.g., 2024-09-02T00:00:00+10:00)
    #[arg(long)]
    pub start: String,

    /// Range end, RFC 3339
    #[arg(long)]
    pub end: String,

    /// Numeric group identifier
    #[arg(long)]
    pub group: u64,
}

pub async fn run(args: LessonsArgs, session: &BlackBoxSession, compact: bool) -> Result<()> {
    let start = parse_time(&args.start).context("Invalid --start")?;
    let end = parse_time(&args.end).context("Invalid --end")?;
    if end < start {
        bail!("--end must not be before --start");
    }

    let query = LessonsQuery::new(start, end, args.group);
    let lessons = session.lessons(&query).await?;
    output::data(lessons, "lessons", compact)
}

fn parse_time(s: &str) -> Result<DateTime<FixedOffset>> {
    Ok(DateTime::parse_from_rfc3339(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_timestamps() {
        let time = parse_time("2024-09-02T08:30:00+10:00").unwrap();
        assert_eq!(time.offset().local_minus_utc(), 10 * 3600);
    }

    #[test]
    fn rejects_bare_dates() {
        assert!(parse_time("2024-09-02").is_err());
    }
}
