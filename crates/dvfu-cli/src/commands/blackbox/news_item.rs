//! News item command implementation.

use anyhow::Result;
use clap::Args;

use dvfu_client::BlackBoxSession;

use crate::output;

#[derive(Args, Debug)]
pub struct NewsItemArgs {
    /// Numeric news identifier
    pub id: u64,
}

pub async fn run(args: NewsItemArgs, session: &BlackBoxSession, compact: bool) -> Result<()> {
    let item = session.news_item(args.id).await?;
    output::data(item, "news item", compact)
}
