//! Short token command implementation.

use anyhow::{Result, bail};

use dvfu_client::BlackBoxSession;

use crate::output;

pub async fn run(session: &BlackBoxSession) -> Result<()> {
    let Some(token) = session.short_token().await else {
        output::error("Could not obtain a short token");
        bail!("short token request failed (rerun with -v for details)");
    };

    output::field("Login", session.login());
    output::field("Short token", token.as_str());

    Ok(())
}
