//! Register device command implementation.

use anyhow::{Result, bail};
use clap::Args;

use dvfu_client::BlackBoxSession;

use crate::output;

#[derive(Args, Debug)]
pub struct RegisterDeviceArgs {
    /// Device identifier (a random UUID when omitted)
    #[arg(long)]
    pub device_id: Option<String>,
}

pub async fn run(args: RegisterDeviceArgs, session: &BlackBoxSession) -> Result<()> {
    let Some(user_id) = session.register_device(args.device_id.as_deref()).await else {
        output::error("Device registration failed");
        bail!("device registration returned no user id (rerun with -v for details)");
    };

    output::success("Device registered");
    output::field("User ID", &user_id);

    Ok(())
}
