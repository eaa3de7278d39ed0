//! Print the CLI version.

use anyhow::Result;
use clap::Args;

use crate::upgrade;

/// Arguments for `tessera version`.
#[derive(Args)]
pub struct VersionCommand {}

impl VersionCommand {
    pub fn execute(self) -> Result<()> {
        println!("tessera version {}", upgrade::current_version());
        Ok(())
    }
}
