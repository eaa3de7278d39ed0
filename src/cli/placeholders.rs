//! Commands that exist on the platform roadmap but are not implemented
//! yet. They keep the CLI surface aligned with the documentation and exit
//! successfully after saying so.

use anyhow::Result;
use clap::Args;

fn not_implemented() -> Result<()> {
    println!("NOT IMPLEMENTED.");
    Ok(())
}

/// Arguments for `tessera auth`.
#[derive(Args)]
pub struct AuthCommand {}

impl AuthCommand {
    pub fn execute(self) -> Result<()> {
        not_implemented()
    }
}

/// Arguments for `tessera config`.
#[derive(Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        not_implemented()
    }
}

/// Arguments for `tessera contact`.
#[derive(Args)]
pub struct ContactCommand {}

impl ContactCommand {
    pub fn execute(self) -> Result<()> {
        not_implemented()
    }
}

/// Arguments for `tessera debug` (hidden).
#[derive(Args)]
pub struct DebugCommand {}

impl DebugCommand {
    pub fn execute(self) -> Result<()> {
        not_implemented()
    }
}
