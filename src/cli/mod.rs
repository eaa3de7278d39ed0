//! Command-line interface for the Tessera CLI.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic. Commands are single-shot: they perform at most one
//! network round trip or one filesystem operation, print their result, and
//! return.
//!
//! Before dispatching, a best-effort update notice runs: when a newer
//! release is published, a one-line hint is printed. A failed check is
//! logged at debug level and never blocks the command.

mod init;
mod placeholders;
mod run;
mod update;
mod version;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::upgrade;

/// Root command for the Tessera CLI.
///
/// Global verbosity flags are inherited by all subcommands; `--verbose`
/// and `--quiet` are mutually exclusive.
#[derive(Parser)]
#[command(
    name = "tessera",
    about = "Tessera CLI - the entrypoint of the Tessera testing platform",
    version = upgrade::current_version(),
    long_about = "The entrypoint of the Tessera testing platform. Initialize demo \
                  projects, launch test runs, and keep the CLI up to date."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Tessera project from a published template
    Init(init::InitCommand),

    /// Launch a test run on the Tessera platform
    Run(run::RunCommand),

    /// Update the CLI to the latest version
    Update(update::UpdateCommand),

    /// Print the CLI version
    Version(version::VersionCommand),

    /// Authenticate with Tessera
    Auth(placeholders::AuthCommand),

    /// Manage your CLI configuration
    Config(placeholders::ConfigCommand),

    /// Get help or give feedback
    Contact(placeholders::ContactCommand),

    /// Start a multiverse debugging session
    #[command(hide = true)]
    Debug(placeholders::DebugCommand),
}

impl Cli {
    /// The log filter implied by the verbosity flags, unless `RUST_LOG`
    /// overrides it.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }

    /// Run the selected command.
    pub async fn execute(self) -> Result<()> {
        if !self.quiet {
            notify_update_available().await;
        }

        match self.command {
            Commands::Init(cmd) => cmd.execute().await,
            Commands::Run(cmd) => cmd.execute().await,
            Commands::Update(cmd) => cmd.execute().await,
            Commands::Version(cmd) => cmd.execute(),
            Commands::Auth(cmd) => cmd.execute(),
            Commands::Config(cmd) => cmd.execute(),
            Commands::Contact(cmd) => cmd.execute(),
            Commands::Debug(cmd) => cmd.execute(),
        }
    }
}

/// Eagerly inform users when a new release is available.
///
/// Source builds skip the check entirely (before any network traffic), and
/// fetch failures are swallowed so the primary command always runs.
async fn notify_update_available() {
    let current = upgrade::current_version();
    if current == upgrade::DEV_VERSION {
        return;
    }

    let fetched = match upgrade::release::release_client() {
        Ok(client) => upgrade::latest_version(&client).await,
        Err(e) => Err(e),
    };

    if upgrade::startup_notice(current, fetched).is_some() {
        println!(
            "A new update is available. To install it, run '{}'",
            "tessera update".cyan()
        );
    }
}
