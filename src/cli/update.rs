//! Update the CLI to the latest published version.
//!
//! Compares the running version against the latest release, asks for
//! confirmation, and hands the actual binary replacement to Homebrew —
//! the only supported self-update channel.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::upgrade::{self, HomebrewRunner, UpdateOutcome};

/// Arguments for `tessera update`.
#[derive(Args)]
pub struct UpdateCommand {
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
}

impl UpdateCommand {
    pub async fn execute(self) -> Result<()> {
        let current = upgrade::current_version();
        let client = upgrade::release::release_client()?;
        let latest = upgrade::latest_version(&client).await?;

        let assume_yes = self.yes;
        let latest_for_prompt = latest.clone();
        let confirm = move || {
            if assume_yes {
                return "yes".to_string();
            }
            prompt(&format!(
                "Update from {current} to {latest_for_prompt}? Type 'yes' to continue: "
            ))
        };

        let outcome =
            upgrade::compare_and_update(current, &latest, confirm, &HomebrewRunner::new()).await?;

        match outcome {
            UpdateOutcome::SourceBuild => {
                println!("Running from source; update through your checkout instead.");
            }
            UpdateOutcome::AlreadyLatest => {
                println!("Already on the latest version ({current}).");
            }
            UpdateOutcome::Declined => {
                println!("Update cancelled.");
            }
            UpdateOutcome::Updated => {
                println!("{}", format!("Updated to version {latest}.").green().bold());
            }
        }
        Ok(())
    }
}

fn prompt(message: &str) -> String {
    print!("{message}");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    let _ = std::io::stdin().read_line(&mut answer);
    answer
}
