//! Initialize a new Tessera project from a published template.
//!
//! Downloads the project archive, extracts it in an isolated staging
//! directory, and moves it into place only once the whole tree is ready:
//!
//! ```bash
//! tessera init quickstart .
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::installer::Installer;

/// Arguments for `tessera init`.
#[derive(Args)]
pub struct InitCommand {
    /// Name of the demo project to initialize.
    #[arg(value_name = "PROJECT")]
    project: String,

    /// Directory to create the project in; must be empty or not exist yet.
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,
}

impl InitCommand {
    pub async fn execute(self) -> Result<()> {
        println!("Downloading project {}...", self.project.bold());

        let installer = Installer::new()?;
        let installed = installer.install(&self.project, &self.path).await?;

        println!(
            "{}",
            format!(
                "Project {} was created in {}",
                self.project,
                installed.display()
            )
            .green()
        );
        Ok(())
    }
}
