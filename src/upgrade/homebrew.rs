//! Homebrew-backed execution of the self-update.
//!
//! Homebrew is the one supported installation channel for self-update;
//! other channels fail with an explicit error instead of being attempted.
//! Detection asks `brew --prefix` for the install prefix and checks whether
//! the running executable lives beneath it.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::core::CliError;

/// The Homebrew formula that installs this binary.
pub const FORMULA: &str = "tessera";

/// Executes the package-manager side of a self-update.
///
/// Abstracted as a trait so the update decision logic can be tested
/// without touching a real package manager.
pub trait UpgradeRunner {
    /// Verify the running binary is managed by this runner's package
    /// manager. Returns [`CliError::UnsupportedInstallMethod`] when not.
    fn verify_managed_install(&self) -> impl Future<Output = Result<(), CliError>>;

    /// Run the update-then-upgrade sequence, streaming subprocess output
    /// to the terminal.
    fn run_upgrade(&self) -> impl Future<Output = Result<(), CliError>>;
}

/// [`UpgradeRunner`] backed by the `brew` executable on `PATH`.
pub struct HomebrewRunner {
    formula: String,
}

impl Default for HomebrewRunner {
    fn default() -> Self {
        Self {
            formula: FORMULA.to_string(),
        }
    }
}

impl HomebrewRunner {
    /// Runner for the default formula.
    pub fn new() -> Self {
        Self::default()
    }

    async fn brew_prefix(&self) -> Result<PathBuf, CliError> {
        let output = Command::new("brew")
            .arg("--prefix")
            .output()
            .await
            .map_err(|e| CliError::UpdateExec {
                reason: format!("failed to run 'brew --prefix': {e}"),
            })?;

        if !output.status.success() {
            return Err(CliError::UpdateExec {
                reason: format!("'brew --prefix' exited with {}", output.status),
            });
        }

        let prefix = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(PathBuf::from(prefix))
    }

    async fn stream_command(&self, program: &str, args: &[&str]) -> Result<(), CliError> {
        info!("running {program} {}", args.join(" "));

        let status = Command::new(program)
            .args(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| CliError::UpdateExec {
                reason: format!("failed to run '{program}': {e}"),
            })?;

        if !status.success() {
            return Err(CliError::UpdateExec {
                reason: format!("'{program} {}' exited with {status}", args.join(" ")),
            });
        }
        Ok(())
    }
}

impl UpgradeRunner for HomebrewRunner {
    async fn verify_managed_install(&self) -> Result<(), CliError> {
        let exe = std::env::current_exe()?;
        let exe = exe.canonicalize().unwrap_or(exe);

        let unsupported = || CliError::UnsupportedInstallMethod {
            path: exe.display().to_string(),
        };

        if which::which("brew").is_err() {
            debug!("brew not found on PATH");
            return Err(unsupported());
        }

        let prefix = self.brew_prefix().await?;
        let prefix = prefix.canonicalize().unwrap_or(prefix);
        debug!(
            "brew prefix {}, running executable {}",
            prefix.display(),
            exe.display()
        );

        if !is_descendant(&exe, &prefix) {
            return Err(unsupported());
        }
        Ok(())
    }

    async fn run_upgrade(&self) -> Result<(), CliError> {
        self.stream_command("brew", &["update"]).await?;
        self.stream_command("brew", &["upgrade", &self.formula]).await
    }
}

fn is_descendant(path: &Path, ancestor: &Path) -> bool {
    path.ancestors().any(|p| p == ancestor)
}
