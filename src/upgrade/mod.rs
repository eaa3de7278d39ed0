//! Self-update for the Tessera CLI binary.
//!
//! The flow is a small state machine, transient within one invocation:
//!
//! ```text
//! versions fetched -> source build        (no-op)
//!                  -> already latest      (no-op)
//!                  -> awaiting confirm    -> declined (no-op)
//!                                         -> updating -> updated | failed
//! ```
//!
//! The comparison logic is pure; the terminal prompt arrives as an
//! injected callback and the package-manager interaction as an
//! [`UpgradeRunner`], so every branch is testable without a network or a
//! subprocess.

pub mod homebrew;
pub mod release;

pub use homebrew::{HomebrewRunner, UpgradeRunner};
pub use release::{DEV_VERSION, current_version, latest_version};

use semver::Version;
use tracing::debug;

use crate::core::CliError;

/// Terminal state of one `update` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The binary runs from source (`dev` sentinel); updating is disabled.
    SourceBuild,
    /// Current version is at least the latest published one.
    AlreadyLatest,
    /// A newer version exists but the user did not confirm.
    Declined,
    /// The package-manager upgrade completed.
    Updated,
}

/// Pure comparison half of the update flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    SourceBuild,
    AlreadyLatest,
    UpdateAvailable,
}

fn decide(current: &str, latest: &str) -> Result<Decision, CliError> {
    if current == DEV_VERSION {
        return Ok(Decision::SourceBuild);
    }

    let parse = |input: &str| {
        Version::parse(input.trim_start_matches('v')).map_err(|_| CliError::VersionParse {
            input: input.to_string(),
        })
    };
    let current = parse(current)?;
    let latest = parse(latest)?;

    if current >= latest {
        Ok(Decision::AlreadyLatest)
    } else {
        Ok(Decision::UpdateAvailable)
    }
}

/// Whether `answer` confirms the upgrade. Only the literal token `yes`,
/// case-insensitively, proceeds; anything else is a silent no-op.
fn confirms(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Compare `current` against `latest` and, on explicit confirmation, run
/// the package-manager upgrade.
///
/// `confirm` is invoked only when an update is actually available; it
/// returns whatever the user typed. The runner is consulted only after a
/// confirming answer.
pub async fn compare_and_update<C, R>(
    current: &str,
    latest: &str,
    confirm: C,
    runner: &R,
) -> Result<UpdateOutcome, CliError>
where
    C: FnOnce() -> String,
    R: UpgradeRunner,
{
    match decide(current, latest)? {
        Decision::SourceBuild => {
            debug!("running from source, skipping update");
            return Ok(UpdateOutcome::SourceBuild);
        }
        Decision::AlreadyLatest => {
            debug!("already on latest version {current}");
            return Ok(UpdateOutcome::AlreadyLatest);
        }
        Decision::UpdateAvailable => {}
    }

    if !confirms(&confirm()) {
        debug!("update to {latest} declined");
        return Ok(UpdateOutcome::Declined);
    }

    runner.verify_managed_install().await?;
    runner.run_upgrade().await?;
    Ok(UpdateOutcome::Updated)
}

/// Decide whether a startup update notice should be shown.
///
/// The check is best-effort: a failed fetch (`Err`) never produces a
/// notice and never blocks the primary command. `dev` builds and malformed
/// versions stay silent too. Returns the newer version when one exists.
pub fn startup_notice(current: &str, fetched_latest: Result<String, CliError>) -> Option<String> {
    let latest = match fetched_latest {
        Ok(v) => v,
        Err(e) => {
            debug!("startup update check failed: {e}");
            return None;
        }
    };

    match decide(current, &latest) {
        Ok(Decision::UpdateAvailable) => Some(latest),
        _ => None,
    }
}
