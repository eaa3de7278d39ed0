//! Global constants used throughout the Tessera CLI.
//!
//! Timeouts and duration parameters live here so the magic numbers are
//! discoverable and adjustable in one place.

use std::time::Duration;

/// Timeout for downloading a project archive (120 seconds).
///
/// The underlying transport has no default timeout, so a hung connection
/// would otherwise block the command indefinitely.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for fetching release metadata (10 seconds).
///
/// The release check also runs best-effort at startup, so it must give up
/// quickly rather than delay the primary command.
pub const RELEASE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Estimated environment-setup overhead added to a test run's requested
/// duration when displaying the approximate completion time.
///
/// This is an estimate of platform behavior, not a contract; keep it here
/// rather than inline so it can become configurable without touching the
/// run command.
pub const SETUP_OVERHEAD: Duration = Duration::from_secs(10 * 60);

/// Minimum accepted test-run duration, in minutes.
pub const MIN_RUN_DURATION_MINUTES: i64 = 15;

/// Name of the per-user directory that holds CLI state, including install
/// staging directories.
pub const APP_DIR_NAME: &str = "tessera";
