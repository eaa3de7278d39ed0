//! Error handling for the Tessera CLI.
//!
//! Two kinds of failure flow through the CLI and they are reported
//! differently:
//!
//! 1. **User-input errors** (unknown project name, non-empty target
//!    directory, unsupported install channel, malformed version) are printed
//!    as a single clear message with no internal diagnostics.
//! 2. **System errors** (network, filesystem, subprocess) carry the failing
//!    step and the underlying cause so they can be diagnosed.
//!
//! The typed [`CliError`] enum covers every failure mode the CLI produces
//! itself; [`ErrorContext`] wraps any error for terminal display and
//! [`user_friendly_error`] attaches suggestions for the common cases.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for Tessera CLI operations.
///
/// Variants carry enough context to render a useful message on their own;
/// the command layer adds no further wrapping for user-input errors.
#[derive(Error, Debug)]
pub enum CliError {
    /// The requested project does not exist in the catalog.
    #[error("unknown project '{name}' (available: {})", available.join(", "))]
    UnknownProject {
        /// The name the user asked for.
        name: String,
        /// Sorted list of valid project names, for display.
        available: Vec<String>,
    },

    /// The install target exists and is not an empty directory.
    #[error("target directory '{path}' already exists and is not empty")]
    TargetNotEmpty {
        /// The user-supplied target path.
        path: String,
    },

    /// The archive endpoint answered with a non-success status.
    #[error("failed to download archive from {url}: HTTP {status}")]
    DownloadStatus {
        /// The catalog URL that was fetched.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The archive download failed at the transport level.
    #[error("failed to download archive from {url}: {reason}")]
    DownloadFailed {
        /// The catalog URL that was fetched.
        url: String,
        /// The underlying transport error, rendered.
        reason: String,
    },

    /// The gzip/tar stream could not be decoded or written out.
    #[error("failed to extract archive: {reason}")]
    ExtractFailed {
        /// What went wrong mid-stream.
        reason: String,
    },

    /// Moving the staged tree into the target directory failed.
    ///
    /// This is the one non-atomic step of an install; the target may be
    /// left partially populated and needs manual inspection.
    #[error("failed to move project into '{path}': {reason}")]
    CommitFailed {
        /// The destination that may be partially populated.
        path: String,
        /// The underlying cause.
        reason: String,
    },

    /// The release-metadata endpoint was unreachable or answered non-2xx.
    #[error("failed to fetch latest release: {reason}")]
    ReleaseFetch {
        /// Transport error or HTTP status, rendered.
        reason: String,
    },

    /// The release-metadata response body was not the expected JSON.
    #[error("failed to decode release metadata: {reason}")]
    ReleaseDecode {
        /// The underlying decode error, rendered.
        reason: String,
    },

    /// A version string was not valid semver.
    #[error("invalid version '{input}'")]
    VersionParse {
        /// The string that failed to parse.
        input: String,
    },

    /// The running binary was not installed through Homebrew.
    #[error("self-update is only supported for Homebrew installations")]
    UnsupportedInstallMethod {
        /// Where the running binary actually lives.
        path: String,
    },

    /// The package-manager upgrade subprocess failed.
    #[error("upgrade command failed: {reason}")]
    UpdateExec {
        /// Exit status or spawn error, rendered.
        reason: String,
    },

    /// A per-user application directory could not be resolved.
    #[error("could not determine the {kind} directory for this platform")]
    DirectoryResolution {
        /// Which directory was being resolved (e.g. "config").
        kind: &'static str,
    },

    /// A filesystem operation failed, with the step and path it was
    /// applied to.
    #[error("failed to {step} '{path}': {reason}")]
    Filesystem {
        /// The operation that failed (e.g. "create staging root").
        step: &'static str,
        /// The path the operation was applied to.
        path: String,
        /// The underlying I/O error, rendered.
        reason: String,
    },

    /// I/O error wrapper for filesystem operations with no useful path
    /// context (e.g. resolving the running executable).
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether this error was caused by user input rather than the
    /// environment. User-input errors are shown without diagnostic noise.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownProject { .. }
                | Self::TargetNotEmpty { .. }
                | Self::VersionParse { .. }
                | Self::UnsupportedInstallMethod { .. }
        )
    }
}

/// An error decorated for terminal display.
///
/// Wraps the underlying error with an optional suggestion and details line.
pub struct ErrorContext {
    /// The underlying error chain.
    pub error: anyhow::Error,
    /// Optional hint on how to resolve the error.
    pub suggestion: Option<String>,
    /// Optional additional detail about the error.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    pub fn new(error: anyhow::Error) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a resolution hint.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach an additional detail line.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colored severity markers.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Convert any error into an [`ErrorContext`] with helpful suggestions.
///
/// Typed [`CliError`] values get targeted hints; user-input errors are left
/// bare so the terminal shows one clean line and nothing else.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let (suggestion, details) = match error.downcast_ref::<CliError>() {
        Some(e) if e.is_user_error() => {
            let suggestion = match e {
                CliError::UnknownProject { .. } => {
                    Some("run 'tessera init --help' to see the available projects".to_string())
                }
                CliError::TargetNotEmpty { .. } => Some(
                    "choose an empty or non-existent directory for the new project".to_string(),
                ),
                CliError::UnsupportedInstallMethod { path } => Some(format!(
                    "the binary at '{path}' was not installed via Homebrew; reinstall with 'brew install tessera' to enable self-update"
                )),
                _ => None,
            };
            (suggestion, None)
        }
        Some(CliError::CommitFailed { path, .. }) => (
            None,
            Some(format!(
                "'{path}' may be partially populated and should be inspected before retrying"
            )),
        ),
        Some(CliError::DownloadStatus { .. } | CliError::DownloadFailed { .. }) => (
            Some("check your network connection and try again".to_string()),
            None,
        ),
        Some(CliError::ReleaseFetch { .. }) => (
            Some(
                "check your network connection, or retry later if GitHub is rate limiting"
                    .to_string(),
            ),
            None,
        ),
        _ => match error.downcast_ref::<std::io::Error>() {
            Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => (
                Some("check file ownership or retry with elevated permissions".to_string()),
                None,
            ),
            _ => (None, None),
        },
    };

    ErrorContext {
        error,
        suggestion,
        details,
    }
}
