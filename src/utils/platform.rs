//! Cross-platform resolution of per-user application directories.
//!
//! The CLI needs exactly one capability here: "resolve the per-user
//! writable application directory" where install staging directories are
//! created. The platform branches are confined to this module instead of
//! being scattered through the installer.

use std::path::PathBuf;

use crate::constants::APP_DIR_NAME;
use crate::core::CliError;

/// Resolve the per-user configuration home for this platform.
///
/// - macOS and Windows use the OS-native config location
///   (`~/Library/Application Support`, `%APPDATA%`).
/// - Everything else honors `XDG_CONFIG_HOME`, falling back to
///   `~/.config`.
pub fn config_home() -> Result<PathBuf, CliError> {
    #[cfg(any(target_os = "macos", windows))]
    {
        dirs::config_dir().ok_or(CliError::DirectoryResolution { kind: "config" })
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    {
        config_home_from(std::env::var_os("XDG_CONFIG_HOME"))
    }
}

/// [`config_home`] with the `XDG_CONFIG_HOME` value passed in, so the
/// resolution is testable without mutating the process environment.
#[cfg(not(any(target_os = "macos", windows)))]
fn config_home_from(xdg: Option<std::ffi::OsString>) -> Result<PathBuf, CliError> {
    if let Some(xdg) = xdg.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg));
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .ok_or(CliError::DirectoryResolution { kind: "home" })
}

/// The tool's own directory under the per-user config home.
///
/// Install attempts stage their downloads in unique subdirectories of this
/// path. The directory is created lazily by the installer and persists
/// across invocations, but nothing in the install path reads it back.
pub fn app_dir() -> Result<PathBuf, CliError> {
    Ok(config_home()?.join(APP_DIR_NAME))
}
