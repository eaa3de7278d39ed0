//! Download and installation of demo projects.
//!
//! The [`Installer`] turns a catalog name into a populated project
//! directory in five sequenced steps: resolve, stage, fetch, extract,
//! commit. Everything up to the commit happens inside an exclusively owned
//! staging directory that is removed on every exit path, so the target
//! location never observes a half-written tree. The commit itself — a
//! rename, or a recursive copy across filesystems — is the single point
//! after which the install is visible.

pub mod archive;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::constants::DOWNLOAD_TIMEOUT;
use crate::core::CliError;
use crate::utils::platform;

/// Installs demo projects from the catalog into user-chosen directories.
///
/// The catalog and staging root are injectable so tests can point the
/// installer at a local HTTP server and a scratch directory.
pub struct Installer {
    catalog: Catalog,
    client: reqwest::Client,
    staging_root: PathBuf,
}

impl Installer {
    /// Create an installer over the builtin catalog, staging under the
    /// per-user application directory.
    pub fn new() -> Result<Self, CliError> {
        Ok(Self {
            catalog: Catalog::builtin(),
            client: http_client()?,
            staging_root: platform::app_dir()?,
        })
    }

    /// Replace the catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the staging root directory.
    #[must_use]
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = root.into();
        self
    }

    /// Download and install `project_name` under `target/<project_name>`.
    ///
    /// Returns the absolute path of the installed project directory. The
    /// target must be an empty directory or not exist yet; it is never
    /// touched before the archive has been fully downloaded and extracted.
    pub async fn install(&self, project_name: &str, target: &Path) -> Result<PathBuf, CliError> {
        let url = self.catalog.resolve(project_name)?.to_string();
        info!("installing project '{project_name}' from {url}");

        // The staging directory is removed when this guard drops, on both
        // the success and every error path.
        let staging = self.create_staging_dir()?;

        let data = self.fetch(&url).await?;
        debug!("downloaded {} bytes", data.len());

        archive::extract_archive(&data, staging.path())?;

        validate_target(target)?;
        let dest = target.join(project_name);
        commit(staging.path(), &dest)?;

        let installed = dest
            .canonicalize()
            .map_err(fs_err("resolve installed project path", &dest))?;
        info!("project '{project_name}' installed at {}", installed.display());
        Ok(installed)
    }

    /// Create a uniquely named staging directory under the lazily created
    /// staging root. Unique suffixes keep concurrent invocations from
    /// colliding; no cross-process lock is taken.
    fn create_staging_dir(&self) -> Result<TempDir, CliError> {
        fs::create_dir_all(&self.staging_root)
            .map_err(fs_err("create staging root", &self.staging_root))?;
        let staging = tempfile::Builder::new()
            .prefix("install-")
            .tempdir_in(&self.staging_root)
            .map_err(fs_err("create staging directory", &self.staging_root))?;
        debug!("staging download in {}", staging.path().display());
        Ok(staging)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CliError> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| CliError::DownloadFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CliError::DownloadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| CliError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

fn http_client() -> Result<reqwest::Client, CliError> {
    reqwest::Client::builder()
        .user_agent(concat!("tessera-cli/", env!("CARGO_PKG_VERSION")))
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| CliError::DownloadFailed {
            url: "<client setup>".to_string(),
            reason: format!("failed to build HTTP client: {e}"),
        })
}

/// Ensure the target is usable: create it (with parents) when missing,
/// reject it when it is a file or a non-empty directory.
fn validate_target(target: &Path) -> Result<(), CliError> {
    if !target.exists() {
        fs::create_dir_all(target).map_err(fs_err("create target directory", target))?;
        return Ok(());
    }

    let not_empty = || CliError::TargetNotEmpty {
        path: target.display().to_string(),
    };

    if !target.is_dir() {
        return Err(not_empty());
    }
    if fs::read_dir(target)
        .map_err(fs_err("read target directory", target))?
        .next()
        .is_some()
    {
        return Err(not_empty());
    }
    Ok(())
}

fn fs_err<'a>(step: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> CliError + 'a {
    move |e| CliError::Filesystem {
        step,
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Move the staged tree into place. Prefers an atomic rename and falls back
/// to a recursive copy when the staging root and target live on different
/// filesystems.
fn commit(staged: &Path, dest: &Path) -> Result<(), CliError> {
    let commit_err = |reason: String| CliError::CommitFailed {
        path: dest.display().to_string(),
        reason,
    };

    if fs::rename(staged, dest).is_ok() {
        return Ok(());
    }

    debug!("rename into {} failed, falling back to copy", dest.display());
    copy_tree(staged, dest).map_err(|e| commit_err(e.to_string()))
}

fn copy_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let dest = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}
