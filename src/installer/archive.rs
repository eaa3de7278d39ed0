//! Decoding of downloaded project archives.
//!
//! Project archives are gzip-compressed tar streams produced by a source
//! hosting service, which wraps all content in a single commit-qualified
//! top-level directory (e.g. `tessera-labs-quickstart-1a2b3c4/`). That
//! synthetic wrapper must not appear in the extracted tree, so entry paths
//! are rewritten while the stream is decoded.

use std::fs;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, trace};

use crate::core::CliError;

/// Extract a gzip-compressed tar stream into `dest`, stripping the
/// synthetic top-level wrapper directory from every entry path.
///
/// The wrapper is derived from the first entry whose path contains a
/// separator; archives without such an entry extract verbatim. Directory
/// entries are created as needed and regular files keep the permission bits
/// recorded in the archive (Unix only).
///
/// Entry paths must stay inside `dest` after stripping: anything with a
/// parent or rooted component is rejected before a byte is written.
///
/// Any decode or write failure aborts with [`CliError::ExtractFailed`];
/// partially written output is the caller's staging directory and is
/// discarded wholesale.
pub fn extract_archive(data: &[u8], dest: &Path) -> Result<(), CliError> {
    let gz = GzDecoder::new(data);
    let mut archive = tar::Archive::new(gz);

    let mut wrapper: Option<PathBuf> = None;
    let mut entries = 0usize;

    for entry in archive.entries().map_err(extract_err("read tar header"))? {
        let mut entry = entry.map_err(extract_err("read tar entry"))?;
        let raw_path = entry
            .path()
            .map_err(extract_err("read entry path"))?
            .into_owned();

        // Directory entries end in '/', so the wrapper directory's own
        // entry already contains a separator and seeds the detection.
        if wrapper.is_none() && String::from_utf8_lossy(&entry.path_bytes()).contains('/') {
            if let Some(Component::Normal(first)) = raw_path.components().next() {
                debug!("stripping archive wrapper directory {:?}", first);
                wrapper = Some(PathBuf::from(first));
            }
        }

        let rel = match &wrapper {
            Some(w) => raw_path.strip_prefix(w).unwrap_or(&raw_path).to_path_buf(),
            None => raw_path.clone(),
        };
        if rel.as_os_str().is_empty() {
            // The wrapper directory entry itself.
            continue;
        }

        // Refuse anything that would resolve outside dest.
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(CliError::ExtractFailed {
                reason: format!(
                    "entry path '{}' escapes the extraction directory",
                    raw_path.display()
                ),
            });
        }

        let out = dest.join(&rel);
        trace!("extracting {} -> {}", raw_path.display(), out.display());

        if entry.header().entry_type().is_dir() {
            fs::create_dir_all(&out).map_err(extract_err("create directory"))?;
        } else if entry.header().entry_type().is_file() {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).map_err(extract_err("create parent directory"))?;
            }
            write_file(&mut entry, &out)?;
        }
        // Other entry types (links, fifos) are not produced by the archive
        // services the catalog points at and are skipped.

        entries += 1;
    }

    debug!("extracted {entries} archive entries to {}", dest.display());
    Ok(())
}

fn write_file<R: Read>(entry: &mut tar::Entry<'_, R>, out: &Path) -> Result<(), CliError> {
    let mut file = fs::File::create(out).map_err(extract_err("create file"))?;
    std::io::copy(entry, &mut file).map_err(extract_err("write file contents"))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(mode) = entry.header().mode() {
            fs::set_permissions(out, fs::Permissions::from_mode(mode))
                .map_err(extract_err("set file permissions"))?;
        }
    }

    Ok(())
}

fn extract_err<E: std::fmt::Display>(step: &'static str) -> impl FnOnce(E) -> CliError {
    move |e| CliError::ExtractFailed {
        reason: format!("{step}: {e}"),
    }
}
