//! Build-version resolution and remote release metadata.

use serde::Deserialize;
use tracing::debug;

use crate::constants::RELEASE_FETCH_TIMEOUT;
use crate::core::CliError;

/// GitHub endpoint describing the most recent published release.
pub const LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/tessera-labs/tessera-cli/releases/latest";

/// Version sentinel for binaries built without release provenance.
///
/// A `dev` binary is running from source; every update comparison
/// short-circuits on it.
pub const DEV_VERSION: &str = "dev";

/// The version identifier of the running binary.
///
/// Release builds bake the tagged version in through the
/// `TESSERA_RELEASE_VERSION` environment variable at compile time; anything
/// else reports the [`DEV_VERSION`] sentinel. Never fails. A leading `v` is
/// normalized away.
pub fn current_version() -> &'static str {
    match option_env!("TESSERA_RELEASE_VERSION") {
        Some(v) if !v.is_empty() => v.trim_start_matches('v'),
        _ => DEV_VERSION,
    }
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Fetch the latest published version from the release metadata endpoint.
///
/// Requires a 200 response and a JSON body with at least a `tag_name`
/// field; the leading `v` of the tag is stripped. Fetched fresh on every
/// invocation — nothing is cached.
pub async fn latest_version(client: &reqwest::Client) -> Result<String, CliError> {
    latest_version_from(client, LATEST_RELEASE_URL).await
}

/// Same as [`latest_version`] but against an explicit endpoint, so tests
/// can point it at a local server.
pub async fn latest_version_from(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, CliError> {
    debug!("fetching latest release from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CliError::ReleaseFetch {
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ReleaseFetch {
            reason: format!("HTTP {}", status.as_u16()),
        });
    }

    let release: Release = response.json().await.map_err(|e| CliError::ReleaseDecode {
        reason: e.to_string(),
    })?;

    Ok(release.tag_name.trim_start_matches('v').to_string())
}

/// Build the HTTP client used for release metadata requests.
pub fn release_client() -> Result<reqwest::Client, CliError> {
    reqwest::Client::builder()
        .user_agent(concat!("tessera-cli/", env!("CARGO_PKG_VERSION")))
        .timeout(RELEASE_FETCH_TIMEOUT)
        .build()
        .map_err(|e| CliError::ReleaseFetch {
            reason: format!("failed to build HTTP client: {e}"),
        })
}
