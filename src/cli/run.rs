//! Launch a test run on the Tessera platform.
//!
//! Composes a single authenticated POST to the tenant's launch endpoint.
//! All images must already be pushed to a registry the platform can reach.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Result, bail};
use chrono::Local;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::constants::{DOWNLOAD_TIMEOUT, MIN_RUN_DURATION_MINUTES, SETUP_OVERHEAD};

/// Arguments for `tessera run`.
#[derive(Args)]
pub struct RunCommand {
    /// Unique identifier for this test run.
    #[arg(short, long)]
    name: String,

    /// Description explaining the purpose of this test run.
    #[arg(short, long, default_value = "")]
    description: String,

    /// Target tenant ID for test execution.
    #[arg(short, long)]
    tenant: String,

    /// Authentication username for accessing test resources.
    #[arg(short, long)]
    username: String,

    /// Authentication password for accessing test resources.
    #[arg(short, long)]
    password: String,

    /// URL of the configuration image containing the docker-compose setup.
    #[arg(short, long)]
    config: String,

    /// Image URLs to include in the test (repeatable).
    #[arg(short, long = "image", required = true)]
    images: Vec<String>,

    /// Notebook to execute.
    #[arg(short = 'b', long, default_value = "basic_test")]
    notebook: String,

    /// Maximum test runtime in minutes (minimum 15; longer runs go deeper).
    #[arg(short = 'm', long, default_value_t = 15)]
    duration: i64,

    /// Email addresses to notify with test results (repeatable).
    #[arg(short, long = "email", required = true)]
    emails: Vec<String>,
}

#[derive(Serialize)]
struct LaunchRequest {
    params: BTreeMap<String, String>,
}

impl RunCommand {
    pub async fn execute(self) -> Result<()> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tessera-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;
        self.execute_with(&client, None).await
    }

    /// Submit the launch request. `base_override` replaces the tenant
    /// endpoint, which lets tests aim at a local server.
    pub(crate) async fn execute_with(
        &self,
        client: &reqwest::Client,
        base_override: Option<&str>,
    ) -> Result<()> {
        if self.duration < MIN_RUN_DURATION_MINUTES {
            bail!("duration can't be less than {MIN_RUN_DURATION_MINUTES}");
        }
        for email in &self.emails {
            if !valid_email(email) {
                bail!("email not valid: '{email}'");
            }
        }

        let base = match base_override {
            Some(base) => base.to_string(),
            None => format!("https://{}.tessera.dev", self.tenant),
        };
        let url = format!("{base}/api/v1/launch_experiment/{}", self.notebook);
        debug!("submitting launch request to {url}");

        let params = self.params();
        let response = client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&LaunchRequest {
                params: params.clone(),
            })
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {}
            403 => bail!(
                "access forbidden (HTTP 403): please verify your tenant, username, and password are correct"
            ),
            status => bail!("unexpected non-200 status code: {status}"),
        }

        self.print_summary(&params);
        Ok(())
    }

    fn params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("tessera.test_name".to_string(), self.name.clone()),
            (
                "tessera.config_image".to_string(),
                strip_spaces(&self.config),
            ),
            (
                "tessera.images".to_string(),
                strip_spaces(&self.images.join(";")),
            ),
            (
                "tessera.description".to_string(),
                self.description.clone(),
            ),
            (
                "tessera.report.recipients".to_string(),
                strip_spaces(&self.emails.join(";")),
            ),
            ("tessera.duration".to_string(), self.duration.to_string()),
        ])
    }

    fn print_summary(&self, params: &BTreeMap<String, String>) {
        let recipients = &params["tessera.report.recipients"];
        let total = Duration::from_secs(self.duration as u64 * 60) + SETUP_OVERHEAD;
        let finishes =
            Local::now() + chrono::Duration::from_std(total).unwrap_or_else(|_| chrono::Duration::zero());

        println!(
            "\n{}\n",
            format!(
                "Successfully submitted a request to launch test run '{}'!",
                self.name
            )
            .green()
            .bold()
        );
        println!(
            "You should receive a test report emailed to {} around {}.",
            recipients.magenta().bold(),
            finishes.format("%b %-d %-I:%M%p").to_string().magenta().bold()
        );
        println!(
            "(That's roughly {} minutes from now including setup)\n",
            (total.as_secs() / 60).to_string().magenta().bold()
        );
        println!(
            "If you encounter any issues, use {} to reach out.",
            "Tessera's discord".magenta().bold()
        );
    }
}

fn strip_spaces(input: &str) -> String {
    input.replace(' ', "")
}

/// Minimal structural validation: one `@`, non-empty local part, and a
/// domain with at least one dot.
fn valid_email(input: &str) -> bool {
    let mut parts = input.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
