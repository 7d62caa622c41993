// ABOUTME: The deploy flow: preflight, build the request, one `gcloud run deploy`, report the URL.
// ABOUTME: Fails fast; nothing is retried.

use crate::config::{Config, EnvValue};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::gcloud::CloudCli;
use crate::output::Output;

use super::preflight::{PreflightReport, preflight};
use super::request::DeployRequest;
use super::url::extract_service_url;

/// Result of a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub preflight: PreflightReport,
    /// `None` when gcloud succeeded but the URL could not be determined.
    pub url: Option<String>,
}

/// Deploy the configured service.
///
/// The deployment call is made at most once, and only after every precondition passes.
/// A failed call returns [`Error::DeploymentCallFailed`] with gcloud's exit code.
pub async fn deploy<C: CloudCli + ?Sized>(
    cli: &C,
    config: &Config,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<DeployOutcome> {
    output.progress("  → Checking gcloud setup...");
    let report = preflight(cli).await?;
    output.progress(&format!(
        "  → Authenticated as {} (project {})",
        report.account, report.project
    ));

    for var in config.env.values().filter_map(EnvValue::unset_var) {
        diag.warn(Warning::unset_env_var(var));
    }
    let request = DeployRequest::from_config(config)?;

    output.progress(&format!(
        "  → Deploying {} from {} to {} ({})...",
        request.target.service,
        request.source.display(),
        request.target.region,
        request.target.platform
    ));

    let call = cli.deploy(&request).await?;
    if !call.success() {
        return Err(Error::DeploymentCallFailed { code: call.code });
    }

    let url = match extract_service_url(call.lines()) {
        Some(url) => Some(url),
        None => match cli.service_url(&request.target).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                diag.warn(Warning::url_lookup(format!(
                    "gcloud reported no URL for {}",
                    request.target.service
                )));
                None
            }
            Err(e) => {
                diag.warn(Warning::url_lookup(format!(
                    "could not look up the service URL: {e}"
                )));
                None
            }
        },
    };

    Ok(DeployOutcome {
        preflight: report,
        url,
    })
}
