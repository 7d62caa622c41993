// ABOUTME: Read-only view of a deployed service: URL and revisions.
// ABOUTME: A service that was never deployed reports no URL and no revisions.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gcloud::CloudCli;
use crate::types::RevisionName;

use super::preflight::{PreflightReport, preflight};
use super::request::ServiceTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub preflight: PreflightReport,
    pub target: ServiceTarget,
    pub url: Option<String>,
    /// Newest first.
    pub revisions: Vec<RevisionName>,
}

pub async fn status<C: CloudCli + ?Sized>(cli: &C, config: &Config) -> Result<ServiceStatus> {
    let report = preflight(cli).await?;
    let target = ServiceTarget::from_config(config);

    // gcloud exits non-zero when describing a service that doesn't exist yet.
    let url = match cli.service_url(&target).await {
        Ok(url) => url,
        Err(Error::CommandFailed { stderr, .. }) => {
            tracing::debug!("gcloud run services describe failed: {}", stderr);
            None
        }
        Err(e) => return Err(e),
    };
    let revisions = match cli.list_revisions(&target).await {
        Ok(revisions) => revisions,
        Err(Error::CommandFailed { stderr, .. }) => {
            tracing::debug!("gcloud run revisions list failed: {}", stderr);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    Ok(ServiceStatus {
        preflight: report,
        target,
        url,
        revisions,
    })
}
