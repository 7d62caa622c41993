// ABOUTME: Manual rollback: route all traffic to a known-good revision.
// ABOUTME: Defaults to the revision created before the newest one.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gcloud::CloudCli;
use crate::output::Output;
use crate::types::RevisionName;

use super::preflight::preflight;
use super::request::ServiceTarget;

/// Send 100% of the configured service's traffic to `revision`, or to the
/// previous revision when none is given. Returns the revision now serving.
///
/// # Errors
///
/// Returns error if:
/// - A precondition check fails
/// - No revision was given and the service has fewer than two revisions
/// - The traffic update call fails ([`Error::RollbackCallFailed`])
pub async fn rollback<C: CloudCli + ?Sized>(
    cli: &C,
    config: &Config,
    revision: Option<RevisionName>,
    output: &Output,
) -> Result<RevisionName> {
    output.progress("  → Checking gcloud setup...");
    preflight(cli).await?;

    let target = ServiceTarget::from_config(config);

    let revision = match revision {
        Some(revision) => revision,
        None => {
            output.progress("  → Looking up previous revision...");
            previous_revision(cli, &target).await?
        }
    };

    output.progress(&format!(
        "  → Routing all traffic of {} to {}...",
        target.service, revision
    ));

    let call = cli.route_all_traffic(&target, &revision).await?;
    if !call.success() {
        return Err(Error::RollbackCallFailed { code: call.code });
    }

    Ok(revision)
}

/// The second-newest revision of the service.
async fn previous_revision<C: CloudCli + ?Sized>(
    cli: &C,
    target: &ServiceTarget,
) -> Result<RevisionName> {
    let revisions = cli.list_revisions(target).await?;
    tracing::debug!("{} has {} revision(s)", target.service, revisions.len());

    revisions
        .into_iter()
        .nth(1)
        .ok_or_else(|| Error::NoPreviousRevision {
            service: target.service.to_string(),
        })
}
