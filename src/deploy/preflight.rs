// ABOUTME: Local precondition checks run before any Cloud Run call.
// ABOUTME: Tool installed, then an active account, then a configured project; stops at the first failure.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::gcloud::CloudCli;

/// What the checks found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub tool: PathBuf,
    pub account: String,
    pub project: String,
}

/// Verify gcloud is usable.
///
/// # Errors
///
/// - [`Error::ToolMissing`] if the executable is not on the PATH
/// - [`Error::NotAuthenticated`] if no account is active, or the auth query fails
/// - [`Error::NoProjectConfigured`] if no project is set, or the config query fails
pub async fn preflight<C: CloudCli + ?Sized>(cli: &C) -> Result<PreflightReport> {
    let tool = cli.locate().ok_or_else(|| Error::ToolMissing {
        tool: cli.program().to_string(),
    })?;
    tracing::debug!("Found {} at {}", cli.program(), tool.display());

    let accounts = match cli.active_accounts().await {
        Ok(accounts) => accounts,
        Err(Error::CommandFailed { stderr, .. }) => {
            tracing::debug!("gcloud auth list failed: {}", stderr);
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    let account = accounts
        .into_iter()
        .find(|a| !a.trim().is_empty())
        .ok_or(Error::NotAuthenticated)?;

    let project = match cli.configured_project().await {
        Ok(project) => project,
        Err(Error::CommandFailed { stderr, .. }) => {
            tracing::debug!("gcloud config get-value project failed: {}", stderr);
            None
        }
        Err(e) => return Err(e),
    };
    let project = project
        .filter(|p| !p.trim().is_empty())
        .ok_or(Error::NoProjectConfigured)?;

    tracing::info!("Preflight passed: account {}, project {}", account, project);

    Ok(PreflightReport {
        tool,
        account,
        project,
    })
}
