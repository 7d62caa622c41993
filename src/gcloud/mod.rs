// ABOUTME: The Google Cloud CLI seam: a trait for the calls runlift makes, and the real gcloud client.
// ABOUTME: Tests swap in fakes implementing CloudCli.

mod process;

pub use process::CallOutput;

use crate::deploy::{DeployRequest, ServiceTarget};
use crate::error::Result;
use crate::types::RevisionName;
use async_trait::async_trait;
use std::path::PathBuf;

/// Environment variable that overrides the gcloud program name or path.
pub const GCLOUD_PROGRAM_VAR: &str = "RUNLIFT_GCLOUD";
pub const DEFAULT_GCLOUD_PROGRAM: &str = "gcloud";

/// gcloud prints this instead of a value when a property has none.
const UNSET_MARKER: &str = "(unset)";

/// The Google Cloud operations runlift depends on.
#[async_trait]
pub trait CloudCli: Send + Sync {
    /// Program name shown in diagnostics.
    fn program(&self) -> &str;

    /// Locate the CLI executable, if installed.
    fn locate(&self) -> Option<PathBuf>;

    /// Accounts with an active credential.
    async fn active_accounts(&self) -> Result<Vec<String>>;

    /// The configured default project, if any.
    async fn configured_project(&self) -> Result<Option<String>>;

    /// Build and deploy from source. Blocks until gcloud exits.
    async fn deploy(&self, request: &DeployRequest) -> Result<CallOutput>;

    /// The public URL of a deployed service.
    async fn service_url(&self, target: &ServiceTarget) -> Result<Option<String>>;

    /// Revisions of a service, newest first.
    async fn list_revisions(&self, target: &ServiceTarget) -> Result<Vec<RevisionName>>;

    /// Send all traffic to `revision`.
    async fn route_all_traffic(
        &self,
        target: &ServiceTarget,
        revision: &RevisionName,
    ) -> Result<CallOutput>;
}

/// Runs the real `gcloud` binary.
#[derive(Debug, Clone)]
pub struct Gcloud {
    program: String,
    echo: bool,
}

impl Gcloud {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            echo: true,
        }
    }

    /// Use `$RUNLIFT_GCLOUD` if set, otherwise `gcloud`.
    pub fn from_env() -> Self {
        let program = std::env::var(GCLOUD_PROGRAM_VAR)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GCLOUD_PROGRAM.to_string());
        Self::new(program)
    }

    /// Echo the output of long-running calls to stderr while they run (default: true).
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    async fn query(&self, args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        process::query(&self.program, &args).await
    }
}

impl Default for Gcloud {
    fn default() -> Self {
        Self::new(DEFAULT_GCLOUD_PROGRAM)
    }
}

#[async_trait]
impl CloudCli for Gcloud {
    fn program(&self) -> &str {
        &self.program
    }

    fn locate(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }

    async fn active_accounts(&self) -> Result<Vec<String>> {
        let out = self
            .query(&["auth", "list", "--filter=status:ACTIVE", "--format=value(account)"])
            .await?;
        Ok(non_empty_lines(&out).map(str::to_string).collect())
    }

    async fn configured_project(&self) -> Result<Option<String>> {
        let out = self.query(&["config", "get-value", "project"]).await?;
        Ok(parse_property(&out))
    }

    async fn deploy(&self, request: &DeployRequest) -> Result<CallOutput> {
        process::stream(
            &self.program,
            &request.to_args()?,
            &request.redacted_args()?,
            self.echo,
        )
        .await
    }

    async fn service_url(&self, target: &ServiceTarget) -> Result<Option<String>> {
        let location = target.location_args();
        let mut args = vec!["run", "services", "describe", target.service.as_str()];
        args.extend(location.iter().map(String::as_str));
        args.extend(["--format", "value(status.url)"]);

        let out = self.query(&args).await?;
        Ok(parse_property(&out))
    }

    async fn list_revisions(&self, target: &ServiceTarget) -> Result<Vec<RevisionName>> {
        let location = target.location_args();
        let mut args = vec!["run", "revisions", "list", "--service", target.service.as_str()];
        args.extend(location.iter().map(String::as_str));
        args.extend([
            "--sort-by",
            "~metadata.creationTimestamp",
            "--format",
            "value(metadata.name)",
        ]);

        let out = self.query(&args).await?;
        let revisions = non_empty_lines(&out)
            .filter_map(|line| match RevisionName::new(line) {
                Ok(name) => Some(name),
                Err(e) => {
                    tracing::warn!("Ignoring unexpected revision name {:?}: {}", line, e);
                    None
                }
            })
            .collect();
        Ok(revisions)
    }

    async fn route_all_traffic(
        &self,
        target: &ServiceTarget,
        revision: &RevisionName,
    ) -> Result<CallOutput> {
        let mut args = vec![
            "run".to_string(),
            "services".to_string(),
            "update-traffic".to_string(),
            target.service.to_string(),
        ];
        args.extend(target.location_args());
        args.push("--to-revisions".to_string());
        args.push(format!("{revision}=100"));

        process::stream(&self.program, &args, &args, self.echo).await
    }
}

fn non_empty_lines(out: &str) -> impl Iterator<Item = &str> {
    out.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// First value line of a gcloud property read, treating "(unset)" as absent.
fn parse_property(out: &str) -> Option<String> {
    non_empty_lines(out)
        .next()
        .filter(|v| *v != UNSET_MARKER)
        .map(str::to_string)
}
