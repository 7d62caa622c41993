// ABOUTME: Cloud Run deploy orchestration: preflight checks, the deploy call, rollback and status.
// ABOUTME: Every flow runs the same preflight first and talks to gcloud through CloudCli.

mod deployment;
mod preflight;
mod request;
mod rollback;
mod status;
mod url;

pub use deployment::{DeployOutcome, deploy};
pub use preflight::{PreflightReport, preflight};
pub use request::{DeployRequest, ServiceTarget};
pub use rollback::rollback;
pub use status::{ServiceStatus, status};
pub use url::extract_service_url;
