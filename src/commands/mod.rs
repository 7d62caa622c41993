// ABOUTME: Command module aggregator for the runlift CLI.
// ABOUTME: Re-exports deploy, rollback, and status command handlers.

mod deploy;
mod rollback;
mod status;

pub use deploy::deploy;
pub use rollback::rollback;
pub use status::status;

use runlift::gcloud::Gcloud;
use runlift::output::{Output, OutputMode};

/// The gcloud client, echoing its live output unless the user asked for quiet.
fn gcloud_for(output: &Output) -> Gcloud {
    Gcloud::from_env().echo(output.mode() != OutputMode::Quiet)
}
