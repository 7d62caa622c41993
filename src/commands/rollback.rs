// ABOUTME: Rollback command implementation.
// ABOUTME: Routes all traffic back to an earlier Cloud Run revision.

use runlift::config::Config;
use runlift::deploy;
use runlift::error::Result;
use runlift::output::Output;
use runlift::types::RevisionName;

/// Roll the configured service back to `revision`, or to the previous revision.
pub async fn rollback(
    config: Config,
    revision: Option<RevisionName>,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let gcloud = super::gcloud_for(&output);

    output.progress(&format!(
        "Rolling back {} ({})",
        config.service, config.region
    ));

    let restored = deploy::rollback(&gcloud, &config, revision, &output).await?;

    output.success(&format!("Rollback complete! {restored} is serving all traffic"));
    Ok(())
}
