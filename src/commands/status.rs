// ABOUTME: Status command implementation.
// ABOUTME: Prints the service URL and known revisions.

use runlift::config::Config;
use runlift::deploy;
use runlift::error::Result;
use runlift::output::Output;

pub async fn status(config: Config, output: Output) -> Result<()> {
    let gcloud = super::gcloud_for(&output);
    let status = deploy::status(&gcloud, &config).await?;

    output.info(&format!("Service: {}", status.target.service));
    output.info(&format!("Region: {}", status.target.region));
    output.info(&format!("Project: {}", status.preflight.project));
    match status.url {
        Some(ref url) => output.url(url),
        None => output.info("Service URL: (not deployed)"),
    }

    output.info(&format!("Revisions: {}", status.revisions.len()));
    for revision in &status.revisions {
        output.info(&format!("  {revision}"));
    }

    Ok(())
}
