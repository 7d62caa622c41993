// ABOUTME: Deploy command implementation.
// ABOUTME: Runs the deploy flow against gcloud and reports the service URL.

use runlift::config::Config;
use runlift::deploy;
use runlift::diagnostics::Diagnostics;
use runlift::error::Result;
use runlift::output::Output;

/// Deploy the configured service to Cloud Run.
pub async fn deploy(config: Config, mut output: Output) -> Result<()> {
    output.start_timer();
    let gcloud = super::gcloud_for(&output);
    let mut diag = Diagnostics::default();

    output.progress(&format!(
        "Deploying {} to Cloud Run ({})",
        config.service, config.region
    ));

    let outcome = deploy::deploy(&gcloud, &config, &output, &mut diag).await?;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    if let Some(url) = outcome.url {
        output.url(&url);
    }

    output.success("Deployment complete!");
    Ok(())
}
