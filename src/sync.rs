//! # Values Sync
//!
//! The single-pass run: pre-existence check, settle delay, availability wait,
//! image introspection, tag extraction, values merge. The availability wait
//! and the image query are the only recovered failure paths; everything else
//! aborts the run.

use crate::cli::Args;
use crate::image;
use crate::kubectl::Kubectl;
use crate::values;
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// What a run ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The output file did not exist; the template was copied verbatim.
    CopiedTemplate,
    /// The output file was rewritten with the computed image tag.
    Updated { tag: String },
}

/// Execute one sync pass.
pub async fn run(args: &Args) -> Result<Outcome> {
    if !args.values.exists() {
        info!(
            "{} does not exist, copying {} without changes",
            args.values.display(),
            args.values_dev.display()
        );
        values::copy_template(&args.values_dev, &args.values)?;
        return Ok(Outcome::CopiedTemplate);
    }

    let kubectl = Kubectl::discover(args.kubectl.clone(), args.context.clone())?;

    wait_for_deployment(args, &kubectl).await?;

    info!(
        "Getting image from deployment '{}' in namespace '{}'...",
        args.deployment, args.namespace
    );
    let image = match kubectl
        .deployment_image(&args.namespace, &args.deployment)
        .await
    {
        Ok(image) => image,
        Err(err) if err.is_recoverable() => {
            warn!(
                "Could not get image from deployment '{}' in namespace '{}' ({err}), \
                 will use default image",
                args.deployment, args.namespace
            );
            args.default_image.clone()
        }
        Err(err) => return Err(err.into()),
    };

    let tag = image::extract_tag(&image).to_string();

    let mut document = values::load_mapping(&args.values_dev)?;
    values::set_image_tag(&mut document, &tag)?;
    values::write_mapping(&args.values, &document)?;

    info!("Updated {} with image tag: {tag}", args.values.display());
    Ok(Outcome::Updated { tag })
}

/// Settle delay followed by one bounded `kubectl wait`. A wait failure is
/// logged and swallowed; a spawn failure aborts.
async fn wait_for_deployment(args: &Args, kubectl: &Kubectl) -> Result<()> {
    info!(
        "Waiting {} seconds for the deploy tool to update the deployment...",
        args.settle_seconds
    );
    sleep(Duration::from_secs(args.settle_seconds)).await;

    info!(
        "Waiting for deployment '{}' to be available in namespace '{}'...",
        args.deployment, args.namespace
    );
    match kubectl
        .wait_available(
            &args.namespace,
            &args.deployment,
            Duration::from_secs(args.wait_timeout_seconds),
        )
        .await
    {
        Ok(()) => info!("Deployment available."),
        Err(err) if err.is_recoverable() => {
            warn!("The deployment did not become available within the expected time ({err})");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
