//! # helm-values-sync
//!
//! Synchronizes a Helm values file with the image tag currently running in a
//! Kubernetes deployment, falling back to a default image reference when the
//! live image cannot be read.
//!
//! ## Overview
//!
//! One linear pass per invocation:
//!
//! 1. **Pre-existence check** - If the output values file is missing, the
//!    template is copied verbatim and the run ends. No cluster calls.
//! 2. **Readiness wait** - A settle delay, then a bounded `kubectl wait` for
//!    the `Available` condition. Failure here is a warning, not an abort.
//! 3. **Image introspection** - The deployment's first container image is
//!    read via `kubectl get -o jsonpath=...`, falling back to
//!    `--default-image` if the query fails or returns nothing.
//! 4. **Values merge** - The template is parsed as YAML,
//!    `deployment.image.tag` is set to the extracted tag, and the result is
//!    written to the output path.
//!
//! Designed to sit between a dev deploy loop (e.g. Tilt) and a Helm render
//! step, keeping the rendered chart pointed at whatever image is actually
//! running.

use anyhow::Result;
use clap::Parser;
use helm_values_sync::cli::Args;
use helm_values_sync::sync;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helm_values_sync=info".into()),
        )
        .init();

    let args = Args::parse();
    sync::run(&args).await?;
    Ok(())
}
