//! # Command-Line Interface
//!
//! Argument parsing for `helm-values-sync`.
//!
//! ## Usage
//!
//! ```bash
//! helm-values-sync \
//!   --namespace my-namespace \
//!   --deployment my-service \
//!   --values-dev deploy/values-dev.yaml \
//!   --values deploy/values.yaml \
//!   --default-image registry.local:5000/my-service:dev
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Version string including build metadata emitted by `build.rs`.
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Prepare a Helm values file with the image tag currently deployed in Kubernetes
#[derive(Parser, Debug)]
#[command(name = "helm-values-sync")]
#[command(
    about = "Prepare a Helm values file with the image tag currently deployed in Kubernetes",
    long_about = None,
    version,
    long_version = LONG_VERSION,
    after_help = "\
Behavior:
  If the --values file does not exist yet, the --values-dev template is copied
  to it unchanged and no cluster calls are made. Otherwise the deployment's
  live image tag is read via kubectl and written to deployment.image.tag in
  the output file.

Examples:
  helm-values-sync --namespace dev --deployment my-service \\
    --values-dev deploy/values-dev.yaml --values deploy/values.yaml \\
    --default-image registry.local:5000/my-service:dev
"
)]
pub struct Args {
    /// Kubernetes namespace containing the deployment
    #[arg(long)]
    pub namespace: String,

    /// Deployment resource name
    #[arg(long)]
    pub deployment: String,

    /// Path to the template values file
    #[arg(long, value_name = "FILE")]
    pub values_dev: PathBuf,

    /// Path to the output values file
    #[arg(long, value_name = "FILE")]
    pub values: PathBuf,

    /// Fallback image reference used when the live image cannot be read
    #[arg(long, value_name = "IMAGE")]
    pub default_image: String,

    /// Seconds to wait before polling, so the deploy tool can start rolling out
    #[arg(long, default_value_t = 30, value_name = "SECONDS")]
    pub settle_seconds: u64,

    /// Timeout in seconds for the availability wait
    #[arg(long, default_value_t = 60, value_name = "SECONDS")]
    pub wait_timeout_seconds: u64,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Path to the kubectl binary (defaults to discovery on PATH)
    #[arg(long, value_name = "PATH")]
    pub kubectl: Option<PathBuf>,
}
