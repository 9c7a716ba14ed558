//! # Kubectl Invocation
//!
//! Thin wrapper around the `kubectl` binary for the two cluster calls this
//! tool makes: waiting for a deployment to become available and reading the
//! deployment's first container image.
//!
//! The binary is resolved once (PATH discovery via `which`, or an explicit
//! path) and reused for both calls. Command failures are surfaced as typed
//! errors so callers can decide which ones are fatal.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from kubectl discovery and invocation.
///
/// `CommandFailed` and `EmptyImage` are recoverable from the caller's point
/// of view; the other variants mean kubectl itself is unusable.
#[derive(Debug, Error)]
pub enum KubectlError {
    #[error("kubectl binary not found in PATH: {0}. Please install kubectl or pass --kubectl")]
    NotFound(#[from] which::Error),

    #[error("failed to run kubectl: {0}")]
    Io(#[from] std::io::Error),

    #[error("kubectl {subcommand} exited with {status}: {stderr}")]
    CommandFailed {
        subcommand: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("deployment '{deployment}' in namespace '{namespace}' reported no container image")]
    EmptyImage {
        namespace: String,
        deployment: String,
    },
}

/// Resolved kubectl binary plus the options applied to every invocation.
#[derive(Debug, Clone)]
pub struct Kubectl {
    binary: PathBuf,
    context: Option<String>,
}

impl Kubectl {
    /// Resolve the kubectl binary, preferring an explicit path over PATH
    /// discovery.
    pub fn discover(
        explicit: Option<PathBuf>,
        context: Option<String>,
    ) -> Result<Self, KubectlError> {
        let binary = match explicit {
            Some(path) => path,
            None => which::which("kubectl")?,
        };
        debug!("Using kubectl binary at: {:?}", binary);
        Ok(Self { binary, context })
    }

    fn command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.binary);
        if let Some(context) = &self.context {
            cmd.arg("--context").arg(context);
        }
        cmd
    }

    /// Run `kubectl wait` for the `Available` condition on a deployment,
    /// bounded by `timeout`.
    pub async fn wait_available(
        &self,
        namespace: &str,
        deployment: &str,
        timeout: Duration,
    ) -> Result<(), KubectlError> {
        let output = self
            .command()
            .arg("wait")
            .arg(format!("deployment/{deployment}"))
            .arg("-n")
            .arg(namespace)
            .arg("--for=condition=available")
            .arg(format!("--timeout={}s", timeout.as_secs()))
            .output()
            .await?;

        if !output.status.success() {
            return Err(KubectlError::CommandFailed {
                subcommand: "wait",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    /// Read the first container's image reference from a live deployment via
    /// a jsonpath projection.
    pub async fn deployment_image(
        &self,
        namespace: &str,
        deployment: &str,
    ) -> Result<String, KubectlError> {
        let output = self
            .command()
            .arg("-n")
            .arg(namespace)
            .arg("get")
            .arg(format!("deployment/{deployment}"))
            .arg("-o")
            .arg("jsonpath={.spec.template.spec.containers[0].image}")
            .output()
            .await?;

        if !output.status.success() {
            return Err(KubectlError::CommandFailed {
                subcommand: "get",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let image = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if image.is_empty() {
            return Err(KubectlError::EmptyImage {
                namespace: namespace.to_string(),
                deployment: deployment.to_string(),
            });
        }
        Ok(image)
    }
}

impl KubectlError {
    /// Whether the caller may continue with a fallback instead of aborting.
    ///
    /// A non-zero kubectl exit or an empty image projection is recoverable;
    /// a missing binary or a spawn failure is not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            KubectlError::CommandFailed { .. } | KubectlError::EmptyImage { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_with_explicit_path_skips_lookup() {
        let kubectl =
            Kubectl::discover(Some(PathBuf::from("/does/not/exist/kubectl")), None).unwrap();
        assert_eq!(kubectl.binary, PathBuf::from("/does/not/exist/kubectl"));
    }

    #[test]
    fn test_empty_image_error_is_recoverable() {
        let err = KubectlError::EmptyImage {
            namespace: "dev".to_string(),
            deployment: "my-service".to_string(),
        };
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_error_is_not_recoverable() {
        let err = KubectlError::Io(std::io::Error::other("spawn failed"));
        assert!(!err.is_recoverable());
    }
}
