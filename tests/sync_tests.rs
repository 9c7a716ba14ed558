//! Integration tests for the sync pass against a stubbed kubectl
//!
//! A shell script standing in for kubectl (wired up via `--kubectl`) drives
//! the update path without a cluster: deployment available or not, image
//! present, empty, or unreadable.

#![cfg(unix)]

use helm_values_sync::cli::Args;
use helm_values_sync::sync::{self, Outcome};
use helm_values_sync::values;
use serde_yaml::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEMPLATE: &str = "\
deployment:
  image:
    repository: registry.local:5000/my-service
    tag: dev
";

/// Write an executable kubectl stand-in and return its path.
fn fake_kubectl(dir: &Path, script: &str) -> PathBuf {
    let path = dir.join("kubectl");
    fs::write(&path, format!("#!/bin/sh\n{script}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn args_for(dir: &Path, kubectl: PathBuf) -> Args {
    let args = Args {
        namespace: "dev".to_string(),
        deployment: "my-service".to_string(),
        values_dev: dir.join("values-dev.yaml"),
        values: dir.join("values.yaml"),
        default_image: "registry.local:5000/my-service:fallback".to_string(),
        settle_seconds: 0,
        wait_timeout_seconds: 1,
        context: None,
        kubectl: Some(kubectl),
    };
    fs::write(&args.values_dev, TEMPLATE).unwrap();
    // Existing output file selects the update path instead of the copy path
    fs::write(&args.values, TEMPLATE).unwrap();
    args
}

fn written_tag(args: &Args) -> Value {
    let written = values::load_mapping(&args.values).unwrap();
    written["deployment"]["image"]["tag"].clone()
}

#[tokio::test]
async fn test_update_path_uses_live_image_tag() {
    let dir = TempDir::new().unwrap();
    let kubectl = fake_kubectl(
        dir.path(),
        "if [ \"$1\" = wait ]; then exit 0; fi\n\
         printf '%s' 'registry.local:5000/my-service:v9.9.9'\n",
    );
    let args = args_for(dir.path(), kubectl);

    let outcome = sync::run(&args).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Updated {
            tag: "v9.9.9".to_string()
        }
    );
    assert_eq!(written_tag(&args), Value::from("v9.9.9"));
}

#[tokio::test]
async fn test_failed_image_query_falls_back_to_default_image() {
    let dir = TempDir::new().unwrap();
    // Both the wait and the get fail; the run must still finish
    let kubectl = fake_kubectl(dir.path(), "exit 1\n");
    let args = args_for(dir.path(), kubectl);

    let outcome = sync::run(&args).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Updated {
            tag: "fallback".to_string()
        }
    );
    assert_eq!(written_tag(&args), Value::from("fallback"));
}

#[tokio::test]
async fn test_empty_image_query_falls_back_to_default_image() {
    let dir = TempDir::new().unwrap();
    let kubectl = fake_kubectl(dir.path(), "exit 0\n");
    let args = args_for(dir.path(), kubectl);

    let outcome = sync::run(&args).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Updated {
            tag: "fallback".to_string()
        }
    );
}

#[tokio::test]
async fn test_untagged_live_image_yields_dev_tag() {
    let dir = TempDir::new().unwrap();
    let kubectl = fake_kubectl(
        dir.path(),
        "if [ \"$1\" = wait ]; then exit 0; fi\n\
         printf '%s' 'my-service'\n",
    );
    let args = args_for(dir.path(), kubectl);

    let outcome = sync::run(&args).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Updated {
            tag: "dev".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_kubectl_binary_is_fatal_on_update_path() {
    let dir = TempDir::new().unwrap();
    let args = args_for(dir.path(), dir.path().join("no-such-kubectl"));

    let err = sync::run(&args).await.unwrap_err();
    assert!(err.to_string().contains("kubectl"));
}

#[tokio::test]
async fn test_scalar_deployment_key_aborts_update() {
    let dir = TempDir::new().unwrap();
    let kubectl = fake_kubectl(
        dir.path(),
        "if [ \"$1\" = wait ]; then exit 0; fi\n\
         printf '%s' 'registry.local:5000/my-service:v1'\n",
    );
    let mut args = args_for(dir.path(), kubectl);
    args.values_dev = dir.path().join("broken-dev.yaml");
    fs::write(&args.values_dev, "deployment: enabled\n").unwrap();

    let err = sync::run(&args).await.unwrap_err();
    assert!(err.to_string().contains("not a mapping"));
}
