//! # Values Document Handling
//!
//! Load, mutate, and write the Helm values YAML. The document structure is
//! opaque apart from `deployment.image.tag`: everything else round-trips
//! unchanged. Missing `deployment` / `deployment.image` mappings are created;
//! a template where one of them exists but is not a mapping is a hard error.

use anyhow::{bail, Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Copy the template byte-for-byte to the output path.
pub fn copy_template(template: &Path, output: &Path) -> Result<()> {
    fs::copy(template, output).with_context(|| {
        format!(
            "Failed to copy template {} to {}",
            template.display(),
            output.display()
        )
    })?;
    Ok(())
}

/// Parse a values file as a YAML mapping.
pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values template {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {} as YAML", path.display()))?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        other => bail!(
            "Expected a YAML mapping at the top level of {}, got {}",
            path.display(),
            type_name(&other)
        ),
    }
}

/// Set `deployment.image.tag`, creating the intermediate mappings if absent.
pub fn set_image_tag(values: &mut Mapping, tag: &str) -> Result<()> {
    let deployment = ensure_mapping(values, "deployment")?;
    let image = ensure_mapping(deployment, "image")?;
    image.insert(
        Value::String("tag".to_string()),
        Value::String(tag.to_string()),
    );
    Ok(())
}

/// Serialize the mapping to the output path, overwriting existing content.
pub fn write_mapping(path: &Path, values: &Mapping) -> Result<()> {
    let content = serde_yaml::to_string(values).context("Failed to serialize values document")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write values file {}", path.display()))?;
    Ok(())
}

/// Look up `key`, inserting an empty mapping if absent. Errors if the key
/// exists with a non-mapping value.
fn ensure_mapping<'a>(map: &'a mut Mapping, key: &str) -> Result<&'a mut Mapping> {
    let key = Value::String(key.to_string());
    if !map.contains_key(&key) {
        map.insert(key.clone(), Value::Mapping(Mapping::new()));
    }
    match map.get_mut(&key) {
        Some(Value::Mapping(mapping)) => Ok(mapping),
        _ => bail!("Values key `{}` exists but is not a mapping", key_name(&key)),
    }
}

fn key_name(key: &Value) -> &str {
    key.as_str().unwrap_or("<non-string key>")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
