//! # Document I/O
//!
//! Reads and writes configuration and schema files. The format is chosen by
//! extension: `.yaml` / `.yml` is YAML, anything else is JSON. YAML is
//! converted into the JSON value model the engine works on.

use std::path::Path;

use anyhow::{bail, Context, Result};
use cfgb_schema::{EngineOptions, SchemaDocument};
use serde_json::Value;

/// File formats the CLI reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Format implied by a file's extension.
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

/// Read a JSON or YAML file into a value.
pub fn load_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_value(&content, Format::of(path))
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse text in the given format.
pub fn parse_value(content: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => Ok(serde_json::from_str(content)?),
        Format::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
            yaml_to_json_value(&yaml)
        }
    }
}

/// Write a value back to disk in the format implied by the path.
pub fn write_value(path: &Path, value: &Value) -> Result<()> {
    let mut text = match Format::of(path) {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote document");
    Ok(())
}

/// Load and parse a schema document.
pub fn load_schema(path: &Path) -> Result<SchemaDocument> {
    let raw = load_value(path)?;
    SchemaDocument::from_value(raw)
        .with_context(|| format!("invalid schema {}", path.display()))
}

/// Load engine options, or the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<EngineOptions> {
    match path {
        None => Ok(EngineOptions::default()),
        Some(path) => {
            let raw = load_value(path)?;
            serde_json::from_value(raw)
                .with_context(|| format!("invalid engine options {}", path.display()))
        }
    }
}

/// Read a value given on the command line: JSON if it parses, otherwise
/// the literal text as a string.
pub fn parse_literal(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped. Non-string scalar keys are stringified; sequence or
/// mapping keys are rejected.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                match serde_json::Number::from_f64(f) {
                    Some(number) => Ok(Value::Number(number)),
                    None => bail!("cannot represent float {f} in JSON"),
                }
            } else {
                bail!("unsupported YAML number: {n:?}")
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => Ok(Value::Array(
            seq.iter().map(yaml_to_json_value).collect::<Result<_>>()?,
        )),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => bail!("unsupported YAML map key: {other:?}"),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
