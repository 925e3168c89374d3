//! # Dictionary Entries
//!
//! Seeding a new entry in a dynamically-keyed map, e.g. adding a camera
//! called `garage` under `cameras`. The new entry starts from the default
//! the dictionary's value schema implies, with caller overrides deep-merged
//! on top.

use cfgb_core::{merge_value, path, ConfigValue};
use serde_json::{Map, Value};

use crate::defaults::DefaultDeriver;
use crate::error::SchemaError;
use crate::model::{AdditionalProperties, SchemaKind, SchemaNode};

/// Build the initial value for a new entry of the dictionary at
/// `dictionary_path`.
///
/// The dictionary may be a pure dictionary node or an object whose
/// `additionalProperties` holds a schema. When the value schema implies no
/// default, the entry starts from an empty map.
///
/// # Errors
///
/// [`SchemaError::PathNotInSchema`] if no schema governs the path,
/// [`SchemaError::NotADictionary`] if the node there holds no
/// dynamically-keyed entries.
pub fn seed_entry<S: AsRef<str>>(
    deriver: &DefaultDeriver<'_>,
    dictionary_path: &[S],
    overrides: Option<&Value>,
) -> Result<Value, SchemaError> {
    let values = entry_schema(deriver, dictionary_path)?;
    let base = deriver
        .derive(values)
        .unwrap_or_else(|| Value::Object(Map::new()));
    Ok(match overrides {
        Some(patch) => merge_value(&base, patch),
        None => base,
    })
}

/// Seed an entry called `key` and store it in `config` under
/// `dictionary_path`, replacing any existing entry of that name.
///
/// # Errors
///
/// As [`seed_entry`]. `config` is left untouched on error.
pub fn insert_entry<S: AsRef<str>>(
    deriver: &DefaultDeriver<'_>,
    config: &mut ConfigValue,
    dictionary_path: &[S],
    key: &str,
    overrides: Option<&Value>,
) -> Result<(), SchemaError> {
    let entry = seed_entry(deriver, dictionary_path, overrides)?;
    let mut target: Vec<&str> = dictionary_path.iter().map(AsRef::as_ref).collect();
    target.push(key);
    tracing::debug!(path = %target.join("."), "inserting dictionary entry");
    path::set(config, &target, entry);
    Ok(())
}

fn entry_schema<'d, S: AsRef<str>>(
    deriver: &DefaultDeriver<'d>,
    dictionary_path: &[S],
) -> Result<&'d SchemaNode, SchemaError> {
    let document = deriver.document();
    let dotted = || {
        dictionary_path
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(".")
    };
    let node = document
        .schema_at(dictionary_path)
        .ok_or_else(|| SchemaError::PathNotInSchema(dotted()))?;
    match &node.kind {
        SchemaKind::Dictionary(values) => Ok(values.as_ref()),
        SchemaKind::Object(object) => match &object.additional {
            AdditionalProperties::Schema(values) => Ok(values.as_ref()),
            AdditionalProperties::Allowed | AdditionalProperties::Forbidden => {
                Err(SchemaError::NotADictionary {
                    path: dotted(),
                    found: node.kind.tag(),
                })
            }
        },
        other => Err(SchemaError::NotADictionary {
            path: dotted(),
            found: other.tag(),
        }),
    }
}
