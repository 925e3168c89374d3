//! # cfgb-cli — Command-Line Front-End
//!
//! Provides the `cfgb` binary. Every subcommand loads its inputs, calls one
//! engine operation from `cfgb-schema` or `cfgb-core`, and prints the result.
//! No validation or editing logic lives here.
//!
//! ## Subcommands
//!
//! - `cfgb validate` — Validate a config (or one sub-tree of it) against a schema.
//! - `cfgb defaults` — Print the defaults a schema implies.
//! - `cfgb fields` — Print form field metadata for an object in the schema.
//! - `cfgb get` / `cfgb set` — Read or write one value by path.
//! - `cfgb merge` — Deep-merge a patch file into a config.
//! - `cfgb add-entry` — Seed a new dictionary entry from schema defaults.
//!
//! ```bash
//! cfgb validate --schema schemas/camera-registry.schema.json --config configs/example.yaml
//! cfgb add-entry --schema schemas/camera-registry.schema.json \
//!     --config configs/example.yaml --at cameras --key garage --write
//! cfgb set --config configs/example.yaml cameras.garage.detect.fps 10 --write
//! ```
//!
//! Paths on the command line are dot-separated keys (`cameras.front_door.detect`).
//!
//! ## Exit Codes
//!
//! `0` on success, `1` on validation errors or a failed command, `2` on
//! usage errors.

pub mod defaults;
pub mod document;
pub mod edit;
pub mod entry;
pub mod fields;
pub mod validate;

use cfgb_core::ValuePath;
use serde_json::Value;

/// Split a dot-separated command-line path into keys.
pub fn split_path(dotted: &str) -> Vec<&str> {
    dotted.split('.').filter(|part| !part.is_empty()).collect()
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Find the value at a command-line path.
///
/// Unlike [`cfgb_core::path::get`], a numeric segment indexes into an array
/// (`cameras.garage.ffmpeg.inputs.0`). The returned [`ValuePath`] carries
/// index segments, so reports read `inputs[0]`.
pub fn locate<'a>(config: &'a Value, segments: &[&str]) -> Option<(&'a Value, ValuePath)> {
    let mut current = config;
    let mut path = ValuePath::root();
    for segment in segments {
        current = match current {
            Value::Object(map) => {
                path.push(*segment);
                map.get(*segment)?
            }
            Value::Array(items) => {
                let index = segment.parse::<usize>().ok()?;
                path.push(index);
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some((current, path))
}
