//! # Defaults Subcommand
//!
//! Prints the default value a schema implies, for the whole document or for
//! the node governing one config path.

use std::path::PathBuf;

use anyhow::{bail, Result};
use cfgb_schema::{DefaultDeriver, EngineOptions, SchemaDocument};
use clap::Args;
use serde_json::Value;

use crate::document::{load_options, load_schema};
use crate::{print_json, split_path};

/// Arguments for the defaults subcommand.
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Dot-separated config path to derive defaults for. Defaults to the root.
    #[arg(long)]
    pub at: Option<String>,

    /// Engine options file (`max_depth`, `union_mode`).
    #[arg(long)]
    pub options: Option<PathBuf>,
}

/// Execute the defaults subcommand.
pub fn run_defaults(args: &DefaultsArgs) -> Result<u8> {
    let document = load_schema(&args.schema)?;
    let options = load_options(args.options.as_deref())?;
    let at = args.at.as_deref().unwrap_or_default();

    match defaults_at(&document, options, at)? {
        Some(value) => {
            print_json(&value)?;
            Ok(0)
        }
        None => {
            eprintln!("schema implies no default");
            Ok(1)
        }
    }
}

/// Default for the node declared at a dot-separated config path.
///
/// A `$ref` at the path keeps its own `default`, which wins over whatever
/// the referenced schema implies.
pub fn defaults_at(
    document: &SchemaDocument,
    options: EngineOptions,
    at: &str,
) -> Result<Option<Value>> {
    let Some(node) = document.node_at(&split_path(at)) else {
        bail!("no schema governs config path '{at}'");
    };
    Ok(DefaultDeriver::with_options(document, options).derive(node))
}
