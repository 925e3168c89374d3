//! # Fields Subcommand
//!
//! Prints form field metadata for the object schema governing a config path,
//! as a JSON array.

use std::path::PathBuf;

use anyhow::{bail, Result};
use cfgb_schema::{concrete_view, metadata, SchemaKind};
use clap::Args;

use crate::document::load_schema;
use crate::{print_json, split_path};

/// Arguments for the fields subcommand.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Dot-separated config path of the object to describe. Defaults to the root.
    #[arg(long)]
    pub at: Option<String>,
}

/// Execute the fields subcommand.
pub fn run_fields(args: &FieldsArgs) -> Result<u8> {
    let document = load_schema(&args.schema)?;
    let at = args.at.as_deref().unwrap_or_default();
    let Some(node) = document.node_at(&split_path(at)) else {
        bail!("no schema governs config path '{at}'");
    };
    let view = concrete_view(&document, node);
    if !matches!(view.kind, SchemaKind::Object(_)) {
        bail!(
            "schema at '{at}' is a {} node; only objects have fields",
            view.kind.tag()
        );
    }
    print_json(&metadata::fields(&document, node))?;
    Ok(0)
}
