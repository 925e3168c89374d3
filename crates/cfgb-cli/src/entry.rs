//! # Add-Entry Subcommand
//!
//! Adds a new entry to a dictionary in the config (e.g. a camera under
//! `cameras`), seeded from the defaults of the dictionary's value schema and
//! optionally overridden by a patch file.
//!
//! ```bash
//! cfgb add-entry --schema schemas/camera-registry.schema.json \
//!     --config configs/example.yaml --at cameras --key garage --write
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use cfgb_core::path;
use cfgb_schema::{insert_entry, DefaultDeriver};
use clap::Args;

use crate::document::{load_schema, load_value};
use crate::edit::emit;
use crate::split_path;

/// Arguments for the add-entry subcommand.
#[derive(Args, Debug)]
pub struct AddEntryArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Configuration file (JSON or YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Dot-separated config path of the dictionary.
    #[arg(long)]
    pub at: String,

    /// Key of the new entry.
    #[arg(long)]
    pub key: String,

    /// Patch file deep-merged over the seeded entry.
    #[arg(long)]
    pub patch: Option<PathBuf>,

    /// Replace an existing entry with the same key.
    #[arg(long)]
    pub force: bool,

    /// Write the result back to the config file instead of printing it.
    #[arg(long)]
    pub write: bool,
}

/// Execute the add-entry subcommand.
pub fn run_add_entry(args: &AddEntryArgs) -> Result<u8> {
    let document = load_schema(&args.schema)?;
    let mut config = load_value(&args.config)?;
    let overrides = args.patch.as_deref().map(load_value).transpose()?;

    let dictionary = split_path(&args.at);
    let mut existing = dictionary.clone();
    existing.push(args.key.as_str());
    if !args.force && path::get(&config, &existing).is_some() {
        bail!(
            "entry '{}' already exists under '{}' (use --force to replace it)",
            args.key,
            args.at
        );
    }

    let deriver = DefaultDeriver::new(&document);
    insert_entry(&deriver, &mut config, &dictionary, &args.key, overrides.as_ref())?;
    emit(&args.config, &config, args.write)
}
