//! # Get, Set, and Merge Subcommands
//!
//! Schema-free edits of a configuration file by path.
//!
//! Without `--write`, `set` and `merge` print the edited configuration and
//! leave the file alone.
//!
//! ```bash
//! cfgb get --config configs/example.yaml cameras.front_door.detect.fps
//! cfgb set --config configs/example.yaml cameras.front_door.detect.fps 10 --write
//! cfgb merge --config configs/example.yaml --patch patch.yaml --write
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use cfgb_core::{merge_value, path};
use clap::Args;
use serde_json::Value;

use crate::document::{load_value, parse_literal, write_value};
use crate::{print_json, split_path};

/// Arguments for the get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration file (JSON or YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Dot-separated path to read.
    pub path: String,
}

/// Arguments for the set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration file (JSON or YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Dot-separated path to write. Missing maps along the way are created.
    pub path: String,

    /// New value, as JSON. Text that is not valid JSON is stored as a string.
    pub value: String,

    /// Write the result back to the config file instead of printing it.
    #[arg(long)]
    pub write: bool,
}

/// Arguments for the merge subcommand.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Configuration file (JSON or YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Patch file (JSON or YAML) deep-merged over the config.
    #[arg(long)]
    pub patch: PathBuf,

    /// Write the result back to the config file instead of printing it.
    #[arg(long)]
    pub write: bool,
}

/// Execute the get subcommand. Returns 1 when nothing is stored at the path.
pub fn run_get(args: &GetArgs) -> Result<u8> {
    let config = load_value(&args.config)?;
    match path::get(&config, &split_path(&args.path)) {
        Some(value) => {
            print_json(value)?;
            Ok(0)
        }
        None => {
            eprintln!("no value at '{}'", args.path);
            Ok(1)
        }
    }
}

/// Execute the set subcommand.
pub fn run_set(args: &SetArgs) -> Result<u8> {
    let segments = split_path(&args.path);
    if segments.is_empty() {
        bail!("set needs a non-empty path");
    }
    let mut config = load_value(&args.config)?;
    path::set(&mut config, &segments, parse_literal(&args.value));
    emit(&args.config, &config, args.write)
}

/// Execute the merge subcommand.
pub fn run_merge(args: &MergeArgs) -> Result<u8> {
    let config = load_value(&args.config)?;
    let patch = load_value(&args.patch)?;
    if !patch.is_object() {
        bail!("patch {} must be a map at the top level", args.patch.display());
    }
    let merged = merge_value(&config, &patch);
    emit(&args.config, &merged, args.write)
}

pub(crate) fn emit(target: &Path, config: &Value, write: bool) -> Result<u8> {
    if write {
        write_value(target, config)?;
    } else {
        print_json(config)?;
    }
    Ok(0)
}
