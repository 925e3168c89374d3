//! # Validate Subcommand
//!
//! Validates a configuration file against a schema and prints every error
//! with its path.
//!
//! ```bash
//! cfgb validate --schema schemas/camera-registry.schema.json --config configs/example.yaml
//! cfgb validate --schema schema.json --config config.yaml --pointer cameras.front_door --format json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use cfgb_schema::{ValidationReport, Validator};
use clap::{Args, ValueEnum};

use crate::document::{load_options, load_schema, load_value};
use crate::{locate, print_json, split_path};

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per error.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Configuration file to validate (JSON or YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Validate only the sub-tree at this dot-separated config path.
    #[arg(long)]
    pub pointer: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Engine options file (`max_depth`, `union_mode`).
    #[arg(long)]
    pub options: Option<PathBuf>,
}

/// Execute the validate subcommand. Returns 1 when the config is invalid.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let document = load_schema(&args.schema)?;
    let config = load_value(&args.config)?;
    let options = load_options(args.options.as_deref())?;
    let validator = Validator::with_options(&document, options);

    let report = match args.pointer.as_deref() {
        None => validator.validate(&config),
        Some(pointer) => {
            let segments = split_path(pointer);
            let Some(node) = document.node_at(&segments) else {
                bail!("no schema governs config path '{pointer}'");
            };
            let Some((value, path)) = locate(&config, &segments) else {
                bail!("config has no value at '{pointer}'");
            };
            validator.validate_against(value, node, &path)
        }
    };

    tracing::debug!(
        errors = report.errors.len(),
        schema_issues = report.schema_issues.len(),
        "validation finished"
    );

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_text(&args.config, &report),
    }
    Ok(if report.is_valid() { 0 } else { 1 })
}

fn print_text(config: &std::path::Path, report: &ValidationReport) {
    if report.is_valid() {
        println!("OK: {}", config.display());
    } else {
        println!(
            "FAILED: {} ({} error{})",
            config.display(),
            report.errors.len(),
            if report.errors.len() == 1 { "" } else { "s" }
        );
    }
    if !report.errors.is_empty() || !report.schema_issues.is_empty() {
        println!("{report}");
    }
}
