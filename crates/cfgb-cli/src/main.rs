//! # cfgb CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cfgb_cli::defaults::{run_defaults, DefaultsArgs};
use cfgb_cli::edit::{run_get, run_merge, run_set, GetArgs, MergeArgs, SetArgs};
use cfgb_cli::entry::{run_add_entry, AddEntryArgs};
use cfgb_cli::fields::{run_fields, FieldsArgs};
use cfgb_cli::validate::{run_validate, ValidateArgs};

/// Config binder: schema-driven validation and editing of configuration files.
///
/// Validates JSON/YAML configs against a JSON-Schema-style schema, derives
/// defaults, describes form fields, and edits values by path.
#[derive(Parser, Debug)]
#[command(name = "cfgb", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a configuration file against a schema.
    Validate(ValidateArgs),

    /// Print the defaults a schema implies.
    Defaults(DefaultsArgs),

    /// Print form field metadata for an object in the schema.
    Fields(FieldsArgs),

    /// Read the value at a path.
    Get(GetArgs),

    /// Write a value at a path.
    Set(SetArgs),

    /// Deep-merge a patch file into a configuration.
    Merge(MergeArgs),

    /// Add a dictionary entry seeded from schema defaults.
    AddEntry(AddEntryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cfgb CLI starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Defaults(args) => run_defaults(&args),
        Commands::Fields(args) => run_fields(&args),
        Commands::Get(args) => run_get(&args),
        Commands::Set(args) => run_set(&args),
        Commands::Merge(args) => run_merge(&args),
        Commands::AddEntry(args) => run_add_entry(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgb_cli::validate::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_validate_minimal() {
        let cli = Cli::try_parse_from([
            "cfgb", "validate", "--schema", "s.json", "--config", "c.yaml",
        ])
        .unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.schema, PathBuf::from("s.json"));
            assert_eq!(args.config, PathBuf::from("c.yaml"));
            assert!(args.pointer.is_none());
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.options.is_none());
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_all_options() {
        let cli = Cli::try_parse_from([
            "cfgb",
            "validate",
            "--schema",
            "s.json",
            "--config",
            "c.yaml",
            "--pointer",
            "cameras.front",
            "--format",
            "json",
            "--options",
            "engine.yaml",
        ])
        .unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.pointer.as_deref(), Some("cameras.front"));
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.options, Some(PathBuf::from("engine.yaml")));
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_requires_schema() {
        assert!(Cli::try_parse_from(["cfgb", "validate", "--config", "c.yaml"]).is_err());
    }

    #[test]
    fn cli_parse_validate_rejects_unknown_format() {
        let result = Cli::try_parse_from([
            "cfgb", "validate", "--schema", "s.json", "--config", "c.yaml", "--format", "xml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_defaults_and_fields() {
        let cli = Cli::try_parse_from(["cfgb", "defaults", "--schema", "s.json"]).unwrap();
        if let Commands::Defaults(args) = cli.command {
            assert!(args.at.is_none());
        } else {
            panic!("expected defaults");
        }

        let cli =
            Cli::try_parse_from(["cfgb", "fields", "--schema", "s.json", "--at", "mqtt"]).unwrap();
        if let Commands::Fields(args) = cli.command {
            assert_eq!(args.at.as_deref(), Some("mqtt"));
        } else {
            panic!("expected fields");
        }
    }

    #[test]
    fn cli_parse_get_and_set() {
        let cli = Cli::try_parse_from(["cfgb", "get", "--config", "c.yaml", "mqtt.host"]).unwrap();
        if let Commands::Get(args) = cli.command {
            assert_eq!(args.path, "mqtt.host");
        } else {
            panic!("expected get");
        }

        let cli = Cli::try_parse_from([
            "cfgb", "set", "--config", "c.yaml", "mqtt.port", "1884", "--write",
        ])
        .unwrap();
        if let Commands::Set(args) = cli.command {
            assert_eq!(args.path, "mqtt.port");
            assert_eq!(args.value, "1884");
            assert!(args.write);
        } else {
            panic!("expected set");
        }
    }

    #[test]
    fn cli_parse_merge() {
        let cli = Cli::try_parse_from([
            "cfgb", "merge", "--config", "c.yaml", "--patch", "p.yaml",
        ])
        .unwrap();
        if let Commands::Merge(args) = cli.command {
            assert_eq!(args.patch, PathBuf::from("p.yaml"));
            assert!(!args.write);
        } else {
            panic!("expected merge");
        }
    }

    #[test]
    fn cli_parse_add_entry() {
        let cli = Cli::try_parse_from([
            "cfgb",
            "add-entry",
            "--schema",
            "s.json",
            "--config",
            "c.yaml",
            "--at",
            "cameras",
            "--key",
            "garage",
            "--force",
        ])
        .unwrap();
        if let Commands::AddEntry(args) = cli.command {
            assert_eq!(args.at, "cameras");
            assert_eq!(args.key, "garage");
            assert!(args.patch.is_none());
            assert!(args.force);
            assert!(!args.write);
        } else {
            panic!("expected add-entry");
        }
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["cfgb", "get", "--config", "c.json", "a"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["cfgb", "-vv", "get", "--config", "c.json", "a"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["cfgb", "get", "--config", "c.json", "a", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["cfgb"]).is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["cfgb", "nonexistent"]).is_err());
    }
}
