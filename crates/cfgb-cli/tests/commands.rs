//! Integration test: run the `cfgb` subcommand handlers against files in a
//! temporary directory, using the camera registry schema from `schemas/`.

use std::path::{Path, PathBuf};

use cfgb_cli::defaults::{defaults_at, run_defaults, DefaultsArgs};
use cfgb_cli::document::{load_schema, load_value};
use cfgb_cli::edit::{run_get, run_merge, run_set, GetArgs, MergeArgs, SetArgs};
use cfgb_cli::entry::{run_add_entry, AddEntryArgs};
use cfgb_cli::fields::{run_fields, FieldsArgs};
use cfgb_cli::validate::{run_validate, OutputFormat, ValidateArgs};
use cfgb_schema::EngineOptions;
use serde_json::json;

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn schema_path() -> PathBuf {
    repo_root().join("schemas/camera-registry.schema.json")
}

/// Copy the example config into `dir` so tests can edit it.
fn scratch_config(dir: &Path) -> PathBuf {
    let target = dir.join("config.yaml");
    std::fs::copy(repo_root().join("configs/example.yaml"), &target).unwrap();
    target
}

fn validate_args(config: PathBuf) -> ValidateArgs {
    ValidateArgs {
        schema: schema_path(),
        config,
        pointer: None,
        format: OutputFormat::Text,
        options: None,
    }
}

#[test]
fn test_validate_example_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(dir.path());
    assert_eq!(run_validate(&validate_args(config)).unwrap(), 0);
}

#[test]
fn test_validate_broken_config_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("broken.json");
    std::fs::write(
        &config,
        r#"{"mqtt": {"port": "x"}, "cameras": {"garage": {"detect": {"fps": 0}}}}"#,
    )
    .unwrap();
    let mut args = validate_args(config);
    args.format = OutputFormat::Json;
    assert_eq!(run_validate(&args).unwrap(), 1);
}

#[test]
fn test_validate_pointer_subtree() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("partial.json");
    std::fs::write(
        &config,
        r#"{"cameras": {"garage": {"ffmpeg": {"inputs": [{"path": "rtsp://x", "roles": ["detect"]}]}}}}"#,
    )
    .unwrap();

    let mut args = validate_args(config.clone());
    assert_eq!(run_validate(&args).unwrap(), 1, "root is missing mqtt");

    args.pointer = Some("cameras.garage".to_string());
    assert_eq!(run_validate(&args).unwrap(), 0);

    args.pointer = Some("cameras.attic".to_string());
    assert!(run_validate(&args).is_err());
}

#[test]
fn test_validate_pointer_into_array() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("inputs.json");
    std::fs::write(
        &config,
        r#"{"cameras": {"garage": {"ffmpeg": {"inputs": [
            {"path": "rtsp://x", "roles": ["detect"]},
            {"path": "rtsp://y", "roles": ["sing"]}
        ]}}}}"#,
    )
    .unwrap();

    let mut args = validate_args(config);
    args.format = OutputFormat::Json;
    args.pointer = Some("cameras.garage.ffmpeg.inputs.0".to_string());
    assert_eq!(run_validate(&args).unwrap(), 0);

    args.pointer = Some("cameras.garage.ffmpeg.inputs.1".to_string());
    assert_eq!(run_validate(&args).unwrap(), 1);

    args.pointer = Some("cameras.garage.ffmpeg.inputs.2".to_string());
    assert!(run_validate(&args).is_err());
}

#[test]
fn test_validate_with_pass_through_options() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(dir.path());
    let mut value = load_value(&config).unwrap();
    value["cameras"]["front_door"]["snapshots"] = json!("on");
    std::fs::write(&config, serde_yaml::to_string(&value).unwrap()).unwrap();

    assert_eq!(run_validate(&validate_args(config.clone())).unwrap(), 1);

    let options = dir.path().join("engine.yaml");
    std::fs::write(&options, "union_mode: pass_through\n").unwrap();
    let mut args = validate_args(config);
    args.options = Some(options);
    assert_eq!(run_validate(&args).unwrap(), 0);
}

#[test]
fn test_validate_missing_schema_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = validate_args(scratch_config(dir.path()));
    args.schema = dir.path().join("missing.json");
    assert!(run_validate(&args).is_err());
}

#[test]
fn test_defaults_and_fields() {
    let defaults = DefaultsArgs {
        schema: schema_path(),
        at: Some("cameras.any".to_string()),
        options: None,
    };
    assert_eq!(run_defaults(&defaults).unwrap(), 0);

    let fields = FieldsArgs {
        schema: schema_path(),
        at: Some("cameras.any".to_string()),
    };
    assert_eq!(run_fields(&fields).unwrap(), 0);

    let not_object = FieldsArgs {
        schema: schema_path(),
        at: Some("mqtt.host".to_string()),
    };
    assert!(run_fields(&not_object).is_err());
}

#[test]
fn test_fields_of_optional_object() {
    let snapshots = FieldsArgs {
        schema: schema_path(),
        at: Some("cameras.front_door.snapshots".to_string()),
    };
    assert_eq!(run_fields(&snapshots).unwrap(), 0);
}

#[test]
fn test_defaults_at_keeps_reference_default() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.json");
    std::fs::write(
        &schema,
        r##"{
            "type": "object",
            "properties": {
                "detect": {"$ref": "#/$defs/Detect", "default": {"fps": 10}},
                "fallback": {"$ref": "#/$defs/Detect"}
            },
            "$defs": {
                "Detect": {"type": "object", "properties": {"fps": {"type": "integer", "default": 5}}}
            }
        }"##,
    )
    .unwrap();
    let document = load_schema(&schema).unwrap();

    let detect = defaults_at(&document, EngineOptions::default(), "detect").unwrap();
    assert_eq!(detect, Some(json!({"fps": 10})));
    let fallback = defaults_at(&document, EngineOptions::default(), "fallback").unwrap();
    assert_eq!(fallback, Some(json!({"fps": 5})));
    assert!(defaults_at(&document, EngineOptions::default(), "missing").is_err());

    let args = DefaultsArgs {
        schema,
        at: Some("detect".to_string()),
        options: None,
    };
    assert_eq!(run_defaults(&args).unwrap(), 0);
}

#[test]
fn test_get_existing_and_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(dir.path());
    let found = GetArgs {
        config: config.clone(),
        path: "cameras.front_door.detect.fps".to_string(),
    };
    assert_eq!(run_get(&found).unwrap(), 0);
    let missing = GetArgs {
        config,
        path: "cameras.attic".to_string(),
    };
    assert_eq!(run_get(&missing).unwrap(), 1);
}

#[test]
fn test_set_writes_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(dir.path());
    let args = SetArgs {
        config: config.clone(),
        path: "cameras.front_door.detect.fps".to_string(),
        value: "10".to_string(),
        write: true,
    };
    assert_eq!(run_set(&args).unwrap(), 0);
    let value = load_value(&config).unwrap();
    assert_eq!(value["cameras"]["front_door"]["detect"]["fps"], 10);
    assert_eq!(value["mqtt"]["host"], "mqtt.local");
}

#[test]
fn test_set_without_write_leaves_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(dir.path());
    let before = std::fs::read_to_string(&config).unwrap();
    let args = SetArgs {
        config: config.clone(),
        path: "mqtt.user".to_string(),
        value: "admin".to_string(),
        write: false,
    };
    assert_eq!(run_set(&args).unwrap(), 0);
    assert_eq!(std::fs::read_to_string(&config).unwrap(), before);
}

#[test]
fn test_merge_patch() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(dir.path());
    let patch = dir.path().join("patch.json");
    std::fs::write(
        &patch,
        r#"{"cameras": {"front_door": {"detect": {"fps": 15}}}, "record": {"enabled": false}}"#,
    )
    .unwrap();
    let args = MergeArgs {
        config: config.clone(),
        patch,
        write: true,
    };
    assert_eq!(run_merge(&args).unwrap(), 0);
    let value = load_value(&config).unwrap();
    assert_eq!(value["cameras"]["front_door"]["detect"]["fps"], 15);
    assert_eq!(value["cameras"]["front_door"]["detect"]["width"], 1280);
    assert_eq!(value["record"]["enabled"], false);
    assert_eq!(value["record"]["mode"], "motion");
}

#[test]
fn test_merge_rejects_non_map_patch() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(dir.path());
    let patch = dir.path().join("patch.json");
    std::fs::write(&patch, "[1, 2]").unwrap();
    let args = MergeArgs {
        config,
        patch,
        write: false,
    };
    assert!(run_merge(&args).is_err());
}

#[test]
fn test_add_entry_seeds_from_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(dir.path());
    let patch = dir.path().join("garage.yaml");
    std::fs::write(
        &patch,
        "ffmpeg:\n  inputs:\n    - path: rtsp://10.0.0.9/live\n      roles: [detect]\n",
    )
    .unwrap();

    let args = AddEntryArgs {
        schema: schema_path(),
        config: config.clone(),
        at: "cameras".to_string(),
        key: "garage".to_string(),
        patch: Some(patch),
        force: false,
        write: true,
    };
    assert_eq!(run_add_entry(&args).unwrap(), 0);

    let value = load_value(&config).unwrap();
    assert_eq!(value["cameras"]["garage"]["detect"]["fps"], 5);
    assert_eq!(value["cameras"]["garage"]["objects"]["track"], json!(["person"]));
    assert_eq!(
        value["cameras"]["garage"]["ffmpeg"]["inputs"][0]["path"],
        "rtsp://10.0.0.9/live"
    );

    // Second add without --force refuses to clobber the entry.
    assert!(run_add_entry(&args).is_err());
}

#[test]
fn test_add_entry_non_dictionary_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = AddEntryArgs {
        schema: schema_path(),
        config: scratch_config(dir.path()),
        at: "mqtt".to_string(),
        key: "extra".to_string(),
        patch: None,
        force: false,
        write: false,
    };
    assert!(run_add_entry(&args).is_err());
}
