//! Integration test: agreement with the `jsonschema` crate.
//!
//! For schemas inside the subset where this engine and Draft 2020-12 mean
//! the same thing (no unions, no references, no coercions), a value must be
//! accepted by both or rejected by both.

use cfgb_schema::{SchemaDocument, Validator};
use serde_json::{json, Value};

fn verdicts(schema: &Value, instance: &Value) -> (bool, bool) {
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    let reference = opts.build(schema).expect("reference validator builds");

    let doc = SchemaDocument::from_value(schema.clone()).expect("schema loads");
    let ours = Validator::new(&doc).validate(instance).is_valid();
    (reference.is_valid(instance), ours)
}

fn detect_schema() -> Value {
    json!({
        "type": "object",
        "required": ["fps"],
        "additionalProperties": false,
        "properties": {
            "enabled": {"type": "boolean"},
            "fps": {"type": "integer", "minimum": 1, "maximum": 30},
            "scale": {"type": "number", "exclusiveMinimum": 0, "multipleOf": 0.5},
            "label": {"type": "string", "minLength": 2, "maxLength": 8, "pattern": "^[a-z_]+$"},
            "mode": {"type": "string", "enum": ["motion", "objects"]},
            "track": {"type": "array", "items": {"type": "string"}, "minItems": 1, "maxItems": 3},
            "user": {"type": ["string", "null"]},
            "masks": {"type": "object", "additionalProperties": {"type": "string"}}
        }
    })
}

#[test]
fn test_agreement_on_detect_schema() {
    let schema = detect_schema();
    let instances = [
        json!({"fps": 5}),
        json!({"fps": 5, "enabled": true, "label": "porch", "mode": "objects"}),
        json!({"fps": 0}),
        json!({"fps": 31}),
        json!({"fps": 5.5}),
        json!({"fps": "5"}),
        json!({}),
        json!({"fps": 5, "extra": 1}),
        json!({"fps": 5, "scale": 1.5}),
        json!({"fps": 5, "scale": 0}),
        json!({"fps": 5, "scale": 0.7}),
        json!({"fps": 5, "label": "a"}),
        json!({"fps": 5, "label": "much_too_long"}),
        json!({"fps": 5, "label": "Porch"}),
        json!({"fps": 5, "mode": "all"}),
        json!({"fps": 5, "track": []}),
        json!({"fps": 5, "track": ["person", "car"]}),
        json!({"fps": 5, "track": ["a", "b", "c", "d"]}),
        json!({"fps": 5, "track": ["person", 3]}),
        json!({"fps": 5, "user": null}),
        json!({"fps": 5, "user": 7}),
        json!({"fps": 5, "masks": {"a": "0,0", "b": "1,1"}}),
        json!({"fps": 5, "masks": {"a": 1}}),
        json!([]),
        json!(null),
    ];

    for instance in &instances {
        let (reference, ours) = verdicts(&schema, instance);
        assert_eq!(
            reference, ours,
            "disagreement on {instance}: jsonschema={reference}, cfgb={ours}"
        );
    }
}

#[test]
fn test_agreement_on_nested_arrays() {
    let schema = json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["path"],
            "properties": {
                "path": {"type": "string"},
                "roles": {"type": "array", "items": {"enum": ["detect", "record"]}}
            }
        }
    });
    let instances = [
        json!([]),
        json!([{"path": "rtsp://cam"}]),
        json!([{"path": "rtsp://cam", "roles": ["detect"]}]),
        json!([{"path": "rtsp://cam", "roles": ["stream"]}]),
        json!([{"roles": ["detect"]}]),
        json!([{"path": 1}]),
        json!({"path": "x"}),
    ];
    for instance in &instances {
        let (reference, ours) = verdicts(&schema, instance);
        assert_eq!(reference, ours, "disagreement on {instance}");
    }
}

#[test]
fn test_agreement_on_enum_beside_type_array_and_reference() {
    let schemas = [
        json!({"type": ["string", "integer"], "enum": ["a", 1]}),
        json!({
            "$ref": "#/$defs/Mode",
            "enum": ["motion", "objects"],
            "$defs": {"Mode": {"type": "string"}}
        }),
        json!({"enum": [1, "one", null]}),
    ];
    let instances = [
        json!("a"),
        json!(1),
        json!("zzz"),
        json!(2),
        json!("motion"),
        json!("all"),
        json!("one"),
        json!(null),
        json!(true),
    ];
    for schema in &schemas {
        for instance in &instances {
            let (reference, ours) = verdicts(schema, instance);
            assert_eq!(reference, ours, "disagreement on {instance} against {schema}");
        }
    }
}
