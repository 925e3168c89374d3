//! # Schema Model
//!
//! The tagged-union representation of one schema node, and the parser that
//! builds it from a JSON-Schema-style document.
//!
//! ## Kinds
//!
//! | Kind         | Built from                                                       |
//! |--------------|------------------------------------------------------------------|
//! | `string`     | `type: string`, or an untyped `enum` of strings                  |
//! | `number`     | `type: number`                                                   |
//! | `integer`    | `type: integer`                                                  |
//! | `boolean`    | `type: boolean`                                                  |
//! | `null`       | `type: null`                                                     |
//! | `array`      | `type: array` (missing `items` accepts any element)              |
//! | `object`     | `type: object` with `properties`, or without a typed extras rule |
//! | `dictionary` | `type: object` without `properties` but with an `additionalProperties` schema |
//! | `reference`  | `$ref`                                                           |
//! | `union`      | `anyOf`, `oneOf`, `allOf`, or a `type` array with several non-null types |
//! | `any`        | `{}`, `true`, or an untyped node with nothing to infer from       |
//!
//! A `"null"` entry inside a `type` array marks the node nullable rather than
//! producing a union alternative.
//!
//! Schema nodes are immutable once parsed. `pattern` is compiled here, so a
//! bad regular expression is a load error rather than a validation surprise.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::error::SchemaError;

/// Descriptive metadata carried by any node.
///
/// None of it affects validation. `default` is authoritative for default
/// derivation: `Some(Value::Null)` is an explicit null default, distinct
/// from `None` (no default declared).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaMeta {
    /// `title`
    pub title: Option<String>,
    /// `description`
    pub description: Option<String>,
    /// `default`
    pub default: Option<Value>,
    /// `examples`, in declaration order.
    pub examples: Vec<Value>,
}

/// One node of a schema document.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    /// What shape of value the node describes.
    pub kind: SchemaKind,
    /// Whether `null` is accepted in place of a value of `kind`.
    pub nullable: bool,
    /// Closed set of allowed literal values (`enum`).
    pub enumeration: Option<Vec<Value>>,
    /// Descriptive metadata.
    pub meta: SchemaMeta,
}

/// The discriminated part of a [`SchemaNode`].
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// A string value.
    String(StringConstraints),
    /// Any number.
    Number(NumericConstraints),
    /// A number without a fractional part.
    Integer(NumericConstraints),
    /// `true` or `false`.
    Boolean,
    /// Only `null`.
    Null,
    /// An ordered list with uniform elements.
    Array(ArraySchema),
    /// A map with named, fixed properties.
    Object(ObjectSchema),
    /// A map with arbitrary keys whose values all share one schema.
    Dictionary(Box<SchemaNode>),
    /// A pointer elsewhere in the same document.
    Reference(String),
    /// Alternative schemas.
    Union(UnionSchema),
    /// No constraint at all.
    Any,
}

impl SchemaKind {
    /// Short tag naming the kind, as reported in field metadata.
    pub fn tag(&self) -> &'static str {
        match self {
            SchemaKind::String(_) => "string",
            SchemaKind::Number(_) => "number",
            SchemaKind::Integer(_) => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Array(_) => "array",
            SchemaKind::Object(_) => "object",
            SchemaKind::Dictionary(_) => "dictionary",
            SchemaKind::Reference(_) => "reference",
            SchemaKind::Union(_) => "union",
            SchemaKind::Any => "any",
        }
    }
}

/// Constraints for `string` nodes.
#[derive(Debug, Clone, Default)]
pub struct StringConstraints {
    /// `minLength`, in characters.
    pub min_length: Option<u64>,
    /// `maxLength`, in characters.
    pub max_length: Option<u64>,
    /// `pattern`, unanchored.
    pub pattern: Option<Regex>,
}

/// Constraints for `number` and `integer` nodes.
///
/// Bounds keep their original JSON number so metadata can report them
/// exactly as written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericConstraints {
    /// `minimum` (inclusive).
    pub minimum: Option<Number>,
    /// `maximum` (inclusive).
    pub maximum: Option<Number>,
    /// `exclusiveMinimum`.
    pub exclusive_minimum: Option<Number>,
    /// `exclusiveMaximum`.
    pub exclusive_maximum: Option<Number>,
    /// `multipleOf`.
    pub multiple_of: Option<Number>,
}

/// Schema of an `array` node.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    /// Schema every element must satisfy.
    pub items: Box<SchemaNode>,
    /// `minItems`
    pub min_items: Option<u64>,
    /// `maxItems`
    pub max_items: Option<u64>,
}

/// Schema of an `object` node.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    /// Declared properties by name.
    pub properties: BTreeMap<String, SchemaNode>,
    /// Names that must be present.
    pub required: BTreeSet<String>,
    /// Policy for keys not in `properties`.
    pub additional: AdditionalProperties,
}

/// What an object does with keys it does not declare.
#[derive(Debug, Clone)]
pub enum AdditionalProperties {
    /// `true` or absent: untyped extras are fine.
    Allowed,
    /// `false`: closed object.
    Forbidden,
    /// Extras must satisfy this schema.
    Schema(Box<SchemaNode>),
}

/// How the alternatives of a union combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `anyOf`, or a multi-type `type` array.
    AnyOf,
    /// `oneOf`. Treated like `anyOf`: at least one alternative must hold.
    OneOf,
    /// `allOf`. Every alternative must hold.
    AllOf,
}

impl Combinator {
    /// The JSON Schema keyword for this combinator.
    pub fn keyword(self) -> &'static str {
        match self {
            Combinator::AnyOf => "anyOf",
            Combinator::OneOf => "oneOf",
            Combinator::AllOf => "allOf",
        }
    }
}

/// Schema of a `union` node.
#[derive(Debug, Clone)]
pub struct UnionSchema {
    /// How the alternatives combine.
    pub combinator: Combinator,
    /// Alternatives in declaration order.
    pub alternatives: Vec<SchemaNode>,
}

impl SchemaNode {
    /// A node of the given kind with no metadata.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
            enumeration: None,
            meta: SchemaMeta::default(),
        }
    }

    /// The unconstrained node.
    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    /// Parse a schema node whose location is the document root.
    pub fn parse(value: &Value) -> Result<Self, SchemaError> {
        Self::parse_at(value, "#")
    }

    /// Parse a schema node found at `location` (a `#/...` pointer used only
    /// in error messages).
    pub fn parse_at(value: &Value, location: &str) -> Result<Self, SchemaError> {
        let obj = match value {
            Value::Bool(true) => return Ok(Self::any()),
            Value::Bool(false) => {
                return Err(SchemaError::Unsupported {
                    location: location.to_string(),
                    reason: "the 'false' schema is only supported as additionalProperties"
                        .to_string(),
                })
            }
            Value::Object(obj) => obj,
            other => {
                return Err(SchemaError::Unsupported {
                    location: location.to_string(),
                    reason: format!("expected a schema object, found {other}"),
                })
            }
        };

        let meta = parse_meta(obj, location)?;
        let enumeration = match obj.get("enum") {
            None => None,
            Some(Value::Array(values)) => Some(values.clone()),
            Some(_) => return Err(invalid(location, "enum", "expected an array")),
        };

        if let Some(reference) = obj.get("$ref") {
            let reference = reference
                .as_str()
                .ok_or_else(|| invalid(location, "$ref", "expected a string"))?;
            return Ok(Self {
                kind: SchemaKind::Reference(reference.to_string()),
                nullable: false,
                enumeration,
                meta,
            });
        }

        for combinator in [Combinator::AnyOf, Combinator::OneOf, Combinator::AllOf] {
            if let Some(alternatives) = obj.get(combinator.keyword()) {
                let union = parse_union(alternatives, combinator, location)?;
                return Ok(Self {
                    kind: SchemaKind::Union(union),
                    nullable: false,
                    enumeration,
                    meta,
                });
            }
        }

        let (kind, nullable) = match obj.get("type") {
            None => (infer_kind(obj, enumeration.as_deref(), location)?, false),
            Some(Value::String(type_name)) => (build_kind(type_name, obj, location)?, false),
            Some(Value::Array(type_names)) => parse_type_array(type_names, obj, location)?,
            Some(_) => {
                return Err(invalid(
                    location,
                    "type",
                    "expected a string or an array of strings",
                ))
            }
        };

        Ok(Self {
            kind,
            nullable,
            enumeration,
            meta,
        })
    }

    /// Push every reference string reachable from this node (without
    /// following references) onto `out`.
    pub fn collect_references(&self, out: &mut Vec<String>) {
        match &self.kind {
            SchemaKind::Reference(reference) => out.push(reference.clone()),
            SchemaKind::Array(array) => array.items.collect_references(out),
            SchemaKind::Object(object) => {
                for property in object.properties.values() {
                    property.collect_references(out);
                }
                if let AdditionalProperties::Schema(extra) = &object.additional {
                    extra.collect_references(out);
                }
            }
            SchemaKind::Dictionary(values) => values.collect_references(out),
            SchemaKind::Union(union) => {
                for alternative in &union.alternatives {
                    alternative.collect_references(out);
                }
            }
            SchemaKind::String(_)
            | SchemaKind::Number(_)
            | SchemaKind::Integer(_)
            | SchemaKind::Boolean
            | SchemaKind::Null
            | SchemaKind::Any => {}
        }
    }
}

/// Append an escaped JSON-pointer segment to a location.
pub(crate) fn pointer_child(location: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{location}/{escaped}")
}

fn invalid(location: &str, keyword: &'static str, reason: &str) -> SchemaError {
    SchemaError::InvalidKeyword {
        location: location.to_string(),
        keyword,
        reason: reason.to_string(),
    }
}

fn parse_meta(obj: &Map<String, Value>, location: &str) -> Result<SchemaMeta, SchemaError> {
    let text = |keyword: &'static str| -> Result<Option<String>, SchemaError> {
        match obj.get(keyword) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(invalid(location, keyword, "expected a string")),
        }
    };
    let examples = match obj.get("examples") {
        None => Vec::new(),
        Some(Value::Array(values)) => values.clone(),
        Some(_) => return Err(invalid(location, "examples", "expected an array")),
    };
    Ok(SchemaMeta {
        title: text("title")?,
        description: text("description")?,
        default: obj.get("default").cloned(),
        examples,
    })
}

fn parse_union(
    alternatives: &Value,
    combinator: Combinator,
    location: &str,
) -> Result<UnionSchema, SchemaError> {
    let keyword = combinator.keyword();
    let items = alternatives
        .as_array()
        .ok_or_else(|| invalid(location, keyword, "expected an array of schemas"))?;
    let base = pointer_child(location, keyword);
    let alternatives = items
        .iter()
        .enumerate()
        .map(|(i, item)| SchemaNode::parse_at(item, &pointer_child(&base, &i.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(UnionSchema {
        combinator,
        alternatives,
    })
}

fn parse_type_array(
    type_names: &[Value],
    obj: &Map<String, Value>,
    location: &str,
) -> Result<(SchemaKind, bool), SchemaError> {
    let mut names = Vec::with_capacity(type_names.len());
    for name in type_names {
        let name = name
            .as_str()
            .ok_or_else(|| invalid(location, "type", "type array entries must be strings"))?;
        names.push(name);
    }

    let nullable = names.contains(&"null");
    let concrete: Vec<&str> = names.into_iter().filter(|n| *n != "null").collect();

    match concrete.as_slice() {
        [] => Ok((SchemaKind::Null, false)),
        [single] => Ok((build_kind(single, obj, location)?, nullable)),
        several => {
            let alternatives = several
                .iter()
                .map(|name| build_kind(name, obj, location).map(SchemaNode::new))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((
                SchemaKind::Union(UnionSchema {
                    combinator: Combinator::AnyOf,
                    alternatives,
                }),
                nullable,
            ))
        }
    }
}

fn infer_kind(
    obj: &Map<String, Value>,
    enumeration: Option<&[Value]>,
    location: &str,
) -> Result<SchemaKind, SchemaError> {
    if obj.contains_key("properties") || obj.contains_key("additionalProperties") {
        return build_kind("object", obj, location);
    }
    if obj.contains_key("items") {
        return build_kind("array", obj, location);
    }
    if let Some(values) = enumeration {
        if !values.is_empty() && values.iter().all(Value::is_string) {
            return build_kind("string", obj, location);
        }
    }
    Ok(SchemaKind::Any)
}

fn build_kind(
    type_name: &str,
    obj: &Map<String, Value>,
    location: &str,
) -> Result<SchemaKind, SchemaError> {
    match type_name {
        "string" => Ok(SchemaKind::String(StringConstraints {
            min_length: count_keyword(obj, "minLength", location)?,
            max_length: count_keyword(obj, "maxLength", location)?,
            pattern: pattern_keyword(obj, location)?,
        })),
        "number" => Ok(SchemaKind::Number(numeric_constraints(obj, location)?)),
        "integer" => Ok(SchemaKind::Integer(numeric_constraints(obj, location)?)),
        "boolean" => Ok(SchemaKind::Boolean),
        "null" => Ok(SchemaKind::Null),
        "array" => {
            let items = match obj.get("items") {
                Some(items) => SchemaNode::parse_at(items, &pointer_child(location, "items"))?,
                None => SchemaNode::any(),
            };
            Ok(SchemaKind::Array(ArraySchema {
                items: Box::new(items),
                min_items: count_keyword(obj, "minItems", location)?,
                max_items: count_keyword(obj, "maxItems", location)?,
            }))
        }
        "object" => object_or_dictionary(obj, location),
        other => Err(SchemaError::UnknownType {
            location: location.to_string(),
            type_name: other.to_string(),
        }),
    }
}

fn object_or_dictionary(
    obj: &Map<String, Value>,
    location: &str,
) -> Result<SchemaKind, SchemaError> {
    let additional = match obj.get("additionalProperties") {
        None | Some(Value::Bool(true)) => AdditionalProperties::Allowed,
        Some(Value::Bool(false)) => AdditionalProperties::Forbidden,
        Some(schema @ Value::Object(_)) => AdditionalProperties::Schema(Box::new(
            SchemaNode::parse_at(schema, &pointer_child(location, "additionalProperties"))?,
        )),
        Some(_) => {
            return Err(invalid(
                location,
                "additionalProperties",
                "expected a boolean or a schema",
            ))
        }
    };

    let declared = match obj.get("properties") {
        None => None,
        Some(Value::Object(props)) => Some(props),
        Some(_) => return Err(invalid(location, "properties", "expected an object")),
    };

    let additional = match (declared.is_none(), additional) {
        (true, AdditionalProperties::Schema(values)) => return Ok(SchemaKind::Dictionary(values)),
        (_, additional) => additional,
    };

    let mut properties = BTreeMap::new();
    if let Some(props) = declared {
        let base = pointer_child(location, "properties");
        for (name, schema) in props {
            let node = SchemaNode::parse_at(schema, &pointer_child(&base, name))?;
            properties.insert(name.clone(), node);
        }
    }

    let required = match obj.get("required") {
        None => BTreeSet::new(),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| {
                name.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(location, "required", "entries must be strings"))
            })
            .collect::<Result<BTreeSet<_>, _>>()?,
        Some(_) => return Err(invalid(location, "required", "expected an array")),
    };

    Ok(SchemaKind::Object(ObjectSchema {
        properties,
        required,
        additional,
    }))
}

fn count_keyword(
    obj: &Map<String, Value>,
    keyword: &'static str,
    location: &str,
) -> Result<Option<u64>, SchemaError> {
    match obj.get(keyword) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| invalid(location, keyword, "expected a non-negative integer")),
    }
}

fn number_keyword(
    obj: &Map<String, Value>,
    keyword: &'static str,
    location: &str,
) -> Result<Option<Number>, SchemaError> {
    match obj.get(keyword) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(_) => Err(invalid(location, keyword, "expected a number")),
    }
}

fn numeric_constraints(
    obj: &Map<String, Value>,
    location: &str,
) -> Result<NumericConstraints, SchemaError> {
    let multiple_of = number_keyword(obj, "multipleOf", location)?;
    if let Some(step) = &multiple_of {
        if step.as_f64().map_or(true, |s| s <= 0.0) {
            return Err(invalid(location, "multipleOf", "must be greater than zero"));
        }
    }
    Ok(NumericConstraints {
        minimum: number_keyword(obj, "minimum", location)?,
        maximum: number_keyword(obj, "maximum", location)?,
        exclusive_minimum: number_keyword(obj, "exclusiveMinimum", location)?,
        exclusive_maximum: number_keyword(obj, "exclusiveMaximum", location)?,
        multiple_of,
    })
}

fn pattern_keyword(obj: &Map<String, Value>, location: &str) -> Result<Option<Regex>, SchemaError> {
    match obj.get("pattern") {
        None => Ok(None),
        Some(Value::String(source)) => {
            Regex::new(source)
                .map(Some)
                .map_err(|source| SchemaError::InvalidPattern {
                    location: location.to_string(),
                    source,
                })
        }
        Some(_) => Err(invalid(location, "pattern", "expected a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_string_constraints() {
        let node = SchemaNode::parse(&json!({
            "type": "string",
            "minLength": 2,
            "maxLength": 8,
            "pattern": "^[a-z_]+$"
        }))
        .unwrap();
        match &node.kind {
            SchemaKind::String(c) => {
                assert_eq!(c.min_length, Some(2));
                assert_eq!(c.max_length, Some(8));
                assert_eq!(c.pattern.as_ref().map(Regex::as_str), Some("^[a-z_]+$"));
            }
            other => panic!("expected string kind, got {}", other.tag()),
        }
    }

    #[test]
    fn test_parse_dictionary_vs_object() {
        let dict = SchemaNode::parse(&json!({
            "type": "object",
            "additionalProperties": {"type": "boolean"}
        }))
        .unwrap();
        assert_eq!(dict.kind.tag(), "dictionary");

        let open = SchemaNode::parse(&json!({"type": "object"})).unwrap();
        match &open.kind {
            SchemaKind::Object(o) => {
                assert!(o.properties.is_empty());
                assert!(matches!(o.additional, AdditionalProperties::Allowed));
            }
            other => panic!("expected object kind, got {}", other.tag()),
        }

        let typed_extras = SchemaNode::parse(&json!({
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "additionalProperties": {"type": "integer"}
        }))
        .unwrap();
        match &typed_extras.kind {
            SchemaKind::Object(o) => {
                assert!(matches!(o.additional, AdditionalProperties::Schema(_)));
            }
            other => panic!("expected object kind, got {}", other.tag()),
        }
    }

    #[test]
    fn test_parse_untyped_inference() {
        let props = SchemaNode::parse(&json!({"properties": {"a": {}}})).unwrap();
        assert_eq!(props.kind.tag(), "object");

        let dict = SchemaNode::parse(&json!({"additionalProperties": {"type": "string"}})).unwrap();
        assert_eq!(dict.kind.tag(), "dictionary");

        let items = SchemaNode::parse(&json!({"items": {"type": "string"}})).unwrap();
        assert_eq!(items.kind.tag(), "array");

        let strings = SchemaNode::parse(&json!({"enum": ["a", "b"]})).unwrap();
        assert_eq!(strings.kind.tag(), "string");

        let mixed = SchemaNode::parse(&json!({"enum": ["a", 1]})).unwrap();
        assert_eq!(mixed.kind.tag(), "any");

        assert_eq!(SchemaNode::parse(&json!({})).unwrap().kind.tag(), "any");
        assert_eq!(SchemaNode::parse(&json!(true)).unwrap().kind.tag(), "any");
    }

    #[test]
    fn test_parse_nullable_type_array() {
        let node = SchemaNode::parse(&json!({"type": ["integer", "null"]})).unwrap();
        assert_eq!(node.kind.tag(), "integer");
        assert!(node.nullable);

        let only_null = SchemaNode::parse(&json!({"type": ["null"]})).unwrap();
        assert_eq!(only_null.kind.tag(), "null");
    }

    #[test]
    fn test_parse_multi_type_is_union() {
        let node = SchemaNode::parse(&json!({"type": ["string", "integer", "null"]})).unwrap();
        assert!(node.nullable);
        match &node.kind {
            SchemaKind::Union(u) => {
                assert_eq!(u.combinator, Combinator::AnyOf);
                let tags: Vec<_> = u.alternatives.iter().map(|a| a.kind.tag()).collect();
                assert_eq!(tags, vec!["string", "integer"]);
            }
            other => panic!("expected union kind, got {}", other.tag()),
        }
    }

    #[test]
    fn test_parse_reference_keeps_sibling_meta() {
        let node = SchemaNode::parse(&json!({
            "$ref": "#/$defs/Detect",
            "title": "Detection",
            "default": {"fps": 5}
        }))
        .unwrap();
        assert!(matches!(&node.kind, SchemaKind::Reference(r) if r == "#/$defs/Detect"));
        assert_eq!(node.meta.title.as_deref(), Some("Detection"));
        assert_eq!(node.meta.default, Some(json!({"fps": 5})));
    }

    #[test]
    fn test_explicit_null_default_is_kept() {
        let node = SchemaNode::parse(&json!({"type": "string", "default": null})).unwrap();
        assert_eq!(node.meta.default, Some(Value::Null));
        let none = SchemaNode::parse(&json!({"type": "string"})).unwrap();
        assert_eq!(none.meta.default, None);
    }

    #[test]
    fn test_parse_combinators() {
        for (keyword, combinator) in [
            ("anyOf", Combinator::AnyOf),
            ("oneOf", Combinator::OneOf),
            ("allOf", Combinator::AllOf),
        ] {
            let node = SchemaNode::parse(&json!({keyword: [{"type": "string"}, {"type": "null"}]}))
                .unwrap();
            match &node.kind {
                SchemaKind::Union(u) => {
                    assert_eq!(u.combinator, combinator);
                    assert_eq!(u.alternatives.len(), 2);
                }
                other => panic!("expected union kind, got {}", other.tag()),
            }
        }
    }

    #[test]
    fn test_unknown_type_reports_location() {
        let err = SchemaNode::parse(&json!({
            "type": "object",
            "properties": {"fps": {"type": "float"}}
        }))
        .unwrap_err();
        match err {
            SchemaError::UnknownType {
                location,
                type_name,
            } => {
                assert_eq!(location, "#/properties/fps");
                assert_eq!(type_name, "float");
            }
            other => panic!("expected UnknownType, got {other}"),
        }
    }

    #[test]
    fn test_invalid_pattern_is_load_error() {
        let err = SchemaNode::parse(&json!({"type": "string", "pattern": "("})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }), "got {err}");
    }

    #[test]
    fn test_invalid_keyword_shapes() {
        let err = SchemaNode::parse(&json!({"type": "string", "minLength": -1})).unwrap_err();
        assert!(
            matches!(err, SchemaError::InvalidKeyword { keyword: "minLength", .. }),
            "got {err}"
        );
        let err = SchemaNode::parse(&json!({"type": "integer", "multipleOf": 0})).unwrap_err();
        assert!(
            matches!(err, SchemaError::InvalidKeyword { keyword: "multipleOf", .. }),
            "got {err}"
        );
        let err = SchemaNode::parse(&json!(false)).unwrap_err();
        assert!(matches!(err, SchemaError::Unsupported { .. }), "got {err}");
    }

    #[test]
    fn test_pointer_child_escapes() {
        assert_eq!(pointer_child("#", "a/b~c"), "#/a~1b~0c");
    }

    #[test]
    fn test_collect_references() {
        let node = SchemaNode::parse(&json!({
            "type": "object",
            "properties": {
                "cameras": {"additionalProperties": {"$ref": "#/$defs/Camera"}},
                "list": {"items": {"anyOf": [{"$ref": "#/$defs/A"}, {"type": "null"}]}}
            }
        }))
        .unwrap();
        let mut refs = Vec::new();
        node.collect_references(&mut refs);
        refs.sort();
        assert_eq!(refs, vec!["#/$defs/A", "#/$defs/Camera"]);
    }
}
