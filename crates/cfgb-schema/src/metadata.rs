//! # Field Metadata
//!
//! Flattened, render-ready description of one schema node, used by a form
//! renderer to lay out a field: label, help text, type tag, requiredness,
//! default, constraints, enumerated options, and an example-based
//! placeholder.
//!
//! [`extract`] looks at exactly one node and never recurses. [`fields`] is
//! the convenience a renderer calls for an object: one entry per declared
//! property, with references and `Optional`-style unions (`anyOf: [T, null]`)
//! looked through so the field is described by its concrete shape.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::SchemaDocument;
use crate::model::{SchemaKind, SchemaMeta, SchemaNode};

/// One entry of a field's option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Text shown to the user.
    pub label: String,
    /// The literal stored when the option is picked.
    pub value: Value,
}

/// Render-ready view of one schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    /// Property name within the containing object.
    pub name: String,
    /// `title`, or a humanized `name`.
    pub label: String,
    /// `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kind tag, e.g. `integer` or `dictionary`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the containing object requires the field.
    pub required: bool,
    /// Whether `null` is accepted.
    pub nullable: bool,
    /// The node's explicit `default`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Constraints keyed by their JSON Schema keyword.
    pub validation: BTreeMap<String, Value>,
    /// Enumerated choices, in declaration order.
    pub options: Vec<FieldOption>,
    /// `examples`
    pub examples: Vec<Value>,
    /// `e.g., <first example>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Describe `node` as a field called `name`.
pub fn extract(name: &str, node: &SchemaNode, required: bool) -> FieldMetadata {
    let meta = &node.meta;
    FieldMetadata {
        name: name.to_string(),
        label: meta.title.clone().unwrap_or_else(|| humanize(name)),
        description: meta.description.clone(),
        field_type: node.kind.tag().to_string(),
        required,
        nullable: node.nullable,
        default_value: meta.default.clone(),
        validation: constraints(&node.kind),
        options: node
            .enumeration
            .iter()
            .flatten()
            .map(|value| FieldOption {
                label: literal_text(value),
                value: value.clone(),
            })
            .collect(),
        examples: meta.examples.clone(),
        placeholder: meta
            .examples
            .first()
            .map(|example| format!("e.g., {}", literal_text(example))),
    }
}

/// Describe every declared property of an object node, sorted by name.
///
/// `node` is looked through first, like each property: a reference or an
/// `anyOf: [T, null]` wrapper describes the fields of `T`. Anything that is
/// not an object (including a dictionary, whose keys are not fixed) has no
/// fields.
pub fn fields(document: &SchemaDocument, node: &SchemaNode) -> Vec<FieldMetadata> {
    let view = concrete_view(document, node);
    let SchemaKind::Object(object) = &view.kind else {
        return Vec::new();
    };
    object
        .properties
        .iter()
        .map(|(name, property)| {
            let view = concrete_view(document, property);
            extract(name, &view, object.required.contains(name))
        })
        .collect()
}

/// `front_door` -> `Front Door`.
pub fn humanize(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look through a reference or an `anyOf: [T, null]` wrapper to the node
/// that actually shapes the field. Metadata on the wrapper wins over
/// metadata on the target.
pub fn concrete_view<'a>(
    document: &'a SchemaDocument,
    node: &'a SchemaNode,
) -> Cow<'a, SchemaNode> {
    match &node.kind {
        SchemaKind::Reference(_) => match document.dereference(node) {
            Some(target) => Cow::Owned(overlay(node, target, false)),
            None => Cow::Borrowed(node),
        },
        SchemaKind::Union(union) => {
            let mut non_null = union
                .alternatives
                .iter()
                .filter(|alt| !matches!(alt.kind, SchemaKind::Null));
            let has_null = union.alternatives.len() > 1;
            match (non_null.next(), non_null.next(), has_null) {
                (Some(only), None, true) => {
                    let target = document.dereference(only).unwrap_or(only);
                    Cow::Owned(overlay(node, target, true))
                }
                _ => Cow::Borrowed(node),
            }
        }
        _ => Cow::Borrowed(node),
    }
}

fn overlay(wrapper: &SchemaNode, target: &SchemaNode, nullable: bool) -> SchemaNode {
    let mut view = target.clone();
    view.nullable |= nullable || wrapper.nullable;
    if wrapper.enumeration.is_some() {
        view.enumeration = wrapper.enumeration.clone();
    }
    let SchemaMeta {
        title,
        description,
        default,
        examples,
    } = &wrapper.meta;
    if title.is_some() {
        view.meta.title = title.clone();
    }
    if description.is_some() {
        view.meta.description = description.clone();
    }
    if default.is_some() {
        view.meta.default = default.clone();
    }
    if !examples.is_empty() {
        view.meta.examples = examples.clone();
    }
    view
}

fn constraints(kind: &SchemaKind) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    let mut put = |keyword: &str, value: Option<Value>| {
        if let Some(value) = value {
            out.insert(keyword.to_string(), value);
        }
    };
    match kind {
        SchemaKind::String(c) => {
            put("minLength", c.min_length.map(Value::from));
            put("maxLength", c.max_length.map(Value::from));
            put(
                "pattern",
                c.pattern.as_ref().map(|p| Value::from(p.as_str())),
            );
        }
        SchemaKind::Number(c) | SchemaKind::Integer(c) => {
            put("minimum", c.minimum.clone().map(Value::Number));
            put("maximum", c.maximum.clone().map(Value::Number));
            put("exclusiveMinimum", c.exclusive_minimum.clone().map(Value::Number));
            put("exclusiveMaximum", c.exclusive_maximum.clone().map(Value::Number));
            put("multipleOf", c.multiple_of.clone().map(Value::Number));
        }
        SchemaKind::Array(a) => {
            put("minItems", a.min_items.map(Value::from));
            put("maxItems", a.max_items.map(Value::from));
        }
        _ => {}
    }
    out
}

/// String form of a literal: strings unquoted, everything else as JSON.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
