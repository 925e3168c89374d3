//! # Schema Documents and Reference Resolution
//!
//! A [`SchemaDocument`] owns a raw schema value and its parsed nodes. At load
//! every schema position in the document (the root, `properties`,
//! `additionalProperties`, `items`, combinator alternatives, and every
//! `$defs` / `definitions` entry, at any depth) is parsed once and indexed
//! by its JSON-pointer location, together with any other location a `$ref`
//! points at. Lookups never re-parse.
//!
//! ## Reference Syntax
//!
//! References are slash-delimited paths into the same document, with an
//! optional leading `#` marker: `#/$defs/CameraConfig`, `#/definitions/zone`,
//! or `$defs/CameraConfig`. Segments use JSON-pointer escaping (`~1` is `/`,
//! `~0` is `~`), and a numeric segment indexes into an array. `#` alone is
//! the document root.
//!
//! A reference into another document (`other.json#/x`,
//! `https://host/schema.json`) never resolves: there is no remote fetch.
//!
//! ## Dangling References
//!
//! A reference that does not resolve is not a load error. It is reported
//! as "not found" at lookup time and callers decide how to treat it: the
//! validator records a schema issue and accepts the value, the default
//! deriver yields no default.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::error::SchemaError;
use crate::model::{pointer_child, AdditionalProperties, SchemaKind, SchemaNode};

/// Upper bound on reference-to-reference hops when dereferencing.
const MAX_REFERENCE_HOPS: usize = 32;

/// Upper bound on nested union alternatives explored by [`SchemaDocument::node_at`].
const MAX_UNION_NESTING: usize = 16;

/// Walk `root` along a reference path.
///
/// Returns `None` as soon as a segment does not exist on the current node,
/// or if the reference points into another document.
pub fn resolve_pointer<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    let path = local_path(reference)?;
    if path.is_empty() {
        return Some(root);
    }

    let mut current = root;
    for raw in path.split('/') {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        current = match current {
            Value::Object(map) => map.get(&segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Strip the `#` / `#/` marker from a same-document reference.
fn local_path(reference: &str) -> Option<&str> {
    let path = match reference.strip_prefix('#') {
        Some(rest) => rest,
        None if reference.contains('#') || reference.contains("://") => return None,
        None => reference,
    };
    Some(path.strip_prefix('/').unwrap_or(path))
}

/// Canonical `#/...` location a same-document reference points at.
fn location_of(reference: &str) -> Option<String> {
    let path = local_path(reference)?.trim_end_matches('/');
    Some(if path.is_empty() {
        "#".to_string()
    } else {
        format!("#/{path}")
    })
}

/// Push every schema position below `value` onto `out`, deepest first.
///
/// Only keywords the parser reads for that node are walked: a `$ref` node
/// or a combinator node contributes its `$defs` / `definitions` and, for a
/// combinator, its alternatives.
fn schema_positions<'a>(value: &'a Value, location: &str, out: &mut Vec<(String, &'a Value)>) {
    let Value::Object(obj) = value else {
        return;
    };

    for keyword in ["$defs", "definitions"] {
        if let Some(Value::Object(children)) = obj.get(keyword) {
            let base = pointer_child(location, keyword);
            for (name, child) in children {
                push_position(child, pointer_child(&base, name), out);
            }
        }
    }
    if obj.contains_key("$ref") {
        return;
    }

    let combinator = ["anyOf", "oneOf", "allOf"]
        .into_iter()
        .find(|keyword| obj.contains_key(*keyword));
    if let Some(keyword) = combinator {
        if let Some(Value::Array(items)) = obj.get(keyword) {
            let base = pointer_child(location, keyword);
            for (i, child) in items.iter().enumerate() {
                push_position(child, pointer_child(&base, &i.to_string()), out);
            }
        }
        return;
    }

    if let Some(Value::Object(children)) = obj.get("properties") {
        let base = pointer_child(location, "properties");
        for (name, child) in children {
            push_position(child, pointer_child(&base, name), out);
        }
    }
    for keyword in ["additionalProperties", "items"] {
        if let Some(child) = obj.get(keyword) {
            push_position(child, pointer_child(location, keyword), out);
        }
    }
}

fn push_position<'a>(value: &'a Value, location: String, out: &mut Vec<(String, &'a Value)>) {
    if value.is_object() || value == &Value::Bool(true) {
        schema_positions(value, &location, out);
        out.push((location, value));
    }
}

/// A parsed schema document.
///
/// Read-only after construction and `Send + Sync`, so one document can back
/// any number of concurrent validations.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    raw: Value,
    root: SchemaNode,
    /// Parsed nodes keyed by canonical `#/...` location.
    nodes: HashMap<String, SchemaNode>,
    resolved_references: usize,
}

impl SchemaDocument {
    /// Parse a schema document: the root, every schema position under it,
    /// and any other location its references reach.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the root, any `$defs` / `definitions`
    /// entry, or any node reachable through a reference is malformed.
    /// Dangling references are not errors.
    pub fn from_value(raw: Value) -> Result<Self, SchemaError> {
        let root = SchemaNode::parse(&raw)?;

        let mut positions = Vec::new();
        schema_positions(&raw, "#", &mut positions);
        let mut nodes = HashMap::with_capacity(positions.len() + 1);
        for (location, value) in positions {
            let node = SchemaNode::parse_at(value, &location)?;
            nodes.insert(location, node);
        }
        nodes.insert("#".to_string(), root.clone());

        let mut pending = Vec::new();
        for node in nodes.values() {
            node.collect_references(&mut pending);
        }

        let mut seen = HashSet::new();
        let mut resolved_references = 0;
        while let Some(reference) = pending.pop() {
            if !seen.insert(reference.clone()) {
                continue;
            }
            let Some(location) = location_of(&reference) else {
                tracing::debug!(reference = %reference, "schema reference points outside the document");
                continue;
            };
            if nodes.contains_key(&location) {
                resolved_references += 1;
                continue;
            }
            match resolve_pointer(&raw, &reference) {
                Some(target) => {
                    let node = SchemaNode::parse_at(target, &location)?;
                    node.collect_references(&mut pending);
                    nodes.insert(location, node);
                    resolved_references += 1;
                }
                None => {
                    tracing::debug!(reference = %reference, "schema reference does not resolve");
                }
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            references = resolved_references,
            dangling = seen.len() - resolved_references,
            "loaded schema document"
        );

        Ok(Self {
            raw,
            root,
            nodes,
            resolved_references,
        })
    }

    /// The parsed root node.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// The raw document the schema was parsed from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Number of distinct reference strings in the document that resolve.
    pub fn reference_count(&self) -> usize {
        self.resolved_references
    }

    /// Look up the node a reference string points at.
    ///
    /// Any same-document schema position resolves, whether or not the
    /// document itself refers to it. `#/$defs/X`, `#$defs/X` and `$defs/X`
    /// name the same node.
    pub fn resolve(&self, reference: &str) -> Option<&SchemaNode> {
        self.nodes.get(&location_of(reference)?)
    }

    /// Follow `node` through any chain of references to a concrete node.
    ///
    /// Returns `None` for a dangling reference or a reference cycle.
    pub fn dereference<'a>(&'a self, node: &'a SchemaNode) -> Option<&'a SchemaNode> {
        let mut current = node;
        for _ in 0..MAX_REFERENCE_HOPS {
            match &current.kind {
                SchemaKind::Reference(reference) => current = self.resolve(reference)?,
                _ => return Some(current),
            }
        }
        None
    }

    /// Find the schema node declared at a configuration path.
    ///
    /// Walks object properties, object or dictionary `additionalProperties`,
    /// and array `items` (for numeric segments), following references on
    /// the way. For a union, the first alternative that has a child for the
    /// segment is used.
    ///
    /// The final node is returned as declared: a `$ref` there stays a
    /// reference, so its own `default`, `title` and `enum` are kept.
    pub fn node_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&SchemaNode> {
        let mut current = &self.root;
        for segment in path {
            let parent = self.dereference(current)?;
            current = self.child_schema(parent, segment.as_ref(), 0)?;
        }
        Some(current)
    }

    /// Like [`node_at`](Self::node_at), but dereferenced to a concrete node.
    pub fn schema_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&SchemaNode> {
        self.node_at(path).and_then(|node| self.dereference(node))
    }

    fn child_schema<'a>(
        &'a self,
        node: &'a SchemaNode,
        segment: &str,
        nesting: usize,
    ) -> Option<&'a SchemaNode> {
        match &node.kind {
            SchemaKind::Object(object) => {
                object
                    .properties
                    .get(segment)
                    .or(match &object.additional {
                        AdditionalProperties::Schema(extra) => Some(extra.as_ref()),
                        AdditionalProperties::Allowed | AdditionalProperties::Forbidden => None,
                    })
            }
            SchemaKind::Dictionary(values) => Some(values.as_ref()),
            SchemaKind::Array(array) => segment.parse::<usize>().ok().map(|_| array.items.as_ref()),
            SchemaKind::Union(union) if nesting < MAX_UNION_NESTING => {
                union.alternatives.iter().find_map(|alternative| {
                    self.dereference(alternative)
                        .and_then(|alt| self.child_schema(alt, segment, nesting + 1))
                })
            }
            _ => None,
        }
    }
}
