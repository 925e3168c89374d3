//! # Default Derivation
//!
//! Computes the starting value a schema node implies, e.g. to seed a new
//! camera entry before the user edits it.
//!
//! An explicit `default` on the node always wins, including an explicit
//! `null`. Otherwise the value comes from the node's kind:
//!
//! | Kind                 | Derived default                                   |
//! |----------------------|---------------------------------------------------|
//! | `string`             | `""`                                              |
//! | `number` / `integer` | `0`                                               |
//! | `boolean`            | `false`                                           |
//! | `null`               | `null`                                            |
//! | `array`              | `[]`                                              |
//! | `object`             | map of every property whose default is defined    |
//! | `dictionary`         | `{}` (no keys are synthesized)                    |
//! | `union`              | default of the first alternative                  |
//! | `reference`          | default of the resolved node, none if dangling    |
//! | `any`                | none                                              |
//!
//! Recursion through references is cut when a reference is re-entered
//! while it is still being expanded, and by [`EngineOptions::max_depth`].

use serde_json::{Map, Value};

use crate::document::SchemaDocument;
use crate::model::{SchemaKind, SchemaNode};
use crate::options::EngineOptions;

/// Derives default values from the nodes of one schema document.
#[derive(Debug, Clone)]
pub struct DefaultDeriver<'d> {
    document: &'d SchemaDocument,
    options: EngineOptions,
}

impl<'d> DefaultDeriver<'d> {
    /// A deriver with default options.
    pub fn new(document: &'d SchemaDocument) -> Self {
        Self::with_options(document, EngineOptions::default())
    }

    /// A deriver with explicit options.
    pub fn with_options(document: &'d SchemaDocument, options: EngineOptions) -> Self {
        Self { document, options }
    }

    /// The document references are resolved against.
    pub fn document(&self) -> &'d SchemaDocument {
        self.document
    }

    /// Default of the document root.
    pub fn derive_root(&self) -> Option<Value> {
        self.derive(self.document.root())
    }

    /// Default implied by `node`, or `None` if it implies none.
    pub fn derive(&self, node: &SchemaNode) -> Option<Value> {
        let mut expanding = Vec::new();
        self.derive_inner(node, 0, &mut expanding)
    }

    fn derive_inner(
        &self,
        node: &SchemaNode,
        depth: usize,
        expanding: &mut Vec<String>,
    ) -> Option<Value> {
        if let Some(explicit) = &node.meta.default {
            return Some(explicit.clone());
        }
        if depth > self.options.max_depth {
            tracing::warn!(
                max_depth = self.options.max_depth,
                "default derivation hit the depth limit"
            );
            return None;
        }

        match &node.kind {
            SchemaKind::String(_) => Some(Value::String(String::new())),
            SchemaKind::Number(_) | SchemaKind::Integer(_) => Some(Value::from(0)),
            SchemaKind::Boolean => Some(Value::Bool(false)),
            SchemaKind::Null => Some(Value::Null),
            SchemaKind::Array(_) => Some(Value::Array(Vec::new())),
            SchemaKind::Object(object) => {
                let mut map = Map::new();
                for (name, property) in &object.properties {
                    if let Some(value) = self.derive_inner(property, depth + 1, expanding) {
                        map.insert(name.clone(), value);
                    }
                }
                Some(Value::Object(map))
            }
            SchemaKind::Dictionary(_) => Some(Value::Object(Map::new())),
            SchemaKind::Union(union) => union
                .alternatives
                .first()
                .and_then(|first| self.derive_inner(first, depth + 1, expanding)),
            SchemaKind::Reference(reference) => {
                if expanding.iter().any(|r| r == reference) {
                    tracing::debug!(reference = %reference, "cyclic reference, no default");
                    return None;
                }
                let target = self.document.resolve(reference)?;
                expanding.push(reference.clone());
                let derived = self.derive_inner(target, depth + 1, expanding);
                expanding.pop();
                derived
            }
            SchemaKind::Any => None,
        }
    }
}

/// Default of `node` within `document`, with default options.
pub fn derive_default(document: &SchemaDocument, node: &SchemaNode) -> Option<Value> {
    DefaultDeriver::new(document).derive(node)
}
