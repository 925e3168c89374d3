//! # cfgb-schema — Schema Model, Validation & Data Binding
//!
//! Binds untyped configuration values (see `cfgb-core`) to a JSON-Schema-style
//! description of their shape. A schema is loaded once into a
//! [`SchemaDocument`] and then queried by any number of engines.
//!
//! ## Schema Model (`model`, `document`)
//!
//! [`SchemaNode::parse`] turns a raw schema value into a tagged
//! [`SchemaKind`] tree: scalars with their constraints, arrays, fixed-field
//! objects, dynamically-keyed dictionaries, unions, and `$ref` references.
//! [`SchemaDocument`] additionally indexes every schema position, including
//! definitions nobody references, and every reference target, so lookups
//! never re-parse and cyclic schemas load fine.
//!
//! ## Engines
//!
//! - [`Validator`] — recursive validation that collects every failure as a
//!   [`ValidationError`] carrying the exact [`cfgb_core::ValuePath`].
//! - [`DefaultDeriver`] — the starting value a node implies.
//! - [`metadata`] — render-ready [`FieldMetadata`] for form builders.
//! - [`entry`] — seeding new entries in dictionaries like `cameras`.
//!
//! Engines share [`EngineOptions`] (recursion bound and union policy).
//!
//! ## Crate Policy
//!
//! - Depends only on `cfgb-core` internally.
//! - Loading a malformed schema is a [`SchemaError`]. Validating a bad
//!   value is not an error: failures are data in a [`ValidationReport`].
//! - Dangling references and runaway recursion never panic. They are
//!   recorded as [`SchemaIssue`]s.

pub mod defaults;
pub mod document;
pub mod entry;
pub mod error;
pub mod metadata;
pub mod model;
pub mod options;
pub mod validate;

pub use defaults::{derive_default, DefaultDeriver};
pub use document::{resolve_pointer, SchemaDocument};
pub use entry::{insert_entry, seed_entry};
pub use error::SchemaError;
pub use metadata::{concrete_view, FieldMetadata, FieldOption};
pub use model::{
    AdditionalProperties, ArraySchema, Combinator, NumericConstraints, ObjectSchema, SchemaKind,
    SchemaMeta, SchemaNode, StringConstraints, UnionSchema,
};
pub use options::{EngineOptions, UnionMode, DEFAULT_MAX_DEPTH};
pub use validate::{
    validate, ErrorCode, SchemaIssue, ValidationError, ValidationReport, Validator,
};
