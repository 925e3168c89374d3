//! # cfgb-core — Configuration Value Primitives
//!
//! This crate is the leaf of the config binder workspace. It defines how an
//! untyped configuration tree is addressed and edited, independently of any
//! schema. Every other crate in the workspace depends on `cfgb-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`serde_json::Value` is the configuration value.** A configuration
//!    tree has no inherent shape; meaning only comes from pairing it with a
//!    schema in `cfgb-schema`. We do not wrap the value in a newtype so that
//!    callers can hand in whatever they parsed from JSON or YAML.
//!
//! 2. **Paths are typed.** [`ValuePath`] is an ordered list of
//!    [`PathSegment`]s (map keys or array indices). Validation errors and
//!    schema issues carry a `ValuePath`, never a pre-formatted string.
//!
//! 3. **Reads never fail, writes create on demand.** [`path::get`] returns
//!    `None` the moment a segment is missing. [`path::set`] builds every
//!    missing intermediate map and overwrites non-map values in its way.
//!
//! 4. **Merges replace everything that is not a map on both sides.**
//!    [`merge::merge`] recurses only where base and patch both hold a plain
//!    map. Arrays and scalars are replaced wholesale.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cfgb-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod merge;
pub mod path;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use merge::{merge, merge_value};
pub use value::{kind_name, ConfigMap, ConfigValue, PathSegment, ValuePath};
