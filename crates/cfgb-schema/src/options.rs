//! # Engine Options
//!
//! Knobs shared by the validator and the default deriver. Options are plain
//! serde data so an embedding application can keep them in its own
//! configuration file:
//!
//! ```yaml
//! max_depth: 32
//! union_mode: pass_through
//! ```

use serde::{Deserialize, Serialize};

/// Recursion bound used when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How `anyOf` / `oneOf` / `allOf` nodes are validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnionMode {
    /// Check alternatives: `anyOf`/`oneOf` need one to hold, `allOf` needs all.
    #[default]
    Strict,
    /// Accept any value at a union node without looking at its alternatives.
    PassThrough,
}

/// Options for [`crate::Validator`] and [`crate::DefaultDeriver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
    /// Maximum recursion depth through the schema/value graph. Reaching it
    /// stops descent at that point and records a schema issue.
    pub max_depth: usize,
    /// Union validation policy.
    pub union_mode: UnionMode,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            union_mode: UnionMode::default(),
        }
    }
}

impl EngineOptions {
    /// Replace the recursion bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the union policy.
    pub fn with_union_mode(mut self, union_mode: UnionMode) -> Self {
        self.union_mode = union_mode;
        self
    }
}
