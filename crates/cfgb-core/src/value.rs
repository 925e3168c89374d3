//! # Configuration Values and Value Paths
//!
//! A configuration value is a plain `serde_json::Value`: strings, numbers,
//! booleans, null, ordered lists, and string-keyed maps. This module adds the
//! typed path used to point at a location inside such a tree.
//!
//! ## Rendering
//!
//! Paths render in the dotted/bracketed form users see in error listings:
//!
//! - `[]` renders as `(root)`
//! - `["cameras", "front_door", "zones", 0]` renders as
//!   `cameras.front_door.zones[0]`
//!
//! On the wire (serde), a path is a JSON array of strings and integers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An untyped configuration value.
pub type ConfigValue = serde_json::Value;

/// A string-keyed configuration map.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// One step of a [`ValuePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A map key.
    Key(String),
    /// A zero-based array index.
    Index(usize),
}

impl PathSegment {
    /// Returns the key if this segment addresses a map entry.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Index(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, "{k}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Ordered location inside a configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuePath(Vec<PathSegment>);

impl ValuePath {
    /// The empty path, addressing the root of the tree.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Split a dot-separated path into key segments.
    ///
    /// Empty input yields the root path. Empty components (`a..b`) are
    /// dropped rather than turned into empty-string keys.
    pub fn parse_dotted(dotted: &str) -> Self {
        Self(
            dotted
                .split('.')
                .filter(|part| !part.is_empty())
                .map(PathSegment::from)
                .collect(),
        )
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// The key segments of this path, or `None` if any segment is an index.
    ///
    /// Path-based reads and writes only walk maps, so this is the form
    /// [`crate::path::get`] and [`crate::path::set`] accept.
    pub fn keys(&self) -> Option<Vec<&str>> {
        self.0.iter().map(PathSegment::as_key).collect()
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if i == 0 => write!(f, "{k}")?,
                PathSegment::Key(k) => write!(f, ".{k}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for ValuePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<PathSegment>> for ValuePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

/// Name of a value's runtime shape, as used in error messages.
pub fn kind_name(value: &ConfigValue) -> &'static str {
    match value {
        ConfigValue::Null => "null",
        ConfigValue::Bool(_) => "boolean",
        ConfigValue::Number(_) => "number",
        ConfigValue::String(_) => "string",
        ConfigValue::Array(_) => "array",
        ConfigValue::Object(_) => "object",
    }
}
