//! # Path Access
//!
//! Read and write a value at an arbitrary key path inside a nested
//! configuration tree. Paths are slices of map keys; arrays are never
//! walked by these operations.
//!
//! ## Policy
//!
//! - [`get`] is total: a missing key or a non-map value along the way
//!   yields `None`.
//! - [`set`] creates on write: every missing intermediate segment becomes an
//!   empty map, and a non-map value found in the way is overwritten by one.
//!   An empty path is a no-op; the root can not be replaced through `set`.
//! - Both operate on the caller's tree in place. Nothing is cloned.

use crate::value::{ConfigMap, ConfigValue};

/// Read the value at `path`.
///
/// Returns `Some(root)` for the empty path.
pub fn get<'a, S: AsRef<str>>(root: &'a ConfigValue, path: &[S]) -> Option<&'a ConfigValue> {
    let mut current = root;
    for segment in path {
        current = current.as_object()?.get(segment.as_ref())?;
    }
    Some(current)
}

/// Mutable counterpart of [`get`]. Never creates anything.
pub fn get_mut<'a, S: AsRef<str>>(
    root: &'a mut ConfigValue,
    path: &[S],
) -> Option<&'a mut ConfigValue> {
    let mut current = root;
    for segment in path {
        current = current.as_object_mut()?.get_mut(segment.as_ref())?;
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate maps as needed.
///
/// If `root` itself is not a map it is replaced by an empty map first,
/// the same way a non-map value is replaced further down the path.
pub fn set<S: AsRef<str>>(root: &mut ConfigValue, path: &[S], value: ConfigValue) {
    if path.is_empty() {
        return;
    }
    if !root.is_object() {
        *root = ConfigValue::Object(ConfigMap::new());
    }
    if let ConfigValue::Object(map) = root {
        set_in_map(map, path, value);
    }
}

fn set_in_map<S: AsRef<str>>(map: &mut ConfigMap, path: &[S], value: ConfigValue) {
    match path {
        [] => {}
        [last] => {
            map.insert(last.as_ref().to_string(), value);
        }
        [head, rest @ ..] => {
            let child = map
                .entry(head.as_ref().to_string())
                .or_insert_with(|| ConfigValue::Object(ConfigMap::new()));
            if !child.is_object() {
                *child = ConfigValue::Object(ConfigMap::new());
            }
            if let ConfigValue::Object(child_map) = child {
                set_in_map(child_map, rest, value);
            }
        }
    }
}

/// Remove and return the value at `path`.
///
/// Missing paths, non-map parents, and the empty path all return `None`
/// and leave the tree untouched.
pub fn remove<S: AsRef<str>>(root: &mut ConfigValue, path: &[S]) -> Option<ConfigValue> {
    let (last, parents) = path.split_last()?;
    get_mut(root, parents)?
        .as_object_mut()?
        .remove(last.as_ref())
}
