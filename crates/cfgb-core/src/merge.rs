//! # Deep Merge
//!
//! Structural merge of a partial configuration patch onto a base tree.
//!
//! For every key in the patch: when the base value and the patch value are
//! both plain maps they are merged recursively; otherwise the patch value
//! replaces the base value wholesale. That includes arrays (never merged
//! element-wise) and `null` (a `null` in the patch overwrites, it does not
//! delete). Keys present only in the base are carried over unchanged.
//!
//! Both inputs are borrowed and left untouched; the result is a new tree.

use crate::value::{ConfigMap, ConfigValue};

/// Merge `patch` onto `base`, returning the merged map.
pub fn merge(base: &ConfigMap, patch: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    for (key, patch_value) in patch {
        let next = match (merged.get(key), patch_value) {
            (Some(ConfigValue::Object(base_child)), ConfigValue::Object(patch_child)) => {
                ConfigValue::Object(merge(base_child, patch_child))
            }
            _ => patch_value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

/// Merge two arbitrary values.
///
/// Two maps merge per [`merge`]; any other combination yields a copy of
/// `patch`.
pub fn merge_value(base: &ConfigValue, patch: &ConfigValue) -> ConfigValue {
    match (base, patch) {
        (ConfigValue::Object(b), ConfigValue::Object(p)) => ConfigValue::Object(merge(b, p)),
        _ => patch.clone(),
    }
}
