//! Map and string helpers for metadata trees.
//!
//! Absence is a normal outcome for optional branches of a tree, so accessors
//! here return `Option` rather than errors.

use crate::value::{Map, Value};

/// Return the nested mapping stored at `key`.
///
/// Returns `None` when `tree` is absent, the key is missing, or the value is
/// not a mapping (including `Value::Null`).
#[must_use]
pub fn get_map<'a, S>(tree: Option<&'a Map<S>>, key: &str) -> Option<&'a Map<S>> {
    tree?.get(key)?.as_object()
}

/// Mutable counterpart of [`get_map`].
pub fn get_map_mut<'a, S>(tree: &'a mut Map<S>, key: &str) -> Option<&'a mut Map<S>> {
    tree.get_mut(key)?.as_object_mut()
}

/// Snapshot of the top-level entries of `map` as a new, independently owned
/// mapping.
#[must_use]
pub fn copy_mapping<S: Clone>(map: &Map<S>) -> Map<S> {
    map.iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Shallow merge of two optional mappings. Entries of `overlay` win on key
/// collision. The result is always a mapping, empty when both inputs are
/// absent.
#[must_use]
pub fn merge_maps<S: Clone>(base: Option<&Map<S>>, overlay: Option<&Map<S>>) -> Map<S> {
    let mut merged = base.map(copy_mapping).unwrap_or_default();
    if let Some(overlay) = overlay {
        for (key, value) in overlay {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// The string held by `value`, or `""` for anything else.
#[must_use]
pub fn string_or_empty<S>(value: Option<&Value<S>>) -> &str {
    value.and_then(Value::as_str).unwrap_or_default()
}

/// Compress horizontal whitespace in template text while keeping line
/// structure.
///
/// Every Unicode whitespace character is removed wherever it occurs except
/// `\n`, `\r` and the ASCII space. ASCII spaces are then trimmed from both
/// ends of the string. Line breaks are never removed or merged.
#[must_use]
pub fn trim_unicode_spaces_except_newlines(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|&c| !c.is_whitespace() || matches!(c, '\n' | '\r' | ' '))
        .collect();
    kept.trim_matches(' ').to_string()
}
