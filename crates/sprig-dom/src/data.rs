//! Auxiliary data store
//!
//! The data map mirrors `data-*` attribute state: raw encoded strings on
//! write, with type coercion applied only on scalar read. Coercion order
//! is fixed: literal keyword, numeric round-trip, JSON shape, plain
//! string.

use std::collections::HashMap;

use thiserror::Error;

use crate::DomTree;
use crate::codec::{decode, encode};
use crate::traverse::Selection;

/// Coercion failure.
///
/// Only the JSON branch can fail: a value shaped like `{…}` or `[…]` that
/// does not parse is a caller/data error and propagates, per the
/// shape-match-then-parse contract.
#[derive(Debug, Error)]
pub enum CoerceError {
    #[error("malformed JSON in data value: {0}")]
    Json(#[from] serde_json::Error),
}

/// A data value after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Null,
    Bool(bool),
    Num(f64),
    Json(serde_json::Value),
    Str(String),
}

/// Insertion-ordered data collection, raw string values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataMap {
    entries: Vec<(String, String)>,
    by_key: HashMap<String, usize>,
}

impl DataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw (encoded) value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Insert or overwrite; overwriting keeps the original position
    pub fn insert(&mut self, key: &str, raw: impl Into<String>) {
        if let Some(&index) = self.by_key.get(key) {
            self.entries[index].1 = raw.into();
        } else {
            self.by_key.insert(key.to_string(), self.entries.len());
            self.entries.push((key.to_string(), raw.into()));
        }
    }

    /// Remove by key, fixing up the index of later entries
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.by_key.remove(key)?;
        for idx in self.by_key.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.entries.remove(index).1)
    }

    /// Iterate `(key, raw value)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy with every value decoded; storage is left untouched
    pub fn decoded(&self) -> DataMap {
        let mut out = self.clone();
        for (_, raw) in &mut out.entries {
            *raw = decode(raw);
        }
        out
    }
}

/// Coerce a decoded string per the fixed precedence ladder.
///
/// The numeric branch accepts only finite numbers, so `"NaN"` and
/// `"Infinity"` stay strings even though both survive a textual
/// parse-then-format round trip.
fn coerce(value: String) -> Result<DataValue, CoerceError> {
    match value.as_str() {
        "null" => return Ok(DataValue::Null),
        "true" => return Ok(DataValue::Bool(true)),
        "false" => return Ok(DataValue::Bool(false)),
        _ => {}
    }

    if let Ok(n) = value.parse::<f64>() {
        // Coerce only when the text is the canonical rendering of the
        // number, so "007" or "1e3" stay strings.
        if n.is_finite() && n.to_string() == value {
            return Ok(DataValue::Num(n));
        }
    }

    if looks_like_json(&value) {
        return Ok(DataValue::Json(serde_json::from_str(&value)?));
    }

    Ok(DataValue::Str(value))
}

/// JSON object/array shape heuristic: braces or brackets enclosing
/// arbitrary content.
fn looks_like_json(value: &str) -> bool {
    (value.starts_with('{') && value.ends_with('}'))
        || (value.starts_with('[') && value.ends_with(']'))
}

/// Get the coerced data value under `name` for the first selected node.
pub fn data(tree: &DomTree, sel: &Selection, name: &str) -> Result<Option<DataValue>, CoerceError> {
    let Some(elem) = sel.first().and_then(|id| tree.element(id)) else {
        return Ok(None);
    };
    match elem.data.get(name) {
        Some(raw) => coerce(decode(raw)).map(Some),
        None => Ok(None),
    }
}

/// Full data map of the first selected node, values decoded.
///
/// Returns a fresh copy; the stored map is never mutated by a read.
pub fn data_map(tree: &DomTree, sel: &Selection) -> Option<DataMap> {
    let elem = tree.element(sel.first()?)?;
    Some(elem.data.decoded())
}

/// Store `encode(value)` under `name` on every selected element.
pub fn set_data<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    name: &str,
    value: &str,
) -> &'s Selection {
    let raw = encode(value);
    for id in sel.iter() {
        if let Some(elem) = tree.element_mut(id) {
            elem.data.insert(name, raw.clone());
        }
    }
    sel
}

/// Merge a pre-encoded key/value mapping into every selected element.
pub fn set_data_map<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    entries: &[(String, String)],
) -> &'s Selection {
    for id in sel.iter() {
        if let Some(elem) = tree.element_mut(id) {
            for (key, raw) in entries {
                elem.data.insert(key, raw.clone());
            }
        }
    }
    sel
}

/// Delete `name` from every selected element's data map.
pub fn remove_data<'s>(tree: &mut DomTree, sel: &'s Selection, name: &str) -> &'s Selection {
    for id in sel.iter() {
        if let Some(elem) = tree.element_mut(id) {
            elem.data.remove(name);
        }
    }
    sel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::wrap;

    fn one_element() -> (DomTree, Selection) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div);
        (tree, wrap(div))
    }

    fn get(tree: &DomTree, sel: &Selection, name: &str) -> DataValue {
        data(tree, sel, name).unwrap().unwrap()
    }

    #[test]
    fn test_keyword_coercion() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "a", "null");
        set_data(&mut tree, &sel, "b", "true");
        set_data(&mut tree, &sel, "c", "false");

        assert_eq!(get(&tree, &sel, "a"), DataValue::Null);
        assert_eq!(get(&tree, &sel, "b"), DataValue::Bool(true));
        assert_eq!(get(&tree, &sel, "c"), DataValue::Bool(false));
    }

    #[test]
    fn test_number_coercion() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "n", "42");
        set_data(&mut tree, &sel, "f", "-3.5");
        set_data(&mut tree, &sel, "padded", "007");

        assert_eq!(get(&tree, &sel, "n"), DataValue::Num(42.0));
        assert_eq!(get(&tree, &sel, "f"), DataValue::Num(-3.5));
        assert_eq!(get(&tree, &sel, "padded"), DataValue::Str("007".into()));
    }

    #[test]
    fn test_non_finite_stays_string() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "nan", "NaN");
        set_data(&mut tree, &sel, "inf", "inf");

        assert_eq!(get(&tree, &sel, "nan"), DataValue::Str("NaN".into()));
        assert_eq!(get(&tree, &sel, "inf"), DataValue::Str("inf".into()));
    }

    #[test]
    fn test_json_coercion() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "obj", r#"{"a":1}"#);
        set_data(&mut tree, &sel, "arr", "[1,2]");

        assert_eq!(
            get(&tree, &sel, "obj"),
            DataValue::Json(serde_json::json!({"a": 1}))
        );
        assert_eq!(
            get(&tree, &sel, "arr"),
            DataValue::Json(serde_json::json!([1, 2]))
        );
    }

    #[test]
    fn test_malformed_json_propagates() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "bad", "{not json}");
        assert!(data(&tree, &sel, "bad").is_err());
    }

    #[test]
    fn test_plain_string_unchanged() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "s", "hello");
        assert_eq!(get(&tree, &sel, "s"), DataValue::Str("hello".into()));
    }

    #[test]
    fn test_missing_key_and_node() {
        let (tree, sel) = one_element();
        assert_eq!(data(&tree, &sel, "nope").unwrap(), None);
        assert_eq!(data(&tree, &Selection::new(), "x").unwrap(), None);
    }

    #[test]
    fn test_remove_data() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "k", "v");
        remove_data(&mut tree, &sel, "k");
        assert_eq!(data(&tree, &sel, "k").unwrap(), None);
    }

    #[test]
    fn test_set_data_map_merge_is_verbatim() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "kept", "old");
        // Pre-encoded value must not be encoded a second time.
        set_data_map(
            &mut tree,
            &sel,
            &[
                ("t".to_string(), "a &amp; b".to_string()),
                ("kept".to_string(), "new".to_string()),
            ],
        );

        assert_eq!(get(&tree, &sel, "t"), DataValue::Str("a & b".into()));
        assert_eq!(get(&tree, &sel, "kept"), DataValue::Str("new".into()));
        let stored = tree.element(sel.first().unwrap()).unwrap();
        assert_eq!(stored.data.get("t"), Some("a &amp; b"));
    }

    #[test]
    fn test_data_map_decoded_copy() {
        let (mut tree, sel) = one_element();
        set_data(&mut tree, &sel, "t", "a & b");

        let map = data_map(&tree, &sel).unwrap();
        assert_eq!(map.get("t"), Some("a & b"));
        // Stored form stays encoded.
        let stored = tree.element(sel.first().unwrap()).unwrap();
        assert_eq!(stored.data.get("t"), Some("a &amp; b"));
    }
}
