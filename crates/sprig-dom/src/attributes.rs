//! Attribute store
//!
//! Get/set/remove on an element's attribute map. Values are stored in
//! encoded form; scalar reads decode, scalar writes encode. Map-form
//! assignment merges caller values verbatim (callers pre-encode), an
//! asymmetry inherited from the library's public contract.

use std::collections::HashMap;

use crate::codec::{decode, encode};
use crate::traverse::Selection;
use crate::{DomTree, NodeId};

/// Attributes whose presence alone conveys meaning. Removing one keeps
/// the key and records the "off" state instead of deleting it.
const BOOLEAN_ATTRIBUTES: [&str; 15] = [
    "autofocus", "autoplay", "async", "checked", "controls", "defer", "disabled", "hidden",
    "loop", "multiple", "open", "readonly", "required", "scoped", "selected",
];

pub(crate) fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES
        .iter()
        .any(|b| name.eq_ignore_ascii_case(b))
}

/// Attribute value: either a string, or explicitly switched off.
///
/// `Off` is distinct from key absence; a boolean attribute that was
/// removed stays in the map as `Off` so removal is idempotent and the
/// "recognized but disabled" state survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Set(String),
    Off,
}

impl AttrValue {
    /// The stored string, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Set(s) => Some(s),
            Self::Off => None,
        }
    }
}

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: AttrValue,
}

/// Insertion-ordered attribute collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrMap {
    attrs: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Get an attribute value by name
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.by_name.get(name).map(|&i| &self.attrs[i].value)
    }

    /// Get the string value by name; `Off` and absent both yield `None`
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    /// Check key presence (`Off` counts as present)
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Insert or overwrite; overwriting keeps the original position
    pub fn insert(&mut self, name: &str, value: AttrValue) {
        if let Some(&index) = self.by_name.get(name) {
            self.attrs[index].value = value;
        } else {
            self.by_name.insert(name.to_string(), self.attrs.len());
            self.attrs.push(Attr {
                name: name.to_string(),
                value,
            });
        }
    }

    /// Insert a raw (already encoded) string value
    pub fn insert_str(&mut self, name: &str, raw: impl Into<String>) {
        self.insert(name, AttrValue::Set(raw.into()));
    }

    /// Remove by name, fixing up the index of later entries
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let index = self.by_name.remove(name)?;
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.attrs.remove(index).value)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter()
    }

    /// Copy with every `Set` value decoded; storage is left untouched
    pub fn decoded(&self) -> AttrMap {
        let mut out = self.clone();
        for attr in &mut out.attrs {
            if let AttrValue::Set(raw) = &mut attr.value {
                *raw = decode(raw);
            }
        }
        out
    }
}

/// Scalar assignment input for [`set_attr`], resolved once at the call
/// boundary instead of sniffing argument shapes per node.
pub enum AttrSet<'a> {
    /// Store the encoded value under the name
    Value(&'a str),
    /// Remove the attribute (boolean-aware)
    Remove,
    /// Compute the value per node from `(selection index, current raw value)`;
    /// `None` removes the attribute on that node
    With(&'a mut dyn FnMut(usize, Option<&str>) -> Option<String>),
}

/// Get the decoded attribute of the first selected node.
///
/// `None` for an empty selection, a non-element node, a missing key, or a
/// boolean attribute in the `Off` state.
pub fn attr(tree: &DomTree, sel: &Selection, name: &str) -> Option<String> {
    let elem = tree.element(sel.first()?)?;
    elem.attrs.get_str(name).map(decode)
}

/// Full attribute map of the first selected node, values decoded.
///
/// Returns a fresh copy; the stored map is never mutated by a read.
pub fn attr_map(tree: &DomTree, sel: &Selection) -> Option<AttrMap> {
    let elem = tree.element(sel.first()?)?;
    Some(elem.attrs.decoded())
}

/// Key-presence check on the first selected node; `Off` counts as present.
pub fn has_attr(tree: &DomTree, sel: &Selection, name: &str) -> bool {
    sel.first()
        .and_then(|id| tree.element(id))
        .is_some_and(|elem| elem.attrs.contains(name))
}

/// Assign an attribute on every selected element, skipping other nodes.
pub fn set_attr<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    name: &str,
    input: AttrSet<'_>,
) -> &'s Selection {
    match input {
        AttrSet::Value(value) => {
            let raw = encode(value);
            for id in sel.iter() {
                if let Some(elem) = tree.element_mut(id) {
                    elem.attrs.insert_str(name, raw.clone());
                }
            }
        }
        AttrSet::Remove => {
            return remove_attr(tree, sel, name);
        }
        AttrSet::With(f) => {
            for (i, id) in sel.iter().enumerate() {
                let Some(elem) = tree.element(id) else { continue };
                let current = elem.attrs.get_str(name).map(str::to_owned);
                match f(i, current.as_deref()) {
                    Some(value) => {
                        let raw = encode(&value);
                        if let Some(elem) = tree.element_mut(id) {
                            elem.attrs.insert_str(name, raw);
                        }
                    }
                    None => remove_one(tree, id, name),
                }
            }
        }
    }
    sel
}

/// Merge a pre-encoded name/value mapping into every selected element.
pub fn set_attr_map<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    entries: &[(String, String)],
) -> &'s Selection {
    for id in sel.iter() {
        if let Some(elem) = tree.element_mut(id) {
            for (name, raw) in entries {
                elem.attrs.insert_str(name, raw.clone());
            }
        }
    }
    sel
}

/// Remove an attribute from every selected element.
///
/// Boolean attributes are switched to `Off` instead of being deleted.
pub fn remove_attr<'s>(tree: &mut DomTree, sel: &'s Selection, name: &str) -> &'s Selection {
    for id in sel.iter() {
        remove_one(tree, id, name);
    }
    sel
}

fn remove_one(tree: &mut DomTree, id: NodeId, name: &str) {
    let Some(elem) = tree.element_mut(id) else { return };
    if !elem.attrs.contains(name) {
        return;
    }
    if is_boolean_attribute(name) {
        elem.attrs.insert(name, AttrValue::Off);
    } else {
        elem.attrs.remove(name);
    }
}
