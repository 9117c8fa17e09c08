//! Form value accessor
//!
//! One-shot dispatch on the tag name of the first selected node. Each
//! control kind stores its "current value" differently: textareas in
//! text content, inputs and options in the `value` attribute, radios in
//! the `checked` state of their group, selects in the `selected` state
//! of their options.

use crate::attributes::{AttrSet, attr, has_attr, remove_attr, set_attr};
use crate::traverse::{Selection, closest, find, wrap};
use crate::{DomTree, NodeId};

/// Value read from a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Single(String),
    Multiple(Vec<String>),
}

/// Value written to a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValInput {
    Single(String),
    Many(Vec<String>),
}

impl ValInput {
    fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

/// Concatenated text content of every selected node, in selection order.
pub fn text(tree: &DomTree, sel: &Selection) -> String {
    let mut out = String::new();
    for id in sel.iter() {
        out.push_str(&tree.text_content(id));
    }
    out
}

/// Replace the text content of every selected node.
pub fn set_text<'s>(tree: &mut DomTree, sel: &'s Selection, content: &str) -> &'s Selection {
    for id in sel.iter() {
        tree.set_text_content(id, content);
    }
    sel
}

/// Get the current value of the first selected control.
///
/// Non-control tags and empty selections yield `None`.
pub fn val(tree: &DomTree, sel: &Selection) -> Option<Value> {
    let first = sel.first()?;
    let elem = tree.element(first)?;

    if elem.is_named("textarea") {
        return Some(Value::Single(tree.text_content(first)));
    }
    if elem.is_named("input") {
        if input_type_is(tree, first, "radio") {
            return radio_group_value(tree, first).map(Value::Single);
        }
        return attr(tree, &wrap(first), "value").map(Value::Single);
    }
    if elem.is_named("select") {
        let selected = find(tree, &wrap(first), &selected_option);
        if has_attr(tree, &wrap(first), "multiple") {
            let values = selected
                .iter()
                .filter_map(|id| attr(tree, &wrap(id), "value"))
                .collect();
            return Some(Value::Multiple(values));
        }
        return selected
            .first()
            .and_then(|id| attr(tree, &wrap(id), "value"))
            .map(Value::Single);
    }
    if elem.is_named("option") {
        return attr(tree, &wrap(first), "value").map(Value::Single);
    }
    None
}

/// Set the current value of the selected controls.
///
/// Dispatch is keyed on the first node's tag; a single-select given a
/// composite value is left unchanged rather than failing.
pub fn set_val<'s>(tree: &mut DomTree, sel: &'s Selection, input: &ValInput) -> &'s Selection {
    let Some(first) = sel.first() else { return sel };
    let Some(elem) = tree.element(first) else { return sel };

    if elem.is_named("textarea") {
        if let Some(content) = input.as_single() {
            let content = content.to_owned();
            set_text(tree, sel, &content);
        }
        return sel;
    }
    if elem.is_named("input") {
        if input_type_is(tree, first, "radio") {
            if let Some(value) = input.as_single() {
                let value = value.to_owned();
                set_radio_group(tree, first, &value);
            }
            return sel;
        }
        if let Some(value) = input.as_single() {
            set_attr(tree, sel, "value", AttrSet::Value(value));
        }
        return sel;
    }
    if elem.is_named("select") {
        if !has_attr(tree, &wrap(first), "multiple") && matches!(input, ValInput::Many(_)) {
            return sel;
        }
        let values: Vec<String> = input.values().iter().map(|v| v.to_string()).collect();
        for id in sel.iter() {
            if tree.element(id).is_some_and(|e| e.is_named("select")) {
                select_values(tree, id, &values);
            }
        }
        return sel;
    }
    if elem.is_named("option") {
        if let Some(value) = input.as_single() {
            set_attr(tree, sel, "value", AttrSet::Value(value));
        }
        return sel;
    }
    sel
}

/// The scope a radio group is resolved in: the nearest enclosing form,
/// or the document root when the input sits outside any form.
fn radio_scope(tree: &DomTree, radio: NodeId) -> NodeId {
    closest(tree, &wrap(radio), &|tree, id| {
        tree.element(id).is_some_and(|e| e.is_named("form"))
    })
    .first()
    .unwrap_or(tree.root())
}

fn radio_group_value(tree: &DomTree, radio: NodeId) -> Option<String> {
    let name = attr(tree, &wrap(radio), "name")?;
    let scope = radio_scope(tree, radio);
    let checked = find(tree, &wrap(scope), &|tree, id| {
        in_radio_group(tree, id, &name) && is_checked(tree, id)
    });
    checked.first().and_then(|id| attr(tree, &wrap(id), "value"))
}

fn set_radio_group(tree: &mut DomTree, radio: NodeId, value: &str) {
    let Some(name) = attr(tree, &wrap(radio), "name") else { return };
    let scope = radio_scope(tree, radio);
    tracing::debug!(group = %name, %value, "rechecking radio group");

    let group = find(tree, &wrap(scope), &|tree, id| {
        in_radio_group(tree, id, &name)
    });
    for id in group.iter() {
        if is_checked(tree, id) {
            remove_attr(tree, &wrap(id), "checked");
        }
    }
    for id in group.iter() {
        if attr(tree, &wrap(id), "value").as_deref() == Some(value) {
            set_attr(tree, &wrap(id), "checked", AttrSet::Value(""));
        }
    }
}

/// Clear every option's selection, then select the options whose `value`
/// attribute matches any of the given values.
fn select_values(tree: &mut DomTree, select: NodeId, values: &[String]) {
    let options = find(tree, &wrap(select), &|tree, id| {
        tree.element(id).is_some_and(|e| e.is_named("option"))
    });
    for id in options.iter() {
        remove_attr(tree, &wrap(id), "selected");
    }
    for id in options.iter() {
        let matched = attr(tree, &wrap(id), "value")
            .is_some_and(|v| values.iter().any(|want| *want == v));
        if matched {
            set_attr(tree, &wrap(id), "selected", AttrSet::Value(""));
        }
    }
}

fn input_type_is(tree: &DomTree, id: NodeId, kind: &str) -> bool {
    attr(tree, &wrap(id), "type").as_deref() == Some(kind)
}

fn in_radio_group(tree: &DomTree, id: NodeId, name: &str) -> bool {
    tree.element(id).is_some_and(|e| e.is_named("input"))
        && input_type_is(tree, id, "radio")
        && attr(tree, &wrap(id), "name").as_deref() == Some(name)
}

fn is_checked(tree: &DomTree, id: NodeId) -> bool {
    tree.element(id)
        .is_some_and(|e| e.attrs.get_str("checked").is_some())
}

fn selected_option(tree: &DomTree, id: NodeId) -> bool {
    tree.element(id)
        .is_some_and(|e| e.is_named("option") && e.attrs.get_str("selected").is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textarea_value_is_text_content() {
        let mut tree = DomTree::new();
        let ta = tree.create_element("textarea");
        tree.append_child(tree.root(), ta);
        let note = tree.create_text("draft");
        tree.append_child(ta, note);
        let sel = wrap(ta);

        assert_eq!(val(&tree, &sel), Some(Value::Single("draft".into())));
        set_val(&mut tree, &sel, &ValInput::Single("final".into()));
        assert_eq!(val(&tree, &sel), Some(Value::Single("final".into())));
    }

    #[test]
    fn test_text_input_uses_value_attribute() {
        let mut tree = DomTree::new();
        let input = tree.create_element("input");
        tree.append_child(tree.root(), input);
        let sel = wrap(input);

        assert_eq!(val(&tree, &sel), None);
        set_val(&mut tree, &sel, &ValInput::Single("abc".into()));
        assert_eq!(val(&tree, &sel), Some(Value::Single("abc".into())));
        assert_eq!(attr(&tree, &sel, "value").as_deref(), Some("abc"));
    }

    #[test]
    fn test_non_control_tag_has_no_value() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div);
        assert_eq!(val(&tree, &wrap(div)), None);
        assert_eq!(val(&tree, &Selection::new()), None);
    }

    #[test]
    fn test_radio_group_without_form_falls_back_to_root() {
        let mut tree = DomTree::new();
        let mut radios = Vec::new();
        for v in ["a", "b"] {
            let r = tree.create_element("input");
            tree.append_child(tree.root(), r);
            let sel = wrap(r);
            set_attr(&mut tree, &sel, "type", AttrSet::Value("radio"));
            set_attr(&mut tree, &sel, "name", AttrSet::Value("r"));
            set_attr(&mut tree, &sel, "value", AttrSet::Value(v));
            radios.push(r);
        }

        set_val(&mut tree, &wrap(radios[0]), &ValInput::Single("b".into()));
        assert_eq!(
            val(&tree, &wrap(radios[0])),
            Some(Value::Single("b".into()))
        );
        assert!(is_checked(&tree, radios[1]));
        assert!(!is_checked(&tree, radios[0]));
    }

    #[test]
    fn test_text_spans_selection_in_order() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let q = tree.create_element("p");
        tree.append_child(tree.root(), p);
        tree.append_child(tree.root(), q);
        tree.set_text_content(p, "one ");
        tree.set_text_content(q, "two");

        let sel = Selection::from_ids(vec![p, q]);
        assert_eq!(text(&tree, &sel), "one two");
        assert_eq!(text(&tree, &Selection::new()), "");

        set_text(&mut tree, &sel, "both");
        assert_eq!(text(&tree, &sel), "bothboth");
    }

    #[test]
    fn test_option_value_attribute() {
        let mut tree = DomTree::new();
        let opt = tree.create_element("option");
        tree.append_child(tree.root(), opt);
        set_val(&mut tree, &wrap(opt), &ValInput::Single("x".into()));
        assert_eq!(val(&tree, &wrap(opt)), Some(Value::Single("x".into())));
    }
}
