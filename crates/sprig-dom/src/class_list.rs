//! Class list operations
//!
//! The `class` attribute is treated as a whitespace-delimited,
//! order-preserving token list. All state lives in the attribute store;
//! nothing here keeps a parallel token cache.

use crate::attributes::AttrValue;
use crate::codec::{decode, encode};
use crate::traverse::{NodePredicate, Selection, filter};
use crate::{DomTree, NodeId};

fn split_class(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_owned).collect()
}

fn current_class(tree: &DomTree, id: NodeId) -> Option<String> {
    tree.element(id)
        .and_then(|e| e.attrs.get_str("class"))
        .map(decode)
}

fn store_class(tree: &mut DomTree, id: NodeId, value: &str) {
    if let Some(elem) = tree.element_mut(id) {
        elem.attrs
            .insert("class", AttrValue::Set(encode(value)));
    }
}

/// True if ANY selected node carries `token` among its class tokens.
pub fn has_class(tree: &DomTree, sel: &Selection, token: &str) -> bool {
    sel.iter().any(|id| {
        current_class(tree, id)
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == token))
    })
}

/// Add the whitespace-separated `tokens` to every selected element.
///
/// Existing order is preserved and duplicates are never inserted; new
/// tokens append in first-seen order.
pub fn add_class<'s>(tree: &mut DomTree, sel: &'s Selection, tokens: &str) -> &'s Selection {
    for id in sel.iter() {
        add_class_one(tree, id, tokens);
    }
    sel
}

/// Per-node form of [`add_class`]: `f(index, current_class)` returns the
/// tokens to add for that node.
pub fn add_class_with<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    mut f: impl FnMut(usize, &str) -> String,
) -> &'s Selection {
    for (i, id) in sel.iter().enumerate() {
        let current = current_class(tree, id).unwrap_or_default();
        let tokens = f(i, &current);
        add_class_one(tree, id, &tokens);
    }
    sel
}

fn add_class_one(tree: &mut DomTree, id: NodeId, tokens: &str) {
    if tree.element(id).is_none() {
        return;
    }
    let additions = split_class(tokens);
    if additions.is_empty() {
        return;
    }

    match current_class(tree, id) {
        None => store_class(tree, id, &additions.join(" ")),
        Some(current) => {
            let mut classes = split_class(&current);
            for token in additions {
                if !classes.contains(&token) {
                    classes.push(token);
                }
            }
            store_class(tree, id, &classes.join(" "));
        }
    }
}

/// Remove classes from every selected element.
///
/// `None` removes ALL classes (the attribute is set to the empty string);
/// `Some(tokens)` removes the given tokens, keeping survivor order.
pub fn remove_class<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    tokens: Option<&str>,
) -> &'s Selection {
    let removals = tokens.map(split_class);
    for id in sel.iter() {
        remove_class_one(tree, id, removals.as_deref());
    }
    sel
}

/// Per-node form of [`remove_class`]: `f(index, current_class)` returns
/// the tokens to remove for that node.
pub fn remove_class_with<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    mut f: impl FnMut(usize, &str) -> String,
) -> &'s Selection {
    for (i, id) in sel.iter().enumerate() {
        let current = current_class(tree, id).unwrap_or_default();
        let tokens = split_class(&f(i, &current));
        remove_class_one(tree, id, Some(&tokens));
    }
    sel
}

fn remove_class_one(tree: &mut DomTree, id: NodeId, removals: Option<&[String]>) {
    if tree.element(id).is_none() {
        return;
    }
    match removals {
        None => store_class(tree, id, ""),
        Some(removals) => {
            let current = current_class(tree, id).unwrap_or_default();
            let survivors: Vec<String> = split_class(&current)
                .into_iter()
                .filter(|c| !removals.contains(c))
                .collect();
            store_class(tree, id, &survivors.join(" "));
        }
    }
}

/// Toggle classes on every selected element.
///
/// With `force` set, presence (`true`) or absence (`false`) of each token
/// is enforced; otherwise each token flips. Tokens are processed in the
/// given order and later tokens see the already-mutated list.
pub fn toggle_class<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    tokens: &str,
    force: Option<bool>,
) -> &'s Selection {
    for id in sel.iter() {
        toggle_class_one(tree, id, tokens, force);
    }
    sel
}

/// Per-node form of [`toggle_class`]; `force` is passed through to the
/// callback and then applied to its returned tokens.
pub fn toggle_class_with<'s>(
    tree: &mut DomTree,
    sel: &'s Selection,
    mut f: impl FnMut(usize, &str, Option<bool>) -> String,
    force: Option<bool>,
) -> &'s Selection {
    for (i, id) in sel.iter().enumerate() {
        let current = current_class(tree, id).unwrap_or_default();
        let tokens = f(i, &current, force);
        toggle_class_one(tree, id, &tokens, force);
    }
    sel
}

fn toggle_class_one(tree: &mut DomTree, id: NodeId, tokens: &str, force: Option<bool>) {
    if tree.element(id).is_none() {
        return;
    }
    let toggles = split_class(tokens);
    if toggles.is_empty() {
        return;
    }
    let current = current_class(tree, id).unwrap_or_default();
    let mut classes = split_class(&current);

    for token in toggles {
        let index = classes.iter().position(|c| *c == token);
        let add = force.unwrap_or(index.is_none());
        match (add, index) {
            (true, None) => classes.push(token),
            (false, Some(i)) => {
                classes.remove(i);
            }
            _ => {}
        }
    }

    store_class(tree, id, &classes.join(" "));
}

/// True iff filtering the selection by `pred` leaves anything; an absent
/// predicate never matches.
pub fn is(tree: &DomTree, sel: &Selection, pred: Option<&NodePredicate>) -> bool {
    match pred {
        Some(pred) => !filter(tree, sel, pred).is_empty(),
        None => false,
    }
}
