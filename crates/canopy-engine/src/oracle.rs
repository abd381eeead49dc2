//! Reference computation of expected selection state.
//!
//! Pure functions over the tree model: no driver, no waits. The
//! oracle's prediction is the ground truth every scenario's observed
//! state is diffed against.

use canopy_types::{NodeId, SelectionState, Tree, TreeResult};

/// Expected selection state after selecting `target_labels`.
///
/// Rules, applied to fixed point:
/// 1. Every target is checked.
/// 2. Cascade-down: a non-leaf target checks its whole subtree.
/// 3. Cascade-up: a node is checked once all of its children are
///    checked, recomputed bottom-up.
///
/// Selecting a proper subset of a parent's children checks only those
/// children and leaves every ancestor unchecked; that partial state is
/// rule 3's natural consequence and is deliberately not special-cased.
pub fn expected_state(tree: &Tree, target_labels: &[String]) -> TreeResult<SelectionState> {
    let mut state = SelectionState::new();

    for label in target_labels {
        let id = tree.id_by_label(label)?.clone();
        mark_subtree(tree, &id, &mut state)?;
    }

    // Reverse preorder visits every child before its parent.
    for id in tree.preorder().iter().rev() {
        if state.checked(id) {
            continue;
        }
        let children = tree.children(id)?;
        if !children.is_empty() && children.iter().all(|child| state.checked(child)) {
            state.set(id.clone(), true);
        }
    }

    Ok(state)
}

/// Expected status message for `state`: the labels of checked nodes in
/// canonical traversal order (parent before children, children in
/// declaration order), space-joined. All-unchecked yields `""`.
pub fn expected_message(tree: &Tree, state: &SelectionState) -> String {
    let mut labels: Vec<&str> = Vec::new();
    for id in tree.preorder() {
        if state.checked(&id) {
            if let Ok(node) = tree.node(&id) {
                labels.push(node.label.as_str());
            }
        }
    }
    labels.join(" ")
}

fn mark_subtree(tree: &Tree, id: &NodeId, state: &mut SelectionState) -> TreeResult<()> {
    let mut stack = vec![id.clone()];
    while let Some(current) = stack.pop() {
        stack.extend(tree.children(&current)?.iter().cloned());
        state.set(current, true);
    }
    Ok(())
}
