//! Per-node checked/unchecked state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tree::NodeId;

/// Mapping from node id to checked state.
///
/// The cascade invariant (all children checked implies parent checked;
/// parent checked implies all descendants checked) is a property of the
/// system under test. This structure records state; it never enforces
/// the invariant - verifying it is the engine's whole purpose.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    checked: BTreeMap<NodeId, bool>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is recorded as checked. Unrecorded ids read unchecked.
    pub fn checked(&self, id: &NodeId) -> bool {
        self.checked.get(id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: NodeId, checked: bool) {
        self.checked.insert(id, checked);
    }

    /// All ids currently recorded as checked, in id order.
    pub fn checked_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.checked
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(id, _)| id)
    }

    /// True when no node is checked.
    pub fn all_unchecked(&self) -> bool {
        self.checked.values().all(|checked| !checked)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.values().filter(|checked| **checked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecorded_reads_unchecked() {
        let state = SelectionState::new();
        assert!(!state.checked(&NodeId::new("home")));
        assert!(state.all_unchecked());
    }

    #[test]
    fn test_set_and_read() {
        let mut state = SelectionState::new();
        state.set(NodeId::new("notes"), true);
        assert!(state.checked(&NodeId::new("notes")));
        assert!(!state.all_unchecked());
        assert_eq!(state.checked_count(), 1);
    }

    #[test]
    fn test_explicit_false_is_unchecked() {
        let mut state = SelectionState::new();
        state.set(NodeId::new("notes"), false);
        assert!(state.all_unchecked());
        assert_eq!(state.checked_ids().count(), 0);
    }
}
