//! In-process reference implementation of the driver contract.
//!
//! Models the multilevel checkbox component the engine was built to
//! verify: nodes are revealed one level at a time behind collapse
//! markers, clicking a checkbox cascades down to its subtree and
//! recomputes ancestors bottom-up, and the status message renders the
//! checked labels in traversal order.
//!
//! Fault injection knobs make conformance failures and transport
//! errors reproducible without a browser, which is what the engine's
//! own failure-path tests run against.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use canopy_types::{NodeId, Tree};

use crate::driver::{MarkerHandle, SelectionDriver};
use crate::error::{DriverError, DriverResult};

const MARKER_PREFIX: &str = "arrow:";

/// Deliberate defects for exercising the engine's failure paths.
#[derive(Clone, Debug, Default)]
pub struct FaultInjection {
    /// Skip the bottom-up ancestor recompute after clicks, so
    /// completing a sibling set never checks the parent.
    pub break_cascade_up: bool,
    /// Render the status message with a stray prefix.
    pub break_status_message: bool,
    /// Clicks on this node fail at the transport level.
    pub fail_clicks_on: Option<NodeId>,
    /// Expand calls are accepted but never reveal children, so
    /// collapse markers persist forever.
    pub refuse_expand: bool,
    /// This node refuses to uncheck once checked.
    pub sticky_node: Option<NodeId>,
}

#[derive(Debug, Default)]
struct SimState {
    checked: HashSet<NodeId>,
    expanded: HashSet<NodeId>,
}

/// Simulated system under test implementing [`SelectionDriver`].
pub struct SimulatedSelectionDriver {
    tree: Tree,
    faults: FaultInjection,
    state: Mutex<SimState>,
}

impl SimulatedSelectionDriver {
    /// A fault-free component: fully collapsed, fully unchecked.
    pub fn new(tree: Tree) -> Self {
        Self::with_faults(tree, FaultInjection::default())
    }

    pub fn with_faults(tree: Tree, faults: FaultInjection) -> Self {
        Self {
            tree,
            faults,
            state: Mutex::new(SimState::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        // The engine drives strictly sequentially; a poisoned lock can
        // only come from a panicked test and is safe to re-enter.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn visible(&self, state: &SimState, id: &NodeId) -> bool {
        self.tree
            .ancestors(id)
            .all(|ancestor| state.expanded.contains(&ancestor))
    }

    fn rendered(&self, state: &SimState, id: &NodeId) -> DriverResult<()> {
        if self.tree.node(id).is_err() {
            return Err(DriverError::NotFound(id.as_str().to_string()));
        }
        if !self.visible(state, id) {
            return Err(DriverError::NotFound(format!(
                "{} is not rendered (ancestor collapsed)",
                id
            )));
        }
        Ok(())
    }

    fn set_subtree(&self, state: &mut SimState, id: &NodeId, checked: bool) {
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if let Ok(children) = self.tree.children(&current) {
                stack.extend(children.iter().cloned());
            }
            if !checked && self.faults.sticky_node.as_ref() == Some(&current) {
                continue;
            }
            if checked {
                state.checked.insert(current);
            } else {
                state.checked.remove(&current);
            }
        }
    }

    fn recompute_ancestors(&self, state: &mut SimState) {
        if self.faults.break_cascade_up {
            return;
        }
        for id in self.tree.preorder().iter().rev() {
            let Ok(children) = self.tree.children(id) else {
                continue;
            };
            if children.is_empty() {
                continue;
            }
            if children.iter().all(|child| state.checked.contains(child)) {
                state.checked.insert(id.clone());
            } else {
                state.checked.remove(id);
            }
        }
    }
}

#[async_trait]
impl SelectionDriver for SimulatedSelectionDriver {
    async fn is_checked(&self, id: &NodeId) -> DriverResult<bool> {
        let state = self.lock();
        self.rendered(&state, id)?;
        Ok(state.checked.contains(id))
    }

    async fn click(&self, id: &NodeId) -> DriverResult<()> {
        if self.faults.fail_clicks_on.as_ref() == Some(id) {
            return Err(DriverError::Interaction {
                element: id.as_str().to_string(),
                reason: "click intercepted".into(),
            });
        }
        let mut state = self.lock();
        self.rendered(&state, id)?;
        let now_checked = !state.checked.contains(id);
        self.set_subtree(&mut state, id, now_checked);
        self.recompute_ancestors(&mut state);
        Ok(())
    }

    async fn read_status_message(&self) -> DriverResult<String> {
        let state = self.lock();
        let mut labels: Vec<&str> = Vec::new();
        for id in self.tree.preorder() {
            if state.checked.contains(&id) {
                if let Ok(node) = self.tree.node(&id) {
                    labels.push(node.label.as_str());
                }
            }
        }
        let message = labels.join(" ");
        if self.faults.break_status_message && !message.is_empty() {
            return Ok(format!("You have selected: {}", message));
        }
        Ok(message)
    }

    async fn collapsed_markers(&self) -> DriverResult<Vec<MarkerHandle>> {
        let state = self.lock();
        let markers = self
            .tree
            .preorder()
            .into_iter()
            .filter(|id| {
                let leaf = self
                    .tree
                    .children(id)
                    .map(|children| children.is_empty())
                    .unwrap_or(true);
                !leaf && self.visible(&state, id) && !state.expanded.contains(id)
            })
            .map(|id| MarkerHandle::new(format!("{}{}", MARKER_PREFIX, id)))
            .collect();
        Ok(markers)
    }

    async fn expand(&self, marker: &MarkerHandle) -> DriverResult<()> {
        let Some(token) = marker.0.strip_prefix(MARKER_PREFIX) else {
            return Err(DriverError::NotFound(marker.0.clone()));
        };
        let id = NodeId::new(token);
        let mut state = self.lock();
        self.rendered(&state, &id)?;
        if self.faults.refuse_expand {
            return Ok(());
        }
        state.expanded.insert(id);
        Ok(())
    }
}
