//! The selectable hierarchy.
//!
//! A [`Tree`] is built once, while the system under test is being
//! discovered, and is immutable for the duration of a scenario batch:
//! the underlying UI's structure does not change once expanded.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// Stable identifier of one selectable node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Depth of a node in the fixed three-level hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Level 1 - the single root of the tree.
    Root,
    /// Level 2 - a branch grouping leaves under the root.
    Branch,
    /// Level 3 - a leaf with no children.
    Leaf,
}

impl Level {
    /// Numeric depth, 1 through 3.
    pub fn depth(&self) -> u8 {
        match self {
            Self::Root => 1,
            Self::Branch => 2,
            Self::Leaf => 3,
        }
    }

    /// The level a direct child must have, or `None` below a leaf.
    pub fn child(&self) -> Option<Level> {
        match self {
            Self::Root => Some(Self::Branch),
            Self::Branch => Some(Self::Leaf),
            Self::Leaf => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.depth())
    }
}

/// One selectable node in the hierarchy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Stable identity.
    pub id: NodeId,
    /// Display text; unique within the tree.
    pub label: String,
    /// Depth in the hierarchy.
    pub level: Level,
    /// Direct children in declaration order. Empty for leaves.
    pub children: Vec<NodeId>,
    /// Immediate parent; absent only for the root.
    pub parent: Option<NodeId>,
}

/// The full selectable hierarchy, keyed by node id.
///
/// Structural invariants (exactly one root, every non-root has one
/// parent, child level = parent level + 1, unique labels) are enforced
/// at construction time by [`Tree::add_node`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    labels: HashMap<String, NodeId>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent` (or as the root when `parent` is `None`).
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        level: Level,
        parent: Option<&NodeId>,
    ) -> TreeResult<()> {
        let id = NodeId::new(id);
        let label = label.into();

        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateId(id.0));
        }
        if let Some(existing) = self.labels.get(&label) {
            return Err(TreeError::DuplicateLabel {
                node: existing.0.clone(),
                label,
            });
        }

        match parent {
            Some(parent_id) => {
                let parent_node = self.nodes.get(parent_id).ok_or_else(|| {
                    TreeError::DanglingParent {
                        node: id.0.clone(),
                        parent: parent_id.0.clone(),
                    }
                })?;
                if parent_node.level.child() != Some(level) {
                    return Err(TreeError::LevelMismatch {
                        node: id.0.clone(),
                        level: level.depth(),
                        parent_level: parent_node.level.depth(),
                    });
                }
            }
            None => {
                if let Some(root) = &self.root {
                    return Err(TreeError::DuplicateRoot(id.0, root.0.clone()));
                }
                if level != Level::Root {
                    return Err(TreeError::LevelMismatch {
                        node: id.0.clone(),
                        level: level.depth(),
                        parent_level: 0,
                    });
                }
            }
        }

        let node = Node {
            id: id.clone(),
            label: label.clone(),
            level,
            children: Vec::new(),
            parent: parent.cloned(),
        };

        if let Some(parent_id) = parent {
            // Checked above; the parent is present.
            if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                parent_node.children.push(id.clone());
            }
        } else {
            self.root = Some(id.clone());
        }

        self.labels.insert(label, id.clone());
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> TreeResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| TreeError::UnknownNode(id.0.clone()))
    }

    /// The root node's id.
    pub fn root(&self) -> TreeResult<&NodeId> {
        self.root.as_ref().ok_or(TreeError::MissingRoot)
    }

    /// Direct children of `id` in declaration order.
    pub fn children(&self, id: &NodeId) -> TreeResult<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Immediate parent of `id`, `None` for the root.
    pub fn parent(&self, id: &NodeId) -> TreeResult<Option<&NodeId>> {
        Ok(self.node(id)?.parent.as_ref())
    }

    pub fn is_leaf(&self, id: &NodeId) -> TreeResult<bool> {
        Ok(self.node(id)?.children.is_empty())
    }

    pub fn is_root(&self, id: &NodeId) -> TreeResult<bool> {
        Ok(self.node(id)?.parent.is_none())
    }

    /// Resolve a display label to its node id.
    pub fn id_by_label(&self, label: &str) -> TreeResult<&NodeId> {
        self.labels
            .get(label)
            .ok_or_else(|| TreeError::UnknownLabel(label.to_string()))
    }

    /// Lazy walk from the immediate parent of `id` up to the root.
    ///
    /// The iterator is `Clone`, so a walk can be restarted from any
    /// point. An unknown id yields an empty walk.
    pub fn ancestors(&self, id: &NodeId) -> Ancestors<'_> {
        let next = self
            .nodes
            .get(id)
            .and_then(|node| node.parent.clone());
        Ancestors { tree: self, next }
    }

    /// Canonical traversal: parent before its children, children in
    /// declaration order. This is the order the status message uses.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let Some(root) = &self.root else {
            return order;
        };
        let mut stack = vec![root.clone()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().cloned());
            }
            order.push(id);
        }
        order
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Final structural check for trees assembled incrementally:
    /// a root exists, exactly one node is parentless, and every parent
    /// edge is consistent with the parent's child list.
    pub fn validate(&self) -> TreeResult<()> {
        let root = self.root()?;
        for (id, node) in &self.nodes {
            match &node.parent {
                Some(parent_id) => {
                    let parent = self.node(parent_id)?;
                    if !parent.children.contains(id) {
                        return Err(TreeError::DanglingParent {
                            node: id.0.clone(),
                            parent: parent_id.0.clone(),
                        });
                    }
                }
                None if id != root => {
                    return Err(TreeError::Disconnected {
                        node: id.0.clone(),
                        root: root.0.clone(),
                    });
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Finite, restartable walk from a node's parent to the root.
#[derive(Clone)]
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self
            .tree
            .nodes
            .get(&current)
            .and_then(|node| node.parent.clone());
        Some(current)
    }
}
