//! Error types for tree construction and lookup.

use thiserror::Error;

/// Errors that can occur while building or querying a selection tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A node with this id was already added.
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    /// The referenced parent id is not part of the tree.
    #[error("dangling parent id {parent} for node {node}")]
    DanglingParent { node: String, parent: String },

    /// A second parentless node was added; the tree has exactly one root.
    #[error("duplicate root: {0} (root is already {1})")]
    DuplicateRoot(String, String),

    /// Node labels must be unique, since scenarios address nodes by label.
    #[error("duplicate label '{label}' on node {node}")]
    DuplicateLabel { node: String, label: String },

    /// A child's level must be exactly one below its parent's.
    #[error("node {node} at level {level} cannot attach to parent at level {parent_level}")]
    LevelMismatch {
        node: String,
        level: u8,
        parent_level: u8,
    },

    /// A parentless node that is not the root; only reachable on
    /// trees assembled outside [`add_node`], surfaced by `validate`.
    ///
    /// [`add_node`]: crate::Tree::add_node
    #[error("node {node} has no parent but is not the root {root}")]
    Disconnected { node: String, root: String },

    /// Lookup by id found nothing.
    #[error("unknown node id: {0}")]
    UnknownNode(String),

    /// Lookup by label found nothing.
    #[error("unknown node label: '{0}'")]
    UnknownLabel(String),

    /// The tree has no root node.
    #[error("tree has no root node")]
    MissingRoot,
}

/// Convenience result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_display() {
        let err = TreeError::DuplicateId("home".into());
        assert!(err.to_string().contains("home"));
    }

    #[test]
    fn test_dangling_parent_display() {
        let err = TreeError::DanglingParent {
            node: "notes".into(),
            parent: "desktop".into(),
        };
        assert!(err.to_string().contains("desktop"));
        assert!(err.to_string().contains("notes"));
    }

    #[test]
    fn test_level_mismatch_display() {
        let err = TreeError::LevelMismatch {
            node: "notes".into(),
            level: 3,
            parent_level: 1,
        };
        assert!(err.to_string().contains("level 3"));
    }
}
