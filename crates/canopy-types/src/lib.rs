//! Canopy core types.
//!
//! Data model for hierarchical selection conformance testing: the
//! selectable tree, selection states, data-driven scenarios, and
//! per-scenario verification results. This crate is pure data - no
//! async, no I/O, no knowledge of any UI automation backend.

#![deny(unsafe_code)]

pub mod error;
pub mod result;
pub mod scenario;
pub mod selection;
pub mod tree;

pub use error::{TreeError, TreeResult};
pub use result::{MessageMismatch, NodeMismatch, VerificationResult};
pub use scenario::Scenario;
pub use selection::SelectionState;
pub use tree::{Level, Node, NodeId, Tree};
