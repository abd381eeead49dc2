//! The seam between the engine and the system under test.
//!
//! Everything the core needs from a UI automation backend is behind
//! [`SelectionDriver`]. The engine assumes nothing about how the
//! operations are implemented - DOM queries, an accessibility tree,
//! or the bundled in-process simulator all satisfy the same contract.

use std::fmt;

use async_trait::async_trait;
use canopy_types::NodeId;

use crate::error::DriverResult;

/// Opaque handle to one collapsed-node marker, as discovered by the
/// driver. The engine only ever hands a marker back to the driver
/// that produced it; it never inspects the token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub String);

impl MarkerHandle {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State capture and mutation against the system under test.
///
/// Implementations must tolerate strictly sequential use only: the
/// engine never has two operations in flight at once, and every call
/// is wrapped in a bounded wait by the engine.
#[async_trait]
pub trait SelectionDriver: Send + Sync {
    /// Read the checked state of one checkbox.
    async fn is_checked(&self, id: &NodeId) -> DriverResult<bool>;

    /// Toggle one checkbox.
    async fn click(&self, id: &NodeId) -> DriverResult<()>;

    /// Read the rendered selection status text.
    async fn read_status_message(&self) -> DriverResult<String>;

    /// Currently visible collapsed-node markers, in rendering order.
    async fn collapsed_markers(&self) -> DriverResult<Vec<MarkerHandle>>;

    /// Expand the node behind one marker.
    async fn expand(&self, marker: &MarkerHandle) -> DriverResult<()>;
}
