//! Error types for the conformance engine.

use canopy_types::TreeError;
use thiserror::Error;

/// Transport-level failures reported by a [`crate::SelectionDriver`]
/// implementation. The engine converts these into scenario failures;
/// they are recorded on the offending scenario, never swallowed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    /// The target element could not be located or is not rendered.
    #[error("element not found: {0}")]
    NotFound(String),

    /// An interaction (click, expand) was attempted but failed.
    #[error("interaction failed on {element}: {reason}")]
    Interaction { element: String, reason: String },

    /// The underlying automation session is gone.
    #[error("driver session lost: {0}")]
    SessionLost(String),
}

/// Convenience result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors raised by the engine itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Expansion did not reach a marker-free state within the round
    /// budget. Fatal to the whole run: no scenario can proceed on a
    /// partially expanded tree.
    #[error("tree expansion did not converge after {rounds} rounds")]
    ExpansionTimeout { rounds: usize },

    /// The reset protocol completed but the baseline is not fully
    /// unchecked. Fatal to the current scenario only.
    #[error("reset left a dirty baseline: {detail}")]
    ResetVerification { detail: String },

    /// A bounded wait on one driver operation elapsed.
    #[error("wait for {operation} timed out after {elapsed_ms}ms")]
    Wait {
        operation: &'static str,
        elapsed_ms: u64,
    },

    /// Transport failure from the driver.
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Tree construction or lookup failure.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
