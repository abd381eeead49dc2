//! Error types for the canopy CLI.

use thiserror::Error;

/// Errors surfaced to the CLI user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario file could not be read.
    #[error("cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file is not a valid scenario list, or report
    /// serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reference tree construction failed.
    #[error(transparent)]
    Tree(#[from] canopy_types::TreeError),

    /// The run itself aborted (expansion timeout or setup failure).
    #[error(transparent)]
    Engine(#[from] canopy_engine::EngineError),
}

/// Convenience result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
