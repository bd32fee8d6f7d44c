//! Error types for the simulation harness.

use thiserror::Error;
use wsn_core::WsnError;

/// Errors surfaced by a simulation run or its export.
#[derive(Debug, Error)]
pub enum SimError {
    /// The network model rejected a parameter
    #[error(transparent)]
    Model(#[from] WsnError),

    /// Writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
