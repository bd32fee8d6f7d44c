//! Error types for the sensor network model.

use thiserror::Error;

/// Errors that can occur when configuring or clustering a network.
///
/// Every variant is raised before any state is touched: a failed call
/// leaves the network exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WsnError {
    /// A parameter is outside its allowed range
    #[error("Invalid argument: {name} = {value} (expected {expected})")]
    InvalidArgument {
        /// Parameter name as the caller knows it
        name: &'static str,
        /// The rejected value, rendered for display
        value: String,
        /// The allowed range or shape
        expected: String,
    },
}

impl WsnError {
    /// Creates an invalid-argument error.
    pub fn invalid(
        name: &'static str,
        value: impl std::fmt::Display,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            name,
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Returns the name of the rejected parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidArgument { name, .. } => name,
        }
    }
}

/// Result alias for network operations.
pub type Result<T> = std::result::Result<T, WsnError>;
