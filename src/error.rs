//! Error types
//!
//! Every fallible operation in the crate returns [`EngineResult`]. Errors are
//! never retried or recovered internally; they propagate to the caller, which
//! decides what the user sees.

use thiserror::Error;

/// Result alias used throughout the crate
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error taxonomy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Invalid grid, time step or operator dimensions supplied at construction
    #[error("configuration error: {0}")]
    Configuration(String),

    /// State vector construction or decomposition size mismatch
    #[error("shape error: {0}")]
    Shape(String),

    /// Operation requires an initialized state
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Operator / vector size mismatch
    #[error("dimension mismatch in {operation}: expected {expected}, got {actual}")]
    Dimension {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl EngineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn dimension(operation: &'static str, expected: usize, actual: usize) -> Self {
        Self::Dimension {
            operation,
            expected,
            actual,
        }
    }
}
