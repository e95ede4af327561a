//! Dispatch error types for algoviz-core.
//!
//! Engines never fail for well-shaped input; they report rejected input as
//! an `ERROR` step instead. These errors cover what happens before an engine
//! runs: resolving the algorithm name, decoding the request body, and
//! enforcing [`InputLimits`](crate::limits::InputLimits).

use thiserror::Error;

use crate::id::AlgorithmId;

/// Errors produced while routing a request to an engine.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The algorithm name did not match any known engine.
    #[error("unknown algorithm: '{name}'")]
    UnknownAlgorithm { name: String },

    /// The request body does not match the engine's input shape.
    #[error("invalid input for {algorithm}: {reason}")]
    InvalidInput {
        algorithm: AlgorithmId,
        reason: String,
    },

    /// The input is well-formed but would produce an oversized trace.
    #[error("{what} for {algorithm} is {actual}, limit is {limit}")]
    LimitExceeded {
        algorithm: AlgorithmId,
        what: &'static str,
        limit: usize,
        actual: usize,
    },
}

impl DispatchError {
    pub(crate) fn invalid(algorithm: AlgorithmId, reason: impl Into<String>) -> Self {
        DispatchError::InvalidInput {
            algorithm,
            reason: reason.into(),
        }
    }
}
