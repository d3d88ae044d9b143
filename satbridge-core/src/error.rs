//! Error types for the boolean abstraction layer.

use crate::ast::TermId;
use thiserror::Error;

/// Errors raised while translating between formulas and a SAT engine.
///
/// Every variant aborts the whole call. Clauses already handed to the SAT
/// engine are not retracted, so the engine state must be discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A connective the CNF compiler does not handle reached it.
    #[error("operator `{op}` not supported, apply a simplifier before invoking the translator")]
    UnsupportedOperator {
        /// Connective name
        op: &'static str,
        /// Offending term
        term: TermId,
    },
    /// Memory usage crossed the configured cap.
    #[error("memory limit exceeded: {used} bytes (limit: {limit} bytes)")]
    ResourceExceeded {
        /// Bytes in use when the check fired
        used: u64,
        /// Configured limit in bytes
        limit: u64,
    },
    /// Cancellation was requested from outside.
    #[error("operation cancelled")]
    Cancelled,
}

impl BridgeError {
    /// Check whether this error came from a resource or cancellation check
    /// rather than from the input.
    #[must_use]
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            BridgeError::ResourceExceeded { .. } | BridgeError::Cancelled
        )
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, BridgeError>;
