//! Error types for counter configuration.

use thiserror::Error;

/// Errors raised while building component configuration.
///
/// Runtime timing and menu behavior never fail; only out-of-contract
/// configuration values are reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FolioError {
    /// Counter target below zero.
    #[error("counter target must be non-negative, got {0}")]
    NegativeTarget(i64),
    /// Counter target is NaN or infinite.
    #[error("counter target must be a finite number, got {0}")]
    NonFiniteTarget(f64),
}
