//! Error types for the engine.

use thiserror::Error;

use warden_core::ValidationError;
use warden_resolve::ResolveError;
use warden_store::StoreError;

/// Errors that can occur during a permission check.
///
/// Validation errors pass through untouched so callers (and tests) can
/// match on the exact precondition or referential failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Argument or referential-integrity error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage error, propagated unchanged. The engine never retries.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Traversal failure (depth hard stop).
    #[error("resolve error: {0}")]
    Resolve(ResolveError),
}

impl From<ResolveError> for EngineError {
    fn from(e: ResolveError) -> Self {
        // Flatten so a referential error surfaces the same way regardless
        // of whether the engine or the resolver detected it.
        match e {
            ResolveError::Validation(v) => EngineError::Validation(v),
            ResolveError::Store(s) => EngineError::Store(s),
            other => EngineError::Resolve(other),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
