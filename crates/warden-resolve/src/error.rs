//! Error types for resolution.

use thiserror::Error;

use warden_core::ValidationError;
use warden_store::StoreError;

/// Errors that can occur while computing effective permission sets.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Referential error in the query coordinates.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store failure, propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The domain ancestor walk exceeded the hard stop.
    ///
    /// Ancestry is an acyclic invariant of the write layer; hitting this
    /// limit means the store served a corrupted chain.
    #[error("domain ancestry for {domain} exceeds depth limit {limit}")]
    DepthExceeded { domain: String, limit: usize },
}

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;
