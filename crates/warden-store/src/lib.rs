//! # Warden Store
//!
//! Storage abstraction for Warden. Provides the trait-based read contract
//! the resolver consumes, plus an in-memory implementation.
//!
//! ## Overview
//!
//! The store module abstracts grant and schema storage behind the
//! [`AccessStore`] trait, keeping the engine storage-agnostic. The shipped
//! implementation is [`MemoryAccessStore`]; durable backends live outside
//! this workspace and only have to satisfy the same read contract.
//!
//! ## Key Types
//!
//! - [`AccessStore`] - The read contract: schema, grants, hierarchy edges
//! - [`MemoryAccessStore`] - In-memory backend with the full write API
//! - [`StoreError`] - Write-time and backend failures
//!
//! ## Design Notes
//!
//! - **Total reads**: absent grants are empty sets, never errors
//! - **Normalized keys**: names are stored trimmed and lower-cased
//! - **Write-time invariants**: grants that would close an inheritance
//!   cycle, reference undeclared schema, or omit the `*CREATE` gate are
//!   rejected when written, so the read path can trust the data

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::{MemoryAccessStore, SYSTEM_NAME};
pub use traits::AccessStore;
