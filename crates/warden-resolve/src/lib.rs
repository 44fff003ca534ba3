//! # Warden Resolve
//!
//! Effective-permission resolution: the pure read path that combines raw
//! grants across the resource-inheritance graph and the domain ancestry
//! tree into effective permission sets.
//!
//! ## Overview
//!
//! Resolution is a synchronous call tree over the [`AccessStore`] read
//! contract. No state survives a resolution; every call recomputes from
//! the current grant snapshot, so the engine stays safe to call
//! concurrently without internal locking.
//!
//! ## Key Pieces
//!
//! - [`ancestor_chain`] / [`is_ancestor`] - domain ancestry walks
//! - [`reachable_intermediaries`] - `*INHERIT` graph traversal
//! - [`Resolver`] - effective sets per grant scope, plus the post-create
//!   combination and super-user detection
//!
//! [`AccessStore`]: warden_store::AccessStore

pub mod domain;
pub mod error;
pub mod inherit;
pub mod resolver;

pub use domain::{ancestor_chain, is_ancestor, DEFAULT_MAX_DOMAIN_DEPTH};
pub use error::{ResolveError, Result};
pub use inherit::reachable_intermediaries;
pub use resolver::Resolver;
