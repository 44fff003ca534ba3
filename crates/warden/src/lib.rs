//! # Warden
//!
//! The unified API for the Warden access-control system - authorization
//! decisions over grants, resource inheritance, and domain ancestry.
//!
//! ## Overview
//!
//! Warden answers one family of questions: does an accessor resource
//! effectively hold a permission, considering everything that can supply
//! it?
//!
//! - **Direct grants**: permissions assigned on a specific resource
//! - **Global grants**: permissions over every resource of a class within
//!   a domain, flowing down to descendant domains
//! - **Create grants**: permissions a creator would receive on resources
//!   it creates, gated by `*CREATE`
//! - **Resource inheritance**: `*INHERIT` edges let an accessor act with
//!   the union of other resources' permissions, transitively
//! - **Super-user**: `*SUPER-USER` on a domain implies everything within
//!   it and its descendants
//!
//! ## Key Concepts
//!
//! - **Resource**: Anything with an identity - both subjects and objects
//!   of access checks. The system resource (id 0) passes every check.
//! - **Resource class**: Declares which permission names are assignable.
//! - **Domain**: A node in a tree; grants at an ancestor are visible at
//!   its descendants, never the reverse.
//!
//! ## Usage
//!
//! ```rust
//! use warden::{AccessControl, Permission, ResourceId};
//! use warden::store::MemoryAccessStore;
//!
//! let store = MemoryAccessStore::new();
//! store.create_domain("acme", None).unwrap();
//! store.create_resource_class("document", false, false).unwrap();
//! store.declare_permission("document", "read").unwrap();
//! store.create_resource(ResourceId::new(1), "document", "acme").unwrap();
//! store.create_resource(ResourceId::new(2), "document", "acme").unwrap();
//! store
//!     .set_resource_permissions(
//!         ResourceId::new(1),
//!         ResourceId::new(2),
//!         [Permission::new("read")].into_iter().collect(),
//!     )
//!     .unwrap();
//!
//! let warden = AccessControl::new(store);
//! let allowed = warden
//!     .has_resource_permission(ResourceId::new(1), ResourceId::new(2), &Permission::new("read"))
//!     .unwrap();
//! assert!(allowed);
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `warden::core` - Core primitives (ResourceId, Permission, etc.)
//! - `warden::store` - Storage contract and in-memory store
//! - `warden::resolve` - Effective-permission resolution

pub mod engine;
pub mod error;

// Re-export component crates
pub use warden_core as core;
pub use warden_resolve as resolve;
pub use warden_store as store;

// Re-export main types for convenience
pub use engine::{AccessControl, EngineConfig};
pub use error::{EngineError, Result};

// Re-export commonly used core types
pub use warden_core::{
    names, Permission, PermissionSet, Resource, ResourceClass, ResourceId, ValidationError,
};
