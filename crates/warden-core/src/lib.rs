//! # Warden Core
//!
//! Pure primitives for the Warden access-control engine: resource
//! identities, permissions, name normalization, and validation errors.
//!
//! This crate contains no I/O and no storage. It is pure computation over
//! the access-control data model.
//!
//! ## Key Types
//!
//! - [`ResourceId`] - Opaque resource handle; id 0 is the system resource
//! - [`Resource`] - A resource's fixed class and domain coordinates
//! - [`ResourceClass`] - A named type with an `authenticatable` flag
//! - [`Permission`] - A name plus a grantable capability bit
//! - [`PermissionSet`] - Name-keyed set with grantable-preserving union
//!
//! ## Matching Rule
//!
//! Granted `G` satisfies requested `R` iff the names match and
//! (`G.grantable` or not `R.grantable`). See [`Permission::satisfies`].

pub mod error;
pub mod normalize;
pub mod permission;
pub mod types;

pub use error::ValidationError;
pub use normalize::{normalize_name, normalize_permission_name, require_name, require_permission};
pub use permission::{is_system_name, names, Permission, PermissionSet, DOMAIN_PERMISSION_NAMES};
pub use types::{Resource, ResourceClass, ResourceId};
