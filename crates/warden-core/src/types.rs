//! Strong type definitions for Warden.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque resource identifier.
///
/// Resources are the subjects and objects of every permission check: the
/// accessor whose rights are evaluated, the target being accessed, and the
/// intermediaries of the inheritance graph are all resources.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// Create a ResourceId from a raw handle.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw handle.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The reserved system resource.
    ///
    /// The system resource is an implicit universal super-user: every
    /// predicate short-circuits to true for it after argument validation.
    pub const SYSTEM: Self = Self(0);

    /// Whether this is the reserved system resource.
    pub const fn is_system(&self) -> bool {
        self.0 == Self::SYSTEM.0
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({})", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A resource record: identity plus its fixed class and domain coordinates.
///
/// A resource belongs to exactly one resource class and exactly one domain
/// for its entire lifetime. Both names are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource's identity.
    pub id: ResourceId,

    /// Normalized name of the resource class this resource belongs to.
    pub class_name: String,

    /// Normalized name of the domain this resource lives in.
    pub domain_name: String,
}

/// A resource class: a named type whose instances share a permission
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceClass {
    /// Normalized class name.
    pub name: String,

    /// Whether instances of this class can authenticate.
    ///
    /// The credential-related system permissions are only valid for
    /// authenticatable classes.
    pub authenticatable: bool,

    /// Whether instances may be created without an authenticated session.
    pub unauthenticated_create_allowed: bool,
}
