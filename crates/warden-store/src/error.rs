//! Error types for the store module.

use thiserror::Error;

use warden_core::{ResourceId, ValidationError};

/// Errors that can occur during store operations.
///
/// Read operations on a healthy in-memory store never fail; the error
/// variants exist so that backends with real I/O can propagate transient
/// failures unchanged, and so that write operations can reject referential
/// and structural violations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write referenced an undeclared class, domain, or resource.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Domain already exists.
    #[error("domain {0} already exists")]
    DomainExists(String),

    /// Resource class already exists.
    #[error("resource class {0} already exists")]
    ResourceClassExists(String),

    /// Permission already declared for the class.
    #[error("permission {permission} already defined for resource class {class}")]
    PermissionExists { class: String, permission: String },

    /// Resource already exists.
    #[error("resource {0} already exists")]
    ResourceExists(ResourceId),

    /// A grant would close a cycle in the resource-inheritance graph.
    #[error("inheritance grant from {accessor} to {target} would create a cycle")]
    InheritanceCycle {
        accessor: ResourceId,
        target: ResourceId,
    },

    /// A create-permission set is missing the create gate.
    #[error("create permission set for resource class {0} must include *CREATE")]
    MissingCreateGate(String),

    /// A permission name is not allowed in this grant scope.
    #[error("permission {permission} is not assignable as a {scope} permission")]
    NotAssignable {
        scope: &'static str,
        permission: String,
    },

    /// Backend failure (I/O, connection loss); propagated unchanged.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
