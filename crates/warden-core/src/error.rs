//! Error types for Warden core validation.

use thiserror::Error;

use crate::types::ResourceId;

/// Argument and referential-integrity errors raised before any resolution
/// work happens.
///
/// Three unknown-input conditions are kept distinct and must never be
/// conflated: a missing required argument fails with [`Required`]; a
/// well-formed reference to a structural element that was never declared
/// (class, permission, domain) fails with one of the referential variants;
/// a well-formed reference to an instance that was never created resolves
/// to "no permission" and is not an error at all.
///
/// [`Required`]: ValidationError::Required
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} required")]
    Required(&'static str),

    #[error("could not find resource class {0}")]
    UnknownResourceClass(String),

    #[error("permission {permission} is not defined for resource class {class}")]
    PermissionNotDefined { class: String, permission: String },

    #[error("permission {permission} is not valid for unauthenticatable resource class {class}")]
    NotValidForUnauthenticatable { class: String, permission: String },

    #[error("could not find domain {0}")]
    UnknownDomain(String),

    #[error("could not find resource {0}")]
    UnknownResource(ResourceId),

    #[error("permission {0} is not a valid domain permission")]
    InvalidDomainPermission(String),

    #[error("permission name {0} is reserved for the system")]
    ReservedPermissionName(String),
}

/// Result type for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
