//! Name normalization shared by every entry point.
//!
//! Resource-class and domain names are case- and whitespace-insensitive:
//! leading/trailing whitespace is stripped and the name is lower-cased
//! before any lookup or comparison. Permission names are whitespace-
//! insensitive but keep their case, since the system names are spelled
//! upper-case by convention.

use crate::error::ValidationError;
use crate::permission::Permission;

/// Normalize a resource-class or domain name: trim and lower-case.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize a permission name: trim only.
pub fn normalize_permission_name(raw: &str) -> String {
    raw.trim().to_string()
}

/// Normalize a required class/domain name, failing if it is absent.
///
/// A name that is empty after trimming is treated as a missing argument,
/// the precondition-violation case, distinct from a well-formed name that
/// references nothing.
pub fn require_name(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let normalized = normalize_name(raw);
    if normalized.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(normalized)
}

/// Normalize a required permission, failing if its name is absent.
pub fn require_permission(
    permission: &Permission,
    field: &'static str,
) -> Result<Permission, ValidationError> {
    let name = normalize_permission_name(&permission.name);
    if name.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(Permission {
        name,
        grantable: permission.grantable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_name(" RC_X\t"), "rc_x");
        assert_eq!(normalize_name("rc_x"), "rc_x");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_name("  Accounting \t");
        assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn test_permission_name_keeps_case() {
        assert_eq!(normalize_permission_name(" *CREATE\t"), "*CREATE");
    }

    #[test]
    fn test_require_name_rejects_blank() {
        let err = require_name("  \t", "resource class").unwrap_err();
        assert!(matches!(err, ValidationError::Required("resource class")));
    }

    #[test]
    fn test_require_permission_rejects_blank() {
        let blank = Permission::new("   ");
        let err = require_permission(&blank, "resource permission").unwrap_err();
        assert!(matches!(err, ValidationError::Required(_)));
    }

    #[test]
    fn test_require_permission_preserves_grantable() {
        let padded = Permission::grantable(" query ");
        let normalized = require_permission(&padded, "resource permission").unwrap();
        assert_eq!(normalized.name, "query");
        assert!(normalized.grantable);
    }
}
