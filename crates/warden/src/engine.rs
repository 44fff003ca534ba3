//! The access-control engine: validated boolean predicates over the
//! effective-permission resolver.
//!
//! Every predicate runs the same pipeline: normalize and validate the
//! arguments (even for the system resource), short-circuit the implicit
//! authorities (system resource, super-user), then ask the resolver for the
//! effective set and apply the matching rule. Checks are pure reads; the
//! engine holds no state between calls and is safe to share across threads.

use tracing::debug;

use warden_core::{
    is_system_name, names, require_name, require_permission, Permission, PermissionSet, Resource,
    ResourceClass, ResourceId, ValidationError, DOMAIN_PERMISSION_NAMES,
};
use warden_resolve::{Resolver, DEFAULT_MAX_DOMAIN_DEPTH};
use warden_store::AccessStore;

use crate::error::Result;

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Hard stop for the domain ancestor walk, defending against a store
    /// that violates the acyclicity invariant.
    pub max_domain_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_domain_depth: DEFAULT_MAX_DOMAIN_DEPTH,
        }
    }
}

/// The access-control engine.
///
/// Wraps an [`AccessStore`] and answers permission predicates against the
/// current grant snapshot. Any caller may query the effective permissions
/// of any accessor; gating who may call at all is the session layer's job,
/// outside this crate.
pub struct AccessControl<S: AccessStore> {
    store: S,
    config: EngineConfig,
}

impl<S: AccessStore> AccessControl<S> {
    /// Create an engine with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn resolver(&self) -> Resolver<'_, S> {
        Resolver::with_max_domain_depth(&self.store, self.config.max_domain_depth)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate a resource-class argument: present and declared.
    fn validated_class(&self, class_name: &str) -> Result<ResourceClass> {
        let name = require_name(class_name, "resource class")?;
        self.store
            .resource_class(&name)?
            .ok_or_else(|| ValidationError::UnknownResourceClass(name).into())
    }

    /// Validate a resource permission against a class: present, declared
    /// for the class (or an applicable system permission), and compatible
    /// with the class's authenticatable flag.
    fn validated_resource_permission(
        &self,
        class: &ResourceClass,
        permission: &Permission,
    ) -> Result<Permission> {
        let permission = require_permission(permission, "resource permission")?;

        if is_system_name(&permission.name) {
            match permission.name.as_str() {
                names::INHERIT => {}
                names::RESET_CREDENTIALS | names::IMPERSONATE => {
                    if !class.authenticatable {
                        return Err(ValidationError::NotValidForUnauthenticatable {
                            class: class.name.clone(),
                            permission: permission.name,
                        }
                        .into());
                    }
                }
                _ => {
                    return Err(ValidationError::PermissionNotDefined {
                        class: class.name.clone(),
                        permission: permission.name,
                    }
                    .into())
                }
            }
        } else if !self
            .store
            .is_permission_defined(&class.name, &permission.name)?
        {
            return Err(ValidationError::PermissionNotDefined {
                class: class.name.clone(),
                permission: permission.name,
            }
            .into());
        }

        Ok(permission)
    }

    /// Validate an explicit domain argument: present and existing.
    fn validated_domain(&self, domain_name: &str) -> Result<String> {
        let name = require_name(domain_name, "domain")?;
        if !self.store.domain_exists(&name)? {
            return Err(ValidationError::UnknownDomain(name).into());
        }
        Ok(name)
    }

    /// Validate a domain permission argument.
    fn validated_domain_permission(
        &self,
        permission: &Permission,
        allow_create: bool,
    ) -> Result<Permission> {
        let permission = require_permission(permission, "domain permission")?;
        let allowed = DOMAIN_PERMISSION_NAMES.contains(&permission.name.as_str())
            || (allow_create && permission.name == names::CREATE);
        if !allowed {
            return Err(ValidationError::InvalidDomainPermission(permission.name).into());
        }
        Ok(permission)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Predicates
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the accessor effectively holds `permission` on a specific
    /// target resource.
    ///
    /// The target is a structural coordinate of the query and must exist;
    /// the accessor is an instance reference and resolves to `false` when
    /// it was never created.
    pub fn has_resource_permission(
        &self,
        accessor: ResourceId,
        target: ResourceId,
        permission: &Permission,
    ) -> Result<bool> {
        let target_record = self
            .store
            .resource(target)?
            .ok_or(ValidationError::UnknownResource(target))?;
        let class = self.validated_class(&target_record.class_name)?;
        let permission = self.validated_resource_permission(&class, permission)?;

        // A resource implicitly holds the credential permissions on itself.
        if accessor == target
            && class.authenticatable
            && (permission.name == names::RESET_CREDENTIALS
                || permission.name == names::IMPERSONATE)
        {
            return Ok(true);
        }
        if accessor.is_system() {
            return Ok(true);
        }
        if self.store.resource(accessor)?.is_none() {
            return Ok(false);
        }

        let resolver = self.resolver();
        if resolver.has_super_user(accessor, &target_record.domain_name)? {
            return Ok(true);
        }
        let effective = resolver.effective_resource_permissions(accessor, &target_record)?;
        let granted = effective.contains_match(&permission);
        debug!(%accessor, %target, permission = %permission, granted, "resource permission check");
        Ok(granted)
    }

    /// Whether the accessor would effectively hold `permission` on a
    /// resource of `class_name` created in the given domain (the accessor's
    /// own domain when omitted).
    ///
    /// Requires the `*CREATE` gate: the effective create set must contain
    /// `*CREATE` (any grantable value), which direct or inherited create
    /// grants alone can supply. Global grants contribute every other name
    /// but never the gate.
    pub fn has_post_create_resource_permission(
        &self,
        accessor: ResourceId,
        class_name: &str,
        permission: &Permission,
        domain_name: Option<&str>,
    ) -> Result<bool> {
        let class = self.validated_class(class_name)?;
        let permission = self.validated_resource_permission(&class, permission)?;
        let explicit = domain_name
            .map(|raw| self.validated_domain(raw))
            .transpose()?;

        if accessor.is_system() {
            return Ok(true);
        }
        let Some(domain) = self.query_domain(accessor, explicit)? else {
            return Ok(false);
        };

        let resolver = self.resolver();
        if resolver.has_super_user(accessor, &domain)? {
            return Ok(true);
        }

        let create = resolver.effective_create_permissions(accessor, &class.name, &domain)?;
        if !create.contains_name(names::CREATE) {
            debug!(%accessor, class = %class.name, %domain, "create gate not held");
            return Ok(false);
        }
        let mut combined = create;
        combined.merge_except(
            &resolver.effective_global_permissions(accessor, &class.name, &domain)?,
            names::CREATE,
        );
        let granted = combined.contains_match(&permission);
        debug!(%accessor, class = %class.name, %domain, permission = %permission, granted,
               "post-create permission check");
        Ok(granted)
    }

    /// Whether the accessor effectively holds a global `permission` on
    /// every resource of `class_name` in the given domain (the accessor's
    /// own domain when omitted).
    pub fn has_global_resource_permission(
        &self,
        accessor: ResourceId,
        class_name: &str,
        permission: &Permission,
        domain_name: Option<&str>,
    ) -> Result<bool> {
        let class = self.validated_class(class_name)?;
        let permission = self.validated_resource_permission(&class, permission)?;
        let explicit = domain_name
            .map(|raw| self.validated_domain(raw))
            .transpose()?;

        if accessor.is_system() {
            return Ok(true);
        }
        let Some(domain) = self.query_domain(accessor, explicit)? else {
            return Ok(false);
        };

        let resolver = self.resolver();
        if resolver.has_super_user(accessor, &domain)? {
            return Ok(true);
        }
        let effective = resolver.effective_global_permissions(accessor, &class.name, &domain)?;
        Ok(effective.contains_match(&permission))
    }

    /// Whether the accessor effectively holds a domain `permission` on the
    /// given domain (the accessor's own domain when omitted).
    ///
    /// `*SUPER-USER` implies every domain permission.
    pub fn has_domain_permission(
        &self,
        accessor: ResourceId,
        permission: &Permission,
        domain_name: Option<&str>,
    ) -> Result<bool> {
        let permission = self.validated_domain_permission(permission, false)?;
        let explicit = domain_name
            .map(|raw| self.validated_domain(raw))
            .transpose()?;

        if accessor.is_system() {
            return Ok(true);
        }
        let Some(domain) = self.query_domain(accessor, explicit)? else {
            return Ok(false);
        };

        let effective = self.resolver().effective_domain_permissions(accessor, &domain)?;
        Ok(effective.contains_match(&permission) || effective.contains_name(names::SUPER_USER))
    }

    /// Whether the accessor effectively holds a domain-create `permission`
    /// (for domains not yet created; no domain coordinate, so only the
    /// resource-inheritance axis applies).
    pub fn has_domain_create_permission(
        &self,
        accessor: ResourceId,
        permission: &Permission,
    ) -> Result<bool> {
        let permission = self.validated_domain_permission(permission, true)?;

        if accessor.is_system() {
            return Ok(true);
        }
        if self.store.resource(accessor)?.is_none() {
            return Ok(false);
        }

        let effective = self.resolver().effective_domain_create_permissions(accessor)?;
        Ok(effective.contains_match(&permission))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Effective-Set Introspection
    // ─────────────────────────────────────────────────────────────────────────

    /// The effective permissions the accessor holds on a target resource.
    ///
    /// Introspection reports actual grants: no system-resource or
    /// super-user shortcut is applied here.
    pub fn effective_resource_permissions(
        &self,
        accessor: ResourceId,
        target: ResourceId,
    ) -> Result<PermissionSet> {
        let target_record = self
            .store
            .resource(target)?
            .ok_or(ValidationError::UnknownResource(target))?;
        Ok(self
            .resolver()
            .effective_resource_permissions(accessor, &target_record)?)
    }

    /// The effective create permissions for a class+domain.
    pub fn effective_create_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: Option<&str>,
    ) -> Result<PermissionSet> {
        let class = self.validated_class(class_name)?;
        let explicit = domain_name
            .map(|raw| self.validated_domain(raw))
            .transpose()?;
        let Some(domain) = self.query_domain(accessor, explicit)? else {
            return Ok(PermissionSet::new());
        };
        Ok(self
            .resolver()
            .effective_create_permissions(accessor, &class.name, &domain)?)
    }

    /// The effective global permissions for a class+domain.
    pub fn effective_global_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: Option<&str>,
    ) -> Result<PermissionSet> {
        let class = self.validated_class(class_name)?;
        let explicit = domain_name
            .map(|raw| self.validated_domain(raw))
            .transpose()?;
        let Some(domain) = self.query_domain(accessor, explicit)? else {
            return Ok(PermissionSet::new());
        };
        Ok(self
            .resolver()
            .effective_global_permissions(accessor, &class.name, &domain)?)
    }

    /// The effective domain permissions on a domain.
    pub fn effective_domain_permissions(
        &self,
        accessor: ResourceId,
        domain_name: Option<&str>,
    ) -> Result<PermissionSet> {
        let explicit = domain_name
            .map(|raw| self.validated_domain(raw))
            .transpose()?;
        let Some(domain) = self.query_domain(accessor, explicit)? else {
            return Ok(PermissionSet::new());
        };
        Ok(self
            .resolver()
            .effective_domain_permissions(accessor, &domain)?)
    }

    /// The effective domain-create permissions of an accessor.
    pub fn effective_domain_create_permissions(
        &self,
        accessor: ResourceId,
    ) -> Result<PermissionSet> {
        Ok(self
            .resolver()
            .effective_domain_create_permissions(accessor)?)
    }

    /// The domain a resource lives in.
    pub fn domain_name_of(&self, resource: ResourceId) -> Result<Option<String>> {
        Ok(self
            .store
            .resource(resource)?
            .map(|record: Resource| record.domain_name))
    }

    /// Resolve the query domain: the validated explicit name, or the
    /// accessor's own domain. `None` when the accessor was never created
    /// and so has no domain (and trivially holds nothing).
    fn query_domain(
        &self,
        accessor: ResourceId,
        explicit: Option<String>,
    ) -> Result<Option<String>> {
        match explicit {
            Some(domain) => {
                // Even with an explicit domain, a never-created accessor
                // holds nothing.
                if self.store.resource(accessor)?.is_none() {
                    return Ok(None);
                }
                Ok(Some(domain))
            }
            None => Ok(self
                .store
                .resource(accessor)?
                .map(|record| record.domain_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::Permission;
    use warden_store::MemoryAccessStore;

    fn engine() -> AccessControl<MemoryAccessStore> {
        let store = MemoryAccessStore::new();
        store.create_domain("dom", None).unwrap();
        store.create_resource_class("rc", false, false).unwrap();
        store.declare_permission("rc", "query").unwrap();
        store.create_resource(ResourceId::new(1), "rc", "dom").unwrap();
        AccessControl::new(store)
    }

    #[test]
    fn test_system_resource_bypasses_grants() {
        let engine = engine();
        assert!(engine
            .has_post_create_resource_permission(
                ResourceId::SYSTEM,
                "rc",
                &Permission::new("query"),
                None,
            )
            .unwrap());
    }

    #[test]
    fn test_system_resource_still_validated() {
        let engine = engine();
        // Credential permission on an unauthenticatable class errors even
        // for the system resource.
        let err = engine
            .has_post_create_resource_permission(
                ResourceId::SYSTEM,
                "rc",
                &Permission::new(names::RESET_CREDENTIALS),
                None,
            )
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("not valid for unauthenticatable resource class"));
    }

    #[test]
    fn test_never_created_accessor_holds_nothing() {
        let engine = engine();
        assert!(!engine
            .has_post_create_resource_permission(
                ResourceId::new(999),
                "rc",
                &Permission::new("query"),
                Some("dom"),
            )
            .unwrap());
    }

    #[test]
    fn test_validation_order_class_before_permission_before_domain() {
        let engine = engine();

        // Unknown class wins over unknown permission and unknown domain
        let err = engine
            .has_post_create_resource_permission(
                ResourceId::new(1),
                "ghost_class",
                &Permission::new("ghost_permission"),
                Some("ghost_domain"),
            )
            .unwrap_err();
        assert!(err.to_string().contains("could not find resource class"));

        // Unknown permission wins over unknown domain
        let err = engine
            .has_post_create_resource_permission(
                ResourceId::new(1),
                "rc",
                &Permission::new("ghost_permission"),
                Some("ghost_domain"),
            )
            .unwrap_err();
        assert!(err.to_string().contains("not defined for resource class"));

        // Domain checked last
        let err = engine
            .has_post_create_resource_permission(
                ResourceId::new(1),
                "rc",
                &Permission::new("query"),
                Some("ghost_domain"),
            )
            .unwrap_err();
        assert!(err.to_string().contains("could not find domain"));
    }

    #[test]
    fn test_blank_arguments_fail_first() {
        let engine = engine();
        let err = engine
            .has_post_create_resource_permission(
                ResourceId::new(1),
                "  \t",
                &Permission::new("query"),
                None,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "resource class required");

        let err = engine
            .has_post_create_resource_permission(
                ResourceId::new(1),
                "rc",
                &Permission::new("   "),
                None,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "resource permission required");
    }

    #[test]
    fn test_domain_permission_name_validated() {
        let engine = engine();
        let err = engine
            .has_domain_permission(ResourceId::new(1), &Permission::new("query"), Some("dom"))
            .unwrap_err();
        assert!(err.to_string().contains("not a valid domain permission"));
    }
}
