//! In-memory implementation of the AccessStore trait.
//!
//! Serves as the reference backend for tests and embedding. It has the full
//! write API for declaring schema and recording grants, and enforces the
//! write-time invariants the read contract assumes: referential integrity
//! of every coordinate and acyclicity of the inheritance graph.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::RwLock;

use tracing::debug;

use warden_core::{
    is_system_name, names, normalize_name, normalize_permission_name, require_name, PermissionSet, Resource, ResourceClass, ResourceId, ValidationError, DOMAIN_PERMISSION_NAMES,
};

use crate::error::{Result, StoreError};
use crate::traits::AccessStore;

/// Name of the seeded system class and system root domain.
pub const SYSTEM_NAME: &str = "system";

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock, so a
/// write observed by one resolution is observed whole: each trait read takes
/// the lock once, and the engine issues reads synchronously.
pub struct MemoryAccessStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Resource classes by normalized name.
    classes: HashMap<String, ResourceClass>,

    /// Declared permission names per class.
    class_permissions: HashMap<String, BTreeSet<String>>,

    /// Domain forest: normalized name -> parent name (None for roots).
    domains: HashMap<String, Option<String>>,

    /// Resource registry.
    resources: HashMap<ResourceId, Resource>,

    /// Direct grants on a specific target resource.
    resource_grants: HashMap<(ResourceId, ResourceId), PermissionSet>,

    /// Create grants keyed by (accessor, class, domain).
    create_grants: HashMap<(ResourceId, String, String), PermissionSet>,

    /// Global grants keyed by (accessor, class, domain).
    global_grants: HashMap<(ResourceId, String, String), PermissionSet>,

    /// Domain grants keyed by (accessor, domain).
    domain_grants: HashMap<(ResourceId, String), PermissionSet>,

    /// Domain-create grants keyed by accessor.
    domain_create_grants: HashMap<ResourceId, PermissionSet>,

    /// Outgoing `*INHERIT` edges, derived from resource_grants.
    inherit_edges: HashMap<ResourceId, BTreeSet<ResourceId>>,
}

impl Inner {
    /// Whether `to` is reachable from `from` via inheritance edges.
    fn inherit_reaches(&self, from: ResourceId, to: ResourceId) -> bool {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            if current == to {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(targets) = self.inherit_edges.get(&current) {
                queue.extend(targets.iter().copied());
            }
        }
        false
    }

    fn require_class(&self, class_name: &str) -> Result<&ResourceClass> {
        self.classes.get(class_name).ok_or_else(|| {
            StoreError::Validation(ValidationError::UnknownResourceClass(class_name.to_string()))
        })
    }

    fn require_domain(&self, domain_name: &str) -> Result<()> {
        if !self.domains.contains_key(domain_name) {
            return Err(StoreError::Validation(ValidationError::UnknownDomain(
                domain_name.to_string(),
            )));
        }
        Ok(())
    }

    fn require_resource(&self, id: ResourceId) -> Result<&Resource> {
        self.resources
            .get(&id)
            .ok_or(StoreError::Validation(ValidationError::UnknownResource(id)))
    }

    /// Check that every name in a grant set is declared for the class or is
    /// an allowed system name for the scope.
    fn check_assignable(
        &self,
        class: &ResourceClass,
        set: &PermissionSet,
        scope: &'static str,
        allowed_system: &[&str],
    ) -> Result<()> {
        let declared = self.class_permissions.get(&class.name);
        for permission in set.iter() {
            if is_system_name(&permission.name) {
                if !allowed_system.contains(&permission.name.as_str()) {
                    return Err(StoreError::NotAssignable {
                        scope,
                        permission: permission.name,
                    });
                }
                if (permission.name == names::RESET_CREDENTIALS
                    || permission.name == names::IMPERSONATE)
                    && !class.authenticatable
                {
                    return Err(StoreError::Validation(
                        ValidationError::NotValidForUnauthenticatable {
                            class: class.name.clone(),
                            permission: permission.name,
                        },
                    ));
                }
                continue;
            }
            let defined = declared.map(|d| d.contains(&permission.name)).unwrap_or(false);
            if !defined {
                return Err(StoreError::Validation(ValidationError::PermissionNotDefined {
                    class: class.name.clone(),
                    permission: permission.name,
                }));
            }
        }
        Ok(())
    }
}

impl MemoryAccessStore {
    /// Create a store seeded with the system domain, the system resource
    /// class, and the system resource (id 0).
    pub fn new() -> Self {
        let mut inner = Inner::default();

        inner.domains.insert(SYSTEM_NAME.to_string(), None);
        inner.classes.insert(
            SYSTEM_NAME.to_string(),
            ResourceClass {
                name: SYSTEM_NAME.to_string(),
                authenticatable: true,
                unauthenticated_create_allowed: false,
            },
        );
        inner.resources.insert(
            ResourceId::SYSTEM,
            Resource {
                id: ResourceId::SYSTEM,
                class_name: SYSTEM_NAME.to_string(),
                domain_name: SYSTEM_NAME.to_string(),
            },
        );

        Self {
            inner: RwLock::new(inner),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Schema Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a domain. A parent of `None` makes a new root in the forest.
    pub fn create_domain(&self, domain_name: &str, parent: Option<&str>) -> Result<()> {
        let name = require_name(domain_name, "domain")?;
        let mut inner = self.inner.write().unwrap();

        if inner.domains.contains_key(&name) {
            return Err(StoreError::DomainExists(name));
        }
        let parent = match parent {
            Some(raw) => {
                let parent_name = require_name(raw, "parent domain")?;
                inner.require_domain(&parent_name)?;
                Some(parent_name)
            }
            None => None,
        };

        debug!(domain = %name, parent = ?parent, "domain created");
        inner.domains.insert(name, parent);
        Ok(())
    }

    /// Declare a resource class.
    pub fn create_resource_class(
        &self,
        class_name: &str,
        authenticatable: bool,
        unauthenticated_create_allowed: bool,
    ) -> Result<()> {
        let name = require_name(class_name, "resource class")?;
        let mut inner = self.inner.write().unwrap();

        if inner.classes.contains_key(&name) {
            return Err(StoreError::ResourceClassExists(name));
        }
        inner.classes.insert(
            name.clone(),
            ResourceClass {
                name,
                authenticatable,
                unauthenticated_create_allowed,
            },
        );
        Ok(())
    }

    /// Declare a permission name for a class.
    ///
    /// User permission names may not use the reserved `*` prefix.
    pub fn declare_permission(&self, class_name: &str, permission_name: &str) -> Result<()> {
        let class = require_name(class_name, "resource class")?;
        let permission = normalize_permission_name(permission_name);
        if permission.is_empty() {
            return Err(ValidationError::Required("permission name").into());
        }
        if is_system_name(&permission) {
            return Err(ValidationError::ReservedPermissionName(permission).into());
        }

        let mut inner = self.inner.write().unwrap();
        inner.require_class(&class)?;
        let declared = inner.class_permissions.entry(class.clone()).or_default();
        if !declared.insert(permission.clone()) {
            return Err(StoreError::PermissionExists { class, permission });
        }
        Ok(())
    }

    /// Create a resource of a class in a domain.
    pub fn create_resource(
        &self,
        id: ResourceId,
        class_name: &str,
        domain_name: &str,
    ) -> Result<()> {
        let class = require_name(class_name, "resource class")?;
        let domain = require_name(domain_name, "domain")?;

        let mut inner = self.inner.write().unwrap();
        inner.require_class(&class)?;
        inner.require_domain(&domain)?;
        if inner.resources.contains_key(&id) {
            return Err(StoreError::ResourceExists(id));
        }
        inner.resources.insert(
            id,
            Resource {
                id,
                class_name: class,
                domain_name: domain,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grant Writes (set-replace semantics; an empty set revokes)
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the accessor's direct permissions on a target resource.
    ///
    /// An `*INHERIT` grant adds an edge to the inheritance graph; a grant
    /// that would close a cycle is rejected.
    pub fn set_resource_permissions(
        &self,
        accessor: ResourceId,
        target: ResourceId,
        permissions: PermissionSet,
    ) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.require_resource(accessor)?;
        let target_class = inner.require_resource(target)?.class_name.clone();
        let class = inner.require_class(&target_class)?.clone();
        inner.check_assignable(
            &class,
            &permissions,
            "resource",
            &[names::INHERIT, names::RESET_CREDENTIALS, names::IMPERSONATE],
        )?;

        let inherits = permissions.contains_name(names::INHERIT);
        if inherits && (accessor == target || inner.inherit_reaches(target, accessor)) {
            return Err(StoreError::InheritanceCycle { accessor, target });
        }

        if inherits {
            inner.inherit_edges.entry(accessor).or_default().insert(target);
        } else if let Some(edges) = inner.inherit_edges.get_mut(&accessor) {
            edges.remove(&target);
        }

        debug!(%accessor, %target, count = permissions.len(), "resource permissions set");
        if permissions.is_empty() {
            inner.resource_grants.remove(&(accessor, target));
        } else {
            inner.resource_grants.insert((accessor, target), permissions);
        }
        Ok(())
    }

    /// Replace the accessor's create permissions for a class+domain.
    ///
    /// A non-empty set must carry the `*CREATE` gate itself.
    pub fn set_create_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
        permissions: PermissionSet,
    ) -> Result<()> {
        let class_name = require_name(class_name, "resource class")?;
        let domain = require_name(domain_name, "domain")?;

        let mut inner = self.inner.write().unwrap();
        inner.require_resource(accessor)?;
        let class = inner.require_class(&class_name)?.clone();
        inner.require_domain(&domain)?;
        inner.check_assignable(
            &class,
            &permissions,
            "create",
            &[names::CREATE, names::RESET_CREDENTIALS, names::IMPERSONATE],
        )?;
        if !permissions.is_empty() && !permissions.contains_name(names::CREATE) {
            return Err(StoreError::MissingCreateGate(class_name));
        }

        let key = (accessor, class_name, domain);
        if permissions.is_empty() {
            inner.create_grants.remove(&key);
        } else {
            inner.create_grants.insert(key, permissions);
        }
        Ok(())
    }

    /// Replace the accessor's global permissions for a class+domain.
    ///
    /// Global grants describe usage rights on member resources; the
    /// structural names (`*CREATE`, `*INHERIT`) are not assignable here.
    pub fn set_global_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
        permissions: PermissionSet,
    ) -> Result<()> {
        let class_name = require_name(class_name, "resource class")?;
        let domain = require_name(domain_name, "domain")?;

        let mut inner = self.inner.write().unwrap();
        inner.require_resource(accessor)?;
        let class = inner.require_class(&class_name)?.clone();
        inner.require_domain(&domain)?;
        inner.check_assignable(
            &class,
            &permissions,
            "global",
            &[names::RESET_CREDENTIALS, names::IMPERSONATE],
        )?;

        let key = (accessor, class_name, domain);
        if permissions.is_empty() {
            inner.global_grants.remove(&key);
        } else {
            inner.global_grants.insert(key, permissions);
        }
        Ok(())
    }

    /// Replace the accessor's domain permissions on a domain.
    pub fn set_domain_permissions(
        &self,
        accessor: ResourceId,
        domain_name: &str,
        permissions: PermissionSet,
    ) -> Result<()> {
        let domain = require_name(domain_name, "domain")?;

        let mut inner = self.inner.write().unwrap();
        inner.require_resource(accessor)?;
        inner.require_domain(&domain)?;
        for permission in permissions.iter() {
            if !DOMAIN_PERMISSION_NAMES.contains(&permission.name.as_str()) {
                return Err(ValidationError::InvalidDomainPermission(permission.name).into());
            }
        }

        let key = (accessor, domain);
        if permissions.is_empty() {
            inner.domain_grants.remove(&key);
        } else {
            inner.domain_grants.insert(key, permissions);
        }
        Ok(())
    }

    /// Replace the accessor's domain-create permissions.
    pub fn set_domain_create_permissions(
        &self,
        accessor: ResourceId,
        permissions: PermissionSet,
    ) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.require_resource(accessor)?;
        for permission in permissions.iter() {
            let allowed = permission.name == names::CREATE
                || DOMAIN_PERMISSION_NAMES.contains(&permission.name.as_str());
            if !allowed {
                return Err(StoreError::NotAssignable {
                    scope: "domain create",
                    permission: permission.name,
                });
            }
        }

        if permissions.is_empty() {
            inner.domain_create_grants.remove(&accessor);
        } else {
            inner.domain_create_grants.insert(accessor, permissions);
        }
        Ok(())
    }
}

impl Default for MemoryAccessStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessStore for MemoryAccessStore {
    fn resource_class(&self, class_name: &str) -> Result<Option<ResourceClass>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.classes.get(&normalize_name(class_name)).cloned())
    }

    fn is_permission_defined(&self, class_name: &str, permission_name: &str) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .class_permissions
            .get(&normalize_name(class_name))
            .map(|declared| declared.contains(permission_name.trim()))
            .unwrap_or(false))
    }

    fn domain_exists(&self, domain_name: &str) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.domains.contains_key(&normalize_name(domain_name)))
    }

    fn domain_parent(&self, domain_name: &str) -> Result<Option<String>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .domains
            .get(&normalize_name(domain_name))
            .cloned()
            .flatten())
    }

    fn resource(&self, id: ResourceId) -> Result<Option<Resource>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.resources.get(&id).cloned())
    }

    fn resource_permissions(
        &self,
        accessor: ResourceId,
        target: ResourceId,
    ) -> Result<PermissionSet> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .resource_grants
            .get(&(accessor, target))
            .cloned()
            .unwrap_or_default())
    }

    fn create_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
    ) -> Result<PermissionSet> {
        let inner = self.inner.read().unwrap();
        let key = (accessor, normalize_name(class_name), normalize_name(domain_name));
        Ok(inner.create_grants.get(&key).cloned().unwrap_or_default())
    }

    fn global_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
    ) -> Result<PermissionSet> {
        let inner = self.inner.read().unwrap();
        let key = (accessor, normalize_name(class_name), normalize_name(domain_name));
        Ok(inner.global_grants.get(&key).cloned().unwrap_or_default())
    }

    fn domain_permissions(
        &self,
        accessor: ResourceId,
        domain_name: &str,
    ) -> Result<PermissionSet> {
        let inner = self.inner.read().unwrap();
        let key = (accessor, normalize_name(domain_name));
        Ok(inner.domain_grants.get(&key).cloned().unwrap_or_default())
    }

    fn domain_create_permissions(&self, accessor: ResourceId) -> Result<PermissionSet> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .domain_create_grants
            .get(&accessor)
            .cloned()
            .unwrap_or_default())
    }

    fn inherit_targets(&self, accessor: ResourceId) -> Result<Vec<ResourceId>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .inherit_edges
            .get(&accessor)
            .map(|edges| edges.iter().copied().collect())
            .unwrap_or_default())
    }
}
