//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use warden::{AccessControl, Permission, PermissionSet, ResourceId};
use warden_store::MemoryAccessStore;

/// A test fixture wrapping an engine over an in-memory store.
///
/// Every created name and id is unique within the fixture, so tests can
/// build scenarios without coordinating identifiers.
pub struct TestFixture {
    warden: AccessControl<MemoryAccessStore>,
    next_id: AtomicU64,
    next_name: AtomicU64,
}

impl TestFixture {
    /// Create a new fixture with an empty store.
    pub fn new() -> Self {
        Self {
            warden: AccessControl::new(MemoryAccessStore::new()),
            next_id: AtomicU64::new(1),
            next_name: AtomicU64::new(1),
        }
    }

    /// The engine under test.
    pub fn warden(&self) -> &AccessControl<MemoryAccessStore> {
        &self.warden
    }

    /// The underlying store, for direct grant writes.
    pub fn store(&self) -> &MemoryAccessStore {
        self.warden.store()
    }

    /// Generate a fixture-unique name with the given prefix.
    pub fn unique_name(&self, prefix: &str) -> String {
        let n = self.next_name.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}_{n}")
    }

    /// Create a root domain with a unique name.
    pub fn domain(&self) -> String {
        let name = self.unique_name("dom");
        self.store().create_domain(&name, None).unwrap();
        name
    }

    /// Create a child domain of `parent` with a unique name.
    pub fn child_domain(&self, parent: &str) -> String {
        let name = self.unique_name("dom");
        self.store().create_domain(&name, Some(parent)).unwrap();
        name
    }

    /// Create a domain chain of `depth` domains, root first.
    pub fn domain_chain(&self, depth: usize) -> Vec<String> {
        let mut chain: Vec<String> = Vec::with_capacity(depth);
        for _ in 0..depth {
            let name = match chain.last() {
                Some(parent) => self.child_domain(parent),
                None => self.domain(),
            };
            chain.push(name);
        }
        chain
    }

    /// Declare an unauthenticatable resource class with a unique name.
    pub fn class(&self) -> String {
        let name = self.unique_name("class");
        self.store()
            .create_resource_class(&name, false, false)
            .unwrap();
        name
    }

    /// Declare an authenticatable resource class with a unique name.
    pub fn authenticatable_class(&self) -> String {
        let name = self.unique_name("class");
        self.store()
            .create_resource_class(&name, true, false)
            .unwrap();
        name
    }

    /// Declare a permission name for a class.
    pub fn declare(&self, class: &str, permission: &str) {
        self.store().declare_permission(class, permission).unwrap();
    }

    /// Declare a unique permission name for a class and return it.
    pub fn permission(&self, class: &str) -> String {
        let name = self.unique_name("perm");
        self.declare(class, &name);
        name
    }

    /// Create a resource of `class` in `domain` with a fresh id.
    pub fn resource(&self, class: &str, domain: &str) -> ResourceId {
        let id = ResourceId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.store().create_resource(id, class, domain).unwrap();
        id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grant Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant direct permissions on a target resource.
    pub fn grant_resource(&self, accessor: ResourceId, target: ResourceId, perms: &[Permission]) {
        self.store()
            .set_resource_permissions(accessor, target, set_of(perms))
            .unwrap();
    }

    /// Grant `*INHERIT` on a target resource, making the accessor inherit
    /// the target's effective permissions.
    pub fn inherit(&self, accessor: ResourceId, target: ResourceId) {
        self.grant_resource(
            accessor,
            target,
            &[Permission::new(warden::names::INHERIT)],
        );
    }

    /// Grant create permissions for a class+domain.
    pub fn grant_create(
        &self,
        accessor: ResourceId,
        class: &str,
        domain: &str,
        perms: &[Permission],
    ) {
        self.store()
            .set_create_permissions(accessor, class, domain, set_of(perms))
            .unwrap();
    }

    /// Grant global permissions for a class+domain.
    pub fn grant_global(
        &self,
        accessor: ResourceId,
        class: &str,
        domain: &str,
        perms: &[Permission],
    ) {
        self.store()
            .set_global_permissions(accessor, class, domain, set_of(perms))
            .unwrap();
    }

    /// Grant domain permissions on a domain.
    pub fn grant_domain(&self, accessor: ResourceId, domain: &str, perms: &[Permission]) {
        self.store()
            .set_domain_permissions(accessor, domain, set_of(perms))
            .unwrap();
    }

    /// Grant domain-create permissions.
    pub fn grant_domain_create(&self, accessor: ResourceId, perms: &[Permission]) {
        self.store()
            .set_domain_create_permissions(accessor, set_of(perms))
            .unwrap();
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a permission set from a slice.
pub fn set_of(perms: &[Permission]) -> PermissionSet {
    perms.iter().cloned().collect()
}
