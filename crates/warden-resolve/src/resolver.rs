//! Effective permission set computation.
//!
//! An effective set is the union of grants over two independent axes:
//! every resource the accessor reaches through the inheritance graph, and
//! every domain on the ancestor chain of the query's domain coordinate.
//! The resolver reads raw grants through the store contract and performs
//! all combining here; it never mutates anything.

use tracing::trace;

use warden_core::{names, normalize_name, PermissionSet, Resource, ResourceId};
use warden_store::AccessStore;

use crate::domain::{ancestor_chain, DEFAULT_MAX_DOMAIN_DEPTH};
use crate::error::Result;
use crate::inherit::reachable_intermediaries;

/// Computes effective permission sets over a grant snapshot.
///
/// Borrowing the store keeps one resolver per resolution, so the
/// per-resolution traversal state (the visited set inside the graph walk)
/// is never cached across calls; grants may change between resolutions.
pub struct Resolver<'a, S: AccessStore> {
    store: &'a S,
    max_domain_depth: usize,
}

impl<'a, S: AccessStore> Resolver<'a, S> {
    /// Create a resolver over a store snapshot.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            max_domain_depth: DEFAULT_MAX_DOMAIN_DEPTH,
        }
    }

    /// Override the ancestor-walk hard stop.
    pub fn with_max_domain_depth(store: &'a S, max_domain_depth: usize) -> Self {
        Self {
            store,
            max_domain_depth,
        }
    }

    /// The accessor plus every intermediary it inherits from.
    fn holders(&self, accessor: ResourceId) -> Result<Vec<ResourceId>> {
        let mut holders = vec![accessor];
        holders.extend(reachable_intermediaries(self.store, accessor)?);
        Ok(holders)
    }

    /// Effective permissions on a specific target resource: direct grants
    /// on the target plus global grants for the target's class anywhere on
    /// the target's domain chain, for the accessor and every intermediary.
    pub fn effective_resource_permissions(
        &self,
        accessor: ResourceId,
        target: &Resource,
    ) -> Result<PermissionSet> {
        let domains = ancestor_chain(self.store, &target.domain_name, self.max_domain_depth)?;

        let mut effective = PermissionSet::new();
        for holder in self.holders(accessor)? {
            effective.merge(&self.store.resource_permissions(holder, target.id)?);
            for domain in &domains {
                effective.merge(&self.store.global_permissions(
                    holder,
                    &target.class_name,
                    domain,
                )?);
            }
        }

        trace!(%accessor, target = %target.id, count = effective.len(), "resource permissions resolved");
        Ok(effective)
    }

    /// Effective create permissions for a class+domain: create grants at the
    /// domain and at every ancestor, for the accessor and intermediaries.
    pub fn effective_create_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
    ) -> Result<PermissionSet> {
        let class_name = normalize_name(class_name);
        let domains = ancestor_chain(self.store, domain_name, self.max_domain_depth)?;

        let mut effective = PermissionSet::new();
        for holder in self.holders(accessor)? {
            for domain in &domains {
                effective.merge(&self.store.create_permissions(holder, &class_name, domain)?);
            }
        }
        Ok(effective)
    }

    /// Effective global permissions for a class+domain.
    pub fn effective_global_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
    ) -> Result<PermissionSet> {
        let class_name = normalize_name(class_name);
        let domains = ancestor_chain(self.store, domain_name, self.max_domain_depth)?;

        let mut effective = PermissionSet::new();
        for holder in self.holders(accessor)? {
            for domain in &domains {
                effective.merge(&self.store.global_permissions(holder, &class_name, domain)?);
            }
        }
        Ok(effective)
    }

    /// Effective domain permissions on a domain, including `*SUPER-USER`.
    pub fn effective_domain_permissions(
        &self,
        accessor: ResourceId,
        domain_name: &str,
    ) -> Result<PermissionSet> {
        let domains = ancestor_chain(self.store, domain_name, self.max_domain_depth)?;

        let mut effective = PermissionSet::new();
        for holder in self.holders(accessor)? {
            for domain in &domains {
                effective.merge(&self.store.domain_permissions(holder, domain)?);
            }
        }
        Ok(effective)
    }

    /// Effective domain-create permissions. Not scoped to a domain, so only
    /// the inheritance axis applies.
    pub fn effective_domain_create_permissions(
        &self,
        accessor: ResourceId,
    ) -> Result<PermissionSet> {
        let mut effective = PermissionSet::new();
        for holder in self.holders(accessor)? {
            effective.merge(&self.store.domain_create_permissions(holder)?);
        }
        Ok(effective)
    }

    /// The combined post-create set: effective create permissions unioned
    /// with effective global permissions, except that the `*CREATE` name is
    /// excluded from the global side. Global grants describe usage rights on
    /// member resources; they can never substitute for the create gate.
    pub fn effective_post_create_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
    ) -> Result<PermissionSet> {
        let mut effective =
            self.effective_create_permissions(accessor, class_name, domain_name)?;
        let globals = self.effective_global_permissions(accessor, class_name, domain_name)?;
        effective.merge_except(&globals, names::CREATE);
        Ok(effective)
    }

    /// Whether the accessor holds `*SUPER-USER` over a domain, directly or
    /// via inheritance, at the domain or at any of its ancestors.
    ///
    /// Both inheritance axes compose here: the effective set already spans
    /// the intermediaries, and the domain walk covers ancestors, so a
    /// super-user grant held by an intermediary on an ancestor authorizes
    /// the check.
    pub fn has_super_user(&self, accessor: ResourceId, domain_name: &str) -> Result<bool> {
        let effective = self.effective_domain_permissions(accessor, domain_name)?;
        Ok(effective.contains_name(names::SUPER_USER))
    }
}
