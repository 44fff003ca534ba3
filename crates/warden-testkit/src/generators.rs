//! Proptest generators for property-based testing.

use proptest::prelude::*;

use warden_core::{Permission, PermissionSet};

/// Generate a user permission name (no reserved `*` prefix).
pub fn permission_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,24}".prop_map(String::from)
}

/// Generate a domain or class name.
pub fn entity_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,31}".prop_map(String::from)
}

/// Generate a permission with a random grantable flag.
pub fn permission() -> impl Strategy<Value = Permission> {
    (permission_name(), any::<bool>()).prop_map(|(name, grantable)| Permission {
        name,
        grantable,
    })
}

/// Generate a permission set of at most `max_len` entries.
pub fn permission_set(max_len: usize) -> impl Strategy<Value = PermissionSet> {
    prop::collection::vec(permission(), 0..=max_len)
        .prop_map(|perms| perms.into_iter().collect())
}

/// Generate a list of distinct names for a domain chain, root first.
pub fn domain_chain_names(max_depth: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(entity_name(), 1..=max_depth)
        .prop_map(|names| names.into_iter().collect())
}

/// Generate edges of an acyclic inheritance graph over `nodes` resources.
///
/// Edges only point from a lower index to a higher one, so any path
/// strictly increases and cycles cannot form.
pub fn acyclic_edges(nodes: usize, max_edges: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..nodes, 0..nodes), 0..=max_edges).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(a, b)| a < b)
            .collect()
    })
}
