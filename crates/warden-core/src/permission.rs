//! Permissions and permission sets.
//!
//! A permission is a name plus a grantable bit. The name is its identity;
//! the grantable bit is a capability modifier that says whether the holder
//! may pass the permission on. Matching between a granted and a requested
//! permission is asymmetric: a grantable grant satisfies both forms of
//! request, an ungrantable grant satisfies only the ungrantable form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Permission names reserved to the system.
///
/// User-declared permission names may never start with `*`; these names are
/// attached by the grant layer itself.
pub mod names {
    /// Resource permission: the holder inherits everything the target
    /// resource can do, transitively.
    pub const INHERIT: &str = "*INHERIT";

    /// Resource permission: reset the target's credentials. Only valid for
    /// authenticatable resource classes.
    pub const RESET_CREDENTIALS: &str = "*RESET-CREDENTIALS";

    /// Resource permission: impersonate the target. Only valid for
    /// authenticatable resource classes.
    pub const IMPERSONATE: &str = "*IMPERSONATE";

    /// Create permission: the right to create resources of a class in a
    /// domain (also the name of the domain-create permission).
    pub const CREATE: &str = "*CREATE";

    /// Domain permission: every permission on every resource class within
    /// the domain and its descendants.
    pub const SUPER_USER: &str = "*SUPER-USER";

    /// Domain permission: create child domains.
    pub const CREATE_CHILD_DOMAIN: &str = "*CREATE-CHILD-DOMAIN";

    /// Domain permission: delete the domain.
    pub const DELETE: &str = "*DELETE";
}

/// Whether a permission name is reserved to the system.
pub fn is_system_name(name: &str) -> bool {
    name.starts_with('*')
}

/// The domain permission names the engine accepts.
pub const DOMAIN_PERMISSION_NAMES: &[&str] =
    &[names::SUPER_USER, names::CREATE_CHILD_DOMAIN, names::DELETE];

/// A permission: a name plus the right to re-grant it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// The permission name. Identity for set membership.
    pub name: String,

    /// Whether the holder may also grant this permission to others.
    pub grantable: bool,
}

impl Permission {
    /// An ungrantable permission.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grantable: false,
        }
    }

    /// A grantable permission.
    pub fn grantable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grantable: true,
        }
    }

    /// Whether this granted permission satisfies a requested one.
    ///
    /// Names must match, and a request for granting rights is only satisfied
    /// by a grant that carries them. The reverse direction always holds:
    /// holding the right to re-grant implies holding the underlying right.
    pub fn satisfies(&self, requested: &Permission) -> bool {
        self.name == requested.name && (self.grantable || !requested.grantable)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.grantable {
            write!(f, "{} /G", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A set of permissions keyed by name.
///
/// Two permissions with the same name are the same grant; the grantable bit
/// is not part of identity. Inserting the same name twice keeps the
/// strongest grantable bit, so unioning effective sets never weakens a
/// granting right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    entries: BTreeMap<String, bool>,
}

impl PermissionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct permission names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a permission, keeping the strongest grantable bit on collision.
    pub fn insert(&mut self, permission: Permission) {
        let grantable = self.entries.entry(permission.name).or_insert(false);
        *grantable |= permission.grantable;
    }

    /// Remove a permission by name.
    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Whether a permission with this name is present, with either
    /// grantable bit.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up a permission by name.
    pub fn get(&self, name: &str) -> Option<Permission> {
        self.entries.get(name).map(|&grantable| Permission {
            name: name.to_string(),
            grantable,
        })
    }

    /// Whether any held permission satisfies the requested one.
    pub fn contains_match(&self, requested: &Permission) -> bool {
        match self.entries.get(&requested.name) {
            Some(&grantable) => grantable || !requested.grantable,
            None => false,
        }
    }

    /// Union another set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        for (name, &grantable) in &other.entries {
            let entry = self.entries.entry(name.clone()).or_insert(false);
            *entry |= grantable;
        }
    }

    /// Union another set into this one, skipping one excluded name.
    pub fn merge_except(&mut self, other: &PermissionSet, excluded: &str) {
        for (name, &grantable) in &other.entries {
            if name == excluded {
                continue;
            }
            let entry = self.entries.entry(name.clone()).or_insert(false);
            *entry |= grantable;
        }
    }

    /// Iterate the permissions in name order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.entries.iter().map(|(name, &grantable)| Permission {
            name: name.clone(),
            grantable,
        })
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::new();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        for permission in iter {
            self.insert(permission);
        }
    }
}
