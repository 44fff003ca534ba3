//! Store trait: the abstract read contract the resolver consumes.
//!
//! The engine is storage-agnostic. It reads raw, un-combined grant sets
//! through this trait and does all combining itself; a backend never has to
//! understand inheritance or domain ancestry.

use warden_core::{PermissionSet, Resource, ResourceClass, ResourceId};

use crate::error::Result;

/// The read contract for grants, schema metadata, and hierarchy edges.
///
/// # Design Notes
///
/// - **Total grant lookups**: grant reads over valid coordinates return an
///   empty set when nothing was granted, never an error.
/// - **Normalized keys**: every name argument is already trimmed and
///   lower-cased by the caller; backends key storage by those canonical
///   names and must not re-interpret them.
/// - **Snapshot reads**: one resolution issues several reads; the backend
///   is responsible for serving them from a consistent snapshot (for a
///   transactional backend, one read transaction per resolution).
/// - **No mutation**: the resolver never writes. Write operations belong to
///   the concrete backend's own API.
pub trait AccessStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Schema Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up a resource class by normalized name.
    fn resource_class(&self, class_name: &str) -> Result<Option<ResourceClass>>;

    /// Whether a user-declared permission name exists for a class.
    ///
    /// System permission names (`*`-prefixed) are not stored here; their
    /// validity is a rule of the validation layer, not data.
    fn is_permission_defined(&self, class_name: &str, permission_name: &str) -> Result<bool>;

    /// Whether a domain with this normalized name exists.
    fn domain_exists(&self, domain_name: &str) -> Result<bool>;

    /// The parent of a domain, or `None` for a root (or unknown) domain.
    fn domain_parent(&self, domain_name: &str) -> Result<Option<String>>;

    /// Look up a resource record by id. `None` for a never-created id.
    fn resource(&self, id: ResourceId) -> Result<Option<Resource>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Grant Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Direct permissions the accessor holds on a specific target resource.
    fn resource_permissions(
        &self,
        accessor: ResourceId,
        target: ResourceId,
    ) -> Result<PermissionSet>;

    /// Create permissions the accessor holds for a class+domain coordinate,
    /// as recorded at exactly that domain (no ancestor walk).
    fn create_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
    ) -> Result<PermissionSet>;

    /// Global permissions the accessor holds for a class+domain coordinate,
    /// as recorded at exactly that domain.
    fn global_permissions(
        &self,
        accessor: ResourceId,
        class_name: &str,
        domain_name: &str,
    ) -> Result<PermissionSet>;

    /// Domain permissions (including `*SUPER-USER`) the accessor holds on
    /// a domain, as recorded at exactly that domain.
    fn domain_permissions(&self, accessor: ResourceId, domain_name: &str)
        -> Result<PermissionSet>;

    /// Domain-create permissions the accessor holds (for domains not yet
    /// created; not scoped to any domain).
    fn domain_create_permissions(&self, accessor: ResourceId) -> Result<PermissionSet>;

    // ─────────────────────────────────────────────────────────────────────────
    // Inheritance Graph Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// The resources this accessor holds `*INHERIT` on: the outgoing edges
    /// of the resource-inheritance graph.
    fn inherit_targets(&self, accessor: ResourceId) -> Result<Vec<ResourceId>>;
}
