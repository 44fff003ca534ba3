//! Domain ancestry walks.
//!
//! Domain-scoped grants recorded at an ancestor are visible at every
//! descendant, so a query at domain D unions grants at D with grants at
//! every ancestor of D. There is no downward direction: a grant at a child
//! never applies to the parent.

use tracing::trace;

use warden_core::{normalize_name, ValidationError};
use warden_store::AccessStore;

use crate::error::{ResolveError, Result};

/// Default hard stop for the ancestor walk.
///
/// The domain forest is acyclic by write-layer invariant; the limit only
/// defends against a store serving a corrupted parent chain.
pub const DEFAULT_MAX_DOMAIN_DEPTH: usize = 1024;

/// The chain of domains from `domain_name` up to its root, inclusive,
/// starting with the domain itself.
///
/// Querying an unknown domain is a referential error, not an empty chain.
pub fn ancestor_chain<S: AccessStore>(
    store: &S,
    domain_name: &str,
    limit: usize,
) -> Result<Vec<String>> {
    let domain = normalize_name(domain_name);
    if !store.domain_exists(&domain)? {
        return Err(ValidationError::UnknownDomain(domain).into());
    }

    let mut chain = vec![domain.clone()];
    let mut current = domain.clone();
    while let Some(parent) = store.domain_parent(&current)? {
        if chain.len() >= limit {
            return Err(ResolveError::DepthExceeded { domain, limit });
        }
        chain.push(parent.clone());
        current = parent;
    }

    trace!(domain = %domain, depth = chain.len(), "ancestor chain resolved");
    Ok(chain)
}

/// Whether `ancestor` is on `descendant`'s ancestor chain.
///
/// The chain is inclusive, so every domain is an ancestor of itself. This
/// is the convention the super-user walk needs: a grant at the queried
/// domain covers the queried domain.
pub fn is_ancestor<S: AccessStore>(
    store: &S,
    ancestor: &str,
    descendant: &str,
    limit: usize,
) -> Result<bool> {
    let ancestor = normalize_name(ancestor);
    if !store.domain_exists(&ancestor)? {
        return Err(ValidationError::UnknownDomain(ancestor).into());
    }
    let chain = ancestor_chain(store, descendant, limit)?;
    Ok(chain.iter().any(|name| name == &ancestor))
}
