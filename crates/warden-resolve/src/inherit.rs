//! Resource-inheritance graph traversal.
//!
//! An `*INHERIT` grant is a directed edge from an accessor to an
//! intermediary: the accessor acquires everything the intermediary can do,
//! directly or in turn inherited. Reachability is transitive and points
//! outward only.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use warden_core::ResourceId;
use warden_store::AccessStore;

use crate::error::Result;

/// Every resource reachable from `accessor` via one or more `*INHERIT`
/// edges, excluding the accessor itself.
///
/// Breadth-first with a visited set. Cycles are a write-layer invariant
/// violation, but the visited set guarantees termination regardless of what
/// the store serves.
pub fn reachable_intermediaries<S: AccessStore>(
    store: &S,
    accessor: ResourceId,
) -> Result<Vec<ResourceId>> {
    let mut visited = HashSet::from([accessor]);
    let mut queue: VecDeque<ResourceId> = store.inherit_targets(accessor)?.into();
    let mut reachable = Vec::new();

    while let Some(intermediary) = queue.pop_front() {
        if !visited.insert(intermediary) {
            continue;
        }
        reachable.push(intermediary);
        queue.extend(store.inherit_targets(intermediary)?);
    }

    trace!(%accessor, count = reachable.len(), "inheritance graph traversed");
    Ok(reachable)
}
