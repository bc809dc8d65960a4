//! Win detection for the Tower of Hanoi.

use super::super::registry::Registry;
use super::super::types::TowerId;
use tracing::instrument;

/// Checks if the target tower holds every disk, largest at the bottom.
///
/// The count alone is not trusted: the order is walked as well.
#[instrument(skip(registry))]
pub fn is_solved(registry: &Registry, target: TowerId) -> bool {
    let tower = registry.tower(target);
    tower.len() == registry.disk_count() && is_descending(&registry.sizes(target))
}

/// Checks that sizes strictly decrease from bottom to top.
pub fn is_descending(sizes: &[usize]) -> bool {
    sizes.windows(2).all(|pair| pair[0] > pair[1])
}
