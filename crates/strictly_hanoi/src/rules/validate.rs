//! Move legality.
//!
//! Each rule is its own check so callers and tests can reason about them
//! one at a time. The composite checks run them in a fixed order: the
//! validation switch first, then distinct towers, then top disk, then size.

use super::super::action::MoveError;
use super::super::registry::Registry;
use super::super::types::{DiskId, TowerId};
use tracing::instrument;

/// Rule: moves are only checked while validation is switched on.
pub struct ValidationEnabled;

impl ValidationEnabled {
    /// Fails with `ValidationDisabled` when moves are frozen.
    pub fn check(enabled: bool) -> Result<(), MoveError> {
        if enabled {
            Ok(())
        } else {
            Err(MoveError::ValidationDisabled)
        }
    }
}

/// Rule 1: source and destination differ.
pub struct DistinctTowers;

impl DistinctTowers {
    /// Fails with `SameTower` when both towers are the same.
    pub fn check(from: TowerId, to: TowerId) -> Result<(), MoveError> {
        if from == to {
            Err(MoveError::SameTower(from))
        } else {
            Ok(())
        }
    }
}

/// Rule 2: the source holds a disk and the moving disk is its top.
pub struct TopDisk;

impl TopDisk {
    /// Returns the top disk of `from`.
    ///
    /// When `disk` is given it must be that top disk.
    pub fn check(
        registry: &Registry,
        disk: Option<DiskId>,
        from: TowerId,
    ) -> Result<DiskId, MoveError> {
        let top = registry.top_of(from).ok_or(MoveError::EmptyTower(from))?;
        match disk {
            Some(disk) if disk != top => Err(MoveError::NotTopDisk { disk, tower: from }),
            _ => Ok(top),
        }
    }
}

/// Rule 3: the destination is empty or its top is larger than the mover.
pub struct SmallerOnLarger;

impl SmallerOnLarger {
    /// Fails with `SizeViolation` when `disk` would sit on a smaller or equal disk.
    pub fn check(registry: &Registry, disk: DiskId, to: TowerId) -> Result<(), MoveError> {
        let Some(onto) = registry.top_of(to) else {
            return Ok(());
        };
        let moving = registry.size_of(disk).ok_or(MoveError::UnknownDisk(disk))?;
        let below = registry.size_of(onto).ok_or(MoveError::UnknownDisk(onto))?;
        if moving < below {
            Ok(())
        } else {
            Err(MoveError::SizeViolation { disk, onto })
        }
    }
}

/// Validates moving the top disk of `from` onto `to`.
///
/// Pure: the registry is only read. Returns the disk that would move.
#[instrument(skip(registry))]
pub fn validate_move(
    registry: &Registry,
    enabled: bool,
    from: TowerId,
    to: TowerId,
) -> Result<DiskId, MoveError> {
    ValidationEnabled::check(enabled)?;
    DistinctTowers::check(from, to)?;
    let disk = TopDisk::check(registry, None, from)?;
    SmallerOnLarger::check(registry, disk, to)?;
    Ok(disk)
}

/// Validates moving a named disk onto `to`, wherever the disk currently is.
///
/// This is the drag-and-drop path: the caller may name a buried disk, so
/// the top-disk rule is checked against the disk's actual tower. Returns
/// the tower the disk would leave.
#[instrument(skip(registry))]
pub fn validate_disk_move(
    registry: &Registry,
    enabled: bool,
    disk: DiskId,
    to: TowerId,
) -> Result<TowerId, MoveError> {
    ValidationEnabled::check(enabled)?;
    let from = registry
        .location_of(disk)
        .ok_or(MoveError::UnknownDisk(disk))?;
    DistinctTowers::check(from, to)?;
    TopDisk::check(registry, Some(disk), from)?;
    SmallerOnLarger::check(registry, disk, to)?;
    Ok(from)
}

/// Towers the top disk of `from` may legally move to.
#[instrument(skip(registry))]
pub fn valid_destinations(registry: &Registry, enabled: bool, from: TowerId) -> Vec<TowerId> {
    TowerId::ALL
        .iter()
        .copied()
        .filter(|to| validate_move(registry, enabled, from, *to).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_after(moves: &[(TowerId, TowerId)]) -> Registry {
        let mut registry = Registry::initialize(3).unwrap();
        for (from, to) in moves {
            registry.transfer(*from, *to);
        }
        registry
    }

    #[test]
    fn test_top_of_source_onto_empty_is_legal() {
        let registry = registry_after(&[]);
        assert_eq!(
            validate_move(&registry, true, TowerId::Left, TowerId::Right),
            Ok(DiskId(0))
        );
    }

    #[test]
    fn test_same_tower_rejected_first() {
        let registry = registry_after(&[]);
        assert_eq!(
            validate_move(&registry, true, TowerId::Middle, TowerId::Middle),
            Err(MoveError::SameTower(TowerId::Middle))
        );
    }

    #[test]
    fn test_empty_source_rejected() {
        let registry = registry_after(&[]);
        assert_eq!(
            validate_move(&registry, true, TowerId::Middle, TowerId::Left),
            Err(MoveError::EmptyTower(TowerId::Middle))
        );
    }

    #[test]
    fn test_larger_on_smaller_rejected() {
        // Left holds [2, 1], Right holds [0].
        let registry = registry_after(&[(TowerId::Left, TowerId::Right)]);
        assert_eq!(
            validate_move(&registry, true, TowerId::Left, TowerId::Right),
            Err(MoveError::SizeViolation {
                disk: DiskId(1),
                onto: DiskId(0)
            })
        );
    }

    #[test]
    fn test_disabled_precedes_structural_checks() {
        let registry = registry_after(&[]);
        assert_eq!(
            validate_move(&registry, false, TowerId::Left, TowerId::Left),
            Err(MoveError::ValidationDisabled)
        );
    }

    #[test]
    fn test_buried_disk_rejected_on_drag_path() {
        let registry = registry_after(&[]);
        assert_eq!(
            validate_disk_move(&registry, true, DiskId(2), TowerId::Right),
            Err(MoveError::NotTopDisk {
                disk: DiskId(2),
                tower: TowerId::Left
            })
        );
        assert_eq!(
            validate_disk_move(&registry, true, DiskId(0), TowerId::Right),
            Ok(TowerId::Left)
        );
        assert_eq!(
            validate_disk_move(&registry, true, DiskId(5), TowerId::Right),
            Err(MoveError::UnknownDisk(DiskId(5)))
        );
    }

    #[test]
    fn test_valid_destinations() {
        let registry = registry_after(&[(TowerId::Left, TowerId::Right)]);
        assert_eq!(
            valid_destinations(&registry, true, TowerId::Left),
            vec![TowerId::Middle]
        );
        assert_eq!(
            valid_destinations(&registry, true, TowerId::Right),
            vec![TowerId::Left, TowerId::Middle]
        );
        assert!(valid_destinations(&registry, false, TowerId::Right).is_empty());
    }
}
