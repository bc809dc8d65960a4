//! Disk registry and tower stacks.
//!
//! The registry owns the canonical disk set and the three towers. A
//! disk→tower index is kept in step with every push and pop so that
//! `location_of` never scans the towers.

use super::action::MoveError;
use super::types::{Disk, DiskId, Tower, TowerId};
use crate::MAX_DISKS;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Disks and their placement on the three towers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    disks: Vec<Disk>,
    towers: [Tower; 3],
    locations: Vec<TowerId>,
}

impl Registry {
    /// Creates `n` disks stacked on the source tower, largest at the bottom.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::InvalidDiskCount` unless `1 <= n <= MAX_DISKS`.
    #[instrument]
    pub fn initialize(n: usize) -> Result<Self, MoveError> {
        if !(1..=MAX_DISKS).contains(&n) {
            return Err(MoveError::InvalidDiskCount(n));
        }

        let disks: Vec<Disk> = (0..n).map(|i| Disk::new(DiskId(i), i)).collect();
        let mut towers: [Tower; 3] = Default::default();
        for disk in disks.iter().rev() {
            towers[TowerId::SOURCE.index()].push(disk.id());
        }

        debug!(disks = n, "Registry initialized");
        Ok(Self {
            disks,
            towers,
            locations: vec![TowerId::SOURCE; n],
        })
    }

    /// Number of disks in the game.
    pub fn disk_count(&self) -> usize {
        self.disks.len()
    }

    /// Looks up a disk.
    pub fn disk(&self, id: DiskId) -> Option<&Disk> {
        self.disks.get(id.index())
    }

    /// Size rank of a disk.
    pub fn size_of(&self, id: DiskId) -> Option<usize> {
        self.disk(id).map(Disk::size)
    }

    /// All disks, by identifier.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// Returns a tower.
    pub fn tower(&self, tower: TowerId) -> &Tower {
        &self.towers[tower.index()]
    }

    /// All three towers, left to right.
    pub fn towers(&self) -> &[Tower; 3] {
        &self.towers
    }

    /// Top disk of a tower, or `None` when the tower is empty.
    pub fn top_of(&self, tower: TowerId) -> Option<DiskId> {
        self.tower(tower).top()
    }

    /// Tower currently holding a disk.
    pub fn location_of(&self, disk: DiskId) -> Option<TowerId> {
        self.locations.get(disk.index()).copied()
    }

    /// Size ranks of a tower, bottom to top.
    pub fn sizes(&self, tower: TowerId) -> Vec<usize> {
        self.tower(tower)
            .disks()
            .iter()
            .filter_map(|d| self.size_of(*d))
            .collect()
    }

    /// Moves the top disk of `from` onto `to` without checking the rules.
    ///
    /// Returns the disk that moved, or `None` if `from` was empty.
    pub(crate) fn transfer(&mut self, from: TowerId, to: TowerId) -> Option<DiskId> {
        let disk = self.towers[from.index()].pop()?;
        self.towers[to.index()].push(disk);
        if let Some(slot) = self.locations.get_mut(disk.index()) {
            *slot = to;
        }
        Some(disk)
    }

    #[cfg(test)]
    pub(crate) fn towers_mut(&mut self) -> &mut [Tower; 3] {
        &mut self.towers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_stacks_largest_at_bottom() {
        let registry = Registry::initialize(4).unwrap();
        assert_eq!(registry.sizes(TowerId::Left), vec![3, 2, 1, 0]);
        assert!(registry.tower(TowerId::Middle).is_empty());
        assert!(registry.tower(TowerId::Right).is_empty());
        assert_eq!(registry.top_of(TowerId::Left), Some(DiskId(0)));
        assert_eq!(registry.top_of(TowerId::Right), None);
    }

    #[test]
    fn test_initialize_rejects_out_of_range() {
        assert_eq!(Registry::initialize(0), Err(MoveError::InvalidDiskCount(0)));
        assert_eq!(
            Registry::initialize(MAX_DISKS + 1),
            Err(MoveError::InvalidDiskCount(MAX_DISKS + 1))
        );
        assert!(Registry::initialize(MAX_DISKS).is_ok());
    }

    #[test]
    fn test_transfer_updates_location_index() {
        let mut registry = Registry::initialize(3).unwrap();
        assert_eq!(registry.location_of(DiskId(0)), Some(TowerId::Left));

        let moved = registry.transfer(TowerId::Left, TowerId::Right);
        assert_eq!(moved, Some(DiskId(0)));
        assert_eq!(registry.location_of(DiskId(0)), Some(TowerId::Right));
        assert_eq!(registry.top_of(TowerId::Left), Some(DiskId(1)));
        assert_eq!(registry.location_of(DiskId(9)), None);
    }

    #[test]
    fn test_transfer_from_empty_tower_is_noop() {
        let mut registry = Registry::initialize(2).unwrap();
        let before = registry.clone();
        assert_eq!(registry.transfer(TowerId::Middle, TowerId::Left), None);
        assert_eq!(registry, before);
    }
}
