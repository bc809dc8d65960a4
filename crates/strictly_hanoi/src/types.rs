//! Core domain types for the Tower of Hanoi.

use crate::action::MoveError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Identifier of a disk.
///
/// Disks are numbered from zero; the registry gives disk `i` size rank `i`,
/// so the identifier doubles as the size rank for freshly initialized games.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("{}", _0)]
pub struct DiskId(pub usize);

impl DiskId {
    /// Returns the raw index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the 1-based number used when talking to players.
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

/// One of the three towers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerId {
    /// Leftmost tower (index 0), where every round starts.
    Left,
    /// Middle tower (index 1).
    Middle,
    /// Rightmost tower (index 2), the goal.
    Right,
}

impl TowerId {
    /// All three towers, left to right.
    pub const ALL: [TowerId; 3] = [TowerId::Left, TowerId::Middle, TowerId::Right];

    /// Tower every round starts on.
    pub const SOURCE: TowerId = TowerId::Left;

    /// Tower that must hold every disk to win.
    pub const TARGET: TowerId = TowerId::Right;

    /// Converts to the tower index (0-2).
    pub fn index(self) -> usize {
        match self {
            TowerId::Left => 0,
            TowerId::Middle => 1,
            TowerId::Right => 2,
        }
    }

    /// Creates a tower from its index.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TowerId::Left),
            1 => Some(TowerId::Middle),
            2 => Some(TowerId::Right),
            _ => None,
        }
    }

    /// Letter used in solution listings (A, B, C).
    pub fn letter(self) -> char {
        match self {
            TowerId::Left => 'A',
            TowerId::Middle => 'B',
            TowerId::Right => 'C',
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            TowerId::Left => "Left",
            TowerId::Middle => "Middle",
            TowerId::Right => "Right",
        }
    }
}

impl std::fmt::Display for TowerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.letter())
    }
}

impl FromStr for TowerId {
    type Err = MoveError;

    /// Parses an index (`0`-`2`), a letter (`a`-`c`) or a label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| MoveError::InvalidTower(trimmed.to_string()));
        }

        let lower = trimmed.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| {
                lower == t.label().to_lowercase()
                    || lower == t.letter().to_ascii_lowercase().to_string()
            })
            .ok_or_else(|| MoveError::InvalidTower(trimmed.to_string()))
    }
}

/// A disk with its immutable size rank (0 = smallest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disk {
    id: DiskId,
    size: usize,
}

/// Size descriptions from smallest to largest.
const SIZE_LABELS: [&str; 8] = [
    "Tiny",
    "Small",
    "Medium-small",
    "Medium",
    "Medium-large",
    "Large",
    "Very large",
    "Huge",
];

impl Disk {
    /// Creates a disk.
    pub fn new(id: DiskId, size: usize) -> Self {
        Self { id, size }
    }

    /// Returns the disk identifier.
    pub fn id(&self) -> DiskId {
        self.id
    }

    /// Returns the size rank.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Describes the disk's size relative to a set of `disk_count` disks.
    ///
    /// The smallest disk is always "Tiny" and, with more than one disk,
    /// the largest is always "Huge".
    pub fn size_label(&self, disk_count: usize) -> &'static str {
        let span = disk_count.saturating_sub(1).max(1);
        let last = SIZE_LABELS.len() - 1;
        let index = (self.size.min(span) * last) / span;
        SIZE_LABELS[index]
    }
}

/// A tower: disk identifiers ordered bottom to top.
///
/// The last element is the top disk, the only one that may move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tower {
    disks: Vec<DiskId>,
}

impl Tower {
    /// Creates an empty tower.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the top disk, if any.
    pub fn top(&self) -> Option<DiskId> {
        self.disks.last().copied()
    }

    /// Number of disks on the tower.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Returns true if the tower holds no disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Disks bottom to top.
    pub fn disks(&self) -> &[DiskId] {
        &self.disks
    }

    pub(crate) fn push(&mut self, disk: DiskId) {
        self.disks.push(disk);
    }

    pub(crate) fn pop(&mut self) -> Option<DiskId> {
        self.disks.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tower_index_roundtrip() {
        for tower in TowerId::ALL {
            assert_eq!(TowerId::from_index(tower.index()), Some(tower));
        }
        assert_eq!(TowerId::from_index(3), None);
    }

    #[test]
    fn test_tower_parse_accepts_index_letter_and_label() {
        assert_eq!("0".parse::<TowerId>(), Ok(TowerId::Left));
        assert_eq!("b".parse::<TowerId>(), Ok(TowerId::Middle));
        assert_eq!(" Right ".parse::<TowerId>(), Ok(TowerId::Right));
        assert_eq!(
            "7".parse::<TowerId>(),
            Err(MoveError::InvalidTower("7".to_string()))
        );
        assert!("west".parse::<TowerId>().is_err());
    }

    #[test]
    fn test_size_labels_span_smallest_to_largest() {
        let tiny = Disk::new(DiskId(0), 0);
        let huge = Disk::new(DiskId(7), 7);
        assert_eq!(tiny.size_label(8), "Tiny");
        assert_eq!(huge.size_label(8), "Huge");
        assert_eq!(Disk::new(DiskId(3), 3).size_label(8), "Medium");
        assert_eq!(Disk::new(DiskId(2), 2).size_label(3), "Huge");
        assert_eq!(tiny.size_label(1), "Tiny");
    }

    #[test]
    fn test_tower_stack_discipline() {
        let mut tower = Tower::new();
        assert_eq!(tower.top(), None);
        tower.push(DiskId(2));
        tower.push(DiskId(0));
        assert_eq!(tower.top(), Some(DiskId(0)));
        assert_eq!(tower.pop(), Some(DiskId(0)));
        assert_eq!(tower.disks(), &[DiskId(2)]);
    }
}
