//! First-class action types for the Tower of Hanoi.
//!
//! A move is a domain event: the disk that travelled and the two towers it
//! travelled between. Moves are recorded in history, replayed by the solver
//! and reversed by undo.

use super::phases::Phase;
use super::types::{DiskId, TowerId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A disk moving from one tower to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The disk being moved.
    pub disk: DiskId,
    /// The tower the disk leaves.
    pub from: TowerId,
    /// The tower the disk lands on.
    pub to: TowerId,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(disk: DiskId, from: TowerId, to: TowerId) -> Self {
        Self { disk, from, to }
    }

    /// Returns the move that undoes this one.
    pub fn reversed(&self) -> Self {
        Self {
            disk: self.disk,
            from: self.to,
            to: self.from,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "disk {}: {} -> {}",
            self.disk.number(),
            self.from.letter(),
            self.to.letter()
        )
    }
}

/// Error that can occur when validating or applying a command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Source and destination are the same tower.
    #[display("Cannot move a disk onto the tower it is already on ({})", _0)]
    SameTower(#[error(not(source))] TowerId),

    /// The named disk is not the top of its tower.
    #[display("Only the top disk can be moved: disk {} is buried on {}", disk.number(), tower)]
    NotTopDisk {
        /// Disk that was asked to move.
        disk: DiskId,
        /// Tower holding the disk.
        tower: TowerId,
    },

    /// The source tower has no disk to move.
    #[display("Tower {} has no disk to move", _0)]
    EmptyTower(#[error(not(source))] TowerId),

    /// The moving disk is not smaller than the destination's top disk.
    #[display("Cannot place disk {} on the smaller disk {}", disk.number(), onto.number())]
    SizeViolation {
        /// Disk that was asked to move.
        disk: DiskId,
        /// Top disk of the destination tower.
        onto: DiskId,
    },

    /// Moves are frozen (the round timed out).
    #[display("Moves are disabled")]
    ValidationDisabled,

    /// Undo requested with nothing to undo.
    #[display("No moves to undo")]
    EmptyHistory,

    /// Disk count outside the supported range.
    #[display("Invalid disk count {} (must be 1-{})", _0, crate::MAX_DISKS)]
    InvalidDiskCount(#[error(not(source))] usize),

    /// Text that does not name a tower.
    #[display("Invalid tower {:?} (use 0-2, A-C or left/middle/right)", _0)]
    InvalidTower(#[error(not(source))] String),

    /// Disk identifier not present in the current game.
    #[display("No disk {} in this game", _0.number())]
    UnknownDisk(#[error(not(source))] DiskId),

    /// Command issued in a phase that does not accept it.
    #[display("Expected the game to be {}, but it is {}", expected, actual)]
    WrongPhase {
        /// Phase the command requires.
        expected: Phase,
        /// Phase the game is in.
        actual: Phase,
    },

    /// Time-out reported before the limit elapsed.
    #[display("Time limit not reached ({}s of {}s elapsed)", elapsed, limit)]
    TimeRemaining {
        /// Seconds elapsed in the round.
        elapsed: u64,
        /// Round time limit in seconds.
        limit: u64,
    },

    /// A previous move is still being presented.
    #[display("A move is already in progress")]
    Busy,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}
