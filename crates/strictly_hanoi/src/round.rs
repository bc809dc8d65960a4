//! State of one running round.
//!
//! A `Round` exists only between `start` and `reset`; the engine holds
//! `None` while idle, so an idle engine cannot carry stale towers or history.

use super::action::{Move, MoveError};
use super::registry::Registry;
use super::rules;
use super::types::TowerId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Towers, history and counters of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub(crate) registry: Registry,
    pub(crate) history: Vec<Move>,
    pub(crate) move_count: u64,
    pub(crate) min_moves: u64,
    pub(crate) time_limit_secs: u64,
}

impl Round {
    /// Starts a round with `n` disks on the source tower.
    #[instrument]
    pub fn new(n: usize, time_limit_secs: u64) -> Result<Self, MoveError> {
        let registry = Registry::initialize(n)?;
        Ok(Self {
            registry,
            history: Vec::new(),
            move_count: 0,
            min_moves: rules::min_moves(n),
            time_limit_secs,
        })
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves currently counted.
    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    /// Minimal number of moves for this disk count.
    pub fn min_moves(&self) -> u64 {
        self.min_moves
    }

    /// Round time limit in seconds.
    pub fn time_limit_secs(&self) -> u64 {
        self.time_limit_secs
    }

    /// Returns true if every disk sits on the target tower in order.
    pub fn is_solved(&self) -> bool {
        rules::is_solved(&self.registry, TowerId::TARGET)
    }

    /// Applies a move the caller has already validated.
    pub(crate) fn apply(&mut self, from: TowerId, to: TowerId) -> Option<Move> {
        let disk = self.registry.transfer(from, to)?;
        let action = Move::new(disk, from, to);
        self.history.push(action);
        self.move_count += 1;
        debug!(%action, move_count = self.move_count, "Move applied");
        Some(action)
    }

    /// Reverses the most recent move.
    ///
    /// The disk is taken from the top of the tower it landed on and put back
    /// on top of the tower it came from. Returns the reversed entry.
    pub(crate) fn revert(&mut self) -> Result<Move, MoveError> {
        let last = *self.history.last().ok_or(MoveError::EmptyHistory)?;
        if self.registry.top_of(last.to) != Some(last.disk) {
            return Err(MoveError::InvariantViolation(format!(
                "history says disk {} is on top of {}",
                last.disk.number(),
                last.to
            )));
        }
        self.registry.transfer(last.to, last.from);
        self.history.pop();
        self.move_count = self.move_count.saturating_sub(1);
        debug!(action = %last, move_count = self.move_count, "Move reverted");
        Ok(last)
    }

    /// Rebuilds a round by replaying moves from the initial position.
    ///
    /// Every move is validated; the first illegal one is reported.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(n: usize, moves: &[Move]) -> Result<Self, MoveError> {
        let mut round = Self::new(n, 0)?;
        for action in moves {
            let from = rules::validate_disk_move(&round.registry, true, action.disk, action.to)?;
            if from != action.from {
                return Err(MoveError::NotTopDisk {
                    disk: action.disk,
                    tower: action.from,
                });
            }
            round.apply(action.from, action.to);
        }
        Ok(round)
    }

    /// Size ranks of each tower, bottom to top.
    pub fn tower_sizes(&self) -> [Vec<usize>; 3] {
        TowerId::ALL.map(|t| self.registry.sizes(t))
    }
}
