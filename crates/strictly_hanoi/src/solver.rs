//! Optimal three-tower solution.
//!
//! Independent of any running round: the solver only enumerates moves.

use super::action::{Move, MoveError};
use super::types::{DiskId, TowerId};
use crate::MAX_DISKS;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One step of the optimal solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionStep {
    /// 1-based step number.
    pub step: u64,
    /// The move to make.
    pub action: Move,
}

impl std::fmt::Display for SolutionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Move disk {} from {} to {}",
            self.action.disk.number(),
            self.action.from.letter(),
            self.action.to.letter()
        )
    }
}

/// Enumerates the optimal moves for `n` disks from the source tower to the
/// target tower.
///
/// Produces exactly 2^n − 1 steps.
///
/// # Errors
///
/// Returns `MoveError::InvalidDiskCount` unless `1 <= n <= MAX_DISKS`.
#[instrument]
pub fn solve(n: usize) -> Result<Vec<SolutionStep>, MoveError> {
    if !(1..=MAX_DISKS).contains(&n) {
        return Err(MoveError::InvalidDiskCount(n));
    }

    let mut moves = Vec::with_capacity(super::rules::min_moves(n) as usize);
    transfer(n, TowerId::SOURCE, TowerId::Middle, TowerId::TARGET, &mut moves);
    debug!(steps = moves.len(), "Solution computed");

    Ok(moves
        .into_iter()
        .zip(1..)
        .map(|(action, step)| SolutionStep { step, action })
        .collect())
}

/// Moves the `n` smallest disks from `origin` to `destination`.
fn transfer(
    n: usize,
    origin: TowerId,
    auxiliary: TowerId,
    destination: TowerId,
    moves: &mut Vec<Move>,
) {
    if n == 0 {
        return;
    }
    transfer(n - 1, origin, destination, auxiliary, moves);
    moves.push(Move::new(DiskId(n - 1), origin, destination));
    transfer(n - 1, auxiliary, origin, destination, moves);
}
