//! Contract-based validation for the Tower of Hanoi.
//!
//! Contracts pair a precondition on the state and the requested action
//! with a postcondition relating the state before and after: {P} action {Q}.

use super::action::{Move, MoveError};
use super::invariants::{HanoiInvariants, InvariantSet, InvariantViolation};
use super::round::Round;
use super::rules;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Contract for moving a disk.
///
/// Preconditions:
/// - The move passes the validator for the disk and towers it names
///
/// Postconditions:
/// - All invariants hold
/// - Exactly one move was added to the history
pub struct MoveContract;

impl Contract<Round, Move> for MoveContract {
    fn pre(round: &Round, action: &Move) -> Result<(), MoveError> {
        let from = rules::validate_disk_move(round.registry(), true, action.disk, action.to)?;
        if from == action.from {
            Ok(())
        } else {
            Err(MoveError::NotTopDisk {
                disk: action.disk,
                tower: action.from,
            })
        }
    }

    fn post(before: &Round, after: &Round) -> Result<(), MoveError> {
        check_invariants(after)?;
        if after.history().len() != before.history().len() + 1 {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: a move must add exactly one history entry".to_string(),
            ));
        }
        Ok(())
    }
}

/// Contract for undoing the last move.
///
/// Preconditions:
/// - History is not empty
///
/// Postconditions:
/// - All invariants hold
/// - The history lost exactly its last entry
pub struct UndoContract;

impl Contract<Round, ()> for UndoContract {
    fn pre(round: &Round, _action: &()) -> Result<(), MoveError> {
        if round.history().is_empty() {
            Err(MoveError::EmptyHistory)
        } else {
            Ok(())
        }
    }

    fn post(before: &Round, after: &Round) -> Result<(), MoveError> {
        check_invariants(after)?;
        let expected = before.history().split_last().map(|(_, rest)| rest);
        if expected != Some(after.history()) {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: undo must drop exactly the last history entry"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Checks every invariant, folding violations into one error.
#[instrument(skip(round))]
pub fn check_invariants(round: &Round) -> Result<(), MoveError> {
    HanoiInvariants::check_all(round).map_err(|violations| {
        let descriptions = join(&violations);
        warn!(violations = %descriptions, "Invariant check failed");
        MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

fn join(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
