//! Round phases and end-of-round outcomes.

use serde::{Deserialize, Serialize};

/// Phase of a round.
///
/// `Idle` → `Active` → (`Won` | `TimedOut`) → `Idle` on reset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum Phase {
    /// No round running.
    #[default]
    Idle,
    /// Round running; moves accepted.
    Active,
    /// Every disk reached the target tower.
    Won,
    /// The time limit elapsed first. Moves are frozen.
    TimedOut,
}

/// Verdict shown with a win, based on efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Rating {
    /// Solved in the minimal number of moves.
    Perfect,
    /// At least 90% efficient.
    Excellent,
    /// At least 70% efficient.
    Good,
    /// Anything slower.
    #[strum(serialize = "Try again")]
    TryAgain,
}

impl Rating {
    /// Rates a finished round.
    pub fn from_score(move_count: u64, min_moves: u64, efficiency: f64) -> Self {
        if move_count == min_moves {
            Rating::Perfect
        } else if efficiency >= 90.0 {
            Rating::Excellent
        } else if efficiency >= 70.0 {
            Rating::Good
        } else {
            Rating::TryAgain
        }
    }

    /// Message shown to the player.
    pub fn message(self) -> &'static str {
        match self {
            Rating::Perfect => "Perfect! You found the optimal solution!",
            Rating::Excellent => "Excellent! A very efficient solution.",
            Rating::Good => "Good work! A reasonable solution.",
            Rating::TryAgain => "Try again to find a more efficient solution!",
        }
    }
}
