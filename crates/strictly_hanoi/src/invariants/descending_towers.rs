//! Size order invariant: every tower shrinks from bottom to top.

use super::super::round::Round;
use super::super::rules::is_descending;
use super::super::types::TowerId;
use super::Invariant;

/// Invariant: on every tower, sizes strictly decrease from bottom to top.
pub struct DescendingTowersInvariant;

impl Invariant<Round> for DescendingTowersInvariant {
    fn holds(round: &Round) -> bool {
        TowerId::ALL
            .iter()
            .all(|t| is_descending(&round.registry().sizes(*t)))
    }

    fn description() -> &'static str {
        "Every tower is strictly size-descending from bottom to top"
    }
}
