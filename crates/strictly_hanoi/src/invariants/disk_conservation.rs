//! Conservation invariant: every disk is on exactly one tower.

use super::super::round::Round;
use super::super::types::TowerId;
use super::Invariant;

/// Invariant: the towers together hold each disk exactly once, and the
/// disk→tower index agrees with the towers.
pub struct DiskConservationInvariant;

impl Invariant<Round> for DiskConservationInvariant {
    fn holds(round: &Round) -> bool {
        let registry = round.registry();
        let mut seen = vec![false; registry.disk_count()];

        for tower in TowerId::ALL {
            for disk in registry.tower(tower).disks() {
                match seen.get_mut(disk.index()) {
                    Some(slot) if !*slot => *slot = true,
                    _ => return false,
                }
                if registry.location_of(*disk) != Some(tower) {
                    return false;
                }
            }
        }

        seen.iter().all(|s| *s)
    }

    fn description() -> &'static str {
        "Every disk is on exactly one tower"
    }
}
