//! Serializable view of the engine for presentation layers.

use super::engine::Engine;
use super::phases::{Phase, Rating};
use super::types::TowerId;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Everything a presentation layer reads back from the engine.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current phase.
    phase: Phase,
    /// Size ranks of each tower, bottom to top, left to right.
    towers: [Vec<usize>; 3],
    /// Disks in play.
    disk_count: usize,
    /// Moves counted in this round.
    move_count: u64,
    /// Entries available to undo.
    history_len: usize,
    /// Minimal moves for the disk count.
    min_moves_required: u64,
    /// Round time limit in seconds.
    time_limit_secs: u64,
    /// True while a move is being presented.
    busy: bool,
    /// Efficiency percentage once won.
    #[serde(skip_serializing_if = "Option::is_none")]
    efficiency: Option<f64>,
    /// Verdict once won.
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<Rating>,
}

impl Snapshot {
    /// Size ranks of one tower, bottom to top.
    pub fn tower(&self, tower: TowerId) -> &[usize] {
        &self.towers[tower.index()]
    }

    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&Engine> for Snapshot {
    fn from(engine: &Engine) -> Self {
        Self {
            phase: engine.phase(),
            towers: TowerId::ALL.map(|t| engine.tower_sizes(t)),
            disk_count: engine.disk_count(),
            move_count: engine.move_count(),
            history_len: engine.history_len(),
            min_moves_required: engine.min_moves_required(),
            time_limit_secs: engine.time_limit_secs(),
            busy: engine.is_busy(),
            efficiency: engine.efficiency(),
            rating: engine.rating(),
        }
    }
}
