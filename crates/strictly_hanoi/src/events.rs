//! Events emitted by the engine for the presentation layer.
//!
//! The engine appends events as commands are processed; the presentation
//! drains them in order and reacts (animations, sounds, dialogs). Events
//! are not part of game state.

use super::action::{Move, MoveError};
use super::types::{DiskId, TowerId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A round began.
    Started {
        /// Disks in play.
        disks: usize,
        /// Round time limit in seconds.
        time_limit_secs: u64,
    },
    /// A move was accepted and applied.
    MoveAccepted {
        /// Disk that moved.
        disk: DiskId,
        /// Tower it left.
        from: TowerId,
        /// Tower it landed on.
        to: TowerId,
    },
    /// A move was refused; nothing changed.
    MoveRejected {
        /// Why the move was refused.
        reason: String,
    },
    /// The last move was taken back.
    MoveUndone {
        /// Disk that moved back.
        disk: DiskId,
        /// Tower it left.
        from: TowerId,
        /// Tower it returned to.
        to: TowerId,
    },
    /// Every disk reached the target tower.
    Won {
        /// Moves used.
        move_count: u64,
        /// Efficiency percentage.
        efficiency: f64,
    },
    /// The round ran out of time.
    TimedOut,
    /// The engine returned to idle.
    Reset,
}

impl GameEvent {
    /// Event for an applied move.
    pub fn accepted(action: Move) -> Self {
        GameEvent::MoveAccepted {
            disk: action.disk,
            from: action.from,
            to: action.to,
        }
    }

    /// Event for a reversed move; `action` is the history entry undone.
    pub fn undone(action: Move) -> Self {
        let back = action.reversed();
        GameEvent::MoveUndone {
            disk: back.disk,
            from: back.from,
            to: back.to,
        }
    }

    /// Event for a refused move.
    pub fn rejected(error: &MoveError) -> Self {
        GameEvent::MoveRejected {
            reason: error.to_string(),
        }
    }
}

/// Ordered buffer of pending events.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn emit(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Removes and returns all pending events, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = EventQueue::new();
        queue.emit(GameEvent::Started {
            disks: 3,
            time_limit_secs: 60,
        });
        queue.emit(GameEvent::TimedOut);
        assert_eq!(queue.len(), 2);

        let events = queue.drain();
        assert_eq!(events[1], GameEvent::TimedOut);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_undone_event_points_back() {
        let action = Move::new(DiskId(0), TowerId::Left, TowerId::Right);
        assert_eq!(
            GameEvent::undone(action),
            GameEvent::MoveUndone {
                disk: DiskId(0),
                from: TowerId::Right,
                to: TowerId::Left
            }
        );
    }

    #[test]
    fn test_events_serialize_with_type_tag() {
        let json = serde_json::to_value(GameEvent::accepted(Move::new(
            DiskId(1),
            TowerId::Left,
            TowerId::Middle,
        )))
        .unwrap();
        assert_eq!(json["type"], "MoveAccepted");
        assert_eq!(json["from"], "Left");
        assert_eq!(json["disk"], 1);
    }
}
