//! Strictly Hanoi - Tower of Hanoi rules engine
//!
//! Pure game logic: no rendering, timing or I/O. A presentation layer owns
//! an [`Engine`], feeds it commands, reads back tower contents and counts,
//! and drains [`GameEvent`]s to drive animations and feedback.
//!
//! # Architecture
//!
//! - **Registry**: disks with fixed size ranks, three towers, disk→tower index
//! - **Rules**: move validation, win detection, scoring
//! - **Invariants & contracts**: properties checked after every transition
//!   in debug builds
//! - **Engine**: `Idle` → `Active` → `Won` | `TimedOut` state machine
//! - **Solver**: the optimal 2^n − 1 move sequence
//!
//! # Example
//!
//! ```
//! use strictly_hanoi::{Engine, Phase, TowerId};
//!
//! let mut engine = Engine::new();
//! engine.start(1, 60)?;
//! engine.request_move(TowerId::Left, TowerId::Right)?;
//! assert_eq!(engine.phase(), Phase::Won);
//! assert_eq!(engine.efficiency(), Some(100.0));
//! # Ok::<(), strictly_hanoi::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod engine;
mod events;
pub mod invariants;
mod phases;
mod registry;
mod round;
pub mod rules;
mod snapshot;
mod solver;
mod types;

/// Largest supported disk count.
pub const MAX_DISKS: usize = 10;

pub use action::{Move, MoveError};
pub use contracts::{Contract, MoveContract, UndoContract, check_invariants};
pub use engine::{Command, Engine};
pub use events::{EventQueue, GameEvent};
pub use invariants::{HanoiInvariants, Invariant, InvariantSet, InvariantViolation};
pub use phases::{Phase, Rating};
pub use registry::Registry;
pub use round::Round;
pub use snapshot::Snapshot;
pub use solver::{SolutionStep, solve};
pub use types::{Disk, DiskId, Tower, TowerId};
