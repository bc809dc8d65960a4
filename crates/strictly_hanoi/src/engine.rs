//! Tower of Hanoi game engine.
//!
//! The engine is a plain value owned by the presentation layer. Every
//! mutating operation takes `&mut self` and completes synchronously; on top
//! of that, a busy flag lets the presentation hold off new moves while it
//! is still animating the previous one.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract, UndoContract};
use super::events::{EventQueue, GameEvent};
use super::phases::{Phase, Rating};
use super::round::Round;
use super::rules;
use super::snapshot::Snapshot;
use super::types::{DiskId, TowerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A command for the engine.
///
/// Presentation layers that queue input apply commands one at a time
/// through [`Engine::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Start a round.
    Start {
        /// Disks in play.
        disks: usize,
        /// Time limit in seconds.
        time_limit_secs: u64,
    },
    /// Move the top disk of one tower onto another.
    Move {
        /// Source tower.
        from: TowerId,
        /// Destination tower.
        to: TowerId,
    },
    /// Move a named disk (drag and drop).
    MoveDisk {
        /// Disk being dragged.
        disk: DiskId,
        /// Tower it is dropped on.
        to: TowerId,
    },
    /// Take back the last move.
    Undo,
    /// Report elapsed time; ends the round if the limit is reached.
    TimeExpire {
        /// Seconds elapsed since start.
        elapsed_secs: u64,
    },
    /// Abandon everything and go idle.
    Reset,
}

/// Tower of Hanoi game engine.
#[derive(Debug, Clone)]
pub struct Engine {
    phase: Phase,
    round: Option<Round>,
    validation_enabled: bool,
    busy: bool,
    events: EventQueue,
}

impl Engine {
    /// Creates an idle engine.
    #[instrument]
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            round: None,
            validation_enabled: true,
            busy: false,
            events: EventQueue::new(),
        }
    }

    /// Applies a command.
    ///
    /// Moves report the disk that moved; other commands report `None`.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn dispatch(&mut self, command: Command) -> Result<Option<Move>, MoveError> {
        match command {
            Command::Start {
                disks,
                time_limit_secs,
            } => self.start(disks, time_limit_secs).map(|_| None),
            Command::Move { from, to } => self.request_move(from, to).map(Some),
            Command::MoveDisk { disk, to } => self.move_disk(disk, to).map(Some),
            Command::Undo => self.undo().map(Some),
            Command::TimeExpire { elapsed_secs } => self.time_expire(elapsed_secs).map(|_| None),
            Command::Reset => {
                self.reset();
                Ok(None)
            }
        }
    }

    /// Starts a round with `n` disks on the left tower.
    ///
    /// # Errors
    ///
    /// - `WrongPhase` unless the engine is idle
    /// - `InvalidDiskCount` unless `1 <= n <= MAX_DISKS`
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn start(&mut self, n: usize, time_limit_secs: u64) -> Result<(), MoveError> {
        self.expect_phase(Phase::Idle)?;
        let round = Round::new(n, time_limit_secs)?;

        info!(
            disks = n,
            time_limit_secs,
            min_moves = round.min_moves(),
            "Round started"
        );
        self.round = Some(round);
        self.phase = Phase::Active;
        self.validation_enabled = true;
        self.busy = false;
        self.events.emit(GameEvent::Started {
            disks: n,
            time_limit_secs,
        });
        Ok(())
    }

    /// Moves the top disk of `from` onto `to`.
    ///
    /// On failure nothing changes and a `MoveRejected` event is emitted.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn request_move(&mut self, from: TowerId, to: TowerId) -> Result<Move, MoveError> {
        let result = self.try_move(None, from, to);
        self.settle_move(result)
    }

    /// Moves a named disk onto `to` (drag and drop).
    ///
    /// Only the top disk of a tower may move; naming a buried disk fails
    /// with `NotTopDisk`.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn move_disk(&mut self, disk: DiskId, to: TowerId) -> Result<Move, MoveError> {
        let from = self.active_round().and_then(|round| {
            rules::validate_disk_move(round.registry(), self.validation_enabled, disk, to)
        });
        let result = from.and_then(|from| self.try_move(Some(disk), from, to));
        self.settle_move(result)
    }

    /// Takes back the most recent move.
    ///
    /// # Errors
    ///
    /// - `WrongPhase` unless a round is active
    /// - `Busy` while a move is being presented
    /// - `EmptyHistory` when there is nothing to undo
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        self.expect_phase(Phase::Active)?;
        if self.busy {
            return Err(MoveError::Busy);
        }
        let round = self.round.as_mut().ok_or(MoveError::WrongPhase {
            expected: Phase::Active,
            actual: Phase::Idle,
        })?;
        UndoContract::pre(round, &())?;

        #[cfg(debug_assertions)]
        let before = round.clone();

        let undone = round.revert()?;

        #[cfg(debug_assertions)]
        {
            let outcome = UndoContract::post(&before, round);
            restore_on_violation(round, before, outcome)?;
        }

        debug!(action = %undone, move_count = round.move_count(), "Move undone");
        self.events.emit(GameEvent::undone(undone));
        Ok(undone)
    }

    /// Ends the round if `elapsed_secs` has reached the time limit.
    ///
    /// The towers are frozen: validation is switched off and further moves
    /// fail with `WrongPhase`.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn time_expire(&mut self, elapsed_secs: u64) -> Result<(), MoveError> {
        self.expect_phase(Phase::Active)?;
        let limit = self.time_limit_secs();
        if elapsed_secs < limit {
            return Err(MoveError::TimeRemaining {
                elapsed: elapsed_secs,
                limit,
            });
        }

        info!(elapsed_secs, limit, "Round timed out");
        self.phase = Phase::TimedOut;
        self.validation_enabled = false;
        self.busy = false;
        self.events.emit(GameEvent::TimedOut);
        Ok(())
    }

    /// Returns to idle from any phase, discarding the round.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset(&mut self) {
        info!("Engine reset");
        self.phase = Phase::Idle;
        self.round = None;
        self.validation_enabled = true;
        self.busy = false;
        self.events.emit(GameEvent::Reset);
    }

    /// Marks a move as being presented; moves and undo fail with `Busy`
    /// until [`Engine::end_transition`].
    pub fn begin_transition(&mut self) {
        self.busy = true;
    }

    /// Marks the current presentation as finished.
    pub fn end_transition(&mut self) {
        self.busy = false;
    }

    /// Returns true while a move is being presented.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Removes and returns pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The running or finished round, `None` while idle.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Returns false once the round timed out.
    pub fn validation_enabled(&self) -> bool {
        self.validation_enabled
    }

    /// Size ranks of a tower, bottom to top. Empty while idle.
    pub fn tower_sizes(&self, tower: TowerId) -> Vec<usize> {
        self.round
            .as_ref()
            .map(|r| r.registry().sizes(tower))
            .unwrap_or_default()
    }

    /// Disks in play, 0 while idle.
    pub fn disk_count(&self) -> usize {
        self.round
            .as_ref()
            .map_or(0, |r| r.registry().disk_count())
    }

    /// Moves counted in this round.
    pub fn move_count(&self) -> u64 {
        self.round.as_ref().map_or(0, Round::move_count)
    }

    /// Entries available to undo.
    pub fn history_len(&self) -> usize {
        self.round.as_ref().map_or(0, |r| r.history().len())
    }

    /// Minimal moves for the current disk count, 0 while idle.
    pub fn min_moves_required(&self) -> u64 {
        self.round.as_ref().map_or(0, Round::min_moves)
    }

    /// Round time limit in seconds, 0 while idle.
    pub fn time_limit_secs(&self) -> u64 {
        self.round.as_ref().map_or(0, Round::time_limit_secs)
    }

    /// Efficiency percentage, available once the round is won.
    pub fn efficiency(&self) -> Option<f64> {
        if self.phase != Phase::Won {
            return None;
        }
        self.round
            .as_ref()
            .map(|r| rules::efficiency(r.min_moves(), r.move_count()))
    }

    /// Verdict for a won round.
    pub fn rating(&self) -> Option<Rating> {
        let efficiency = self.efficiency()?;
        Some(Rating::from_score(
            self.move_count(),
            self.min_moves_required(),
            efficiency,
        ))
    }

    /// Towers the top disk of `from` may legally move to.
    ///
    /// Empty unless a round is active.
    pub fn valid_destinations(&self, from: TowerId) -> Vec<TowerId> {
        match (&self.round, self.phase) {
            (Some(round), Phase::Active) => {
                rules::valid_destinations(round.registry(), self.validation_enabled, from)
            }
            _ => Vec::new(),
        }
    }

    /// Serializable view of the engine.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), MoveError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(MoveError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// The round moves apply to.
    ///
    /// A timed-out round has validation switched off, and moves on it report
    /// `ValidationDisabled` ahead of the phase check.
    fn active_round(&self) -> Result<&Round, MoveError> {
        if self.phase == Phase::TimedOut {
            rules::ValidationEnabled::check(self.validation_enabled)?;
        }
        self.expect_phase(Phase::Active)?;
        if self.busy {
            return Err(MoveError::Busy);
        }
        self.round.as_ref().ok_or(MoveError::WrongPhase {
            expected: Phase::Active,
            actual: Phase::Idle,
        })
    }

    /// Validates and applies one move; `disk` names the mover on the drag path.
    fn try_move(
        &mut self,
        disk: Option<DiskId>,
        from: TowerId,
        to: TowerId,
    ) -> Result<Move, MoveError> {
        let enabled = self.validation_enabled;
        let round = self.active_round()?;
        let mover = rules::validate_move(round.registry(), enabled, from, to)?;
        if let Some(disk) = disk
            && disk != mover
        {
            return Err(MoveError::NotTopDisk { disk, tower: from });
        }
        let action = Move::new(mover, from, to);
        MoveContract::pre(round, &action)?;

        let round = self.round.as_mut().ok_or(MoveError::WrongPhase {
            expected: Phase::Active,
            actual: Phase::Idle,
        })?;

        #[cfg(debug_assertions)]
        let before = round.clone();

        let applied = round
            .apply(from, to)
            .ok_or(MoveError::EmptyTower(from))?;

        #[cfg(debug_assertions)]
        {
            let outcome = MoveContract::post(&before, round);
            restore_on_violation(round, before, outcome)?;
        }

        Ok(applied)
    }

    /// Emits the events for a move attempt and checks for a win.
    fn settle_move(&mut self, result: Result<Move, MoveError>) -> Result<Move, MoveError> {
        match result {
            Ok(action) => {
                debug!(%action, "Move accepted");
                self.events.emit(GameEvent::accepted(action));
                self.check_win();
                Ok(action)
            }
            Err(error) => {
                debug!(%error, "Move rejected");
                self.events.emit(GameEvent::rejected(&error));
                Err(error)
            }
        }
    }

    fn check_win(&mut self) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        if !round.is_solved() {
            return;
        }

        let move_count = round.move_count();
        let efficiency = rules::efficiency(round.min_moves(), move_count);
        info!(move_count, efficiency, "Round won");
        self.phase = Phase::Won;
        self.events.emit(GameEvent::Won {
            move_count,
            efficiency,
        });
    }
}

/// Puts `before` back when a post-condition failed, so a refused transition
/// leaves the round as it was.
#[cfg(debug_assertions)]
fn restore_on_violation(
    round: &mut Round,
    before: Round,
    outcome: Result<(), MoveError>,
) -> Result<(), MoveError> {
    if let Err(error) = &outcome {
        tracing::warn!(%error, "Post-condition failed, restoring previous round");
        *round = before;
    }
    outcome
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TowerId::{Left, Middle, Right};

    fn active(n: usize) -> Engine {
        let mut engine = Engine::new();
        engine.start(n, 60).unwrap();
        engine.drain_events();
        engine
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut engine = active(3);
        assert_eq!(
            engine.start(3, 60),
            Err(MoveError::WrongPhase {
                expected: Phase::Idle,
                actual: Phase::Active
            })
        );
    }

    #[test]
    fn test_start_rejects_zero_disks_and_stays_idle() {
        let mut engine = Engine::new();
        assert_eq!(engine.start(0, 60), Err(MoveError::InvalidDiskCount(0)));
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_move_requires_active_round() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.request_move(Left, Right),
            Err(MoveError::WrongPhase { .. })
        ));
        assert!(matches!(engine.undo(), Err(MoveError::WrongPhase { .. })));
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let mut engine = active(3);
        engine.request_move(Left, Right).unwrap();
        engine.request_move(Left, Middle).unwrap();
        let before = engine.snapshot();

        assert_eq!(
            engine.request_move(Left, Middle),
            Err(MoveError::SizeViolation {
                disk: DiskId(2),
                onto: DiskId(1)
            })
        );
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.move_count(), 2);
    }

    #[test]
    fn test_events_for_accepted_and_rejected_moves() {
        let mut engine = active(2);
        engine.request_move(Left, Middle).unwrap();
        let _ = engine.request_move(Right, Left);

        let events = engine.drain_events();
        assert_eq!(
            events[0],
            GameEvent::MoveAccepted {
                disk: DiskId(0),
                from: Left,
                to: Middle
            }
        );
        assert!(matches!(events[1], GameEvent::MoveRejected { .. }));
    }

    #[test]
    fn test_drag_path_enforces_top_disk() {
        let mut engine = active(3);
        assert_eq!(
            engine.move_disk(DiskId(1), Right),
            Err(MoveError::NotTopDisk {
                disk: DiskId(1),
                tower: Left
            })
        );
        assert_eq!(
            engine.move_disk(DiskId(0), Right),
            Ok(Move::new(DiskId(0), Left, Right))
        );
        assert_eq!(engine.tower_sizes(Right), vec![0]);
    }

    #[test]
    fn test_busy_blocks_moves_and_undo() {
        let mut engine = active(3);
        engine.request_move(Left, Right).unwrap();
        engine.begin_transition();
        assert_eq!(engine.request_move(Left, Middle), Err(MoveError::Busy));
        assert_eq!(engine.undo(), Err(MoveError::Busy));
        engine.end_transition();
        assert!(engine.undo().is_ok());
    }

    #[test]
    fn test_undo_restores_previous_towers() {
        let mut engine = active(3);
        engine.request_move(Left, Right).unwrap();
        engine.request_move(Left, Middle).unwrap();

        let undone = engine.undo().unwrap();
        assert_eq!(undone, Move::new(DiskId(1), Left, Middle));
        assert_eq!(engine.tower_sizes(Left), vec![2, 1]);
        assert_eq!(engine.tower_sizes(Right), vec![0]);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut engine = active(3);
        assert_eq!(engine.undo(), Err(MoveError::EmptyHistory));
    }

    #[test]
    fn test_time_expire_freezes_round() {
        let mut engine = active(3);
        assert_eq!(
            engine.time_expire(59),
            Err(MoveError::TimeRemaining {
                elapsed: 59,
                limit: 60
            })
        );
        engine.time_expire(60).unwrap();
        assert_eq!(engine.phase(), Phase::TimedOut);
        assert!(!engine.validation_enabled());
        assert!(engine.request_move(Left, Right).is_err());
        assert!(engine.undo().is_err());
        assert_eq!(engine.tower_sizes(Left), vec![2, 1, 0]);
        assert!(engine.valid_destinations(Left).is_empty());
    }

    #[test]
    fn test_timed_out_move_fails_validation_before_phase() {
        let mut engine = active(2);
        engine.time_expire(60).unwrap();
        engine.drain_events();

        assert_eq!(
            engine.request_move(Left, Middle),
            Err(MoveError::ValidationDisabled)
        );
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::rejected(&MoveError::ValidationDisabled)]
        );
        assert!(matches!(
            engine.undo(),
            Err(MoveError::WrongPhase {
                actual: Phase::TimedOut,
                ..
            })
        ));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_failed_post_condition_restores_round() {
        let before = Round::new(3, 0).unwrap();
        let mut round = before.clone();
        round.apply(Left, Right).unwrap();
        let moved = round.clone();

        let err = MoveError::InvariantViolation("history length".to_string());
        assert_eq!(
            restore_on_violation(&mut round, before.clone(), Err(err.clone())),
            Err(err)
        );
        assert_eq!(round, before);

        let mut round = moved.clone();
        assert_eq!(restore_on_violation(&mut round, before, Ok(())), Ok(()));
        assert_eq!(round, moved);
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut engine = active(1);
        engine.request_move(Left, Right).unwrap();
        assert_eq!(engine.phase(), Phase::Won);

        engine.reset();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.move_count(), 0);
        assert!(engine.round().is_none());
        assert!(engine.start(2, 10).is_ok());
    }

    #[test]
    fn test_efficiency_only_after_win() {
        let mut engine = active(1);
        assert_eq!(engine.efficiency(), None);
        engine.request_move(Left, Middle).unwrap();
        engine.request_move(Middle, Right).unwrap();
        assert_eq!(engine.phase(), Phase::Won);
        assert_eq!(engine.efficiency(), Some(50.0));
        assert_eq!(engine.rating(), Some(Rating::TryAgain));
    }

    #[test]
    fn test_dispatch_routes_commands() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.dispatch(Command::Start {
                disks: 2,
                time_limit_secs: 0
            }),
            Ok(None)
        );
        assert_eq!(
            engine.dispatch(Command::Move {
                from: Left,
                to: Middle
            }),
            Ok(Some(Move::new(DiskId(0), Left, Middle)))
        );
        assert!(engine.dispatch(Command::Undo).is_ok());
        assert!(engine
            .dispatch(Command::TimeExpire { elapsed_secs: 0 })
            .is_ok());
        assert_eq!(engine.phase(), Phase::TimedOut);
        assert_eq!(engine.dispatch(Command::Reset), Ok(None));
        assert_eq!(engine.phase(), Phase::Idle);
    }
}
