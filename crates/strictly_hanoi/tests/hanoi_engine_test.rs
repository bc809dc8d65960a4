//! Tests for the Tower of Hanoi engine through the public API.

use strictly_hanoi::{
    DiskId, Engine, GameEvent, Move, MoveError, Phase, Rating, TowerId, solve,
};

fn tower(index: usize) -> TowerId {
    TowerId::from_index(index).unwrap()
}

fn started(n: usize) -> Engine {
    let mut engine = Engine::new();
    engine.start(n, 120).unwrap();
    engine
}

#[test]
fn test_three_disk_optimal_game_wins() {
    let mut engine = started(3);
    let moves = [(0, 2), (0, 1), (2, 1), (0, 2), (1, 0), (1, 2), (0, 2)];

    for (from, to) in moves {
        engine.request_move(tower(from), tower(to)).unwrap();
    }

    assert_eq!(engine.phase(), Phase::Won);
    assert_eq!(engine.move_count(), 7);
    assert_eq!(engine.min_moves_required(), 7);
    assert_eq!(engine.efficiency(), Some(100.0));
    assert_eq!(engine.rating(), Some(Rating::Perfect));
    assert_eq!(engine.tower_sizes(TowerId::Right), vec![2, 1, 0]);

    let events = engine.drain_events();
    assert_eq!(
        events.last(),
        Some(&GameEvent::Won {
            move_count: 7,
            efficiency: 100.0
        })
    );
}

#[test]
fn test_size_violation_leaves_state_unchanged() {
    let mut engine = started(3);
    engine.request_move(tower(0), tower(2)).unwrap();
    engine.request_move(tower(0), tower(1)).unwrap();
    // Left holds size 2, Middle holds size 1.
    let before = engine.snapshot();

    assert_eq!(
        engine.request_move(tower(0), tower(1)),
        Err(MoveError::SizeViolation {
            disk: DiskId(2),
            onto: DiskId(1)
        })
    );
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.history_len(), 2);
}

#[test]
fn test_same_tower_rejected() {
    let mut engine = started(3);
    assert_eq!(
        engine.request_move(tower(1), tower(1)),
        Err(MoveError::SameTower(TowerId::Middle))
    );
    assert_eq!(engine.move_count(), 0);
    assert_eq!(engine.history_len(), 0);
}

#[test]
fn test_smaller_disk_cannot_hold_larger() {
    let mut engine = started(3);
    engine.request_move(TowerId::Left, TowerId::Middle).unwrap();
    let before = engine.snapshot();

    assert_eq!(
        engine.request_move(TowerId::Left, TowerId::Middle),
        Err(MoveError::SizeViolation {
            disk: DiskId(1),
            onto: DiskId(0)
        })
    );
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_undo_all_restores_start() {
    let mut engine = started(4);
    let start = engine.snapshot();
    let moves = [(0, 1), (0, 2), (1, 2), (0, 1), (2, 0), (2, 1)];

    for (from, to) in moves {
        engine.request_move(tower(from), tower(to)).unwrap();
    }
    for _ in moves {
        engine.undo().unwrap();
    }

    assert_eq!(engine.snapshot(), start);
    assert_eq!(engine.move_count(), 0);
    assert_eq!(engine.undo(), Err(MoveError::EmptyHistory));
}

#[test]
fn test_undo_then_new_branch() {
    let mut engine = started(3);
    engine.request_move(TowerId::Left, TowerId::Right).unwrap();
    engine.undo().unwrap();
    engine.request_move(TowerId::Left, TowerId::Middle).unwrap();

    assert_eq!(engine.history_len(), 1);
    assert_eq!(engine.tower_sizes(TowerId::Middle), vec![0]);
    assert!(engine.tower_sizes(TowerId::Right).is_empty());
}

#[test]
fn test_solver_replay_wins_for_every_size() {
    for n in 1..=strictly_hanoi::MAX_DISKS {
        let mut engine = started(n);
        let steps = solve(n).unwrap();
        assert_eq!(steps.len() as u64, (1u64 << n) - 1);

        for step in &steps {
            let Move { disk, from, to } = step.action;
            assert_eq!(engine.move_disk(disk, to), Ok(Move::new(disk, from, to)));
        }

        assert_eq!(engine.phase(), Phase::Won, "n = {}", n);
        assert_eq!(engine.efficiency(), Some(100.0));
        assert!(
            !engine
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::MoveRejected { .. }))
        );
    }
}

#[test]
fn test_won_round_rejects_further_moves() {
    let mut engine = started(1);
    engine.request_move(TowerId::Left, TowerId::Right).unwrap();
    assert!(matches!(
        engine.request_move(TowerId::Right, TowerId::Left),
        Err(MoveError::WrongPhase {
            expected: Phase::Active,
            actual: Phase::Won
        })
    ));
    assert!(matches!(engine.undo(), Err(MoveError::WrongPhase { .. })));
}

#[test]
fn test_timed_out_round_reports_validation_disabled_state() {
    let mut engine = started(2);
    engine.request_move(TowerId::Left, TowerId::Middle).unwrap();
    engine.time_expire(120).unwrap();

    assert_eq!(engine.phase(), Phase::TimedOut);
    assert!(!engine.validation_enabled());
    assert_eq!(engine.efficiency(), None);
    assert_eq!(engine.tower_sizes(TowerId::Middle), vec![0]);

    let events = engine.drain_events();
    assert_eq!(events.last(), Some(&GameEvent::TimedOut));
}

#[test]
fn test_moves_after_timeout_report_validation_disabled() {
    let mut engine = Engine::new();
    engine.start(3, 10).unwrap();
    engine.time_expire(10).unwrap();
    engine.drain_events();

    assert_eq!(
        engine.request_move(TowerId::Left, TowerId::Right),
        Err(MoveError::ValidationDisabled)
    );
    assert_eq!(
        engine.move_disk(DiskId(0), TowerId::Right),
        Err(MoveError::ValidationDisabled)
    );

    let events = engine.drain_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| *e
        == GameEvent::MoveRejected {
            reason: MoveError::ValidationDisabled.to_string()
        }));
    assert_eq!(engine.tower_sizes(TowerId::Left), vec![2, 1, 0]);
    assert_eq!(engine.move_count(), 0);
}

#[test]
fn test_new_round_with_different_disk_count() {
    let mut engine = started(3);
    engine.request_move(TowerId::Left, TowerId::Right).unwrap();
    engine.reset();
    engine.start(5, 0).unwrap();

    assert_eq!(engine.disk_count(), 5);
    assert_eq!(engine.min_moves_required(), 31);
    assert_eq!(engine.tower_sizes(TowerId::Left), vec![4, 3, 2, 1, 0]);
    assert_eq!(engine.move_count(), 0);
}
