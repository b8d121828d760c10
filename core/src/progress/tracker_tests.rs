//! Tests for ProgressTracker transitions
//!
//! Verifies that:
//! - Sequential adventures unlock strictly in order
//! - Completion is idempotent and never disturbs other missions
//! - Counter missions complete exactly once at their target

use yuletide_types::{AdventureConfig, MissionId, Progression};

use super::{Counter, MissionStatus, ProgressTracker, Transition};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

const STAR: MissionId = MissionId::DeliverStar;
const RACER: MissionId = MissionId::DriveRacer;
const TREE: MissionId = MissionId::LightTree;
const SNOW: MissionId = MissionId::CatchSnowflakes;

fn sequential() -> ProgressTracker {
    ProgressTracker::new(
        Progression::Sequential,
        [(STAR, None), (RACER, None), (TREE, None)],
    )
}

fn flat() -> ProgressTracker {
    ProgressTracker::new(
        Progression::Flat,
        [(STAR, None), (RACER, None), (TREE, None)],
    )
}

fn statuses(tracker: &ProgressTracker) -> Vec<MissionStatus> {
    tracker.missions().iter().map(|m| m.status).collect()
}

/// Sequential invariant: no mission is unlocked while its predecessor is incomplete
fn assert_ordered(tracker: &ProgressTracker) {
    for pair in tracker.missions().windows(2) {
        if !pair[0].is_complete() {
            assert_eq!(
                pair[1].status,
                MissionStatus::Locked,
                "{} unlocked before {} completed",
                pair[1].id,
                pair[0].id
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Initial State
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn sequential_starts_with_only_first_available() {
    let tracker = sequential();
    assert_eq!(
        statuses(&tracker),
        vec![
            MissionStatus::Available,
            MissionStatus::Locked,
            MissionStatus::Locked
        ]
    );
    assert_eq!(tracker.next_available(), Some(STAR));
    assert!(!tracker.all_complete());
}

#[test]
fn flat_starts_with_everything_available() {
    let tracker = flat();
    assert!(tracker.missions().iter().all(|m| m.status == MissionStatus::Available));
    assert!(tracker.is_unlocked(TREE));
}

#[test]
fn duplicate_missions_are_collapsed() {
    let tracker = ProgressTracker::new(
        Progression::Sequential,
        [(STAR, None), (STAR, None), (RACER, None)],
    );
    assert_eq!(tracker.len(), 2);
}

#[test]
fn from_config_attaches_counter_targets() {
    let config = AdventureConfig {
        missions: vec![MissionId::FindPresent, SNOW, MissionId::HangOrnaments],
        catch_target: 4,
        ornament_target: 2,
        ..Default::default()
    };
    let tracker = ProgressTracker::from_config(&config);
    assert_eq!(tracker.counter(SNOW), Some(Counter { current: 0, target: 4 }));
    assert_eq!(
        tracker.counter(MissionId::HangOrnaments),
        Some(Counter { current: 0, target: 2 })
    );
    assert_eq!(tracker.counter(MissionId::FindPresent), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Completion
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn completing_unlocks_the_next_mission() {
    let mut tracker = sequential();
    assert_eq!(
        tracker.complete(STAR),
        Transition::Completed {
            unlocked: Some(RACER)
        }
    );
    assert_eq!(tracker.status(RACER), Some(MissionStatus::Available));
    assert_eq!(tracker.status(TREE), Some(MissionStatus::Locked));
    assert_ordered(&tracker);
}

#[test]
fn completing_last_mission_unlocks_nothing() {
    let mut tracker = sequential();
    tracker.complete(STAR);
    tracker.complete(RACER);
    assert_eq!(
        tracker.complete(TREE),
        Transition::Completed { unlocked: None }
    );
    assert!(tracker.all_complete());
    assert_eq!(tracker.next_available(), None);
}

#[test]
fn completing_locked_mission_is_a_no_op() {
    let mut tracker = sequential();
    let before = tracker.clone();
    assert_eq!(tracker.complete(TREE), Transition::Locked);
    assert_eq!(tracker, before);
    assert_ordered(&tracker);
}

#[test]
fn completing_twice_changes_nothing() {
    let mut tracker = sequential();
    tracker.complete(STAR);
    let before = tracker.clone();

    assert_eq!(tracker.complete(STAR), Transition::AlreadyComplete);
    assert_eq!(tracker, before);
}

#[test]
fn untracked_mission_is_reported() {
    let mut tracker = sequential();
    assert_eq!(tracker.complete(SNOW), Transition::NotTracked);
    assert_eq!(tracker.increment(SNOW), Transition::NotTracked);
    assert!(!tracker.is_unlocked(SNOW));
}

#[test]
fn flat_completion_never_changes_other_missions() {
    let mut tracker = flat();
    assert_eq!(tracker.complete(TREE), Transition::Completed { unlocked: None });
    assert_eq!(tracker.status(STAR), Some(MissionStatus::Available));
    assert_eq!(tracker.status(RACER), Some(MissionStatus::Available));
}

#[test]
fn all_complete_matches_every_status() {
    let mut tracker = flat();
    for id in [STAR, RACER, TREE] {
        let expected = tracker.missions().iter().all(|m| m.is_complete());
        assert_eq!(tracker.all_complete(), expected);
        tracker.complete(id);
    }
    assert!(tracker.all_complete());
    assert_eq!(tracker.completed_count(), 3);
    assert!(tracker.remaining().is_empty());
}

#[test]
fn sequential_order_holds_through_any_completion_order() {
    let mut tracker = sequential();
    for id in [TREE, RACER, STAR, TREE, RACER, TREE] {
        tracker.complete(id);
        assert_ordered(&tracker);
    }
    assert!(tracker.all_complete());
}

// ═══════════════════════════════════════════════════════════════════════════
// Counters
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn counter_completes_exactly_at_target() {
    let mut tracker = ProgressTracker::new(
        Progression::Sequential,
        [(SNOW, Some(3)), (STAR, None)],
    );

    assert_eq!(
        tracker.increment(SNOW),
        Transition::Advanced { current: 1, target: 3 }
    );
    assert_eq!(
        tracker.increment(SNOW),
        Transition::Advanced { current: 2, target: 3 }
    );
    assert_eq!(tracker.status(SNOW), Some(MissionStatus::Available));
    assert_eq!(
        tracker.increment(SNOW),
        Transition::Completed { unlocked: Some(STAR) }
    );
    assert_eq!(tracker.status(SNOW), Some(MissionStatus::Complete));
}

#[test]
fn increments_past_target_change_nothing() {
    let mut tracker = ProgressTracker::new(Progression::Flat, [(SNOW, Some(2))]);
    tracker.increment(SNOW);
    tracker.increment(SNOW);
    let before = tracker.clone();

    assert_eq!(tracker.increment(SNOW), Transition::AlreadyComplete);
    assert_eq!(tracker, before);
    assert_eq!(tracker.counter(SNOW), Some(Counter { current: 2, target: 2 }));
}

#[test]
fn increment_on_locked_or_plain_mission_is_rejected() {
    let mut tracker = ProgressTracker::new(
        Progression::Sequential,
        [(STAR, None), (SNOW, Some(3))],
    );
    assert_eq!(tracker.increment(SNOW), Transition::Locked);
    assert_eq!(tracker.counter(SNOW), Some(Counter { current: 0, target: 3 }));
    assert_eq!(tracker.increment(STAR), Transition::NoCounter);
}

#[test]
fn zero_target_is_raised_to_one() {
    let mut tracker = ProgressTracker::new(Progression::Flat, [(SNOW, Some(0))]);
    assert!(tracker.increment(SNOW).is_completion());
}

#[test]
fn completing_counter_mission_directly_fills_counter() {
    let mut tracker = ProgressTracker::new(Progression::Flat, [(SNOW, Some(5))]);
    tracker.increment(SNOW);
    assert!(tracker.complete(SNOW).is_completion());
    assert_eq!(tracker.counter(SNOW), Some(Counter { current: 5, target: 5 }));
}
