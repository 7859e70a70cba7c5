//! Integration tests for the fast lifecycle over SQLite and the widget
//! schedule derived from it.

use chrono::{Duration, TimeZone, Utc};
use fasting_core::{
    load_snapshot, refresh_schedule, write_snapshot, CoreError, Database, FastManager,
    FastRepository, TargetInterval, WidgetSnapshot,
};

#[test]
fn test_full_fast_workflow() {
    let t0 = Utc.with_ymd_and_hms(2026, 10, 1, 20, 0, 0).unwrap();
    let target = TargetInterval::from_secs(28_800).unwrap();
    let mut manager = FastManager::new(Database::open_memory().unwrap()).unwrap();

    // A past fast recorded after the fact.
    let past = manager
        .start_fast(
            t0 - Duration::days(1),
            Some(t0 - Duration::days(1) + Duration::hours(9)),
            target,
        )
        .unwrap();
    assert!(manager.current_fast().is_none());
    assert_eq!(manager.completed_fasts(), &[past.clone()]);

    // The ongoing fast.
    let fast = manager.start_fast(t0, None, target).unwrap();
    assert_eq!(manager.current_fast(), Some(&fast));

    let snapshot = manager.widget_snapshot();
    let schedule = refresh_schedule(&snapshot, t0 + Duration::seconds(7200));
    assert_eq!(schedule.len(), 77);
    assert_eq!(schedule[1].date - schedule[0].date, Duration::seconds(288));

    let end = t0 + Duration::hours(8);
    let ended = manager.end_fast(&fast, end).unwrap();
    assert!(manager.current_fast().is_none());
    assert_eq!(manager.completed_fasts()[0], ended);
    assert!(ended.goal_met());

    let again = manager.end_fast(&ended, end + Duration::hours(1));
    assert!(matches!(again, Err(CoreError::InvalidState(_))));

    assert_eq!(
        manager.widget_snapshot(),
        WidgetSnapshot::Idle {
            last_fast_date: Some(end)
        }
    );
}

#[test]
fn test_manager_reload_sees_persisted_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fasting.db");
    let t0 = Utc.with_ymd_and_hms(2026, 10, 1, 20, 0, 0).unwrap();
    let target = TargetInterval::from_hours(16).unwrap();

    let started = {
        let mut manager = FastManager::new(Database::open_at(&path).unwrap()).unwrap();
        manager.start_fast(t0, None, target).unwrap()
    };

    let mut manager = FastManager::new(Database::open_at(&path).unwrap()).unwrap();
    assert_eq!(manager.current_fast(), Some(&started));

    // A second manager over the same file cannot create a second active fast.
    let err = manager.start_fast(t0 + Duration::hours(1), None, target);
    assert!(matches!(err, Err(CoreError::InvalidState(_))));

    manager.delete_fast(&started).unwrap();
    assert!(manager.current_fast().is_none());
    assert!(manager.repository().active().unwrap().is_none());
}

#[test]
fn test_snapshot_file_feeds_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SharedData.json");
    let t0 = Utc.with_ymd_and_hms(2026, 10, 1, 20, 0, 0).unwrap();

    let mut manager = FastManager::new(Database::open_memory().unwrap()).unwrap();
    manager
        .start_fast(t0, None, TargetInterval::from_hours(16).unwrap())
        .unwrap();
    write_snapshot(&path, &manager.widget_snapshot()).unwrap();

    // The consumer side only has the file.
    let snapshot = load_snapshot(&path);
    let past_target = refresh_schedule(&snapshot, t0 + Duration::hours(17));
    assert_eq!(past_target.len(), 1);

    let at_start = refresh_schedule(&snapshot, t0);
    assert_eq!(at_start.len(), 102);
    assert_eq!(
        at_start.last().unwrap().date,
        t0 + Duration::seconds(16 * 3600 * 101 / 100)
    );
}

#[test]
fn test_start_after_another_manager_ended_the_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fasting.db");
    let t0 = Utc.with_ymd_and_hms(2026, 10, 1, 20, 0, 0).unwrap();
    let target = TargetInterval::from_hours(16).unwrap();

    let mut first = FastManager::new(Database::open_at(&path).unwrap()).unwrap();
    let fast = first.start_fast(t0, None, target).unwrap();

    let mut second = FastManager::new(Database::open_at(&path).unwrap()).unwrap();
    second.end_fast(&fast, t0 + Duration::hours(16)).unwrap();

    // `first` still holds the old reference until it asks storage.
    assert_eq!(first.current_fast(), Some(&fast));
    assert!(first.repository().active().unwrap().is_none());

    let next = first
        .start_fast(t0 + Duration::days(1), None, target)
        .unwrap();
    assert_eq!(first.current_fast(), Some(&next));
    assert_eq!(first.repository().active().unwrap(), Some(next));
}
