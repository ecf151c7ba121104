use crate::{Action, TakeOutcome, TriggerChannel};

use std::{
    fs::File,
    time::{Duration, SystemTime},
};

use tempfile::tempdir;

/// WHAT: A trigger written once is taken exactly once
/// WHY: A hotkey press must run its action one time
#[test]
#[allow(clippy::unwrap_used)]
fn given_fired_trigger_when_taking_twice_then_taken_then_absent() {
    // Given: A fired play_task trigger
    let dir = tempdir().unwrap();
    let channel = TriggerChannel::new(dir.path());
    channel.fire(Action::PlayTask).unwrap();

    // When: Taking twice
    let first = channel.take(Action::PlayTask);
    let second = channel.take(Action::PlayTask);

    // Then: Taken, then Absent, file gone
    assert_eq!(first, TakeOutcome::Taken);
    assert_eq!(second, TakeOutcome::Absent);
    assert!(!channel.path(Action::PlayTask).exists());
}

/// WHAT: Two writes before a read collapse into one dispatch
/// WHY: At most one outstanding trigger per action
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_fires_when_taking_then_single_dispatch() {
    // Given: stop fired twice
    let dir = tempdir().unwrap();
    let channel = TriggerChannel::new(dir.path());
    channel.fire(Action::Stop).unwrap();
    channel.fire(Action::Stop).unwrap();

    // When/Then: One take succeeds, the next finds nothing
    assert_eq!(channel.take(Action::Stop), TakeOutcome::Taken);
    assert_eq!(channel.take(Action::Stop), TakeOutcome::Absent);
}

/// WHAT: Trigger files use the documented name and carry a timestamp
/// WHY: External tools may write triggers by hand
#[test]
#[allow(clippy::unwrap_used)]
fn given_fired_trigger_when_reading_file_then_named_by_action_with_epoch_content() {
    // Given: A fired start_record trigger
    let dir = tempdir().unwrap();
    let channel = TriggerChannel::new(dir.path());
    channel.fire(Action::StartRecord).unwrap();

    // When: Reading the file directly
    let text = std::fs::read_to_string(dir.path().join("start_record.trigger")).unwrap();

    // Then: Decimal seconds since the epoch
    assert!(text.parse::<f64>().unwrap() > 1_600_000_000.0);
}

/// WHAT: Triggers older than the max age are discarded
/// WHY: A trigger left from a crash must not fire on the next start
#[test]
#[allow(clippy::unwrap_used)]
fn given_old_trigger_when_taking_with_max_age_then_expired_and_deleted() {
    // Given: A trigger whose mtime is a minute in the past
    let dir = tempdir().unwrap();
    let channel = TriggerChannel::new(dir.path()).with_max_age(Duration::from_secs(10));
    channel.fire(Action::EndTask).unwrap();
    File::options()
        .write(true)
        .open(channel.path(Action::EndTask))
        .unwrap()
        .set_modified(SystemTime::now() - Duration::from_secs(60))
        .unwrap();

    // When: Taking
    let outcome = channel.take(Action::EndTask);

    // Then: Expired and removed
    assert_eq!(outcome, TakeOutcome::Expired);
    assert!(!channel.is_pending(Action::EndTask));
}

/// WHAT: Purge removes every pending trigger
/// WHY: Leftovers from a previous run are cleared at startup
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_triggers_when_purging_then_all_removed_and_counted() {
    // Given: Two pending triggers
    let dir = tempdir().unwrap();
    let channel = TriggerChannel::new(dir.path());
    channel.fire(Action::StartRecord).unwrap();
    channel.fire(Action::Stop).unwrap();

    // When: Purging
    let removed = channel.purge();

    // Then: Both gone
    assert_eq!(removed, 2);
    assert!(Action::ALL.iter().all(|a| !channel.is_pending(*a)));
}

/// WHAT: Concurrent takers dispatch a trigger at most once
/// WHY: Two pollers on one directory must not double-run an action
#[test]
#[allow(clippy::unwrap_used)]
fn given_concurrent_takers_when_racing_on_one_trigger_then_exactly_one_taken() {
    for _ in 0..50 {
        // Given: One pending trigger and two channels on the same directory
        let dir = tempdir().unwrap();
        let channel = TriggerChannel::new(dir.path());
        channel.fire(Action::Stop).unwrap();

        // When: Two threads take at once
        let outcomes: Vec<TakeOutcome> = std::thread::scope(|s| {
            let a = s.spawn(|| channel.take(Action::Stop));
            let b = s.spawn(|| channel.take(Action::Stop));
            vec![a.join().unwrap(), b.join().unwrap()]
        });

        // Then: Exactly one Taken; the other saw nothing or lost the race
        let taken = outcomes.iter().filter(|o| **o == TakeOutcome::Taken).count();
        assert_eq!(taken, 1, "{:?}", outcomes);
    }
}
