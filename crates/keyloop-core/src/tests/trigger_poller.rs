use crate::{Action, PauseGate, TriggerChannel, TriggerPoller};

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

fn poller(dir: &std::path::Path) -> TriggerPoller {
    TriggerPoller::new(
        TriggerChannel::new(dir),
        PauseGate::new(dir),
        Duration::from_millis(100),
    )
}

/// WHAT: Pending triggers are consumed in action order
/// WHY: Dispatch order must be deterministic within one tick
#[test]
#[allow(clippy::unwrap_used)]
fn given_several_triggers_when_polling_once_then_actions_in_order_and_files_gone() {
    // Given: end_task and start_record pending
    let dir = tempdir().unwrap();
    let channel = TriggerChannel::new(dir.path());
    channel.fire(Action::EndTask).unwrap();
    channel.fire(Action::StartRecord).unwrap();

    // When: Polling once
    let due = poller(dir.path()).poll_once();

    // Then: start_record before end_task, nothing left on disk
    assert_eq!(due, vec![Action::StartRecord, Action::EndTask]);
    assert!(Action::ALL.iter().all(|a| !channel.is_pending(*a)));
}

/// WHAT: Paused poller leaves triggers in place
/// WHY: While the user is editing settings no hotkey should act
#[test]
#[allow(clippy::unwrap_used)]
fn given_pause_entered_when_polling_then_nothing_consumed() {
    // Given: A pending trigger and the pause marker
    let dir = tempdir().unwrap();
    let channel = TriggerChannel::new(dir.path());
    channel.fire(Action::PlayTask).unwrap();
    PauseGate::new(dir.path()).enter().unwrap();

    // When: Polling
    let due = poller(dir.path()).poll_once();

    // Then: Nothing due, trigger still pending
    assert!(due.is_empty());
    assert!(channel.is_pending(Action::PlayTask));
}

/// WHAT: The running poller hands each trigger to the handler once
/// WHY: The poller is the only path from hotkeys to the session
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_running_poller_when_trigger_written_then_handler_called_within_a_tick() {
    // Given: A running poller recording what it dispatches
    let dir = tempdir().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let cancel = CancellationToken::new();
    let sink = Arc::clone(&seen);
    let task = tokio::spawn(poller(dir.path()).run(cancel.clone(), move |action| {
        sink.lock().unwrap().push(action);
        Ok::<(), String>(())
    }));

    // When: A trigger appears and one tick passes
    TriggerChannel::new(dir.path()).fire(Action::StartRecord).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    // Then: Dispatched once, file gone
    assert_eq!(*seen.lock().unwrap(), vec![Action::StartRecord]);
    assert!(!dir.path().join("start_record.trigger").exists());

    cancel.cancel();
    task.await.unwrap();
}

/// WHAT: A failing handler does not stop the poller
/// WHY: One bad dispatch must not disable every later hotkey
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_failing_handler_when_triggers_keep_coming_then_poller_keeps_dispatching() {
    // Given: A poller whose handler always errors
    let dir = tempdir().unwrap();
    let calls = Arc::new(Mutex::new(0));
    let cancel = CancellationToken::new();
    let counter = Arc::clone(&calls);
    let task = tokio::spawn(poller(dir.path()).run(cancel.clone(), move |_| {
        *counter.lock().unwrap() += 1;
        Err::<(), _>("refused")
    }));
    let channel = TriggerChannel::new(dir.path());

    // When: Two triggers arrive on separate ticks
    channel.fire(Action::Stop).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    channel.fire(Action::Stop).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    // Then: Both reached the handler
    assert_eq!(*calls.lock().unwrap(), 2);

    cancel.cancel();
    task.await.unwrap();
}
