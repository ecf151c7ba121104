use crate::{Capturer, EventKind, EventStore, Key, MouseButton, NamedKey, capture::event_store::MAX_CAPTURED_EVENTS};

/// WHAT: Events delivered while disarmed are ignored
/// WHY: Hooks run for the whole process; the flag does the filtering
#[test]
fn given_disarmed_capturer_when_recording_then_event_dropped() {
    // Given: A fresh capturer
    let capturer = Capturer::new();

    // When: A hook delivers an event
    let kept = capturer.record(EventKind::Move { x: 1, y: 2 });

    // Then: Nothing is kept
    assert!(!kept);
    assert_eq!(capturer.captured(), 0);
}

/// WHAT: Armed capture keeps events in order with rising timestamps
/// WHY: Playback relies on capture order equalling time order
#[test]
fn given_armed_capturer_when_recording_then_sequence_in_capture_order() {
    // Given: An armed capturer
    let capturer = Capturer::new();
    capturer.arm();

    // When: Recording three events and disarming
    capturer.record(EventKind::Move { x: 1, y: 1 });
    capturer.record(EventKind::Click { x: 1, y: 1, button: MouseButton::Left });
    capturer.record(EventKind::KeyDown { key: Key::Named(NamedKey::Enter) });
    let sequence = capturer.disarm();

    // Then: Three events, original order, non-decreasing timestamps
    assert_eq!(sequence.len(), 3);
    assert_eq!(sequence.events()[0].kind, EventKind::Move { x: 1, y: 1 });
    assert!(sequence.events().windows(2).all(|w| w[0].t <= w[1].t));
    assert!(!capturer.is_armed());
}

/// WHAT: Arming again clears the previous recording
/// WHY: Each recording starts from an empty store
#[test]
fn given_previous_recording_when_arming_again_then_store_cleared() {
    // Given: A capturer that recorded and was disarmed without draining
    let capturer = Capturer::new();
    capturer.arm();
    capturer.record(EventKind::Move { x: 1, y: 1 });

    // When: Arming again
    capturer.arm();

    // Then: Store is empty
    assert_eq!(capturer.captured(), 0);
}

/// WHAT: Disarming without events yields an empty sequence
/// WHY: Stop right after start is valid and must not fail
#[test]
fn given_no_events_when_disarming_then_empty_sequence() {
    // Given: An armed capturer
    let capturer = Capturer::new();
    capturer.arm();

    // When: Disarming immediately
    let sequence = capturer.disarm();

    // Then: Empty
    assert!(sequence.is_empty());
}

/// WHAT: Store refuses events beyond the cap and counts them
/// WHY: A forgotten recording must not exhaust memory
#[test]
fn given_full_store_when_pushing_then_event_dropped_and_counted() {
    // Given: A store filled to the cap
    let mut store = EventStore::new();
    for i in 0..MAX_CAPTURED_EVENTS {
        assert!(store.push(crate::Event::new(i as f64, EventKind::Move { x: 0, y: 0 })));
    }

    // When: Pushing one more
    let kept = store.push(crate::Event::new(0.0, EventKind::Move { x: 0, y: 0 }));

    // Then: Refused and counted
    assert!(!kept);
    assert_eq!(store.dropped(), 1);
    assert_eq!(store.len(), MAX_CAPTURED_EVENTS);
}
