use crate::{PAUSE_MARKER_FILE, PauseGate};

use tempfile::tempdir;

/// WHAT: enter; enter; exit leaves the gate open
/// WHY: The marker is a flag, not a counter
#[test]
#[allow(clippy::unwrap_used)]
fn given_double_enter_when_exiting_once_then_not_paused() {
    // Given: A gate entered twice
    let dir = tempdir().unwrap();
    let gate = PauseGate::new(dir.path());
    gate.enter().unwrap();
    gate.enter().unwrap();

    // When: Exiting once
    gate.exit().unwrap();

    // Then: Open
    assert!(!gate.is_paused());
}

/// WHAT: The marker file is what both processes see
/// WHY: Pause crosses the process boundary through the filesystem
#[test]
#[allow(clippy::unwrap_used)]
fn given_gate_entered_when_checking_from_second_handle_then_paused() {
    // Given: Two gates over the same directory
    let dir = tempdir().unwrap();
    let writer = PauseGate::new(dir.path());
    let reader = PauseGate::new(dir.path());

    // When: One enters
    writer.enter().unwrap();

    // Then: The other sees it, via the documented file name
    assert!(reader.is_paused());
    assert!(dir.path().join(PAUSE_MARKER_FILE).exists());
}

/// WHAT: Exiting an open gate is a no-op
/// WHY: Shutdown clears the marker whether or not it exists
#[test]
#[allow(clippy::unwrap_used)]
fn given_open_gate_when_exiting_then_ok() {
    // Given: An open gate
    let dir = tempdir().unwrap();
    let gate = PauseGate::new(dir.path());

    // When: Exiting
    let result = gate.exit();

    // Then: Ok and still open
    assert!(result.is_ok());
    assert!(!gate.is_paused());
}
