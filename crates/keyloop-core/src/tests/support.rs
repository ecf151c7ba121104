#![allow(clippy::unwrap_used)]

use crate::{CoreError, CoreResult, Event, EventKind, InputInjector, Key, KeyDirection, MouseButton, Sequence};

use std::{
    panic::Location,
    sync::{Arc, Mutex},
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::time::Instant;

/// One call made on the injector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Injected {
    Move(i32, i32),
    Click(MouseButton),
    Key(Key, KeyDirection),
}

/// Injector that remembers every call and when it happened.
///
/// Timestamps come from tokio's clock so paused-time tests see exact offsets.
pub(crate) struct RecordingInjector {
    start: Instant,
    log: Mutex<Vec<(Duration, Injected)>>,
    fail_moves: bool,
}

impl RecordingInjector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            log: Mutex::new(Vec::new()),
            fail_moves: false,
        })
    }

    /// Injector whose `move_to` always fails.
    pub(crate) fn failing_moves() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            log: Mutex::new(Vec::new()),
            fail_moves: true,
        })
    }

    pub(crate) fn calls(&self) -> Vec<(Duration, Injected)> {
        self.log.lock().unwrap().clone()
    }

    /// Calls other than the modifier releases the guard issues.
    pub(crate) fn recorded_calls(&self) -> Vec<(Duration, Injected)> {
        self.calls()
            .into_iter()
            .filter(|(_, call)| {
                !matches!(call, Injected::Key(k, KeyDirection::Release) if crate::MODIFIER_GUARD_SET.contains(k))
            })
            .collect()
    }

    /// Last position the pointer was moved to.
    pub(crate) fn position(&self) -> Option<(i32, i32)> {
        self.calls().into_iter().rev().find_map(|(_, call)| match call {
            Injected::Move(x, y) => Some((x, y)),
            _ => None,
        })
    }

    fn push(&self, call: Injected) {
        self.log
            .lock()
            .unwrap()
            .push((self.start.elapsed(), call));
    }
}

impl InputInjector for RecordingInjector {
    fn move_to(&self, x: i32, y: i32) -> CoreResult<()> {
        if self.fail_moves {
            return Err(CoreError::Injection {
                reason: "pointer unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.push(Injected::Move(x, y));
        Ok(())
    }

    fn click(&self, button: MouseButton) -> CoreResult<()> {
        self.push(Injected::Click(button));
        Ok(())
    }

    fn key(&self, key: Key, direction: KeyDirection) -> CoreResult<()> {
        self.push(Injected::Key(key, direction));
        Ok(())
    }
}

pub(crate) fn sequence(events: &[(f64, EventKind)]) -> Sequence {
    Sequence::new(events.iter().map(|&(t, kind)| Event::new(t, kind)).collect())
}
