use crate::{Event, EventKind, Sequence, capture::EventStore};

use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use tracing::{error, info, instrument, trace, warn};
use uuid::Uuid;

/// Feeds global input events into the event store while armed.
///
/// The input hooks stay installed for the lifetime of the process and call
/// [`Capturer::record`] for everything they see; the armed flag decides
/// whether the event is kept. Toggling recording never installs or removes a
/// hook.
#[derive(Debug)]
pub struct Capturer {
    store: Mutex<EventStore>,
    armed: AtomicBool,
    origin: Instant,
}

impl Capturer {
    /// Disarmed capturer whose clock starts now.
    pub fn new() -> Self {
        Self {
            store: Mutex::new(EventStore::new()),
            armed: AtomicBool::new(false),
            origin: Instant::now(),
        }
    }

    /// Clear the store and start keeping events.
    ///
    /// Returns an id for correlating this recording in logs.
    #[instrument(skip(self))]
    pub fn arm(&self) -> Uuid {
        let recording_id = Uuid::new_v4();
        self.lock_store().clear();
        self.armed.store(true, Ordering::Release);

        info!(recording_id = %recording_id, "Capture armed");

        recording_id
    }

    /// Stop keeping events and return what was captured.
    #[instrument(skip(self))]
    pub fn disarm(&self) -> Sequence {
        // Clear the flag before taking the lock so a hook callback that is
        // already waiting on the lock sees it and backs off.
        self.armed.store(false, Ordering::Release);

        let mut store = self.lock_store();
        if store.dropped() > 0 {
            warn!(
                dropped = store.dropped(),
                "Recording hit the event cap, later events were dropped"
            );
        }
        let sequence = store.finalize();

        info!(event_count = sequence.len(), "Capture disarmed");

        sequence
    }

    /// Whether events are currently being kept.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Number of events captured in the current recording.
    pub fn captured(&self) -> usize {
        self.lock_store().len()
    }

    /// Hook entry point. Returns whether the event was kept.
    ///
    /// Safe to call from any hook-delivery thread at any time.
    pub fn record(&self, kind: EventKind) -> bool {
        if !self.armed.load(Ordering::Acquire) {
            return false;
        }

        let mut store = self.lock_store();
        if !self.armed.load(Ordering::Acquire) {
            return false;
        }

        // Timestamp under the lock so capture order and time order agree
        // across hook threads.
        let t = self.origin.elapsed().as_secs_f64();
        let kept = store.push(Event::new(t, kind));
        if !kept && store.dropped() == 1 {
            warn!("Event store full, dropping further events");
        }
        if kept {
            trace!(event = ?kind, t, "Captured");
        }
        kept
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, EventStore> {
        // A poisoned store still holds valid events; keep using it.
        self.store.lock().unwrap_or_else(|e| {
            error!("Event store lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

impl Default for Capturer {
    fn default() -> Self {
        Self::new()
    }
}
