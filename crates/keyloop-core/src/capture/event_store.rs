use crate::{Event, Sequence};

/// Maximum events kept for one recording.
///
/// Events past the cap are dropped; the beginning of the recording is kept.
pub(crate) const MAX_CAPTURED_EVENTS: usize = 500_000;

/// Append-only buffer for the recording in progress.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    dropped: usize,
}

impl EventStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything captured so far.
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    /// Append an event. Returns `false` once the store is full.
    pub fn push(&mut self, event: Event) -> bool {
        if self.events.len() >= MAX_CAPTURED_EVENTS {
            self.dropped += 1;
            return false;
        }
        self.events.push(event);
        true
    }

    /// Events captured so far.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events rejected because the store was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Hand the captured events over as a sequence, leaving the store empty.
    pub fn finalize(&mut self) -> Sequence {
        self.dropped = 0;
        Sequence::new(std::mem::take(&mut self.events))
    }
}
