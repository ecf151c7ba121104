use crate::Event;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// An ordered, immutable recording.
///
/// Built once when a recording stops (or when loaded from storage) and only
/// read afterwards. Playback shares it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    events: Vec<Event>,
}

impl Sequence {
    /// Wrap captured events. Events must already be in capture order.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// The recorded events in capture order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time from the first event to the last.
    pub fn duration(&self) -> Duration {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => secs_to_duration(last.t - first.t),
            _ => Duration::ZERO,
        }
    }

    /// Offset of every event from the first one.
    ///
    /// The first offset is always zero. A timestamp that runs backwards is
    /// clamped to its predecessor's offset.
    pub fn offsets(&self) -> impl Iterator<Item = (Duration, &Event)> + '_ {
        let origin = self.events.first().map(|e| e.t).unwrap_or_default();
        let mut floor = Duration::ZERO;
        self.events.iter().map(move |event| {
            floor = floor.max(secs_to_duration(event.t - origin));
            (floor, event)
        })
    }
}

impl From<Vec<Event>> for Sequence {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}
