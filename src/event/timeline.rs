//! Time-ordered event storage.
//!
//! Batch insertion defers sorting until the events are taken out. Sorting is
//! stable, so simultaneous events keep the order they were emitted in and
//! output is reproducible.

use super::types::ScoreEvent;

/// A start-time ordered collection of score events.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<ScoreEvent>,
    dirty: bool,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            dirty: false,
        }
    }

    /// Insert a batch of events. Defers sorting until they are read.
    pub fn insert_batch(&mut self, events: impl IntoIterator<Item = ScoreEvent>) {
        self.events.extend(events);
        self.dirty = true;
    }

    /// Consume the timeline, returning its events in start-time order.
    pub fn into_events(mut self) -> Vec<ScoreEvent> {
        if self.dirty {
            self.events.sort_by(|a, b| a.start().total_cmp(&b.start()));
        }
        self.events
    }
}
