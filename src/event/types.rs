//! Output records — one per emitted note, grouped per section.

use std::fmt;

use serde::Serialize;

use super::timeline::Timeline;
use crate::composition::{InstrumentId, TempoPoint};

/// A single note event as the score writer receives it.
///
/// `params` is `[instrument_id, start, duration, dynamics.., pitch..]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEvent {
    /// Index of the emitting track within its section, in emission order.
    pub track: usize,
    pub params: Vec<f64>,
}

impl ScoreEvent {
    pub fn new(track: usize, params: Vec<f64>) -> Self {
        Self { track, params }
    }

    pub fn instrument(&self) -> InstrumentId {
        InstrumentId(self.params.first().copied().unwrap_or(0.0) as u32)
    }

    pub fn start(&self) -> f64 {
        self.params.get(1).copied().unwrap_or(0.0)
    }

    pub fn duration(&self) -> f64 {
        self.params.get(2).copied().unwrap_or(0.0)
    }

    pub fn end(&self) -> f64 {
        self.start() + self.duration()
    }

    /// Parameters after the time fields: dynamics, then pitch.
    pub fn tail(&self) -> &[f64] {
        self.params.get(3..).unwrap_or(&[])
    }
}

impl fmt::Display for ScoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// The events of one section together with its pass-through tempo map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub name: String,
    pub tempo: Vec<TempoPoint>,
    pub duration: f64,
    /// Events in emission order (depth-first, track by track).
    pub events: Vec<ScoreEvent>,
}

impl RenderedSection {
    /// Events stably sorted by start time.
    pub fn sorted_events(&self) -> Vec<ScoreEvent> {
        let mut timeline = Timeline::new();
        timeline.insert_batch(self.events.iter().cloned());
        timeline.into_events()
    }

    /// Events emitted by one track, in its own time order.
    pub fn track_events(&self, track: usize) -> impl Iterator<Item = &ScoreEvent> {
        self.events.iter().filter(move |e| e.track == track)
    }
}

/// A rendered song.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub name: String,
    pub composer: String,
    pub sections: Vec<RenderedSection>,
}

impl Score {
    pub fn event_count(&self) -> usize {
        self.sections.iter().map(|s| s.events.len()).sum()
    }

    /// Every event of every section, section by section.
    pub fn events(&self) -> impl Iterator<Item = &ScoreEvent> {
        self.sections.iter().flat_map(|s| s.events.iter())
    }
}
