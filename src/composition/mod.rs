//! Composition tree — the nested structure a performance is described in.
//!
//! Leaf-bearing material ([`Note`], [`Chord`], [`Gesture`]) is wrapped in the
//! closed [`Element`] variant. Arrangement containers ([`Track`], [`Group`],
//! [`Section`], [`Song`]) hold elements, tracks, groups and sections in turn.
//! Every node owns its children exclusively and is read-only once built.

pub mod arrangement;
pub mod element;

pub use arrangement::{Group, Section, Song, TempoPoint, Track};
pub use element::{Chord, Gesture, Note};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dynamics::Envelope;

/// Performance-style hint for how an event is articulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Articulation {
    Full,
    Staccato,
    Legato,
}

/// Identifies the instrument a track plays through (the score's instrument number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstrumentId(pub u32);

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instrument {}", self.0)
    }
}

/// A timed musical element inside a track: a note, a chord or a gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Note(Note),
    Chord(Chord),
    Gesture(Gesture),
}

impl Element {
    /// Offset from the position the parent places this element at.
    pub fn start(&self) -> f64 {
        match self {
            Self::Note(n) => n.start,
            Self::Chord(c) => c.start,
            Self::Gesture(g) => g.start,
        }
    }

    /// Explicit or derived duration.
    pub fn duration(&self) -> f64 {
        match self {
            Self::Note(n) => n.duration,
            Self::Chord(c) => c.duration(),
            Self::Gesture(g) => g.duration(),
        }
    }

    pub fn dynamics(&self) -> &Envelope {
        match self {
            Self::Note(n) => &n.dynamics,
            Self::Chord(c) => &c.dynamics,
            Self::Gesture(g) => &g.dynamics,
        }
    }

    /// The element's own articulation; `None` inherits from the parent.
    pub fn articulation(&self) -> Option<Articulation> {
        match self {
            Self::Note(n) => n.articulation,
            Self::Chord(c) => c.articulation,
            Self::Gesture(g) => g.articulation,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Note(_) => "note",
            Self::Chord(_) => "chord",
            Self::Gesture(_) => "gesture",
        }
    }

    /// Number of notes in this element's subtree.
    pub fn note_count(&self) -> usize {
        match self {
            Self::Note(_) => 1,
            Self::Chord(c) => c.children.iter().map(Element::note_count).sum(),
            Self::Gesture(g) => g.children.iter().map(Element::note_count).sum(),
        }
    }
}

impl From<Note> for Element {
    fn from(note: Note) -> Self {
        Self::Note(note)
    }
}

impl From<Chord> for Element {
    fn from(chord: Chord) -> Self {
        Self::Chord(chord)
    }
}

impl From<Gesture> for Element {
    fn from(gesture: Gesture) -> Self {
        Self::Gesture(gesture)
    }
}
