//! Notes, chords and gestures.

use serde::{Deserialize, Serialize};

use super::{Articulation, Element};
use crate::dynamics::Envelope;

/// A single sounding event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub start: f64,
    pub duration: f64,
    #[serde(default)]
    pub dynamics: Envelope,
    #[serde(default)]
    pub articulation: Option<Articulation>,
    /// Pitch in whatever notation the instrument reads (e.g. octave.pitch-class).
    #[serde(default)]
    pub pitch: Option<f64>,
}

impl Note {
    pub fn new(duration: f64) -> Self {
        Self {
            start: 0.0,
            duration,
            dynamics: Envelope::neutral(),
            articulation: None,
            pitch: None,
        }
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn with_dynamics(mut self, dynamics: Envelope) -> Self {
        self.dynamics = dynamics;
        self
    }

    pub fn with_articulation(mut self, articulation: Articulation) -> Self {
        self.articulation = Some(articulation);
        self
    }
}

/// Elements that sound simultaneously.
///
/// Duration is the longest child's unless overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    #[serde(default)]
    pub start: f64,
    #[serde(default, rename = "duration")]
    pub explicit_duration: Option<f64>,
    #[serde(default)]
    pub dynamics: Envelope,
    #[serde(default)]
    pub articulation: Option<Articulation>,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Chord {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            start: 0.0,
            explicit_duration: None,
            dynamics: Envelope::neutral(),
            articulation: None,
            children,
        }
    }

    pub fn duration(&self) -> f64 {
        self.explicit_duration.unwrap_or_else(|| {
            self.children
                .iter()
                .map(Element::duration)
                .fold(0.0, f64::max)
        })
    }

    pub fn with_child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.explicit_duration = Some(duration);
        self
    }

    pub fn with_dynamics(mut self, dynamics: Envelope) -> Self {
        self.dynamics = dynamics;
        self
    }

    pub fn with_articulation(mut self, articulation: Articulation) -> Self {
        self.articulation = Some(articulation);
        self
    }
}

/// Elements that sound one after another, e.g. a phrase.
///
/// Duration is the sum of the children's unless overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    #[serde(default)]
    pub start: f64,
    #[serde(default, rename = "duration")]
    pub explicit_duration: Option<f64>,
    #[serde(default)]
    pub dynamics: Envelope,
    #[serde(default)]
    pub articulation: Option<Articulation>,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Gesture {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            start: 0.0,
            explicit_duration: None,
            dynamics: Envelope::neutral(),
            articulation: None,
            children,
        }
    }

    pub fn duration(&self) -> f64 {
        self.explicit_duration
            .unwrap_or_else(|| self.children.iter().map(Element::duration).sum())
    }

    pub fn with_child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.explicit_duration = Some(duration);
        self
    }

    pub fn with_dynamics(mut self, dynamics: Envelope) -> Self {
        self.dynamics = dynamics;
        self
    }

    pub fn with_articulation(mut self, articulation: Articulation) -> Self {
        self.articulation = Some(articulation);
        self
    }
}
