//! Dynamics — piecewise-linear amplitude envelopes over a normalized time domain.
//!
//! An [`Envelope`] describes amplitude over the life of a note, chord, gesture
//! or any larger container. Levels are fractions of full scale and durations
//! are fractions of the owning event's duration; both are normalized when the
//! envelope is built. An envelope is either *absolute* (final amplitudes) or
//! *relative* (offsets layered on an ancestor's absolute envelope with
//! [`Envelope::add`]).

pub mod envelope;
pub mod slice;
pub mod sum;

pub use envelope::{normalize, Envelope};

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing breakpoint times.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

/// Offset applied by a plain accent mark.
pub const DEFAULT_ACCENT: f64 = 0.1;

/// A single breakpoint: a level held as the start of a segment lasting `duration`.
///
/// The last point of an envelope has `duration == 0` and marks the end of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicPoint {
    pub level: f64,
    pub duration: f64,
}

impl DynamicPoint {
    pub fn new(level: f64, duration: f64) -> Self {
        Self { level, duration }
    }
}

impl From<(f64, f64)> for DynamicPoint {
    fn from((level, duration): (f64, f64)) -> Self {
        Self { level, duration }
    }
}

/// Conventional dynamic markings and the amplitude each maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicMark {
    Silent,
    Ppp,
    Pp,
    P,
    Mp,
    Mf,
    F,
    Ff,
    Fff,
}

impl DynamicMark {
    /// Amplitude level for this marking (0.0–0.8).
    pub fn level(self) -> f64 {
        match self {
            Self::Silent => 0.0,
            Self::Ppp => 0.1,
            Self::Pp => 0.2,
            Self::P => 0.3,
            Self::Mp => 0.4,
            Self::Mf => 0.5,
            Self::F => 0.6,
            Self::Ff => 0.7,
            Self::Fff => 0.8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Ppp => "ppp",
            Self::Pp => "pp",
            Self::P => "p",
            Self::Mp => "mp",
            Self::Mf => "mf",
            Self::F => "f",
            Self::Ff => "ff",
            Self::Fff => "fff",
        }
    }
}
