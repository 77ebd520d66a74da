//! The [`Envelope`] type, its constructors and scalar queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DynamicMark, DynamicPoint, TIME_EPSILON};
use crate::error::{Error, Result};

/// An immutable, normalized piecewise-linear curve over `[0, 1]`.
///
/// Built envelopes always satisfy: at least two points, the last point has
/// zero duration, durations sum to 1, and every `|level| <= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EnvelopeData", into = "EnvelopeData")]
pub struct Envelope {
    points: Vec<DynamicPoint>,
    absolute: bool,
}

/// Normalize a raw point list.
///
/// Durations are divided by their total. Levels are left alone unless the
/// largest magnitude exceeds 1, in which case every level is divided by it.
pub fn normalize(points: &[DynamicPoint]) -> Result<Vec<DynamicPoint>> {
    let mut total_duration = 0.0;
    let mut max_level: f64 = 0.0;
    for point in points {
        if !point.duration.is_finite() || !point.level.is_finite() {
            return Err(Error::InvalidEnvelope(format!(
                "non-finite point ({}, {})",
                point.level, point.duration
            )));
        }
        if point.duration < 0.0 {
            return Err(Error::InvalidEnvelope(format!(
                "negative duration {}",
                point.duration
            )));
        }
        total_duration += point.duration;
        max_level = max_level.max(point.level.abs());
    }
    if total_duration <= 0.0 {
        return Err(Error::InvalidEnvelope("total duration is zero".into()));
    }

    Ok(points
        .iter()
        .map(|p| {
            let level = if max_level == 0.0 {
                0.0
            } else if max_level > 1.0 {
                p.level / max_level
            } else {
                p.level
            };
            DynamicPoint::new(level, p.duration / total_duration)
        })
        .collect())
}

// Envelopes are never empty, so `len` has no `is_empty` partner.
#[allow(clippy::len_without_is_empty)]
impl Envelope {
    /// Build and normalize an envelope.
    pub fn new(points: Vec<DynamicPoint>, absolute: bool) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidEnvelope(format!(
                "need at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(last) = points.last() {
            if last.duration != 0.0 {
                return Err(Error::InvalidEnvelope(format!(
                    "final point must have zero duration, got {}",
                    last.duration
                )));
            }
        }
        let points = normalize(&points)?;
        Ok(Self { points, absolute })
    }

    /// Build from `(level, duration)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)], absolute: bool) -> Result<Self> {
        Self::new(pairs.iter().copied().map(DynamicPoint::from).collect(), absolute)
    }

    /// A flat envelope at `level`. Levels above 1 in magnitude are scaled to ±1.
    pub fn constant(level: f64, absolute: bool) -> Self {
        let level = if level.is_finite() { level.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            points: vec![DynamicPoint::new(level, 1.0), DynamicPoint::new(level, 0.0)],
            absolute,
        }
    }

    /// A relative, flat boost of `level` over whatever the ancestor plays.
    pub fn accent(level: f64) -> Self {
        Self::constant(level, false)
    }

    /// Flat, zero-offset, relative: contributes nothing when added.
    pub fn neutral() -> Self {
        Self::constant(0.0, false)
    }

    /// A flat envelope at a named dynamic level.
    pub fn mark(mark: DynamicMark, absolute: bool) -> Self {
        Self::constant(mark.level(), absolute)
    }

    pub fn points(&self) -> &[DynamicPoint] {
        &self.points
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Number of breakpoints (always at least 2).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Re-run normalization. Normalizing a built envelope changes nothing.
    pub fn normalized(&self) -> Result<Self> {
        Ok(Self {
            points: normalize(&self.points)?,
            absolute: self.absolute,
        })
    }

    pub fn initial_level(&self) -> f64 {
        self.points[0].level
    }

    pub fn final_level(&self) -> f64 {
        self.points[self.points.len() - 1].level
    }

    /// Time-weighted mean level (trapezoidal integral over the unit domain).
    pub fn average_level(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| (pair[0].level + pair[1].level) / 2.0 * pair[0].duration)
            .sum()
    }

    /// Breakpoints as `(time, level)` pairs on the absolute `[0, 1]` axis.
    pub fn breakpoints(&self) -> Vec<(f64, f64)> {
        let mut time = 0.0;
        self.points
            .iter()
            .map(|p| {
                let bp = (time, p.level);
                time += p.duration;
                bp
            })
            .collect()
    }

    /// Interpolated level at normalized time `t` (clamped to `[0, 1]`).
    ///
    /// At a vertical step the level after the step is returned.
    pub fn level_at(&self, t: f64) -> f64 {
        self.interpolate(t.clamp(0.0, 1.0))
    }

    /// Level at `t` on the segment that starts at or before it.
    fn interpolate(&self, t: f64) -> f64 {
        let mut segment_start = 0.0;
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let segment_end = segment_start + a.duration;
            if a.duration > 0.0 && t < segment_end {
                let frac = ((t - segment_start) / a.duration).clamp(0.0, 1.0);
                return a.level + (b.level - a.level) * frac;
            }
            segment_start = segment_end;
        }
        self.final_level()
    }

    /// Both one-sided limits at `t`, snapping onto any breakpoint within
    /// `TIME_EPSILON`. They differ only at a vertical step.
    pub(crate) fn limits_at(&self, t: f64) -> (f64, f64) {
        let breakpoints = self.breakpoints();
        let mut coincident = breakpoints
            .iter()
            .filter(|(time, _)| (time - t).abs() <= TIME_EPSILON)
            .map(|&(_, level)| level);
        if let Some(first) = coincident.next() {
            let last = coincident.last().unwrap_or(first);
            return (first, last);
        }
        let level = self.interpolate(t);
        (level, level)
    }

    /// Compare levels and durations within `tolerance`.
    pub fn approx_eq(&self, other: &Envelope, tolerance: f64) -> bool {
        self.absolute == other.absolute
            && self.points.len() == other.points.len()
            && self.points.iter().zip(&other.points).all(|(a, b)| {
                (a.level - b.level).abs() <= tolerance
                    && (a.duration - b.duration).abs() <= tolerance
            })
    }

    pub(crate) fn from_normalized(points: Vec<DynamicPoint>, absolute: bool) -> Self {
        Self { points, absolute }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::neutral()
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.absolute { "Absolute" } else { "Relative" };
        write!(f, "{kind} [")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", p.level, p.duration)?;
        }
        write!(f, "]")
    }
}

/// Serialized form of an envelope; validated and normalized on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnvelopeData {
    points: Vec<(f64, f64)>,
    #[serde(default)]
    absolute: bool,
}

impl TryFrom<EnvelopeData> for Envelope {
    type Error = Error;

    fn try_from(data: EnvelopeData) -> Result<Self> {
        Envelope::from_pairs(&data.points, data.absolute)
    }
}

impl From<Envelope> for EnvelopeData {
    fn from(env: Envelope) -> Self {
        Self {
            points: env.points.iter().map(|p| (p.level, p.duration)).collect(),
            absolute: env.absolute,
        }
    }
}
