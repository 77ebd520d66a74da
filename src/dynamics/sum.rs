//! Envelope addition — layer a relative envelope onto a base.
//!
//! Both operands are treated as piecewise-linear functions over `[0, 1]`.
//! The union of their breakpoint times becomes the breakpoint set of the
//! sum, each time appearing once (twice where either operand steps
//! vertically), so the sum is the same whichever operand is the base.

use super::{DynamicPoint, Envelope, TIME_EPSILON};
use crate::error::{Error, Result};

impl Envelope {
    /// Pointwise sum of two envelopes, clamped into `[0, 1]`.
    ///
    /// At most one operand may be absolute; the result is absolute if either is.
    pub fn add(&self, other: &Envelope) -> Result<Envelope> {
        if self.is_absolute() && other.is_absolute() {
            return Err(Error::IncompatibleAbsoluteCombination);
        }
        let (base, modifier) = if other.is_absolute() {
            (other, self)
        } else {
            (self, other)
        };

        let mut times: Vec<f64> = base
            .breakpoints()
            .into_iter()
            .chain(modifier.breakpoints())
            .map(|(time, _)| time.clamp(0.0, 1.0))
            .collect();
        times.sort_by(f64::total_cmp);
        times.dedup_by(|next, kept| (*next - *kept).abs() <= TIME_EPSILON);
        if let Some(first) = times.first_mut() {
            *first = 0.0;
        }
        if let Some(last) = times.last_mut() {
            *last = 1.0;
        }

        let mut summed: Vec<(f64, f64)> = Vec::with_capacity(times.len() + 2);
        for &time in &times {
            let (base_before, base_after) = base.limits_at(time);
            let (mod_before, mod_after) = modifier.limits_at(time);
            let before = base_before + mod_before;
            let after = base_after + mod_after;
            summed.push((time, before));
            if (after - before).abs() > TIME_EPSILON {
                summed.push((time, after));
            }
        }

        let points = summed
            .iter()
            .enumerate()
            .map(|(i, &(time, level))| {
                let span = summed.get(i + 1).map_or(0.0, |&(next, _)| next - time);
                DynamicPoint::new(level.clamp(0.0, 1.0), span)
            })
            .collect();

        Ok(Envelope::from_normalized(
            points,
            base.is_absolute() || modifier.is_absolute(),
        ))
    }
}
