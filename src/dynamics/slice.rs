//! Envelope slicing — extract a sub-range and re-express it on its own unit domain.

use super::{DynamicPoint, Envelope, TIME_EPSILON};
use crate::error::{Error, Result};

impl Envelope {
    /// Extract the sub-curve covering `[start, start + duration]`.
    ///
    /// The result is a standalone envelope whose `[0, 1]` domain spans exactly
    /// that range. Durations reaching past the end are clamped. A zero-length
    /// slice is a constant envelope at the level found at `start`.
    ///
    /// A boundary within `TIME_EPSILON` of a breakpoint snaps onto it: the
    /// start takes the level after a step there, the end the level before it.
    pub fn slice(&self, start: f64, duration: f64) -> Result<Envelope> {
        if !start.is_finite()
            || !duration.is_finite()
            || !(0.0..=1.0).contains(&start)
            || duration < 0.0
        {
            return Err(Error::InvalidSliceRange { start, duration });
        }
        let duration = duration.min(1.0 - start);
        let end = start + duration;

        if duration <= 0.0 {
            let (_, level) = self.limits_at(start);
            return Ok(Envelope::from_normalized(
                vec![DynamicPoint::new(level, 1.0), DynamicPoint::new(level, 0.0)],
                self.is_absolute(),
            ));
        }

        let (_, start_level) = self.limits_at(start);
        let (end_level, _) = self.limits_at(end);

        let mut timed = vec![(start, start_level)];
        timed.extend(
            self.breakpoints()
                .into_iter()
                .filter(|&(time, _)| time > start + TIME_EPSILON && time < end - TIME_EPSILON),
        );
        timed.push((end, end_level));

        let points = timed
            .iter()
            .enumerate()
            .map(|(i, &(time, level))| {
                let span = timed.get(i + 1).map_or(0.0, |&(next, _)| next - time);
                DynamicPoint::new(level, span / duration)
            })
            .collect();

        Ok(Envelope::from_normalized(points, self.is_absolute()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn triangle() -> Envelope {
        Envelope::from_pairs(&[(0.0, 1.0), (1.0, 1.0), (0.0, 0.0)], false).unwrap()
    }

    #[test]
    fn full_range_is_identity() {
        let env = Envelope::from_pairs(&[(0.25, 1.0), (0.6, 1.0), (0.5, 1.0), (0.15, 0.0)], true)
            .unwrap();
        let sliced = env.slice(0.0, 1.0).unwrap();
        assert!(sliced.approx_eq(&env, 1e-9), "{sliced} != {env}");
    }

    #[test]
    fn centre_slice_of_triangle() {
        let sliced = triangle().slice(0.25, 0.5).unwrap();
        assert_eq!(sliced.len(), 3);
        let p = sliced.points();
        assert_approx_eq!(p[0].level, 0.5);
        assert_approx_eq!(p[0].duration, 0.5);
        assert_approx_eq!(p[1].level, 1.0);
        assert_approx_eq!(p[1].duration, 0.5);
        assert_approx_eq!(p[2].level, 0.5);
        assert_approx_eq!(p[2].duration, 0.0);
    }

    #[test]
    fn slice_within_one_segment_is_linear() {
        let sliced = triangle().slice(0.1, 0.2).unwrap();
        assert_eq!(sliced.len(), 2);
        assert_approx_eq!(sliced.initial_level(), 0.2);
        assert_approx_eq!(sliced.final_level(), 0.6);
        assert_approx_eq!(sliced.points()[0].duration, 1.0);
    }

    #[test]
    fn boundaries_on_breakpoints_do_not_duplicate() {
        let sliced = triangle().slice(0.5, 0.5).unwrap();
        assert_eq!(sliced.len(), 2);
        assert_approx_eq!(sliced.initial_level(), 1.0);
        assert_approx_eq!(sliced.final_level(), 0.0);

        let sliced = triangle().slice(0.0, 0.5).unwrap();
        assert_eq!(sliced.len(), 2);
        assert_approx_eq!(sliced.initial_level(), 0.0);
        assert_approx_eq!(sliced.final_level(), 1.0);
    }

    #[test]
    fn overlong_duration_is_clamped() {
        let sliced = triangle().slice(0.75, 0.9).unwrap();
        assert_eq!(sliced.len(), 2);
        assert_approx_eq!(sliced.initial_level(), 0.5);
        assert_approx_eq!(sliced.final_level(), 0.0);
    }

    #[test]
    fn zero_length_slice_is_constant() {
        let sliced = triangle().slice(0.25, 0.0).unwrap();
        assert_approx_eq!(sliced.initial_level(), 0.5);
        assert_approx_eq!(sliced.final_level(), 0.5);

        let at_end = triangle().slice(1.0, 0.5).unwrap();
        assert_approx_eq!(at_end.average_level(), 0.0);
    }

    #[test]
    fn preserves_absolute_flag() {
        let env = Envelope::constant(0.6, true);
        assert!(env.slice(0.2, 0.3).unwrap().is_absolute());
        assert!(!triangle().slice(0.2, 0.3).unwrap().is_absolute());
    }

    #[test]
    fn constant_is_slice_invariant() {
        let env = Envelope::constant(0.6, true);
        let sliced = env.slice(0.25, 0.75).unwrap();
        assert_approx_eq!(sliced.average_level(), 0.6);
    }

    #[test]
    fn interior_step_is_kept() {
        let env =
            Envelope::from_pairs(&[(0.2, 1.0), (0.2, 0.0), (0.8, 1.0), (0.8, 0.0)], true).unwrap();
        let sliced = env.slice(0.25, 0.5).unwrap();
        let levels: Vec<f64> = sliced.points().iter().map(|p| p.level).collect();
        assert_eq!(levels.len(), 4);
        assert_approx_eq!(levels[0], 0.2);
        assert_approx_eq!(levels[1], 0.2);
        assert_approx_eq!(levels[2], 0.8);
        assert_approx_eq!(levels[3], 0.8);
        assert_approx_eq!(sliced.points()[1].duration, 0.0);
    }

    #[test]
    fn boundary_a_rounding_error_from_a_step_snaps_onto_it() {
        // Step from 0.2 to 0.8 at t = 0.5.
        let env =
            Envelope::from_pairs(&[(0.2, 1.0), (0.2, 0.0), (0.8, 1.0), (0.8, 0.0)], true).unwrap();
        let before = 0.5 - 4.0 * f64::EPSILON;
        let after = 0.5 + 4.0 * f64::EPSILON;

        for start in [before, after] {
            let tail = env.slice(start, 1.0 - start).unwrap();
            assert_eq!(tail.len(), 2, "{tail}");
            assert_approx_eq!(tail.initial_level(), 0.8);
            assert_approx_eq!(tail.average_level(), 0.8);
        }
        for end in [before, after] {
            let head = env.slice(0.0, end).unwrap();
            assert_eq!(head.len(), 2, "{head}");
            assert_approx_eq!(head.final_level(), 0.2);
            assert_approx_eq!(head.average_level(), 0.2);
        }
        assert_approx_eq!(env.slice(before, 0.0).unwrap().average_level(), 0.8);
    }

    #[test]
    fn rejects_out_of_range() {
        let env = triangle();
        assert!(matches!(
            env.slice(-0.1, 0.5),
            Err(Error::InvalidSliceRange { .. })
        ));
        assert!(matches!(
            env.slice(1.5, 0.0),
            Err(Error::InvalidSliceRange { .. })
        ));
        assert!(matches!(
            env.slice(0.1, -0.5),
            Err(Error::InvalidSliceRange { .. })
        ));
        assert!(matches!(
            env.slice(f64::NAN, 0.5),
            Err(Error::InvalidSliceRange { .. })
        ));
    }
}
