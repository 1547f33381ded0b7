//! This module contains [`Smoothed`], a scalar that eases towards a target over time.

use serde::{Deserialize, Serialize};

/// Move `current` towards `target` by `rate * delta` of the remaining distance.
///
/// The step is capped at the whole distance, so a long frame lands exactly on the target instead
/// of overshooting it. A negative or NaN `delta` doesn't move anything.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    let factor = (rate * delta.max(0.)).clamp(0., 1.);
    current + (target - current) * factor
}

/// A scalar with a current value that follows a target value with exponential smoothing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Smoothed {
    pub current: f32,
    pub target: f32,
}

impl Smoothed {
    /// A value that's already at its target.
    #[inline]
    pub fn settled(value: f32) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    /// Advance the current value towards the target. See [`approach`].
    #[inline]
    pub fn step(&mut self, rate: f32, delta: f32) {
        self.current = approach(self.current, self.target, rate, delta);
    }

    /// How far the current value still has to go.
    #[inline]
    pub fn error(&self) -> f32 {
        (self.target - self.current).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_monotonically_without_overshoot() {
        for (start, target) in [(0., 1.), (1., 0.), (32., 20.), (-0.2, 0.005)] {
            let mut value = Smoothed {
                current: start,
                target,
            };
            let mut previous_error = value.error();

            for _ in 0..600 {
                value.step(3., 1. / 60.);
                let error = value.error();

                assert!(error <= previous_error, "error grew from {previous_error} to {error}");
                if start < target {
                    assert!(value.current <= target, "overshot {target}: {}", value.current);
                } else {
                    assert!(value.current >= target, "overshot {target}: {}", value.current);
                }
                previous_error = error;
            }

            assert!(value.error() < 1e-4, "{value:?} didn't converge");
        }
    }

    #[test]
    fn long_frames_land_on_the_target() {
        let mut value = Smoothed {
            current: 0.,
            target: 1.,
        };
        value.step(3., 2.);
        assert_eq!(value.current, 1.);
    }

    #[test]
    fn bad_deltas_do_nothing() {
        assert_eq!(approach(0.25, 1., 3., -1.), 0.25);
        assert_eq!(approach(0.25, 1., 3., f32::NAN), 0.25);
        assert_eq!(approach(0.25, 1., 3., 0.), 0.25);
    }

    #[test]
    fn settled_values_stay_put() {
        let mut value = Smoothed::settled(32.);
        value.step(2., 1. / 60.);
        assert_eq!(value, Smoothed::settled(32.));
    }
}
