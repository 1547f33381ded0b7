//! This module contains the staged opening and closing of the envelope that appears when the tree
//! explodes.
//!
//! The envelope has three parts that move in a strict order. Opening, it grows to full size, then
//! the flap swings open once it's mostly grown, then the paper slides out once the flap is half
//! open. Closing undoes that faster: the paper and flap go back together, and the envelope only
//! shrinks once the flap is nearly shut.

use crate::{config::EnvelopeConfig, smoothing::approach};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;
use ww_frame::{EnvelopePose, InstanceTransform};

/// Where the envelope is in its open/close cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum EnvelopePhase {
    /// Hidden, with every part at 0.
    Closed,

    /// Moving towards fully open.
    Opening,

    /// Fully open, with every part at 1.
    Unfurled,

    /// Moving towards closed.
    Closing,
}

/// The phase and progress of the envelope.
///
/// Each part is in `[0, 1]`, where 0 is closed and 1 is open.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeState {
    phase: EnvelopePhase,
    scale: f32,
    flap: f32,
    paper: f32,
}

impl Default for EnvelopeState {
    fn default() -> Self {
        Self {
            phase: EnvelopePhase::Closed,
            scale: 0.,
            flap: 0.,
            paper: 0.,
        }
    }
}

impl EnvelopeState {
    #[inline]
    pub fn phase(&self) -> EnvelopePhase {
        self.phase
    }

    /// How grown the envelope is.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// How open the flap is.
    #[inline]
    pub fn flap(&self) -> f32 {
        self.flap
    }

    /// How far out the paper is.
    #[inline]
    pub fn paper(&self) -> f32 {
        self.paper
    }

    /// Advance the envelope by `delta` seconds with the given explosion factor, returning the new
    /// phase if it changed.
    ///
    /// Above [`EnvelopeConfig::open_above`] the envelope opens and below
    /// [`EnvelopeConfig::close_below`] it closes. Between the two, nothing moves.
    pub fn advance(
        &mut self,
        explosion: f32,
        delta: f32,
        config: &EnvelopeConfig,
    ) -> Option<EnvelopePhase> {
        let old_phase = self.phase;
        let wants_open = explosion > config.open_above;
        let wants_close = explosion < config.close_below;

        match self.phase {
            EnvelopePhase::Closed | EnvelopePhase::Closing if wants_open => {
                self.phase = EnvelopePhase::Opening;
            }
            EnvelopePhase::Opening | EnvelopePhase::Unfurled if wants_close => {
                self.phase = EnvelopePhase::Closing;
            }
            _ => (),
        }

        match self.phase {
            EnvelopePhase::Opening if wants_open => self.open(delta, config),
            EnvelopePhase::Closing if wants_close => self.close(delta, config),
            _ => (),
        }

        (self.phase != old_phase).then(|| {
            debug!(from = %old_phase, to = %self.phase, "Envelope changed phase");
            self.phase
        })
    }

    fn open(&mut self, delta: f32, config: &EnvelopeConfig) {
        self.scale = approach(self.scale, 1., config.scale_rate, delta);
        if self.scale > config.flap_after_scale {
            self.flap = approach(self.flap, 1., config.flap_rate, delta);
        }
        if self.flap > config.paper_after_flap {
            self.paper = approach(self.paper, 1., config.paper_rate, delta);
        }

        let done = 1. - config.settle_tolerance;
        if self.scale >= done && self.flap >= done && self.paper >= done {
            self.scale = 1.;
            self.flap = 1.;
            self.paper = 1.;
            self.phase = EnvelopePhase::Unfurled;
        }
    }

    fn close(&mut self, delta: f32, config: &EnvelopeConfig) {
        self.paper = approach(self.paper, 0., config.close_rate, delta);
        self.flap = approach(self.flap, 0., config.close_rate, delta);
        if self.flap < config.shrink_below_flap {
            self.scale = approach(self.scale, 0., config.close_rate, delta);
        }

        let done = config.settle_tolerance;
        if self.scale <= done && self.flap <= done && self.paper <= done {
            self.scale = 0.;
            self.flap = 0.;
            self.paper = 0.;
            self.phase = EnvelopePhase::Closed;
        }
    }

    /// The pose of the envelope, relative to the tree group.
    pub fn pose(&self, config: &EnvelopeConfig) -> EnvelopePose {
        EnvelopePose {
            transform: InstanceTransform {
                translation: Vec3::new(0., config.height, 0.),
                rotation: Quat::from_rotation_x(config.tilt),
                scale: Vec3::splat(self.scale),
            },
            flap_angle: -config.max_flap_angle * self.flap,
            paper_offset: config.paper_closed_offset + config.paper_travel * self.paper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    const DELTA: f32 = 1. / 60.;

    #[test]
    fn opens_in_order() {
        let config = EnvelopeConfig::default();
        let mut envelope = EnvelopeState::default();
        let mut phases = vec![envelope.phase()];

        for _ in 0..60 * 20 {
            let before = envelope;
            if let Some(phase) = envelope.advance(1., DELTA, &config) {
                phases.push(phase);
            }

            if envelope.flap > before.flap {
                assert!(envelope.scale > config.flap_after_scale, "{envelope:?}");
            }
            if envelope.paper > before.paper {
                assert!(envelope.flap > config.paper_after_flap, "{envelope:?}");
            }
        }

        assert_eq!(phases, [EnvelopePhase::Closed, EnvelopePhase::Opening, EnvelopePhase::Unfurled]);
        assert_eq!((envelope.scale, envelope.flap, envelope.paper), (1., 1., 1.));
    }

    #[test]
    fn closes_in_order() {
        let config = EnvelopeConfig::default();
        let mut envelope = EnvelopeState::default();
        for _ in 0..60 * 20 {
            envelope.advance(1., DELTA, &config);
        }
        assert_eq!(envelope.phase(), EnvelopePhase::Unfurled);

        assert_eq!(envelope.advance(0., DELTA, &config), Some(EnvelopePhase::Closing));
        for _ in 0..60 * 10 {
            let before = envelope;
            envelope.advance(0., DELTA, &config);

            if envelope.scale < before.scale {
                assert!(envelope.flap < config.shrink_below_flap, "{envelope:?}");
            }
        }

        assert_eq!(envelope, EnvelopeState::default());
    }

    #[test]
    fn closing_is_faster_than_opening() {
        let config = EnvelopeConfig::default();

        let mut envelope = EnvelopeState::default();
        let mut ticks_to_open = 0;
        while envelope.phase() != EnvelopePhase::Unfurled {
            envelope.advance(1., DELTA, &config);
            ticks_to_open += 1;
        }

        let mut ticks_to_close = 0;
        while envelope.phase() != EnvelopePhase::Closed {
            envelope.advance(0., DELTA, &config);
            ticks_to_close += 1;
        }

        assert!(ticks_to_close < ticks_to_open, "{ticks_to_close} >= {ticks_to_open}");
    }

    #[test]
    fn dead_zone_freezes_progress() {
        let config = EnvelopeConfig::default();
        let mut envelope = EnvelopeState::default();
        for _ in 0..30 {
            envelope.advance(1., DELTA, &config);
        }
        let frozen = envelope;
        assert_eq!(frozen.phase(), EnvelopePhase::Opening);

        for _ in 0..100 {
            assert_eq!(envelope.advance(0.55, DELTA, &config), None);
        }
        assert_eq!(envelope, frozen);
    }

    #[test]
    fn reopening_midway_through_closing() {
        let config = EnvelopeConfig::default();
        let mut envelope = EnvelopeState::default();
        for _ in 0..60 * 20 {
            envelope.advance(1., DELTA, &config);
        }
        for _ in 0..5 {
            envelope.advance(0., DELTA, &config);
        }
        assert_eq!(envelope.phase(), EnvelopePhase::Closing);
        let flap = envelope.flap();

        assert_eq!(envelope.advance(1., DELTA, &config), Some(EnvelopePhase::Opening));
        assert!(envelope.flap() > flap);
    }

    #[test]
    fn pose_follows_progress() {
        let config = EnvelopeConfig::default();

        let closed = EnvelopeState::default().pose(&config);
        assert_eq!(closed.transform.scale, Vec3::ZERO);
        assert_eq!(closed.flap_angle, 0.);
        assert!(approx_eq!(f32, closed.paper_offset, -1.2));
        assert_eq!(closed.transform.translation, Vec3::new(0., 4., 0.));

        let open = EnvelopeState {
            phase: EnvelopePhase::Unfurled,
            scale: 1.,
            flap: 1.,
            paper: 1.,
        }
        .pose(&config);
        assert_eq!(open.transform.scale, Vec3::ONE);
        assert!(approx_eq!(f32, open.flap_angle, -2.5));
        assert!(approx_eq!(f32, open.paper_offset, 1.2, epsilon = 1e-6));
    }
}
