//! This module contains [`ControlState`], the smoothed scalars that gestures steer.

use crate::{config::ControlConfig, envelope::EnvelopeState, smoothing::Smoothed};
use serde::{Deserialize, Serialize};
use ww_gesture::GestureDescriptor;

/// Every scalar that gestures control, each with a current value and a target.
///
/// Gestures only ever change the targets (see [`ControlState::retarget`]). The current values
/// then follow the targets over time (see [`ControlState::advance`]).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// How exploded the tree is, in `[0, 1]`.
    pub explosion: Smoothed,

    /// How fast the tree spins, in radians per reference frame.
    pub rotation_speed: Smoothed,

    /// How far the camera is from the origin.
    pub zoom: Smoothed,

    /// The staged opening and closing of the envelope.
    pub envelope: EnvelopeState,
}

impl ControlState {
    /// The state at startup, with every value already at its target.
    pub fn new(config: &ControlConfig) -> Self {
        Self {
            explosion: Smoothed::settled(config.initial_explosion.clamp(0., 1.)),
            rotation_speed: Smoothed::settled(config.initial_rotation_speed),
            zoom: Smoothed::settled(config.base_zoom.clamp(config.min_zoom, config.max_zoom)),
            envelope: EnvelopeState::default(),
        }
    }

    /// Set the targets from the latest gesture, where `None` means that there's no hand.
    ///
    /// Without a hand, the tree drifts round at the idle speed and everything else keeps its
    /// target. A hand that's neither a fist nor open keeps the explosion target too.
    pub fn retarget(&mut self, gesture: Option<&GestureDescriptor>, config: &ControlConfig) {
        let Some(gesture) = gesture else {
            self.rotation_speed.target = config.idle_rotation_speed;
            return;
        };

        if gesture.is_fist {
            self.explosion.target = 0.;
        } else if gesture.is_open {
            self.explosion.target = 1.;
        }

        self.rotation_speed.target = (gesture.position.x - 0.5) * config.rotation_gain;
        self.zoom.target = (config.base_zoom + gesture.position.z * config.zoom_depth_gain)
            .clamp(config.min_zoom, config.max_zoom);
    }

    /// Move every current value towards its target by `delta` seconds.
    ///
    /// This doesn't touch the envelope, since that follows the explosion factor rather than a
    /// target of its own.
    pub fn advance(&mut self, delta: f32, config: &ControlConfig) {
        self.explosion.step(config.explosion_rate, delta);
        self.rotation_speed.step(config.rotation_rate, delta);
        self.zoom.step(config.zoom_rate, delta);
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(&ControlConfig::default())
    }
}
