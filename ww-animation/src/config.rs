//! This module contains [`SceneConfig`] and the configs of its parts.
//!
//! Every config is `#[serde(default)]`, so a config file only needs to mention the values that
//! differ from the defaults.

use crate::population::SpinStyle;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use ww_layout::LayoutParams;

/// The config for the whole animated scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub control: ControlConfig,
    pub reveal: RevealConfig,
    pub envelope: EnvelopeConfig,
    pub tree: TreeConfig,
    pub sleigh: SleighConfig,
    pub dust: DustConfig,
    pub camera: CameraConfig,
}

/// How gestures set the control targets, and how fast the controls follow them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Smoothing rate of the explosion factor, per second.
    pub explosion_rate: f32,

    /// Smoothing rate of the camera zoom, per second.
    pub zoom_rate: f32,

    /// Smoothing rate of the rotation speed, per second.
    pub rotation_rate: f32,

    /// The explosion factor at startup.
    pub initial_explosion: f32,

    /// The rotation speed at startup, in radians per reference frame.
    pub initial_rotation_speed: f32,

    /// The rotation speed to fall back to when there's no hand.
    pub idle_rotation_speed: f32,

    /// The rotation speed target is `(x - 0.5) * rotation_gain`.
    pub rotation_gain: f32,

    /// The zoom with the hand at zero depth.
    pub base_zoom: f32,

    /// The zoom target is `base_zoom + z * zoom_depth_gain`, clamped.
    pub zoom_depth_gain: f32,

    /// The closest the camera can get.
    pub min_zoom: f32,

    /// The furthest the camera can get.
    pub max_zoom: f32,

    /// Rotation speeds are in radians per frame at this frame rate.
    pub reference_fps: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            explosion_rate: 3.,
            zoom_rate: 2.,
            rotation_rate: 1.5,
            initial_explosion: 0.,
            initial_rotation_speed: 0.05,
            idle_rotation_speed: 0.005,
            rotation_gain: 1.2 * 0.2,
            base_zoom: 32.,
            zoom_depth_gain: 50.,
            min_zoom: 20.,
            max_zoom: 50.,
            reference_fps: 60.,
        }
    }
}

/// The hysteresis thresholds on the explosion factor for the reveal mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Reveal once the explosion factor goes above this.
    pub enter_above: f32,

    /// Hide again once the explosion factor goes below this.
    pub exit_below: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enter_above: 0.65,
            exit_below: 0.6,
        }
    }
}

/// The thresholds and rates of the envelope's opening and closing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// The envelope opens while the explosion factor is above this.
    pub open_above: f32,

    /// The envelope closes while the explosion factor is below this.
    pub close_below: f32,

    /// The flap starts opening once the scale is above this.
    pub flap_after_scale: f32,

    /// The paper starts sliding out once the flap is above this.
    pub paper_after_flap: f32,

    /// The envelope starts shrinking once the flap is below this.
    pub shrink_below_flap: f32,

    pub scale_rate: f32,
    pub flap_rate: f32,
    pub paper_rate: f32,

    /// The rate of every part while closing.
    pub close_rate: f32,

    /// How close to fully open or fully closed counts as finished.
    pub settle_tolerance: f32,

    /// The height of the envelope above the tree group origin.
    pub height: f32,

    /// The forward tilt of the envelope about X, in radians.
    pub tilt: f32,

    /// The flap angle when fully open, in radians.
    pub max_flap_angle: f32,

    /// The offset of the paper when it's tucked in.
    pub paper_closed_offset: f32,

    /// How far the paper slides out.
    pub paper_travel: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            open_above: 0.6,
            close_below: 0.5,
            flap_after_scale: 0.8,
            paper_after_flap: 0.5,
            shrink_below_flap: 0.1,
            scale_rate: 2.,
            flap_rate: 3.,
            paper_rate: 1.5,
            close_rate: 5.,
            settle_tolerance: 1e-3,
            height: 4.,
            tilt: PI * 0.1,
            max_flap_angle: 2.5,
            paper_closed_offset: -1.2,
            paper_travel: 2.4,
        }
    }
}

/// One population of decorations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub name: String,
    pub layout: LayoutParams,
    pub style: SpinStyle,
}

impl PopulationConfig {
    fn new(
        name: &str,
        count: usize,
        height_spread: f32,
        radius_spread: f32,
        vertical_offset: f32,
        style: SpinStyle,
    ) -> Self {
        Self {
            name: name.to_string(),
            layout: LayoutParams {
                count,
                height_spread,
                radius_spread,
                vertical_offset,
            },
            style,
        }
    }
}

/// The tree group and its decorations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// How far the whole tree is lifted.
    pub height: f32,

    /// The height of the star above the tree group origin.
    pub star_height: f32,

    /// All the populations of decorations.
    pub populations: Vec<PopulationConfig>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        let height_spread = 7.5;

        Self {
            height: 2.5,
            star_height: height_spread + 0.5,
            populations: vec![
                PopulationConfig::new("foliage", 1800, height_spread, 1., 0., SpinStyle::Tumble),
                PopulationConfig::new(
                    "gold",
                    500,
                    height_spread - 0.5,
                    1.1,
                    0.2,
                    SpinStyle::Tumble,
                ),
                PopulationConfig::new("red", 250, height_spread - 1., 1.15, -0.5, SpinStyle::Tumble),
                PopulationConfig::new("candy", 180, height_spread - 1., 1.2, 0., SpinStyle::Candy),
                PopulationConfig::new(
                    "hearts",
                    120,
                    height_spread - 0.2,
                    1.25,
                    0.5,
                    SpinStyle::Heart,
                ),
            ],
        }
    }
}

/// The sleigh's orbit around the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleighConfig {
    pub orbit_radius: f32,

    /// Radians per second.
    pub orbit_speed: f32,

    pub height: f32,
    pub bob_amplitude: f32,

    /// Radians per second.
    pub bob_speed: f32,

    /// How far ahead on the orbit the sleigh looks, in radians.
    pub lookahead: f32,

    pub scale: f32,
}

impl Default for SleighConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 20.,
            orbit_speed: 0.25,
            height: 10.,
            bob_amplitude: 1.5,
            bob_speed: 1.5,
            lookahead: 0.1,
            scale: 2.,
        }
    }
}

/// The field of falling dust.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DustConfig {
    pub count: usize,

    /// The size of the box the particles start in, centred on the origin.
    pub extent: Vec3,

    /// Units per second.
    pub fall_speed: f32,

    /// Particles that fall below this go back to `ceiling`.
    pub floor: f32,

    pub ceiling: f32,

    /// Radians per second.
    pub rotation_speed: f32,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            extent: Vec3::new(50., 40., 50.),
            fall_speed: 0.5,
            floor: -25.,
            ceiling: 25.,
            rotation_speed: 0.05,
        }
    }
}

/// The perspective camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 45.,
            znear: 0.1,
            zfar: 150.,
        }
    }
}
