//! This module contains the decorations that move on their own without any input: the star, the
//! sleigh, and the falling dust.

use crate::config::{DustConfig, SleighConfig, TreeConfig};
use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use tracing::trace;
use ww_frame::{DustFrame, InstanceTransform};

/// The star on top of the tree, relative to the tree group.
pub fn star_transform(time: f32, tree: &TreeConfig) -> InstanceTransform {
    InstanceTransform {
        translation: Vec3::new(0., tree.star_height, 0.),
        rotation: Quat::from_euler(EulerRot::XYZ, 0., -time, 0.1 * (2. * time).sin()),
        scale: Vec3::ONE,
    }
}

/// The point on the sleigh's orbit at `angle`, ignoring the bobbing.
fn orbit_point(angle: f32, config: &SleighConfig) -> Vec3 {
    Vec3::new(
        angle.sin() * config.orbit_radius,
        config.height,
        angle.cos() * config.orbit_radius,
    )
}

/// The sleigh flying round the tree, in world space.
pub fn sleigh_transform(time: f32, config: &SleighConfig) -> InstanceTransform {
    let angle = time * config.orbit_speed;
    let bob = config.bob_amplitude * (time * config.bob_speed).sin();

    let position = orbit_point(angle, config) + Vec3::new(0., bob, 0.);
    let ahead = orbit_point(angle + config.lookahead, config) + Vec3::new(0., bob, 0.);

    InstanceTransform::from_translation(position)
        .facing(ahead, Vec3::Y)
        .with_uniform_scale(config.scale)
}

/// Particles that fall slowly forever, wrapping back to the top when they reach the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct DustField {
    config: DustConfig,
    positions: Vec<Vec3>,
}

impl DustField {
    /// Scatter the particles uniformly through the box in the config.
    pub fn new<R: Rng + ?Sized>(config: &DustConfig, rng: &mut R) -> Self {
        let positions = (0..config.count)
            .map(|_| (rng.gen::<Vec3>() - Vec3::splat(0.5)) * config.extent)
            .collect();

        Self {
            config: config.clone(),
            positions,
        }
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Let every particle fall for `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        let fall = self.config.fall_speed * delta.max(0.);
        let mut wrapped = 0_usize;

        for position in &mut self.positions {
            position.y -= fall;
            if position.y < self.config.floor {
                position.y = self.config.ceiling;
                wrapped += 1;
            }
        }

        if wrapped > 0 {
            trace!(wrapped, "Dust particles wrapped to the top");
        }
    }

    /// The dust at `time` seconds.
    pub fn frame(&self, time: f32) -> DustFrame {
        DustFrame {
            rotation: self.config.rotation_speed * time,
            positions: self.positions.clone(),
        }
    }
}
