//! This module contains [`InstanceTransform`].

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The position, orientation, and scale of one renderable instance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl InstanceTransform {
    /// No translation, no rotation, and unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// A transform with just a translation.
    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// A unit scale transform at `translation`, rotated by the given XYZ Euler angles.
    #[inline]
    pub fn from_translation_euler(translation: Vec3, x: f32, y: f32, z: f32) -> Self {
        Self {
            translation,
            rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
            scale: Vec3::ONE,
        }
    }

    /// Return this transform with a uniform scale.
    #[inline]
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        Self {
            scale: Vec3::splat(scale),
            ..self
        }
    }

    /// Return this transform rotated so that its local +Z axis points at `target`, with `up` as
    /// the up direction. Models are built facing +Z, so this points them at the target.
    ///
    /// If `target` is at the translation or straight along `up`, the rotation is unchanged.
    pub fn facing(self, target: Vec3, up: Vec3) -> Self {
        let forward = (target - self.translation).normalize_or_zero();
        let right = up.cross(forward).normalize_or_zero();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return self;
        }
        let up = forward.cross(right);

        Self {
            rotation: Quat::from_mat3(&Mat3::from_cols(right, up, forward)),
            ..self
        }
    }

    /// The 4x4 matrix for this transform, as a renderer would upload it.
    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_applies_translation_and_rotation() {
        let transform = InstanceTransform::from_translation_euler(
            Vec3::new(1., 2., 3.),
            0.,
            std::f32::consts::FRAC_PI_2,
            0.,
        );

        // Rotating +X by a quarter turn about Y gives -Z
        let point = transform.to_matrix().transform_point3(Vec3::X);
        assert!(point.abs_diff_eq(Vec3::new(1., 2., 2.), 1e-5), "{point:?}");
    }

    #[test]
    fn facing_points_at_the_target() {
        let transform = InstanceTransform::from_translation(Vec3::new(0., 0., 5.))
            .facing(Vec3::ZERO, Vec3::Y);
        let forward = transform.rotation * Vec3::Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-5), "{forward:?}");

        let sideways =
            InstanceTransform::from_translation(Vec3::ZERO).facing(Vec3::new(3., 0., 0.), Vec3::Y);
        let forward = sideways.rotation * Vec3::Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-5), "{forward:?}");
        assert!((sideways.rotation * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn facing_itself_does_nothing() {
        let transform = InstanceTransform::from_translation(Vec3::ONE);
        assert_eq!(transform.facing(Vec3::ONE, Vec3::Y), transform);
        assert_eq!(transform.facing(Vec3::new(1., 5., 1.), Vec3::Y), transform);
    }
}
