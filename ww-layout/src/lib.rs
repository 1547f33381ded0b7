//! This crate generates the layouts of the decorations on the tree.
//!
//! Every decoration has two fixed positions. Its rest position is on a spiral around a cone, and
//! all the rest positions together make up the silhouette of the tree. Its scatter position is a
//! random point on a thick spherical shell around the origin, which is where it ends up when the
//! tree explodes. Both lists are generated once and never change, so index `i` always refers to
//! the same decoration.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use tracing::{debug, instrument, warn};

/// Successive decorations are spun round by this many golden angles to break up the helix.
pub const SPIRAL_MULTIPLIER: f32 = 20.;

/// The radius of the cone is scaled by this before it gets clamped.
pub const CONE_RADIUS_SCALE: f32 = 5.5;

/// The smallest horizontal distance from the trunk, so the top of the tree doesn't collapse to
/// a single point.
pub const MIN_RADIUS: f32 = 0.2;

/// The closest a scatter position can be to the origin.
pub const SCATTER_MIN_DISTANCE: f32 = 15.;

/// The furthest a scatter position can be from the origin.
pub const SCATTER_MAX_DISTANCE: f32 = 40.;

/// The golden angle in radians.
#[inline]
pub fn golden_angle() -> f32 {
    PI * (3. - 5f32.sqrt())
}

/// The shape of one population of decorations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// How many decorations there are. A count of 0 is raised to 1 when the layout is generated.
    pub count: usize,

    /// Half the height of the tree. Rest positions are within this distance of
    /// `vertical_offset`.
    pub height_spread: f32,

    /// How wide the tree is.
    pub radius_spread: f32,

    /// How far the whole population is moved up.
    pub vertical_offset: f32,
}

/// The rest and scatter positions of a population of decorations.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceLayout {
    /// The parameters used to generate this layout.
    params: LayoutParams,

    /// Where each decoration sits on the assembled tree.
    rest: Vec<Vec3>,

    /// Where each decoration flies to when the tree explodes.
    scatter: Vec<Vec3>,
}

impl InstanceLayout {
    /// Generate a new layout. The rest positions only depend on `params`, but the scatter
    /// positions come from `rng`.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(mut params: LayoutParams, rng: &mut R) -> Self {
        if params.count == 0 {
            warn!("Layouts need at least one decoration, using 1");
            params.count = 1;
        }
        let count = params.count;

        let rest: Vec<Vec3> = (0..count).map(|i| rest_position(i, &params)).collect();
        let scatter: Vec<Vec3> = (0..count).map(|_| scatter_position(rng)).collect();

        debug!(count, "Generated instance layout");
        Self {
            params,
            rest,
            scatter,
        }
    }

    /// The number of decorations.
    #[inline]
    pub fn len(&self) -> usize {
        self.rest.len()
    }

    /// Layouts always have at least one decoration, so this is always false.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// The parameters used to generate this layout.
    #[inline]
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// The rest positions.
    #[inline]
    pub fn rest(&self) -> &[Vec3] {
        &self.rest
    }

    /// The scatter positions.
    #[inline]
    pub fn scatter(&self) -> &[Vec3] {
        &self.scatter
    }

    /// Interpolate decoration `index` between its rest and scatter positions. An `explosion` of 0
    /// is the rest position and 1 is the scatter position.
    #[inline]
    pub fn position(&self, index: usize, explosion: f32) -> Vec3 {
        self.rest[index].lerp(self.scatter[index], explosion)
    }

    /// Iterate over the interpolated positions of every decoration.
    pub fn positions(&self, explosion: f32) -> impl Iterator<Item = Vec3> + '_ {
        self.rest
            .iter()
            .zip(&self.scatter)
            .map(move |(&rest, &scatter)| rest.lerp(scatter, explosion))
    }
}

/// Generate a layout. See [`InstanceLayout::generate`].
pub fn generate_layout<R: Rng + ?Sized>(
    count: usize,
    height_spread: f32,
    radius_spread: f32,
    vertical_offset: f32,
    rng: &mut R,
) -> InstanceLayout {
    InstanceLayout::generate(
        LayoutParams {
            count,
            height_spread,
            radius_spread,
            vertical_offset,
        },
        rng,
    )
}

/// Compute the rest position of decoration `index` out of `params.count`.
pub fn rest_position(index: usize, params: &LayoutParams) -> Vec3 {
    let &LayoutParams {
        count,
        height_spread,
        radius_spread,
        vertical_offset,
    } = params;

    // 1 at the top down to -1 at the bottom
    let y = if count > 1 {
        1. - (index as f32 / (count - 1) as f32) * 2.
    } else {
        1.
    };

    let radius = (1. - y * y).max(0.).sqrt() * radius_spread * (1. - (y + 1.) / 2. * 0.8);
    let theta = golden_angle() * index as f32 * SPIRAL_MULTIPLIER;

    let final_y = y * height_spread + vertical_offset;
    let cone_radius = radius * (1. - (final_y + height_spread / 2.) / (height_spread * 1.2));
    let horizontal = (cone_radius * CONE_RADIUS_SCALE).max(MIN_RADIUS);

    Vec3::new(theta.cos() * horizontal, final_y, theta.sin() * horizontal)
}

/// Generate a random unit vector in any direction.
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        if let Some(v) = (rng.gen::<Vec3>() - Vec3::splat(0.5)).try_normalize() {
            return v;
        }
    }
}

/// Generate a random scatter position somewhere in the shell between
/// [`SCATTER_MIN_DISTANCE`] and [`SCATTER_MAX_DISTANCE`].
pub fn scatter_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    random_vector(rng) * rng.gen_range(SCATTER_MIN_DISTANCE..=SCATTER_MAX_DISTANCE)
}
