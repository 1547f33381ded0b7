//! This module contains [`SceneFrame`] and its parts.

use crate::{CameraPose, InstanceTransform};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// The transforms of every decoration in one population, in layout order.
///
/// The transforms are relative to the tree group. See [`SceneFrame::tree`].
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationFrame {
    /// The name of the population, like `"foliage"`.
    pub name: Arc<str>,

    /// One transform per decoration.
    pub transforms: Vec<InstanceTransform>,
}

impl fmt::Debug for PopulationFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopulationFrame")
            .field("name", &self.name)
            .field("transforms", &format_args!("[{} transforms]", self.transforms.len()))
            .finish()
    }
}

impl PopulationFrame {
    /// The 4x4 matrix of every transform, ready to upload as instance data.
    pub fn matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        self.transforms.iter().map(InstanceTransform::to_matrix)
    }
}

/// The pose of the envelope that opens when the tree explodes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePose {
    /// The transform of the whole envelope, relative to the tree group.
    pub transform: InstanceTransform,

    /// The rotation of the flap about its hinge, in radians. 0 is closed.
    pub flap_angle: f32,

    /// The vertical offset of the letter inside the envelope.
    pub paper_offset: f32,
}

/// The falling dust particles.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DustFrame {
    /// The rotation of the whole dust field about the Y axis.
    pub rotation: f32,

    /// The position of every particle, relative to the dust field.
    pub positions: Vec<Vec3>,
}

impl fmt::Debug for DustFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DustFrame")
            .field("rotation", &self.rotation)
            .field("positions", &format_args!("[{} particles]", self.positions.len()))
            .finish()
    }
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    /// The total elapsed time in seconds.
    pub time: f32,

    /// The smoothed explosion factor, where 0 is a tree and 1 is fully exploded.
    pub explosion: f32,

    /// Whether the overlay content should currently be shown.
    pub revealed: bool,

    /// The camera for this frame.
    pub camera: CameraPose,

    /// The global rotation of the tree about the Y axis, in radians.
    pub tree_rotation: f32,

    /// The transform of the tree group, which everything in `populations`, `star`, and
    /// `envelope` is relative to.
    pub tree: InstanceTransform,

    /// The decorations.
    pub populations: Vec<PopulationFrame>,

    /// The star on top of the tree.
    pub star: InstanceTransform,

    /// The envelope.
    pub envelope: EnvelopePose,

    /// The sleigh, in world space.
    pub sleigh: InstanceTransform,

    /// The dust particles, in world space.
    pub dust: DustFrame,
}

impl SceneFrame {
    /// The total number of decorations across all populations.
    pub fn instance_count(&self) -> usize {
        self.populations.iter().map(|p| p.transforms.len()).sum()
    }

    /// Get a population by name.
    pub fn population(&self, name: &str) -> Option<&PopulationFrame> {
        self.populations.iter().find(|p| &*p.name == name)
    }

    /// The world space position of a point given relative to the tree group.
    pub fn tree_to_world(&self, point: Vec3) -> Vec3 {
        self.tree.to_matrix().transform_point3(point)
    }
}
