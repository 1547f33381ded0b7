//! This crate provides the snapshot that the animation core hands to the renderer every tick.
//!
//! A [`SceneFrame`] is built from scratch each tick and owned by whoever receives it, so the
//! renderer can upload it into its own buffers without sharing anything with the animation core.

mod camera;
mod frame;
mod transform;

pub use self::{
    camera::{CameraPose, Viewport},
    frame::{DustFrame, EnvelopePose, PopulationFrame, SceneFrame},
    transform::InstanceTransform,
};
