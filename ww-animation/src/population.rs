//! This module contains [`Population`], a group of decorations that share a layout and a spin.

use crate::config::PopulationConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{f32::consts::PI, sync::Arc};
use strum::{Display, EnumIter};
use ww_frame::{InstanceTransform, PopulationFrame};
use ww_layout::InstanceLayout;

/// How each decoration in a population spins over time.
///
/// Every style is offset by the index of the decoration, so that neighbours don't spin in step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum SpinStyle {
    /// Tumble about every axis. Used for the foliage and baubles.
    Tumble,

    /// Hang upside down and turn about the vertical, with a slight sway. Used for candy canes.
    Candy,

    /// Turn about the vertical only. Used for hearts.
    Heart,
}

impl SpinStyle {
    /// The XYZ Euler angles of decoration `index` at `time` seconds.
    pub fn euler(self, time: f32, index: usize) -> (f32, f32, f32) {
        let i = index as f32;
        match self {
            Self::Tumble => (time + i, 0.5 * time + i, i),
            Self::Candy => (PI, 0.5 * time + i, 0.2 * (time + i).sin()),
            Self::Heart => (0., 0.8 * time + i, 0.),
        }
    }
}

/// A named group of decorations with one layout and one spin style.
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    name: Arc<str>,
    layout: InstanceLayout,
    style: SpinStyle,
}

impl Population {
    /// Generate the layout of a population.
    pub fn new<R: Rng + ?Sized>(config: &PopulationConfig, rng: &mut R) -> Self {
        Self {
            name: config.name.as_str().into(),
            layout: InstanceLayout::generate(config.layout, rng),
            style: config.style,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn layout(&self) -> &InstanceLayout {
        &self.layout
    }

    #[inline]
    pub fn style(&self) -> SpinStyle {
        self.style
    }

    /// The transform of every decoration at `time` seconds with the given explosion factor.
    pub fn frame(&self, time: f32, explosion: f32) -> PopulationFrame {
        let transforms = self
            .layout
            .positions(explosion)
            .enumerate()
            .map(|(index, position)| {
                let (x, y, z) = self.style.euler(time, index);
                InstanceTransform::from_translation_euler(position, x, y, z)
            })
            .collect();

        PopulationFrame {
            name: Arc::clone(&self.name),
            transforms,
        }
    }
}
