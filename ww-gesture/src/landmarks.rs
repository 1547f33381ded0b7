//! This module contains [`LandmarkSample`] and the indices of the individual landmarks.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The number of landmarks the hand tracker reports for one hand.
pub const LANDMARK_COUNT: usize = 21;

/// The indices of the landmarks within a [`LandmarkSample`].
///
/// These follow the usual 21 point hand model, where every finger has four points counting
/// outwards from the palm and index 0 is the wrist.
pub mod indices {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    /// The tips of the four fingers that aren't the thumb.
    pub const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
}

/// The reasons a list of points can fail to be a [`LandmarkSample`].
#[derive(Clone, Debug, Error, PartialEq)]
#[allow(missing_docs)]
pub enum LandmarkError {
    #[error("expected {LANDMARK_COUNT} landmarks but got {0}")]
    WrongCount(usize),

    #[error("landmark {index} has a non-finite coordinate: {point:?}")]
    NonFinite { index: usize, point: Vec3 },
}

/// One frame's worth of landmarks for a single detected hand.
///
/// The x and y values are normalised to the camera image, so they're roughly in `[0, 1]`, and z
/// is the depth relative to the wrist. A sample can only be built from exactly
/// [`LANDMARK_COUNT`] finite points, so the classifier never has to worry about missing data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec3>", into = "Vec<Vec3>")]
pub struct LandmarkSample {
    points: [Vec3; LANDMARK_COUNT],
}

impl LandmarkSample {
    /// Validate the given points and build a sample from them.
    pub fn new(points: &[Vec3]) -> Result<Self, LandmarkError> {
        let points: [Vec3; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(points.len()))?;

        if let Some((index, &point)) = points
            .iter()
            .enumerate()
            .find(|(_, point)| !point.is_finite())
        {
            return Err(LandmarkError::NonFinite { index, point });
        }

        Ok(Self { points })
    }

    /// Get the landmark at the given index. See [`indices`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANDMARK_COUNT`.
    #[inline]
    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    /// All the landmarks, in order.
    #[inline]
    pub fn points(&self) -> &[Vec3; LANDMARK_COUNT] {
        &self.points
    }

    /// The wrist landmark.
    #[inline]
    pub fn wrist(&self) -> Vec3 {
        self.points[indices::WRIST]
    }
}

impl TryFrom<Vec<Vec3>> for LandmarkSample {
    type Error = LandmarkError;

    fn try_from(value: Vec<Vec3>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<LandmarkSample> for Vec<Vec3> {
    fn from(value: LandmarkSample) -> Self {
        value.points.to_vec()
    }
}
