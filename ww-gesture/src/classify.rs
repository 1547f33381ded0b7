//! This module contains the gesture classifier itself.

use crate::landmarks::{indices, LandmarkSample};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Thumb tip and index tip closer than this are a pinch.
pub const PINCH_THRESHOLD: f32 = 0.05;

/// An average fingertip to wrist distance below this is a fist.
pub const FIST_SPREAD_THRESHOLD: f32 = 0.25;

/// An average fingertip to wrist distance above this is an open hand.
pub const OPEN_SPREAD_THRESHOLD: f32 = 0.35;

/// Everything we care about from one frame of a single hand.
///
/// `is_fist` and `is_open` are never both true, but they can both be false when the hand is
/// half open. That's a deliberate dead zone, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureDescriptor {
    /// Whether the thumb and index finger are touching.
    pub is_pinching: bool,

    /// Whether the hand is a closed fist.
    pub is_fist: bool,

    /// Whether the hand is an open palm.
    pub is_open: bool,

    /// The position of the wrist, mirrored horizontally and vertically so that it matches what
    /// the user sees in a selfie view. The z value is the raw relative depth.
    pub position: Vec3,
}

/// The 3D distance between the thumb tip and the index tip.
pub fn pinch_distance(sample: &LandmarkSample) -> f32 {
    sample
        .point(indices::THUMB_TIP)
        .distance(sample.point(indices::INDEX_TIP))
}

/// The mean distance from the four non-thumb fingertips to the wrist.
pub fn average_spread(sample: &LandmarkSample) -> f32 {
    let wrist = sample.wrist();
    indices::FINGER_TIPS
        .iter()
        .map(|&tip| sample.point(tip).distance(wrist))
        .sum::<f32>()
        / indices::FINGER_TIPS.len() as f32
}

/// Classify one frame of hand landmarks.
pub fn classify(sample: &LandmarkSample) -> GestureDescriptor {
    let spread = average_spread(sample);
    let pinch = pinch_distance(sample);
    let wrist = sample.wrist();
    trace!(spread, pinch);

    GestureDescriptor {
        is_pinching: pinch < PINCH_THRESHOLD,
        is_fist: spread < FIST_SPREAD_THRESHOLD,
        is_open: spread > OPEN_SPREAD_THRESHOLD,
        position: Vec3::new(1. - wrist.x, 1. - wrist.y, wrist.z),
    }
}
