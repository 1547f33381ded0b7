//! This crate turns one frame of hand landmarks into a [`GestureDescriptor`].
//!
//! Nothing in here has any state. The capture side hands us a [`LandmarkSample`] (or nothing at
//! all if no hand was detected), we [`classify`] it, and the animation side decides what to do
//! with the result.

mod classify;
mod landmarks;
mod status;

pub use self::{
    classify::{
        average_spread, classify, pinch_distance, GestureDescriptor, FIST_SPREAD_THRESHOLD,
        OPEN_SPREAD_THRESHOLD, PINCH_THRESHOLD,
    },
    landmarks::{indices, LandmarkError, LandmarkSample, LANDMARK_COUNT},
    status::GestureStatus,
};
