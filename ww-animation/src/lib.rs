//! This crate is the animation core of the gesture tree.
//!
//! Once per rendered frame, the host calls [`SceneAnimator::tick`] with the time since the last
//! frame and the latest [`GestureDescriptor`](ww_gesture::GestureDescriptor), if there is one.
//! The animator steers the targets of its [`ControlState`] from the gesture, eases the current
//! values towards those targets, flips the reveal mode when the explosion factor crosses its
//! thresholds, and returns an immutable [`SceneFrame`](ww_frame::SceneFrame) with the transform
//! of everything in the scene.

mod animator;
pub mod config;
mod control;
mod decor;
mod envelope;
mod population;
mod reveal;
mod smoothing;

pub use self::{
    animator::SceneAnimator,
    config::SceneConfig,
    control::ControlState,
    decor::{sleigh_transform, star_transform, DustField},
    envelope::{EnvelopePhase, EnvelopeState},
    population::{Population, SpinStyle},
    reveal::{RevealLatch, RevealListener},
    smoothing::{approach, Smoothed},
};
