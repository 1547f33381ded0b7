//! This crate is the input side of the gesture tree. It gets hand landmarks from a
//! [`LandmarkSource`], classifies them, and hands the latest gesture to the render loop through a
//! single-slot channel.
//!
//! Failures here never reach the animation core. A source that can't start or dies part way
//! through is logged, the gesture status switches to a diagnostic, and the render loop just sees
//! no hand from then on.

mod detect;
mod error;
mod handoff;
mod source;

pub use self::{
    detect::{classify_frame, run_detection, DetectionEnd},
    error::CaptureError,
    handoff::{gesture_channel, GestureReceiver, GestureSender},
    source::{
        AnySource, DetectedFrame, LandmarkSource, Recording, ReplaySource, Script, ScriptStep,
        ScriptedPose, ScriptedSource, SourceConfig,
    },
};
