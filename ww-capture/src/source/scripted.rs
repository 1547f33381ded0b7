//! This module contains [`ScriptedSource`], which makes up hands on a timetable.

use super::{DetectedFrame, LandmarkSource};
use crate::CaptureError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{debug, info};
use ww_gesture::{indices, LANDMARK_COUNT};

/// A hand shape that a script can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum ScriptedPose {
    /// A closed fist.
    Fist,

    /// A wide open palm.
    Open,

    /// A half open hand, which is neither a fist nor open.
    Relaxed,

    /// A half open hand with the thumb and index finger touching.
    Pinch,

    /// No hand at all.
    NoHand,
}

/// The angles of the index, middle, ring, and pinky fingers away from straight up, in radians.
const FINGER_ANGLES: [f32; 4] = [-0.3, -0.1, 0.1, 0.3];

/// The angle of the thumb away from straight up, in radians.
const THUMB_ANGLE: f32 = -0.9;

impl ScriptedPose {
    /// How far each fingertip is from the wrist.
    fn spread(self) -> f32 {
        match self {
            Self::Fist => 0.15,
            Self::Open => 0.45,
            Self::Relaxed | Self::Pinch | Self::NoHand => 0.3,
        }
    }

    /// Build the landmarks of this pose with the wrist at `wrist`, in camera image coordinates
    /// where y grows downwards.
    pub fn landmarks(self, wrist: Vec3) -> Option<Vec<Vec3>> {
        if self == Self::NoHand {
            return None;
        }

        let spread = self.spread();
        let towards = |angle: f32, fraction: f32| {
            wrist + Vec3::new(angle.sin(), -angle.cos(), 0.) * spread * fraction
        };

        let mut points = vec![wrist; LANDMARK_COUNT];
        for (joint, fraction) in [0.25, 0.5, 0.75, 1.].into_iter().enumerate() {
            points[indices::THUMB_CMC + joint] = towards(THUMB_ANGLE, fraction);
        }
        for (finger, angle) in FINGER_ANGLES.into_iter().enumerate() {
            let mcp = indices::INDEX_MCP + finger * 4;
            for (joint, fraction) in [0.4, 0.65, 0.85, 1.].into_iter().enumerate() {
                points[mcp + joint] = towards(angle, fraction);
            }
        }

        if self == Self::Pinch {
            points[indices::THUMB_TIP] = points[indices::INDEX_TIP] + Vec3::new(0.01, 0., 0.);
        }

        Some(points)
    }
}

/// One step of a [`Script`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub pose: ScriptedPose,

    /// Where the wrist is, in camera image coordinates.
    pub wrist: Vec3,

    /// How many frames this step lasts for.
    pub frames: u32,
}

impl ScriptStep {
    pub fn new(pose: ScriptedPose, wrist: Vec3, frames: u32) -> Self {
        Self {
            pose,
            wrist,
            frames,
        }
    }
}

/// A timetable of hand poses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub steps: Vec<ScriptStep>,

    /// Whether to go back to the first step after the last one.
    pub looping: bool,
}

impl Default for Script {
    /// Wave a hand in, explode the tree while drifting right, relax, assemble it again while
    /// drifting left, then take the hand away. At 60 frames per second, this is 15 seconds long.
    fn default() -> Self {
        let centre = Vec3::new(0.5, 0.5, 0.);
        Self {
            steps: vec![
                ScriptStep::new(ScriptedPose::Relaxed, centre, 60),
                ScriptStep::new(ScriptedPose::Open, Vec3::new(0.35, 0.5, 0.), 240),
                ScriptStep::new(ScriptedPose::Relaxed, centre, 60),
                ScriptStep::new(ScriptedPose::Pinch, centre, 60),
                ScriptStep::new(ScriptedPose::Fist, Vec3::new(0.65, 0.5, 0.1), 240),
                ScriptStep::new(ScriptedPose::NoHand, centre, 240),
            ],
            looping: true,
        }
    }
}

/// A source that follows a [`Script`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSource {
    script: Script,

    /// The index of the current step.
    step: usize,

    /// How many frames of the current step have been produced.
    frame_in_step: u32,
}

impl ScriptedSource {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            step: 0,
            frame_in_step: 0,
        }
    }

    /// Skip past finished and empty steps, returning false if the script is over.
    fn seek_step(&mut self) -> bool {
        let mut wrapped = false;

        loop {
            match self.script.steps.get(self.step) {
                Some(step) if self.frame_in_step < step.frames => return true,
                Some(_) => {
                    self.step += 1;
                    self.frame_in_step = 0;
                }
                None if self.script.looping && !wrapped => {
                    debug!("Looping script");
                    self.step = 0;
                    self.frame_in_step = 0;
                    wrapped = true;
                }
                None => return false,
            }
        }
    }
}

impl LandmarkSource for ScriptedSource {
    fn start(&mut self) -> Result<(), CaptureError> {
        info!(steps = self.script.steps.len(), "Starting scripted source");
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<Option<DetectedFrame>, CaptureError> {
        if !self.seek_step() {
            return Ok(None);
        }

        let step = &self.script.steps[self.step];
        self.frame_in_step += 1;

        Ok(Some(step.pose.landmarks(step.wrist).into()))
    }
}
