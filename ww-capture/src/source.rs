//! This module contains the [`LandmarkSource`] trait and the sources that implement it.

mod replay;
mod scripted;

pub use self::{
    replay::{Recording, ReplaySource},
    scripted::{Script, ScriptStep, ScriptedPose, ScriptedSource},
};

use crate::CaptureError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, instrument};

/// What the detector found in one camera frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DetectedFrame {
    /// The landmarks of the first hand in the frame. These haven't been validated yet, so there
    /// could be the wrong number of them.
    Hand(Vec<Vec3>),

    /// There was no hand in the frame.
    Empty,
}

impl From<Option<Vec<Vec3>>> for DetectedFrame {
    fn from(value: Option<Vec<Vec3>>) -> Self {
        match value {
            Some(points) => Self::Hand(points),
            None => Self::Empty,
        }
    }
}

/// Something that produces hand landmarks, one frame at a time. This is where a camera and a
/// landmark detector plug in.
///
/// The detection loop calls [`start`](LandmarkSource::start) once, then
/// [`next_frame`](LandmarkSource::next_frame) at its own pace, and finally
/// [`stop`](LandmarkSource::stop), which must release any device handles.
#[allow(async_fn_in_trait)]
pub trait LandmarkSource {
    /// Open the device and start the detector.
    fn start(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    /// Get the next frame, or `None` if the source has run out of frames.
    async fn next_frame(&mut self) -> Result<Option<DetectedFrame>, CaptureError>;

    /// Release the device. Nothing else will be asked of the source after this.
    fn stop(&mut self) {}
}

/// Which landmark source to use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SourceConfig {
    /// A live camera. No camera backend is built into this crate, so this always fails with
    /// [`CaptureError::DeviceUnavailable`] and the scene idles.
    Camera { index: u32 },

    /// Synthesise hands from a script.
    Scripted(Script),

    /// Play back a recording from a RON file.
    Replay { path: PathBuf, looping: bool },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Scripted(Script::default())
    }
}

/// Any of the built-in sources.
#[derive(Clone, Debug, PartialEq)]
pub enum AnySource {
    Scripted(ScriptedSource),
    Replay(ReplaySource),
}

impl AnySource {
    /// Build the source described by the config.
    #[instrument(skip_all)]
    pub fn from_config(config: &SourceConfig) -> Result<Self, CaptureError> {
        let source = match config {
            SourceConfig::Camera { index } => {
                return Err(CaptureError::DeviceUnavailable(format!(
                    "no camera backend to open camera {index} with"
                )))
            }
            SourceConfig::Scripted(script) => Self::Scripted(ScriptedSource::new(script.clone())),
            SourceConfig::Replay { path, looping } => {
                Self::Replay(ReplaySource::open(path, *looping)?)
            }
        };

        info!(?source, "Built landmark source");
        Ok(source)
    }
}

impl LandmarkSource for AnySource {
    fn start(&mut self) -> Result<(), CaptureError> {
        match self {
            Self::Scripted(source) => source.start(),
            Self::Replay(source) => source.start(),
        }
    }

    async fn next_frame(&mut self) -> Result<Option<DetectedFrame>, CaptureError> {
        match self {
            Self::Scripted(source) => source.next_frame().await,
            Self::Replay(source) => source.next_frame().await,
        }
    }

    fn stop(&mut self) {
        match self {
            Self::Scripted(source) => source.stop(),
            Self::Replay(source) => source.stop(),
        }
    }
}
