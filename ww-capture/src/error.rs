//! This module contains [`CaptureError`].

use std::{io, path::PathBuf};
use thiserror::Error;
use ww_gesture::GestureStatus;

/// Everything that can go wrong while getting landmarks. None of these are fatal to the app.
/// Gesture input just stops and the scene carries on idling.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The camera couldn't be opened, or it went away.
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),

    /// The landmark detector couldn't be started.
    #[error("landmark detector unavailable: {0}")]
    DetectorUnavailable(String),

    /// A recording couldn't be read.
    #[error("couldn't read recording {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A recording was read but it's not valid RON for a recording.
    #[error("couldn't parse recording {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

impl CaptureError {
    /// The status to show the user after this error.
    pub fn status(&self) -> GestureStatus {
        match self {
            Self::DeviceUnavailable(_) | Self::Io { .. } => GestureStatus::CameraUnavailable,
            Self::DetectorUnavailable(_) | Self::Parse { .. } => {
                GestureStatus::DetectorUnavailable
            }
        }
    }
}
