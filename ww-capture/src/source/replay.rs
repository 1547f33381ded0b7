//! This module contains [`ReplaySource`], which plays back recorded landmarks.

use super::{DetectedFrame, LandmarkSource};
use crate::CaptureError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

/// Recorded detector output, one entry per camera frame. `None` is a frame without a hand.
///
/// In RON, this looks like `(frames: [Some([(0.5, 0.5, 0.0), ...]), None, ...])`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<Option<Vec<Vec3>>>,
}

impl Recording {
    /// Read a recording from a RON file.
    pub fn from_file(path: &Path) -> Result<Self, CaptureError> {
        let text = fs::read_to_string(path).map_err(|source| CaptureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        ron::from_str(&text).map_err(|source| CaptureError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A source that plays back a [`Recording`].
#[derive(Clone, PartialEq)]
pub struct ReplaySource {
    /// Where the recording came from, if it came from a file.
    path: Option<PathBuf>,
    recording: Recording,
    cursor: usize,
    looping: bool,
}

impl fmt::Debug for ReplaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaySource")
            .field("path", &self.path)
            .field("frames", &self.recording.frames.len())
            .field("cursor", &self.cursor)
            .field("looping", &self.looping)
            .finish()
    }
}

impl ReplaySource {
    /// Play back a recording that's already in memory.
    pub fn new(recording: Recording, looping: bool) -> Self {
        Self {
            path: None,
            recording,
            cursor: 0,
            looping,
        }
    }

    /// Read a recording from a RON file and play it back.
    #[instrument]
    pub fn open(path: &Path, looping: bool) -> Result<Self, CaptureError> {
        let recording = Recording::from_file(path)?;
        debug!(frames = recording.frames.len(), "Read recording");

        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::new(recording, looping)
        })
    }
}

impl LandmarkSource for ReplaySource {
    fn start(&mut self) -> Result<(), CaptureError> {
        info!(path = ?self.path, frames = self.recording.frames.len(), "Starting replay");
        self.cursor = 0;
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<Option<DetectedFrame>, CaptureError> {
        if self.cursor >= self.recording.frames.len() {
            if !self.looping || self.recording.frames.is_empty() {
                return Ok(None);
            }
            debug!("Looping replay");
            self.cursor = 0;
        }

        let frame = self.recording.frames[self.cursor].clone();
        self.cursor += 1;
        Ok(Some(frame.into()))
    }

    fn stop(&mut self) {
        debug!("Releasing recording");
        self.recording.frames = Vec::new();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn recording() -> Recording {
        Recording {
            frames: vec![Some(vec![Vec3::splat(0.5); 21]), None, Some(vec![Vec3::ZERO; 3])],
        }
    }

    async fn drain(source: &mut ReplaySource, limit: usize) -> Vec<DetectedFrame> {
        let mut frames = Vec::new();
        while frames.len() < limit {
            match source.next_frame().await.expect("replays never fail") {
                Some(frame) => frames.push(frame),
                None => break,
            }
        }
        frames
    }

    #[tokio::test]
    async fn plays_every_frame_once() {
        let mut source = ReplaySource::new(recording(), false);
        source.start().expect("replays always start");

        let frames = drain(&mut source, 10).await;
        assert_eq!(
            frames,
            [
                DetectedFrame::Hand(vec![Vec3::splat(0.5); 21]),
                DetectedFrame::Empty,
                DetectedFrame::Hand(vec![Vec3::ZERO; 3]),
            ]
        );
    }

    #[tokio::test]
    async fn loops_when_asked() {
        let mut source = ReplaySource::new(recording(), true);
        assert_eq!(drain(&mut source, 7).await.len(), 7);

        let mut empty = ReplaySource::new(Recording::default(), true);
        assert!(drain(&mut empty, 7).await.is_empty());
    }

    #[tokio::test]
    async fn stopping_releases_the_recording() {
        let mut source = ReplaySource::new(recording(), true);
        source.stop();
        assert!(drain(&mut source, 3).await.is_empty());
    }

    #[test]
    fn reads_recordings_from_files() {
        let dir = env::temp_dir().join(format!("ww-capture-replay-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir should be writable");

        let good = dir.join("good.ron");
        fs::write(&good, "(frames: [None, Some([(0.1, 0.2, 0.3)])])")
            .expect("temp dir should be writable");
        let source = ReplaySource::open(&good, false).expect("the recording is valid");
        assert_eq!(source.recording.frames.len(), 2);
        assert_eq!(source.recording.frames[1], Some(vec![Vec3::new(0.1, 0.2, 0.3)]));

        let bad = dir.join("bad.ron");
        fs::write(&bad, "(frames: [Maybe])").expect("temp dir should be writable");
        assert!(matches!(
            ReplaySource::open(&bad, false),
            Err(CaptureError::Parse { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
