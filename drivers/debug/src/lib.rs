//! This crate provides a very simple [`DebugDriver`] to test things with.

use tracing::{info, instrument, trace};
use ww_driver_trait::Driver;
use ww_frame::{SceneFrame, Viewport};
use ww_gesture::GestureStatus;

/// A summary is logged at the info level once every this many frames.
const SUMMARY_INTERVAL: u64 = 60;

/// A simple debug driver that logs what it was asked to display with tracing, instead of
/// rendering anything.
#[derive(Debug, Default)]
pub struct DebugDriver {
    /// How many frames have been displayed.
    frames: u64,

    /// Whether the reveal mode was on in the last frame.
    revealed: bool,

    /// The last gesture status shown, if any.
    status: Option<GestureStatus>,
}

impl DebugDriver {
    /// How many frames have been displayed so far.
    pub fn frames_displayed(&self) -> u64 {
        self.frames
    }
}

impl Driver for DebugDriver {
    fn init() -> Self {
        Self::default()
    }

    #[instrument(skip_all, fields(frame = self.frames))]
    fn display_frame(&mut self, frame: SceneFrame) {
        if frame.revealed != self.revealed {
            info!(revealed = frame.revealed, "Overlay visibility changed");
            self.revealed = frame.revealed;
        }

        if self.frames % SUMMARY_INTERVAL == 0 {
            info!(
                time = frame.time,
                explosion = frame.explosion,
                tree_rotation = frame.tree_rotation,
                zoom = frame.camera.eye.z,
                instances = frame.instance_count(),
                envelope_scale = frame.envelope.transform.scale.x,
                "Frame summary"
            );
        } else {
            trace!(?frame);
        }

        self.frames += 1;
    }

    fn display_status(&mut self, status: GestureStatus) {
        if self.status != Some(status) {
            info!(%status, "Gesture status");
            self.status = Some(status);
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        info!(?viewport, "Resized");
    }

    fn shutdown(&mut self) {
        info!(frames = self.frames, "Shutting down debug driver");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use ww_frame::{CameraPose, DustFrame, EnvelopePose, InstanceTransform};

    fn frame(revealed: bool) -> SceneFrame {
        SceneFrame {
            time: 0.,
            explosion: if revealed { 1. } else { 0. },
            revealed,
            camera: CameraPose {
                eye: Vec3::new(0., 0., 32.),
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect: 1.,
                fovy_radians: 1.,
                znear: 0.1,
                zfar: 150.,
            },
            tree_rotation: 0.,
            tree: InstanceTransform {
                translation: Vec3::new(0., 2.5, 0.),
                rotation: Quat::IDENTITY,
                scale: Vec3::ONE,
            },
            populations: Vec::new(),
            star: InstanceTransform::IDENTITY,
            envelope: EnvelopePose {
                transform: InstanceTransform::IDENTITY,
                flap_angle: 0.,
                paper_offset: 0.,
            },
            sleigh: InstanceTransform::IDENTITY,
            dust: DustFrame {
                rotation: 0.,
                positions: Vec::new(),
            },
        }
    }

    #[test]
    fn counts_frames_and_tracks_reveal() {
        let mut driver = DebugDriver::init();
        for revealed in [false, true, true, false] {
            driver.display_frame(frame(revealed));
        }
        driver.shutdown();

        assert_eq!(driver.frames_displayed(), 4);
        assert!(!driver.revealed);
    }

    #[test]
    fn keeps_the_latest_status() {
        let mut driver = DebugDriver::init();
        assert_eq!(driver.status, None);

        for status in [
            GestureStatus::Initializing,
            GestureStatus::Open,
            GestureStatus::Open,
            GestureStatus::CameraUnavailable,
        ] {
            driver.display_status(status);
        }

        assert_eq!(driver.status, Some(GestureStatus::CameraUnavailable));
    }
}
