//! This module runs the render loop and the detection loop side by side on one thread.

use crate::config::AppConfig;
use tokio::{
    sync::{mpsc, oneshot},
    task::{self, JoinHandle},
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, instrument};
use ww_animation::{RevealListener, SceneAnimator};
use ww_capture::{gesture_channel, run_detection, AnySource, DetectionEnd};
use ww_driver_trait::Driver;
use ww_frame::Viewport;
use ww_gesture::GestureStatus;

/// Stands in for the overlay UI. It only logs what it would show.
#[derive(Debug, Default)]
struct LetterOverlay {
    shown: u32,
}

impl RevealListener for LetterOverlay {
    fn on_reveal_change(&mut self, revealed: bool) {
        if revealed {
            self.shown += 1;
            debug!(times_shown = self.shown, "Showing the letter overlay");
        } else {
            debug!("Hiding the letter overlay");
        }
    }
}

/// What happened during a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionReport {
    /// How many frames were sent to the driver.
    pub frames: u64,

    /// Whether the scene was in reveal mode at the end.
    pub revealed: bool,

    /// The explosion factor at the end.
    pub explosion: f32,

    /// The last gesture status.
    pub status: GestureStatus,

    /// Why the detection loop ended, or `None` if it never started.
    pub detection: Option<DetectionEnd>,
}

/// Run the scene with the given driver until `stop` fires.
///
/// Viewport changes from the host come in on `resize`. On the way out, the detection loop is
/// stopped and awaited first, so the landmark source is released, and then the driver is shut
/// down. Nothing is sent to the driver after that.
///
/// This must be run inside a [`task::LocalSet`].
#[instrument(skip_all)]
pub async fn run<D: Driver>(
    config: AppConfig,
    mut driver: D,
    mut resize: mpsc::UnboundedReceiver<Viewport>,
    mut stop: oneshot::Receiver<()>,
) -> SessionReport {
    let mut animator = SceneAnimator::new(config.scene.clone());
    animator.set_reveal_listener(LetterOverlay::default());
    animator.set_viewport(config.viewport);
    driver.resize(config.viewport);

    let (mut gesture_tx, mut gesture_rx) = gesture_channel();
    let (detection_stop_tx, detection_stop_rx) = oneshot::channel();

    let detection: Option<JoinHandle<DetectionEnd>> = match AnySource::from_config(&config.source)
    {
        Ok(source) => Some(task::spawn_local(run_detection(
            source,
            gesture_tx,
            config.detection_period(),
            detection_stop_rx,
        ))),
        Err(error) => {
            gesture_tx.fail(&error);
            None
        }
    };

    let mut interval = time::interval(config.render_period());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(period = ?config.render_period(), "Starting render loop");

    let mut last_tick = Instant::now();
    let mut frames = 0_u64;

    let mut status = gesture_rx.status();
    driver.display_status(status);

    loop {
        tokio::select! {
            biased;

            _ = &mut stop => break,

            Some(viewport) = resize.recv() => {
                animator.set_viewport(viewport);
                driver.resize(viewport);
            }

            now = interval.tick() => {
                let delta = now.duration_since(last_tick).as_secs_f32();
                last_tick = now;

                let gesture = gesture_rx.take();
                if gesture_rx.status() != status {
                    status = gesture_rx.status();
                    driver.display_status(status);
                }

                driver.display_frame(animator.tick(delta, gesture.as_ref()));
                frames += 1;
            }
        }
    }

    info!(frames, "Render loop stopped");

    // If the detection loop already ended, there's nobody to receive this, which is fine
    let _ = detection_stop_tx.send(());
    let detection = match detection {
        Some(handle) => match handle.await {
            Ok(end) => Some(end),
            Err(error) => {
                error!(%error, "Detection loop panicked");
                None
            }
        },
        None => None,
    };
    debug!(?detection, "Detection loop joined");

    driver.shutdown();

    SessionReport {
        frames,
        revealed: animator.revealed(),
        explosion: animator.control().explosion.current,
        status: gesture_rx.status(),
        detection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::{cell::RefCell, rc::Rc, time::Duration};
    use ww_capture::{Script, ScriptStep, ScriptedPose, SourceConfig};
    use ww_frame::SceneFrame;

    /// Keeps a log of what it was asked to do.
    #[derive(Clone, Debug, Default)]
    struct RecordingDriver {
        log: Rc<RefCell<DriverLog>>,
    }

    #[derive(Debug, Default)]
    struct DriverLog {
        frames: Vec<(f32, bool, f32)>,
        viewports: Vec<Viewport>,
        statuses: Vec<GestureStatus>,
        frames_after_shutdown: usize,
        shut_down: bool,
    }

    impl Driver for RecordingDriver {
        fn init() -> Self {
            Self::default()
        }

        fn display_frame(&mut self, frame: SceneFrame) {
            let mut log = self.log.borrow_mut();
            if log.shut_down {
                log.frames_after_shutdown += 1;
            }
            log.frames.push((frame.explosion, frame.revealed, frame.camera.aspect));
        }

        fn display_status(&mut self, status: GestureStatus) {
            self.log.borrow_mut().statuses.push(status);
        }

        fn resize(&mut self, viewport: Viewport) {
            self.log.borrow_mut().viewports.push(viewport);
        }

        fn shutdown(&mut self) {
            self.log.borrow_mut().shut_down = true;
        }
    }

    /// A small scene with the given source.
    fn config(source: SourceConfig) -> AppConfig {
        let mut config = AppConfig {
            source,
            ..AppConfig::default()
        };
        for population in &mut config.scene.tree.populations {
            population.layout.count = 10;
        }
        config.scene.dust.count = 10;
        config
    }

    fn open_hand_for(frames: u32) -> SourceConfig {
        SourceConfig::Scripted(Script {
            steps: vec![ScriptStep::new(ScriptedPose::Open, Vec3::splat(0.5), frames)],
            looping: false,
        })
    }

    async fn run_for(
        config: AppConfig,
        driver: RecordingDriver,
        duration: Duration,
    ) -> SessionReport {
        let (_resize_tx, resize_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();

        task::LocalSet::new()
            .run_until(async move {
                let session = task::spawn_local(run(config, driver, resize_rx, stop_rx));
                time::sleep(duration).await;
                stop_tx.send(()).expect("the session should still be running");
                session.await.expect("the session shouldn't panic")
            })
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn open_hand_reveals_the_letter() {
        let driver = RecordingDriver::default();
        let log = Rc::clone(&driver.log);

        let report = run_for(
            config(open_hand_for(60 * 10)),
            driver,
            Duration::from_secs(3),
        )
        .await;

        assert!(report.revealed);
        assert!(report.explosion > 0.99, "{report:?}");
        assert_eq!(report.status, GestureStatus::Open);
        assert_eq!(report.detection, Some(DetectionEnd::Stopped));

        let log = log.borrow();
        assert!(log.shut_down);
        assert_eq!(log.frames_after_shutdown, 0);
        assert_eq!(log.frames.len() as u64, report.frames);
        assert!(report.frames > 100, "{report:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn driver_sees_the_status_as_it_changes() {
        let driver = RecordingDriver::default();
        let log = Rc::clone(&driver.log);
        let source = SourceConfig::Scripted(Script {
            steps: vec![
                ScriptStep::new(ScriptedPose::Open, Vec3::splat(0.5), 30),
                ScriptStep::new(ScriptedPose::NoHand, Vec3::splat(0.5), 30),
            ],
            looping: false,
        });

        let report = run_for(config(source), driver, Duration::from_secs(2)).await;

        assert_eq!(report.status, GestureStatus::WaitingForHands);
        assert_eq!(
            log.borrow().statuses,
            [
                GestureStatus::Initializing,
                GestureStatus::Open,
                GestureStatus::WaitingForHands
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_source_leaves_the_scene_idling() {
        let report = run_for(
            config(open_hand_for(30)),
            RecordingDriver::default(),
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(report.detection, Some(DetectionEnd::Exhausted));
        // The explosion target is held, so the tree still explodes without a hand
        assert!(report.revealed);
    }

    #[tokio::test(start_paused = true)]
    async fn unavailable_camera_still_renders() {
        let driver = RecordingDriver::default();
        let log = Rc::clone(&driver.log);

        let report = run_for(
            config(SourceConfig::Camera { index: 0 }),
            driver,
            Duration::from_secs(1),
        )
        .await;

        assert_eq!(report.detection, None);
        assert_eq!(report.status, GestureStatus::CameraUnavailable);
        assert!(!report.revealed);
        assert_eq!(report.explosion, 0.);
        assert!(report.frames > 0);

        let log = log.borrow();
        assert!(log.shut_down);
        assert_eq!(log.statuses, [GestureStatus::CameraUnavailable]);
    }

    #[tokio::test(start_paused = true)]
    async fn resizes_reach_the_camera_and_the_driver() {
        let driver = RecordingDriver::default();
        let log = Rc::clone(&driver.log);
        let (resize_tx, resize_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();

        task::LocalSet::new()
            .run_until(async move {
                let session = task::spawn_local(run(
                    config(SourceConfig::Camera { index: 0 }),
                    driver,
                    resize_rx,
                    stop_rx,
                ));

                time::sleep(Duration::from_millis(100)).await;
                resize_tx
                    .send(Viewport::new(500, 500))
                    .expect("the session should still be running");
                time::sleep(Duration::from_millis(100)).await;

                stop_tx.send(()).expect("the session should still be running");
                session.await.expect("the session shouldn't panic");
            })
            .await;

        let log = log.borrow();
        assert_eq!(log.viewports, [Viewport::default(), Viewport::new(500, 500)]);
        assert_eq!(log.frames.first().map(|f| f.2), Some(16. / 9.));
        assert_eq!(log.frames.last().map(|f| f.2), Some(1.));
    }
}
