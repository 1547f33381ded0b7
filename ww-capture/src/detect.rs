//! This module contains the detection loop, which pulls frames from a [`LandmarkSource`],
//! classifies them, and hands them to the render loop.

use crate::{DetectedFrame, GestureSender, LandmarkSource};
use std::time::Duration;
use tokio::{
    sync::oneshot,
    time::{self, MissedTickBehavior},
};
use tracing::{info, instrument, trace, warn};
use ww_gesture::{classify, GestureDescriptor, LandmarkSample};

/// Classify one detected frame. A malformed hand counts as no hand.
pub fn classify_frame(frame: DetectedFrame) -> Option<GestureDescriptor> {
    match frame {
        DetectedFrame::Hand(points) => match LandmarkSample::new(&points) {
            Ok(sample) => Some(classify(&sample)),
            Err(error) => {
                warn!(%error, "Ignoring malformed landmark sample");
                None
            }
        },
        DetectedFrame::Empty => None,
    }
}

/// Why the detection loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectionEnd {
    /// We were asked to stop.
    Stopped,

    /// The source ran out of frames.
    Exhausted,

    /// The source failed. The error has already been logged and sent to the render side.
    Failed,
}

/// Run the detection loop until `stop` fires, the source runs out, or the source fails.
///
/// One frame is requested every `period`. The source is always stopped before this returns, so
/// any device it holds is released.
#[instrument(skip_all, fields(period = ?period))]
pub async fn run_detection<S: LandmarkSource>(
    mut source: S,
    mut sender: GestureSender,
    period: Duration,
    mut stop: oneshot::Receiver<()>,
) -> DetectionEnd {
    if let Err(error) = source.start() {
        sender.fail(&error);
        source.stop();
        return DetectionEnd::Failed;
    }

    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let end = loop {
        tokio::select! {
            biased;

            _ = &mut stop => break DetectionEnd::Stopped,

            _ = interval.tick() => match source.next_frame().await {
                Ok(Some(frame)) => {
                    let gesture = classify_frame(frame);
                    trace!(?gesture);
                    sender.publish(gesture);
                }
                Ok(None) => break DetectionEnd::Exhausted,
                Err(error) => {
                    sender.fail(&error);
                    break DetectionEnd::Failed;
                }
            },
        }
    };

    source.stop();
    info!(?end, "Detection loop ended");
    end
}
