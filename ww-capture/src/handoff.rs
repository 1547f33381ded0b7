//! This module contains the single-slot handoff of gestures from the detection loop to the
//! render loop.
//!
//! The detection loop overwrites the slot whenever it classifies a frame, and the render loop
//! takes whatever's there once per tick. Nothing is queued, so a slow render loop only ever sees
//! the latest gesture, and a slow detection loop means some ticks see no gesture at all.

use crate::CaptureError;
use tokio::sync::watch;
use tracing::{info, warn};
use ww_gesture::{GestureDescriptor, GestureStatus};

/// The latest classification result.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Detection {
    gesture: Option<GestureDescriptor>,
    status: GestureStatus,
}

/// Create a connected sender and receiver.
pub fn gesture_channel() -> (GestureSender, GestureReceiver) {
    let (tx, rx) = watch::channel(Detection::default());
    (
        GestureSender {
            tx,
            status: GestureStatus::default(),
        },
        GestureReceiver { rx },
    )
}

/// The detection loop's end of the handoff.
#[derive(Debug)]
pub struct GestureSender {
    tx: watch::Sender<Detection>,

    /// The last status we sent, so we only log changes.
    status: GestureStatus,
}

impl GestureSender {
    /// Overwrite the slot with the result of classifying a frame, where `None` means that there
    /// was no usable hand in it.
    pub fn publish(&mut self, gesture: Option<GestureDescriptor>) {
        let status = GestureStatus::from_gesture(gesture.as_ref());
        self.set_status(status);
        self.tx.send_replace(Detection { gesture, status });
    }

    /// Tell the render side that there won't be any more gestures because of `error`.
    pub fn fail(&mut self, error: &CaptureError) {
        warn!(%error, "Gesture input is unavailable");
        let status = error.status();
        self.set_status(status);
        self.tx.send_replace(Detection {
            gesture: None,
            status,
        });
    }

    /// The last status sent.
    #[inline]
    pub fn status(&self) -> GestureStatus {
        self.status
    }

    fn set_status(&mut self, status: GestureStatus) {
        if status != self.status {
            info!(%status, "Gesture status changed");
            self.status = status;
        }
    }
}

/// The render loop's end of the handoff.
#[derive(Clone, Debug)]
pub struct GestureReceiver {
    rx: watch::Receiver<Detection>,
}

impl GestureReceiver {
    /// Take the gesture delivered since the last call, if there was one.
    ///
    /// Returns `None` if nothing was delivered since the last call or if the last delivery had
    /// no hand. Once the detection loop has ended, this only ever returns `None`.
    pub fn take(&mut self) -> Option<GestureDescriptor> {
        let detection = self.rx.borrow_and_update();
        if detection.has_changed() {
            detection.gesture
        } else {
            None
        }
    }

    /// The status of the latest delivery, for diagnostic display. This doesn't count as taking
    /// the gesture.
    pub fn status(&self) -> GestureStatus {
        self.rx.borrow().status
    }
}
