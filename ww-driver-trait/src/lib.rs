//! This crate provides the [`Driver`] trait and nothing else.
//!
//! It's structured like this to avoid dependency cycles.

use ww_frame::{SceneFrame, Viewport};
use ww_gesture::GestureStatus;

/// The trait implemented by all drivers. A driver is whatever turns a [`SceneFrame`] into
/// pixels, and it owns any GPU or window resources needed to do that.
pub trait Driver {
    /// Initialise the driver.
    fn init() -> Self
    where
        Self: Sized;

    /// Display the given frame using this driver.
    ///
    /// The frame is a snapshot owned by the driver from here on, so it can be uploaded or kept
    /// around without touching the animation state.
    fn display_frame(&mut self, frame: SceneFrame);

    /// Show the gesture status text. This is called once before the first frame and again
    /// whenever the status changes.
    #[allow(unused_variables)]
    fn display_status(&mut self, status: GestureStatus) {}

    /// The host surface changed size. The default implementation does nothing, since the aspect
    /// ratio in the next frame's camera already reflects the change.
    #[allow(unused_variables)]
    fn resize(&mut self, viewport: Viewport) {}

    /// Release any resources held by the driver. Nothing will be displayed after this is called.
    ///
    /// Drivers should also release their resources on drop, so calling this is optional.
    fn shutdown(&mut self) {}
}
