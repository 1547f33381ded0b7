//! This module contains [`GestureStatus`], the text shown to the user about what the hand is doing.

use crate::GestureDescriptor;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A human-readable summary of the latest classification, for diagnostic display.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum GestureStatus {
    /// Nothing has been classified yet.
    #[default]
    #[strum(serialize = "Initializing...")]
    Initializing,

    /// A fist, which assembles the tree.
    #[strum(serialize = "Fist: Assembling")]
    Fist,

    /// An open palm, which explodes the tree.
    #[strum(serialize = "Open: Exploding")]
    Open,

    /// A hand that's neither a fist nor open.
    #[strum(serialize = "Hand Detected")]
    HandDetected,

    /// No hand in the latest frame.
    #[strum(serialize = "Waiting for hands...")]
    WaitingForHands,

    /// The camera couldn't be opened, so there will never be a hand.
    #[strum(serialize = "Camera unavailable")]
    CameraUnavailable,

    /// The landmark detector couldn't be started, so there will never be a hand.
    #[strum(serialize = "Detector unavailable")]
    DetectorUnavailable,
}

impl GestureStatus {
    /// The status for one classification event, where `None` means that no hand was found.
    pub fn from_gesture(gesture: Option<&GestureDescriptor>) -> Self {
        match gesture {
            Some(GestureDescriptor { is_fist: true, .. }) => Self::Fist,
            Some(GestureDescriptor { is_open: true, .. }) => Self::Open,
            Some(_) => Self::HandDetected,
            None => Self::WaitingForHands,
        }
    }

    /// Whether this status means gesture input is gone for good.
    pub fn is_permanent_failure(self) -> bool {
        matches!(self, Self::CameraUnavailable | Self::DetectorUnavailable)
    }
}
