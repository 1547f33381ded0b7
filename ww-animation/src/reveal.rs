//! This module contains the hysteresis latch for the reveal mode and the listener it notifies.

use crate::config::RevealConfig;

/// Something that wants to know when the reveal mode changes.
///
/// This is called synchronously from inside the tick that saw the change, at most once per tick,
/// and never when the mode stays the same.
pub trait RevealListener {
    fn on_reveal_change(&mut self, revealed: bool);
}

impl<F> RevealListener for F
where
    F: FnMut(bool),
{
    fn on_reveal_change(&mut self, revealed: bool) {
        self(revealed)
    }
}

/// A sticky boolean derived from the explosion factor, with a dead band between its two
/// thresholds so that it doesn't flicker when the explosion factor hovers near one of them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealLatch {
    revealed: bool,
    enter_above: f32,
    exit_below: f32,
}

impl RevealLatch {
    /// A hidden latch with the given thresholds.
    ///
    /// `exit_below` should not be greater than `enter_above`, otherwise there's no dead band. If
    /// it is, the two get swapped.
    pub fn new(enter_above: f32, exit_below: f32) -> Self {
        Self {
            revealed: false,
            enter_above: enter_above.max(exit_below),
            exit_below: exit_below.min(enter_above),
        }
    }

    pub fn from_config(config: &RevealConfig) -> Self {
        Self::new(config.enter_above, config.exit_below)
    }

    /// Is the reveal mode currently on?
    #[inline]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Feed the latest explosion factor into the latch, returning the new mode if it changed.
    pub fn update(&mut self, explosion: f32) -> Option<bool> {
        if !self.revealed && explosion > self.enter_above {
            self.revealed = true;
            Some(true)
        } else if self.revealed && explosion < self.exit_below {
            self.revealed = false;
            Some(false)
        } else {
            None
        }
    }
}

impl Default for RevealLatch {
    fn default() -> Self {
        Self::from_config(&RevealConfig::default())
    }
}
