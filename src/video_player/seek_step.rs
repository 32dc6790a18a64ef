// SPDX-License-Identifier: MPL-2.0
//! Keyboard seek step domain type for video playback.

use crate::config::{
    DEFAULT_KEYBOARD_SEEK_STEP_SECS, MAX_KEYBOARD_SEEK_STEP_SECS, MIN_KEYBOARD_SEEK_STEP_SECS,
};
use std::time::Duration;

/// Distance covered by `j`/`l`, the horizontal arrow keys and the skip buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekStep(f64);

impl SeekStep {
    /// Creates a new seek step, clamping to valid range.
    #[must_use]
    pub fn new(secs: f64) -> Self {
        if !secs.is_finite() {
            return Self::default();
        }
        Self(secs.clamp(MIN_KEYBOARD_SEEK_STEP_SECS, MAX_KEYBOARD_SEEK_STEP_SECS))
    }

    /// Returns the step in seconds.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for SeekStep {
    fn default() -> Self {
        Self(DEFAULT_KEYBOARD_SEEK_STEP_SECS)
    }
}
