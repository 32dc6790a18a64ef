// SPDX-License-Identifier: MPL-2.0
//! Playback speed domain type for video playback.
//!
//! This module provides a type-safe wrapper for playback speed values,
//! ensuring they are always within the valid range (0.25x - 2.0x).

use crate::config::{
    DEFAULT_PLAYBACK_SPEED, MAX_PLAYBACK_SPEED, MIN_PLAYBACK_SPEED, PLAYBACK_SPEED_PRESETS,
};
use std::fmt;

/// Playback speed value, guaranteed to be within valid range (0.25x - 2.0x).
///
/// # Example
///
/// ```
/// use stream_player::video_player::PlaybackSpeed;
///
/// let speed = PlaybackSpeed::new(1.5);
/// assert_eq!(speed.value(), 1.5);
///
/// // Values outside range are clamped
/// let too_fast = PlaybackSpeed::new(100.0);
/// assert_eq!(too_fast.value(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Creates a new playback speed, clamping to valid range.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        if !speed.is_finite() {
            return Self::default();
        }
        Self(speed.clamp(MIN_PLAYBACK_SPEED, MAX_PLAYBACK_SPEED))
    }

    /// Returns the speed value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Speeds listed in the speed menu, slowest first.
    pub fn presets() -> impl Iterator<Item = PlaybackSpeed> {
        PLAYBACK_SPEED_PRESETS.iter().copied().map(PlaybackSpeed)
    }

    /// Returns true if this speed matches `other` within menu precision.
    #[must_use]
    pub fn matches(self, other: PlaybackSpeed) -> bool {
        (self.0 - other.0).abs() < 0.001
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(DEFAULT_PLAYBACK_SPEED)
    }
}

/// Menu label, e.g. `1.25x`.
impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}
