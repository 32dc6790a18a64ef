// SPDX-License-Identifier: MPL-2.0
//! Volume domain type for audio playback.
//!
//! This module provides a type-safe wrapper for volume values,
//! ensuring they are always within the valid range (0.0–1.0).

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME, VOLUME_STEP};

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// # Example
///
/// ```
/// use stream_player::video_player::Volume;
///
/// let vol = Volume::new(0.5);
/// assert_eq!(vol.value(), 0.5);
///
/// // Values outside range are clamped
/// let too_loud = Volume::new(2.0);
/// assert_eq!(too_loud.value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Silence.
    pub const MUTE: Volume = Volume(MIN_VOLUME);

    /// Creates a new volume level, clamping to valid range.
    ///
    /// Non-finite input is treated as silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if !volume.is_finite() {
            return Self::MUTE;
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively silent.
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 < 0.001
    }

    /// Increases volume by one step, clamping to maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(snap(self.0 + VOLUME_STEP))
    }

    /// Decreases volume by one step, clamping to minimum.
    #[must_use]
    pub fn decrease(self) -> Self {
        Self::new(snap(self.0 - VOLUME_STEP))
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

/// Rounds to hundredths so repeated steps land exactly on 0.0 and 1.0.
fn snap(volume: f32) -> f32 {
    (volume * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn new_clamps_to_valid_range() {
        assert_abs_diff_eq!(Volume::new(-0.5).value(), MIN_VOLUME);
        assert_abs_diff_eq!(Volume::new(1.5).value(), MAX_VOLUME);
        assert_abs_diff_eq!(Volume::new(0.5).value(), 0.5);
        assert_abs_diff_eq!(Volume::new(f32::NAN).value(), MIN_VOLUME);
    }

    #[test]
    fn default_is_expected_volume() {
        assert_abs_diff_eq!(Volume::default().value(), DEFAULT_VOLUME);
    }

    #[test]
    fn is_muted_detects_zero_volume() {
        assert!(Volume::new(0.0).is_muted());
        assert!(!Volume::new(0.01).is_muted());
    }

    #[test]
    fn stepping_down_from_full_reaches_exact_zero() {
        let mut vol = Volume::new(1.0);
        for _ in 0..10 {
            vol = vol.decrease();
        }
        assert_eq!(vol.value(), 0.0);
        assert!(vol.is_muted());

        // At min, stays at min
        assert_eq!(vol.decrease().value(), 0.0);
    }

    #[test]
    fn stepping_up_from_silence_reaches_exact_one() {
        let mut vol = Volume::MUTE;
        for _ in 0..12 {
            vol = vol.increase();
        }
        assert_eq!(vol.value(), MAX_VOLUME);
    }

    #[test]
    fn increase_adds_step() {
        let louder = Volume::new(0.5).increase();
        assert_abs_diff_eq!(louder.value(), 0.6, epsilon = 0.001);
    }
}
