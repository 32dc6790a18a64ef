// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Backend**: Stream API location and preferred quality
//! - **Volume**: Audio volume bounds and keyboard step
//! - **Seek**: Keyboard and skip-button seek step
//! - **Playback Speed**: Speed bounds and menu presets
//! - **Preview**: Scrub-preview raster surface size
//! - **Notifications**: Toast auto-dismiss delay

// ==========================================================================
// Backend Defaults
// ==========================================================================

/// Base URL of the token-and-manifest API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api";

/// Quality selected when a session starts, if the backend offers it.
pub const DEFAULT_QUALITY: &str = "720p";

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume adjustment per arrow key press (10%).
pub const VOLUME_STEP: f32 = 0.1;

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Default seek step for `j`/`l`, arrow keys and skip buttons (in seconds).
pub const DEFAULT_KEYBOARD_SEEK_STEP_SECS: f64 = 10.0;

/// Minimum keyboard seek step (in seconds).
pub const MIN_KEYBOARD_SEEK_STEP_SECS: f64 = 1.0;

/// Maximum keyboard seek step (in seconds).
pub const MAX_KEYBOARD_SEEK_STEP_SECS: f64 = 60.0;

// ==========================================================================
// Playback Speed Defaults
// ==========================================================================

/// Default playback speed (1.0 = normal).
pub const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

/// Minimum playback speed.
pub const MIN_PLAYBACK_SPEED: f64 = 0.25;

/// Maximum playback speed.
pub const MAX_PLAYBACK_SPEED: f64 = 2.0;

/// Speeds offered by the speed menu.
pub const PLAYBACK_SPEED_PRESETS: &[f64] = &[0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Width of the scrub-preview raster surface in pixels.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 160;

/// Height of the scrub-preview raster surface in pixels.
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 90;

/// Smallest accepted preview surface edge in pixels.
pub const MIN_PREVIEW_EDGE: u32 = 16;

/// Largest accepted preview surface edge in pixels.
pub const MAX_PREVIEW_EDGE: u32 = 1280;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Delay before a toast dismisses itself (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Minimum toast duration (in milliseconds).
pub const MIN_TOAST_DURATION_MS: u64 = 500;

/// Maximum toast duration (in milliseconds).
pub const MAX_TOAST_DURATION_MS: u64 = 30_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_VOLUME >= 0.0);
    assert!(MAX_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);

    assert!(MIN_KEYBOARD_SEEK_STEP_SECS > 0.0);
    assert!(MAX_KEYBOARD_SEEK_STEP_SECS >= MIN_KEYBOARD_SEEK_STEP_SECS);
    assert!(DEFAULT_KEYBOARD_SEEK_STEP_SECS >= MIN_KEYBOARD_SEEK_STEP_SECS);
    assert!(DEFAULT_KEYBOARD_SEEK_STEP_SECS <= MAX_KEYBOARD_SEEK_STEP_SECS);

    assert!(MIN_PLAYBACK_SPEED > 0.0);
    assert!(DEFAULT_PLAYBACK_SPEED >= MIN_PLAYBACK_SPEED);
    assert!(DEFAULT_PLAYBACK_SPEED <= MAX_PLAYBACK_SPEED);

    assert!(MIN_PREVIEW_EDGE > 0);
    assert!(DEFAULT_PREVIEW_WIDTH >= MIN_PREVIEW_EDGE);
    assert!(DEFAULT_PREVIEW_HEIGHT >= MIN_PREVIEW_EDGE);
    assert!(DEFAULT_PREVIEW_WIDTH <= MAX_PREVIEW_EDGE);
    assert!(DEFAULT_PREVIEW_HEIGHT <= MAX_PREVIEW_EDGE);

    assert!(MIN_TOAST_DURATION_MS > 0);
    assert!(DEFAULT_TOAST_DURATION_MS >= MIN_TOAST_DURATION_MS);
    assert!(DEFAULT_TOAST_DURATION_MS <= MAX_TOAST_DURATION_MS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_defaults_are_valid() {
        assert_eq!(DEFAULT_VOLUME, 1.0);
        assert!(DEFAULT_VOLUME >= MIN_VOLUME);
        assert!(DEFAULT_VOLUME <= MAX_VOLUME);
        assert!(VOLUME_STEP > 0.0);
    }

    #[test]
    fn speed_presets_are_sorted_and_in_range() {
        assert!(PLAYBACK_SPEED_PRESETS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(PLAYBACK_SPEED_PRESETS.first(), Some(&MIN_PLAYBACK_SPEED));
        assert_eq!(PLAYBACK_SPEED_PRESETS.last(), Some(&MAX_PLAYBACK_SPEED));
        assert!(PLAYBACK_SPEED_PRESETS.contains(&DEFAULT_PLAYBACK_SPEED));
    }

    #[test]
    fn preview_surface_is_16_by_9() {
        assert_eq!(DEFAULT_PREVIEW_WIDTH * 9, DEFAULT_PREVIEW_HEIGHT * 16);
    }

    #[test]
    fn toast_lasts_three_seconds() {
        assert_eq!(DEFAULT_TOAST_DURATION_MS, 3000);
    }
}
