// SPDX-License-Identifier: MPL-2.0
//! Time display and clamping utilities for video playback.
//!
//! # Constants
//!
//! - `SECS_PER_HOUR`: 3600
//! - `SECS_PER_MINUTE`: 60

/// Seconds per hour.
pub const SECS_PER_HOUR: u64 = 3600;

/// Seconds per minute.
pub const SECS_PER_MINUTE: u64 = 60;

/// Formats a playback position for display.
///
/// Positions under an hour render as `M:SS`, longer ones as `H:MM:SS`.
/// Negative and non-finite input renders as `0:00`.
///
/// # Examples
///
/// ```
/// use stream_player::video_player::time_units::format_time;
///
/// assert_eq!(format_time(0.0), "0:00");
/// assert_eq!(format_time(75.9), "1:15");
/// assert_eq!(format_time(3725.0), "1:02:05");
/// ```
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    let hours = total / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Clamps a position to `[0, duration]`.
///
/// While the duration is unknown only the lower bound applies.
#[inline]
pub fn clamp_position(secs: f64, duration: Option<f64>) -> f64 {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    match duration {
        Some(d) if d.is_finite() && d >= 0.0 => secs.min(d),
        _ => secs,
    }
}

/// Clamps a fraction to `[0, 1]`; NaN becomes 0.
#[inline]
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Returns `part / whole` as a fraction in `[0, 1]`, or 0 when `whole` is not positive.
#[inline]
pub fn fraction_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 && whole.is_finite() {
        clamp_fraction(part / whole)
    } else {
        0.0
    }
}
