// SPDX-License-Identifier: MPL-2.0
//! Observable playback clock mirrored from the primary element.

use super::state::{PlaybackSignal, PlaybackState};
use super::time_units::{clamp_position, fraction_of};
use crate::application::port::{MediaElement, TimeRange};

/// Position, duration, buffer and state as last reported by the element.
///
/// Only [`crate::video_player::MediaSession`] mutates the clock, from element
/// events or an explicit seek.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackClock {
    current_time: f64,
    duration: Option<f64>,
    buffered_fraction: f64,
    state: PlaybackState,
}

impl PlaybackClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Playback position in seconds, within `[0, duration]` once the duration is known.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Buffered share of the duration in `[0, 1]`.
    #[must_use]
    pub fn buffered_fraction(&self) -> f64 {
        self.buffered_fraction
    }

    /// Played share of the duration in `[0, 1]`.
    #[must_use]
    pub fn played_fraction(&self) -> f64 {
        self.duration
            .map_or(0.0, |d| fraction_of(self.current_time, d))
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    #[must_use]
    pub fn is_buffering(&self) -> bool {
        self.state.is_buffering()
    }

    pub(crate) fn apply(&mut self, signal: PlaybackSignal, element_paused: bool) {
        let next = self.state.on_signal(signal, element_paused);
        if next != self.state {
            tracing::trace!(from = ?self.state, to = ?next, ?signal, "playback state");
            self.state = next;
        }
    }

    pub(crate) fn set_position(&mut self, secs: f64) {
        self.current_time = clamp_position(secs, self.duration);
    }

    pub(crate) fn sync_position(&mut self, element: &dyn MediaElement) {
        self.set_position(element.current_time());
    }

    pub(crate) fn sync_duration(&mut self, element: &dyn MediaElement) {
        self.duration = element.duration().filter(|d| d.is_finite() && *d >= 0.0);
        self.current_time = clamp_position(self.current_time, self.duration);
        self.sync_buffered(element);
    }

    pub(crate) fn sync_buffered(&mut self, element: &dyn MediaElement) {
        self.buffered_fraction = buffered_fraction(&element.buffered(), self.duration);
    }

    /// Back to an idle, empty clock.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// End of the last buffered range over the duration, in `[0, 1]`.
///
/// Disjoint earlier ranges are not inspected.
#[must_use]
pub fn buffered_fraction(ranges: &[TimeRange], duration: Option<f64>) -> f64 {
    match (ranges.last(), duration) {
        (Some(last), Some(d)) => fraction_of(last.end, d),
        _ => 0.0,
    }
}
