// SPDX-License-Identifier: MPL-2.0
//! Single-toast lifecycle.
//!
//! One toast is visible at a time. Showing a new one replaces the current
//! toast and restarts the dismissal timer. Time is passed in explicitly so
//! hosts can drive it from their own clock.

use super::notification::Notification;
use crate::config::{DEFAULT_TOAST_DURATION_MS, MAX_TOAST_DURATION_MS, MIN_TOAST_DURATION_MS};
use std::time::{Duration, Instant};

/// How long a toast stays visible, clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastDuration(Duration);

impl ToastDuration {
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(
            millis.clamp(MIN_TOAST_DURATION_MS, MAX_TOAST_DURATION_MS),
        ))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for ToastDuration {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TOAST_DURATION_MS)
    }
}

#[derive(Debug, Clone)]
struct Shown {
    notification: Notification,
    dismiss_at: Instant,
}

/// Holds the visible toast and its dismissal deadline.
#[derive(Debug, Clone, Default)]
pub struct Manager {
    duration: ToastDuration,
    current: Option<Shown>,
}

impl Manager {
    #[must_use]
    pub fn new(duration: ToastDuration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    /// Shows `notification` from `now`, replacing any visible toast.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        tracing::debug!(key = notification.message_key(), "toast");
        self.current = Some(Shown {
            notification,
            dismiss_at: now + self.duration.as_duration(),
        });
    }

    /// Dismisses the toast once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|s| now >= s.dismiss_at) {
            self.current = None;
        }
    }

    /// Hides the visible toast before its deadline.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|s| &s.notification)
    }

    #[must_use]
    pub fn duration(&self) -> ToastDuration {
        self.duration
    }
}
