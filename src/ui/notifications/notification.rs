// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::error::Error;

/// Severity level of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully.
    #[default]
    Success,
    Info,
    /// Something failed; playback degraded.
    Error,
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    severity: Severity,
    /// The i18n key for the notification message.
    message_key: String,
    /// Arguments for message interpolation.
    message_args: Vec<(String, String)>,
}

impl Notification {
    /// Creates a notification whose text is resolved from `message_key` at
    /// render time.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Error toast for a player failure.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        Self::error(err.i18n_key())
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }
}
