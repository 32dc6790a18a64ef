// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for user feedback.
//!
//! Every failure the player reports, and the token refresh outcomes, end up
//! here as a single transient toast that auto-dismisses.
//!
//! - [`notification`] - `Notification` with its severity and i18n key
//! - [`manager`] - `Manager` holding the visible toast and its deadline

mod manager;
mod notification;

pub use manager::{Manager, ToastDuration};
pub use notification::{Notification, Severity};
