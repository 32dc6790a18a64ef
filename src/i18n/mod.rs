// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Messages are Fluent resources embedded from `assets/i18n/*.ftl`. Locale
//! resolution order: CLI flag, config file, OS locale, then `en-US`. Keys
//! missing from the current locale fall back to `en-US`.

pub mod fluent;

pub use fluent::I18n;
