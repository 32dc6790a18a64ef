// SPDX-License-Identifier: MPL-2.0
//! `stream_player` is the core of an adaptive-bitrate video player.
//!
//! It resolves quality variants from an authenticated backend, drives a
//! primary media element through a pluggable streaming client, renders scrub
//! previews from a hidden second element, and keeps the controls, menus,
//! captions and keyboard shortcuts consistent. Hosts supply the media
//! element, streaming library and fullscreen API through the ports in
//! [`application::port`] and render from [`ui::view_state::ViewState`].

#![doc(html_root_url = "https://docs.rs/stream_player/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod error;
pub mod i18n;
pub mod stream;
pub mod ui;
pub mod video_player;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
