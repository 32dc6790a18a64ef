// SPDX-License-Identifier: MPL-2.0
//! Render snapshot of the player.
//!
//! A renderer needs nothing beyond a [`ViewState`] and an [`crate::i18n::I18n`]
//! to draw the controls. Labels are i18n keys, resolved at render time.

use super::menu::ActiveMenu;
use crate::ui::notifications::Notification;
use crate::video_player::{CaptionSelection, PlaybackSpeed, PlaybackState, PreviewFrame};

/// One entry of a selection menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<T> {
    pub value: T,
    /// Display text; either literal (quality keys, speeds) or an i18n key.
    pub label: String,
    pub active: bool,
}

/// Scrub preview popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewView {
    /// Horizontal anchor along the track in `[0, 1]`.
    pub fraction: f64,
    pub time_label: String,
    /// Latest raster, if a seek has completed.
    pub frame: Option<PreviewFrame>,
}

/// Everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub playback: PlaybackState,
    pub is_playing: bool,
    pub is_buffering: bool,

    pub current_time: f64,
    pub duration: Option<f64>,
    /// `"M:SS / M:SS"` or `"H:MM:SS / H:MM:SS"`.
    pub time_label: String,
    pub played_fraction: f64,
    pub buffered_fraction: f64,

    /// Slider position: zero while muted.
    pub volume_slider: f32,
    /// Muted icon shown when muted or at zero volume.
    pub show_muted_icon: bool,
    pub loop_enabled: bool,
    pub playback_speed: PlaybackSpeed,

    pub active_menu: ActiveMenu,
    pub speed_options: Vec<MenuEntry<PlaybackSpeed>>,
    pub quality_options: Vec<MenuEntry<String>>,
    pub caption_options: Vec<MenuEntry<CaptionSelection>>,
    pub caption_text: Option<String>,

    pub controls_visible: bool,
    pub fullscreen: bool,
    pub preview: Option<PreviewView>,
    pub toast: Option<Notification>,
}
