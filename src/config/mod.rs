// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - UI language
//! - `[player]` - Backend location, preferred quality, volume, loop, speed, seek step
//! - `[preview]` - Scrub-preview surface size
//! - `[notifications]` - Toast duration
//!
//! # Examples
//!
//! ```no_run
//! use stream_player::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.general.language = Some("es".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::notifications::ToastDuration;
use crate::video_player::{PlaybackSpeed, PreviewSize, SeekStep, Volume};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "es").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Playback and backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Base URL of the stream API (without trailing slash).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Quality requested when a session starts.
    #[serde(default = "default_quality")]
    pub default_quality: String,

    /// Playback volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    /// Whether audio starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Whether playback loops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_enabled: Option<bool>,

    /// Initial playback speed.
    #[serde(
        default = "default_playback_speed",
        skip_serializing_if = "Option::is_none"
    )]
    pub playback_speed: Option<f64>,

    /// Seek step for `j`/`l`, arrow keys and skip buttons (seconds).
    #[serde(
        default = "default_keyboard_seek_step_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub keyboard_seek_step_secs: Option<f64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_quality: default_quality(),
            volume: default_volume(),
            muted: Some(false),
            loop_enabled: Some(false),
            playback_speed: default_playback_speed(),
            keyboard_seek_step_secs: default_keyboard_seek_step_secs(),
        }
    }
}

impl PlayerConfig {
    /// Returns the configured volume, clamped.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume.map(Volume::new).unwrap_or_default()
    }

    /// Returns the configured playback speed, clamped.
    #[must_use]
    pub fn playback_speed(&self) -> PlaybackSpeed {
        self.playback_speed
            .map(PlaybackSpeed::new)
            .unwrap_or_default()
    }

    /// Returns the configured seek step, clamped.
    #[must_use]
    pub fn seek_step(&self) -> SeekStep {
        self.keyboard_seek_step_secs
            .map(SeekStep::new)
            .unwrap_or_default()
    }
}

/// Scrub-preview settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_width")]
    pub width: u32,
    #[serde(default = "default_preview_height")]
    pub height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PREVIEW_WIDTH,
            height: DEFAULT_PREVIEW_HEIGHT,
        }
    }
}

impl PreviewConfig {
    /// Returns the surface size, clamped to supported bounds.
    #[must_use]
    pub fn size(&self) -> PreviewSize {
        PreviewSize::new(self.width, self.height)
    }
}

/// Toast settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    #[serde(
        default = "default_toast_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub toast_duration_ms: Option<u64>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

impl NotificationConfig {
    #[must_use]
    pub fn toast_duration(&self) -> ToastDuration {
        self.toast_duration_ms
            .map(ToastDuration::from_millis)
            .unwrap_or_default()
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Player configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_quality() -> String {
    DEFAULT_QUALITY.to_string()
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

fn default_playback_speed() -> Option<f64> {
    Some(DEFAULT_PLAYBACK_SPEED)
}

fn default_keyboard_seek_step_secs() -> Option<f64> {
    Some(DEFAULT_KEYBOARD_SEEK_STEP_SECS)
}

fn default_preview_width() -> u32 {
    DEFAULT_PREVIEW_WIDTH
}

fn default_preview_height() -> u32 {
    DEFAULT_PREVIEW_HEIGHT
}

fn default_toast_duration_ms() -> Option<u64> {
    Some(DEFAULT_TOAST_DURATION_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
