// SPDX-License-Identifier: MPL-2.0
//! One playback attempt for a `(video, token, quality)` triple.

use crate::stream::{Resolution, StreamVariants, VideoId};

/// Playback session state.
///
/// Invariant: once variants are known, `selected_quality` is one of them.
/// The selection only moves once the stream for a new quality is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    video_id: VideoId,
    token: String,
    selected_quality: String,
    variants: StreamVariants,
}

impl PlaybackSession {
    pub fn new(video_id: VideoId, token: impl Into<String>, preferred_quality: impl Into<String>) -> Self {
        Self {
            video_id,
            token: token.into(),
            selected_quality: preferred_quality.into(),
            variants: StreamVariants::default(),
        }
    }

    #[must_use]
    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn replace_token(&mut self, token: String) {
        self.token = token;
    }

    #[must_use]
    pub fn selected_quality(&self) -> &str {
        &self.selected_quality
    }

    /// Quality keys, highest resolution first; empty until resolved.
    #[must_use]
    pub fn available_qualities(&self) -> Vec<&str> {
        self.variants.qualities()
    }

    #[must_use]
    pub fn offers(&self, quality: &str) -> bool {
        self.variants.contains(quality)
    }

    /// `preferred` if offered, otherwise the highest resolution.
    #[must_use]
    pub fn choose_quality(&self, preferred: &str) -> Option<String> {
        self.variants.choose_quality(preferred)
    }

    #[must_use]
    pub fn url_for(&self, quality: &str) -> Option<&str> {
        self.variants.url_for(quality)
    }

    /// Stores freshly resolved variants. The selection is kept if still
    /// offered and otherwise falls back to the closest offered quality.
    pub fn apply_resolution(&mut self, resolution: Resolution) {
        self.variants = resolution.variants;
        if let Some(quality) = self.variants.choose_quality(&self.selected_quality) {
            if quality != self.selected_quality {
                tracing::info!(
                    previous = %self.selected_quality,
                    selected = %quality,
                    "selected quality no longer offered"
                );
            }
            self.selected_quality = quality;
        }
    }

    /// Marks `quality` as the one playing. Returns `false` for unknown keys.
    pub fn commit_quality(&mut self, quality: &str) -> bool {
        if !self.offers(quality) {
            return false;
        }
        self.selected_quality = quality.to_string();
        true
    }
}
