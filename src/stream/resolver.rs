// SPDX-License-Identifier: MPL-2.0
//! Stream resolution on top of a [`StreamApi`].

use crate::application::port::StreamApi;
use crate::error::Result;
use crate::stream::{StreamVariants, VideoId};
use std::sync::Arc;

/// Outcome of a successful resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub variants: StreamVariants,
}

impl Resolution {
    #[must_use]
    pub fn new(variants: StreamVariants) -> Self {
        Self { variants }
    }

    /// Quality keys, highest resolution first.
    #[must_use]
    pub fn qualities(&self) -> Vec<&str> {
        self.variants.qualities()
    }
}

/// Fetches stream variants and exchanges tokens.
///
/// Failures are returned once and never retried here.
#[derive(Clone)]
pub struct StreamResolver {
    api: Arc<dyn StreamApi>,
}

impl StreamResolver {
    pub fn new(api: Arc<dyn StreamApi>) -> Self {
        Self { api }
    }

    /// Fetches the quality variants of `video_id`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the token is rejected, `Network` for anything else.
    pub async fn resolve(&self, video_id: &VideoId, token: &str) -> Result<Resolution> {
        tracing::info!(%video_id, "resolving stream variants");
        match self.api.fetch_variants(video_id, token).await {
            Ok(variants) => {
                let resolution = Resolution::new(variants);
                tracing::debug!(%video_id, qualities = ?resolution.qualities(), "stream variants resolved");
                Ok(resolution)
            }
            Err(err) => {
                tracing::warn!(%video_id, error = %err, "stream resolve failed");
                Err(err)
            }
        }
    }

    /// Exchanges `token` for a fresh one.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the backend refuses, `Network` for transport failures.
    pub async fn refresh_token(&self, video_id: &VideoId, token: &str) -> Result<String> {
        tracing::info!(%video_id, "refreshing playback token");
        let result = self.api.refresh_token(video_id, token).await;
        if let Err(err) = &result {
            tracing::warn!(%video_id, error = %err, "token refresh failed");
        }
        result
    }
}

impl std::fmt::Debug for StreamResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResolver").finish_non_exhaustive()
    }
}
