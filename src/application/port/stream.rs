// SPDX-License-Identifier: MPL-2.0
//! Token-and-manifest backend port.
//!
//! [`crate::stream::HttpStreamApi`] is the production adapter.

use crate::error::Result;
use crate::stream::{StreamVariants, VideoId};
use async_trait::async_trait;

/// Port for the stream backend.
#[async_trait]
pub trait StreamApi: Send + Sync {
    /// Fetches the quality variants of `video_id`.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`](crate::error::Error::Unauthorized) when the
    ///   backend rejects `token`
    /// - [`Error::Network`](crate::error::Error::Network) for any other
    ///   transport, status or parse failure
    async fn fetch_variants(&self, video_id: &VideoId, token: &str) -> Result<StreamVariants>;

    /// Exchanges `token` for a fresh one.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`StreamApi::fetch_variants`]; any rejection status
    /// maps to `Unauthorized`.
    async fn refresh_token(&self, video_id: &VideoId, token: &str) -> Result<String>;
}
