// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the stream backend.
//!
//! - `GET {base}/video/stream/{id}` → `{ "streamUrls": { quality: url } }`
//! - `POST {base}/video/{id}/refresh-token` → `{ "token": "..." }`
//!
//! Both requests carry the session token as a bearer credential. A `401`
//! maps to [`Error::Unauthorized`]; every other failure is
//! [`Error::Network`].

use crate::application::port::StreamApi;
use crate::error::{Error, Result};
use crate::stream::{StreamVariants, VideoId};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    token: String,
}

/// `reqwest`-backed [`StreamApi`].
#[derive(Clone, Debug)]
pub struct HttpStreamApi {
    inner: Client,
    base: Url,
}

impl HttpStreamApi {
    /// Creates an adapter for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `base_url` is not an absolute http(s) URL,
    /// or [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid api_base_url {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "api_base_url must be an http(s) URL, got {base_url:?}"
            )));
        }
        let inner = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { inner, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("cannot extend {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the variants endpoint for `video_id`.
    pub fn stream_url(&self, video_id: &VideoId) -> Result<Url> {
        self.endpoint(&["video", "stream", video_id.as_str()])
    }

    /// URL of the token refresh endpoint for `video_id`.
    pub fn refresh_url(&self, video_id: &VideoId) -> Result<Url> {
        self.endpoint(&["video", video_id.as_str(), "refresh-token"])
    }
}

#[async_trait]
impl StreamApi for HttpStreamApi {
    async fn fetch_variants(&self, video_id: &VideoId, token: &str) -> Result<StreamVariants> {
        let url = self.stream_url(video_id)?;
        let resp = self.inner.get(url).bearer_auth(token).send().await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => return Err(Error::Unauthorized),
            status if !status.is_success() => {
                return Err(Error::network(format!("HTTP {status} fetching stream variants")));
            }
            _ => {}
        }

        let body = resp.bytes().await?;
        let variants: StreamVariants = serde_json::from_slice(&body)?;
        if variants.is_empty() {
            return Err(Error::network("backend returned no stream variants"));
        }
        Ok(variants)
    }

    async fn refresh_token(&self, video_id: &VideoId, token: &str) -> Result<String> {
        let url = self.refresh_url(video_id)?;
        let resp = self.inner.post(url).bearer_auth(token).send().await?;

        if !resp.status().is_success() {
            tracing::debug!(status = %resp.status(), "token refresh rejected");
            return Err(Error::Unauthorized);
        }

        let body = resp.bytes().await?;
        let refreshed: RefreshResponse = serde_json::from_slice(&body)?;
        if refreshed.token.is_empty() {
            return Err(Error::network("backend returned an empty token"));
        }
        Ok(refreshed.token)
    }
}
