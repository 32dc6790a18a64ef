// SPDX-License-Identifier: MPL-2.0
//! Stream variant types returned by the backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque video identifier issued by the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quality → manifest URL mapping for one video.
///
/// Deserializes from the backend body `{ "streamUrls": { "720p": "..." } }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamVariants {
    #[serde(rename = "streamUrls")]
    stream_urls: BTreeMap<String, String>,
}

impl StreamVariants {
    /// Builds variants from `(quality, url)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            stream_urls: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stream_urls.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stream_urls.len()
    }

    #[must_use]
    pub fn contains(&self, quality: &str) -> bool {
        self.stream_urls.contains_key(quality)
    }

    /// Returns the manifest URL for `quality`.
    #[must_use]
    pub fn url_for(&self, quality: &str) -> Option<&str> {
        self.stream_urls.get(quality).map(String::as_str)
    }

    /// Quality keys, highest resolution first.
    #[must_use]
    pub fn qualities(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.stream_urls.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| quality_rank(b).cmp(&quality_rank(a)).then(a.cmp(b)));
        keys
    }

    /// Picks the quality to play.
    ///
    /// `preferred` wins when offered; otherwise the highest resolution.
    /// Returns `None` only when there are no variants.
    #[must_use]
    pub fn choose_quality(&self, preferred: &str) -> Option<String> {
        if self.contains(preferred) {
            return Some(preferred.to_string());
        }
        self.qualities().first().map(|q| (*q).to_string())
    }
}

/// Leading number of a quality key (`"1080p"` → 1080); 0 when absent.
fn quality_rank(key: &str) -> u32 {
    let digits: String = key.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
