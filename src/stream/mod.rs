// SPDX-License-Identifier: MPL-2.0
//! Stream resolution: video ids, quality variants, and the backend adapter.

mod http;
mod resolver;
mod variants;

pub use http::HttpStreamApi;
pub use resolver::{Resolution, StreamResolver};
pub use variants::{StreamVariants, VideoId};
