// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`media`]: Native media element and adaptive-streaming client
//! - [`stream`]: Token-and-manifest backend
//! - [`display`]: Document fullscreen API
//!
//! # Design Notes
//!
//! - Media and display ports are not `Send`: the player runs on a single
//!   event-loop thread, and browser handles are thread-bound
//! - The backend port is `async` and `Send + Sync` so its futures can run on
//!   the Tokio runtime
//! - Methods return `Result` with the crate [`Error`](crate::error::Error)

pub mod display;
pub mod media;
pub mod stream;

pub use display::FullscreenHost;
pub use media::{
    AttachId, MediaElement, MediaEvent, PipelineEvent, PipelineEventKind, PipelineRole,
    SeekTicket, StreamingClient, StreamingClientFactory, TimeRange,
};
pub use stream::StreamApi;
