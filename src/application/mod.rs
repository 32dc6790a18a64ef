// SPDX-License-Identifier: MPL-2.0
//! Application layer - port definitions for the player's collaborators.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - The player core depends only on these traits
//! - Hosts (a browser binding, a native shell, test fakes) implement them
//!
//! # Example
//!
//! ```ignore
//! use stream_player::application::port::{MediaElement, StreamingClientFactory};
//!
//! // A host binds its native media element and streaming library
//! struct HtmlVideo { /* ... */ }
//! impl MediaElement for HtmlVideo { /* ... */ }
//! ```

pub mod port;
