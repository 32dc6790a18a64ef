// SPDX-License-Identifier: MPL-2.0
//! Player core: the primary media session, the scrub preview engine, and
//! the value types they share.
//!
//! Both controllers drive elements and streaming clients only through the
//! ports in [`crate::application::port`].

mod captions;
mod clock;
mod pipeline;
pub mod playback_speed;
mod preview;
pub mod seek_step;
mod session;
mod state;
pub mod time_units;
pub mod volume;

pub use captions::{CaptionError, CaptionLibrary, CaptionSelection, CaptionTrack, Captions, Cue};
pub use clock::{buffered_fraction, PlaybackClock};
pub use pipeline::PipelineSlot;
pub use playback_speed::PlaybackSpeed;
pub use preview::{PreviewEngine, PreviewFrame, PreviewSize};
pub use seek_step::SeekStep;
pub use session::{MediaSession, SessionSettings};
pub use state::{PlaybackSignal, PlaybackState};
pub use volume::Volume;
