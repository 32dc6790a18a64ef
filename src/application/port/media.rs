// SPDX-License-Identifier: MPL-2.0
//! Media element and adaptive-streaming client ports.
//!
//! [`MediaElement`] mirrors the native media element contract: readable and
//! writable position, volume, rate and loop, play/pause, buffered ranges, and
//! a frame grab used for scrub previews. [`StreamingClient`] mirrors the
//! adaptive-streaming library: load a manifest URL, bind to an element, and
//! release. A client is never re-pointed at a new URL; it is destroyed and a
//! fresh one is created through [`StreamingClientFactory`].
//!
//! # Event flow
//!
//! Hosts forward native element events as [`MediaEvent`] and library signals
//! as [`PipelineEvent`]. Pipeline events carry the [`AttachId`] they were
//! created with, so signals from a replaced pipeline can be recognized and
//! dropped.

use crate::error::Result;
use image_rs::RgbaImage;

/// Identifies one attach of a streaming client to an element.
///
/// Ids increase monotonically per controller; only the latest is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachId(pub u64);

/// Identifies one seek-then-capture request on the preview element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeekTicket(pub u64);

/// A contiguous buffered interval, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Which of the two pipelines an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineRole {
    /// Visible, audible element driving the playback clock.
    Primary,
    /// Hidden, muted element used for scrub previews.
    Preview,
}

/// Native media element events.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// `timeupdate`: playback position advanced.
    TimeUpdate,
    /// `durationchange`: duration became known or changed.
    DurationChange,
    /// `play`
    Play,
    /// `pause`
    Pause,
    /// `waiting`: playback stalled on data.
    Waiting,
    /// `canplay`: enough data to resume.
    CanPlay,
    /// `progress`: buffered ranges grew.
    Progress,
    /// `ended`
    Ended,
    /// A seek issued through [`MediaElement::seek_with_ticket`] completed.
    Seeked(SeekTicket),
    /// The element reported a media error.
    Error(String),
}

/// Adaptive-streaming library signal.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineEvent {
    pub role: PipelineRole,
    pub attach: AttachId,
    pub kind: PipelineEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEventKind {
    /// Manifest loaded and parsed; the element can start playing.
    ManifestParsed,
    /// Fatal pipeline error.
    Error(String),
}

/// Port for the native media element.
pub trait MediaElement {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Moves the playback position.
    fn set_current_time(&mut self, secs: f64);

    /// Moves the playback position and reports completion exactly once as
    /// [`MediaEvent::Seeked`] carrying `ticket`.
    fn seek_with_ticket(&mut self, secs: f64, ticket: SeekTicket);

    /// Duration in seconds, `None` until known.
    fn duration(&self) -> Option<f64>;

    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    fn set_playback_rate(&mut self, rate: f64);

    fn set_loop(&mut self, enabled: bool);

    fn is_paused(&self) -> bool;

    /// Requests playback.
    ///
    /// # Errors
    ///
    /// Returns an error when the runtime rejects playback (e.g. autoplay policy).
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    /// Buffered ranges, ordered by start.
    fn buffered(&self) -> Vec<TimeRange>;

    /// Grabs the currently decoded frame, if one is available.
    fn capture_frame(&self) -> Option<RgbaImage>;
}

/// Port for one adaptive-streaming client instance.
pub trait StreamingClient {
    /// Starts loading the manifest at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the library rejects the source.
    fn load_source(&mut self, url: &str) -> Result<()>;

    /// Binds the client to `element`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be driven by this client
    /// (e.g. no media source support).
    fn attach_media(&mut self, element: &mut dyn MediaElement) -> Result<()>;

    /// Releases decoders and network resources. Called exactly once.
    fn destroy(&mut self);
}

/// Creates streaming clients.
///
/// The factory receives the role and attach id so the clients it builds can
/// tag the [`PipelineEvent`]s they emit.
pub trait StreamingClientFactory {
    fn create(&self, role: PipelineRole, attach: AttachId) -> Box<dyn StreamingClient>;
}
