// SPDX-License-Identifier: MPL-2.0
//! Scrub preview engine.
//!
//! A second, muted element with its own pipeline is seeked to the hovered
//! position on the progress track. When the seek completes the decoded frame
//! is scaled into a fixed-size raster. Every seek carries a [`SeekTicket`];
//! only the completion of the most recent ticket may replace the raster.

use super::pipeline::PipelineSlot;
use super::time_units::{clamp_fraction, clamp_position};
use crate::application::port::{
    AttachId, MediaElement, MediaEvent, PipelineEvent, PipelineEventKind, PipelineRole,
    SeekTicket, StreamingClientFactory,
};
use crate::config::{DEFAULT_PREVIEW_HEIGHT, DEFAULT_PREVIEW_WIDTH, MAX_PREVIEW_EDGE, MIN_PREVIEW_EDGE};
use crate::error::Result;
use image_rs::imageops::{self, FilterType};
use image_rs::RgbaImage;
use std::rc::Rc;

/// Raster dimensions in pixels, each edge clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    width: u32,
    height: u32,
}

impl PreviewSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.clamp(MIN_PREVIEW_EDGE, MAX_PREVIEW_EDGE),
            height: height.clamp(MIN_PREVIEW_EDGE, MAX_PREVIEW_EDGE),
        }
    }

    #[must_use]
    pub fn width(self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u32 {
        self.height
    }
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_WIDTH, DEFAULT_PREVIEW_HEIGHT)
    }
}

/// Latest rasterized preview and the time it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub time: f64,
    pub image: RgbaImage,
}

pub struct PreviewEngine {
    element: Box<dyn MediaElement>,
    factory: Rc<dyn StreamingClientFactory>,
    pipeline: PipelineSlot,
    size: PreviewSize,
    ready: bool,
    hovering: bool,
    pointer_fraction: f64,
    preview_time: f64,
    next_ticket: u64,
    pending: Option<(SeekTicket, f64)>,
    frame: Option<PreviewFrame>,
}

impl PreviewEngine {
    pub fn new(
        mut element: Box<dyn MediaElement>,
        factory: Rc<dyn StreamingClientFactory>,
        size: PreviewSize,
    ) -> Self {
        element.set_muted(true);
        element.set_volume(0.0);
        Self {
            element,
            factory,
            pipeline: PipelineSlot::new(PipelineRole::Preview),
            size,
            ready: false,
            hovering: false,
            pointer_fraction: 0.0,
            preview_time: 0.0,
            next_ticket: 0,
            pending: None,
            frame: None,
        }
    }

    /// Points the hidden element at `url`, discarding any raster and pending seek.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error; the engine then has no source and shows no preview.
    pub fn load_source(&mut self, url: &str) -> Result<AttachId> {
        self.ready = false;
        self.pending = None;
        self.frame = None;
        self.element.pause();
        self.element.set_muted(true);

        let attach = self
            .pipeline
            .attach(self.factory.as_ref(), self.element.as_mut(), url);
        if let Err(err) = &attach {
            tracing::warn!(url, error = %err, "preview pipeline unavailable");
        }
        attach
    }

    /// Handles a streaming library signal for the preview pipeline.
    pub fn handle_pipeline_event(&mut self, event: &PipelineEvent) {
        if event.role != PipelineRole::Preview || !self.pipeline.is_current(event.attach) {
            tracing::debug!(attach = event.attach.0, "ignoring signal from replaced preview pipeline");
            return;
        }
        match &event.kind {
            PipelineEventKind::ManifestParsed => self.ready = true,
            PipelineEventKind::Error(message) => {
                tracing::warn!(%message, "preview pipeline error");
                self.release();
            }
        }
    }

    /// Handles a native event from the hidden element.
    pub fn handle_media_event(&mut self, event: &MediaEvent) {
        match event {
            MediaEvent::Seeked(ticket) => self.complete_seek(*ticket),
            MediaEvent::Error(message) => {
                tracing::warn!(%message, "preview element error");
                self.pending = None;
            }
            _ => {}
        }
    }

    /// Maps a pointer fraction to a time in `[0, duration]`.
    #[must_use]
    pub fn preview_time(pointer_fraction: f64, duration: f64) -> f64 {
        clamp_position(clamp_fraction(pointer_fraction) * duration, Some(duration))
    }

    /// Seeks the hidden element to the hovered time.
    ///
    /// Supersedes any pending seek. Returns the ticket of the new seek, or
    /// `None` until the source's manifest is parsed or while the duration
    /// is unknown.
    pub fn update_preview(&mut self, pointer_fraction: f64, duration: Option<f64>) -> Option<SeekTicket> {
        self.pointer_fraction = clamp_fraction(pointer_fraction);
        let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
        self.preview_time = Self::preview_time(pointer_fraction, duration);

        if !self.ready {
            tracing::trace!(time = self.preview_time, "preview source not ready");
            return None;
        }

        self.next_ticket += 1;
        let ticket = SeekTicket(self.next_ticket);
        self.pending = Some((ticket, self.preview_time));
        self.element.seek_with_ticket(self.preview_time, ticket);
        Some(ticket)
    }

    /// Rasterizes the hidden element's frame if `ticket` is the latest seek.
    pub fn complete_seek(&mut self, ticket: SeekTicket) {
        let Some((latest, time)) = self.pending else {
            tracing::trace!(ticket = ticket.0, "seek completion without pending preview");
            return;
        };
        if ticket != latest {
            tracing::trace!(ticket = ticket.0, latest = latest.0, "dropping superseded preview seek");
            return;
        }
        self.pending = None;

        match self.element.capture_frame() {
            Some(source) => {
                let image = imageops::resize(
                    &source,
                    self.size.width(),
                    self.size.height(),
                    FilterType::Triangle,
                );
                self.frame = Some(PreviewFrame { time, image });
            }
            None => tracing::debug!(time, "no decoded frame for preview"),
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovering = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovering = false;
        self.pending = None;
    }

    /// Whether the preview popup is shown: only while hovering the track.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.hovering
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn pointer_fraction(&self) -> f64 {
        self.pointer_fraction
    }

    #[must_use]
    pub fn hovered_time(&self) -> f64 {
        self.preview_time
    }

    #[must_use]
    pub fn frame(&self) -> Option<&PreviewFrame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn size(&self) -> PreviewSize {
        self.size
    }

    #[must_use]
    pub fn current_attach(&self) -> Option<AttachId> {
        self.pipeline.current()
    }

    /// Releases the hidden pipeline and forgets the raster.
    pub fn release(&mut self) {
        self.pipeline.release();
        self.element.pause();
        self.ready = false;
        self.pending = None;
        self.frame = None;
    }
}

impl std::fmt::Debug for PreviewEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewEngine")
            .field("pipeline", &self.pipeline)
            .field("size", &self.size)
            .field("hovering", &self.hovering)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, FakeElement, FakeFactory, F64_EPSILON};

    fn load_ready(engine: &mut PreviewEngine) -> AttachId {
        let attach = engine.load_source("u").unwrap();
        engine.handle_pipeline_event(&PipelineEvent {
            role: PipelineRole::Preview,
            attach,
            kind: PipelineEventKind::ManifestParsed,
        });
        attach
    }

    fn engine() -> (PreviewEngine, FakeElement) {
        let element = FakeElement::default();
        let engine = PreviewEngine::new(
            Box::new(element.clone()),
            Rc::new(FakeFactory::default()),
            PreviewSize::default(),
        );
        (engine, element)
    }

    #[test]
    fn preview_time_is_fraction_of_duration() {
        assert_abs_diff_eq!(PreviewEngine::preview_time(0.25, 200.0), 50.0);
        assert_abs_diff_eq!(PreviewEngine::preview_time(1.0, 200.0), 200.0);
    }

    #[test]
    fn preview_time_clamps_out_of_range_fractions() {
        assert_abs_diff_eq!(PreviewEngine::preview_time(-0.5, 80.0), 0.0);
        assert_abs_diff_eq!(PreviewEngine::preview_time(1.7, 80.0), 80.0);
        assert_abs_diff_eq!(PreviewEngine::preview_time(f64::NAN, 80.0), 0.0);
    }

    #[test]
    fn element_is_always_muted() {
        let (mut engine, element) = engine();
        assert!(element.state().muted);
        engine.load_source("u").unwrap();
        assert!(element.state().muted);
    }

    #[test]
    fn latest_seek_wins_over_stale_completion() {
        let (mut engine, _) = engine();
        load_ready(&mut engine);

        let first = engine.update_preview(0.1, Some(100.0)).unwrap();
        let second = engine.update_preview(0.6, Some(100.0)).unwrap();

        engine.complete_seek(second);
        engine.complete_seek(first);

        let frame = engine.frame().unwrap();
        assert_abs_diff_eq!(frame.time, 60.0, epsilon = F64_EPSILON);
        assert_eq!(frame.image.get_pixel(0, 0).0[0], 60);
    }

    #[test]
    fn stale_completion_before_latest_produces_no_frame() {
        let (mut engine, _) = engine();
        load_ready(&mut engine);
        let first = engine.update_preview(0.1, Some(100.0)).unwrap();
        engine.update_preview(0.6, Some(100.0)).unwrap();

        engine.complete_seek(first);
        assert!(engine.frame().is_none());
    }

    #[test]
    fn raster_has_configured_size() {
        let element = FakeElement::default();
        let mut engine = PreviewEngine::new(
            Box::new(element),
            Rc::new(FakeFactory::default()),
            PreviewSize::new(160, 90),
        );
        load_ready(&mut engine);
        let ticket = engine.update_preview(0.5, Some(10.0)).unwrap();
        engine.handle_media_event(&MediaEvent::Seeked(ticket));
        let frame = engine.frame().unwrap();
        assert_eq!(frame.image.dimensions(), (160, 90));
    }

    #[test]
    fn no_seek_without_duration_or_source() {
        let (mut engine, element) = engine();
        assert!(engine.update_preview(0.5, Some(10.0)).is_none());
        load_ready(&mut engine);
        assert!(engine.update_preview(0.5, None).is_none());
        assert!(element.state().ticketed_seeks.is_empty());
    }

    #[test]
    fn hover_waits_for_parsed_manifest() {
        let (mut engine, element) = engine();
        let attach = engine.load_source("u").unwrap();

        assert!(engine.update_preview(0.5, Some(10.0)).is_none());
        assert_abs_diff_eq!(engine.hovered_time(), 5.0);
        assert!(element.state().ticketed_seeks.is_empty());

        engine.handle_pipeline_event(&PipelineEvent {
            role: PipelineRole::Preview,
            attach,
            kind: PipelineEventKind::ManifestParsed,
        });
        assert!(engine.is_ready());
        assert!(engine.update_preview(0.5, Some(10.0)).is_some());
        assert_eq!(element.state().ticketed_seeks.len(), 1);
    }

    #[test]
    fn reloading_requires_a_fresh_manifest() {
        let (mut engine, element) = engine();
        let stale = load_ready(&mut engine);
        engine.load_source("u2").unwrap();
        engine.handle_pipeline_event(&PipelineEvent {
            role: PipelineRole::Preview,
            attach: stale,
            kind: PipelineEventKind::ManifestParsed,
        });

        assert!(!engine.is_ready());
        assert!(engine.update_preview(0.5, Some(10.0)).is_none());
        assert!(element.state().ticketed_seeks.is_empty());
    }

    #[test]
    fn visibility_follows_hover_only() {
        let (mut engine, _) = engine();
        assert!(!engine.is_visible());
        engine.pointer_enter();
        assert!(engine.is_visible());
        engine.pointer_leave();
        assert!(!engine.is_visible());
    }

    #[test]
    fn size_is_clamped() {
        let size = PreviewSize::new(1, 100_000);
        assert_eq!(size.width(), MIN_PREVIEW_EDGE);
        assert_eq!(size.height(), MAX_PREVIEW_EDGE);
    }
}
