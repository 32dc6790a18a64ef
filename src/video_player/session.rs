// SPDX-License-Identifier: MPL-2.0
//! Media session controller for the primary, audible element.
//!
//! The controller owns the primary element and its streaming pipeline. It
//! issues commands to the element and mirrors element events into a
//! [`PlaybackClock`].
//!
//! # Source lifecycle
//!
//! [`MediaSession::attach_source`] destroys the previous pipeline, creates a
//! new one and records the resume position. When the new pipeline reports
//! its manifest as parsed, the element is moved to the resume position and
//! asked to play. Signals tagged with an older [`AttachId`] are ignored, so a
//! slow pipeline that was replaced can never seek or start the element.

use super::clock::PlaybackClock;
use super::pipeline::PipelineSlot;
use super::state::{PlaybackSignal, PlaybackState};
use super::time_units::clamp_position;
use super::{PlaybackSpeed, Volume};
use crate::application::port::{
    AttachId, MediaElement, MediaEvent, PipelineEvent, PipelineEventKind, PipelineRole,
    StreamingClientFactory,
};
use crate::config::DEFAULT_VOLUME;
use crate::error::{Error, Result};
use std::rc::Rc;

/// Initial element settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub volume: Volume,
    pub muted: bool,
    pub playback_speed: PlaybackSpeed,
    pub loop_enabled: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            volume: Volume::default(),
            muted: false,
            playback_speed: PlaybackSpeed::default(),
            loop_enabled: false,
        }
    }
}

/// Controller for the primary element.
pub struct MediaSession {
    element: Box<dyn MediaElement>,
    factory: Rc<dyn StreamingClientFactory>,
    pipeline: PipelineSlot,
    clock: PlaybackClock,
    /// User volume; kept while muted so unmute can restore it.
    volume: Volume,
    muted: bool,
    playback_speed: PlaybackSpeed,
    loop_enabled: bool,
    source_url: Option<String>,
    resume_at: f64,
}

impl MediaSession {
    pub fn new(
        mut element: Box<dyn MediaElement>,
        factory: Rc<dyn StreamingClientFactory>,
        settings: SessionSettings,
    ) -> Self {
        let muted = settings.muted || settings.volume.is_muted();
        element.set_volume(if muted { 0.0 } else { settings.volume.value() });
        element.set_playback_rate(settings.playback_speed.value());
        element.set_loop(settings.loop_enabled);

        Self {
            element,
            factory,
            pipeline: PipelineSlot::new(PipelineRole::Primary),
            clock: PlaybackClock::new(),
            volume: settings.volume,
            muted,
            playback_speed: settings.playback_speed,
            loop_enabled: settings.loop_enabled,
            source_url: None,
            resume_at: 0.0,
        }
    }

    // ---------------------------------------------------------------------
    // Source
    // ---------------------------------------------------------------------

    /// Points the primary element at `url`, resuming from `resume_at` seconds
    /// once the manifest is parsed.
    ///
    /// # Errors
    ///
    /// Returns a playback or unsupported-media error when the pipeline cannot
    /// load or attach. The session is left without a source.
    pub fn attach_source(&mut self, url: &str, resume_at: f64) -> Result<AttachId> {
        self.element.pause();
        self.source_url = None;

        match self
            .pipeline
            .attach(self.factory.as_ref(), self.element.as_mut(), url)
        {
            Ok(attach) => {
                tracing::info!(url, resume_at, attach = attach.0, "attaching primary source");
                self.source_url = Some(url.to_string());
                self.resume_at = resume_at.max(0.0);
                self.clock.apply(PlaybackSignal::Attach, true);
                Ok(attach)
            }
            Err(err) => {
                tracing::error!(url, error = %err, "primary pipeline attach failed");
                self.clock.apply(PlaybackSignal::Failed, true);
                Err(classify(err))
            }
        }
    }

    /// URL of the attached source.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Attach id of the live pipeline.
    #[must_use]
    pub fn current_attach(&self) -> Option<AttachId> {
        self.pipeline.current()
    }

    /// Releases the pipeline and pauses the element.
    pub fn release(&mut self) {
        self.pipeline.release();
        self.element.pause();
        self.source_url = None;
        self.clock.reset();
    }

    /// Handles a streaming library signal for the primary pipeline.
    ///
    /// # Errors
    ///
    /// Returns the classified error for pipeline failures. Play rejections
    /// after the manifest is parsed are logged and not returned.
    pub fn handle_pipeline_event(&mut self, event: &PipelineEvent) -> Result<()> {
        if event.role != PipelineRole::Primary || !self.pipeline.is_current(event.attach) {
            tracing::debug!(attach = event.attach.0, "ignoring signal from replaced pipeline");
            return Ok(());
        }

        match &event.kind {
            PipelineEventKind::ManifestParsed => {
                let target = clamp_position(self.resume_at, self.element.duration());
                self.element.set_current_time(target);
                self.clock.set_position(target);
                self.start_playback();
                Ok(())
            }
            PipelineEventKind::Error(message) => {
                tracing::error!(%message, "primary pipeline error");
                self.clock.apply(PlaybackSignal::Failed, true);
                Err(Error::from_media_message(message))
            }
        }
    }

    /// Mirrors a native element event into the clock.
    ///
    /// # Errors
    ///
    /// Returns the classified error for [`MediaEvent::Error`].
    pub fn handle_media_event(&mut self, event: &MediaEvent) -> Result<()> {
        if self.clock.state().is_idle() {
            return Ok(());
        }
        let paused = self.element.is_paused();
        let element = self.element.as_ref();

        match event {
            MediaEvent::TimeUpdate => self.clock.sync_position(element),
            MediaEvent::DurationChange => self.clock.sync_duration(element),
            MediaEvent::Progress => self.clock.sync_buffered(element),
            MediaEvent::Play => self.clock.apply(PlaybackSignal::Play, paused),
            MediaEvent::Pause => self.clock.apply(PlaybackSignal::Pause, paused),
            MediaEvent::Waiting => self.clock.apply(PlaybackSignal::Waiting, paused),
            MediaEvent::CanPlay => self.clock.apply(PlaybackSignal::CanPlay, paused),
            MediaEvent::Ended => {
                self.clock.sync_position(element);
                self.clock.apply(PlaybackSignal::Ended, paused);
            }
            MediaEvent::Seeked(_) => {
                self.clock.sync_position(element);
                self.clock.apply(PlaybackSignal::Seeked, paused);
            }
            MediaEvent::Error(message) => {
                tracing::error!(%message, "primary element error");
                self.clock.apply(PlaybackSignal::Failed, true);
                return Err(Error::from_media_message(message));
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Transport
    // ---------------------------------------------------------------------

    /// Starts playback. No-op while already playing or without a source.
    pub fn play(&mut self) {
        if self.source_url.is_none() || !self.element.is_paused() {
            return;
        }
        self.start_playback();
    }

    /// Pauses playback. No-op while already paused.
    pub fn pause(&mut self) {
        if self.element.is_paused() {
            return;
        }
        self.element.pause();
    }

    pub fn toggle_play(&mut self) {
        if self.element.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    fn start_playback(&mut self) {
        if let Err(err) = self.element.play() {
            tracing::warn!(error = %err, "play request rejected");
            self.clock.apply(PlaybackSignal::PlayRejected, true);
        }
    }

    /// Moves to `secs`, clamped to `[0, duration]`.
    pub fn seek(&mut self, secs: f64) {
        let target = clamp_position(secs, self.duration());
        if self.clock.state() == PlaybackState::Loading {
            self.resume_at = target;
        }
        self.element.set_current_time(target);
        self.clock.set_position(target);
        self.clock
            .apply(PlaybackSignal::Seeked, self.element.is_paused());
    }

    /// Moves by `delta` seconds from the element's position.
    pub fn seek_relative(&mut self, delta: f64) {
        self.seek(self.element.current_time() + delta);
    }

    /// Seeks to a fraction of the duration. No-op while the duration is unknown.
    pub fn seek_fraction(&mut self, fraction: f64) {
        if let Some(duration) = self.duration() {
            self.seek(super::time_units::clamp_fraction(fraction) * duration);
        }
    }

    // ---------------------------------------------------------------------
    // Volume
    // ---------------------------------------------------------------------

    /// Sets the volume; a volume of zero mutes, anything else unmutes.
    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        self.muted = volume.is_muted();
        self.element.set_volume(volume.value());
    }

    /// Mutes, or restores the volume remembered at mute time.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            if self.volume.is_muted() {
                self.volume = Volume::new(DEFAULT_VOLUME);
            }
            self.muted = false;
            self.element.set_volume(self.volume.value());
        } else {
            self.muted = true;
            self.element.set_volume(0.0);
        }
    }

    /// Remembered user volume (unchanged while muted).
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Volume the element actually plays at.
    #[must_use]
    pub fn effective_volume(&self) -> Volume {
        if self.muted {
            Volume::MUTE
        } else {
            self.volume
        }
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    // ---------------------------------------------------------------------
    // Rate and loop
    // ---------------------------------------------------------------------

    pub fn set_playback_speed(&mut self, speed: PlaybackSpeed) {
        self.playback_speed = speed;
        self.element.set_playback_rate(speed.value());
    }

    #[must_use]
    pub fn playback_speed(&self) -> PlaybackSpeed {
        self.playback_speed
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
        self.element.set_loop(enabled);
    }

    #[must_use]
    pub fn is_loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    // ---------------------------------------------------------------------
    // Clock
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Live element position.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    /// Position a reload should resume from.
    ///
    /// While a source is still loading the element has not reached the
    /// recorded resume point yet, so that point is reported instead.
    #[must_use]
    pub fn resume_position(&self) -> f64 {
        if self.clock.state() == PlaybackState::Loading {
            self.resume_at
        } else {
            self.current_time()
        }
    }

    /// Duration as mirrored by the clock, falling back to the element.
    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        self.clock.duration().or_else(|| self.element.duration())
    }
}

impl std::fmt::Debug for MediaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaSession")
            .field("pipeline", &self.pipeline)
            .field("clock", &self.clock)
            .field("volume", &self.volume)
            .field("muted", &self.muted)
            .field("source_url", &self.source_url)
            .finish_non_exhaustive()
    }
}

/// Attach failures are playback errors unless the runtime named the format.
fn classify(err: Error) -> Error {
    match err {
        Error::Playback(message) => Error::from_media_message(&message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, FakeElement, FakeFactory};

    fn session() -> (MediaSession, FakeElement, FakeFactory) {
        let element = FakeElement::default();
        let factory = FakeFactory::default();
        let session = MediaSession::new(
            Box::new(element.clone()),
            Rc::new(factory.clone()),
            SessionSettings::default(),
        );
        (session, element, factory)
    }

    fn parsed(attach: AttachId) -> PipelineEvent {
        PipelineEvent {
            role: PipelineRole::Primary,
            attach,
            kind: PipelineEventKind::ManifestParsed,
        }
    }

    #[test]
    fn manifest_parsed_seeks_to_resume_point_then_plays() {
        let (mut session, element, _) = session();
        element.state().duration = Some(120.0);
        let attach = session.attach_source("u2", 42.0).unwrap();

        session.handle_pipeline_event(&parsed(attach)).unwrap();
        session.handle_media_event(&MediaEvent::Play).unwrap();

        assert_abs_diff_eq!(element.state().current_time, 42.0);
        assert!(!element.state().paused);
        assert!(session.clock().is_playing());
    }

    #[test]
    fn stale_manifest_signal_is_ignored() {
        let (mut session, element, _) = session();
        let old = session.attach_source("u1", 0.0).unwrap();
        let new = session.attach_source("u2", 30.0).unwrap();

        session.handle_pipeline_event(&parsed(old)).unwrap();
        assert_eq!(element.state().play_calls, 0);

        session.handle_pipeline_event(&parsed(new)).unwrap();
        assert_eq!(element.state().play_calls, 1);
        assert_abs_diff_eq!(element.state().current_time, 30.0);
    }

    #[test]
    fn resume_position_holds_pending_point_while_loading() {
        let (mut session, element, _) = session();
        element.state().duration = Some(120.0);
        let attach = session.attach_source("u1", 42.0).unwrap();
        element.state().current_time = 0.0;
        assert_abs_diff_eq!(session.resume_position(), 42.0);

        session.handle_pipeline_event(&parsed(attach)).unwrap();
        session.handle_media_event(&MediaEvent::Play).unwrap();
        element.state().current_time = 50.0;
        assert_abs_diff_eq!(session.resume_position(), 50.0);
    }

    #[test]
    fn seek_while_loading_moves_resume_point() {
        let (mut session, element, _) = session();
        element.state().duration = Some(120.0);
        let attach = session.attach_source("u1", 42.0).unwrap();
        session.seek(90.0);
        assert_abs_diff_eq!(session.resume_position(), 90.0);

        session.handle_pipeline_event(&parsed(attach)).unwrap();
        assert_abs_diff_eq!(element.state().current_time, 90.0);
    }

    #[test]
    fn reattach_releases_previous_pipeline() {
        let (mut session, _, factory) = session();
        let first = session.attach_source("u1", 0.0).unwrap();
        session.attach_source("u2", 0.0).unwrap();
        assert_eq!(
            factory.log.borrow().destroyed,
            vec![(PipelineRole::Primary, first)]
        );
        session.release();
        session.release();
        assert_eq!(factory.log.borrow().destroyed.len(), 2);
    }

    #[test]
    fn play_rejection_is_swallowed_and_leaves_paused() {
        let (mut session, element, _) = session();
        element.state().reject_play = true;
        let attach = session.attach_source("u", 0.0).unwrap();
        assert!(session.handle_pipeline_event(&parsed(attach)).is_ok());
        assert_eq!(
            session.clock().state(),
            crate::video_player::PlaybackState::Paused
        );
    }

    #[test]
    fn pipeline_error_is_classified() {
        let (mut session, _, _) = session();
        let attach = session.attach_source("u", 0.0).unwrap();
        let err = session
            .handle_pipeline_event(&PipelineEvent {
                role: PipelineRole::Primary,
                attach,
                kind: PipelineEventKind::Error("codec hevc not supported".into()),
            })
            .unwrap_err();
        assert!(matches!(err, Error::MediaUnsupported(_)));
    }

    #[test]
    fn play_and_pause_are_idempotent() {
        let (mut session, element, _) = session();
        session.attach_source("u", 0.0).unwrap();
        session.play();
        session.play();
        assert_eq!(element.state().play_calls, 1);
        session.pause();
        session.pause();
        assert!(element.state().paused);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let (mut session, element, _) = session();
        element.state().duration = Some(60.0);
        session.attach_source("u", 0.0).unwrap();
        session.handle_media_event(&MediaEvent::DurationChange).unwrap();

        session.seek(75.0);
        assert_abs_diff_eq!(element.state().current_time, 60.0);
        session.seek_relative(-100.0);
        assert_abs_diff_eq!(element.state().current_time, 0.0);
        session.seek_fraction(0.5);
        assert_abs_diff_eq!(session.clock().current_time(), 30.0);
    }

    #[test]
    fn toggle_mute_remembers_volume() {
        let (mut session, element, _) = session();
        session.set_volume(Volume::new(0.6));
        session.toggle_mute();
        assert!(session.is_muted());
        assert_abs_diff_eq!(element.state().volume, 0.0);
        assert_abs_diff_eq!(session.volume().value(), 0.6);

        session.toggle_mute();
        assert!(!session.is_muted());
        assert_abs_diff_eq!(element.state().volume, 0.6);
    }

    #[test]
    fn zero_volume_implies_muted() {
        let (mut session, element, _) = session();
        session.set_volume(Volume::new(0.0));
        assert!(session.is_muted());

        session.toggle_mute();
        assert!(!session.is_muted());
        assert_abs_diff_eq!(element.state().volume, DEFAULT_VOLUME);
    }

    #[test]
    fn rate_and_loop_pass_through() {
        let (mut session, element, _) = session();
        session.set_playback_speed(PlaybackSpeed::new(1.5));
        session.set_loop(true);
        assert_abs_diff_eq!(element.state().rate, 1.5);
        assert!(element.state().looping);
    }

    #[test]
    fn progress_updates_buffered_fraction() {
        let (mut session, element, _) = session();
        {
            let mut state = element.state();
            state.duration = Some(100.0);
            state.buffered = vec![crate::application::port::TimeRange::new(0.0, 25.0)];
        }
        session.attach_source("u", 0.0).unwrap();
        session.handle_media_event(&MediaEvent::DurationChange).unwrap();
        session.handle_media_event(&MediaEvent::Progress).unwrap();
        assert_abs_diff_eq!(session.clock().buffered_fraction(), 0.25);
    }

    #[test]
    fn events_before_attach_are_ignored() {
        let (mut session, _, _) = session();
        session.handle_media_event(&MediaEvent::Play).unwrap();
        assert!(session.clock().state().is_idle());
    }
}
