// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and in-memory port fakes.
//!
//! Re-exports the `approx` crate's assertion macros, which handle
//! floating-point precision issues that `assert_eq!` cannot.
//!
//! Available to integration tests and downstream crates through the
//! `test-utils` feature.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::application::port::{
    AttachId, MediaElement, PipelineRole, SeekTicket, StreamingClient, StreamingClientFactory,
    TimeRange,
};
use crate::error::{Error, Result};
use image_rs::{Rgba, RgbaImage};
use std::cell::RefCell;
use std::rc::Rc;

/// Default epsilon for f64 comparisons of playback positions.
pub const F64_EPSILON: f64 = 1e-9;

/// Observable state behind a [`FakeElement`].
#[derive(Debug)]
pub struct ElementState {
    pub current_time: f64,
    pub duration: Option<f64>,
    pub volume: f32,
    pub muted: bool,
    pub rate: f64,
    pub looping: bool,
    pub paused: bool,
    pub reject_play: bool,
    pub play_calls: usize,
    pub buffered: Vec<TimeRange>,
    /// Seeks issued with a ticket, in call order.
    pub ticketed_seeks: Vec<(f64, SeekTicket)>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            muted: false,
            rate: 1.0,
            looping: false,
            paused: true,
            reject_play: false,
            play_calls: 0,
            buffered: Vec::new(),
            ticketed_seeks: Vec::new(),
        }
    }
}

/// Media element whose state is shared with the test through an `Rc`.
///
/// Captured frames are filled with a colour whose red channel is the
/// current time in whole seconds, so tests can tell which seek produced them.
#[derive(Debug, Clone, Default)]
pub struct FakeElement(pub Rc<RefCell<ElementState>>);

impl FakeElement {
    #[must_use]
    pub fn with_duration(secs: f64) -> Self {
        let element = Self::default();
        element.state().duration = Some(secs);
        element
    }

    pub fn state(&self) -> std::cell::RefMut<'_, ElementState> {
        self.0.borrow_mut()
    }

    /// Ticket of the most recent ticketed seek.
    #[must_use]
    pub fn last_ticket(&self) -> Option<SeekTicket> {
        self.0.borrow().ticketed_seeks.last().map(|(_, ticket)| *ticket)
    }
}

impl MediaElement for FakeElement {
    fn current_time(&self) -> f64 {
        self.0.borrow().current_time
    }

    fn set_current_time(&mut self, secs: f64) {
        self.0.borrow_mut().current_time = secs;
    }

    fn seek_with_ticket(&mut self, secs: f64, ticket: SeekTicket) {
        let mut state = self.0.borrow_mut();
        state.current_time = secs;
        state.ticketed_seeks.push((secs, ticket));
    }

    fn duration(&self) -> Option<f64> {
        self.0.borrow().duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.0.borrow_mut().muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.0.borrow_mut().rate = rate;
    }

    fn set_loop(&mut self, enabled: bool) {
        self.0.borrow_mut().looping = enabled;
    }

    fn is_paused(&self) -> bool {
        self.0.borrow().paused
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.play_calls += 1;
        if state.reject_play {
            return Err(Error::playback("NotAllowedError: autoplay blocked"));
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().paused = true;
    }

    fn buffered(&self) -> Vec<TimeRange> {
        self.0.borrow().buffered.clone()
    }

    fn capture_frame(&self) -> Option<RgbaImage> {
        let secs = self.0.borrow().current_time;
        let shade = secs.round().clamp(0.0, 255.0) as u8;
        Some(RgbaImage::from_pixel(32, 18, Rgba([shade, 0, 0, 255])))
    }
}

/// What a [`FakeFactory`] observed.
#[derive(Debug, Default)]
pub struct FactoryLog {
    pub created: Vec<(PipelineRole, AttachId)>,
    pub loaded: Vec<(PipelineRole, String)>,
    pub destroyed: Vec<(PipelineRole, AttachId)>,
}

impl FactoryLog {
    pub fn loaded_urls(&self, role: PipelineRole) -> Vec<&str> {
        self.loaded
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, url)| url.as_str())
            .collect()
    }

    pub fn destroyed_count(&self, role: PipelineRole) -> usize {
        self.destroyed.iter().filter(|(r, _)| *r == role).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeFactory {
    pub log: Rc<RefCell<FactoryLog>>,
}

struct FakeClient {
    role: PipelineRole,
    attach: AttachId,
    log: Rc<RefCell<FactoryLog>>,
}

impl StreamingClient for FakeClient {
    fn load_source(&mut self, url: &str) -> Result<()> {
        self.log.borrow_mut().loaded.push((self.role, url.to_string()));
        Ok(())
    }

    fn attach_media(&mut self, _: &mut dyn MediaElement) -> Result<()> {
        Ok(())
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().destroyed.push((self.role, self.attach));
    }
}

impl StreamingClientFactory for FakeFactory {
    fn create(&self, role: PipelineRole, attach: AttachId) -> Box<dyn StreamingClient> {
        self.log.borrow_mut().created.push((role, attach));
        Box::new(FakeClient {
            role,
            attach,
            log: Rc::clone(&self.log),
        })
    }
}
