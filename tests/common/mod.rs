// SPDX-License-Identifier: MPL-2.0
//! Backend and fullscreen fakes for the integration tests; media fakes
//! come from `stream_player::test_utils`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;

use async_trait::async_trait;
use stream_player::app::{Player, PlayerPorts};
use stream_player::application::port::{FullscreenHost, StreamApi};
use stream_player::config::Config;
use stream_player::error::{Error, Result};
use stream_player::stream::{StreamVariants, VideoId};
pub use stream_player::test_utils::{FakeElement, FakeFactory};

/// Fullscreen host that grants requests; the test fires the change event.
#[derive(Debug, Clone, Default)]
pub struct FakeFullscreen {
    pub active: Rc<RefCell<bool>>,
    pub deny: Rc<RefCell<bool>>,
}

impl FullscreenHost for FakeFullscreen {
    fn is_fullscreen(&self) -> bool {
        *self.active.borrow()
    }

    fn request_fullscreen(&mut self) -> Result<()> {
        if *self.deny.borrow() {
            return Err(Error::playback("fullscreen denied"));
        }
        *self.active.borrow_mut() = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        *self.active.borrow_mut() = false;
        Ok(())
    }
}

/// Backend with canned variants and tokens.
#[derive(Debug, Default)]
pub struct FakeStreamApi {
    pub variants: Vec<(String, String)>,
    pub valid_token: String,
    pub fresh_token: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeStreamApi {
    pub fn new(variants: &[(&str, &str)], valid_token: &str) -> Self {
        Self {
            variants: variants
                .iter()
                .map(|(q, u)| ((*q).to_string(), (*u).to_string()))
                .collect(),
            valid_token: valid_token.to_string(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl StreamApi for FakeStreamApi {
    async fn fetch_variants(&self, video_id: &VideoId, token: &str) -> Result<StreamVariants> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("variants:{video_id}:{token}"));
        }
        if token != self.valid_token {
            return Err(Error::Unauthorized);
        }
        Ok(StreamVariants::from_pairs(self.variants.clone()))
    }

    async fn refresh_token(&self, video_id: &VideoId, token: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("refresh:{video_id}:{token}"));
        }
        self.fresh_token.clone().ok_or(Error::Unauthorized)
    }
}

pub struct Rig {
    pub player: Player,
    pub primary: FakeElement,
    pub preview: FakeElement,
    pub factory: FakeFactory,
    pub fullscreen: FakeFullscreen,
}

pub fn rig(duration: f64) -> Rig {
    let primary = FakeElement::with_duration(duration);
    let preview = FakeElement::with_duration(duration);
    let factory = FakeFactory::default();
    let fullscreen = FakeFullscreen::default();
    let player = Player::new(
        PlayerPorts {
            primary: Box::new(primary.clone()),
            preview: Box::new(preview.clone()),
            factory: Rc::new(factory.clone()),
            fullscreen: Box::new(fullscreen.clone()),
        },
        &Config::default(),
    );
    Rig {
        player,
        primary,
        preview,
        factory,
        fullscreen,
    }
}
