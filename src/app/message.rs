// SPDX-License-Identifier: MPL-2.0
//! Messages consumed by `Player::update` and the tasks it asks the runtime to run.

use crate::application::port::{MediaEvent, PipelineEvent};
use crate::error::Error;
use crate::stream::{Resolution, VideoId};
use crate::ui::menu::ActiveMenu;
use crate::ui::shortcuts::KeyPress;
use crate::video_player::{CaptionSelection, PlaybackSpeed};
use std::time::Instant;

/// Tags an async request so late or superseded results can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Top-level messages. Hosts translate their events into these.
#[derive(Debug, Clone)]
pub enum Message {
    /// The player was mounted for a video.
    Mount { video_id: VideoId, token: String },
    /// The player was unmounted; everything is released.
    Unmount,
    /// Result of a [`Task::Resolve`].
    Resolved {
        request: RequestId,
        result: Result<Resolution, Error>,
    },
    /// Ask the backend for a fresh token.
    RefreshToken,
    /// Result of a [`Task::RefreshToken`].
    TokenRefreshed {
        request: RequestId,
        result: Result<String, Error>,
    },

    /// Streaming library signal for either pipeline.
    Pipeline(PipelineEvent),
    /// Native event from the primary element.
    PrimaryMedia(MediaEvent),
    /// Native event from the hidden preview element.
    PreviewMedia(MediaEvent),

    TogglePlay,
    SkipBackward,
    SkipForward,
    /// Click on the progress track at a fraction of its width.
    SeekToFraction(f64),
    SetVolume(f32),
    ToggleMute,
    ToggleLoop,
    SelectSpeed(PlaybackSpeed),
    SelectQuality(String),
    SelectCaptions(CaptionSelection),

    ToggleMenu(ActiveMenu),
    OpenMenu(ActiveMenu),
    KeyPressed(KeyPress),

    PointerEnteredPlayer,
    PointerLeftPlayer,
    /// Pointer moved over the progress track at a fraction of its width.
    TrackHovered(f64),
    TrackLeft,

    ToggleFullscreen,
    /// The document's fullscreen element changed.
    FullscreenChanged,

    /// Periodic tick for toast auto-dismiss.
    Tick(Instant),
    /// The user closed the visible toast.
    DismissToast,
}

/// Side effects requested by `Player::update`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Task {
    #[default]
    None,
    Resolve {
        request: RequestId,
        video_id: VideoId,
        token: String,
    },
    RefreshToken {
        request: RequestId,
        video_id: VideoId,
        token: String,
    },
    Batch(Vec<Task>),
}

impl Task {
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Combines tasks, dropping empty ones.
    pub fn batch(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut tasks: Vec<Task> = tasks.into_iter().filter(|t| !t.is_none()).collect();
        match tasks.len() {
            0 => Self::None,
            1 => tasks.swap_remove(0),
            _ => Self::Batch(tasks),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flattens nested batches into leaf tasks.
    #[must_use]
    pub fn into_leaves(self) -> Vec<Task> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(tasks) => tasks.into_iter().flat_map(Task::into_leaves).collect(),
            leaf => vec![leaf],
        }
    }
}
