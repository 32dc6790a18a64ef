// SPDX-License-Identifier: MPL-2.0
//! Player root state and orchestration.
//!
//! [`Player`] wires the media session, the scrub preview, captions, menus,
//! the shell and toasts behind a single `update(Message) -> Task` entrypoint.
//! Network work is returned as [`Task`]s; hosts run them with
//! [`runtime::perform`] and feed the resulting messages back.
//!
//! Every async request carries a [`RequestId`]. Only the latest request of
//! each kind is accepted, and unmounting forgets all of them, so late results
//! never reach a detached player.

mod message;
pub mod paths;
pub mod runtime;
mod session;

pub use message::{Message, RequestId, Task};
pub use session::PlaybackSession;

use crate::application::port::{
    FullscreenHost, MediaElement, PipelineRole, StreamingClientFactory,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::stream::{Resolution, VideoId};
use crate::ui::menu::ActiveMenu;
use crate::ui::notifications::{self, Notification};
use crate::ui::shell::Shell;
use crate::ui::shortcuts::{self, ShortcutAction};
use crate::ui::view_state::{MenuEntry, PreviewView, ViewState};
use crate::video_player::time_units::format_time;
use crate::video_player::{
    CaptionLibrary, CaptionSelection, Captions, MediaSession, PlaybackSpeed, PreviewEngine,
    SeekStep, SessionSettings, Volume,
};
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// Host-provided implementations of the player's ports.
pub struct PlayerPorts {
    /// Visible, audible element.
    pub primary: Box<dyn MediaElement>,
    /// Hidden element used for scrub previews.
    pub preview: Box<dyn MediaElement>,
    pub factory: Rc<dyn StreamingClientFactory>,
    pub fullscreen: Box<dyn FullscreenHost>,
}

#[derive(Debug, Clone)]
struct PendingResolve {
    request: RequestId,
    resume_at: f64,
    /// Quality to commit once its stream is attached.
    quality: String,
}

/// Root player state.
pub struct Player {
    default_quality: String,
    seek_step: SeekStep,
    media: MediaSession,
    preview: PreviewEngine,
    playback: Option<PlaybackSession>,
    captions: Captions,
    menu: ActiveMenu,
    shell: Shell,
    fullscreen_host: Box<dyn FullscreenHost>,
    notifications: notifications::Manager,
    next_request: u64,
    pending_resolve: Option<PendingResolve>,
    pending_refresh: Option<RequestId>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("media", &self.media)
            .field("preview", &self.preview)
            .field("playback", &self.playback)
            .field("menu", &self.menu)
            .field("shell", &self.shell)
            .field("pending_resolve", &self.pending_resolve)
            .field("pending_refresh", &self.pending_refresh)
            .finish_non_exhaustive()
    }
}

impl Player {
    pub fn new(ports: PlayerPorts, config: &Config) -> Self {
        let settings = SessionSettings {
            volume: config.player.volume(),
            muted: config.player.muted.unwrap_or(false),
            playback_speed: config.player.playback_speed(),
            loop_enabled: config.player.loop_enabled.unwrap_or(false),
        };

        Self {
            default_quality: config.player.default_quality.clone(),
            seek_step: config.player.seek_step(),
            media: MediaSession::new(ports.primary, Rc::clone(&ports.factory), settings),
            preview: PreviewEngine::new(ports.preview, ports.factory, config.preview.size()),
            playback: None,
            captions: Captions::new(CaptionLibrary::sample()),
            menu: ActiveMenu::default(),
            shell: Shell::new(),
            fullscreen_host: ports.fullscreen,
            notifications: notifications::Manager::new(config.notifications.toast_duration()),
            next_request: 0,
            pending_resolve: None,
            pending_refresh: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task {
        match message {
            Message::Mount { video_id, token } => return self.mount(video_id, token),
            Message::Unmount => self.unmount(),
            Message::Resolved { request, result } => self.on_resolved(request, result),
            Message::RefreshToken => return self.request_refresh(),
            Message::TokenRefreshed { request, result } => {
                return self.on_token_refreshed(request, result);
            }

            Message::Pipeline(event) => match event.role {
                PipelineRole::Primary => {
                    let result = self.media.handle_pipeline_event(&event);
                    self.report(result);
                }
                PipelineRole::Preview => self.preview.handle_pipeline_event(&event),
            },
            Message::PrimaryMedia(event) => {
                let result = self.media.handle_media_event(&event);
                self.report(result);
            }
            Message::PreviewMedia(event) => self.preview.handle_media_event(&event),

            Message::TogglePlay => self.media.toggle_play(),
            Message::SkipBackward => self.media.seek_relative(-self.seek_step.value()),
            Message::SkipForward => self.media.seek_relative(self.seek_step.value()),
            Message::SeekToFraction(fraction) => self.media.seek_fraction(fraction),
            Message::SetVolume(volume) => self.media.set_volume(Volume::new(volume)),
            Message::ToggleMute => self.media.toggle_mute(),
            Message::ToggleLoop => self.media.set_loop(!self.media.is_loop_enabled()),
            Message::SelectSpeed(speed) => {
                self.media.set_playback_speed(speed);
                self.menu.close();
            }
            Message::SelectQuality(quality) => {
                self.menu.close();
                return self.change_quality(&quality);
            }
            Message::SelectCaptions(selection) => {
                self.captions.select(&selection);
                self.menu.close();
            }

            Message::ToggleMenu(menu) => self.menu.toggle(menu),
            Message::OpenMenu(menu) => self.menu.open(menu),
            Message::KeyPressed(press) => {
                if let Some(action) = shortcuts::action_for(press) {
                    self.apply_shortcut(action);
                }
            }

            Message::PointerEnteredPlayer => self.shell.pointer_enter(),
            Message::PointerLeftPlayer => {
                self.shell.pointer_leave();
                self.menu.close();
                self.preview.pointer_leave();
            }
            Message::TrackHovered(fraction) => {
                self.preview.pointer_enter();
                self.preview.update_preview(fraction, self.media.duration());
            }
            Message::TrackLeft => self.preview.pointer_leave(),

            Message::ToggleFullscreen => {
                self.shell.toggle_fullscreen(self.fullscreen_host.as_mut());
            }
            Message::FullscreenChanged => {
                self.shell.fullscreen_changed(self.fullscreen_host.as_ref());
            }

            Message::Tick(now) => self.notifications.tick(now),
            Message::DismissToast => self.notifications.dismiss(),
        }
        Task::none()
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    fn mount(&mut self, video_id: VideoId, token: String) -> Task {
        if self.playback.is_some() {
            self.unmount();
        }
        tracing::info!(%video_id, "mounting player");
        self.playback = Some(PlaybackSession::new(
            video_id,
            token,
            self.default_quality.clone(),
        ));
        self.resolve(0.0, self.default_quality.clone())
    }

    fn unmount(&mut self) {
        if self.playback.take().is_some() {
            tracing::info!("unmounting player");
        }
        self.pending_resolve = None;
        self.pending_refresh = None;
        self.media.release();
        self.preview.release();
        self.menu.close();
    }

    fn next_request(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    /// Requests variants for `quality`, superseding any pending resolve.
    fn resolve(&mut self, resume_at: f64, quality: String) -> Task {
        let Some(playback) = self.playback.as_ref() else {
            return Task::none();
        };
        let video_id = playback.video_id().clone();
        let token = playback.token().to_string();

        let request = self.next_request();
        self.pending_resolve = Some(PendingResolve {
            request,
            resume_at,
            quality,
        });
        Task::Resolve {
            request,
            video_id,
            token,
        }
    }

    fn on_resolved(&mut self, request: RequestId, result: Result<Resolution>) {
        if self.pending_resolve.as_ref().map(|p| p.request) != Some(request) {
            tracing::debug!(request = request.0, "discarding stale resolve result");
            return;
        }
        let Some(pending) = self.pending_resolve.take() else {
            return;
        };
        let resolution = match result {
            Ok(resolution) => resolution,
            Err(err) => {
                self.notify_error(&err);
                return;
            }
        };
        let Some(playback) = self.playback.as_mut() else {
            return;
        };

        playback.apply_resolution(resolution);
        let target = playback.choose_quality(&pending.quality).and_then(|quality| {
            let url = playback.url_for(&quality)?.to_string();
            Some((quality, url))
        });
        let Some((quality, url)) = target else {
            self.notify_error(&Error::network("no stream variants"));
            return;
        };

        if quality != pending.quality {
            self.notify(
                Notification::info("notification-quality-unavailable")
                    .with_arg("quality", pending.quality.as_str()),
            );
        }
        if self.attach(&url, pending.resume_at) {
            if let Some(playback) = self.playback.as_mut() {
                playback.commit_quality(&quality);
            }
        }
    }

    /// Points both pipelines at `url`. Returns whether the primary attached.
    fn attach(&mut self, url: &str, resume_at: f64) -> bool {
        match self.media.attach_source(url, resume_at) {
            Ok(_) => {
                // Preview failures only cost the thumbnail; load_source logs them.
                if self.preview.load_source(url).is_err() {
                    self.preview.release();
                }
                true
            }
            Err(err) => {
                self.preview.release();
                self.notify_error(&err);
                false
            }
        }
    }

    /// Quality the player is heading to: the pending request's, else the playing one.
    fn target_quality(&self) -> Option<&str> {
        match &self.pending_resolve {
            Some(pending) => Some(pending.quality.as_str()),
            None => self.playback.as_ref().map(PlaybackSession::selected_quality),
        }
    }

    fn change_quality(&mut self, quality: &str) -> Task {
        let Some(playback) = self.playback.as_ref() else {
            return Task::none();
        };
        if !playback.offers(quality) || self.target_quality() == Some(quality) {
            return Task::none();
        }
        if playback.selected_quality() == quality {
            tracing::debug!(quality, "quality switch cancelled");
            self.pending_resolve = None;
            return Task::none();
        }

        let resume_at = self.media.resume_position();
        tracing::info!(quality, resume_at, "switching quality");
        self.resolve(resume_at, quality.to_string())
    }

    fn request_refresh(&mut self) -> Task {
        if self.pending_refresh.is_some() {
            tracing::debug!("token refresh already in flight");
            return Task::none();
        }
        let Some(playback) = self.playback.as_ref() else {
            return Task::none();
        };
        let video_id = playback.video_id().clone();
        let token = playback.token().to_string();

        let request = self.next_request();
        self.pending_refresh = Some(request);
        Task::RefreshToken {
            request,
            video_id,
            token,
        }
    }

    fn on_token_refreshed(&mut self, request: RequestId, result: Result<String>) -> Task {
        if self.pending_refresh != Some(request) {
            tracing::debug!(request = request.0, "discarding stale token refresh");
            return Task::none();
        }
        self.pending_refresh = None;
        let Some(playback) = self.playback.as_mut() else {
            return Task::none();
        };

        match result {
            Ok(token) => {
                playback.replace_token(token);
                self.notify(Notification::success("notification-token-refreshed"));
                let quality = self.target_quality().unwrap_or_default().to_string();
                let resume_at = self.media.resume_position();
                self.resolve(resume_at, quality)
            }
            Err(Error::Unauthorized) => {
                self.notify(Notification::error("notification-token-refresh-failed"));
                Task::none()
            }
            Err(_) => {
                self.notify(Notification::error("notification-token-refresh-error"));
                Task::none()
            }
        }
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    fn apply_shortcut(&mut self, action: ShortcutAction) {
        let step = self.seek_step.value();
        match action {
            ShortcutAction::TogglePlay => self.media.toggle_play(),
            ShortcutAction::SeekBackward => self.media.seek_relative(-step),
            ShortcutAction::SeekForward => self.media.seek_relative(step),
            ShortcutAction::VolumeUp => {
                let volume = self.media.effective_volume().increase();
                self.media.set_volume(volume);
            }
            ShortcutAction::VolumeDown => {
                let volume = self.media.effective_volume().decrease();
                self.media.set_volume(volume);
            }
            ShortcutAction::ToggleFullscreen => {
                self.shell.toggle_fullscreen(self.fullscreen_host.as_mut());
            }
            ShortcutAction::ToggleMute => self.media.toggle_mute(),
            ShortcutAction::ToggleCaptionsMenu => self.menu.toggle(ActiveMenu::Captions),
            ShortcutAction::ToggleSettingsMenu => self.menu.toggle(ActiveMenu::Settings),
        }
    }

    // ---------------------------------------------------------------------
    // Notifications
    // ---------------------------------------------------------------------

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification, Instant::now());
    }

    fn notify_error(&mut self, err: &Error) {
        tracing::warn!(error = %err, "player error");
        self.notify(Notification::from_error(err));
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.notify_error(&err);
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.playback.is_some()
    }

    #[must_use]
    pub fn media(&self) -> &MediaSession {
        &self.media
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewEngine {
        &self.preview
    }

    #[must_use]
    pub fn playback(&self) -> Option<&PlaybackSession> {
        self.playback.as_ref()
    }

    #[must_use]
    pub fn captions(&self) -> &Captions {
        &self.captions
    }

    #[must_use]
    pub fn active_menu(&self) -> ActiveMenu {
        self.menu
    }

    #[must_use]
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    #[must_use]
    pub fn toast(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    /// Builds the render snapshot.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        let clock = self.media.clock();
        let current_time = clock.current_time();
        let duration = clock.duration();
        let speed = self.media.playback_speed();

        let speed_options = PlaybackSpeed::presets()
            .map(|preset| MenuEntry {
                value: preset,
                label: preset.to_string(),
                active: preset.matches(speed),
            })
            .collect();

        let quality_options = self
            .playback
            .as_ref()
            .map(|p| {
                p.available_qualities()
                    .into_iter()
                    .map(|q| MenuEntry {
                        value: q.to_string(),
                        label: q.to_string(),
                        active: q == p.selected_quality(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let selection = self.captions.selection();
        let caption_options = std::iter::once(MenuEntry {
            value: CaptionSelection::Off,
            label: "menu-captions-off".to_string(),
            active: selection == CaptionSelection::Off,
        })
        .chain(self.captions.library().tracks().map(|track| {
            let value = CaptionSelection::Language(track.language().to_string());
            MenuEntry {
                active: selection == value,
                value,
                label: track.label().to_string(),
            }
        }))
        .collect();

        let preview = self.preview.is_visible().then(|| PreviewView {
            fraction: self.preview.pointer_fraction(),
            time_label: format_time(self.preview.hovered_time()),
            frame: self.preview.frame().cloned(),
        });

        ViewState {
            playback: clock.state(),
            is_playing: clock.is_playing(),
            is_buffering: clock.is_buffering(),
            current_time,
            duration,
            time_label: format!(
                "{} / {}",
                format_time(current_time),
                format_time(duration.unwrap_or(0.0))
            ),
            played_fraction: clock.played_fraction(),
            buffered_fraction: clock.buffered_fraction(),
            volume_slider: self.media.effective_volume().value(),
            show_muted_icon: self.media.is_muted() || self.media.volume().is_muted(),
            loop_enabled: self.media.is_loop_enabled(),
            playback_speed: speed,
            active_menu: self.menu,
            speed_options,
            quality_options,
            caption_options,
            caption_text: self.captions.text_at(current_time).map(str::to_string),
            controls_visible: self.shell.controls_visible(),
            fullscreen: self.shell.is_fullscreen(),
            preview,
            toast: self.notifications.current().cloned(),
        }
    }
}
