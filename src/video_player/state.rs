// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for the primary element.
//!
//! The state is driven only by [`PlaybackSignal`]s, which are either native
//! element events or outcomes of commands issued to the element:
//!
//! | From \ Signal | Attach  | Play    | Pause  | Waiting   | CanPlay¹  | Seeked¹ | Ended | Rejected/Failed | Release |
//! |---------------|---------|---------|--------|-----------|-----------|---------|-------|-----------------|---------|
//! | Idle          | Loading | –       | –      | –         | –         | –       | –     | –               | Idle    |
//! | Loading       | Loading | Playing | Paused | Buffering | P/P       | –       | Ended | Paused          | Idle    |
//! | Playing       | Loading | –       | Paused | Buffering | –         | –       | Ended | Paused          | Idle    |
//! | Paused        | Loading | Playing | –      | –         | –         | –       | Ended | Paused          | Idle    |
//! | Buffering     | Loading | –       | Paused | –         | P/P       | –       | Ended | Paused          | Idle    |
//! | Ended         | Loading | Playing | –      | –         | –         | P/P     | –     | Paused          | Idle    |
//!
//! ¹ `P/P` resolves to `Paused` or `Playing` from the element's paused flag.

/// Observable playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No source attached.
    #[default]
    Idle,
    /// A source is attached and the manifest is loading.
    Loading,
    Playing,
    Paused,
    /// Playback is wanted but stalled on data.
    Buffering,
    Ended,
}

/// Inputs to [`PlaybackState::on_signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSignal {
    /// A new pipeline was attached.
    Attach,
    Play,
    Pause,
    Waiting,
    CanPlay,
    Seeked,
    Ended,
    /// The runtime refused a play request.
    PlayRejected,
    /// The pipeline or element failed.
    Failed,
    /// The pipeline was released.
    Release,
}

impl PlaybackState {
    /// Applies `signal`. `element_paused` is the element's paused flag at the
    /// time the signal is observed.
    #[must_use]
    pub fn on_signal(self, signal: PlaybackSignal, element_paused: bool) -> Self {
        use PlaybackSignal as S;
        use PlaybackState as P;

        let resolved = if element_paused { P::Paused } else { P::Playing };

        match (self, signal) {
            (_, S::Release) => P::Idle,
            (_, S::Attach) => P::Loading,
            (P::Idle, _) => P::Idle,
            (_, S::PlayRejected | S::Failed) => P::Paused,
            (_, S::Ended) => P::Ended,
            (P::Loading | P::Paused | P::Ended, S::Play) => P::Playing,
            (P::Loading | P::Playing | P::Buffering, S::Pause) => P::Paused,
            (P::Loading | P::Playing, S::Waiting) => P::Buffering,
            (P::Loading | P::Buffering, S::CanPlay) => resolved,
            (P::Ended, S::Seeked) => resolved,
            (state, _) => state,
        }
    }

    /// Whether playback is running or wants to run.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing | Self::Buffering)
    }

    #[must_use]
    pub fn is_buffering(self) -> bool {
        self == Self::Buffering
    }

    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlaybackSignal as S;
    use PlaybackState as P;

    const ALL_STATES: [PlaybackState; 6] = [
        P::Idle,
        P::Loading,
        P::Playing,
        P::Paused,
        P::Buffering,
        P::Ended,
    ];

    #[test]
    fn idle_ignores_media_signals() {
        for signal in [S::Play, S::Pause, S::Waiting, S::CanPlay, S::Ended, S::Failed] {
            assert_eq!(P::Idle.on_signal(signal, false), P::Idle);
        }
    }

    #[test]
    fn attach_and_release_apply_from_every_state() {
        for state in ALL_STATES {
            assert_eq!(state.on_signal(S::Attach, true), P::Loading);
            assert_eq!(state.on_signal(S::Release, true), P::Idle);
        }
    }

    #[test]
    fn first_play_after_load() {
        let state = P::Idle
            .on_signal(S::Attach, true)
            .on_signal(S::Play, false);
        assert_eq!(state, P::Playing);
    }

    #[test]
    fn stall_and_resume_round_trip() {
        let buffering = P::Playing.on_signal(S::Waiting, false);
        assert!(buffering.is_buffering());
        assert!(buffering.is_playing());
        assert_eq!(buffering.on_signal(S::CanPlay, false), P::Playing);
    }

    #[test]
    fn can_play_while_paused_element_resolves_to_paused() {
        assert_eq!(P::Loading.on_signal(S::CanPlay, true), P::Paused);
        assert_eq!(P::Buffering.on_signal(S::CanPlay, true), P::Paused);
    }

    #[test]
    fn waiting_while_paused_is_ignored() {
        assert_eq!(P::Paused.on_signal(S::Waiting, true), P::Paused);
    }

    #[test]
    fn play_rejection_leaves_player_paused() {
        assert_eq!(P::Loading.on_signal(S::PlayRejected, true), P::Paused);
    }

    #[test]
    fn ended_then_seek_resumes_from_element_flag() {
        let ended = P::Playing.on_signal(S::Ended, true);
        assert_eq!(ended, P::Ended);
        assert!(!ended.is_playing());
        assert_eq!(ended.on_signal(S::Seeked, true), P::Paused);
        assert_eq!(ended.on_signal(S::Play, false), P::Playing);
    }

    #[test]
    fn redundant_signals_are_idempotent() {
        assert_eq!(P::Playing.on_signal(S::Play, false), P::Playing);
        assert_eq!(P::Paused.on_signal(S::Pause, true), P::Paused);
    }
}
