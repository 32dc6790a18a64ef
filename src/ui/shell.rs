// SPDX-License-Identifier: MPL-2.0
//! Presentation shell: control visibility and the fullscreen mirror.

use crate::application::port::FullscreenHost;

/// Shell state shared with the renderer.
///
/// `fullscreen` is never set from a request. It changes only when the host
/// reports a fullscreen change, since the runtime may deny or delay requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shell {
    controls_visible: bool,
    fullscreen: bool,
}

impl Shell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_enter(&mut self) {
        self.controls_visible = true;
    }

    /// Hides the controls. Callers close menus alongside.
    pub fn pointer_leave(&mut self) {
        self.controls_visible = false;
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Asks `host` to enter or leave fullscreen based on the host's own state.
    pub fn toggle_fullscreen(&mut self, host: &mut dyn FullscreenHost) {
        let result = if host.is_fullscreen() {
            host.exit_fullscreen()
        } else {
            host.request_fullscreen()
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, "fullscreen request denied");
        }
    }

    /// Mirrors the host after a fullscreen change event.
    pub fn fullscreen_changed(&mut self, host: &dyn FullscreenHost) {
        self.fullscreen = host.is_fullscreen();
    }
}
