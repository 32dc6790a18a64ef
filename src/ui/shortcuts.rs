// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcut dispatch.
//!
//! | Key                 | Action                 |
//! |---------------------|------------------------|
//! | `k`, `Space`        | toggle play/pause      |
//! | `j`, `ArrowLeft`    | seek back one step     |
//! | `l`, `ArrowRight`   | seek forward one step  |
//! | `ArrowUp`           | volume up              |
//! | `ArrowDown`         | volume down            |
//! | `f`                 | toggle fullscreen      |
//! | `m`                 | toggle mute            |
//! | `c`                 | toggle captions menu   |
//! | `s`                 | toggle settings menu   |
//!
//! Letters match either case. Presses with ctrl, alt or meta held are left to
//! the host. A recognized shortcut should suppress the host's default handling.

/// Non-character keys the player reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKey {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Named(NamedKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Whether a command modifier (ctrl, alt, meta) is held.
    #[must_use]
    pub fn has_command(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// A key press delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    #[must_use]
    pub fn character(c: char) -> Self {
        Self {
            key: Key::Character(c),
            modifiers: Modifiers::default(),
        }
    }

    #[must_use]
    pub fn named(key: NamedKey) -> Self {
        Self {
            key: Key::Named(key),
            modifiers: Modifiers::default(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    TogglePlay,
    SeekBackward,
    SeekForward,
    VolumeUp,
    VolumeDown,
    ToggleFullscreen,
    ToggleMute,
    ToggleCaptionsMenu,
    ToggleSettingsMenu,
}

/// Maps a key press to its action, or `None` if the player ignores it.
#[must_use]
pub fn action_for(press: KeyPress) -> Option<ShortcutAction> {
    if press.modifiers.has_command() {
        return None;
    }

    match press.key {
        Key::Named(NamedKey::Space) => Some(ShortcutAction::TogglePlay),
        Key::Named(NamedKey::ArrowLeft) => Some(ShortcutAction::SeekBackward),
        Key::Named(NamedKey::ArrowRight) => Some(ShortcutAction::SeekForward),
        Key::Named(NamedKey::ArrowUp) => Some(ShortcutAction::VolumeUp),
        Key::Named(NamedKey::ArrowDown) => Some(ShortcutAction::VolumeDown),
        Key::Named(_) => None,
        Key::Character(c) => match c.to_ascii_lowercase() {
            'k' | ' ' => Some(ShortcutAction::TogglePlay),
            'j' => Some(ShortcutAction::SeekBackward),
            'l' => Some(ShortcutAction::SeekForward),
            'f' => Some(ShortcutAction::ToggleFullscreen),
            'm' => Some(ShortcutAction::ToggleMute),
            'c' => Some(ShortcutAction::ToggleCaptionsMenu),
            's' => Some(ShortcutAction::ToggleSettingsMenu),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_shortcuts() {
        let cases = [
            ('k', ShortcutAction::TogglePlay),
            ('j', ShortcutAction::SeekBackward),
            ('l', ShortcutAction::SeekForward),
            ('f', ShortcutAction::ToggleFullscreen),
            ('m', ShortcutAction::ToggleMute),
            ('c', ShortcutAction::ToggleCaptionsMenu),
            ('s', ShortcutAction::ToggleSettingsMenu),
        ];
        for (c, action) in cases {
            assert_eq!(action_for(KeyPress::character(c)), Some(action), "key {c}");
        }
    }

    #[test]
    fn named_shortcuts() {
        assert_eq!(
            action_for(KeyPress::named(NamedKey::Space)),
            Some(ShortcutAction::TogglePlay)
        );
        assert_eq!(
            action_for(KeyPress::named(NamedKey::ArrowLeft)),
            Some(ShortcutAction::SeekBackward)
        );
        assert_eq!(
            action_for(KeyPress::named(NamedKey::ArrowRight)),
            Some(ShortcutAction::SeekForward)
        );
        assert_eq!(
            action_for(KeyPress::named(NamedKey::ArrowUp)),
            Some(ShortcutAction::VolumeUp)
        );
        assert_eq!(
            action_for(KeyPress::named(NamedKey::ArrowDown)),
            Some(ShortcutAction::VolumeDown)
        );
        assert_eq!(action_for(KeyPress::named(NamedKey::Escape)), None);
    }

    #[test]
    fn uppercase_letters_match() {
        let press = KeyPress::character('M').with_modifiers(Modifiers {
            shift: true,
            ..Modifiers::default()
        });
        assert_eq!(action_for(press), Some(ShortcutAction::ToggleMute));
    }

    #[test]
    fn command_modifiers_are_left_to_host() {
        let press = KeyPress::character('f').with_modifiers(Modifiers {
            ctrl: true,
            ..Modifiers::default()
        });
        assert_eq!(action_for(press), None);
    }

    #[test]
    fn unbound_letters_are_ignored() {
        assert_eq!(action_for(KeyPress::character('x')), None);
    }
}
