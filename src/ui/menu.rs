// SPDX-License-Identifier: MPL-2.0
//! Overlay menus. At most one is open at any time.

/// The open overlay menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveMenu {
    #[default]
    None,
    Captions,
    Settings,
    Quality,
    Speed,
}

impl ActiveMenu {
    /// Opens `menu`, closing whichever other menu was open.
    pub fn open(&mut self, menu: ActiveMenu) {
        *self = menu;
    }

    /// Closes `menu` if open, otherwise opens it in place of the current one.
    pub fn toggle(&mut self, menu: ActiveMenu) {
        *self = if *self == menu { Self::None } else { menu };
    }

    pub fn close(&mut self) {
        *self = Self::None;
    }
}
