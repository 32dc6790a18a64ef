// SPDX-License-Identifier: MPL-2.0
//! Presentation-side state: menus, shortcuts, the shell, toasts and the
//! render snapshot.

pub mod menu;
pub mod notifications;
pub mod shell;
pub mod shortcuts;
pub mod view_state;
