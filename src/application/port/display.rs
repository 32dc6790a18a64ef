// SPDX-License-Identifier: MPL-2.0
//! Document fullscreen port.

use crate::error::Result;

/// Port for the document fullscreen API.
///
/// The document's fullscreen element is the source of truth. Requests may be
/// denied or complete later; hosts report the outcome by forwarding the
/// document's change event to the player.
pub trait FullscreenHost {
    /// Returns whether the player container currently is the fullscreen element.
    fn is_fullscreen(&self) -> bool;

    /// Asks the runtime to make the player container fullscreen.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected synchronously.
    fn request_fullscreen(&mut self) -> Result<()>;

    /// Asks the runtime to leave fullscreen.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected synchronously.
    fn exit_fullscreen(&mut self) -> Result<()>;
}
