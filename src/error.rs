// SPDX-License-Identifier: MPL-2.0
//! Error taxonomy for the player core.
//!
//! Every failure the player can observe is one of these variants. None of them
//! is fatal: the player converts each into a transient notification through
//! [`Error::i18n_key`] and degrades to a visible state (paused, captions off,
//! no preview).

/// Player error.
///
/// The type is `Clone` so results can travel inside [`crate::app::Message`]
/// values between the async runtime and the single-threaded update loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The backend rejected the bearer token (expired or invalid).
    #[error("Unauthorized")]
    Unauthorized,

    /// Resolver fetch failed or returned malformed data.
    #[error("Network error: {0}")]
    Network(String),

    /// Autoplay rejected or pipeline attach failed.
    #[error("Playback error: {0}")]
    Playback(String),

    /// Format or codec rejected by the runtime.
    #[error("Unsupported media: {0}")]
    MediaUnsupported(String),

    /// Settings file could not be parsed or written.
    #[error("Config Error: {0}")]
    Config(String),

    /// Local I/O failure.
    #[error("I/O Error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a network error from any message.
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Creates a playback error from any message.
    pub fn playback<S: Into<String>>(msg: S) -> Self {
        Self::Playback(msg.into())
    }

    /// Returns the i18n message key shown to the user for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Unauthorized => "notification-session-expired",
            Error::Network(_) => "notification-load-error",
            Error::Playback(_) => "notification-playback-error",
            Error::MediaUnsupported(_) => "notification-media-unsupported",
            Error::Config(_) => "notification-config-load-error",
            Error::Io(_) => "notification-io-error",
        }
    }

    /// Returns true when the failure calls for the session-expired recovery path.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }

    /// Classifies a raw pipeline or media-element error message.
    ///
    /// Codec and format rejections become [`Error::MediaUnsupported`];
    /// anything else is a [`Error::Playback`] failure.
    pub fn from_media_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("codec")
            || msg_lower.contains("not supported")
            || msg_lower.contains("unsupported")
            || msg_lower.contains("mime")
            || msg_lower.contains("incompatible")
        {
            return Error::MediaUnsupported(msg.to_string());
        }

        Error::Playback(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Network(format!("malformed response: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_network_error() {
        let err = Error::network("connection refused");
        assert_eq!(format!("{}", err), "Network error: connection refused");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn unauthorized_has_its_own_recovery_key() {
        assert_eq!(
            Error::Unauthorized.i18n_key(),
            "notification-session-expired"
        );
        assert_ne!(
            Error::Unauthorized.i18n_key(),
            Error::network("x").i18n_key()
        );
        assert!(Error::Unauthorized.is_unauthorized());
        assert!(!Error::network("x").is_unauthorized());
    }

    #[test]
    fn malformed_json_is_a_network_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Network(msg) if msg.contains("malformed")));
    }

    #[test]
    fn from_media_message_detects_unsupported_codec() {
        let err = Error::from_media_message("MEDIA_ERR_SRC_NOT_SUPPORTED: codec hevc");
        assert!(matches!(err, Error::MediaUnsupported(_)));
    }

    #[test]
    fn from_media_message_defaults_to_playback() {
        let err = Error::from_media_message("bufferAppendError");
        assert!(matches!(err, Error::Playback(_)));
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }
}
