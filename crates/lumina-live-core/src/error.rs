//! Error types for stream playback.

use std::fmt;

use crate::media::MediaErrorCode;

/// Errors surfaced by the live player core.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// The media sink cannot play the stream's container or codec
    UnsupportedFormat(String),
    /// The media sink failed while decoding the stream
    Decode(String),
    /// Any other media sink error (aborted, network, unknown)
    MediaError(MediaErrorCode),
    /// The compatibility engine could not be constructed or attached
    EngineInit(String),
    /// The compatibility engine reported an unrecoverable error
    EngineFatal(String),
    /// Frame submission failed in transport or returned a non-200 status
    SubmitFailed(String),
    /// A sink is already mounted on this player
    AlreadyMounted,
    /// The player was unmounted and can no longer drive a sink
    SinkDetached,
    /// A sink operation was rejected (for example an autoplay policy refusal)
    Sink(String),
}

impl PlayerError {
    /// Maps a sink error code to the matching player error.
    pub fn from_media_code(code: MediaErrorCode) -> Self {
        match code {
            MediaErrorCode::SrcNotSupported => {
                PlayerError::UnsupportedFormat("source not supported by media sink".to_string())
            }
            MediaErrorCode::Decode => {
                PlayerError::Decode("media sink failed to decode stream".to_string())
            }
            other => PlayerError::MediaError(other),
        }
    }
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {msg}"),
            PlayerError::Decode(msg) => write!(f, "Decode error: {msg}"),
            PlayerError::MediaError(code) => write!(f, "Media error: {code}"),
            PlayerError::EngineInit(msg) => {
                write!(f, "Compatibility engine initialization failed: {msg}")
            }
            PlayerError::EngineFatal(msg) => write!(f, "Compatibility engine failed: {msg}"),
            PlayerError::SubmitFailed(msg) => write!(f, "Frame submission failed: {msg}"),
            PlayerError::AlreadyMounted => write!(f, "A media sink is already mounted"),
            PlayerError::SinkDetached => write!(f, "Player was unmounted"),
            PlayerError::Sink(msg) => write!(f, "Media sink error: {msg}"),
        }
    }
}

impl std::error::Error for PlayerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_media_code() {
        assert!(matches!(
            PlayerError::from_media_code(MediaErrorCode::SrcNotSupported),
            PlayerError::UnsupportedFormat(_)
        ));
        assert!(matches!(
            PlayerError::from_media_code(MediaErrorCode::Decode),
            PlayerError::Decode(_)
        ));
        assert_eq!(
            PlayerError::from_media_code(MediaErrorCode::Network),
            PlayerError::MediaError(MediaErrorCode::Network)
        );
    }

    #[test]
    fn test_display() {
        let err = PlayerError::SubmitFailed("status 500".to_string());
        assert_eq!(err.to_string(), "Frame submission failed: status 500");
    }
}
