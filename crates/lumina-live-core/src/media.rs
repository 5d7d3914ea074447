//! Media sink abstraction.
//!
//! The media sink is the host's playable-media element (an `HTMLVideoElement`
//! in browsers). The core never decodes anything itself: it assigns sources,
//! manipulates transport properties, and reacts to the events the sink emits.

use std::fmt;

use crate::error::PlayerError;

/// MIME type of an HLS playlist, used to probe native support.
pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

/// Intrinsic video resolution reported by the sink after metadata loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Creates a new resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero (no frame decoded yet).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height, or 0.0 when empty.
    pub fn aspect_ratio(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Error codes reported by the sink, numbered like the browser's `MediaError.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaErrorCode {
    /// MEDIA_ERR_ABORTED (1)
    Aborted,
    /// MEDIA_ERR_NETWORK (2)
    Network,
    /// MEDIA_ERR_DECODE (3)
    Decode,
    /// MEDIA_ERR_SRC_NOT_SUPPORTED (4)
    SrcNotSupported,
    /// Any code outside the standard range
    Unknown(u16),
}

impl MediaErrorCode {
    /// Converts a raw `MediaError.code` value.
    pub fn from_raw(code: u16) -> Self {
        match code {
            1 => MediaErrorCode::Aborted,
            2 => MediaErrorCode::Network,
            3 => MediaErrorCode::Decode,
            4 => MediaErrorCode::SrcNotSupported,
            other => MediaErrorCode::Unknown(other),
        }
    }

    /// Returns the raw `MediaError.code` value.
    pub fn as_raw(self) -> u16 {
        match self {
            MediaErrorCode::Aborted => 1,
            MediaErrorCode::Network => 2,
            MediaErrorCode::Decode => 3,
            MediaErrorCode::SrcNotSupported => 4,
            MediaErrorCode::Unknown(code) => code,
        }
    }

    /// Only format and decode failures justify switching to the compatibility engine.
    pub fn triggers_fallback(self) -> bool {
        matches!(self, MediaErrorCode::Decode | MediaErrorCode::SrcNotSupported)
    }
}

impl fmt::Display for MediaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaErrorCode::Aborted => write!(f, "aborted (1)"),
            MediaErrorCode::Network => write!(f, "network (2)"),
            MediaErrorCode::Decode => write!(f, "decode (3)"),
            MediaErrorCode::SrcNotSupported => write!(f, "source not supported (4)"),
            MediaErrorCode::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

/// Notifications emitted by the sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkEvent {
    /// Volume or muted flag changed
    VolumeChange,
    /// Current time advanced
    TimeUpdate,
    /// Duration and dimensions are known
    LoadedMetadata,
    /// First frame is available
    LoadedData,
    /// Playback started or resumed
    Playing,
    /// Playback paused
    Pause,
    /// Playback reached the end of the stream
    Ended,
    /// The sink failed
    Error(MediaErrorCode),
}

/// The host media element.
///
/// Implementations are exclusively owned by one player for its lifetime.
pub trait MediaSink {
    /// Assigns a source URL directly to the element.
    fn set_src(&mut self, url: &str);

    /// Triggers a reload of the current source. Resets the playback rate.
    fn load(&mut self);

    /// Starts or resumes playback.
    fn play(&mut self) -> Result<(), PlayerError>;

    /// Pauses playback.
    fn pause(&mut self);

    /// Returns true while the element is paused.
    fn paused(&self) -> bool;

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Seeks to a position in seconds. The sink clamps to its duration.
    fn set_current_time(&mut self, secs: f64);

    /// Current playback rate (1.0 = realtime).
    fn playback_rate(&self) -> f64;

    /// Sets the playback rate.
    fn set_playback_rate(&mut self, rate: f64);

    /// Volume in 0.0..=1.0.
    fn volume(&self) -> f64;

    /// Sets the volume.
    fn set_volume(&mut self, volume: f64);

    /// Whether audio is muted.
    fn muted(&self) -> bool;

    /// Sets the muted flag.
    fn set_muted(&mut self, muted: bool);

    /// Intrinsic video dimensions (zero before metadata loads).
    fn video_size(&self) -> Resolution;

    /// Positive support probe for a MIME type ("maybe"/"probably" in browsers).
    fn can_play_type(&self, mime: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_raw_values() {
        for raw in 1..=4 {
            assert_eq!(MediaErrorCode::from_raw(raw).as_raw(), raw);
        }
        assert_eq!(MediaErrorCode::from_raw(9), MediaErrorCode::Unknown(9));
    }

    #[test]
    fn test_fallback_codes() {
        assert!(MediaErrorCode::Decode.triggers_fallback());
        assert!(MediaErrorCode::SrcNotSupported.triggers_fallback());
        assert!(!MediaErrorCode::Network.triggers_fallback());
        assert!(!MediaErrorCode::Aborted.triggers_fallback());
        assert!(!MediaErrorCode::Unknown(0).triggers_fallback());
    }

    #[test]
    fn test_resolution_aspect_ratio() {
        assert!((Resolution::new(1920, 1080).aspect_ratio() - 1.777).abs() < 0.01);
        assert_eq!(Resolution::default().aspect_ratio(), 0.0);
    }
}
