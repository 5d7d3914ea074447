//! Player configuration.

use std::time::Duration;

use crate::media::HLS_MIME_TYPE;
use crate::platform::BrowserFamily;

/// Default delay before mobile controls hide after playback starts.
pub const MOBILE_HIDE_DELAY: Duration = Duration::from_secs(4);

/// Default skip distance for the skip-forward/back commands.
pub const SEEK_STEP_SECONDS: f64 = 10.0;

/// Configuration for a [`StreamPlayer`](crate::player::StreamPlayer).
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// MIME type probed on the sink to decide whether native decode is available
    pub stream_mime: String,
    /// Browsers whose native seek is unreliable; these always use the compatibility engine
    pub native_seek_exceptions: Vec<BrowserFamily>,
    /// Delay before mobile controls hide once playback starts
    pub mobile_hide_delay: Duration,
    /// Distance in seconds for skip-forward/back
    pub seek_step: f64,
    /// Enables frame submission
    pub plus_enabled: bool,
    /// Remembered volume applied when a sink is mounted
    pub volume: f64,
    /// Remembered muted flag applied when a sink is mounted.
    /// Starts muted so autoplay policies allow playback.
    pub muted: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            stream_mime: HLS_MIME_TYPE.to_string(),
            native_seek_exceptions: vec![BrowserFamily::Firefox],
            mobile_hide_delay: MOBILE_HIDE_DELAY,
            seek_step: SEEK_STEP_SECONDS,
            plus_enabled: false,
            volume: 1.0,
            muted: true,
        }
    }
}

impl PlayerConfig {
    /// Sets the MIME type used for the native support probe.
    pub fn with_stream_mime(mut self, mime: impl Into<String>) -> Self {
        self.stream_mime = mime.into();
        self
    }

    /// Replaces the list of browsers excluded from native playback.
    pub fn with_native_seek_exceptions(mut self, browsers: Vec<BrowserFamily>) -> Self {
        self.native_seek_exceptions = browsers;
        self
    }

    /// Sets the mobile auto-hide delay.
    pub fn with_mobile_hide_delay(mut self, delay: Duration) -> Self {
        self.mobile_hide_delay = delay;
        self
    }

    /// Sets the skip distance in seconds.
    pub fn with_seek_step(mut self, seconds: f64) -> Self {
        self.seek_step = seconds;
        self
    }

    /// Enables or disables frame submission.
    pub fn with_plus(mut self, enabled: bool) -> Self {
        self.plus_enabled = enabled;
        self
    }

    /// Restores a remembered volume (clamped to 0.0..=1.0).
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Restores a remembered muted flag.
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }
}
