//! Events the player reports to its host.

use crate::error::PlayerError;
use crate::media::Resolution;
use crate::source::PlaybackMode;

/// Outward notifications, drained by the host with
/// [`StreamPlayer::drain_events`](crate::player::StreamPlayer::drain_events).
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Metadata loaded; intrinsic size is known
    ResolutionChanged(Resolution),
    /// Current time in seconds, emitted on every sink time update
    TimeUpdated(f64),
    /// First data is available
    Loaded,
    /// Playback reached the end
    Ended,
    /// Playback started or resumed
    Playing,
    /// Playback paused
    Paused,
    /// Volume or mute changed on the sink; persist these for the next mount
    VolumeChanged {
        /// New volume
        volume: f64,
        /// New muted flag
        muted: bool,
    },
    /// Playback mode selected or switched
    ModeChanged(PlaybackMode),
    /// Terminal playback failure
    PlaybackFailed(PlayerError),
}
