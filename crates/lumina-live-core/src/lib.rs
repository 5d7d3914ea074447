//! lumina-live-core: playback core for live and recorded camera streams.
//!
//! This crate holds the parts of a stream player widget that have real state
//! transitions, independent of any UI toolkit or browser binding:
//!
//! - [`source`] - native vs. compatibility-engine playback selection and the
//!   one-shot fallback on decode/format errors
//! - [`transport`] - play/pause, seek, rate, volume, mute, fullscreen and
//!   frame submission routed onto the media sink
//! - [`visibility`] - hover-reveal (desktop) and tap/auto-hide (mobile)
//!   control visibility
//! - [`player`] - [`StreamPlayer`], composing the three around one sink
//!
//! The host supplies the collaborators through traits: [`MediaSink`] (the
//! video element), [`EngineFactory`]/[`CompatibilityEngine`] (hls.js),
//! [`FrameSubmitter`] and [`Notifier`]. `lumina-live-web` implements them for
//! browsers.
//!
//! # Example
//!
//! ```ignore
//! use lumina_live_core::{HostPlatform, PlayerConfig, StreamPlayer};
//!
//! let mut player = StreamPlayer::new(PlayerConfig::default(), platform, factory);
//! player.set_source("https://nvr.local/vod/front/index.m3u8");
//! player.mount(sink)?;
//!
//! // Every frame:
//! player.handle_sink_event(event, now);
//! player.tick(now);
//! for event in player.drain_events() { /* persist volume, show resolution, ... */ }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod media;
pub mod platform;
pub mod player;
pub mod source;
pub mod submit;
pub mod timer;
pub mod transport;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::PlayerConfig;
pub use engine::{CompatibilityEngine, EngineErrorKind, EngineEvent, EngineFactory};
pub use error::PlayerError;
pub use events::PlayerEvent;
pub use media::{MediaErrorCode, MediaSink, Resolution, SinkEvent, HLS_MIME_TYPE};
pub use platform::{BrowserFamily, DeviceClass, HostPlatform, OsFamily};
pub use player::StreamPlayer;
pub use source::{ErrorDisposition, PlaybackMode, PlaybackSource, PlaybackSourceController};
pub use submit::{
    FrameSubmitter, Notification, NotificationLevel, Notifier, SubmitResponse, TracingNotifier,
};
pub use timer::HideTimer;
pub use transport::{FullscreenToggle, ObservedState, RememberedAudio, TransportCommandRouter};
pub use visibility::{ControlVisibilityController, Point, Rect};
