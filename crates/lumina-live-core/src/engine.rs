//! Compatibility engine abstraction.
//!
//! A compatibility engine (hls.js in browsers) parses the adaptive-streaming
//! manifest itself and feeds segments into a standard media sink when native
//! decode is unavailable or unreliable.

use std::fmt;

use crate::error::PlayerError;
use crate::media::MediaSink;

/// A software playback engine bound to a media sink.
pub trait CompatibilityEngine<S: MediaSink> {
    /// Binds the engine to the sink. Called exactly once per engine.
    fn attach_media(&mut self, sink: &mut S) -> Result<(), PlayerError>;

    /// Starts loading a new source URL through the engine.
    fn load_source(&mut self, url: &str);

    /// Releases the engine and detaches it from the sink.
    fn destroy(&mut self);
}

/// Constructs compatibility engines and reports whether the host supports them.
pub trait EngineFactory<S: MediaSink> {
    /// Engine type produced by this factory.
    type Engine: CompatibilityEngine<S>;

    /// Returns true if the engine can run on this host.
    fn is_supported(&self) -> bool;

    /// Constructs a new, unattached engine.
    fn create(&self) -> Result<Self::Engine, PlayerError>;
}

/// Error category reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// Manifest or segment download failure
    Network,
    /// Media pipeline failure (buffer append, codec)
    Media,
    /// Anything else
    Other,
}

impl fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineErrorKind::Network => write!(f, "network"),
            EngineErrorKind::Media => write!(f, "media"),
            EngineErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Error notifications from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine gave up on the stream
    Fatal {
        /// Error category
        kind: EngineErrorKind,
        /// Engine-specific detail string
        details: String,
    },
    /// The engine reported a problem it recovers from internally
    Recoverable {
        /// Error category
        kind: EngineErrorKind,
        /// Engine-specific detail string
        details: String,
    },
}

impl EngineEvent {
    /// Returns true for fatal events.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineEvent::Fatal { .. })
    }
}
