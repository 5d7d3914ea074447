//! Playback source selection and native-to-compatibility fallback.
//!
//! # State Machine
//!
//! ```text
//! new()
//!   → Uninitialized
//!
//! attach(sink)  [browser excluded, or probe fails and engine supported]
//!                → CompatibilityEngine (engine created + attached once)
//! attach(sink)  [otherwise] → NativeDirect
//!
//! sink error {Decode, SrcNotSupported} [NativeDirect, no fallback yet]
//!                → CompatibilityEngine (current source reloaded through engine)
//!
//! any other error, or any error in CompatibilityEngine → propagated, no transition
//! ```
//!
//! There is no transition back to `NativeDirect`. Source changes never alter
//! the mode.

use std::marker::PhantomData;

use crate::engine::{CompatibilityEngine, EngineFactory};
use crate::error::PlayerError;
use crate::media::{MediaErrorCode, MediaSink};
use crate::platform::{BrowserFamily, HostPlatform};

/// Active playback strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    /// No sink attached yet
    Uninitialized,
    /// The sink decodes the stream itself
    NativeDirect,
    /// A compatibility engine feeds the sink
    CompatibilityEngine,
}

/// Opaque stream identifier (usually a playlist URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSource(String);

impl PlaybackSource {
    /// Wraps a source URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the URL.
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlaybackSource {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for PlaybackSource {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// Outcome of routing a sink error through the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDisposition {
    /// Native playback was demoted to the compatibility engine
    FellBack,
    /// Not recoverable here; the caller must surface it
    Propagate(PlayerError),
}

/// Decides the initial playback mode.
///
/// Excluded browsers always use the engine. Otherwise the engine is only
/// chosen when the native probe fails and the engine can run; with neither
/// path available the sink is left to report its own error.
pub fn select_initial_mode(
    browser: BrowserFamily,
    exceptions: &[BrowserFamily],
    native_supported: bool,
    engine_supported: bool,
) -> PlaybackMode {
    if exceptions.contains(&browser) || (!native_supported && engine_supported) {
        PlaybackMode::CompatibilityEngine
    } else {
        PlaybackMode::NativeDirect
    }
}

enum ModeState<E> {
    Uninitialized,
    NativeDirect,
    Compatibility { engine: E },
}

/// Chooses and switches how the stream reaches the media sink.
pub struct PlaybackSourceController<S: MediaSink, F: EngineFactory<S>> {
    factory: F,
    state: ModeState<F::Engine>,
    source: Option<PlaybackSource>,
    /// Incremented on every source replacement
    generation: u64,
    /// Set once the single native→engine fallback has been attempted
    fallback_used: bool,
    torn_down: bool,
    platform: HostPlatform,
    exceptions: Vec<BrowserFamily>,
    stream_mime: String,
    _sink: PhantomData<fn(&mut S)>,
}

impl<S: MediaSink, F: EngineFactory<S>> PlaybackSourceController<S, F> {
    /// Creates an unattached controller.
    pub fn new(
        factory: F,
        platform: HostPlatform,
        exceptions: Vec<BrowserFamily>,
        stream_mime: impl Into<String>,
    ) -> Self {
        Self {
            factory,
            state: ModeState::Uninitialized,
            source: None,
            generation: 0,
            fallback_used: false,
            torn_down: false,
            platform,
            exceptions,
            stream_mime: stream_mime.into(),
            _sink: PhantomData,
        }
    }

    /// Returns the active mode.
    pub fn mode(&self) -> PlaybackMode {
        match self.state {
            ModeState::Uninitialized => PlaybackMode::Uninitialized,
            ModeState::NativeDirect => PlaybackMode::NativeDirect,
            ModeState::Compatibility { .. } => PlaybackMode::CompatibilityEngine,
        }
    }

    /// Returns true while an engine instance exists.
    pub fn has_engine(&self) -> bool {
        matches!(self.state, ModeState::Compatibility { .. })
    }

    /// Returns the current source, if one was set.
    pub fn source(&self) -> Option<&PlaybackSource> {
        self.source.as_ref()
    }

    /// Source generation, bumped on every replacement.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true once the one-shot fallback has been used.
    pub fn fallback_used(&self) -> bool {
        self.fallback_used
    }

    /// Returns true if the sink natively supports the stream type on this host.
    pub fn probe_native(&self, sink: &S) -> bool {
        !self.exceptions.contains(&self.platform.browser) && sink.can_play_type(&self.stream_mime)
    }

    /// Makes the one-time mode decision and loads any pending source.
    ///
    /// Subsequent calls return the already-selected mode without re-probing.
    pub fn attach(&mut self, sink: &mut S) -> Result<PlaybackMode, PlayerError> {
        if self.torn_down {
            return Err(PlayerError::SinkDetached);
        }
        if !matches!(self.state, ModeState::Uninitialized) {
            return Ok(self.mode());
        }

        let native = self.probe_native(sink);
        let engine_supported = self.factory.is_supported();
        let mode = select_initial_mode(
            self.platform.browser,
            &self.exceptions,
            native,
            engine_supported,
        );

        // Attaching an engine re-sources the sink, which resets its rate.
        let rate = sink.playback_rate();
        match mode {
            PlaybackMode::CompatibilityEngine => {
                let engine = self.create_attached_engine(sink)?;
                self.state = ModeState::Compatibility { engine };
            }
            _ => self.state = ModeState::NativeDirect,
        }

        tracing::info!(
            "PlaybackSource: selected {:?} (browser {:?}, native probe {}, engine supported {})",
            mode,
            self.platform.browser,
            native,
            engine_supported
        );

        self.load_current(sink);
        sink.set_playback_rate(rate);
        Ok(mode)
    }

    /// Replaces the source. Returns false if it is unchanged.
    ///
    /// Loads immediately when a sink is attached; otherwise the source is
    /// loaded on [`attach`](Self::attach). The mode is never changed here.
    pub fn set_source(&mut self, sink: Option<&mut S>, source: PlaybackSource) -> bool {
        if self.source.as_ref() == Some(&source) {
            return false;
        }
        self.source = Some(source);
        self.generation += 1;

        if let Some(sink) = sink {
            self.load_current(sink);
        }
        true
    }

    /// Routes a sink error, performing the one-shot fallback when allowed.
    pub fn handle_media_error(&mut self, sink: &mut S, code: MediaErrorCode) -> ErrorDisposition {
        if !code.triggers_fallback() {
            return ErrorDisposition::Propagate(PlayerError::from_media_code(code));
        }

        match self.state {
            ModeState::NativeDirect if !self.fallback_used => {
                self.fallback_used = true;
                let rate = sink.playback_rate();
                match self.create_attached_engine(sink) {
                    Ok(engine) => {
                        tracing::info!(
                            "PlaybackSource: native playback failed ({}), switching to compatibility engine",
                            code
                        );
                        self.state = ModeState::Compatibility { engine };
                        self.load_current(sink);
                        sink.set_playback_rate(rate);
                        ErrorDisposition::FellBack
                    }
                    Err(e) => {
                        tracing::warn!("PlaybackSource: fallback engine unavailable: {}", e);
                        ErrorDisposition::Propagate(e)
                    }
                }
            }
            _ => {
                tracing::warn!(
                    "PlaybackSource: {} in {:?} mode is not recoverable",
                    code,
                    self.mode()
                );
                ErrorDisposition::Propagate(PlayerError::from_media_code(code))
            }
        }
    }

    /// Destroys the engine, if any. The controller cannot be attached again.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let ModeState::Compatibility { mut engine } =
            std::mem::replace(&mut self.state, ModeState::Uninitialized)
        {
            tracing::debug!("PlaybackSource: destroying compatibility engine");
            engine.destroy();
        }
    }

    fn create_attached_engine(&self, sink: &mut S) -> Result<F::Engine, PlayerError> {
        let mut engine = self.factory.create()?;
        if let Err(e) = engine.attach_media(sink) {
            engine.destroy();
            return Err(e);
        }
        Ok(engine)
    }

    /// Loads the current source on the active path, preserving the playback rate.
    fn load_current(&mut self, sink: &mut S) {
        let Some(source) = &self.source else {
            return;
        };

        let rate = sink.playback_rate();
        match &mut self.state {
            ModeState::Uninitialized => return,
            ModeState::NativeDirect => {
                sink.set_src(source.url());
                sink.load();
            }
            ModeState::Compatibility { engine } => engine.load_source(source.url()),
        }
        sink.set_playback_rate(rate);

        tracing::debug!(
            "PlaybackSource: loaded {} (generation {}, rate {})",
            source.url(),
            self.generation,
            rate
        );
    }
}

impl<S: MediaSink, F: EngineFactory<S>> Drop for PlaybackSourceController<S, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
