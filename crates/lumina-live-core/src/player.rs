//! Headless live stream player.
//!
//! [`StreamPlayer`] composes the three state machines around one exclusively
//! owned media sink:
//!
//! - [`PlaybackSourceController`] decides *what* is loaded into the sink
//! - [`TransportCommandRouter`] decides *how* playback is manipulated
//! - [`ControlVisibilityController`] decides *when* controls are shown
//!
//! The player is driven entirely by its host: sink events, engine events,
//! user commands and a periodic [`tick`](StreamPlayer::tick). Nothing runs in
//! the background and nothing mutates state concurrently.
//!
//! # Lifecycle
//!
//! ```text
//! new() → set_source()* → mount(sink) → ... → unmount()   (terminal)
//! ```

use std::time::Duration;

use crate::config::PlayerConfig;
use crate::engine::{EngineEvent, EngineFactory};
use crate::error::PlayerError;
use crate::events::PlayerEvent;
use crate::media::{MediaSink, SinkEvent};
use crate::platform::HostPlatform;
use crate::source::{ErrorDisposition, PlaybackMode, PlaybackSource, PlaybackSourceController};
use crate::submit::{FrameSubmitter, Notifier, TracingNotifier};
use crate::transport::{FullscreenToggle, ObservedState, RememberedAudio, TransportCommandRouter};
use crate::visibility::{ControlVisibilityController, Point, Rect};

/// Live stream player widget core.
pub struct StreamPlayer<S: MediaSink, F: EngineFactory<S>> {
    // Declared before `sink` so the engine is destroyed before the sink drops.
    source: PlaybackSourceController<S, F>,
    sink: Option<S>,
    transport: TransportCommandRouter,
    visibility: ControlVisibilityController,
    events: Vec<PlayerEvent>,
    platform: HostPlatform,
    seek_step: f64,
    plus_enabled: bool,
    unmounted: bool,
}

impl<S: MediaSink, F: EngineFactory<S>> StreamPlayer<S, F> {
    /// Creates an unmounted player.
    pub fn new(config: PlayerConfig, platform: HostPlatform, factory: F) -> Self {
        let source = PlaybackSourceController::new(
            factory,
            platform,
            config.native_seek_exceptions.clone(),
            config.stream_mime.clone(),
        );
        let transport =
            TransportCommandRouter::new(config.volume, config.muted, Box::new(TracingNotifier));
        let visibility = ControlVisibilityController::new(platform.device)
            .with_hide_delay(config.mobile_hide_delay);

        Self {
            source,
            sink: None,
            transport,
            visibility,
            events: Vec::new(),
            platform,
            seek_step: config.seek_step,
            plus_enabled: config.plus_enabled,
            unmounted: false,
        }
    }

    /// Sets the frame submission operation.
    pub fn with_submitter(mut self, submitter: Box<dyn FrameSubmitter>) -> Self {
        self.transport.set_submitter(submitter);
        self
    }

    /// Sets the notifier used for submission results.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.transport.set_notifier(notifier);
        self
    }

    /// Sets the fullscreen toggler.
    pub fn with_fullscreen(mut self, toggle: FullscreenToggle) -> Self {
        self.transport.set_fullscreen(toggle);
        self
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Attaches the media sink and makes the one-time playback mode decision.
    ///
    /// Restores the remembered volume and mute, then loads the current source.
    pub fn mount(&mut self, sink: S) -> Result<PlaybackMode, PlayerError> {
        if self.unmounted {
            return Err(PlayerError::SinkDetached);
        }
        if self.sink.is_some() {
            return Err(PlayerError::AlreadyMounted);
        }

        let sink = self.sink.insert(sink);
        self.transport.restore_audio(sink);
        match self.source.attach(sink) {
            Ok(mode) => {
                self.events.push(PlayerEvent::ModeChanged(mode));
                Ok(mode)
            }
            Err(e) => {
                // Without a load path the sink is unusable; stay unmounted.
                self.sink = None;
                tracing::warn!("StreamPlayer: mount failed: {}", e);
                self.events.push(PlayerEvent::PlaybackFailed(e.clone()));
                Err(e)
            }
        }
    }

    /// Tears the widget down: cancels the hide timer, destroys the engine,
    /// drops in-flight submissions and releases the sink. Terminal.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        self.visibility.unmount();
        self.source.teardown();
        self.transport.abandon_submissions();
        self.sink = None;
        tracing::debug!("StreamPlayer: unmounted");
    }

    /// Returns true once [`unmount`](Self::unmount) has run.
    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    // ========================================================================
    // Source selection
    // ========================================================================

    /// Replaces the stream. Ignored if unchanged. Never changes the mode.
    pub fn set_source(&mut self, source: impl Into<PlaybackSource>) {
        let source = source.into();
        if self.source.set_source(self.sink.as_mut(), source) {
            // The old stream's frame is no longer current.
            self.transport.clear_metadata_loaded();
        }
    }

    /// Current stream, if any.
    pub fn source(&self) -> Option<&PlaybackSource> {
        self.source.source()
    }

    /// Active playback mode.
    pub fn mode(&self) -> PlaybackMode {
        self.source.mode()
    }

    /// Returns true while a compatibility engine instance exists.
    pub fn has_engine(&self) -> bool {
        self.source.has_engine()
    }

    // ========================================================================
    // Sink and engine notifications
    // ========================================================================

    /// Processes a sink event. `now` is host monotonic time.
    pub fn handle_sink_event(&mut self, event: SinkEvent, now: Duration) {
        let Some(sink) = self.sink.as_mut() else {
            tracing::trace!("StreamPlayer: {:?} ignored, no sink", event);
            return;
        };

        if let SinkEvent::Error(code) = event {
            match self.source.handle_media_error(sink, code) {
                ErrorDisposition::FellBack => {
                    self.transport.clear_metadata_loaded();
                    self.events
                        .push(PlayerEvent::ModeChanged(PlaybackMode::CompatibilityEngine));
                }
                ErrorDisposition::Propagate(e) => {
                    tracing::warn!("StreamPlayer: playback failed: {}", e);
                    self.events.push(PlayerEvent::PlaybackFailed(e));
                }
            }
            return;
        }

        match event {
            SinkEvent::Playing => self.visibility.on_playing(now),
            SinkEvent::Pause | SinkEvent::Ended => self.visibility.on_paused(),
            _ => {}
        }

        if let Some(out) = self.transport.observe(&*sink, event) {
            self.events.push(out);
        }
    }

    /// Processes a compatibility engine event.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Fatal { kind, details } => {
                let err = PlayerError::EngineFatal(format!("{kind}: {details}"));
                tracing::warn!("StreamPlayer: {}", err);
                self.events.push(PlayerEvent::PlaybackFailed(err));
            }
            EngineEvent::Recoverable { kind, details } => {
                tracing::debug!("StreamPlayer: engine recovered from {} error: {}", kind, details);
            }
        }
    }

    /// Drives timers and pending submissions. Call once per host frame.
    pub fn tick(&mut self, now: Duration) {
        self.visibility.tick(now);
        self.transport.poll_submissions(self.source.generation());
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Transport commands
    // ========================================================================

    /// Plays or pauses.
    pub fn set_playing(&mut self, playing: bool) {
        self.transport.set_playing(self.sink.as_mut(), playing);
    }

    /// Plays if paused, pauses if playing.
    pub fn toggle_playing(&mut self) {
        if let Some(paused) = self.sink.as_ref().map(|s| s.paused()) {
            self.set_playing(paused);
        }
    }

    /// Seeks relative to the current position, clamped at zero.
    pub fn seek_by(&mut self, delta_secs: f64) {
        self.transport.seek_by(self.sink.as_mut(), delta_secs);
    }

    /// Skips forward by the configured step.
    pub fn skip_forward(&mut self) {
        self.seek_by(self.seek_step);
    }

    /// Skips back by the configured step.
    pub fn skip_back(&mut self) {
        self.seek_by(-self.seek_step);
    }

    /// Sets the playback rate.
    pub fn set_playback_rate(&mut self, rate: f64) {
        self.transport.set_playback_rate(self.sink.as_mut(), rate);
    }

    /// Sets the volume.
    pub fn set_volume(&mut self, volume: f64) {
        self.transport.set_volume(self.sink.as_mut(), volume);
    }

    /// Sets the muted flag.
    pub fn set_muted(&mut self, muted: bool) {
        self.transport.set_muted(self.sink.as_mut(), muted);
    }

    /// Toggles mute.
    pub fn toggle_muted(&mut self) {
        if let Some(muted) = self.sink.as_ref().map(|s| s.muted()) {
            self.set_muted(!muted);
        }
    }

    /// Forwards a fullscreen request to the host.
    pub fn request_fullscreen(&mut self, on: bool) {
        self.transport.request_fullscreen(on);
    }

    /// Submits the frame currently shown. Requires the plus capability.
    pub fn submit_current_frame(&mut self) {
        if !self.plus_enabled {
            tracing::debug!("StreamPlayer: frame submission requires plus");
            return;
        }
        self.transport
            .submit_current_frame(self.sink.as_ref(), self.source.generation());
    }

    // ========================================================================
    // Control visibility
    // ========================================================================

    /// Whether controls should be rendered.
    pub fn controls_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Sets the pinned-open flag (a settings menu is open).
    pub fn set_pinned(&mut self, pinned: bool) {
        self.visibility.set_pinned(pinned);
    }

    /// Sets the host's widget visibility gate.
    pub fn set_widget_visible(&mut self, visible: bool) {
        self.visibility.set_widget_visible(visible);
    }

    /// Updates the video surface bounds.
    pub fn set_video_bounds(&mut self, bounds: Rect) {
        self.visibility.set_bounds(bounds);
    }

    /// Records a window-level pointer move.
    pub fn pointer_moved(&mut self, position: Point) {
        self.visibility.pointer_moved(position);
    }

    /// Tap on the video surface.
    pub fn tap(&mut self) {
        self.visibility.tap();
    }

    /// Whether the host should keep a window pointer listener registered.
    pub fn wants_pointer_tracking(&self) -> bool {
        !self.unmounted && self.visibility.wants_pointer_tracking()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Observed sink state.
    pub fn observed(&self) -> &ObservedState {
        self.transport.observed()
    }

    /// Volume and mute to persist for the next mount.
    pub fn remembered_audio(&self) -> RememberedAudio {
        self.transport.remembered()
    }

    /// Frame submissions still in flight.
    pub fn pending_submissions(&self) -> usize {
        self.transport.pending_submissions()
    }

    /// Host platform this player was built for.
    pub fn platform(&self) -> HostPlatform {
        self.platform
    }

    /// Mounted sink.
    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Mounted sink, mutably (for draining host-side event queues).
    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }
}

impl<S: MediaSink, F: EngineFactory<S>> Drop for StreamPlayer<S, F> {
    fn drop(&mut self) {
        self.unmount();
    }
}
