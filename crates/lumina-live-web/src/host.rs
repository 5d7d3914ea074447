//! Browser host: drives a [`StreamPlayer`] from the page's update loop.

use std::time::Duration;

use lumina_live_core::{
    FullscreenToggle, HostPlatform, PlaybackMode, PlaybackSource, PlayerConfig, PlayerError,
    PlayerEvent, Point, Rect, StreamPlayer,
};
use web_sys::{Element, HtmlVideoElement};

use crate::hls::{EngineEventQueue, HlsJsFactory};
use crate::pointer::PointerTracker;
use crate::submit::FetchFrameSubmitter;
use crate::video_sink::HtmlVideoSink;

/// Player specialised to the browser collaborators.
pub type WebStreamPlayer = StreamPlayer<HtmlVideoSink, HlsJsFactory>;

/// Classifies the running browser from `navigator.userAgent`.
pub fn detect_platform() -> HostPlatform {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| HostPlatform::from_user_agent(&ua))
        .unwrap_or_default()
}

/// Monotonic host time from `performance.now()`.
pub fn now() -> Duration {
    let millis = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    Duration::from_secs_f64(millis.max(0.0) / 1000.0)
}

/// Fullscreen toggle for `element` using the Fullscreen API.
pub fn element_fullscreen(element: Element) -> FullscreenToggle {
    Box::new(move |on| {
        if on {
            if let Err(e) = element.request_fullscreen() {
                tracing::warn!("Fullscreen request failed: {:?}", e);
            }
        } else if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.exit_fullscreen();
        }
    })
}

/// Owns the player plus the browser resources it cannot own itself.
///
/// Call [`WebPlayerHost::update`] once per animation frame.
pub struct WebPlayerHost {
    player: WebStreamPlayer,
    engine_events: EngineEventQueue,
    pointer: Option<PointerTracker>,
    pinned: bool,
}

impl WebPlayerHost {
    /// Builds a player for `video` and mounts it.
    ///
    /// `submit_to` is `(base_url, camera)` for frame submission; submission
    /// still requires `config` to enable it.
    pub fn mount(
        config: PlayerConfig,
        video: HtmlVideoElement,
        source: impl Into<PlaybackSource>,
        submit_to: Option<(String, String)>,
    ) -> Result<Self, PlayerError> {
        let platform = detect_platform();
        tracing::info!("Mounting stream player on {:?}", platform);

        let factory = HlsJsFactory::new();
        let engine_events = factory.events();
        let fullscreen = element_fullscreen(video.clone().into());

        let mut player = StreamPlayer::new(config, platform, factory).with_fullscreen(fullscreen);
        if let Some((base, camera)) = submit_to {
            player = player.with_submitter(Box::new(FetchFrameSubmitter::new(base, camera)));
        }
        player.set_source(source);
        player.mount(HtmlVideoSink::new(video)?)?;

        let mut host = Self {
            player,
            engine_events,
            pointer: None,
            pinned: false,
        };
        host.sync_pointer_tracking();
        Ok(host)
    }

    /// Pumps queued element and hls.js events into the player and ticks it.
    pub fn update(&mut self) {
        let now = now();

        let sink_events = self
            .player
            .sink_mut()
            .map(HtmlVideoSink::take_events)
            .unwrap_or_default();
        for event in sink_events {
            self.player.handle_sink_event(event, now);
        }

        let engine_events: Vec<_> = self.engine_events.borrow_mut().drain(..).collect();
        for event in engine_events {
            self.player.handle_engine_event(event);
        }

        self.sync_pointer_tracking();
        if let Some(position) = self.pointer.as_ref().and_then(PointerTracker::take_moved) {
            self.player.pointer_moved(position);
        }

        self.player.tick(now);
    }

    /// Starts or stops the window listener to match the player's needs.
    fn sync_pointer_tracking(&mut self) {
        let wanted = self.player.wants_pointer_tracking();
        match (&self.pointer, wanted) {
            (None, true) => match PointerTracker::new() {
                Ok(tracker) => self.pointer = Some(tracker),
                Err(e) => tracing::warn!("{}", e),
            },
            (Some(_), false) => self.pointer = None,
            _ => {}
        }
    }

    /// Pins or unpins the controls. A pin change re-registers the pointer
    /// listener.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.player.set_pinned(pinned);
        if pinned != self.pinned {
            self.pinned = pinned;
            self.pointer = None;
            self.sync_pointer_tracking();
        }
    }

    /// Shows or hides the whole widget. Hidden widgets stop pointer tracking.
    pub fn set_widget_visible(&mut self, visible: bool) {
        self.player.set_widget_visible(visible);
        self.sync_pointer_tracking();
    }

    /// Updates the on-screen video rectangle used for hover hit-testing.
    pub fn set_video_bounds(&mut self, bounds: Rect) {
        self.player.set_video_bounds(bounds);
    }

    /// Reads the video element's bounding rectangle into the player.
    pub fn refresh_video_bounds(&mut self) {
        let Some(sink) = self.player.sink() else {
            return;
        };
        let rect = sink.element().get_bounding_client_rect();
        self.player.set_video_bounds(Rect::from_min_size(
            Point::new(rect.left() as f32, rect.top() as f32),
            rect.width() as f32,
            rect.height() as f32,
        ));
    }

    pub fn set_source(&mut self, source: impl Into<PlaybackSource>) {
        self.player.set_source(source);
    }

    pub fn mode(&self) -> PlaybackMode {
        self.player.mode()
    }

    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.player.drain_events()
    }

    pub fn player(&self) -> &WebStreamPlayer {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut WebStreamPlayer {
        &mut self.player
    }

    /// Tears the player down and releases every browser resource.
    pub fn unmount(&mut self) {
        self.pointer = None;
        self.player.unmount();
        self.engine_events.borrow_mut().clear();
    }
}

impl Drop for WebPlayerHost {
    fn drop(&mut self) {
        self.unmount();
    }
}
