//! `HTMLVideoElement` media sink.
//!
//! Wraps a `<video>` element owned by the page. Element events are captured by
//! listeners registered at construction and queued; the host drains the queue
//! once per frame and feeds it to the player. Listeners are removed on Drop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use lumina_live_core::{MediaErrorCode, MediaSink, PlayerError, Resolution, SinkEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlVideoElement};

type Listener = Closure<dyn FnMut(Event)>;

/// Element events translated 1:1 into sink events.
const FORWARDED_EVENTS: &[(&str, SinkEvent)] = &[
    ("volumechange", SinkEvent::VolumeChange),
    ("timeupdate", SinkEvent::TimeUpdate),
    ("loadedmetadata", SinkEvent::LoadedMetadata),
    ("loadeddata", SinkEvent::LoadedData),
    ("playing", SinkEvent::Playing),
    ("pause", SinkEvent::Pause),
    ("ended", SinkEvent::Ended),
];

/// Media sink backed by a page `<video>` element.
pub struct HtmlVideoSink {
    /// The underlying HTML video element
    video: HtmlVideoElement,
    /// Events captured since the last drain
    queue: Rc<RefCell<VecDeque<SinkEvent>>>,
    /// Registered listeners, kept alive until Drop
    listeners: Vec<(&'static str, Listener)>,
}

impl HtmlVideoSink {
    /// Wraps the element and starts listening for its events.
    pub fn new(video: HtmlVideoElement) -> Result<Self, PlayerError> {
        // Required for inline playback on iOS
        video.set_attribute("playsinline", "true").ok();
        video.set_preload("auto");

        let queue = Rc::new(RefCell::new(VecDeque::new()));
        let mut sink = Self {
            video,
            queue,
            listeners: Vec::new(),
        };

        for &(name, event) in FORWARDED_EVENTS {
            let queue = Rc::clone(&sink.queue);
            sink.listen(
                name,
                Closure::new(move |_: Event| queue.borrow_mut().push_back(event)),
            )?;
        }

        // The error event carries no payload; the code lives on `video.error`.
        let queue = Rc::clone(&sink.queue);
        let element = sink.video.clone();
        sink.listen(
            "error",
            Closure::new(move |_: Event| {
                let code = element
                    .error()
                    .map(|e| MediaErrorCode::from_raw(e.code()))
                    .unwrap_or(MediaErrorCode::Unknown(0));
                queue.borrow_mut().push_back(SinkEvent::Error(code));
            }),
        )?;

        Ok(sink)
    }

    fn listen(&mut self, name: &'static str, listener: Listener) -> Result<(), PlayerError> {
        self.video
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            .map_err(|e| PlayerError::Sink(format!("Failed to listen for {name}: {:?}", e)))?;
        self.listeners.push((name, listener));
        Ok(())
    }

    /// Takes all events captured since the last call.
    pub fn take_events(&mut self) -> Vec<SinkEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Returns the underlying element, for engines that attach to it.
    pub fn element(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl MediaSink for HtmlVideoSink {
    fn set_src(&mut self, url: &str) {
        self.video.set_src(url);
    }

    fn load(&mut self) {
        self.video.load();
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        let promise = self
            .video
            .play()
            .map_err(|e| PlayerError::Sink(format!("Play failed: {:?}", e)))?;

        // Fire and forget - state arrives via the playing/pause events
        let _ = promise;
        Ok(())
    }

    fn pause(&mut self) {
        self.video.pause().ok();
    }

    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&mut self, secs: f64) {
        self.video.set_current_time(secs);
    }

    fn playback_rate(&self) -> f64 {
        self.video.playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.video.set_playback_rate(rate);
    }

    fn volume(&self) -> f64 {
        self.video.volume()
    }

    fn set_volume(&mut self, volume: f64) {
        // The element throws outside 0..=1
        self.video.set_volume(volume.clamp(0.0, 1.0));
    }

    fn muted(&self) -> bool {
        self.video.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn video_size(&self) -> Resolution {
        Resolution::new(self.video.video_width(), self.video.video_height())
    }

    fn can_play_type(&self, mime: &str) -> bool {
        !self.video.can_play_type(mime).is_empty()
    }
}

impl Drop for HtmlVideoSink {
    fn drop(&mut self) {
        for (name, listener) in self.listeners.drain(..) {
            let _ = self
                .video
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
    }
}
