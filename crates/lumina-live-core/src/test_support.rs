//! In-memory collaborators for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use poll_promise::Promise;

use crate::engine::{CompatibilityEngine, EngineFactory};
use crate::error::PlayerError;
use crate::media::{MediaSink, Resolution};
use crate::submit::{FrameSubmitter, Notification, Notifier, SubmitResponse};

/// Media sink that behaves like an `HTMLVideoElement` without decoding.
#[derive(Debug)]
pub struct FakeSink {
    src: Option<String>,
    load_count: usize,
    paused: bool,
    current_time: f64,
    rate: f64,
    volume: f64,
    muted: bool,
    size: Resolution,
    native_hls: bool,
}

impl FakeSink {
    pub fn new() -> Self {
        Self {
            src: None,
            load_count: 0,
            paused: true,
            current_time: 0.0,
            rate: 1.0,
            volume: 1.0,
            muted: false,
            size: Resolution::default(),
            native_hls: false,
        }
    }

    pub fn with_native_hls(mut self, supported: bool) -> Self {
        self.native_hls = supported;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Resolution::new(width, height);
        self
    }

    pub fn src(&self) -> Option<String> {
        self.src.clone()
    }

    pub fn load_count(&self) -> usize {
        self.load_count
    }
}

impl MediaSink for FakeSink {
    fn set_src(&mut self, url: &str) {
        self.src = Some(url.to_string());
    }

    fn load(&mut self) {
        self.load_count += 1;
        // A real element resets these on load.
        self.rate = 1.0;
        self.current_time = 0.0;
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, secs: f64) {
        self.current_time = secs;
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn video_size(&self) -> Resolution {
        self.size
    }

    fn can_play_type(&self, mime: &str) -> bool {
        self.native_hls && mime == crate::media::HLS_MIME_TYPE
    }
}

#[derive(Debug, Default)]
struct EngineCounters {
    created: Cell<usize>,
    attached: Cell<usize>,
    destroyed: Cell<usize>,
}

/// Engine factory whose engines record every call into shared counters.
#[derive(Debug, Clone, Default)]
pub struct FakeFactory {
    counters: Rc<EngineCounters>,
    fail: bool,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn created(&self) -> usize {
        self.counters.created.get()
    }

    pub fn attached(&self) -> usize {
        self.counters.attached.get()
    }

    pub fn destroyed(&self) -> usize {
        self.counters.destroyed.get()
    }
}

pub struct FakeEngine {
    counters: Rc<EngineCounters>,
}

impl CompatibilityEngine<FakeSink> for FakeEngine {
    fn attach_media(&mut self, sink: &mut FakeSink) -> Result<(), PlayerError> {
        self.counters.attached.set(self.counters.attached.get() + 1);
        // hls.js re-sources the element on attach, which resets the rate.
        sink.set_playback_rate(1.0);
        Ok(())
    }

    fn load_source(&mut self, _url: &str) {}

    fn destroy(&mut self) {
        self.counters.destroyed.set(self.counters.destroyed.get() + 1);
    }
}

impl EngineFactory<FakeSink> for FakeFactory {
    type Engine = FakeEngine;

    fn is_supported(&self) -> bool {
        !self.fail
    }

    fn create(&self) -> Result<FakeEngine, PlayerError> {
        if self.fail {
            return Err(PlayerError::EngineInit("engine unavailable".to_string()));
        }
        self.counters.created.set(self.counters.created.get() + 1);
        Ok(FakeEngine {
            counters: Rc::clone(&self.counters),
        })
    }
}

/// Submitter that resolves immediately with a fixed outcome.
pub struct ReadySubmitter {
    pub outcome: Result<SubmitResponse, PlayerError>,
    pub times: Rc<RefCell<Vec<f64>>>,
}

impl FrameSubmitter for ReadySubmitter {
    fn submit(&self, time_secs: f64) -> Promise<Result<SubmitResponse, PlayerError>> {
        self.times.borrow_mut().push(time_secs);
        Promise::from_ready(self.outcome.clone())
    }
}

/// Notifier that records every notification.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub seen: Rc<RefCell<Vec<Notification>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}
