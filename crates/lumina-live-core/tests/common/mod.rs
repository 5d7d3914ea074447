//! Shared in-memory collaborators for the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lumina_live_core::{
    CompatibilityEngine, EngineFactory, FrameSubmitter, MediaSink, Notification, Notifier,
    PlayerError, Resolution, SubmitResponse, HLS_MIME_TYPE,
};
use poll_promise::{Promise, Sender};

/// Installs a fmt subscriber once; `RUST_LOG=lumina_live_core=debug` shows player logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Video element stand-in. `load()` resets rate and position like a browser.
#[derive(Debug)]
pub struct MemorySink {
    pub src: Option<String>,
    pub loads: usize,
    pub paused: bool,
    pub time: f64,
    pub rate: f64,
    pub volume: f64,
    pub muted: bool,
    pub size: Resolution,
    pub native_hls: bool,
}

impl MemorySink {
    pub fn native() -> Self {
        Self {
            native_hls: true,
            ..Self::without_native()
        }
    }

    pub fn without_native() -> Self {
        Self {
            src: None,
            loads: 0,
            paused: true,
            time: 0.0,
            rate: 1.0,
            volume: 1.0,
            muted: false,
            size: Resolution::new(1920, 1080),
            native_hls: false,
        }
    }
}

impl MediaSink for MemorySink {
    fn set_src(&mut self, url: &str) {
        self.src = Some(url.to_string());
    }

    fn load(&mut self) {
        self.loads += 1;
        self.rate = 1.0;
        self.time = 0.0;
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
        self.time
    }

    fn set_current_time(&mut self, secs: f64) {
        self.time = secs;
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
        self.native_hls && mime == HLS_MIME_TYPE
    }
}

/// What every engine built by a [`RecordingFactory`] did.
#[derive(Debug, Default)]
pub struct EngineLog {
    pub created: Cell<usize>,
    pub attached: Cell<usize>,
    pub destroyed: Cell<usize>,
    pub loads: RefCell<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct RecordingFactory {
    pub log: Rc<EngineLog>,
}

pub struct RecordingEngine {
    log: Rc<EngineLog>,
}

impl CompatibilityEngine<MemorySink> for RecordingEngine {
    fn attach_media(&mut self, sink: &mut MemorySink) -> Result<(), PlayerError> {
        self.log.attached.set(self.log.attached.get() + 1);
        // Like hls.js: attaching re-sources the element, resetting its rate.
        sink.rate = 1.0;
        Ok(())
    }

    fn load_source(&mut self, url: &str) {
        self.log.loads.borrow_mut().push(url.to_string());
    }

    fn destroy(&mut self) {
        self.log.destroyed.set(self.log.destroyed.get() + 1);
    }
}

impl EngineFactory<MemorySink> for RecordingFactory {
    type Engine = RecordingEngine;

    fn is_supported(&self) -> bool {
        true
    }

    fn create(&self) -> Result<RecordingEngine, PlayerError> {
        self.log.created.set(self.log.created.get() + 1);
        Ok(RecordingEngine {
            log: Rc::clone(&self.log),
        })
    }
}

/// Submitter whose responses are delivered by the test through senders.
#[derive(Clone, Default)]
pub struct ManualSubmitter {
    pub requests: Rc<RefCell<Vec<(f64, Sender<Result<SubmitResponse, PlayerError>>)>>>,
}

impl ManualSubmitter {
    /// Resolves the oldest outstanding request.
    pub fn respond(&self, outcome: Result<SubmitResponse, PlayerError>) {
        let (_, sender) = self.requests.borrow_mut().remove(0);
        sender.send(outcome);
    }
}

impl FrameSubmitter for ManualSubmitter {
    fn submit(&self, time_secs: f64) -> Promise<Result<SubmitResponse, PlayerError>> {
        let (sender, promise) = Promise::new();
        self.requests.borrow_mut().push((time_secs, sender));
        promise
    }
}

#[derive(Clone, Default)]
pub struct Toasts {
    pub shown: Rc<RefCell<Vec<Notification>>>,
}

impl Notifier for Toasts {
    fn notify(&self, notification: Notification) {
        self.shown.borrow_mut().push(notification);
    }
}
