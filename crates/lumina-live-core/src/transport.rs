//! Transport commands and observed playback state.
//!
//! Commands are applied to the media sink when one is attached and silently
//! dropped otherwise; nothing is queued. Observed state is refreshed only from
//! sink events, never from the commands themselves.

use crate::events::PlayerEvent;
use crate::media::{MediaSink, Resolution, SinkEvent};
use crate::submit::{FrameSubmitter, Notifier, PendingSubmission};

/// Caller-supplied fullscreen toggler.
pub type FullscreenToggle = Box<dyn FnMut(bool)>;

/// Playback state read back from the sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedState {
    /// Whether the sink is playing
    pub playing: bool,
    /// Whether audio is muted
    pub muted: bool,
    /// Volume (0.0-1.0)
    pub volume: f64,
    /// Playback rate
    pub playback_rate: f64,
    /// Current position in seconds
    pub current_time: f64,
    /// Intrinsic resolution, once metadata has loaded
    pub resolution: Option<Resolution>,
    /// Whether the rendered frame is current (cleared on fallback)
    pub metadata_loaded: bool,
}

impl Default for ObservedState {
    fn default() -> Self {
        Self {
            playing: false,
            muted: true,
            volume: 1.0,
            playback_rate: 1.0,
            current_time: 0.0,
            resolution: None,
            metadata_loaded: false,
        }
    }
}

/// Volume and mute as last chosen by the user, tracked independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RememberedAudio {
    /// Last volume set
    pub volume: f64,
    /// Last muted flag set
    pub muted: bool,
}

/// Translates user intents into sink operations.
pub struct TransportCommandRouter {
    observed: ObservedState,
    remembered: RememberedAudio,
    submitter: Option<Box<dyn FrameSubmitter>>,
    notifier: Box<dyn Notifier>,
    fullscreen: Option<FullscreenToggle>,
    pending: Vec<PendingSubmission>,
}

impl TransportCommandRouter {
    /// Creates a router with the remembered volume and muted flag to restore.
    pub fn new(volume: f64, muted: bool, notifier: Box<dyn Notifier>) -> Self {
        Self {
            observed: ObservedState::default(),
            remembered: RememberedAudio { volume, muted },
            submitter: None,
            notifier,
            fullscreen: None,
            pending: Vec::new(),
        }
    }

    /// Sets the frame submission operation.
    pub fn set_submitter(&mut self, submitter: Box<dyn FrameSubmitter>) {
        self.submitter = Some(submitter);
    }

    /// Replaces the notifier.
    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifier = notifier;
    }

    /// Sets the fullscreen toggler.
    pub fn set_fullscreen(&mut self, toggle: FullscreenToggle) {
        self.fullscreen = Some(toggle);
    }

    /// Last observed sink state.
    pub fn observed(&self) -> &ObservedState {
        &self.observed
    }

    /// Volume and mute to persist across remounts.
    pub fn remembered(&self) -> RememberedAudio {
        self.remembered
    }

    /// Number of frame submissions still in flight.
    pub fn pending_submissions(&self) -> usize {
        self.pending.len()
    }

    /// Applies the remembered volume and mute to a freshly mounted sink.
    pub fn restore_audio<S: MediaSink>(&mut self, sink: &mut S) {
        sink.set_volume(self.remembered.volume);
        sink.set_muted(self.remembered.muted);
        self.observed.volume = self.remembered.volume;
        self.observed.muted = self.remembered.muted;
    }

    /// Marks the current frame stale; it stays hidden until metadata reloads.
    pub fn clear_metadata_loaded(&mut self) {
        self.observed.metadata_loaded = false;
    }

    /// Plays or pauses.
    pub fn set_playing<S: MediaSink>(&mut self, sink: Option<&mut S>, playing: bool) {
        let Some(sink) = sink else {
            tracing::debug!("Transport: set_playing({}) dropped, no sink", playing);
            return;
        };
        if playing {
            // Only synchronous failures land here. An asynchronous autoplay
            // refusal shows up as the absence of a `playing` event.
            if let Err(e) = sink.play() {
                tracing::warn!("Transport: play failed: {}", e);
            }
        } else {
            sink.pause();
        }
    }

    /// Seeks relative to the current position, never before zero.
    ///
    /// No upper clamp: the sink clamps to its own duration.
    pub fn seek_by<S: MediaSink>(&mut self, sink: Option<&mut S>, delta_secs: f64) {
        let Some(sink) = sink else {
            tracing::debug!("Transport: seek_by({}) dropped, no sink", delta_secs);
            return;
        };
        let target = (sink.current_time() + delta_secs).max(0.0);
        sink.set_current_time(target);
    }

    /// Sets the playback rate without range validation.
    pub fn set_playback_rate<S: MediaSink>(&mut self, sink: Option<&mut S>, rate: f64) {
        let Some(sink) = sink else {
            tracing::debug!("Transport: set_playback_rate({}) dropped, no sink", rate);
            return;
        };
        sink.set_playback_rate(rate);
    }

    /// Sets the volume. The remembered mute flag is untouched.
    pub fn set_volume<S: MediaSink>(&mut self, sink: Option<&mut S>, volume: f64) {
        let Some(sink) = sink else {
            tracing::debug!("Transport: set_volume({}) dropped, no sink", volume);
            return;
        };
        sink.set_volume(volume);
        self.remembered.volume = volume;
    }

    /// Sets the muted flag. The remembered volume is untouched.
    pub fn set_muted<S: MediaSink>(&mut self, sink: Option<&mut S>, muted: bool) {
        let Some(sink) = sink else {
            tracing::debug!("Transport: set_muted({}) dropped, no sink", muted);
            return;
        };
        sink.set_muted(muted);
        self.remembered.muted = muted;
    }

    /// Forwards a fullscreen request to the caller's toggler.
    pub fn request_fullscreen(&mut self, on: bool) {
        match self.fullscreen.as_mut() {
            Some(toggle) => toggle(on),
            None => tracing::debug!("Transport: fullscreen({}) ignored, no toggler", on),
        }
    }

    /// Submits the frame at the sink's current time. Playback is not touched.
    pub fn submit_current_frame<S: MediaSink>(&mut self, sink: Option<&S>, generation: u64) {
        let Some(sink) = sink else {
            tracing::debug!("Transport: frame submission dropped, no sink");
            return;
        };
        let Some(submitter) = &self.submitter else {
            tracing::debug!("Transport: frame submission unavailable");
            return;
        };
        let time = sink.current_time();
        tracing::debug!("Transport: submitting frame at {:.3}s", time);
        self.pending
            .push(PendingSubmission::new(submitter.submit(time), time, generation));
    }

    /// Emits notifications for completed submissions. Returns how many completed.
    ///
    /// `generation` is the current source generation. A submission issued
    /// against an earlier source still only notifies.
    pub fn poll_submissions(&mut self, generation: u64) -> usize {
        let notifier = &self.notifier;
        let before = self.pending.len();
        self.pending.retain(|pending| match pending.poll() {
            Some(notification) => {
                if pending.generation() != generation {
                    tracing::debug!(
                        "Transport: frame at {:.3}s completed after a source change (generation {} -> {})",
                        pending.time_secs(),
                        pending.generation(),
                        generation
                    );
                }
                notifier.notify(notification);
                false
            }
            None => true,
        });
        before - self.pending.len()
    }

    /// Drops in-flight submissions without notifying.
    pub fn abandon_submissions(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(
                "Transport: abandoning {} in-flight frame submissions",
                self.pending.len()
            );
        }
        self.pending.clear();
    }

    /// Refreshes observed state from a sink event and returns the outward event.
    ///
    /// `SinkEvent::Error` is not handled here; it belongs to source selection.
    pub fn observe<S: MediaSink>(&mut self, sink: &S, event: SinkEvent) -> Option<PlayerEvent> {
        match event {
            SinkEvent::VolumeChange => {
                self.observed.volume = sink.volume();
                self.observed.muted = sink.muted();
                Some(PlayerEvent::VolumeChanged {
                    volume: self.observed.volume,
                    muted: self.observed.muted,
                })
            }
            SinkEvent::TimeUpdate => {
                self.observed.current_time = sink.current_time();
                self.observed.playback_rate = sink.playback_rate();
                Some(PlayerEvent::TimeUpdated(self.observed.current_time))
            }
            SinkEvent::LoadedMetadata => {
                let resolution = sink.video_size();
                self.observed.resolution = Some(resolution);
                self.observed.metadata_loaded = true;
                Some(PlayerEvent::ResolutionChanged(resolution))
            }
            SinkEvent::LoadedData => Some(PlayerEvent::Loaded),
            SinkEvent::Playing => {
                self.observed.playing = true;
                Some(PlayerEvent::Playing)
            }
            SinkEvent::Pause => {
                self.observed.playing = false;
                Some(PlayerEvent::Paused)
            }
            SinkEvent::Ended => {
                self.observed.playing = false;
                Some(PlayerEvent::Ended)
            }
            SinkEvent::Error(_) => None,
        }
    }
}
