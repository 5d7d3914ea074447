//! Frame submission and user notifications.
//!
//! Submission is the only asynchronous operation in the player. It is issued
//! as a [`Promise`] and polled from the host update loop; completion only ever
//! produces a notification, so a late response cannot disturb playback.

use poll_promise::Promise;

use crate::error::PlayerError;

/// Result of a frame submission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitResponse {
    /// HTTP status code
    pub status: u16,
}

impl SubmitResponse {
    /// Creates a response with the given status.
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// Only a 200 counts as success.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Remote operation that stores the frame shown at a given stream time.
pub trait FrameSubmitter {
    /// Submits the frame at `time_secs`. Transport failures resolve to `Err`.
    fn submit(&self, time_secs: f64) -> Promise<Result<SubmitResponse, PlayerError>>;
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A fire-and-forget message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Human-readable text
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// User-visible notification sink (toasts in the browser UI).
pub trait Notifier {
    /// Shows a notification. Must not block.
    fn notify(&self, notification: Notification);
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("{}", notification.message),
            NotificationLevel::Error => tracing::warn!("{}", notification.message),
        }
    }
}

/// A submission still in flight.
pub struct PendingSubmission {
    promise: Promise<Result<SubmitResponse, PlayerError>>,
    /// Stream time of the submitted frame
    time_secs: f64,
    /// Source generation when the request was issued
    generation: u64,
}

impl PendingSubmission {
    /// Wraps an issued request.
    pub fn new(
        promise: Promise<Result<SubmitResponse, PlayerError>>,
        time_secs: f64,
        generation: u64,
    ) -> Self {
        Self {
            promise,
            time_secs,
            generation,
        }
    }

    /// Stream time of the submitted frame.
    pub fn time_secs(&self) -> f64 {
        self.time_secs
    }

    /// Source generation when the request was issued.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the notification for a completed request, or None while pending.
    pub fn poll(&self) -> Option<Notification> {
        self.promise.ready().map(outcome_notification)
    }
}

/// Maps a submission outcome to the notification shown to the user.
pub fn outcome_notification(outcome: &Result<SubmitResponse, PlayerError>) -> Notification {
    match outcome {
        Ok(response) if response.is_success() => {
            Notification::success("Successfully submitted frame.")
        }
        Ok(response) => {
            tracing::warn!("Frame submission returned status {}", response.status);
            Notification::error("Failed to submit frame.")
        }
        Err(e) => {
            tracing::warn!("Frame submission failed: {}", e);
            Notification::error("Failed to submit frame.")
        }
    }
}
