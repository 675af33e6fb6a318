//! Platform enrollment service boundary.
//!
//! The fingerprint HAL is an opaque collaborator: one fire-and-forget
//! `enroll` call per session, progress reported through a callback object on
//! a thread of the platform's choosing, and a cancel handle signaled at most
//! once by the session layer.

use std::sync::Arc;

use parking_lot::Mutex;
use ridge_core::progress::ProgressTracker;
use ridge_core::EnrollEvent;
use tokio::sync::mpsc;
use tracing::warn;

use crate::reason::EnrollReason;
use crate::session::SessionState;
use crate::token::HardwareAuthToken;

/// Platform handle aborting an in-flight session.
pub trait CancelHandle: Send + Sync {
    /// The session layer guarantees at most one invocation per session, and
    /// none after a terminal event was delivered.
    fn cancel(&self);
}

/// The platform fingerprint enrollment service.
pub trait EnrollmentHal: Send + Sync + 'static {
    /// Start one enrollment session. Fire-and-forget: invoked once per
    /// session and never retried by this layer; platform-reported errors
    /// come back as terminal events through `callback`.
    fn enroll(
        &self,
        token: &HardwareAuthToken,
        user_id: u32,
        reason: EnrollReason,
        callback: HalCallback,
    ) -> Arc<dyn CancelHandle>;
}

/// Callback object handed to the platform.
///
/// Mirrors the platform enrollment callback contract and forwards every
/// report into the session channel. The channel is the thread handoff:
/// whatever thread the platform calls from, consumers only ever see events
/// on their own task.
pub struct HalCallback {
    tx: mpsc::Sender<EnrollEvent>,
    tracker: Mutex<ProgressTracker>,
    session: Arc<SessionState>,
}

impl HalCallback {
    pub(crate) fn new(tx: mpsc::Sender<EnrollEvent>, session: Arc<SessionState>) -> Self {
        Self { tx, tracker: Mutex::new(ProgressTracker::new()), session }
    }

    /// One step captured; the platform reports only the remaining count, the
    /// total is inferred by the tracker.
    pub fn on_enrollment_progress(&self, remaining: u32) {
        let progress = self.tracker.lock().on_remaining(remaining);
        if progress.is_complete() {
            self.session.complete_naturally();
        }
        self.deliver(EnrollEvent::Progress {
            remaining: progress.remaining,
            total: progress.total,
        });
    }

    pub fn on_enrollment_help(&self, msg_id: i32, msg: impl Into<String>) {
        self.deliver(EnrollEvent::Help { msg_id, msg: msg.into() });
    }

    /// Terminal platform failure. Ends the session; retry is a new enroll
    /// call, never automatic.
    pub fn on_enrollment_error(&self, msg_id: i32, msg: impl Into<String>) {
        self.session.complete_naturally();
        self.deliver(EnrollEvent::Error { msg_id, msg: msg.into() });
    }

    pub fn on_pointer_down(&self, sensor_id: i32) {
        self.deliver(EnrollEvent::PointerDown { sensor_id });
    }

    pub fn on_pointer_up(&self, sensor_id: i32) {
        self.deliver(EnrollEvent::PointerUp { sensor_id });
    }

    pub fn on_overlay_shown(&self) {
        self.deliver(EnrollEvent::OverlayShown);
    }

    pub fn on_acquired(&self, is_good: bool) {
        self.deliver(EnrollEvent::Acquired { is_good });
    }

    /// At-most-once, best-effort delivery: a consumer that is not draining
    /// loses the event; nothing is queued, retried, or replayed.
    fn deliver(&self, event: EnrollEvent) {
        if self.tx.try_send(event).is_err() {
            warn!("enrollment event dropped: consumer not draining");
        }
    }
}
