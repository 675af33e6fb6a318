//! Enrollment sessions.
//!
//! One [`Enroller`] guards one sensor for one user: at most one session is
//! outstanding at a time, enforced as a bounded best-effort wait rather than
//! a mutex. Abandoning the returned stream is the sole cancellation trigger
//! and translates to exactly one platform-level cancel signal.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use parking_lot::Mutex;
use ridge_core::EnrollEvent;
use tokio::sync::{mpsc, Notify};
use tokio::time::timeout;
use tokio_stream::Stream;
use tracing::{debug, warn};

use crate::error::{EnrollError, Result};
use crate::hal::{CancelHandle, EnrollmentHal, HalCallback};
use crate::reason::EnrollReason;
use crate::token::HardwareAuthToken;

/// Session channel capacity. Events past a full buffer are dropped, not
/// queued (at-most-once delivery).
pub const EVENT_BUFFER: usize = 32;

/// Bounded wait before starting over an outstanding session.
pub const SESSION_BACKOFF: Duration = Duration::from_millis(150);

/// How a session ended, read by the cancellation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Events still flowing.
    Ongoing,
    /// A terminal event (last step or platform error) was delivered.
    CompletedNaturally,
    /// The consumer abandoned the stream before a terminal event.
    Abandoned,
}

/// Shared per-session bookkeeping. The outcome is mutated under a single
/// lock; the cancel slot is emptied on first use so the handle can never be
/// signaled twice.
pub(crate) struct SessionState {
    outcome: Mutex<SessionOutcome>,
    cancel: Mutex<Option<Arc<dyn CancelHandle>>>,
    done: AtomicBool,
    finished: Notify,
}

impl SessionState {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(SessionOutcome::Ongoing),
            cancel: Mutex::new(None),
            done: AtomicBool::new(false),
            finished: Notify::new(),
        })
    }

    fn set_cancel(&self, handle: Arc<dyn CancelHandle>) {
        *self.cancel.lock() = Some(handle);
    }

    pub(crate) fn outcome(&self) -> SessionOutcome {
        *self.outcome.lock()
    }

    /// Called by the HAL callback when a terminal event is delivered.
    pub(crate) fn complete_naturally(&self) {
        let mut outcome = self.outcome.lock();
        if *outcome == SessionOutcome::Ongoing {
            *outcome = SessionOutcome::CompletedNaturally;
            drop(outcome);
            self.mark_done();
        }
    }

    /// Called when the consumer walks away. Signals the platform cancel
    /// exactly once; a no-op after natural completion or a prior abandon.
    pub(crate) fn abandon(&self) {
        let handle = {
            let mut outcome = self.outcome.lock();
            if *outcome != SessionOutcome::Ongoing {
                return;
            }
            *outcome = SessionOutcome::Abandoned;
            self.cancel.lock().take()
        };
        if let Some(handle) = handle {
            debug!("abandoned before terminal event, signaling platform cancel");
            handle.cancel();
        }
        self.mark_done();
    }

    fn mark_done(&self) {
        self.done.store(true, Ordering::SeqCst);
        self.finished.notify_waiters();
    }

    fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

/// Starts enrollment sessions against one sensor for one user.
pub struct Enroller<H: EnrollmentHal> {
    hal: Arc<H>,
    user_id: u32,
    current: Mutex<Option<Arc<SessionState>>>,
}

impl<H: EnrollmentHal> Enroller<H> {
    pub fn new(hal: Arc<H>, user_id: u32) -> Self {
        Self { hal, user_id, current: Mutex::new(None) }
    }

    /// Whether a session is outstanding.
    pub fn is_enrolling(&self) -> bool {
        self.current.lock().as_ref().is_some_and(|s| !s.is_done())
    }

    /// Start one enrollment session and return its event stream.
    ///
    /// The platform call is issued exactly once; if a prior session has not
    /// finished yet, this waits up to [`SESSION_BACKOFF`] and then proceeds
    /// regardless (warn-logged, never an error and never an unbounded
    /// block).
    pub async fn enroll(
        &self,
        token: &HardwareAuthToken,
        reason: EnrollReason,
    ) -> Result<EnrollmentStream> {
        if token.is_empty() {
            return Err(EnrollError::TokenMissing);
        }
        self.wait_for_prior_session().await;

        let state = SessionState::new();
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let callback = HalCallback::new(tx, state.clone());
        let handle = self.hal.enroll(token, self.user_id, reason, callback);
        state.set_cancel(handle);
        *self.current.lock() = Some(state.clone());
        debug!(user_id = self.user_id, ?reason, "enrollment session started");
        Ok(EnrollmentStream { rx, state })
    }

    async fn wait_for_prior_session(&self) {
        let prior = self.current.lock().clone();
        let Some(prior) = prior else { return };
        if prior.is_done() {
            return;
        }
        // Best-effort guard, not a mutex: a completion racing past the
        // registration below just costs the full wait.
        if timeout(SESSION_BACKOFF, prior.finished.notified()).await.is_err() {
            warn!(
                "prior enrollment session still outstanding after {:?}, proceeding",
                SESSION_BACKOFF
            );
        }
    }
}

/// Single-consumer stream of one session's events.
///
/// Dropping (or explicitly abandoning) the stream before a terminal event
/// signals the platform cancel handle exactly once; after natural completion
/// both are guarded no-ops.
pub struct EnrollmentStream {
    rx: mpsc::Receiver<EnrollEvent>,
    state: Arc<SessionState>,
}

impl EnrollmentStream {
    /// Abandon the session now. Idempotent; also implied by drop.
    pub fn abandon(&self) {
        self.state.abandon();
    }

    pub fn outcome(&self) -> SessionOutcome {
        self.state.outcome()
    }
}

impl Stream for EnrollmentStream {
    type Item = EnrollEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for EnrollmentStream {
    fn drop(&mut self) {
        self.state.abandon();
    }
}
