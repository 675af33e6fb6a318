//! Event fan-out.
//!
//! The icon and the progress ring each need every event: fan-out, not
//! queue-consume. One pump task re-broadcasts the session stream to all
//! observers; a lagging observer loses its oldest events with a warning
//! rather than stalling the rest.

use ridge_core::EnrollEvent;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::warn;

use crate::session::EnrollmentStream;

/// Broadcast buffer per observer.
pub const FANOUT_BUFFER: usize = 32;

/// Re-broadcasts one session's events to any number of observers.
pub struct EventFanout {
    tx: broadcast::Sender<EnrollEvent>,
    pump: JoinHandle<()>,
}

impl EventFanout {
    /// Spawn the pump for `stream`. Subscribe observers before the first
    /// event is produced; delivery is loss-tolerant, so events broadcast
    /// with no observer listening are simply gone.
    ///
    /// Dropping the fanout aborts the pump and with it the stream, which
    /// carries the usual abandonment semantics.
    pub fn spawn(mut stream: EnrollmentStream) -> Self {
        let (tx, _) = broadcast::channel(FANOUT_BUFFER);
        let pump_tx = tx.clone();
        let pump = tokio::spawn(async move {
            while let Some(event) = stream.next().await {
                let terminal = event.is_terminal();
                let _ = pump_tx.send(event);
                if terminal {
                    break;
                }
            }
        });
        Self { tx, pump }
    }

    pub fn subscribe(&self) -> EventObserver {
        EventObserver { rx: self.tx.subscribe() }
    }
}

impl Drop for EventFanout {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// One observer's view of the session. Every observer sees every event the
/// session produces while it keeps up.
pub struct EventObserver {
    rx: broadcast::Receiver<EnrollEvent>,
}

impl EventObserver {
    /// Next event, skipping past any lost to lag. Consumers should stop at
    /// a terminal event; `None` only once the fanout itself is dropped and
    /// the buffer drained.
    pub async fn recv(&mut self) -> Option<EnrollEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "observer lagging, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
