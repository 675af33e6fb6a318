//! Enrollment event model.
//!
//! Events are produced by the platform enrollment callback and consumed by
//! the UI state machines. Ordering is whatever the producer delivers; no
//! reordering or buffering is performed beyond passthrough.

use serde::{Deserialize, Serialize};

/// A single event in an enrollment session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnrollEvent {
    /// One enrollment step was captured. `total` is inferred by the adapter
    /// (see [`crate::progress::ProgressTracker`]); `remaining == 0` is terminal.
    Progress { remaining: u32, total: u32 },
    /// Recoverable guidance from the sensor ("move your finger", etc.).
    Help { msg_id: i32, msg: String },
    /// Terminal failure reported by the platform. Ends the session; retry is
    /// a new enrollment call, never automatic.
    Error { msg_id: i32, msg: String },
    /// The physical touch started on the given sensor.
    PointerDown { sensor_id: i32 },
    /// The physical touch ended.
    PointerUp { sensor_id: i32 },
    /// The sensor overlay became visible.
    OverlayShown,
    /// An image was acquired; `is_good` reflects platform quality vetting.
    Acquired { is_good: bool },
}

impl EnrollEvent {
    /// Whether this event ends the session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EnrollEvent::Progress { remaining: 0, .. } | EnrollEvent::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_events() {
        assert!(EnrollEvent::Progress { remaining: 0, total: 5 }.is_terminal());
        assert!(EnrollEvent::Error { msg_id: 3, msg: "too many attempts".into() }.is_terminal());
    }

    #[test]
    fn test_non_terminal_events() {
        assert!(!EnrollEvent::Progress { remaining: 1, total: 5 }.is_terminal());
        assert!(!EnrollEvent::Help { msg_id: 1, msg: "press harder".into() }.is_terminal());
        assert!(!EnrollEvent::PointerDown { sensor_id: 0 }.is_terminal());
        assert!(!EnrollEvent::OverlayShown.is_terminal());
        assert!(!EnrollEvent::Acquired { is_good: true }.is_terminal());
    }
}
