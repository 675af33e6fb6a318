//! Enrollment progress accounting.

use serde::{Deserialize, Serialize};

/// A (remaining, total) pair for one enrollment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentProgress {
    /// Steps still required.
    pub remaining: u32,
    /// Total steps for the session.
    pub total: u32,
}

impl EnrollmentProgress {
    /// Completed fraction in [0, 1].
    pub fn fraction(&self) -> f32 {
        let done = self.total.saturating_sub(self.remaining);
        done as f32 / self.total.max(1) as f32
    }

    /// Whether all steps have been captured.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Derives `total` for a session whose platform callback only reports the
/// remaining step count.
///
/// `total` is taken as the FIRST reported `remaining + 1`. This is a
/// workaround for an API that does not report the total directly; it is a
/// known imprecision kept for compatibility, not a guaranteed contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressTracker {
    total: Option<u32>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one `remaining` report into the running progress.
    pub fn on_remaining(&mut self, remaining: u32) -> EnrollmentProgress {
        let total = *self.total.get_or_insert(remaining + 1);
        EnrollmentProgress { remaining, total }
    }

    /// Total steps, once known.
    pub fn total(&self) -> Option<u32> {
        self.total
    }
}
