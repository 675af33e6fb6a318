//! Enrollment stages.
//!
//! An enrollment run walks the finger through placement stages: centered
//! touches first, then guided offsets, then fingertip and edge captures.
//! Stage boundaries are fractions of the total step count supplied by the
//! platform sensor configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::progress::EnrollmentProgress;

/// Placement stage for the current enrollment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollStage {
    /// No progress event has been seen yet.
    Unknown,
    Center,
    Guided,
    Fingertip,
    LeftEdge,
    RightEdge,
}

impl EnrollStage {
    /// Guided-point offsets only apply during the guided stage.
    pub fn is_guided(&self) -> bool {
        matches!(self, EnrollStage::Guided)
    }
}

/// Per-stage boundary fractions of the total step count, ascending in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageThresholds {
    fractions: [f32; 4],
}

impl Default for StageThresholds {
    fn default() -> Self {
        Self { fractions: [0.25, 0.5, 0.75, 0.875] }
    }
}

impl StageThresholds {
    pub fn new(fractions: [f32; 4]) -> Result<Self> {
        let ascending = fractions.windows(2).all(|w| w[0] <= w[1]);
        let in_range = fractions.iter().all(|f| (0.0..=1.0).contains(f));
        if !ascending || !in_range {
            return Err(CoreError::InvalidThresholds(format!("{fractions:?}")));
        }
        Ok(Self { fractions })
    }

    /// Step count at which the given stage boundary is crossed.
    pub fn threshold_steps(&self, total: u32, index: usize) -> u32 {
        (total as f32 * self.fractions[index]).round() as u32
    }

    /// The stage for the given progress; `None` maps to [`EnrollStage::Unknown`].
    pub fn stage_for(&self, progress: Option<EnrollmentProgress>) -> EnrollStage {
        let Some(progress) = progress else {
            return EnrollStage::Unknown;
        };
        let done = progress.total.saturating_sub(progress.remaining);
        if done < self.threshold_steps(progress.total, 0) {
            EnrollStage::Center
        } else if done < self.threshold_steps(progress.total, 1) {
            EnrollStage::Guided
        } else if done < self.threshold_steps(progress.total, 2) {
            EnrollStage::Fingertip
        } else if done < self.threshold_steps(progress.total, 3) {
            EnrollStage::LeftEdge
        } else {
            EnrollStage::RightEdge
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(remaining: u32, total: u32) -> Option<EnrollmentProgress> {
        Some(EnrollmentProgress { remaining, total })
    }

    #[test]
    fn test_stage_walk() {
        let thresholds = StageThresholds::default();
        // 16 steps: boundaries at 4, 8, 12, 14
        assert_eq!(thresholds.stage_for(progress(16, 16)), EnrollStage::Center);
        assert_eq!(thresholds.stage_for(progress(13, 16)), EnrollStage::Center);
        assert_eq!(thresholds.stage_for(progress(12, 16)), EnrollStage::Guided);
        assert_eq!(thresholds.stage_for(progress(9, 16)), EnrollStage::Guided);
        assert_eq!(thresholds.stage_for(progress(8, 16)), EnrollStage::Fingertip);
        assert_eq!(thresholds.stage_for(progress(4, 16)), EnrollStage::LeftEdge);
        assert_eq!(thresholds.stage_for(progress(2, 16)), EnrollStage::RightEdge);
        assert_eq!(thresholds.stage_for(progress(0, 16)), EnrollStage::RightEdge);
    }

    #[test]
    fn test_unknown_before_first_progress() {
        assert_eq!(StageThresholds::default().stage_for(None), EnrollStage::Unknown);
    }

    #[test]
    fn test_rejects_descending_thresholds() {
        assert!(StageThresholds::new([0.5, 0.25, 0.75, 0.875]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_thresholds() {
        assert!(StageThresholds::new([0.25, 0.5, 0.75, 1.5]).is_err());
    }

    #[test]
    fn test_threshold_steps_round() {
        let thresholds = StageThresholds::default();
        // 10 steps at 0.875 rounds to 9, not 8
        assert_eq!(thresholds.threshold_steps(10, 3), 9);
    }
}
