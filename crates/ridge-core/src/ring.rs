//! Progress ring state machine.
//!
//! Headless model of the enrollment progress ring: transitions consume
//! platform events and return animation commands as data. A renderer drives
//! the commands on its own thread; the machine never owns a clock, and all
//! mutation happens through these transition functions on the owner's
//! thread.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::progress::EnrollmentProgress;

/// Fill advance per progress step.
pub const FILL_ANIM: Duration = Duration::from_millis(400);
/// Forward-then-reverse help flash.
pub const FLASH_ANIM: Duration = Duration::from_millis(350);
/// Pause between the last step landing and the checkmark growing in.
pub const CHECKMARK_DELAY: Duration = Duration::from_millis(200);
/// Checkmark grow-in.
pub const CHECKMARK_ANIM: Duration = Duration::from_millis(300);

/// ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

/// Themed colors supplied by the hosting view's style attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingPalette {
    pub fill: Color,
    pub background: Color,
    pub help_flash: Color,
    /// Distinct high-contrast flash used while a screen reader is active.
    pub help_flash_high_contrast: Color,
    pub checkmark: Color,
}

impl Default for RingPalette {
    fn default() -> Self {
        Self {
            fill: Color(0xFF4285F4),
            background: Color(0x26FFFFFF),
            help_flash: Color(0xFFEA4335),
            help_flash_high_contrast: Color(0xFFFFDE03),
            checkmark: Color(0xFF34A853),
        }
    }
}

/// Ring lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingState {
    /// No progress yet.
    Idle,
    /// Advancing per step.
    InProgress,
    /// All steps captured; checkmark growing in.
    Completing,
    /// Checkmark shown, completion signaled.
    Done,
}

/// Which arc a help flash colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashArc {
    Fill,
    Background,
}

/// An animation for the renderer to drive.
#[derive(Debug, Clone, PartialEq)]
pub enum RingCommand {
    /// Animate the fill fraction from `from` to `to`.
    Fill { from: f32, to: f32, duration: Duration },
    /// Symmetric forward-then-reverse color flash; the arc reverts to its
    /// nominal color when the reverse leg ends.
    Flash { arc: FlashArc, color: Color, duration: Duration },
    /// Grow the checkmark in with overshoot after `delay`.
    Checkmark { delay: Duration, duration: Duration, color: Color },
}

/// Saved ring state for view recreation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingSnapshot {
    state: RingState,
    progress: f32,
    completion_signaled: bool,
}

/// The enrollment progress ring.
pub struct ProgressRing {
    palette: RingPalette,
    accessibility_enabled: bool,
    state: RingState,
    progress: f32,
    last: Option<(u32, u32)>,
    restoring: bool,
    anim_starts: u64,
    completion_signaled: bool,
    on_complete: Option<Box<dyn FnMut() + Send>>,
}

impl fmt::Debug for ProgressRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressRing")
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("last", &self.last)
            .field("anim_starts", &self.anim_starts)
            .finish()
    }
}

impl ProgressRing {
    pub fn new(palette: RingPalette) -> Self {
        Self {
            palette,
            accessibility_enabled: false,
            state: RingState::Idle,
            progress: 0.0,
            last: None,
            restoring: false,
            anim_starts: 0,
            completion_signaled: false,
            on_complete: None,
        }
    }

    /// Rebuild from saved state. The next state application runs with
    /// zero-duration animations so already-seen progress does not replay;
    /// normal durations resume afterwards.
    pub fn restore(palette: RingPalette, snapshot: RingSnapshot) -> Self {
        let mut ring = Self::new(palette);
        ring.state = snapshot.state;
        ring.progress = snapshot.progress;
        ring.completion_signaled = snapshot.completion_signaled;
        ring.restoring = true;
        ring
    }

    pub fn snapshot(&self) -> RingSnapshot {
        RingSnapshot {
            state: self.state,
            progress: self.progress,
            completion_signaled: self.completion_signaled,
        }
    }

    pub fn set_accessibility_enabled(&mut self, enabled: bool) {
        self.accessibility_enabled = enabled;
    }

    /// Invoked exactly once, after the checkmark has grown in.
    pub fn set_on_complete(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn state(&self) -> RingState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Number of animations started so far. Duplicate platform callbacks
    /// must not grow this.
    pub fn animation_starts(&self) -> u64 {
        self.anim_starts
    }

    /// Fold one progress report into the ring.
    pub fn on_progress(&mut self, remaining: u32, total: u32) -> Vec<RingCommand> {
        if matches!(self.state, RingState::Completing | RingState::Done) {
            return Vec::new();
        }
        if self.last == Some((remaining, total)) {
            // Duplicate platform callback; never re-trigger the animation.
            return Vec::new();
        }
        self.last = Some((remaining, total));

        let target = EnrollmentProgress { remaining, total }.fraction();
        let duration = if self.restoring { Duration::ZERO } else { FILL_ANIM };
        self.restoring = false;

        let mut commands = Vec::new();
        if target != self.progress {
            commands.push(RingCommand::Fill { from: self.progress, to: target, duration });
            self.anim_starts += 1;
            self.progress = target;
        }

        if remaining == 0 {
            self.state = RingState::Completing;
            commands.push(RingCommand::Checkmark {
                delay: CHECKMARK_DELAY,
                duration: CHECKMARK_ANIM,
                color: self.palette.checkmark,
            });
            self.anim_starts += 1;
        } else {
            self.state = RingState::InProgress;
        }
        commands
    }

    /// Renderer acknowledgement that the checkmark finished growing in.
    pub fn on_checkmark_shown(&mut self) {
        if self.state != RingState::Completing {
            return;
        }
        self.state = RingState::Done;
        if !self.completion_signaled {
            self.completion_signaled = true;
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        }
    }

    /// Fold one help report into the ring.
    ///
    /// Before the first captured step the fill arc is still empty, so the
    /// flash lands on the background arc instead. Accessibility swaps the
    /// flash color only; timing is unchanged.
    pub fn on_help(&mut self) -> RingCommand {
        let arc = if self.at_idle_boundary() {
            FlashArc::Background
        } else {
            FlashArc::Fill
        };
        let color = if self.accessibility_enabled {
            self.palette.help_flash_high_contrast
        } else {
            self.palette.help_flash
        };
        self.anim_starts += 1;
        RingCommand::Flash { arc, color, duration: FLASH_ANIM }
    }

    fn at_idle_boundary(&self) -> bool {
        match self.last {
            None => true,
            Some((remaining, total)) => remaining == total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_fill_advances_per_step() {
        let mut ring = ProgressRing::new(RingPalette::default());
        let commands = ring.on_progress(4, 5);
        assert_eq!(
            commands,
            vec![RingCommand::Fill { from: 0.0, to: 0.2, duration: FILL_ANIM }]
        );
        assert_eq!(ring.state(), RingState::InProgress);
    }

    #[test]
    fn test_duplicate_progress_is_noop() {
        let mut ring = ProgressRing::new(RingPalette::default());
        ring.on_progress(3, 5);
        let starts = ring.animation_starts();
        assert_eq!(starts, 1);

        let commands = ring.on_progress(3, 5);
        assert!(commands.is_empty());
        assert_eq!(ring.animation_starts(), starts);
    }

    #[test]
    fn test_completion_sequence() {
        let mut ring = ProgressRing::new(RingPalette::default());
        let completions = Arc::new(AtomicU32::new(0));
        let counter = completions.clone();
        ring.set_on_complete(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut fractions = Vec::new();
        for remaining in [4, 3, 2, 1, 0] {
            ring.on_progress(remaining, 5);
            fractions.push(ring.progress());
        }
        assert_eq!(fractions, vec![0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ring.state(), RingState::Completing);

        // Completion is only signaled once the checkmark has grown in,
        // and only once no matter how often the renderer acknowledges.
        assert_eq!(completions.load(Ordering::SeqCst), 0);
        ring.on_checkmark_shown();
        ring.on_checkmark_shown();
        assert_eq!(ring.state(), RingState::Done);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_checkmark_command_timing() {
        let mut ring = ProgressRing::new(RingPalette::default());
        let commands = ring.on_progress(0, 1);
        assert_eq!(commands.len(), 2);
        match &commands[1] {
            RingCommand::Checkmark { delay, duration, .. } => {
                assert_eq!(*delay, CHECKMARK_DELAY);
                assert_eq!(*duration, CHECKMARK_ANIM);
            }
            other => panic!("expected checkmark, got {other:?}"),
        }
    }

    #[test]
    fn test_progress_after_completion_ignored() {
        let mut ring = ProgressRing::new(RingPalette::default());
        ring.on_progress(0, 5);
        assert!(ring.on_progress(2, 5).is_empty());
    }

    #[test]
    fn test_help_flashes_background_before_first_step() {
        let mut ring = ProgressRing::new(RingPalette::default());
        let flash = ring.on_help();
        assert!(matches!(flash, RingCommand::Flash { arc: FlashArc::Background, .. }));

        // Platform can report remaining == total before any capture lands
        ring.on_progress(5, 5);
        let flash = ring.on_help();
        assert!(matches!(flash, RingCommand::Flash { arc: FlashArc::Background, .. }));
    }

    #[test]
    fn test_help_flashes_fill_after_progress() {
        let mut ring = ProgressRing::new(RingPalette::default());
        ring.on_progress(4, 5);
        match ring.on_help() {
            RingCommand::Flash { arc, duration, .. } => {
                assert_eq!(arc, FlashArc::Fill);
                assert_eq!(duration, FLASH_ANIM);
            }
            other => panic!("expected flash, got {other:?}"),
        }
    }

    #[test]
    fn test_accessibility_changes_flash_color_only() {
        let palette = RingPalette::default();
        let mut ring = ProgressRing::new(palette);
        ring.set_accessibility_enabled(true);
        match ring.on_help() {
            RingCommand::Flash { color, duration, .. } => {
                assert_eq!(color, palette.help_flash_high_contrast);
                assert_eq!(duration, FLASH_ANIM);
            }
            other => panic!("expected flash, got {other:?}"),
        }
    }

    #[test]
    fn test_restore_applies_next_state_without_animation() {
        let mut ring = ProgressRing::new(RingPalette::default());
        ring.on_progress(3, 5);
        let snapshot = ring.snapshot();

        let mut restored = ProgressRing::restore(RingPalette::default(), snapshot);
        assert_eq!(restored.progress(), 0.4);

        // Replaying the saved event emits nothing new
        assert!(restored.on_progress(3, 5).is_empty());

        // A replay that differs applies instantly, then durations recover
        let mut restored = ProgressRing::restore(RingPalette::default(), snapshot);
        let commands = restored.on_progress(2, 5);
        assert_eq!(
            commands,
            vec![RingCommand::Fill { from: 0.4, to: 0.6, duration: Duration::ZERO }]
        );
        let commands = restored.on_progress(1, 5);
        assert_eq!(
            commands,
            vec![RingCommand::Fill { from: 0.6, to: 0.8, duration: FILL_ANIM }]
        );
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut ring = ProgressRing::new(RingPalette::default());
        ring.on_progress(2, 5);
        let encoded = serde_json::to_string(&ring.snapshot()).unwrap();
        let decoded: RingSnapshot = serde_json::from_str(&encoded).unwrap();
        let restored = ProgressRing::restore(RingPalette::default(), decoded);
        assert_eq!(restored.progress(), ring.progress());
        assert_eq!(restored.state(), ring.state());
    }
}
