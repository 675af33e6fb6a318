//! Sensor icon position animator.
//!
//! Moves the fingerprint icon between its neutral position over the sensor
//! and the currently-selected guided point, pulsing scale while travelling
//! outward. Pointer-down hides the icon so it never fights the system touch
//! feedback.

use std::sync::Arc;
use std::time::Duration;

use crate::geometry::{select_index, GuidedPointTable, Point, SensorRect};

/// Travel to a guided point.
pub const MOVE_TO_TARGET: Duration = Duration::from_millis(800);
/// Shorter travel back to neutral.
pub const MOVE_TO_NEUTRAL: Duration = Duration::from_millis(600);
/// Peak of the sine-shaped scale pulse, on top of 1.0.
pub const SCALE_PULSE_MAX: f32 = 0.25;

/// Position easing applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    AccelerateDecelerate,
}

/// A movement for the renderer to drive. Offsets are relative to the sensor
/// center.
#[derive(Debug, Clone, PartialEq)]
pub struct IconCommand {
    pub from: Point,
    pub to: Point,
    pub duration: Duration,
    pub easing: Easing,
    /// Sine-shaped scale pulse up to `1.0 + SCALE_PULSE_MAX` and back over
    /// the same duration. Only set while moving outward to a guided point.
    pub pulse: bool,
}

/// The enrollment sensor icon.
#[derive(Debug, Clone)]
pub struct EnrollIcon {
    table: Arc<GuidedPointTable>,
    accessibility_enabled: bool,
    guided_enabled: bool,
    sensor: Option<SensorRect>,
    position: Point,
    draw_enabled: bool,
    anim_starts: u64,
}

impl EnrollIcon {
    /// The table is shared read-only; it is never recomputed per call.
    pub fn new(table: Arc<GuidedPointTable>) -> Self {
        Self {
            table,
            accessibility_enabled: false,
            guided_enabled: false,
            sensor: None,
            position: Point::ZERO,
            draw_enabled: true,
            anim_starts: 0,
        }
    }

    pub fn set_accessibility_enabled(&mut self, enabled: bool) {
        self.accessibility_enabled = enabled;
    }

    /// Toggled by the session layer as the guided stage starts and ends.
    pub fn set_guided_enabled(&mut self, enabled: bool) {
        self.guided_enabled = enabled;
    }

    /// Set once per layout pass by the hosting view.
    pub fn set_sensor_rect(&mut self, rect: SensorRect) {
        self.sensor = Some(rect);
    }

    pub fn sensor_rect(&self) -> Option<SensorRect> {
        self.sensor
    }

    /// Current rendered offset relative to the sensor center.
    pub fn position(&self) -> Point {
        self.position
    }

    /// False while the physical touch is active.
    pub fn should_draw(&self) -> bool {
        self.draw_enabled
    }

    pub fn animation_starts(&self) -> u64 {
        self.anim_starts
    }

    /// Fold one progress report into the icon position.
    ///
    /// Returns `None` when the target equals the current position, so a
    /// stationary icon never churns zero-length animators.
    pub fn on_progress(&mut self, remaining: u32, total: u32) -> Option<IconCommand> {
        let index = select_index(remaining, total);
        let target =
            self.table
                .offset_for(index, self.accessibility_enabled, self.guided_enabled);
        if target == self.position {
            return None;
        }

        let to_neutral = target == Point::ZERO;
        let command = IconCommand {
            from: self.position,
            to: target,
            duration: if to_neutral { MOVE_TO_NEUTRAL } else { MOVE_TO_TARGET },
            easing: Easing::AccelerateDecelerate,
            pulse: !to_neutral,
        };
        self.position = target;
        self.anim_starts += 1;
        Some(command)
    }

    pub fn on_pointer_down(&mut self) {
        self.draw_enabled = false;
    }

    pub fn on_pointer_up(&mut self) {
        self.draw_enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PxPerMm;
    use pretty_assertions::assert_eq;

    fn icon() -> EnrollIcon {
        let table = GuidedPointTable::classic(PxPerMm::new(2.0).unwrap());
        let mut icon = EnrollIcon::new(Arc::new(table));
        icon.set_guided_enabled(true);
        icon
    }

    #[test]
    fn test_moves_to_guided_point_with_pulse() {
        let mut icon = icon();
        let command = icon.on_progress(9, 10).expect("should move");
        assert_eq!(command.from, Point::ZERO);
        assert_ne!(command.to, Point::ZERO);
        assert_eq!(command.duration, MOVE_TO_TARGET);
        assert!(command.pulse);
        assert_eq!(icon.position(), command.to);
    }

    #[test]
    fn test_returns_to_neutral_without_pulse() {
        let mut icon = icon();
        icon.on_progress(9, 10).expect("should move");

        // Guidance ends; the next step targets neutral
        icon.set_guided_enabled(false);
        let command = icon.on_progress(8, 10).expect("should move back");
        assert_eq!(command.to, Point::ZERO);
        assert_eq!(command.duration, MOVE_TO_NEUTRAL);
        assert!(!command.pulse);
    }

    #[test]
    fn test_stationary_target_emits_nothing() {
        let mut icon = icon();
        icon.set_guided_enabled(false);

        // Neutral to neutral: no animator churn
        assert_eq!(icon.on_progress(9, 10), None);
        assert_eq!(icon.animation_starts(), 0);
    }

    #[test]
    fn test_accessibility_pins_icon_to_neutral() {
        let mut icon = icon();
        icon.set_accessibility_enabled(true);
        assert_eq!(icon.on_progress(9, 10), None);
        assert_eq!(icon.position(), Point::ZERO);
    }

    #[test]
    fn test_pointer_gates_drawing() {
        let mut icon = icon();
        assert!(icon.should_draw());
        icon.on_pointer_down();
        assert!(!icon.should_draw());
        icon.on_pointer_up();
        assert!(icon.should_draw());
    }
}
