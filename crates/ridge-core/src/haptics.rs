//! Haptic feedback routing.
//!
//! Pure mapping from enrollment events to vibration effects; actuation is
//! owned by the consumer.

use serde::{Deserialize, Serialize};

use crate::event::EnrollEvent;

/// Vibration effect to play for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticEffect {
    /// Enrollment error.
    ErrorBuzz,
    /// Help while a screen reader is active.
    HelpBuzz,
    /// A step was captured.
    SuccessTick,
}

/// The effect for an event, if any.
///
/// Help only vibrates when accessibility is enabled; sighted users already
/// get the visual flash.
pub fn effect_for(event: &EnrollEvent, accessibility_enabled: bool) -> Option<HapticEffect> {
    match event {
        EnrollEvent::Error { .. } => Some(HapticEffect::ErrorBuzz),
        EnrollEvent::Help { .. } if accessibility_enabled => Some(HapticEffect::HelpBuzz),
        EnrollEvent::Progress { .. } => Some(HapticEffect::SuccessTick),
        _ => None,
    }
}
