//! Ridge Core Engine
//!
//! This crate provides the computational kernel for under-display fingerprint
//! enrollment guidance, designed to run headless: every transition returns
//! animation commands as plain data, and no module owns a clock or a thread.
//!
//! # Example
//!
//! ```rust
//! use ridge_core::geometry::{GuidedPointTable, PxPerMm};
//! use ridge_core::ring::{ProgressRing, RingPalette};
//!
//! // Guided enrollment nudges the finger to a different point each step
//! let table = GuidedPointTable::classic(PxPerMm::new(3.0).unwrap());
//! let offset = table.offset_for_step(9, 10, false, true);
//! assert_ne!(offset, ridge_core::geometry::Point::ZERO);
//!
//! // The progress ring advances per step and completes at remaining == 0
//! let mut ring = ProgressRing::new(RingPalette::default());
//! let commands = ring.on_progress(4, 5);
//! assert_eq!(commands.len(), 1);
//! ```

pub mod error;
pub mod event;
pub mod geometry;
pub mod haptics;
pub mod icon;
pub mod progress;
pub mod ring;
pub mod stage;

// Re-export main types at crate root
pub use error::{CoreError, Result};
pub use event::EnrollEvent;
pub use geometry::{GuidedPointTable, Point, PxPerMm, SensorRect};
pub use haptics::{effect_for, HapticEffect};
pub use icon::{EnrollIcon, IconCommand};
pub use progress::{EnrollmentProgress, ProgressTracker};
pub use ring::{ProgressRing, RingCommand, RingPalette, RingState};
pub use stage::{EnrollStage, StageThresholds};
