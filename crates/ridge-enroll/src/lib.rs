//! Ridge Enrollment Session Adapter
//!
//! Bridges the platform's callback-based fingerprint enrollment API into a
//! push-based event stream with correct cancellation semantics:
//!
//! - **enroll** fires the platform call once and returns an
//!   [`EnrollmentStream`] of [`ridge_core::EnrollEvent`]s
//! - **abandonment** of the stream before a terminal event signals the
//!   platform cancel handle exactly once; after natural completion it is a
//!   guarded no-op
//! - **contention** with an outstanding session waits a bounded 150 ms and
//!   then proceeds with a warning, never an error
//! - **fan-out** lets the icon and the progress ring each observe every
//!   event independently
//!
//! Platform callbacks arrive on a thread of the platform's choosing; the
//! session channel is the redispatch, so consumers mutate their state
//! machines only on their own thread.

pub mod error;
pub mod fanout;
pub mod hal;
pub mod reason;
pub mod session;
pub mod token;

// Re-export commonly used items at crate root
pub use error::{EnrollError, Result};
pub use fanout::{EventFanout, EventObserver};
pub use hal::{CancelHandle, EnrollmentHal, HalCallback};
pub use reason::EnrollReason;
pub use session::{Enroller, EnrollmentStream, SessionOutcome, EVENT_BUFFER, SESSION_BACKOFF};
pub use token::HardwareAuthToken;
