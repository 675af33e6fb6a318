//! Error types for the enrollment session layer.
//!
//! Platform-reported failures are never errors here: they surface as
//! terminal [`ridge_core::EnrollEvent::Error`] events on the stream. This
//! type covers caller misuse only.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrollError {
    /// Enrollment requires a hardware auth token from a prior credential
    /// confirmation.
    #[error("auth token is empty")]
    TokenMissing,
}

/// Result type alias using the enrollment error.
pub type Result<T> = std::result::Result<T, EnrollError>;
