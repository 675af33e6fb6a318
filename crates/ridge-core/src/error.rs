//! Common error types for ridge core components.

use thiserror::Error;

/// Error type for core configuration and model construction.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Display density must be strictly positive
    #[error("invalid display density: {0} px/mm")]
    InvalidDensity(f32),

    /// Stage thresholds must be ascending fractions in [0, 1]
    #[error("invalid stage thresholds: {0}")]
    InvalidThresholds(String),
}

/// Result type alias using the core error.
pub type Result<T> = std::result::Result<T, CoreError>;
