//! Enrollment reason.

use serde::{Deserialize, Serialize};

/// Why an enrollment was started. Selects the platform-reported enrollment
/// semantics; this layer forwards it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollReason {
    /// First fingerprint on the device.
    FirstTime,
    /// An additional fingerprint.
    Additional,
    /// Started from the settings screen.
    Settings,
    /// Started inside the setup wizard.
    SetupWizard,
}
