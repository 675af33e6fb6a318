//! Scripted fake sensor.
//!
//! Plays a fixed enrollment script against the session callback: one
//! pointer-down/acquired/progress/pointer-up round per step, with optional
//! help injections. Cancellation stops the script at the next step boundary,
//! like a real sensor that quits reporting after an abort.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ridge_enroll::{CancelHandle, EnrollReason, EnrollmentHal, HalCallback, HardwareAuthToken};
use tracing::{debug, info};

const SENSOR_ID: i32 = 0;

#[derive(Debug, Clone)]
pub struct Script {
    /// Total enrollment steps.
    pub steps: u32,
    /// Pause between steps.
    pub step_interval: Duration,
    /// Inject a help report before this step (0-based), if set.
    pub help_at: Option<u32>,
    /// Report a terminal platform error at this step instead of progress.
    pub error_at: Option<u32>,
}

#[derive(Default)]
struct ScriptedCancel {
    cancelled: AtomicBool,
}

impl CancelHandle for ScriptedCancel {
    fn cancel(&self) {
        info!("sensor received cancel");
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Fake sensor HAL driven by a [`Script`].
pub struct ScriptedHal {
    script: Script,
}

impl ScriptedHal {
    pub fn new(script: Script) -> Self {
        Self { script }
    }
}

impl EnrollmentHal for ScriptedHal {
    fn enroll(
        &self,
        _token: &HardwareAuthToken,
        user_id: u32,
        reason: EnrollReason,
        callback: HalCallback,
    ) -> Arc<dyn CancelHandle> {
        info!(user_id, ?reason, steps = self.script.steps, "sensor: starting script");
        let script = self.script.clone();
        let cancel = Arc::new(ScriptedCancel::default());
        let observed = cancel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(script.step_interval).await;
            callback.on_overlay_shown();

            for step in 0..script.steps {
                tokio::time::sleep(script.step_interval).await;
                if observed.cancelled.load(Ordering::SeqCst) {
                    debug!(step, "sensor: script stopped after cancel");
                    return;
                }

                if script.help_at == Some(step) {
                    callback.on_enrollment_help(1, "move your finger slightly");
                }
                if script.error_at == Some(step) {
                    callback.on_enrollment_error(5, "unable to process, try again");
                    return;
                }

                callback.on_pointer_down(SENSOR_ID);
                callback.on_acquired(true);
                callback.on_enrollment_progress(script.steps - 1 - step);
                callback.on_pointer_up(SENSOR_ID);
            }
            debug!("sensor: script finished");
        });

        cancel
    }
}
