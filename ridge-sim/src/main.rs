//! Ridge enrollment simulator - main entry point.
//!
//! Wires the guidance engine to a scripted fake sensor, runs one full
//! enrollment, and logs every event, ring command, and icon command.
//!
//! Usage:
//!     ridge-sim --steps 12
//!     ridge-sim --steps 8 --help-at 3 --accessibility

mod hal;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ridge_core::ring::{ProgressRing, RingCommand, RingPalette, RingState};
use ridge_core::{
    effect_for, EnrollEvent, EnrollIcon, EnrollmentProgress, GuidedPointTable, PxPerMm,
    SensorRect, StageThresholds,
};
use ridge_enroll::{EnrollReason, Enroller, EventFanout, EventObserver, HardwareAuthToken};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use hal::{Script, ScriptedHal};

const SIM_USER_ID: u32 = 0;

#[derive(Parser, Debug)]
#[command(name = "ridge-sim")]
#[command(about = "Drive a scripted enrollment against the ridge guidance engine")]
#[command(version)]
struct Args {
    /// Total enrollment steps
    #[arg(short, long, default_value = "12")]
    steps: u32,

    /// Pause between scripted sensor reports in milliseconds
    #[arg(long, default_value = "50")]
    step_interval_ms: u64,

    /// Inject a help report before this 0-based step
    #[arg(long)]
    help_at: Option<u32>,

    /// Report a terminal sensor error at this 0-based step
    #[arg(long)]
    error_at: Option<u32>,

    /// Run with accessibility services enabled
    #[arg(long)]
    accessibility: bool,

    /// Use the revised guided-point coordinates
    #[arg(long)]
    revised_points: bool,

    /// Display density in pixels per millimetre
    #[arg(long, default_value = "3.0")]
    px_per_mm: f32,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    info!("Initializing ridge enrollment simulator");
    info!("  Version: {}", env!("CARGO_PKG_VERSION"));

    let density = PxPerMm::new(args.px_per_mm)?;
    let table = Arc::new(if args.revised_points {
        GuidedPointTable::revised(density)
    } else {
        GuidedPointTable::classic(density)
    });

    let hal = Arc::new(ScriptedHal::new(Script {
        steps: args.steps,
        step_interval: Duration::from_millis(args.step_interval_ms),
        help_at: args.help_at,
        error_at: args.error_at,
    }));
    let enroller = Enroller::new(hal, SIM_USER_ID);

    // A real run exchanges a verified credential for this token first.
    let token = HardwareAuthToken::new(vec![0x52, 0x49, 0x44, 0x47, 0x45]);
    let stream = enroller.enroll(&token, EnrollReason::FirstTime).await?;

    let fanout = EventFanout::spawn(stream);
    let ring_side = fanout.subscribe();
    let icon_side = fanout.subscribe();

    let thresholds = StageThresholds::default();
    let accessibility = args.accessibility;

    let ring_task = tokio::spawn(run_ring(ring_side, accessibility));
    let icon_task = tokio::spawn(run_icon(icon_side, table, thresholds, accessibility));

    let ring_state = ring_task.await?;
    let icon_moves = icon_task.await?;

    if ring_state == RingState::Done {
        info!(icon_moves, "enrollment complete");
        Ok(())
    } else {
        Err(format!("enrollment did not complete (ring state {ring_state:?})").into())
    }
}

/// Progress ring consumer: owns the ring, drives checkmark timing.
async fn run_ring(mut events: EventObserver, accessibility: bool) -> RingState {
    let mut ring = ProgressRing::new(RingPalette::default());
    ring.set_accessibility_enabled(accessibility);
    ring.set_on_complete(|| info!("enrollment finished, advancing to next screen"));

    while let Some(event) = events.recv().await {
        if let Some(effect) = effect_for(&event, accessibility) {
            debug!(?effect, "haptic");
        }
        match &event {
            EnrollEvent::Progress { remaining, total } => {
                for command in ring.on_progress(*remaining, *total) {
                    info!(?command, "ring");
                    if let RingCommand::Checkmark { delay, duration, .. } = command {
                        tokio::time::sleep(delay + duration).await;
                        ring.on_checkmark_shown();
                    }
                }
            }
            EnrollEvent::Help { msg, .. } => {
                info!(msg = %msg, "sensor help");
                info!(command = ?ring.on_help(), "ring");
            }
            EnrollEvent::Error { msg_id, msg } => {
                warn!(msg_id, msg = %msg, "sensor error");
            }
            _ => {}
        }
        if event.is_terminal() {
            break;
        }
    }
    ring.state()
}

/// Icon consumer: owns the icon, tracks the stage to gate guidance.
async fn run_icon(
    mut events: EventObserver,
    table: Arc<GuidedPointTable>,
    thresholds: StageThresholds,
    accessibility: bool,
) -> u64 {
    let mut icon = EnrollIcon::new(table);
    icon.set_accessibility_enabled(accessibility);
    icon.set_sensor_rect(SensorRect::new(540.0, 1820.0, 720.0, 2000.0));

    while let Some(event) = events.recv().await {
        match &event {
            EnrollEvent::Progress { remaining, total } => {
                let progress = EnrollmentProgress { remaining: *remaining, total: *total };
                let stage = thresholds.stage_for(Some(progress));
                icon.set_guided_enabled(stage.is_guided());
                if let Some(command) = icon.on_progress(*remaining, *total) {
                    info!(?stage, ?command, "icon");
                }
            }
            EnrollEvent::PointerDown { .. } => icon.on_pointer_down(),
            EnrollEvent::PointerUp { .. } => icon.on_pointer_up(),
            _ => {}
        }
        if event.is_terminal() {
            break;
        }
    }
    icon.animation_starts()
}
