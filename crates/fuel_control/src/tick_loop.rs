use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fuel_core::{BurnState, SimulationConfig, StatusReport};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::modifiers::SharedModifiers;
use crate::{Lifecycle, RunPhase};

/// Per-run tick task. Owns the `BurnState` for the whole run; everything
/// else arrives through the shared modifier flags and the stop flag.
///
/// Exits on the first of: stop requested, terminal report, reporter gone.
/// Marks the lifecycle `Terminated` on the way out so the controller can
/// accept a fresh start.
pub(crate) async fn run_tick_loop(
    mut state: BurnState,
    config: SimulationConfig,
    modifiers: Arc<SharedModifiers>,
    stop: Arc<AtomicBool>,
    report_tx: mpsc::UnboundedSender<StatusReport>,
    tick_interval: Duration,
    lifecycle: Arc<Mutex<Lifecycle>>,
) {
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);
    // The first interval tick completes immediately; consume it so the first
    // burn lands one interval after start.
    interval.tick().await;

    loop {
        interval.tick().await;

        if stop.load(Ordering::Acquire) {
            debug!(tick = state.ticks_elapsed, "stop requested, tearing down");
            break;
        }

        let snapshot = modifiers.snapshot();
        let report = fuel_core::tick(&mut state, snapshot, &config);
        let tick = report.tick;
        let terminal = report.terminal;

        if report_tx.send(report).is_err() {
            // The reporter dropped its receiver; nothing observes this run.
            debug!(tick, "report channel closed, tearing down");
            break;
        }
        if terminal {
            info!(tick, "tank exhausted, simulation terminated");
            break;
        }
    }

    lifecycle.lock().phase = RunPhase::Terminated;
}
