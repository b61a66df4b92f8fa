//! `fuel_control` — lifecycle and scheduling around the `fuel_core` burn
//! engine.
//!
//! The controller owns at most one live tick task. Toggle traffic goes
//! through a shared atomic flag set and never contends with a tick; status
//! reports leave through an unbounded channel so the tick task never waits
//! on the reporter.

mod modifiers;
mod tick_loop;

pub use modifiers::SharedModifiers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fuel_core::{BurnMode, BurnState, Modifier, ModifierSet, SimulationConfig, StatusReport};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

/// Reporter end of a run's status channel. Reports arrive tick-ordered;
/// the channel closes when the run terminates or is stopped.
pub type ReportRx = mpsc::UnboundedReceiver<StatusReport>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Idle,
    Running,
    Terminated,
}

#[derive(Debug, Error, PartialEq)]
pub enum StartError {
    #[error("a simulation is already running")]
    AlreadyRunning,
    #[error("burn rate must be a positive number of lbs/min, got {0}")]
    InvalidBurnRate(f64),
    #[error("tank quantity must be a non-negative number of lbs, got {0}")]
    InvalidTankQuantity(f64),
    #[error("swap interval must be at least one tick")]
    InvalidSwapInterval,
}

pub(crate) struct Lifecycle {
    pub(crate) phase: RunPhase,
    stop: Option<Arc<AtomicBool>>,
    task: Option<JoinHandle<()>>,
}

/// Owns the burn engine's lifecycle: start gating, per-tick scheduling,
/// explicit stop, and report handoff.
///
/// `start` must be called from within a tokio runtime; everything else is
/// plain synchronous and callable from any context.
pub struct SimulationController {
    modifiers: Arc<SharedModifiers>,
    tick_interval: Duration,
    lifecycle: Arc<Mutex<Lifecycle>>,
}

impl SimulationController {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            modifiers: Arc::new(SharedModifiers::new()),
            tick_interval,
            lifecycle: Arc::new(Mutex::new(Lifecycle {
                phase: RunPhase::Idle,
                stop: None,
                task: None,
            })),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.lifecycle.lock().phase
    }

    /// Flips one modifier flag. Valid at any time, running or not; the next
    /// tick picks up the change. Returns true when the flag is now active.
    pub fn toggle_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.toggle(modifier)
    }

    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers.snapshot()
    }

    /// Starts a fresh run and returns its report channel.
    ///
    /// Rejects without touching any state when the configuration is
    /// degenerate or a run is already live. A run that has terminated (or
    /// been stopped) does not block a new start; each start gets a fresh
    /// tick task and a fresh channel.
    pub fn start(&self, config: SimulationConfig, mode: BurnMode) -> Result<ReportRx, StartError> {
        validate(&config, mode)?;

        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.phase == RunPhase::Running {
            return Err(StartError::AlreadyRunning);
        }
        // The previous run's task has already exited; release its handle.
        drop(lifecycle.task.take());

        let (report_tx, report_rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));
        let state = BurnState::new(&config, mode);

        info!(
            forward_lbs = config.initial_forward_lbs,
            aft_lbs = config.initial_aft_lbs,
            burn_rate_lbs_per_min = config.burn_rate_lbs_per_min,
            "starting simulation"
        );
        let handle = tokio::spawn(tick_loop::run_tick_loop(
            state,
            config,
            Arc::clone(&self.modifiers),
            Arc::clone(&stop),
            report_tx,
            self.tick_interval,
            Arc::clone(&self.lifecycle),
        ));

        lifecycle.phase = RunPhase::Running;
        lifecycle.stop = Some(stop);
        lifecycle.task = Some(handle);
        Ok(report_rx)
    }

    /// Requests teardown of the live run. The tick task skips its next burn
    /// and exits within one tick interval; its report channel closes without
    /// a terminal report. Returns false when no run is live.
    pub fn stop(&self) -> bool {
        let lifecycle = self.lifecycle.lock();
        match (&lifecycle.phase, &lifecycle.stop) {
            (RunPhase::Running, Some(stop)) => {
                info!("stop requested");
                stop.store(true, Ordering::Release);
                true
            }
            _ => false,
        }
    }
}

fn validate(config: &SimulationConfig, mode: BurnMode) -> Result<(), StartError> {
    // Finiteness checked first so NaN cannot slip past the sign tests.
    let rate = config.burn_rate_lbs_per_min;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(StartError::InvalidBurnRate(rate));
    }
    for lbs in [config.initial_forward_lbs, config.initial_aft_lbs] {
        if !lbs.is_finite() || lbs < 0.0 {
            return Err(StartError::InvalidTankQuantity(lbs));
        }
    }
    if let BurnMode::Alternating(policy) = mode {
        if policy.swap_interval_ticks == 0 {
            return Err(StartError::InvalidSwapInterval);
        }
    }
    Ok(())
}
