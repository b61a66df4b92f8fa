//! Type definitions for `fuel_core`.
//!
//! All public types used by the burn engine and the planning calculators.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One logical tick represents one second of flight time.
pub const TICKS_PER_MINUTE: f64 = 60.0;

// ---------------------------------------------------------------------------
// Tanks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tank {
    Forward,
    Aft,
}

impl Tank {
    pub fn other(self) -> Tank {
        match self {
            Tank::Forward => Tank::Aft,
            Tank::Aft => Tank::Forward,
        }
    }
}

impl std::fmt::Display for Tank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tank::Forward => f.write_str("forward"),
            Tank::Aft => f.write_str("aft"),
        }
    }
}

/// Fuel on board, in pounds. Quantities never go negative: every debit
/// clamps at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankState {
    pub forward_lbs: f64,
    pub aft_lbs: f64,
}

impl TankState {
    pub fn new(forward_lbs: f64, aft_lbs: f64) -> Self {
        Self {
            forward_lbs,
            aft_lbs,
        }
    }

    pub fn total_lbs(&self) -> f64 {
        self.forward_lbs + self.aft_lbs
    }

    pub fn quantity(&self, tank: Tank) -> f64 {
        match tank {
            Tank::Forward => self.forward_lbs,
            Tank::Aft => self.aft_lbs,
        }
    }

    /// Removes `lbs` from one tank, clamping at zero.
    pub fn debit(&mut self, tank: Tank, lbs: f64) {
        let slot = match tank {
            Tank::Forward => &mut self.forward_lbs,
            Tank::Aft => &mut self.aft_lbs,
        };
        *slot = (*slot - lbs).max(0.0);
    }

    /// Removes `lbs_each` from both tanks, clamping each at zero.
    pub fn debit_both(&mut self, lbs_each: f64) {
        self.debit(Tank::Forward, lbs_each);
        self.debit(Tank::Aft, lbs_each);
    }

    pub fn is_empty(&self, tank: Tank) -> bool {
        self.quantity(tank) <= 0.0
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// An environmental condition that multiplies the effective burn rate while
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Wind,
    Ice,
    EngineDegradation,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [Modifier::Wind, Modifier::Ice, Modifier::EngineDegradation];

    pub fn multiplier(self) -> f64 {
        match self {
            Modifier::Wind => 1.2,
            Modifier::Ice => 1.1,
            Modifier::EngineDegradation => 1.3,
        }
    }

    /// Bit assignment inside a `ModifierSet`. Stable so the flags can live in
    /// a single shared atomic.
    pub fn bit(self) -> u8 {
        match self {
            Modifier::Wind => 1 << 0,
            Modifier::Ice => 1 << 1,
            Modifier::EngineDegradation => 1 << 2,
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modifier::Wind => f.write_str("wind"),
            Modifier::Ice => f.write_str("ice"),
            Modifier::EngineDegradation => f.write_str("engine degradation"),
        }
    }
}

/// Value-type snapshot of the active modifiers.
///
/// The tick task receives one snapshot per tick; toggles landing after the
/// snapshot affect the next tick only (no retroactive recompute).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierSet(u8);

impl ModifierSet {
    pub const EMPTY: ModifierSet = ModifierSet(0);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Flips one flag in place.
    pub fn toggle(&mut self, modifier: Modifier) {
        self.0 ^= modifier.bit();
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.0 |= modifier.bit();
        self
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }

    /// Product of the multipliers of all active flags. Multiplication is
    /// commutative, so the result is independent of toggle order.
    pub fn multiplier(self) -> f64 {
        self.iter().map(Modifier::multiplier).product()
    }
}

// ---------------------------------------------------------------------------
// Swap policy
// ---------------------------------------------------------------------------

/// Which tank feeds the engine over time in the alternating-burn mode.
///
/// `active` flips exactly once every `swap_interval_ticks` ticks counted from
/// simulation start (tick 0 excluded), regardless of fuel or modifier state.
/// Invariant: `swap_interval_ticks > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPolicy {
    pub swap_interval_ticks: u64,
    pub active: Tank,
}

impl SwapPolicy {
    /// Starts on the forward tank.
    pub fn new(swap_interval_ticks: u64) -> Self {
        Self {
            swap_interval_ticks,
            active: Tank::Forward,
        }
    }

    /// Advances the schedule after tick `ticks_elapsed` (1-based) completes.
    pub fn on_tick_complete(&mut self, ticks_elapsed: u64) {
        if ticks_elapsed % self.swap_interval_ticks == 0 {
            self.active = self.active.other();
        }
    }
}

/// How burn is drawn from the two tanks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BurnMode {
    /// Burn split evenly between both tanks; the run ends when either tank
    /// empties.
    Simultaneous,
    /// Full burn from the active tank only; the run ends when both tanks are
    /// empty.
    Alternating(SwapPolicy),
}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Immutable per-run configuration, supplied at start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_forward_lbs: f64,
    pub initial_aft_lbs: f64,
    pub burn_rate_lbs_per_min: f64,
}

/// Mutable state of one simulation run. Owned exclusively by the tick task
/// while the run is live; everyone else sees `StatusReport` snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnState {
    pub tanks: TankState,
    pub mode: BurnMode,
    /// Completed ticks. The first burn is tick 1.
    pub ticks_elapsed: u64,
}

impl BurnState {
    pub fn new(config: &SimulationConfig, mode: BurnMode) -> Self {
        Self {
            tanks: TankState::new(config.initial_forward_lbs, config.initial_aft_lbs),
            mode,
            ticks_elapsed: 0,
        }
    }
}

/// Immutable snapshot produced once per tick and handed to the reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub tick: u64,
    pub forward_lbs: f64,
    pub aft_lbs: f64,
    pub total_lbs: f64,
    /// Estimated time until the run's termination condition. Zero once total
    /// fuel is exhausted. The underlying formula differs by burn mode; see
    /// `engine::tick`.
    pub time_to_empty: Duration,
    pub active_modifiers: ModifierSet,
    /// True on the final report of a run.
    pub terminal: bool,
}
