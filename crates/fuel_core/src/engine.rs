use std::time::Duration;

use crate::{
    BurnMode, BurnState, ModifierSet, SimulationConfig, StatusReport, Tank, TICKS_PER_MINUTE,
};

/// Advance the simulation by one tick.
///
/// Order of operations:
/// 1. Compute the effective burn from the modifier snapshot.
/// 2. Debit the tank(s) per the burn mode, clamping at zero.
/// 3. Advance the swap schedule (alternating mode).
/// 4. Evaluate termination and build the status report.
///
/// Termination differs by mode: simultaneous burn ends as soon as either
/// tank empties; alternating burn ends only once both are empty.
pub fn tick(
    state: &mut BurnState,
    modifiers: ModifierSet,
    config: &SimulationConfig,
) -> StatusReport {
    let rate_lbs_per_min = config.burn_rate_lbs_per_min * modifiers.multiplier();
    let burn_lbs_per_tick = rate_lbs_per_min / TICKS_PER_MINUTE;

    state.ticks_elapsed += 1;

    let terminal = match state.mode {
        BurnMode::Simultaneous => {
            state.tanks.debit_both(burn_lbs_per_tick / 2.0);
            state.tanks.is_empty(Tank::Forward) || state.tanks.is_empty(Tank::Aft)
        }
        BurnMode::Alternating(ref mut policy) => {
            state.tanks.debit(policy.active, burn_lbs_per_tick);
            policy.on_tick_complete(state.ticks_elapsed);
            state.tanks.is_empty(Tank::Forward) && state.tanks.is_empty(Tank::Aft)
        }
    };

    StatusReport {
        tick: state.ticks_elapsed,
        forward_lbs: state.tanks.forward_lbs,
        aft_lbs: state.tanks.aft_lbs,
        total_lbs: state.tanks.total_lbs(),
        time_to_empty: time_to_empty(state, rate_lbs_per_min),
        active_modifiers: modifiers,
        terminal,
    }
}

/// Estimated time until the mode's termination condition.
///
/// The two modes inherit different formulas, kept as-is per mode:
/// simultaneous reports `max(forward, aft) / rate-per-hour` hours,
/// alternating reports `total / rate-per-minute` minutes. Both report zero
/// once total fuel is exhausted.
fn time_to_empty(state: &BurnState, rate_lbs_per_min: f64) -> Duration {
    if state.tanks.total_lbs() <= 0.0 {
        return Duration::ZERO;
    }
    match state.mode {
        BurnMode::Simultaneous => {
            let hours =
                state.tanks.forward_lbs.max(state.tanks.aft_lbs) / (rate_lbs_per_min * 60.0);
            Duration::from_secs_f64(hours * 3600.0)
        }
        BurnMode::Alternating(_) => {
            let minutes = state.tanks.total_lbs() / rate_lbs_per_min;
            Duration::from_secs_f64(minutes * 60.0)
        }
    }
}
