//! Pre-mission fuel planning: bingo fuel, on-station time, return-to-base
//! fuel. Pure single-shot arithmetic, no run state.

use serde::{Deserialize, Serialize};

/// TM (taxi and takeoff fuel) in lbs.
pub const TAXI_AND_TAKEOFF_FUEL_LBS: f64 = 35.0;

/// VFR reserve in minutes (use 30.0 for day VFR).
pub const VFR_RESERVE_MIN: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionProfile {
    pub forward_lbs: f64,
    pub aft_lbs: f64,
    pub burn_rate_lbs_per_min: f64,
    pub descent_fuel_lbs: f64,
    pub groundspeed_kt: f64,
    pub distance_from_base_nm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelPlan {
    /// Minimum fuel to safely return to base, reserve and taxi included.
    pub bingo_fuel_lbs: f64,
    /// Minutes available on station before bingo fuel is reached.
    pub on_station_time_min: f64,
    pub rtb_fuel_lbs: f64,
}

/// Computes bingo fuel and on-station time for a mission profile.
///
/// Caller is responsible for a positive burn rate and groundspeed; the
/// formulas divide by both.
pub fn plan_mission(profile: &MissionProfile) -> FuelPlan {
    let rtb_fuel_lbs = profile.distance_from_base_nm / profile.groundspeed_kt * 60.0;
    let bingo_fuel_lbs = TAXI_AND_TAKEOFF_FUEL_LBS
        + profile.burn_rate_lbs_per_min * VFR_RESERVE_MIN / 60.0
        + profile.descent_fuel_lbs
        + rtb_fuel_lbs;
    let on_station_time_min =
        (profile.forward_lbs + profile.aft_lbs - bingo_fuel_lbs) / profile.burn_rate_lbs_per_min;
    FuelPlan {
        bingo_fuel_lbs,
        on_station_time_min,
        rtb_fuel_lbs,
    }
}
