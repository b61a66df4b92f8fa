//! `fuel_core` — deterministic fuel-burn tick.
//!
//! No IO, no clocks, no shared state. The engine advances a `BurnState` by
//! exactly one logical tick per call; scheduling and concurrency live in
//! `fuel_control`.

mod engine;
mod planning;
mod types;

pub use engine::tick;
pub use planning::{
    plan_mission, FuelPlan, MissionProfile, TAXI_AND_TAKEOFF_FUEL_LBS, VFR_RESERVE_MIN,
};
pub use types::*;
