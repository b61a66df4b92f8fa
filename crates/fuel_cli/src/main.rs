use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fuel_control::{ReportRx, SimulationController};
use fuel_core::{
    plan_mission, BurnMode, MissionProfile, Modifier, ModifierSet, SimulationConfig, StatusReport,
    SwapPolicy,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "fuel_cli", about = "Aviation fuel planning and burn simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute bingo fuel and on-station time for a mission profile.
    Plan {
        /// Forward tank quantity in lbs.
        #[arg(long)]
        forward: f64,
        /// Aft tank quantity in lbs.
        #[arg(long)]
        aft: f64,
        /// Burn rate in lbs per minute.
        #[arg(long)]
        burn_rate: f64,
        /// Fuel burned during descent, in lbs.
        #[arg(long)]
        descent_fuel: f64,
        /// Groundspeed in knots.
        #[arg(long)]
        groundspeed: f64,
        /// Distance from base in nautical miles.
        #[arg(long)]
        distance: f64,
    },
    /// Run a live burn simulation until the tanks run dry.
    Run {
        /// Forward tank quantity in lbs.
        #[arg(long)]
        forward: f64,
        /// Aft tank quantity in lbs.
        #[arg(long)]
        aft: f64,
        /// Burn rate in lbs per minute.
        #[arg(long)]
        burn_rate: f64,
        #[arg(long, value_enum, default_value_t = Variant::Simultaneous)]
        variant: Variant,
        /// Ticks between tank swaps (alternating variant only).
        #[arg(long, default_value_t = 60)]
        swap_interval: u64,
        /// Milliseconds of wall-clock time per simulation tick.
        #[arg(long, default_value_t = 1000)]
        tick_millis: u64,
        /// Flip a modifier at a given tick, e.g. `wind@30`. Repeatable.
        #[arg(long = "toggle", value_parser = parse_toggle)]
        toggles: Vec<ToggleAt>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    /// Burn split evenly between both tanks.
    Simultaneous,
    /// Full burn from one tank at a time, swapped on a schedule.
    Alternating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ToggleAt {
    tick: u64,
    modifier: Modifier,
}

fn parse_toggle(raw: &str) -> Result<ToggleAt, String> {
    let (name, tick) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected <modifier>@<tick>, got '{raw}'"))?;
    let modifier = match name {
        "wind" => Modifier::Wind,
        "ice" => Modifier::Ice,
        "engine" => Modifier::EngineDegradation,
        _ => return Err(format!("unknown modifier '{name}' (wind, ice, engine)")),
    };
    let tick = tick
        .parse()
        .map_err(|_| format!("invalid tick '{tick}'"))?;
    Ok(ToggleAt { tick, modifier })
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

fn plan(profile: &MissionProfile) -> Result<()> {
    ensure!(
        profile.burn_rate_lbs_per_min > 0.0,
        "burn rate must be positive"
    );
    ensure!(profile.groundspeed_kt > 0.0, "groundspeed must be positive");

    let fuel_plan = plan_mission(profile);
    println!("Bingo Fuel: {:.2} lbs", fuel_plan.bingo_fuel_lbs);
    println!("ONSTA Time: {:.2} mins", fuel_plan.on_station_time_min);
    println!("RTB Fuel: {:.2} lbs", fuel_plan.rtb_fuel_lbs);
    Ok(())
}

// ---------------------------------------------------------------------------
// Simulation run
// ---------------------------------------------------------------------------

fn format_hours_minutes(time: Duration) -> String {
    let total_minutes = time.as_secs() / 60;
    format!(
        "{:02} hours and {:02} minutes",
        total_minutes / 60,
        total_minutes % 60
    )
}

fn format_report(report: &StatusReport) -> String {
    format!(
        "[tick {:04}] Forward Tank: {:.2} lbs  Aft Tank: {:.2} lbs  Total Fuel: {:.2} lbs  \
         Time till empty: {}",
        report.tick,
        report.forward_lbs,
        report.aft_lbs,
        report.total_lbs,
        format_hours_minutes(report.time_to_empty),
    )
}

fn warning_line(modifiers: ModifierSet) -> Option<String> {
    if modifiers.is_empty() {
        return None;
    }
    let warnings: Vec<&str> = modifiers
        .iter()
        .map(|modifier| match modifier {
            Modifier::Wind => "Caution: Wind Active",
            Modifier::Ice => "Warning: Ice on Wings",
            Modifier::EngineDegradation => "Warning: Engine Degradation",
        })
        .collect();
    Some(warnings.join(" | "))
}

async fn run_simulation(
    controller: &SimulationController,
    mut reports: ReportRx,
    mut toggles: Vec<ToggleAt>,
) {
    toggles.sort_by_key(|toggle| toggle.tick);

    while let Some(report) = reports.recv().await {
        println!("{}", format_report(&report));
        if let Some(line) = warning_line(report.active_modifiers) {
            println!("{line}");
        }

        if report.terminal {
            println!(
                "Simulation complete: Forward Tank: {:.2} lbs  Aft Tank: {:.2} lbs  \
                 Total Fuel: {:.2} lbs",
                report.forward_lbs, report.aft_lbs, report.total_lbs,
            );
            break;
        }

        // Apply toggles scheduled up to this tick so they land before the
        // next burn.
        while toggles.first().is_some_and(|toggle| toggle.tick <= report.tick) {
            let toggle = toggles.remove(0);
            let active = controller.toggle_modifier(toggle.modifier);
            println!(
                "[tick {:04}] {} toggled {}",
                report.tick,
                toggle.modifier,
                if active { "on" } else { "off" },
            );
        }
    }
}

async fn run(
    config: SimulationConfig,
    variant: Variant,
    swap_interval: u64,
    tick_millis: u64,
    toggles: Vec<ToggleAt>,
) -> Result<()> {
    let mode = match variant {
        Variant::Simultaneous => BurnMode::Simultaneous,
        Variant::Alternating => BurnMode::Alternating(SwapPolicy::new(swap_interval)),
    };
    let controller = SimulationController::new(Duration::from_millis(tick_millis));
    let reports = controller.start(config, mode)?;
    run_simulation(&controller, reports, toggles).await;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Plan {
            forward,
            aft,
            burn_rate,
            descent_fuel,
            groundspeed,
            distance,
        } => plan(&MissionProfile {
            forward_lbs: forward,
            aft_lbs: aft,
            burn_rate_lbs_per_min: burn_rate,
            descent_fuel_lbs: descent_fuel,
            groundspeed_kt: groundspeed,
            distance_from_base_nm: distance,
        })?,
        Commands::Run {
            forward,
            aft,
            burn_rate,
            variant,
            swap_interval,
            tick_millis,
            toggles,
        } => {
            let config = SimulationConfig {
                initial_forward_lbs: forward,
                initial_aft_lbs: aft,
                burn_rate_lbs_per_min: burn_rate,
            };
            run(config, variant, swap_interval, tick_millis, toggles).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toggle_accepts_modifier_at_tick() {
        assert_eq!(
            parse_toggle("wind@30"),
            Ok(ToggleAt {
                tick: 30,
                modifier: Modifier::Wind,
            })
        );
        assert_eq!(
            parse_toggle("engine@0"),
            Ok(ToggleAt {
                tick: 0,
                modifier: Modifier::EngineDegradation,
            })
        );
    }

    #[test]
    fn test_parse_toggle_rejects_malformed_input() {
        assert!(parse_toggle("wind").is_err());
        assert!(parse_toggle("fog@10").is_err());
        assert!(parse_toggle("ice@soon").is_err());
    }

    #[test]
    fn test_format_hours_minutes_zero_pads() {
        assert_eq!(
            format_hours_minutes(Duration::from_secs(2 * 3600 + 60)),
            "02 hours and 01 minutes"
        );
        assert_eq!(
            format_hours_minutes(Duration::from_secs(59 * 60 + 59)),
            "00 hours and 59 minutes"
        );
    }

    #[test]
    fn test_warning_line_enumerates_active_modifiers() {
        assert_eq!(warning_line(ModifierSet::EMPTY), None);
        let all = ModifierSet::EMPTY
            .with(Modifier::Wind)
            .with(Modifier::Ice)
            .with(Modifier::EngineDegradation);
        assert_eq!(
            warning_line(all).as_deref(),
            Some("Caution: Wind Active | Warning: Ice on Wings | Warning: Engine Degradation")
        );
    }
}
