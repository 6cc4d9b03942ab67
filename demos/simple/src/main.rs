//! simple — one morning of departures on a two-spot, four-gate apron.
//!
//! ```text
//! cargo run -p simple -- [config.json] [out_dir]
//! ```
//!
//! Without a config file the built-in morning (06:00–12:00, FCFS scheduler,
//! mild speed uncertainty) is used.  CSV output and a final checkpoint are
//! written to `out_dir` (default `output/simple`).  Set `RUST_LOG=debug` for
//! per-tick tracing.

mod airport;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use apron_core::{SimConfig, SimTime, UncertaintyConfig};
use apron_output::{Analysis, CsvAnalysis, CsvStateLog, StateLog};
use apron_sim::{SimBuilder, SimError, Simulation, TickStatus};

use airport::{build_scenario, build_surface};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const LOOKAHEAD_TICKS: u32 = 60;
const REPORT_EVERY:    u64 = 3_600;

fn default_config() -> SimConfig {
    SimConfig {
        start:                 SimTime::from_hms(6, 0, 0),
        end:                   SimTime::from_hms(12, 0, 0),
        tick_duration_secs:    10,
        seed:                  SEED,
        reschedule_cycle_secs: 60,
        test_mode:             false,
        close_tolerance_m:     10.0,
        separation_m:          50.0,
        scheduler:             "fcfs".into(),
        uncertainty: UncertaintyConfig {
            enabled:          true,
            prob_hold:        0.1,
            speed_bias_mu:    0.0,
            speed_bias_sigma: 1.0,
            ..UncertaintyConfig::default()
        },
    }
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(default_config());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Run a throwaway copy of `sim` forward and report how many aircraft it
/// expects to have departed.
fn look_ahead(sim: &Simulation) -> Result<usize> {
    let mut copy = sim.delegate().snapshot(None);
    for _ in 0..LOOKAHEAD_TICKS {
        if copy.quiet_tick()?.is_end_of_day() {
            break;
        }
    }
    Ok(copy.completed_itineraries().len())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from("output/simple"), PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    println!("=== simple — apron ground traffic ===");
    println!(
        "{} → {}  |  dt {}s  |  scheduler {}  |  seed {}",
        config.start, config.end, config.tick_duration_secs, config.scheduler, config.seed
    );

    // 1. Surface and flights.
    let surface = Arc::new(build_surface());
    let scenario = build_scenario(&surface)?;
    println!(
        "Surface: {} nodes, {} links  |  Flights: {} departures, {} arrivals",
        surface.node_count(),
        surface.link_count(),
        scenario.departures().count(),
        scenario.arrivals().count(),
    );

    // 2. Engine with CSV output.
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let mut sim = SimBuilder::new(config, surface, scenario)
        .analyst(Box::new(Analysis::new(CsvAnalysis::new(&out_dir)?)))
        .state_logger(Box::new(StateLog::new(CsvStateLog::new(&out_dir)?)))
        .build()?;

    // 3. Run to end of day.
    let started = Instant::now();
    let mut ticks = 0u64;
    let mut next_report = sim.now().offset(REPORT_EVERY);
    loop {
        ticks += 1;
        let now = match sim.tick() {
            Ok(TickStatus::Running(now)) => now,
            Ok(TickStatus::EndOfDay) => break,
            // Each conflict has already been logged by the engine.
            Err(SimError::Conflict { time, conflicts }) => {
                anyhow::bail!("{} conflict(s) at {time}, run aborted", conflicts.len());
            }
            Err(e) => return Err(e.into()),
        };

        if now >= next_report {
            next_report = now.offset(REPORT_EVERY);
            let forecast = look_ahead(&sim)?;
            println!(
                "  {now}  active {:>2}  queued {:>2}  departed {:>3}  forecast +{}min {forecast}",
                sim.airport().aircrafts().len(),
                sim.airport().queued_count(),
                sim.completed_itineraries().len(),
                LOOKAHEAD_TICKS as u64 * sim.clock().tick_duration() as u64 / 60,
            );
        }
    }
    let elapsed = started.elapsed();

    // 4. Summary.
    let done = sim.completed_itineraries();
    let mean_taxi = if done.is_empty() {
        0.0
    } else {
        done.iter().map(|c| c.duration_secs() as f64).sum::<f64>() / done.len() as f64
    };
    println!();
    println!("Ticks run:            {ticks}");
    println!("Departed:             {}", done.len());
    println!("Mean time on surface: {mean_taxi:.0} s");
    println!("Wall time:            {:.1} ms", elapsed.as_secs_f64() * 1e3);

    let checkpoint_path = out_dir.join("checkpoint.json");
    let json = serde_json::to_string_pretty(&sim.checkpoint())?;
    fs::write(&checkpoint_path, json).with_context(|| format!("writing {}", checkpoint_path.display()))?;
    info!(path = %checkpoint_path.display(), "checkpoint written");
    println!("Output written to {}", out_dir.display());

    Ok(())
}
