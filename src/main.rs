//! SimBot Events - headless driver
//!
//! Runs the household event controllers either deterministically for a
//! fixed number of sim-minutes, or in real time on the tokio scheduler.
//! Prints the resulting histories as text or JSON.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use simbot_events::core::clock::format_clock;
use simbot_events::core::config::EngineConfig;
use simbot_events::core::error::{Result, SimBotError};
use simbot_events::core::types::{AlarmState, RoomId};
use simbot_events::events::model::EventKind;
use simbot_events::simulation::{self, HomeSimulation, SimulationReport};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Household event simulation for the SimBot robots
#[derive(Parser, Debug)]
#[command(name = "simbot-events")]
#[command(about = "Simulate household disasters, malfunctions and intruders")]
struct Args {
    /// Sim-minutes to run headless (ignored with --realtime-secs)
    #[arg(long, default_value_t = 1440.0)]
    minutes: f64,

    /// Sim-minutes per deterministic step
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Run on the real-time scheduler for this many wall-clock seconds
    #[arg(long)]
    realtime_secs: Option<u64>,

    /// Sim-minutes per real second in real-time mode
    #[arg(long)]
    rate: Option<f64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file layered over the default configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spawn an event at start, as `kind` or `kind:room` (repeatable)
    #[arg(long)]
    force: Vec<String>,

    /// Initial alarm state (disarmed, armed-away, armed-home)
    #[arg(long)]
    alarm: Option<AlarmState>,

    /// Install an extra security camera in a room (repeatable)
    #[arg(long)]
    camera: Vec<RoomId>,

    /// Enable the night patrol
    #[arg(long)]
    patrol: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("simbot_events=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let forced = args
        .force
        .iter()
        .map(|spec| parse_force(spec))
        .collect::<Result<Vec<_>>>()?;

    let mut sim = HomeSimulation::new(config)?;
    for room in &args.camera {
        sim.world.install_camera(*room);
    }
    if let Some(state) = args.alarm {
        sim.set_alarm(state);
    }
    for (kind, room) in forced {
        let id = sim.force(kind, room)?;
        tracing::info!(%id, kind = %kind, "forced event");
    }

    let sim = match args.realtime_secs {
        Some(secs) => {
            let rt = Runtime::new()?;
            rt.block_on(async move {
                let handle = simulation::start(sim);
                tokio::time::sleep(Duration::from_secs(secs)).await;
                handle.stop().await
            })?
        }
        None => {
            let mut sim = sim;
            sim.run_for(args.minutes, args.step);
            sim
        }
    };

    let report = sim.report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(rate) = args.rate {
        config.clock.minutes_per_second = rate;
    }
    if args.patrol {
        config.security.patrol_enabled = true;
    }
    config.validate()?;
    Ok(config)
}

fn parse_force(spec: &str) -> Result<(EventKind, Option<RoomId>)> {
    match spec.split_once(':') {
        Some((kind, room)) => {
            let room = room.parse::<RoomId>().map_err(SimBotError::InvalidConfig)?;
            Ok((kind.parse()?, Some(room)))
        }
        None => Ok((spec.parse()?, None)),
    }
}

fn print_report(report: &SimulationReport) {
    println!("\n=== SIMBOT EVENTS ===");
    println!(
        "Ended day {} at {} ({:?}, alarm: {:?})",
        report.day,
        format_clock(report.ended_at),
        report.period,
        report.alarm
    );

    let sections = [
        ("Disasters", &report.disasters),
        ("Home events", &report.home_events),
        ("Intruders", &report.intruders),
    ];
    for (title, entries) in sections {
        println!("\n{} ({})", title, entries.len());
        for entry in entries {
            println!(
                "  {} - {}  {} in {} (detected by {}, {} responders)",
                format_clock(entry.started_at),
                format_clock(entry.resolved_at),
                entry.kind,
                entry.room,
                entry.detected_by,
                entry.responders.len()
            );
        }
    }

    if !report.live.is_empty() {
        println!("\nStill live:");
        for view in &report.live {
            println!("  [{}] {} ({})", view.phase, view.banner, view.room);
        }
    }

    if !report.security_log.is_empty() {
        println!("\nSecurity log:");
        for entry in &report.security_log {
            println!("  {}  {}", format_clock(entry.at), entry.message);
        }
    }

    if !report.diary.is_empty() {
        println!("\nDiary:");
        for entry in &report.diary {
            println!("  {}", entry.text);
        }
    }
}
