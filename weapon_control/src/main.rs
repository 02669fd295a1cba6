//! # Weapon Control Simulator
//!
//! Loads a weapon configuration, builds the selected controller and replays
//! an input script against it on a virtual clock. Actuator output, haptic
//! pulses and tick timing are summarized at the end of the run.
//!
//! ```text
//! weapon_control config/weapon.toml --script demos/spin_up.json --duration-ms 12000
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use weapon_common::config::LogLevel;
use weapon_common::hal::sink::{NoDelay, ThreadDelay};
use weapon_control::config::{LoadedConfig, load_config};
use weapon_control::cycle::{InputScript, SimRunner};
use weapon_control::weapon::Weapon;

/// Weapon Control - scripted tick-loop simulator
#[derive(Parser, Debug)]
#[command(name = "weapon_control")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Replays gamepad input against a combat robot weapon controller")]
struct Args {
    /// Path to the weapon configuration TOML.
    #[arg(default_value = "config/weapon.toml")]
    config: PathBuf,

    /// JSON input script (neutral input if omitted).
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Control tick period [ms].
    #[arg(long, default_value_t = 10)]
    tick_ms: u32,

    /// Simulated run length [ms].
    #[arg(long, default_value_t = 10_000)]
    duration_ms: u32,

    /// Virtual time at which the gamepad link comes up [ms].
    #[arg(long, default_value_t = 0)]
    link_at: u32,

    /// Sleep between ticks and through the ESC arming delay.
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // Load before the subscriber exists so `[shared] log_level` can apply.
    let loaded = load_config(&args.config);
    let configured = loaded.as_ref().ok().map(|l| l.config.shared.log_level);
    setup_tracing(&args, configured);

    info!("Weapon Control v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = loaded
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|loaded| run(&args, &loaded));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Weapon Control shutdown complete");
}

fn run(args: &Args, loaded: &LoadedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let script = match &args.script {
        Some(path) => {
            let script = InputScript::load(path)?;
            info!("Loaded {} script frames from {}", script.frames().len(), path.display());
            script
        }
        None => {
            warn!("No input script given, replaying neutral input");
            InputScript::default()
        }
    };

    let mut runner = SimRunner::new(loaded.build_controller(), args.tick_ms, args.link_at);

    if args.realtime {
        runner.begin(&mut ThreadDelay);
        runner.run(&script, args.duration_ms, &mut ThreadDelay);
    } else {
        runner.begin(&mut NoDelay);
        runner.run(&script, args.duration_ms, &mut NoDelay);
    }

    let stats = runner.stats();
    info!(
        "Summary: weapon={}, ticks={}, armed_at={:?}ms, peak_level={:?}, energized={}x, rumble={}x, e-stops={}",
        runner.controller().kind(),
        stats.cycle_count,
        stats.first_armed_at_ms,
        stats.peak_level,
        runner.actuator().energize_count(),
        runner.haptics().count(),
        stats.emergency_stops,
    );
    info!(
        "Tick time: avg={}ns, min={}ns, max={}ns",
        stats.avg_cycle_ns(),
        if stats.cycle_count == 0 { 0 } else { stats.min_cycle_ns },
        stats.max_cycle_ns,
    );

    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
///
/// `--verbose` wins over the configured level; `RUST_LOG` directives are
/// kept alongside either.
fn setup_tracing(args: &Args, configured: Option<LogLevel>) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured
            .and_then(|l| l.as_directive().parse().ok())
            .unwrap_or(Level::INFO)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
