use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use swarm_cli::{load_params, load_script, Driver};
use swarm_core::{Integrator, Simulation, SimulationMode, SimulationParameters, Vector2D};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boids swarm simulation", long_about = None)]
struct Args {
    /// Behaviour mode, by name (e.g. 'separation') or picker code (0-7)
    #[arg(short, long, default_value = "free-fall")]
    mode: SimulationMode,

    /// Number of agents (split evenly between the two teams in combat mode)
    #[arg(short = 'n', long, default_value_t = 40)]
    agents: usize,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 1000)]
    steps: u64,

    /// RNG seed; omit for a random seed
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with tuning parameters
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Override the integrator ('explicit-euler', 'symplectic-euler', 'explicit-midpoint' or 0-2)
    #[arg(short, long)]
    integrator: Option<Integrator>,

    /// JSON-lines script of UI/pointer commands
    #[arg(long)]
    script: Option<PathBuf>,

    /// Emit a frame every N ticks (0 disables frames)
    #[arg(short, long, default_value_t = 100)]
    every: u64,

    /// Initial leader target as 'x,y'
    #[arg(short, long, value_parser = parse_point)]
    target: Option<Vector2D>,

    /// Start paused, as the interactive application does
    #[arg(long)]
    paused: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn parse_point(s: &str) -> Result<Vector2D, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok(Vector2D::new(coord(x)?, coord(y)?))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut params = match &args.params {
        Some(path) => load_params(path)?,
        None => SimulationParameters::default(),
    };
    if let Some(integrator) = args.integrator {
        params.integrator = integrator;
    }

    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    log::info!("Swarm simulation starting...");
    log::info!("Mode: {}, agents: {}, integrator: {}", args.mode, args.agents, params.integrator);

    let mut sim = match args.seed {
        Some(seed) => Simulation::new(args.agents, params, seed),
        None => Simulation::from_entropy(args.agents, params),
    }
    .context("Failed to initialize simulation")?;

    sim.set_mode(args.mode);
    if let Some(target) = args.target {
        sim.set_external_target(target);
    }
    if !args.paused {
        sim.resume();
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut driver = Driver::new(sim, script);
    let summary = driver
        .run(args.steps, args.every, &mut out)
        .context("Simulation run failed")?;

    serde_json::to_writer(&mut out, &summary)?;
    writeln!(out)?;
    out.flush()?;

    log::info!(
        "Finished at step {} with {} agents",
        summary.step,
        summary.agent_count
    );
    Ok(())
}
