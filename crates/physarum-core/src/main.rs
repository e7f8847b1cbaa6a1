//! Physarum Simulation Runner
//!
//! Headless driver: loads a configuration file or preset, advances the
//! simulation at a fixed time step and prints frame statistics as JSON lines.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use physarum_core::{
    default_config_toml, ConfigFileError, ConfigurationError, Preset, SimError,
    SimulationConfig, SimulationFile, SimulationState, SpeciesCatalog,
};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "physarum_sim")]
#[command(about = "Headless multi-species Physarum trail simulation")]
struct Args {
    /// TOML configuration file with a [simulation] table and [[species]] list
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in species preset used when no configuration file is given
    #[arg(long, default_value_t = Preset::Trio)]
    preset: Preset,

    /// Random seed for reproducibility (overrides the configuration)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Time step per tick, in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Interval between statistics lines (in ticks, 0 for final only)
    #[arg(long, default_value_t = 60)]
    stats_interval: u64,

    /// Trail map width override
    #[arg(long)]
    width: Option<u32>,

    /// Trail map height override
    #[arg(long)]
    height: Option<u32>,

    /// Agent count override
    #[arg(long)]
    agents: Option<usize>,

    /// Run the sense pass on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Simulation(#[from] SimError),
    #[error("could not serialize statistics: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve the configuration from file or preset and apply CLI overrides.
fn load_setup(args: &Args) -> Result<(SimulationConfig, SpeciesCatalog), RunError> {
    let mut file = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            SimulationFile::from_file(path)?
        }
        None => {
            info!("Using preset '{}'", args.preset);
            SimulationFile {
                simulation: args.preset.config(),
                species: args.preset.species(),
            }
        }
    };

    let simulation = &mut file.simulation;
    if let Some(seed) = args.seed {
        simulation.seed = seed;
    }
    if let Some(width) = args.width {
        simulation.width = width;
    }
    if let Some(height) = args.height {
        simulation.height = height;
    }
    if let Some(agents) = args.agents {
        simulation.num_agents = agents;
    }
    if args.sequential {
        simulation.parallel = false;
    }

    Ok(file.into_parts()?)
}

fn run(args: &Args) -> Result<(), RunError> {
    let (config, catalog) = load_setup(args)?;

    info!(
        "Simulating {}x{} with {} agents across {} species (seed {})",
        config.width,
        config.height,
        config.num_agents,
        catalog.len(),
        config.seed
    );

    let mut state = SimulationState::initialize(&config, catalog)?;
    let started = Instant::now();

    for _ in 0..args.ticks {
        state.step(args.dt)?;

        if args.stats_interval > 0 && state.tick() % args.stats_interval == 0 {
            println!("{}", state.frame_stats().to_json()?);
        }
    }

    let stats = state.frame_stats();
    if args.stats_interval == 0 || state.tick() % args.stats_interval != 0 {
        println!("{}", stats.to_json()?);
    }

    info!(
        "Simulation complete. Ran {} ticks in {:.2?} ({} lit cells, {:.1}% coverage).",
        state.tick(),
        started.elapsed(),
        stats.lit_cells,
        stats.coverage * 100.0
    );
    Ok(())
}
