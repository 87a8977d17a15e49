//! Command-line runner for the raindrop drainage simulation.
//!
//! Loads an elevation grid from CSV, runs the drops to a terminal
//! state, prints the run report and appends the outlet record to the
//! volume log. Rendering of the drainage traces is left to external
//! consumers of the visit log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rain_core::config::SimConfig;
use rain_core::drainage::{self, OutletRecord};
use rain_core::grid::Grid;
use rain_core::simulation::{RunState, Simulation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "rain", about = "Raindrop drainage network simulation", long_about = None)]
struct Cli {
    /// Elevation grid CSV: one row per line, comma-separated numbers
    #[arg(short, long, default_value = "in.txt")]
    grid: PathBuf,

    /// Number of raindrops
    #[arg(short, long, default_value_t = 100)]
    drops: usize,

    /// Step budget: maximum number of ticks
    #[arg(short, long, default_value_t = 100)]
    steps: u32,

    /// Raindrop radius in cm (volume calculation only)
    #[arg(short, long, default_value_t = 0.3)]
    radius: f64,

    /// Grid extent; coordinates run over [0, length] on both axes
    #[arg(short, long, default_value_t = 99)]
    length: usize,

    /// RNG seed for reproducible drop placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// File the per-run outlet record is appended to
    #[arg(short, long, default_value = "outlet_vol.csv")]
    outlet_log: PathBuf,

    /// Visit-count threshold for the common drainage network
    #[arg(short, long, default_value_t = drainage::DEFAULT_NETWORK_THRESHOLD)]
    threshold: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let grid = Grid::from_path(&cli.grid)
        .with_context(|| format!("failed to load elevation grid from {}", cli.grid.display()))?;
    info!(rows = grid.rows(), cols = grid.cols(), "elevation grid loaded");

    let config = SimConfig {
        num_of_drops: cli.drops,
        num_of_steps: cli.steps,
        radius: cli.radius,
        length: cli.length,
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "seeding raindrop placement");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut sim = Simulation::new(grid, config, &mut rng).context("invalid run parameters")?;
    let state = sim.run();

    match state {
        RunState::Converged => {
            println!("All raindrops have reached a point of minimum elevation.");
        }
        RunState::BudgetExhausted => {
            println!(
                "Not all raindrops were able to reach a point of minimum elevation. \
                 Stagnant or oscillating raindrops have reached a sink in the landscape."
            );
        }
        RunState::Running => unreachable!("run() only returns terminal states"),
    }
    println!("End of model run.");
    info!(
        ticks = sim.tick(),
        unconverged = sim.unconverged(),
        "run finished"
    );

    let record = OutletRecord::from_run(&sim);
    println!(
        "Volume of water that reached an outlet = {:.2} cm^3",
        record.total_volume
    );

    record.append_to(&cli.outlet_log).with_context(|| {
        format!(
            "failed to append outlet record to {}",
            cli.outlet_log.display()
        )
    })?;
    debug!(line = %record.csv_line(), "outlet record appended");

    let common = drainage::common_network(sim.visits(), cli.threshold);
    println!(
        "Whole drainage network: {} visits; common network (>= {} passes): {} cells",
        sim.visits().len(),
        cli.threshold,
        common.len()
    );

    Ok(())
}
