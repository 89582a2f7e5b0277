use clap::Parser;
use heat_sim_core::{
    render, BoundaryCondition, HeatSimError, InitialState, Pattern, SimulationConfig, Tolerance,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// 2D heat diffusion demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "heat-sim-demo")]
#[command(about = "Explicit finite-difference heat diffusion demo", long_about = None)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid height (rows)
    #[arg(long)]
    height: Option<usize>,

    /// Grid width (columns)
    #[arg(long)]
    width: Option<usize>,

    /// Thermal diffusivity
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Time step
    #[arg(long)]
    dt: Option<f64>,

    /// Spatial step
    #[arg(long)]
    dx: Option<f64>,

    /// Boundary condition (dirichlet, neumann)
    #[arg(short, long)]
    boundary: Option<BoundaryCondition>,

    /// Initial pattern (hot-cell, hot-rectangle)
    #[arg(short, long, conflicts_with = "random")]
    pattern: Option<Pattern>,

    /// Start from uniform random values in [-10, 10) instead of a pattern
    #[arg(long)]
    random: bool,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Simulated time budget
    #[arg(short, long)]
    time: Option<f64>,

    /// Steady-state tolerance (L∞ change per step)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Save a CSV snapshot after every step
    #[arg(short, long)]
    save: bool,

    /// Directory for CSV snapshots
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Args {
    /// Start from the config file (or defaults) and apply flag overrides
    fn into_config(self) -> Result<(SimulationConfig, Option<PathBuf>), HeatSimError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        if let Some(dx) = self.dx {
            config.dx = dx;
        }
        if let Some(boundary) = self.boundary {
            config.boundary = boundary;
        }
        if let Some(pattern) = self.pattern {
            config.initial = InitialState::from(pattern);
        }
        if self.random {
            config.initial = InitialState::Random {
                min: heat_sim_core::grid::RANDOM_MIN,
                max: heat_sim_core::grid::RANDOM_MAX,
                seed: self.seed,
            };
        }
        if let Some(time) = self.time {
            config.total_time = time;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = Tolerance::absolute(tolerance);
        }
        if self.save {
            config.save = true;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }

        config.validate()?;
        Ok((config, self.write_config))
    }
}

fn run(args: Args) -> Result<(), HeatSimError> {
    let (config, write_config) = args.into_config()?;

    if let Some(path) = write_config {
        config.save(&path)?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    println!("=== Heat Diffusion Demo ===\n");
    println!(
        "Grid: {}x{}, alpha={}, dt={}, dx={}",
        config.height, config.width, config.alpha, config.dt, config.dx
    );
    println!(
        "Boundary: {}, Initial: {:?}, Time budget: {}",
        config.boundary, config.initial, config.total_time
    );

    let mut sim = config.build_simulator()?;
    let params = sim.params();
    println!(
        "Courant number: {:.3}, Fourier number: {:.3}{}\n",
        params.courant_number(),
        params.fourier_number(),
        if params.is_stable() { "" } else { " (UNSTABLE)" }
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    println!("Initial state:");
    render(sim.grid(), &mut out)?;

    let initial_energy = sim.grid().energy();
    let summary = sim.run(config.total_time, config.save)?;

    match summary.converged_at {
        Some(t) => println!("Steady state achieved at t = {t:.2}:"),
        None => println!(
            "No steady state within t = {:.2} ({} steps):",
            summary.simulated_time, summary.steps_taken
        ),
    }
    render(sim.grid(), &mut out)?;

    println!("=== Simulation Complete ===");
    println!("Steps: {} of {}", summary.steps_taken, summary.step_budget);
    println!(
        "Energy: {:.4} -> {:.4}",
        initial_energy,
        sim.grid().energy()
    );
    println!("Range: [{:.2}, {:.2}]", sim.grid().min(), sim.grid().max());
    if config.save {
        println!("Snapshots written to {}", config.output_dir.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
