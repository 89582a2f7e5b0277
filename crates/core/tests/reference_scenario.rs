//! End-to-end run of the reference scenario
//!
//! 7×11 grid, α = 0.3, dt = 0.1, dx = 0.5, zero-flux boundaries, hot-cell
//! start, 25 time units of budget.

use approx::assert_relative_eq;
use heat_sim_core::{
    BoundaryCondition, CsvExporter, HeatSimulator, InitialState, Pattern, SimulationConfig,
    Tolerance,
};
use std::fs;
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn reference_simulator() -> HeatSimulator {
    let mut sim = HeatSimulator::new(7, 11, 0.3, 0.1, 0.5).unwrap();
    sim.select_boundary_condition(BoundaryCondition::Neumann);
    sim.grid_mut().init(Pattern::HotCell);
    sim
}

#[test]
fn test_reference_run_converges_within_budget() {
    let mut sim = reference_simulator();
    let initial_energy = sim.grid().energy();

    let summary = sim.run(25.0, false).unwrap();

    assert_eq!(summary.step_budget, 250);
    assert!(summary.converged(), "Expected steady state, got {summary:?}");
    let t = summary.converged_at.unwrap();
    assert!(t <= 25.0);
    // The L∞ change first drops below 0.01 on step index 117
    assert_relative_eq!(t, 11.7, epsilon = 1e-9);
    assert_eq!(summary.steps_taken, 118);

    assert_relative_eq!(sim.grid().energy(), initial_energy, epsilon = 1e-8);
}

#[test]
fn test_reference_run_approaches_uniform_mean() {
    let mut sim = reference_simulator();
    let grid = sim.grid();
    // Trapezoid weights sum to (height - 1) * (width - 1)
    let mean = grid.energy() / ((grid.height() - 1) * (grid.width() - 1)) as f64;

    sim.run(25.0, false).unwrap();

    let grid = sim.grid();
    assert!(grid.min() < mean && mean < grid.max());
    assert!(grid.max() - grid.min() < 1.0, "Residual spread too large:\n{grid}");
}

#[test]
fn test_config_reproduces_reference_run() {
    let config = SimulationConfig::default();
    let mut from_config = config.build_simulator().unwrap();
    let mut manual = reference_simulator();

    let a = from_config.run(config.total_time, config.save).unwrap();
    let b = manual.run(25.0, false).unwrap();

    assert_eq!(a, b);
    assert_eq!(from_config.grid(), manual.grid());
}

#[test]
fn test_tighter_tolerance_runs_longer() {
    let mut loose = reference_simulator();
    let mut tight = reference_simulator()
        .with_tolerance(Tolerance::absolute(0.001))
        .unwrap();

    let loose = loose.run(25.0, false).unwrap();
    let tight = tight.run(25.0, false).unwrap();
    assert!(tight.steps_taken > loose.steps_taken);
}

#[test]
fn test_save_writes_one_snapshot_per_accepted_step() {
    let dir = std::env::temp_dir().join(format!("heat-sim-snapshots-{}", std::process::id()));
    let mut sim = reference_simulator().with_exporter(CsvExporter::new(&dir));

    let summary = sim.run(0.5, true).unwrap();
    assert!(!summary.converged());

    for step in 1..=5 {
        let path = dir.join(format!("heatmap{step}.csv"));
        let contents = fs::read_to_string(&path).unwrap();
        // One line per column, one field per row
        assert_eq!(contents.lines().count(), 11);
        assert!(contents.lines().all(|line| line.split(',').count() == 7));
    }
    assert!(!dir.join("heatmap6.csv").exists());

    let last = fs::read_to_string(dir.join("heatmap5.csv")).unwrap();
    let first_field: f64 = last.split(',').next().unwrap().parse().unwrap();
    assert_eq!(first_field, sim.grid().at(0, 0).unwrap());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_random_start_converges_and_conserves() {
    let config = SimulationConfig {
        initial: InitialState::Random {
            min: -10.0,
            max: 10.0,
            seed: Some(2024),
        },
        total_time: 200.0,
        ..Default::default()
    };
    let mut sim = config.build_simulator().unwrap();
    let initial_energy = sim.grid().energy();

    let summary = sim.run(config.total_time, false).unwrap();
    assert!(summary.converged());
    assert_relative_eq!(sim.grid().energy(), initial_energy, epsilon = 1e-8);
}
