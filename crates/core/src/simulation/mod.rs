//! Simulation driver and its configuration
//!
//! - [`HeatSimulator`]: owns the grid pair and runs the stepping loop
//! - [`SimulationConfig`]: JSON-backed description of a run

mod config;
mod heat_simulator;

pub use config::{InitialState, SimulationConfig};
pub use heat_simulator::{HeatSimulator, RunSummary, MIN_SIMULATION_SIZE};
