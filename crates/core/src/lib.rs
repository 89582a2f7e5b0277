//! Heat Simulation Core Library
//!
//! Explicit finite-difference simulation of 2D heat diffusion on a
//! rectangular grid, with fixed-temperature (Dirichlet) or zero-flux
//! (Neumann, ghost-cell) boundaries and a steady-state stopping test.
//!
//! ## Example
//!
//! ```rust
//! use heat_sim_core::{BoundaryCondition, HeatSimulator, Pattern};
//!
//! let mut sim = HeatSimulator::new(7, 11, 0.3, 0.1, 0.5)?
//!     .with_boundary_condition(BoundaryCondition::Neumann);
//! sim.grid_mut().init(Pattern::HotCell);
//!
//! let summary = sim.run(25.0, false)?;
//! assert!(summary.converged());
//! # Ok::<(), heat_sim_core::HeatSimError>(())
//! ```

// Errors shared by every module
pub mod error;

// Field storage, initial conditions and convergence
pub mod grid;

// Stencil passes and boundary strategies
pub mod solver;

// Driver loop and configuration
pub mod simulation;

// CSV export and text rendering
pub mod io;

pub use error::{HeatSimError, Result};
pub use grid::{Grid, Pattern, Tolerance};
pub use io::{render, CsvExporter};
pub use simulation::{HeatSimulator, InitialState, RunSummary, SimulationConfig};
pub use solver::{BoundaryCondition, DiffusionParams};
