//! Simulation configuration
//!
//! [`SimulationConfig`] captures everything needed to build and run a
//! [`HeatSimulator`]. It round-trips through JSON; missing fields take the
//! reference scenario defaults (7×11 grid, α = 0.3, dt = 0.1, dx = 0.5,
//! Neumann, hot cell, 25 time units).

use super::{HeatSimulator, MIN_SIMULATION_SIZE};
use crate::error::{ensure_non_negative, HeatSimError, Result};
use crate::grid::{Grid, Pattern, Tolerance, RANDOM_MAX, RANDOM_MIN};
use crate::io::{CsvExporter, DEFAULT_OUTPUT_DIR};
use crate::solver::{BoundaryCondition, DiffusionParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// How the grid is filled before the first step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InitialState {
    /// [`Pattern::HotCell`]
    #[default]
    HotCell,
    /// [`Pattern::HotRectangle`]
    HotRectangle,
    /// Uniform random values in `[min, max)`
    Random {
        /// Inclusive lower bound
        #[serde(default = "default_random_min")]
        min: f64,
        /// Exclusive upper bound
        #[serde(default = "default_random_max")]
        max: f64,
        /// Generator seed; `None` draws from the OS-seeded thread generator
        #[serde(default)]
        seed: Option<u64>,
    },
}

fn default_random_min() -> f64 {
    RANDOM_MIN
}

fn default_random_max() -> f64 {
    RANDOM_MAX
}

impl From<Pattern> for InitialState {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::HotCell => Self::HotCell,
            Pattern::HotRectangle => Self::HotRectangle,
        }
    }
}

impl InitialState {
    /// Fill `grid` according to this initial state
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidRange`] for an empty random range.
    pub fn apply(&self, grid: &mut Grid) -> Result<()> {
        match *self {
            Self::HotCell => grid.init(Pattern::HotCell),
            Self::HotRectangle => grid.init(Pattern::HotRectangle),
            Self::Random { min, max, seed } => match seed {
                Some(seed) => grid.fill_random(&mut StdRng::seed_from_u64(seed), min, max)?,
                None => grid.set_random(min, max)?,
            },
        }
        Ok(())
    }
}

/// Complete description of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid rows
    pub height: usize,
    /// Grid columns
    pub width: usize,
    /// Thermal diffusivity
    pub alpha: f64,
    /// Time step
    pub dt: f64,
    /// Spatial step
    pub dx: f64,
    /// Boundary regime
    pub boundary: BoundaryCondition,
    /// Initial grid contents
    pub initial: InitialState,
    /// Simulated time budget
    pub total_time: f64,
    /// Write a CSV snapshot after every accepted step
    pub save: bool,
    /// Base directory for CSV snapshots
    pub output_dir: PathBuf,
    /// Steady-state tolerance
    pub tolerance: Tolerance,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            height: 7,
            width: 11,
            alpha: 0.3,
            dt: 0.1,
            dx: 0.5,
            boundary: BoundaryCondition::Neumann,
            initial: InitialState::HotCell,
            total_time: 25.0,
            save: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            tolerance: Tolerance::default(),
        }
    }
}

impl SimulationConfig {
    /// Load and validate a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// - [`HeatSimError::Io`] if the file cannot be read
    /// - [`HeatSimError::Config`] if it is not valid JSON for this type
    /// - any error from [`SimulationConfig::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        info!("Loaded simulation config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::Config`] on serialization failure or
    /// [`HeatSimError::Io`] if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validated diffusion parameters
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidParameter`] if `alpha`, `dt` or `dx` is
    /// not finite and positive.
    pub fn diffusion_params(&self) -> Result<DiffusionParams> {
        DiffusionParams::new(self.alpha, self.dt, self.dx)
    }

    /// Check every field without building anything
    ///
    /// # Errors
    ///
    /// - [`HeatSimError::InvalidParameter`] for bad `alpha`, `dt`, `dx`,
    ///   `total_time` or tolerance values
    /// - [`HeatSimError::InvalidDimensions`] for a grid side below 2
    /// - [`HeatSimError::InvalidRange`] for an empty random range
    pub fn validate(&self) -> Result<()> {
        self.diffusion_params()?;
        if self.height < MIN_SIMULATION_SIZE || self.width < MIN_SIMULATION_SIZE {
            return Err(HeatSimError::InvalidDimensions {
                height: self.height,
                width: self.width,
                min: MIN_SIMULATION_SIZE,
            });
        }
        ensure_non_negative("total_time", self.total_time)?;
        self.tolerance.validate()?;
        if let InitialState::Random { min, max, .. } = self.initial {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(HeatSimError::InvalidRange { min, max });
            }
        }
        Ok(())
    }

    /// Build a simulator with the configured boundary, tolerance, exporter and
    /// initial state applied
    ///
    /// # Errors
    ///
    /// Returns any error from [`SimulationConfig::validate`].
    pub fn build_simulator(&self) -> Result<HeatSimulator> {
        self.validate()?;
        let mut sim = HeatSimulator::from_params(self.height, self.width, self.diffusion_params()?)?
            .with_boundary_condition(self.boundary)
            .with_tolerance(self.tolerance)?
            .with_exporter(CsvExporter::new(&self.output_dir));
        self.initial.apply(sim.grid_mut())?;
        Ok(sim)
    }
}
