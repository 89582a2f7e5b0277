//! Time-stepping driver for 2D heat diffusion
//!
//! [`HeatSimulator`] owns a `current`/`next` pair of grids. Each step writes
//! `next` from `current` through the selected [`BoundaryCondition`], checks
//! for steady state, then swaps the buffers.

use crate::error::{ensure_non_negative, HeatSimError, Result};
use crate::grid::{Grid, Tolerance};
use crate::io::{step_filename, CsvExporter};
use crate::solver::{BoundaryCondition, DiffusionParams, STABILITY_LIMIT};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Smallest side length the simulator accepts
///
/// The zero-flux corner stencil needs one interior neighbour along each axis.
pub const MIN_SIMULATION_SIZE: usize = 2;

/// Outcome of [`HeatSimulator::run`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    /// Stencil passes executed, including the one that detected steady state
    pub steps_taken: usize,
    /// `ceil(total_time / dt)`
    pub step_budget: usize,
    /// Simulated time covered by accepted steps during this run
    pub simulated_time: f64,
    /// Time `i * dt` at which steady state was detected, if it was
    pub converged_at: Option<f64>,
}

impl RunSummary {
    /// Whether the run stopped on steady state rather than on the step budget
    pub fn converged(&self) -> bool {
        self.converged_at.is_some()
    }
}

/// Explicit finite-difference heat simulator
#[derive(Debug, Clone)]
pub struct HeatSimulator {
    params: DiffusionParams,
    // Ping-pong buffers: stencil reads `current`, writes `next`, then swap
    current: Grid,
    next: Grid,
    boundary: BoundaryCondition,
    tolerance: Tolerance,
    exporter: Option<CsvExporter>,
    /// Total simulated time over all accepted steps
    elapsed: f64,
}

impl HeatSimulator {
    /// Create a simulator with both grids filled with the initial temperature
    ///
    /// The boundary condition defaults to Neumann. Initialize the grid through
    /// [`HeatSimulator::grid_mut`] before running.
    ///
    /// # Arguments
    ///
    /// * `height` - Grid rows
    /// * `width` - Grid columns
    /// * `alpha` - Thermal diffusivity
    /// * `dt` - Time step
    /// * `dx` - Spatial step
    ///
    /// # Errors
    ///
    /// - [`HeatSimError::InvalidParameter`] if `alpha`, `dt` or `dx` is not
    ///   finite and positive
    /// - [`HeatSimError::InvalidDimensions`] if either side is below
    ///   [`MIN_SIMULATION_SIZE`]
    pub fn new(height: usize, width: usize, alpha: f64, dt: f64, dx: f64) -> Result<Self> {
        Self::from_params(height, width, DiffusionParams::new(alpha, dt, dx)?)
    }

    /// Create a simulator from already validated parameters
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidDimensions`] if either side is below
    /// [`MIN_SIMULATION_SIZE`].
    pub fn from_params(height: usize, width: usize, params: DiffusionParams) -> Result<Self> {
        if height < MIN_SIMULATION_SIZE || width < MIN_SIMULATION_SIZE {
            return Err(HeatSimError::InvalidDimensions {
                height,
                width,
                min: MIN_SIMULATION_SIZE,
            });
        }

        if !params.is_stable() {
            warn!(
                "Fourier number {:.3} exceeds the explicit stability limit {}; expect oscillation",
                params.fourier_number(),
                STABILITY_LIMIT
            );
        }

        info!(
            "Heat simulator initialized: {}x{} grid, alpha={}, dt={}, dx={}",
            height, width, params.alpha, params.dt, params.dx
        );

        Ok(Self {
            params,
            current: Grid::new(height, width)?,
            next: Grid::new(height, width)?,
            boundary: BoundaryCondition::default(),
            tolerance: Tolerance::default(),
            exporter: None,
            elapsed: 0.0,
        })
    }

    /// Set the boundary condition (builder form)
    pub fn with_boundary_condition(mut self, boundary: BoundaryCondition) -> Self {
        self.select_boundary_condition(boundary);
        self
    }

    /// Set the steady-state tolerance (builder form)
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidParameter`] if either bound is negative
    /// or not finite, since such a run could never settle.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Result<Self> {
        self.set_tolerance(tolerance)?;
        Ok(self)
    }

    /// Attach a CSV exporter used when running with `save = true`
    pub fn with_exporter(mut self, exporter: CsvExporter) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Bind the stepping strategy used by [`HeatSimulator::step`]
    pub fn select_boundary_condition(&mut self, boundary: BoundaryCondition) {
        debug!("Boundary condition set to {}", boundary);
        self.boundary = boundary;
    }

    /// Active boundary condition
    pub fn boundary_condition(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Steady-state tolerance
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Replace the steady-state tolerance
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidParameter`] if either bound is negative
    /// or not finite. The previous tolerance is kept.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) -> Result<()> {
        tolerance.validate()?;
        self.tolerance = tolerance;
        Ok(())
    }

    /// Diffusion parameters
    pub fn params(&self) -> DiffusionParams {
        self.params
    }

    /// Attached exporter, if any
    pub fn exporter(&self) -> Option<&CsvExporter> {
        self.exporter.as_ref()
    }

    /// Current (committed) grid
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// Mutable access to the current grid, for initialization
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    /// Replace the current grid with a copy of `grid`
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::DimensionMismatch`] if `grid` does not match the
    /// simulator's shape.
    pub fn load_grid(&mut self, grid: &Grid) -> Result<()> {
        self.current.copy_from(grid)
    }

    /// Tentative grid written by the last [`HeatSimulator::step`]
    pub fn next_grid(&self) -> &Grid {
        &self.next
    }

    /// Simulated time accumulated over all accepted steps
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Compute `next` from `current` without committing it
    pub fn step(&mut self) {
        // Both grids share the shape checked in `from_params`
        self.boundary.step_unchecked(&self.current, &mut self.next, self.params);
    }

    /// Compute and commit a single step
    pub fn advance(&mut self) {
        self.step();
        self.commit();
    }

    fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.elapsed += self.params.dt;
    }

    /// Step until steady state or until `total_time` is covered
    ///
    /// Runs at most `ceil(total_time / dt)` steps. A step whose result is
    /// within tolerance of the current grid ends the run without being
    /// committed, and its index `i` gives the reported time `i * dt`.
    ///
    /// # Arguments
    ///
    /// * `total_time` - Simulated time budget
    /// * `save` - Write a CSV snapshot after every accepted step, through
    ///   the attached exporter
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidParameter`] if `total_time` is negative
    /// or not finite. Export failures are logged and do not abort the run.
    pub fn run(&mut self, total_time: f64, save: bool) -> Result<RunSummary> {
        ensure_non_negative("total_time", total_time)?;
        let step_budget = self.params.step_count(total_time);
        let dt = self.params.dt;

        info!(
            "Running {} simulation for t={:.2} ({} steps)",
            self.boundary, total_time, step_budget
        );

        let exporter = match (save, &self.exporter) {
            (true, Some(exporter)) => Some(exporter.clone()),
            (true, None) => {
                warn!("Saving requested but no exporter is attached; snapshots are skipped");
                None
            }
            (false, _) => None,
        };

        let mut summary = RunSummary {
            steps_taken: 0,
            step_budget,
            simulated_time: 0.0,
            converged_at: None,
        };

        for i in 0..step_budget {
            self.step();
            summary.steps_taken = i + 1;

            if self.current.is_converged(&self.next, self.tolerance) {
                let t = i as f64 * dt;
                info!("Steady state achieved at t = {:.2}", t);
                summary.converged_at = Some(t);
                break;
            }

            self.commit();
            summary.simulated_time = (i + 1) as f64 * dt;

            if let Some(exporter) = &exporter {
                exporter.save(&self.current, &step_filename(i + 1));
            }
        }

        if !summary.converged() {
            info!(
                "Step budget exhausted after {} steps without reaching steady state",
                summary.steps_taken
            );
        }

        debug!(
            "Run finished: steps={}, energy={:.6}, min={:.3}, max={:.3}",
            summary.steps_taken,
            self.current.energy(),
            self.current.min(),
            self.current.max()
        );

        Ok(summary)
    }
}
