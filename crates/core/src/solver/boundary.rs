//! Boundary-condition strategy selection

use super::params::DiffusionParams;
use super::stencil::{step_dirichlet_cpu, step_neumann_cpu};
use crate::error::{HeatSimError, Result};
use crate::grid::Grid;
use crate::simulation::MIN_SIMULATION_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boundary regime applied by each time step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryCondition {
    /// Fixed temperature: the outer ring keeps its values
    Dirichlet,
    /// Zero flux (q = 0) via ghost-cell reflection
    #[default]
    Neumann,
}

impl BoundaryCondition {
    /// Every supported kind
    pub const ALL: [Self; 2] = [Self::Dirichlet, Self::Neumann];

    /// Lowercase name used in configuration files and on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dirichlet => "dirichlet",
            Self::Neumann => "neumann",
        }
    }

    /// Compute `next` from `current` with this boundary regime
    ///
    /// Reads only `current`.
    ///
    /// # Errors
    ///
    /// - [`HeatSimError::DimensionMismatch`] if the grids differ in shape
    /// - [`HeatSimError::InvalidDimensions`] if a Neumann pass is asked for on
    ///   a grid with fewer than [`MIN_SIMULATION_SIZE`] rows or columns
    pub fn step(&self, current: &Grid, next: &mut Grid, params: DiffusionParams) -> Result<()> {
        if current.shape() != next.shape() {
            return Err(HeatSimError::DimensionMismatch {
                expected: current.shape(),
                actual: next.shape(),
            });
        }
        let (height, width) = current.shape();
        let too_small = height < MIN_SIMULATION_SIZE || width < MIN_SIMULATION_SIZE;
        if matches!(self, Self::Neumann) && too_small {
            return Err(HeatSimError::InvalidDimensions {
                height,
                width,
                min: MIN_SIMULATION_SIZE,
            });
        }
        self.step_unchecked(current, next, params);
        Ok(())
    }

    /// [`BoundaryCondition::step`] for callers that already hold same-shaped
    /// grids of at least [`MIN_SIMULATION_SIZE`] per side
    pub(crate) fn step_unchecked(&self, current: &Grid, next: &mut Grid, params: DiffusionParams) {
        let (width, height) = (current.width(), current.height());
        match self {
            Self::Dirichlet => {
                step_dirichlet_cpu(current.values(), next.values_mut(), width, height, params);
            }
            Self::Neumann => {
                step_neumann_cpu(current.values(), next.values_mut(), width, height, params);
            }
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryCondition {
    type Err = HeatSimError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bc| bc.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HeatSimError::UnknownBoundaryCondition(s.to_string()))
    }
}
