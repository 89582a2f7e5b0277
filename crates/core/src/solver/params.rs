//! Thermal and numerical parameters for the explicit scheme

use crate::error::{ensure_positive, Result};
use serde::{Deserialize, Serialize};

/// Largest Fourier number for which the explicit 2D five-point scheme is stable
pub const STABILITY_LIMIT: f64 = 0.25;

/// Parameters shared by every stencil pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffusionParams {
    /// Thermal diffusivity (length²/time)
    pub alpha: f64,
    /// Time step
    pub dt: f64,
    /// Spatial step (cell size)
    pub dx: f64,
}

impl DiffusionParams {
    /// Create validated parameters
    ///
    /// # Errors
    ///
    /// Returns [`crate::HeatSimError::InvalidParameter`] if any value is
    /// non-finite, zero or negative.
    pub fn new(alpha: f64, dt: f64, dx: f64) -> Result<Self> {
        Ok(Self {
            alpha: ensure_positive("alpha", alpha)?,
            dt: ensure_positive("dt", dt)?,
            dx: ensure_positive("dx", dx)?,
        })
    }

    /// Courant number `c = dt / dx²`
    #[inline]
    pub fn courant_number(&self) -> f64 {
        self.dt / (self.dx * self.dx)
    }

    /// Fourier number `alpha * dt / dx²`, the stencil coefficient
    #[inline]
    pub fn fourier_number(&self) -> f64 {
        self.alpha * self.courant_number()
    }

    /// Whether the explicit update is stable for these parameters
    pub fn is_stable(&self) -> bool {
        self.fourier_number() <= STABILITY_LIMIT
    }

    /// Number of steps needed to cover `total_time`, `ceil(total_time / dt)`
    pub fn step_count(&self, total_time: f64) -> usize {
        (total_time / self.dt).ceil() as usize
    }
}
