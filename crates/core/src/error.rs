//! Error types for the heat simulation core
//!
//! Construction and configuration errors are returned to the caller.
//! Export I/O errors are surfaced by [`crate::io::CsvExporter::write`] and
//! swallowed (logged) by [`crate::io::CsvExporter::save`].

use thiserror::Error;

/// Errors produced by grid, simulator, configuration and export operations
#[derive(Debug, Error)]
pub enum HeatSimError {
    /// A physical or numerical parameter was non-finite or out of range
    #[error("Invalid parameter {name}: {value} is out of range")]
    InvalidParameter {
        /// Parameter name (e.g. `"alpha"`, `"dt"`)
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Grid dimensions below the supported minimum
    #[error("Invalid grid dimensions {height}x{width}: each side must be at least {min}")]
    InvalidDimensions {
        /// Requested height (rows)
        height: usize,
        /// Requested width (columns)
        width: usize,
        /// Smallest accepted side length
        min: usize,
    },

    /// Cell access outside the grid
    #[error("Cell ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Two grids that must share a shape do not
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// `(height, width)` of the reference grid
        expected: (usize, usize),
        /// `(height, width)` of the offending grid
        actual: (usize, usize),
    },

    /// Boundary condition name that does not match a known kind
    #[error("Unknown boundary condition: {0}")]
    UnknownBoundaryCondition(String),

    /// Initialization pattern name that does not match a known pattern
    #[error("Unknown initialization pattern: {0}")]
    UnknownPattern(String),

    /// Empty or non-finite sampling range for random fill
    #[error("Invalid random range [{min}, {max})")]
    InvalidRange {
        /// Inclusive lower bound
        min: f64,
        /// Exclusive upper bound
        max: f64,
    },

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl HeatSimError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HeatSimError>;

/// Validate that `value` is finite and strictly positive
///
/// # Errors
///
/// Returns [`HeatSimError::InvalidParameter`] otherwise.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HeatSimError::invalid_parameter(name, value))
    }
}

/// Validate that `value` is finite and not negative
///
/// # Errors
///
/// Returns [`HeatSimError::InvalidParameter`] otherwise.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(HeatSimError::invalid_parameter(name, value))
    }
}
