//! Row-major temperature field
//!
//! Stores a 2D scalar field as a flat `Vec<f64>` where cell `(x, y)` lives at
//! index `x + y * width`. The shape is fixed at construction.

use crate::error::{HeatSimError, Result};
use rand::Rng;

/// Side length of the default (degenerate) grid
pub const DEFAULT_SIZE: usize = 3;

/// Fill value for explicitly sized grids, overwritten by [`Grid::init`]
pub const INITIAL_TEMPERATURE: f64 = 32.0;

/// Largest cell count whose `f64` buffer stays within `isize::MAX` bytes
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Default lower bound for random fills
pub const RANDOM_MIN: f64 = -10.0;

/// Default upper bound (exclusive) for random fills
pub const RANDOM_MAX: f64 = 10.0;

/// 2D temperature field
///
/// `values.len() == width * height` holds for the lifetime of the grid.
/// Coordinates are valid for `0 <= x < width` and `0 <= y < height`.
#[derive(Debug, Clone)]
pub struct Grid {
    values: Vec<f64>,
    width: usize,
    height: usize,
}

impl Default for Grid {
    /// 3×3 grid filled with zeros. Must be initialized before use.
    fn default() -> Self {
        Self {
            values: vec![0.0; DEFAULT_SIZE * DEFAULT_SIZE],
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }
}

impl Grid {
    /// Create a grid filled with [`INITIAL_TEMPERATURE`]
    ///
    /// # Arguments
    ///
    /// * `height` - Number of rows (`m`)
    /// * `width` - Number of columns (`n`)
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidDimensions`] if either side is zero or
    /// the grid is too large to allocate.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Self::with_value(height, width, INITIAL_TEMPERATURE)
    }

    /// Create a grid with every cell set to `value`
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidDimensions`] if either side is zero or
    /// the cell count does not fit in an allocation.
    pub fn with_value(height: usize, width: usize, value: f64) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0 && len <= MAX_CELLS);
        let Some(len) = len else {
            return Err(HeatSimError::InvalidDimensions {
                height,
                width,
                min: 1,
            });
        };
        Ok(Self {
            values: vec![value; len],
            width,
            height,
        })
    }

    /// Grid width (number of columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (number of rows)
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width)` pair, used for shape comparisons
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(x + y * self.width)
        } else {
            Err(HeatSimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Read the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn at(&self, x: usize, y: usize) -> Result<f64> {
        let idx = self.index(x, y)?;
        Ok(self.values[idx])
    }

    /// Mutable reference to the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn at_mut(&mut self, x: usize, y: usize) -> Result<&mut f64> {
        let idx = self.index(x, y)?;
        Ok(&mut self.values[idx])
    }

    /// Write `value` into the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> Result<()> {
        *self.at_mut(x, y)? = value;
        Ok(())
    }

    /// Backing buffer in row-major order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable backing buffer in row-major order
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: f64) {
        self.values.fill(value);
    }

    /// Copy every cell from `source`, which must have the same shape
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::DimensionMismatch`] if the shapes differ.
    pub fn copy_from(&mut self, source: &Grid) -> Result<()> {
        if self.shape() != source.shape() {
            return Err(HeatSimError::DimensionMismatch {
                expected: self.shape(),
                actual: source.shape(),
            });
        }
        self.values.copy_from_slice(&source.values);
        Ok(())
    }

    /// Overwrite every cell with a uniform sample from `[min, max)`
    ///
    /// Draws from the thread-local generator, seeded from the OS.
    /// Use [`Grid::fill_random`] with a seeded generator for reproducible runs.
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidRange`] if the range is empty or non-finite.
    pub fn set_random(&mut self, min: f64, max: f64) -> Result<()> {
        self.fill_random(&mut rand::rng(), min, max)
    }

    /// Overwrite every cell with a uniform sample from `[min, max)` drawn from `rng`
    ///
    /// # Errors
    ///
    /// Returns [`HeatSimError::InvalidRange`] if the range is empty or non-finite.
    pub fn fill_random<R: Rng>(&mut self, rng: &mut R, min: f64, max: f64) -> Result<()> {
        if !(min.is_finite() && max.is_finite() && min < max && (max - min).is_finite()) {
            return Err(HeatSimError::InvalidRange { min, max });
        }
        for cell in &mut self.values {
            *cell = rng.random_range(min..max);
        }
        Ok(())
    }

    /// Exact element-wise equality
    ///
    /// Intended for exact-state tests; use [`Grid::is_steady_state`] for convergence.
    pub fn is_equal(&self, other: &Grid) -> bool {
        self.shape() == other.shape() && self.values == other.values
    }

    /// Sum of all cell values
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Trapezoid-weighted sum of the field
    ///
    /// Edge cells count one half and corner cells one quarter. This is the
    /// discrete heat content the zero-flux ghost-cell scheme conserves.
    pub fn energy(&self) -> f64 {
        let mut total = 0.0;
        for (y, row) in self.values.chunks_exact(self.width).enumerate() {
            let wy = trapezoid_weight(y, self.height);
            for (x, &value) in row.iter().enumerate() {
                total += wy * trapezoid_weight(x, self.width) * value;
            }
        }
        total
    }

    /// Smallest cell value
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest cell value
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

#[inline]
fn trapezoid_weight(i: usize, len: usize) -> f64 {
    if len > 1 && (i == 0 || i == len - 1) {
        0.5
    } else {
        1.0
    }
}
