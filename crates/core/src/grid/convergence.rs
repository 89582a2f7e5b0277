//! Steady-state detection between successive grids

use super::Grid;
use crate::error::{ensure_non_negative, Result};
use serde::{Deserialize, Serialize};

/// L∞ tolerance used by the simulator when none is configured
pub const DEFAULT_STEADY_STATE_TOLERANCE: f64 = 0.01;

/// Mixed absolute/relative tolerance for steady-state checks
///
/// A cell is settled when `|next - current| <= absolute + relative * |current|`.
/// With `relative == 0.0` this is the plain L∞-norm test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Absolute bound on the per-cell change
    pub absolute: f64,
    /// Bound on the per-cell change relative to the current value
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::absolute(DEFAULT_STEADY_STATE_TOLERANCE)
    }
}

impl Tolerance {
    /// Purely absolute tolerance
    pub const fn absolute(absolute: f64) -> Self {
        Self {
            absolute,
            relative: 0.0,
        }
    }

    /// Combined absolute and relative tolerance
    pub const fn mixed(absolute: f64, relative: f64) -> Self {
        Self { absolute, relative }
    }

    /// Check that both bounds are finite and not negative
    ///
    /// # Errors
    ///
    /// Returns [`crate::HeatSimError::InvalidParameter`] naming the offending
    /// bound.
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("tolerance.absolute", self.absolute)?;
        ensure_non_negative("tolerance.relative", self.relative)?;
        Ok(())
    }

    /// Whether a single cell moved from `current` to `next` within tolerance
    #[inline]
    pub fn accepts(&self, current: f64, next: f64) -> bool {
        (next - current).abs() <= self.absolute + self.relative * current.abs()
    }
}

impl Grid {
    /// Largest absolute per-cell difference (L∞ norm of `next - self`)
    ///
    /// Returns `None` if the grids differ in shape, and `Some(NaN)` if any
    /// cell difference is NaN, matching [`Grid::is_steady_state`] rejecting it.
    pub fn max_abs_diff(&self, next: &Grid) -> Option<f64> {
        if self.shape() != next.shape() {
            return None;
        }
        Some(
            self.values()
                .iter()
                .zip(next.values())
                .map(|(a, b)| (b - a).abs())
                .fold(0.0, |max, diff| {
                    if max.is_nan() || diff.is_nan() {
                        f64::NAN
                    } else {
                        max.max(diff)
                    }
                }),
        )
    }

    /// Whether `next` is within `tolerance` of `self` in the L∞ norm
    ///
    /// # Arguments
    ///
    /// * `next` - The grid one step ahead of `self`
    /// * `tolerance` - Largest accepted per-cell change
    ///
    /// # Returns
    ///
    /// `true` iff every `|next[i] - self[i]| <= tolerance`; `false` on shape mismatch
    pub fn is_steady_state(&self, next: &Grid, tolerance: f64) -> bool {
        self.is_converged(next, Tolerance::absolute(tolerance))
    }

    /// Whether every cell of `next` is accepted by `tolerance` relative to `self`
    pub fn is_converged(&self, next: &Grid, tolerance: Tolerance) -> bool {
        self.shape() == next.shape()
            && self
                .values()
                .iter()
                .zip(next.values())
                .all(|(&current, &candidate)| tolerance.accepts(current, candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_state_boundary() {
        // 0.25 and 0.5 are exact in binary, so the difference is exactly 0.25
        let current = Grid::with_value(4, 5, 0.25).unwrap();
        let mut next = current.clone();
        next.set(2, 3, 0.5).unwrap();

        assert!(current.is_steady_state(&next, 0.25));
        assert!(!current.is_steady_state(&next, 0.25 - 1e-12));

        next.set(2, 3, 0.5 + 1e-12).unwrap();
        assert!(!current.is_steady_state(&next, 0.25));
    }

    #[test]
    fn test_steady_state_identical_grids() {
        let grid = Grid::with_value(3, 3, 42.0).unwrap();
        assert!(grid.is_steady_state(&grid.clone(), 0.0));
        assert_eq!(grid.max_abs_diff(&grid), Some(0.0));
    }

    #[test]
    fn test_steady_state_sign_independent() {
        let current = Grid::with_value(2, 2, 10.0).unwrap();
        let mut next = current.clone();
        next.set(0, 1, 9.5).unwrap();
        assert!(current.is_steady_state(&next, 0.5));
        assert!(!current.is_steady_state(&next, 0.49));
        assert_eq!(current.max_abs_diff(&next), Some(0.5));
    }

    #[test]
    fn test_steady_state_shape_mismatch() {
        let a = Grid::with_value(3, 4, 1.0).unwrap();
        let b = Grid::with_value(4, 3, 1.0).unwrap();
        assert!(!a.is_steady_state(&b, f64::MAX));
        assert_eq!(a.max_abs_diff(&b), None);
    }

    #[test]
    fn test_max_abs_diff_propagates_nan() {
        let current = Grid::with_value(2, 3, 1.0).unwrap();
        let mut next = current.clone();
        next.set(0, 0, 1.005).unwrap();
        next.set(2, 1, f64::NAN).unwrap();

        assert!(current.max_abs_diff(&next).unwrap().is_nan());
        assert!(!current.is_steady_state(&next, 0.01));

        // NaN ahead of a larger finite difference still wins
        next.set(0, 0, f64::NAN).unwrap();
        next.set(2, 1, 50.0).unwrap();
        assert!(current.max_abs_diff(&next).unwrap().is_nan());
    }

    #[test]
    fn test_mixed_tolerance() {
        let current = Grid::with_value(1, 2, 1000.0).unwrap();
        let mut next = current.clone();
        next.set(1, 0, 1000.5).unwrap();

        assert!(!current.is_converged(&next, Tolerance::absolute(0.01)));
        // 0.01 + 1e-3 * 1000 = 1.01 >= 0.5
        assert!(current.is_converged(&next, Tolerance::mixed(0.01, 1e-3)));
    }

    #[test]
    fn test_tolerance_validate() {
        assert!(Tolerance::default().validate().is_ok());
        assert!(Tolerance::mixed(0.0, 0.0).validate().is_ok());
        assert!(Tolerance::absolute(-1e-9).validate().is_err());
        assert!(Tolerance::absolute(f64::NAN).validate().is_err());
        assert!(Tolerance::mixed(0.01, -0.5).validate().is_err());
    }

    #[test]
    fn test_default_tolerance() {
        let tol = Tolerance::default();
        assert_eq!(tol.absolute, DEFAULT_STEADY_STATE_TOLERANCE);
        assert_eq!(tol.relative, 0.0);
        assert!(tol.accepts(1.0, 1.01 - 1e-9));
        assert!(!tol.accepts(1.0, 1.02));
    }
}
