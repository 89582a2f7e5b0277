//! Explicit five-point stencil passes
//!
//! Both passes read only `current` and write every cell of `next`, so rows of
//! `next` are updated in parallel with Rayon.
//!
//! ```text
//! next = cur + α·(dt/dx²)·(up + left + right + below − 4·cur)
//! ```
//!
//! Orientation: `up` is row `y - 1`, `below` is row `y + 1`.

use super::params::DiffusionParams;
use rayon::prelude::*;

/// The four orthogonal neighbour values fed into the stencil
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors {
    /// Value at `(x, y - 1)`
    pub up: f64,
    /// Value at `(x - 1, y)`
    pub left: f64,
    /// Value at `(x + 1, y)`
    pub right: f64,
    /// Value at `(x, y + 1)`
    pub below: f64,
}

/// Apply the explicit update to a single cell
///
/// # Arguments
///
/// * `curr` - Current cell value
/// * `n` - Neighbour values (true or ghost)
/// * `fourier` - Stencil coefficient `alpha * dt / dx²`
#[inline]
pub fn diffuse(curr: f64, n: Neighbors, fourier: f64) -> f64 {
    curr + fourier * (n.up + n.left + n.right + n.below - 4.0 * curr)
}

/// True neighbours of an interior cell
///
/// Caller guarantees `0 < x < width - 1` and `0 < y < height - 1`.
#[inline]
pub fn interior_neighbors(current: &[f64], width: usize, x: usize, y: usize) -> Neighbors {
    let idx = y * width + x;
    Neighbors {
        up: current[idx - width],
        left: current[idx - 1],
        right: current[idx + 1],
        below: current[idx + width],
    }
}

/// Neighbours with zero-flux ghost cells substituted at the boundary
///
/// A neighbour that would fall outside the grid is replaced by the interior
/// cell on the opposite side, so that slot's value appears twice:
///
/// - top edge (`y = 0`): `up` takes the `below` value
/// - bottom edge (`y = height - 1`): `below` takes the `up` value
/// - left edge (`x = 0`): `left` takes the `right` value
/// - right edge (`x = width - 1`): `right` takes the `left` value
/// - corners combine the two applicable substitutions
///
/// Requires `width >= 2` and `height >= 2`.
#[inline]
pub fn neumann_neighbors(
    current: &[f64],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
) -> Neighbors {
    let at = |x: usize, y: usize| current[y * width + x];

    let below = if y + 1 < height { at(x, y + 1) } else { at(x, y - 1) };
    let up = if y > 0 { at(x, y - 1) } else { below };
    let right = if x + 1 < width { at(x + 1, y) } else { at(x - 1, y) };
    let left = if x > 0 { at(x - 1, y) } else { right };

    Neighbors {
        up,
        left,
        right,
        below,
    }
}

/// Fixed-temperature pass
///
/// Interior cells (`1 <= x < width - 1`, `1 <= y < height - 1`) get the
/// five-point update. The boundary ring is copied from `current` unchanged,
/// holding the Dirichlet values fixed.
///
/// # Arguments
///
/// * `current` - Input temperature field (row-major)
/// * `next` - Output temperature field, same length as `current`
/// * `width` - Grid width in cells
/// * `height` - Grid height in cells
/// * `params` - Diffusion parameters
pub(crate) fn step_dirichlet_cpu(
    current: &[f64],
    next: &mut [f64],
    width: usize,
    height: usize,
    params: DiffusionParams,
) {
    debug_assert_eq!(current.len(), width * height);
    debug_assert_eq!(next.len(), current.len());
    let fourier = params.fourier_number();

    next.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let src = &current[y * width..(y + 1) * width];
            if y == 0 || y == height - 1 {
                row.copy_from_slice(src);
                return;
            }
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = if x == 0 || x == width - 1 {
                    src[x]
                } else {
                    diffuse(src[x], interior_neighbors(current, width, x, y), fourier)
                };
            }
        });
}

/// Zero-flux (Neumann, q = 0) pass using ghost-cell reflection
///
/// Every cell, boundary included, gets the five-point update with the
/// neighbours from [`neumann_neighbors`]. The trapezoid-weighted sum of the
/// field ([`crate::Grid::energy`]) is conserved by each pass.
///
/// # Arguments
///
/// * `current` - Input temperature field (row-major)
/// * `next` - Output temperature field, same length as `current`
/// * `width` - Grid width in cells, at least 2
/// * `height` - Grid height in cells, at least 2
/// * `params` - Diffusion parameters
pub(crate) fn step_neumann_cpu(
    current: &[f64],
    next: &mut [f64],
    width: usize,
    height: usize,
    params: DiffusionParams,
) {
    debug_assert!(width >= 2 && height >= 2);
    debug_assert_eq!(current.len(), width * height);
    debug_assert_eq!(next.len(), current.len());
    let fourier = params.fourier_number();

    next.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let curr = current[y * width + x];
                let neighbors = neumann_neighbors(current, width, height, x, y);
                *cell = diffuse(curr, neighbors, fourier);
            }
        });
}
