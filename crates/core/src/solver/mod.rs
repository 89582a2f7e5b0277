//! Explicit finite-difference solver
//!
//! The solver is a set of pure passes over row-major `f64` buffers plus the
//! [`BoundaryCondition`] enum that dispatches between them.
//!
//! # Scheme
//!
//! Forward Euler in time, second-order central differences in space:
//! ```text
//! T'(x,y) = T + α·dt/dx²·(T(x,y−1) + T(x−1,y) + T(x+1,y) + T(x,y+1) − 4T)
//! ```
//!
//! The update is stable while the Fourier number `α·dt/dx²` stays at or
//! below [`STABILITY_LIMIT`].

mod boundary;
mod params;
pub mod stencil;

pub use boundary::BoundaryCondition;
pub use params::{DiffusionParams, STABILITY_LIMIT};
pub use stencil::Neighbors;
