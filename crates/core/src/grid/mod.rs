//! Temperature grid and its initial conditions
//!
//! - [`Grid`]: flat row-major scalar field with checked cell access
//! - [`Pattern`]: deterministic initial temperature layouts
//! - [`Tolerance`]: steady-state comparison between successive grids

mod convergence;
mod field;
mod pattern;

pub use convergence::{Tolerance, DEFAULT_STEADY_STATE_TOLERANCE};
pub use field::{Grid, DEFAULT_SIZE, INITIAL_TEMPERATURE, RANDOM_MAX, RANDOM_MIN};
pub use pattern::{Pattern, COLD, HOT, WARM};
