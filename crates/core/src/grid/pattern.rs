//! Deterministic initial temperature layouts

use super::Grid;
use crate::error::HeatSimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Background temperature
pub const COLD: f64 = 16.0;

/// Temperature of the ring or plus around the hot region
pub const WARM: f64 = 150.0;

/// Temperature of the hot region
pub const HOT: f64 = 250.0;

/// Initial temperature layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    /// Hot disc at the grid centre with a warm ring, cold elsewhere.
    ///
    /// With `r = ceil(min(m, n) / 4)` and `d` the squared distance from the
    /// centre: `d < r` is hot, `d < r²` is warm.
    HotCell,
    /// Single hot cell at the integer centre, its 8 neighbours warm, cold elsewhere.
    HotRectangle,
}

impl Pattern {
    /// Kebab-case name used in configuration files and on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HotCell => "hot-cell",
            Self::HotRectangle => "hot-rectangle",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = HeatSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "hot-cell" | "hotcell" => Ok(Self::HotCell),
            "hot-rectangle" | "hotrectangle" => Ok(Self::HotRectangle),
            _ => Err(HeatSimError::UnknownPattern(s.to_string())),
        }
    }
}

impl Grid {
    /// Overwrite every cell according to `pattern`
    pub fn init(&mut self, pattern: Pattern) {
        let width = self.width();
        let height = self.height();
        let values = self.values_mut();

        match pattern {
            Pattern::HotCell => {
                let radius = (width.min(height) as f64 / 4.0).ceil();
                let radius_sq = radius * radius;
                // Geometric centre in cell coordinates; an exact cell on odd sides
                let cx = (width - 1) as f64 / 2.0;
                let cy = (height - 1) as f64 / 2.0;

                for (y, row) in values.chunks_exact_mut(width).enumerate() {
                    for (x, cell) in row.iter_mut().enumerate() {
                        let dist_sq = (x as f64 - cx).powi(2) + (y as f64 - cy).powi(2);
                        *cell = if dist_sq < radius {
                            HOT
                        } else if dist_sq < radius_sq {
                            WARM
                        } else {
                            COLD
                        };
                    }
                }
            }
            Pattern::HotRectangle => {
                let cx = width / 2;
                let cy = height / 2;

                for (y, row) in values.chunks_exact_mut(width).enumerate() {
                    for (x, cell) in row.iter_mut().enumerate() {
                        let x_dist = x.abs_diff(cx);
                        let y_dist = y.abs_diff(cy);
                        *cell = match (x_dist, y_dist) {
                            (0, 0) => HOT,
                            // plus and diagonals
                            (0..=1, 0..=1) => WARM,
                            _ => COLD,
                        };
                    }
                }
            }
        }
    }
}
