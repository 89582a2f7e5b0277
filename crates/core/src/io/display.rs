//! Fixed-width text rendering

use crate::grid::Grid;
use std::fmt;
use std::io::{self, Write};

impl fmt::Display for Grid {
    /// Row by row, each value right-aligned in 6 columns with 1 decimal,
    /// followed by a blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values().chunks_exact(self.width()) {
            for value in row {
                write!(f, "{value:6.1}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}

/// Write the text rendering of `grid` to `out`
///
/// # Errors
///
/// Returns any error reported by the writer.
pub fn render<W: Write>(grid: &Grid, out: &mut W) -> io::Result<()> {
    write!(out, "{grid}")
}
