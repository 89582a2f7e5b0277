//! CSV snapshot export
//!
//! Each output line holds one grid column: the outer loop runs over `x`, the
//! inner loop over `y`. Fields are comma separated with no trailing comma.

use crate::error::Result;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Base directory used when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// File name for the snapshot written after accepted step `step` (1-based)
pub fn step_filename(step: usize) -> String {
    format!("heatmap{step}.csv")
}

/// Serialize `grid` as CSV into `out`
///
/// # Errors
///
/// Returns any error reported by the writer.
pub fn write_csv<W: Write>(grid: &Grid, out: &mut W) -> io::Result<()> {
    let width = grid.width();
    let values = grid.values();
    for x in 0..width {
        for y in 0..grid.height() {
            if y > 0 {
                out.write_all(b",")?;
            }
            write!(out, "{}", values[x + y * width])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes grid snapshots below a configured base directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvExporter {
    base_dir: PathBuf,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl CsvExporter {
    /// Create an exporter rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory all snapshots are written to
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full path for `filename` below the base directory
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    /// Write `grid` to `base_dir/filename`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns [`crate::HeatSimError::Io`] if the directory or file cannot be
    /// created or written.
    pub fn write(&self, grid: &Grid, filename: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.path_for(filename);
        let mut writer = BufWriter::new(File::create(&path)?);
        write_csv(grid, &mut writer)?;
        writer.flush()?;
        Ok(path)
    }

    /// Write `grid`, logging instead of propagating failures
    ///
    /// Returns the written path, or `None` if the export failed.
    pub fn save(&self, grid: &Grid, filename: &str) -> Option<PathBuf> {
        match self.write(grid, filename) {
            Ok(path) => {
                debug!("Saved grid snapshot to {}", path.display());
                Some(path)
            }
            Err(e) => {
                error!(
                    "Could not write grid snapshot {}: {}",
                    self.path_for(filename).display(),
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        // 2 rows, 3 columns; value = x + 10 * y
        let mut grid = Grid::new(2, 3).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                grid.set(x, y, (x + 10 * y) as f64).unwrap();
            }
        }
        grid
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("heat-sim-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_write_csv_column_major() {
        let mut out = Vec::new();
        write_csv(&sample_grid(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0,10\n1,11\n2,12\n");
    }

    #[test]
    fn test_write_csv_fractional_values() {
        let mut grid = Grid::with_value(1, 2, 0.5).unwrap();
        grid.set(1, 0, -16.25).unwrap();
        let mut out = Vec::new();
        write_csv(&grid, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.5\n-16.25\n");
    }

    #[test]
    fn test_step_filename() {
        assert_eq!(step_filename(1), "heatmap1.csv");
        assert_eq!(step_filename(250), "heatmap250.csv");
    }

    #[test]
    fn test_exporter_writes_file() {
        let dir = scratch_dir("export");
        let exporter = CsvExporter::new(&dir);
        let path = exporter.write(&sample_grid(), "snapshot.csv").unwrap();

        assert_eq!(path, dir.join("snapshot.csv"));
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0,10\n1,11\n2,12\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        // A regular file cannot act as the base directory
        let blocker = scratch_dir("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let exporter = CsvExporter::new(&blocker);
        assert!(exporter.write(&sample_grid(), "a.csv").is_err());
        assert_eq!(exporter.save(&sample_grid(), "a.csv"), None);

        let _ = fs::remove_file(&blocker);
    }

    #[test]
    fn test_default_base_dir() {
        let exporter = CsvExporter::default();
        assert_eq!(exporter.base_dir(), Path::new(DEFAULT_OUTPUT_DIR));
        assert_eq!(
            exporter.path_for("x.csv"),
            Path::new(DEFAULT_OUTPUT_DIR).join("x.csv")
        );
    }
}
