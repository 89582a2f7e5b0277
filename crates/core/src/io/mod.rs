//! Grid output: CSV snapshots and text rendering
//!
//! Both collaborators only read the grid through its public accessors.

mod csv_export;
mod display;

pub use csv_export::{step_filename, write_csv, CsvExporter, DEFAULT_OUTPUT_DIR};
pub use display::render;
