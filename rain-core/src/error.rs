//! Error types for grid loading, parameter validation and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur before or around a simulation run.
///
/// Everything here is fatal and surfaced before any simulation state is
/// constructed (or, for [`SimError::RecordIo`], before the record is
/// considered persisted). Non-convergence of raindrops is *not* an error;
/// it is reported as a run statistic by
/// [`crate::simulation::Simulation`].
#[derive(Debug, Error)]
pub enum SimError {
    /// The grid file could not be read at all.
    #[error("failed to read elevation grid {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A grid field did not parse as a floating-point number.
    #[error("grid row {row}, field {col}: {value:?} is not a number")]
    MalformedField {
        /// 1-based row number in the input.
        row: usize,
        /// 1-based field number within the row.
        col: usize,
        value: String,
    },

    /// A grid row had a different number of fields than the first row.
    #[error("grid row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// The grid input contained no rows.
    #[error("elevation grid input contains no rows")]
    EmptyGrid,

    /// The configured extent does not fit inside the loaded grid.
    #[error("length {length} exceeds the grid extent ({rows} rows x {cols} cols)")]
    LengthOutOfRange {
        length: usize,
        rows: usize,
        cols: usize,
    },

    /// A run parameter was zero, negative or otherwise unusable.
    #[error("{name} must be positive (got {value})")]
    InvalidParameter { name: &'static str, value: String },

    /// The outlet record could not be appended.
    #[error("failed to append outlet record to {path}: {source}")]
    RecordIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
