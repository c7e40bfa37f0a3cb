//! Error types for the ice crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or querying ice rasters.
#[derive(Debug, Error)]
pub enum IceError {
    /// A raster file could not be opened or read.
    #[error("Unable to read raster file {path}: {source}")]
    DataFile {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A raster file does not hold exactly `4 * ncols * nrows` bytes.
    #[error("Raster file {path} has {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// Offending file.
        path: PathBuf,
        /// Expected length in bytes.
        expected: u64,
        /// Actual length in bytes.
        actual: u64,
    },

    /// An in-memory grid was given the wrong number of samples.
    #[error("Grid of {ncols}x{nrows} needs {expected} samples, got {actual}")]
    ShapeMismatch {
        /// Number of columns.
        ncols: usize,
        /// Number of rows.
        nrows: usize,
        /// Expected sample count.
        expected: usize,
        /// Actual sample count.
        actual: usize,
    },

    /// A projected coordinate falls outside the grid bounding box.
    #[error("Converting ({lat}, {lon}) to grid coordinates gives out-of-range values ({x}, {y})")]
    OutOfDomain {
        /// Requested latitude (degrees).
        lat: f64,
        /// Requested longitude (degrees).
        lon: f64,
        /// Projected x (km).
        x: f64,
        /// Projected y (km).
        y: f64,
    },
}
