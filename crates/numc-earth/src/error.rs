//! Error types for the earth crate.

use numc_ice::IceError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when building or querying the Earth model.
#[derive(Debug, Error)]
pub enum EarthError {
    /// Error from the ice rasters.
    #[error(transparent)]
    Ice(#[from] IceError),

    /// A data file could not be opened or read.
    #[error("Unable to read density profile {path}: {source}")]
    DataFile {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of the density profile could not be parsed.
    #[error("{path}:{line}: {reason}")]
    Malformed {
        /// Offending file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The density profile has no entries.
    #[error("Density profile has no entries")]
    EmptyProfile,

    /// Radius and density columns differ in length.
    #[error("Density profile has {radii} radii but {densities} densities")]
    ProfileMismatch {
        /// Number of radii.
        radii: usize,
        /// Number of densities.
        densities: usize,
    },
}
