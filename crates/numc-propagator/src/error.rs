//! Error types for the propagation engine.

use numc_common::RandomError;
use numc_earth::EarthError;
use numc_physics::PhysicsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or running a propagation.
#[derive(Debug, Error)]
pub enum PropagationError {
    /// Earth model failure.
    #[error(transparent)]
    Earth(#[from] EarthError),

    /// Physics model failure.
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    /// Random sampling failure (e.g. flux rejection limit).
    #[error(transparent)]
    Random(#[from] RandomError),

    /// Configuration could not be parsed.
    #[error("Invalid configuration YAML: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Configuration file could not be read.
    #[error("Unable to read configuration {path}: {source}")]
    ConfigFile {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
