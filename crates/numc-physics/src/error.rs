//! Error types for the physics crate.

use crate::InteractionType;
use numc_common::RandomError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the interaction model.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Particle energy outside the sanity range `(6, 24)` log10(eV).
    #[error("Particle energy {energy} log10(eV) is outside (6, 24)")]
    EnergyOutOfRange {
        /// Requested energy (log10 eV).
        energy: f64,
    },

    /// A data file could not be opened or read.
    #[error("Unable to read {path}: {source}")]
    DataFile {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A table or flux file does not have the expected layout.
    #[error("Malformed data file {path}: {reason}")]
    Malformed {
        /// Offending file.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// A neutrino-only operation was requested on a charged lepton.
    #[error("{0} is not a neutrino")]
    NotANeutrino(String),

    /// The particle cannot undergo this kind of interaction.
    #[error("{particle} cannot undergo a {interaction} interaction")]
    UnsupportedInteraction {
        /// Particle description.
        particle: String,
        /// Requested interaction.
        interaction: InteractionType,
    },

    /// Table cache lock was poisoned (a thread panicked while holding the lock).
    #[error("Final-state table cache lock was poisoned")]
    CacheLockPoisoned,

    /// Random sampling failed.
    #[error(transparent)]
    Random(#[from] RandomError),
}
