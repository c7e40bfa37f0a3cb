//! Pre-randomized final-state tables (Bjorken y and decay products).
//!
//! A table file starts with the header `nfinal ndim imax emin emax`, followed
//! by `imax * nfinal * ndim` values in `(energy, state, dim)` row-major order.
//! Rows at each energy were drawn at random when the table was generated, so
//! any row is an independent sample.

use crate::{PhysicsError, Result};
use numc_common::RandomEngine;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Charged-current neutrino-nucleon final states.
pub const CHARGED_CURRENT_TABLE: &str = "final_cteq5_cc_nu.data";
/// Neutral-current neutrino-nucleon final states.
pub const NEUTRAL_CURRENT_TABLE: &str = "final_cteq5_nc_nu.data";
/// Tau decay products.
pub const TAU_DECAY_TABLE: &str = "tau_decay_tauola.data";

/// A table of final states indexed by energy bin.
#[derive(Debug, Clone)]
pub struct FinalStateTable {
    nfinal: usize,
    ndim: usize,
    imax: usize,
    emin: f64,
    emax: f64,
    data: Vec<f64>,
}

impl FinalStateTable {
    /// Load a table from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PhysicsError::DataFile {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text, path)?;
        debug!(
            path = %path.display(),
            nfinal = table.nfinal,
            ndim = table.ndim,
            imax = table.imax,
            "loaded final-state table"
        );
        Ok(table)
    }

    /// Parse table text; `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let malformed = |reason: String| PhysicsError::Malformed {
            path: PathBuf::from(path),
            reason,
        };
        let mut tokens = text.split_whitespace();

        let mut count = |name: &str| -> Result<usize> {
            let token = tokens
                .next()
                .ok_or_else(|| malformed(format!("missing header field {name}")))?;
            let value: usize = token
                .parse()
                .map_err(|_| malformed(format!("invalid {name} '{token}'")))?;
            if value == 0 {
                return Err(malformed(format!("{name} must be positive")));
            }
            Ok(value)
        };
        let nfinal = count("nfinal")?;
        let ndim = count("ndim")?;
        let imax = count("imax")?;

        let mut bound = |name: &str| -> Result<f64> {
            let token = tokens
                .next()
                .ok_or_else(|| malformed(format!("missing header field {name}")))?;
            token
                .parse()
                .map_err(|_| malformed(format!("invalid {name} '{token}'")))
        };
        let emin = bound("emin")?;
        let emax = bound("emax")?;

        let expected = imax * nfinal * ndim;
        let data = tokens
            .by_ref()
            .take(expected)
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| malformed(format!("invalid value '{token}'")))
            })
            .collect::<Result<Vec<f64>>>()?;
        if data.len() != expected {
            return Err(malformed(format!(
                "expected {expected} values, found {}",
                data.len()
            )));
        }

        Ok(Self {
            nfinal,
            ndim,
            imax,
            emin,
            emax,
            data,
        })
    }

    /// Number of final states per energy bin.
    pub fn nfinal(&self) -> usize {
        self.nfinal
    }

    /// Length of each final state.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of energy bins.
    pub fn imax(&self) -> usize {
        self.imax
    }

    /// Energy range `(emin, emax)` spanned by the bins (log10 eV).
    pub fn energy_range(&self) -> (f64, f64) {
        (self.emin, self.emax)
    }

    /// Energy bin nearest to `energy`, clamped to the table.
    pub fn energy_index(&self, energy: f64) -> usize {
        if self.imax == 1 || self.emax == self.emin {
            return 0;
        }
        let position = (energy - self.emin) / (self.emax - self.emin) * (self.imax - 1) as f64;
        position.round().clamp(0.0, (self.imax - 1) as f64) as usize
    }

    /// Final state `state` of energy bin `index`.
    pub fn row(&self, index: usize, state: usize) -> &[f64] {
        let start = (index * self.nfinal + state) * self.ndim;
        &self.data[start..start + self.ndim]
    }

    /// Draw a random final state at `energy`.
    pub fn evaluate(&self, energy: f64, rng: &mut RandomEngine) -> &[f64] {
        let index = self.energy_index(energy);
        let state = rng.index(self.nfinal);
        self.row(index, state)
    }
}

/// The three tables used by the interaction model.
#[derive(Debug, Clone)]
pub struct FinalStateTables {
    pub charged_current: FinalStateTable,
    pub neutral_current: FinalStateTable,
    pub tau_decay: FinalStateTable,
}

impl FinalStateTables {
    /// Load the standard table files from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            charged_current: FinalStateTable::load(dir.join(CHARGED_CURRENT_TABLE))?,
            neutral_current: FinalStateTable::load(dir.join(NEUTRAL_CURRENT_TABLE))?,
            tau_decay: FinalStateTable::load(dir.join(TAU_DECAY_TABLE))?,
        })
    }
}
