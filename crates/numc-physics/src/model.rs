//! Interaction model: cross-section and energy-loss choices plus the
//! final-state tables they draw from.

use crate::final_state::FinalStateTables;
use crate::particle::EnergyLossModel;
use crate::{CrossSectionModel, PhysicsError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};
use tracing::{debug, info};

/// Default energy cut (log10 eV) below which products are dropped.
pub const DEFAULT_MIN_ENERGY: f64 = 14.0;

type TableCache = RwLock<HashMap<PathBuf, Arc<FinalStateTables>>>;

fn table_cache() -> &'static TableCache {
    static CACHE: OnceLock<TableCache> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Final-state tables from `dir`, loaded once per process and shared.
pub fn shared_tables<P: AsRef<Path>>(dir: P) -> Result<Arc<FinalStateTables>> {
    let dir = dir.as_ref().to_path_buf();

    {
        let cache = table_cache()
            .read()
            .map_err(|_| PhysicsError::CacheLockPoisoned)?;
        if let Some(tables) = cache.get(&dir) {
            return Ok(Arc::clone(tables));
        }
    }

    let tables = Arc::new(FinalStateTables::load(&dir)?);

    let mut cache = table_cache()
        .write()
        .map_err(|_| PhysicsError::CacheLockPoisoned)?;
    // Another thread may have loaded the same directory meanwhile
    let tables = cache.entry(dir.clone()).or_insert(tables);
    info!(dir = %dir.display(), "cached final-state tables");
    Ok(Arc::clone(tables))
}

/// Everything a particle needs to know to interact.
#[derive(Debug, Clone)]
pub struct InteractionModel {
    cross_section_model: CrossSectionModel,
    energy_loss_model: EnergyLossModel,
    cross_section_factor: f64,
    min_energy: f64,
    regenerate_neutral_current: bool,
    tables: Arc<FinalStateTables>,
}

impl InteractionModel {
    /// A model with default choices over already loaded tables.
    pub fn new(tables: Arc<FinalStateTables>) -> Self {
        Self {
            cross_section_model: CrossSectionModel::default(),
            energy_loss_model: EnergyLossModel::default(),
            cross_section_factor: 1.0,
            min_energy: DEFAULT_MIN_ENERGY,
            regenerate_neutral_current: true,
            tables,
        }
    }

    /// Load the tables from `dir` without sharing them.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Ok(Self::new(Arc::new(FinalStateTables::load(dir)?)))
    }

    /// Use the process-wide cached tables from `dir`.
    pub fn shared<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Ok(Self::new(shared_tables(dir)?))
    }

    pub fn with_cross_section_model(mut self, model: CrossSectionModel) -> Self {
        self.cross_section_model = model;
        self
    }

    pub fn with_energy_loss_model(mut self, model: EnergyLossModel) -> Self {
        self.energy_loss_model = model;
        self
    }

    /// Multiply every cross section by `factor`.
    pub fn with_cross_section_factor(mut self, factor: f64) -> Self {
        self.cross_section_factor = factor;
        self
    }

    pub fn with_min_energy(mut self, min_energy: f64) -> Self {
        self.min_energy = min_energy;
        self
    }

    /// Whether neutral-current interactions continue the neutrino.
    pub fn with_neutral_current_regeneration(mut self, regenerate: bool) -> Self {
        debug!(regenerate, "neutral current regeneration");
        self.regenerate_neutral_current = regenerate;
        self
    }

    pub fn cross_section_model(&self) -> CrossSectionModel {
        self.cross_section_model
    }

    pub fn energy_loss_model(&self) -> EnergyLossModel {
        self.energy_loss_model
    }

    pub fn cross_section_factor(&self) -> f64 {
        self.cross_section_factor
    }

    pub fn min_energy(&self) -> f64 {
        self.min_energy
    }

    pub fn regenerates_neutral_current(&self) -> bool {
        self.regenerate_neutral_current
    }

    pub fn tables(&self) -> &FinalStateTables {
        &self.tables
    }
}
