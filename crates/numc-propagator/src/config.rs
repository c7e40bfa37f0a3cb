//! Propagation settings, loadable from YAML.
//!
//! ```yaml
//! min_energy: 16.0
//! max_energy: 20.0
//! step_size_km: 0.5
//! seed: 42
//! flux:
//!   spectrum: Kotera2010_mix_max
//! physics:
//!   cross_section_model: connolly_upper
//!   regenerate_neutral_current: false
//! ```

use crate::{PropagationError, Result};
use numc_common::constants::{MAX_PARTICLE_ENERGY, MIN_PARTICLE_ENERGY};
use numc_common::DEFAULT_MAX_REJECTION_ATTEMPTS;
use numc_physics::{
    CrossSectionModel, EnergyLossModel, FinalStateTables, InteractionModel, DEFAULT_SPECTRUM,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Where incident neutrino energies come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluxConfig {
    /// Every neutrino has this energy (log10 eV).
    Fixed(f64),
    /// Sample from the named spectrum file in the data directory.
    Spectrum(String),
}

impl Default for FluxConfig {
    fn default() -> Self {
        FluxConfig::Spectrum(DEFAULT_SPECTRUM.to_string())
    }
}

/// Interaction physics choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Cross-section model name; unknown names fall back to `connolly_middle`.
    pub cross_section_model: String,
    /// Tau energy-loss model name; unknown names fall back to `bdhm`.
    pub energy_loss_model: String,
    /// Multiplier applied to every cross section.
    pub cross_section_factor: f64,
    /// Continue neutrinos after neutral-current interactions.
    pub regenerate_neutral_current: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            cross_section_model: CrossSectionModel::default().as_str().to_string(),
            energy_loss_model: EnergyLossModel::default().as_str().to_string(),
            cross_section_factor: 1.0,
            regenerate_neutral_current: true,
        }
    }
}

impl PhysicsConfig {
    pub fn cross_section_model(&self) -> CrossSectionModel {
        CrossSectionModel::from_name(&self.cross_section_model)
    }

    pub fn energy_loss_model(&self) -> EnergyLossModel {
        EnergyLossModel::from_name(&self.energy_loss_model)
    }
}

/// Settings for a propagation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropagatorConfig {
    /// Lowest sampled energy, also the absorption cut (log10 eV).
    pub min_energy: f64,
    /// Highest sampled energy (log10 eV).
    pub max_energy: f64,
    /// Largest step along the chord (km).
    pub step_size_km: f64,
    /// Base seed; particle `i` uses stream `i` of this seed.
    pub seed: u64,
    /// Propagate particles on the rayon thread pool.
    pub parallel: bool,
    /// Cap on acceptance/rejection draws.
    pub max_rejection_attempts: u64,
    pub flux: FluxConfig,
    pub physics: PhysicsConfig,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            min_energy: 14.0,
            max_energy: 20.9,
            step_size_km: 1.0,
            seed: 0,
            parallel: true,
            max_rejection_attempts: DEFAULT_MAX_REJECTION_ATTEMPTS,
            flux: FluxConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

fn in_particle_range(energy: f64) -> bool {
    energy > MIN_PARTICLE_ENERGY && energy < MAX_PARTICLE_ENERGY
}

impl PropagatorConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| PropagationError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Check that the settings describe a runnable propagation.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(PropagationError::InvalidConfig(reason));

        if !in_particle_range(self.min_energy) || !in_particle_range(self.max_energy) {
            return invalid(format!(
                "energy range [{}, {}] must lie within ({MIN_PARTICLE_ENERGY}, {MAX_PARTICLE_ENERGY})",
                self.min_energy, self.max_energy
            ));
        }
        if self.min_energy >= self.max_energy {
            return invalid(format!(
                "min_energy {} must be below max_energy {}",
                self.min_energy, self.max_energy
            ));
        }
        if !(self.step_size_km > 0.0 && self.step_size_km.is_finite()) {
            return invalid(format!("step_size_km {} must be positive", self.step_size_km));
        }
        if self.max_rejection_attempts == 0 {
            return invalid("max_rejection_attempts must be positive".to_string());
        }
        if let FluxConfig::Fixed(energy) = self.flux {
            if !in_particle_range(energy) {
                return invalid(format!(
                    "fixed energy {energy} must lie within ({MIN_PARTICLE_ENERGY}, {MAX_PARTICLE_ENERGY})"
                ));
            }
        }
        if !(self.physics.cross_section_factor > 0.0 && self.physics.cross_section_factor.is_finite())
        {
            return invalid(format!(
                "cross_section_factor {} must be positive",
                self.physics.cross_section_factor
            ));
        }
        Ok(())
    }

    /// Interaction model over `tables` with this configuration's physics.
    pub fn interaction_model(&self, tables: Arc<FinalStateTables>) -> InteractionModel {
        InteractionModel::new(tables)
            .with_cross_section_model(self.physics.cross_section_model())
            .with_energy_loss_model(self.physics.energy_loss_model())
            .with_cross_section_factor(self.physics.cross_section_factor)
            .with_neutral_current_regeneration(self.physics.regenerate_neutral_current)
            .with_min_energy(self.min_energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PropagatorConfig::default();
        assert_eq!(config.min_energy, 14.0);
        assert_eq!(config.max_energy, 20.9);
        assert_eq!(config.step_size_km, 1.0);
        assert!(config.parallel);
        assert_eq!(config.flux, FluxConfig::Spectrum("Kotera2010_mix_max".to_string()));
        assert_eq!(config.physics.cross_section_model(), CrossSectionModel::ConnollyMiddle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let config = PropagatorConfig::from_yaml_str(
            "seed: 7\nflux:\n  fixed: 18.5\nphysics:\n  cross_section_model: sarkar\n",
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.flux, FluxConfig::Fixed(18.5));
        assert_eq!(config.physics.cross_section_model(), CrossSectionModel::Sarkar);
        assert_eq!(config.physics.energy_loss_model(), EnergyLossModel::Bdhm);
        assert_eq!(config.step_size_km, 1.0);
    }

    #[test]
    fn test_unknown_model_names_fall_back() {
        let config =
            PropagatorConfig::from_yaml_str("physics:\n  energy_loss_model: nope\n").unwrap();
        assert_eq!(config.physics.energy_loss_model(), EnergyLossModel::Bdhm);
    }

    #[test]
    fn test_rejects_inconsistent_values() {
        for yaml in [
            "min_energy: 19.0\nmax_energy: 18.0\n",
            "max_energy: 25.0\n",
            "step_size_km: 0.0\n",
            "max_rejection_attempts: 0\n",
            "flux:\n  fixed: 5.0\n",
            "physics:\n  cross_section_factor: -1.0\n",
        ] {
            assert!(
                matches!(
                    PropagatorConfig::from_yaml_str(yaml),
                    Err(PropagationError::InvalidConfig(_))
                ),
                "{yaml}"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            PropagatorConfig::from_yaml_str("stepsize: 2.0\n"),
            Err(PropagationError::Config(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = PropagatorConfig {
            seed: 99,
            parallel: false,
            flux: FluxConfig::Fixed(19.0),
            ..PropagatorConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(PropagatorConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
