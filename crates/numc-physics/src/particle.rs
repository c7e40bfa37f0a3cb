//! Neutrinos and charged leptons.
//!
//! A [`Particle`] is a value: interactions return new particles rather than
//! mutating the one that interacted. Energies are log10(E/eV).

use crate::cross_section::{self, Current};
use crate::{InteractionModel, PhysicsError, Result};
use numc_common::constants::{
    CM_PER_KM, C_LIGHT_CM_S, ELECTRON_RADIATION_LENGTH, MAX_PARTICLE_ENERGY, MIN_PARTICLE_ENERGY,
    MUON_LIFETIME_S, MUON_MASS_GEV, N_A, TAU_LIFETIME_S, TAU_MASS_GEV,
};
use numc_common::RandomEngine;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_10;
use tracing::warn;

/// Lepton flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    Electron,
    Muon,
    Tau,
}

impl Flavor {
    pub const ALL: [Flavor; 3] = [Flavor::Electron, Flavor::Muon, Flavor::Tau];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Flavor::Electron => "electron",
            Flavor::Muon => "muon",
            Flavor::Tau => "tau",
        }
    }
}

/// Whether a particle is a neutrino or its charged partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Neutrino,
    Lepton,
}

impl ParticleKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParticleKind::Neutrino => "neutrino",
            ParticleKind::Lepton => "lepton",
        }
    }
}

/// What happened at an interaction vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    /// Charged-current scattering.
    Charged,
    /// Neutral-current scattering.
    Neutral,
    /// Decay (or shower, for electrons).
    Decay,
}

impl InteractionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Charged => "charged",
            InteractionType::Neutral => "neutral",
            InteractionType::Decay => "decay",
        }
    }
}

impl From<Current> for InteractionType {
    fn from(current: Current) -> Self {
        match current {
            Current::Charged => InteractionType::Charged,
            Current::Neutral => InteractionType::Neutral,
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tau energy-loss parametrization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnergyLossModel {
    /// Bugaev, Dubovsky, Hagiwara and Montaruli.
    #[default]
    Bdhm,
    /// Soyez (ALLM-based fit).
    Soyez,
    /// Soyez with the ASW saturation model.
    SoyezAsw,
    /// Abramowicz, Levin, Levy and Maor.
    Allm,
}

impl EnergyLossModel {
    pub const ALL: [EnergyLossModel; 4] = [
        EnergyLossModel::Bdhm,
        EnergyLossModel::Soyez,
        EnergyLossModel::SoyezAsw,
        EnergyLossModel::Allm,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EnergyLossModel::Bdhm => "bdhm",
            EnergyLossModel::Soyez => "soyez",
            EnergyLossModel::SoyezAsw => "soyez_asw",
            EnergyLossModel::Allm => "allm",
        }
    }

    /// Look up a model by name (case-insensitive). Unknown names fall back to
    /// [`EnergyLossModel::Bdhm`] with a warning.
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_ascii_lowercase().replace('-', "_");
        match Self::ALL.iter().find(|model| model.as_str() == wanted) {
            Some(model) => *model,
            None => {
                warn!(model = name, "unknown energy loss model, using bdhm");
                EnergyLossModel::Bdhm
            }
        }
    }

    /// `(β0, β1, β2)` in units of 1e-6 cm^2/g.
    const fn coefficients(&self) -> (f64, f64, f64) {
        match self {
            EnergyLossModel::Bdhm => (0.425, 4.04e-2, 1.12e-3),
            EnergyLossModel::Soyez => (0.371, 3.20e-2, 9.54e-4),
            EnergyLossModel::SoyezAsw => (0.461, 3.90e-2, 1.13e-3),
            EnergyLossModel::Allm => (1.020, 0.210, 1.51e-2),
        }
    }
}

/// Unpolarised muon decay spectrum of the muon neutrino energy fraction `x`.
fn muon_neutrino_spectrum(x: f64) -> f64 {
    5.0 / 3.0 - 3.0 * x * x + 4.0 / 3.0 * x * x * x
}

/// A neutrino or charged lepton of a given flavor and energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    kind: ParticleKind,
    flavor: Flavor,
    energy: f64,
}

impl Particle {
    /// Create a particle, rejecting energies outside `(6, 24)` log10(eV).
    pub fn new(kind: ParticleKind, flavor: Flavor, energy: f64) -> Result<Self> {
        if !(energy > MIN_PARTICLE_ENERGY && energy < MAX_PARTICLE_ENERGY) {
            return Err(PhysicsError::EnergyOutOfRange { energy });
        }
        Ok(Self {
            kind,
            flavor,
            energy,
        })
    }

    pub fn neutrino(flavor: Flavor, energy: f64) -> Result<Self> {
        Self::new(ParticleKind::Neutrino, flavor, energy)
    }

    pub fn lepton(flavor: Flavor, energy: f64) -> Result<Self> {
        Self::new(ParticleKind::Lepton, flavor, energy)
    }

    /// A neutrino of uniformly random flavor.
    pub fn random_neutrino(energy: f64, rng: &mut RandomEngine) -> Result<Self> {
        let flavor = Flavor::ALL[rng.uniform_int(0, 2) as usize];
        Self::neutrino(flavor, energy)
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn is_lepton(&self) -> bool {
        self.kind == ParticleKind::Lepton
    }

    pub fn is_neutrino(&self) -> bool {
        self.kind == ParticleKind::Neutrino
    }

    /// The same particle at another energy.
    pub fn with_energy(&self, energy: f64) -> Result<Self> {
        Self::new(self.kind, self.flavor, energy)
    }

    /// Continuous energy-loss coefficient β (1e-6 cm^2/g).
    ///
    /// Only taus lose energy continuously; everything else returns 0.
    pub fn energy_loss(&self, model: EnergyLossModel) -> f64 {
        match (self.kind, self.flavor) {
            (ParticleKind::Lepton, Flavor::Tau) => {
                let (b0, b1, b2) = model.coefficients();
                let l = LN_10 * (self.energy - 19.0);
                b0 + b1 * l + b2 * l * l
            }
            _ => 0.0,
        }
    }

    /// Cross section (cm^2) for the given current, scaled by the model's
    /// cross-section factor.
    pub fn cross_section(&self, current: Current, model: &InteractionModel) -> Result<f64> {
        self.require_neutrino()?;
        Ok(model.cross_section_factor()
            * cross_section::cross_section(current, self.energy, model.cross_section_model()))
    }

    /// Charged-current probability `σ_CC / (σ_CC + σ_NC)` of a neutrino.
    pub fn branching(&self, model: &InteractionModel) -> Result<f64> {
        let cc = self.cross_section(Current::Charged, model)?;
        let nc = self.cross_section(Current::Neutral, model)?;
        Ok(cc / (cc + nc))
    }

    /// Bjorken y drawn from the final-state table for `current`.
    pub fn y_factor(
        &self,
        current: Current,
        model: &InteractionModel,
        rng: &mut RandomEngine,
    ) -> Result<f64> {
        self.require_neutrino()?;
        let table = match current {
            Current::Charged => &model.tables().charged_current,
            Current::Neutral => &model.tables().neutral_current,
        };
        Ok(table.evaluate(self.energy, rng)[0])
    }

    /// Mean free path (km) in matter of `density` g/cm^3 and what ends it.
    ///
    /// Neutrinos interact after `1 / (N_A ρ σ_tot)` and report their more
    /// likely current. Taus and muons decay after their boosted lifetime and
    /// electrons shower after one radiation length.
    pub fn interaction_length(
        &self,
        density: f64,
        model: &InteractionModel,
    ) -> Result<(f64, InteractionType)> {
        match (self.kind, self.flavor) {
            (ParticleKind::Neutrino, _) => {
                let cc = self.cross_section(Current::Charged, model)?;
                let nc = self.cross_section(Current::Neutral, model)?;
                let length_cm = 1.0 / (N_A * density * (cc + nc));
                let dominant = if cc >= nc {
                    InteractionType::Charged
                } else {
                    InteractionType::Neutral
                };
                Ok((length_cm / CM_PER_KM, dominant))
            }
            (ParticleKind::Lepton, Flavor::Tau) => Ok((
                self.decay_length_km(TAU_MASS_GEV, TAU_LIFETIME_S),
                InteractionType::Decay,
            )),
            (ParticleKind::Lepton, Flavor::Muon) => Ok((
                self.decay_length_km(MUON_MASS_GEV, MUON_LIFETIME_S),
                InteractionType::Decay,
            )),
            (ParticleKind::Lepton, Flavor::Electron) => Ok((
                ELECTRON_RADIATION_LENGTH / density / CM_PER_KM,
                InteractionType::Decay,
            )),
        }
    }

    /// The particle leaving an interaction of type `interaction`, or `None`
    /// when nothing above the model's energy cut continues.
    pub fn interaction_products(
        &self,
        interaction: InteractionType,
        model: &InteractionModel,
        rng: &mut RandomEngine,
    ) -> Result<Option<Particle>> {
        let (kind, flavor, fraction) = match (self.kind, interaction) {
            (ParticleKind::Neutrino, InteractionType::Charged) => {
                let y = self.y_factor(Current::Charged, model, rng)?;
                (ParticleKind::Lepton, self.flavor, 1.0 - y)
            }
            (ParticleKind::Neutrino, InteractionType::Neutral) => {
                if !model.regenerates_neutral_current() {
                    return Ok(None);
                }
                let y = self.y_factor(Current::Neutral, model, rng)?;
                (ParticleKind::Neutrino, self.flavor, 1.0 - y)
            }
            (ParticleKind::Lepton, InteractionType::Decay) => match self.flavor {
                Flavor::Tau => {
                    let fraction = model.tables().tau_decay.evaluate(self.energy, rng)[0];
                    (ParticleKind::Neutrino, Flavor::Tau, fraction)
                }
                Flavor::Muon => {
                    let fraction =
                        rng.sample_from_function(muon_neutrino_spectrum, 0.0, 1.0, 0.0, 5.0 / 3.0)?;
                    (ParticleKind::Neutrino, Flavor::Muon, fraction)
                }
                Flavor::Electron => return Ok(None),
            },
            _ => {
                return Err(PhysicsError::UnsupportedInteraction {
                    particle: self.to_string(),
                    interaction,
                })
            }
        };

        let energy = self.energy + fraction.log10();
        if !(energy > model.min_energy() && energy > MIN_PARTICLE_ENERGY) {
            return Ok(None);
        }
        Particle::new(kind, flavor, energy).map(Some)
    }

    /// Boosted decay length `γ c τ` (km).
    fn decay_length_km(&self, mass_gev: f64, lifetime_s: f64) -> f64 {
        let gamma = 10f64.powf(self.energy) / (mass_gev * 1e9);
        gamma * C_LIGHT_CM_S * lifetime_s / CM_PER_KM
    }

    fn require_neutrino(&self) -> Result<()> {
        if self.is_neutrino() {
            Ok(())
        } else {
            Err(PhysicsError::NotANeutrino(self.to_string()))
        }
    }
}

impl std::fmt::Display for Particle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ParticleKind::Neutrino => write!(f, "{} neutrino", self.flavor.as_str())?,
            ParticleKind::Lepton => f.write_str(self.flavor.as_str())?,
        }
        write!(f, " ({:.3})", self.energy)
    }
}
