//! Charged- and neutral-current neutrino-nucleon cross sections.
//!
//! Energies are log10(E/eV) and cross sections are in cm^2. The Connolly et
//! al. (2011) fits are cubic polynomials in log10(E); the literature models
//! use the power-law form `10^((c0 + c1 * E^p) * 1e-36)`.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Interaction current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Current {
    Charged,
    Neutral,
}

/// Cross-section parametrization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrossSectionModel {
    /// Connolly et al. 2011, lower bound.
    ConnollyLower,
    /// Connolly et al. 2011, central fit.
    #[default]
    ConnollyMiddle,
    /// Connolly et al. 2011, upper bound.
    ConnollyUpper,
    /// Abramowicz, Levin, Levy and Maor.
    Allm,
    /// Armesto, Salgado and Wiedemann.
    Asw,
    /// Cooper-Sarkar and Sarkar.
    Sarkar,
    /// Capella, Kaidalov, Merino and Tran Thanh Van.
    Ckmt,
}

impl CrossSectionModel {
    /// Every model, in identifier order.
    pub const ALL: [CrossSectionModel; 7] = [
        CrossSectionModel::ConnollyLower,
        CrossSectionModel::ConnollyMiddle,
        CrossSectionModel::ConnollyUpper,
        CrossSectionModel::Allm,
        CrossSectionModel::Asw,
        CrossSectionModel::Sarkar,
        CrossSectionModel::Ckmt,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            CrossSectionModel::ConnollyLower => "connolly_lower",
            CrossSectionModel::ConnollyMiddle => "connolly_middle",
            CrossSectionModel::ConnollyUpper => "connolly_upper",
            CrossSectionModel::Allm => "allm",
            CrossSectionModel::Asw => "asw",
            CrossSectionModel::Sarkar => "sarkar",
            CrossSectionModel::Ckmt => "ckmt",
        }
    }

    /// Look up a model by name (case-insensitive). Unknown names fall back to
    /// [`CrossSectionModel::ConnollyMiddle`] with a warning.
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_ascii_lowercase().replace('-', "_");
        match Self::ALL.iter().find(|model| model.as_str() == wanted) {
            Some(model) => *model,
            None => {
                warn!(model = name, "unknown cross section model, using connolly_middle");
                CrossSectionModel::ConnollyMiddle
            }
        }
    }

    /// Look up a model by its numeric identifier (index into [`ALL`](Self::ALL)).
    /// Unknown identifiers fall back to [`CrossSectionModel::ConnollyMiddle`]
    /// with a warning.
    pub fn from_id(id: i64) -> Self {
        match usize::try_from(id).ok().and_then(|i| Self::ALL.get(i)) {
            Some(model) => *model,
            None => {
                warn!(id, "unknown cross section model id, using connolly_middle");
                CrossSectionModel::ConnollyMiddle
            }
        }
    }
}

impl std::fmt::Display for CrossSectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power-law literature fit `(c0, c1, p)`.
type PowerLaw = (f64, f64, f64);

const CC_CONNOLLY_MIDDLE: [f64; 4] = [-5.35400180e+01, 2.65901551e+00, -1.14017685e-01, 1.82495442e-03];
const CC_CONNOLLY_LOWER: [f64; 4] = [-4.26355014e+01, 4.89151126e-01, 2.94975025e-02, -1.32969832e-03];
const CC_CONNOLLY_UPPER: [f64; 4] = [-5.31078363e+01, 2.72995742e+00, -1.28808188e-01, 2.36800261e-03];

const NC_CONNOLLY_MIDDLE: [f64; 4] = [-5.41463399e+01, 2.65465169e+00, -1.11848922e-01, 1.75469643e-03];
const NC_CONNOLLY_LOWER: [f64; 4] = [-4.42377028e+01, 7.07758518e-01, 1.55925146e-02, -1.02484763e-03];
const NC_CONNOLLY_UPPER: [f64; 4] = [-5.36713302e+01, 2.72528813e+00, -1.27067769e-01, 2.31235293e-03];

const ALLM: PowerLaw = (-280.544665122, 10.3452620208, 0.317119535055);
const ASW: PowerLaw = (-799.252409182, 52.4932827684, 0.244551044541);
const SARKAR_CC: PowerLaw = (-649.265343982, 26.4437052803, 0.296160447336);
const SARKAR_NC: PowerLaw = (-259.30822396, 9.31732621406, 0.302056103343);
const CKMT: PowerLaw = (-36.3345965603, 7.14693605311, 0.293313250614);

/// NC/CC ratio applied to the exponent of the literature fits without a
/// dedicated NC parametrization.
const NC_SCALE: f64 = 1.0 / 2.4;

fn connolly(coeff: &[f64; 4], energy: f64) -> f64 {
    let exponent = coeff
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * energy + c);
    10f64.powf(exponent)
}

fn power_law((c0, c1, p): PowerLaw, energy: f64, scale: f64) -> f64 {
    10f64.powf(scale * (c0 + c1 * energy.powf(p)) * 1e-36)
}

/// Charged-current cross section (cm^2) at log10 energy `energy`.
pub fn charged_current_cross_section(energy: f64, model: CrossSectionModel) -> f64 {
    match model {
        CrossSectionModel::ConnollyMiddle => connolly(&CC_CONNOLLY_MIDDLE, energy),
        CrossSectionModel::ConnollyLower => connolly(&CC_CONNOLLY_LOWER, energy),
        CrossSectionModel::ConnollyUpper => connolly(&CC_CONNOLLY_UPPER, energy),
        CrossSectionModel::Allm => power_law(ALLM, energy, 1.0),
        CrossSectionModel::Asw => power_law(ASW, energy, 1.0),
        CrossSectionModel::Sarkar => power_law(SARKAR_CC, energy, 1.0),
        CrossSectionModel::Ckmt => power_law(CKMT, energy, 1.0),
    }
}

/// Neutral-current cross section (cm^2) at log10 energy `energy`.
pub fn neutral_current_cross_section(energy: f64, model: CrossSectionModel) -> f64 {
    match model {
        CrossSectionModel::ConnollyMiddle => connolly(&NC_CONNOLLY_MIDDLE, energy),
        CrossSectionModel::ConnollyLower => connolly(&NC_CONNOLLY_LOWER, energy),
        CrossSectionModel::ConnollyUpper => connolly(&NC_CONNOLLY_UPPER, energy),
        CrossSectionModel::Allm => power_law(ALLM, energy, NC_SCALE),
        CrossSectionModel::Asw => power_law(ASW, energy, NC_SCALE),
        CrossSectionModel::Sarkar => power_law(SARKAR_NC, energy, 1.0),
        CrossSectionModel::Ckmt => power_law(CKMT, energy, NC_SCALE),
    }
}

/// Cross section (cm^2) for the given current.
pub fn cross_section(current: Current, energy: f64, model: CrossSectionModel) -> f64 {
    match current {
        Current::Charged => charged_current_cross_section(energy, model),
        Current::Neutral => neutral_current_cross_section(energy, model),
    }
}
