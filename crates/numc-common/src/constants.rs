//! Physical and geodetic constants.
//!
//! Lengths are in kilometres unless the name says otherwise.

/// Avogadro's number (mol^-1), used as nucleons per gram of target.
pub const N_A: f64 = 6.0221415e23;

/// First eccentricity of the WGS84 ellipsoid.
pub const EARTH_E: f64 = 0.08181919;

/// WGS84 semi-major axis (km).
pub const EARTH_A: f64 = 6378137.0 / 1000.0;

/// WGS84 flattening.
pub const EARTH_F: f64 = 1.0 / 298.257223563;

/// WGS84 semi-minor axis (km).
pub const EARTH_B: f64 = EARTH_A * (1.0 - EARTH_F);

/// IUGG mean Earth radius `(2a + b) / 3` (km).
pub const EARTH_MEAN_RADIUS: f64 = (2.0 * EARTH_A + EARTH_B) / 3.0;

/// Centimetres per kilometre.
pub const CM_PER_KM: f64 = 1.0e5;

/// Speed of light (cm/s).
pub const C_LIGHT_CM_S: f64 = 2.99792458e10;

/// Tau lepton mass (GeV).
pub const TAU_MASS_GEV: f64 = 1.77686;

/// Tau lepton proper lifetime (s).
pub const TAU_LIFETIME_S: f64 = 2.903e-13;

/// Muon mass (GeV).
pub const MUON_MASS_GEV: f64 = 0.1056583745;

/// Muon proper lifetime (s).
pub const MUON_LIFETIME_S: f64 = 2.1969811e-6;

/// Radiation length of electrons in water-equivalent matter (g/cm^2).
pub const ELECTRON_RADIATION_LENGTH: f64 = 36.08;

/// Lower bound (exclusive) of the particle energy sanity range in log10(eV).
pub const MIN_PARTICLE_ENERGY: f64 = 6.0;

/// Upper bound (exclusive) of the particle energy sanity range in log10(eV).
pub const MAX_PARTICLE_ENERGY: f64 = 24.0;
