//! Materials a trajectory can pass through.

use serde::{Deserialize, Serialize};

/// Density of glacial ice (g/cm^3).
pub const ICE_DENSITY: f64 = 0.917;
/// Density of compacted firn (g/cm^3).
pub const FIRN_DENSITY: f64 = 0.6;
/// Density of air at sea level (g/cm^3).
pub const AIR_DENSITY: f64 = 1.225e-3;
/// Density of sea water (g/cm^3).
pub const OCEAN_DENSITY: f64 = 1.02;
/// Density of fresh water (g/cm^3).
pub const FRESH_WATER_DENSITY: f64 = 1.0;

/// Classification of a point in space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Rock,
    Ice,
    Firn,
    Air,
    Ocean,
    FreshWater,
}

impl Material {
    /// Fixed density (g/cm^3), or `None` for rock whose density depends on depth.
    pub const fn nominal_density(&self) -> Option<f64> {
        match self {
            Material::Rock => None,
            Material::Ice => Some(ICE_DENSITY),
            Material::Firn => Some(FIRN_DENSITY),
            Material::Air => Some(AIR_DENSITY),
            Material::Ocean => Some(OCEAN_DENSITY),
            Material::FreshWater => Some(FRESH_WATER_DENSITY),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Material::Rock => "rock",
            Material::Ice => "ice",
            Material::Firn => "firn",
            Material::Air => "air",
            Material::Ocean => "ocean",
            Material::FreshWater => "fresh_water",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
