//! # numc-earth
//!
//! The Earth model seen by a propagating particle: the WGS84 ellipsoid,
//! the Antarctic ice sheet from BEDMAP2 and a PREM-like radial density
//! profile for the rock below.
//!
//! ## Example
//!
//! ```no_run
//! use numc_common::RandomEngine;
//! use numc_earth::{EarthDataPaths, EarthModel};
//!
//! let earth = EarthModel::load(&EarthDataPaths::from_data_dir("data"))?;
//! let mut rng = RandomEngine::new(1);
//!
//! let point = earth.random_surface_point(&mut rng);
//! let (density, material) = earth.density_and_material_at(&point);
//! println!("{material} at {:.2} km: {density} g/cm^3", point.r);
//! # Ok::<(), numc_earth::EarthError>(())
//! ```

mod density;
mod earth;
mod error;
mod material;

pub use density::{RadialDensityModel, PROFILE_COLUMNS};
pub use earth::{
    ellipsoid_radius, EarthDataPaths, EarthModel, FIRN_DEPTH_KM, SURFACE_CAP_THETA_MIN,
};
pub use error::EarthError;
pub use material::{
    Material, AIR_DENSITY, FIRN_DENSITY, FRESH_WATER_DENSITY, ICE_DENSITY, OCEAN_DENSITY,
};

/// Result type for earth model operations.
pub type Result<T> = std::result::Result<T, EarthError>;
