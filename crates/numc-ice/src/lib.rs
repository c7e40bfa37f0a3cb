//! # numc-ice
//!
//! Antarctic ice geometry from the BEDMAP2 gridded data set.
//!
//! ## Features
//!
//! - Load fixed-size binary rasters of 32-bit floats, with sentinel samples
//!   stored as NaN
//! - Bilinear interpolation at planar grid coordinates
//! - South-polar stereographic projection (true scale at 71°S, WGS84)
//! - Surface elevation, bed elevation, ice thickness and ice mask at any
//!   latitude/longitude covered by the grid
//!
//! ## Example
//!
//! ```no_run
//! use numc_ice::{GridSpec, IceSurfaceModel};
//!
//! let ice = IceSurfaceModel::load("data/bedmap2_bin", GridSpec::bedmap2())?;
//!
//! // Surface elevation near Dome C (m above the WGS84 ellipsoid)
//! let elevation = ice.surface_elevation(-75.1, 123.35)?;
//! println!("Dome C surface: {elevation:.0} m");
//! # Ok::<(), numc_ice::IceError>(())
//! ```

mod error;
mod grid;
mod projection;
mod surface;

pub use error::IceError;
pub use grid::{ByteOrder, GridSpec, RasterGrid};
pub use projection::PolarProjection;
pub use surface::{
    IceMask, IceRasters, IceSurfaceModel, BED_FILE, GEOID_FILE, ICEMASK_FILE, SURFACE_FILE,
    THICKNESS_FILE,
};

/// Result type for ice operations.
pub type Result<T> = std::result::Result<T, IceError>;
