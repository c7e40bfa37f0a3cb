//! The composed Earth model: ellipsoid, Antarctic ice and radial density.

use crate::{Material, RadialDensityModel, Result};
use numc_common::constants::{EARTH_A, EARTH_B};
use numc_common::{RandomEngine, SphericalCoordinate};
use numc_ice::{GridSpec, IceMask, IceSurfaceModel};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Thickness of the firn layer below the ice surface (km).
pub const FIRN_DEPTH_KM: f64 = 0.1;

/// Smallest polar angle of generated surface points (60°S measured from the
/// North pole).
pub const SURFACE_CAP_THETA_MIN: f64 = 150.0 * PI / 180.0;

/// Step in theta/phi used for numerical surface slopes (radians).
const SLOPE_STEP: f64 = 1e-4;

const M_PER_KM: f64 = 1000.0;

/// WGS84 ellipsoid radius (km) at geodetic latitude `lat` (radians).
pub fn ellipsoid_radius(lat: f64) -> f64 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    EARTH_A * EARTH_B
        / (EARTH_A * EARTH_A * sin_lat * sin_lat + EARTH_B * EARTH_B * cos_lat * cos_lat).sqrt()
}

/// Locations of the data files needed by [`EarthModel::load`].
#[derive(Debug, Clone)]
pub struct EarthDataPaths {
    /// Directory holding the BEDMAP2 `.flt` rasters.
    pub bedmap_dir: PathBuf,
    /// Shape of the BEDMAP2 rasters.
    pub grid: GridSpec,
    /// Radial density profile.
    pub density_profile: PathBuf,
}

impl EarthDataPaths {
    /// Standard file layout below a data directory.
    pub fn from_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        let data_dir = data_dir.into();
        Self {
            bedmap_dir: data_dir.join("bedmap2_bin"),
            grid: GridSpec::bedmap2(),
            density_profile: data_dir.join("PREM.txt"),
        }
    }
}

/// Surface elevations around a location, in km of radius.
#[derive(Debug, Clone, Copy)]
struct Column {
    mask: IceMask,
    ellipsoid: f64,
    surface: f64,
    thickness: f64,
    bed: f64,
}

/// Read-only Earth model shared by all propagation workers.
///
/// Angles are in radians (`theta` from the North pole, `phi` east of
/// Greenwich) and distances in km.
#[derive(Debug, Clone)]
pub struct EarthModel {
    ice: IceSurfaceModel,
    density_profile: RadialDensityModel,
}

impl EarthModel {
    pub fn new(ice: IceSurfaceModel, density_profile: RadialDensityModel) -> Self {
        Self {
            ice,
            density_profile,
        }
    }

    /// Load the ice rasters and the density profile.
    pub fn load(paths: &EarthDataPaths) -> Result<Self> {
        let ice = IceSurfaceModel::load(&paths.bedmap_dir, paths.grid)?;
        let density_profile = RadialDensityModel::load(&paths.density_profile)?;
        debug!(
            bedmap = %paths.bedmap_dir.display(),
            profile = %paths.density_profile.display(),
            "loaded earth model"
        );
        Ok(Self::new(ice, density_profile))
    }

    pub fn ice(&self) -> &IceSurfaceModel {
        &self.ice
    }

    pub fn density_profile(&self) -> &RadialDensityModel {
        &self.density_profile
    }

    /// WGS84 ellipsoid radius (km) at latitude `lat` (radians).
    pub fn earth_radius(&self, lat: f64) -> f64 {
        ellipsoid_radius(lat)
    }

    /// Radius (km) of the surface at `(theta, phi)`.
    ///
    /// This is the ellipsoid radius plus the ice surface elevation, or just
    /// the ellipsoid outside the grid, over the ocean, or where data is missing.
    pub fn surface_elevation(&self, theta: f64, phi: f64) -> f64 {
        let ellipsoid = self.earth_radius(FRAC_PI_2 - theta);
        let (lat, lon) = lat_lon(theta, phi);

        let elevation = match self.ice.ice_mask(lat, lon) {
            Ok(IceMask::Grounded | IceMask::IceShelf) => {
                self.ice.surface_elevation(lat, lon).unwrap_or(f64::NAN)
            }
            Ok(IceMask::Ocean) | Err(_) => 0.0,
        };

        if elevation.is_finite() {
            ellipsoid + elevation / M_PER_KM
        } else {
            ellipsoid
        }
    }

    /// Material at `(theta, phi, r)`.
    pub fn material(&self, theta: f64, phi: f64, r: f64) -> Material {
        self.density_and_material(theta, phi, r).1
    }

    /// Density (g/cm^3) at `(theta, phi, r)`.
    pub fn density(&self, theta: f64, phi: f64, r: f64) -> f64 {
        self.density_and_material(theta, phi, r).0
    }

    /// Density (g/cm^3) and material at `(theta, phi, r)`.
    pub fn density_and_material(&self, theta: f64, phi: f64, r: f64) -> (f64, Material) {
        let ellipsoid = ellipsoid_radius(FRAC_PI_2 - theta);
        let material = match self.column(theta, phi) {
            Some(column) => classify(&column, r),
            None if r > ellipsoid => Material::Air,
            None => Material::Rock,
        };

        let density = match material.nominal_density() {
            Some(density) => density,
            None => {
                let depth = ellipsoid - r;
                self.density_profile
                    .density(self.density_profile.max_radius() - depth)
            }
        };
        (density, material)
    }

    /// [`density_and_material`](Self::density_and_material) at a coordinate.
    pub fn density_and_material_at(&self, point: &SphericalCoordinate) -> (f64, Material) {
        self.density_and_material(point.theta, point.phi, point.r)
    }

    /// [`density`](Self::density) at a coordinate.
    pub fn density_at(&self, point: &SphericalCoordinate) -> f64 {
        self.density(point.theta, point.phi, point.r)
    }

    /// [`material`](Self::material) at a coordinate.
    pub fn material_at(&self, point: &SphericalCoordinate) -> Material {
        self.material(point.theta, point.phi, point.r)
    }

    /// Random point on the surface, uniform in area over the cap south of 60°S.
    pub fn random_surface_point(&self, rng: &mut RandomEngine) -> SphericalCoordinate {
        let cos_theta = rng.uniform(-1.0, SURFACE_CAP_THETA_MIN.cos());
        let theta = cos_theta.clamp(-1.0, 1.0).acos();
        let phi = rng.uniform(0.0, TAU);
        let r = self.surface_elevation(theta, phi);
        trace!(theta, phi, r, "sampled surface point");
        SphericalCoordinate::new(theta, phi, r)
    }

    /// Random unit direction, uniform in solid angle over a hemisphere.
    ///
    /// `theta` is measured from the local surface normal and lies in
    /// `[0, π/2]`.
    pub fn random_surface_direction(&self, rng: &mut RandomEngine) -> SphericalCoordinate {
        let theta = rng.uniform(0.0, 1.0).acos();
        let phi = rng.uniform(0.0, TAU);
        SphericalCoordinate::new(theta, phi, 1.0)
    }

    /// Central-difference slope of the surface radius at `(theta, phi)`.
    ///
    /// Returns `(dr/dtheta, dr/dphi)` in km per radian.
    pub fn surface_slope(&self, theta: f64, phi: f64) -> (f64, f64) {
        let h = SLOPE_STEP;
        let d_theta = (self.surface_elevation(theta + h, phi)
            - self.surface_elevation(theta - h, phi))
            / (2.0 * h);
        let d_phi = (self.surface_elevation(theta, phi + h)
            - self.surface_elevation(theta, phi - h))
            / (2.0 * h);
        (d_theta, d_phi)
    }

    /// Gather the ice column at `(theta, phi)`, or `None` outside the grid.
    fn column(&self, theta: f64, phi: f64) -> Option<Column> {
        let (lat, lon) = lat_lon(theta, phi);
        let (x, y) = self.ice.projection().to_grid(lat, lon).ok()?;

        let ellipsoid = ellipsoid_radius(FRAC_PI_2 - theta);
        let mask = self.ice.ice_mask_at_point(x, y);
        let (surface, thickness) = match mask {
            IceMask::Ocean => (f64::NAN, f64::NAN),
            IceMask::Grounded | IceMask::IceShelf => (
                ellipsoid + self.ice.surface_elevation_at_point(x, y) / M_PER_KM,
                self.ice.ice_thickness_at_point(x, y) / M_PER_KM,
            ),
        };
        let bed = ellipsoid + self.ice.bed_depth_at_point(x, y) / M_PER_KM;

        Some(Column {
            mask,
            ellipsoid,
            surface,
            thickness,
            bed,
        })
    }
}

fn lat_lon(theta: f64, phi: f64) -> (f64, f64) {
    let point = SphericalCoordinate::new(theta, phi, 1.0);
    (point.latitude(), point.longitude())
}

/// Classify radius `r` within an ice column. Missing ice data falls back to
/// the ocean rules.
fn classify(column: &Column, r: f64) -> Material {
    let has_ice = column.surface.is_finite() && column.thickness.is_finite();
    match column.mask {
        IceMask::Grounded if has_ice => {
            if r > column.surface {
                Material::Air
            } else if r > column.surface - FIRN_DEPTH_KM {
                Material::Firn
            } else if r > column.surface - column.thickness {
                Material::Ice
            } else {
                Material::Rock
            }
        }
        IceMask::IceShelf if has_ice => {
            if r > column.surface {
                Material::Air
            } else if r > column.surface - FIRN_DEPTH_KM {
                Material::Firn
            } else if r > column.surface - column.thickness {
                Material::Ice
            } else if r > column.bed {
                Material::Ocean
            } else {
                Material::Rock
            }
        }
        _ => {
            if r > column.ellipsoid {
                Material::Air
            } else if r > column.bed {
                Material::Ocean
            } else {
                Material::Rock
            }
        }
    }
}
