//! Ice surface, thickness, bed and mask queries on the BEDMAP2 rasters.

use crate::{GridSpec, PolarProjection, RasterGrid, Result};
use std::path::Path;
use tracing::debug;

/// Surface elevation relative to the GL04C geoid (m).
pub const SURFACE_FILE: &str = "bedmap2_surface.flt";
/// Bed elevation relative to the GL04C geoid (m).
pub const BED_FILE: &str = "bedmap2_bed.flt";
/// Ice thickness (m).
pub const THICKNESS_FILE: &str = "bedmap2_thickness.flt";
/// Grounded ice / ice shelf mask: 0 grounded, 1 shelf, 127 ocean.
pub const ICEMASK_FILE: &str = "bedmap2_icemask_grounded_and_shelves.flt";
/// GL04C geoid to WGS84 ellipsoid correction (m).
pub const GEOID_FILE: &str = "gl04c_geiod_to_WGS84.flt";

/// Classification of a grid location by the ice mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IceMask {
    /// Ice resting on bedrock.
    Grounded,
    /// Floating ice over ocean.
    IceShelf,
    /// Open ocean, or no data.
    Ocean,
}

impl IceMask {
    /// Classify an interpolated mask value.
    ///
    /// Anything that is not clearly grounded or shelf (including NaN) is
    /// ocean, so a single ocean sample in the 2x2 neighbourhood keeps surface
    /// elevations from being read where none exist.
    pub fn from_value(value: f64) -> Self {
        if value < 1.0 {
            IceMask::Grounded
        } else if value == 1.0 {
            IceMask::IceShelf
        } else {
            IceMask::Ocean
        }
    }
}

/// The five rasters making up an ice surface model.
#[derive(Debug, Clone)]
pub struct IceRasters {
    pub surface: RasterGrid,
    pub bed: RasterGrid,
    pub thickness: RasterGrid,
    pub icemask: RasterGrid,
    pub geoid: RasterGrid,
}

/// Antarctic ice geometry queried by latitude/longitude or grid coordinates.
///
/// Elevations are in metres relative to the WGS84 ellipsoid.
#[derive(Debug, Clone)]
pub struct IceSurfaceModel {
    projection: PolarProjection,
    rasters: IceRasters,
}

impl IceSurfaceModel {
    /// Build a model from already loaded rasters.
    pub fn new(rasters: IceRasters, projection: PolarProjection) -> Self {
        Self {
            projection,
            rasters,
        }
    }

    /// Load the BEDMAP2 rasters from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P, spec: GridSpec) -> Result<Self> {
        let dir = dir.as_ref();
        debug!(dir = %dir.display(), "loading BEDMAP2 rasters");

        let rasters = IceRasters {
            surface: RasterGrid::load(dir.join(SURFACE_FILE), spec)?,
            bed: RasterGrid::load(dir.join(BED_FILE), spec)?,
            thickness: RasterGrid::load(dir.join(THICKNESS_FILE), spec)?,
            icemask: RasterGrid::load(dir.join(ICEMASK_FILE), spec)?,
            geoid: RasterGrid::load(dir.join(GEOID_FILE), spec)?,
        };
        let half_extent = spec.xright().min(spec.ytop());
        let projection = PolarProjection::bedmap2().with_half_extent(half_extent);

        Ok(Self::new(rasters, projection))
    }

    /// The projection from latitude/longitude to grid coordinates.
    pub fn projection(&self) -> &PolarProjection {
        &self.projection
    }

    /// Ice mask at a latitude/longitude (degrees).
    pub fn ice_mask(&self, lat: f64, lon: f64) -> Result<IceMask> {
        let (x, y) = self.projection.to_grid(lat, lon)?;
        Ok(self.ice_mask_at_point(x, y))
    }

    /// Surface elevation (m) at a latitude/longitude (degrees).
    pub fn surface_elevation(&self, lat: f64, lon: f64) -> Result<f64> {
        let (x, y) = self.projection.to_grid(lat, lon)?;
        Ok(self.surface_elevation_at_point(x, y))
    }

    /// Ice thickness (m) at a latitude/longitude (degrees).
    pub fn ice_thickness(&self, lat: f64, lon: f64) -> Result<f64> {
        let (x, y) = self.projection.to_grid(lat, lon)?;
        Ok(self.ice_thickness_at_point(x, y))
    }

    /// Bed elevation (m) at a latitude/longitude (degrees).
    pub fn bed_depth(&self, lat: f64, lon: f64) -> Result<f64> {
        let (x, y) = self.projection.to_grid(lat, lon)?;
        Ok(self.bed_depth_at_point(x, y))
    }

    pub fn ice_mask_at_point(&self, x: f64, y: f64) -> IceMask {
        IceMask::from_value(self.rasters.icemask.sample(x, y))
    }

    pub fn surface_elevation_at_point(&self, x: f64, y: f64) -> f64 {
        self.rasters.surface.sample(x, y) + self.rasters.geoid.sample(x, y)
    }

    pub fn ice_thickness_at_point(&self, x: f64, y: f64) -> f64 {
        self.rasters.thickness.sample(x, y)
    }

    pub fn bed_depth_at_point(&self, x: f64, y: f64) -> f64 {
        self.rasters.bed.sample(x, y) + self.rasters.geoid.sample(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ByteOrder;

    fn spec() -> GridSpec {
        GridSpec {
            ncols: 2,
            nrows: 2,
            xllcorner: -1.0,
            yllcorner: -1.0,
            cellsize: 1.0,
            nodata: -9999.0,
            byte_order: ByteOrder::Little,
        }
    }

    fn uniform(value: f32) -> RasterGrid {
        RasterGrid::from_values(vec![value; 4], spec()).unwrap()
    }

    fn model(mask: [f32; 4]) -> IceSurfaceModel {
        let rasters = IceRasters {
            surface: uniform(2000.0),
            bed: uniform(-500.0),
            thickness: uniform(2500.0),
            icemask: RasterGrid::from_values(mask.to_vec(), spec()).unwrap(),
            geoid: uniform(-20.0),
        };
        IceSurfaceModel::new(rasters, PolarProjection::new(-71.0, 0.0).with_half_extent(1.0))
    }

    #[test]
    fn test_mask_classification() {
        assert_eq!(IceMask::from_value(0.0), IceMask::Grounded);
        assert_eq!(IceMask::from_value(0.5), IceMask::Grounded);
        assert_eq!(IceMask::from_value(1.0), IceMask::IceShelf);
        assert_eq!(IceMask::from_value(1.5), IceMask::Ocean);
        assert_eq!(IceMask::from_value(127.0), IceMask::Ocean);
        assert_eq!(IceMask::from_value(f64::NAN), IceMask::Ocean);
    }

    #[test]
    fn test_geoid_correction_applied() {
        let ice = model([0.0; 4]);
        assert_eq!(ice.surface_elevation(-90.0, 0.0).unwrap(), 1980.0);
        assert_eq!(ice.bed_depth(-90.0, 0.0).unwrap(), -520.0);
        assert_eq!(ice.ice_thickness(-90.0, 0.0).unwrap(), 2500.0);
        assert_eq!(ice.ice_mask(-90.0, 0.0).unwrap(), IceMask::Grounded);
    }

    #[test]
    fn test_single_ocean_sample_flips_mask() {
        let ice = model([0.0, 0.0, 0.0, 127.0]);
        assert_eq!(ice.ice_mask_at_point(0.0, 0.0), IceMask::Ocean);
        assert_eq!(ice.ice_mask_at_point(-0.5, 0.5), IceMask::Grounded);

        let shelf = model([1.0; 4]);
        assert_eq!(shelf.ice_mask_at_point(0.0, 0.0), IceMask::IceShelf);
    }

    #[test]
    fn test_outside_projection_domain() {
        let ice = model([0.0; 4]);
        assert!(ice.ice_mask(-60.0, 0.0).is_err());
    }
}
