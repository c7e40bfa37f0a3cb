//! South-polar stereographic projection on the WGS84 ellipsoid.
//!
//! Formulas follow Snyder, *Map Projections: A Working Manual* (USGS PP 1395),
//! eq. 15-9 and 21-33 to 21-38. The BEDMAP2 grid uses true scale at 71°S and
//! central meridian 0° (EPSG:3031).

use crate::{IceError, Result};
use numc_common::constants::{EARTH_A, EARTH_E};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const INVERSE_TOLERANCE: f64 = 1e-12;
const INVERSE_MAX_ITERATIONS: usize = 25;

/// Forward and inverse south-polar stereographic projection.
///
/// Grid coordinates are in km, with `x` toward 90°E and `y` toward the
/// central meridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarProjection {
    /// Central meridian (radians).
    central_meridian: f64,
    /// `a * m_c / t_c`, the radius scale of the projection (km).
    scale: f64,
    /// Half width of the square domain around the pole (km).
    half_extent: f64,
}

impl PolarProjection {
    /// Build a projection true-scale at `true_scale_lat` (degrees, south is
    /// negative) about `central_meridian` (degrees). The domain is unbounded.
    pub fn new(true_scale_lat: f64, central_meridian: f64) -> Self {
        let phi_c = (-true_scale_lat).to_radians();
        let sin_c = phi_c.sin();
        let m_c = phi_c.cos() / (1.0 - EARTH_E * EARTH_E * sin_c * sin_c).sqrt();
        let t_c = conformal_t(phi_c);

        Self {
            central_meridian: central_meridian.to_radians(),
            scale: EARTH_A * m_c / t_c,
            half_extent: f64::INFINITY,
        }
    }

    /// The projection used by the BEDMAP2 rasters, limited to their footprint.
    pub fn bedmap2() -> Self {
        Self::new(-71.0, 0.0).with_half_extent(3333.5)
    }

    /// Restrict the valid domain to `|x|, |y| <= half_extent` km.
    pub fn with_half_extent(mut self, half_extent: f64) -> Self {
        self.half_extent = half_extent;
        self
    }

    /// Project a latitude/longitude (degrees) to grid coordinates (km).
    ///
    /// Fails with [`IceError::OutOfDomain`] when the result lies outside the
    /// projection's domain.
    pub fn to_grid(&self, lat: f64, lon: f64) -> Result<(f64, f64)> {
        let phi = (-lat).to_radians();
        let lambda = lon.to_radians() - self.central_meridian;

        let rho = self.scale * conformal_t(phi);
        let x = rho * lambda.sin();
        let y = rho * lambda.cos();

        let inside = x.abs() <= self.half_extent && y.abs() <= self.half_extent;
        if !inside || x.is_nan() || y.is_nan() {
            return Err(IceError::OutOfDomain { lat, lon, x, y });
        }
        Ok((x, y))
    }

    /// Convert grid coordinates (km) back to latitude/longitude (degrees).
    ///
    /// Longitude is returned on `(-180, 180]`.
    pub fn to_lat_lon(&self, x: f64, y: f64) -> (f64, f64) {
        let rho = x.hypot(y);
        if rho == 0.0 {
            return (-90.0, self.central_meridian.to_degrees());
        }

        let t = rho / self.scale;
        let half_e = EARTH_E / 2.0;
        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..INVERSE_MAX_ITERATIONS {
            let es = EARTH_E * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(half_e)).atan();
            let converged = (next - phi).abs() < INVERSE_TOLERANCE;
            phi = next;
            if converged {
                break;
            }
        }

        let mut lon = (x.atan2(y) + self.central_meridian).to_degrees();
        if lon <= -180.0 {
            lon += 360.0;
        } else if lon > 180.0 {
            lon -= 360.0;
        }
        (-phi.to_degrees(), lon)
    }
}

impl Default for PolarProjection {
    fn default() -> Self {
        Self::bedmap2()
    }
}

/// Snyder eq. 15-9 for the south pole with `phi` the (positive) south latitude.
fn conformal_t(phi: f64) -> f64 {
    let es = EARTH_E * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(EARTH_E / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pole_maps_to_origin() {
        let proj = PolarProjection::bedmap2();
        let (x, y) = proj.to_grid(-90.0, 0.0).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_axes_orientation() {
        let proj = PolarProjection::bedmap2();

        let (x, y) = proj.to_grid(-80.0, 0.0).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-9);
        assert!(y > 1000.0 && y < 1200.0);

        let (x, y) = proj.to_grid(-80.0, 90.0).unwrap();
        assert!(x > 1000.0);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_true_scale_parallel_radius() {
        // On the true-scale parallel rho equals the parallel's radius a*m_c
        let proj = PolarProjection::new(-71.0, 0.0);
        let phi = 71f64.to_radians();
        let m_c = phi.cos() / (1.0 - (EARTH_E * phi.sin()).powi(2)).sqrt();
        let (x, y) = proj.to_grid(-71.0, 0.0).unwrap();
        assert_relative_eq!(x.hypot(y), EARTH_A * m_c, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let proj = PolarProjection::bedmap2();
        for &(lat, lon) in &[(-89.0, 10.0), (-75.5, -120.0), (-65.0, 170.0), (-82.0, -45.0)] {
            let (x, y) = proj.to_grid(lat, lon).unwrap();
            let (lat2, lon2) = proj.to_lat_lon(x, y);
            assert_relative_eq!(lat2, lat, epsilon = 1e-8);
            assert_relative_eq!(lon2, lon, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_out_of_domain() {
        let proj = PolarProjection::bedmap2();
        let err = proj.to_grid(-30.0, 0.0).unwrap_err();
        match err {
            IceError::OutOfDomain { lat, y, .. } => {
                assert_eq!(lat, -30.0);
                assert!(y > 3333.5);
            }
            other => panic!("unexpected error: {other}"),
        }

        let unbounded = PolarProjection::new(-71.0, 0.0);
        assert!(unbounded.to_grid(-30.0, 0.0).is_ok());
    }
}
