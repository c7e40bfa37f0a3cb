//! Spherical and Cartesian coordinates with respect to the centre of the Earth.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::ops::{Add, Mul, Sub};

/// A point (or direction, with `r == 1`) in Earth-centred spherical coordinates.
///
/// `theta` is measured from the North pole, `phi` eastward from the Greenwich
/// meridian, both in radians. `r` is in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SphericalCoordinate {
    /// Polar angle from the North pole (radians).
    pub theta: f64,
    /// Azimuth east of Greenwich (radians).
    pub phi: f64,
    /// Radius (km).
    pub r: f64,
}

impl SphericalCoordinate {
    /// Create a new coordinate.
    pub const fn new(theta: f64, phi: f64, r: f64) -> Self {
        Self { theta, phi, r }
    }

    /// Geodetic latitude in degrees (positive north).
    pub fn latitude(&self) -> f64 {
        (FRAC_PI_2 - self.theta).to_degrees()
    }

    /// Longitude in degrees on `(-180, 180]`.
    pub fn longitude(&self) -> f64 {
        let lon = self.phi.rem_euclid(TAU);
        if lon > PI {
            (lon - TAU).to_degrees()
        } else {
            lon.to_degrees()
        }
    }

    /// Convert to Cartesian coordinates (km).
    pub fn to_cartesian(&self) -> Cartesian {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (sin_p, cos_p) = self.phi.sin_cos();
        Cartesian::new(
            self.r * sin_t * cos_p,
            self.r * sin_t * sin_p,
            self.r * cos_t,
        )
    }
}

/// A Cartesian vector in the Earth-centred frame (km).
///
/// `z` points to the North pole and `x` through the Greenwich meridian.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Cartesian) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. The zero vector is returned unchanged.
    pub fn normalized(&self) -> Cartesian {
        let n = self.norm();
        if n == 0.0 {
            *self
        } else {
            *self * (1.0 / n)
        }
    }

    /// Convert to spherical coordinates; `phi` is wrapped onto `[0, 2π)`.
    pub fn to_spherical(&self) -> SphericalCoordinate {
        let r = self.norm();
        if r == 0.0 {
            return SphericalCoordinate::new(0.0, 0.0, 0.0);
        }
        let theta = (self.z / r).clamp(-1.0, 1.0).acos();
        let phi = self.y.atan2(self.x).rem_euclid(TAU);
        SphericalCoordinate::new(theta, phi, r)
    }
}

impl Add for Cartesian {
    type Output = Cartesian;

    fn add(self, rhs: Cartesian) -> Cartesian {
        Cartesian::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cartesian {
    type Output = Cartesian;

    fn sub(self, rhs: Cartesian) -> Cartesian {
        Cartesian::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Cartesian {
    type Output = Cartesian;

    fn mul(self, rhs: f64) -> Cartesian {
        Cartesian::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
