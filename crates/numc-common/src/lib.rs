//! # numc-common
//!
//! Shared building blocks for the numc neutrino propagation workspace:
//!
//! - [`constants`]: WGS84 ellipsoid parameters and physical constants
//! - [`SphericalCoordinate`] and [`Cartesian`]: positions and directions
//!   with respect to the centre of the Earth (km, radians)
//! - [`RandomEngine`]: seedable random source with uniform, Gaussian,
//!   Poisson, exponential and acceptance/rejection sampling
//!
//! ## Example
//!
//! ```
//! use numc_common::{RandomEngine, SphericalCoordinate};
//!
//! let mut rng = RandomEngine::new(42);
//! let theta = rng.uniform(0.0, std::f64::consts::PI);
//! let point = SphericalCoordinate::new(theta, 0.0, 6371.0);
//! assert!(point.to_cartesian().norm() > 6370.0);
//! ```

pub mod constants;
mod coord;
mod random;

pub use coord::{Cartesian, SphericalCoordinate};
pub use random::{RandomEngine, RandomError, DEFAULT_MAX_REJECTION_ATTEMPTS};
