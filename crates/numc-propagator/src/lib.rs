//! # numc-propagator
//!
//! Monte Carlo propagation of high-energy neutrinos through the Earth to an
//! exit point on the Antarctic ice sheet. Every interaction or decay vertex
//! along the way is recorded.
//!
//! ## Example
//!
//! ```no_run
//! use numc_earth::{EarthDataPaths, EarthModel};
//! use numc_propagator::{Propagator, PropagatorConfig};
//!
//! let earth = EarthModel::load(&EarthDataPaths::from_data_dir("data"))?;
//! let config = PropagatorConfig::from_yaml_file("propagation.yaml")?;
//! let propagator = Propagator::from_config(&earth, config, "data")?;
//!
//! for (index, interactions) in propagator.propagate_particles(1_000)? {
//!     println!("particle {index}: {} vertices", interactions.len());
//! }
//! # Ok::<(), numc_propagator::PropagationError>(())
//! ```

mod config;
mod error;
mod interaction;
mod propagator;

pub use config::{FluxConfig, PhysicsConfig, PropagatorConfig};
pub use error::PropagationError;
pub use interaction::{Interaction, InteractionList, Termination, Trajectory};
pub use propagator::{FluxSource, Propagator};

/// Result type for propagation operations.
pub type Result<T> = std::result::Result<T, PropagationError>;
