//! # numc-physics
//!
//! Particle physics for neutrino propagation through matter.
//!
//! ## Features
//!
//! - Charged- and neutral-current cross sections (Connolly et al. 2011 and
//!   several literature fits)
//! - Pre-randomized final-state tables for Bjorken y and tau decay
//! - Tau energy loss, lepton decay and electron showering
//! - Tabulated incident flux spectra with spline interpolation and energy
//!   sampling
//!
//! ## Example
//!
//! ```no_run
//! use numc_common::RandomEngine;
//! use numc_physics::{Flavor, InteractionModel, Particle};
//!
//! let model = InteractionModel::shared("data")?;
//! let mut rng = RandomEngine::new(7);
//!
//! let nu = Particle::neutrino(Flavor::Tau, 18.0)?;
//! let (length, interaction) = nu.interaction_length(2.7, &model)?;
//! println!("{nu}: {interaction} after {length:.0} km");
//!
//! if let Some(product) = nu.interaction_products(interaction, &model, &mut rng)? {
//!     println!("produced {product}");
//! }
//! # Ok::<(), numc_physics::PhysicsError>(())
//! ```

mod cross_section;
mod error;
mod final_state;
mod flux;
mod model;
mod particle;
mod spline;

pub use cross_section::{
    charged_current_cross_section, cross_section, neutral_current_cross_section,
    CrossSectionModel, Current,
};
pub use error::PhysicsError;
pub use final_state::{
    FinalStateTable, FinalStateTables, CHARGED_CURRENT_TABLE, NEUTRAL_CURRENT_TABLE,
    TAU_DECAY_TABLE,
};
pub use flux::{FluxSpectrum, DEFAULT_SPECTRUM};
pub use model::{shared_tables, InteractionModel, DEFAULT_MIN_ENERGY};
pub use particle::{EnergyLossModel, Flavor, InteractionType, Particle, ParticleKind};
pub use spline::CubicSpline;

/// Result type for physics operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;
