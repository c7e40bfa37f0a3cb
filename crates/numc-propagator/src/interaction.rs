//! Interaction records produced while stepping a particle through the Earth.

use numc_common::SphericalCoordinate;
use numc_earth::Material;
use numc_physics::{InteractionType, Particle};
use serde::Serialize;

/// One interaction or decay vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    /// Number of stepping trials taken up to and including this vertex.
    pub trial: usize,
    /// The particle that interacted, as it was at the vertex.
    pub particle: Particle,
    /// Vertex position.
    pub location: SphericalCoordinate,
    /// Direction of travel (unit vector in Earth-centred spherical form).
    pub direction: SphericalCoordinate,
    pub interaction: InteractionType,
    /// Distance travelled along the chord from the entry point (km).
    pub distance_km: f64,
    /// Depth below the local surface (km); negative above it.
    pub depth_km: f64,
    pub material: Material,
    /// Length of the whole chord (km).
    pub chord_length_km: f64,
    /// Neutral-current interactions before this vertex.
    pub num_neutral: usize,
    /// Charged-current interactions before this vertex.
    pub num_charged: usize,
}

/// Vertices of one propagated neutrino, in temporal order.
pub type InteractionList = Vec<Interaction>;

/// How a propagation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The active particle reached the exit point.
    Exited,
    /// No particle above the energy cut survived.
    Absorbed,
}

/// Full outcome of propagating one particle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub interactions: InteractionList,
    pub termination: Termination,
    /// The particle still travelling at the end, if any.
    pub survivor: Option<Particle>,
    pub chord_length_km: f64,
    /// Distance covered before exit or absorption (km).
    pub distance_km: f64,
}

impl Trajectory {
    pub fn exited(&self) -> bool {
        self.termination == Termination::Exited
    }

    pub fn absorbed(&self) -> bool {
        self.termination == Termination::Absorbed
    }
}
