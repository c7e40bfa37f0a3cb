//! Chord-stepping Monte Carlo propagation.
//!
//! Each particle exits the surface at a random point of the southern cap in
//! a random outward direction. It is walked from the matching entry point
//! along the straight chord, drawing an exponential free path at every step
//! from the local density, until it reaches the exit or is absorbed.

use crate::config::{FluxConfig, PropagatorConfig};
use crate::interaction::{Interaction, InteractionList, Termination, Trajectory};
use crate::Result;
use numc_common::constants::CM_PER_KM;
use numc_common::{Cartesian, RandomEngine, SphericalCoordinate};
use numc_earth::EarthModel;
use numc_metrics::metric_defs;
use numc_physics::{
    shared_tables, Flavor, FluxSpectrum, InteractionModel, InteractionType, Particle,
    ParticleKind,
};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::f64::consts::LN_10;
use std::path::Path;
use std::sync::Once;
use tracing::{debug, info, trace};

/// Source of incident neutrino energies.
#[derive(Debug, Clone)]
pub enum FluxSource {
    /// Every neutrino has this energy (log10 eV).
    Fixed(f64),
    /// Energies are sampled from a spectrum.
    Spectrum(FluxSpectrum),
}

impl FluxSource {
    /// Resolve the configured source, loading spectra from `data_dir`.
    pub fn from_config<P: AsRef<Path>>(flux: &FluxConfig, data_dir: P) -> Result<Self> {
        Ok(match flux {
            FluxConfig::Fixed(energy) => FluxSource::Fixed(*energy),
            FluxConfig::Spectrum(name) => {
                FluxSource::Spectrum(FluxSpectrum::named(data_dir, name)?)
            }
        })
    }

    /// Draw an energy in `[min_energy, max_energy]`.
    pub fn sample_energy(
        &self,
        rng: &mut RandomEngine,
        min_energy: f64,
        max_energy: f64,
    ) -> Result<f64> {
        match self {
            FluxSource::Fixed(energy) => Ok(*energy),
            FluxSource::Spectrum(spectrum) => {
                Ok(spectrum.sample_energy(rng, min_energy, max_energy)?)
            }
        }
    }
}

/// Unit vector for a direction given relative to the local vertical at
/// `point`: `local.theta` from the outward normal, `local.phi` from south
/// towards east.
fn global_direction(point: &SphericalCoordinate, local: &SphericalCoordinate) -> Cartesian {
    let (sin_t, cos_t) = point.theta.sin_cos();
    let (sin_p, cos_p) = point.phi.sin_cos();
    let radial = Cartesian::new(sin_t * cos_p, sin_t * sin_p, cos_t);
    let south = Cartesian::new(cos_t * cos_p, cos_t * sin_p, -sin_t);
    let east = Cartesian::new(-sin_p, cos_p, 0.0);

    let (sin_a, cos_a) = local.theta.sin_cos();
    let (sin_b, cos_b) = local.phi.sin_cos();
    radial * cos_a + (south * cos_b + east * sin_b) * sin_a
}

/// Propagates neutrinos through an [`EarthModel`].
#[derive(Debug)]
pub struct Propagator<'a> {
    earth: &'a EarthModel,
    flux: FluxSource,
    config: PropagatorConfig,
    model: InteractionModel,
}

impl<'a> Propagator<'a> {
    /// Create a propagator after validating `config`.
    pub fn new(
        earth: &'a EarthModel,
        flux: FluxSource,
        config: PropagatorConfig,
        model: InteractionModel,
    ) -> Result<Self> {
        config.validate()?;
        static DESCRIBE_METRICS: Once = Once::new();
        DESCRIBE_METRICS.call_once(numc_metrics::describe_metrics);
        Ok(Self {
            earth,
            flux,
            config,
            model,
        })
    }

    /// Build the flux source and interaction model from files in `data_dir`.
    pub fn from_config<P: AsRef<Path>>(
        earth: &'a EarthModel,
        config: PropagatorConfig,
        data_dir: P,
    ) -> Result<Self> {
        config.validate()?;
        let data_dir = data_dir.as_ref();
        let flux = FluxSource::from_config(&config.flux, data_dir)?;
        let model = config.interaction_model(shared_tables(data_dir)?);
        Self::new(earth, flux, config, model)
    }

    pub fn config(&self) -> &PropagatorConfig {
        &self.config
    }

    pub fn interaction_model(&self) -> &InteractionModel {
        &self.model
    }

    pub fn flux(&self) -> &FluxSource {
        &self.flux
    }

    /// Random stream for particle `index` of a batch.
    pub fn rng_for(&self, index: usize) -> RandomEngine {
        RandomEngine::for_stream(self.config.seed, index as u64)
            .with_max_rejection_attempts(self.config.max_rejection_attempts)
    }

    /// Draw an incident neutrino of random flavor.
    pub fn sample_neutrino(&self, rng: &mut RandomEngine) -> Result<Particle> {
        let energy =
            self.flux
                .sample_energy(rng, self.config.min_energy, self.config.max_energy)?;
        Ok(Particle::random_neutrino(energy, rng)?)
    }

    /// Propagate `particle` along a random chord ending in the southern cap.
    pub fn propagate(&self, particle: Particle, rng: &mut RandomEngine) -> Result<Trajectory> {
        let exit = self.earth.random_surface_point(rng);
        let local = self.earth.random_surface_direction(rng);
        let direction = global_direction(&exit, &local);
        let direction_spherical = direction.to_spherical();

        let chord = (2.0 * exit.r * local.theta.cos()).max(0.0);
        let entry = exit.to_cartesian() - direction * chord;
        metrics::histogram!(metric_defs::CHORD_LENGTH.name).record(chord);

        let mut active = particle;
        let mut interactions = InteractionList::new();
        let mut distance = 0.0;
        let mut trial = 0usize;
        let (mut num_neutral, mut num_charged) = (0usize, 0usize);

        while distance < chord {
            trial += 1;
            let position = (entry + direction * distance).to_spherical();
            let density = self.earth.density_at(&position);

            let remaining = chord - distance;
            let step = self.config.step_size_km.min(remaining);
            let (length, dominant) = active.interaction_length(density, &self.model)?;
            let free_path = rng.exponential(length);

            // A NaN free path (zero density) counts as no interaction
            if !(free_path < step) {
                distance = if step >= remaining { chord } else { distance + step };
                match self.after_continuous_loss(active, density, step) {
                    Some(particle) => active = particle,
                    None => {
                        return Ok(self.finish(
                            interactions,
                            Termination::Absorbed,
                            None,
                            chord,
                            distance,
                        ))
                    }
                }
                continue;
            }

            distance += free_path;
            active = match self.after_continuous_loss(active, density, free_path) {
                Some(particle) => particle,
                None => {
                    return Ok(self.finish(
                        interactions,
                        Termination::Absorbed,
                        None,
                        chord,
                        distance,
                    ))
                }
            };

            let interaction = match active.kind() {
                ParticleKind::Neutrino => {
                    if rng.uniform(0.0, 1.0) < active.branching(&self.model)? {
                        InteractionType::Charged
                    } else {
                        InteractionType::Neutral
                    }
                }
                ParticleKind::Lepton => dominant,
            };

            let location = (entry + direction * distance).to_spherical();
            let material = self.earth.material_at(&location);
            let depth = self.earth.surface_elevation(location.theta, location.phi) - location.r;
            interactions.push(Interaction {
                trial,
                particle: active,
                location,
                direction: direction_spherical,
                interaction,
                distance_km: distance,
                depth_km: depth,
                material,
                chord_length_km: chord,
                num_neutral,
                num_charged,
            });
            match interaction {
                InteractionType::Charged => num_charged += 1,
                InteractionType::Neutral => num_neutral += 1,
                InteractionType::Decay => {}
            }
            metrics::counter!(
                metric_defs::INTERACTIONS.name,
                "interaction" => interaction.as_str(),
                "kind" => active.kind().as_str()
            )
            .increment(1);
            trace!(%active, %interaction, distance, depth, %material, "interaction");

            match active.interaction_products(interaction, &self.model, rng)? {
                Some(product) => active = product,
                None => {
                    return Ok(self.finish(
                        interactions,
                        Termination::Absorbed,
                        None,
                        chord,
                        distance,
                    ))
                }
            }
        }

        Ok(self.finish(
            interactions,
            Termination::Exited,
            Some(active),
            chord,
            chord,
        ))
    }

    /// Apply continuous energy loss over `length_km` of matter with density
    /// `density`. Returns `None` when the particle drops below the cut.
    fn after_continuous_loss(
        &self,
        particle: Particle,
        density: f64,
        length_km: f64,
    ) -> Option<Particle> {
        if !(particle.is_lepton() && particle.flavor() == Flavor::Tau) {
            return Some(particle);
        }
        let beta = particle.energy_loss(self.model.energy_loss_model()) * 1e-6;
        let energy = particle.energy() - beta * density * length_km * CM_PER_KM / LN_10;
        if energy <= self.model.min_energy() {
            return None;
        }
        particle.with_energy(energy).ok()
    }

    fn finish(
        &self,
        interactions: InteractionList,
        termination: Termination,
        survivor: Option<Particle>,
        chord: f64,
        distance: f64,
    ) -> Trajectory {
        match termination {
            Termination::Exited => metrics::counter!(metric_defs::EXITED.name).increment(1),
            Termination::Absorbed => metrics::counter!(metric_defs::ABSORBED.name).increment(1),
        }
        trace!(
            ?termination,
            vertices = interactions.len(),
            chord,
            distance,
            "propagation finished"
        );
        Trajectory {
            interactions,
            termination,
            survivor,
            chord_length_km: chord,
            distance_km: distance,
        }
    }

    /// Sample and propagate particle `index` of a batch on its own stream.
    pub fn propagate_one(&self, index: usize) -> Result<Trajectory> {
        let mut rng = self.rng_for(index);
        let neutrino = self.sample_neutrino(&mut rng)?;
        metrics::counter!(metric_defs::PARTICLES.name).increment(1);
        debug!(index, %neutrino, "propagating");
        self.propagate(neutrino, &mut rng)
    }

    /// Propagate `count` particles and keep their full trajectories.
    ///
    /// Results depend only on the seed and index, not on whether the batch
    /// runs in parallel.
    pub fn propagate_trajectories(&self, count: usize) -> Result<BTreeMap<usize, Trajectory>> {
        let run = |index: usize| self.propagate_one(index).map(|t| (index, t));
        let trajectories: BTreeMap<usize, Trajectory> = if self.config.parallel {
            (0..count)
                .into_par_iter()
                .map(run)
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .collect()
        } else {
            (0..count).map(run).collect::<Result<BTreeMap<_, _>>>()?
        };

        let absorbed = trajectories.values().filter(|t| t.absorbed()).count();
        let vertices: usize = trajectories.values().map(|t| t.interactions.len()).sum();
        info!(
            particles = count,
            exited = count - absorbed,
            absorbed,
            interactions = vertices,
            parallel = self.config.parallel,
            "propagation batch complete"
        );
        Ok(trajectories)
    }

    /// Propagate `count` particles; keys are `0..count`.
    pub fn propagate_particles(&self, count: usize) -> Result<BTreeMap<usize, InteractionList>> {
        Ok(self
            .propagate_trajectories(count)?
            .into_iter()
            .map(|(index, trajectory)| (index, trajectory.interactions))
            .collect())
    }
}
