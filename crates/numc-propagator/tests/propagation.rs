//! End-to-end propagation through a synthetic Earth.

use numc_common::{RandomEngine, SphericalCoordinate};
use numc_earth::{EarthModel, RadialDensityModel};
use numc_ice::{ByteOrder, GridSpec, IceRasters, IceSurfaceModel, PolarProjection, RasterGrid};
use numc_physics::{
    Flavor, InteractionModel, InteractionType, Particle, CHARGED_CURRENT_TABLE,
    NEUTRAL_CURRENT_TABLE, TAU_DECAY_TABLE,
};
use numc_propagator::{
    FluxConfig, FluxSource, PropagationError, Propagator, PropagatorConfig, Termination,
    Trajectory,
};
use std::path::Path;

fn grid_spec() -> GridSpec {
    GridSpec {
        ncols: 10,
        nrows: 10,
        xllcorner: -500.0,
        yllcorner: -500.0,
        cellsize: 100.0,
        nodata: -9999.0,
        byte_order: ByteOrder::Little,
    }
}

fn uniform(value: f32) -> RasterGrid {
    RasterGrid::from_values(vec![value; 100], grid_spec()).unwrap()
}

/// A 2.5 km thick ice plateau over the pole on a three-layer Earth.
fn earth() -> EarthModel {
    let rasters = IceRasters {
        surface: uniform(2000.0),
        bed: uniform(-500.0),
        thickness: uniform(2500.0),
        icemask: uniform(0.0),
        geoid: uniform(0.0),
    };
    let projection = PolarProjection::new(-71.0, 0.0).with_half_extent(500.0);
    let ice = IceSurfaceModel::new(rasters, projection);
    let prem = RadialDensityModel::from_table(
        vec![0.0, 3480.0, 6371.0],
        vec![13.0885, 9.90344, 2.6],
    )
    .unwrap();
    EarthModel::new(ice, prem)
}

/// The plateau with sentinel samples scattered through every raster and a
/// mix of grounded, shelf and ocean cells.
fn patchy_earth() -> EarthModel {
    let patchy = |value: f32, every: usize| {
        let values = (0..100)
            .map(|i| if i % every == 0 { -9999.0 } else { value })
            .collect();
        RasterGrid::from_values(values, grid_spec()).unwrap()
    };
    let mask = (0..100)
        .map(|i| match i % 4 {
            0 => 0.0,
            1 => 1.0,
            2 => 127.0,
            _ => -9999.0,
        })
        .collect();
    let rasters = IceRasters {
        surface: patchy(2000.0, 3),
        bed: patchy(-500.0, 5),
        thickness: patchy(2500.0, 7),
        icemask: RasterGrid::from_values(mask, grid_spec()).unwrap(),
        geoid: patchy(0.0, 11),
    };
    let projection = PolarProjection::new(-71.0, 0.0).with_half_extent(500.0);
    let prem = RadialDensityModel::from_table(
        vec![0.0, 3480.0, 6371.0],
        vec![13.0885, 9.90344, 2.6],
    )
    .unwrap();
    EarthModel::new(IceSurfaceModel::new(rasters, projection), prem)
}

fn table(value: f64) -> String {
    format!("2 1 2 15.0 21.0\n{value}\n{value}\n{value}\n{value}\n")
}

fn write_data(dir: &Path) {
    std::fs::write(dir.join(CHARGED_CURRENT_TABLE), table(0.2)).unwrap();
    std::fs::write(dir.join(NEUTRAL_CURRENT_TABLE), table(0.5)).unwrap();
    std::fs::write(dir.join(TAU_DECAY_TABLE), table(0.1)).unwrap();
    std::fs::write(
        dir.join("test_spectrum.dat"),
        "3\n16.0 -8.0\n18.0 -8.2\n20.0 -9.0\n",
    )
    .unwrap();
}

fn config(cross_section_factor: f64, parallel: bool) -> PropagatorConfig {
    let mut config = PropagatorConfig {
        seed: 11,
        parallel,
        flux: FluxConfig::Fixed(18.0),
        step_size_km: 5.0,
        ..PropagatorConfig::default()
    };
    config.physics.cross_section_factor = cross_section_factor;
    config
}

fn propagator<'a>(
    earth: &'a EarthModel,
    dir: &Path,
    config: PropagatorConfig,
) -> Propagator<'a> {
    let model = InteractionModel::load(dir)
        .unwrap()
        .with_cross_section_factor(config.physics.cross_section_factor)
        .with_min_energy(config.min_energy);
    let flux = FluxSource::from_config(&config.flux, dir).unwrap();
    Propagator::new(earth, flux, config, model).unwrap()
}

fn check_trajectory(trajectory: &Trajectory) {
    assert!(trajectory.distance_km <= trajectory.chord_length_km);
    let mut last = 0.0;
    for (i, vertex) in trajectory.interactions.iter().enumerate() {
        assert!(vertex.distance_km >= last);
        assert!(vertex.distance_km <= trajectory.chord_length_km);
        assert_eq!(vertex.chord_length_km, trajectory.chord_length_km);
        assert!(vertex.num_charged + vertex.num_neutral <= i);
        last = vertex.distance_km;
    }
    match trajectory.termination {
        Termination::Exited => {
            assert!(trajectory.survivor.is_some());
            assert_eq!(trajectory.distance_km, trajectory.chord_length_km);
        }
        Termination::Absorbed => assert!(trajectory.survivor.is_none()),
    }
}

#[test]
fn test_batch_has_contiguous_keys() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();
    let propagator = propagator(&earth, dir.path(), config(1.0, false));

    let results = propagator.propagate_particles(25).unwrap();
    assert_eq!(results.len(), 25);
    assert!(results.keys().copied().eq(0..25));
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();

    let sequential = propagator(&earth, dir.path(), config(1e4, false))
        .propagate_trajectories(40)
        .unwrap();
    let parallel = propagator(&earth, dir.path(), config(1e4, true))
        .propagate_trajectories(40)
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_adjacent_seeds_give_independent_batches() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();
    let run = |seed: u64| {
        let config = PropagatorConfig {
            seed,
            ..config(1e4, false)
        };
        propagator(&earth, dir.path(), config)
            .propagate_trajectories(50)
            .unwrap()
    };
    let first = run(100);
    let second = run(101);

    let shifted = (0..49)
        .filter(|&i| first[&(i + 1)] == second[&i])
        .count();
    assert_eq!(shifted, 0);
}

#[test]
fn test_transparent_earth_lets_everything_exit() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();
    let propagator = propagator(&earth, dir.path(), config(1e-12, false));

    for (_, trajectory) in propagator.propagate_trajectories(30).unwrap() {
        check_trajectory(&trajectory);
        assert_eq!(trajectory.termination, Termination::Exited);
        assert!(trajectory.interactions.is_empty());
        let survivor = trajectory.survivor.unwrap();
        assert!(survivor.is_neutrino());
        assert_eq!(survivor.energy(), 18.0);
    }
}

#[test]
fn test_opaque_earth_records_interactions() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();
    let propagator = propagator(&earth, dir.path(), config(1e6, false));

    let mut vertices = 0;
    for (_, trajectory) in propagator.propagate_trajectories(20).unwrap() {
        check_trajectory(&trajectory);
        if let Some(first) = trajectory.interactions.first() {
            assert!(first.particle.is_neutrino());
            assert_eq!(first.particle.energy(), 18.0);
            assert_ne!(first.interaction, InteractionType::Decay);
            assert_eq!((first.num_charged, first.num_neutral), (0, 0));
        }
        for vertex in &trajectory.interactions {
            if vertex.particle.is_lepton() {
                assert_eq!(vertex.interaction, InteractionType::Decay);
            }
        }
        vertices += trajectory.interactions.len();
    }
    assert!(vertices >= 20, "{vertices}");
}

#[test]
fn test_charged_current_tau_regenerates() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();
    // Low cut so taus decay before energy loss absorbs them
    let mut config = config(1e6, false);
    config.min_energy = 8.0;
    let propagator = propagator(&earth, dir.path(), config);

    let mut rng = RandomEngine::new(5);
    let nu = Particle::neutrino(Flavor::Tau, 19.0).unwrap();
    let mut saw_tau = false;
    for _ in 0..10 {
        let trajectory = propagator.propagate(nu, &mut rng).unwrap();
        check_trajectory(&trajectory);
        saw_tau |= trajectory
            .interactions
            .iter()
            .any(|v| v.particle.is_lepton() && v.particle.flavor() == Flavor::Tau);
    }
    assert!(saw_tau);
}

#[test]
fn test_density_stays_finite_over_missing_raster_data() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = patchy_earth();
    let propagator = propagator(&earth, dir.path(), config(1e4, false));

    let mut checked = 0;
    for (_, trajectory) in propagator.propagate_trajectories(40).unwrap() {
        check_trajectory(&trajectory);
        let Some(first) = trajectory.interactions.first() else {
            continue;
        };
        for vertex in &trajectory.interactions {
            let density = earth.density_at(&vertex.location);
            assert!(density.is_finite() && density > 0.0, "{density} at {vertex:?}");
            assert!(vertex.depth_km.is_finite());
        }

        // Walk the whole chord at the stepping resolution
        let direction = first.direction.to_cartesian();
        let entry = first.location.to_cartesian() - direction * first.distance_km;
        let mut distance = 0.0;
        while distance <= trajectory.chord_length_km {
            let point: SphericalCoordinate = (entry + direction * distance).to_spherical();
            let density = earth.density_at(&point);
            assert!(density.is_finite() && density > 0.0, "{density} at {distance} km");
            distance += 5.0;
        }
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn test_spectrum_energies_stay_in_range() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();
    let mut config = config(1.0, false);
    config.min_energy = 16.5;
    config.max_energy = 19.5;
    config.flux = FluxConfig::Spectrum("test_spectrum".to_string());
    let propagator = propagator(&earth, dir.path(), config);

    for index in 0..50 {
        let mut rng = propagator.rng_for(index);
        let nu = propagator.sample_neutrino(&mut rng).unwrap();
        assert!(nu.is_neutrino());
        assert!((16.5..19.5).contains(&nu.energy()), "{}", nu.energy());
    }
}

#[test]
fn test_from_config_loads_shared_data() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();
    let yaml = "seed: 3\nparallel: false\nflux:\n  spectrum: test_spectrum\nmin_energy: 16.0\nmax_energy: 20.0\n";
    let config = PropagatorConfig::from_yaml_str(yaml).unwrap();

    let propagator = Propagator::from_config(&earth, config, dir.path()).unwrap();
    assert!(matches!(propagator.flux(), FluxSource::Spectrum(_)));
    assert_eq!(propagator.propagate_particles(5).unwrap().len(), 5);

    let missing = PropagatorConfig {
        flux: FluxConfig::Spectrum("absent".to_string()),
        ..PropagatorConfig::default()
    };
    assert!(matches!(
        Propagator::from_config(&earth, missing, dir.path()),
        Err(PropagationError::Physics(_))
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let earth = earth();
    let model = InteractionModel::load(dir.path()).unwrap();
    let config = PropagatorConfig {
        step_size_km: -1.0,
        ..PropagatorConfig::default()
    };
    assert!(matches!(
        Propagator::new(&earth, FluxSource::Fixed(18.0), config, model),
        Err(PropagationError::InvalidConfig(_))
    ));
}
