//! Interactions driven by final-state tables written to disk.

use approx::assert_relative_eq;
use numc_common::constants::{CM_PER_KM, N_A};
use numc_common::RandomEngine;
use numc_physics::{
    charged_current_cross_section, neutral_current_cross_section, shared_tables,
    CrossSectionModel, Current, Flavor, InteractionModel, InteractionType, Particle,
    PhysicsError, CHARGED_CURRENT_TABLE, NEUTRAL_CURRENT_TABLE, TAU_DECAY_TABLE,
};
use std::path::Path;
use std::sync::Arc;

/// Every row of the table holds `value`.
fn constant_table(value: f64) -> String {
    let mut text = String::from("2 1 2 15.0 21.0\n");
    for _ in 0..4 {
        text.push_str(&format!("{value}\n"));
    }
    text
}

fn write_tables(dir: &Path) {
    std::fs::write(dir.join(CHARGED_CURRENT_TABLE), constant_table(0.2)).unwrap();
    std::fs::write(dir.join(NEUTRAL_CURRENT_TABLE), constant_table(0.5)).unwrap();
    std::fs::write(dir.join(TAU_DECAY_TABLE), constant_table(0.1)).unwrap();
}

fn model() -> (tempfile::TempDir, InteractionModel) {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    let model = InteractionModel::load(dir.path()).unwrap();
    (dir, model)
}

#[test]
fn test_shared_tables_are_loaded_once() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());

    let first = shared_tables(dir.path()).unwrap();
    let second = shared_tables(dir.path()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let model = InteractionModel::shared(dir.path()).unwrap();
    assert_eq!(model.tables().charged_current.nfinal(), 2);
}

#[test]
fn test_missing_table_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CHARGED_CURRENT_TABLE), constant_table(0.2)).unwrap();
    let err = InteractionModel::load(dir.path()).unwrap_err();
    match err {
        PhysicsError::DataFile { path, .. } => {
            assert!(path.ends_with(NEUTRAL_CURRENT_TABLE));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_charged_current_produces_lepton() {
    let (_dir, model) = model();
    let mut rng = RandomEngine::new(1);
    let nu = Particle::neutrino(Flavor::Tau, 18.0).unwrap();

    assert_relative_eq!(nu.y_factor(Current::Charged, &model, &mut rng).unwrap(), 0.2);
    let tau = nu
        .interaction_products(InteractionType::Charged, &model, &mut rng)
        .unwrap()
        .unwrap();
    assert!(tau.is_lepton());
    assert_eq!(tau.flavor(), Flavor::Tau);
    assert_relative_eq!(tau.energy(), 18.0 + 0.8f64.log10(), epsilon = 1e-12);
}

#[test]
fn test_neutral_current_regeneration() {
    let (_dir, model) = model();
    let mut rng = RandomEngine::new(2);
    let nu = Particle::neutrino(Flavor::Muon, 19.0).unwrap();

    let regenerated = nu
        .interaction_products(InteractionType::Neutral, &model, &mut rng)
        .unwrap()
        .unwrap();
    assert!(regenerated.is_neutrino());
    assert_eq!(regenerated.flavor(), Flavor::Muon);
    assert_relative_eq!(regenerated.energy(), 19.0 + 0.5f64.log10(), epsilon = 1e-12);

    let absorbing = model.with_neutral_current_regeneration(false);
    let product = nu
        .interaction_products(InteractionType::Neutral, &absorbing, &mut rng)
        .unwrap();
    assert!(product.is_none());
}

#[test]
fn test_tau_decay_regenerates_tau_neutrino() {
    let (_dir, model) = model();
    let mut rng = RandomEngine::new(3);
    let tau = Particle::lepton(Flavor::Tau, 18.5).unwrap();

    let nu = tau
        .interaction_products(InteractionType::Decay, &model, &mut rng)
        .unwrap()
        .unwrap();
    assert!(nu.is_neutrino());
    assert_eq!(nu.flavor(), Flavor::Tau);
    assert_relative_eq!(nu.energy(), 17.5, epsilon = 1e-12);

    // The daughter falls below the cut
    let strict = model.with_min_energy(18.0);
    assert!(tau
        .interaction_products(InteractionType::Decay, &strict, &mut rng)
        .unwrap()
        .is_none());
}

#[test]
fn test_muon_decay_and_electron_shower() {
    let (_dir, model) = model();
    let mut rng = RandomEngine::new(4);

    let muon = Particle::lepton(Flavor::Muon, 19.0).unwrap();
    for _ in 0..100 {
        if let Some(nu) = muon
            .interaction_products(InteractionType::Decay, &model, &mut rng)
            .unwrap()
        {
            assert_eq!(nu.flavor(), Flavor::Muon);
            assert!(nu.is_neutrino());
            assert!(nu.energy() < 19.0);
        }
    }

    let electron = Particle::lepton(Flavor::Electron, 19.0).unwrap();
    assert!(electron
        .interaction_products(InteractionType::Decay, &model, &mut rng)
        .unwrap()
        .is_none());
}

#[test]
fn test_unsupported_interactions_are_errors() {
    let (_dir, model) = model();
    let mut rng = RandomEngine::new(5);

    let tau = Particle::lepton(Flavor::Tau, 18.0).unwrap();
    assert!(matches!(
        tau.interaction_products(InteractionType::Charged, &model, &mut rng),
        Err(PhysicsError::UnsupportedInteraction { .. })
    ));
    assert!(matches!(
        tau.cross_section(Current::Charged, &model),
        Err(PhysicsError::NotANeutrino(_))
    ));

    let nu = Particle::neutrino(Flavor::Electron, 18.0).unwrap();
    assert!(nu
        .interaction_products(InteractionType::Decay, &model, &mut rng)
        .is_err());
}

#[test]
fn test_neutrino_interaction_length() {
    let (_dir, model) = model();
    let nu = Particle::neutrino(Flavor::Electron, 18.0).unwrap();
    let density = 2.65;

    let sigma = charged_current_cross_section(18.0, CrossSectionModel::ConnollyMiddle)
        + neutral_current_cross_section(18.0, CrossSectionModel::ConnollyMiddle);
    let expected = 1.0 / (N_A * density * sigma) / CM_PER_KM;

    let (length, interaction) = nu.interaction_length(density, &model).unwrap();
    assert_relative_eq!(length, expected, max_relative = 1e-12);
    assert_eq!(interaction, InteractionType::Charged);
    // Roughly 600 km of rock at 1 EeV
    assert!(length > 300.0 && length < 1_000.0, "{length}");

    let doubled = model.clone().with_cross_section_factor(2.0);
    let (half, _) = nu.interaction_length(density, &doubled).unwrap();
    assert_relative_eq!(half, expected / 2.0, max_relative = 1e-12);

    let branching = nu.branching(&model).unwrap();
    assert!(branching > 0.5 && branching < 1.0);
}

#[test]
fn test_lepton_interaction_lengths() {
    let (_dir, model) = model();

    let electron = Particle::lepton(Flavor::Electron, 18.0).unwrap();
    let (length, interaction) = electron.interaction_length(0.917, &model).unwrap();
    assert_eq!(interaction, InteractionType::Decay);
    assert_relative_eq!(length, 36.08 / 0.917 / CM_PER_KM, max_relative = 1e-12);

    let tau = Particle::lepton(Flavor::Tau, 18.0).unwrap();
    let muon = Particle::lepton(Flavor::Muon, 18.0).unwrap();
    let (tau_length, _) = tau.interaction_length(0.917, &model).unwrap();
    let (muon_length, _) = muon.interaction_length(0.917, &model).unwrap();
    // Decay lengths do not depend on the medium
    assert_eq!(tau.interaction_length(2.65, &model).unwrap().0, tau_length);
    assert!(muon_length > 1e6 * tau_length);
}
