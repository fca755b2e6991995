// De-excitation cascades and photon absorption in argon-methane
mod common;

use gasmc::{
    ArgonLevel, CollisionType, GasError, GasMedium, GasMixture, OpticalTable,
    PhotonCollisionType, ProductKind, TabulatedPhotoabsorption,
};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn argon_methane() -> GasMedium {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut medium = common::medium(&[("Ar", 0.9), ("CH4", 0.1)]);
    medium.enable_deexcitation();
    medium.initialise().unwrap();
    medium
}

#[test]
fn test_graph_covers_argon_excitations() {
    let mut medium = argon_methane();
    assert!(medium.deexcitation_enabled());
    assert!(medium.electron_null_collision_rate().unwrap() > 0.0);
    let states = medium.deexcitations().unwrap().to_vec();
    assert_eq!(states.len(), ArgonLevel::EXCITED.len() + 2);
    assert_eq!(states[0].label, "Ar_1S5");
    assert_eq!(states[states.len() - 1].label, "Ar_Excimer");

    let n = medium.number_of_levels().unwrap();
    let mut mapped = 0;
    for i in 0..n {
        let level = medium.level(i).unwrap().clone();
        if level.gas == 0 && level.kind == CollisionType::Excitation {
            let index = level.deexcitation.expect("argon excitation without de-excitation data");
            assert_eq!(states[index].level, Some(i));
            mapped += 1;
        } else {
            assert_eq!(level.deexcitation, None);
        }
    }
    assert_eq!(mapped, ArgonLevel::EXCITED.len());
}

#[test]
fn test_branching_ratios_are_normalised() {
    let mut medium = argon_methane();
    for state in medium.deexcitations().unwrap() {
        if state.channels.is_empty() {
            continue;
        }
        assert!(state.rate > 0.0, "{} has channels but no rate", state.label);
        let p: Vec<f64> = state.channels.iter().map(|c| c.probability).collect();
        assert!(p.windows(2).all(|w| w[1] >= w[0]), "{}", state.label);
        assert!((p[p.len() - 1] - 1.0).abs() < 1e-9, "{}", state.label);
    }
}

#[test]
fn test_cascades_terminate() {
    let mut medium = argon_methane();
    let n = medium.number_of_levels().unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let levels: Vec<usize> = (0..n)
        .filter(|&i| medium.level(i).unwrap().deexcitation.is_some())
        .collect();
    let mut penning = 0;
    for &level in &levels {
        for _ in 0..200 {
            let outcome = medium.compute_deexcitation(level, &mut rng).unwrap();
            let mut last_time = 0.0;
            for product in &outcome.cascade.products {
                assert!(product.energy > 0.0);
                assert!(product.time >= last_time);
                last_time = product.time;
            }
            if let Some(final_level) = outcome.final_level {
                assert!(levels.contains(&final_level));
            }
            penning += u64::from(outcome.cascade.penning_transfers);
        }
    }
    assert_eq!(medium.counters().penning_transfers(), penning);
}

#[test]
fn test_collisions_follow_cascades() {
    let mut medium = argon_methane();
    let mut rng = StdRng::seed_from_u64(5);
    let (mut photons, mut electrons) = (0, 0);
    for _ in 0..20000 {
        let c = medium.electron_collision(25.0, &Vector3::new(0.0, 0.0, 1.0), &mut rng).unwrap();
        for p in &c.products {
            match p.kind {
                ProductKind::Photon => photons += 1,
                ProductKind::Electron => electrons += 1,
            }
        }
    }
    assert!(photons > 0);
    // Quenching by methane above its ionisation potential
    assert!(electrons > 0);
    assert!(medium.counters().penning_transfers() > 0);
}

#[test]
fn test_compute_deexcitation_requires_graph() {
    let mut medium = common::medium(&[("Ar", 1.0)]);
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(medium.compute_deexcitation(2, &mut rng), Err(GasError::Configuration(_))));
    medium.enable_deexcitation();
    // Elastic level has no de-excitation data.
    assert!(matches!(medium.compute_deexcitation(0, &mut rng), Err(GasError::Configuration(_))));
    assert!(matches!(
        medium.compute_deexcitation(10_000, &mut rng),
        Err(GasError::LevelOutOfRange { .. })
    ));
    assert!(medium.compute_deexcitation(2, &mut rng).is_ok());
}

#[test]
fn test_penning_and_deexcitation_exclude_each_other() {
    let mut medium = common::medium(&[("Ar", 0.9), ("CH4", 0.1)]);
    medium.enable_deexcitation();
    medium.enable_penning_transfer(0.5, 0.0).unwrap();
    assert!(!medium.deexcitation_enabled());
    assert!(medium.penning_transfer_enabled());
    medium.enable_deexcitation();
    assert!(medium.deexcitation_enabled());
    assert!(!medium.penning_transfer_enabled());
}

#[test]
fn test_resonance_lines_add_absorption() {
    let mut medium = argon_methane();
    let line = medium
        .deexcitations()
        .unwrap()
        .iter()
        .find(|d| d.absorption_rate > 0.0)
        .cloned()
        .expect("no resonance line");
    assert!(line.width > 0.0 && line.doppler_width > 0.0 && line.pressure_width > 0.0);
    let with_lines = medium.photon_collision_rate(line.energy).unwrap();

    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let c = medium.photon_collision(line.energy, &mut rng).unwrap();
        if c.kind == PhotonCollisionType::Excitation {
            assert_eq!(c.n_secondaries, c.products.len());
        }
    }
    assert!(medium.counters().photon_collisions_of(PhotonCollisionType::Excitation) > 0);

    medium.set_radiation_trapping(false);
    let continuum = medium.photon_collision_rate(line.energy).unwrap();
    assert!(continuum < with_lines);
}

#[test]
fn test_photoionisation() {
    let mut medium = common::medium(&[("Ar", 0.9), ("CH4", 0.1)]);
    let mut rng = StdRng::seed_from_u64(8);
    assert!(medium.photon_collision_rate(17.0).unwrap() > 0.0);
    for _ in 0..2000 {
        let c = medium.photon_collision(17.0, &mut rng).unwrap();
        assert!((-1.0..=1.0).contains(&c.cos_theta));
        match c.kind {
            PhotonCollisionType::Ionisation => {
                let potential = if c.gas == 0 { common::AR_ION_POT } else { common::CH4_ION_POT };
                assert!((c.secondary_energy - (17.0 - potential)).abs() < 1e-9);
                assert_eq!(c.n_secondaries, 1);
            }
            PhotonCollisionType::Inelastic => assert_eq!(c.n_secondaries, 0),
            other => panic!("unexpected {}", other),
        }
    }
    let counters = medium.counters();
    assert_eq!(counters.photon_collisions(), 2000);
    assert!(counters.photon_collisions_of(PhotonCollisionType::Ionisation) > 0);
    assert!(counters.photon_collisions_of(PhotonCollisionType::Inelastic) > 0);
}

#[test]
fn test_missing_optical_data_disables_deexcitation() {
    let mut optics = TabulatedPhotoabsorption::new();
    optics
        .insert(OpticalTable {
            name: "Ar".to_string(),
            energies: vec![0.0, 100.0],
            cross_section: vec![3.5e-17, 3.5e-17],
            ionisation_yield: vec![1.0, 1.0],
        })
        .unwrap();
    let mut medium = GasMedium::with_settings(
        GasMixture::new(&[("Ar", 0.9), ("CH4", 0.1)]).unwrap(),
        common::settings(),
        Arc::new(common::cross_sections()),
        Arc::new(optics),
    );
    medium.enable_deexcitation();
    medium.initialise().unwrap();
    assert!(!medium.deexcitation_enabled());
    assert!(medium.deexcitations().unwrap().is_empty());
    assert!(matches!(medium.photon_collision_rate(10.0), Err(GasError::Data(_))));
    // Electron transport is unaffected.
    let mut rng = StdRng::seed_from_u64(2);
    assert!(medium.electron_collision(10.0, &Vector3::new(0.0, 0.0, 1.0), &mut rng).is_ok());
}

#[test]
fn test_line_widths_without_radiation_trapping() {
    let mut medium = common::medium(&[("Ar", 0.9), ("CH4", 0.1)]);
    medium.enable_deexcitation();
    medium.set_radiation_trapping(false);
    let line = medium
        .deexcitations()
        .unwrap()
        .iter()
        .find(|d| d.label == "Ar_1S4")
        .cloned()
        .expect("no 1S4 state");
    assert!(line.doppler_width > 0.0);
    assert!(line.pressure_width > 0.0);
    assert!(line.width > 0.0);
    let level = line.level.unwrap();

    let mut rng = StdRng::seed_from_u64(77);
    let mut energies = Vec::new();
    for _ in 0..500 {
        let outcome = medium.compute_deexcitation(level, &mut rng).unwrap();
        if outcome.final_level != Some(level) {
            continue;
        }
        if let Some(last) = outcome.cascade.products.last() {
            if last.kind == ProductKind::Photon {
                energies.push(last.energy);
            }
        }
    }
    assert!(energies.len() > 10);
    for &e in &energies {
        assert!((e - line.energy).abs() < line.width);
    }
    energies.sort_by(|a, b| a.partial_cmp(b).unwrap());
    energies.dedup();
    assert!(energies.len() > 1, "resonance photons emitted at a single energy");
}
