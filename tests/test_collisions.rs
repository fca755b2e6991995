// Electron collision sampling through a gas medium
mod common;

use approx::assert_relative_eq;
use common::HalfRng;
use gasmc::{
    CollisionType, CrossSectionProvider, CrossSectionTerm, GasComponent, GasCrossSections,
    GasMedium, GasMixture, IonisationTerm, ProductKind, ProviderParameters,
    ScatteringModel, SecondaryKind, SplittingFunction,
};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Argon whose only process is ionisation.
struct IonisationOnly;

impl CrossSectionProvider for IonisationOnly {
    fn cross_sections(
        &self,
        _gas: &GasComponent,
        energies: &[f64],
        _parameters: &ProviderParameters,
    ) -> gasmc::Result<GasCrossSections> {
        let term = |description: &str, threshold: f64, value: f64| CrossSectionTerm {
            description: description.to_string(),
            threshold,
            model: ScatteringModel::Isotropic,
            cross_section: energies
                .iter()
                .map(|&e| if e >= threshold { value } else { 0.0 })
                .collect(),
            angular_parameter: Vec::new(),
        };
        Ok(GasCrossSections {
            mass_ratio: 2.0 * 1.3731e-5,
            elastic: term("ELASTIC", 0.0, 0.0),
            ionisation: vec![IonisationTerm { opal_beaty: 10.0, term: term("ION", common::AR_ION_POT, 1.0e-16) }],
            attachment: Vec::new(),
            inelastic: Vec::new(),
        })
    }
}

fn mass_factor(gas: usize) -> f64 {
    if gas == 0 {
        common::R_AR
    } else {
        1.0 + 3.4197e-5
    }
}

#[test]
fn test_opal_beaty_secondary_energy_at_half() {
    let mut medium = GasMedium::with_settings(
        GasMixture::new(&[("Ar", 1.0)]).unwrap(),
        common::settings(),
        Arc::new(IonisationOnly),
        Arc::new(common::optics()),
    );
    let collision = medium
        .electron_collision(30.0, &Vector3::new(0.0, 0.0, 1.0), &mut HalfRng)
        .unwrap();
    assert_eq!(collision.kind, CollisionType::Ionisation);
    let loss = common::AR_ION_POT / common::R_AR;
    let w = 10.0;
    let expected = w * (0.5 * (0.5 * (30.0 - loss) / w).atan()).tan();
    assert_eq!(collision.secondaries.len(), 2);
    assert_eq!(collision.secondaries[0].kind, SecondaryKind::Electron);
    assert_relative_eq!(collision.secondaries[0].energy, expected, max_relative = 1e-12);
    assert_eq!(collision.secondaries[1].kind, SecondaryKind::Ion);
}

#[test]
fn test_flat_splitting_at_half() {
    let mut medium = GasMedium::with_settings(
        GasMixture::new(&[("Ar", 1.0)]).unwrap(),
        common::settings(),
        Arc::new(IonisationOnly),
        Arc::new(common::optics()),
    );
    medium.set_splitting_function(SplittingFunction::Flat);
    let collision = medium
        .electron_collision(30.0, &Vector3::new(1.0, 0.0, 0.0), &mut HalfRng)
        .unwrap();
    let loss = common::AR_ION_POT / common::R_AR;
    assert_relative_eq!(collision.secondaries[0].energy, 0.5 * (30.0 - loss), max_relative = 1e-12);
}

#[test]
fn test_energy_after_collision_is_bounded() {
    let mut medium = common::medium(&[("Ar", 0.9), ("CH4", 0.1)]);
    let mut rng = StdRng::seed_from_u64(7);
    let mut direction = Vector3::new(0.0, 0.0, 1.0);
    for i in 0..20000 {
        let energy = 0.1 + 38.0 * ((i * 7919) % 1000) as f64 / 1000.0;
        let c = medium.electron_collision(energy, &direction, &mut rng).unwrap();
        assert!(c.energy > 0.0 && c.energy <= energy, "{} eV -> {} eV ({})", energy, c.energy, c.kind);
        assert!((c.direction.norm() - 1.0).abs() < 1e-9);
        for s in &c.secondaries {
            assert!(s.energy >= 0.0 && s.energy <= energy);
        }
        direction = c.direction;
    }
    let counters = medium.counters();
    assert_eq!(counters.electron_collisions(), 20000);
    assert_eq!(counters.level_collisions().iter().sum::<u64>(), 20000);
    assert!(counters.electron_collisions_of(CollisionType::Elastic) > 0);
    assert!(counters.electron_collisions_of(CollisionType::Ionisation) > 0);
    assert!(counters.electron_collisions_of(CollisionType::Excitation) > 0);

    medium.reset_collision_counters();
    assert_eq!(medium.counters().electron_collisions(), 0);
}

#[test]
fn test_same_seed_same_history() {
    let run = |seed: u64| {
        let mut medium = common::medium(&[("Ar", 0.9), ("CH4", 0.1)]);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut energy = 35.0;
        let mut direction = Vector3::new(0.0, 1.0, 0.0);
        let mut history = Vec::new();
        for _ in 0..2000 {
            let c = medium.electron_collision(energy, &direction, &mut rng).unwrap();
            history.push((c.level, c.energy, c.direction));
            energy = if c.energy > 1.0 { c.energy } else { 35.0 };
            direction = c.direction;
        }
        history
    };
    assert_eq!(run(2024), run(2024));
    assert_ne!(run(2024), run(2025));
}

#[test]
fn test_penning_transfer_above_ionisation_potential() {
    let mut medium = common::medium(&[("Ar", 0.9), ("CH4", 0.1)]);
    medium.enable_penning_transfer(1.0, 0.0).unwrap();
    let min_ion_pot = medium.min_ionisation_potential().unwrap();
    assert_eq!(min_ion_pot, common::CH4_ION_POT);

    let mut rng = StdRng::seed_from_u64(13);
    let direction = Vector3::new(0.0, 0.0, 1.0);
    let (mut above, mut below, mut transfers) = (0, 0, 0);
    for _ in 0..20000 {
        let c = medium.electron_collision(20.0, &direction, &mut rng).unwrap();
        transfers += u64::from(c.penning_transfers);
        if c.kind != CollisionType::Excitation {
            assert!(c.products.is_empty());
            continue;
        }
        let level = medium.level(c.level).unwrap().clone();
        let threshold = level.energy_loss * mass_factor(level.gas);
        if threshold > min_ion_pot {
            above += 1;
            assert_eq!(c.products.len(), 1);
            assert_eq!(c.products[0].kind, ProductKind::Electron);
            assert!((c.products[0].energy - (threshold - min_ion_pot)).abs() < 1e-9);
            assert_eq!(c.products[0].distance, 0.0);
        } else {
            below += 1;
            assert!(c.products.is_empty());
        }
    }
    assert!(above > 0 && below > 0);
    assert_eq!(medium.counters().penning_transfers(), transfers);
    assert_eq!(transfers, above);
}

#[test]
fn test_penning_transfer_per_gas() {
    let mut medium = common::medium(&[("Ar", 0.9), ("CH4", 0.1)]);
    medium.enable_penning_transfer(0.0, 0.0).unwrap();
    medium.enable_penning_transfer_for_gas(1.0, 0.01, "Ar").unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    let mut seen = 0;
    for _ in 0..20000 {
        let c = medium.electron_collision(20.0, &Vector3::new(1.0, 0.0, 0.0), &mut rng).unwrap();
        for p in &c.products {
            assert!(p.distance > 0.0 && p.distance <= 0.01);
            seen += 1;
        }
    }
    assert!(seen > 0);

    medium.disable_penning_transfer();
    assert!(!medium.penning_transfer_enabled());
    for _ in 0..2000 {
        let c = medium.electron_collision(20.0, &Vector3::new(1.0, 0.0, 0.0), &mut rng).unwrap();
        assert!(c.products.is_empty());
    }
}
