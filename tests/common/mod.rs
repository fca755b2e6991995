// Synthetic argon and methane data shared by the integration tests
#![allow(dead_code)]

use gasmc::{
    ArgonLevel, CrossSectionTerm, GasCrossSections, GasMedium, GasMixture, IonisationTerm,
    OpticalTable, ScatteringModel, Settings, TabulatedCrossSections, TabulatedGas,
    TabulatedPhotoabsorption,
};
use rand::RngCore;
use std::sync::Arc;

pub const GRID: [f64; 22] = [
    0.0, 0.5, 1.0, 2.0, 5.0, 8.0, 9.0, 10.0, 11.0, 11.5, 12.0, 12.5, 13.0, 14.0, 15.0, 16.0, 18.0,
    20.0, 50.0, 100.0, 1.0e3, 1.0e6,
];

pub const AR_ION_POT: f64 = 15.76;
pub const CH4_ION_POT: f64 = 12.65;
pub const R_AR: f64 = 1.0 + 1.3731e-5;

pub fn term(description: &str, threshold: f64, value: f64) -> CrossSectionTerm {
    CrossSectionTerm {
        description: description.to_string(),
        threshold,
        model: ScatteringModel::Isotropic,
        cross_section: GRID
            .iter()
            .map(|&e| if e < threshold.max(0.0) { 0.0 } else { value })
            .collect(),
        angular_parameter: Vec::new(),
    }
}

/// Threshold of the k-th argon excitation in `ArgonLevel::EXCITED` order.
pub fn argon_threshold(k: usize) -> f64 {
    11.55 + 0.08 * k as f64
}

pub fn argon() -> TabulatedGas {
    let inelastic = ArgonLevel::EXCITED
        .iter()
        .enumerate()
        .map(|(k, level)| term(&format!(" EXC {}", level.magboltz_code()), argon_threshold(k), 2.0e-18))
        .collect();
    let mut elastic = term("ELASTIC", 0.0, 1.0e-16);
    elastic.model = ScatteringModel::Parametrised;
    elastic.angular_parameter = vec![0.3; GRID.len()];
    TabulatedGas {
        name: "Ar".to_string(),
        energies: GRID.to_vec(),
        data: GasCrossSections {
            mass_ratio: 2.0 * 1.3731e-5,
            elastic,
            ionisation: vec![IonisationTerm { opal_beaty: 10.0, term: term("ION", AR_ION_POT, 3.0e-17) }],
            attachment: Vec::new(),
            inelastic,
        },
    }
}

pub fn methane() -> TabulatedGas {
    TabulatedGas {
        name: "CH4".to_string(),
        energies: GRID.to_vec(),
        data: GasCrossSections {
            mass_ratio: 2.0 * 3.4197e-5,
            elastic: term("ELASTIC", 0.0, 2.0e-16),
            ionisation: vec![IonisationTerm { opal_beaty: 7.3, term: term("ION", CH4_ION_POT, 4.0e-17) }],
            attachment: vec![term("ATTACHMENT", 8.0, 1.0e-19)],
            inelastic: vec![term(" VIB V24", 0.162, 5.0e-17), term(" EXC DISS", 9.0, 1.0e-17)],
        },
    }
}

pub fn cross_sections() -> TabulatedCrossSections {
    let mut provider = TabulatedCrossSections::new();
    provider.insert(argon()).unwrap();
    provider.insert(methane()).unwrap();
    provider
}

pub fn optics() -> TabulatedPhotoabsorption {
    let energies = vec![0.0, 8.9, 9.0, 12.6, 12.7, 15.7, 15.8, 100.0];
    let mut optics = TabulatedPhotoabsorption::new();
    optics
        .insert(OpticalTable {
            name: "Ar".to_string(),
            energies: energies.clone(),
            cross_section: vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.5e-17, 3.5e-17],
            ionisation_yield: vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0],
        })
        .unwrap();
    optics
        .insert(OpticalTable {
            name: "CH4".to_string(),
            energies,
            cross_section: vec![0.0, 0.0, 1.5e-17, 1.5e-17, 2.5e-17, 2.5e-17, 2.5e-17, 2.5e-17],
            ionisation_yield: vec![0.0, 0.0, 0.0, 0.0, 0.6, 0.6, 0.6, 0.6],
        })
        .unwrap();
    optics
}

/// Coarse tables to keep the rebuilds fast.
pub fn settings() -> Settings {
    Settings {
        energy_steps: 2000,
        energy_steps_log: 50,
        energy_steps_gamma: 500,
        ..Settings::default()
    }
}

pub fn medium(components: &[(&str, f64)]) -> GasMedium {
    GasMedium::with_settings(
        GasMixture::new(components).unwrap(),
        settings(),
        Arc::new(cross_sections()),
        Arc::new(optics()),
    )
}

/// Generator whose uniform draws are all exactly 0.5.
pub struct HalfRng;

impl RngCore for HalfRng {
    fn next_u32(&mut self) -> u32 {
        1 << 31
    }

    fn next_u64(&mut self) -> u64 {
        1 << 63
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
