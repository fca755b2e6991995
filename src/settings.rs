use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model for sharing the energy between primary and secondary electron in an
/// ionising collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplittingFunction {
    #[default]
    OpalBeaty,
    GreenSawada,
    Flat,
}

/// Physics and table options of a gas medium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upper end of the electron tables [eV]
    pub max_electron_energy: f64,
    /// Upper end of the photon table [eV]
    pub max_photon_energy: f64,
    /// Bins of the linear electron grid
    pub energy_steps: usize,
    /// Bins of the logarithmic electron grid
    pub energy_steps_log: usize,
    /// Bins of the photon grid
    pub energy_steps_gamma: usize,
    /// Crossover between the linear and the logarithmic grid [eV]
    pub high_energy: f64,
    pub anisotropic: bool,
    /// Extend the electron tables when asked for an energy above their range
    pub auto_energy_limit: bool,
    pub splitting_function: SplittingFunction,
    pub deexcitation: bool,
    pub radiation_trapping: bool,
    /// Optional plain-text dump of the linear-grid cross-sections
    pub cross_section_output: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_electron_energy: 40.0,
            max_photon_energy: 20.0,
            energy_steps: 20000,
            energy_steps_log: 200,
            energy_steps_gamma: 5000,
            high_energy: 1.0e4,
            anisotropic: true,
            auto_energy_limit: true,
            splitting_function: SplittingFunction::OpalBeaty,
            deexcitation: false,
            radiation_trapping: true,
            cross_section_output: None,
        }
    }
}

impl Settings {
    /// Width of a linear-grid bin [eV].
    pub fn energy_step(&self) -> f64 {
        self.max_electron_energy.min(self.high_energy) / self.energy_steps as f64
    }

    /// Width of a photon-grid bin [eV].
    pub fn energy_step_gamma(&self) -> f64 {
        self.max_photon_energy / self.energy_steps_gamma as f64
    }
}
