// Interfaces to the external cross-section and photoabsorption data, plus
// tabulated implementations read from JSON.
use crate::error::{GasError, Result};
use crate::level::ScatteringModel;
use crate::mixture::GasComponent;
use crate::utilities::{interpolate_linear, interpolate_linear_or_zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Physical conditions handed to a cross-section provider with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProviderParameters {
    /// [K]
    pub temperature: f64,
    /// [Torr]
    pub pressure: f64,
    /// Request angular distribution parameters; isotropic terms otherwise.
    pub anisotropic: bool,
}

/// One cross-section term evaluated on a list of energies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionTerm {
    pub description: String,
    /// Energy loss [eV]; negative for superelastic terms
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub model: ScatteringModel,
    /// [cm2], one value per energy
    pub cross_section: Vec<f64>,
    /// Raw angular shape parameter, one value per energy (empty: isotropic)
    #[serde(default)]
    pub angular_parameter: Vec<f64>,
}

impl CrossSectionTerm {
    pub fn angular_parameter_at(&self, index: usize) -> f64 {
        self.angular_parameter.get(index).copied().unwrap_or(0.5)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IonisationTerm {
    /// Opal-Beaty-Peterson splitting parameter w [eV]
    pub opal_beaty: f64,
    #[serde(flatten)]
    pub term: CrossSectionTerm,
}

/// Everything a provider returns for one gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasCrossSections {
    /// Twice the electron to molecule mass ratio, 2 m_e / M
    pub mass_ratio: f64,
    pub elastic: CrossSectionTerm,
    #[serde(default)]
    pub ionisation: Vec<IonisationTerm>,
    #[serde(default)]
    pub attachment: Vec<CrossSectionTerm>,
    #[serde(default)]
    pub inelastic: Vec<CrossSectionTerm>,
}

impl GasCrossSections {
    /// Check that every term holds one value per energy.
    pub fn validate(&self, n_energies: usize) -> Result<()> {
        let terms = std::iter::once(&self.elastic)
            .chain(self.ionisation.iter().map(|i| &i.term))
            .chain(self.attachment.iter())
            .chain(self.inelastic.iter());
        for term in terms {
            if term.cross_section.len() != n_energies {
                return Err(GasError::Data(format!(
                    "term '{}' has {} values for {} energies",
                    term.description,
                    term.cross_section.len(),
                    n_energies
                )));
            }
            if !term.angular_parameter.is_empty() && term.angular_parameter.len() != n_energies {
                return Err(GasError::Data(format!(
                    "term '{}' has {} angular parameters for {} energies",
                    term.description,
                    term.angular_parameter.len(),
                    n_energies
                )));
            }
        }
        if !(self.mass_ratio > 0.0) {
            return Err(GasError::Data(format!("invalid mass ratio {}", self.mass_ratio)));
        }
        Ok(())
    }
}

/// Source of electron collision cross-sections.
pub trait CrossSectionProvider: Send + Sync {
    /// Evaluate all terms of `gas` at the given energies [eV].
    fn cross_sections(
        &self,
        gas: &GasComponent,
        energies: &[f64],
        parameters: &ProviderParameters,
    ) -> Result<GasCrossSections>;
}

/// Source of photoabsorption cross-sections.
pub trait PhotoabsorptionProvider: Send + Sync {
    fn is_available(&self, gas: &str) -> bool;

    /// Photoabsorption cross-section [cm2] and ionisation yield at `energy` [eV].
    fn photoabsorption(&self, gas: &str, energy: f64) -> Option<(f64, f64)>;
}

/// Cross-sections of one gas on its native energy grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabulatedGas {
    pub name: String,
    /// [eV], increasing
    pub energies: Vec<f64>,
    #[serde(flatten)]
    pub data: GasCrossSections,
}

impl TabulatedGas {
    fn evaluate_term(&self, term: &CrossSectionTerm, energies: &[f64], anisotropic: bool) -> CrossSectionTerm {
        let threshold = term.threshold.max(0.0);
        let cross_section = energies
            .iter()
            .map(|&e| {
                if e < threshold {
                    0.0
                } else {
                    interpolate_linear(&self.energies, &term.cross_section, e)
                }
            })
            .collect();
        let (model, angular_parameter) = if anisotropic && !term.angular_parameter.is_empty() {
            let values = energies
                .iter()
                .map(|&e| interpolate_linear(&self.energies, &term.angular_parameter, e))
                .collect();
            (term.model, values)
        } else {
            (ScatteringModel::Isotropic, Vec::new())
        };
        CrossSectionTerm {
            description: term.description.clone(),
            threshold: term.threshold,
            model,
            cross_section,
            angular_parameter,
        }
    }
}

/// Provider backed by per-gas tables, interpolated linearly in energy.
///
/// Outside the tabulated range each term keeps its nearest tabulated value;
/// below its threshold a term is zero.
#[derive(Debug, Clone, Default)]
pub struct TabulatedCrossSections {
    gases: HashMap<String, TabulatedGas>,
}

impl TabulatedCrossSections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, gas: TabulatedGas) -> Result<()> {
        if gas.energies.is_empty() || gas.energies.windows(2).any(|w| w[1] <= w[0]) {
            return Err(GasError::Data(format!(
                "energy grid of {} must be non-empty and increasing",
                gas.name
            )));
        }
        gas.data.validate(gas.energies.len())?;
        self.gases.insert(gas.name.clone(), gas);
        Ok(())
    }

    pub fn load_json_str(&mut self, json: &str) -> Result<()> {
        let gas: TabulatedGas = serde_json::from_str(json)?;
        self.insert(gas)
    }

    pub fn load_json_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.load_json_str(&text)
    }

    pub fn contains(&self, gas: &str) -> bool {
        self.gases.contains_key(gas)
    }
}

impl CrossSectionProvider for TabulatedCrossSections {
    fn cross_sections(
        &self,
        gas: &GasComponent,
        energies: &[f64],
        parameters: &ProviderParameters,
    ) -> Result<GasCrossSections> {
        let table = self
            .gases
            .get(&gas.name)
            .ok_or_else(|| GasError::Data(format!("no cross-section table for {}", gas.name)))?;
        let aniso = parameters.anisotropic;
        Ok(GasCrossSections {
            mass_ratio: table.data.mass_ratio,
            elastic: table.evaluate_term(&table.data.elastic, energies, aniso),
            ionisation: table
                .data
                .ionisation
                .iter()
                .map(|i| IonisationTerm {
                    opal_beaty: i.opal_beaty,
                    term: table.evaluate_term(&i.term, energies, aniso),
                })
                .collect(),
            attachment: table
                .data
                .attachment
                .iter()
                .map(|t| table.evaluate_term(t, energies, aniso))
                .collect(),
            inelastic: table
                .data
                .inelastic
                .iter()
                .map(|t| table.evaluate_term(t, energies, aniso))
                .collect(),
        })
    }
}

/// Photoabsorption data of one gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalTable {
    pub name: String,
    /// [eV], increasing
    pub energies: Vec<f64>,
    /// [cm2]
    pub cross_section: Vec<f64>,
    pub ionisation_yield: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct TabulatedPhotoabsorption {
    gases: HashMap<String, OpticalTable>,
}

impl TabulatedPhotoabsorption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: OpticalTable) -> Result<()> {
        let n = table.energies.len();
        if n == 0 || table.cross_section.len() != n || table.ionisation_yield.len() != n {
            return Err(GasError::Data(format!(
                "optical table of {} has inconsistent lengths",
                table.name
            )));
        }
        self.gases.insert(table.name.clone(), table);
        Ok(())
    }

    /// Load a JSON array of optical tables.
    pub fn load_json_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        let tables: Vec<OpticalTable> = serde_json::from_str(&text)?;
        for table in tables {
            self.insert(table)?;
        }
        Ok(())
    }
}

impl PhotoabsorptionProvider for TabulatedPhotoabsorption {
    fn is_available(&self, gas: &str) -> bool {
        self.gases.contains_key(gas)
    }

    fn photoabsorption(&self, gas: &str, energy: f64) -> Option<(f64, f64)> {
        let table = self.gases.get(gas)?;
        let cs = interpolate_linear_or_zero(&table.energies, &table.cross_section, energy).max(0.0);
        let eta = interpolate_linear(&table.energies, &table.ionisation_yield, energy).clamp(0.0, 1.0);
        Some((cs, eta))
    }
}
