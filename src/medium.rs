// A gas medium: configuration, lazily rebuilt collision tables and the
// electron and photon collision entry points.
use crate::constants::SMALL;
use crate::deexcitation::{Cascade, Deexcitation, DeexcitationGraph, DeexcitationProduct, GraphContext};
use crate::error::{GasError, Result};
use crate::level::{CollisionLevel, CollisionType};
use crate::mixer::{self, MixedTables};
use crate::mixture::GasMixture;
use crate::photon::{PhotonAbsorption, PhotonCollisionType, PhotonRateTable};
use crate::provider::{CrossSectionProvider, PhotoabsorptionProvider};
use crate::random::uniform;
use crate::sampler::{CollisionSampler, ElectronCollision};
use crate::settings::{Settings, SplittingFunction};
use log::{info, warn};
use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Headroom applied when a query extends the energy range.
const RANGE_HEADROOM: f64 = 1.05;

/// Probability and mean displacement [cm] of a simplified Penning transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PenningTransfer {
    pub probability: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PenningSettings {
    enabled: bool,
    global: PenningTransfer,
    per_gas: HashMap<String, PenningTransfer>,
}

impl PenningSettings {
    fn for_gas(&self, gas: &str) -> PenningTransfer {
        if !self.enabled {
            return PenningTransfer::default();
        }
        match self.per_gas.get(gas) {
            Some(p) if p.probability > SMALL => *p,
            _ => self.global,
        }
    }

    fn apply(&self, tables: &mut MixedTables) {
        for level in tables.levels.iter_mut() {
            let p = self.for_gas(&tables.gases[level.gas].name);
            level.penning_probability = p.probability;
            level.penning_distance = p.distance;
        }
    }
}

/// Collision counts since the last table build or reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionCounters {
    electron: [u64; 6],
    levels: Vec<u64>,
    penning: u64,
    photon: [u64; 4],
}

impl CollisionCounters {
    fn reset(&mut self, n_levels: usize) {
        self.electron = [0; 6];
        self.levels = vec![0; n_levels];
        self.penning = 0;
        self.photon = [0; 4];
    }

    pub fn electron_collisions(&self) -> u64 {
        self.electron.iter().sum()
    }

    pub fn electron_collisions_of(&self, kind: CollisionType) -> u64 {
        self.electron[kind.index()]
    }

    /// Collisions per level, in level order.
    pub fn level_collisions(&self) -> &[u64] {
        &self.levels
    }

    pub fn penning_transfers(&self) -> u64 {
        self.penning
    }

    pub fn photon_collisions(&self) -> u64 {
        self.photon.iter().sum()
    }

    pub fn photon_collisions_of(&self, kind: PhotonCollisionType) -> u64 {
        self.photon[kind.index()]
    }
}

/// Outcome of one photon absorption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonCollision {
    pub kind: PhotonCollisionType,
    /// Absorbing gas, by mixture index
    pub gas: usize,
    /// Photoelectron energy for ionising absorption [eV]
    pub secondary_energy: f64,
    pub n_secondaries: usize,
    pub cos_theta: f64,
    /// Products of the cascade started by line absorption
    pub products: Vec<DeexcitationProduct>,
}

/// Cascade started at a collision level, with the level it ended in.
#[derive(Debug, Clone, PartialEq)]
pub struct DeexcitationOutcome {
    pub cascade: Cascade,
    /// Collision level of the final state, if it has one
    pub final_level: Option<usize>,
}

pub struct GasMedium {
    settings: Settings,
    mixture: GasMixture,
    cross_sections: Arc<dyn CrossSectionProvider>,
    optics: Arc<dyn PhotoabsorptionProvider>,
    penning: PenningSettings,
    excitation_scaling: HashMap<String, f64>,
    changed: bool,
    tables: Option<MixedTables>,
    graph: Option<DeexcitationGraph>,
    photons: Option<PhotonRateTable>,
    counters: CollisionCounters,
}

impl GasMedium {
    pub fn new(
        mixture: GasMixture,
        cross_sections: Arc<dyn CrossSectionProvider>,
        optics: Arc<dyn PhotoabsorptionProvider>,
    ) -> Self {
        Self::with_settings(mixture, Settings::default(), cross_sections, optics)
    }

    pub fn with_settings(
        mixture: GasMixture,
        settings: Settings,
        cross_sections: Arc<dyn CrossSectionProvider>,
        optics: Arc<dyn PhotoabsorptionProvider>,
    ) -> Self {
        GasMedium {
            settings,
            mixture,
            cross_sections,
            optics,
            penning: PenningSettings::default(),
            excitation_scaling: HashMap::new(),
            changed: true,
            tables: None,
            graph: None,
            photons: None,
            counters: CollisionCounters::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mixture(&self) -> &GasMixture {
        &self.mixture
    }

    pub fn counters(&self) -> &CollisionCounters {
        &self.counters
    }

    pub fn reset_collision_counters(&mut self) {
        let n = self.tables.as_ref().map_or(0, |t| t.levels.len());
        self.counters.reset(n);
    }

    // Configuration

    pub fn set_composition(&mut self, components: &[(&str, f64)]) -> Result<()> {
        self.mixture.set_composition(components)?;
        self.changed = true;
        Ok(())
    }

    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        self.mixture.set_temperature(temperature)?;
        self.changed = true;
        Ok(())
    }

    pub fn set_pressure(&mut self, pressure: f64) -> Result<()> {
        self.mixture.set_pressure(pressure)?;
        self.changed = true;
        Ok(())
    }

    pub fn set_max_electron_energy(&mut self, energy: f64) -> Result<()> {
        if !(energy > SMALL) {
            return Err(GasError::Configuration(format!(
                "maximum electron energy must be positive (got {} eV)",
                energy
            )));
        }
        self.settings.max_electron_energy = energy;
        self.changed = true;
        Ok(())
    }

    pub fn set_max_photon_energy(&mut self, energy: f64) -> Result<()> {
        if !(energy > SMALL) {
            return Err(GasError::Configuration(format!(
                "maximum photon energy must be positive (got {} eV)",
                energy
            )));
        }
        self.settings.max_photon_energy = energy;
        self.changed = true;
        Ok(())
    }

    pub fn set_auto_energy_limit(&mut self, on: bool) {
        self.settings.auto_energy_limit = on;
    }

    pub fn set_anisotropic_scattering(&mut self, on: bool) {
        if self.settings.anisotropic != on {
            self.settings.anisotropic = on;
            self.changed = true;
        }
    }

    pub fn set_splitting_function(&mut self, splitting: SplittingFunction) {
        self.settings.splitting_function = splitting;
        if let (SplittingFunction::GreenSawada, Some(tables)) = (splitting, &self.tables) {
            warn_missing_green_sawada(tables);
        }
    }

    /// Follow de-excitation cascades of excited states. Switches off the
    /// simplified Penning transfer.
    pub fn enable_deexcitation(&mut self) {
        if self.penning.enabled {
            info!("Penning transfer switched off");
            self.penning.enabled = false;
            if let Some(tables) = self.tables.as_mut() {
                self.penning.apply(tables);
            }
        }
        if !self.settings.deexcitation {
            self.settings.deexcitation = true;
            self.changed = true;
        }
    }

    pub fn disable_deexcitation(&mut self) {
        if self.settings.deexcitation {
            self.settings.deexcitation = false;
            self.changed = true;
        }
    }

    /// Include resonance-line absorption in photon collisions. Line widths
    /// are computed with the graph either way.
    pub fn set_radiation_trapping(&mut self, on: bool) {
        self.settings.radiation_trapping = on;
    }

    /// Simplified Penning transfer for all gases: an excitation above the
    /// lowest ionisation potential of the mixture produces an electron with
    /// probability `r`, displaced by up to `lambda` [cm]. Switches off
    /// de-excitation.
    pub fn enable_penning_transfer(&mut self, r: f64, lambda: f64) -> Result<()> {
        check_probability(r)?;
        self.penning.global = PenningTransfer { probability: r, distance: lambda.max(0.0) };
        self.switch_on_penning();
        Ok(())
    }

    /// Simplified Penning transfer for excitations of one gas; overrides the
    /// global probability for that gas.
    pub fn enable_penning_transfer_for_gas(&mut self, r: f64, lambda: f64, gas: &str) -> Result<()> {
        check_probability(r)?;
        if self.mixture.index_of(gas).is_none() {
            return Err(GasError::UnknownGas(gas.to_string()));
        }
        self.penning
            .per_gas
            .insert(gas.to_string(), PenningTransfer { probability: r, distance: lambda.max(0.0) });
        self.switch_on_penning();
        Ok(())
    }

    pub fn disable_penning_transfer(&mut self) {
        self.penning = PenningSettings::default();
        if let Some(tables) = self.tables.as_mut() {
            self.penning.apply(tables);
        }
    }

    pub fn disable_penning_transfer_for_gas(&mut self, gas: &str) -> Result<()> {
        if self.mixture.index_of(gas).is_none() {
            return Err(GasError::UnknownGas(gas.to_string()));
        }
        self.penning.per_gas.remove(gas);
        if let Some(tables) = self.tables.as_mut() {
            self.penning.apply(tables);
        }
        Ok(())
    }

    fn switch_on_penning(&mut self) {
        if self.settings.deexcitation {
            info!("De-excitation handling switched off");
            self.settings.deexcitation = false;
            self.changed = true;
        }
        self.penning.enabled = true;
        if let Some(tables) = self.tables.as_mut() {
            self.penning.apply(tables);
        }
    }

    /// Scale the inelastic cross-sections of `gas` by `r`.
    pub fn set_excitation_scaling_factor(&mut self, r: f64, gas: &str) -> Result<()> {
        if !(r > 0.0) {
            return Err(GasError::Configuration(format!("scaling factor must be positive (got {})", r)));
        }
        if self.mixture.index_of(gas).is_none() {
            return Err(GasError::UnknownGas(gas.to_string()));
        }
        self.excitation_scaling.insert(gas.to_string(), r);
        self.changed = true;
        Ok(())
    }

    /// Write the cross-sections of every level to `path` at each rebuild.
    pub fn enable_cross_section_output(&mut self, path: impl Into<PathBuf>) {
        self.settings.cross_section_output = Some(path.into());
        self.changed = true;
    }

    pub fn disable_cross_section_output(&mut self) {
        self.settings.cross_section_output = None;
    }

    // Tables

    /// Rebuild the tables if the configuration changed since the last
    /// build. On failure the previous tables are kept.
    pub fn initialise(&mut self) -> Result<()> {
        if !self.changed && self.tables.is_some() {
            return Ok(());
        }
        self.rebuild()?;
        self.changed = false;
        Ok(())
    }

    fn rebuild(&mut self) -> Result<()> {
        let scaling: Vec<f64> = self
            .mixture
            .components()
            .iter()
            .map(|c| self.excitation_scaling.get(&c.name).copied().unwrap_or(1.0))
            .collect();
        let mut tables = mixer::build(&self.mixture, &self.settings, self.cross_sections.as_ref(), &scaling)?;
        let density = self.mixture.number_density();
        let temperature = self.mixture.temperature();

        let mut graph = None;
        if self.settings.deexcitation {
            let ctx = GraphContext {
                gases: &tables.gases,
                number_density: density,
                temperature,
                optics: self.optics.as_ref(),
            };
            match DeexcitationGraph::build(&tables.levels, &ctx) {
                Ok(g) => graph = Some(g),
                Err(err @ (GasError::Consistency(_) | GasError::UnknownLevel { .. })) => {
                    warn!("{}; de-excitation handling switched off", err);
                }
                Err(err) => return Err(err),
            }
        }

        let photons = match PhotonRateTable::build(
            &tables.gases,
            density,
            self.settings.max_photon_energy,
            self.settings.energy_steps_gamma,
            self.optics.as_ref(),
        ) {
            Ok(table) => Some(table),
            Err(GasError::Data(msg)) => {
                warn!("Photon collision rates not available: {}", msg);
                if graph.take().is_some() {
                    warn!("De-excitation handling switched off");
                }
                None
            }
            Err(err) => return Err(err),
        };

        if let Some(graph) = graph.as_mut() {
            graph.compute_line_parameters(&tables.gases, density, temperature);
            for (i, level) in tables.levels.iter_mut().enumerate() {
                level.deexcitation = graph.index_of_level(i);
            }
        }
        self.penning.apply(&mut tables);
        if self.settings.splitting_function == SplittingFunction::GreenSawada {
            warn_missing_green_sawada(&tables);
        }

        if self.settings.deexcitation && graph.is_none() {
            self.settings.deexcitation = false;
        }
        self.counters.reset(tables.levels.len());
        self.tables = Some(tables);
        self.graph = graph;
        self.photons = photons;
        Ok(())
    }

    fn built(&mut self) -> Result<&MixedTables> {
        self.initialise()?;
        self.tables
            .as_ref()
            .ok_or_else(|| GasError::Configuration("collision tables not built".into()))
    }

    fn check_electron_energy(&mut self, energy: f64) -> Result<()> {
        if !(energy > 0.0) {
            return Err(GasError::InvalidEnergy(energy));
        }
        if energy > self.settings.max_electron_energy {
            if self.settings.auto_energy_limit {
                info!(
                    "Energy {} eV above the table range, increasing the range to {} eV",
                    energy,
                    RANGE_HEADROOM * energy
                );
                self.set_max_electron_energy(RANGE_HEADROOM * energy)?;
            } else {
                warn!(
                    "Energy {} eV above the table range ({} eV)",
                    energy, self.settings.max_electron_energy
                );
            }
        }
        Ok(())
    }

    fn check_photon_energy(&mut self, energy: f64) -> Result<()> {
        if !(energy > 0.0) {
            return Err(GasError::InvalidEnergy(energy));
        }
        if energy > self.settings.max_photon_energy {
            if self.settings.auto_energy_limit {
                info!(
                    "Photon energy {} eV above the table range, increasing the range to {} eV",
                    energy,
                    RANGE_HEADROOM * energy
                );
                self.set_max_photon_energy(RANGE_HEADROOM * energy)?;
            } else {
                warn!(
                    "Photon energy {} eV above the table range ({} eV)",
                    energy, self.settings.max_photon_energy
                );
            }
        }
        Ok(())
    }

    pub fn number_of_levels(&mut self) -> Result<usize> {
        Ok(self.built()?.levels.len())
    }

    pub fn level(&mut self, index: usize) -> Result<&CollisionLevel> {
        let levels = &self.built()?.levels;
        levels
            .get(index)
            .ok_or(GasError::LevelOutOfRange { index, count: levels.len() })
    }

    /// Lowest ionisation potential in the mixture [eV].
    pub fn min_ionisation_potential(&mut self) -> Result<f64> {
        Ok(self.built()?.min_ion_pot)
    }

    /// States of the de-excitation graph; empty unless de-excitation is on.
    pub fn deexcitations(&mut self) -> Result<&[Deexcitation]> {
        self.initialise()?;
        Ok(self.graph.as_ref().map(|g| g.entries()).unwrap_or(&[]))
    }

    /// De-excitation is requested and the graph could be built.
    pub fn deexcitation_enabled(&self) -> bool {
        self.settings.deexcitation
    }

    pub fn penning_transfer_enabled(&self) -> bool {
        self.penning.enabled
    }

    // Electrons

    /// Largest total collision rate in the table [ns-1].
    pub fn electron_null_collision_rate(&mut self) -> Result<f64> {
        Ok(self.built()?.rates.null_rate())
    }

    /// Total collision rate [ns-1] at `energy` [eV].
    pub fn electron_collision_rate(&mut self, energy: f64) -> Result<f64> {
        self.check_electron_energy(energy)?;
        Ok(self.built()?.rates.total_rate(energy))
    }

    /// Collision rate [ns-1] of one level at `energy` [eV].
    pub fn electron_collision_rate_for_level(&mut self, energy: f64, level: usize) -> Result<f64> {
        self.check_electron_energy(energy)?;
        let tables = self.built()?;
        let count = tables.levels.len();
        if level >= count {
            return Err(GasError::LevelOutOfRange { index: level, count });
        }
        Ok(tables.rates.level_rate(energy, level))
    }

    /// Sample a collision of an electron with `energy` [eV] moving along the
    /// unit vector `direction`.
    pub fn electron_collision<R: Rng + ?Sized>(
        &mut self,
        energy: f64,
        direction: &Vector3<f64>,
        rng: &mut R,
    ) -> Result<ElectronCollision> {
        self.check_electron_energy(energy)?;
        self.initialise()?;
        let Some(tables) = self.tables.as_ref() else {
            return Err(GasError::Configuration("collision tables not built".into()));
        };
        let sampler = CollisionSampler {
            tables,
            graph: self.graph.as_ref(),
            splitting: self.settings.splitting_function,
            anisotropic: self.settings.anisotropic,
        };
        let collision = sampler.sample(energy, direction, rng);
        self.counters.electron[collision.kind.index()] += 1;
        if let Some(n) = self.counters.levels.get_mut(collision.level) {
            *n += 1;
        }
        self.counters.penning += u64::from(collision.penning_transfers);
        Ok(collision)
    }

    /// Run the de-excitation cascade of an excitation level.
    pub fn compute_deexcitation<R: Rng + ?Sized>(&mut self, level: usize, rng: &mut R) -> Result<DeexcitationOutcome> {
        self.initialise()?;
        let (Some(tables), Some(graph)) = (self.tables.as_ref(), self.graph.as_ref()) else {
            return Err(GasError::Configuration("de-excitation is not enabled".into()));
        };
        let Some(entry) = tables.levels.get(level) else {
            return Err(GasError::LevelOutOfRange { index: level, count: tables.levels.len() });
        };
        let Some(start) = entry.deexcitation else {
            return Err(GasError::Configuration(format!(
                "level {} ({}) has no de-excitation data",
                level,
                entry.description.trim()
            )));
        };
        let cascade = graph.cascade(start, tables.min_ion_pot, rng);
        self.counters.penning += u64::from(cascade.penning_transfers);
        let final_level = cascade.final_state.and_then(|i| graph.get(i)).and_then(|d| d.level);
        Ok(DeexcitationOutcome { cascade, final_level })
    }

    // Photons

    /// Total absorption rate [ns-1] of a photon with `energy` [eV].
    pub fn photon_collision_rate(&mut self, energy: f64) -> Result<f64> {
        self.check_photon_energy(energy)?;
        self.initialise()?;
        let table = self
            .photons
            .as_ref()
            .ok_or_else(|| GasError::Data("photon collision rates not available".into()))?;
        Ok(table.rate(energy, absorption_lines(&self.settings, self.graph.as_ref())))
    }

    /// Sample the absorption of a photon with `energy` [eV].
    pub fn photon_collision<R: Rng + ?Sized>(&mut self, energy: f64, rng: &mut R) -> Result<PhotonCollision> {
        self.check_photon_energy(energy)?;
        self.initialise()?;
        let (Some(table), Some(tables)) = (self.photons.as_ref(), self.tables.as_ref()) else {
            return Err(GasError::Data("photon collision rates not available".into()));
        };
        let lines = absorption_lines(&self.settings, self.graph.as_ref());
        match table.sample(energy, lines, rng) {
            PhotonAbsorption::Line(index) => {
                let graph = lines.ok_or_else(|| GasError::Consistency("line absorption without lines".into()))?;
                let cascade = graph.cascade(index, tables.min_ion_pot, rng);
                self.counters.photon[PhotonCollisionType::Excitation.index()] += 1;
                self.counters.penning += u64::from(cascade.penning_transfers);
                let gas = graph.get(index).map_or(0, |d| d.gas);
                Ok(PhotonCollision {
                    kind: PhotonCollisionType::Excitation,
                    gas,
                    secondary_energy: 0.0,
                    n_secondaries: cascade.products.len(),
                    cos_theta: 0.0,
                    products: cascade.products,
                })
            }
            PhotonAbsorption::Continuum(term) => {
                let term = table.terms()[term];
                self.counters.photon[term.kind.index()] += 1;
                let (secondary_energy, n_secondaries) = if term.kind == PhotonCollisionType::Ionisation {
                    let potential = tables.gases[term.gas].ionisation_potential;
                    ((energy - potential).max(SMALL), 1)
                } else {
                    (0.0, 0)
                };
                Ok(PhotonCollision {
                    kind: term.kind,
                    gas: term.gas,
                    secondary_energy,
                    n_secondaries,
                    cos_theta: 2.0 * uniform(rng) - 1.0,
                    products: Vec::new(),
                })
            }
        }
    }
}

/// Graph whose resonance lines take part in photon absorption.
fn absorption_lines<'a>(settings: &Settings, graph: Option<&'a DeexcitationGraph>) -> Option<&'a DeexcitationGraph> {
    if settings.radiation_trapping {
        graph.filter(|g| !g.is_empty())
    } else {
        None
    }
}

fn check_probability(r: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&r) {
        return Err(GasError::Configuration(format!(
            "transfer probability must be in [0, 1] (got {})",
            r
        )));
    }
    Ok(())
}

fn warn_missing_green_sawada(tables: &MixedTables) {
    for gas in tables.gases.iter().filter(|g| g.green_sawada.is_none()) {
        warn!("No Green-Sawada parameters for {}, using Opal-Beaty-Peterson", gas.name);
    }
}
