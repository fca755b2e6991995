// De-excitation graph: decay channels of excited states, with radiative,
// collisional and quenching transitions normalised into cumulative tables.
pub mod argon;
mod cascade;
pub mod quenching;

pub use argon::ArgonLevel;
pub use cascade::{Cascade, DeexcitationProduct, ProductKind};

use crate::constants::{
    BOLTZMANN, ELECTRON_MASS, FINE_STRUCTURE_CONSTANT, HBAR_C, PI, PI_SQUARED, SMALL,
    SPEED_OF_LIGHT,
};
use crate::error::{GasError, Result};
use crate::level::{CollisionLevel, CollisionType};
use crate::mixer::GasProperties;
use crate::provider::PhotoabsorptionProvider;
use argon::{Transition, MOLECULAR_ENERGY};
use log::{debug, warn};
use quenching::{estimator, Branching, Estimate, QUENCHERS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Oscillator strength to radiative decay rate [ns-1 eV-2].
const OSCILLATOR_TO_RATE: f64 =
    2.0 * SPEED_OF_LIGHT * FINE_STRUCTURE_CONSTANT / (3.0 * ELECTRON_MASS * HBAR_C);
/// Oscillator strength to integrated absorption cross-section [cm2 eV].
const OSCILLATOR_TO_CROSS_SECTION: f64 =
    FINE_STRUCTURE_CONSTANT * 2.0 * PI_SQUARED * HBAR_C * HBAR_C / ELECTRON_MASS;
/// Absorption window of a line in units of its Voigt FWHM.
const LINE_WINDOW: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    Radiative,
    CollisionalIonising,
    CollisionalNonIonising,
}

/// One decay channel. `probability` holds the rate [ns-1] while the graph
/// is assembled and the cumulative probability afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayChannel {
    pub probability: f64,
    /// Final state; `None` is the ground state (radiative) or loss of the
    /// excitation (collisional).
    pub target: Option<usize>,
    pub kind: ChannelKind,
}

/// An excited state taking part in de-excitation cascades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deexcitation {
    pub gas: usize,
    /// Collision level that populates this state; `None` for molecular states
    pub level: Option<usize>,
    pub label: String,
    /// Excitation energy [eV]
    pub energy: f64,
    pub oscillator_strength: f64,
    pub channels: Vec<DecayChannel>,
    /// Total decay rate [ns-1]
    pub rate: f64,
    /// Gaussian standard deviation of the line [eV]
    pub doppler_width: f64,
    /// Lorentzian half width of the line [eV]
    pub pressure_width: f64,
    /// Absorption window half width [eV]
    pub width: f64,
    /// Integrated absorption rate of the line [eV ns-1]
    pub absorption_rate: f64,
}

impl Deexcitation {
    fn new(gas: usize, level: Option<usize>, label: String, energy: f64, oscillator_strength: f64) -> Self {
        Deexcitation {
            gas,
            level,
            label,
            energy,
            oscillator_strength,
            channels: Vec::new(),
            rate: 0.0,
            doppler_width: 0.0,
            pressure_width: 0.0,
            width: 0.0,
            absorption_rate: 0.0,
        }
    }

    fn push(&mut self, rate: f64, target: Option<usize>, kind: ChannelKind) {
        self.channels.push(DecayChannel { probability: rate, target, kind });
    }

    fn push_penning(&mut self, rate: f64, probability: f64) {
        self.push(rate * probability, None, ChannelKind::CollisionalIonising);
        self.push(rate * (1.0 - probability), None, ChannelKind::CollisionalNonIonising);
    }

    /// Index of the channel selected by a uniform draw `r`; falls back to
    /// the last channel if rounding leaves `r` above the final entry.
    pub fn select_channel(&self, r: f64) -> Option<usize> {
        if self.channels.is_empty() {
            return None;
        }
        let n = self.channels.len();
        Some(self.channels.iter().position(|c| r <= c.probability).unwrap_or(n - 1))
    }

    fn normalise(&mut self) {
        self.rate = self.channels.iter().map(|c| c.probability).sum();
        if self.rate > 0.0 {
            let mut sum = 0.0;
            for channel in self.channels.iter_mut() {
                sum += channel.probability / self.rate;
                channel.probability = sum;
            }
        }
    }
}

/// Physical state of the mixture needed to assemble the graph.
pub struct GraphContext<'a> {
    pub gases: &'a [GasProperties],
    /// [cm-3]
    pub number_density: f64,
    /// [K]
    pub temperature: f64,
    pub optics: &'a dyn PhotoabsorptionProvider,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeexcitationGraph {
    entries: Vec<Deexcitation>,
}

impl DeexcitationGraph {
    /// Assemble the decay channels of all excitation levels of species with
    /// a de-excitation model (currently argon).
    ///
    /// Entries follow the order of `levels`; the molecular states are
    /// appended after the atomic ones.
    pub fn build(levels: &[CollisionLevel], ctx: &GraphContext) -> Result<Self> {
        let mut graph = DeexcitationGraph::default();
        let Some(ar) = ctx.gases.iter().position(|g| g.name == "Ar") else {
            return Ok(graph);
        };
        let mass_factor = ctx.gases[ar].mass_factor;

        let mut index_of: HashMap<ArgonLevel, usize> = HashMap::new();
        let mut states: Vec<ArgonLevel> = Vec::new();
        for (j, level) in levels.iter().enumerate() {
            if level.gas != ar || level.kind != CollisionType::Excitation {
                continue;
            }
            let state = ArgonLevel::from_description(&level.description).ok_or_else(|| {
                GasError::UnknownLevel {
                    gas: "Ar".to_string(),
                    label: level.description.trim().to_string(),
                }
            })?;
            if let Some(&i) = index_of.get(&state) {
                warn!("Duplicate excitation term for {}, keeping the last", state.label());
                let entry = &mut graph.entries[i];
                entry.level = Some(j);
                entry.energy = level.energy_loss * mass_factor;
                continue;
            }
            index_of.insert(state, graph.entries.len());
            graph.entries.push(Deexcitation::new(
                ar,
                Some(j),
                state.label(),
                level.energy_loss * mass_factor,
                state.radiative_data().oscillator_strength,
            ));
            states.push(state);
        }
        if states.is_empty() {
            return Ok(graph);
        }
        for state in [ArgonLevel::Dimer, ArgonLevel::Excimer] {
            index_of.insert(state, graph.entries.len());
            graph
                .entries
                .push(Deexcitation::new(ar, None, state.label(), MOLECULAR_ENERGY, 0.0));
        }

        let n_ar = ctx.number_density * ctx.gases[ar].fraction;
        let mut dropped = 0usize;
        for (i, &state) in states.iter().enumerate() {
            let entry = &mut graph.entries[i];
            let data = state.radiative_data();
            for transition in data.transitions {
                match *transition {
                    Transition::To(to, rate) => match index_of.get(&to) {
                        Some(&target) => entry.push(rate, Some(target), data.kind),
                        None => dropped += 1,
                    },
                    Transition::Ground(rate) => entry.push(rate, None, data.kind),
                    Transition::GroundFromOscillatorStrength => {
                        let rate = OSCILLATOR_TO_RATE * entry.energy * entry.energy * entry.oscillator_strength;
                        entry.push(rate, None, data.kind);
                    }
                }
            }
            for transfer in state.argon_transfers() {
                match index_of.get(&transfer.to) {
                    Some(&target) => entry.push(transfer.rate(n_ar), Some(target), transfer.kind),
                    None => dropped += 1,
                }
            }
        }
        if dropped > 0 {
            debug!("{} transitions to states without cross-section dropped", dropped);
        }

        graph.add_quenching(ar, &states, ctx);

        for entry in graph.entries.iter_mut() {
            entry.normalise();
        }
        graph.check()?;
        debug!("De-excitation graph with {} states", graph.entries.len());
        Ok(graph)
    }

    fn add_quenching(&mut self, ar: usize, states: &[ArgonLevel], ctx: &GraphContext) {
        for quencher in QUENCHERS.iter() {
            let Some(q) = ctx.gases.iter().position(|g| g.name == quencher.gas) else {
                continue;
            };
            if !ctx.optics.is_available(quencher.optical_gas) {
                warn!(
                    "No photoabsorption data for {}, quenching estimates set to zero",
                    quencher.optical_gas
                );
            }
            let n_q = ctx.number_density * ctx.gases[q].fraction;
            let mass_factors = (ctx.gases[ar].mass_factor, ctx.gases[q].mass_factor);
            for (i, &state) in states.iter().enumerate() {
                let entry = &mut self.entries[i];
                let (pacs, eta) = ctx
                    .optics
                    .photoabsorption(quencher.optical_gas, entry.energy)
                    .unwrap_or((0.0, 0.0));
                let p_yield = if eta > 0.0 { eta.powf(0.4) } else { 0.0 };
                let (k, branching) = match quencher.measured_rate(state) {
                    Some(measured) => (measured.k, measured.branching),
                    None => match estimator(state, entry.oscillator_strength) {
                        Some(Estimate::WatanabeKatsuura) => (
                            quenching::watanabe_katsuura_rate(
                                entry.energy,
                                entry.oscillator_strength,
                                pacs,
                                mass_factors,
                                ctx.temperature,
                            ),
                            quencher.estimated,
                        ),
                        Some(Estimate::HardSphere(radius)) => (
                            quenching::hard_sphere_rate(
                                radius,
                                quencher.radius,
                                mass_factors,
                                ctx.temperature,
                            ),
                            quencher.estimated,
                        ),
                        None => continue,
                    },
                };
                let rate = k * n_q;
                match branching {
                    Branching::NonIonising => entry.push(rate, None, ChannelKind::CollisionalNonIonising),
                    Branching::Yield => entry.push_penning(rate, p_yield),
                    Branching::Fixed(p) => entry.push_penning(rate, p),
                }
            }
        }
    }

    fn check(&self) -> Result<()> {
        let n = self.entries.len();
        for entry in &self.entries {
            let mut last = 0.0;
            for channel in &entry.channels {
                if let Some(target) = channel.target {
                    if target >= n {
                        return Err(GasError::Consistency(format!(
                            "{}: channel target {} out of range ({} states)",
                            entry.label, target, n
                        )));
                    }
                }
                if !channel.probability.is_finite() || channel.probability < last {
                    return Err(GasError::Consistency(format!(
                        "{}: channel probabilities are not a cumulative distribution",
                        entry.label
                    )));
                }
                last = channel.probability;
            }
            if entry.rate > 0.0 && (last - 1.0).abs() > 1.0e-9 {
                return Err(GasError::Consistency(format!(
                    "{}: branching ratios sum to {}",
                    entry.label, last
                )));
            }
        }
        Ok(())
    }

    /// Doppler and resonance-broadening widths and absorption rates of the
    /// optically allowed lines. Returns the number of lines.
    pub fn compute_line_parameters(&mut self, gases: &[GasProperties], number_density: f64, temperature: f64) -> usize {
        let mut n_lines = 0;
        for entry in self.entries.iter_mut() {
            if entry.oscillator_strength < SMALL {
                continue;
            }
            let gas = &gases[entry.gas];
            let density = number_density * gas.fraction;
            entry.absorption_rate =
                density * SPEED_OF_LIGHT * OSCILLATOR_TO_CROSS_SECTION * entry.oscillator_strength;
            let mass = ELECTRON_MASS / (gas.mass_factor - 1.0);
            entry.doppler_width = (BOLTZMANN * temperature / mass).sqrt() * entry.energy;
            // Ali and Griem, Phys. Rev. 140 (1965) 1044
            let k_resonance = 1.92 * PI * (1.0f64 / 3.0).sqrt();
            entry.pressure_width = k_resonance * FINE_STRUCTURE_CONSTANT * HBAR_C.powi(3)
                * entry.oscillator_strength
                * density
                / (ELECTRON_MASS * entry.energy);
            // Olivero and Longbothum, JQSRT 17 (1977) 233
            let fwhm_gauss = entry.doppler_width * (2.0 * 2.0f64.ln()).sqrt();
            let fwhm_lorentz = entry.pressure_width;
            let fwhm_voigt = 0.5
                * (1.0692 * fwhm_lorentz
                    + (0.86639 * fwhm_lorentz * fwhm_lorentz + 4.0 * fwhm_gauss * fwhm_gauss).sqrt());
            entry.width = LINE_WINDOW * fwhm_voigt;
            n_lines += 1;
        }
        if n_lines == 0 {
            warn!("No resonance lines found");
        }
        n_lines
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Deexcitation] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Deexcitation> {
        self.entries.get(index)
    }

    /// Entry populated by collision level `level`.
    pub fn index_of_level(&self, level: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.level == Some(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{OpticalTable, TabulatedPhotoabsorption};
    use approx::assert_relative_eq;

    fn gases(with_ch4: bool) -> Vec<GasProperties> {
        let mut v = vec![GasProperties::new("Ar", 2, if with_ch4 { 0.9 } else { 1.0 }, 2.0 * 1.3731e-5)];
        if with_ch4 {
            v.push(GasProperties::new("CH4", 8, 0.1, 2.0 * 3.4197e-5));
        }
        v
    }

    fn excitation(code: &str, threshold: f64) -> CollisionLevel {
        let r = 1.0 + 1.3731e-5;
        CollisionLevel::new(0, CollisionType::Excitation, format!(" EXC {:<7}", code), threshold / r)
    }

    fn levels() -> Vec<CollisionLevel> {
        vec![
            CollisionLevel::new(0, CollisionType::Elastic, "ELASTIC", 0.0),
            excitation("1S5", 11.548),
            excitation("1S4", 11.624),
            excitation("2P10", 12.907),
            excitation("2P1", 13.480),
            excitation("3D2", 14.153),
        ]
    }

    fn optics() -> TabulatedPhotoabsorption {
        let mut optics = TabulatedPhotoabsorption::new();
        optics
            .insert(OpticalTable {
                name: "CH4".to_string(),
                energies: vec![8.0, 20.0],
                cross_section: vec![3.0e-17, 5.0e-17],
                ionisation_yield: vec![0.0, 1.0],
            })
            .unwrap();
        optics
    }

    fn build(with_ch4: bool) -> DeexcitationGraph {
        let gases = gases(with_ch4);
        let optics = optics();
        let ctx = GraphContext {
            gases: &gases,
            number_density: 2.5e19,
            temperature: 293.15,
            optics: &optics,
        };
        DeexcitationGraph::build(&levels(), &ctx).unwrap()
    }

    #[test]
    fn test_entries_follow_level_order() {
        let graph = build(false);
        let labels: Vec<&str> = graph.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Ar_1S5", "Ar_1S4", "Ar_2P10", "Ar_2P1", "Ar_3D2", "Ar_Dimer", "Ar_Excimer"]
        );
        assert_eq!(graph.index_of_level(1), Some(0));
        assert_eq!(graph.index_of_level(0), None);
        assert_relative_eq!(graph.entries()[0].energy, 11.548, max_relative = 1e-12);
    }

    #[test]
    fn test_duplicate_level_keeps_last() {
        let mut levels = levels();
        levels.push(excitation("1S4", 11.630));
        let gases = gases(false);
        let optics = optics();
        let ctx = GraphContext {
            gases: &gases,
            number_density: 2.5e19,
            temperature: 293.15,
            optics: &optics,
        };
        let graph = DeexcitationGraph::build(&levels, &ctx).unwrap();
        assert_eq!(graph.len(), 7);
        assert_eq!(graph.index_of_level(2), None);
        assert_eq!(graph.index_of_level(6), Some(1));
        assert_relative_eq!(graph.entries()[1].energy, 11.630, max_relative = 1e-12);
    }

    #[test]
    fn test_branching_ratios_normalised() {
        for graph in [build(false), build(true)] {
            for entry in graph.entries() {
                if entry.rate > 0.0 {
                    let last = entry.channels.last().unwrap().probability;
                    assert_relative_eq!(last, 1.0, max_relative = 1e-12);
                    for pair in entry.channels.windows(2) {
                        assert!(pair[1].probability >= pair[0].probability);
                    }
                } else {
                    assert!(entry.label.contains("Dimer") || entry.label.contains("Excimer"));
                }
            }
        }
    }

    #[test]
    fn test_radiative_rate_from_literature() {
        let graph = build(false);
        // 1S4: 0.119 ns-1 to ground plus nothing else in pure argon
        let s4 = &graph.entries()[1];
        assert_relative_eq!(s4.rate, 0.119, max_relative = 1e-12);
        assert_eq!(s4.channels.len(), 1);
        assert_eq!(s4.channels[0].target, None);
        // 2P10 has four radiative lines but only 1S5 and 1S4 exist here.
        let p10 = &graph.entries()[2];
        let radiative = p10.channels.iter().filter(|c| c.kind == ChannelKind::Radiative).count();
        assert_eq!(radiative, 2);
    }

    #[test]
    fn test_metastable_excimer_channel() {
        let graph = build(false);
        let s5 = &graph.entries()[0];
        let n_ar: f64 = 2.5e19;
        assert_relative_eq!(s5.rate, 1.1e-41 * n_ar * n_ar + 2.1e-24 * n_ar, max_relative = 1e-12);
        assert_eq!(s5.channels[0].target, Some(6));
    }

    #[test]
    fn test_methane_quenching_adds_penning() {
        let pure = build(false);
        let mixed = build(true);
        let s5_pure = &pure.entries()[0];
        let s5_mixed = &mixed.entries()[0];
        assert!(s5_mixed.rate > s5_pure.rate);
        // 2P1 quenched by CH4 with a yield-based Penning split
        let p1 = &mixed.entries()[3];
        assert!(p1.channels.iter().any(|c| c.kind == ChannelKind::CollisionalIonising && c.target.is_none()));
        // 3D2 estimated with Watanabe-Katsuura
        let d2 = &mixed.entries()[4];
        assert!(d2.channels.len() > pure.entries()[4].channels.len());
    }

    #[test]
    fn test_unknown_label_is_error() {
        let gases = gases(false);
        let optics = optics();
        let ctx = GraphContext { gases: &gases, number_density: 2.5e19, temperature: 293.15, optics: &optics };
        let levels = vec![excitation("9Z9", 12.0)];
        assert!(matches!(
            DeexcitationGraph::build(&levels, &ctx),
            Err(GasError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn test_no_argon_gives_empty_graph() {
        let gases = vec![GasProperties::new("CH4", 8, 1.0, 2.0 * 3.4197e-5)];
        let optics = optics();
        let ctx = GraphContext { gases: &gases, number_density: 2.5e19, temperature: 293.15, optics: &optics };
        let mut levels = levels();
        for level in levels.iter_mut() {
            level.gas = 0;
        }
        // Argon-style descriptions on a methane gas are not de-excitable.
        let graph = DeexcitationGraph::build(&levels, &ctx).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_line_parameters() {
        let mut graph = build(false);
        let n = graph.compute_line_parameters(&gases(false), 2.5e19, 293.15);
        // 1S4 and 3D2 have oscillator strengths
        assert_eq!(n, 2);
        let s4 = &graph.entries()[1];
        assert!(s4.absorption_rate > 0.0);
        assert!(s4.doppler_width > 0.0 && s4.doppler_width < 1e-4);
        assert!(s4.pressure_width > 0.0);
        assert!(s4.width > 1000.0 * s4.pressure_width * 0.5);
        assert_eq!(graph.entries()[0].width, 0.0);
    }

    #[test]
    fn test_select_channel_falls_back_to_last() {
        let graph = build(false);
        let s5 = &graph.entries()[0];
        assert_eq!(s5.select_channel(0.0), Some(0));
        assert_eq!(s5.select_channel(1.5), Some(s5.channels.len() - 1));
        assert_eq!(graph.entries()[5].select_channel(0.5), None);
    }
}
