// Photon absorption rates: photoionisation and inelastic absorption
// continuum per gas, plus discrete resonance lines of excited states.
use crate::constants::SPEED_OF_LIGHT;
use crate::deexcitation::DeexcitationGraph;
use crate::error::{GasError, Result};
use crate::mixer::GasProperties;
use crate::provider::PhotoabsorptionProvider;
use crate::random::{uniform, voigt_profile};
use crate::utilities::sample_cumulative;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhotonCollisionType {
    Elastic,
    Ionisation,
    Inelastic,
    Excitation,
}

impl PhotonCollisionType {
    pub const ALL: [PhotonCollisionType; 4] = [
        PhotonCollisionType::Elastic,
        PhotonCollisionType::Ionisation,
        PhotonCollisionType::Inelastic,
        PhotonCollisionType::Excitation,
    ];

    pub fn index(self) -> usize {
        match self {
            PhotonCollisionType::Elastic => 0,
            PhotonCollisionType::Ionisation => 1,
            PhotonCollisionType::Inelastic => 2,
            PhotonCollisionType::Excitation => 3,
        }
    }
}

impl fmt::Display for PhotonCollisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhotonCollisionType::Elastic => "elastic",
            PhotonCollisionType::Ionisation => "ionisation",
            PhotonCollisionType::Inelastic => "inelastic",
            PhotonCollisionType::Excitation => "excitation",
        };
        f.write_str(name)
    }
}

/// One continuum absorption channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotonTerm {
    pub gas: usize,
    pub kind: PhotonCollisionType,
}

/// Outcome of selecting an absorption process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhotonAbsorption {
    /// Absorbed by the resonance line of a de-excitation graph entry
    Line(usize),
    /// Absorbed in the continuum channel with this term index
    Continuum(usize),
}

/// Name of the photoabsorption data set used for a gas.
pub fn optical_name(gas: &str) -> &str {
    match gas {
        "iC4H10" => "nC4H10",
        other => other,
    }
}

/// Continuum absorption rates [ns-1] on a linear photon energy grid. Rows
/// hold running sums of the channel rates (not normalised).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotonRateTable {
    energy_step: f64,
    max_energy: f64,
    terms: Vec<PhotonTerm>,
    total: Vec<f64>,
    cumulative: Vec<f64>,
}

impl PhotonRateTable {
    /// Fails if any gas of the mixture has no photoabsorption data.
    pub fn build(
        gases: &[GasProperties],
        number_density: f64,
        max_energy: f64,
        n_steps: usize,
        optics: &dyn PhotoabsorptionProvider,
    ) -> Result<Self> {
        if n_steps == 0 {
            return Err(GasError::Configuration("number of photon energy steps must be positive".into()));
        }
        let step = max_energy / n_steps as f64;
        let mut terms = Vec::with_capacity(2 * gases.len());
        for (g, gas) in gases.iter().enumerate() {
            let name = optical_name(&gas.name);
            if name != gas.name {
                debug!("Using {} photoabsorption data for {}", name, gas.name);
            }
            if !optics.is_available(name) {
                return Err(GasError::Data(format!("no photoabsorption data for {}", name)));
            }
            terms.push(PhotonTerm { gas: g, kind: PhotonCollisionType::Ionisation });
            terms.push(PhotonTerm { gas: g, kind: PhotonCollisionType::Inelastic });
        }
        let n_terms = terms.len();
        let mut total = vec![0.0; n_steps];
        let mut cumulative = vec![0.0; n_steps * n_terms];
        for (i, total) in total.iter_mut().enumerate() {
            let energy = (i as f64 + 0.5) * step;
            let row = &mut cumulative[i * n_terms..(i + 1) * n_terms];
            let mut sum = 0.0;
            for (g, gas) in gases.iter().enumerate() {
                let (cs, eta) = optics
                    .photoabsorption(optical_name(&gas.name), energy)
                    .unwrap_or((0.0, 0.0));
                let rate = number_density * SPEED_OF_LIGHT * gas.fraction * cs.max(0.0);
                sum += rate * eta;
                row[2 * g] = sum;
                sum += rate * (1.0 - eta);
                row[2 * g + 1] = sum;
            }
            *total = sum;
        }
        Ok(PhotonRateTable { energy_step: step, max_energy, terms, total, cumulative })
    }

    pub fn max_energy(&self) -> f64 {
        self.max_energy
    }

    pub fn terms(&self) -> &[PhotonTerm] {
        &self.terms
    }

    pub fn bin(&self, energy: f64) -> usize {
        let n = self.total.len().max(1);
        ((energy / self.energy_step).max(0.0) as usize).min(n - 1)
    }

    /// Absorption rate of the continuum [ns-1].
    pub fn continuum_rate(&self, energy: f64) -> f64 {
        self.total.get(self.bin(energy)).copied().unwrap_or(0.0)
    }

    /// Resonance lines whose absorption window contains `energy`, with
    /// their rate at that energy.
    fn lines<'a>(&self, energy: f64, graph: &'a DeexcitationGraph) -> impl Iterator<Item = (usize, f64)> + 'a {
        graph.entries().iter().enumerate().filter_map(move |(i, d)| {
            if d.absorption_rate > 0.0 && (energy - d.energy).abs() <= d.width {
                let profile = voigt_profile(energy - d.energy, d.doppler_width, 2.0 * d.pressure_width);
                Some((i, d.absorption_rate * profile))
            } else {
                None
            }
        })
    }

    /// Total absorption rate [ns-1], including resonance lines if `lines`
    /// is given.
    pub fn rate(&self, energy: f64, lines: Option<&DeexcitationGraph>) -> f64 {
        let continuum = self.continuum_rate(energy);
        match lines {
            Some(graph) => continuum + self.lines(energy, graph).map(|(_, r)| r).sum::<f64>(),
            None => continuum,
        }
    }

    /// Select the absorption process for a photon of `energy`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        energy: f64,
        lines: Option<&DeexcitationGraph>,
        rng: &mut R,
    ) -> PhotonAbsorption {
        let i = self.bin(energy);
        let continuum = self.total.get(i).copied().unwrap_or(0.0);
        let mut r = continuum;
        let mut candidates: Vec<(usize, f64)> = Vec::new();
        if let Some(graph) = lines {
            for (index, rate) in self.lines(energy, graph) {
                r += rate;
                candidates.push((index, r));
            }
        }
        r *= uniform(rng);
        if !candidates.is_empty() && r >= continuum {
            let line = candidates
                .iter()
                .find(|(_, p)| r <= *p)
                .or_else(|| candidates.last())
                .map(|(index, _)| *index);
            if let Some(index) = line {
                return PhotonAbsorption::Line(index);
            }
            warn!("Sampling of the absorption line at {} eV failed", energy);
        }
        let n = self.terms.len();
        let row = self.cumulative.get(i * n..(i + 1) * n).unwrap_or(&[]);
        PhotonAbsorption::Continuum(sample_cumulative(row, r))
    }
}
