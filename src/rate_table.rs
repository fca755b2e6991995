// Electron collision rate table: total rate and cumulative level
// probabilities on a linear grid, continued on a logarithmic grid above the
// crossover energy.
use crate::angular::AngularParameters;
use crate::utilities::sample_cumulative;
use serde::{Deserialize, Serialize};

/// Location of an energy in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bin {
    Linear(usize),
    Log(usize),
}

/// Collision rates of all levels of a mixture versus electron energy.
///
/// Rows are stored flat, `n_levels` entries per bin. Every row of
/// cumulative probabilities is non-decreasing and ends at one if the bin
/// has a non-zero total rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub(crate) n_levels: usize,
    pub(crate) energy_step: f64,
    /// Total rate [ns-1] per linear bin
    pub(crate) total: Vec<f64>,
    pub(crate) cumulative: Vec<f64>,
    pub(crate) angular: Vec<AngularParameters>,
    pub(crate) high_energy: f64,
    pub(crate) ln_high: f64,
    pub(crate) ln_step: f64,
    /// Logarithm of the total rate per logarithmic bin
    pub(crate) log_total: Vec<f64>,
    pub(crate) cumulative_log: Vec<f64>,
    pub(crate) angular_log: Vec<AngularParameters>,
    pub(crate) null_rate: f64,
    pub(crate) max_energy: f64,
}

impl RateTable {
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    pub fn n_linear(&self) -> usize {
        self.total.len()
    }

    pub fn n_log(&self) -> usize {
        self.log_total.len()
    }

    /// Width of the linear bins [eV]
    pub fn energy_step(&self) -> f64 {
        self.energy_step
    }

    /// Upper end of the table [eV]
    pub fn max_energy(&self) -> f64 {
        self.max_energy
    }

    /// Largest total rate over all bins [ns-1]
    pub fn null_rate(&self) -> f64 {
        self.null_rate
    }

    pub fn bin(&self, energy: f64) -> Bin {
        if energy <= self.high_energy || self.log_total.is_empty() {
            let n = self.total.len().max(1);
            let i = (energy / self.energy_step).max(0.0) as usize;
            Bin::Linear(i.min(n - 1))
        } else {
            let n = self.log_total.len();
            let i = ((energy.ln() - self.ln_high) / self.ln_step).max(0.0) as usize;
            Bin::Log(i.min(n - 1))
        }
    }

    /// Total collision rate [ns-1] at `energy`.
    ///
    /// Log-log interpolation between the bin edges is used on the
    /// logarithmic grid.
    pub fn total_rate(&self, energy: f64) -> f64 {
        match self.bin(energy) {
            Bin::Linear(i) => self.total.get(i).copied().unwrap_or(0.0),
            Bin::Log(i) => {
                let fmax = self.log_total[i];
                let fmin = if i == 0 {
                    self.total.last().copied().unwrap_or(0.0).ln()
                } else {
                    self.log_total[i - 1]
                };
                if !fmin.is_finite() || !fmax.is_finite() {
                    return fmax.exp();
                }
                let emin = self.ln_high + i as f64 * self.ln_step;
                (fmin + (energy.ln() - emin) * (fmax - fmin) / self.ln_step).exp()
            }
        }
    }

    /// Cumulative level probabilities of a bin.
    pub fn cumulative(&self, bin: Bin) -> &[f64] {
        let n = self.n_levels;
        match bin {
            Bin::Linear(i) => self.cumulative.get(i * n..(i + 1) * n).unwrap_or(&[]),
            Bin::Log(i) => self.cumulative_log.get(i * n..(i + 1) * n).unwrap_or(&[]),
        }
    }

    pub fn angular(&self, bin: Bin, level: usize) -> AngularParameters {
        let n = self.n_levels;
        let entry = match bin {
            Bin::Linear(i) => self.angular.get(i * n + level),
            Bin::Log(i) => self.angular_log.get(i * n + level),
        };
        entry.copied().unwrap_or_default()
    }

    /// Probability of `level` in `bin`.
    pub fn probability(&self, bin: Bin, level: usize) -> f64 {
        let row = self.cumulative(bin);
        match level {
            0 => row.first().copied().unwrap_or(0.0),
            l if l < row.len() => row[l] - row[l - 1],
            _ => 0.0,
        }
    }

    /// Collision rate [ns-1] of a single level.
    pub fn level_rate(&self, energy: f64, level: usize) -> f64 {
        self.total_rate(energy) * self.probability(self.bin(energy), level)
    }

    /// Select a level with the uniform draw `r`.
    pub fn sample_level(&self, energy: f64, r: f64) -> (usize, AngularParameters) {
        let bin = self.bin(energy);
        let level = sample_cumulative(self.cumulative(bin), r);
        (level, self.angular(bin, level))
    }
}
