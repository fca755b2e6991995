// Angular distribution parameters and scattering-angle remapping
use crate::constants::PI;
use crate::level::ScatteringModel;
use serde::{Deserialize, Serialize};

/// Pre-computed angular parameters of one level in one energy bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularParameters {
    /// Fraction of the [0, pi] range kept by the cut-off model
    pub cut: f64,
    pub par: f64,
}

impl Default for AngularParameters {
    fn default() -> Self {
        AngularParameters { cut: 1.0, par: 0.5 }
    }
}

impl AngularParameters {
    /// Turn a raw shape parameter from the cross-section data into the form
    /// used at sampling time.
    ///
    /// For the cut-off model with a raw parameter above one, the parameter
    /// encodes a forward peak. It is split into a cut-off angle
    /// `asin(2 sqrt(c - c^2))`, `c = p - 0.5`, and a renormalised
    /// forward-scattering probability.
    pub fn from_raw(model: ScatteringModel, raw: f64) -> Self {
        match model {
            ScatteringModel::Isotropic => AngularParameters::default(),
            ScatteringModel::Cutoff if raw > 1.0 => {
                let cns = raw - 0.5;
                let thetac = (2.0 * (cns - cns * cns).max(0.0).sqrt()).clamp(-1.0, 1.0).asin();
                let sin_thetac = thetac.sin();
                let fac = if sin_thetac.abs() > 0.0 {
                    (1.0 - thetac.cos()) / (sin_thetac * sin_thetac)
                } else {
                    0.5
                };
                AngularParameters {
                    cut: thetac * 2.0 / PI,
                    par: cns * fac + 0.5,
                }
            }
            ScatteringModel::Cutoff | ScatteringModel::Parametrised | ScatteringModel::Unknown(_) => {
                AngularParameters { cut: 1.0, par: raw }
            }
        }
    }

    /// Remap an isotropic `cos(theta)` according to the scattering model.
    /// The cut-off model ignores `cos_theta` and uses the uniform draws `u`
    /// (polar angle) and `v` (forward or backward).
    ///
    /// Returns `None` for a model the sampler does not know.
    pub fn remap(&self, model: ScatteringModel, cos_theta: f64, u: f64, v: f64) -> Option<f64> {
        match model {
            ScatteringModel::Isotropic => Some(cos_theta),
            ScatteringModel::Cutoff => {
                let c = 1.0 - u * self.cut;
                Some(if v > self.par { -c } else { c })
            }
            ScatteringModel::Parametrised => {
                Some((cos_theta + self.par) / (1.0 + self.par * cos_theta))
            }
            ScatteringModel::Unknown(_) => None,
        }
    }
}
