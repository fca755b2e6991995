// Collision levels: one entry per cross-section term of the mixture
use serde::{Deserialize, Serialize};
use std::fmt;

/// Electron collision processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionType {
    Elastic,
    Ionisation,
    Attachment,
    Inelastic,
    Excitation,
    Superelastic,
}

impl CollisionType {
    pub const ALL: [CollisionType; 6] = [
        CollisionType::Elastic,
        CollisionType::Ionisation,
        CollisionType::Attachment,
        CollisionType::Inelastic,
        CollisionType::Excitation,
        CollisionType::Superelastic,
    ];

    pub fn index(self) -> usize {
        match self {
            CollisionType::Elastic => 0,
            CollisionType::Ionisation => 1,
            CollisionType::Attachment => 2,
            CollisionType::Inelastic => 3,
            CollisionType::Excitation => 4,
            CollisionType::Superelastic => 5,
        }
    }
}

impl fmt::Display for CollisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollisionType::Elastic => "elastic",
            CollisionType::Ionisation => "ionisation",
            CollisionType::Attachment => "attachment",
            CollisionType::Inelastic => "inelastic",
            CollisionType::Excitation => "excitation",
            CollisionType::Superelastic => "superelastic",
        };
        f.write_str(name)
    }
}

/// Angular distribution model of a term, as indexed by cross-section
/// databases (0 isotropic, 1 cut-off forward peak, 2 screened parametrisation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ScatteringModel {
    #[default]
    Isotropic,
    Cutoff,
    Parametrised,
    Unknown(i32),
}

impl From<i32> for ScatteringModel {
    fn from(index: i32) -> Self {
        match index {
            i if i <= 0 => ScatteringModel::Isotropic,
            1 => ScatteringModel::Cutoff,
            2 => ScatteringModel::Parametrised,
            i => ScatteringModel::Unknown(i),
        }
    }
}

impl From<ScatteringModel> for i32 {
    fn from(model: ScatteringModel) -> Self {
        match model {
            ScatteringModel::Isotropic => 0,
            ScatteringModel::Cutoff => 1,
            ScatteringModel::Parametrised => 2,
            ScatteringModel::Unknown(i) => i,
        }
    }
}

/// One collision term of the mixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionLevel {
    /// Index of the gas in the mixture
    pub gas: usize,
    pub kind: CollisionType,
    pub description: String,
    /// Energy loss in the lab frame [eV], i.e. the threshold divided by the
    /// mass ratio factor of the gas
    pub energy_loss: f64,
    pub model: ScatteringModel,
    /// Opal-Beaty-Peterson width [eV] (ionisation levels)
    pub opal_beaty: f64,
    /// Entry in the de-excitation graph
    pub deexcitation: Option<usize>,
    /// Probability of a Penning transfer after excitation
    pub penning_probability: f64,
    /// Mean distance [cm] of a Penning electron from the excitation
    pub penning_distance: f64,
}

impl CollisionLevel {
    pub fn new(gas: usize, kind: CollisionType, description: impl Into<String>, energy_loss: f64) -> Self {
        CollisionLevel {
            gas,
            kind,
            description: description.into(),
            energy_loss,
            model: ScatteringModel::Isotropic,
            opal_beaty: 0.0,
            deexcitation: None,
            penning_probability: 0.0,
            penning_distance: 0.0,
        }
    }
}

/// Classify an inelastic term from its description and threshold.
///
/// Descriptions with `EX` in the first or second position are excitations, as
/// are all nitrogen terms above 6 eV. Other terms with a negative threshold are
/// superelastic.
pub fn classify_inelastic(gas_name: &str, description: &str, threshold: f64) -> CollisionType {
    let bytes = description.as_bytes();
    let ex_at = |i: usize| bytes.len() > i + 1 && bytes[i] == b'E' && bytes[i + 1] == b'X';
    if ex_at(0) || ex_at(1) || (gas_name == "N2" && threshold > 6.0) {
        CollisionType::Excitation
    } else if threshold < 0.0 {
        CollisionType::Superelastic
    } else {
        CollisionType::Inelastic
    }
}
