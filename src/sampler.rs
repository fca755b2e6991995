// Electron collision sampling on a built rate table
use crate::deexcitation::{DeexcitationGraph, DeexcitationProduct, ProductKind};
use crate::constants::SMALL;
use crate::kinematics::{azimuth, rotate_direction, scatter, secondary_energy};
use crate::level::{CollisionType, ScatteringModel};
use crate::mixer::MixedTables;
use crate::random::{radius_in_sphere, uniform};
use crate::settings::SplittingFunction;
use log::warn;
use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Residual energy kept by the electron if the loss exceeds its energy [eV].
const MIN_RESIDUAL: f64 = 1.0e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryKind {
    Electron,
    Ion,
}

/// Particle created directly in an ionising collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Secondary {
    pub kind: SecondaryKind,
    /// [eV]
    pub energy: f64,
}

/// Outcome of one electron collision.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectronCollision {
    pub kind: CollisionType,
    pub level: usize,
    /// Energy after the collision [eV]
    pub energy: f64,
    /// Unit direction after the collision
    pub direction: Vector3<f64>,
    pub secondaries: Vec<Secondary>,
    /// De-excitation cascade or Penning products
    pub products: Vec<DeexcitationProduct>,
    pub penning_transfers: u32,
}

/// Read-only view of the tables and switches needed to sample collisions.
pub struct CollisionSampler<'a> {
    pub tables: &'a MixedTables,
    /// Present if de-excitation cascades are followed
    pub graph: Option<&'a DeexcitationGraph>,
    pub splitting: SplittingFunction,
    pub anisotropic: bool,
}

impl<'a> CollisionSampler<'a> {
    /// Sample a collision of an electron with `energy` [eV] moving along
    /// `direction`. The energy must be positive.
    pub fn sample<R: Rng + ?Sized>(&self, energy: f64, direction: &Vector3<f64>, rng: &mut R) -> ElectronCollision {
        let (index, angular) = self.tables.rates.sample_level(energy, uniform(rng));
        let level = &self.tables.levels[index];
        let gas = &self.tables.gases[level.gas];
        let r = gas.mass_factor;

        let mut loss = level.energy_loss;
        let mut secondaries = Vec::new();
        let mut products = Vec::new();
        let mut penning_transfers = 0;

        match level.kind {
            CollisionType::Ionisation => {
                let esec = secondary_energy(
                    self.splitting,
                    energy,
                    loss,
                    level.opal_beaty,
                    gas.green_sawada.as_ref(),
                    uniform(rng),
                );
                loss += esec;
                secondaries.push(Secondary { kind: SecondaryKind::Electron, energy: esec });
                secondaries.push(Secondary { kind: SecondaryKind::Ion, energy: 0.0 });
            }
            CollisionType::Excitation => {
                let cascade_start = self.graph.zip(level.deexcitation);
                if let Some((graph, start)) = cascade_start {
                    let cascade = graph.cascade(start, self.tables.min_ion_pot, rng);
                    penning_transfers = cascade.penning_transfers;
                    products = cascade.products;
                } else if level.penning_probability > 0.0 {
                    let threshold = level.energy_loss * r;
                    if threshold > self.tables.min_ion_pot && uniform(rng) < level.penning_probability {
                        let distance = if level.penning_distance > SMALL {
                            radius_in_sphere(rng, level.penning_distance)
                        } else {
                            0.0
                        };
                        products.push(DeexcitationProduct {
                            time: 0.0,
                            distance,
                            kind: ProductKind::Electron,
                            energy: (threshold - self.tables.min_ion_pot).max(SMALL),
                        });
                        penning_transfers = 1;
                    }
                }
            }
            _ => {}
        }

        if energy < loss {
            loss = energy - MIN_RESIDUAL;
        }

        let mut cos_theta0 = 1.0 - 2.0 * uniform(rng);
        if self.anisotropic && level.model != ScatteringModel::Isotropic {
            let (u, v) = match level.model {
                ScatteringModel::Cutoff => (uniform(rng), uniform(rng)),
                _ => (0.0, 0.0),
            };
            match angular.remap(level.model, cos_theta0, u, v) {
                Some(c) => cos_theta0 = c,
                None => warn!("Unknown scattering model {:?}, using isotropic scattering", level.model),
            }
        }

        let s = scatter(energy, loss, r, cos_theta0);
        let direction = rotate_direction(direction, s.cos_theta, s.sin_theta, azimuth(uniform(rng)));

        ElectronCollision {
            kind: level.kind,
            level: index,
            energy: s.energy,
            direction,
            secondaries,
            products,
            penning_transfers,
        }
    }
}
