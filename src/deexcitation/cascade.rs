// Monte Carlo walk through the de-excitation graph
use super::{ChannelKind, DeexcitationGraph};
use crate::constants::SMALL;
use crate::random::{uniform, uniform_pos, voigt};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductKind {
    Photon,
    Electron,
}

/// A photon or electron emitted during a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeexcitationProduct {
    /// Time after the excitation [ns]
    pub time: f64,
    /// Distance from the excitation point [cm]
    pub distance: f64,
    pub kind: ProductKind,
    /// [eV]
    pub energy: f64,
}

/// Outcome of one cascade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cascade {
    pub products: Vec<DeexcitationProduct>,
    /// Graph entry the cascade ended in; `None` if the excitation was lost
    /// in a collision without a final state.
    pub final_state: Option<usize>,
    /// Number of Penning and associative ionisations
    pub penning_transfers: u32,
}

impl DeexcitationGraph {
    /// Follow the decay chain starting at entry `start` until the state
    /// decays to the ground state, is lost, or reaches a state without
    /// decay channels.
    ///
    /// `min_ion_pot` is the lowest ionisation potential in the mixture [eV].
    pub fn cascade<R: Rng + ?Sized>(&self, start: usize, min_ion_pot: f64, rng: &mut R) -> Cascade {
        let mut cascade = Cascade { final_state: Some(start), ..Cascade::default() };
        let mut time = 0.0;
        let mut current = Some(start);
        while let Some(index) = current {
            let Some(state) = self.get(index) else {
                break;
            };
            cascade.final_state = Some(index);
            if state.rate <= 0.0 || state.channels.is_empty() {
                break;
            }
            time += -uniform_pos(rng).ln() / state.rate;
            let Some(selected) = state.select_channel(uniform(rng)) else {
                break;
            };
            let channel = state.channels[selected];
            let target_energy = channel.target.and_then(|t| self.get(t)).map(|t| t.energy);
            match (channel.kind, channel.target) {
                (ChannelKind::Radiative, Some(target)) => {
                    let energy = (state.energy - target_energy.unwrap_or(0.0)).max(SMALL);
                    cascade.products.push(DeexcitationProduct {
                        time,
                        distance: 0.0,
                        kind: ProductKind::Photon,
                        energy,
                    });
                    current = Some(target);
                }
                (ChannelKind::Radiative, None) => {
                    let energy = state.energy + line_offset(state.energy, state.doppler_width, state.pressure_width, state.width, rng);
                    cascade.products.push(DeexcitationProduct {
                        time,
                        distance: 0.0,
                        kind: ProductKind::Photon,
                        energy,
                    });
                    return cascade;
                }
                (ChannelKind::CollisionalIonising, Some(target)) => {
                    let energy = (state.energy - target_energy.unwrap_or(0.0)).max(SMALL);
                    cascade.products.push(DeexcitationProduct {
                        time,
                        distance: 0.0,
                        kind: ProductKind::Electron,
                        energy,
                    });
                    cascade.penning_transfers += 1;
                    current = Some(target);
                }
                (ChannelKind::CollisionalIonising, None) => {
                    cascade.products.push(DeexcitationProduct {
                        time,
                        distance: 0.0,
                        kind: ProductKind::Electron,
                        energy: (state.energy - min_ion_pot).max(SMALL),
                    });
                    cascade.penning_transfers += 1;
                    return cascade;
                }
                (ChannelKind::CollisionalNonIonising, target) => {
                    if target.is_none() {
                        cascade.final_state = None;
                    }
                    current = target;
                }
            }
        }
        cascade
    }
}

/// Energy offset of a photon emitted on a resonance line, drawn from the
/// line's Voigt profile within its absorption window. Lines without a
/// window are emitted at their nominal energy.
fn line_offset<R: Rng + ?Sized>(energy: f64, sigma: f64, gamma: f64, width: f64, rng: &mut R) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    loop {
        let delta = voigt(rng, 0.0, sigma, gamma);
        if energy + delta >= SMALL && delta.abs() < width {
            return delta;
        }
    }
}
