// Quenching of excited argon by molecular admixtures.
//
// Literature constants [cm3 ns-1] from Velazco et al., J. Chem. Phys. 69
// (1978) 4357, Chen and Setser, J. Phys. Chem. 95 (1991) 8473, and Sadeghi et
// al. for the 4p manifold. Where no measurement exists the rate is estimated
// with the Watanabe-Katsuura formula (optically allowed states) or a
// hard-sphere cross-section.
use super::argon::{ArgonLevel, NON_RESONANT_3D, NON_RESONANT_5S, RADIUS_3D, RADIUS_5S};
use crate::constants::{
    ATOMIC_MASS_UNIT, BOHR_RADIUS, BOLTZMANN, ELECTRON_MASS, ELECTRON_MASS_GRAMME,
    FINE_STRUCTURE_CONSTANT, PI, PI_SQUARED, RYDBERG_ENERGY, SPEED_OF_LIGHT,
};
use once_cell::sync::Lazy;

/// How a quenching rate is split between Penning ionisation and plain
/// energy transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Branching {
    /// No ionisation
    NonIonising,
    /// Penning probability from the quencher's photoionisation yield, eta^0.4
    Yield,
    /// Fixed Penning probability
    Fixed(f64),
}

/// Measured rate constant for a set of argon states.
#[derive(Debug, Clone, PartialEq)]
pub struct QuenchingRate {
    pub levels: Vec<ArgonLevel>,
    pub k: f64,
    pub branching: Branching,
}

/// Quenching data of one molecular admixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Quencher {
    pub gas: &'static str,
    /// Name of the photoabsorption data set used for the estimators
    pub optical_gas: &'static str,
    /// Collision radius [cm]
    pub radius: f64,
    pub measured: Vec<QuenchingRate>,
    /// Branching applied to estimated rates
    pub estimated: Branching,
}

impl Quencher {
    /// Measured entry for an argon state, if there is one.
    pub fn measured_rate(&self, level: ArgonLevel) -> Option<&QuenchingRate> {
        self.measured.iter().find(|m| m.levels.contains(&level))
    }
}

/// Which estimator applies to a state without a measured constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    WatanabeKatsuura,
    HardSphere(f64),
}

pub fn estimator(level: ArgonLevel, oscillator_strength: f64) -> Option<Estimate> {
    if oscillator_strength > 0.0 {
        Some(Estimate::WatanabeKatsuura)
    } else if NON_RESONANT_3D.contains(&level) {
        Some(Estimate::HardSphere(RADIUS_3D))
    } else if NON_RESONANT_5S.contains(&level) {
        Some(Estimate::HardSphere(RADIUS_5S))
    } else {
        None
    }
}

/// Rate constant [cm3 ns-1] from the Watanabe-Katsuura formula.
///
/// `mass_factors` are `1 + m_e / M` of the two collision partners, `pacs` the
/// photoabsorption cross-section [cm2] of the quencher at `energy` [eV].
pub fn watanabe_katsuura_rate(
    energy: f64,
    oscillator_strength: f64,
    pacs: f64,
    mass_factors: (f64, f64),
    temperature: f64,
) -> f64 {
    let m1 = ELECTRON_MASS_GRAMME / (mass_factors.0 - 1.0);
    let m2 = ELECTRON_MASS_GRAMME / (mass_factors.1 - 1.0);
    let reduced_mass = (m1 * m2 / (m1 + m2)) / ATOMIC_MASS_UNIT;
    let u_a = (RYDBERG_ENERGY / energy) * oscillator_strength;
    let u_q = (2.0 * RYDBERG_ENERGY / energy) * pacs
        / (4.0 * PI_SQUARED * FINE_STRUCTURE_CONSTANT * BOHR_RADIUS * BOHR_RADIUS);
    2.591e-19 * (u_a * u_q).powf(0.4) * (temperature / reduced_mass).powf(0.3)
}

/// Rate constant [cm3 ns-1] of hard spheres with radii `r1`, `r2` [cm] at
/// thermal relative velocity.
pub fn hard_sphere_rate(r1: f64, r2: f64, mass_factors: (f64, f64), temperature: f64) -> f64 {
    let r = r1 + r2;
    let sigma = PI * r * r;
    let m1 = ELECTRON_MASS / (mass_factors.0 - 1.0);
    let m2 = ELECTRON_MASS / (mass_factors.1 - 1.0);
    let reduced_mass = m1 * m2 / (m1 + m2);
    let velocity = SPEED_OF_LIGHT * (8.0 * BOLTZMANN * temperature / (PI * reduced_mass)).sqrt();
    sigma * velocity
}

fn rate(levels: &[ArgonLevel], k: f64, branching: Branching) -> QuenchingRate {
    QuenchingRate { levels: levels.to_vec(), k, branching }
}

const ALL_4P: [ArgonLevel; 10] = [
    ArgonLevel::Ar2P10,
    ArgonLevel::Ar2P9,
    ArgonLevel::Ar2P8,
    ArgonLevel::Ar2P7,
    ArgonLevel::Ar2P6,
    ArgonLevel::Ar2P5,
    ArgonLevel::Ar2P4,
    ArgonLevel::Ar2P3,
    ArgonLevel::Ar2P2,
    ArgonLevel::Ar2P1,
];

/// 4p states with an individually measured constant; the others share one.
const MEASURED_4P: [ArgonLevel; 4] =
    [ArgonLevel::Ar2P8, ArgonLevel::Ar2P6, ArgonLevel::Ar2P5, ArgonLevel::Ar2P1];

fn other_4p() -> Vec<ArgonLevel> {
    ALL_4P.iter().copied().filter(|l| !MEASURED_4P.contains(l)).collect()
}

/// 4p rates: 2P8, 2P6, 2P5, 2P1 and the rest, in that order.
fn rates_4p(k: [f64; 5], branching: Branching) -> Vec<QuenchingRate> {
    let mut v: Vec<QuenchingRate> = MEASURED_4P
        .iter()
        .zip(k.iter())
        .map(|(&level, &k)| rate(&[level], k, branching))
        .collect();
    v.push(QuenchingRate { levels: other_4p(), k: k[4], branching });
    v
}

/// Admixtures in the order their channels are appended.
pub static QUENCHERS: Lazy<Vec<Quencher>> = Lazy::new(|| {
    use ArgonLevel::*;
    use Branching::{Fixed, NonIonising, Yield};

    let co2 = {
        let mut measured = vec![
            rate(&[Ar1S5], 5.3e-19, NonIonising),
            rate(&[Ar1S4], 5.0e-19, NonIonising),
            rate(&[Ar1S3], 5.9e-19, NonIonising),
            rate(&[Ar1S2], 7.4e-19, NonIonising),
        ];
        measured.extend(rates_4p([6.4e-19, 6.1e-19, 6.6e-19, 6.2e-19, 6.33e-19], NonIonising));
        Quencher { gas: "CO2", optical_gas: "CO2", radius: 165.0e-10, measured, estimated: Yield }
    };

    let ch4 = {
        let mut measured = vec![
            rate(&[Ar1S5], 4.55e-19, NonIonising),
            rate(&[Ar1S4], 4.5e-19, NonIonising),
            rate(&[Ar1S3], 5.30e-19, NonIonising),
            rate(&[Ar1S2], 5.7e-19, NonIonising),
        ];
        measured.extend(rates_4p([7.4e-19, 3.4e-19, 6.0e-19, 9.3e-19, 6.53e-19], Yield));
        Quencher { gas: "CH4", optical_gas: "CH4", radius: 190.0e-10, measured, estimated: Yield }
    };

    let c2h6 = {
        let mut measured = vec![
            rate(&[Ar1S5], 5.29e-19, Yield),
            rate(&[Ar1S4], 6.2e-19, Yield),
            rate(&[Ar1S3], 6.53e-19, Yield),
            rate(&[Ar1S2], 10.7e-19, Yield),
        ];
        measured.extend(rates_4p([9.2e-19, 4.8e-19, 9.9e-19, 11.0e-19, 8.7e-19], Yield));
        Quencher { gas: "C2H6", optical_gas: "C2H6", radius: 195.0e-10, measured, estimated: Yield }
    };

    let ic4h10 = {
        let mut measured = vec![
            rate(&[Ar1S5], 7.1e-19, Yield),
            rate(&[Ar1S4], 6.1e-19, Yield),
            rate(&[Ar1S3], 8.5e-19, Yield),
            rate(&[Ar1S2], 11.0e-19, Yield),
        ];
        // No 4p data; scale the ethane values by the collision radii and
        // reduced masses.
        let fr = (340.0 + 250.0) / (340.0 + 195.0);
        let f4p = fr * fr * ((30.1f64 / 58.1) * (39.9 + 58.1) / (39.9 + 30.1)).sqrt();
        let k = [9.2e-19, 4.8e-19, 9.9e-19, 11.0e-19, 5.5e-19].map(|k| k * f4p);
        measured.extend(rates_4p(k, Yield));
        Quencher {
            gas: "iC4H10",
            optical_gas: "nC4H10",
            radius: 250.0e-10,
            measured,
            estimated: Yield,
        }
    };

    let c2h2 = {
        let mut measured = vec![
            rate(&[Ar1S5], 5.6e-19, Fixed(0.61)),
            rate(&[Ar1S4], 4.6e-19, Yield),
            rate(&[Ar1S3], 5.6e-19, Fixed(0.61)),
            rate(&[Ar1S2], 8.7e-19, Yield),
        ];
        measured.extend(rates_4p([5.0e-19, 5.7e-19, 6.0e-19, 5.3e-19, 5.5e-19], Fixed(0.3)));
        Quencher { gas: "C2H2", optical_gas: "C2H2", radius: 165.0e-10, measured, estimated: Yield }
    };

    let cf4 = {
        let mut measured = vec![
            rate(&[Ar1S5], 0.33e-19, NonIonising),
            rate(&[Ar1S3], 0.26e-19, NonIonising),
        ];
        measured.extend(rates_4p([1.7e-19, 1.7e-19, 1.6e-19, 2.2e-19, 1.8e-19], NonIonising));
        Quencher {
            gas: "CF4",
            optical_gas: "CF4",
            radius: 235.0e-10,
            measured,
            estimated: NonIonising,
        }
    };

    vec![co2, ch4, c2h6, ic4h10, c2h2, cf4]
});
