// Argon excited states: spectroscopic labels, radiative transitions and
// argon-argon collisional transfer.
//
// Radiative rates [ns-1] are from the NIST Atomic Spectra Database, with lines
// missing there from Zatsarinny and Bartschat, J. Phys. B 39 (2006) 2145.
// Oscillator strengths not in NIST are from Berkowitz (2002) and Lee and Lu,
// Phys. Rev. A 8 (1973) 1241. Collisional rate constants are in cm3 ns-1
// (two-body) or cm6 ns-1 (three-body).
use super::ChannelKind;

/// Excited states of argon in Paschen notation, in order of increasing
/// excitation energy, followed by the molecular sink states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArgonLevel {
    Ar1S5,
    Ar1S4,
    Ar1S3,
    Ar1S2,
    Ar2P10,
    Ar2P9,
    Ar2P8,
    Ar2P7,
    Ar2P6,
    Ar2P5,
    Ar2P4,
    Ar2P3,
    Ar2P2,
    Ar2P1,
    Ar3D6,
    Ar3D5,
    Ar3D3,
    Ar3D4p,
    Ar3D4,
    Ar3D1pp,
    Ar2S5,
    Ar2S4,
    Ar3D1p,
    Ar3D2,
    Ar3S1pppp,
    Ar3S1pp,
    Ar3S1ppp,
    Ar2S3,
    Ar2S2,
    Ar3S1p,
    Ar4D5,
    Ar3S4,
    Ar4D2,
    Ar4S1p,
    Ar3S2,
    Ar5D5,
    Ar4S4,
    Ar5D2,
    Ar6D5,
    Ar5S1p,
    Ar4S2,
    Ar5S4,
    Ar6D2,
    /// Sum of the higher J = 1 states
    Higher,
    /// Ground state of the Ar2 molecular ion (Hornbeck-Molnar product)
    Dimer,
    /// Excimer formed in three-body collisions
    Excimer,
}

/// Energy [eV] of the molecular sink states.
pub const MOLECULAR_ENERGY: f64 = 14.71;

const LEVELS_4S: [ArgonLevel; 4] = [
    ArgonLevel::Ar1S5,
    ArgonLevel::Ar1S4,
    ArgonLevel::Ar1S3,
    ArgonLevel::Ar1S2,
];

const LEVELS_4P: [ArgonLevel; 10] = [
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

/// Non-resonant 3d levels (quenched via the hard-sphere estimate)
pub const NON_RESONANT_3D: [ArgonLevel; 9] = [
    ArgonLevel::Ar3D6,
    ArgonLevel::Ar3D3,
    ArgonLevel::Ar3D4p,
    ArgonLevel::Ar3D4,
    ArgonLevel::Ar3D1pp,
    ArgonLevel::Ar3D1p,
    ArgonLevel::Ar3S1pppp,
    ArgonLevel::Ar3S1pp,
    ArgonLevel::Ar3S1ppp,
];

/// Non-resonant 5s levels (quenched via the hard-sphere estimate)
pub const NON_RESONANT_5S: [ArgonLevel; 2] = [ArgonLevel::Ar2S5, ArgonLevel::Ar2S3];

/// Collision radius [cm] of 3d states for the hard-sphere estimate
pub const RADIUS_3D: f64 = 436.0e-10;
/// Collision radius [cm] of 5s states for the hard-sphere estimate
pub const RADIUS_5S: f64 = 635.0e-10;

/// A transition listed in the radiative table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Decay to another excited state with the given rate [ns-1]
    To(ArgonLevel, f64),
    /// Decay to the ground state with the given rate [ns-1]
    Ground(f64),
    /// Decay to the ground state with the rate derived from the oscillator strength
    GroundFromOscillatorStrength,
}

/// Radiative data of one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelData {
    pub oscillator_strength: f64,
    /// Channel type of all transitions in the list
    pub kind: ChannelKind,
    pub transitions: &'static [Transition],
}

/// Collisional transfer from one argon state to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    pub to: ArgonLevel,
    /// Rate constant; multiplied by n_Ar (two-body) or n_Ar^2 (three-body)
    pub k: f64,
    pub three_body: bool,
    pub kind: ChannelKind,
}

impl Transfer {
    fn two_body(to: ArgonLevel, k: f64) -> Self {
        Transfer { to, k, three_body: false, kind: ChannelKind::CollisionalNonIonising }
    }

    /// Rate [ns-1] at argon density `n_ar` [cm-3].
    pub fn rate(&self, n_ar: f64) -> f64 {
        if self.three_body {
            self.k * n_ar * n_ar
        } else {
            self.k * n_ar
        }
    }
}

impl ArgonLevel {
    /// All states carried by an excitation cross-section (excludes the
    /// molecular sink states).
    pub const EXCITED: [ArgonLevel; 44] = {
        use ArgonLevel::*;
        [
            Ar1S5, Ar1S4, Ar1S3, Ar1S2, Ar2P10, Ar2P9, Ar2P8, Ar2P7, Ar2P6, Ar2P5, Ar2P4,
            Ar2P3, Ar2P2, Ar2P1, Ar3D6, Ar3D5, Ar3D3, Ar3D4p, Ar3D4, Ar3D1pp, Ar2S5, Ar2S4,
            Ar3D1p, Ar3D2, Ar3S1pppp, Ar3S1pp, Ar3S1ppp, Ar2S3, Ar2S2, Ar3S1p, Ar4D5, Ar3S4,
            Ar4D2, Ar4S1p, Ar3S2, Ar5D5, Ar4S4, Ar5D2, Ar6D5, Ar5S1p, Ar4S2, Ar5S4, Ar6D2,
            Higher,
        ]
    };

    /// Level name as used in cross-section descriptions (seven characters,
    /// space padded, starting at column 5 of the description).
    pub fn magboltz_code(self) -> &'static str {
        use ArgonLevel::*;
        match self {
            Ar1S5 => "1S5    ",
            Ar1S4 => "1S4    ",
            Ar1S3 => "1S3    ",
            Ar1S2 => "1S2    ",
            Ar2P10 => "2P10   ",
            Ar2P9 => "2P9    ",
            Ar2P8 => "2P8    ",
            Ar2P7 => "2P7    ",
            Ar2P6 => "2P6    ",
            Ar2P5 => "2P5    ",
            Ar2P4 => "2P4    ",
            Ar2P3 => "2P3    ",
            Ar2P2 => "2P2    ",
            Ar2P1 => "2P1    ",
            Ar3D6 => "3D6    ",
            Ar3D5 => "3D5    ",
            Ar3D3 => "3D3    ",
            Ar3D4p => "3D4!   ",
            Ar3D4 => "3D4    ",
            Ar3D1pp => "3D1!!  ",
            Ar2S5 => "2S5    ",
            Ar2S4 => "2S4    ",
            Ar3D1p => "3D1!   ",
            Ar3D2 => "3D2    ",
            Ar3S1pppp => "3S1!!!!",
            Ar3S1pp => "3S1!!  ",
            Ar3S1ppp => "3S1!!! ",
            Ar2S3 => "2S3    ",
            Ar2S2 => "2S2    ",
            Ar3S1p => "3S1!   ",
            Ar4D5 => "4D5    ",
            Ar3S4 => "3S4    ",
            Ar4D2 => "4D2    ",
            Ar4S1p => "4S1!   ",
            Ar3S2 => "3S2    ",
            Ar5D5 => "5D5    ",
            Ar4S4 => "4S4    ",
            Ar5D2 => "5D2    ",
            Ar6D5 => "6D5    ",
            Ar5S1p => "5S1!   ",
            Ar4S2 => "4S2    ",
            Ar5S4 => "5S4    ",
            Ar6D2 => "6D2    ",
            Higher => "HIGH   ",
            Dimer => "DIMER  ",
            Excimer => "EXCIMER",
        }
    }

    /// Resolve the level name found in a cross-section description.
    pub fn from_description(description: &str) -> Option<ArgonLevel> {
        let code: String = description.chars().skip(5).take(7).collect();
        let code = code.trim_end();
        ArgonLevel::EXCITED
            .iter()
            .copied()
            .find(|level| level.magboltz_code().trim_end() == code)
    }

    pub fn label(self) -> String {
        match self {
            ArgonLevel::Higher => "Ar_Higher".to_string(),
            ArgonLevel::Dimer => "Ar_Dimer".to_string(),
            ArgonLevel::Excimer => "Ar_Excimer".to_string(),
            level => format!("Ar_{}", level.magboltz_code().trim_end()),
        }
    }

    /// Radiative transitions and oscillator strength.
    pub fn radiative_data(self) -> LevelData {
        use ArgonLevel::*;
        use Transition::{Ground, GroundFromOscillatorStrength as GroundOsc, To};
        let rad = |osc: f64, transitions: &'static [Transition]| LevelData {
            oscillator_strength: osc,
            kind: ChannelKind::Radiative,
            transitions,
        };
        match self {
            // Metastables and molecular states
            Ar1S5 | Ar1S3 | Dimer | Excimer => rad(0.0, &[]),
            Ar1S4 => rad(0.0609, &[Ground(0.119)]),
            Ar1S2 => rad(0.25, &[Ground(0.51)]),
            Ar2P10 => rad(
                0.0,
                &[To(Ar1S5, 0.0189), To(Ar1S4, 5.43e-3), To(Ar1S3, 9.8e-4), To(Ar1S2, 1.9e-4)],
            ),
            Ar2P9 => rad(0.0, &[To(Ar1S5, 0.0331)]),
            Ar2P8 => rad(0.0, &[To(Ar1S5, 9.28e-3), To(Ar1S4, 0.0215), To(Ar1S2, 1.47e-3)]),
            Ar2P7 => rad(
                0.0,
                &[To(Ar1S5, 5.18e-3), To(Ar1S4, 0.025), To(Ar1S3, 2.43e-3), To(Ar1S2, 1.06e-3)],
            ),
            Ar2P6 => rad(0.0, &[To(Ar1S5, 0.0245), To(Ar1S4, 4.9e-3), To(Ar1S2, 5.03e-3)]),
            Ar2P5 => rad(0.0, &[To(Ar1S4, 0.0402)]),
            Ar2P4 => rad(
                0.0,
                &[To(Ar1S5, 6.25e-4), To(Ar1S4, 2.2e-5), To(Ar1S3, 0.0186), To(Ar1S2, 0.0139)],
            ),
            Ar2P3 => rad(0.0, &[To(Ar1S5, 3.8e-3), To(Ar1S4, 8.47e-3), To(Ar1S2, 0.0223)]),
            Ar2P2 => rad(
                0.0,
                &[To(Ar1S5, 6.39e-3), To(Ar1S4, 1.83e-3), To(Ar1S3, 0.0117), To(Ar1S2, 0.0153)],
            ),
            Ar2P1 => rad(0.0, &[To(Ar1S4, 2.36e-4), To(Ar1S2, 0.0445)]),
            Ar3D6 => rad(
                0.0,
                &[To(Ar2P10, 8.1e-3), To(Ar2P7, 7.73e-4), To(Ar2P4, 1.2e-4), To(Ar2P2, 3.6e-4)],
            ),
            Ar3D5 => rad(
                0.0011,
                &[
                    To(Ar2P10, 7.4e-3),
                    To(Ar2P8, 3.9e-5),
                    To(Ar2P7, 3.09e-4),
                    To(Ar2P6, 1.37e-3),
                    To(Ar2P5, 5.75e-4),
                    To(Ar2P4, 3.2e-5),
                    To(Ar2P3, 1.4e-4),
                    To(Ar2P2, 1.7e-4),
                    To(Ar2P1, 2.49e-6),
                    GroundOsc,
                ],
            ),
            Ar3D3 => rad(
                0.0,
                &[
                    To(Ar2P10, 4.9e-3),
                    To(Ar2P9, 9.82e-5),
                    To(Ar2P8, 1.2e-4),
                    To(Ar2P7, 2.6e-4),
                    To(Ar2P6, 2.5e-3),
                    To(Ar2P4, 9.41e-5),
                    To(Ar2P3, 3.9e-4),
                    To(Ar2P2, 1.1e-4),
                ],
            ),
            Ar3D4p => rad(0.0, &[To(Ar2P9, 0.01593)]),
            Ar3D4 => rad(
                0.0,
                &[To(Ar2P9, 2.29e-3), To(Ar2P8, 0.011), To(Ar2P6, 8.8e-5), To(Ar2P3, 2.53e-6)],
            ),
            Ar3D1pp => rad(
                0.0,
                &[
                    To(Ar2P10, 5.85e-6),
                    To(Ar2P9, 1.2e-4),
                    To(Ar2P8, 5.7e-3),
                    To(Ar2P7, 7.3e-3),
                    To(Ar2P6, 2.0e-4),
                    To(Ar2P4, 1.54e-6),
                    To(Ar2P3, 2.08e-5),
                    To(Ar2P2, 6.75e-7),
                ],
            ),
            Ar2S5 => rad(
                0.0,
                &[
                    To(Ar2P10, 4.9e-3),
                    To(Ar2P9, 0.011),
                    To(Ar2P8, 1.1e-3),
                    To(Ar2P7, 4.6e-4),
                    To(Ar2P6, 3.3e-3),
                    To(Ar2P4, 5.9e-5),
                    To(Ar2P3, 1.2e-4),
                    To(Ar2P2, 3.1e-4),
                ],
            ),
            Ar2S4 => rad(
                0.027,
                &[
                    Ground(0.077),
                    To(Ar2P10, 2.44e-3),
                    To(Ar2P8, 8.9e-3),
                    To(Ar2P7, 4.6e-3),
                    To(Ar2P6, 2.7e-3),
                    To(Ar2P5, 1.3e-3),
                    To(Ar2P4, 4.5e-4),
                    To(Ar2P3, 2.9e-5),
                    To(Ar2P2, 3.0e-5),
                    To(Ar2P1, 1.6e-4),
                ],
            ),
            Ar3D1p => rad(
                0.0,
                &[To(Ar2P9, 3.1e-3), To(Ar2P8, 2.0e-3), To(Ar2P6, 0.015), To(Ar2P3, 9.8e-6)],
            ),
            Ar3D2 => rad(
                0.0932,
                &[
                    Ground(0.27),
                    To(Ar2P10, 1.35e-5),
                    To(Ar2P8, 9.52e-4),
                    To(Ar2P7, 0.011),
                    To(Ar2P6, 4.01e-5),
                    To(Ar2P5, 4.3e-3),
                    To(Ar2P4, 8.96e-4),
                    To(Ar2P3, 4.45e-5),
                    To(Ar2P2, 5.87e-5),
                    To(Ar2P1, 8.77e-4),
                ],
            ),
            Ar3S1pppp => rad(
                0.0,
                &[
                    To(Ar2P10, 7.51e-6),
                    To(Ar2P9, 4.3e-5),
                    To(Ar2P8, 8.3e-4),
                    To(Ar2P7, 5.01e-5),
                    To(Ar2P6, 2.09e-4),
                    To(Ar2P4, 0.013),
                    To(Ar2P3, 2.2e-3),
                    To(Ar2P2, 3.35e-6),
                ],
            ),
            Ar3S1pp => rad(
                0.0,
                &[
                    To(Ar2P10, 1.89e-4),
                    To(Ar2P9, 1.52e-4),
                    To(Ar2P8, 7.21e-4),
                    To(Ar2P7, 3.69e-4),
                    To(Ar2P6, 3.76e-3),
                    To(Ar2P4, 1.72e-4),
                    To(Ar2P3, 5.8e-4),
                    To(Ar2P2, 6.2e-3),
                ],
            ),
            Ar3S1ppp => rad(
                0.0,
                &[To(Ar2P9, 7.36e-4), To(Ar2P8, 4.2e-5), To(Ar2P6, 9.3e-5), To(Ar2P3, 0.015)],
            ),
            Ar2S3 => rad(
                0.0,
                &[To(Ar2P10, 3.26e-3), To(Ar2P7, 2.22e-3), To(Ar2P4, 0.01), To(Ar2P2, 5.1e-3)],
            ),
            Ar2S2 => rad(
                0.0119,
                &[
                    Ground(0.035),
                    To(Ar2P10, 1.76e-3),
                    To(Ar2P8, 2.1e-4),
                    To(Ar2P7, 2.8e-4),
                    To(Ar2P6, 1.39e-3),
                    To(Ar2P5, 3.8e-4),
                    To(Ar2P4, 2.0e-3),
                    To(Ar2P3, 8.9e-3),
                    To(Ar2P2, 3.4e-3),
                    To(Ar2P1, 1.9e-3),
                ],
            ),
            Ar3S1p => rad(
                0.106,
                &[
                    Ground(0.313),
                    To(Ar2P10, 2.05e-5),
                    To(Ar2P8, 8.33e-5),
                    To(Ar2P7, 3.9e-4),
                    To(Ar2P6, 3.96e-4),
                    To(Ar2P5, 4.2e-4),
                    To(Ar2P4, 4.5e-3),
                    To(Ar2P3, 4.84e-5),
                    To(Ar2P2, 7.1e-3),
                    To(Ar2P1, 5.2e-3),
                ],
            ),
            Ar4D5 => rad(
                0.0019,
                &[
                    To(Ar2P10, 2.78e-3),
                    To(Ar2P8, 2.8e-4),
                    To(Ar2P6, 8.6e-4),
                    To(Ar2P5, 9.2e-4),
                    To(Ar2P3, 4.6e-4),
                    To(Ar2P2, 1.6e-4),
                    GroundOsc,
                ],
            ),
            Ar3S4 => rad(
                0.0144,
                &[
                    To(Ar2P10, 4.21e-4),
                    To(Ar2P8, 2.0e-3),
                    To(Ar2P7, 1.7e-3),
                    To(Ar2P6, 7.2e-4),
                    To(Ar2P5, 3.5e-4),
                    To(Ar2P4, 1.2e-4),
                    To(Ar2P3, 4.2e-6),
                    To(Ar2P2, 3.3e-5),
                    To(Ar2P1, 9.7e-5),
                    GroundOsc,
                ],
            ),
            Ar4D2 => rad(0.048, &[To(Ar2P7, 1.7e-4), GroundOsc]),
            Ar4S1p => rad(
                0.0209,
                &[
                    To(Ar2P10, 1.05e-3),
                    To(Ar2P8, 3.1e-5),
                    To(Ar2P7, 2.5e-5),
                    To(Ar2P6, 4.0e-4),
                    To(Ar2P5, 5.8e-5),
                    To(Ar2P3, 1.2e-4),
                    GroundOsc,
                ],
            ),
            Ar3S2 => rad(
                0.0221,
                &[
                    To(Ar2P10, 2.85e-4),
                    To(Ar2P8, 5.1e-5),
                    To(Ar2P7, 5.3e-5),
                    To(Ar2P6, 1.6e-4),
                    To(Ar2P5, 1.5e-4),
                    To(Ar2P4, 6.0e-4),
                    To(Ar2P3, 2.48e-3),
                    To(Ar2P2, 9.6e-4),
                    To(Ar2P1, 3.59e-4),
                    GroundOsc,
                ],
            ),
            Ar5D5 => rad(
                0.0041,
                &[
                    To(Ar2P10, 2.2e-3),
                    To(Ar2P8, 1.1e-4),
                    To(Ar2P7, 7.6e-5),
                    To(Ar2P6, 4.2e-4),
                    To(Ar2P5, 2.4e-4),
                    To(Ar2P4, 2.1e-4),
                    To(Ar2P3, 2.4e-4),
                    To(Ar2P2, 1.2e-4),
                    GroundOsc,
                ],
            ),
            Ar4S4 => rad(
                0.0139,
                &[
                    To(Ar2P10, 1.9e-4),
                    To(Ar2P8, 1.1e-3),
                    To(Ar2P7, 5.2e-4),
                    To(Ar2P6, 5.1e-4),
                    To(Ar2P5, 9.4e-5),
                    To(Ar2P4, 5.4e-5),
                    GroundOsc,
                ],
            ),
            Ar5D2 => rad(
                0.0426,
                &[To(Ar2P8, 5.9e-5), To(Ar2P7, 9.0e-6), To(Ar2P5, 1.5e-4), To(Ar2P2, 3.1e-5), GroundOsc],
            ),
            Ar6D5 => rad(
                0.00075,
                &[
                    To(Ar2P10, 1.9e-3),
                    To(Ar2P6, 4.2e-4),
                    To(Ar2P5, 3.0e-4),
                    To(Ar2P4, 5.1e-5),
                    To(Ar2P3, 6.6e-5),
                    To(Ar2P1, 1.21e-4),
                    GroundOsc,
                ],
            ),
            Ar5S1p => rad(0.00051, &[To(Ar2P5, 7.7e-5), GroundOsc]),
            Ar4S2 => rad(
                0.00074,
                &[
                    To(Ar2P10, 4.5e-4),
                    To(Ar2P8, 2.0e-4),
                    To(Ar2P7, 2.1e-4),
                    To(Ar2P5, 1.2e-4),
                    To(Ar2P4, 1.8e-4),
                    To(Ar2P3, 9.0e-4),
                    To(Ar2P2, 3.3e-4),
                    GroundOsc,
                ],
            ),
            Ar5S4 => rad(
                0.0211,
                &[
                    To(Ar2P8, 3.6e-4),
                    To(Ar2P6, 1.2e-4),
                    To(Ar2P4, 1.5e-4),
                    To(Ar2P3, 1.4e-4),
                    To(Ar2P2, 7.5e-5),
                    GroundOsc,
                ],
            ),
            Ar6D2 => rad(0.0574, &[To(Ar2P7, 3.33e-3), GroundOsc]),
            // Spread evenly over the five nearest levels below.
            Higher => LevelData {
                oscillator_strength: 0.0,
                kind: ChannelKind::CollisionalNonIonising,
                transitions: &[
                    To(Ar6D5, 100.0),
                    To(Ar5S1p, 100.0),
                    To(Ar4S2, 100.0),
                    To(Ar5S4, 100.0),
                    To(Ar6D2, 100.0),
                ],
            },
        }
    }

    /// Collisions with ground-state argon atoms.
    ///
    /// Three-body excimer formation and 1s mixing from Kolts and Setser,
    /// J. Chem. Phys. 68 (1978) 4848; 4p to 4s transfer from Chang and
    /// Setser, J. Chem. Phys. 69 (1978) 3885, and Sadeghi et al., J. Chem.
    /// Phys. 115 (2001) 3144; transfer within 4p from Nguyen and Sadeghi,
    /// Phys. Rev. 18 (1978) 1388. The 3d/5s to 4p constant is an order of
    /// magnitude guess; Hornbeck-Molnar from Becker and Lampe, J. Chem. Phys.
    /// 42 (1965) 3857.
    pub fn argon_transfers(self) -> Vec<Transfer> {
        use ArgonLevel::*;
        let to_4s = |k4s: f64| LEVELS_4S.iter().map(move |&to| Transfer::two_body(to, 0.25 * k4s));
        let within_4p = |list: &[(ArgonLevel, f64)]| {
            list.iter()
                .map(|&(to, k)| Transfer::two_body(to, k * 1.0e-21))
                .collect::<Vec<_>>()
        };
        let to_4p = || LEVELS_4P.iter().map(|&to| Transfer::two_body(to, 0.1 * 1.0e-20));
        let excimer = |k3b: f64| Transfer {
            to: Excimer,
            k: k3b,
            three_body: true,
            kind: ChannelKind::CollisionalNonIonising,
        };
        match self {
            Ar1S5 => vec![excimer(1.1e-41), Transfer::two_body(Ar1S4, 2.1e-24)],
            Ar1S3 => vec![excimer(0.83e-41), Transfer::two_body(Ar1S4, 5.3e-24)],
            Ar2P1 => to_4s(1.6e-20).collect(),
            Ar2P2 => {
                let mut v = within_4p(&[(Ar2P3, 0.5)]);
                v.extend(to_4s(5.3e-20));
                v
            }
            Ar2P3 => {
                let mut v = within_4p(&[
                    (Ar2P4, 27.5),
                    (Ar2P5, 0.3),
                    (Ar2P6, 44.0),
                    (Ar2P7, 1.4),
                    (Ar2P8, 1.9),
                    (Ar2P9, 0.8),
                ]);
                v.extend(to_4s(4.7e-20));
                v
            }
            Ar2P4 => {
                let mut v = within_4p(&[
                    (Ar2P3, 23.0),
                    (Ar2P5, 0.7),
                    (Ar2P6, 4.8),
                    (Ar2P7, 3.2),
                    (Ar2P8, 1.4),
                    (Ar2P9, 3.3),
                ]);
                v.extend(to_4s(3.9e-20));
                v
            }
            Ar2P5 => within_4p(&[(Ar2P4, 1.7), (Ar2P6, 11.3), (Ar2P8, 9.5)]),
            Ar2P6 => within_4p(&[(Ar2P7, 4.1), (Ar2P8, 6.0), (Ar2P9, 1.0)]),
            Ar2P7 => {
                let mut v = within_4p(&[(Ar2P6, 2.5), (Ar2P8, 14.3), (Ar2P9, 23.3)]);
                v.extend(to_4s(5.5e-20));
                v
            }
            Ar2P8 => {
                let mut v = within_4p(&[(Ar2P6, 0.3), (Ar2P7, 0.8), (Ar2P9, 18.2), (Ar2P10, 1.0)]);
                v.extend(to_4s(3.0e-20));
                v
            }
            Ar2P9 => {
                let mut v = within_4p(&[(Ar2P8, 6.8), (Ar2P10, 5.1)]);
                v.extend(to_4s(3.5e-20));
                v
            }
            Ar2P10 => to_4s(2.0e-20).collect(),
            Ar3D6 | Ar3D5 | Ar3D3 | Ar3D4p | Ar3D4 | Ar3D1pp | Ar3D1p | Ar3D2 | Ar3S1pppp
            | Ar3S1pp | Ar3S1ppp | Ar3S1p | Ar2S5 | Ar2S4 | Ar2S3 | Ar2S2 => to_4p().collect(),
            Ar4D5 | Ar3S4 | Ar4D2 | Ar4S1p | Ar3S2 | Ar5D5 | Ar4S4 | Ar5D2 | Ar6D5 | Ar5S1p
            | Ar4S2 | Ar5S4 | Ar6D2 => {
                let mut v: Vec<Transfer> = to_4p().collect();
                // Hornbeck-Molnar associative ionisation; the magnitude of
                // this constant has not been confirmed.
                v.push(Transfer {
                    to: Dimer,
                    k: 2.0e-18,
                    three_body: false,
                    kind: ChannelKind::CollisionalIonising,
                });
                v
            }
            Ar1S4 | Ar1S2 | Higher | Dimer | Excimer => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_round_trip() {
        for level in ArgonLevel::EXCITED {
            let description = format!(" EXC {}", level.magboltz_code());
            assert_eq!(ArgonLevel::from_description(&description), Some(level));
        }
        assert_eq!(ArgonLevel::from_description(" EXC 9X9    "), None);
        assert_eq!(ArgonLevel::from_description("EX"), None);
    }

    #[test]
    fn test_codes_unique_and_seven_wide() {
        let mut seen = HashSet::new();
        for level in ArgonLevel::EXCITED {
            let code = level.magboltz_code();
            assert_eq!(code.len(), 7, "{:?}", level);
            assert!(seen.insert(code));
        }
        assert_eq!(seen.len(), 44);
    }

    #[test]
    fn test_primes_distinguished() {
        assert_eq!(ArgonLevel::from_description(" EXC 3D4!   "), Some(ArgonLevel::Ar3D4p));
        assert_eq!(ArgonLevel::from_description(" EXC 3D4    "), Some(ArgonLevel::Ar3D4));
        assert_eq!(ArgonLevel::from_description(" EXC 3S1!!! "), Some(ArgonLevel::Ar3S1ppp));
        assert_eq!(ArgonLevel::Ar3S1pppp.label(), "Ar_3S1!!!!");
        assert_eq!(ArgonLevel::Higher.label(), "Ar_Higher");
    }

    #[test]
    fn test_radiative_table_is_acyclic() {
        // Every listed transition goes to a level lower in the energy order,
        // so a radiative cascade can never revisit a level.
        for level in ArgonLevel::EXCITED {
            for transition in level.radiative_data().transitions {
                if let Transition::To(to, rate) = *transition {
                    assert!(to < level, "{:?} -> {:?}", level, to);
                    assert!(rate > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_ground_from_oscillator_strength_has_strength() {
        for level in ArgonLevel::EXCITED {
            let data = level.radiative_data();
            let uses_osc = data
                .transitions
                .iter()
                .any(|t| matches!(t, Transition::GroundFromOscillatorStrength));
            if uses_osc {
                assert!(data.oscillator_strength > 0.0, "{:?}", level);
            }
        }
    }

    #[test]
    fn test_transfers() {
        assert_eq!(ArgonLevel::Ar1S5.argon_transfers().len(), 2);
        assert!(ArgonLevel::Ar1S5.argon_transfers()[0].three_body);
        assert_eq!(ArgonLevel::Ar2P3.argon_transfers().len(), 10);
        assert_eq!(ArgonLevel::Ar2P5.argon_transfers().len(), 3);
        let hm = ArgonLevel::Ar6D2.argon_transfers();
        assert_eq!(hm.len(), 11);
        assert_eq!(hm[10].to, ArgonLevel::Dimer);
        assert_eq!(hm[10].kind, ChannelKind::CollisionalIonising);
        assert!(ArgonLevel::Higher.argon_transfers().is_empty());
        let n = 2.5e19;
        let t = ArgonLevel::Ar1S5.argon_transfers()[0];
        assert_eq!(t.rate(n), 1.1e-41 * n * n);
    }
}
