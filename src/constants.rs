// Physical constants in the unit system used by the collision tables:
// energies in eV, lengths in cm, times in ns, masses as rest energies in eV
// unless noted otherwise.

pub const PI: f64 = std::f64::consts::PI;
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;
pub const PI_SQUARED: f64 = PI * PI;

/// Speed of light [cm/ns]
pub const SPEED_OF_LIGHT: f64 = 29.9792458;
/// Electron rest energy [eV]
pub const ELECTRON_MASS: f64 = 510998.95;
/// Electron mass [g]
pub const ELECTRON_MASS_GRAMME: f64 = 9.1093837015e-28;
/// Atomic mass unit [g]
pub const ATOMIC_MASS_UNIT: f64 = 1.66053906660e-24;
/// Reduced Planck constant times c [eV cm]
pub const HBAR_C: f64 = 197.3269804e-7;
pub const FINE_STRUCTURE_CONSTANT: f64 = 1.0 / 137.035999084;
/// Bohr radius [cm]
pub const BOHR_RADIUS: f64 = HBAR_C / (FINE_STRUCTURE_CONSTANT * ELECTRON_MASS);
/// Rydberg energy [eV]
pub const RYDBERG_ENERGY: f64 = 13.605693122994;
/// Boltzmann constant [eV/K]
pub const BOLTZMANN: f64 = 8.617333262e-5;
/// Number density of an ideal gas at 0 C and 1 atm [cm-3]
pub const LOSCHMIDT_NUMBER: f64 = 2.6867811e19;
/// [Torr]
pub const ATMOSPHERIC_PRESSURE: f64 = 760.0;
/// [K]
pub const ZERO_CELSIUS: f64 = 273.15;

/// Floor used wherever an energy, probability or argument must stay positive.
pub const SMALL: f64 = 1.0e-20;

/// Number of gas components a mixture can hold.
pub const MAX_GASES: usize = 6;
/// Capacity of the collision level list.
pub const MAX_LEVELS: usize = 512;
