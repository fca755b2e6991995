// src/data.rs
// Static lookup tables for gas species. The numeric identifiers are shared
// with external cross-section databases and must not be renumbered.
use crate::error::{GasError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Map from gas name to the numeric identifier used by cross-section providers.
///
/// Several names may share a number (e.g. `"He"` and `"He-4"`). Identifiers
/// 45-49 are unassigned.
pub static GAS_NUMBERS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("CF4", 1);
    m.insert("Ar", 2);
    m.insert("He", 3);
    m.insert("He-4", 3);
    m.insert("He-3", 4);
    m.insert("Ne", 5);
    m.insert("Kr", 6);
    m.insert("Xe", 7);
    m.insert("CH4", 8);
    m.insert("C2H6", 9);
    m.insert("C3H8", 10);
    m.insert("iC4H10", 11);
    m.insert("CO2", 12);
    m.insert("neoC5H12", 13);
    m.insert("H2O", 14);
    m.insert("O2", 15);
    m.insert("N2", 16);
    m.insert("NO", 17);
    m.insert("N2O", 18);
    m.insert("C2H4", 19);
    m.insert("C2H2", 20);
    m.insert("H2", 21);
    m.insert("D2", 22);
    m.insert("CO", 23);
    m.insert("Methylal", 24);
    m.insert("DME", 25);
    m.insert("Reid-Step", 26);
    m.insert("Maxwell-Model", 27);
    m.insert("Reid-Ramp", 28);
    m.insert("C2F6", 29);
    m.insert("SF6", 30);
    m.insert("NH3", 31);
    m.insert("C3H6", 32);
    m.insert("cC3H6", 33);
    m.insert("CH3OH", 34);
    m.insert("C2H5OH", 35);
    m.insert("C3H7OH", 36);
    m.insert("Cs", 37);
    m.insert("F2", 38);
    m.insert("CS2", 39);
    m.insert("COS", 40);
    m.insert("CD4", 41);
    m.insert("BF3", 42);
    m.insert("C2HF5", 43);
    m.insert("C2H2F4", 43);
    m.insert("TMA", 44);
    m.insert("CHF3", 50);
    m.insert("CF3Br", 51);
    m.insert("C3F8", 52);
    m.insert("O3", 53);
    m.insert("Hg", 54);
    m.insert("H2S", 55);
    m.insert("nC4H10", 56);
    m.insert("nC5H12", 57);
    m.insert("N2 (Phelps)", 58);
    m.insert("GeH4", 59);
    m.insert("SiH4", 60);
    m
});

/// Look up the numeric identifier of a gas.
pub fn gas_number(name: &str) -> Result<u32> {
    if name.is_empty() {
        return Err(GasError::UnknownGas("(empty name)".to_string()));
    }
    GAS_NUMBERS
        .get(name)
        .copied()
        .ok_or_else(|| GasError::UnknownGas(name.to_string()))
}

/// Green-Sawada fit of the secondary electron energy distribution.
///
/// `gs` and `gb` describe the width `w(E) = gs E / (E + gb)`, `ts` and `ta`
/// the offset `ts - ta / (E + tb)`; `tb` is twice the ionisation potential and
/// is filled in when the collision table is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreenSawadaFit {
    pub gs: f64,
    pub gb: f64,
    pub ts: f64,
    pub ta: f64,
}

/// Green-Sawada parameters keyed by gas name.
pub static GREEN_SAWADA: Lazy<HashMap<&'static str, GreenSawadaFit>> = Lazy::new(|| {
    let fit = |gs: f64, gb: f64, ts: f64| GreenSawadaFit { gs, gb, ts, ta: 1000.0 };
    let mut m = HashMap::new();
    m.insert("He", fit(15.5, 24.5, -2.25));
    m.insert("He-4", fit(15.5, 24.5, -2.25));
    m.insert("He-3", fit(15.5, 24.5, -2.25));
    m.insert("Ne", fit(24.3, 21.6, -6.49));
    m.insert("Ar", fit(6.92, 7.85, 6.87));
    m.insert("Kr", fit(7.95, 13.5, 3.90));
    m.insert("Xe", fit(7.93, 11.5, 3.81));
    m.insert("H2", fit(7.07, 7.7, 1.87));
    m.insert("D2", fit(7.07, 7.7, 1.87));
    m.insert("N2", fit(13.8, 15.6, 4.71));
    m.insert("O2", fit(18.5, 12.1, 1.86));
    m.insert("CH4", fit(7.06, 12.5, 3.45));
    m.insert("H2O", fit(12.8, 12.6, 1.28));
    m.insert("CO", fit(13.3, 14.0, 2.03));
    m.insert("C2H2", fit(9.28, 5.8, 1.37));
    m.insert("NO", fit(10.4, 9.5, -4.30));
    m.insert("CO2", fit(12.3, 13.8, -2.46));
    m
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_numbers() {
        assert_eq!(gas_number("Ar").unwrap(), 2);
        assert_eq!(gas_number("CH4").unwrap(), 8);
        assert_eq!(gas_number("He").unwrap(), gas_number("He-4").unwrap());
        assert_eq!(gas_number("C2HF5").unwrap(), 43);
        assert_eq!(gas_number("N2 (Phelps)").unwrap(), 58);
        assert_eq!(gas_number("SiH4").unwrap(), 60);
    }

    #[test]
    fn test_unknown_gas_is_error() {
        assert!(matches!(gas_number("Ar2"), Err(GasError::UnknownGas(_))));
        assert!(matches!(gas_number(""), Err(GasError::UnknownGas(_))));
    }

    #[test]
    fn test_numbers_are_unique_per_species() {
        let mut by_number: HashMap<u32, Vec<&str>> = HashMap::new();
        for (name, number) in GAS_NUMBERS.iter() {
            by_number.entry(*number).or_default().push(name);
        }
        for (number, names) in by_number {
            if names.len() > 1 {
                assert!(
                    matches!(number, 3 | 43),
                    "unexpected alias for gas number {}: {:?}",
                    number,
                    names
                );
            }
        }
    }

    #[test]
    fn test_green_sawada_argon() {
        let fit = GREEN_SAWADA.get("Ar").unwrap();
        assert_eq!(fit.gs, 6.92);
        assert_eq!(fit.ta, 1000.0);
        assert!(GREEN_SAWADA.get("CF4").is_none());
    }
}
