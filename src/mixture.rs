// Gas mixture composition and thermodynamic state
use crate::constants::{ATMOSPHERIC_PRESSURE, LOSCHMIDT_NUMBER, MAX_GASES, ZERO_CELSIUS};
use crate::data::gas_number;
use crate::error::{GasError, Result};
use serde::{Deserialize, Serialize};

/// One component of a gas mixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasComponent {
    pub name: String,
    /// Identifier passed to cross-section providers
    pub number: u32,
    /// Mole fraction (components of a mixture sum to 1)
    pub fraction: f64,
}

/// Composition, temperature [K] and pressure [Torr] of a gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasMixture {
    components: Vec<GasComponent>,
    temperature: f64,
    pressure: f64,
}

impl Default for GasMixture {
    fn default() -> Self {
        GasMixture {
            components: Vec::new(),
            temperature: 293.15,
            pressure: ATMOSPHERIC_PRESSURE,
        }
    }
}

impl GasMixture {
    /// Build a mixture from `(name, fraction)` pairs. Fractions are
    /// renormalised to sum to one.
    pub fn new(components: &[(&str, f64)]) -> Result<Self> {
        let mut mixture = GasMixture::default();
        mixture.set_composition(components)?;
        Ok(mixture)
    }

    pub fn set_composition(&mut self, components: &[(&str, f64)]) -> Result<()> {
        if components.is_empty() {
            return Err(GasError::Configuration("gas mixture has no components".into()));
        }
        if components.len() > MAX_GASES {
            return Err(GasError::Configuration(format!(
                "at most {} gas components are supported",
                MAX_GASES
            )));
        }
        let mut parsed = Vec::with_capacity(components.len());
        for &(name, fraction) in components {
            if !(fraction > 0.0) {
                return Err(GasError::Configuration(format!(
                    "fraction of {} must be positive (got {})",
                    name, fraction
                )));
            }
            if parsed.iter().any(|c: &GasComponent| c.name == name) {
                return Err(GasError::Configuration(format!("{} listed twice", name)));
            }
            parsed.push(GasComponent {
                name: name.to_string(),
                number: gas_number(name)?,
                fraction,
            });
        }
        let sum: f64 = parsed.iter().map(|c| c.fraction).sum();
        for c in parsed.iter_mut() {
            c.fraction /= sum;
        }
        self.components = parsed;
        Ok(())
    }

    pub fn components(&self) -> &[GasComponent] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Index of a component by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c.name == name)
    }

    /// Mole fraction of a component, zero if absent.
    pub fn fraction_of(&self, name: &str) -> f64 {
        self.index_of(name)
            .map(|i| self.components[i].fraction)
            .unwrap_or(0.0)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        if !(temperature > 0.0) {
            return Err(GasError::Configuration(format!(
                "temperature must be positive (got {} K)",
                temperature
            )));
        }
        self.temperature = temperature;
        Ok(())
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn set_pressure(&mut self, pressure: f64) -> Result<()> {
        if !(pressure > 0.0) {
            return Err(GasError::Configuration(format!(
                "pressure must be positive (got {} Torr)",
                pressure
            )));
        }
        self.pressure = pressure;
        Ok(())
    }

    /// Number density [cm-3] of the ideal gas.
    pub fn number_density(&self) -> f64 {
        LOSCHMIDT_NUMBER * (self.pressure / ATMOSPHERIC_PRESSURE) * (ZERO_CELSIUS / self.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fractions_normalised() {
        let mix = GasMixture::new(&[("Ar", 90.0), ("CH4", 10.0)]).unwrap();
        assert_eq!(mix.len(), 2);
        assert_relative_eq!(mix.fraction_of("Ar"), 0.9);
        assert_relative_eq!(mix.fraction_of("CH4"), 0.1);
        assert_eq!(mix.fraction_of("CO2"), 0.0);
        assert_eq!(mix.components()[1].number, 8);
    }

    #[test]
    fn test_invalid_compositions() {
        assert!(matches!(
            GasMixture::new(&[("Ar", 1.0), ("Unobtainium", 1.0)]),
            Err(GasError::UnknownGas(_))
        ));
        assert!(GasMixture::new(&[]).is_err());
        assert!(GasMixture::new(&[("Ar", 0.0)]).is_err());
        assert!(GasMixture::new(&[("Ar", 1.0), ("Ar", 1.0)]).is_err());
        let many = [
            ("Ar", 1.0),
            ("CH4", 1.0),
            ("CO2", 1.0),
            ("Ne", 1.0),
            ("He", 1.0),
            ("Xe", 1.0),
            ("Kr", 1.0),
        ];
        assert!(GasMixture::new(&many).is_err());
    }

    #[test]
    fn test_failed_update_keeps_previous_state() {
        let mut mix = GasMixture::new(&[("Ar", 1.0)]).unwrap();
        assert!(mix.set_composition(&[("Foo", 1.0)]).is_err());
        assert_eq!(mix.components()[0].name, "Ar");
        assert!(mix.set_temperature(-3.0).is_err());
        assert_eq!(mix.temperature(), 293.15);
    }

    #[test]
    fn test_number_density_scales_with_pressure() {
        let mut mix = GasMixture::new(&[("Ar", 1.0)]).unwrap();
        let n1 = mix.number_density();
        mix.set_pressure(2.0 * ATMOSPHERIC_PRESSURE).unwrap();
        assert_relative_eq!(mix.number_density(), 2.0 * n1);
    }
}
