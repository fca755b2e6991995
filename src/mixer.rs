// Mixing of per-gas cross-sections into the electron collision rate table
use crate::angular::AngularParameters;
use crate::constants::{ELECTRON_MASS, MAX_LEVELS, SMALL, SPEED_OF_LIGHT};
use crate::data::{gas_number, GREEN_SAWADA};
use crate::error::{GasError, Result};
use crate::level::{classify_inelastic, CollisionLevel, CollisionType, ScatteringModel};
use crate::mixture::GasMixture;
use crate::provider::{CrossSectionProvider, CrossSectionTerm, GasCrossSections, ProviderParameters};
use crate::rate_table::RateTable;
use crate::settings::Settings;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Energy above which the relativistic velocity is used [eV].
const RELATIVISTIC_THRESHOLD: f64 = 1.0e3;

/// Green-Sawada parameters of one gas, with `tb` set to twice its
/// ionisation potential.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreenSawadaParameters {
    pub gs: f64,
    pub gb: f64,
    pub ts: f64,
    pub ta: f64,
    pub tb: f64,
}

/// Per-gas quantities derived while building the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasProperties {
    pub name: String,
    pub number: u32,
    pub fraction: f64,
    /// `1 + m_e / M`, converts between lab-frame and gas-frame energy loss
    pub mass_factor: f64,
    /// Lowest ionisation threshold [eV]; infinite for gases without one
    pub ionisation_potential: f64,
    pub green_sawada: Option<GreenSawadaParameters>,
}

impl GasProperties {
    /// `mass_ratio` is `2 m_e / M` as returned by cross-section providers.
    pub fn new(name: &str, number: u32, fraction: f64, mass_ratio: f64) -> Self {
        GasProperties {
            name: name.to_string(),
            number,
            fraction,
            mass_factor: 1.0 + 0.5 * mass_ratio,
            ionisation_potential: f64::INFINITY,
            green_sawada: None,
        }
    }

    fn set_ionisation_potential(&mut self, potential: f64) {
        self.ionisation_potential = potential;
        self.green_sawada = GREEN_SAWADA.get(self.name.as_str()).map(|fit| GreenSawadaParameters {
            gs: fit.gs,
            gb: fit.gb,
            ts: fit.ts,
            ta: fit.ta,
            tb: 2.0 * potential,
        });
    }
}

/// Result of one mixer run.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedTables {
    pub levels: Vec<CollisionLevel>,
    pub gases: Vec<GasProperties>,
    pub rates: RateTable,
    /// Lowest ionisation potential in the mixture [eV]
    pub min_ion_pot: f64,
}

/// Rates of one level on both grids.
struct Column {
    cross_section: Vec<f64>,
    rate: Vec<f64>,
    angular: Vec<AngularParameters>,
    rate_log: Vec<f64>,
    angular_log: Vec<AngularParameters>,
}

impl Column {
    fn new(
        term: &CrossSectionTerm,
        log_term: Option<&CrossSectionTerm>,
        model: ScatteringModel,
        factor: f64,
    ) -> Self {
        let angular_of = |t: &CrossSectionTerm| -> Vec<AngularParameters> {
            (0..t.cross_section.len())
                .map(|i| AngularParameters::from_raw(model, t.angular_parameter_at(i)))
                .collect()
        };
        Column {
            cross_section: term.cross_section.clone(),
            rate: term.cross_section.iter().map(|cs| cs * factor).collect(),
            angular: angular_of(term),
            rate_log: log_term
                .map(|t| t.cross_section.iter().map(|cs| cs * factor).collect())
                .unwrap_or_default(),
            angular_log: log_term.map(angular_of).unwrap_or_default(),
        }
    }
}

/// Build the collision level list and rate table of a mixture.
///
/// `excitation_scaling` holds one factor per gas, applied to its inelastic
/// terms.
pub fn build(
    mixture: &GasMixture,
    settings: &Settings,
    provider: &dyn CrossSectionProvider,
    excitation_scaling: &[f64],
) -> Result<MixedTables> {
    if mixture.is_empty() {
        return Err(GasError::Configuration("gas mixture has no components".into()));
    }
    if settings.energy_steps == 0 {
        return Err(GasError::Configuration("number of energy steps must be positive".into()));
    }
    let e_final = settings.max_electron_energy;
    let e_high = settings.high_energy;
    let step = settings.energy_step();
    let n_linear = settings.energy_steps;
    let energies: Vec<f64> = (0..n_linear).map(|i| (i as f64 + 0.5) * step).collect();

    let use_log = e_final > e_high && settings.energy_steps_log > 0;
    let (n_log, ln_step) = if use_log {
        let r_log = (e_final / e_high).powf(1.0 / settings.energy_steps_log as f64);
        (settings.energy_steps_log, r_log.ln())
    } else {
        (0, 0.0)
    };
    let energies_log: Vec<f64> = (0..n_log)
        .map(|i| e_high * ((i + 1) as f64 * ln_step).exp())
        .collect();

    info!(
        "Creating collision table with {} linear steps between 0 and {} eV",
        n_linear,
        e_final.min(e_high)
    );
    if use_log {
        info!("{} logarithmic steps between {} and {} eV", n_log, e_high, e_final);
    }

    let density = mixture.number_density();
    let prefactor = density * SPEED_OF_LIGHT * (2.0 / ELECTRON_MASS).sqrt();
    let parameters = ProviderParameters {
        temperature: mixture.temperature(),
        pressure: mixture.pressure(),
        anisotropic: settings.anisotropic,
    };

    let mut levels: Vec<CollisionLevel> = Vec::new();
    let mut gases: Vec<GasProperties> = Vec::new();
    let mut columns: Vec<Column> = Vec::new();

    for (g, component) in mixture.components().iter().enumerate() {
        let number = gas_number(&component.name)?;
        let cs = provider.cross_sections(component, &energies, &parameters)?;
        cs.validate(n_linear)?;
        let cs_log = if use_log {
            let cs_log = provider.cross_sections(component, &energies_log, &parameters)?;
            cs_log.validate(n_log)?;
            check_same_terms(&cs, &cs_log, &component.name)?;
            Some(cs_log)
        } else {
            None
        };

        let n_terms = 1 + cs.ionisation.len() + cs.attachment.len() + cs.inelastic.len();
        if levels.len() + n_terms >= MAX_LEVELS {
            return Err(GasError::Capacity { max: MAX_LEVELS });
        }

        let mut gas = GasProperties::new(&component.name, number, component.fraction, cs.mass_ratio);
        let r = gas.mass_factor;
        let van = component.fraction * prefactor;
        let scale = excitation_scaling.get(g).copied().unwrap_or(1.0);

        // Elastic
        let mut elastic = CollisionLevel::new(g, CollisionType::Elastic, cs.elastic.description.clone(), 0.0);
        elastic.model = cs.elastic.model;
        columns.push(Column::new(
            &cs.elastic,
            cs_log.as_ref().map(|c| &c.elastic),
            elastic.model,
            van,
        ));
        levels.push(elastic);

        // Ionisation
        if let Some(first) = cs.ionisation.first() {
            gas.set_ionisation_potential(first.term.threshold);
        }
        for (j, ion) in cs.ionisation.iter().enumerate() {
            if e_final < ion.term.threshold {
                continue;
            }
            let mut level = CollisionLevel::new(
                g,
                CollisionType::Ionisation,
                ion.term.description.clone(),
                ion.term.threshold / r,
            );
            level.model = ion.term.model;
            level.opal_beaty = ion.opal_beaty;
            columns.push(Column::new(
                &ion.term,
                cs_log.as_ref().map(|c| &c.ionisation[j].term),
                level.model,
                van,
            ));
            levels.push(level);
        }

        // Attachment
        for (j, term) in cs.attachment.iter().enumerate() {
            let level = CollisionLevel::new(g, CollisionType::Attachment, term.description.clone(), 0.0);
            columns.push(Column::new(
                term,
                cs_log.as_ref().map(|c| &c.attachment[j]),
                ScatteringModel::Isotropic,
                van,
            ));
            levels.push(level);
        }

        // Inelastic terms
        let (mut n_exc, mut n_super) = (0, 0);
        for (j, term) in cs.inelastic.iter().enumerate() {
            let kind = classify_inelastic(&component.name, &term.description, term.threshold);
            match kind {
                CollisionType::Excitation => n_exc += 1,
                CollisionType::Superelastic => n_super += 1,
                _ => {}
            }
            let mut level = CollisionLevel::new(g, kind, term.description.clone(), term.threshold / r);
            level.model = term.model;
            columns.push(Column::new(
                term,
                cs_log.as_ref().map(|c| &c.inelastic[j]),
                level.model,
                van * scale,
            ));
            levels.push(level);
        }
        debug!(
            "{}: mass factor {}, ionisation potential {} eV, {} inelastic terms ({} excitations, {} superelastic)",
            component.name,
            r,
            gas.ionisation_potential,
            cs.inelastic.len(),
            n_exc,
            n_super
        );
        gases.push(gas);
    }

    if let Some(path) = &settings.cross_section_output {
        if let Err(err) = write_cross_sections(path, &energies, &levels, &columns) {
            warn!("Could not write cross-sections to {}: {}", path.display(), err);
        }
    }

    let n_levels = levels.len();
    let mut n_negative = 0usize;
    let mut table = RateTable {
        n_levels,
        energy_step: step,
        total: vec![0.0; n_linear],
        cumulative: vec![0.0; n_linear * n_levels],
        angular: vec![AngularParameters::default(); n_linear * n_levels],
        high_energy: e_high,
        ln_high: e_high.ln(),
        ln_step,
        log_total: vec![0.0; n_log],
        cumulative_log: vec![0.0; n_log * n_levels],
        angular_log: vec![AngularParameters::default(); n_log * n_levels],
        null_rate: 0.0,
        max_energy: e_final,
    };

    for (i, &ekin) in energies.iter().enumerate() {
        let row = &mut table.cumulative[i * n_levels..(i + 1) * n_levels];
        for (k, column) in columns.iter().enumerate() {
            row[k] = column.rate[i];
            table.angular[i * n_levels + k] = column.angular[i];
        }
        let total = normalise_row(row, &mut n_negative);
        let mut total = total * ekin.sqrt();
        if ekin > RELATIVISTIC_THRESHOLD {
            total *= relativistic_factor(ekin);
        }
        table.total[i] = total;
    }

    for (i, &ekin) in energies_log.iter().enumerate() {
        let row = &mut table.cumulative_log[i * n_levels..(i + 1) * n_levels];
        for (k, column) in columns.iter().enumerate() {
            row[k] = column.rate_log[i];
            table.angular_log[i * n_levels + k] = column.angular_log[i];
        }
        let total = normalise_row(row, &mut n_negative);
        table.log_total[i] = (total * ekin.sqrt() * relativistic_factor(ekin)).ln();
    }
    if n_negative > 0 {
        warn!("{} negative collision rates set to zero", n_negative);
    }

    table.null_rate = table
        .total
        .iter()
        .copied()
        .chain(table.log_total.iter().map(|f| f.exp()))
        .fold(0.0, f64::max);

    let min_ion_pot = gases
        .iter()
        .map(|g| g.ionisation_potential)
        .fold(f64::INFINITY, f64::min);
    if let Some(gas) = gases.iter().find(|g| g.ionisation_potential == min_ion_pot) {
        debug!("Lowest ionisation threshold: {} eV ({})", min_ion_pot, gas.name);
    }
    info!("Collision table: {} levels, null-collision rate {} ns-1", n_levels, table.null_rate);

    Ok(MixedTables { levels, gases, rates: table, min_ion_pot })
}

/// `sqrt(1 + re / 2) / (1 + re)` with `re = E / m_e`: ratio of the
/// relativistic to the classical velocity.
fn relativistic_factor(ekin: f64) -> f64 {
    let re = ekin / ELECTRON_MASS;
    (1.0 + 0.5 * re).sqrt() / (1.0 + re)
}

/// Clamp negative entries, turn rates into a cumulative distribution and
/// return the total rate.
fn normalise_row(row: &mut [f64], n_negative: &mut usize) -> f64 {
    for value in row.iter_mut() {
        if *value < 0.0 || value.is_nan() {
            *n_negative += 1;
            *value = 0.0;
        }
    }
    let total: f64 = row.iter().sum();
    let mut sum = 0.0;
    for value in row.iter_mut() {
        if total > 0.0 {
            sum += *value / total;
        } else {
            sum += *value;
        }
        *value = sum;
    }
    if total > 0.0 {
        if let Some(last) = row.last_mut() {
            // Round-off
            if (*last - 1.0).abs() < SMALL.sqrt() {
                *last = 1.0;
            }
        }
    }
    total
}

fn check_same_terms(a: &GasCrossSections, b: &GasCrossSections, gas: &str) -> Result<()> {
    if a.ionisation.len() != b.ionisation.len()
        || a.attachment.len() != b.attachment.len()
        || a.inelastic.len() != b.inelastic.len()
    {
        return Err(GasError::Data(format!(
            "{}: provider returned different terms for the logarithmic grid",
            gas
        )));
    }
    Ok(())
}

fn write_cross_sections(
    path: &Path,
    energies: &[f64],
    levels: &[CollisionLevel],
    columns: &[Column],
) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "# energy [eV] vs. cross-section [cm2]")?;
    for level in levels {
        writeln!(out, "# {} ({})", level.description.trim(), level.kind)?;
    }
    for (i, energy) in energies.iter().enumerate() {
        write!(out, "{}", energy)?;
        for column in columns {
            write!(out, "  {}", column.cross_section[i])?;
        }
        writeln!(out)?;
    }
    out.flush()
}
