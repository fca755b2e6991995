// Locations of the tabulated gas data files
use crate::error::{GasError, Result};
use crate::provider::{TabulatedCrossSections, TabulatedPhotoabsorption};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mapping from gas names (e.g. "Ar") to the JSON files holding their
/// electron cross-sections, plus an optional file with the photoabsorption
/// tables of all gases.
///
/// A configuration can be built in code or read from a JSON file of the form
/// `{"cross_sections": {"Ar": "ar.json"}, "optical": "optical.json"}`. Paths
/// in such a file are taken relative to the file's directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub cross_sections: HashMap<String, PathBuf>,
    pub optical: Option<PathBuf>,
}

impl DataConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config: DataConfig = serde_json::from_str(&text)?;
        if let Some(dir) = path.parent() {
            for file in config.cross_sections.values_mut() {
                if file.is_relative() {
                    *file = dir.join(&*file);
                }
            }
            if let Some(file) = config.optical.as_mut() {
                if file.is_relative() {
                    *file = dir.join(&*file);
                }
            }
        }
        Ok(config)
    }

    pub fn set_cross_section(&mut self, gas: &str, path: impl Into<PathBuf>) {
        self.cross_sections.insert(gas.to_string(), path.into());
    }

    pub fn set_cross_sections(&mut self, paths: HashMap<String, PathBuf>) {
        self.cross_sections.extend(paths);
    }

    pub fn get_cross_section(&self, gas: &str) -> Option<&Path> {
        self.cross_sections.get(gas).map(PathBuf::as_path)
    }

    pub fn set_optical(&mut self, path: impl Into<PathBuf>) {
        self.optical = Some(path.into());
    }

    pub fn clear(&mut self) {
        self.cross_sections.clear();
        self.optical = None;
    }

    /// Read the cross-section files of the named gases.
    pub fn load_cross_sections(&self, gases: &[&str]) -> Result<TabulatedCrossSections> {
        let mut provider = TabulatedCrossSections::new();
        for &gas in gases {
            let path = self
                .get_cross_section(gas)
                .ok_or_else(|| GasError::Data(format!("no cross-section file configured for {}", gas)))?;
            debug!("Reading {} cross-sections from {}", gas, path.display());
            provider.load_json_file(path)?;
            if !provider.contains(gas) {
                return Err(GasError::Data(format!(
                    "{} does not contain cross-sections for {}",
                    path.display(),
                    gas
                )));
            }
        }
        Ok(provider)
    }

    /// Read the photoabsorption tables; empty if no file is configured.
    pub fn load_optical(&self) -> Result<TabulatedPhotoabsorption> {
        let mut provider = TabulatedPhotoabsorption::new();
        if let Some(path) = &self.optical {
            debug!("Reading photoabsorption data from {}", path.display());
            provider.load_json_file(path)?;
        }
        Ok(provider)
    }
}
