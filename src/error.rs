// Error types for building and sampling gas collision tables
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GasError>;

#[derive(Error, Debug)]
pub enum GasError {
    #[error("unknown gas: {0}")]
    UnknownGas(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("maximum number of collision levels ({max}) exceeded")]
    Capacity { max: usize },

    #[error("unknown excitation level '{label}' of {gas}")]
    UnknownLevel { gas: String, label: String },

    #[error("inconsistent de-excitation data: {0}")]
    Consistency(String),

    #[error("energy must be greater than zero (got {0} eV)")]
    InvalidEnergy(f64),

    #[error("level index {index} out of range ({count} levels)")]
    LevelOutOfRange { index: usize, count: usize },

    #[error("cross-section data error: {0}")]
    Data(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
