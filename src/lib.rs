// Electron and photon collision tables for gas mixtures, with Monte Carlo
// sampling of collisions and de-excitation cascades.
mod angular;
mod config;
pub mod constants;
mod data;
pub mod deexcitation;
mod error;
mod kinematics;
mod level;
mod medium;
pub mod mixer;
mod mixture;
mod photon;
mod provider;
pub mod random;
pub mod rate_table;
mod sampler;
mod settings;
mod utilities;

pub use angular::AngularParameters;
pub use config::DataConfig;
pub use data::{gas_number, GreenSawadaFit, GREEN_SAWADA};
pub use deexcitation::{ArgonLevel, Cascade, DeexcitationGraph, DeexcitationProduct, ProductKind};
pub use error::{GasError, Result};
pub use kinematics::{rotate_direction, scatter, secondary_energy, Scatter};
pub use level::{classify_inelastic, CollisionLevel, CollisionType, ScatteringModel};
pub use medium::{CollisionCounters, DeexcitationOutcome, GasMedium, PenningTransfer, PhotonCollision};
pub use mixer::{GasProperties, MixedTables};
pub use mixture::{GasComponent, GasMixture};
pub use photon::{PhotonCollisionType, PhotonRateTable};
pub use provider::{
    CrossSectionProvider, CrossSectionTerm, GasCrossSections, IonisationTerm, OpticalTable,
    PhotoabsorptionProvider, ProviderParameters, TabulatedCrossSections, TabulatedGas,
    TabulatedPhotoabsorption,
};
pub use rate_table::RateTable;
pub use sampler::{CollisionSampler, ElectronCollision, Secondary, SecondaryKind};
pub use settings::{Settings, SplittingFunction};
pub use utilities::{interpolate_linear, sample_cumulative};
