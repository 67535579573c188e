//! Dissipative tidal phase and marginalized Binary Love relations for binary
//! neutron star parameter estimation.

pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod rng;
pub mod source;
pub mod tides;

pub use config::AnalysisConfig;
pub use error::{Result, TideError};
pub use source::{Polarizations, SourceModel, SourceParameters};
pub use tides::{BinaryLoveMode, MassPair};
