pub mod generators;
pub mod parameters;

pub use generators::{FailingGenerator, RecordingGenerator, TruncatingGenerator};
pub use parameters::{bns_parameters, gw170817_like, parameter_map};
