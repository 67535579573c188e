pub mod generator;
pub mod model;
mod parameters;
mod polarizations;

pub use generator::{PolarizationGenerator, RelativeBinningGenerator};
pub use model::{SourceModel, lambda_1_lambda_2_from_lambda_s, source_dissipative};
pub use parameters::{BinaryParameters, BnsParameters, SourceParameters, WaveformArguments};
pub use polarizations::{CROSS, PLUS, Polarizations};
