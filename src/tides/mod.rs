pub mod binary_love;
pub mod dissipative;
mod masses;

pub use binary_love::{
    BinaryLoveMode, EosScatter, component_lambdas, convert_lambda_s_to_lambda_a, eos_scatter,
    lambda_a_fit, lambda_a_fit_batch, lambda_a_marginalized, lambda_a_marginalized_batch,
    lambda_s_lambda_a,
};
pub use dissipative::{dissipative_phase, dissipative_phase_into, phase_factor};
pub use masses::MassPair;
