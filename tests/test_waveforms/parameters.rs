use std::collections::HashMap;

use bnstide::source::{BinaryParameters, BnsParameters, SourceParameters};

pub fn binary(mass_1: f64, mass_2: f64) -> BinaryParameters {
    BinaryParameters {
        mass_1,
        mass_2,
        luminosity_distance: 40.0,
        a_1: 0.0,
        tilt_1: 0.0,
        phi_12: 0.0,
        a_2: 0.0,
        tilt_2: 0.0,
        phi_jl: 0.0,
        theta_jn: 2.64,
        phase: 0.0,
    }
}

pub fn gw170817_like(mass_2: f64, lambda_s: f64, xi_tilde: Option<f64>) -> SourceParameters {
    SourceParameters {
        binary: binary(1.38, mass_2),
        lambda_s,
        xi_tilde,
    }
}

pub fn bns_parameters(lambda_1: f64, lambda_2: f64) -> BnsParameters {
    BnsParameters {
        binary: binary(1.35, 1.25),
        lambda_1,
        lambda_2,
    }
}

/// Sampler-style keyword map for a source sampled on lambda_s and xi_tilde
pub fn parameter_map(lambda_s: f64, xi_tilde: f64) -> HashMap<String, f64> {
    [
        ("mass_1", 1.38),
        ("mass_2", 1.30),
        ("luminosity_distance", 40.0),
        ("a_1", 0.0),
        ("tilt_1", 0.0),
        ("phi_12", 0.0),
        ("a_2", 0.0),
        ("tilt_2", 0.0),
        ("phi_jl", 0.0),
        ("theta_jn", 2.64),
        ("phase", 0.0),
        ("lambda_s", lambda_s),
        ("xi_tilde", xi_tilde),
        ("reference_frequency", 50.0),
        ("minimum_frequency", 40.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
