//! Binary Love relation between symmetric and antisymmetric tidal deformability
//!
//! Given λs = (λ1 + λ2)/2 and the mass ratio q = m2/m1, the calibrated fit of
//! Yagi & Yunes predicts λa = (λ1 - λ2)/2:
//!
//! ```text
//! λa = Fn(q) · (1 + Σ b_ij q^(j+1) λs^(-(i+1)/5)) / (1 + Σ c_ij q^(j+1) λs^(-(i+1)/5)) · λs^α
//! Fn(q) = (1 - q^(10/(3-n))) / (1 + q^(10/(3-n)))
//! ```
//!
//! The marginalized variant adds a Gaussian residual whose mean and width
//! follow the spread of the relation across equations of state
//! (arXiv:1903.03909). The random source is always passed in by the caller.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TideError, ensure_finite, ensure_positive, ensure_same_len};

/// Effective polytropic index n entering Fn(q)
pub const POLYTROPIC_INDEX: f64 = 0.743;

/// Exponent α of the leading λs power
pub const ALPHA: f64 = 1.0;

/// Numerator coefficients b_ij (rows: powers of λs^(-1/5), columns: powers of q)
pub const B_COEFFS: [[f64; 2]; 3] = [[-14.4, 14.45], [31.36, -32.25], [-22.44, 20.35]];

/// Denominator coefficients c_ij
pub const C_COEFFS: [[f64; 2]; 3] = [[-15.25, 15.37], [37.33, -43.20], [-29.93, 35.18]];

/// Mean coefficients μ1..μ5 of the EOS residual
pub const MU_COEFFS: [f64; 5] = [3.509e-3, 0.9351, -18.07, 27.56, -10.10];

/// Width coefficients σ1..σ9 of the EOS residual
pub const SIGMA_COEFFS: [f64; 9] = [
    -2.074e-7, 1.492e-3, -4.891e-2, 0.8207, -1.308, -63.76, 11.14, 75.25, -23.69,
];

const LAMBDA_S_EXPONENTS: [f64; 3] = [-0.2, -0.4, -0.6];

/// Deterministic fit or fit plus EOS-scatter draw
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BinaryLoveMode {
    /// Calibrated fit only
    Fit,
    /// Fit plus one Normal(μ_r, σ_r) draw per call
    #[default]
    Marginalized,
}

/// Mean and standard deviation of the EOS residual at (λs, q)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EosScatter {
    pub mean: f64,
    pub std_dev: f64,
}

impl EosScatter {
    pub fn distribution(&self) -> Result<Normal<f64>> {
        Normal::new(self.mean, self.std_dev).map_err(|_| TideError::Domain {
            parameter: "sigma_r",
            value: self.std_dev,
            reason: "scatter width must be finite and non-negative",
        })
    }
}

fn validate(lambda_s: f64, q: f64) -> Result<()> {
    ensure_positive("lambda_s", lambda_s)?;
    ensure_positive("mass_ratio", q)?;
    if q > 1.0 {
        return Err(TideError::Domain {
            parameter: "mass_ratio",
            value: q,
            reason: "must lie in (0, 1]",
        });
    }
    Ok(())
}

/// Contract a 3x2 coefficient matrix against the λs and q power vectors:
/// lᵀ · (M · q)
fn contract(matrix: &[[f64; 2]; 3], lambda_powers: &[f64; 3], q_powers: &[f64; 2]) -> f64 {
    matrix
        .iter()
        .zip(lambda_powers)
        .map(|(row, l)| l * (row[0] * q_powers[0] + row[1] * q_powers[1]))
        .sum()
}

fn fit_unchecked(lambda_s: f64, q: f64) -> f64 {
    let q_n = q.powf(10.0 / (3.0 - POLYTROPIC_INDEX));
    let f_n = (1.0 - q_n) / (1.0 + q_n);

    let q_powers = [q, q * q];
    let lambda_powers = LAMBDA_S_EXPONENTS.map(|e| lambda_s.powf(e));

    let num = contract(&B_COEFFS, &lambda_powers, &q_powers);
    let den = contract(&C_COEFFS, &lambda_powers, &q_powers);

    f_n * (1.0 + num) / (1.0 + den) * lambda_s.powf(ALPHA)
}

/// Antisymmetric tidal deformability predicted by the calibrated fit.
///
/// Pure function: identical inputs give bit-identical output. Exactly zero
/// for q = 1.
pub fn lambda_a_fit(lambda_s: f64, q: f64) -> Result<f64> {
    validate(lambda_s, q)?;
    ensure_finite("lambda_a", fit_unchecked(lambda_s, q))
}

/// [`lambda_a_fit`] over paired arrays.
pub fn lambda_a_fit_batch(lambda_s: &[f64], q: &[f64]) -> Result<Vec<f64>> {
    ensure_same_len(lambda_s.len(), q.len())?;
    lambda_s
        .iter()
        .zip(q)
        .enumerate()
        .map(|(i, (&ls, &q))| lambda_a_fit(ls, q).map_err(|e| e.at_point(i)))
        .collect()
}

/// EOS residual model: μ_r = (μ_r(λs) + μ_r(q)) / 2, σ_r = hypot(σ_r(λs), σ_r(q)).
pub fn eos_scatter(lambda_s: f64, q: f64) -> Result<EosScatter> {
    validate(lambda_s, q)?;
    let [mu1, mu2, mu3, mu4, mu5] = MU_COEFFS;
    let [s1, s2, s3, s4, s5, s6, s7, s8, s9] = SIGMA_COEFFS;

    let mean_lambda_s = mu1 * lambda_s + mu2;
    let mean_q = mu3 * q * q + mu4 * q + mu5;

    let sigma_lambda_s = s1 * lambda_s.powf(2.5)
        + s2 * lambda_s.powf(1.5)
        + s3 * lambda_s
        + s4 * lambda_s.powf(0.5)
        + s5;
    let sigma_q = s6 * q.powi(3) + s7 * q * q + s8 * q + s9;

    Ok(EosScatter {
        mean: (mean_lambda_s + mean_q) / 2.0,
        std_dev: (sigma_lambda_s * sigma_lambda_s + sigma_q * sigma_q).sqrt(),
    })
}

/// Fit plus one draw of the EOS residual.
///
/// Not idempotent: every call consumes randomness from `rng`. Reseed the
/// generator to reproduce a sequence.
pub fn lambda_a_marginalized<R: Rng + ?Sized>(lambda_s: f64, q: f64, rng: &mut R) -> Result<f64> {
    let fit = lambda_a_fit(lambda_s, q)?;
    let scatter = eos_scatter(lambda_s, q)?;
    let residual = scatter.distribution()?.sample(rng);
    log::trace!(
        "binary love: lambda_s={lambda_s:.3} q={q:.4} fit={fit:.4} residual={residual:.4}"
    );
    Ok(fit + residual)
}

/// [`lambda_a_marginalized`] over paired arrays, drawing in index order.
pub fn lambda_a_marginalized_batch<R: Rng + ?Sized>(
    lambda_s: &[f64],
    q: &[f64],
    rng: &mut R,
) -> Result<Vec<f64>> {
    ensure_same_len(lambda_s.len(), q.len())?;
    lambda_s
        .iter()
        .zip(q)
        .enumerate()
        .map(|(i, (&ls, &q))| lambda_a_marginalized(ls, q, rng).map_err(|e| e.at_point(i)))
        .collect()
}

/// λa from λs and q in the requested mode. `rng` is untouched in `Fit` mode.
pub fn convert_lambda_s_to_lambda_a<R: Rng + ?Sized>(
    lambda_s: f64,
    q: f64,
    mode: BinaryLoveMode,
    rng: &mut R,
) -> Result<f64> {
    match mode {
        BinaryLoveMode::Fit => lambda_a_fit(lambda_s, q),
        BinaryLoveMode::Marginalized => lambda_a_marginalized(lambda_s, q, rng),
    }
}

/// (λ1, λ2) = (|λs - λa|, |λs + λa|)
///
/// The absolute values guard against a sign flip when λa exceeds λs, which
/// happens near the edge of the fit or after a large residual draw.
pub fn component_lambdas(lambda_s: f64, lambda_a: f64) -> (f64, f64) {
    let lambda_1 = lambda_s - lambda_a;
    let lambda_2 = lambda_s + lambda_a;
    if lambda_1 < 0.0 || lambda_2 < 0.0 {
        log::debug!(
            "component tidal deformability flipped sign (lambda_s={lambda_s:.3}, lambda_a={lambda_a:.3})"
        );
    }
    (lambda_1.abs(), lambda_2.abs())
}

/// (λs, λa) = ((λ1 + λ2)/2, (λ1 - λ2)/2)
///
/// Feeding λs back into [`lambda_a_fit`] does not reproduce this λa in
/// general: the fit is an EOS-averaged approximation.
pub fn lambda_s_lambda_a(lambda_1: f64, lambda_2: f64) -> (f64, f64) {
    ((lambda_1 + lambda_2) / 2.0, (lambda_1 - lambda_2) / 2.0)
}
