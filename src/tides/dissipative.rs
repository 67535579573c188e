//! Leading-order dissipative tidal phase in the frequency domain
//!
//! Δφ(f) = -(225/512) · ξ̃ / η · u³ ln u, with u = (π GC M f)^(1/3)
//! (arXiv:2306.15633). Frequencies at or below zero are masked and carry no
//! phase.

use std::f64::consts::PI;

use num_complex::Complex64;

use super::MassPair;
use crate::constants::GC;
use crate::error::{Result, TideError, ensure_finite, ensure_same_len};

const PREFACTOR: f64 = 225.0 / 512.0;

/// Dissipative phase Δφ(f) for every entry of `frequencies`.
pub fn dissipative_phase(frequencies: &[f64], masses: &MassPair, xi_tilde: f64) -> Result<Vec<f64>> {
    let mut phase = vec![0.0; frequencies.len()];
    dissipative_phase_into(frequencies, masses, xi_tilde, &mut phase)?;
    Ok(phase)
}

/// Allocation-free form of [`dissipative_phase`] writing into `out`.
///
/// `out` must be as long as `frequencies`. Every entry is overwritten,
/// masked ones with exactly 0.0.
pub fn dissipative_phase_into(
    frequencies: &[f64],
    masses: &MassPair,
    xi_tilde: f64,
    out: &mut [f64],
) -> Result<()> {
    ensure_same_len(frequencies.len(), out.len())?;
    let xi_tilde = ensure_finite("xi_tilde", xi_tilde)?;

    let total_mass = masses.total_mass();
    let coefficient = -PREFACTOR / masses.symmetric_mass_ratio() * xi_tilde;
    let scale = GC * PI * total_mass;

    // checked up front so a rejected call leaves `out` untouched
    if let Some(&f) = frequencies.iter().find(|f| f.is_nan()) {
        return Err(TideError::Domain {
            parameter: "frequency",
            value: f,
            reason: "must not be NaN",
        });
    }

    for (&f, phi) in frequencies.iter().zip(out.iter_mut()) {
        *phi = if f > 0.0 {
            let u = (scale * f).cbrt();
            coefficient * u.powi(3) * u.ln()
        } else {
            0.0
        };
    }

    // +inf passes the mask and would poison the caller
    if let Some(i) = out.iter().position(|phi| !phi.is_finite()) {
        return Err(TideError::Domain {
            parameter: "frequency",
            value: frequencies[i],
            reason: "phase is not finite",
        });
    }

    Ok(())
}

/// exp(-iΔφ), the factor each polarization is multiplied by
pub fn phase_factor(phase: f64) -> Complex64 {
    Complex64::from_polar(1.0, -phase)
}
