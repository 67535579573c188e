use rand::Rng;

use super::{
    BnsParameters, PolarizationGenerator, Polarizations, RelativeBinningGenerator,
    SourceParameters, WaveformArguments,
};
use crate::error::{Result, ensure_non_negative};
use crate::tides::{BinaryLoveMode, component_lambdas, convert_lambda_s_to_lambda_a, dissipative_phase};

/// Component tidal deformabilities implied by λs through the Binary Love
/// relation: λa from (λs, q = m2/m1), then λ1 = |λs - λa|, λ2 = |λs + λa|.
pub fn lambda_1_lambda_2_from_lambda_s<R: Rng + ?Sized>(
    params: &SourceParameters,
    mode: BinaryLoveMode,
    rng: &mut R,
) -> Result<(f64, f64)> {
    let q = params.binary.masses()?.mass_ratio();
    let lambda_a = convert_lambda_s_to_lambda_a(params.lambda_s, q, mode, rng)?;
    Ok(component_lambdas(params.lambda_s, lambda_a))
}

/// Polarizations with the dissipative phase applied, for a model sampled
/// directly on λ1 and λ2.
pub fn source_dissipative<G: PolarizationGenerator + ?Sized>(
    generator: &G,
    frequencies: &[f64],
    params: &BnsParameters,
    xi_tilde: f64,
    args: &WaveformArguments,
) -> Result<Polarizations> {
    params.binary.validate()?;
    ensure_non_negative("lambda_1", params.lambda_1)?;
    ensure_non_negative("lambda_2", params.lambda_2)?;
    args.validate()?;

    let phase = dissipative_phase(frequencies, &params.binary.masses()?, xi_tilde)?;
    let mut polarizations = generator.polarizations(frequencies, params, args)?;
    polarizations.apply_phase(&phase)?;
    Ok(polarizations)
}

/// Frequency-domain source model sampled on λs (and optionally ξ̃)
///
/// Per evaluation: dissipative phase from the masses and ξ̃, λs → (λ1, λ2)
/// through the Binary Love relation, polarizations from the external
/// generator, then every polarization multiplied by exp(-iΔφ).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceModel {
    mode: BinaryLoveMode,
    dissipative: bool,
}

impl SourceModel {
    /// λs and ξ̃ model
    pub fn binary_love(mode: BinaryLoveMode) -> Self {
        Self {
            mode,
            dissipative: true,
        }
    }

    /// λs-only model: no dissipative phase, ξ̃ is ignored
    pub fn binary_love_no_xi(mode: BinaryLoveMode) -> Self {
        Self {
            mode,
            dissipative: false,
        }
    }

    pub fn mode(&self) -> BinaryLoveMode {
        self.mode
    }

    pub fn is_dissipative(&self) -> bool {
        self.dissipative
    }

    /// Parameter set the generator sees for this sample.
    pub fn component_parameters<R: Rng + ?Sized>(
        &self,
        params: &SourceParameters,
        rng: &mut R,
    ) -> Result<BnsParameters> {
        params.binary.validate()?;
        let (lambda_1, lambda_2) = lambda_1_lambda_2_from_lambda_s(params, self.mode, rng)?;
        log::trace!(
            "lambda_s={:.3} -> lambda_1={lambda_1:.3}, lambda_2={lambda_2:.3}",
            params.lambda_s
        );
        Ok(BnsParameters {
            binary: params.binary,
            lambda_1,
            lambda_2,
        })
    }

    pub fn polarizations<G, R>(
        &self,
        generator: &G,
        frequencies: &[f64],
        params: &SourceParameters,
        args: &WaveformArguments,
        rng: &mut R,
    ) -> Result<Polarizations>
    where
        G: PolarizationGenerator + ?Sized,
        R: Rng + ?Sized,
    {
        self.evaluate(frequencies, params, args, rng, |bns| {
            generator.polarizations(frequencies, bns, args)
        })
    }

    /// Same chain, delegating to a relative-binning generator.
    pub fn polarizations_relative_binning<G, R>(
        &self,
        generator: &G,
        frequencies: &[f64],
        params: &SourceParameters,
        args: &WaveformArguments,
        fiducial: bool,
        rng: &mut R,
    ) -> Result<Polarizations>
    where
        G: RelativeBinningGenerator + ?Sized,
        R: Rng + ?Sized,
    {
        self.evaluate(frequencies, params, args, rng, |bns| {
            generator.polarizations_relative_binning(frequencies, bns, args, fiducial)
        })
    }

    fn evaluate<R, F>(
        &self,
        frequencies: &[f64],
        params: &SourceParameters,
        args: &WaveformArguments,
        rng: &mut R,
        generate: F,
    ) -> Result<Polarizations>
    where
        R: Rng + ?Sized,
        F: FnOnce(&BnsParameters) -> Result<Polarizations>,
    {
        args.validate()?;

        let phase = if self.dissipative {
            let xi_tilde = params.require_xi_tilde()?;
            Some(dissipative_phase(
                frequencies,
                &params.binary.masses()?,
                xi_tilde,
            )?)
        } else {
            None
        };

        let bns = self.component_parameters(params, rng)?;
        let mut polarizations = generate(&bns)?;

        match phase {
            Some(phase) => polarizations.apply_phase(&phase)?,
            None => polarizations.check_len(frequencies.len())?,
        }
        Ok(polarizations)
    }
}
