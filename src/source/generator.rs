use super::{BnsParameters, Polarizations, WaveformArguments};
use crate::error::Result;

/// Frequency-domain BNS polarization model
///
/// Implemented outside this crate by whatever waveform library backs the
/// analysis. Implementations must return one array per polarization, each as
/// long as `frequencies`; report failures as [`crate::TideError::Waveform`].
pub trait PolarizationGenerator {
    fn polarizations(
        &self,
        frequencies: &[f64],
        params: &BnsParameters,
        args: &WaveformArguments,
    ) -> Result<Polarizations>;
}

/// Polarization model accelerated by relative binning
///
/// Same contract as [`PolarizationGenerator`]. `fiducial` selects evaluation
/// of the fiducial waveform the binning is built around.
pub trait RelativeBinningGenerator {
    fn polarizations_relative_binning(
        &self,
        frequencies: &[f64],
        params: &BnsParameters,
        args: &WaveformArguments,
        fiducial: bool,
    ) -> Result<Polarizations>;
}
