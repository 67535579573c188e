use std::cell::RefCell;

use bnstide::source::{
    BnsParameters, PolarizationGenerator, Polarizations, RelativeBinningGenerator,
    WaveformArguments,
};
use bnstide::{Result, TideError};
use num_complex::Complex64;

/// Smooth stand-in polarizations; remembers the last parameters it saw.
#[derive(Default)]
pub struct RecordingGenerator {
    pub last_params: RefCell<Option<BnsParameters>>,
    pub last_fiducial: RefCell<Option<bool>>,
}

impl RecordingGenerator {
    fn plus_cross(frequencies: &[f64], params: &BnsParameters) -> Polarizations {
        let plus: Vec<Complex64> = frequencies
            .iter()
            .map(|&f| {
                let amplitude = 1.0 / (1.0 + f.abs());
                Complex64::from_polar(amplitude, 1e-4 * params.lambda_1 * f)
            })
            .collect();
        let cross = plus.iter().map(|h| h * Complex64::i()).collect();
        Polarizations::plus_cross(plus, cross)
    }

    pub fn last_lambdas(&self) -> Option<(f64, f64)> {
        let params = *self.last_params.borrow();
        params.map(|p| (p.lambda_1, p.lambda_2))
    }
}

impl PolarizationGenerator for RecordingGenerator {
    fn polarizations(
        &self,
        frequencies: &[f64],
        params: &BnsParameters,
        _args: &WaveformArguments,
    ) -> Result<Polarizations> {
        *self.last_params.borrow_mut() = Some(*params);
        Ok(Self::plus_cross(frequencies, params))
    }
}

impl RelativeBinningGenerator for RecordingGenerator {
    fn polarizations_relative_binning(
        &self,
        frequencies: &[f64],
        params: &BnsParameters,
        _args: &WaveformArguments,
        fiducial: bool,
    ) -> Result<Polarizations> {
        *self.last_params.borrow_mut() = Some(*params);
        *self.last_fiducial.borrow_mut() = Some(fiducial);
        Ok(Self::plus_cross(frequencies, params))
    }
}

/// Drops the last frequency bin, violating the output length contract.
pub struct TruncatingGenerator;

impl PolarizationGenerator for TruncatingGenerator {
    fn polarizations(
        &self,
        frequencies: &[f64],
        _params: &BnsParameters,
        _args: &WaveformArguments,
    ) -> Result<Polarizations> {
        let n = frequencies.len().saturating_sub(1);
        Ok(Polarizations::plus_cross(
            vec![Complex64::new(1.0, 0.0); n],
            vec![Complex64::new(0.0, 1.0); n],
        ))
    }
}

pub struct FailingGenerator;

impl PolarizationGenerator for FailingGenerator {
    fn polarizations(
        &self,
        _frequencies: &[f64],
        _params: &BnsParameters,
        _args: &WaveformArguments,
    ) -> Result<Polarizations> {
        Err(TideError::Waveform("approximant not available".to_string()))
    }
}
