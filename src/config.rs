//! Configuration for a dissipative-tide analysis.
//!
//! Every section has defaults matching a GW170817-like injection, so a TOML
//! file only needs the values it changes:
//!
//! ```toml
//! [binary_love]
//! mode = "fit"
//! seed = 7
//!
//! [grid]
//! duration = 64.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TideError, ensure_finite, ensure_positive};
use crate::source::{SourceParameters, WaveformArguments};
use crate::tides::BinaryLoveMode;

/// Top-level analysis configuration
///
/// # Example
/// ```
/// use bnstide::config::AnalysisConfig;
///
/// let config = AnalysisConfig::from_toml_str("[batch]\nworkers = 4\n").unwrap();
/// assert_eq!(config.batch.workers, 4);
/// assert_eq!(config.waveform.reference_frequency, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Waveform options forwarded to the polarization generator
    pub waveform: WaveformArguments,
    /// Frequency grid the phase is evaluated on
    pub grid: FrequencyGrid,
    /// Binary Love conversion settings
    pub binary_love: BinaryLoveConfig,
    /// Reference source parameters
    pub injection: SourceParameters,
    /// Parallel evaluation settings
    pub batch: BatchConfig,
}

/// Uniform frequency grid of a real FFT of `duration` seconds sampled at
/// `sampling_frequency` Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyGrid {
    /// Segment duration in seconds
    pub duration: f64,
    /// Sampling frequency in Hz
    pub sampling_frequency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryLoveConfig {
    /// Fit only, or fit plus EOS-scatter draw
    pub mode: BinaryLoveMode,
    /// Seed for the EOS-scatter draws (OS entropy when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of worker threads
    pub workers: usize,
}

impl FrequencyGrid {
    pub fn number_of_samples(&self) -> usize {
        (self.duration * self.sampling_frequency).round() as usize
    }

    /// N/2 + 1 points evenly spaced from 0 to fs/2 inclusive.
    ///
    /// For even N the spacing is 1/duration, the resolution of a real FFT.
    pub fn frequencies(&self) -> Vec<f64> {
        let count = self.number_of_samples() / 2 + 1;
        if count == 1 {
            return vec![0.0];
        }
        let nyquist = self.sampling_frequency / 2.0;
        let step = nyquist / (count - 1) as f64;
        (0..count).map(|k| k as f64 * step).collect()
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| TideError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TideError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TideError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.waveform
            .validate()
            .map_err(|e| TideError::Config(format!("waveform: {e}")))?;
        if !(self.grid.duration > 0.0 && self.grid.duration.is_finite()) {
            return Err(TideError::Config(
                "grid.duration must be positive".to_string(),
            ));
        }
        if !(self.grid.sampling_frequency > 0.0 && self.grid.sampling_frequency.is_finite()) {
            return Err(TideError::Config(
                "grid.sampling_frequency must be positive".to_string(),
            ));
        }
        if self.batch.workers == 0 {
            return Err(TideError::Config(
                "batch.workers must be at least 1".to_string(),
            ));
        }
        self.validate_injection()
            .map_err(|e| TideError::Config(format!("injection: {e}")))
    }

    fn validate_injection(&self) -> Result<()> {
        let injection = &self.injection;
        injection.binary.validate()?;
        ensure_positive("lambda_s", injection.lambda_s)?;
        if let Some(xi_tilde) = injection.xi_tilde {
            ensure_finite("xi_tilde", xi_tilde)?;
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            waveform: WaveformArguments::default(),
            grid: FrequencyGrid::default(),
            binary_love: BinaryLoveConfig::default(),
            injection: SourceParameters::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Default for FrequencyGrid {
    fn default() -> Self {
        Self {
            duration: 128.0,
            sampling_frequency: 2048.0,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}
