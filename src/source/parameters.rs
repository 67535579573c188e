use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TideError, ensure_finite, ensure_positive};
use crate::tides::MassPair;

/// Look up a required key in a sampler parameter map.
fn required(map: &HashMap<String, f64>, key: &str) -> Result<f64> {
    map.get(key)
        .copied()
        .ok_or_else(|| TideError::MissingParameter(key.to_string()))
}

fn required_all<const N: usize>(map: &HashMap<String, f64>, keys: &[&str; N]) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    for (slot, key) in out.iter_mut().zip(keys) {
        *slot = required(map, key)?;
    }
    Ok(out)
}

/// Keys consumed by the parameter structs; anything else in a sampler map is
/// a waveform option.
const RESERVED_KEYS: [&str; 6] = [
    "lambda_s",
    "xi_tilde",
    "lambda_1",
    "lambda_2",
    "reference_frequency",
    "minimum_frequency",
];

/// Masses, spins, orientation and distance of a compact binary
///
/// These are passed through untouched to the waveform generator. The default
/// is a GW170817-like equal-mass system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryParameters {
    /// Primary mass in solar masses
    pub mass_1: f64,
    /// Secondary mass in solar masses
    pub mass_2: f64,
    /// Luminosity distance in Mpc
    pub luminosity_distance: f64,
    pub a_1: f64,
    pub tilt_1: f64,
    pub phi_12: f64,
    pub a_2: f64,
    pub tilt_2: f64,
    pub phi_jl: f64,
    pub theta_jn: f64,
    pub phase: f64,
}

impl BinaryParameters {
    const KEYS: [&'static str; 11] = [
        "mass_1",
        "mass_2",
        "luminosity_distance",
        "a_1",
        "tilt_1",
        "phi_12",
        "a_2",
        "tilt_2",
        "phi_jl",
        "theta_jn",
        "phase",
    ];

    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        let [
            mass_1,
            mass_2,
            luminosity_distance,
            a_1,
            tilt_1,
            phi_12,
            a_2,
            tilt_2,
            phi_jl,
            theta_jn,
            phase,
        ] = required_all(map, &Self::KEYS)?;
        Ok(Self {
            mass_1,
            mass_2,
            luminosity_distance,
            a_1,
            tilt_1,
            phi_12,
            a_2,
            tilt_2,
            phi_jl,
            theta_jn,
            phase,
        })
    }

    pub fn masses(&self) -> Result<MassPair> {
        MassPair::new(self.mass_1, self.mass_2)
    }

    /// Reject NaN/inf anywhere in the set before it reaches the generator.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.mass_1,
            self.mass_2,
            self.luminosity_distance,
            self.a_1,
            self.tilt_1,
            self.phi_12,
            self.a_2,
            self.tilt_2,
            self.phi_jl,
            self.theta_jn,
            self.phase,
        ];
        Self::KEYS
            .iter()
            .zip(values)
            .try_for_each(|(&key, value)| ensure_finite(key, value).map(|_| ()))?;
        self.masses()?;
        ensure_positive("luminosity_distance", self.luminosity_distance)?;
        Ok(())
    }
}

/// Parameters sampled when the tides are described by λs and ξ̃
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceParameters {
    #[serde(flatten)]
    pub binary: BinaryParameters,
    /// Symmetric tidal deformability (λ1 + λ2)/2
    pub lambda_s: f64,
    /// Dissipative tidal parameter; absent for the non-dissipative model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xi_tilde: Option<f64>,
}

impl SourceParameters {
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        Ok(Self {
            binary: BinaryParameters::from_map(map)?,
            lambda_s: required(map, "lambda_s")?,
            xi_tilde: map.get("xi_tilde").copied(),
        })
    }

    pub fn require_xi_tilde(&self) -> Result<f64> {
        self.xi_tilde
            .ok_or_else(|| TideError::MissingParameter("xi_tilde".to_string()))
    }
}

/// Parameter set handed to the waveform generator: component tidal
/// deformabilities instead of λs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BnsParameters {
    #[serde(flatten)]
    pub binary: BinaryParameters,
    pub lambda_1: f64,
    pub lambda_2: f64,
}

impl BnsParameters {
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        Ok(Self {
            binary: BinaryParameters::from_map(map)?,
            lambda_1: required(map, "lambda_1")?,
            lambda_2: required(map, "lambda_2")?,
        })
    }
}

/// Fixed waveform options shared by every likelihood evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformArguments {
    /// Name of the underlying approximant, e.g. IMRPhenomPv2_NRTidal
    pub waveform_approximant: String,
    /// Reference frequency in Hz
    pub reference_frequency: f64,
    /// Low-frequency cutoff in Hz
    pub minimum_frequency: f64,
    /// Other numeric options forwarded untouched to the generator
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl WaveformArguments {
    /// Waveform options from a sampler keyword map; `reference_frequency` is required.
    pub fn from_map(map: &HashMap<String, f64>, waveform_approximant: &str) -> Result<Self> {
        let defaults = Self::default();
        let args = Self {
            waveform_approximant: waveform_approximant.to_string(),
            reference_frequency: required(map, "reference_frequency")?,
            minimum_frequency: map
                .get("minimum_frequency")
                .copied()
                .unwrap_or(defaults.minimum_frequency),
            extra: map
                .iter()
                .filter(|(key, _)| {
                    let key = key.as_str();
                    !RESERVED_KEYS.contains(&key) && !BinaryParameters::KEYS.contains(&key)
                })
                .map(|(key, &value)| (key.clone(), value))
                .collect(),
        };
        args.validate()?;
        Ok(args)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("reference_frequency", self.reference_frequency)?;
        ensure_positive("minimum_frequency", self.minimum_frequency)?;
        Ok(())
    }
}

impl Default for BinaryParameters {
    fn default() -> Self {
        Self {
            mass_1: 1.38,
            mass_2: 1.38,
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
}

impl Default for SourceParameters {
    fn default() -> Self {
        Self {
            binary: BinaryParameters::default(),
            lambda_s: 584.0,
            xi_tilde: Some(0.0),
        }
    }
}

impl Default for WaveformArguments {
    fn default() -> Self {
        Self {
            waveform_approximant: "IMRPhenomPv2_NRTidal".to_string(),
            reference_frequency: 50.0,
            minimum_frequency: 40.0,
            extra: BTreeMap::new(),
        }
    }
}
