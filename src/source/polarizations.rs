use std::collections::BTreeMap;

use num_complex::Complex64;

use crate::error::{Result, ensure_same_len};
use crate::tides::phase_factor;

pub const PLUS: &str = "plus";
pub const CROSS: &str = "cross";

/// Frequency-domain polarizations keyed by name
///
/// Every array is expected to be as long as the frequency array it was
/// generated on; [`Polarizations::check_len`] enforces that.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polarizations {
    modes: BTreeMap<String, Vec<Complex64>>,
}

impl Polarizations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conventional plus/cross pair.
    pub fn plus_cross(plus: Vec<Complex64>, cross: Vec<Complex64>) -> Self {
        let mut polarizations = Self::new();
        polarizations.insert(PLUS, plus);
        polarizations.insert(CROSS, cross);
        polarizations
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Complex64>) {
        self.modes.insert(name.into(), values);
    }

    pub fn get(&self, name: &str) -> Option<&[Complex64]> {
        self.modes.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Complex64])> {
        self.modes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Fail unless every polarization has exactly `expected` samples.
    pub fn check_len(&self, expected: usize) -> Result<()> {
        self.modes
            .values()
            .try_for_each(|values| ensure_same_len(expected, values.len()))
    }

    /// Multiply every polarization element-wise by exp(-iΔφ).
    pub fn apply_phase(&mut self, phase: &[f64]) -> Result<()> {
        self.check_len(phase.len())?;
        let factors: Vec<Complex64> = phase.iter().map(|&phi| phase_factor(phi)).collect();
        for values in self.modes.values_mut() {
            for (h, factor) in values.iter_mut().zip(&factors) {
                *h *= *factor;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_apply_phase_rotates_each_mode() {
        let one = Complex64::new(1.0, 0.0);
        let mut pols = Polarizations::plus_cross(vec![one; 2], vec![Complex64::new(0.0, 2.0); 2]);
        pols.apply_phase(&[0.0, std::f64::consts::FRAC_PI_2]).unwrap();

        let plus = pols.get(PLUS).unwrap();
        assert_relative_eq!(plus[0].re, 1.0);
        assert_relative_eq!(plus[1].im, -1.0, epsilon = 1e-15);

        // i·2 · exp(-iπ/2) = 2
        let cross = pols.get(CROSS).unwrap();
        assert_relative_eq!(cross[1].re, 2.0, epsilon = 1e-15);
        assert_relative_eq!(cross[1].im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_apply_phase_length_mismatch() {
        let mut pols = Polarizations::plus_cross(vec![Complex64::default(); 3], vec![]);
        assert!(pols.apply_phase(&[0.0; 3]).is_err());
    }

    #[test]
    fn test_keys_preserved() {
        let mut pols = Polarizations::plus_cross(vec![], vec![]);
        pols.apply_phase(&[]).unwrap();
        assert_eq!(pols.names().collect::<Vec<_>>(), vec![CROSS, PLUS]);
    }
}
