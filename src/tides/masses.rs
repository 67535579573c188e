use crate::error::{Result, ensure_positive};

/// Component masses of a binary in solar masses
///
/// Construction validates that both masses are finite and positive, so the
/// derived quantities below never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassPair {
    mass_1: f64,
    mass_2: f64,
}

impl MassPair {
    pub fn new(mass_1: f64, mass_2: f64) -> Result<Self> {
        Ok(Self {
            mass_1: ensure_positive("mass_1", mass_1)?,
            mass_2: ensure_positive("mass_2", mass_2)?,
        })
    }

    /// Build from the chirp mass and mass ratio q = m2/m1 the sampler draws.
    ///
    /// M = Mc (1+q)^(6/5) / q^(3/5), m1 = M / (1+q), m2 = q m1.
    pub fn from_chirp_mass_and_mass_ratio(chirp_mass: f64, mass_ratio: f64) -> Result<Self> {
        let chirp_mass = ensure_positive("chirp_mass", chirp_mass)?;
        let q = ensure_positive("mass_ratio", mass_ratio)?;
        let total = chirp_mass * (1.0 + q).powf(1.2) / q.powf(0.6);
        let mass_1 = total / (1.0 + q);
        Self::new(mass_1, q * mass_1)
    }

    pub fn mass_1(&self) -> f64 {
        self.mass_1
    }

    pub fn mass_2(&self) -> f64 {
        self.mass_2
    }

    pub fn total_mass(&self) -> f64 {
        self.mass_1 + self.mass_2
    }

    /// η = m1 m2 / M^2, at most 1/4 (equal masses)
    pub fn symmetric_mass_ratio(&self) -> f64 {
        let total = self.total_mass();
        self.mass_1 * self.mass_2 / (total * total)
    }

    /// q = m2 / m1 (not clamped; exceeds one when m2 > m1)
    pub fn mass_ratio(&self) -> f64 {
        self.mass_2 / self.mass_1
    }

    pub fn chirp_mass(&self) -> f64 {
        self.total_mass() * self.symmetric_mass_ratio().powf(0.6)
    }
}
