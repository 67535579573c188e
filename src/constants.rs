//! Physical constants
//!
//! Nominal IAU 2015 values, matching what the usual astronomy toolkits ship.
//! Everything is SI unless the name says otherwise.

/// Solar mass parameter GM_sun in m^3 s^-2.
pub const GM_SUN_SI: f64 = 1.3271244e20;

/// Speed of light in vacuum in m s^-1.
pub const C_SI: f64 = 299_792_458.0;

/// Solar mass expressed as a time, GM_sun / c^3, in seconds.
///
/// Multiplying by a mass in solar masses and a frequency in Hz yields the
/// dimensionless combination that enters post-Newtonian phase expansions.
pub const GC: f64 = GM_SUN_SI / (C_SI * C_SI * C_SI);
