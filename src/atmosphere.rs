//! Exponential atmosphere model for entry calculations.
//!
//! A single-scale-height exponential density profile is all the entry
//! integrator needs: fragmentation and peak energy deposition happen well
//! inside the troposphere/stratosphere where the exponential fit tracks the
//! standard atmosphere closely, and the dynamic-pressure breakup test only
//! cares about the density magnitude, not its fine structure.

use crate::constants::{SCALE_HEIGHT_M, SEA_LEVEL_AIR_DENSITY};

/// Air density at the given altitude (kg/m³).
///
/// `ρ(h) = ρ0 · exp(-h / H)` with ρ0 = 1.225 kg/m³ and H = 8500 m.
/// Pure and stateless; returns a positive finite value for any finite
/// altitude (altitudes below sea level extrapolate to denser air).
#[inline(always)]
pub fn air_density(altitude_m: f64) -> f64 {
    SEA_LEVEL_AIR_DENSITY * (-altitude_m / SCALE_HEIGHT_M).exp()
}

/// Air density for a batch of altitudes (kg/m³).
pub fn air_density_batch(altitudes_m: &[f64]) -> Vec<f64> {
    altitudes_m.iter().map(|&h| air_density(h)).collect()
}

/// Dynamic pressure `q = ½·ρ(h)·v²` (Pa) at the given altitude and speed.
///
/// This is the aerodynamic stress compared against material strength in the
/// fragmentation test.
#[inline(always)]
pub fn dynamic_pressure(altitude_m: f64, velocity_m_s: f64) -> f64 {
    0.5 * air_density(altitude_m) * velocity_m_s * velocity_m_s
}
