/// Physical constants used in entry and impact-effects calculations

/// Gravitational acceleration at the surface (m/s²)
///
/// Default for the entry integrator; overridable through
/// `EntryConfig::gravity` for sensitivity studies.
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Air density at sea level (kg/m³)
pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;

/// Scale height of the exponential atmosphere model (m)
///
/// Density falls by a factor of e every SCALE_HEIGHT_M of altitude.
/// 8500 m is the standard density scale height of the lower atmosphere.
pub const SCALE_HEIGHT_M: f64 = 8500.0;

/// Mean Earth radius (m), used for line-of-sight horizon limits
pub const EARTH_RADIUS_M: f64 = 6.371e6;

/// Energy equivalence: joules per megaton of TNT
///
/// Downstream reporting is frequently expressed in megatons-TNT; this
/// conversion is reproduced exactly, not rounded.
pub const JOULES_PER_MEGATON_TNT: f64 = 4.184e15;

/// Energy equivalence: joules per kiloton of TNT
pub const JOULES_PER_KILOTON_TNT: f64 = 4.184e12;

/// Energy equivalence: joules per metric ton of TNT
pub const JOULES_PER_TON_TNT: f64 = 4.184e9;

/// Energy equivalence: joules per kilogram of TNT
pub const JOULES_PER_KG_TNT: f64 = 4.184e6;

/// Velocity below which a descending object is treated as having reached
/// terminal fall and its entry integration stops (m/s)
pub const VELOCITY_FLOOR_MPS: f64 = 10.0;

// Numerical stability constants

/// General numerical tolerance for floating point comparisons
pub const NUMERICAL_TOLERANCE: f64 = 1e-9;

/// Minimum velocity magnitude considered nonzero in derivative evaluation
pub const MIN_VELOCITY_THRESHOLD: f64 = 1e-6;

/// Minimum denominator magnitude for division guards
pub const MIN_DIVISION_THRESHOLD: f64 = 1e-12;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tnt_equivalence_chain() {
        assert_eq!(JOULES_PER_MEGATON_TNT, 4.184e15);
        assert!((JOULES_PER_MEGATON_TNT / JOULES_PER_TON_TNT - 1e6).abs() < 1e-6);
        assert!((JOULES_PER_KILOTON_TNT / JOULES_PER_KG_TNT - 1e6).abs() < 1e-6);
    }
}
