//! Thermal-radiation ignition radius.

use std::f64::consts::PI;

use crate::constants::EARTH_RADIUS_M;

/// Named point-estimate constants of the thermal radiation model.
#[derive(Debug, Clone)]
pub struct ThermalScaling {
    /// Fraction of the released energy radiated thermally by an airburst.
    pub airburst_efficiency: f64,
    /// Fraction radiated thermally by a ground impact.
    pub impact_efficiency: f64,
    /// Radiant exposure that ignites common materials (J/m²).
    pub ignition_flux_j_m2: f64,
    /// Burst altitude assumed for the airburst horizon cap (m).
    pub assumed_burst_altitude_m: f64,
}

impl Default for ThermalScaling {
    fn default() -> Self {
        Self {
            airburst_efficiency: 0.30,
            impact_efficiency: 0.10,
            ignition_flux_j_m2: 2.5e5,
            assumed_burst_altitude_m: 8000.0,
        }
    }
}

/// Radius (m) inside which the thermal pulse exceeds the ignition flux,
/// using default scaling constants.
///
/// Solves `η·E = 4π·r²·F` for r. Airbursts radiate more efficiently but
/// their reach is capped by the line-of-sight horizon at the assumed burst
/// altitude. Non-positive energy yields 0.
pub fn compute_thermal_radius(energy_j: f64, is_airburst: bool) -> f64 {
    compute_thermal_radius_scaled(energy_j, is_airburst, &ThermalScaling::default())
}

/// Thermal ignition radius (m) with explicit scaling constants.
pub fn compute_thermal_radius_scaled(
    energy_j: f64,
    is_airburst: bool,
    scaling: &ThermalScaling,
) -> f64 {
    if energy_j <= 0.0 {
        return 0.0;
    }
    let efficiency = if is_airburst {
        scaling.airburst_efficiency
    } else {
        scaling.impact_efficiency
    };
    let radiated = efficiency * energy_j;
    let radius = (radiated / (4.0 * PI * scaling.ignition_flux_j_m2)).sqrt();

    if is_airburst {
        let h = scaling.assumed_burst_altitude_m;
        let horizon = (2.0 * EARTH_RADIUS_M * h + h * h).sqrt();
        radius.min(horizon)
    } else {
        radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_energy_is_zero() {
        assert_eq!(compute_thermal_radius(0.0, true), 0.0);
        assert_eq!(compute_thermal_radius(-1.0, false), 0.0);
    }

    #[test]
    fn test_inverse_square_solution() {
        // Ground impact: r = sqrt(0.1·E / (4π·F))
        let e = 1.0e15;
        let r = compute_thermal_radius(e, false);
        let expected = (0.1 * e / (4.0 * PI * 2.5e5)).sqrt();
        assert!((r - expected).abs() < 1e-6);
    }

    #[test]
    fn test_airburst_radiates_more_efficiently() {
        let e = 1.0e14;
        assert!(compute_thermal_radius(e, true) > compute_thermal_radius(e, false));
    }

    #[test]
    fn test_airburst_capped_by_horizon() {
        // Energy large enough that the uncapped radius exceeds the horizon
        let scaling = ThermalScaling::default();
        let h = scaling.assumed_burst_altitude_m;
        let horizon = (2.0 * EARTH_RADIUS_M * h + h * h).sqrt();
        let r = compute_thermal_radius(1.0e22, true);
        assert!((r - horizon).abs() < 1e-6);
        // Ground impacts are not horizon-limited
        assert!(compute_thermal_radius(1.0e22, false) > horizon);
    }
}
