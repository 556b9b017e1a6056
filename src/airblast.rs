//! Airblast overpressure ring radii from scaled-distance (Hopkinson) laws.

use serde::Serialize;

use crate::constants::JOULES_PER_KG_TNT;

/// One overpressure damage tier with its scaled-distance constant.
#[derive(Debug, Clone, Copy)]
pub struct OverpressureTier {
    pub label: &'static str,
    pub overpressure_psi: f64,
    /// Hopkinson scaled distance Z = R / W^(1/3), in m per kg^(1/3) of TNT.
    pub scaled_distance: f64,
}

/// Default damage tiers. Scaled distances are literature point estimates
/// for a surface burst in free air.
pub const DEFAULT_TIERS: &[OverpressureTier] = &[
    OverpressureTier {
        label: "severe",
        overpressure_psi: 20.0,
        scaled_distance: 3.2,
    },
    OverpressureTier {
        label: "moderate",
        overpressure_psi: 5.0,
        scaled_distance: 6.5,
    },
    OverpressureTier {
        label: "light",
        overpressure_psi: 1.0,
        scaled_distance: 18.0,
    },
];

/// Named constants of the airblast model.
#[derive(Debug, Clone)]
pub struct AirblastScaling {
    pub tiers: &'static [OverpressureTier],
    /// e-folding altitude of the burst-height effectiveness correction (m).
    pub height_attenuation_scale_m: f64,
    /// Residual effectiveness floor of an arbitrarily high burst.
    pub residual_floor: f64,
}

impl Default for AirblastScaling {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS,
            height_attenuation_scale_m: 5500.0,
            residual_floor: 0.3,
        }
    }
}

/// One computed blast ring.
#[derive(Debug, Clone, Serialize)]
pub struct AirblastRing {
    pub label: &'static str,
    pub overpressure_psi: f64,
    pub radius_km: f64,
}

/// Ground radii (km) of the overpressure tiers for the given burst energy,
/// using default scaling constants.
///
/// `R = Z · W^(1/3)` with W the TNT-equivalent yield in kg; bursts above
/// the surface attenuate all radii by an exponential height factor floored
/// at the residual effectiveness. Non-positive energy yields no tiers.
pub fn compute_airblast_radii(energy_j: f64, burst_height_m: f64) -> Vec<AirblastRing> {
    compute_airblast_radii_scaled(energy_j, burst_height_m, &AirblastScaling::default())
}

/// Blast ring radii (km) with explicit scaling constants.
pub fn compute_airblast_radii_scaled(
    energy_j: f64,
    burst_height_m: f64,
    scaling: &AirblastScaling,
) -> Vec<AirblastRing> {
    if energy_j <= 0.0 {
        return Vec::new();
    }

    let tnt_kg = energy_j / JOULES_PER_KG_TNT;
    let cube_root_yield = tnt_kg.cbrt();

    let height_factor = if burst_height_m > 0.0 {
        (-burst_height_m / scaling.height_attenuation_scale_m)
            .exp()
            .max(scaling.residual_floor)
    } else {
        1.0
    };

    scaling
        .tiers
        .iter()
        .map(|tier| AirblastRing {
            label: tier.label,
            overpressure_psi: tier.overpressure_psi,
            radius_km: tier.scaled_distance * cube_root_yield * height_factor / 1000.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_energy_has_no_tiers() {
        assert!(compute_airblast_radii(0.0, 0.0).is_empty());
        assert!(compute_airblast_radii(-1.0e15, 10_000.0).is_empty());
    }

    #[test]
    fn test_surface_burst_scaled_distance() {
        // 1 kt TNT = 4.184e12 J → W = 1e6 kg → W^(1/3) = 100
        let rings = compute_airblast_radii(4.184e12, 0.0);
        assert_eq!(rings.len(), 3);
        let w_cbrt = 1.0e6f64.cbrt();
        assert!((rings[0].radius_km - 3.2 * w_cbrt / 1000.0).abs() < 1e-9);
        assert!((rings[2].radius_km - 18.0 * w_cbrt / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_tiers_ordered_severe_to_light() {
        let rings = compute_airblast_radii(1.0e15, 0.0);
        assert!(rings[0].radius_km < rings[1].radius_km);
        assert!(rings[1].radius_km < rings[2].radius_km);
        assert_eq!(rings[0].overpressure_psi, 20.0);
        assert_eq!(rings[2].overpressure_psi, 1.0);
    }

    #[test]
    fn test_height_correction_attenuates() {
        let surface = compute_airblast_radii(1.0e15, 0.0);
        let elevated = compute_airblast_radii(1.0e15, 3000.0);
        assert!(elevated[0].radius_km < surface[0].radius_km);
        let expected = (-3000.0f64 / 5500.0).exp();
        assert!((elevated[0].radius_km / surface[0].radius_km - expected).abs() < 1e-9);
    }

    #[test]
    fn test_height_correction_floors_at_residual() {
        let surface = compute_airblast_radii(1.0e15, 0.0);
        let very_high = compute_airblast_radii(1.0e15, 80_000.0);
        for (s, h) in surface.iter().zip(&very_high) {
            assert!((h.radius_km / s.radius_km - 0.3).abs() < 1e-9);
        }
    }
}
