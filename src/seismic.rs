//! Seismic shaking from ground impacts.

/// Named point-estimate constants of the seismic coupling model.
#[derive(Debug, Clone)]
pub struct SeismicCoupling {
    /// Fraction of impact kinetic energy radiated as seismic energy.
    pub seismic_efficiency: f64,
    /// Gutenberg–Richter slope in `log10(E) = slope·M + intercept`.
    pub gutenberg_richter_slope: f64,
    /// Gutenberg–Richter intercept.
    pub gutenberg_richter_intercept: f64,
    /// Magnitude below which no damage radius is reported.
    pub damage_threshold_magnitude: f64,
}

impl Default for SeismicCoupling {
    fn default() -> Self {
        Self {
            seismic_efficiency: 5.0e-4,
            gutenberg_richter_slope: 1.5,
            gutenberg_richter_intercept: 4.8,
            damage_threshold_magnitude: 4.0,
        }
    }
}

/// Richter-scale magnitude of the impact-generated ground shaking, using
/// default coupling constants.
///
/// Airbursts couple no meaningful energy into the ground and return exactly
/// 0, as do non-positive energies. The result is never negative.
pub fn compute_seismic_magnitude(energy_j: f64, is_airburst: bool) -> f64 {
    compute_seismic_magnitude_coupled(energy_j, is_airburst, &SeismicCoupling::default())
}

/// Richter-scale magnitude with explicit coupling constants.
pub fn compute_seismic_magnitude_coupled(
    energy_j: f64,
    is_airburst: bool,
    coupling: &SeismicCoupling,
) -> f64 {
    if is_airburst || energy_j <= 0.0 {
        return 0.0;
    }
    let seismic_energy = coupling.seismic_efficiency * energy_j;
    if seismic_energy <= 0.0 {
        return 0.0;
    }
    let magnitude = (seismic_energy.log10() - coupling.gutenberg_richter_intercept)
        / coupling.gutenberg_richter_slope;
    magnitude.max(0.0)
}

/// Radius (km) inside which structural damage from ground shaking is
/// expected: `10^(0.5·M - 1.8)`, floored at 0 below magnitude 4.
pub fn compute_seismic_damage_radius(magnitude: f64) -> f64 {
    compute_seismic_damage_radius_coupled(magnitude, &SeismicCoupling::default())
}

/// Damage radius (km) with explicit coupling constants.
pub fn compute_seismic_damage_radius_coupled(magnitude: f64, coupling: &SeismicCoupling) -> f64 {
    if magnitude < coupling.damage_threshold_magnitude {
        return 0.0;
    }
    10.0f64.powf(0.5 * magnitude - 1.8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airburst_magnitude_is_exactly_zero() {
        assert_eq!(compute_seismic_magnitude(1.0e18, true), 0.0);
        assert_eq!(compute_seismic_magnitude(0.0, true), 0.0);
    }

    #[test]
    fn test_non_positive_energy_is_zero() {
        assert_eq!(compute_seismic_magnitude(0.0, false), 0.0);
        assert_eq!(compute_seismic_magnitude(-1.0e15, false), 0.0);
    }

    #[test]
    fn test_gutenberg_richter_inversion() {
        // E = 4e16 J → E_s = 2e13 J → M = (log10(2e13) - 4.8) / 1.5
        let m = compute_seismic_magnitude(4.0e16, false);
        let expected = ((2.0e13f64).log10() - 4.8) / 1.5;
        assert!((m - expected).abs() < 1e-12);
        assert!((5.0..7.0).contains(&m));
    }

    #[test]
    fn test_magnitude_never_negative() {
        // Tiny energies would invert to a negative magnitude; clamp to 0
        assert_eq!(compute_seismic_magnitude(1.0, false), 0.0);
    }

    #[test]
    fn test_damage_radius_thresholded() {
        assert_eq!(compute_seismic_damage_radius(3.9), 0.0);
        let r = compute_seismic_damage_radius(6.0);
        assert!((r - 10.0f64.powf(1.2)).abs() < 1e-9);
    }

    #[test]
    fn test_damage_radius_grows_with_magnitude() {
        assert!(compute_seismic_damage_radius(7.0) > compute_seismic_damage_radius(5.0));
    }
}
