//! Crater dimensions from π-group (Holsapple) scaling.

use std::f64::consts::PI;

use crate::constants::G_ACCEL_MPS2;

/// Named point-estimate constants of the crater scaling laws.
///
/// All values are literature fits, not derived quantities; expose and
/// override them here rather than editing formulas.
#[derive(Debug, Clone)]
pub struct CraterScaling {
    /// Coupling constant K1 of the π-group diameter law.
    pub coupling_constant: f64,
    /// Velocity exponent μ (0.41 for competent rock).
    pub velocity_exponent_mu: f64,
    /// Transient-to-final rim diameter expansion factor.
    pub transient_to_final: f64,
    /// Surface gravity used in the gravity-scaled group (m/s²).
    pub gravity: f64,
    /// Final diameter separating simple bowl craters from complex craters
    /// with flat floors and central peaks (m).
    pub simple_complex_transition_m: f64,
    /// Depth/diameter ratio of simple craters.
    pub simple_depth_ratio: f64,
    /// Depth/diameter ratio of complex craters.
    pub complex_depth_ratio: f64,
}

impl Default for CraterScaling {
    fn default() -> Self {
        Self {
            coupling_constant: 1.6,
            velocity_exponent_mu: 0.41,
            transient_to_final: 1.25,
            gravity: G_ACCEL_MPS2,
            simple_complex_transition_m: 3200.0,
            simple_depth_ratio: 0.15,
            complex_depth_ratio: 0.05,
        }
    }
}

/// Final crater rim diameter (m) with default scaling constants.
///
/// Combines the gravity-scaled group `π2 = g·d/v²`, the strength-scaled
/// group `π3 = Y/(ρ_t·v²)`, the impactor/target density ratio, and a
/// `sin(θ)^(1/3)` angle factor into a transient diameter, then applies the
/// fixed transient→final expansion. Returns 0 for non-positive diameter,
/// velocity, or density inputs.
pub fn compute_crater_diameter(
    impactor_diameter_m: f64,
    velocity_m_s: f64,
    impactor_density_kg_m3: f64,
    target_density_kg_m3: f64,
    angle_deg: f64,
    target_strength_pa: f64,
) -> f64 {
    compute_crater_diameter_scaled(
        impactor_diameter_m,
        velocity_m_s,
        impactor_density_kg_m3,
        target_density_kg_m3,
        angle_deg,
        target_strength_pa,
        &CraterScaling::default(),
    )
}

/// Final crater rim diameter (m) with explicit scaling constants.
pub fn compute_crater_diameter_scaled(
    impactor_diameter_m: f64,
    velocity_m_s: f64,
    impactor_density_kg_m3: f64,
    target_density_kg_m3: f64,
    angle_deg: f64,
    target_strength_pa: f64,
    scaling: &CraterScaling,
) -> f64 {
    if impactor_diameter_m <= 0.0
        || velocity_m_s <= 0.0
        || impactor_density_kg_m3 <= 0.0
        || target_density_kg_m3 <= 0.0
    {
        return 0.0;
    }

    let mu = scaling.velocity_exponent_mu;
    let impactor_mass =
        impactor_density_kg_m3 * PI / 6.0 * impactor_diameter_m.powi(3);

    let v_sq = velocity_m_s * velocity_m_s;
    let pi2 = scaling.gravity * impactor_diameter_m / v_sq;
    let pi3 = target_strength_pa.max(0.0) / (target_density_kg_m3 * v_sq);

    // Gravity and strength groups combine into a single crater-size group;
    // for a strengthless target this reduces to the familiar gravity-regime
    // power law.
    let pi_d = scaling.coupling_constant
        * (impactor_density_kg_m3 / target_density_kg_m3).cbrt()
        * (pi2 + pi3.powf((2.0 + mu) / 2.0)).powf(-mu / (2.0 + mu));

    let angle_factor = angle_deg.to_radians().sin().max(0.0).cbrt();
    let transient = pi_d * (impactor_mass / target_density_kg_m3).cbrt() * angle_factor;

    scaling.transient_to_final * transient
}

/// Crater depth (m) from the final rim diameter.
///
/// Simple bowl craters are much deeper relative to their size than complex
/// craters, whose floors rebound flat; the depth law is discontinuous at
/// the transition diameter by design.
pub fn compute_crater_depth(final_diameter_m: f64) -> f64 {
    compute_crater_depth_scaled(final_diameter_m, &CraterScaling::default())
}

/// Crater depth (m) with explicit scaling constants.
pub fn compute_crater_depth_scaled(final_diameter_m: f64, scaling: &CraterScaling) -> f64 {
    if final_diameter_m <= 0.0 {
        return 0.0;
    }
    if final_diameter_m < scaling.simple_complex_transition_m {
        scaling.simple_depth_ratio * final_diameter_m
    } else {
        scaling.complex_depth_ratio * final_diameter_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iron_impactor_kilometer_class_crater() {
        // 50 m iron at 12.8 km/s into rock: Barringer-class crater
        let d = compute_crater_diameter(50.0, 12_800.0, 7800.0, 2500.0, 45.0, 1.0e7);
        assert!((500.0..3000.0).contains(&d), "crater diameter {d} m");
    }

    #[test]
    fn test_degenerate_inputs_return_zero() {
        assert_eq!(compute_crater_diameter(0.0, 12_800.0, 7800.0, 2500.0, 45.0, 1.0e7), 0.0);
        assert_eq!(compute_crater_diameter(50.0, 0.0, 7800.0, 2500.0, 45.0, 1.0e7), 0.0);
        assert_eq!(compute_crater_diameter(50.0, 12_800.0, -1.0, 2500.0, 45.0, 1.0e7), 0.0);
        assert_eq!(compute_crater_diameter(50.0, 12_800.0, 7800.0, 0.0, 45.0, 1.0e7), 0.0);
    }

    #[test]
    fn test_diameter_grows_with_velocity() {
        let slow = compute_crater_diameter(50.0, 11_000.0, 3300.0, 2500.0, 45.0, 1.0e7);
        let fast = compute_crater_diameter(50.0, 25_000.0, 3300.0, 2500.0, 45.0, 1.0e7);
        assert!(fast > slow);
    }

    #[test]
    fn test_shallow_angle_shrinks_crater() {
        let steep = compute_crater_diameter(50.0, 12_800.0, 3300.0, 2500.0, 90.0, 1.0e7);
        let grazing = compute_crater_diameter(50.0, 12_800.0, 3300.0, 2500.0, 10.0, 1.0e7);
        assert!(grazing < steep);
    }

    #[test]
    fn test_transient_to_final_expansion_applied() {
        let mut scaling = CraterScaling::default();
        let d_final = compute_crater_diameter_scaled(50.0, 12_800.0, 3300.0, 2500.0, 45.0, 1.0e7, &scaling);
        scaling.transient_to_final = 1.0;
        let d_transient = compute_crater_diameter_scaled(50.0, 12_800.0, 3300.0, 2500.0, 45.0, 1.0e7, &scaling);
        assert!((d_final / d_transient - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_depth_discontinuity_at_transition() {
        // Just below the 3.2 km transition: simple bowl crater
        assert!((compute_crater_depth(2999.0) - 0.15 * 2999.0).abs() < 1e-9);
        // Just above: complex crater — shallower in absolute terms
        assert!((compute_crater_depth(3201.0) - 0.05 * 3201.0).abs() < 1e-9);
        assert!(compute_crater_depth(3201.0) < compute_crater_depth(2999.0));
    }

    #[test]
    fn test_depth_of_no_crater_is_zero() {
        assert_eq!(compute_crater_depth(0.0), 0.0);
        assert_eq!(compute_crater_depth(-10.0), 0.0);
    }
}
