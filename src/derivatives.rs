//! Pointwise derivative evaluation for the entry equations of motion.
//!
//! State per object is the triple (v, h, m): speed along the descent path,
//! altitude, and mass. The descent line is fixed by the entry angle, so the
//! equations stay scalar:
//!
//! ```text
//! dv/dt = -Fd/m - g·sin(θ)
//! dh/dt = -v·sin(θ)
//! dm/dt = -(C_h · ρ_air · A · v³) / (2Q)
//! ```
//!
//! with `Fd = ½·Cd·ρ_air·A·v²` and `A = π·r_eff²`. The sign convention of
//! the velocity equation follows the source system exactly; path speed is
//! monotonically non-increasing under it.

use std::f64::consts::PI;

use crate::atmosphere::air_density;
use crate::breakup::pancake_growth_factor;
use crate::constants::{MIN_DIVISION_THRESHOLD, MIN_VELOCITY_THRESHOLD};
use crate::entry_api::{EntryConfig, ImpactorParameters};

/// Effective cross-section radius (m) from current mass and bulk density,
/// assuming a sphere, inflated post-breakup by the pancake growth factor.
///
/// A non-finite intermediate (mass or density degenerate) falls back to the
/// geometric radius from the initial diameter.
pub fn effective_radius(
    mass_kg: f64,
    time_since_breakup_s: Option<f64>,
    params: &ImpactorParameters,
    config: &EntryConfig,
) -> f64 {
    let geometric_fallback = params.diameter_m / 2.0;

    let base = if mass_kg > 0.0 && params.bulk_density_kg_m3 > 0.0 {
        (3.0 * mass_kg / (4.0 * PI * params.bulk_density_kg_m3)).cbrt()
    } else {
        0.0
    };
    let base = if base.is_finite() { base } else { geometric_fallback };

    match time_since_breakup_s {
        Some(t) => {
            base * pancake_growth_factor(t, config.pancake_max_growth, config.pancake_time_constant_s)
        }
        None => base,
    }
}

/// Derivatives `[dv/dt, dh/dt, dm/dt]` at the given state.
///
/// `time_since_breakup_s` is `None` while intact; for RK4 inner stages the
/// caller passes the stage-offset timer so the pancake factor advances
/// consistently within the step. Non-physical states (mass or velocity at
/// or below zero) degrade to drag-free, ablation-free motion — the
/// integrator's clamps and termination checks deal with them after the
/// step combination.
pub fn entry_derivatives(
    velocity_m_s: f64,
    altitude_m: f64,
    mass_kg: f64,
    time_since_breakup_s: Option<f64>,
    params: &ImpactorParameters,
    config: &EntryConfig,
) -> [f64; 3] {
    let sin_theta = params.entry_angle_rad.sin();

    if velocity_m_s <= MIN_VELOCITY_THRESHOLD || mass_kg <= MIN_DIVISION_THRESHOLD {
        return [-config.gravity * sin_theta, -velocity_m_s.max(0.0) * sin_theta, 0.0];
    }

    let rho = air_density(altitude_m);
    let radius = effective_radius(mass_kg, time_since_breakup_s, params, config);
    let area = PI * radius * radius;

    let drag_force = 0.5 * config.drag_coefficient * rho * area * velocity_m_s * velocity_m_s;
    let dv_dt = -drag_force / mass_kg - config.gravity * sin_theta;
    let dh_dt = -velocity_m_s * sin_theta;
    let dm_dt = -(config.heat_transfer_coefficient * rho * area * velocity_m_s.powi(3))
        / (2.0 * config.ablation_heat_j_per_kg);

    [dv_dt, dh_dt, dm_dt]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry_api::EntryConfig;

    fn params() -> ImpactorParameters {
        ImpactorParameters {
            diameter_m: 20.0,
            bulk_density_kg_m3: 3300.0,
            material_strength_pa: 1.0e7,
            entry_angle_rad: (45.0f64).to_radians(),
        }
    }

    #[test]
    fn test_effective_radius_matches_sphere() {
        let p = params();
        let config = EntryConfig::default();
        // Mass of a 20 m sphere at 3300 kg/m³ gives back radius 10 m
        let mass = 3300.0 * std::f64::consts::PI / 6.0 * 20.0f64.powi(3);
        let r = effective_radius(mass, None, &p, &config);
        assert!((r - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_effective_radius_pancake_inflation() {
        let p = params();
        let config = EntryConfig::default();
        let mass = 3300.0 * std::f64::consts::PI / 6.0 * 20.0f64.powi(3);
        let intact = effective_radius(mass, None, &p, &config);
        let at_breakup = effective_radius(mass, Some(0.0), &p, &config);
        let spread = effective_radius(mass, Some(100.0), &p, &config);
        assert!((intact - at_breakup).abs() < 1e-12);
        assert!((spread - intact * config.pancake_max_growth).abs() < 1e-6);
    }

    #[test]
    fn test_effective_radius_degenerate_mass() {
        let p = params();
        let config = EntryConfig::default();
        assert_eq!(effective_radius(0.0, None, &p, &config), 0.0);
        assert_eq!(effective_radius(-5.0, None, &p, &config), 0.0);
    }

    #[test]
    fn test_derivatives_signs() {
        let p = params();
        let config = EntryConfig::default();
        let mass = 3300.0 * std::f64::consts::PI / 6.0 * 20.0f64.powi(3);
        let [dv, dh, dm] = entry_derivatives(19_000.0, 30_000.0, mass, None, &p, &config);
        assert!(dv < 0.0, "speed must decay: {dv}");
        assert!(dh < 0.0, "altitude must decay: {dh}");
        assert!(dm < 0.0, "mass must ablate: {dm}");
    }

    #[test]
    fn test_derivatives_zero_velocity_guard() {
        let p = params();
        let config = EntryConfig::default();
        let [dv, dh, dm] = entry_derivatives(0.0, 30_000.0, 1.0e6, None, &p, &config);
        assert!((dv + config.gravity * p.entry_angle_rad.sin()).abs() < 1e-12);
        assert_eq!(dh, 0.0);
        assert_eq!(dm, 0.0);
    }

    #[test]
    fn test_derivatives_drag_scales_with_density() {
        let p = params();
        let config = EntryConfig::default();
        let mass = 3300.0 * std::f64::consts::PI / 6.0 * 20.0f64.powi(3);
        let [dv_high, ..] = entry_derivatives(19_000.0, 80_000.0, mass, None, &p, &config);
        let [dv_low, ..] = entry_derivatives(19_000.0, 20_000.0, mass, None, &p, &config);
        // Lower altitude, denser air, stronger deceleration
        assert!(dv_low < dv_high);
    }
}
