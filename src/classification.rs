//! Airburst vs. ground-impact classification of integrator output.

use crate::entry_api::{EntryConfig, ImpactorParameters};
use crate::integrator::ObjectOutcome;

/// Peak energy deposition must sit at least this far above the surface for
/// an airburst call (m).
pub const AIRBURST_ALTITUDE_MARGIN_M: f64 = 1000.0;

/// An airburst must have dissipated at least this fraction of the entry
/// energy before reaching the ground.
pub const AIRBURST_MAX_ENERGY_RATIO: f64 = 0.2;

/// Empirical large-impactor override (m). Bodies wider than this are always
/// classified as ground impactors: in practice they retain enough momentum
/// to reach the surface even when the energy/altitude criteria alone would
/// call an airburst. This is a tuned policy threshold, not a physical
/// derivation — keep it as-is when recalibrating the physical criteria.
pub const LARGE_IMPACTOR_DIAMETER_M: f64 = 50.0;

/// Classify one object's entry outcome.
///
/// ```text
/// is_airburst := has_broken
///             AND peak_deposition_altitude > surface_elevation + 1000 m
///             AND final_energy / initial_energy < 0.2
///             AND diameter ≤ 50 m
/// ```
pub fn classify_airburst(
    outcome: &ObjectOutcome,
    params: &ImpactorParameters,
    config: &EntryConfig,
) -> bool {
    if params.diameter_m > LARGE_IMPACTOR_DIAMETER_M {
        return false;
    }
    if outcome.breakup_altitude_m.is_none() {
        return false;
    }
    if outcome.peak_deposition_altitude_m <= config.surface_elevation_m + AIRBURST_ALTITUDE_MARGIN_M {
        return false;
    }
    if outcome.initial_energy_j <= 0.0 {
        return false;
    }
    outcome.final_energy_j / outcome.initial_energy_j < AIRBURST_MAX_ENERGY_RATIO
}
