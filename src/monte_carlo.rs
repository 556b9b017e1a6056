//! Parameter-uncertainty sweeps over the entry simulation.
//!
//! Observational uncertainty on a single object (speed, angle, density,
//! strength) is propagated by Gaussian sampling: every draw becomes one
//! member of a single batched entry run, and summary statistics are
//! computed over the per-object results. Execution is sequential — the
//! engine is single-threaded by contract.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use crate::entry_api::{run_entry_simulation, EntryConfig, EntryError, EntryInputs};
use crate::integrator::TerminationReason;

/// Nominal single-object scenario whose parameters carry uncertainty.
#[derive(Debug, Clone)]
pub struct SweepScenario {
    pub mass_kg: f64,
    pub diameter_m: f64,
    pub velocity_kms: f64,
    pub angle_deg: f64,
    pub density_kgm3: f64,
    pub strength_pa: f64,
}

impl Default for SweepScenario {
    fn default() -> Self {
        Self {
            mass_kg: 1.2e7,
            diameter_m: 20.0,
            velocity_kms: 19.16,
            angle_deg: 18.0,
            density_kgm3: 3300.0,
            strength_pa: 1.0e7,
        }
    }
}

/// Standard deviations of the sampled parameters plus sweep bookkeeping.
#[derive(Debug, Clone)]
pub struct UncertaintyParams {
    pub num_samples: usize,
    pub velocity_std_kms: f64,
    pub angle_std_deg: f64,
    pub density_std_kgm3: f64,
    pub strength_std_pa: f64,
    /// Fixed seed for reproducible sweeps; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for UncertaintyParams {
    fn default() -> Self {
        Self {
            num_samples: 1000,
            velocity_std_kms: 1.0,
            angle_std_deg: 2.0,
            density_std_kgm3: 300.0,
            strength_std_pa: 5.0e6,
            seed: None,
        }
    }
}

/// Summary statistics of one output field across the sweep.
#[derive(Debug, Clone, Serialize)]
pub struct FieldStatistics {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl FieldStatistics {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        Some(Self {
            mean,
            std,
            min,
            max,
        })
    }
}

/// Aggregated results of an uncertainty sweep.
#[derive(Debug, Clone, Serialize)]
pub struct UncertaintyResults {
    pub valid_runs: usize,
    pub failed_runs: usize,
    /// Fraction of valid runs classified as airbursts.
    pub airburst_fraction: f64,
    pub impact_velocity_kms: FieldStatistics,
    pub energy_loss_fraction: FieldStatistics,
    /// Statistics over the runs that fragmented; `None` when none did.
    pub breakup_altitude_m: Option<FieldStatistics>,
}

/// Run a Gaussian uncertainty sweep around the nominal scenario.
///
/// Each draw is clamped into its physically meaningful range before entry;
/// draws that still come out degenerate are rejected per-object by the
/// simulation and counted as failed runs.
pub fn run_uncertainty_sweep(
    scenario: &SweepScenario,
    config: &EntryConfig,
    params: &UncertaintyParams,
) -> Result<UncertaintyResults, EntryError> {
    if params.num_samples == 0 {
        return Err("num_samples must be positive".into());
    }

    let mut rng: StdRng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let velocity_dist = Normal::new(scenario.velocity_kms, params.velocity_std_kms)
        .map_err(|e| format!("invalid velocity distribution: {e}"))?;
    let angle_dist = Normal::new(scenario.angle_deg, params.angle_std_deg)
        .map_err(|e| format!("invalid angle distribution: {e}"))?;
    let density_dist = Normal::new(scenario.density_kgm3, params.density_std_kgm3)
        .map_err(|e| format!("invalid density distribution: {e}"))?;
    let strength_dist = Normal::new(scenario.strength_pa, params.strength_std_pa)
        .map_err(|e| format!("invalid strength distribution: {e}"))?;

    let n = params.num_samples;
    let mut velocities = Vec::with_capacity(n);
    let mut angles = Vec::with_capacity(n);
    let mut densities = Vec::with_capacity(n);
    let mut strengths = Vec::with_capacity(n);
    for _ in 0..n {
        velocities.push(velocity_dist.sample(&mut rng).max(0.01));
        angles.push(angle_dist.sample(&mut rng).clamp(1.0, 90.0));
        densities.push(density_dist.sample(&mut rng).max(1.0));
        strengths.push(strength_dist.sample(&mut rng).max(1.0));
    }

    let inputs = EntryInputs {
        mass_kg: scenario.mass_kg.into(),
        diameter_m: scenario.diameter_m.into(),
        velocity_kms: velocities.into(),
        angle_deg: angles.into(),
        density_kgm3: densities.into(),
        strength_pa: strengths.into(),
    };

    let results = run_entry_simulation(&inputs, config)?;

    let valid: Vec<_> = results
        .iter()
        .filter(|r| r.termination != TerminationReason::InvalidParameter)
        .collect();
    let failed_runs = results.len() - valid.len();
    if valid.is_empty() {
        return Err("no successful simulations in sweep".into());
    }

    let airbursts = valid.iter().filter(|r| r.is_airburst).count();
    let impact_velocities: Vec<f64> = valid.iter().map(|r| r.impact_velocity_kms).collect();
    let loss_fractions: Vec<f64> = valid.iter().map(|r| r.energy_loss_fraction).collect();
    let breakup_altitudes: Vec<f64> =
        valid.iter().filter_map(|r| r.breakup_altitude_m).collect();

    Ok(UncertaintyResults {
        valid_runs: valid.len(),
        failed_runs,
        airburst_fraction: airbursts as f64 / valid.len() as f64,
        impact_velocity_kms: FieldStatistics::from_values(&impact_velocities)
            .expect("valid runs present"),
        energy_loss_fraction: FieldStatistics::from_values(&loss_fractions)
            .expect("valid runs present"),
        breakup_altitude_m: FieldStatistics::from_values(&breakup_altitudes),
    })
}
