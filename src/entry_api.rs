//! Public API for entry simulation and effects assembly.
//!
//! This module is the boundary where caller-friendly units are accepted:
//! velocity in km/s and entry angle in degrees. Everything past
//! `run_entry_simulation` is SI.

use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::airblast::{compute_airblast_radii_scaled, AirblastRing, AirblastScaling};
use crate::classification::classify_airburst;
use crate::constants::JOULES_PER_MEGATON_TNT;
use crate::crater::{compute_crater_depth_scaled, compute_crater_diameter_scaled, CraterScaling};
use crate::integrator::{integrate_batch, EntrySetup, TerminationReason};
use crate::seismic::{
    compute_seismic_damage_radius_coupled, compute_seismic_magnitude_coupled, SeismicCoupling,
};
use crate::thermal::{compute_thermal_radius_scaled, ThermalScaling};
use crate::trajectory::TrajectorySample;

/// Error type for entry simulation setup.
///
/// Only structural problems are fatal: a bad configuration or a batch whose
/// array-valued fields disagree on length. Per-object parameter problems
/// degrade that object's result instead (see `TerminationReason`).
#[derive(Debug)]
pub enum EntryError {
    InvalidConfig(String),
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntryError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            EntryError::ShapeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "batch field `{field}` has length {found}, expected {expected}"
            ),
        }
    }
}

impl Error for EntryError {}

impl From<String> for EntryError {
    fn from(msg: String) -> Self {
        EntryError::InvalidConfig(msg)
    }
}

impl From<&str> for EntryError {
    fn from(msg: &str) -> Self {
        EntryError::InvalidConfig(msg.to_string())
    }
}

/// A per-object input field: one value broadcast across the batch, or one
/// value per object.
#[derive(Debug, Clone)]
pub enum ParamField {
    Scalar(f64),
    Values(Vec<f64>),
}

impl ParamField {
    fn explicit_len(&self) -> Option<usize> {
        match self {
            ParamField::Scalar(_) => None,
            ParamField::Values(v) => Some(v.len()),
        }
    }

    fn get(&self, index: usize) -> f64 {
        match self {
            ParamField::Scalar(v) => *v,
            ParamField::Values(v) => v[index],
        }
    }
}

impl From<f64> for ParamField {
    fn from(v: f64) -> Self {
        ParamField::Scalar(v)
    }
}

impl From<Vec<f64>> for ParamField {
    fn from(v: Vec<f64>) -> Self {
        ParamField::Values(v)
    }
}

/// Caller-supplied batch of impactors. Every field is broadcastable: scalar
/// fields repeat for all N objects, array fields must agree on N.
#[derive(Debug, Clone)]
pub struct EntryInputs {
    pub mass_kg: ParamField,
    pub diameter_m: ParamField,
    /// Entry speed in km/s — converted to SI at this boundary only.
    pub velocity_kms: ParamField,
    /// Entry angle from horizontal in degrees — converted at this boundary
    /// only.
    pub angle_deg: ParamField,
    pub density_kgm3: ParamField,
    pub strength_pa: ParamField,
}

impl Default for EntryInputs {
    fn default() -> Self {
        // A Chelyabinsk-class stony impactor
        Self::uniform(1.2e7, 20.0, 19.16, 18.0, 3300.0, 1.0e7)
    }
}

impl EntryInputs {
    /// Single-object (or all-scalar broadcast) inputs.
    pub fn uniform(
        mass_kg: f64,
        diameter_m: f64,
        velocity_kms: f64,
        angle_deg: f64,
        density_kgm3: f64,
        strength_pa: f64,
    ) -> Self {
        Self {
            mass_kg: mass_kg.into(),
            diameter_m: diameter_m.into(),
            velocity_kms: velocity_kms.into(),
            angle_deg: angle_deg.into(),
            density_kgm3: density_kgm3.into(),
            strength_pa: strength_pa.into(),
        }
    }

    fn fields(&self) -> [(&'static str, &ParamField); 6] {
        [
            ("mass_kg", &self.mass_kg),
            ("diameter_m", &self.diameter_m),
            ("velocity_kms", &self.velocity_kms),
            ("angle_deg", &self.angle_deg),
            ("density_kgm3", &self.density_kgm3),
            ("strength_pa", &self.strength_pa),
        ]
    }

    /// Broadcast all fields against the batch size and convert boundary
    /// units to SI.
    fn resolve(&self) -> Result<Vec<EntrySetup>, EntryError> {
        let n = self
            .fields()
            .iter()
            .filter_map(|(_, f)| f.explicit_len())
            .max()
            .unwrap_or(1);

        for (name, field) in self.fields() {
            if let Some(len) = field.explicit_len() {
                if len != n {
                    return Err(EntryError::ShapeMismatch {
                        field: name,
                        expected: n,
                        found: len,
                    });
                }
            }
        }

        Ok((0..n)
            .map(|i| EntrySetup {
                initial_mass_kg: self.mass_kg.get(i),
                initial_velocity_m_s: self.velocity_kms.get(i) * 1000.0,
                params: ImpactorParameters {
                    diameter_m: self.diameter_m.get(i),
                    bulk_density_kg_m3: self.density_kgm3.get(i),
                    material_strength_pa: self.strength_pa.get(i),
                    entry_angle_rad: self.angle_deg.get(i).to_radians(),
                },
            })
            .collect())
    }
}

/// Immutable per-object parameters after broadcast, in SI units.
#[derive(Debug, Clone)]
pub struct ImpactorParameters {
    pub diameter_m: f64,
    pub bulk_density_kg_m3: f64,
    pub material_strength_pa: f64,
    pub entry_angle_rad: f64,
}

/// Entry-simulation configuration shared by the whole batch.
#[derive(Debug, Clone)]
pub struct EntryConfig {
    pub surface_elevation_m: f64,
    /// Sphere drag coefficient.
    pub drag_coefficient: f64,
    pub gravity: f64,
    /// Fraction of the incident aerodynamic heating that goes into
    /// ablation.
    pub heat_transfer_coefficient: f64,
    /// Heat of ablation Q (J/kg).
    pub ablation_heat_j_per_kg: f64,
    pub time_step_s: f64,
    pub max_steps: usize,
    pub start_altitude_m: f64,
    pub capture_history: bool,
    /// Time constant of post-breakup debris-cloud spreading (s).
    pub pancake_time_constant_s: f64,
    /// Cap on the post-breakup effective-radius growth factor.
    pub pancake_max_growth: f64,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            surface_elevation_m: 0.0,
            drag_coefficient: 0.47,
            gravity: 9.81,
            heat_transfer_coefficient: 0.1,
            ablation_heat_j_per_kg: 8.0e6,
            time_step_s: 0.05,
            max_steps: 20_000,
            start_altitude_m: 100_000.0,
            capture_history: false,
            pancake_time_constant_s: 1.0,
            pancake_max_growth: 5.0,
        }
    }
}

impl EntryConfig {
    /// Reject unusable configurations before any stepping begins.
    pub fn validate(&self) -> Result<(), EntryError> {
        if !(self.time_step_s > 0.0 && self.time_step_s.is_finite()) {
            return Err(format!("time_step_s must be positive, got {}", self.time_step_s).into());
        }
        if self.max_steps == 0 {
            return Err("max_steps must be positive".into());
        }
        if !(self.drag_coefficient > 0.0) {
            return Err(format!(
                "drag_coefficient must be positive, got {}",
                self.drag_coefficient
            )
            .into());
        }
        if !(self.gravity > 0.0) {
            return Err(format!("gravity must be positive, got {}", self.gravity).into());
        }
        if !(self.heat_transfer_coefficient > 0.0) {
            return Err(format!(
                "heat_transfer_coefficient must be positive, got {}",
                self.heat_transfer_coefficient
            )
            .into());
        }
        if !(self.ablation_heat_j_per_kg > 0.0) {
            return Err(format!(
                "ablation_heat_j_per_kg must be positive, got {}",
                self.ablation_heat_j_per_kg
            )
            .into());
        }
        if !(self.pancake_time_constant_s > 0.0) {
            return Err(format!(
                "pancake_time_constant_s must be positive, got {}",
                self.pancake_time_constant_s
            )
            .into());
        }
        if !(self.pancake_max_growth >= 1.0) {
            return Err(format!(
                "pancake_max_growth must be at least 1, got {}",
                self.pancake_max_growth
            )
            .into());
        }
        if !(self.start_altitude_m > self.surface_elevation_m) {
            return Err(format!(
                "start_altitude_m ({}) must be above surface_elevation_m ({})",
                self.start_altitude_m, self.surface_elevation_m
            )
            .into());
        }
        Ok(())
    }
}

/// Final per-object simulation output.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub impact_velocity_kms: f64,
    pub impact_mass_kg: f64,
    pub final_altitude_m: f64,
    pub breakup_altitude_m: Option<f64>,
    pub peak_deposition_altitude_m: f64,
    pub is_airburst: bool,
    /// `(E0 - Ef) / E0`, clamped into [0, 1].
    pub energy_loss_fraction: f64,
    pub initial_energy_j: f64,
    pub final_energy_j: f64,
    pub termination: TerminationReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<Vec<TrajectorySample>>,
}

/// Run the entry simulation for a broadcastable batch of impactors.
///
/// Each object integrates independently inside a lock-step batch; result
/// index `i` always corresponds to input index `i`. Per-object parameter
/// problems zero that object's result and leave the rest of the batch
/// untouched.
pub fn run_entry_simulation(
    inputs: &EntryInputs,
    config: &EntryConfig,
) -> Result<Vec<SimulationResult>, EntryError> {
    config.validate()?;
    let setups = inputs.resolve()?;
    let outcomes = integrate_batch(&setups, config);

    let exhausted = outcomes
        .iter()
        .filter(|o| o.termination == TerminationReason::BudgetExhausted)
        .count();
    if exhausted > 0 {
        eprintln!(
            "Warning: {exhausted} object(s) force-stopped at step-budget exhaustion; \
             their trajectories are unresolved"
        );
    }

    Ok(setups
        .iter()
        .zip(outcomes)
        .map(|(setup, outcome)| {
            let is_airburst = outcome.termination != TerminationReason::InvalidParameter
                && classify_airburst(&outcome, &setup.params, config);
            let energy_loss_fraction = if outcome.initial_energy_j > 0.0 {
                ((outcome.initial_energy_j - outcome.final_energy_j) / outcome.initial_energy_j)
                    .clamp(0.0, 1.0)
            } else {
                0.0
            };
            SimulationResult {
                impact_velocity_kms: outcome.final_velocity_m_s / 1000.0,
                impact_mass_kg: outcome.final_mass_kg,
                final_altitude_m: outcome.final_altitude_m,
                breakup_altitude_m: outcome.breakup_altitude_m,
                peak_deposition_altitude_m: outcome.peak_deposition_altitude_m,
                is_airburst,
                energy_loss_fraction,
                initial_energy_j: outcome.initial_energy_j,
                final_energy_j: outcome.final_energy_j,
                termination: outcome.termination,
                trajectory: outcome.trajectory,
            }
        })
        .collect())
}

/// Target-site properties and effect-model constants for report assembly.
#[derive(Debug, Clone)]
pub struct EffectsConfig {
    pub target_density_kg_m3: f64,
    pub target_strength_pa: f64,
    /// Must match the entry config's surface elevation when terrain is
    /// elevated; burst heights are measured against it.
    pub surface_elevation_m: f64,
    pub crater: CraterScaling,
    pub seismic: SeismicCoupling,
    pub airblast: AirblastScaling,
    pub thermal: ThermalScaling,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            target_density_kg_m3: 2500.0,
            target_strength_pa: 1.0e7,
            surface_elevation_m: 0.0,
            crater: CraterScaling::default(),
            seismic: SeismicCoupling::default(),
            airblast: AirblastScaling::default(),
            thermal: ThermalScaling::default(),
        }
    }
}

/// Structured report of the ground effects of one simulated object.
#[derive(Debug, Clone, Serialize)]
pub struct EffectsReport {
    pub crater_diameter_m: f64,
    pub crater_depth_m: f64,
    pub seismic_magnitude: f64,
    pub seismic_damage_radius_km: f64,
    pub airblast_radii_km: Vec<AirblastRing>,
    pub thermal_radius_m: f64,
    /// Energy driving the blast and thermal effects, in megatons of TNT.
    pub burst_energy_megatons_tnt: f64,
}

/// Assemble the full effects report for one simulation result.
///
/// Airbursts drive the blast/thermal effects with the energy deposited in
/// the atmosphere, released at the peak-deposition altitude; ground impacts
/// drive them with the kinetic energy delivered to the surface.
pub fn compute_effects(
    result: &SimulationResult,
    params: &ImpactorParameters,
    config: &EffectsConfig,
) -> EffectsReport {
    let (burst_energy_j, burst_height_m) = if result.is_airburst {
        (
            (result.initial_energy_j - result.final_energy_j).max(0.0),
            (result.peak_deposition_altitude_m - config.surface_elevation_m).max(0.0),
        )
    } else {
        (result.final_energy_j, 0.0)
    };

    let crater_diameter_m = if result.is_airburst {
        0.0
    } else {
        compute_crater_diameter_scaled(
            params.diameter_m,
            result.impact_velocity_kms * 1000.0,
            params.bulk_density_kg_m3,
            config.target_density_kg_m3,
            params.entry_angle_rad.to_degrees(),
            config.target_strength_pa,
            &config.crater,
        )
    };

    let seismic_magnitude = compute_seismic_magnitude_coupled(
        result.final_energy_j,
        result.is_airburst,
        &config.seismic,
    );

    EffectsReport {
        crater_diameter_m,
        crater_depth_m: compute_crater_depth_scaled(crater_diameter_m, &config.crater),
        seismic_magnitude,
        seismic_damage_radius_km: compute_seismic_damage_radius_coupled(
            seismic_magnitude,
            &config.seismic,
        ),
        airblast_radii_km: compute_airblast_radii_scaled(
            burst_energy_j,
            burst_height_m,
            &config.airblast,
        ),
        thermal_radius_m: compute_thermal_radius_scaled(
            burst_energy_j,
            result.is_airburst,
            &config.thermal,
        ),
        burst_energy_megatons_tnt: burst_energy_j / JOULES_PER_MEGATON_TNT,
    }
}
