//! # Impact Effects Engine
//!
//! Atmospheric-entry trajectory engine with derived impact-effects
//! calculators: trajectory decay, mass loss, fragmentation, and the
//! resulting crater, seismic, airblast, and thermal footprints.

// Re-export the main types and functions
pub use entry_api::{
    compute_effects, run_entry_simulation, EffectsConfig, EffectsReport, EntryConfig, EntryError,
    EntryInputs, ImpactorParameters, ParamField, SimulationResult,
};
pub use airblast::{compute_airblast_radii, AirblastRing, AirblastScaling, OverpressureTier};
pub use crater::{compute_crater_depth, compute_crater_diameter, CraterScaling};
pub use integrator::TerminationReason;
pub use materials::{builtin_catalog, Material, MaterialCatalog};
pub use monte_carlo::{
    run_uncertainty_sweep, FieldStatistics, SweepScenario, UncertaintyParams, UncertaintyResults,
};
pub use seismic::{compute_seismic_damage_radius, compute_seismic_magnitude, SeismicCoupling};
pub use thermal::{compute_thermal_radius, ThermalScaling};
pub use trajectory::{peak_energy_loss_sample, sample_at_altitude, TrajectorySample};

// Module declarations
pub mod constants;
pub mod entry_api;
mod airblast;
mod atmosphere;
mod breakup;
mod classification;
mod crater;
mod derivatives;
mod integrator;
mod materials;
mod monte_carlo;
mod seismic;
mod thermal;
mod trajectory;

pub use atmosphere::{air_density, air_density_batch, dynamic_pressure};
pub use constants::{JOULES_PER_MEGATON_TNT, JOULES_PER_TON_TNT};
