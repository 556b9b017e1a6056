//! Lock-step batch RK4 integrator for atmospheric entry.
//!
//! All objects in a batch advance simultaneously, one fixed time step at a
//! time. Terminated objects are masked out of further updates but stay in
//! place in the arrays, so output index `i` always corresponds to input
//! index `i` — the active set shrinks, the arrays never do.

use serde::Serialize;

use crate::atmosphere::dynamic_pressure;
use crate::breakup::BreakupState;
use crate::constants::VELOCITY_FLOOR_MPS;
use crate::derivatives::entry_derivatives;
use crate::entry_api::{EntryConfig, ImpactorParameters};
use crate::trajectory::TrajectorySample;

/// Why an object's integration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Altitude reached the surface elevation.
    GroundContact,
    /// Speed dropped below the 10 m/s terminal-fall floor.
    VelocityFloor,
    /// Mass ablated away completely.
    MassDepleted,
    /// Step budget exhausted with the object still in flight; the last
    /// computed state is retained so the unresolved trajectory is visible
    /// downstream.
    BudgetExhausted,
    /// Rejected before integration: non-positive mass, diameter, velocity,
    /// or density. The result for this index is zeroed; the rest of the
    /// batch is unaffected.
    InvalidParameter,
}

/// Initial condition for one object in a batch, in SI units.
#[derive(Debug, Clone)]
pub struct EntrySetup {
    pub initial_mass_kg: f64,
    pub initial_velocity_m_s: f64,
    pub params: ImpactorParameters,
}

/// Raw integrator output for one object.
#[derive(Debug, Clone)]
pub struct ObjectOutcome {
    pub final_mass_kg: f64,
    pub final_velocity_m_s: f64,
    pub final_altitude_m: f64,
    pub breakup_altitude_m: Option<f64>,
    /// Altitude of the maximum instantaneous kinetic-energy-loss rate.
    pub peak_deposition_altitude_m: f64,
    pub initial_energy_j: f64,
    pub final_energy_j: f64,
    pub termination: TerminationReason,
    pub trajectory: Option<Vec<TrajectorySample>>,
}

impl ObjectOutcome {
    /// Degenerate zeroed outcome for a rejected object.
    fn invalid() -> Self {
        Self {
            final_mass_kg: 0.0,
            final_velocity_m_s: 0.0,
            final_altitude_m: 0.0,
            breakup_altitude_m: None,
            peak_deposition_altitude_m: 0.0,
            initial_energy_j: 0.0,
            final_energy_j: 0.0,
            termination: TerminationReason::InvalidParameter,
            trajectory: None,
        }
    }
}

fn setup_is_valid(setup: &EntrySetup) -> bool {
    setup.initial_mass_kg > 0.0
        && setup.initial_velocity_m_s > 0.0
        && setup.params.diameter_m > 0.0
        && setup.params.bulk_density_kg_m3 > 0.0
}

/// Advance a whole batch through the atmosphere until every object
/// terminates or the step budget runs out.
///
/// The caller is responsible for config validation; this function assumes a
/// positive time step and step budget.
pub fn integrate_batch(objects: &[EntrySetup], config: &EntryConfig) -> Vec<ObjectOutcome> {
    let n = objects.len();
    let dt = config.time_step_s;
    let surface = config.surface_elevation_m;

    let mut mass: Vec<f64> = objects.iter().map(|o| o.initial_mass_kg).collect();
    let mut velocity: Vec<f64> = objects.iter().map(|o| o.initial_velocity_m_s).collect();
    let mut altitude: Vec<f64> = vec![config.start_altitude_m; n];
    let mut breakup: Vec<BreakupState> = vec![BreakupState::Intact; n];
    let mut active: Vec<bool> = vec![true; n];
    let mut termination: Vec<Option<TerminationReason>> = vec![None; n];
    let mut peak_rate: Vec<f64> = vec![f64::NEG_INFINITY; n];
    let mut peak_altitude: Vec<f64> = vec![config.start_altitude_m; n];

    let mut histories: Option<Vec<Vec<TrajectorySample>>> = if config.capture_history {
        Some(vec![Vec::new(); n])
    } else {
        None
    };

    // Reject degenerate objects up front; the rest of the batch proceeds.
    for (i, setup) in objects.iter().enumerate() {
        if !setup_is_valid(setup) {
            active[i] = false;
            termination[i] = Some(TerminationReason::InvalidParameter);
        }
    }

    // Objects already below the terminal-fall floor never start stepping.
    for i in 0..n {
        if active[i] && velocity[i] < VELOCITY_FLOOR_MPS {
            active[i] = false;
            termination[i] = Some(TerminationReason::VelocityFloor);
        }
    }

    if let Some(histories) = histories.as_mut() {
        for i in 0..n {
            if termination[i] != Some(TerminationReason::InvalidParameter) {
                histories[i].push(make_sample(0.0, altitude[i], velocity[i], mass[i]));
            }
        }
    }

    for step in 0..config.max_steps {
        if !active.iter().any(|&a| a) {
            break;
        }

        for i in 0..n {
            if !active[i] {
                continue;
            }
            let params = &objects[i].params;

            // Fragmentation test at the pre-step state: the first time
            // dynamic pressure exceeds material strength, the object breaks
            // permanently and the current altitude is the breakup altitude.
            let q = dynamic_pressure(altitude[i], velocity[i]);
            if !breakup[i].has_broken() && q > params.material_strength_pa {
                breakup[i].trigger(altitude[i]);
            }

            let (v_prev, h_prev, m_prev) = (velocity[i], altitude[i], mass[i]);
            let t_since = breakup[i].time_since_breakup_s();

            let (mut v_new, h_new, mut m_new) =
                rk4_step(v_prev, h_prev, m_prev, t_since, dt, params, config);

            // Clamp after the RK4 combination; NaNs collapse to the floor.
            v_new = v_new.max(0.0);
            m_new = m_new.max(0.0);
            let mut h_new = if h_new.is_finite() { h_new } else { surface };

            breakup[i].advance(dt);

            // Peak kinetic-energy deposition tracking, attributed to the
            // step's midpoint altitude.
            let e_prev = 0.5 * m_prev * v_prev * v_prev;
            let e_new = 0.5 * m_new * v_new * v_new;
            let loss_rate = (e_prev - e_new) / dt;
            if loss_rate > peak_rate[i] {
                peak_rate[i] = loss_rate;
                peak_altitude[i] = 0.5 * (h_prev + h_new);
            }

            if h_new <= surface {
                h_new = surface;
                active[i] = false;
                termination[i] = Some(TerminationReason::GroundContact);
            } else if v_new < VELOCITY_FLOOR_MPS {
                active[i] = false;
                termination[i] = Some(TerminationReason::VelocityFloor);
            } else if m_new <= 0.0 {
                active[i] = false;
                termination[i] = Some(TerminationReason::MassDepleted);
            }

            velocity[i] = v_new;
            altitude[i] = h_new;
            mass[i] = m_new;

            if let Some(histories) = histories.as_mut() {
                histories[i].push(make_sample((step + 1) as f64 * dt, h_new, v_new, m_new));
            }
        }
    }

    // Anything still active ran out of budget; it keeps its last state.
    for i in 0..n {
        if active[i] {
            active[i] = false;
            termination[i] = Some(TerminationReason::BudgetExhausted);
        }
    }

    (0..n)
        .map(|i| {
            let termination = termination[i].expect("every object terminated");
            if termination == TerminationReason::InvalidParameter {
                return ObjectOutcome::invalid();
            }
            let v0 = objects[i].initial_velocity_m_s;
            let m0 = objects[i].initial_mass_kg;
            ObjectOutcome {
                final_mass_kg: mass[i],
                final_velocity_m_s: velocity[i],
                final_altitude_m: altitude[i],
                breakup_altitude_m: breakup[i].breakup_altitude_m(),
                peak_deposition_altitude_m: peak_altitude[i],
                initial_energy_j: 0.5 * m0 * v0 * v0,
                final_energy_j: 0.5 * mass[i] * velocity[i] * velocity[i],
                termination,
                trajectory: histories.as_mut().map(|h| std::mem::take(&mut h[i])),
            }
        })
        .collect()
}

/// One classical RK4 step of the (v, h, m) system.
///
/// The post-breakup timer advances with the stage offsets so the pancake
/// factor is evaluated consistently inside the step.
fn rk4_step(
    v: f64,
    h: f64,
    m: f64,
    t_since: Option<f64>,
    dt: f64,
    params: &ImpactorParameters,
    config: &EntryConfig,
) -> (f64, f64, f64) {
    let at = |offset: f64| t_since.map(|t| t + offset);

    let k1 = entry_derivatives(v, h, m, at(0.0), params, config);
    let k2 = entry_derivatives(
        v + 0.5 * dt * k1[0],
        h + 0.5 * dt * k1[1],
        m + 0.5 * dt * k1[2],
        at(0.5 * dt),
        params,
        config,
    );
    let k3 = entry_derivatives(
        v + 0.5 * dt * k2[0],
        h + 0.5 * dt * k2[1],
        m + 0.5 * dt * k2[2],
        at(0.5 * dt),
        params,
        config,
    );
    let k4 = entry_derivatives(
        v + dt * k3[0],
        h + dt * k3[1],
        m + dt * k3[2],
        at(dt),
        params,
        config,
    );

    (
        v + dt * (k1[0] + 2.0 * k2[0] + 2.0 * k3[0] + k4[0]) / 6.0,
        h + dt * (k1[1] + 2.0 * k2[1] + 2.0 * k3[1] + k4[1]) / 6.0,
        m + dt * (k1[2] + 2.0 * k2[2] + 2.0 * k3[2] + k4[2]) / 6.0,
    )
}

fn make_sample(time_s: f64, altitude_m: f64, velocity_m_s: f64, mass_kg: f64) -> TrajectorySample {
    TrajectorySample {
        time_s,
        altitude_m,
        velocity_m_s,
        mass_kg,
        energy_j: 0.5 * mass_kg * velocity_m_s * velocity_m_s,
        dynamic_pressure_pa: dynamic_pressure(altitude_m, velocity_m_s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stony_setup() -> EntrySetup {
        EntrySetup {
            initial_mass_kg: 1.2e7,
            initial_velocity_m_s: 19_160.0,
            params: ImpactorParameters {
                diameter_m: 20.0,
                bulk_density_kg_m3: 3300.0,
                material_strength_pa: 1.0e7,
                entry_angle_rad: (18.0f64).to_radians(),
            },
        }
    }

    fn iron_setup() -> EntrySetup {
        EntrySetup {
            initial_mass_kg: 7800.0 * std::f64::consts::PI / 6.0 * 50.0f64.powi(3),
            initial_velocity_m_s: 12_800.0,
            params: ImpactorParameters {
                diameter_m: 50.0,
                bulk_density_kg_m3: 7800.0,
                material_strength_pa: 1.0e8,
                entry_angle_rad: (45.0f64).to_radians(),
            },
        }
    }

    #[test]
    fn test_stony_body_breaks_up_at_tens_of_km() {
        let config = EntryConfig::default();
        let outcomes = integrate_batch(&[stony_setup()], &config);
        let out = &outcomes[0];

        let breakup = out.breakup_altitude_m.expect("weak stone must fragment");
        assert!(
            (10_000.0..60_000.0).contains(&breakup),
            "breakup altitude {breakup} m"
        );
        assert!(out.peak_deposition_altitude_m > 1000.0);
        assert!(out.final_energy_j < 0.2 * out.initial_energy_j);
    }

    #[test]
    fn test_iron_body_reaches_the_ground() {
        let config = EntryConfig::default();
        let outcomes = integrate_batch(&[iron_setup()], &config);
        let out = &outcomes[0];

        assert_eq!(out.termination, TerminationReason::GroundContact);
        assert_eq!(out.final_altitude_m, 0.0);
        // A strong 50 m iron retains most of its entry energy
        assert!(out.final_energy_j > 0.5 * out.initial_energy_j);
    }

    #[test]
    fn test_mass_and_energy_never_increase() {
        let config = EntryConfig {
            capture_history: true,
            ..EntryConfig::default()
        };
        let setups = [stony_setup(), iron_setup()];
        let outcomes = integrate_batch(&setups, &config);
        for (setup, out) in setups.iter().zip(&outcomes) {
            assert!(out.final_mass_kg <= setup.initial_mass_kg);
            let samples = out.trajectory.as_ref().unwrap();
            for pair in samples.windows(2) {
                assert!(pair[1].energy_j <= pair[0].energy_j + 1e-6);
                assert!(pair[1].mass_kg <= pair[0].mass_kg + 1e-12);
            }
        }
    }

    #[test]
    fn test_budget_exhaustion_keeps_last_state() {
        let config = EntryConfig {
            max_steps: 5,
            ..EntryConfig::default()
        };
        let outcomes = integrate_batch(&[stony_setup()], &config);
        let out = &outcomes[0];
        assert_eq!(out.termination, TerminationReason::BudgetExhausted);
        // Still far above the surface: the unresolved state is observable
        assert!(out.final_altitude_m > config.surface_elevation_m);
        assert!(out.final_velocity_m_s > 0.0);
    }

    #[test]
    fn test_invalid_object_zeroed_while_batch_proceeds() {
        let mut bad = stony_setup();
        bad.initial_mass_kg = -1.0;
        let config = EntryConfig::default();
        let outcomes = integrate_batch(&[bad, iron_setup()], &config);

        assert_eq!(outcomes[0].termination, TerminationReason::InvalidParameter);
        assert_eq!(outcomes[0].final_energy_j, 0.0);
        assert_eq!(outcomes[0].initial_energy_j, 0.0);
        assert_eq!(outcomes[1].termination, TerminationReason::GroundContact);
    }

    #[test]
    fn test_index_alignment_under_mixed_termination() {
        // One airburst-class object, one invalid, one ground impactor: the
        // output order must match the input order exactly.
        let mut bad = stony_setup();
        bad.params.diameter_m = 0.0;
        let config = EntryConfig::default();
        let outcomes = integrate_batch(&[stony_setup(), bad, iron_setup()], &config);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].breakup_altitude_m.is_some());
        assert_eq!(outcomes[1].termination, TerminationReason::InvalidParameter);
        assert_eq!(outcomes[2].termination, TerminationReason::GroundContact);
    }

    #[test]
    fn test_history_capture_starts_at_entry_interface() {
        let config = EntryConfig {
            capture_history: true,
            max_steps: 10,
            ..EntryConfig::default()
        };
        let outcomes = integrate_batch(&[iron_setup()], &config);
        let samples = outcomes[0].trajectory.as_ref().unwrap();
        assert_eq!(samples[0].time_s, 0.0);
        assert_eq!(samples[0].altitude_m, config.start_altitude_m);
        assert_eq!(samples.len(), 11);
    }
}
