//! Trajectory history capture and interpolation helpers.

use serde::Serialize;

/// One recorded integration step of a single object.
///
/// Produced only when history capture is requested; samples are appended in
/// step order, one per step, starting with the initial state at t = 0.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub altitude_m: f64,
    pub velocity_m_s: f64,
    pub mass_kg: f64,
    /// Kinetic energy ½·m·v² (J)
    pub energy_j: f64,
    /// Dynamic pressure ½·ρ(h)·v² (Pa)
    pub dynamic_pressure_pa: f64,
}

/// Linearly interpolate the trajectory state at the first crossing of the
/// given altitude, descending. Returns `None` when the trajectory never
/// reaches that altitude.
pub fn sample_at_altitude(samples: &[TrajectorySample], altitude_m: f64) -> Option<TrajectorySample> {
    if samples.is_empty() {
        return None;
    }
    if samples[0].altitude_m <= altitude_m {
        return Some(samples[0].clone());
    }

    for pair in samples.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.altitude_m >= altitude_m && b.altitude_m <= altitude_m {
            let span = a.altitude_m - b.altitude_m;
            if span.abs() < f64::EPSILON {
                return Some(b.clone());
            }
            let frac = (a.altitude_m - altitude_m) / span;
            return Some(TrajectorySample {
                time_s: lerp(a.time_s, b.time_s, frac),
                altitude_m,
                velocity_m_s: lerp(a.velocity_m_s, b.velocity_m_s, frac),
                mass_kg: lerp(a.mass_kg, b.mass_kg, frac),
                energy_j: lerp(a.energy_j, b.energy_j, frac),
                dynamic_pressure_pa: lerp(a.dynamic_pressure_pa, b.dynamic_pressure_pa, frac),
            });
        }
    }

    None
}

/// The sample with the highest single-step energy loss relative to its
/// predecessor. Returns `None` for trajectories shorter than two samples.
pub fn peak_energy_loss_sample(samples: &[TrajectorySample]) -> Option<&TrajectorySample> {
    if samples.len() < 2 {
        return None;
    }
    let mut best_idx = 1;
    let mut best_loss = f64::NEG_INFINITY;
    for i in 1..samples.len() {
        let loss = samples[i - 1].energy_j - samples[i].energy_j;
        if loss > best_loss {
            best_loss = loss;
            best_idx = i;
        }
    }
    Some(&samples[best_idx])
}

fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + frac * (b - a)
}
