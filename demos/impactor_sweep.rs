/// Impactor Size Sweep Example
///
/// Runs a batch of stony impactors of increasing diameter in one call and
/// tabulates how the outcome flips from airburst to ground impact.

use std::f64::consts::PI;

use impact_effects_engine::{run_entry_simulation, EntryConfig, EntryInputs};

fn main() {
    println!("=== Stony Impactor Size Sweep ===\n");

    let diameters: Vec<f64> = vec![5.0, 10.0, 20.0, 40.0, 60.0, 100.0];
    let density = 3300.0;
    let masses: Vec<f64> = diameters
        .iter()
        .map(|d| density * PI / 6.0 * d.powi(3))
        .collect();

    let inputs = EntryInputs {
        mass_kg: masses.into(),
        diameter_m: diameters.clone().into(),
        velocity_kms: 19.0.into(),
        angle_deg: 45.0.into(),
        density_kgm3: density.into(),
        strength_pa: 1.0e7.into(),
    };

    let results = run_entry_simulation(&inputs, &EntryConfig::default()).expect("valid config");

    println!("Diameter (m) | Outcome       | Breakup (km) | Energy loss");
    println!("-------------|---------------|--------------|------------");
    for (d, r) in diameters.iter().zip(&results) {
        let outcome = if r.is_airburst { "airburst" } else { "ground impact" };
        let breakup = match r.breakup_altitude_m {
            Some(h) => format!("{:.1}", h / 1000.0),
            None => "-".to_string(),
        };
        println!(
            "{:>12} | {:<13} | {:>12} | {:>9.1}%",
            d,
            outcome,
            breakup,
            r.energy_loss_fraction * 100.0
        );
    }
}
