/// Airburst Scenario Example
///
/// Simulates a Chelyabinsk-class stony bolide and prints the entry
/// diagnostics and ground effects.

use impact_effects_engine::{
    compute_effects, run_entry_simulation, EffectsConfig, EntryConfig, EntryInputs,
    ImpactorParameters, JOULES_PER_MEGATON_TNT,
};

fn main() {
    println!("=== Airburst Scenario ===\n");

    let mass_kg = 1.2e7;
    let diameter_m = 20.0;
    let velocity_kms = 19.16;
    let angle_deg = 18.0;
    let density = 3300.0;
    let strength = 1.0e7;

    println!("Impactor:");
    println!("  Mass: {mass_kg:.2e} kg");
    println!("  Diameter: {diameter_m} m");
    println!("  Velocity: {velocity_kms} km/s");
    println!("  Entry angle: {angle_deg}°");
    println!("  Density: {density} kg/m³, strength: {strength:.1e} Pa");
    println!();

    let inputs = EntryInputs::uniform(mass_kg, diameter_m, velocity_kms, angle_deg, density, strength);
    let results = run_entry_simulation(&inputs, &EntryConfig::default()).expect("valid config");
    let result = &results[0];

    println!("Entry results:");
    println!("  Airburst: {}", result.is_airburst);
    match result.breakup_altitude_m {
        Some(h) => println!("  Breakup altitude: {:.1} km", h / 1000.0),
        None => println!("  Breakup altitude: none (intact)"),
    }
    println!(
        "  Peak deposition: {:.1} km",
        result.peak_deposition_altitude_m / 1000.0
    );
    println!("  Energy loss: {:.1}%", result.energy_loss_fraction * 100.0);
    println!(
        "  Entry energy: {:.3} MT TNT",
        result.initial_energy_j / JOULES_PER_MEGATON_TNT
    );
    println!();

    let params = ImpactorParameters {
        diameter_m,
        bulk_density_kg_m3: density,
        material_strength_pa: strength,
        entry_angle_rad: angle_deg.to_radians(),
    };
    let effects = compute_effects(result, &params, &EffectsConfig::default());

    println!("Ground effects:");
    println!("  Burst energy: {:.3} MT TNT", effects.burst_energy_megatons_tnt);
    println!("  Thermal radius: {:.1} km", effects.thermal_radius_m / 1000.0);
    for ring in &effects.airblast_radii_km {
        println!(
            "  {} blast ring ({} psi): {:.1} km",
            ring.label, ring.overpressure_psi, ring.radius_km
        );
    }
}
