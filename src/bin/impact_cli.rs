use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;

use impact_effects_engine::{
    builtin_catalog, compute_effects, run_entry_simulation, run_uncertainty_sweep, EffectsConfig,
    EffectsReport, EntryConfig, EntryInputs, ImpactorParameters, SimulationResult, SweepScenario,
    UncertaintyParams, UncertaintyResults, JOULES_PER_MEGATON_TNT,
};

#[derive(Parser)]
#[command(name = "impact")]
#[command(version = "0.1.0")]
#[command(about = "Atmospheric-entry and impact-effects calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one atmospheric entry and report the ground effects
    Entry {
        /// Impactor mass (kg)
        #[arg(short = 'm', long, default_value = "1.2e7")]
        mass: f64,

        /// Impactor diameter (m)
        #[arg(short = 'd', long, default_value = "20.0")]
        diameter: f64,

        /// Entry velocity (km/s)
        #[arg(short = 'v', long, default_value = "19.16")]
        velocity: f64,

        /// Entry angle from horizontal (degrees)
        #[arg(short = 'a', long, default_value = "18.0")]
        angle: f64,

        /// Bulk density (kg/m³); overridden by --material
        #[arg(long, default_value = "3300.0")]
        density: f64,

        /// Breakup strength (Pa); overridden by --material
        #[arg(long, default_value = "1e7")]
        strength: f64,

        /// Take density and strength from a builtin material (see `materials`)
        #[arg(long)]
        material: Option<String>,

        /// Surface elevation (m)
        #[arg(long, default_value = "0.0")]
        surface_elevation: f64,

        /// Integration time step (s)
        #[arg(long, default_value = "0.05")]
        time_step: f64,

        /// Step budget
        #[arg(long, default_value = "20000")]
        max_steps: usize,

        /// Entry-interface altitude (m)
        #[arg(long, default_value = "100000.0")]
        start_altitude: f64,

        /// Capture the full trajectory history
        #[arg(long)]
        history: bool,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Gaussian uncertainty sweep around a nominal scenario
    MonteCarlo {
        /// Nominal mass (kg)
        #[arg(short = 'm', long, default_value = "1.2e7")]
        mass: f64,

        /// Nominal diameter (m)
        #[arg(short = 'd', long, default_value = "20.0")]
        diameter: f64,

        /// Nominal velocity (km/s)
        #[arg(short = 'v', long, default_value = "19.16")]
        velocity: f64,

        /// Nominal entry angle (degrees)
        #[arg(short = 'a', long, default_value = "18.0")]
        angle: f64,

        /// Nominal bulk density (kg/m³)
        #[arg(long, default_value = "3300.0")]
        density: f64,

        /// Nominal breakup strength (Pa)
        #[arg(long, default_value = "1e7")]
        strength: f64,

        /// Number of samples
        #[arg(short = 'n', long, default_value = "1000")]
        num_samples: usize,

        /// Velocity standard deviation (km/s)
        #[arg(long, default_value = "1.0")]
        velocity_std: f64,

        /// Angle standard deviation (degrees)
        #[arg(long, default_value = "2.0")]
        angle_std: f64,

        /// Density standard deviation (kg/m³)
        #[arg(long, default_value = "300.0")]
        density_std: f64,

        /// Strength standard deviation (Pa)
        #[arg(long, default_value = "5e6")]
        strength_std: f64,

        /// RNG seed for reproducible sweeps
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// List the builtin impactor materials
    Materials,

    /// Display engine information
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct EntryReport {
    result: SimulationResult,
    effects: EffectsReport,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Entry {
            mass,
            diameter,
            velocity,
            angle,
            mut density,
            mut strength,
            material,
            surface_elevation,
            time_step,
            max_steps,
            start_altitude,
            history,
            output,
        } => {
            if let Some(name) = material {
                match builtin_catalog().get(&name) {
                    Some(m) => {
                        density = m.density_kg_m3;
                        strength = m.strength_pa;
                    }
                    None => {
                        eprintln!(
                            "Unknown material `{name}`; run `impact materials` for the catalog."
                        );
                        std::process::exit(1);
                    }
                }
            }

            let inputs = EntryInputs::uniform(mass, diameter, velocity, angle, density, strength);
            let config = EntryConfig {
                surface_elevation_m: surface_elevation,
                time_step_s: time_step,
                max_steps,
                start_altitude_m: start_altitude,
                capture_history: history,
                ..EntryConfig::default()
            };

            let mut results = run_entry_simulation(&inputs, &config)?;
            let result = results.remove(0);

            let params = ImpactorParameters {
                diameter_m: diameter,
                bulk_density_kg_m3: density,
                material_strength_pa: strength,
                entry_angle_rad: angle.to_radians(),
            };
            let effects_config = EffectsConfig {
                surface_elevation_m: surface_elevation,
                ..EffectsConfig::default()
            };
            let effects = compute_effects(&result, &params, &effects_config);

            display_entry_report(EntryReport { result, effects }, output)?;
        }

        Commands::MonteCarlo {
            mass,
            diameter,
            velocity,
            angle,
            density,
            strength,
            num_samples,
            velocity_std,
            angle_std,
            density_std,
            strength_std,
            seed,
            output,
        } => {
            let scenario = SweepScenario {
                mass_kg: mass,
                diameter_m: diameter,
                velocity_kms: velocity,
                angle_deg: angle,
                density_kgm3: density,
                strength_pa: strength,
            };
            let params = UncertaintyParams {
                num_samples,
                velocity_std_kms: velocity_std,
                angle_std_deg: angle_std,
                density_std_kgm3: density_std,
                strength_std_pa: strength_std,
                seed,
            };

            let results = run_uncertainty_sweep(&scenario, &EntryConfig::default(), &params)?;
            display_sweep_results(&results, output)?;
        }

        Commands::Materials => {
            println!("┌──────────────┬────────────────┬───────────────┐");
            println!("│ Material     │ Density(kg/m³) │ Strength (Pa) │");
            println!("├──────────────┼────────────────┼───────────────┤");
            for m in builtin_catalog().iter() {
                println!(
                    "│ {:<12} │ {:>14.0} │ {:>13.1e} │",
                    m.name, m.density_kg_m3, m.strength_pa
                );
            }
            println!("└──────────────┴────────────────┴───────────────┘");
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      IMPACT EFFECTS ENGINE v0.1.0     ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Atmospheric-entry trajectory engine    ║");
            println!("║ with derived impact effects.           ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Batch RK4 entry integration          ║");
            println!("║ • Fragmentation + pancake spreading    ║");
            println!("║ • Airburst classification              ║");
            println!("║ • Crater/seismic/blast/thermal sizing  ║");
            println!("║ • Monte Carlo uncertainty sweeps       ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_entry_report(report: EntryReport, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        OutputFormat::Csv => {
            println!("time_s,altitude_m,velocity_m_s,mass_kg,energy_j,dynamic_pressure_pa");
            match &report.result.trajectory {
                Some(samples) => {
                    for s in samples {
                        println!(
                            "{:.3},{:.1},{:.2},{:.2},{:.4e},{:.4e}",
                            s.time_s,
                            s.altitude_m,
                            s.velocity_m_s,
                            s.mass_kg,
                            s.energy_j,
                            s.dynamic_pressure_pa
                        );
                    }
                }
                None => {
                    eprintln!("No trajectory captured; rerun with --history for CSV output.");
                }
            }
        }

        OutputFormat::Table => {
            let r = &report.result;
            let e = &report.effects;
            let outcome = if r.is_airburst { "AIRBURST" } else { "GROUND IMPACT" };

            println!("╔════════════════════════════════════════════╗");
            println!("║             ENTRY SIMULATION               ║");
            println!("╠════════════════════════════════════════════╣");
            println!("║ Outcome:            {:>20}   ║", outcome);
            println!("║ Termination:        {:>20?}   ║", r.termination);
            println!("║ Impact velocity:    {:>14.3} km/s      ║", r.impact_velocity_kms);
            println!("║ Surviving mass:     {:>14.3e} kg        ║", r.impact_mass_kg);
            match r.breakup_altitude_m {
                Some(h) => println!("║ Breakup altitude:   {:>14.0} m         ║", h),
                None => println!("║ Breakup altitude:   {:>14} ║", "(intact)  "),
            }
            println!("║ Peak deposition:    {:>14.0} m         ║", r.peak_deposition_altitude_m);
            println!("║ Energy loss:        {:>14.1} %         ║", r.energy_loss_fraction * 100.0);
            println!(
                "║ Entry energy:       {:>14.3} MT        ║",
                r.initial_energy_j / JOULES_PER_MEGATON_TNT
            );
            println!("╠════════════════════════════════════════════╣");
            println!("║                GROUND EFFECTS              ║");
            println!("╠════════════════════════════════════════════╣");
            println!("║ Burst energy:       {:>14.3} MT        ║", e.burst_energy_megatons_tnt);
            println!("║ Crater diameter:    {:>14.1} m         ║", e.crater_diameter_m);
            println!("║ Crater depth:       {:>14.1} m         ║", e.crater_depth_m);
            println!("║ Seismic magnitude:  {:>14.2}           ║", e.seismic_magnitude);
            println!("║ Seismic damage:     {:>14.1} km        ║", e.seismic_damage_radius_km);
            println!("║ Thermal radius:     {:>14.1} m         ║", e.thermal_radius_m);
            println!("╚════════════════════════════════════════════╝");

            if e.airblast_radii_km.is_empty() {
                println!("\nNo airblast rings (no burst energy).");
            } else {
                println!("\nAirblast rings:");
                println!("┌──────────┬────────────┬────────────┐");
                println!("│ Tier     │ Over (psi) │ Radius(km) │");
                println!("├──────────┼────────────┼────────────┤");
                for ring in &e.airblast_radii_km {
                    println!(
                        "│ {:<8} │ {:>10.0} │ {:>10.2} │",
                        ring.label, ring.overpressure_psi, ring.radius_km
                    );
                }
                println!("└──────────┴────────────┴────────────┘");
            }
        }
    }

    Ok(())
}

fn display_sweep_results(
    results: &UncertaintyResults,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║       UNCERTAINTY SWEEP RESULTS        ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Valid runs:         {:>14}     ║", results.valid_runs);
            println!("║ Failed runs:        {:>14}     ║", results.failed_runs);
            println!(
                "║ Airburst fraction:  {:>14.1} %   ║",
                results.airburst_fraction * 100.0
            );
            println!("╠════════════════════════════════════════╣");
            println!("║ IMPACT VELOCITY (km/s)                 ║");
            let v = &results.impact_velocity_kms;
            println!("║ Mean: {:>8.3}  Std: {:>8.3}         ║", v.mean, v.std);
            println!("║ Min:  {:>8.3}  Max: {:>8.3}         ║", v.min, v.max);
            println!("╠════════════════════════════════════════╣");
            println!("║ ENERGY LOSS FRACTION                   ║");
            let f = &results.energy_loss_fraction;
            println!("║ Mean: {:>8.3}  Std: {:>8.3}         ║", f.mean, f.std);
            println!("║ Min:  {:>8.3}  Max: {:>8.3}         ║", f.min, f.max);
            if let Some(b) = &results.breakup_altitude_m {
                println!("╠════════════════════════════════════════╣");
                println!("║ BREAKUP ALTITUDE (m)                   ║");
                println!("║ Mean: {:>8.0}  Std: {:>8.0}         ║", b.mean, b.std);
                println!("║ Min:  {:>8.0}  Max: {:>8.0}         ║", b.min, b.max);
            }
            println!("╚════════════════════════════════════════╝");
        }

        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }

        OutputFormat::Csv => {
            println!("metric,mean,std,min,max");
            let v = &results.impact_velocity_kms;
            println!("impact_velocity_kms,{:.4},{:.4},{:.4},{:.4}", v.mean, v.std, v.min, v.max);
            let f = &results.energy_loss_fraction;
            println!(
                "energy_loss_fraction,{:.4},{:.4},{:.4},{:.4}",
                f.mean, f.std, f.min, f.max
            );
            if let Some(b) = &results.breakup_altitude_m {
                println!("breakup_altitude_m,{:.1},{:.1},{:.1},{:.1}", b.mean, b.std, b.min, b.max);
            }
            println!("airburst_fraction,{:.4},,,", results.airburst_fraction);
        }
    }

    Ok(())
}
