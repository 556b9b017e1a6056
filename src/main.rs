//! Command-line entry point stub for the impact effects engine

fn main() {
    println!("Impact Effects Engine v0.1.0");
    println!();
    println!("Atmospheric-entry trajectory and impact-effects calculation engine.");
    println!("The full command-line interface lives in the `impact_cli` binary:");
    println!();
    println!("  impact_cli entry --help");
    println!("  impact_cli monte-carlo --help");
    println!("  impact_cli materials");
    println!();
    println!("To use as a Rust library:");
    println!("  Add to Cargo.toml: impact-effects-engine = \"0.1\"");
}
