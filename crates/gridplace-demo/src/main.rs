//! Replay a placement scenario headlessly and print the result.
//!
//! Run with: `cargo run --package gridplace-demo -- crates/gridplace-demo/scenarios/farm`
//! Set `RUST_LOG=debug` to see every input.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Replay a grid placement scenario")]
struct Args {
    /// Scenario directory (tiles, prefabs, script, optional map and config).
    scenario: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let report = match gridplace_demo::run_scenario(&args.scenario) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(%err, "scenario failed");
            return ExitCode::FAILURE;
        }
    };

    println!("=== {} ===", args.scenario.display());
    println!(
        "placed: {}, discarded: {}, rejected: {}",
        report.placed.len(),
        report.discarded,
        report.rejected
    );
    for placed in &report.placed {
        println!(
            "  [{:>12}] at ({}, {}) {}x{} rotated {}",
            placed.prefab,
            placed.anchor.x,
            placed.anchor.y,
            placed.footprint.width,
            placed.footprint.depth,
            placed.rotation.degrees()
        );
    }
    for (i, probe) in report.probes.iter().enumerate() {
        match probe {
            Some(value) => println!("  probe {i}: data1 = {value}"),
            None => println!("  probe {i}: no tile data"),
        }
    }
    println!("\n{}", report.rendered_grid);
    ExitCode::SUCCESS
}
