//! Scenario driver for the prodsim engine
//!
//! Runs a production-economy scenario from a JSON configuration file, or the
//! built-in demo suite, and writes one result file per simulation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use prodsim_core::config::SimulationConfig;
use prodsim_core::simulation::{Simulation, run_batch};

mod scenarios;

#[derive(Parser, Debug)]
#[command(name = "prodsim")]
#[command(about = "A discrete-time production-economy simulator")]
struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Directory result files are written to
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single scenario from a JSON configuration file
    Run {
        /// Path to the scenario configuration
        input: PathBuf,
    },
    /// Run the built-in demo scenario suite
    Demo,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    match &args.command {
        Command::Run { input } => run_scenario(input, &args.output),
        Command::Demo => run_demo(&args.output),
    }
}

fn init_logging(level: &str) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn run_scenario(input: &Path, output: &Path) -> color_eyre::Result<()> {
    let raw = fs::read_to_string(input)
        .wrap_err_with(|| format!("reading scenario file {}", input.display()))?;
    let config: SimulationConfig = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("parsing scenario file {}", input.display()))?;

    let id = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("scenario")
        .to_string();

    let modifiers = config.build_modifiers()?;
    let mut sim = Simulation::new(id, config);
    sim.add_modifiers(modifiers);

    tracing::info!(simulation = sim.id(), "running scenario");
    sim.run()?;
    write_results(&sim, output)?;
    Ok(())
}

fn run_demo(output: &Path) -> color_eyre::Result<()> {
    let mut sims = scenarios::demo_simulations();
    tracing::info!(scenarios = sims.len(), "running demo suite");
    run_batch(&mut sims)?;
    for sim in &sims {
        write_results(sim, output)?;
    }
    Ok(())
}

fn write_results(sim: &Simulation, output: &Path) -> color_eyre::Result<()> {
    fs::create_dir_all(output)
        .wrap_err_with(|| format!("creating output directory {}", output.display()))?;
    let path = output.join(format!("output_{}.json", sim.id()));
    let results = sim.results()?;
    let json = serde_json::to_string_pretty(&results)?;
    fs::write(&path, json).wrap_err_with(|| format!("writing {}", path.display()))?;
    tracing::info!(simulation = sim.id(), path = %path.display(), "results written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodsim_core::config::{ConfigBuilder, MaterialBuilder, ModifierSpec, ProductBuilder};
    use prodsim_core::model::SimulationResult;

    #[test]
    fn test_write_results_creates_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = scenarios::demo_simulations().remove(0);
        sim.run().unwrap();

        write_results(&sim, dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join("output_baseline.json")).unwrap();
        let results: SimulationResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(results.id, "baseline");
    }

    #[test]
    fn test_run_scenario_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigBuilder::new(4)
            .material(MaterialBuilder::new("iron").base_price(10.0))
            .product(
                ProductBuilder::new("widget")
                    .produced_units(1.0)
                    .base_demand(1.0)
                    .consumes("iron", 1.0),
            )
            .build();
        config.modifiers.push(ModifierSpec {
            name: "price_shock".to_string(),
            attribute: "iron_basePrice".into(),
            mode: "absolute".to_string(),
            value: 5.0,
            delay: None,
            trigger: None,
        });

        let input = dir.path().join("tiny.json");
        fs::write(&input, serde_json::to_string(&config).unwrap()).unwrap();

        let output = dir.path().join("out");
        run_scenario(&input, &output).unwrap();

        let raw = fs::read_to_string(output.join("output_tiny.json")).unwrap();
        let results: SimulationResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(results.id, "tiny");
        assert_eq!(results.steps.len(), 4);
        // basePrice 10 + 5 flows into the material cost chain.
        assert_eq!(
            results.value(0, &"iron_material".into(), &"iron_basePrice".into()),
            Some(15.0)
        );
    }
}
