use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use ecotone::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    snapshot::RunSummary,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Toroidal environmental-cell simulator")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/island.yaml")]
    scenario: PathBuf,

    /// Override generation count (uses scenario default when omitted)
    #[arg(long)]
    generations: Option<u64>,

    /// Override snapshot interval in generations
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let mut world = scenario.build_world()?;
    let generations = scenario.generations(cli.generations);
    let snapshot_interval = cli.snapshot_interval.unwrap_or(scenario.snapshot_interval);
    let snapshot_dir = cli
        .snapshot_dir
        .unwrap_or_else(|| PathBuf::from("snapshots"));

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        snapshot_interval,
        snapshot_dir,
    };
    let mut engine = EngineBuilder::new(settings).build();
    let mut summary = RunSummary::default();
    engine.run_with_hook(&mut world, generations, |snapshot| {
        summary.observe(snapshot);
    })?;

    let counts = world.counts();
    println!(
        "Scenario '{}' completed for {} generations. Cells: {} sea, {} forest, {} glacier",
        scenario.name, generations, counts.sea, counts.forest, counts.glacier
    );
    let temperature = summary.temperature;
    println!(
        "Temperature min = {:.2} max = {:.2} avg = {:.2} stdev = {:.2}",
        temperature.min(),
        temperature.max(),
        temperature.mean(),
        temperature.std_dev()
    );
    let pollution = summary.pollution;
    println!(
        "Pollution   min = {:.2} max = {:.2} avg = {:.2} stdev = {:.2}",
        pollution.min(),
        pollution.max(),
        pollution.mean(),
        pollution.std_dev()
    );
    Ok(())
}
