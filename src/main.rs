use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skirmish::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    systems::{BookkeepingSystem, IncomeSystem, MovementSystem, RecruitSystem, VisionSystem},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Deterministic grid-world strategy simulation")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/standard.yaml")]
    scenario: PathBuf,

    /// Override turn count (uses scenario default when omitted)
    #[arg(long)]
    turns: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override snapshot interval in turns (0 disables snapshots)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long, default_value = "snapshots")]
    snapshot_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    let turns = scenario.turns(cli.turns);
    let snapshot_interval = cli
        .snapshot_interval
        .unwrap_or(scenario.snapshot_interval_ticks);

    let mut world = scenario.build_world()?;

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        snapshot_interval_ticks: snapshot_interval,
        snapshot_dir: cli.snapshot_dir,
    };
    let mut engine = EngineBuilder::new(settings)
        .with_system(IncomeSystem::new())
        .with_system(RecruitSystem::new())
        .with_system(MovementSystem::new())
        .with_system(VisionSystem::new())
        .with_system(BookkeepingSystem::new())
        .build();

    engine.run(&mut world, turns)?;

    println!(
        "Scenario '{}' completed after {} turns (era {}).",
        scenario.name,
        world.turn(),
        world.era()
    );
    for faction in world.factions() {
        println!(
            "  {:<12} treasury {:>5}  regions {:>3}  units {:>3}",
            faction.name,
            faction.treasury,
            faction.regions.len(),
            faction.units.len()
        );
    }
    Ok(())
}
