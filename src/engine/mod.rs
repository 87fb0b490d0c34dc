//! The turn engine: a fixed list of systems run in registration order,
//! each with its own seeded RNG stream. One `step` is one game turn and is
//! atomic with respect to the world; callers drive it once per tick.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::{
    rng::{RngManager, SystemRng},
    snapshot::SnapshotManager,
    world::WorldState,
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub snapshot_interval_ticks: u64,
    pub snapshot_dir: PathBuf,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            snapshots: SnapshotManager::new(
                &self.settings.snapshot_dir,
                self.settings.snapshot_interval_ticks,
            ),
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    snapshots: SnapshotManager,
    settings: EngineSettings,
}

impl Engine {
    /// Advances the world by one turn.
    pub fn step(&mut self, world: &mut WorldState) -> Result<()> {
        world.begin_turn();
        let ctx = SystemContext {
            turn: world.turn(),
            era: world.era(),
            scenario_name: &self.settings.scenario_name,
        };
        for system in &mut self.systems {
            let mut stream = self.rng.stream(system.name());
            system.run(&ctx, world, &mut stream)?;
        }
        debug!(
            turn = world.turn(),
            era = world.era(),
            units = world.unit_count(),
            "turn advanced"
        );
        self.snapshots
            .maybe_snapshot(world, &self.settings.scenario_name)?;
        Ok(())
    }

    pub fn run(&mut self, world: &mut WorldState, turns: u64) -> Result<()> {
        for _ in 0..turns {
            self.step(world)?;
        }
        Ok(())
    }
}

pub struct SystemContext<'a> {
    pub turn: u64,
    pub era: usize,
    pub scenario_name: &'a str,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut WorldState,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}
