use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{UnitId, WorldState},
};

/// End-of-turn sanitation: keeps faction rosters free of dangling unit
/// ids and region lists sorted and duplicate-free.
pub struct BookkeepingSystem;

impl BookkeepingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BookkeepingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for BookkeepingSystem {
    fn name(&self) -> &str {
        "bookkeeping"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut WorldState,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let live: Vec<UnitId> = world.unit_ids().collect();
        for faction in &mut world.factions {
            faction.units.retain(|u| live.contains(u));
            faction.regions.sort_unstable();
            faction.regions.dedup();
        }
        Ok(())
    }
}
