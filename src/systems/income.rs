use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::WorldState,
};

const BASE_INCOME: u32 = 5;
const INCOME_PER_REGION: u32 = 2;

pub struct IncomeSystem;

impl IncomeSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IncomeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for IncomeSystem {
    fn name(&self) -> &str {
        "income"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut WorldState,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for faction in &mut world.factions {
            faction.treasury += BASE_INCOME + INCOME_PER_REGION * faction.regions.len() as u32;
        }
        Ok(())
    }
}
