use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    units::RECRUITABLE,
    world::WorldState,
};

const TREASURY_FLOOR: u32 = 50;
const RECRUIT_COST: u32 = 30;
const RECRUIT_CHANCE: f64 = 0.5;
const PLACEMENT_RADIUS: i32 = 6;

/// Spends treasury on new units near each faction's capital. The cost is
/// only deducted when a free tile was actually found.
pub struct RecruitSystem;

impl RecruitSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecruitSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RecruitSystem {
    fn name(&self) -> &str {
        "recruit"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut WorldState,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for id in 0..world.factions.len() {
            if world.factions[id].treasury <= TREASURY_FLOOR {
                continue;
            }
            if !rng.gen_bool(RECRUIT_CHANCE) {
                continue;
            }
            let capital = world.factions[id].capital;
            let Some((x, y)) = world.nearest_open_tile(capital.0, capital.1, PLACEMENT_RADIUS)
            else {
                continue;
            };
            let kind = RECRUITABLE[rng.gen_range(0..RECRUITABLE.len())];
            if world.spawn_unit(kind, id, x, y).is_some() {
                world.factions[id].treasury -= RECRUIT_COST;
            }
        }
        Ok(())
    }
}
