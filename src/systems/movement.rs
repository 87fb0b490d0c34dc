//! AI movement: each unit takes at most one greedy step per turn, toward
//! the nearest region its faction does not own, or on a bounded roam when
//! no target exists. Arrival on an enemy unit resolves combat; arrival on
//! free ground can flip the region (territory creep, not instant capture).

use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{FactionId, RegionId, UnitId, WorldState},
};

use super::combat::{self, CombatOutcome};

const ACT_CHANCE: f64 = 0.75;
const ROAM_RANGE: i32 = 4;
const CAPTURE_BASE_CHANCE: f64 = 0.02;
const CAPTURE_TURN_SCALE: f64 = 1.0 / 1000.0;

pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut WorldState,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for faction in 0..world.factions.len() {
            // Roster snapshot: combat this turn may remove entries.
            let roster = world.factions[faction].units.clone();
            for unit in roster {
                if world.unit(unit).is_none() {
                    continue;
                }
                if !rng.gen_bool(ACT_CHANCE) {
                    continue;
                }
                step_unit(world, faction, unit, ctx, rng);
            }
        }
        Ok(())
    }
}

fn step_unit(
    world: &mut WorldState,
    faction: FactionId,
    unit: UnitId,
    ctx: &SystemContext,
    rng: &mut SystemRng<'_>,
) {
    let (ux, uy) = {
        let u = world.unit(unit).expect("caller checked unit exists");
        (u.x, u.y)
    };

    let (tx, ty) = match nearest_hostile_region(world, faction, ux, uy) {
        Some(region) => {
            let tiles = &world.regions()[region].tiles;
            let pick = tiles[rng.gen_range(0..tiles.len())];
            let target = &world.tiles()[pick];
            (target.x, target.y)
        }
        None => (
            ux + rng.gen_range(-ROAM_RANGE..=ROAM_RANGE),
            uy + rng.gen_range(-ROAM_RANGE..=ROAM_RANGE),
        ),
    };

    let nx = (ux + (tx - ux).signum()).clamp(0, world.width() - 1);
    let ny = (uy + (ty - uy).signum()).clamp(0, world.height() - 1);
    if nx == ux && ny == uy {
        return;
    }

    let (legal, occupant, dest_region) = {
        let dest = world.tile(nx, ny).expect("clamped to bounds");
        let kind = world.unit(unit).expect("checked above").kind;
        let legal = if kind.is_naval() {
            dest.water
        } else {
            dest.passable_land()
        };
        (legal, dest.unit, dest.region)
    };
    if !legal {
        return;
    }

    match occupant {
        Some(defender) => {
            let defender_faction = world.unit(defender).map(|d| d.faction);
            if defender_faction == Some(faction) {
                return; // friendly tile is simply blocked
            }
            if combat::resolve(world, unit, defender, ctx.era, rng) == CombatOutcome::AttackerWon {
                world.move_unit(unit, nx, ny);
            }
        }
        None => {
            world.move_unit(unit, nx, ny);
            let capture_chance = CAPTURE_BASE_CHANCE + ctx.turn as f64 * CAPTURE_TURN_SCALE;
            if let Some(region) = dest_region {
                if world.regions()[region].owner != Some(faction)
                    && rng.gen_bool(capture_chance.min(1.0))
                {
                    world.transfer_region(region, Some(faction));
                }
            }
        }
    }
}

/// Nearest region not owned by `faction`, measured to each region's
/// representative tile. Regions are scanned in id order so ties are
/// deterministic.
fn nearest_hostile_region(
    world: &WorldState,
    faction: FactionId,
    x: i32,
    y: i32,
) -> Option<RegionId> {
    let mut best: Option<(RegionId, i64)> = None;
    for region in world.regions() {
        if region.owner == Some(faction) {
            continue;
        }
        let Some(rep) = world.region_representative(region.id) else {
            continue;
        };
        let dx = i64::from(rep.x - x);
        let dy = i64::from(rep.y - y);
        let d = dx * dx + dy * dy;
        if best.map(|(_, bd)| d < bd).unwrap_or(true) {
            best = Some((region.id, d));
        }
    }
    best.map(|(id, _)| id)
}
