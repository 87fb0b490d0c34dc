//! Faction seeding: capitals, claimed territory, garrisons, and the
//! neutral settlements scattered between them.

use tracing::debug;

use crate::rng::GameRng;
use crate::units::RECRUITABLE;
use crate::world::{City, Faction, WorldState};

use super::GenerationError;

const CLAIM_DIVISOR: f64 = 1.6;
const GARRISON_SPILL_RADIUS: i32 = 4;

/// Places `count` factions: a capital on a habitable region, territory
/// claimed by distance threshold, a capital city, and a starting garrison.
///
/// Claiming processes factions in list order and later claims overwrite
/// earlier ones; the losing faction's region list is pruned so ownership
/// never disagrees with it.
pub fn create_factions(
    world: &mut WorldState,
    count: usize,
    seed: u64,
    master: &mut GameRng,
) -> Result<(), GenerationError> {
    let mut rnd = GameRng::new(seed);

    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        colors.push([
            (60.0 + rnd.next_f64() * 180.0) as u8,
            (60.0 + rnd.next_f64() * 180.0) as u8,
            (60.0 + rnd.next_f64() * 180.0) as u8,
        ]);
    }

    let candidates: Vec<usize> = world
        .regions()
        .iter()
        .filter(|r| r.tiles.iter().any(|i| world.tiles()[*i].passable_land()))
        .map(|r| r.id)
        .collect();
    if candidates.is_empty() {
        return Err(GenerationError::NoHabitableRegion);
    }

    for id in 0..count {
        let region = candidates[rnd.index(candidates.len())];
        let land: Vec<usize> = world.regions()[region]
            .tiles
            .iter()
            .copied()
            .filter(|i| world.tiles()[*i].passable_land())
            .collect();
        let capital_tile = land[rnd.index(land.len())];
        let capital = (world.tiles()[capital_tile].x, world.tiles()[capital_tile].y);
        let treasury = 200 + (rnd.next_f64() * 300.0) as u32;
        world.factions.push(Faction {
            id,
            name: format!("Faction {}", id + 1),
            color: colors[id],
            capital,
            regions: Vec::new(),
            units: Vec::new(),
            treasury,
        });
        world.transfer_region(region, Some(id));
        debug!(faction = id, region, ?capital, "capital placed");
    }

    let claim_radius_sq =
        (world.width() * world.height()) as f64 / (count as f64 * CLAIM_DIVISOR);
    for id in 0..count {
        let capital = world.factions()[id].capital;
        for region in 0..world.regions().len() {
            let Some(rep) = world.region_representative(region) else {
                continue;
            };
            let dx = f64::from(rep.x - capital.0);
            let dy = f64::from(rep.y - capital.1);
            if dx * dx + dy * dy < claim_radius_sq {
                world.transfer_region(region, Some(id));
            }
        }

        let name = format!("{} Capital", world.factions()[id].name);
        if let Some(tile) = world.tile_mut(capital.0, capital.1) {
            tile.city = Some(City {
                owner: Some(id),
                name,
            });
        }
        place_garrison(world, id, capital, master);
    }

    Ok(())
}

/// 2–4 units from the recruitable subset. The capital tile takes the first
/// one; the rest spill onto the nearest open land so no two units ever
/// share a tile.
fn place_garrison(world: &mut WorldState, faction: usize, capital: (i32, i32), rng: &mut GameRng) {
    let strength = 2 + rng.index(3);
    for _ in 0..strength {
        let kind = RECRUITABLE[rng.index(RECRUITABLE.len())];
        if let Some((x, y)) = world.nearest_open_tile(capital.0, capital.1, GARRISON_SPILL_RADIUS) {
            world.spawn_unit(kind, faction, x, y);
        }
    }
}

const SETTLEMENT_ATTEMPTS: usize = 50;

/// Scatters unowned cities on free land tiles.
pub fn place_settlements(world: &mut WorldState, count: usize, rng: &mut GameRng) {
    for _ in 0..count {
        for _ in 0..SETTLEMENT_ATTEMPTS {
            let x = rng.index(world.width() as usize) as i32;
            let y = rng.index(world.height() as usize) as i32;
            let name = settlement_name(rng);
            let Some(tile) = world.tile_mut(x, y) else {
                continue;
            };
            if tile.passable_land() && tile.city.is_none() {
                tile.city = Some(City { owner: None, name });
                break;
            }
        }
    }
}

const SYLLABLES: [&str; 12] = [
    "kar", "vel", "dor", "ash", "mir", "tol", "bren", "hal", "sor", "fen", "gal", "rud",
];

fn settlement_name(rng: &mut GameRng) -> String {
    let parts = 2 + rng.index(2);
    let mut name = String::new();
    for _ in 0..parts {
        name.push_str(SYLLABLES[rng.index(SYLLABLES.len())]);
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => name,
    }
}
