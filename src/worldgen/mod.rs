//! Procedural world generation.
//!
//! Builds a complete `WorldState` from a scenario and seed: fractal
//! heightmap, water/mountain classification, rivers, Voronoi territory
//! partition, factions, and neutral settlements. Generation is
//! all-or-nothing — the state is assembled fresh and only returned on
//! success — and fully determined by the seed.

pub mod factions;
pub mod noise;
pub mod regions;
pub mod terrain;

use thiserror::Error;
use tracing::info;

use crate::rng::GameRng;
use crate::scenario::Scenario;
use crate::world::WorldState;

use noise::Heightmap;

// Stream separation masks, one per generation phase.
const HEIGHTMAP_SEED_MASK: u64 = 0xDEAD_BEEF;
const REGION_SEED_MASK: u64 = 0x00C0_FFEE;
const FACTION_SEED_MASK: u64 = 0x1234;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no region contains habitable land; lower the water or mountain thresholds")]
    NoHabitableRegion,
}

pub fn generate(scenario: &Scenario) -> Result<WorldState, GenerationError> {
    let seed = scenario.seed as u32 as u64; // JS `>>> 0` seed normalization
    let (width, height) = (scenario.map_width, scenario.map_height);
    let mut master = GameRng::new(seed);

    let heightmap = Heightmap::new(
        width,
        height,
        seed ^ HEIGHTMAP_SEED_MASK,
        scenario.terrain.latitude_bias,
    );
    let mut tiles = terrain::build_tiles(width, height, &heightmap, &scenario.terrain);
    terrain::carve_rivers(&mut tiles, width, height, &mut master, &scenario.terrain);

    let region_list = regions::partition(
        &mut tiles,
        width,
        height,
        seed ^ REGION_SEED_MASK,
        scenario.regions,
    );
    let region_count = region_list.len();

    let mut world = WorldState::from_parts(width, height, tiles, region_list);
    factions::create_factions(
        &mut world,
        scenario.factions,
        seed ^ FACTION_SEED_MASK,
        &mut master,
    )?;
    factions::place_settlements(&mut world, scenario.initial_cities, &mut master);
    world.recompute_vision();

    info!(
        seed = scenario.seed,
        width,
        height,
        regions = region_count,
        factions = scenario.factions,
        units = world.unit_count(),
        "world generated"
    );
    Ok(world)
}
