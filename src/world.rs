//! World state: the tile arena, regions, factions, units, and fog of war.
//!
//! The grid is a flat `Vec<Tile>` addressed by `y * width + x`. All
//! mutation goes through methods that keep the cross-references consistent:
//! a tile holds at most one unit id, a unit's coordinates always name the
//! tile holding it, and a region's owner always agrees with the owning
//! faction's region list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::units::UnitKind;

pub type RegionId = usize;
pub type FactionId = usize;
pub type UnitId = u64;

pub const ERA_LENGTH_TURNS: u64 = 25;
pub const ERA_COUNT: u64 = 4;

/// Coarse gameplay phase: one era per 25 turns, clamped to the last era.
pub fn era_for_turn(turn: u64) -> usize {
    (turn / ERA_LENGTH_TURNS).min(ERA_COUNT - 1) as usize
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub height: f64,
    pub water: bool,
    pub mountain: bool,
    pub region: Option<RegionId>,
    pub city: Option<City>,
    pub unit: Option<UnitId>,
}

impl Tile {
    /// Land a ground unit may stand on.
    pub fn passable_land(&self) -> bool {
        !self.water && !self.mountain
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub owner: Option<FactionId>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    /// Tile indices into the arena. Membership is exclusive.
    pub tiles: Vec<usize>,
    pub owner: Option<FactionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    pub color: [u8; 3],
    pub capital: (i32, i32),
    pub regions: Vec<RegionId>,
    pub units: Vec<UnitId>,
    pub treasury: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub faction: FactionId,
    pub x: i32,
    pub y: i32,
}

/// Per-faction visibility bits, recomputed every turn. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct Visibility {
    faction_count: usize,
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Visibility {
    pub fn reset(&mut self, faction_count: usize, width: i32, height: i32) {
        self.faction_count = faction_count;
        self.width = width;
        self.height = height;
        self.bits.clear();
        self.bits
            .resize(faction_count * (width * height) as usize, false);
    }

    fn bit_index(&self, faction: FactionId, x: i32, y: i32) -> Option<usize> {
        if faction >= self.faction_count || x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(faction * (self.width * self.height) as usize + (y * self.width + x) as usize)
    }

    /// Marks the square of side `2*radius + 1` centered on `(cx, cy)`,
    /// clipped to the grid.
    pub fn mark_square(&mut self, faction: FactionId, cx: i32, cy: i32, radius: i32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if let Some(i) = self.bit_index(faction, cx + dx, cy + dy) {
                    self.bits[i] = true;
                }
            }
        }
    }

    pub fn is_visible(&self, faction: FactionId, x: i32, y: i32) -> bool {
        self.bit_index(faction, x, y)
            .map(|i| self.bits[i])
            .unwrap_or(false)
    }

    pub fn visible_count(&self, faction: FactionId) -> usize {
        let per = (self.width * self.height) as usize;
        if faction >= self.faction_count {
            return 0;
        }
        self.bits[faction * per..(faction + 1) * per]
            .iter()
            .filter(|b| **b)
            .count()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) tiles: Vec<Tile>,
    pub(crate) regions: Vec<Region>,
    pub(crate) factions: Vec<Faction>,
    pub(crate) units: BTreeMap<UnitId, Unit>,
    pub(crate) next_unit_id: UnitId,
    pub(crate) turn: u64,
    #[serde(skip)]
    pub(crate) visibility: Visibility,
}

impl WorldState {
    pub(crate) fn from_parts(
        width: i32,
        height: i32,
        tiles: Vec<Tile>,
        regions: Vec<Region>,
    ) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        Self {
            width,
            height,
            tiles,
            regions,
            factions: Vec::new(),
            units: BTreeMap::new(),
            next_unit_id: 0,
            turn: 0,
            visibility: Visibility::default(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn era(&self) -> usize {
        era_for_turn(self.turn)
    }

    pub(crate) fn begin_turn(&mut self) {
        self.turn += 1;
    }

    /// Arena index for in-bounds coordinates, `None` otherwise.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(move |i| &mut self.tiles[i])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.keys().copied()
    }

    /// An arbitrary but fixed tile standing in for the region's center.
    pub fn region_representative(&self, region: RegionId) -> Option<&Tile> {
        let r = self.regions.get(region)?;
        if r.tiles.is_empty() {
            return None;
        }
        let pick = (r.tiles.len() as f64 * 0.4) as usize;
        Some(&self.tiles[r.tiles[pick.min(r.tiles.len() - 1)]])
    }

    /// Creates a unit on an empty tile. Returns `None` when the tile is out
    /// of bounds or occupied.
    pub fn spawn_unit(&mut self, kind: UnitKind, faction: FactionId, x: i32, y: i32) -> Option<UnitId> {
        if faction >= self.factions.len() {
            return None;
        }
        let idx = self.index(x, y)?;
        if self.tiles[idx].unit.is_some() {
            return None;
        }
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        self.tiles[idx].unit = Some(id);
        self.factions[faction].units.push(id);
        self.units.insert(
            id,
            Unit {
                id,
                kind,
                faction,
                x,
                y,
            },
        );
        Some(id)
    }

    /// Removes a unit from the map and its faction's roster.
    pub fn remove_unit(&mut self, id: UnitId) {
        if let Some(unit) = self.units.remove(&id) {
            if let Some(tile) = self.tile_mut(unit.x, unit.y) {
                if tile.unit == Some(id) {
                    tile.unit = None;
                }
            }
            if let Some(faction) = self.factions.get_mut(unit.faction) {
                faction.units.retain(|u| *u != id);
            }
        }
    }

    /// Moves a unit onto an empty in-bounds tile. Returns false and leaves
    /// the world untouched otherwise.
    pub fn move_unit(&mut self, id: UnitId, x: i32, y: i32) -> bool {
        let Some(dest) = self.index(x, y) else {
            return false;
        };
        if self.tiles[dest].unit.is_some() {
            return false;
        }
        let Some(unit) = self.units.get_mut(&id) else {
            return false;
        };
        let from = (unit.x, unit.y);
        unit.x = x;
        unit.y = y;
        if let Some(i) = self.index(from.0, from.1) {
            if self.tiles[i].unit == Some(id) {
                self.tiles[i].unit = None;
            }
        }
        self.tiles[dest].unit = Some(id);
        true
    }

    /// Reassigns region ownership, keeping faction region lists in sync.
    /// Does not touch vision; callers batching transfers recompute once.
    pub fn transfer_region(&mut self, region: RegionId, new_owner: Option<FactionId>) {
        if region >= self.regions.len() {
            return;
        }
        if let Some(previous) = self.regions[region].owner {
            if let Some(faction) = self.factions.get_mut(previous) {
                faction.regions.retain(|r| *r != region);
            }
        }
        self.regions[region].owner = new_owner;
        if let Some(owner) = new_owner {
            if let Some(faction) = self.factions.get_mut(owner) {
                if !faction.regions.contains(&region) {
                    faction.regions.push(region);
                }
            }
        }
    }

    /// Editor override: reassign a region and refresh fog of war.
    pub fn set_region_owner(&mut self, region: RegionId, owner: Option<FactionId>) {
        self.transfer_region(region, owner);
        self.recompute_vision();
    }

    /// Expanding ring search for the nearest empty open-land tile around
    /// `(cx, cy)`, the center included.
    pub fn nearest_open_tile(&self, cx: i32, cy: i32, max_radius: i32) -> Option<(i32, i32)> {
        for radius in 0..=max_radius {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs().max(dy.abs()) != radius {
                        continue;
                    }
                    let (x, y) = (cx + dx, cy + dy);
                    if let Some(tile) = self.tile(x, y) {
                        if tile.passable_land() && tile.unit.is_none() {
                            return Some((x, y));
                        }
                    }
                }
            }
        }
        None
    }

    pub fn recompute_vision(&mut self) {
        let era = self.era() as i32;
        self.visibility
            .reset(self.factions.len(), self.width, self.height);
        for unit in self.units.values() {
            let sight = unit.kind.stats().sight + era;
            self.visibility
                .mark_square(unit.faction, unit.x, unit.y, sight);
        }
    }

    pub fn is_visible(&self, faction: FactionId, x: i32, y: i32) -> bool {
        self.visibility.is_visible(faction, x, y)
    }

    /// Read-only projection for a renderer: terrain, ownership, occupancy,
    /// faction summaries, turn and era. No generator internals leak out.
    pub fn view(&self) -> WorldView {
        let tiles = self
            .tiles
            .iter()
            .map(|tile| TileView {
                x: tile.x,
                y: tile.y,
                height: tile.height,
                water: tile.water,
                mountain: tile.mountain,
                region: tile.region,
                owner: tile.region.and_then(|r| self.regions[r].owner),
                unit: tile.unit.and_then(|id| self.units.get(&id)).map(|u| u.kind),
                city: tile.city.as_ref().map(|c| c.name.clone()),
            })
            .collect();
        let factions = self
            .factions
            .iter()
            .map(|f| FactionView {
                id: f.id,
                name: f.name.clone(),
                color: f.color,
                treasury: f.treasury,
                regions: f.regions.clone(),
                units: f.units.clone(),
            })
            .collect();
        WorldView {
            turn: self.turn,
            era: self.era(),
            width: self.width,
            height: self.height,
            tiles,
            factions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TileView {
    pub x: i32,
    pub y: i32,
    pub height: f64,
    pub water: bool,
    pub mountain: bool,
    pub region: Option<RegionId>,
    pub owner: Option<FactionId>,
    pub unit: Option<UnitKind>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactionView {
    pub id: FactionId,
    pub name: String,
    pub color: [u8; 3],
    pub treasury: u32,
    pub regions: Vec<RegionId>,
    pub units: Vec<UnitId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldView {
    pub turn: u64,
    pub era: usize,
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<TileView>,
    pub factions: Vec<FactionView>,
}
