//! Tile classification and river carving.

use serde::Deserialize;

use crate::rng::GameRng;
use crate::world::Tile;

use super::noise::Heightmap;

fn default_water_level() -> f64 {
    0.48
}

fn default_mountain_level() -> f64 {
    0.80
}

fn default_river_level() -> f64 {
    0.52
}

/// Elevation thresholds. A tile is exactly one of water, mountain, or
/// plain; rivers only wet terrain below `river_level`.
#[derive(Debug, Clone, Deserialize)]
pub struct TerrainThresholds {
    #[serde(default = "default_water_level")]
    pub water_level: f64,
    #[serde(default = "default_mountain_level")]
    pub mountain_level: f64,
    #[serde(default = "default_river_level")]
    pub river_level: f64,
    /// Equator-favoring height multiplier strength; 0 disables the bias.
    #[serde(default)]
    pub latitude_bias: f64,
}

impl Default for TerrainThresholds {
    fn default() -> Self {
        Self {
            water_level: default_water_level(),
            mountain_level: default_mountain_level(),
            river_level: default_river_level(),
            latitude_bias: 0.0,
        }
    }
}

pub fn build_tiles(
    width: i32,
    height: i32,
    heightmap: &Heightmap,
    thresholds: &TerrainThresholds,
) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let h = heightmap.at(x, y);
            tiles.push(Tile {
                x,
                y,
                height: h,
                water: h < thresholds.water_level,
                mountain: h > thresholds.mountain_level,
                region: None,
                city: None,
                unit: None,
            });
        }
    }
    tiles
}

const RIVER_TRIALS_PER_TILE: f64 = 0.002;
const RIVER_MAX_STEPS: u32 = 300;

/// Greedy steepest-descent walks from random starts. Each walk wets the
/// tiles it visits that sit below the river threshold and stops at a local
/// minimum or after the step budget. Not a hydrology model; the
/// termination rule is what makes river shapes reproducible per seed.
pub fn carve_rivers(
    tiles: &mut [Tile],
    width: i32,
    height: i32,
    rng: &mut GameRng,
    thresholds: &TerrainThresholds,
) {
    let trials = ((width * height) as f64 * RIVER_TRIALS_PER_TILE) as u32;
    for _ in 0..trials {
        let mut rx = rng.index(width as usize) as i32;
        let mut ry = rng.index(height as usize) as i32;
        for _ in 0..RIVER_MAX_STEPS {
            let here = (ry * width + rx) as usize;
            if tiles[here].height < thresholds.river_level {
                tiles[here].water = true;
            }
            let mut best = (rx, ry, tiles[here].height);
            for oy in -1..=1 {
                for ox in -1..=1 {
                    let (nx, ny) = (rx + ox, ry + oy);
                    if nx < 0 || ny < 0 || nx >= width || ny >= height {
                        continue;
                    }
                    let h = tiles[(ny * width + nx) as usize].height;
                    if h < best.2 {
                        best = (nx, ny, h);
                    }
                }
            }
            if best.0 == rx && best.1 == ry {
                break; // local minimum
            }
            rx = best.0;
            ry = best.1;
        }
    }
}
