//! Territory partition: discrete Voronoi, small-region merge, compaction.

use crate::rng::GameRng;
use crate::world::{Region, Tile};

const MIN_REGION_FLOOR: usize = 20;
const MIN_REGION_DIVISOR: usize = 240;
const MERGE_SCAN_RADIUS: i32 = 2;

/// Partitions the grid into `region_count` regions and writes each tile's
/// region id. Returned region ids are dense `0..n`.
pub fn partition(
    tiles: &mut [Tile],
    width: i32,
    height: i32,
    seed: u64,
    region_count: usize,
) -> Vec<Region> {
    let mut rng = GameRng::new(seed);
    let seeds: Vec<(i32, i32)> = (0..region_count)
        .map(|_| {
            (
                rng.index(width as usize) as i32,
                rng.index(height as usize) as i32,
            )
        })
        .collect();

    let mut regions: Vec<Region> = (0..region_count)
        .map(|id| Region {
            id,
            tiles: Vec::new(),
            owner: None,
        })
        .collect();

    // Nearest seed by squared distance; ties go to the earliest seed.
    for y in 0..height {
        for x in 0..width {
            let mut best = 0usize;
            let mut best_d = i64::MAX;
            for (i, (sx, sy)) in seeds.iter().enumerate() {
                let dx = i64::from(x - sx);
                let dy = i64::from(y - sy);
                let d = dx * dx + dy * dy;
                if d < best_d {
                    best_d = d;
                    best = i;
                }
            }
            let idx = (y * width + x) as usize;
            tiles[idx].region = Some(best);
            regions[best].tiles.push(idx);
        }
    }

    merge_undersized(tiles, &mut regions, width, height);
    compact(tiles, regions)
}

/// Folds each region below the size floor into the first different region
/// found within a small neighborhood of its first tile. A region with no
/// such neighbor stays undersized; no second attempt is made.
fn merge_undersized(tiles: &mut [Tile], regions: &mut [Region], width: i32, height: i32) {
    let min_size = MIN_REGION_FLOOR.max((width * height) as usize / MIN_REGION_DIVISOR);
    for id in 0..regions.len() {
        if regions[id].tiles.is_empty() || regions[id].tiles.len() >= min_size {
            continue;
        }
        let probe = {
            let t = &tiles[regions[id].tiles[0]];
            (t.x, t.y)
        };
        let mut neighbor = None;
        'scan: for oy in -MERGE_SCAN_RADIUS..=MERGE_SCAN_RADIUS {
            for ox in -MERGE_SCAN_RADIUS..=MERGE_SCAN_RADIUS {
                let (nx, ny) = (probe.0 + ox, probe.1 + oy);
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    continue;
                }
                let other = tiles[(ny * width + nx) as usize].region;
                if let Some(other) = other {
                    if other != id {
                        neighbor = Some(other);
                        break 'scan;
                    }
                }
            }
        }
        if let Some(target) = neighbor {
            let moved = std::mem::take(&mut regions[id].tiles);
            for idx in &moved {
                tiles[*idx].region = Some(target);
            }
            regions[target].tiles.extend(moved);
        }
    }
}

/// Renumbers surviving non-empty regions to a dense `0..n` range in their
/// original relative order and rewrites every tile's region id.
fn compact(tiles: &mut [Tile], regions: Vec<Region>) -> Vec<Region> {
    let mut compacted = Vec::new();
    for mut region in regions {
        if region.tiles.is_empty() {
            continue;
        }
        region.id = compacted.len();
        compacted.push(region);
    }
    for region in &compacted {
        for idx in &region.tiles {
            tiles[*idx].region = Some(region.id);
        }
    }
    compacted
}
