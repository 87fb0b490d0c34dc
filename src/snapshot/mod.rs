//! Persistence: periodic turn snapshots and explicit save/load.
//!
//! A snapshot is a JSON envelope holding the full world state plus a
//! little metadata. Fog of war is recomputed on load instead of being
//! stored; generator internals (noise lattice, Voronoi seed points) are
//! not part of the format.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::world::WorldState;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    scenario: String,
    saved_at: String,
    turn: u64,
    world: WorldState,
}

/// Writes the world to `path` as a snapshot file.
pub fn save_world(world: &WorldState, scenario: &str, path: &Path) -> Result<(), SnapshotError> {
    let file = SnapshotFile {
        scenario: scenario.to_string(),
        saved_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        turn: world.turn(),
        world: world.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads a snapshot back into a world. A corrupt or unreadable file is a
/// recoverable error; the caller's in-memory state is untouched.
pub fn load_world(path: &Path) -> Result<WorldState, SnapshotError> {
    let data = fs::read_to_string(path)?;
    let file: SnapshotFile = serde_json::from_str(&data)?;
    let mut world = file.world;
    world.recompute_vision();
    Ok(world)
}

/// Writes a snapshot every `interval` turns under `dir/<scenario>/`.
pub struct SnapshotManager {
    output_dir: PathBuf,
    interval: u64,
}

impl SnapshotManager {
    pub fn new(output_dir: impl AsRef<Path>, interval: u64) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            interval,
        }
    }

    pub fn maybe_snapshot(
        &self,
        world: &WorldState,
        scenario: &str,
    ) -> Result<Option<PathBuf>, SnapshotError> {
        if self.interval == 0 || world.turn() % self.interval != 0 {
            return Ok(None);
        }
        let dir = self.output_dir.join(scenario);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("turn_{:06}.json", world.turn()));
        save_world(world, scenario, &path)?;
        debug!(turn = world.turn(), path = %path.display(), "snapshot written");
        Ok(Some(path))
    }
}
