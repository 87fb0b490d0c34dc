use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::world::WorldState;
use crate::worldgen::{self, terrain::TerrainThresholds, GenerationError};

fn default_map_width() -> i32 {
    160
}

fn default_map_height() -> i32 {
    96
}

fn default_factions() -> usize {
    8
}

fn default_regions() -> usize {
    80
}

fn default_initial_cities() -> usize {
    10
}

fn default_snapshot_interval_ticks() -> u64 {
    25
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_map_width")]
    pub map_width: i32,
    #[serde(default = "default_map_height")]
    pub map_height: i32,
    #[serde(default = "default_factions")]
    pub factions: usize,
    #[serde(default = "default_regions")]
    pub regions: usize,
    #[serde(default = "default_initial_cities")]
    pub initial_cities: usize,
    #[serde(default)]
    pub terrain: TerrainThresholds,
    #[serde(default)]
    pub turns: Option<u64>,
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
}

impl Scenario {
    /// The standard 160×96, 8-faction setup with a caller-chosen seed.
    pub fn standard(seed: u64) -> Self {
        Self {
            name: "standard".to_string(),
            description: None,
            seed,
            map_width: default_map_width(),
            map_height: default_map_height(),
            factions: default_factions(),
            regions: default_regions(),
            initial_cities: default_initial_cities(),
            terrain: TerrainThresholds::default(),
            turns: None,
            snapshot_interval_ticks: default_snapshot_interval_ticks(),
        }
    }

    /// Runs generation; the world is only handed back on success.
    pub fn build_world(&self) -> Result<WorldState, GenerationError> {
        worldgen::generate(self)
    }

    pub fn turns(&self, override_turns: Option<u64>) -> u64 {
        override_turns.or(self.turns).unwrap_or(100)
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let scenario: Scenario = serde_yaml::from_str("name: test\nseed: 42\n").unwrap();
        assert_eq!(scenario.map_width, 160);
        assert_eq!(scenario.map_height, 96);
        assert_eq!(scenario.factions, 8);
        assert_eq!(scenario.regions, 80);
        assert!((scenario.terrain.water_level - 0.48).abs() < 1e-12);
        assert_eq!(scenario.turns(None), 100);
        assert_eq!(scenario.turns(Some(5)), 5);
    }

    #[test]
    fn terrain_overrides_apply() {
        let yaml = "name: dry\nseed: 1\nterrain:\n  water_level: 0.3\n";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert!((scenario.terrain.water_level - 0.3).abs() < 1e-12);
        assert!((scenario.terrain.mountain_level - 0.80).abs() < 1e-12);
    }
}
