use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::WorldState,
};

/// Rebuilds fog of war from scratch each turn. There is no persistent
/// explored layer; what no unit currently sees is hidden.
pub struct VisionSystem;

impl VisionSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for VisionSystem {
    fn name(&self) -> &str {
        "vision"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut WorldState,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        world.recompute_vision();
        Ok(())
    }
}
