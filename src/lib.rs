pub mod engine;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod units;
pub mod world;
pub mod worldgen;

pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::WorldState;
