//! Combat resolution. One encounter always leaves exactly one unit alive
//! on the contested tile.

use rand::Rng;
use tracing::debug;

use crate::world::{UnitId, WorldState};

/// Attack power grows faster with era than defense does.
pub const ERA_ATTACK_BONUS: f64 = 1.5;
pub const ERA_DEFENSE_BONUS: f64 = 0.75;

const ROLL_MIN: f64 = 0.6;
const ROLL_MAX: f64 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    AttackerWon,
    DefenderHeld,
}

/// Rolls the fight and removes the loser from the world. Ties go to the
/// defender: the attacker must be strictly stronger to take the tile.
pub fn resolve(
    world: &mut WorldState,
    attacker: UnitId,
    defender: UnitId,
    era: usize,
    rng: &mut impl Rng,
) -> CombatOutcome {
    let (atk_base, def_base) = match (world.unit(attacker), world.unit(defender)) {
        (Some(a), Some(d)) => (a.kind.stats().attack, d.kind.stats().defense),
        _ => return CombatOutcome::DefenderHeld,
    };
    let atk_power = (atk_base + era as f64 * ERA_ATTACK_BONUS) * rng.gen_range(ROLL_MIN..ROLL_MAX);
    let def_power = (def_base + era as f64 * ERA_DEFENSE_BONUS) * rng.gen_range(ROLL_MIN..ROLL_MAX);

    let outcome = if atk_power > def_power {
        world.remove_unit(defender);
        CombatOutcome::AttackerWon
    } else {
        world.remove_unit(attacker);
        CombatOutcome::DefenderHeld
    };
    debug!(?outcome, atk_power, def_power, "combat resolved");
    outcome
}
