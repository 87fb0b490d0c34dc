//! The fixed unit catalog.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Scout,
    Infantry,
    Cavalry,
    Siege,
    Ship,
}

#[derive(Debug, Clone, Copy)]
pub struct UnitStats {
    pub display: &'static str,
    pub movement: u32,
    pub attack: f64,
    pub defense: f64,
    pub sight: i32,
    pub cost: u32,
}

const SCOUT: UnitStats = UnitStats {
    display: "Scout",
    movement: 5,
    attack: 1.0,
    defense: 1.0,
    sight: 6,
    cost: 10,
};

const INFANTRY: UnitStats = UnitStats {
    display: "Infantry",
    movement: 3,
    attack: 3.0,
    defense: 2.0,
    sight: 4,
    cost: 30,
};

const CAVALRY: UnitStats = UnitStats {
    display: "Cavalry",
    movement: 5,
    attack: 4.0,
    defense: 2.5,
    sight: 5,
    cost: 50,
};

const SIEGE: UnitStats = UnitStats {
    display: "Siege",
    movement: 1,
    attack: 8.0,
    defense: 1.0,
    sight: 3,
    cost: 120,
};

const SHIP: UnitStats = UnitStats {
    display: "Ship",
    movement: 4,
    attack: 2.0,
    defense: 1.5,
    sight: 5,
    cost: 60,
};

/// Kinds garrisons and recruitment draw from.
pub const RECRUITABLE: [UnitKind; 3] = [UnitKind::Infantry, UnitKind::Scout, UnitKind::Cavalry];

impl UnitKind {
    pub const fn stats(self) -> &'static UnitStats {
        match self {
            UnitKind::Scout => &SCOUT,
            UnitKind::Infantry => &INFANTRY,
            UnitKind::Cavalry => &CAVALRY,
            UnitKind::Siege => &SIEGE,
            UnitKind::Ship => &SHIP,
        }
    }

    /// Ships travel on water, everything else on open land.
    pub fn is_naval(self) -> bool {
        matches!(self, UnitKind::Ship)
    }
}
