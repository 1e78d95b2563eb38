//! Item payloads carried by spawned items.
//!
//! World definitions describe item strength with coarse levels; the tables
//! below turn those into gameplay numbers.

use serde::{Deserialize, Serialize};

/// Coarse strength level used by item definitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatLevel {
    #[serde(rename = "VERY LOW")]
    VeryLow,
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "VERY HIGH")]
    VeryHigh,
}

const WEAPON_DAMAGE: [f64; 5] = [5.0, 10.0, 20.0, 35.0, 50.0];
const WEAPON_REACH: [f64; 5] = [75.0, 150.0, 225.0, 300.0, 375.0];
const WEAPON_COOLDOWN: [f64; 5] = [0.3, 0.7, 1.2, 1.5, 2.5];
const WEAPON_ARC: [f64; 5] = [30.0, 45.0, 65.0, 100.0, 135.0];
const WEAPON_LUNGE: [f64; 5] = [0.5, 1.2, 2.0, 3.0, 4.0];
const CONSUMABLE_HEALTH: [f64; 5] = [5.0, 12.0, 20.0, 35.0, 55.0];

impl StatLevel {
    fn index(self) -> usize {
        match self {
            StatLevel::VeryLow => 0,
            StatLevel::Low => 1,
            StatLevel::Medium => 2,
            StatLevel::High => 3,
            StatLevel::VeryHigh => 4,
        }
    }

    fn pick(self, table: &[f64; 5]) -> f64 {
        table[self.index()]
    }
}

/// What an item does when picked up or used.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemData {
    Weapon {
        damage: StatLevel,
        reach: StatLevel,
        cooldown: StatLevel,
        arc: StatLevel,
        lunge: StatLevel,
    },
    Consumable {
        health: StatLevel,
    },
    #[default]
    Misc,
}

/// Resolved weapon numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponStats {
    /// Hit points removed per hit.
    pub damage: f64,
    /// Attack reach in world units.
    pub reach: f64,
    /// Seconds between attacks.
    pub cooldown: f64,
    /// Swing arc in degrees.
    pub arc: f64,
    /// Forward lunge multiplier.
    pub lunge: f64,
}

impl ItemData {
    /// Weapon numbers, or `None` for non-weapons.
    pub fn weapon_stats(&self) -> Option<WeaponStats> {
        match *self {
            ItemData::Weapon {
                damage,
                reach,
                cooldown,
                arc,
                lunge,
            } => Some(WeaponStats {
                damage: damage.pick(&WEAPON_DAMAGE),
                reach: reach.pick(&WEAPON_REACH),
                cooldown: cooldown.pick(&WEAPON_COOLDOWN),
                arc: arc.pick(&WEAPON_ARC),
                lunge: lunge.pick(&WEAPON_LUNGE),
            }),
            _ => None,
        }
    }

    /// Health restored by a consumable, or `None` for other items.
    pub fn consumable_health(&self) -> Option<f64> {
        match *self {
            ItemData::Consumable { health } => Some(health.pick(&CONSUMABLE_HEALTH)),
            _ => None,
        }
    }
}
