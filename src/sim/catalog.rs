//! Card catalog
//!
//! Static stat table for the six unit archetypes.

use serde::{Deserialize, Serialize};

/// A deployable unit archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardArchetype {
    Knight,
    Archer,
    Giant,
    Goblin,
    Wizard,
    Dragon,
}

/// Combat stats derived from an archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub cost: u32,
    pub max_health: u32,
    pub damage: u32,
    /// Seconds between attacks
    pub attack_interval: f32,
    /// Units per second
    pub move_speed: f32,
    pub attack_range: f32,
}

impl CardArchetype {
    /// Every archetype, in catalog order
    pub const ALL: [CardArchetype; 6] = [
        CardArchetype::Knight,
        CardArchetype::Archer,
        CardArchetype::Giant,
        CardArchetype::Goblin,
        CardArchetype::Wizard,
        CardArchetype::Dragon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardArchetype::Knight => "Knight",
            CardArchetype::Archer => "Archer",
            CardArchetype::Giant => "Giant",
            CardArchetype::Goblin => "Goblin",
            CardArchetype::Wizard => "Wizard",
            CardArchetype::Dragon => "Dragon",
        }
    }

    pub fn stats(&self) -> UnitStats {
        match self {
            CardArchetype::Knight => UnitStats {
                cost: 3,
                max_health: 100,
                damage: 15,
                attack_interval: 1.2,
                move_speed: 60.0,
                attack_range: 30.0,
            },
            CardArchetype::Archer => UnitStats {
                cost: 3,
                max_health: 50,
                damage: 12,
                attack_interval: 1.0,
                move_speed: 50.0,
                attack_range: 120.0,
            },
            CardArchetype::Giant => UnitStats {
                cost: 5,
                max_health: 200,
                damage: 20,
                attack_interval: 1.5,
                move_speed: 35.0,
                attack_range: 30.0,
            },
            CardArchetype::Goblin => UnitStats {
                cost: 2,
                max_health: 30,
                damage: 8,
                attack_interval: 0.8,
                move_speed: 80.0,
                attack_range: 25.0,
            },
            CardArchetype::Wizard => UnitStats {
                cost: 5,
                max_health: 60,
                damage: 25,
                attack_interval: 1.8,
                move_speed: 45.0,
                attack_range: 100.0,
            },
            CardArchetype::Dragon => UnitStats {
                cost: 4,
                max_health: 80,
                damage: 18,
                attack_interval: 1.3,
                move_speed: 70.0,
                attack_range: 90.0,
            },
        }
    }

    /// Elixir cost
    #[inline]
    pub fn cost(&self) -> u32 {
        self.stats().cost
    }

    /// Archetypes affordable with the given elixir
    pub fn affordable(elixir: f32) -> impl Iterator<Item = CardArchetype> {
        Self::ALL
            .into_iter()
            .filter(move |a| a.cost() as f32 <= elixir)
    }
}
