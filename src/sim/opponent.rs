//! Opponent deployment heuristic
//!
//! No board awareness: on its own timer the opponent picks any affordable
//! archetype at random and drops it somewhere along its spawn band.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::catalog::CardArchetype;
use super::deploy::spawn_unit;
use super::entity::{Side, UnitId};
use super::state::Battle;
use crate::consts::{OPPONENT_SPAWN_HALF_WIDTH, OPPONENT_SPAWN_Y, TIME_EPSILON};

/// Match time of the opponent's first decision
pub const FIRST_ACTION_AT: f64 = 3.0;
/// Re-arm interval range after each deployment (seconds)
pub const MIN_ACTION_INTERVAL: f64 = 2.0;
pub const MAX_ACTION_INTERVAL: f64 = 4.5;

/// Opponent timer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentAi {
    /// Match time at which the opponent next tries to deploy
    pub next_action_at: f64,
}

impl Default for OpponentAi {
    fn default() -> Self {
        Self {
            next_action_at: FIRST_ACTION_AT,
        }
    }
}

/// Run the opponent's decision if its timer is due.
///
/// When nothing is affordable the timer stays due, so the opponent retries
/// on the next tick.
pub fn think(battle: &mut Battle) -> Option<UnitId> {
    if battle.elapsed + TIME_EPSILON < battle.opponent_ai.next_action_at {
        return None;
    }

    let affordable: Vec<CardArchetype> = CardArchetype::affordable(battle.opponent.elixir).collect();
    let archetype = *affordable.choose(&mut battle.rng)?;
    let x = battle
        .rng
        .random_range(-OPPONENT_SPAWN_HALF_WIDTH..=OPPONENT_SPAWN_HALF_WIDTH);

    let id = spawn_unit(battle, Side::Opponent, archetype, Vec2::new(x, OPPONENT_SPAWN_Y)).ok()?;

    let interval = battle
        .rng
        .random_range(MIN_ACTION_INTERVAL..=MAX_ACTION_INTERVAL);
    battle.opponent_ai.next_action_at = battle.elapsed + interval;
    log::debug!(
        "Opponent played {} ({:.1} elixir left), next in {:.2}s",
        archetype.as_str(),
        battle.opponent.elixir,
        interval
    );
    Some(id)
}
