//! Fixed timestep simulation tick
//!
//! Core battle loop that advances the simulation deterministically.

use super::combat::{prune_dead, resolve_towers, resolve_units};
use super::elixir::{ClockStatus, advance_clock};
use super::entity::Side;
use super::opponent;
use super::phase::{evaluate, finish};
use super::state::{Battle, MatchOutcome, MatchPhase};

/// Advance the battle by `dt` seconds.
///
/// Order within a tick is fixed: clock and elixir, player units, opponent
/// units, towers (player then opponent), opponent heuristic, prune, then the
/// win/loss check. A fallen king ends the match before the next step runs.
/// Does nothing unless the match is playing. Returns the outcome on the tick
/// the match ends.
pub fn tick(battle: &mut Battle, dt: f32) -> Option<MatchOutcome> {
    if battle.phase != MatchPhase::Playing {
        return None;
    }

    if advance_clock(battle, dt) == ClockStatus::Expired {
        return conclude(battle, true);
    }

    resolve_units(battle, Side::Player, dt);
    if let Some(outcome) = conclude(battle, false) {
        return Some(outcome);
    }
    resolve_units(battle, Side::Opponent, dt);
    if let Some(outcome) = conclude(battle, false) {
        return Some(outcome);
    }

    resolve_towers(battle, Side::Player);
    resolve_towers(battle, Side::Opponent);

    opponent::think(battle);

    prune_dead(battle);
    battle.normalize_order();

    conclude(battle, false)
}

fn conclude(battle: &mut Battle, clock_expired: bool) -> Option<MatchOutcome> {
    let outcome = evaluate(battle, clock_expired)?;
    finish(battle, outcome);
    Some(outcome)
}
