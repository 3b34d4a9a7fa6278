//! Match clock and elixir regeneration

use super::state::{Battle, MatchEvent};
use crate::consts::*;

/// Result of advancing the match clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    Running,
    /// Time ran out this step; the match must be decided
    Expired,
}

/// Elixir per second for the current phase (before boosters)
#[inline]
pub fn regen_rate(double_elixir: bool) -> f32 {
    if double_elixir {
        DOUBLE_ELIXIR_REGEN_RATE
    } else {
        ELIXIR_REGEN_RATE
    }
}

/// Count the clock down, flip double elixir at the last minute and
/// regenerate both sides. Only call while the match is playing.
pub fn advance_clock(battle: &mut Battle, dt: f32) -> ClockStatus {
    battle.elapsed += dt as f64;
    battle.time_remaining -= dt as f64;
    if battle.time_remaining <= TIME_EPSILON {
        battle.time_remaining = 0.0;
        return ClockStatus::Expired;
    }

    if !battle.double_elixir && battle.time_remaining <= DOUBLE_ELIXIR_TIME as f64 + TIME_EPSILON {
        battle.double_elixir = true;
        battle.events.push(MatchEvent::DoubleElixirStarted);
        log::info!("Double elixir at {:.1}s remaining", battle.time_remaining);
    }

    let rate = regen_rate(battle.double_elixir);
    let player_rate = rate * battle.boosters.regen_multiplier();
    battle.player.gain_elixir(player_rate * dt);
    // Opponent is never boosted
    battle.opponent.gain_elixir(rate * dt);

    ClockStatus::Running
}
