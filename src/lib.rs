//! Clash Mini - a two-sided arena battle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (cards, units, towers, elixir, match rules)
//! - `game`: Match driver that owns a battle and its injected economy
//! - `economy`: Booster supply and victory rewards
//! - `config`: Data-driven match configuration

pub mod config;
pub mod economy;
pub mod game;
pub mod sim;

pub use config::MatchConfig;
pub use economy::{Economy, Wallet};
pub use game::Game;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (10 Hz match clock)
    pub const SIM_DT: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Match length in seconds
    pub const MATCH_DURATION: f32 = 180.0;
    /// Time remaining at which double elixir kicks in
    pub const DOUBLE_ELIXIR_TIME: f32 = 60.0;
    /// Slack for match-time comparisons (clock, cooldowns, timers)
    pub const TIME_EPSILON: f64 = 1e-4;

    /// Elixir bounds and regeneration (per second)
    pub const MAX_ELIXIR: f32 = 10.0;
    pub const STARTING_ELIXIR: f32 = 5.0;
    pub const ELIXIR_REGEN_RATE: f32 = 0.5;
    pub const DOUBLE_ELIXIR_REGEN_RATE: f32 = 1.0;

    /// Arena dimensions (origin at center, player at the bottom)
    pub const ARENA_WIDTH: f32 = 400.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Tower placement offsets from the arena edge
    pub const KING_TOWER_INSET: f32 = 110.0;
    pub const LANE_TOWER_INSET: f32 = 200.0;
    /// Lane towers sit at +/- width / 3.2
    pub const LANE_TOWER_SPREAD: f32 = ARENA_WIDTH / 3.2;

    /// Player deploy zone: above the back wall margin, below the river bank
    pub const DEPLOY_ZONE_BACK: f32 = -ARENA_HEIGHT / 2.0 + 100.0;
    pub const DEPLOY_ZONE_FRONT: f32 = -30.0;

    /// Opponent spawn band (y) and half-width
    pub const OPPONENT_SPAWN_Y: f32 = ARENA_HEIGHT / 4.0 - 50.0;
    pub const OPPONENT_SPAWN_HALF_WIDTH: f32 = ARENA_WIDTH / 3.5;

    /// Number of cards in hand
    pub const HAND_SIZE: usize = 4;

    /// Units stop advancing when this close to their destination
    pub const ARRIVAL_EPSILON: f32 = 1.0;
}

/// Straight-line step from `from` toward `to`, at most `max_step` long.
///
/// Returns `from` unchanged once within [`consts::ARRIVAL_EPSILON`].
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= consts::ARRIVAL_EPSILON {
        return from;
    }
    from + delta / distance * max_step.min(distance)
}

/// Whether a point lies in the player's half, short of the river
#[inline]
pub fn in_player_deploy_zone(pos: Vec2) -> bool {
    use consts::*;
    pos.y > DEPLOY_ZONE_BACK && pos.y < DEPLOY_ZONE_FRONT && pos.x.abs() <= ARENA_WIDTH / 2.0
}
