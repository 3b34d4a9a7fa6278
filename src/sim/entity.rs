//! Combat entities: units and towers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::CardArchetype;
use crate::consts::*;

/// Which side of the arena an entity fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human player (bottom half)
    Player,
    /// The autonomous opponent (top half)
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// +1 for the opponent half, -1 for the player half
    #[inline]
    fn y_sign(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }

    /// Point units advance toward when nothing is in sight: the opposing king
    pub fn enemy_baseline(self) -> Vec2 {
        TowerKind::King.position(self.opposite())
    }
}

/// Unit identifier (unique within a battle)
pub type UnitId = u32;

/// Unit lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitState {
    #[default]
    Idle,
    Moving,
    Attacking,
    Dead,
}

/// A deployed unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub side: Side,
    pub archetype: CardArchetype,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Damage per hit, booster multiplier already applied
    pub damage: u32,
    pub attack_interval: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    /// Match time of the last attack (`None` = never attacked)
    pub last_attack: Option<f64>,
    pub state: UnitState,
}

impl Unit {
    pub fn new(id: UnitId, side: Side, archetype: CardArchetype, pos: Vec2, damage_multiplier: f32) -> Self {
        let stats = archetype.stats();
        Self {
            id,
            side,
            archetype,
            pos,
            health: stats.max_health,
            max_health: stats.max_health,
            damage: scale(stats.damage, damage_multiplier),
            attack_interval: stats.attack_interval,
            move_speed: stats.move_speed,
            attack_range: stats.attack_range,
            last_attack: None,
            state: UnitState::Idle,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state != UnitState::Dead
    }

    /// Apply damage. Returns true if this hit killed the unit.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.state = UnitState::Dead;
            return true;
        }
        false
    }

    /// Advance in a straight line toward `target`
    pub fn move_toward(&mut self, target: Vec2, dt: f32) {
        self.state = UnitState::Moving;
        self.pos = crate::step_toward(self.pos, target, self.move_speed * dt);
    }

    /// Cooldown check against the current match time
    #[inline]
    pub fn ready_to_attack(&self, now: f64) -> bool {
        cooldown_elapsed(self.last_attack, self.attack_interval, now)
    }
}

/// Tower position in a side's formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    King,
    LeftLane,
    RightLane,
}

impl TowerKind {
    /// Enumeration order used for targeting (lanes first, king last)
    pub const ORDER: [TowerKind; 3] = [TowerKind::LeftLane, TowerKind::RightLane, TowerKind::King];

    pub fn as_str(&self) -> &'static str {
        match self {
            TowerKind::King => "king",
            TowerKind::LeftLane => "left lane",
            TowerKind::RightLane => "right lane",
        }
    }

    /// Fixed arena position for this tower on the given side
    pub fn position(self, side: Side) -> Vec2 {
        let sign = side.y_sign();
        match self {
            TowerKind::King => Vec2::new(0.0, sign * (ARENA_HEIGHT / 2.0 - KING_TOWER_INSET)),
            TowerKind::LeftLane => Vec2::new(-LANE_TOWER_SPREAD, sign * (ARENA_HEIGHT / 2.0 - LANE_TOWER_INSET)),
            TowerKind::RightLane => Vec2::new(LANE_TOWER_SPREAD, sign * (ARENA_HEIGHT / 2.0 - LANE_TOWER_INSET)),
        }
    }

    fn base_health(self) -> u32 {
        match self {
            TowerKind::King => 500,
            TowerKind::LeftLane | TowerKind::RightLane => 200,
        }
    }
}

/// A stationary tower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub kind: TowerKind,
    pub side: Side,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub damage: u32,
    pub attack_range: f32,
    pub attack_interval: f32,
    pub last_attack: Option<f64>,
    /// Damage absorbed before health (king shield booster)
    pub shield: u32,
    pub destroyed: bool,
}

impl Tower {
    pub fn new(kind: TowerKind, side: Side, health_multiplier: f32) -> Self {
        let (damage, attack_range) = match kind {
            TowerKind::King => (30, 180.0),
            TowerKind::LeftLane | TowerKind::RightLane => (20, 150.0),
        };
        let max_health = scale(kind.base_health(), health_multiplier);
        Self {
            kind,
            side,
            pos: kind.position(side),
            health: max_health,
            max_health,
            damage,
            attack_range,
            attack_interval: 1.0,
            last_attack: None,
            shield: 0,
            destroyed: false,
        }
    }

    /// The three towers of a side, in targeting order
    pub fn formation(side: Side, health_multiplier: f32) -> Vec<Tower> {
        TowerKind::ORDER
            .into_iter()
            .map(|kind| Tower::new(kind, side, health_multiplier))
            .collect()
    }

    /// Apply damage, shield first. Returns true only on the hit that
    /// destroys the tower; destroyed towers ignore further damage.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.destroyed {
            return false;
        }
        let absorbed = self.shield.min(amount);
        self.shield -= absorbed;
        self.health = self.health.saturating_sub(amount - absorbed);
        if self.health == 0 {
            self.destroyed = true;
            return true;
        }
        false
    }

    #[inline]
    pub fn ready_to_attack(&self, now: f64) -> bool {
        cooldown_elapsed(self.last_attack, self.attack_interval, now)
    }
}

/// Whether `interval` seconds of match time have passed since the last attack
#[inline]
fn cooldown_elapsed(last_attack: Option<f64>, interval: f32, now: f64) -> bool {
    last_attack.is_none_or(|t| now - t + TIME_EPSILON >= interval as f64)
}

/// Scale an integer stat by a multiplier, rounding to nearest
#[inline]
fn scale(base: u32, multiplier: f32) -> u32 {
    (base as f32 * multiplier).round() as u32
}
