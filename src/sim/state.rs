//! Battle state and core simulation types
//!
//! Everything a match needs to be reproduced from its seed lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boosters::Boosters;
use super::catalog::CardArchetype;
use super::deck::Deck;
use super::entity::{Side, Tower, TowerKind, Unit, UnitId};
use super::opponent::OpponentAi;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Not started (initial, and after returning from a finished match)
    Menu,
    /// Clock running
    Playing,
    /// Clock frozen, resumable
    Paused,
    /// Match ended, player won
    Victory,
    /// Match ended, opponent won
    Defeat,
}

impl MatchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchPhase::Victory | MatchPhase::Defeat)
    }
}

/// Why a match ended the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// A king tower fell
    KingDestroyed,
    /// Time ran out with unequal crowns
    Crowns,
    /// Time ran out level on crowns; total tower health decided it
    TowerHealth,
    /// Ended by the host (e.g. surrender)
    Forced,
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Side,
    pub reason: WinReason,
    pub player_crowns: u8,
    pub opponent_crowns: u8,
}

impl MatchOutcome {
    pub fn is_victory(&self) -> bool {
        self.winner == Side::Player
    }
}

/// Lifecycle notifications, drained by the host after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    UnitSpawned {
        id: UnitId,
        side: Side,
        archetype: CardArchetype,
    },
    UnitDied {
        id: UnitId,
        side: Side,
        archetype: CardArchetype,
    },
    TowerDestroyed {
        kind: TowerKind,
        side: Side,
    },
    CrownAwarded {
        side: Side,
        total: u8,
    },
    DoubleElixirStarted,
    MatchEnded {
        outcome: MatchOutcome,
    },
}

/// One side's forces and resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Army {
    pub side: Side,
    pub elixir: f32,
    pub crowns: u8,
    /// Live units (sorted by id for determinism)
    pub units: Vec<Unit>,
    /// Towers in targeting order: left lane, right lane, king
    pub towers: Vec<Tower>,
}

impl Army {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            elixir: STARTING_ELIXIR,
            crowns: 0,
            units: Vec::new(),
            towers: Tower::formation(side, 1.0),
        }
    }

    pub fn tower(&self, kind: TowerKind) -> Option<&Tower> {
        self.towers.iter().find(|t| t.kind == kind)
    }

    pub fn tower_mut(&mut self, kind: TowerKind) -> Option<&mut Tower> {
        self.towers.iter_mut().find(|t| t.kind == kind)
    }

    /// King + both lane towers
    pub fn total_tower_health(&self) -> u32 {
        self.towers.iter().map(|t| t.health).sum()
    }

    pub fn king_destroyed(&self) -> bool {
        self.tower(TowerKind::King).is_some_and(|t| t.destroyed)
    }

    /// Add elixir, clamped to [0, MAX_ELIXIR]
    pub fn gain_elixir(&mut self, amount: f32) {
        self.elixir = (self.elixir + amount).clamp(0.0, MAX_ELIXIR);
    }
}

/// Read-only view handed to the host between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub elixir: f32,
    pub opponent_elixir: f32,
    pub player_crowns: u8,
    pub opponent_crowns: u8,
    pub time_remaining: f32,
    pub double_elixir: bool,
    pub boosters: Boosters,
    pub king_shield: u32,
}

/// Complete battle state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battle {
    /// Seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: MatchPhase,
    /// Seconds left on the match clock
    pub time_remaining: f64,
    /// Seconds of match time elapsed (drives attack cooldowns)
    pub elapsed: f64,
    pub double_elixir: bool,
    /// Boosters for the current match only
    pub boosters: Boosters,
    pub player: Army,
    pub opponent: Army,
    pub deck: Deck,
    pub opponent_ai: OpponentAi,
    pub outcome: Option<MatchOutcome>,
    /// Pending notifications
    pub events: Vec<MatchEvent>,
    /// Next entity ID
    next_id: u32,
}

impl Battle {
    /// Create a battle sitting in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: MatchPhase::Menu,
            time_remaining: MATCH_DURATION as f64,
            elapsed: 0.0,
            double_elixir: false,
            boosters: Boosters::new(),
            player: Army::new(Side::Player),
            opponent: Army::new(Side::Opponent),
            deck: Deck::default(),
            opponent_ai: OpponentAi::default(),
            outcome: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn army(&self, side: Side) -> &Army {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn army_mut(&mut self, side: Side) -> &mut Army {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Mutable (acting, defending) pair for one side
    pub fn armies_mut(&mut self, side: Side) -> (&mut Army, &mut Army) {
        match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    /// Reset all per-match state for a fresh match
    pub fn reset_for_match(&mut self, boosters: Boosters) {
        self.time_remaining = MATCH_DURATION as f64;
        self.elapsed = 0.0;
        self.double_elixir = false;
        self.outcome = None;
        self.events.clear();

        self.player = Army::new(Side::Player);
        self.player.elixir = boosters.starting_elixir();
        self.player.towers = Tower::formation(Side::Player, boosters.health_multiplier());
        if let Some(king) = self.player.tower_mut(TowerKind::King) {
            king.shield = boosters.shield_amount();
        }
        self.opponent = Army::new(Side::Opponent);

        self.deck.shuffle_and_draw(&mut self.rng);
        self.opponent_ai = OpponentAi::default();
        self.boosters = boosters;
    }

    /// Snapshot for rendering/UI
    pub fn snapshot(&self) -> MatchState {
        MatchState {
            phase: self.phase,
            elixir: self.player.elixir,
            opponent_elixir: self.opponent.elixir,
            player_crowns: self.player.crowns,
            opponent_crowns: self.opponent.crowns,
            time_remaining: self.time_remaining as f32,
            double_elixir: self.double_elixir,
            boosters: self.boosters.clone(),
            king_shield: self
                .player
                .tower(TowerKind::King)
                .map_or(0, |t| t.shield),
        }
    }

    /// Ensure units are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.player.units.sort_by_key(|u| u.id);
        self.opponent.units.sort_by_key(|u| u.id);
    }
}
