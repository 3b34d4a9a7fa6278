//! Match driver
//!
//! Owns one [`Battle`] plus the injected [`Economy`], and is the only API the
//! host (input, rendering) needs: lifecycle calls, deployment, `tick`, and
//! snapshots/events to read back between ticks.

use glam::Vec2;

use crate::economy::Economy;
use crate::sim::{
    self, Battle, CardId, CardInstance, DeployError, MatchEvent, MatchOutcome, MatchState,
    PhaseError, UnitId, phase,
};

pub struct Game<E: Economy> {
    battle: Battle,
    economy: E,
    /// Gold granted for the last finished match, if it was a win
    last_reward: Option<u64>,
}

impl<E: Economy> Game<E> {
    pub fn new(seed: u64, economy: E) -> Self {
        Self {
            battle: Battle::new(seed),
            economy,
            last_reward: None,
        }
    }

    /// Start a match with whatever boosters the economy has armed
    pub fn start_game(&mut self) -> Result<(), PhaseError> {
        // Check before consuming boosters so a refused start loses nothing
        phase::ensure_can_start(&self.battle)?;
        let boosters = self.economy.take_boosters();
        self.last_reward = None;
        phase::start_match(&mut self.battle, boosters)
    }

    pub fn pause_game(&mut self) -> Result<(), PhaseError> {
        phase::pause(&mut self.battle)
    }

    pub fn resume_game(&mut self) -> Result<(), PhaseError> {
        phase::resume(&mut self.battle)
    }

    pub fn return_to_menu(&mut self) -> Result<(), PhaseError> {
        phase::return_to_menu(&mut self.battle)
    }

    /// End the match now (e.g. surrender) with the given result
    pub fn end_game(&mut self, victory: bool) -> Result<MatchOutcome, PhaseError> {
        phase::ensure_can_end(&self.battle, victory)?;
        let outcome = phase::forced_outcome(&self.battle, victory);
        phase::finish(&mut self.battle, outcome);
        self.settle(outcome);
        Ok(outcome)
    }

    /// Whether a hand card is affordable right now
    pub fn can_deploy(&self, card: CardId) -> bool {
        sim::can_deploy(&self.battle, card)
    }

    /// Deploy a hand card at `pos` for the player
    pub fn deploy(&mut self, card: CardId, pos: Vec2) -> Result<UnitId, DeployError> {
        sim::deploy(&mut self.battle, card, pos)
    }

    /// Advance one step. Returns the outcome on the tick the match ends.
    pub fn tick(&mut self, dt: f32) -> Option<MatchOutcome> {
        let outcome = sim::tick(&mut self.battle, dt)?;
        self.settle(outcome);
        Some(outcome)
    }

    fn settle(&mut self, outcome: MatchOutcome) {
        if outcome.is_victory() {
            self.last_reward = Some(self.economy.reward_victory(outcome.player_crowns));
        }
    }

    /// Take all notifications queued since the last drain
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.battle.events)
    }

    pub fn state(&self) -> MatchState {
        self.battle.snapshot()
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn hand(&self) -> &[CardInstance] {
        self.battle.deck.hand()
    }

    pub fn next_card(&self) -> Option<CardInstance> {
        self.battle.deck.next_card()
    }

    pub fn last_reward(&self) -> Option<u64> {
        self.last_reward
    }

    pub fn economy(&self) -> &E {
        &self.economy
    }

    pub fn economy_mut(&mut self) -> &mut E {
        &mut self.economy
    }
}
