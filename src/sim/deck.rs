//! Deck and hand
//!
//! The player's card cycle: a shuffled archetype pool, a four-card hand and a
//! single preview of the next card.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use super::catalog::CardArchetype;
use crate::consts::HAND_SIZE;

/// Card instance identifier (unique within a deck)
pub type CardId = u32;

/// A card drawn into the hand or preview slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: CardId,
    pub archetype: CardArchetype,
}

impl CardInstance {
    #[inline]
    pub fn cost(&self) -> u32 {
        self.archetype.cost()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// One entry per archetype, reshuffled at match start
    pool: Vec<CardArchetype>,
    hand: Vec<CardInstance>,
    next: Option<CardInstance>,
    next_card_id: CardId,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(CardArchetype::ALL.to_vec())
    }
}

impl Deck {
    /// Create an undealt deck over the given pool
    pub fn new(pool: Vec<CardArchetype>) -> Self {
        Self {
            pool,
            hand: Vec::with_capacity(HAND_SIZE),
            next: None,
            next_card_id: 1,
        }
    }

    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    pub fn next_card(&self) -> Option<CardInstance> {
        self.next
    }

    /// Look up a hand card by id
    pub fn find(&self, id: CardId) -> Option<CardInstance> {
        self.hand.iter().copied().find(|c| c.id == id)
    }

    /// Reshuffle the pool and deal a fresh hand plus preview
    pub fn shuffle_and_draw<R: Rng>(&mut self, rng: &mut R) {
        self.pool.shuffle(rng);
        self.hand.clear();
        let pool = self.pool.clone();
        for &archetype in pool.iter().take(HAND_SIZE) {
            let card = self.mint(archetype);
            self.hand.push(card);
        }
        self.next = pool.get(HAND_SIZE).map(|&a| self.mint(a));
    }

    /// Remove a card from the hand, promote the preview into its slot and
    /// draw a new preview. Returns `None` if the card isn't in hand.
    pub fn play<R: Rng>(&mut self, id: CardId, rng: &mut R) -> Option<CardInstance> {
        let slot = self.hand.iter().position(|c| c.id == id)?;
        let played = self.hand.remove(slot);

        let promoted = match self.next.take() {
            Some(card) => card,
            None => {
                let archetype = self.pick_replacement(played.archetype, rng)?;
                self.mint(archetype)
            }
        };
        self.hand.insert(slot, promoted);

        self.next = self
            .pick_replacement(played.archetype, rng)
            .map(|a| self.mint(a));

        Some(played)
    }

    /// Prefer an archetype absent from the hand and not just played; fall
    /// back to any pool entry.
    fn pick_replacement<R: Rng>(&self, played: CardArchetype, rng: &mut R) -> Option<CardArchetype> {
        let fresh: Vec<CardArchetype> = self
            .pool
            .iter()
            .copied()
            .filter(|&a| a != played && !self.hand.iter().any(|c| c.archetype == a))
            .collect();
        fresh
            .choose(rng)
            .or_else(|| self.pool.choose(rng))
            .copied()
    }

    fn mint(&mut self, archetype: CardArchetype) -> CardInstance {
        let id = self.next_card_id;
        self.next_card_id += 1;
        CardInstance { id, archetype }
    }
}
