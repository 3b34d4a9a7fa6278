//! Shop economy boundary
//!
//! The battle never touches currency directly. An [`Economy`] hands over the
//! boosters for the next match and is paid when the player wins.

use serde::{Deserialize, Serialize};

use crate::sim::{BoosterKind, Boosters};

/// Base gold for any victory
pub const VICTORY_BASE_REWARD: u64 = 50;
/// Extra gold per crown earned
pub const REWARD_PER_CROWN: u64 = 25;

/// Gold paid for a victory with `crowns` crowns
pub fn victory_reward(crowns: u8) -> u64 {
    VICTORY_BASE_REWARD + REWARD_PER_CROWN * crowns as u64
}

/// Collaborator supplying boosters and receiving rewards
pub trait Economy {
    /// Boosters for the match about to start. They are consumed: the next
    /// call returns only what was armed since.
    fn take_boosters(&mut self) -> Boosters;

    /// Credit a victory. Returns the amount granted.
    fn reward_victory(&mut self, crowns: u8) -> u64;
}

/// In-memory wallet: gold balance plus boosters armed for the next match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub gold: u64,
    /// Boosters waiting for the next match
    armed: Boosters,
    /// Victories credited
    pub wins: u32,
}

impl Wallet {
    pub fn new(gold: u64) -> Self {
        Self {
            gold,
            ..Self::default()
        }
    }

    /// Queue a booster for the next match
    pub fn arm(&mut self, kind: BoosterKind) {
        self.armed.insert(kind);
    }

    pub fn armed(&self) -> &Boosters {
        &self.armed
    }
}

impl Economy for Wallet {
    fn take_boosters(&mut self) -> Boosters {
        std::mem::take(&mut self.armed)
    }

    fn reward_victory(&mut self, crowns: u8) -> u64 {
        let reward = victory_reward(crowns);
        self.gold += reward;
        self.wins += 1;
        log::info!("Victory reward: {} gold ({} crowns), balance {}", reward, crowns, self.gold);
        reward
    }
}
