//! Refusal types for deployment and phase requests

use super::deck::CardId;
use super::state::MatchPhase;

/// Why a deployment was refused. No state changes on refusal.
#[derive(Debug, Clone, PartialEq)]
pub enum DeployError {
    /// Match isn't in the playing phase
    NotPlaying,
    /// The card isn't in the player's hand
    CardNotInHand(CardId),
    /// Not enough elixir for the card
    InsufficientElixir { needed: u32, available: f32 },
    /// Position is outside the player's half
    OutsideDeployZone,
}

impl std::fmt::Display for DeployError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployError::NotPlaying => write!(f, "Match is not in progress"),
            DeployError::CardNotInHand(id) => write!(f, "Card {} is not in hand", id),
            DeployError::InsufficientElixir { needed, available } => {
                write!(f, "Need {} elixir, have {:.1}", needed, available)
            }
            DeployError::OutsideDeployZone => write!(f, "Position is outside the deploy zone"),
        }
    }
}

impl std::error::Error for DeployError {}

/// A lifecycle request that isn't valid from the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseError {
    pub from: MatchPhase,
    pub requested: MatchPhase,
}

impl std::fmt::Display for PhaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot move from {:?} to {:?}", self.from, self.requested)
    }
}

impl std::error::Error for PhaseError {}
