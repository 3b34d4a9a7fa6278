//! Pre-match boosters
//!
//! Single-match modifiers handed to the battle at start. Each booster has a
//! fixed effect and they compose independently.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ELIXIR, STARTING_ELIXIR};

/// Booster kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoosterKind {
    /// Start with 10 elixir instead of 5
    DoubleElixir,
    /// +50% health on all player towers
    ExtraHealth,
    /// +25% damage on all player units
    StrongUnits,
    /// +50% player elixir regeneration
    FastElixir,
    /// King tower absorbs the first 100 damage
    Shield,
}

impl BoosterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoosterKind::DoubleElixir => "double-elixir",
            BoosterKind::ExtraHealth => "extra-health",
            BoosterKind::StrongUnits => "strong-units",
            BoosterKind::FastElixir => "fast-elixir",
            BoosterKind::Shield => "shield",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "double-elixir" | "double-start-elixir" => Some(BoosterKind::DoubleElixir),
            "extra-health" => Some(BoosterKind::ExtraHealth),
            "strong-units" => Some(BoosterKind::StrongUnits),
            "fast-elixir" => Some(BoosterKind::FastElixir),
            "shield" => Some(BoosterKind::Shield),
            _ => None,
        }
    }
}

/// Shield absorbed by the king tower when the shield booster is active
pub const KING_SHIELD_AMOUNT: u32 = 100;

/// Active booster set for one match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boosters {
    kinds: BTreeSet<BoosterKind>,
}

impl Boosters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: BoosterKind) {
        self.kinds.insert(kind);
    }

    pub fn contains(&self, kind: BoosterKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn clear(&mut self) {
        self.kinds.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = BoosterKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Multiplier on player unit damage
    pub fn damage_multiplier(&self) -> f32 {
        if self.contains(BoosterKind::StrongUnits) { 1.25 } else { 1.0 }
    }

    /// Multiplier on player elixir regeneration
    pub fn regen_multiplier(&self) -> f32 {
        if self.contains(BoosterKind::FastElixir) { 1.5 } else { 1.0 }
    }

    /// Multiplier on player tower starting health
    pub fn health_multiplier(&self) -> f32 {
        if self.contains(BoosterKind::ExtraHealth) { 1.5 } else { 1.0 }
    }

    /// Player elixir at match start
    pub fn starting_elixir(&self) -> f32 {
        if self.contains(BoosterKind::DoubleElixir) {
            MAX_ELIXIR
        } else {
            STARTING_ELIXIR
        }
    }

    /// Shield granted to the player king tower
    pub fn shield_amount(&self) -> u32 {
        if self.contains(BoosterKind::Shield) { KING_SHIELD_AMOUNT } else { 0 }
    }
}

impl FromIterator<BoosterKind> for Boosters {
    fn from_iter<I: IntoIterator<Item = BoosterKind>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}
