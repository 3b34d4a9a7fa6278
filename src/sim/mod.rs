//! Deterministic simulation module
//!
//! All battle logic lives here. This module must be pure and deterministic:
//! - Host-driven timestep only (no wall clock)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID, fixed tower order)
//! - No rendering or platform dependencies

pub mod boosters;
pub mod catalog;
pub mod combat;
pub mod deck;
pub mod deploy;
pub mod elixir;
pub mod entity;
pub mod error;
pub mod opponent;
pub mod phase;
pub mod state;
pub mod tick;

pub use boosters::{BoosterKind, Boosters, KING_SHIELD_AMOUNT};
pub use catalog::{CardArchetype, UnitStats};
pub use deck::{CardId, CardInstance, Deck};
pub use deploy::{can_deploy, deploy};
pub use entity::{Side, Tower, TowerKind, Unit, UnitId, UnitState};
pub use error::{DeployError, PhaseError};
pub use state::{Army, Battle, MatchEvent, MatchOutcome, MatchPhase, MatchState, WinReason};
pub use tick::tick;
