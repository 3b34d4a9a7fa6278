//! Deployment authority
//!
//! The only path by which units enter the field, shared by the player and
//! the opponent heuristic. Every check runs before any mutation, so a refused
//! deployment leaves the battle untouched.

use glam::Vec2;

use super::catalog::CardArchetype;
use super::deck::CardId;
use super::entity::{Side, Unit, UnitId};
use super::error::DeployError;
use super::state::{Battle, MatchEvent, MatchPhase};
use crate::in_player_deploy_zone;

/// Whether the player could afford this hand card right now
pub fn can_deploy(battle: &Battle, card: CardId) -> bool {
    battle
        .deck
        .find(card)
        .is_some_and(|c| battle.player.elixir >= c.cost() as f32)
}

/// Play a card from the player's hand at `pos`
pub fn deploy(battle: &mut Battle, card: CardId, pos: Vec2) -> Result<UnitId, DeployError> {
    if battle.phase != MatchPhase::Playing {
        return Err(DeployError::NotPlaying);
    }
    let card = battle.deck.find(card).ok_or(DeployError::CardNotInHand(card))?;
    if !in_player_deploy_zone(pos) {
        return Err(DeployError::OutsideDeployZone);
    }

    let id = spawn_unit(battle, Side::Player, card.archetype, pos)?;
    battle.deck.play(card.id, &mut battle.rng);
    Ok(id)
}

/// Charge `side` for an archetype and put a fresh unit on the field
pub fn spawn_unit(
    battle: &mut Battle,
    side: Side,
    archetype: CardArchetype,
    pos: Vec2,
) -> Result<UnitId, DeployError> {
    let cost = archetype.cost();
    let available = battle.army(side).elixir;
    if available < cost as f32 {
        return Err(DeployError::InsufficientElixir {
            needed: cost,
            available,
        });
    }

    // Damage boosters only ever apply to the player's units
    let damage_multiplier = match side {
        Side::Player => battle.boosters.damage_multiplier(),
        Side::Opponent => 1.0,
    };
    let id = battle.next_entity_id();
    let army = battle.army_mut(side);
    army.gain_elixir(-(cost as f32));
    army.units.push(Unit::new(id, side, archetype, pos, damage_multiplier));

    battle.events.push(MatchEvent::UnitSpawned { id, side, archetype });
    log::debug!(
        "{:?} deployed {} #{} at ({:.0}, {:.0})",
        side,
        archetype.as_str(),
        id,
        pos.x,
        pos.y
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::boosters::{BoosterKind, Boosters};

    fn playing(boosters: Boosters) -> Battle {
        let mut battle = Battle::new(8);
        battle.reset_for_match(boosters);
        battle.phase = MatchPhase::Playing;
        battle
    }

    fn card_costing(battle: &Battle, cost: u32) -> Option<CardId> {
        battle.deck.hand().iter().find(|c| c.cost() == cost).map(|c| c.id)
    }

    const SPOT: Vec2 = Vec2::new(0.0, -150.0);

    #[test]
    fn test_deploy_spends_elixir_and_cycles_hand() {
        let mut b = playing(Boosters::new());
        let card = b.deck.hand()[0];
        let preview = b.deck.next_card().unwrap();

        let id = deploy(&mut b, card.id, SPOT).unwrap();
        assert_eq!(b.player.units.len(), 1);
        assert_eq!(b.player.units[0].id, id);
        assert!((b.player.elixir - (STARTING_ELIXIR - card.cost() as f32)).abs() < 0.0001);
        assert!(b.deck.find(card.id).is_none());
        assert_eq!(b.deck.hand()[0], preview);
        assert_eq!(b.deck.hand().len(), HAND_SIZE);
    }

    #[test]
    fn test_full_spend_then_refusal() {
        let mut b = playing(Boosters::new());
        // Force a 5-cost card into the hand
        let five = loop {
            if let Some(id) = card_costing(&b, 5) {
                break id;
            }
            b.deck.shuffle_and_draw(&mut b.rng);
        };

        deploy(&mut b, five, SPOT).unwrap();
        assert_eq!(b.player.elixir, 0.0);

        for card in b.deck.hand().to_vec() {
            assert!(!can_deploy(&b, card.id));
            let err = deploy(&mut b, card.id, SPOT).unwrap_err();
            assert!(matches!(err, DeployError::InsufficientElixir { .. }));
        }
        assert_eq!(b.player.units.len(), 1);
    }

    #[test]
    fn test_refusal_mutates_nothing() {
        let mut b = playing(Boosters::new());
        b.player.elixir = 1.0;
        let hand = b.deck.hand().to_vec();
        let next = b.deck.next_card();
        let events = b.events.len();

        let err = deploy(&mut b, hand[0].id, SPOT).unwrap_err();
        assert!(matches!(err, DeployError::InsufficientElixir { .. }));
        assert_eq!(b.player.elixir, 1.0);
        assert_eq!(b.deck.hand(), hand.as_slice());
        assert_eq!(b.deck.next_card(), next);
        assert!(b.player.units.is_empty());
        assert_eq!(b.events.len(), events);
    }

    #[test]
    fn test_unknown_card_is_refused() {
        let mut b = playing(Boosters::new());
        assert_eq!(deploy(&mut b, 4242, SPOT), Err(DeployError::CardNotInHand(4242)));
        assert!(!can_deploy(&b, 4242));
    }

    #[test]
    fn test_enemy_half_is_refused() {
        let mut b = playing(Boosters::new());
        b.player.elixir = MAX_ELIXIR;
        let card = b.deck.hand()[0].id;
        assert_eq!(
            deploy(&mut b, card, Vec2::new(0.0, 100.0)),
            Err(DeployError::OutsideDeployZone)
        );
        assert_eq!(b.player.elixir, MAX_ELIXIR);
    }

    #[test]
    fn test_deploy_outside_playing_is_refused() {
        let mut b = playing(Boosters::new());
        b.phase = MatchPhase::Paused;
        let card = b.deck.hand()[0].id;
        assert_eq!(deploy(&mut b, card, SPOT), Err(DeployError::NotPlaying));
    }

    #[test]
    fn test_strong_units_boost_player_only() {
        let mut b = playing([BoosterKind::StrongUnits].into_iter().collect());
        b.player.elixir = MAX_ELIXIR;
        b.opponent.elixir = MAX_ELIXIR;

        spawn_unit(&mut b, Side::Player, CardArchetype::Giant, SPOT).unwrap();
        spawn_unit(&mut b, Side::Opponent, CardArchetype::Giant, Vec2::new(0.0, 150.0)).unwrap();
        assert_eq!(b.player.units[0].damage, 25);
        assert_eq!(b.opponent.units[0].damage, 20);
    }
}
