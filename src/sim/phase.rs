//! Match phase transitions and win/loss rules

use super::boosters::Boosters;
use super::entity::Side;
use super::error::PhaseError;
use super::state::{Battle, MatchEvent, MatchOutcome, MatchPhase, WinReason};

/// Whether a match can start from the current phase
pub fn ensure_can_start(battle: &Battle) -> Result<(), PhaseError> {
    expect_phase(battle, &[MatchPhase::Menu], MatchPhase::Playing)
}

/// Whether the host may force the match to end now
pub fn ensure_can_end(battle: &Battle, victory: bool) -> Result<(), PhaseError> {
    let requested = if victory { MatchPhase::Victory } else { MatchPhase::Defeat };
    expect_phase(battle, &[MatchPhase::Playing, MatchPhase::Paused], requested)
}

/// Menu -> Playing. Resets the board and applies this match's boosters.
pub fn start_match(battle: &mut Battle, boosters: Boosters) -> Result<(), PhaseError> {
    ensure_can_start(battle)?;
    battle.reset_for_match(boosters);
    battle.phase = MatchPhase::Playing;
    log::info!(
        "Match started (seed {}, boosters: {:?})",
        battle.seed,
        battle.boosters.iter().map(|b| b.as_str()).collect::<Vec<_>>()
    );
    Ok(())
}

/// Playing -> Paused
pub fn pause(battle: &mut Battle) -> Result<(), PhaseError> {
    expect_phase(battle, &[MatchPhase::Playing], MatchPhase::Paused)?;
    battle.phase = MatchPhase::Paused;
    Ok(())
}

/// Paused -> Playing
pub fn resume(battle: &mut Battle) -> Result<(), PhaseError> {
    expect_phase(battle, &[MatchPhase::Paused], MatchPhase::Playing)?;
    battle.phase = MatchPhase::Playing;
    Ok(())
}

/// Victory/Defeat (or an abandoned paused match) -> Menu
pub fn return_to_menu(battle: &mut Battle) -> Result<(), PhaseError> {
    expect_phase(
        battle,
        &[MatchPhase::Victory, MatchPhase::Defeat, MatchPhase::Paused],
        MatchPhase::Menu,
    )?;
    if battle.phase == MatchPhase::Paused {
        // Abandoned match: boosters were spent on it
        battle.boosters.clear();
        log::info!("Paused match abandoned");
    }
    battle.phase = MatchPhase::Menu;
    Ok(())
}

fn expect_phase(battle: &Battle, allowed: &[MatchPhase], requested: MatchPhase) -> Result<(), PhaseError> {
    if allowed.contains(&battle.phase) {
        return Ok(());
    }
    let err = PhaseError {
        from: battle.phase,
        requested,
    };
    log::warn!("{}", err);
    Err(err)
}

/// Decide the match if it's over.
///
/// A fallen king wins outright for the attacker. Otherwise, only once the
/// clock has expired: more crowns wins, and level crowns go to the greater
/// total tower health with exact ties going to the player.
pub fn evaluate(battle: &Battle, clock_expired: bool) -> Option<MatchOutcome> {
    let player_crowns = battle.player.crowns;
    let opponent_crowns = battle.opponent.crowns;

    if battle.opponent.king_destroyed() {
        return Some(MatchOutcome {
            winner: Side::Player,
            reason: WinReason::KingDestroyed,
            player_crowns: 3,
            opponent_crowns,
        });
    }
    if battle.player.king_destroyed() {
        return Some(MatchOutcome {
            winner: Side::Opponent,
            reason: WinReason::KingDestroyed,
            player_crowns,
            opponent_crowns: 3,
        });
    }
    if !clock_expired {
        return None;
    }

    let (winner, reason) = if player_crowns != opponent_crowns {
        let winner = if player_crowns > opponent_crowns {
            Side::Player
        } else {
            Side::Opponent
        };
        (winner, WinReason::Crowns)
    } else if battle.player.total_tower_health() >= battle.opponent.total_tower_health() {
        (Side::Player, WinReason::TowerHealth)
    } else {
        (Side::Opponent, WinReason::TowerHealth)
    };

    Some(MatchOutcome {
        winner,
        reason,
        player_crowns,
        opponent_crowns,
    })
}

/// Enter the terminal phase for `outcome`. Freezes the clock and drops
/// this match's boosters.
pub fn finish(battle: &mut Battle, outcome: MatchOutcome) {
    battle.player.crowns = outcome.player_crowns;
    battle.opponent.crowns = outcome.opponent_crowns;
    battle.phase = if outcome.is_victory() {
        MatchPhase::Victory
    } else {
        MatchPhase::Defeat
    };
    battle.outcome = Some(outcome);
    battle.boosters.clear();
    battle.events.push(MatchEvent::MatchEnded { outcome });
    log::info!(
        "Match over: {:?} wins by {:?} ({}-{}) with {:.1}s left",
        outcome.winner,
        outcome.reason,
        outcome.player_crowns,
        outcome.opponent_crowns,
        battle.time_remaining
    );
}

/// Outcome for a host-forced end (e.g. surrender)
pub fn forced_outcome(battle: &Battle, victory: bool) -> MatchOutcome {
    MatchOutcome {
        winner: if victory { Side::Player } else { Side::Opponent },
        reason: WinReason::Forced,
        player_crowns: battle.player.crowns,
        opponent_crowns: battle.opponent.crowns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boosters::BoosterKind;
    use crate::sim::entity::TowerKind;

    fn started() -> Battle {
        let mut battle = Battle::new(3);
        start_match(&mut battle, Boosters::new()).unwrap();
        battle
    }

    /// Set each army's total tower health by trimming the king
    fn set_totals(battle: &mut Battle, player: u32, opponent: u32) {
        for (army, total) in [(&mut battle.player, player), (&mut battle.opponent, opponent)] {
            let lanes: u32 = army
                .towers
                .iter()
                .filter(|t| t.kind != TowerKind::King)
                .map(|t| t.health)
                .sum();
            army.tower_mut(TowerKind::King).unwrap().health = total - lanes;
        }
    }

    #[test]
    fn test_phase_transitions() {
        let mut b = Battle::new(1);
        assert!(pause(&mut b).is_err());
        assert!(resume(&mut b).is_err());

        start_match(&mut b, Boosters::new()).unwrap();
        assert_eq!(b.phase, MatchPhase::Playing);
        assert!(start_match(&mut b, Boosters::new()).is_err());

        pause(&mut b).unwrap();
        assert_eq!(b.phase, MatchPhase::Paused);
        resume(&mut b).unwrap();
        assert_eq!(b.phase, MatchPhase::Playing);

        assert_eq!(
            return_to_menu(&mut b),
            Err(PhaseError {
                from: MatchPhase::Playing,
                requested: MatchPhase::Menu
            })
        );
    }

    #[test]
    fn test_abandoning_paused_match_drops_boosters() {
        let mut b = Battle::new(4);
        start_match(&mut b, [BoosterKind::StrongUnits].into_iter().collect()).unwrap();
        pause(&mut b).unwrap();

        return_to_menu(&mut b).unwrap();
        assert_eq!(b.phase, MatchPhase::Menu);
        assert!(b.boosters.is_empty());
        assert!(b.snapshot().boosters.is_empty());
    }

    #[test]
    fn test_guards_report_refusals() {
        let mut b = Battle::new(5);
        assert!(ensure_can_start(&b).is_ok());
        assert_eq!(
            ensure_can_end(&b, true),
            Err(PhaseError {
                from: MatchPhase::Menu,
                requested: MatchPhase::Victory
            })
        );

        start_match(&mut b, Boosters::new()).unwrap();
        assert_eq!(
            ensure_can_start(&b),
            Err(PhaseError {
                from: MatchPhase::Playing,
                requested: MatchPhase::Playing
            })
        );
        assert!(ensure_can_end(&b, false).is_ok());
        pause(&mut b).unwrap();
        assert!(ensure_can_end(&b, false).is_ok());
    }

    #[test]
    fn test_no_outcome_mid_match() {
        let b = started();
        assert_eq!(evaluate(&b, false), None);
    }

    #[test]
    fn test_king_kill_wins_regardless_of_crowns() {
        let mut b = started();
        b.opponent.crowns = 2;
        b.opponent.tower_mut(TowerKind::King).unwrap().take_damage(10_000);

        let outcome = evaluate(&b, false).unwrap();
        assert_eq!(outcome.winner, Side::Player);
        assert_eq!(outcome.reason, WinReason::KingDestroyed);
        assert_eq!(outcome.player_crowns, 3);
    }

    #[test]
    fn test_crowns_decide_at_time() {
        let mut b = started();
        b.opponent.crowns = 1;
        set_totals(&mut b, 900, 500);
        let outcome = evaluate(&b, true).unwrap();
        assert_eq!(outcome.winner, Side::Opponent);
        assert_eq!(outcome.reason, WinReason::Crowns);
    }

    #[test]
    fn test_tower_health_breaks_crown_tie() {
        let mut b = started();
        b.player.crowns = 1;
        b.opponent.crowns = 1;
        set_totals(&mut b, 450, 500);
        let outcome = evaluate(&b, true).unwrap();
        assert_eq!(outcome.winner, Side::Opponent);
        assert_eq!(outcome.reason, WinReason::TowerHealth);

        set_totals(&mut b, 501, 500);
        assert_eq!(evaluate(&b, true).unwrap().winner, Side::Player);
    }

    #[test]
    fn test_exact_tie_goes_to_player() {
        let mut b = started();
        set_totals(&mut b, 600, 600);
        assert_eq!(evaluate(&b, true).unwrap().winner, Side::Player);
    }

    #[test]
    fn test_finish_clears_boosters_and_forces_crowns() {
        let mut b = Battle::new(2);
        start_match(&mut b, [BoosterKind::Shield].into_iter().collect()).unwrap();
        b.opponent.tower_mut(TowerKind::King).unwrap().take_damage(10_000);

        let outcome = evaluate(&b, false).unwrap();
        finish(&mut b, outcome);
        assert_eq!(b.phase, MatchPhase::Victory);
        assert_eq!(b.player.crowns, 3);
        assert!(b.boosters.is_empty());
        assert_eq!(b.events.last(), Some(&MatchEvent::MatchEnded { outcome }));

        return_to_menu(&mut b).unwrap();
        assert_eq!(b.phase, MatchPhase::Menu);
    }
}
