//! Combat resolution
//!
//! Per-tick targeting, movement and damage for units and towers. Dead units
//! and destroyed towers are skipped by every scan, so stale entities are
//! never acted on or targeted.

use glam::Vec2;

use super::entity::{Side, TowerKind, UnitState};
use super::state::{Army, Battle, MatchEvent};

/// Something a unit can hit, by index into the defending army
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Unit(usize),
    Tower(usize),
}

/// Nearest live enemy (unit or tower) to `pos`.
///
/// Units are scanned before towers and only a strictly closer candidate
/// replaces the current best, so exact ties go to the first enumerated.
pub fn nearest_target(pos: Vec2, defenders: &Army) -> Option<(Target, f32)> {
    let units = defenders
        .units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_alive())
        .map(|(i, u)| (Target::Unit(i), pos.distance(u.pos)));
    let towers = defenders
        .towers
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.destroyed)
        .map(|(i, t)| (Target::Tower(i), pos.distance(t.pos)));

    units.chain(towers).fold(None, |best, (target, dist)| match best {
        Some((_, best_dist)) if dist >= best_dist => best,
        _ => Some((target, dist)),
    })
}

/// Nearest live unit within `range` of `pos` (towers only shoot units)
pub fn nearest_unit_in_range(pos: Vec2, range: f32, defenders: &Army) -> Option<usize> {
    defenders
        .units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_alive())
        .map(|(i, u)| (i, pos.distance(u.pos)))
        .filter(|&(_, dist)| dist <= range)
        .fold(None, |best: Option<(usize, f32)>, (i, dist)| match best {
            Some((_, best_dist)) if dist >= best_dist => best,
            _ => Some((i, dist)),
        })
        .map(|(i, _)| i)
}

/// Apply one hit to a defender, recording deaths, destructions and crowns
fn apply_hit(
    target: Target,
    damage: u32,
    attacker_side: Side,
    attacker_crowns: &mut u8,
    defenders: &mut Army,
    events: &mut Vec<MatchEvent>,
) {
    match target {
        Target::Unit(i) => {
            let unit = &mut defenders.units[i];
            if unit.take_damage(damage) {
                events.push(MatchEvent::UnitDied {
                    id: unit.id,
                    side: unit.side,
                    archetype: unit.archetype,
                });
            }
        }
        Target::Tower(i) => {
            let tower = &mut defenders.towers[i];
            if !tower.take_damage(damage) {
                return;
            }
            log::info!("{:?} {} tower destroyed", tower.side, tower.kind.as_str());
            events.push(MatchEvent::TowerDestroyed {
                kind: tower.kind,
                side: tower.side,
            });
            // King destruction ends the match; crowns are settled there
            if tower.kind != TowerKind::King {
                *attacker_crowns += 1;
                events.push(MatchEvent::CrownAwarded {
                    side: attacker_side,
                    total: *attacker_crowns,
                });
            }
        }
    }
}

/// Target, move or attack with every live unit on `side`
pub fn resolve_units(battle: &mut Battle, side: Side, dt: f32) {
    let now = battle.elapsed;
    let mut events = Vec::new();
    let (attackers, defenders) = battle.armies_mut(side);

    for unit in attackers.units.iter_mut() {
        if !unit.is_alive() {
            continue;
        }

        match nearest_target(unit.pos, defenders) {
            Some((target, dist)) if dist <= unit.attack_range => {
                unit.state = UnitState::Attacking;
                if unit.ready_to_attack(now) {
                    unit.last_attack = Some(now);
                    apply_hit(target, unit.damage, side, &mut attackers.crowns, defenders, &mut events);
                }
            }
            Some((target, _)) => {
                let dest = match target {
                    Target::Unit(i) => defenders.units[i].pos,
                    Target::Tower(i) => defenders.towers[i].pos,
                };
                unit.move_toward(dest, dt);
            }
            None => unit.move_toward(side.enemy_baseline(), dt),
        }
    }

    battle.events.extend(events);
}

/// Fire every standing tower on `side` at the nearest enemy unit in range
pub fn resolve_towers(battle: &mut Battle, side: Side) {
    let now = battle.elapsed;
    let mut events = Vec::new();
    let (defenders, attackers) = battle.armies_mut(side);

    for tower in defenders.towers.iter_mut() {
        if tower.destroyed || !tower.ready_to_attack(now) {
            continue;
        }
        let Some(i) = nearest_unit_in_range(tower.pos, tower.attack_range, attackers) else {
            continue;
        };
        tower.last_attack = Some(now);
        let unit = &mut attackers.units[i];
        if unit.take_damage(tower.damage) {
            events.push(MatchEvent::UnitDied {
                id: unit.id,
                side: unit.side,
                archetype: unit.archetype,
            });
        }
    }

    battle.events.extend(events);
}

/// Drop dead units from both armies
pub fn prune_dead(battle: &mut Battle) {
    battle.player.units.retain(|u| u.is_alive());
    battle.opponent.units.retain(|u| u.is_alive());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boosters::Boosters;
    use crate::sim::catalog::CardArchetype;
    use crate::sim::entity::Unit;

    fn battle() -> Battle {
        let mut battle = Battle::new(21);
        battle.reset_for_match(Boosters::new());
        battle
    }

    fn place(battle: &mut Battle, side: Side, archetype: CardArchetype, pos: Vec2) -> usize {
        let id = battle.next_entity_id();
        let army = battle.army_mut(side);
        army.units.push(Unit::new(id, side, archetype, pos, 1.0));
        army.units.len() - 1
    }

    #[test]
    fn test_nearest_target_prefers_unit_on_tie() {
        let mut b = battle();
        // Left lane opponent tower sits at (-125, 200)
        let tower_pos = b.opponent.towers[0].pos;
        let origin = tower_pos - Vec2::new(0.0, 50.0);
        place(&mut b, Side::Opponent, CardArchetype::Knight, origin - Vec2::new(0.0, 50.0));

        let (target, dist) = nearest_target(origin, &b.opponent).unwrap();
        assert_eq!(target, Target::Unit(0));
        assert!((dist - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_nearest_target_skips_destroyed_towers() {
        let mut b = battle();
        let left = b.opponent.towers[0].pos;
        b.opponent.towers[0].take_damage(10_000);

        let (target, _) = nearest_target(left, &b.opponent).unwrap();
        assert_ne!(target, Target::Tower(0));
    }

    #[test]
    fn test_unit_advances_toward_baseline_without_targets() {
        let mut b = battle();
        for tower in &mut b.opponent.towers {
            tower.destroyed = true;
        }
        let i = place(&mut b, Side::Player, CardArchetype::Goblin, Vec2::new(0.0, -100.0));

        resolve_units(&mut b, Side::Player, 0.1);
        let unit = &b.player.units[i];
        assert_eq!(unit.state, UnitState::Moving);
        assert!((unit.pos.y - (-92.0)).abs() < 0.001);
    }

    #[test]
    fn test_unit_moves_when_out_of_range() {
        let mut b = battle();
        let i = place(&mut b, Side::Player, CardArchetype::Knight, Vec2::new(0.0, -150.0));
        let start = b.player.units[i].pos;

        resolve_units(&mut b, Side::Player, 0.1);
        let unit = &b.player.units[i];
        assert_eq!(unit.state, UnitState::Moving);
        assert!((unit.pos.distance(start) - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_cooldown_gates_repeat_attacks() {
        let mut b = battle();
        let a = place(&mut b, Side::Player, CardArchetype::Knight, Vec2::new(0.0, -100.0));
        let t = place(&mut b, Side::Opponent, CardArchetype::Giant, Vec2::new(0.0, -80.0));

        // Knight: 15 damage every 1.2s; tick for 1.1s of match time
        for _ in 0..12 {
            resolve_units(&mut b, Side::Player, 0.1);
            b.elapsed += 0.1;
        }
        assert_eq!(b.player.units[a].state, UnitState::Attacking);
        assert_eq!(b.opponent.units[t].health, 200 - 15);

        // Second hit lands on the 1.2s tick, not later
        resolve_units(&mut b, Side::Player, 0.1);
        assert_eq!(b.opponent.units[t].health, 200 - 30);
    }

    #[test]
    fn test_lane_tower_kill_awards_crown_once() {
        let mut b = battle();
        b.opponent.towers[0].health = 10;
        let pos = b.opponent.towers[0].pos - Vec2::new(0.0, 20.0);
        place(&mut b, Side::Player, CardArchetype::Knight, pos);

        resolve_units(&mut b, Side::Player, 0.1);
        assert!(b.opponent.towers[0].destroyed);
        assert_eq!(b.player.crowns, 1);
        assert!(b.events.contains(&MatchEvent::TowerDestroyed {
            kind: TowerKind::LeftLane,
            side: Side::Opponent,
        }));

        // Later hits go elsewhere; no second crown
        b.elapsed += 5.0;
        resolve_units(&mut b, Side::Player, 0.1);
        assert_eq!(b.player.crowns, 1);
        let destroyed = b
            .events
            .iter()
            .filter(|e| matches!(e, MatchEvent::TowerDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn test_tower_shoots_nearest_unit_in_range() {
        let mut b = battle();
        let king = b.player.towers[2].pos;
        let far = place(&mut b, Side::Opponent, CardArchetype::Giant, king + Vec2::new(0.0, 170.0));
        let near = place(&mut b, Side::Opponent, CardArchetype::Giant, king + Vec2::new(0.0, 120.0));

        resolve_towers(&mut b, Side::Player);
        assert_eq!(b.opponent.units[far].health, 200);
        // Lane towers at 150 range also reach the near giant
        assert!(b.opponent.units[near].health < 200);
    }

    #[test]
    fn test_tower_ignores_units_out_of_range() {
        let mut b = battle();
        place(&mut b, Side::Opponent, CardArchetype::Knight, Vec2::new(0.0, 0.0));
        resolve_towers(&mut b, Side::Player);
        assert_eq!(b.opponent.units[0].health, 100);
        assert!(b.player.towers.iter().all(|t| t.last_attack.is_none()));
    }

    #[test]
    fn test_destroyed_tower_never_fires() {
        let mut b = battle();
        let king = b.player.towers[2].pos;
        place(&mut b, Side::Opponent, CardArchetype::Knight, king + Vec2::new(0.0, 20.0));
        for tower in &mut b.player.towers {
            tower.take_damage(10_000);
        }
        resolve_towers(&mut b, Side::Player);
        assert_eq!(b.opponent.units[0].health, 100);
    }

    #[test]
    fn test_dead_units_emit_event_and_are_pruned() {
        let mut b = battle();
        let king = b.player.towers[2].pos;
        place(&mut b, Side::Opponent, CardArchetype::Goblin, king + Vec2::new(0.0, 20.0));
        b.opponent.units[0].health = 5;

        resolve_towers(&mut b, Side::Player);
        assert!(matches!(b.events.last(), Some(MatchEvent::UnitDied { side: Side::Opponent, .. })));

        prune_dead(&mut b);
        assert!(b.opponent.units.is_empty());
    }
}
