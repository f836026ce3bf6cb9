//! Turn resolution: one exchange per player command.

use super::types::{Combat, CombatEvent, Combatant, DamageOverTime, Side};
use crate::abilities::{Ability, AbilityCatalog, AbilityEffect};
use std::cmp::Reverse;

/// Resolves one exchange. The player uses `slot`, then timed effects tick,
/// then the creature acts if it is still standing.
///
/// Returns no events once the encounter is over.
pub fn resolve_exchange(
    combat: &mut Combat,
    slot: usize,
    catalog: &AbilityCatalog,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    if !combat.in_combat {
        return events;
    }
    combat.exchanges += 1;

    combat.player.tick_cooldowns();
    combat.creature.tick_cooldowns();

    act(combat, Side::Player, Some(slot), catalog, &mut events);
    if check_end(combat, &mut events) {
        return events;
    }

    for side in [Side::Player, Side::Creature] {
        tick_effects(combat.combatant_mut(side), side, &mut events);
        if check_end(combat, &mut events) {
            return events;
        }
    }

    let choice = choose_ability(&combat.creature, &combat.player, catalog);
    act(combat, Side::Creature, choice, catalog, &mut events);
    check_end(combat, &mut events);

    events
}

fn act(
    combat: &mut Combat,
    side: Side,
    slot: Option<usize>,
    catalog: &AbilityCatalog,
    events: &mut Vec<CombatEvent>,
) {
    let (caster, target) = combat.pair_mut(side);
    if caster.stunned > 0 {
        caster.stunned -= 1;
        events.push(CombatEvent::Stunned { side });
        return;
    }
    let Some(slot) = slot else {
        return;
    };
    if !caster.is_ready(slot) {
        events.push(CombatEvent::OnCooldown { side, slot });
        return;
    }
    let id = caster.abilities[slot];
    let Some(ability) = catalog.get(id) else {
        tracing::warn!("{} has unknown ability {} in slot {}", caster.name, id, slot);
        return;
    };

    let amount = apply_ability(ability, caster, target);
    caster.cooldowns[slot] = ability.cooldown;
    tracing::debug!("{} used {} for {}", caster.name, ability.name, amount);
    events.push(CombatEvent::AbilityUsed {
        side,
        slot,
        ability: id,
        amount,
    });
}

/// Applies one ability from `caster` to `target` and returns its magnitude.
///
/// Offensive abilities with a stun hit immediately and stun the target for
/// `max(duration, 1)` actions. Other offensive abilities with a duration
/// become damage over time. Defensive abilities heal and shield the caster.
pub fn apply_ability(ability: &Ability, caster: &mut Combatant, target: &mut Combatant) -> u32 {
    match ability.effect {
        AbilityEffect::Offensive {
            damage,
            stun,
            duration,
        } => {
            let amount = ability.scaled(damage, &caster.stats, caster.rank);
            if stun {
                target.take_damage(amount);
                target.stun(duration);
            } else if duration > 0 {
                if amount > 0 {
                    target.dots.push(DamageOverTime {
                        ability: ability.id,
                        damage: amount,
                        remaining: duration,
                    });
                }
            } else {
                target.take_damage(amount);
            }
            amount
        }
        AbilityEffect::Defensive {
            heal,
            shield,
            duration,
        } => {
            let mut amount = 0;
            if heal > 0 {
                let scaled = ability.scaled(heal, &caster.stats, caster.rank);
                caster.heal(scaled);
                amount += scaled;
            }
            if shield > 0 {
                let scaled = ability.scaled(shield, &caster.stats, caster.rank);
                caster.add_shield(scaled, duration);
                amount += scaled;
            }
            amount
        }
    }
}

/// Creature policy. Opens with a ready stun when the opponent is not
/// already stunned, otherwise takes the highest-magnitude ready ability.
/// Healing is only considered below half health. Ties go to the lower slot.
pub fn choose_ability(
    me: &Combatant,
    opponent: &Combatant,
    catalog: &AbilityCatalog,
) -> Option<usize> {
    let wounded = me.health * 2 < me.max_health;
    let ready: Vec<(usize, &Ability)> = (0..me.abilities.len())
        .filter(|slot| me.is_ready(*slot))
        .filter_map(|slot| catalog.get(me.abilities[slot]).map(|a| (slot, a)))
        .filter(|(_, a)| a.is_offensive() || wounded)
        .collect();

    if opponent.stunned == 0 {
        let stun = ready.iter().find(|(_, a)| {
            matches!(a.effect, AbilityEffect::Offensive { stun: true, .. })
        });
        if let Some((slot, _)) = stun {
            return Some(*slot);
        }
    }

    ready
        .iter()
        .max_by_key(|(slot, a)| (a.magnitude(&me.stats, me.rank), Reverse(*slot)))
        .map(|(slot, _)| *slot)
}

/// Lands damage over time and counts down the shield.
fn tick_effects(combatant: &mut Combatant, side: Side, events: &mut Vec<CombatEvent>) {
    let mut dots = std::mem::take(&mut combatant.dots);
    for dot in &mut dots {
        if dot.remaining == 0 {
            continue;
        }
        combatant.take_damage(dot.damage);
        dot.remaining -= 1;
        events.push(CombatEvent::DamageOverTime {
            target: side,
            ability: dot.ability,
            damage: dot.damage,
        });
    }
    dots.retain(|dot| dot.remaining > 0);
    combatant.dots = dots;

    if combatant.shield > 0 {
        if combatant.shield_remaining == 0 {
            combatant.shield = 0;
            events.push(CombatEvent::ShieldExpired { side });
        } else {
            combatant.shield_remaining -= 1;
        }
    }
}

/// Ends the encounter the first time either side is at zero health.
fn check_end(combat: &mut Combat, events: &mut Vec<CombatEvent>) -> bool {
    if !combat.in_combat {
        return true;
    }
    let winner = if !combat.creature.is_alive() {
        Side::Player
    } else if !combat.player.is_alive() {
        Side::Creature
    } else {
        return false;
    };
    combat.in_combat = false;
    combat.winner = Some(winner);
    tracing::info!(
        "Combat ended after {} exchanges, {:?} won",
        combat.exchanges,
        winner
    );
    events.push(CombatEvent::Ended { winner });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{Scaling, ScalingStat, BITE, CLAW, REGENERATE, ROAR, STRIKE};
    use crate::character::attributes::Stats;
    use crate::entities::{EntityId, Mob};

    fn catalog() -> AbilityCatalog {
        AbilityCatalog::standard().unwrap()
    }

    fn player() -> Combatant {
        let mob = Mob::new("Player", Stats::new(10, 1, 1), 20, [STRIKE; 4]);
        Combatant::from_mob(EntityId::PLAYER, &mob)
    }

    fn creature(health: u32) -> Combatant {
        let mut mob = Mob::creature("Orc", 1);
        mob.set_health(health);
        Combatant::from_mob(EntityId(1), &mob)
    }

    #[test]
    fn test_strike_kills_one_health_creature() {
        let mut combat = Combat::new(player(), creature(1), false);
        let events = resolve_exchange(&mut combat, 0, &catalog());
        assert_eq!(combat.creature.health, 0);
        assert!(!combat.in_combat);
        assert_eq!(combat.winner, Some(Side::Player));
        assert_eq!(
            events,
            vec![
                CombatEvent::AbilityUsed {
                    side: Side::Player,
                    slot: 0,
                    ability: STRIKE,
                    amount: 2
                },
                CombatEvent::Ended {
                    winner: Side::Player
                },
            ]
        );
    }

    #[test]
    fn test_ended_combat_ignores_further_exchanges() {
        let mut combat = Combat::new(player(), creature(1), false);
        resolve_exchange(&mut combat, 0, &catalog());
        let snapshot = combat.clone();
        assert!(resolve_exchange(&mut combat, 0, &catalog()).is_empty());
        assert_eq!(combat, snapshot);
    }

    #[test]
    fn test_cooling_slot_wastes_the_turn() {
        let mut combat = Combat::new(player(), creature(30), false);
        combat.player.cooldowns[0] = 3;
        let events = resolve_exchange(&mut combat, 0, &catalog());
        assert_eq!(
            events[0],
            CombatEvent::OnCooldown {
                side: Side::Player,
                slot: 0
            }
        );
        assert_eq!(combat.creature.health, 30.min(combat.creature.max_health));
        assert_eq!(combat.player.cooldowns[0], 2);
    }

    #[test]
    fn test_cooldown_set_after_use() {
        let catalog = catalog();
        let mut combat = Combat::new(player(), creature(12), false);
        // keep Roar on cooldown so the player is never stunned
        combat.creature.cooldowns[2] = 10;
        resolve_exchange(&mut combat, 0, &catalog);
        assert_eq!(combat.player.cooldowns[0], 1);
        // decremented at the start of the next exchange, so Strike fires again
        let events = resolve_exchange(&mut combat, 0, &catalog);
        assert!(matches!(
            events[0],
            CombatEvent::AbilityUsed {
                side: Side::Player,
                ..
            }
        ));
    }

    #[test]
    fn test_stunned_player_loses_action() {
        let mut combat = Combat::new(player(), creature(12), false);
        combat.player.stunned = 1;
        combat.creature.cooldowns[2] = 10;
        let before = combat.creature.health;
        let events = resolve_exchange(&mut combat, 0, &catalog());
        assert_eq!(events[0], CombatEvent::Stunned { side: Side::Player });
        assert_eq!(combat.creature.health, before);
        assert_eq!(combat.player.stunned, 0);
    }

    #[test]
    fn test_damage_over_time_lands_each_exchange() {
        let scorch = Ability::offensive(
            50,
            "Scorch",
            4,
            1,
            Scaling::new(ScalingStat::Intelligence, 10),
            false,
            3,
        );
        let mut caster = player();
        let mut target = creature(10);
        assert_eq!(apply_ability(&scorch, &mut caster, &mut target), 1);
        assert_eq!(target.health, 10);

        let mut events = Vec::new();
        for _ in 0..5 {
            tick_effects(&mut target, Side::Creature, &mut events);
        }
        assert_eq!(target.health, 7);
        assert_eq!(events.len(), 3);
        assert!(target.dots.is_empty());
    }

    #[test]
    fn test_shield_expires_after_duration() {
        let mut c = creature(10);
        c.add_shield(4, 1);
        let mut events = Vec::new();
        tick_effects(&mut c, Side::Creature, &mut events);
        assert_eq!(c.shield, 4);
        tick_effects(&mut c, Side::Creature, &mut events);
        assert_eq!(c.shield, 0);
        assert_eq!(events, vec![CombatEvent::ShieldExpired { side: Side::Creature }]);
    }

    #[test]
    fn test_ai_opens_with_stun() {
        let catalog = catalog();
        let orc = creature(12);
        let target = player();
        assert_eq!(orc.abilities[2], ROAR);
        assert_eq!(choose_ability(&orc, &target, &catalog), Some(2));
    }

    #[test]
    fn test_ai_prefers_highest_magnitude_when_target_stunned() {
        let catalog = catalog();
        let orc = creature(12);
        let mut target = player();
        target.stunned = 1;
        assert_eq!(orc.abilities[1], BITE);
        assert_eq!(choose_ability(&orc, &target, &catalog), Some(1));
    }

    #[test]
    fn test_ai_heals_only_when_wounded() {
        let catalog = catalog();
        let mut orc = creature(12);
        orc.cooldowns = [0, 5, 5, 0];
        let mut target = player();
        target.stunned = 1;
        assert_eq!(orc.abilities[0], CLAW);
        assert_eq!(choose_ability(&orc, &target, &catalog), Some(0));

        orc.health = 1;
        assert_eq!(orc.abilities[3], REGENERATE);
        assert_eq!(choose_ability(&orc, &target, &catalog), Some(3));
    }

    #[test]
    fn test_ai_with_nothing_ready() {
        let catalog = catalog();
        let mut orc = creature(12);
        orc.cooldowns = [1, 1, 1, 1];
        assert_eq!(choose_ability(&orc, &player(), &catalog), None);
    }

    #[test]
    fn test_combat_terminates_with_repeated_strikes() {
        let catalog = catalog();
        let mut combat = Combat::new(player(), creature(u32::MAX), false);
        let mut exchanges = 0;
        while combat.in_combat {
            resolve_exchange(&mut combat, 0, &catalog);
            exchanges += 1;
            assert!(exchanges < 1_000, "combat never ended");
        }
        assert!(combat.winner.is_some());
        assert!(combat.player.health == 0 || combat.creature.health == 0);
    }
}
