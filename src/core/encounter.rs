//! Moving into and out of the combat arena, and paying out victories.

use crate::combat::{Combat, Combatant};
use crate::core::constants::{ARENA_EDGE_OFFSET, KILL_XP_REWARD};
use crate::entities::{EntityId, EntityKind};
use crate::items::{roll_loot, Item};
use crate::level::{LevelId, World};
use rand::Rng;

/// What the player is standing on during exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Creature { id: EntityId, boss: bool },
    HealthPad(EntityId),
    Loot(EntityId),
}

pub fn classify_contact(world: &World, id: EntityId) -> Option<Contact> {
    let entity = world.entity(id)?;
    match &entity.kind {
        EntityKind::Creature(mob) if mob.alive => Some(Contact::Creature { id, boss: mob.boss }),
        EntityKind::Creature(_) => None,
        EntityKind::HealthPad(_) => Some(Contact::HealthPad(id)),
        EntityKind::Loot(_) => Some(Contact::Loot(id)),
    }
}

/// Moves the player and `creature` into the arena and builds the encounter.
///
/// The player's position and level are remembered for the trip back. The
/// player stands near the west wall and the creature near the east wall,
/// both at mid height.
pub fn begin_encounter(world: &mut World, arena: LevelId, creature: EntityId) -> Option<Combat> {
    let from = world.player.body.level?;
    let (width, mid_y) = world
        .level(arena)
        .map(|level| (level.width_px(), level.center_y()))?;
    let boss = world.entity(creature)?.mob()?.boss;

    world.player.main_x = world.player.body.x;
    world.player.main_y = world.player.body.y;
    world.player.prev_level = Some(from);

    world.transfer(creature, arena, width - ARENA_EDGE_OFFSET, mid_y);
    world.transfer(EntityId::PLAYER, arena, ARENA_EDGE_OFFSET, mid_y);

    // Settle moves turn both sides to face each other
    world.move_entity(EntityId::PLAYER, -1, 0);
    world.move_entity(EntityId::PLAYER, 1, 0);
    world.move_entity(creature, 1, 0);
    world.move_entity(creature, 1, 0);
    world.move_entity(creature, -1, 0);
    world.move_entity(creature, -1, 0);

    let mob = world.entity(creature)?.mob()?;
    let combat = Combat::new(
        Combatant::from_mob(EntityId::PLAYER, &world.player.mob),
        Combatant::from_mob(creature, mob),
        boss,
    );
    tracing::info!(
        "Combat started against {} (rank {}{})",
        mob.name,
        mob.rank,
        if boss { ", boss" } else { "" }
    );
    Some(combat)
}

/// Rewards handed out for a won encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victory {
    pub loot: Item,
    pub rank_ups: u32,
}

/// Copies the player's health and cooldowns out of the encounter.
fn write_back(world: &mut World, combat: &Combat) {
    world.player.mob.set_health(combat.player.health);
    world.player.mob.set_cooldowns(combat.player.cooldowns);
}

/// Writes the surviving health and cooldowns back, drops loot where the
/// creature stood, removes the creature, and awards a kill and experience.
pub fn resolve_victory(
    world: &mut World,
    arena: LevelId,
    combat: &Combat,
    rng: &mut impl Rng,
) -> Victory {
    write_back(world, combat);

    let creature = combat.creature.entity;
    let (x, y) = world
        .body(creature)
        .map(|b| (b.x, b.y))
        .unwrap_or((world.player.body.x, world.player.body.y));
    let loot = roll_loot(combat.creature.rank, rng);
    world.spawn(arena, x, y, EntityKind::Loot(loot.clone()));
    world.despawn(creature);

    world.player.add_kill();
    let rank_ups = world.player.add_experience(KILL_XP_REWARD);
    tracing::info!(
        "Defeated {}, dropped {}",
        combat.creature.name,
        loot.display_name()
    );
    Victory { loot, rank_ups }
}

/// Writes the final health and cooldowns back after a lost encounter.
pub fn resolve_defeat(world: &mut World, combat: &Combat) {
    write_back(world, combat);
    tracing::info!("Player was defeated by {}", combat.creature.name);
}

/// Takes the player back to where the encounter began and empties the arena.
pub fn leave_arena(world: &mut World, arena: LevelId) -> Option<LevelId> {
    world.remove_from_level(arena, EntityId::PLAYER);
    world.player.body.x = world.player.main_x;
    world.player.body.y = world.player.main_y;
    let cleared = world.clear_level(arena);
    if !cleared.is_empty() {
        tracing::debug!("Cleared {} leftover entities from the arena", cleared.len());
    }
    let previous = world.player.prev_level?;
    world.add_to_level(previous, EntityId::PLAYER);
    Some(previous)
}
