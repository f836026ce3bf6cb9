//! Integration test: level membership stays consistent under random churn.
//!
//! Every entity is listed by at most one level, and a body's level id always
//! names the level that lists it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tilequest::character::Player;
use tilequest::entities::{EntityId, EntityKind, HealthPad, Mob};
use tilequest::level::{LevelId, LevelKind, Tile, TileGrid, World};

fn build_world() -> (World, Vec<LevelId>) {
    let mut world = World::new(Player::new(16, 16));
    let levels: Vec<LevelId> = (0..4)
        .map(|i| {
            world.add_level(
                &format!("level {i}"),
                TileGrid::filled(32, 32, Tile::Grass),
                LevelKind::Authored,
            )
        })
        .collect();
    world.add_to_level(levels[0], EntityId::PLAYER);
    (world, levels)
}

fn assert_consistent(world: &World) {
    let player_level = world.player.body.level;
    check_id(world, EntityId::PLAYER, player_level);
    for entity in world.entities() {
        check_id(world, entity.id, entity.body.level);
    }
    for level in world.levels() {
        for id in level.entities() {
            assert!(
                *id == EntityId::PLAYER || world.entity(*id).is_some(),
                "{:?} lists dangling {:?}",
                level.id,
                id
            );
        }
    }
}

fn check_id(world: &World, id: EntityId, level: Option<LevelId>) {
    let count = world.membership_count(id);
    match level {
        Some(level) => {
            assert_eq!(count, 1, "{id:?} listed {count} times");
            assert!(world.level(level).unwrap().contains(id));
        }
        None => assert_eq!(count, 0, "{id:?} detached but still listed"),
    }
}

fn random_id(world: &World, rng: &mut ChaCha8Rng) -> EntityId {
    let ids: Vec<EntityId> = world.entities().map(|e| e.id).collect();
    if ids.is_empty() || rng.gen_bool(0.2) {
        EntityId::PLAYER
    } else {
        ids[rng.gen_range(0..ids.len())]
    }
}

#[test]
fn test_membership_uniqueness_under_random_operations() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let (mut world, levels) = build_world();

    for step in 0..5_000 {
        let level = levels[rng.gen_range(0..levels.len())];
        match rng.gen_range(0..6) {
            0 => {
                let kind = if rng.gen_bool(0.5) {
                    EntityKind::Creature(Mob::creature("Orc", 1))
                } else {
                    EntityKind::HealthPad(HealthPad::default())
                };
                world.spawn(level, rng.gen_range(0..256), rng.gen_range(0..256), kind);
            }
            1 => {
                let id = random_id(&world, &mut rng);
                world.transfer(id, level, 8, 8);
            }
            2 => {
                let id = random_id(&world, &mut rng);
                world.add_to_level(level, id);
            }
            3 => {
                let id = random_id(&world, &mut rng);
                world.remove_from_level(level, id);
            }
            4 => {
                let id = random_id(&world, &mut rng);
                world.despawn(id);
            }
            _ => {
                if rng.gen_bool(0.05) {
                    world.clear_level(level);
                }
            }
        }
        if step % 10 == 0 {
            assert_consistent(&world);
        }
    }
    assert_consistent(&world);
}

#[test]
fn test_transfer_round_trip_keeps_single_membership() {
    let (mut world, levels) = build_world();
    for _ in 0..3 {
        for level in &levels {
            assert!(world.transfer(EntityId::PLAYER, *level, 8, 8));
            assert_eq!(world.membership_count(EntityId::PLAYER), 1);
            assert_eq!(world.player.body.level, Some(*level));
        }
    }
}

#[test]
fn test_despawned_ids_are_not_reused() {
    let (mut world, levels) = build_world();
    let first = world.spawn(levels[1], 0, 0, EntityKind::HealthPad(HealthPad::default()));
    world.despawn(first);
    let second = world.spawn(levels[1], 0, 0, EntityKind::HealthPad(HealthPad::default()));
    assert_ne!(first, second);
    assert!(world.entity(first).is_none());
    assert_eq!(world.level(levels[1]).unwrap().entities(), &[second]);
}
