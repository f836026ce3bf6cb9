//! Entity store and level membership.
//!
//! The world owns every level, every non-player entity and the player.
//! Levels hold entity ids; each body holds the id of its level. Both sides
//! are only changed here so an entity is on at most one level at a time.

use super::level::{Level, LevelId, LevelKind};
use super::tiles::TileGrid;
use crate::character::Player;
use crate::core::constants::{INTERACTION_BOX, TILE_SHIFT};
use crate::entities::{Body, Direction, Entity, EntityId, EntityKind};
use crate::input::InputState;
use std::collections::BTreeMap;

/// Collision box relative to a body's position.
const BOX_X_MIN: i32 = -4;
const BOX_X_MAX: i32 = 3;
const BOX_Y_MIN: i32 = 3;
const BOX_Y_MAX: i32 = 7;

#[derive(Debug, Clone)]
pub struct World {
    levels: Vec<Level>,
    entities: BTreeMap<EntityId, Entity>,
    pub player: Player,
    next_id: u32,
}

impl World {
    pub fn new(player: Player) -> Self {
        Self {
            levels: Vec::new(),
            entities: BTreeMap::new(),
            player,
            next_id: EntityId::PLAYER.0 + 1,
        }
    }

    pub fn add_level(&mut self, name: &str, grid: TileGrid, kind: LevelKind) -> LevelId {
        let id = LevelId(self.levels.len());
        self.levels.push(Level::new(id, name, grid, kind));
        id
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(id.0)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Non-player entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        if id == EntityId::PLAYER {
            Some(&self.player.body)
        } else {
            self.entities.get(&id).map(|e| &e.body)
        }
    }

    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        if id == EntityId::PLAYER {
            Some(&mut self.player.body)
        } else {
            self.entities.get_mut(&id).map(|e| &mut e.body)
        }
    }

    /// Creates an entity at `(x, y)` and places it on `level`.
    pub fn spawn(&mut self, level: LevelId, x: i32, y: i32, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            Entity {
                id,
                body: Body::new(x, y),
                kind,
            },
        );
        if !self.add_to_level(level, id) {
            tracing::warn!("Spawned {:?} without a level: {:?} does not exist", id, level);
        }
        id
    }

    /// Removes an entity from its level and from the store.
    /// The player cannot be despawned.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        if id == EntityId::PLAYER {
            tracing::warn!("Refusing to despawn the player");
            return None;
        }
        if let Some(level) = self.body(id).and_then(|b| b.level) {
            self.remove_from_level(level, id);
        }
        self.entities.remove(&id)
    }

    /// Places `id` on `level`, leaving whatever level it was on before.
    pub fn add_to_level(&mut self, level: LevelId, id: EntityId) -> bool {
        if level.0 >= self.levels.len() {
            return false;
        }
        let Some(current) = self.body(id).map(|b| b.level) else {
            return false;
        };
        if let Some(previous) = current {
            if previous != level {
                self.remove_from_level(previous, id);
            }
        }
        self.levels[level.0].push(id);
        if let Some(body) = self.body_mut(id) {
            body.level = Some(level);
        }
        true
    }

    pub fn remove_from_level(&mut self, level: LevelId, id: EntityId) -> bool {
        let removed = self
            .levels
            .get_mut(level.0)
            .map(|l| l.remove(id))
            .unwrap_or(false);
        if removed {
            if let Some(body) = self.body_mut(id) {
                if body.level == Some(level) {
                    body.level = None;
                }
            }
        }
        removed
    }

    /// Moves `id` to `(x, y)` on level `to`.
    pub fn transfer(&mut self, id: EntityId, to: LevelId, x: i32, y: i32) -> bool {
        if to.0 >= self.levels.len() {
            return false;
        }
        let Some(body) = self.body_mut(id) else {
            return false;
        };
        let from = body.level;
        body.x = x;
        body.y = y;
        if let Some(from) = from {
            self.remove_from_level(from, id);
        }
        let added = self.add_to_level(to, id);
        tracing::debug!("Transferred {:?} from {:?} to {:?} at ({}, {})", id, from, to, x, y);
        added
    }

    /// Empties a level. Every entity on it is despawned except the player,
    /// which is only detached. Returns the despawned ids.
    pub fn clear_level(&mut self, level: LevelId) -> Vec<EntityId> {
        let Some(ids) = self.levels.get_mut(level.0).map(|l| l.drain()) else {
            return Vec::new();
        };
        let mut despawned = Vec::with_capacity(ids.len());
        for id in ids {
            if id == EntityId::PLAYER {
                self.player.body.level = None;
            } else if self.entities.remove(&id).is_some() {
                despawned.push(id);
            }
        }
        despawned
    }

    /// Number of levels whose entity list contains `id`.
    pub fn membership_count(&self, id: EntityId) -> usize {
        self.levels.iter().filter(|l| l.contains(id)).count()
    }

    /// Advances every entity on `level` once. Iterates over a snapshot of
    /// the id list so each entity is visited exactly once.
    pub fn tick_level(&mut self, level: LevelId, input: &InputState) {
        let Some(ids) = self.level(level).map(|l| l.entities().to_vec()) else {
            return;
        };
        for id in ids {
            if id == EntityId::PLAYER {
                self.tick_player(input);
            } else if let Some(entity) = self.entities.get_mut(&id) {
                entity.tick();
            }
        }
    }

    fn tick_player(&mut self, input: &InputState) {
        let (xa, ya) = input.direction();
        if xa != 0 || ya != 0 {
            self.move_entity(EntityId::PLAYER, xa, ya);
            self.player.body.is_moving = true;
        } else {
            self.player.body.is_moving = false;
        }

        let body = &self.player.body;
        let swimming = body
            .level
            .and_then(|l| self.levels.get(l.0))
            .map(|l| l.tile_at_px(body.x, body.y).is_swimmable())
            .unwrap_or(false);
        self.player.body.is_swimming = swimming;
        self.player.body.tick_count = self.player.body.tick_count.wrapping_add(1);
        self.player.mob.tick_cooldowns();
    }

    /// First other entity on `level`, in insertion order, whose box
    /// overlaps the interaction box of `id`.
    pub fn touching(&self, level: LevelId, id: EntityId) -> Option<EntityId> {
        let body = self.body(id)?;
        let level = self.level(level)?;
        level.entities().iter().copied().find(|other| {
            *other != id
                && self
                    .body(*other)
                    .map(|b| b.overlaps(body, INTERACTION_BOX))
                    .unwrap_or(false)
        })
    }

    /// Moves an entity one step on its level. Returns true if it moved.
    pub fn move_entity(&mut self, id: EntityId, xa: i32, ya: i32) -> bool {
        let Some(level) = self.body(id).and_then(|b| b.level) else {
            return false;
        };
        let Some(grid) = self.levels.get(level.0).map(|l| &l.grid) else {
            return false;
        };
        let body = if id == EntityId::PLAYER {
            &mut self.player.body
        } else {
            match self.entities.get_mut(&id) {
                Some(entity) => &mut entity.body,
                None => return false,
            }
        };
        move_body(grid, body, xa, ya)
    }
}

/// One movement step against `grid`. Diagonals resolve as an x step then a
/// y step and count as a single step.
pub fn move_body(grid: &TileGrid, body: &mut Body, xa: i32, ya: i32) -> bool {
    if xa != 0 && ya != 0 {
        let moved_x = move_body(grid, body, xa, 0);
        let moved_y = move_body(grid, body, 0, ya);
        body.num_steps = body.num_steps.saturating_sub(1);
        return moved_x || moved_y;
    }
    if xa == 0 && ya == 0 {
        return false;
    }

    body.num_steps = body.num_steps.wrapping_add(1);
    body.direction = if ya < 0 {
        Direction::Up
    } else if ya > 0 {
        Direction::Down
    } else if xa < 0 {
        Direction::Left
    } else {
        Direction::Right
    };

    if has_collided(grid, body, xa, ya) {
        return false;
    }
    body.x += xa * body.speed;
    body.y += ya * body.speed;
    true
}

fn has_collided(grid: &TileGrid, body: &Body, xa: i32, ya: i32) -> bool {
    let solid = |x, y| is_solid_tile(grid, body, xa, ya, x, y);
    let horizontal = (BOX_X_MIN..BOX_X_MAX).any(|x| solid(x, BOX_Y_MIN) || solid(x, BOX_Y_MAX));
    let vertical = (BOX_Y_MIN..BOX_Y_MAX).any(|y| solid(BOX_X_MIN, y) || solid(BOX_X_MAX, y));
    horizontal || vertical
}

/// Solid only when the box corner would cross into a different tile.
fn is_solid_tile(grid: &TileGrid, body: &Body, xa: i32, ya: i32, x: i32, y: i32) -> bool {
    let last = grid.get((body.x + x) >> TILE_SHIFT, (body.y + y) >> TILE_SHIFT);
    let next = grid.get(
        (body.x + x + xa) >> TILE_SHIFT,
        (body.y + y + ya) >> TILE_SHIFT,
    );
    last != next && next.is_solid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{HealthPad, Mob};
    use crate::level::tiles::Tile;

    fn open_world() -> (World, LevelId, LevelId) {
        let mut world = World::new(Player::new(40, 40));
        let a = world.add_level("a", TileGrid::filled(16, 16, Tile::Grass), LevelKind::Authored);
        let b = world.add_level("b", TileGrid::filled(16, 16, Tile::Grass), LevelKind::Authored);
        world.add_to_level(a, EntityId::PLAYER);
        (world, a, b)
    }

    #[test]
    fn test_spawn_places_entity_on_level() {
        let (mut world, a, _) = open_world();
        let id = world.spawn(a, 10, 10, EntityKind::HealthPad(HealthPad::default()));
        assert_eq!(world.body(id).unwrap().level, Some(a));
        assert_eq!(world.level(a).unwrap().entities(), &[EntityId::PLAYER, id]);
    }

    #[test]
    fn test_add_to_level_moves_between_levels() {
        let (mut world, a, b) = open_world();
        assert!(world.add_to_level(b, EntityId::PLAYER));
        assert!(!world.level(a).unwrap().contains(EntityId::PLAYER));
        assert!(world.level(b).unwrap().contains(EntityId::PLAYER));
        assert_eq!(world.membership_count(EntityId::PLAYER), 1);
        assert_eq!(world.player.body.level, Some(b));
    }

    #[test]
    fn test_transfer_repositions() {
        let (mut world, _, b) = open_world();
        assert!(world.transfer(EntityId::PLAYER, b, 8, 24));
        assert_eq!((world.player.body.x, world.player.body.y), (8, 24));
        assert_eq!(world.player.body.level, Some(b));
        assert_eq!(world.membership_count(EntityId::PLAYER), 1);
        assert!(!world.transfer(EntityId::PLAYER, LevelId(9), 0, 0));
    }

    #[test]
    fn test_despawn_removes_from_level_and_store() {
        let (mut world, a, _) = open_world();
        let id = world.spawn(a, 10, 10, EntityKind::Creature(Mob::creature("Orc", 1)));
        assert!(world.despawn(id).is_some());
        assert!(world.entity(id).is_none());
        assert!(!world.level(a).unwrap().contains(id));
        assert!(world.despawn(EntityId::PLAYER).is_none());
    }

    #[test]
    fn test_clear_level_keeps_player() {
        let (mut world, a, _) = open_world();
        let pad = world.spawn(a, 10, 10, EntityKind::HealthPad(HealthPad::default()));
        assert_eq!(world.clear_level(a), vec![pad]);
        assert!(world.level(a).unwrap().entities().is_empty());
        assert_eq!(world.player.body.level, None);
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_touching_uses_insertion_order() {
        let (mut world, a, _) = open_world();
        let first = world.spawn(a, 44, 40, EntityKind::HealthPad(HealthPad::default()));
        let _second = world.spawn(a, 36, 40, EntityKind::Creature(Mob::creature("Orc", 1)));
        assert_eq!(world.touching(a, EntityId::PLAYER), Some(first));
        let _far = world.spawn(a, 100, 100, EntityKind::HealthPad(HealthPad::default()));
        world.despawn(first);
        assert_ne!(world.touching(a, EntityId::PLAYER), Some(first));
    }

    #[test]
    fn test_move_blocked_by_solid_tile() {
        let mut grid = TileGrid::filled(8, 8, Tile::Grass);
        grid.set(3, 2, Tile::Stone);
        let mut body = Body::new(20, 16);
        // box right edge at x = 23 is in tile 2; the next step enters stone
        assert!(!move_body(&grid, &mut body, 1, 0));
        assert_eq!(body.x, 20);
        assert_eq!(body.direction, Direction::Right);
        assert!(move_body(&grid, &mut body, -1, 0));
        assert_eq!(body.x, 19);
        assert_eq!(body.num_steps, 2);
    }

    #[test]
    fn test_map_edge_is_solid() {
        let grid = TileGrid::filled(8, 8, Tile::Grass);
        let mut body = Body::new(4, 20);
        assert!(!move_body(&grid, &mut body, -1, 0));
        assert_eq!(body.x, 4);
    }

    #[test]
    fn test_diagonal_counts_one_step() {
        let grid = TileGrid::filled(8, 8, Tile::Grass);
        let mut body = Body::new(20, 20);
        assert!(move_body(&grid, &mut body, 1, 1));
        assert_eq!((body.x, body.y), (21, 21));
        assert_eq!(body.num_steps, 1);
        assert_eq!(body.direction, Direction::Down);
    }

    #[test]
    fn test_tick_level_moves_player_and_sets_swimming() {
        let mut world = World::new(Player::new(20, 20));
        let mut grid = TileGrid::filled(8, 8, Tile::Grass);
        grid.set(2, 2, Tile::Water);
        let level = world.add_level("pond", grid, LevelKind::Authored);
        world.add_to_level(level, EntityId::PLAYER);
        let input = InputState {
            right: true,
            ..Default::default()
        };
        world.tick_level(level, &input);
        assert_eq!(world.player.body.x, 21);
        assert!(world.player.body.is_moving);
        assert!(world.player.body.is_swimming);

        world.tick_level(level, &InputState::new());
        assert!(!world.player.body.is_moving);
        assert_eq!(world.player.body.tick_count, 2);
    }
}
