use super::health_pad::HealthPad;
use super::mob::Mob;
use crate::items::Item;
use crate::level::LevelId;
use serde::{Deserialize, Serialize};

/// Handle of an entity in the world's entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved for the player; the store hands out ids from 1.
    pub const PLAYER: EntityId = EntityId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Position and animation state of anything placed on a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub direction: Direction,
    pub num_steps: u32,
    pub is_moving: bool,
    pub is_swimming: bool,
    pub tick_count: u32,
    /// Level currently holding this entity. Only the world updates it.
    pub level: Option<LevelId>,
}

impl Body {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            speed: 1,
            direction: Direction::Down,
            num_steps: 0,
            is_moving: false,
            is_swimming: false,
            tick_count: 0,
            level: None,
        }
    }

    /// True when the 8x8 boxes centred on both bodies overlap.
    pub fn overlaps(&self, other: &Body, size: i32) -> bool {
        (self.x - other.x).abs() < size && (self.y - other.y).abs() < size
    }

    /// Walk-cycle frame (0 or 1) derived from the step counter.
    pub fn walk_frame(&self) -> u32 {
        (self.num_steps >> 4) & 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Creature(Mob),
    HealthPad(HealthPad),
    Loot(Item),
}

/// A non-player entity in the world store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn name(&self) -> String {
        match &self.kind {
            EntityKind::Creature(mob) => mob.name.clone(),
            EntityKind::HealthPad(_) => "Health Pad".to_string(),
            EntityKind::Loot(item) => item.display_name(),
        }
    }

    pub fn is_hostile(&self) -> bool {
        matches!(&self.kind, EntityKind::Creature(mob) if mob.alive)
    }

    pub fn mob(&self) -> Option<&Mob> {
        match &self.kind {
            EntityKind::Creature(mob) => Some(mob),
            _ => None,
        }
    }

    pub fn mob_mut(&mut self) -> Option<&mut Mob> {
        match &mut self.kind {
            EntityKind::Creature(mob) => Some(mob),
            _ => None,
        }
    }

    /// One simulation step for entities without input.
    pub fn tick(&mut self) {
        match &mut self.kind {
            EntityKind::Creature(mob) => mob.tick_cooldowns(),
            EntityKind::HealthPad(pad) => pad.tick(),
            EntityKind::Loot(_) => {}
        }
        self.body.tick_count = self.body.tick_count.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_symmetric_and_strict() {
        let a = Body::new(100, 100);
        let b = Body::new(107, 93);
        let c = Body::new(108, 100);
        assert!(a.overlaps(&b, 8));
        assert!(b.overlaps(&a, 8));
        assert!(!a.overlaps(&c, 8));
    }

    #[test]
    fn test_walk_frame_toggles_every_sixteen_steps() {
        let mut body = Body::new(0, 0);
        assert_eq!(body.walk_frame(), 0);
        body.num_steps = 16;
        assert_eq!(body.walk_frame(), 1);
        body.num_steps = 32;
        assert_eq!(body.walk_frame(), 0);
    }

    #[test]
    fn test_dead_creature_is_not_hostile() {
        let mut entity = Entity {
            id: EntityId(1),
            body: Body::new(0, 0),
            kind: EntityKind::Creature(Mob::creature("Orc", 1)),
        };
        assert!(entity.is_hostile());
        entity.mob_mut().unwrap().take_damage(u32::MAX);
        assert!(!entity.is_hostile());
    }

    #[test]
    fn test_tick_decays_creature_cooldowns() {
        let mut mob = Mob::creature("Orc", 1);
        mob.set_cooldowns([1, 0, 0, 0]);
        let mut entity = Entity {
            id: EntityId(1),
            body: Body::new(0, 0),
            kind: EntityKind::Creature(mob),
        };
        entity.tick();
        assert_eq!(entity.mob().unwrap().cooldown(0), 0);
        assert_eq!(entity.body.tick_count, 1);
    }
}
