use super::tiles::{Tile, TileGrid};
use crate::core::constants::{TILE_SHIFT, TILE_SIZE};
use crate::entities::EntityId;
use serde::{Deserialize, Serialize};

/// Index of a level inside the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelKind {
    /// Fixed, file-authored map.
    Authored,
    /// Procedurally generated dungeon with its entry row.
    Dungeon { index: u32, start_row: usize },
}

/// A tile grid plus the ids of the entities currently on it, in insertion
/// order. The entity list is only changed through the world so that each
/// entity's back-reference stays in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    pub grid: TileGrid,
    pub kind: LevelKind,
    entities: Vec<EntityId>,
}

impl Level {
    pub fn new(id: LevelId, name: &str, grid: TileGrid, kind: LevelKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            grid,
            kind,
            entities: Vec::new(),
        }
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    pub(crate) fn push(&mut self, id: EntityId) {
        if !self.contains(id) {
            self.entities.push(id);
        }
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> bool {
        match self.entities.iter().position(|e| *e == id) {
            Some(index) => {
                self.entities.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn drain(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.entities)
    }

    /// Entry row of a procedural dungeon.
    pub fn start_row(&self) -> Option<usize> {
        match self.kind {
            LevelKind::Dungeon { start_row, .. } => Some(start_row),
            LevelKind::Authored => None,
        }
    }

    pub fn width_px(&self) -> i32 {
        self.grid.width() as i32 * TILE_SIZE
    }

    pub fn height_px(&self) -> i32 {
        self.grid.height() as i32 * TILE_SIZE
    }

    /// Vertical centre in pixels, the entry height for authored levels.
    pub fn center_y(&self) -> i32 {
        self.height_px() / 2
    }

    pub fn tile_at_px(&self, x: i32, y: i32) -> Tile {
        self.grid.get(x >> TILE_SHIFT, y >> TILE_SHIFT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_is_idempotent_and_ordered() {
        let mut level = Level::new(
            LevelId(0),
            "test",
            TileGrid::filled(4, 4, Tile::Grass),
            LevelKind::Authored,
        );
        level.push(EntityId(3));
        level.push(EntityId(1));
        level.push(EntityId(3));
        assert_eq!(level.entities(), &[EntityId(3), EntityId(1)]);
        assert!(level.remove(EntityId(3)));
        assert!(!level.remove(EntityId(3)));
        assert_eq!(level.entities(), &[EntityId(1)]);
    }

    #[test]
    fn test_dimensions_and_start_row() {
        let level = Level::new(
            LevelId(1),
            "dungeon",
            TileGrid::filled(64, 40, Tile::Stone),
            LevelKind::Dungeon {
                index: 1,
                start_row: 12,
            },
        );
        assert_eq!(level.width_px(), 512);
        assert_eq!(level.center_y(), 160);
        assert_eq!(level.start_row(), Some(12));
        assert_eq!(level.tile_at_px(17, 9), Tile::Stone);
        assert_eq!(level.tile_at_px(-1, 0), Tile::Void);
    }
}
