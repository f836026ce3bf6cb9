//! Coordinate-triggered portals between the main level and the dungeons.

use crate::core::constants::{
    DUNGEON1_EAST_RETURN_X, DUNGEON1_ENTRY_MAX_X, DUNGEON1_ENTRY_MIN_X, DUNGEON1_WEST_RETURN_X,
    DUNGEON2_EAST_RETURN_X, DUNGEON2_ENTRY_MAX_X, DUNGEON2_ENTRY_MIN_X, DUNGEON2_WEST_RETURN_X,
    DUNGEON_EAST_EXIT_X, DUNGEON_ENTRY_X, DUNGEON_WEST_EXIT_X, TILE_SIZE,
};
use crate::entities::EntityId;
use crate::level::{LevelId, World};

/// Horizontal condition that fires a portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// `min < x <= max`
    Between { min: i32, max: i32 },
    /// `x >= edge`
    AtLeast(i32),
    /// `x < edge`
    Below(i32),
}

impl Trigger {
    pub fn matches(&self, x: i32) -> bool {
        match *self {
            Trigger::Between { min, max } => x > min && x <= max,
            Trigger::AtLeast(edge) => x >= edge,
            Trigger::Below(edge) => x < edge,
        }
    }
}

/// Where the player lands vertically on the destination level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRow {
    /// The dungeon's recorded start row.
    DungeonStart,
    /// Half the level height.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portal {
    pub from: LevelId,
    pub to: LevelId,
    pub trigger: Trigger,
    pub entry_x: i32,
    pub entry_row: EntryRow,
}

/// Ordered portal rules; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalTable {
    portals: Vec<Portal>,
}

impl PortalTable {
    pub fn new(portals: Vec<Portal>) -> Self {
        Self { portals }
    }

    /// The two dungeon loops hanging off the main level.
    pub fn standard(main: LevelId, dungeon1: LevelId, dungeon2: LevelId) -> Self {
        let portal = |from, to, trigger, entry_x, entry_row| Portal {
            from,
            to,
            trigger,
            entry_x,
            entry_row,
        };
        Self::new(vec![
            portal(
                main,
                dungeon1,
                Trigger::Between {
                    min: DUNGEON1_ENTRY_MIN_X,
                    max: DUNGEON1_ENTRY_MAX_X,
                },
                DUNGEON_ENTRY_X,
                EntryRow::DungeonStart,
            ),
            portal(
                main,
                dungeon2,
                Trigger::Between {
                    min: DUNGEON2_ENTRY_MIN_X,
                    max: DUNGEON2_ENTRY_MAX_X,
                },
                DUNGEON_ENTRY_X,
                EntryRow::DungeonStart,
            ),
            portal(
                dungeon1,
                main,
                Trigger::AtLeast(DUNGEON_EAST_EXIT_X),
                DUNGEON1_EAST_RETURN_X,
                EntryRow::Center,
            ),
            portal(
                dungeon2,
                main,
                Trigger::AtLeast(DUNGEON_EAST_EXIT_X),
                DUNGEON2_EAST_RETURN_X,
                EntryRow::Center,
            ),
            portal(
                dungeon1,
                main,
                Trigger::Below(DUNGEON_WEST_EXIT_X),
                DUNGEON1_WEST_RETURN_X,
                EntryRow::Center,
            ),
            portal(
                dungeon2,
                main,
                Trigger::Below(DUNGEON_WEST_EXIT_X),
                DUNGEON2_WEST_RETURN_X,
                EntryRow::Center,
            ),
        ])
    }

    pub fn find(&self, level: LevelId, x: i32) -> Option<&Portal> {
        self.portals
            .iter()
            .find(|p| p.from == level && p.trigger.matches(x))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Portal> {
        self.portals.iter()
    }
}

/// Runs the first portal matching the player's level and x coordinate.
/// Returns the portal taken.
pub fn apply_portals(world: &mut World, table: &PortalTable) -> Option<Portal> {
    let level = world.player.body.level?;
    let portal = *table.find(level, world.player.body.x)?;
    let destination = world.level(portal.to)?;
    let entry_y = match portal.entry_row {
        EntryRow::DungeonStart => destination.start_row().unwrap_or(0) as i32 * TILE_SIZE,
        EntryRow::Center => destination.center_y(),
    };
    if !world.transfer(EntityId::PLAYER, portal.to, portal.entry_x, entry_y) {
        return None;
    }
    Some(portal)
}
