//! Map and spawn data for the fixed levels.

use super::tiles::{AssetError, Tile, TileGrid};
use crate::core::constants::{AREA2_RANK, AREA3_RANK, BOSS_RANK};

/// What a main-level spawn point creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnKind {
    Creature { name: String, rank: u32 },
    Boss { name: String, rank: u32 },
    HealthPad,
}

/// A spawn point in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainSpawn {
    pub x: i32,
    pub y: i32,
    pub kind: SpawnKind,
}

impl MainSpawn {
    pub fn creature(x: i32, y: i32, name: &str, rank: u32) -> Self {
        Self {
            x,
            y,
            kind: SpawnKind::Creature {
                name: name.to_string(),
                rank,
            },
        }
    }

    pub fn boss(x: i32, y: i32, name: &str, rank: u32) -> Self {
        Self {
            x,
            y,
            kind: SpawnKind::Boss {
                name: name.to_string(),
                rank,
            },
        }
    }

    pub fn health_pad(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            kind: SpawnKind::HealthPad,
        }
    }
}

/// Supplies the authored maps and the main level's spawn list.
pub trait AssetProvider {
    fn main_map(&self) -> Result<TileGrid, AssetError>;
    fn arena_map(&self) -> Result<TileGrid, AssetError>;
    fn main_spawns(&self) -> Vec<MainSpawn>;
}

/// The combat arena. The opening in the east wall is the way out.
pub const ARENA_MAP: &str = "\
####################
#__________________#
#__________________#
#__________________#
#__________________#
#__________________#
#__________________#
#___________________
#___________________
#___________________
#__________________#
#__________________#
#__________________#
#__________________#
#__________________#
####################
";

const MAIN_WIDTH: usize = 180;
const MAIN_HEIGHT: usize = 30;

/// Rock bands that split the main level into three areas. Each band is only
/// crossed through a dungeon.
const AREA_WALLS: [(usize, usize); 2] = [(67, 83), (151, 165)];

/// Built-in level data compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssets;

impl BuiltinAssets {
    fn build_main_map() -> TileGrid {
        let mut grid = TileGrid::filled(MAIN_WIDTH, MAIN_HEIGHT, Tile::Grass);

        for x in 0..MAIN_WIDTH {
            grid.set(x, 0, Tile::Stone);
            grid.set(x, MAIN_HEIGHT - 1, Tile::Stone);
        }
        for y in 0..MAIN_HEIGHT {
            grid.set(0, y, Tile::Stone);
            grid.set(MAIN_WIDTH - 1, y, Tile::Stone);
        }

        for (start, end) in AREA_WALLS {
            for x in start..=end {
                for y in 0..MAIN_HEIGHT {
                    grid.set(x, y, Tile::Stone);
                }
            }
        }

        // Ponds with sandy shores
        for (x0, y0, x1, y1) in [(19, 2, 29, 8), (99, 19, 111, 26), (170, 3, 176, 8)] {
            for x in x0..=x1 {
                for y in y0..=y1 {
                    let shore = x == x0 || x == x1 || y == y0 || y == y1;
                    grid.set(x, y, if shore { Tile::Sand } else { Tile::Water });
                }
            }
        }

        // Paved path in front of each dungeon entrance
        for x in 60..=66 {
            grid.set(x, MAIN_HEIGHT / 2, Tile::Floor);
        }
        for x in 144..=150 {
            grid.set(x, MAIN_HEIGHT / 2, Tile::Floor);
        }

        grid
    }
}

impl AssetProvider for BuiltinAssets {
    fn main_map(&self) -> Result<TileGrid, AssetError> {
        Ok(Self::build_main_map())
    }

    fn arena_map(&self) -> Result<TileGrid, AssetError> {
        TileGrid::from_ascii(ARENA_MAP)
    }

    fn main_spawns(&self) -> Vec<MainSpawn> {
        vec![
            // West area
            MainSpawn::health_pad(64, 120),
            MainSpawn::creature(120, 64, "Orc", 1),
            MainSpawn::creature(200, 176, "Orc", 1),
            MainSpawn::creature(300, 96, "Orc", 1),
            MainSpawn::creature(400, 200, "Orc", 1),
            MainSpawn::creature(460, 40, "Orc", 1),
            // Middle area
            MainSpawn::health_pad(704, 120),
            MainSpawn::creature(760, 80, "Orc", AREA2_RANK),
            MainSpawn::creature(880, 104, "Orc", AREA2_RANK),
            MainSpawn::creature(1000, 60, "Orc", AREA2_RANK),
            MainSpawn::creature(1100, 200, "Orc", AREA2_RANK),
            // East area
            MainSpawn::health_pad(1376, 120),
            MainSpawn::creature(1384, 88, "Orc", AREA3_RANK),
            MainSpawn::creature(1384, 192, "Orc", AREA3_RANK),
            MainSpawn::boss(1416, 120, "Orc Warlord", BOSS_RANK),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{
        ARENA_EDGE_OFFSET, ARENA_EXIT_X, DUNGEON1_EAST_RETURN_X, DUNGEON1_ENTRY_MAX_X,
        DUNGEON1_WEST_RETURN_X, DUNGEON2_EAST_RETURN_X, DUNGEON2_WEST_RETURN_X, PLAYER_START_X,
    };

    #[test]
    fn test_arena_parses() {
        let arena = BuiltinAssets.arena_map().unwrap();
        assert_eq!(arena.width(), 20);
        assert_eq!(arena.height(), 16);
    }

    #[test]
    fn test_arena_exit_is_reachable() {
        let arena = BuiltinAssets.arena_map().unwrap();
        let row = (arena.height() as i32 * 8 / 2) >> 3;
        let exit_col = (ARENA_EXIT_X + 3) >> 3;
        for x in 1..=exit_col {
            assert!(!arena.get(x, row).is_solid(), "blocked at column {}", x);
        }
        let creature_x = arena.width() as i32 * 8 - ARENA_EDGE_OFFSET;
        assert!(!arena.get(creature_x >> 3, row).is_solid());
    }

    #[test]
    fn test_main_map_entry_points_are_walkable() {
        let map = BuiltinAssets.main_map().unwrap();
        let y = (MAIN_HEIGHT as i32 * 8 / 2) >> 3;
        for x in [
            PLAYER_START_X,
            DUNGEON1_WEST_RETURN_X,
            DUNGEON1_ENTRY_MAX_X,
            DUNGEON1_EAST_RETURN_X,
            DUNGEON2_WEST_RETURN_X,
            DUNGEON2_EAST_RETURN_X,
        ] {
            assert!(!map.get(x >> 3, y).is_solid(), "x = {} is solid", x);
        }
    }

    #[test]
    fn test_area_walls_block_the_middle() {
        let map = BuiltinAssets.main_map().unwrap();
        for y in 0..MAIN_HEIGHT as i32 {
            assert!(map.get(70, y).is_solid());
            assert!(map.get(160, y).is_solid());
        }
    }

    #[test]
    fn test_spawns_are_on_open_ground() {
        let map = BuiltinAssets.main_map().unwrap();
        let spawns = BuiltinAssets.main_spawns();
        assert_eq!(
            spawns
                .iter()
                .filter(|s| matches!(s.kind, SpawnKind::Boss { .. }))
                .count(),
            1
        );
        for spawn in &spawns {
            assert!(!map.get(spawn.x >> 3, spawn.y >> 3).is_solid(), "{:?}", spawn);
        }
    }
}
