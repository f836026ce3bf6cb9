//! Procedural dungeon generation.

use super::tiles::{Tile, TileGrid};
use crate::core::constants::{
    DUNGEON_BASE_CREATURES, DUNGEON_CREATURES_PER_INDEX, DUNGEON_EDGE_MARGIN,
    DUNGEON_MIN_LENGTH, DUNGEON_RANK_PER_INDEX, DUNGEON_WIDTH_TILES, TILE_SIZE,
};
use rand::seq::SliceRandom;
use rand::Rng;

const DUNGEON_CREATURE_NAMES: [&str; 5] = ["Cave Bat", "Slime", "Goblin", "Skeleton", "Ghoul"];

/// A creature placement produced by generation, in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureSpawn {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDungeon {
    pub grid: TileGrid,
    /// Tile row of the west entrance.
    pub start_row: usize,
    pub spawns: Vec<CreatureSpawn>,
}

/// Builds a cave `length` tiles tall with a winding tunnel from the west edge
/// to the east edge. Creature count and rank grow with `index`.
pub fn generate_dungeon(index: u32, length: usize, rng: &mut impl Rng) -> GeneratedDungeon {
    let width = DUNGEON_WIDTH_TILES;
    let height = length.max(DUNGEON_MIN_LENGTH);
    let mut grid = TileGrid::filled(width, height, Tile::Stone);

    // Tunnel centre stays two tiles clear of the top and bottom walls
    let lowest = 2;
    let highest = height - 3;
    let start_row = rng.gen_range(lowest..=highest);

    // Carve the tunnel one column at a time, drifting up or down
    let mut path = Vec::with_capacity(width);
    let mut row = start_row;
    for col in 0..width {
        path.push(row);
        for r in row - 1..=row + 1 {
            grid.set(col, r, Tile::Floor);
        }
        // Occasional chamber
        if rng.gen_ratio(1, 8) {
            let top = row.saturating_sub(2).max(1);
            let bottom = (row + 2).min(height - 2);
            for r in top..=bottom {
                grid.set(col, r, Tile::Floor);
            }
        }
        if col > 1 && col < width - 2 {
            match rng.gen_range(0..3) {
                0 if row > lowest => row -= 1,
                1 if row < highest => row += 1,
                _ => {}
            }
        }
    }
    grid.set(0, start_row, Tile::Start);

    let spawns = place_creatures(index, &path, rng);
    tracing::debug!(
        "Generated dungeon {} ({}x{}), start row {}, {} creatures",
        index,
        width,
        height,
        start_row,
        spawns.len()
    );

    GeneratedDungeon {
        grid,
        start_row,
        spawns,
    }
}

fn place_creatures(index: u32, path: &[usize], rng: &mut impl Rng) -> Vec<CreatureSpawn> {
    let count = index as usize * DUNGEON_CREATURES_PER_INDEX + DUNGEON_BASE_CREATURES;
    let rank = (index * DUNGEON_RANK_PER_INDEX).max(1);

    // Keep clear of both portals
    let margin = DUNGEON_EDGE_MARGIN * 2;
    let mut columns: Vec<usize> = (margin..path.len().saturating_sub(margin)).collect();
    columns.shuffle(rng);

    columns
        .into_iter()
        .take(count)
        .map(|col| CreatureSpawn {
            name: DUNGEON_CREATURE_NAMES
                .choose(rng)
                .copied()
                .unwrap_or("Cave Bat")
                .to_string(),
            x: col as i32 * TILE_SIZE + TILE_SIZE / 2,
            y: path[col] as i32 * TILE_SIZE,
            rank,
        })
        .collect()
}
