use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tile kinds and their collision class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Outside the map. Solid.
    Void,
    Stone,
    Grass,
    Water,
    Sand,
    Floor,
    Wall,
    /// Marks a dungeon entry row. Walkable.
    Start,
}

impl Tile {
    pub fn is_solid(&self) -> bool {
        matches!(self, Tile::Void | Tile::Stone | Tile::Wall)
    }

    pub fn is_swimmable(&self) -> bool {
        matches!(self, Tile::Water)
    }

    pub fn symbol(&self) -> char {
        match self {
            Tile::Void => ' ',
            Tile::Stone => '#',
            Tile::Grass => '.',
            Tile::Water => '~',
            Tile::Sand => ':',
            Tile::Floor => '_',
            Tile::Wall => '=',
            Tile::Start => 'S',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Tile> {
        match symbol {
            ' ' => Some(Tile::Void),
            '#' => Some(Tile::Stone),
            '.' => Some(Tile::Grass),
            '~' => Some(Tile::Water),
            ':' => Some(Tile::Sand),
            '_' => Some(Tile::Floor),
            '=' => Some(Tile::Wall),
            'S' => Some(Tile::Start),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("map is empty")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile '{symbol}' at row {row}, column {col}")]
    UnknownTile { symbol: char, row: usize, col: usize },
}

/// Rectangular grid of tiles, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    /// Parses a file-authored map, one character per tile.
    pub fn from_ascii(text: &str) -> Result<Self, AssetError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map(|r| r.chars().count()).ok_or(AssetError::Empty)?;

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(AssetError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let tile =
                    Tile::from_symbol(symbol).ok_or(AssetError::UnknownTile { symbol, row, col })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at tile coordinates; anything outside the grid is `Void`.
    pub fn get(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Tile::Void;
        }
        self.tiles[y as usize * self.width + x as usize]
    }

    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile;
        }
    }

    /// One string per row, using tile symbols.
    pub fn to_ascii(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(Tile::symbol).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_classes() {
        assert!(Tile::Void.is_solid());
        assert!(Tile::Stone.is_solid());
        assert!(Tile::Wall.is_solid());
        assert!(!Tile::Grass.is_solid());
        assert!(!Tile::Water.is_solid());
        assert!(!Tile::Start.is_solid());
        assert!(Tile::Water.is_swimmable());
        assert!(!Tile::Grass.is_swimmable());
    }

    #[test]
    fn test_symbol_round_trip_for_every_tile() {
        for tile in [
            Tile::Void,
            Tile::Stone,
            Tile::Grass,
            Tile::Water,
            Tile::Sand,
            Tile::Floor,
            Tile::Wall,
            Tile::Start,
        ] {
            assert_eq!(Tile::from_symbol(tile.symbol()), Some(tile));
        }
    }

    #[test]
    fn test_from_ascii() {
        let grid = TileGrid::from_ascii("###\n#.~\n###\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 1), Tile::Grass);
        assert_eq!(grid.get(2, 1), Tile::Water);
        assert_eq!(grid.to_ascii(), vec!["###", "#.~", "###"]);
    }

    #[test]
    fn test_from_ascii_errors() {
        assert_eq!(TileGrid::from_ascii(""), Err(AssetError::Empty));
        assert_eq!(
            TileGrid::from_ascii("##\n#\n"),
            Err(AssetError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            TileGrid::from_ascii("#?\n"),
            Err(AssetError::UnknownTile {
                symbol: '?',
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn test_out_of_bounds_is_void() {
        let grid = TileGrid::filled(2, 2, Tile::Grass);
        assert_eq!(grid.get(-1, 0), Tile::Void);
        assert_eq!(grid.get(0, 2), Tile::Void);
        assert_eq!(grid.get(1, 1), Tile::Grass);
    }
}
