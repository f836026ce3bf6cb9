//! Tile maps, the entity store and level construction.

pub mod assets;
pub mod generation;
#[allow(clippy::module_inception)]
pub mod level;
pub mod tiles;
pub mod world;

pub use assets::{AssetProvider, BuiltinAssets, MainSpawn, SpawnKind};
pub use generation::{generate_dungeon, CreatureSpawn, GeneratedDungeon};
pub use level::{Level, LevelId, LevelKind};
pub use tiles::{AssetError, Tile, TileGrid};
pub use world::{move_body, World};
