// Tick and timing
pub const TICKS_PER_SECOND: u32 = 60;
pub const FRAME_POLL_MS: u64 = 16;

// Geometry: entity coordinates are in pixels, 8 pixels per tile
pub const TILE_SIZE: i32 = 8;
pub const TILE_SHIFT: i32 = 3;
pub const INTERACTION_BOX: i32 = 8;

// Player defaults
pub const PLAYER_START_X: i32 = 16;
pub const PLAYER_BASE_VITALITY: u32 = 10;
pub const PLAYER_BASE_INTELLIGENCE: u32 = 1;
pub const PLAYER_BASE_DEXTERITY: u32 = 1;
pub const PLAYER_BASE_HEALTH: u32 = 20;
pub const INVENTORY_SIZE: usize = 6;
pub const NUM_EQUIPMENT_SLOTS: usize = 5;
pub const NUM_ABILITY_SLOTS: usize = 4;

// Progression
pub const XP_PER_RANK: u32 = 100;
pub const RANK_UP_ATTRIBUTE_POINTS: u32 = 3;
pub const RANK_UP_HEALTH_GAIN: u32 = 2;
pub const MAX_HEALTH_CAP: u32 = 40;

// Combat rewards (flat regardless of creature rank)
pub const KILL_XP_REWARD: u32 = 20;
pub const LOOT_STAT_ROLL_MAX: u32 = 3;
pub const LOOT_SUFFIX: &str = "Of doom!";

// Combat arena placement
pub const ARENA_EDGE_OFFSET: i32 = 24;
pub const ARENA_EXIT_X: i32 = 154;

// Level transfer thresholds (pixels)
pub const DUNGEON1_ENTRY_MIN_X: i32 = 520;
pub const DUNGEON1_ENTRY_MAX_X: i32 = 528;
pub const DUNGEON2_ENTRY_MIN_X: i32 = 1192;
pub const DUNGEON2_ENTRY_MAX_X: i32 = 1200;
pub const DUNGEON_EAST_EXIT_X: i32 = 506;
pub const DUNGEON_WEST_EXIT_X: i32 = 8;
pub const DUNGEON_ENTRY_X: i32 = 8;
pub const DUNGEON1_EAST_RETURN_X: i32 = 672;
pub const DUNGEON1_WEST_RETURN_X: i32 = 496;
pub const DUNGEON2_EAST_RETURN_X: i32 = 1344;
pub const DUNGEON2_WEST_RETURN_X: i32 = 1334;

// Procedural dungeons
pub const DUNGEON_WIDTH_TILES: usize = 64;
pub const DUNGEON_DEFAULT_LENGTH: usize = 40;
pub const DUNGEON_MIN_LENGTH: usize = 8;
pub const DUNGEON_RANK_PER_INDEX: u32 = 5;
pub const DUNGEON_CREATURES_PER_INDEX: usize = 3;
pub const DUNGEON_BASE_CREATURES: usize = 2;
pub const DUNGEON_EDGE_MARGIN: usize = 4;

// Main level creature areas
pub const AREA2_RANK: u32 = 5;
pub const AREA3_RANK: u32 = 10;
pub const BOSS_RANK: u32 = 15;

// Health pads
pub const HEALTH_PAD_AMOUNT: u32 = 5;
pub const HEALTH_PAD_RECHARGE_TICKS: u32 = 600;

// Creature scaling
pub const CREATURE_BASE_HEALTH: u32 = 8;
pub const CREATURE_HEALTH_PER_RANK: u32 = 2;
pub const BOSS_HEALTH_MULTIPLIER: u32 = 3;
