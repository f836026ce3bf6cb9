use super::types::{Item, ItemCategory};
use crate::core::constants::{LOOT_STAT_ROLL_MAX, LOOT_SUFFIX};
use rand::Rng;

/// Loot table: each category is equally likely.
pub const LOOT_TABLE: [ItemCategory; 5] = [
    ItemCategory::Helmet,
    ItemCategory::Chest,
    ItemCategory::Legs,
    ItemCategory::Shield,
    ItemCategory::Weapon,
];

pub fn roll_category(rng: &mut impl Rng) -> ItemCategory {
    LOOT_TABLE[rng.gen_range(0..LOOT_TABLE.len())]
}

/// Rolls the item dropped by a defeated creature of `rank`.
///
/// The category is rolled first, then dexterity, intelligence and vitality
/// offsets in `[0, 3)`, each added to the creature's rank.
pub fn roll_loot(rank: u32, rng: &mut impl Rng) -> Item {
    let category = roll_category(rng);
    let dex = rank + rng.gen_range(0..LOOT_STAT_ROLL_MAX);
    let int = rank + rng.gen_range(0..LOOT_STAT_ROLL_MAX);
    let vit = rank + rng.gen_range(0..LOOT_STAT_ROLL_MAX);
    Item::new(category, LOOT_SUFFIX, dex, int, vit)
}
