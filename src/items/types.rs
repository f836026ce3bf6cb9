use crate::character::attributes::Stats;
use serde::{Deserialize, Serialize};

/// Equipment category of an item; also names the equipment slot it fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Helmet,
    Chest,
    Legs,
    Weapon,
    Shield,
}

impl ItemCategory {
    /// Equipment slots in menu order (drop slots 0-4).
    pub fn slots() -> [ItemCategory; 5] {
        [
            ItemCategory::Helmet,
            ItemCategory::Chest,
            ItemCategory::Legs,
            ItemCategory::Weapon,
            ItemCategory::Shield,
        ]
    }

    pub fn slot_index(&self) -> usize {
        match self {
            ItemCategory::Helmet => 0,
            ItemCategory::Chest => 1,
            ItemCategory::Legs => 2,
            ItemCategory::Weapon => 3,
            ItemCategory::Shield => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Helmet => "Helmet",
            ItemCategory::Chest => "Chest",
            ItemCategory::Legs => "Legs",
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Shield => "Shield",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub category: ItemCategory,
    pub name: String,
    pub suffix: String,
    pub bonus: Stats,
}

impl Item {
    /// Builds an item from its bonuses in (dexterity, intelligence, vitality)
    /// order, the order loot and starting gear are authored in.
    pub fn new(category: ItemCategory, suffix: &str, dex: u32, int: u32, vit: u32) -> Self {
        Self {
            category,
            name: category.name().to_string(),
            suffix: suffix.to_string(),
            bonus: Stats::new(vit, int, dex),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.suffix)
    }

    /// Short stat summary like "+6 VIT +4 INT +5 DEX".
    pub fn stats_summary(&self) -> String {
        format!(
            "+{} VIT +{} INT +{} DEX",
            self.bonus.vitality, self.bonus.intelligence, self.bonus.dexterity
        )
    }
}
