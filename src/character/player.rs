use super::attributes::Stats;
use super::class::{Palette, PlayerClass};
use crate::abilities::STRIKE;
use crate::core::constants::{
    NUM_EQUIPMENT_SLOTS, PLAYER_BASE_DEXTERITY, PLAYER_BASE_HEALTH, PLAYER_BASE_INTELLIGENCE,
    PLAYER_BASE_VITALITY,
};
use crate::entities::{Body, EntityId, Mob};
use crate::items::{Equipment, Inventory, Item, ItemCategory};
use crate::level::LevelId;
use serde::{Deserialize, Serialize};

/// The player-controlled mob with inventory, equipment and progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub mob: Mob,
    pub class: Option<PlayerClass>,
    pub palette: Palette,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub attribute_points: u32,
    pub experience: u32,
    pub kills: u32,
    /// Coordinates to return to after a combat excursion.
    pub main_x: i32,
    pub main_y: i32,
    /// Level to return to after a combat excursion.
    pub prev_level: Option<LevelId>,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            id: EntityId::PLAYER,
            body: Body::new(x, y),
            mob: Mob::new(
                "Player",
                Stats::new(
                    PLAYER_BASE_VITALITY,
                    PLAYER_BASE_INTELLIGENCE,
                    PLAYER_BASE_DEXTERITY,
                ),
                PLAYER_BASE_HEALTH,
                [STRIKE; 4],
            ),
            class: None,
            palette: Palette::STANDARD,
            inventory: Inventory::new(),
            equipment: Equipment::new(),
            attribute_points: 0,
            experience: 0,
            kills: 0,
            main_x: x,
            main_y: y,
            prev_level: None,
        }
    }

    /// Applies a class: ability loadout, palette and starting gear.
    pub fn apply_class(&mut self, class: PlayerClass) {
        self.class = Some(class);
        self.palette = class.palette();
        self.mob.abilities = class.abilities();
        for item in class.starting_items() {
            if let Err(item) = self.inventory.insert(item) {
                tracing::warn!("No room for starting item {}", item.display_name());
            }
        }
    }

    pub fn class_name(&self) -> &'static str {
        self.class.map(|c| c.name()).unwrap_or("Standard")
    }

    pub fn add_kill(&mut self) {
        self.kills += 1;
    }

    /// Equips the item in inventory slot `index`.
    ///
    /// An item already in that equipment slot swaps into the vacated
    /// inventory slot. Empty or out-of-range slots are ignored.
    pub fn equip(&mut self, index: usize) -> bool {
        let Some(item) = self.inventory.take(index) else {
            return false;
        };
        let bonus = item.bonus;
        if let Some(previous) = self.equipment.replace(item) {
            self.mob.stats.remove(&previous.bonus);
            let displaced = self.inventory.put(index, previous);
            debug_assert!(matches!(displaced, Ok(None)));
        }
        self.mob.stats.add(&bonus);
        true
    }

    /// Moves the equipped item of `category` to the first free inventory slot.
    pub fn unequip(&mut self, category: ItemCategory) -> bool {
        if self.equipment.get(category).is_none() || self.inventory.first_free().is_none() {
            return false;
        }
        let Some(item) = self.equipment.take(category) else {
            return false;
        };
        self.mob.stats.remove(&item.bonus);
        match self.inventory.insert(item) {
            Ok(_) => true,
            Err(item) => {
                // Unreachable: a free slot was checked above
                self.mob.stats.add(&item.bonus);
                self.equipment.replace(item);
                false
            }
        }
    }

    /// Destroys the item in a menu slot: 0-4 are equipment (helmet, chest,
    /// legs, weapon, shield), 5-10 are inventory slots 0-5.
    pub fn drop(&mut self, slot: usize) -> bool {
        if slot < NUM_EQUIPMENT_SLOTS {
            let category = ItemCategory::slots()[slot];
            match self.equipment.take(category) {
                Some(item) => {
                    self.mob.stats.remove(&item.bonus);
                    true
                }
                None => false,
            }
        } else {
            self.inventory.take(slot - NUM_EQUIPMENT_SLOTS).is_some()
        }
    }

    /// Puts a picked-up item in the first free inventory slot.
    pub fn pick_up(&mut self, item: Item) -> Result<usize, Item> {
        self.inventory.insert(item)
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        self.mob.heal(amount)
    }

    /// Total items held across inventory and equipment.
    pub fn item_count(&self) -> usize {
        self.inventory.count() + self.equipment.iter_equipped().count()
    }
}
