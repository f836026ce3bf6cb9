use super::types::{Item, ItemCategory};
use crate::core::constants::INVENTORY_SIZE;
use serde::{Deserialize, Serialize};

/// Player equipment slots, one per item category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub helmet: Option<Item>,
    pub chest: Option<Item>,
    pub legs: Option<Item>,
    pub weapon: Option<Item>,
    pub shield: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: ItemCategory) -> &Option<Item> {
        match category {
            ItemCategory::Helmet => &self.helmet,
            ItemCategory::Chest => &self.chest,
            ItemCategory::Legs => &self.legs,
            ItemCategory::Weapon => &self.weapon,
            ItemCategory::Shield => &self.shield,
        }
    }

    fn slot_mut(&mut self, category: ItemCategory) -> &mut Option<Item> {
        match category {
            ItemCategory::Helmet => &mut self.helmet,
            ItemCategory::Chest => &mut self.chest,
            ItemCategory::Legs => &mut self.legs,
            ItemCategory::Weapon => &mut self.weapon,
            ItemCategory::Shield => &mut self.shield,
        }
    }

    /// Puts `item` into its category slot and returns what was there.
    pub fn replace(&mut self, item: Item) -> Option<Item> {
        self.slot_mut(item.category).replace(item)
    }

    pub fn take(&mut self, category: ItemCategory) -> Option<Item> {
        self.slot_mut(category).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.helmet,
            &self.chest,
            &self.legs,
            &self.weapon,
            &self.shield,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }
}

/// Fixed-size bag of generic item slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: [Option<Item>; INVENTORY_SIZE],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// Stores `item` in the first free slot, handing it back when full.
    pub fn insert(&mut self, item: Item) -> Result<usize, Item> {
        match self.first_free() {
            Some(index) => {
                self.slots[index] = Some(item);
                Ok(index)
            }
            None => Err(item),
        }
    }

    pub fn take(&mut self, index: usize) -> Option<Item> {
        self.slots.get_mut(index).and_then(|slot| slot.take())
    }

    /// Writes `item` into `index` and returns the previous occupant.
    /// Out-of-range indices hand the item back untouched.
    pub fn put(&mut self, index: usize, item: Item) -> Result<Option<Item>, Item> {
        match self.slots.get_mut(index) {
            Some(slot) => Ok(slot.replace(item)),
            None => Err(item),
        }
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Item>> {
        self.slots.iter().map(|slot| slot.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(category: ItemCategory) -> Item {
        Item::new(category, "Test", 1, 1, 1)
    }

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert!(eq.weapon.is_none());
        assert_eq!(eq.iter_equipped().count(), 0);
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut eq = Equipment::new();
        assert!(eq.replace(create_test_item(ItemCategory::Helmet)).is_none());
        let mut better = create_test_item(ItemCategory::Helmet);
        better.suffix = "Better".to_string();
        let old = eq.replace(better).unwrap();
        assert_eq!(old.suffix, "Test");
        assert_eq!(eq.get(ItemCategory::Helmet).as_ref().unwrap().suffix, "Better");
        assert_eq!(eq.iter_equipped().count(), 1);
    }

    #[test]
    fn test_equip_all_five_slots() {
        let mut eq = Equipment::new();
        for category in ItemCategory::slots() {
            eq.replace(create_test_item(category));
        }
        assert_eq!(eq.iter_equipped().count(), 5);
        for category in ItemCategory::slots() {
            assert!(eq.get(category).is_some(), "{:?} should be equipped", category);
        }
    }

    #[test]
    fn test_inventory_insert_uses_first_free_slot() {
        let mut inv = Inventory::new();
        assert_eq!(inv.insert(create_test_item(ItemCategory::Legs)), Ok(0));
        assert_eq!(inv.insert(create_test_item(ItemCategory::Chest)), Ok(1));
        inv.take(0);
        assert_eq!(inv.insert(create_test_item(ItemCategory::Shield)), Ok(0));
        assert_eq!(inv.count(), 2);
    }

    #[test]
    fn test_inventory_full_returns_item() {
        let mut inv = Inventory::new();
        for _ in 0..INVENTORY_SIZE {
            assert!(inv.insert(create_test_item(ItemCategory::Legs)).is_ok());
        }
        let rejected = inv.insert(create_test_item(ItemCategory::Weapon));
        assert_eq!(rejected, Err(create_test_item(ItemCategory::Weapon)));
        assert_eq!(inv.count(), INVENTORY_SIZE);
    }

    #[test]
    fn test_inventory_out_of_range_is_harmless() {
        let mut inv = Inventory::new();
        assert!(inv.get(99).is_none());
        assert!(inv.take(99).is_none());
        assert!(inv.put(99, create_test_item(ItemCategory::Legs)).is_err());
        assert_eq!(inv.count(), 0);
    }
}
