use crate::abilities::*;
use crate::items::{Item, ItemCategory};
use serde::{Deserialize, Serialize};

/// Four-entry sprite palette. Each entry is a 6-level RGB triple written as
/// three decimal digits (`543` = r5 g4 b3); `-1` is transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(pub [i32; 4]);

impl Palette {
    pub const STANDARD: Palette = Palette([-1, 111, 145, 543]);

    /// Converts one palette entry to 8-bit RGB, `None` when transparent.
    pub fn rgb(&self, index: usize) -> Option<(u8, u8, u8)> {
        let code = *self.0.get(index)?;
        if code < 0 {
            return None;
        }
        let level = |digit: i32| ((digit % 10).min(5) * 255 / 5) as u8;
        Some((level(code / 100), level(code / 10), level(code)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Knight,
    Wizard,
    Hunter,
}

impl PlayerClass {
    pub fn all() -> [PlayerClass; 3] {
        [PlayerClass::Knight, PlayerClass::Wizard, PlayerClass::Hunter]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Knight => "Knight",
            PlayerClass::Wizard => "Wizard",
            PlayerClass::Hunter => "Hunter",
        }
    }

    pub fn abilities(&self) -> [AbilityId; 4] {
        match self {
            PlayerClass::Knight => [STRIKE, SHIELD_BASH, DIVINE_CALL, HOLY_SMITE],
            PlayerClass::Wizard => [BONK, SCORCH, FIRE_WALL, KABOOM],
            PlayerClass::Hunter => [STAB, KNIFE_THROW, SMOKE_BOMB, MARK],
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            PlayerClass::Knight => Palette([-1, 111, 250, 543]),
            PlayerClass::Wizard => Palette([-1, 500, 0, 543]),
            PlayerClass::Hunter => Palette([-1, 0, 300, 543]),
        }
    }

    /// Gear placed in the first two inventory slots on class selection.
    pub fn starting_items(&self) -> [Item; 2] {
        match self {
            PlayerClass::Knight => [
                Item::new(ItemCategory::Weapon, "Standard", 5, 4, 6),
                Item::new(ItemCategory::Shield, "Standard", 5, 4, 6),
            ],
            PlayerClass::Wizard => [
                Item::new(ItemCategory::Helmet, "Standard", 5, 6, 4),
                Item::new(ItemCategory::Weapon, "Standard", 5, 6, 4),
            ],
            PlayerClass::Hunter => [
                Item::new(ItemCategory::Legs, "Standard", 6, 5, 5),
                Item::new(ItemCategory::Weapon, "Standard", 6, 5, 5),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_class_has_distinct_loadout() {
        let knight = PlayerClass::Knight.abilities();
        let wizard = PlayerClass::Wizard.abilities();
        let hunter = PlayerClass::Hunter.abilities();
        assert_eq!(knight[0], STRIKE);
        assert_eq!(wizard[0], BONK);
        assert_eq!(hunter[0], STAB);
        assert!(knight.iter().all(|id| !wizard.contains(id) && !hunter.contains(id)));
    }

    #[test]
    fn test_class_abilities_exist_in_catalog() {
        let catalog = AbilityCatalog::standard().unwrap();
        for class in PlayerClass::all() {
            for id in class.abilities() {
                assert!(catalog.get(id).is_some());
            }
        }
    }

    #[test]
    fn test_palette_rgb() {
        let palette = PlayerClass::Knight.palette();
        assert_eq!(palette.rgb(0), None);
        assert_eq!(palette.rgb(1), Some((51, 51, 51)));
        assert_eq!(palette.rgb(3), Some((255, 204, 153)));
        assert_eq!(palette.rgb(7), None);
    }

    #[test]
    fn test_starting_items() {
        let [first, second] = PlayerClass::Hunter.starting_items();
        assert_eq!(first.category, ItemCategory::Legs);
        assert_eq!(second.category, ItemCategory::Weapon);
        assert_eq!(first.bonus.dexterity, 6);
    }
}
