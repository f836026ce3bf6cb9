//! Immutable ability table, built once at startup.

use super::types::{Ability, AbilityId, Scaling, ScalingStat};
use std::collections::BTreeMap;
use thiserror::Error;

// Knight
pub const STRIKE: AbilityId = 0;
pub const SHIELD_BASH: AbilityId = 1;
pub const DIVINE_CALL: AbilityId = 2;
pub const HOLY_SMITE: AbilityId = 3;
// Wizard
pub const BONK: AbilityId = 4;
pub const SCORCH: AbilityId = 5;
pub const FIRE_WALL: AbilityId = 6;
pub const KABOOM: AbilityId = 7;
// Hunter
pub const STAB: AbilityId = 8;
pub const KNIFE_THROW: AbilityId = 9;
pub const SMOKE_BOMB: AbilityId = 10;
pub const MARK: AbilityId = 11;
// Creatures
pub const CLAW: AbilityId = 12;
pub const BITE: AbilityId = 13;
pub const ROAR: AbilityId = 14;
pub const REGENERATE: AbilityId = 15;
// Boss
pub const CLEAVE: AbilityId = 16;
pub const DARK_PACT: AbilityId = 17;
pub const TERROR: AbilityId = 18;
pub const SOUL_FIRE: AbilityId = 19;

pub const CREATURE_LOADOUT: [AbilityId; 4] = [CLAW, BITE, ROAR, REGENERATE];
pub const BOSS_LOADOUT: [AbilityId; 4] = [CLEAVE, DARK_PACT, TERROR, SOUL_FIRE];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate ability id {0}")]
    DuplicateAbility(AbilityId),
}

/// Every ability known to the process, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct AbilityCatalog {
    abilities: BTreeMap<AbilityId, Ability>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an ability. A second registration under the same id is a
    /// configuration error.
    pub fn register(&mut self, ability: Ability) -> Result<(), CatalogError> {
        if self.abilities.contains_key(&ability.id) {
            return Err(CatalogError::DuplicateAbility(ability.id));
        }
        self.abilities.insert(ability.id, ability);
        Ok(())
    }

    pub fn get(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.get(&id)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.values()
    }

    /// The class, creature and boss abilities used by the game.
    pub fn standard() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for ability in standard_abilities() {
            catalog.register(ability)?;
        }
        tracing::debug!("Ability catalog loaded: {} abilities", catalog.len());
        Ok(catalog)
    }
}

fn standard_abilities() -> Vec<Ability> {
    use ScalingStat::*;

    vec![
        Ability::offensive(STRIKE, "Strike", 1, 1, Scaling::new(Vitality, 10), false, 0)
            .with_sound("combat/knight/strike"),
        Ability::offensive(SHIELD_BASH, "Shield Bash", 6, 1, Scaling::new(Vitality, 15), true, 0)
            .with_sound("combat/knight/shield_bash"),
        Ability::defensive(DIVINE_CALL, "Divine Call", 10, 2, 2, Scaling::new(Intelligence, 20), 1)
            .with_sound("combat/knight/divine_call"),
        Ability::offensive(HOLY_SMITE, "Holy Smite", 12, 10, Scaling::new(Intelligence, 10), false, 0)
            .with_sound("combat/knight/holy_smite"),
        Ability::offensive(BONK, "BONK", 1, 1, Scaling::new(Vitality, 20), false, 0)
            .with_sound("combat/wizard/bonk"),
        Ability::offensive(SCORCH, "Scorch", 4, 1, Scaling::new(Intelligence, 10), false, 4)
            .with_sound("combat/wizard/scorch"),
        Ability::offensive(FIRE_WALL, "Fire Wall", 10, 2, Scaling::new(Intelligence, 10), false, 5)
            .with_sound("combat/wizard/fire_wall"),
        Ability::offensive(KABOOM, "KABOOM", 12, 15, Scaling::new(Intelligence, 10), false, 0)
            .with_sound("combat/wizard/kaboom"),
        Ability::offensive(STAB, "Stab", 1, 1, Scaling::new(Dexterity, 15), false, 0)
            .with_sound("combat/hunter/stab"),
        Ability::offensive(KNIFE_THROW, "Knife Throw", 6, 1, Scaling::new(Dexterity, 5), false, 0)
            .with_sound("combat/hunter/knife_throw"),
        Ability::offensive(SMOKE_BOMB, "Smoke Bomb", 10, 0, Scaling::new(Dexterity, 5), false, 6)
            .with_sound("combat/hunter/smoke_bomb"),
        Ability::offensive(MARK, "Mark", 6, 0, Scaling::new(Dexterity, 5), false, 5)
            .with_sound("combat/hunter/mark"),
        Ability::offensive(CLAW, "Claw", 1, 1, Scaling::new(Vitality, 10), false, 0),
        Ability::offensive(BITE, "Bite", 3, 2, Scaling::new(Rank, 4), false, 0),
        Ability::offensive(ROAR, "Roar", 8, 0, Scaling::NONE, true, 1),
        Ability::defensive(REGENERATE, "Regenerate", 6, 2, 0, Scaling::new(Vitality, 10), 0),
        Ability::offensive(CLEAVE, "Cleave", 2, 3, Scaling::new(Rank, 3), false, 0),
        Ability::defensive(DARK_PACT, "Dark Pact", 8, 3, 3, Scaling::new(Rank, 5), 2),
        Ability::offensive(TERROR, "Terror", 10, 1, Scaling::NONE, true, 1),
        Ability::offensive(SOUL_FIRE, "Soul Fire", 5, 1, Scaling::new(Intelligence, 5), false, 3),
    ]
}
