use serde::{Deserialize, Serialize};

/// The three core stats shared by every mob and every item bonus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Vitality,
    Intelligence,
    Dexterity,
}

impl AttributeType {
    pub fn all() -> [AttributeType; 3] {
        [
            AttributeType::Vitality,
            AttributeType::Intelligence,
            AttributeType::Dexterity,
        ]
    }

    pub fn abbrev(&self) -> &str {
        match self {
            AttributeType::Vitality => "VIT",
            AttributeType::Intelligence => "INT",
            AttributeType::Dexterity => "DEX",
        }
    }
}

/// Vitality, intelligence and dexterity as one value type.
///
/// Used both for a mob's current stats and for the additive bonus an item
/// grants while equipped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub vitality: u32,
    pub intelligence: u32,
    pub dexterity: u32,
}

impl Stats {
    pub fn new(vitality: u32, intelligence: u32, dexterity: u32) -> Self {
        Self {
            vitality,
            intelligence,
            dexterity,
        }
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        match attr {
            AttributeType::Vitality => self.vitality,
            AttributeType::Intelligence => self.intelligence,
            AttributeType::Dexterity => self.dexterity,
        }
    }

    pub fn increment(&mut self, attr: AttributeType) {
        let value = match attr {
            AttributeType::Vitality => &mut self.vitality,
            AttributeType::Intelligence => &mut self.intelligence,
            AttributeType::Dexterity => &mut self.dexterity,
        };
        *value = value.saturating_add(1);
    }

    /// Adds an item bonus.
    pub fn add(&mut self, bonus: &Stats) {
        self.vitality += bonus.vitality;
        self.intelligence += bonus.intelligence;
        self.dexterity += bonus.dexterity;
    }

    /// Removes an item bonus previously applied with [`Stats::add`].
    pub fn remove(&mut self, bonus: &Stats) {
        self.vitality = self.vitality.saturating_sub(bonus.vitality);
        self.intelligence = self.intelligence.saturating_sub(bonus.intelligence);
        self.dexterity = self.dexterity.saturating_sub(bonus.dexterity);
    }

    pub fn total(&self) -> u32 {
        self.vitality + self.intelligence + self.dexterity
    }
}
