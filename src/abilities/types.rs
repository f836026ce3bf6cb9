use crate::character::attributes::Stats;
use serde::{Deserialize, Serialize};

/// Small integer key of an ability in the catalog.
pub type AbilityId = u8;

/// Which value an ability's magnitude grows with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingStat {
    None,
    Vitality,
    Intelligence,
    Dexterity,
    Rank,
}

/// Scaling rule: one extra point of magnitude per `divisor` points of `stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scaling {
    pub stat: ScalingStat,
    pub divisor: u32,
}

impl Scaling {
    pub const NONE: Scaling = Scaling {
        stat: ScalingStat::None,
        divisor: 0,
    };

    pub fn new(stat: ScalingStat, divisor: u32) -> Self {
        Self { stat, divisor }
    }

    /// Integer bonus added on top of an ability's base value.
    ///
    /// A zero divisor disables scaling.
    pub fn bonus(&self, stats: &Stats, rank: u32) -> u32 {
        if self.divisor == 0 {
            return 0;
        }
        let source = match self.stat {
            ScalingStat::None => return 0,
            ScalingStat::Vitality => stats.vitality,
            ScalingStat::Intelligence => stats.intelligence,
            ScalingStat::Dexterity => stats.dexterity,
            ScalingStat::Rank => rank,
        };
        source / self.divisor
    }
}

/// Per-variant payload of an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityEffect {
    /// Hits the opponent. With `duration > 0` the damage lands once per
    /// exchange for `duration` exchanges instead of immediately.
    Offensive {
        damage: u32,
        stun: bool,
        duration: u32,
    },
    /// Heals and/or shields the caster. Shields last `duration` exchanges.
    Defensive {
        heal: u32,
        shield: u32,
        duration: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub cooldown: u32,
    pub scaling: Scaling,
    pub effect: AbilityEffect,
    /// Sound cue emitted when the player casts this ability.
    #[serde(default)]
    pub sound: Option<String>,
}

impl Ability {
    pub fn offensive(
        id: AbilityId,
        name: &str,
        cooldown: u32,
        damage: u32,
        scaling: Scaling,
        stun: bool,
        duration: u32,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            cooldown,
            scaling,
            effect: AbilityEffect::Offensive {
                damage,
                stun,
                duration,
            },
            sound: None,
        }
    }

    pub fn defensive(
        id: AbilityId,
        name: &str,
        cooldown: u32,
        heal: u32,
        shield: u32,
        scaling: Scaling,
        duration: u32,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            cooldown,
            scaling,
            effect: AbilityEffect::Defensive {
                heal,
                shield,
                duration,
            },
            sound: None,
        }
    }

    pub fn with_sound(mut self, cue: &str) -> Self {
        self.sound = Some(cue.to_string());
        self
    }

    pub fn is_offensive(&self) -> bool {
        matches!(self.effect, AbilityEffect::Offensive { .. })
    }

    /// `base + floor(stat / divisor)` for the given base value.
    pub fn scaled(&self, base: u32, stats: &Stats, rank: u32) -> u32 {
        base + self.scaling.bonus(stats, rank)
    }

    /// The headline number of the ability for a caster: damage for offensive
    /// abilities, heal plus shield for defensive ones.
    pub fn magnitude(&self, stats: &Stats, rank: u32) -> u32 {
        match self.effect {
            AbilityEffect::Offensive { damage, .. } => self.scaled(damage, stats, rank),
            AbilityEffect::Defensive { heal, shield, .. } => {
                let heal = if heal > 0 { self.scaled(heal, stats, rank) } else { 0 };
                let shield = if shield > 0 {
                    self.scaled(shield, stats, rank)
                } else {
                    0
                };
                heal + shield
            }
        }
    }
}
