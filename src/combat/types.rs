use crate::abilities::AbilityId;
use crate::character::attributes::Stats;
use crate::core::constants::NUM_ABILITY_SLOTS;
use crate::entities::{EntityId, Mob};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Creature,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Creature,
            Side::Creature => Side::Player,
        }
    }
}

/// Damage that lands once per exchange until `remaining` runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOverTime {
    pub ability: AbilityId,
    pub damage: u32,
    pub remaining: u32,
}

/// A mob's transient state for one encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub entity: EntityId,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub stats: Stats,
    pub rank: u32,
    pub abilities: [AbilityId; NUM_ABILITY_SLOTS],
    pub cooldowns: [u32; NUM_ABILITY_SLOTS],
    pub shield: u32,
    pub shield_remaining: u32,
    /// Actions this combatant still has to skip.
    pub stunned: u32,
    pub dots: Vec<DamageOverTime>,
}

impl Combatant {
    pub fn from_mob(entity: EntityId, mob: &Mob) -> Self {
        Self {
            entity,
            name: mob.name.clone(),
            health: mob.health(),
            max_health: mob.max_health(),
            stats: mob.stats,
            rank: mob.rank,
            abilities: mob.abilities,
            cooldowns: mob.cooldowns(),
            shield: 0,
            shield_remaining: 0,
            stunned: 0,
            dots: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_ready(&self, slot: usize) -> bool {
        self.cooldowns.get(slot) == Some(&0)
    }

    pub fn tick_cooldowns(&mut self) {
        for cooldown in &mut self.cooldowns {
            *cooldown = cooldown.saturating_sub(1);
        }
    }

    /// Applies damage to the shield first, then to health. Returns the
    /// health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        if self.shield == 0 {
            self.shield_remaining = 0;
        }
        let lost = (amount - absorbed).min(self.health);
        self.health -= lost;
        lost
    }

    /// Heals up to max health and returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health - self.health);
        self.health += restored;
        restored
    }

    /// Stacks absorption; the longer of the two durations wins.
    pub fn add_shield(&mut self, amount: u32, duration: u32) {
        if amount == 0 {
            return;
        }
        self.shield += amount;
        self.shield_remaining = self.shield_remaining.max(duration.max(1));
    }

    pub fn stun(&mut self, actions: u32) {
        self.stunned = self.stunned.max(actions.max(1));
    }

    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.health * 100 / self.max_health
    }
}

/// The single active encounter between the player and one creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combat {
    pub player: Combatant,
    pub creature: Combatant,
    pub in_combat: bool,
    pub boss: bool,
    pub exchanges: u32,
    pub winner: Option<Side>,
}

impl Combat {
    pub fn new(player: Combatant, creature: Combatant, boss: bool) -> Self {
        Self {
            player,
            creature,
            in_combat: true,
            boss,
            exchanges: 0,
            winner: None,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Creature => &self.creature,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Creature => &mut self.creature,
        }
    }

    /// `(acting side, its opponent)`.
    pub fn pair_mut(&mut self, side: Side) -> (&mut Combatant, &mut Combatant) {
        match side {
            Side::Player => (&mut self.player, &mut self.creature),
            Side::Creature => (&mut self.creature, &mut self.player),
        }
    }
}

/// What happened during one exchange, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    AbilityUsed {
        side: Side,
        slot: usize,
        ability: AbilityId,
        amount: u32,
    },
    /// The side lost its action to a stun.
    Stunned { side: Side },
    /// The side asked for a slot that was still cooling down.
    OnCooldown { side: Side, slot: usize },
    DamageOverTime {
        target: Side,
        ability: AbilityId,
        damage: u32,
    },
    ShieldExpired { side: Side },
    Ended { winner: Side },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combatant(health: u32) -> Combatant {
        let mut mob = Mob::creature("Orc", 1);
        mob.set_health(health);
        Combatant::from_mob(EntityId(1), &mob)
    }

    #[test]
    fn test_shield_absorbs_before_health() {
        let mut c = combatant(10);
        c.add_shield(3, 1);
        assert_eq!(c.take_damage(5), 2);
        assert_eq!(c.shield, 0);
        assert_eq!(c.shield_remaining, 0);
        assert_eq!(c.health, 8);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut c = combatant(4);
        assert_eq!(c.take_damage(100), 4);
        assert_eq!(c.health, 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut c = combatant(5);
        let missing = c.max_health - 5;
        assert_eq!(c.heal(1000), missing);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_stun_takes_at_least_one_action() {
        let mut c = combatant(5);
        c.stun(0);
        assert_eq!(c.stunned, 1);
        c.stun(3);
        assert_eq!(c.stunned, 3);
        c.stun(1);
        assert_eq!(c.stunned, 3);
    }

    #[test]
    fn test_cooldowns_copied_from_mob() {
        let mut mob = Mob::creature("Orc", 1);
        mob.set_cooldowns([0, 0, 4, 0]);
        let mut c = Combatant::from_mob(EntityId(1), &mob);
        assert!(!c.is_ready(2));
        assert!(c.is_ready(0));
        assert!(!c.is_ready(7));
        c.tick_cooldowns();
        assert_eq!(c.cooldowns[2], 3);
    }
}
