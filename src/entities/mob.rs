use crate::abilities::{AbilityId, BOSS_LOADOUT, CREATURE_LOADOUT};
use crate::character::attributes::Stats;
use crate::core::constants::{
    BOSS_HEALTH_MULTIPLIER, CREATURE_BASE_HEALTH, CREATURE_HEALTH_PER_RANK, NUM_ABILITY_SLOTS,
};
use serde::{Deserialize, Serialize};

/// Health-bearing combat data shared by the player and creatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mob {
    pub name: String,
    health: u32,
    max_health: u32,
    pub rank: u32,
    pub stats: Stats,
    pub abilities: [AbilityId; NUM_ABILITY_SLOTS],
    cooldowns: [u32; NUM_ABILITY_SLOTS],
    pub alive: bool,
    pub boss: bool,
}

impl Mob {
    pub fn new(name: &str, stats: Stats, max_health: u32, abilities: [AbilityId; 4]) -> Self {
        Self {
            name: name.to_string(),
            health: max_health,
            max_health,
            rank: 1,
            stats,
            abilities,
            cooldowns: [0; NUM_ABILITY_SLOTS],
            alive: true,
            boss: false,
        }
    }

    /// A hostile creature whose stats and health scale with `rank`.
    pub fn creature(name: &str, rank: u32) -> Self {
        let mut mob = Self::new(
            name,
            creature_stats(rank),
            creature_health(rank),
            CREATURE_LOADOUT,
        );
        mob.rank = rank;
        mob
    }

    /// A boss: creature scaling with tripled health and the boss loadout.
    pub fn boss(name: &str, rank: u32) -> Self {
        let mut mob = Self::new(
            name,
            creature_stats(rank),
            creature_health(rank) * BOSS_HEALTH_MULTIPLIER,
            BOSS_LOADOUT,
        );
        mob.rank = rank;
        mob.boss = true;
        mob
    }

    /// Re-ranks a creature, rescaling its stats and refilling its health.
    pub fn set_rank(&mut self, rank: u32) {
        self.rank = rank;
        self.stats = creature_stats(rank);
        let multiplier = if self.boss { BOSS_HEALTH_MULTIPLIER } else { 1 };
        self.max_health = creature_health(rank) * multiplier;
        self.health = self.max_health;
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Sets current health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
        self.alive = self.health > 0;
    }

    /// Raises max health; current health is untouched.
    pub fn grow_max_health(&mut self, amount: u32) {
        self.max_health += amount;
    }

    /// Heals up to max health and returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.set_health(self.health.saturating_add(amount));
        self.health - before
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.set_health(self.health.saturating_sub(amount));
    }

    pub fn cooldown(&self, slot: usize) -> u32 {
        self.cooldowns.get(slot).copied().unwrap_or(0)
    }

    pub fn cooldowns(&self) -> [u32; NUM_ABILITY_SLOTS] {
        self.cooldowns
    }

    /// Carries cooldowns left over from an encounter back onto the mob.
    pub fn set_cooldowns(&mut self, cooldowns: [u32; NUM_ABILITY_SLOTS]) {
        self.cooldowns = cooldowns;
    }

    /// Decrements every non-zero cooldown by one.
    pub fn tick_cooldowns(&mut self) {
        for cooldown in &mut self.cooldowns {
            *cooldown = cooldown.saturating_sub(1);
        }
    }
}

fn creature_stats(rank: u32) -> Stats {
    Stats::new(5 + rank, 1 + rank / 2, 1 + rank / 2)
}

fn creature_health(rank: u32) -> u32 {
    CREATURE_BASE_HEALTH + CREATURE_HEALTH_PER_RANK * rank
}
