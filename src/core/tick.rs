//! Events produced by one session tick or menu command.
//!
//! The front end maps these to sounds, log lines and UI changes. The
//! session never touches presentation types directly.

use crate::abilities::AbilityId;
use crate::character::AttributeType;
use crate::combat::Side;
use crate::core::session::SessionMode;
use crate::items::{Item, ItemCategory};
use crate::level::LevelId;

/// Named fire-and-forget sound cues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundEffect {
    Equip,
    Unequip,
    LootPickup,
    /// Cast sound of a player ability.
    Ability(String),
}

impl SoundEffect {
    pub fn cue(&self) -> &str {
        match self {
            SoundEffect::Equip => "world/equip",
            SoundEffect::Unequip => "world/unequip",
            SoundEffect::LootPickup => "world/pick",
            SoundEffect::Ability(cue) => cue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    // ── Session ─────────────────────────────────────────────────
    ModeChanged {
        from: SessionMode,
        to: SessionMode,
    },
    /// Background music should start. Emitted once per game.
    MusicStarted,

    // ── Exploration ─────────────────────────────────────────────
    LevelTransfer {
        from: LevelId,
        to: LevelId,
    },
    /// A health pad healed the player.
    Healed { amount: u32 },

    // ── Combat ──────────────────────────────────────────────────
    CombatStarted { creature: String, boss: bool },
    AbilityUsed {
        side: Side,
        ability: AbilityId,
        name: String,
        amount: u32,
    },
    /// A side lost its action to a stun.
    ActionLost { side: Side },
    DamageOverTime { target: Side, damage: u32 },
    CombatEnded { winner: Side },

    // ── Rewards and inventory ───────────────────────────────────
    LootDropped { item: Item },
    LootPickedUp { item: Item, slot: usize },
    RankUp { rank: u32 },
    Equipped { slot: usize },
    Unequipped { category: ItemCategory },
    ItemDropped { slot: usize },
    AttributeSpent { attribute: AttributeType },

    Sound(SoundEffect),
}

/// Everything that happened during one tick, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn extend(&mut self, other: TickResult) {
        self.events.extend(other.events);
    }

    pub fn sounds(&self) -> impl Iterator<Item = &SoundEffect> {
        self.events.iter().filter_map(|event| match event {
            TickEvent::Sound(sound) => Some(sound),
            _ => None,
        })
    }

    /// The last mode this tick switched to, if any.
    pub fn new_mode(&self) -> Option<SessionMode> {
        self.events.iter().rev().find_map(|event| match event {
            TickEvent::ModeChanged { to, .. } => Some(*to),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounds_filters_events() {
        let mut result = TickResult::new();
        result.push(TickEvent::MusicStarted);
        result.push(TickEvent::Sound(SoundEffect::Equip));
        result.push(TickEvent::Healed { amount: 3 });
        result.push(TickEvent::Sound(SoundEffect::Ability(
            "combat/knight/strike".to_string(),
        )));
        let cues: Vec<&str> = result.sounds().map(|s| s.cue()).collect();
        assert_eq!(cues, vec!["world/equip", "combat/knight/strike"]);
    }

    #[test]
    fn test_new_mode_reports_last_transition() {
        let mut result = TickResult::new();
        assert_eq!(result.new_mode(), None);
        result.push(TickEvent::ModeChanged {
            from: SessionMode::Start,
            to: SessionMode::Classes,
        });
        result.push(TickEvent::ModeChanged {
            from: SessionMode::Classes,
            to: SessionMode::Running,
        });
        assert_eq!(result.new_mode(), Some(SessionMode::Running));
    }
}
