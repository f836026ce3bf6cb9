//! Read-only view of a session for the front end.

use crate::character::{xp_for_next_rank, Palette, Stats};
use crate::combat::Combatant;
use crate::core::session::{Session, SessionMode};
use crate::entities::{Direction, EntityId, EntityKind};
use crate::items::ItemCategory;
use crate::level::TileGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Creature { boss: bool },
    HealthPad { charged: bool },
    Loot(ItemCategory),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteView {
    pub id: EntityId,
    pub kind: SpriteKind,
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub walk_frame: u32,
    pub swimming: bool,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub class_name: &'static str,
    pub rank: u32,
    pub health: u32,
    pub max_health: u32,
    pub experience: u32,
    pub experience_needed: u32,
    pub kills: u32,
    pub attribute_points: u32,
    pub stats: Stats,
    pub elapsed: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FighterView {
    pub name: String,
    pub rank: u32,
    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub stunned: u32,
}

impl FighterView {
    fn from_combatant(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            rank: combatant.rank,
            health: combatant.health,
            max_health: combatant.max_health,
            shield: combatant.shield,
            stunned: combatant.stunned,
        }
    }
}

/// One ability button of the player during combat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilitySlotView {
    pub name: String,
    pub cooldown: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatView {
    pub player: FighterView,
    pub creature: FighterView,
    pub abilities: Vec<AbilitySlotView>,
    pub exchanges: u32,
    pub boss: bool,
}

/// Final screen contents once the game is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultReport {
    pub victory: bool,
    pub class_name: &'static str,
    pub rank: u32,
    pub kills: u32,
    pub elapsed: String,
}

#[derive(Debug, Clone)]
pub struct SessionSnapshot<'a> {
    pub mode: SessionMode,
    pub level_name: &'a str,
    pub grid: Option<&'a TileGrid>,
    /// Sprites on the player's level in draw order; the player is last.
    pub sprites: Vec<SpriteView>,
    pub hud: HudView,
    pub combat: Option<CombatView>,
    /// Display names of the six inventory slots.
    pub inventory: Vec<Option<String>>,
    pub equipment: Vec<(ItemCategory, Option<String>)>,
    pub report: Option<ResultReport>,
}

/// `m:ss` rendering of a duration in milliseconds.
pub fn format_elapsed(ms: i64) -> String {
    let seconds = ms.max(0) / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub(crate) fn capture(session: &Session, now_ms: i64) -> SessionSnapshot<'_> {
    let world = session.world();
    let player = session.player();
    let level = player.body.level.and_then(|id| world.level(id));

    let mut sprites = Vec::new();
    if let Some(level) = level {
        for id in level.entities() {
            if *id == EntityId::PLAYER {
                continue;
            }
            let Some(entity) = world.entity(*id) else {
                continue;
            };
            let kind = match &entity.kind {
                EntityKind::Creature(mob) => SpriteKind::Creature { boss: mob.boss },
                EntityKind::HealthPad(pad) => SpriteKind::HealthPad {
                    charged: pad.is_charged(),
                },
                EntityKind::Loot(item) => SpriteKind::Loot(item.category),
            };
            sprites.push(SpriteView {
                id: *id,
                kind,
                x: entity.body.x,
                y: entity.body.y,
                direction: entity.body.direction,
                walk_frame: entity.body.walk_frame(),
                swimming: entity.body.is_swimming,
                palette: Palette::STANDARD,
            });
        }
    }
    sprites.push(SpriteView {
        id: EntityId::PLAYER,
        kind: SpriteKind::Player,
        x: player.body.x,
        y: player.body.y,
        direction: player.body.direction,
        walk_frame: player.body.walk_frame(),
        swimming: player.body.is_swimming,
        palette: player.palette,
    });

    let elapsed = format_elapsed(session.elapsed_ms(now_ms));
    let hud = HudView {
        class_name: player.class_name(),
        rank: player.mob.rank,
        health: player.mob.health(),
        max_health: player.mob.max_health(),
        experience: player.experience,
        experience_needed: xp_for_next_rank(player.mob.rank),
        kills: player.kills,
        attribute_points: player.attribute_points,
        stats: player.mob.stats,
        elapsed: elapsed.clone(),
    };

    let combat = session.combat().map(|combat| CombatView {
        player: FighterView::from_combatant(&combat.player),
        creature: FighterView::from_combatant(&combat.creature),
        abilities: combat
            .player
            .abilities
            .iter()
            .zip(combat.player.cooldowns.iter())
            .map(|(id, cooldown)| AbilitySlotView {
                name: session
                    .catalog()
                    .get(*id)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| "?".to_string()),
                cooldown: *cooldown,
            })
            .collect(),
        exchanges: combat.exchanges,
        boss: combat.boss,
    });

    let report = session.victory().map(|victory| ResultReport {
        victory,
        class_name: player.class_name(),
        rank: player.mob.rank,
        kills: player.kills,
        elapsed,
    });

    SessionSnapshot {
        mode: session.mode(),
        level_name: level.map(|l| l.name.as_str()).unwrap_or(""),
        grid: level.map(|l| &l.grid),
        sprites,
        hud,
        combat,
        inventory: player
            .inventory
            .iter()
            .map(|slot| slot.map(|item| item.display_name()))
            .collect(),
        equipment: ItemCategory::slots()
            .into_iter()
            .map(|category| {
                (
                    category,
                    player
                        .equipment
                        .get(category)
                        .as_ref()
                        .map(|item| item.display_name()),
                )
            })
            .collect(),
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityCatalog;
    use crate::character::PlayerClass;
    use crate::core::config::SessionConfig;
    use crate::input::MenuCommand;
    use crate::level::BuiltinAssets;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(59_999), "0:59");
        assert_eq!(format_elapsed(61_000), "1:01");
        assert_eq!(format_elapsed(3_600_000), "60:00");
        assert_eq!(format_elapsed(-5), "0:00");
    }

    #[test]
    fn test_snapshot_of_new_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let catalog = Arc::new(AbilityCatalog::standard().unwrap());
        let mut session =
            Session::new(SessionConfig::default(), catalog, &BuiltinAssets, &mut rng).unwrap();
        session.apply(MenuCommand::NewGame, 0);
        session.apply(MenuCommand::ChooseClass(PlayerClass::Knight), 0);

        let snapshot = session.snapshot(75_000);
        assert_eq!(snapshot.mode, SessionMode::Running);
        assert_eq!(snapshot.level_name, "Main");
        assert!(snapshot.grid.is_some());
        assert_eq!(snapshot.sprites.last().map(|s| s.kind), Some(SpriteKind::Player));
        assert_eq!(snapshot.hud.class_name, "Knight");
        assert_eq!(snapshot.hud.elapsed, "1:15");
        assert_eq!(snapshot.inventory.len(), 6);
        assert!(snapshot.inventory[0].is_some());
        assert_eq!(snapshot.equipment.len(), 5);
        assert!(snapshot.combat.is_none());
        assert!(snapshot.report.is_none());
    }
}
