//! The session state machine, advanced once per fixed tick.

use crate::abilities::AbilityCatalog;
use crate::character::{Player, PlayerClass};
use crate::combat::{resolve_exchange, Combat, CombatEvent, Side};
use crate::core::config::SessionConfig;
use crate::core::constants::{ARENA_EXIT_X, PLAYER_START_X, TILE_SIZE};
use crate::core::encounter::{
    begin_encounter, classify_contact, leave_arena, resolve_defeat, resolve_victory, Contact,
};
use crate::core::snapshot::{self, SessionSnapshot};
use crate::core::tick::{SoundEffect, TickEvent, TickResult};
use crate::core::transfer::{apply_portals, PortalTable};
use crate::entities::{EntityId, EntityKind, HealthPad, Mob};
use crate::input::{InputState, MenuCommand};
use crate::level::{
    generate_dungeon, AssetError, AssetProvider, LevelId, LevelKind, SpawnKind, World,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionMode {
    Start,
    Classes,
    Running,
    Paused,
    Combat,
    PostCombat,
    Over,
}

impl SessionMode {
    /// Modes in which the inventory menu accepts commands.
    pub fn allows_inventory(&self) -> bool {
        matches!(
            self,
            SessionMode::Running | SessionMode::Paused | SessionMode::PostCombat
        )
    }
}

/// Ids of the four fixed levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelIds {
    pub main: LevelId,
    pub arena: LevelId,
    pub dungeon1: LevelId,
    pub dungeon2: LevelId,
}

pub struct Session {
    mode: SessionMode,
    world: World,
    levels: LevelIds,
    portals: PortalTable,
    combat: Option<Combat>,
    boss: bool,
    victory: Option<bool>,
    catalog: Arc<AbilityCatalog>,
    config: SessionConfig,
    tick_count: u64,
    start_ms: Option<i64>,
    end_ms: Option<i64>,
}

impl Session {
    /// Builds the world: the authored main level and arena, two generated
    /// dungeons, all spawns, and the player at the main level's west edge.
    pub fn new(
        config: SessionConfig,
        catalog: Arc<AbilityCatalog>,
        assets: &impl AssetProvider,
        rng: &mut impl Rng,
    ) -> Result<Self, AssetError> {
        let main_grid = assets.main_map()?;
        let arena_grid = assets.arena_map()?;

        let start_y = main_grid.height() as i32 * TILE_SIZE / 2;
        let mut world = World::new(Player::new(PLAYER_START_X, start_y));
        let main = world.add_level("Main", main_grid, LevelKind::Authored);
        let arena = world.add_level("Arena", arena_grid, LevelKind::Authored);

        let [index1, index2] = config.dungeon_indices;
        let dungeon1 = add_dungeon(&mut world, "Dungeon 1", index1, config.dungeon_length, rng);
        let dungeon2 = add_dungeon(&mut world, "Dungeon 2", index2, config.dungeon_length, rng);

        for spawn in assets.main_spawns() {
            let kind = match spawn.kind {
                SpawnKind::Creature { name, rank } => EntityKind::Creature(Mob::creature(&name, rank)),
                SpawnKind::Boss { name, rank } => EntityKind::Creature(Mob::boss(&name, rank)),
                SpawnKind::HealthPad => EntityKind::HealthPad(HealthPad::default()),
            };
            world.spawn(main, spawn.x, spawn.y, kind);
        }
        world.add_to_level(main, EntityId::PLAYER);

        tracing::info!(
            "Session created: {} levels, {} entities",
            world.levels().len(),
            world.entity_count()
        );

        Ok(Self {
            mode: SessionMode::Start,
            world,
            levels: LevelIds {
                main,
                arena,
                dungeon1,
                dungeon2,
            },
            portals: PortalTable::standard(main, dungeon1, dungeon2),
            combat: None,
            boss: false,
            victory: None,
            catalog,
            config,
            tick_count: 0,
            start_ms: None,
            end_ms: None,
        })
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.world.player
    }

    pub fn levels(&self) -> LevelIds {
        self.levels
    }

    pub fn combat(&self) -> Option<&Combat> {
        self.combat.as_ref()
    }

    pub fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    pub fn is_boss_fight(&self) -> bool {
        self.boss
    }

    /// `Some(true)` after the boss fell, `Some(false)` after a defeat.
    pub fn victory(&self) -> Option<bool> {
        self.victory
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Milliseconds since the class was chosen, frozen once the game is over.
    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        match self.start_ms {
            Some(start) => (self.end_ms.unwrap_or(now_ms) - start).max(0),
            None => 0,
        }
    }

    pub fn snapshot(&self, now_ms: i64) -> SessionSnapshot<'_> {
        snapshot::capture(self, now_ms)
    }

    fn set_mode(&mut self, to: SessionMode, result: &mut TickResult) {
        let from = self.mode;
        if from == to {
            return;
        }
        self.mode = to;
        tracing::info!("Mode {:?} -> {:?}", from, to);
        result.push(TickEvent::ModeChanged { from, to });
    }

    /// Applies a menu command. Commands that do not fit the current mode
    /// are ignored.
    pub fn apply(&mut self, command: MenuCommand, now_ms: i64) -> TickResult {
        let mut result = TickResult::new();
        match command {
            MenuCommand::NewGame if self.mode == SessionMode::Start => {
                self.set_mode(SessionMode::Classes, &mut result);
                if let Some(class) = self.config.starting_class {
                    self.choose_class(class, now_ms, &mut result);
                }
            }
            MenuCommand::ChooseClass(class) if self.mode == SessionMode::Classes => {
                self.choose_class(class, now_ms, &mut result);
            }
            MenuCommand::Pause if self.mode == SessionMode::Running => {
                self.set_mode(SessionMode::Paused, &mut result);
            }
            MenuCommand::Resume if self.mode == SessionMode::Paused => {
                self.set_mode(SessionMode::Running, &mut result);
            }
            MenuCommand::Equip(slot) if self.mode.allows_inventory() => {
                if self.world.player.equip(slot) {
                    result.push(TickEvent::Equipped { slot });
                    result.push(TickEvent::Sound(SoundEffect::Equip));
                }
            }
            MenuCommand::Unequip(category) if self.mode.allows_inventory() => {
                if self.world.player.unequip(category) {
                    result.push(TickEvent::Unequipped { category });
                    result.push(TickEvent::Sound(SoundEffect::Unequip));
                }
            }
            MenuCommand::Drop(slot) if self.mode.allows_inventory() => {
                if self.world.player.drop(slot) {
                    result.push(TickEvent::ItemDropped { slot });
                }
            }
            MenuCommand::SpendAttribute(attribute) if self.mode.allows_inventory() => {
                if self.world.player.spend_attribute(attribute) {
                    result.push(TickEvent::AttributeSpent { attribute });
                }
            }
            other => {
                tracing::debug!("Ignoring {:?} in {:?}", other, self.mode);
            }
        }
        result
    }

    fn choose_class(&mut self, class: PlayerClass, now_ms: i64, result: &mut TickResult) {
        self.world.player.apply_class(class);
        self.start_ms = Some(now_ms);
        tracing::info!("Playing as {}", class.name());
        result.push(TickEvent::MusicStarted);
        self.set_mode(SessionMode::Running, result);
    }

    /// Advances the session by one fixed tick.
    pub fn tick(&mut self, input: &InputState, now_ms: i64, rng: &mut impl Rng) -> TickResult {
        let mut result = TickResult::new();
        if self.mode == SessionMode::Over {
            return result;
        }
        self.tick_count += 1;

        match self.mode {
            SessionMode::Running => self.tick_running(input, &mut result),
            SessionMode::Combat => self.tick_combat(input, now_ms, rng, &mut result),
            SessionMode::PostCombat => self.tick_post_combat(input, &mut result),
            SessionMode::Start | SessionMode::Classes | SessionMode::Paused | SessionMode::Over => {}
        }
        result
    }

    fn tick_running(&mut self, input: &InputState, result: &mut TickResult) {
        let Some(level) = self.world.player.body.level else {
            tracing::warn!("Player is not on any level");
            return;
        };
        self.world.tick_level(level, input);

        let contact = self
            .world
            .touching(level, EntityId::PLAYER)
            .and_then(|id| classify_contact(&self.world, id));
        match contact {
            Some(Contact::Creature { id, boss }) => {
                if let Some(combat) = begin_encounter(&mut self.world, self.levels.arena, id) {
                    self.boss = boss;
                    result.push(TickEvent::CombatStarted {
                        creature: combat.creature.name.clone(),
                        boss,
                    });
                    self.combat = Some(combat);
                    self.set_mode(SessionMode::Combat, result);
                    return;
                }
            }
            Some(Contact::HealthPad(id)) => {
                let amount = match self.world.entity_mut(id).map(|e| &mut e.kind) {
                    Some(EntityKind::HealthPad(pad)) => pad.activate(),
                    _ => 0,
                };
                let healed = self.world.player.heal(amount);
                if healed > 0 {
                    result.push(TickEvent::Healed { amount: healed });
                }
            }
            Some(Contact::Loot(_)) | None => {}
        }

        if let Some(portal) = apply_portals(&mut self.world, &self.portals) {
            result.push(TickEvent::LevelTransfer {
                from: portal.from,
                to: portal.to,
            });
        }
    }

    fn tick_combat(
        &mut self,
        input: &InputState,
        now_ms: i64,
        rng: &mut impl Rng,
        result: &mut TickResult,
    ) {
        debug_assert!(self.combat.is_some(), "combat mode without an encounter");
        let Some(combat) = self.combat.as_mut() else {
            return;
        };
        let Some(slot) = input.ability_pressed() else {
            return;
        };

        for event in resolve_exchange(combat, slot, &self.catalog) {
            match event {
                CombatEvent::AbilityUsed {
                    side,
                    ability,
                    amount,
                    ..
                } => {
                    let definition = self.catalog.get(ability);
                    result.push(TickEvent::AbilityUsed {
                        side,
                        ability,
                        name: definition.map(|a| a.name.clone()).unwrap_or_default(),
                        amount,
                    });
                    if side == Side::Player {
                        if let Some(cue) = definition.and_then(|a| a.sound.clone()) {
                            result.push(TickEvent::Sound(SoundEffect::Ability(cue)));
                        }
                    }
                }
                CombatEvent::Stunned { side } => result.push(TickEvent::ActionLost { side }),
                CombatEvent::DamageOverTime { target, damage, .. } => {
                    result.push(TickEvent::DamageOverTime { target, damage })
                }
                CombatEvent::Ended { winner } => result.push(TickEvent::CombatEnded { winner }),
                CombatEvent::OnCooldown { .. } | CombatEvent::ShieldExpired { .. } => {}
            }
        }

        if combat.in_combat {
            return;
        }
        let Some(combat) = self.combat.take() else {
            return;
        };
        if combat.player.health > 0 {
            let victory = resolve_victory(&mut self.world, self.levels.arena, &combat, rng);
            let rank = self.world.player.mob.rank;
            for offset in (0..victory.rank_ups).rev() {
                result.push(TickEvent::RankUp {
                    rank: rank - offset,
                });
            }
            result.push(TickEvent::LootDropped { item: victory.loot });
            if self.boss {
                self.finish(true, now_ms, result);
            } else {
                self.set_mode(SessionMode::PostCombat, result);
            }
        } else {
            resolve_defeat(&mut self.world, &combat);
            self.finish(false, now_ms, result);
        }
    }

    fn finish(&mut self, victory: bool, now_ms: i64, result: &mut TickResult) {
        self.victory = Some(victory);
        self.end_ms = Some(now_ms);
        self.set_mode(SessionMode::Over, result);
    }

    fn tick_post_combat(&mut self, input: &InputState, result: &mut TickResult) {
        let arena = self.levels.arena;
        self.world.tick_level(arena, input);

        if let Some(id) = self.world.touching(arena, EntityId::PLAYER) {
            if let Some(Contact::Loot(id)) = classify_contact(&self.world, id) {
                let item = match self.world.entity(id).map(|e| &e.kind) {
                    Some(EntityKind::Loot(item)) => Some(item.clone()),
                    _ => None,
                };
                if let Some(item) = item {
                    match self.world.player.pick_up(item.clone()) {
                        Ok(slot) => {
                            self.world.despawn(id);
                            result.push(TickEvent::LootPickedUp { item, slot });
                            result.push(TickEvent::Sound(SoundEffect::LootPickup));
                        }
                        Err(_) => tracing::debug!("Inventory full, loot left in the arena"),
                    }
                }
            }
        }

        if self.world.player.body.x >= ARENA_EXIT_X {
            if let Some(to) = leave_arena(&mut self.world, arena) {
                result.push(TickEvent::LevelTransfer { from: arena, to });
            }
            self.boss = false;
            self.set_mode(SessionMode::Running, result);
        }
    }
}

fn add_dungeon(
    world: &mut World,
    name: &str,
    index: u32,
    length: usize,
    rng: &mut impl Rng,
) -> LevelId {
    let dungeon = generate_dungeon(index, length, rng);
    let id = world.add_level(
        name,
        dungeon.grid,
        LevelKind::Dungeon {
            index,
            start_row: dungeon.start_row,
        },
    );
    for spawn in dungeon.spawns {
        world.spawn(
            id,
            spawn.x,
            spawn.y,
            EntityKind::Creature(Mob::creature(&spawn.name, spawn.rank)),
        );
    }
    id
}
