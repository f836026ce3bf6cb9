//! Device-independent input: the per-tick key state and menu commands.

use crate::character::{AttributeType, PlayerClass};
use crate::core::constants::NUM_ABILITY_SLOTS;
use crate::items::ItemCategory;
use serde::{Deserialize, Serialize};

/// Keys held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub abilities: [bool; NUM_ABILITY_SLOTS],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with only ability `slot` pressed.
    pub fn ability(slot: usize) -> Self {
        let mut input = Self::default();
        if let Some(pressed) = input.abilities.get_mut(slot) {
            *pressed = true;
        }
        input
    }

    /// Movement vector; opposite keys cancel out.
    pub fn direction(&self) -> (i32, i32) {
        let mut xa = 0;
        let mut ya = 0;
        if self.up {
            ya -= 1;
        }
        if self.down {
            ya += 1;
        }
        if self.left {
            xa -= 1;
        }
        if self.right {
            xa += 1;
        }
        (xa, ya)
    }

    /// Lowest pressed ability slot.
    pub fn ability_pressed(&self) -> Option<usize> {
        self.abilities.iter().position(|pressed| *pressed)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Menu-driven actions applied outside the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCommand {
    NewGame,
    ChooseClass(PlayerClass),
    Pause,
    Resume,
    Equip(usize),
    Unequip(ItemCategory),
    Drop(usize),
    SpendAttribute(AttributeType),
}

/// Movement keys reported by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

/// Turns discrete key presses into held-key state.
///
/// Terminals report presses and auto-repeats but no releases, so a
/// movement key counts as held for `hold_ticks` after its last event.
/// Ability presses last exactly one tick.
#[derive(Debug, Clone)]
pub struct InputLatch {
    hold_ticks: u32,
    held: [u32; 4],
    abilities: [bool; NUM_ABILITY_SLOTS],
}

impl InputLatch {
    pub fn new(hold_ticks: u32) -> Self {
        Self {
            hold_ticks,
            held: [0; 4],
            abilities: [false; NUM_ABILITY_SLOTS],
        }
    }

    pub fn press(&mut self, heading: Heading) {
        self.held[heading as usize] = self.hold_ticks;
    }

    pub fn press_ability(&mut self, slot: usize) {
        if let Some(pressed) = self.abilities.get_mut(slot) {
            *pressed = true;
        }
    }

    /// Input for the next tick; decays held keys and consumes ability presses.
    pub fn next_tick(&mut self) -> InputState {
        let input = InputState {
            up: self.held[Heading::Up as usize] > 0,
            down: self.held[Heading::Down as usize] > 0,
            left: self.held[Heading::Left as usize] > 0,
            right: self.held[Heading::Right as usize] > 0,
            abilities: self.abilities,
        };
        for ticks in &mut self.held {
            *ticks = ticks.saturating_sub(1);
        }
        self.abilities = [false; NUM_ABILITY_SLOTS];
        input
    }

    pub fn release_all(&mut self) {
        self.held = [0; 4];
        self.abilities = [false; NUM_ABILITY_SLOTS];
    }
}
