use crate::core::constants::{HEALTH_PAD_AMOUNT, HEALTH_PAD_RECHARGE_TICKS};
use serde::{Deserialize, Serialize};

/// A floor pad that heals whoever steps on it, then recharges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPad {
    pub amount: u32,
    pub recharge_ticks: u32,
    remaining: u32,
}

impl Default for HealthPad {
    fn default() -> Self {
        Self::new(HEALTH_PAD_AMOUNT, HEALTH_PAD_RECHARGE_TICKS)
    }
}

impl HealthPad {
    pub fn new(amount: u32, recharge_ticks: u32) -> Self {
        Self {
            amount,
            recharge_ticks,
            remaining: 0,
        }
    }

    pub fn is_charged(&self) -> bool {
        self.remaining == 0
    }

    /// Returns the heal amount and starts recharging, or 0 while recharging.
    pub fn activate(&mut self) -> u32 {
        if !self.is_charged() {
            return 0;
        }
        self.remaining = self.recharge_ticks;
        self.amount
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
