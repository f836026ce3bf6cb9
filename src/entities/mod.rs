//! Entities placed on levels: creatures, health pads and dropped loot.

pub mod entity;
pub mod health_pad;
pub mod mob;

pub use entity::*;
pub use health_pad::*;
pub use mob::*;
