//! The player character: stats, class, equipment and progression.

pub mod attributes;
pub mod class;
pub mod player;
pub mod progression;

pub use attributes::*;
pub use class::*;
pub use player::*;
pub use progression::*;
