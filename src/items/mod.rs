//! Item system: types, equipment slots, inventory and loot rolls.

pub mod drops;
pub mod equipment;
pub mod types;

pub use drops::*;
pub use equipment::*;
pub use types::*;
