//! One-on-one turn-based encounters.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
