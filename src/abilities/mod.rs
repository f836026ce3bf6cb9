//! Ability definitions and the process-wide ability catalog.

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
