//! Tilequest - a tile-world RPG session engine.
//!
//! This crate exposes the engine for the terminal binary and for tests.

pub mod abilities;
pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod entities;
pub mod input;
pub mod items;
pub mod level;
pub mod ui;
