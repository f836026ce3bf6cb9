//! Session orchestration: modes, ticks, portals and encounters.

pub mod config;
pub mod constants;
pub mod encounter;
pub mod game_loop;
pub mod session;
pub mod snapshot;
pub mod tick;
pub mod transfer;

pub use config::{ConfigError, SessionConfig};
pub use game_loop::FixedStep;
pub use session::{LevelIds, Session, SessionMode};
pub use snapshot::{format_elapsed, SessionSnapshot};
pub use tick::{SoundEffect, TickEvent, TickResult};
pub use transfer::{apply_portals, Portal, PortalTable};
