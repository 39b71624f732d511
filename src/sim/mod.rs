//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One call to `tick` per frame, speeds in pixels per tick
//! - Stable iteration order (formation layout order, projectiles oldest first)
//! - Persistence only through the injected `Scoreboard`

pub mod autopilot;
pub mod collision;
pub mod formation;
pub mod rect;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Hit, remove_exited, resolve_hits};
pub use formation::Formation;
pub use rect::Rect;
pub use state::{
    GameEvent, GameMode, GamePhase, GameState, Hostile, Projectile, SessionStats, Ship,
};
pub use tick::{TickInput, start_session, tick};
