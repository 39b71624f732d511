//! Side Attack - a sideways arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, formation, collisions, session state machine)
//! - `settings`: Static configuration and difficulty profiles
//! - `persistence`: All-time best score storage
//! - `highscores`: Scoreboard and HUD text
//! - `platform`: Input event translation and menu buttons
//! - `renderer`: Frame snapshot handed to a renderer
//! - `game`: Composition of all of the above, one call per frame

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{FrameOutcome, Game};
pub use highscores::{HudText, Scoreboard};
pub use persistence::{FileScoreStore, MemoryScoreStore, ScoreStore, StoreError};
pub use settings::{Difficulty, DifficultyProfile, Settings};
pub use sim::{GameMode, GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Frames per second the speeds are tuned for
    pub const TICK_RATE: u32 = 60;
    /// Half a second of hold after a lost ship
    pub const SETTLE_TICKS: u32 = TICK_RATE / 2;

    /// Menu button size
    pub const BUTTON_WIDTH: f32 = 200.0;
    pub const BUTTON_HEIGHT: f32 = 50.0;
    /// Horizontal distance between button centres, in button widths
    pub const BUTTON_SPACING: f32 = 1.1;
}
