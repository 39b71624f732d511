//! Game state and core simulation types
//!
//! The session owns the ship, the live projectiles and the formation.
//! Nothing here is shared across sessions except the process-wide high score.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::formation::Formation;
use super::rect::Rect;
use crate::settings::{Difficulty, DifficultyProfile, Settings};

/// Which game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// A grid of hostiles sweeping toward the ship
    #[default]
    Fleet,
    /// One target bouncing on the far edge; misses cost a ship
    TargetPractice,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Fleet => "Fleet",
            GameMode::TargetPractice => "Target Practice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fleet" | "attack" => Some(GameMode::Fleet),
            "target" | "target-practice" | "practice" => Some(GameMode::TargetPractice),
            _ => None,
        }
    }

    pub fn allows_pause(&self) -> bool {
        matches!(self, GameMode::Fleet)
    }

    /// A projectile leaving the screen is a lost ship
    pub fn misses_cost_life(&self) -> bool {
        matches!(self, GameMode::TargetPractice)
    }

    /// Every hostile on an edge drops toward the ship
    pub fn drops_on_edge(&self) -> bool {
        matches!(self, GameMode::Fleet)
    }

    pub fn hostile_size(&self, settings: &Settings) -> Vec2 {
        match self {
            GameMode::Fleet => Vec2::new(settings.alien_width, settings.alien_height),
            GameMode::TargetPractice => Vec2::new(settings.target_width, settings.target_height),
        }
    }

    pub fn hostile_base_speed(&self, settings: &Settings) -> f32 {
        match self {
            GameMode::Fleet => settings.alien_speed,
            GameMode::TargetPractice => settings.target_speed,
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, waiting for a start
    Inactive,
    /// Simulation running
    Active,
    /// Simulation frozen (fleet mode only)
    Paused,
    /// Holding after a lost ship; gameplay input is ignored
    SettlingAfterHit { ticks_left: u32 },
    /// Session ended; the menu is shown again
    GameOver,
}

impl GamePhase {
    /// Menu buttons and the cursor are visible
    pub fn is_menu(&self) -> bool {
        matches!(self, GamePhase::Inactive | GamePhase::GameOver)
    }
}

/// Things that happened during a tick, for audio and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { difficulty: Difficulty },
    Fired,
    HostileDestroyed { at: Vec2, points: u64 },
    LevelCleared { level: u32 },
    TargetMissed,
    ShipHit,
    LifeLost { lives_left: u32 },
    GameOver { score: u64 },
    NewHighScore(u64),
    NewRecord(u64),
    Paused,
    Resumed,
}

/// The player's craft, pinned to the left edge and moving vertically
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Top-left corner; y accumulates sub-pixel movement
    pub pos: Vec2,
    pub size: Vec2,
    pub moving_up: bool,
    pub moving_down: bool,
    screen_height: f32,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(settings.ship_width, settings.ship_height),
            moving_up: false,
            moving_down: false,
            screen_height: settings.screen_height,
        };
        ship.center();
        ship
    }

    /// Back to the middle of the left edge
    pub fn center(&mut self) {
        self.pos = Vec2::new(0.0, (self.screen_height - self.size.y) / 2.0);
    }

    /// Move by the current intent, staying on screen
    pub fn update(&mut self, speed: f32) {
        if self.moving_down {
            self.pos.y += speed;
        }
        if self.moving_up {
            self.pos.y -= speed;
        }
        self.pos.y = self.pos.y.clamp(0.0, (self.screen_height - self.size.y).max(0.0));
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Mid-point of the leading (right) edge, where projectiles leave
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x, self.pos.y + self.size.y / 2.0)
    }
}

/// A shot travelling right at constant speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Projectile {
    /// Spawn with the projectile's mid-right at the muzzle
    pub fn fired_from(muzzle: Vec2, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(muzzle.x - size.x, muzzle.y - size.y / 2.0),
            size,
        }
    }

    pub fn update(&mut self, speed: f32) {
        self.pos.x += speed;
    }

    /// Reached the right edge of the screen
    pub fn at_edge(&self, screen_width: f32) -> bool {
        self.pos.x >= screen_width
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A fleet member or the practice target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    /// Top-left corner; x only changes on a fleet drop
    pub pos: Vec2,
    pub size: Vec2,
}

impl Hostile {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Shift vertically by `dy` (sign carries the direction)
    pub fn update(&mut self, dy: f32) {
        self.pos.y += dy;
    }

    /// Touching the edge it is heading toward (`direction` > 0 is down)
    pub fn at_edge(&self, screen_height: f32, direction: f32) -> bool {
        let b = self.bounds();
        (direction > 0.0 && b.bottom() >= screen_height) || (direction < 0.0 && b.top() <= 0.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Score, lives and level for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u64,
    /// Best score seen since the process started
    pub high_score: u64,
    pub lives: u32,
    pub level: u32,
}

impl SessionStats {
    pub fn new(ship_limit: u32) -> Self {
        let mut stats = Self::default();
        stats.reset(ship_limit);
        stats
    }

    /// New session values; the high score carries over
    pub fn reset(&mut self, ship_limit: u32) {
        self.score = 0;
        self.lives = ship_limit;
        self.level = 1;
    }
}

/// Complete state of one game (either mode)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub phase: GamePhase,
    pub settings: Settings,
    pub profile: DifficultyProfile,
    pub stats: SessionStats,
    pub ship: Ship,
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    pub formation: Formation,
    /// Simulated (active) ticks since the process started
    pub time_ticks: u64,
}

impl GameState {
    /// Idle state showing the menu over a freshly laid-out formation
    pub fn new(mode: GameMode, settings: Settings) -> Self {
        let ship = Ship::new(&settings);
        let mut formation = Formation::new(mode);
        formation.rebuild(&settings, ship.size.x);

        Self {
            mode,
            phase: GamePhase::Inactive,
            profile: DifficultyProfile::new(&settings, Difficulty::default(), mode.hostile_base_speed(&settings)),
            stats: SessionStats::new(settings.ship_limit),
            ship,
            projectiles: Vec::new(),
            formation,
            time_ticks: 0,
            settings,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn cursor_visible(&self) -> bool {
        self.phase.is_menu()
    }
}
