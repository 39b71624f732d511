//! Game settings and difficulty profiles
//!
//! `Settings` holds the static tunables and can be loaded from a JSON file.
//! `DifficultyProfile` holds the values that change during a session.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty tiers selectable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Scales base speeds and the per-hostile score
    pub fn multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Normal => 1.5,
            Difficulty::Hard => 2.0,
        }
    }
}

/// Static game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    /// Pixels per tick at Easy
    pub ship_speed: f32,
    /// Ships per session
    pub ship_limit: u32,

    // === Projectiles ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    /// Maximum projectiles alive at once
    pub bullets_allowed: usize,

    // === Fleet ===
    pub alien_width: f32,
    pub alien_height: f32,
    pub alien_speed: f32,
    /// Horizontal shift toward the ship on each edge contact
    pub fleet_drop_speed: f32,

    // === Target practice ===
    pub target_width: f32,
    pub target_height: f32,
    pub target_speed: f32,

    // === Scoring and pacing ===
    pub alien_points: u64,
    /// Speed multiplier applied on every level advance
    pub speedup_scale: f32,
    /// Ticks the simulation holds after a lost ship
    pub settle_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1200.0,
            screen_height: 800.0,

            ship_width: 60.0,
            ship_height: 48.0,
            ship_speed: 1.5,
            ship_limit: 3,

            bullet_width: 15.0,
            bullet_height: 3.0,
            bullet_speed: 3.0,
            bullets_allowed: 3,

            alien_width: 60.0,
            alien_height: 58.0,
            alien_speed: 1.0,
            fleet_drop_speed: 10.0,

            target_width: 20.0,
            target_height: 120.0,
            target_speed: 1.5,

            alien_points: 50,
            speedup_scale: 1.1,
            settle_ticks: crate::consts::SETTLE_TICKS,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) if settings.is_playable() => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(_) => {
                log::warn!("Settings in {} are not playable, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Sanity check: positive sizes and speeds, and room for the ship and
    /// for a one-column fleet clear of it
    pub fn is_playable(&self) -> bool {
        let sizes = [
            self.screen_width,
            self.screen_height,
            self.ship_width,
            self.ship_height,
            self.bullet_width,
            self.bullet_height,
            self.alien_width,
            self.alien_height,
            self.target_width,
            self.target_height,
        ];
        let speeds = [
            self.ship_speed,
            self.bullet_speed,
            self.alien_speed,
            self.target_speed,
        ];
        sizes.iter().chain(speeds.iter()).all(|v| v.is_finite() && *v > 0.0)
            && self.ship_height <= self.screen_height
            && self.target_height < self.screen_height
            && self.screen_width >= 5.0 * self.alien_width + self.ship_width
            && self.screen_height >= 3.0 * self.alien_height
            && self.screen_width >= self.target_width + self.ship_width
            && self.ship_limit > 0
            && self.bullets_allowed > 0
            && self.speedup_scale >= 1.0
    }
}

/// Values that move during a session: speeds and the scoring unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    pub ship_speed: f32,
    pub bullet_speed: f32,
    /// Fleet speed, or target speed in target practice
    pub hostile_speed: f32,
    /// Points for each destroyed hostile
    pub points_per_hit: u64,
    speedup_scale: f32,
}

impl DifficultyProfile {
    pub fn new(settings: &Settings, difficulty: Difficulty, hostile_base_speed: f32) -> Self {
        let mut profile = Self {
            difficulty,
            ship_speed: 0.0,
            bullet_speed: 0.0,
            hostile_speed: 0.0,
            points_per_hit: 0,
            speedup_scale: settings.speedup_scale,
        };
        profile.initialize(settings, difficulty, hostile_base_speed);
        profile
    }

    /// Reset every dynamic value to the tier's base
    pub fn initialize(&mut self, settings: &Settings, difficulty: Difficulty, hostile_base_speed: f32) {
        let m = difficulty.multiplier();
        self.difficulty = difficulty;
        self.ship_speed = settings.ship_speed * m;
        self.bullet_speed = settings.bullet_speed * m;
        self.hostile_speed = hostile_base_speed * m;
        self.points_per_hit = (settings.alien_points as f64 * m as f64).round() as u64;
        self.speedup_scale = settings.speedup_scale;
    }

    /// Apply one level's worth of speed growth (uncapped)
    pub fn speed_up(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.hostile_speed *= self.speedup_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }

    #[test]
    fn test_profile_tiers_scale_base_values() {
        let settings = Settings::default();
        let easy = DifficultyProfile::new(&settings, Difficulty::Easy, settings.alien_speed);
        let hard = DifficultyProfile::new(&settings, Difficulty::Hard, settings.alien_speed);

        assert_eq!(easy.ship_speed, settings.ship_speed);
        assert_eq!(easy.points_per_hit, 50);
        assert_eq!(hard.bullet_speed, settings.bullet_speed * 2.0);
        assert_eq!(hard.hostile_speed, settings.alien_speed * 2.0);
        assert_eq!(hard.points_per_hit, 100);

        let normal = DifficultyProfile::new(&settings, Difficulty::Normal, settings.alien_speed);
        assert_eq!(normal.points_per_hit, 75);
    }

    #[test]
    fn test_speed_up_compounds_each_call() {
        let settings = Settings::default();
        let mut profile = DifficultyProfile::new(&settings, Difficulty::Easy, settings.alien_speed);
        profile.speed_up();
        assert!((profile.ship_speed - 1.5 * 1.1).abs() < 1e-5);
        profile.speed_up();
        assert!((profile.bullet_speed - 3.0 * 1.1 * 1.1).abs() < 1e-5);
        assert!((profile.hostile_speed - 1.21).abs() < 1e-5);
        // Scoring unit is fixed for the session
        assert_eq!(profile.points_per_hit, 50);
    }

    #[test]
    fn test_initialize_discards_speed_ups() {
        let settings = Settings::default();
        let mut profile = DifficultyProfile::new(&settings, Difficulty::Normal, settings.alien_speed);
        profile.speed_up();
        profile.initialize(&settings, Difficulty::Easy, settings.alien_speed);
        assert_eq!(profile.difficulty, Difficulty::Easy);
        assert_eq!(profile.hostile_speed, settings.alien_speed);
    }

    #[test]
    fn test_load_partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "bullets_allowed": 5, "alien_points": 10 }"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.bullets_allowed, 5);
        assert_eq!(settings.alien_points, 10);
        assert_eq!(settings.screen_width, 1200.0);
    }

    #[test]
    fn test_load_falls_back_on_missing_or_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("absent.json")), Settings::default());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        assert_eq!(Settings::load(&bad), Settings::default());

        let unplayable = dir.path().join("zero.json");
        std::fs::write(&unplayable, r#"{ "ship_speed": 0.0 }"#).unwrap();
        assert_eq!(Settings::load(&unplayable), Settings::default());
    }

    #[test]
    fn test_screen_too_small_for_fleet_is_rejected() {
        let narrow = Settings {
            screen_width: 250.0,
            screen_height: 300.0,
            ..Settings::default()
        };
        assert!(!narrow.is_playable());

        let short = Settings {
            screen_height: 170.0,
            ..Settings::default()
        };
        assert!(!short.is_playable());

        // Smallest screen that still fits a column beside the ship
        let snug = Settings {
            screen_width: 5.0 * 60.0 + 60.0,
            screen_height: 3.0 * 58.0,
            ..Settings::default()
        };
        assert!(snug.is_playable());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrow.json");
        std::fs::write(&path, serde_json::to_string(&narrow).unwrap()).unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
