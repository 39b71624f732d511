//! Hostile formation: layout, movement and the edge maneuver
//!
//! Hostiles approach along the horizontal axis (toward the ship on the
//! left) and sweep along the vertical axis. In fleet mode the whole grid
//! shares one direction and drops toward the ship when any member touches
//! the top or bottom edge. In target practice the formation is a single
//! target that only bounces.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{GameMode, Hostile};
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    pub hostiles: Vec<Hostile>,
    /// Shared vertical heading: +1.0 down, -1.0 up
    pub direction: f32,
    mode: GameMode,
}

impl Formation {
    pub fn new(mode: GameMode) -> Self {
        Self {
            hostiles: Vec::new(),
            direction: 1.0,
            mode,
        }
    }

    /// Heading used at the start of a session
    pub fn reset_direction(&mut self) {
        self.direction = 1.0;
    }

    /// Replace every hostile with a fresh full layout
    pub fn rebuild(&mut self, settings: &Settings, ship_width: f32) {
        self.hostiles.clear();
        match self.mode {
            GameMode::Fleet => self.spawn_fleet(settings, ship_width),
            GameMode::TargetPractice => self.spawn_target(settings),
        }
        log::debug!("{} formation rebuilt with {} hostiles", self.mode.as_str(), self.hostiles.len());
    }

    /// Columns and rows of the largest grid that fits.
    ///
    /// Two box widths per column and two box heights per row, with four
    /// widths reserved on the far side and the ship's width plus four more
    /// on the near side. Always at least one of each.
    pub fn fleet_grid(settings: &Settings, ship_width: f32) -> (usize, usize) {
        let w = settings.alien_width;
        let h = settings.alien_height;

        let available_y = settings.screen_height - 2.0 * h;
        let rows = (available_y / (2.0 * h)).floor().max(1.0) as usize;

        let available_x = settings.screen_width - 8.0 * w - ship_width;
        let columns = (available_x / (2.0 * w)).floor().max(1.0) as usize;

        (columns, rows)
    }

    fn spawn_fleet(&mut self, settings: &Settings, ship_width: f32) {
        let size = Vec2::new(settings.alien_width, settings.alien_height);
        let (columns, rows) = Self::fleet_grid(settings, ship_width);
        self.hostiles.reserve(columns * rows);

        // Column-major, column 0 nearest the far (right) edge
        for column in 0..columns {
            let x = settings.screen_width - (size.x + 2.0 * size.x * column as f32) - 4.0 * size.x;
            for row in 0..rows {
                let y = size.y + 2.0 * size.y * row as f32;
                self.hostiles.push(Hostile::new(Vec2::new(x, y), size));
            }
        }
    }

    fn spawn_target(&mut self, settings: &Settings) {
        let size = Vec2::new(settings.target_width, settings.target_height);
        let pos = Vec2::new(
            settings.screen_width - size.x,
            settings.screen_height / 2.0 - size.y / 2.0,
        );
        self.hostiles.push(Hostile::new(pos, size));
    }

    /// Run the edge check, then move every hostile by `speed`.
    ///
    /// Returns true if the edge maneuver happened this tick. It happens at
    /// most once however many hostiles are on the edge.
    pub fn advance(&mut self, speed: f32, settings: &Settings) -> bool {
        let direction = self.direction;
        let at_edge = self
            .hostiles
            .iter()
            .any(|h| h.at_edge(settings.screen_height, direction));

        if at_edge {
            if self.mode.drops_on_edge() {
                for hostile in &mut self.hostiles {
                    hostile.pos.x -= settings.fleet_drop_speed;
                }
            }
            self.direction = -self.direction;
        }

        let dy = speed * self.direction;
        for hostile in &mut self.hostiles {
            hostile.update(dy);
        }

        at_edge
    }

    pub fn is_cleared(&self) -> bool {
        self.hostiles.is_empty()
    }

    /// A hostile reached the ship or the ship's edge of the screen
    pub fn breached(&self, ship: &Rect) -> bool {
        self.hostiles.iter().any(|h| {
            let b = h.bounds();
            b.overlaps(ship) || b.left() <= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Settings whose fleet grid is exactly 5 columns by 3 rows
    fn five_by_three() -> Settings {
        Settings {
            screen_width: 950.0,
            screen_height: 400.0,
            alien_width: 50.0,
            alien_height: 50.0,
            ship_width: 50.0,
            ..Settings::default()
        }
    }

    #[test]
    fn test_fleet_grid_dimensions() {
        let settings = five_by_three();
        assert_eq!(Formation::fleet_grid(&settings, settings.ship_width), (5, 3));

        let defaults = Settings::default();
        assert_eq!(Formation::fleet_grid(&defaults, defaults.ship_width), (5, 5));
    }

    #[test]
    fn test_smallest_playable_screen_spawns_clear_of_ship() {
        let snug = Settings {
            screen_width: 5.0 * 60.0 + 60.0,
            screen_height: 3.0 * 58.0,
            ..Settings::default()
        };
        assert!(snug.is_playable());
        assert_eq!(Formation::fleet_grid(&snug, snug.ship_width), (1, 1));

        let mut formation = Formation::new(GameMode::Fleet);
        formation.rebuild(&snug, snug.ship_width);
        assert_eq!(formation.hostiles.len(), 1);
        assert_eq!(formation.hostiles[0].pos.x, snug.ship_width);

        let ship = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(snug.ship_width, snug.screen_height));
        assert!(!formation.breached(&ship));
    }

    #[test]
    fn test_fleet_layout_positions() {
        let settings = five_by_three();
        let mut formation = Formation::new(GameMode::Fleet);
        formation.rebuild(&settings, settings.ship_width);
        assert_eq!(formation.hostiles.len(), 15);

        // First column sits five widths in from the right edge
        let first = &formation.hostiles[0];
        assert_eq!(first.pos, Vec2::new(950.0 - 250.0, 50.0));
        // Rows are two heights apart, columns two widths apart
        assert_eq!(formation.hostiles[1].pos, Vec2::new(700.0, 150.0));
        assert_eq!(formation.hostiles[3].pos, Vec2::new(600.0, 50.0));
        // Nothing overlaps the ship's lane
        assert!(formation.hostiles.iter().all(|h| h.pos.x > settings.ship_width));
    }

    #[test]
    fn test_target_spawns_centered_on_far_edge() {
        let settings = Settings::default();
        let mut formation = Formation::new(GameMode::TargetPractice);
        formation.rebuild(&settings, settings.ship_width);
        assert_eq!(formation.hostiles.len(), 1);
        let b = formation.hostiles[0].bounds();
        assert_eq!(b.right(), settings.screen_width);
        assert_eq!(b.center().y, settings.screen_height / 2.0);
    }

    #[test]
    fn test_fleet_moves_in_lock_step() {
        let settings = five_by_three();
        let mut formation = Formation::new(GameMode::Fleet);
        formation.rebuild(&settings, settings.ship_width);
        let before: Vec<Vec2> = formation.hostiles.iter().map(|h| h.pos).collect();

        assert!(!formation.advance(2.0, &settings));
        for (h, p) in formation.hostiles.iter().zip(&before) {
            assert_eq!(h.pos, *p + Vec2::new(0.0, 2.0));
        }
    }

    #[test]
    fn test_drop_and_reverse_once_with_many_on_edge() {
        let settings = five_by_three();
        let mut formation = Formation::new(GameMode::Fleet);
        formation.rebuild(&settings, settings.ship_width);

        // Bottom row of every column (five hostiles) sits on the bottom edge
        let shift = settings.screen_height - formation.hostiles[2].bounds().bottom();
        for h in &mut formation.hostiles {
            h.pos.y += shift;
        }
        let xs: Vec<f32> = formation.hostiles.iter().map(|h| h.pos.x).collect();

        assert!(formation.advance(1.0, &settings));
        assert_eq!(formation.direction, -1.0);
        for (h, x) in formation.hostiles.iter().zip(&xs) {
            assert_eq!(h.pos.x, x - settings.fleet_drop_speed);
        }

        // Heading away from the edge now: no second maneuver
        assert!(!formation.advance(1.0, &settings));
        assert_eq!(formation.direction, -1.0);
        for (h, x) in formation.hostiles.iter().zip(&xs) {
            assert_eq!(h.pos.x, x - settings.fleet_drop_speed);
        }
    }

    #[test]
    fn test_target_bounces_without_dropping() {
        let settings = Settings::default();
        let mut formation = Formation::new(GameMode::TargetPractice);
        formation.rebuild(&settings, settings.ship_width);
        let x = formation.hostiles[0].pos.x;

        let mut bounces = 0;
        for _ in 0..2_000 {
            if formation.advance(3.0, &settings) {
                bounces += 1;
            }
            let b = formation.hostiles[0].bounds();
            assert!(b.top() >= -3.0 && b.bottom() <= settings.screen_height + 3.0);
        }
        assert!(bounces >= 2);
        assert_eq!(formation.hostiles[0].pos.x, x);
    }

    #[test]
    fn test_breach_on_left_edge_or_ship_overlap() {
        let ship = Rect::new(Vec2::new(0.0, 300.0), Vec2::new(60.0, 48.0));
        let mut formation = Formation::new(GameMode::Fleet);
        assert!(!formation.breached(&ship));

        formation.hostiles.push(Hostile::new(Vec2::new(500.0, 0.0), Vec2::splat(50.0)));
        assert!(!formation.breached(&ship));

        formation.hostiles.push(Hostile::new(Vec2::new(40.0, 310.0), Vec2::splat(50.0)));
        assert!(formation.breached(&ship));

        formation.hostiles.pop();
        formation.hostiles.push(Hostile::new(Vec2::new(0.0, 700.0), Vec2::splat(50.0)));
        assert!(formation.breached(&ship));
    }

    proptest::proptest! {
        #[test]
        fn prop_one_uniform_maneuver_per_tick(
            target in proptest::bool::ANY,
            speed in 0.5f32..20.0,
            ticks in 1usize..400,
        ) {
            let settings = Settings::default();
            let mode = if target { GameMode::TargetPractice } else { GameMode::Fleet };
            let mut formation = Formation::new(mode);
            formation.rebuild(&settings, settings.ship_width);

            for _ in 0..ticks {
                let before: Vec<Vec2> = formation.hostiles.iter().map(|h| h.pos).collect();
                let heading = formation.direction;
                let turned = formation.advance(speed, &settings);

                let expected_dx = if turned && !target { -settings.fleet_drop_speed } else { 0.0 };
                let expected_dy = speed * formation.direction;
                proptest::prop_assert_eq!(formation.direction == -heading, turned);
                for (old, hostile) in before.iter().zip(&formation.hostiles) {
                    let delta = hostile.pos - *old;
                    proptest::prop_assert!((delta.x - expected_dx).abs() < 1e-3);
                    proptest::prop_assert!((delta.y - expected_dy).abs() < 1e-3);
                }
            }
        }
    }
}
