//! Per-frame draw data
//!
//! A flat snapshot of everything on screen, built from the simulation
//! state after each tick. Renderers never read `GameState` directly.

use crate::highscores::{HudText, Scoreboard};
use crate::platform::{Button, Menu};
use crate::sim::{GamePhase, GameState, Rect};

/// Background fill (RGB)
pub const BACKGROUND: [u8; 3] = [230, 230, 230];

#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub background: [u8; 3],
    pub ship: Rect,
    /// Oldest first
    pub projectiles: Vec<Rect>,
    /// Formation layout order
    pub hostiles: Vec<Rect>,
    /// Empty while a session is running
    pub buttons: &'a [Button],
    pub hud: HudText,
    pub cursor_visible: bool,
    pub phase: GamePhase,
}

impl<'a> Frame<'a> {
    pub fn capture(state: &GameState, scoreboard: &Scoreboard, menu: &'a Menu) -> Self {
        let buttons: &'a [Button] = if state.phase.is_menu() {
            &menu.buttons
        } else {
            &[]
        };

        Self {
            background: BACKGROUND,
            ship: state.ship.bounds(),
            projectiles: state.projectiles.iter().map(|p| p.bounds()).collect(),
            hostiles: state.formation.hostiles.iter().map(|h| h.bounds()).collect(),
            buttons,
            hud: scoreboard.hud(&state.stats),
            cursor_visible: state.cursor_visible(),
            phase: state.phase,
        }
    }
}
