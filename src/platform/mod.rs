//! Platform abstraction layer
//!
//! Turns raw window events into per-tick input:
//! - Held movement keys become intent flags
//! - Space fires, P pauses (fleet) or starts (target practice), Q quits
//! - Clicks on a menu button start a session at that button's difficulty

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BUTTON_HEIGHT, BUTTON_SPACING, BUTTON_WIDTH};
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameMode, Rect, TickInput};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Space,
    P,
    Q,
    Other,
}

/// A raw event from the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseDown { x: f32, y: f32 },
}

/// A clickable menu button
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub bounds: Rect,
    pub difficulty: Difficulty,
    /// Fill colour (RGB)
    pub color: [u8; 3],
}

/// The menu shown while no session is running
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub buttons: Vec<Button>,
}

impl Menu {
    /// Three difficulty buttons for the fleet, a single Play button for practice
    pub fn for_mode(mode: GameMode, settings: &Settings) -> Self {
        let center = Vec2::new(settings.screen_width / 2.0, settings.screen_height / 2.0);
        let size = Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT);
        let offset = Vec2::new(BUTTON_SPACING * BUTTON_WIDTH, 0.0);

        let buttons = match mode {
            GameMode::Fleet => vec![
                Button {
                    label: "Easy",
                    bounds: Rect::from_center(center - offset, size),
                    difficulty: Difficulty::Easy,
                    color: [0, 255, 0],
                },
                Button {
                    label: "Normal",
                    bounds: Rect::from_center(center, size),
                    difficulty: Difficulty::Normal,
                    color: [255, 255, 0],
                },
                Button {
                    label: "Hard",
                    bounds: Rect::from_center(center + offset, size),
                    difficulty: Difficulty::Hard,
                    color: [255, 0, 0],
                },
            ],
            GameMode::TargetPractice => vec![Button {
                label: "Play",
                bounds: Rect::from_center(center, size),
                difficulty: Difficulty::Easy,
                color: [0, 255, 0],
            }],
        };

        Self { buttons }
    }

    /// Difficulty of the button under `pos`, if any
    pub fn hit(&self, pos: Vec2) -> Option<Difficulty> {
        self.buttons
            .iter()
            .find(|b| b.bounds.contains_point(pos))
            .map(|b| b.difficulty)
    }
}

/// Accumulates events between ticks
#[derive(Debug, Clone)]
pub struct InputState {
    mode: GameMode,
    up_held: bool,
    down_held: bool,
    fire: bool,
    pause: bool,
    start: Option<Difficulty>,
    quit: bool,
}

impl InputState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            up_held: false,
            down_held: false,
            fire: false,
            pause: false,
            start: None,
            quit: false,
        }
    }

    pub fn handle(&mut self, event: InputEvent, menu: &Menu) {
        match event {
            InputEvent::Quit => self.quit = true,
            InputEvent::KeyDown(key) => match key {
                Key::Up => self.up_held = true,
                Key::Down => self.down_held = true,
                Key::Space => self.fire = true,
                Key::P if self.mode.allows_pause() => self.pause = true,
                _ => {}
            },
            InputEvent::KeyUp(key) => match key {
                Key::Up => self.up_held = false,
                Key::Down => self.down_held = false,
                Key::Q => self.quit = true,
                Key::P if !self.mode.allows_pause() => {
                    self.start = Some(Difficulty::Easy);
                }
                _ => {}
            },
            InputEvent::MouseDown { x, y } => {
                if let Some(difficulty) = menu.hit(Vec2::new(x, y)) {
                    self.start = Some(difficulty);
                }
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Input for the next tick; clears the one-shot actions
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_up: self.up_held,
            move_down: self.down_held,
            fire: self.fire,
            pause: self.pause,
            start: self.start,
        };
        self.fire = false;
        self.pause = false;
        self.start = None;
        input
    }
}
