//! Game instance
//!
//! Owns the simulation state, the scoreboard, the input accumulator and the
//! menu. The host feeds it raw events, calls `frame` once per display frame
//! and draws `view`.

use crate::highscores::Scoreboard;
use crate::persistence::{ScoreStore, StoreError};
use crate::platform::{InputEvent, InputState, Menu};
use crate::renderer::Frame;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameMode, GamePhase, GameState, autopilot_input, tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Game {
    state: GameState,
    scoreboard: Scoreboard,
    input: InputState,
    menu: Menu,
    autopilot: bool,
    /// Events produced by the last `frame`
    events: Vec<GameEvent>,
    last_phase: GamePhase,
}

impl Game {
    pub fn new(mode: GameMode, settings: Settings, store: Box<dyn ScoreStore>) -> Self {
        let menu = Menu::for_mode(mode, &settings);
        let state = GameState::new(mode, settings);
        let last_phase = state.phase;
        log::info!("Side Attack ready ({} mode)", mode.as_str());
        Self {
            state,
            scoreboard: Scoreboard::new(store),
            input: InputState::new(mode),
            menu,
            autopilot: false,
            events: Vec::new(),
            last_phase,
        }
    }

    /// Let the autopilot steer and fire while a session is active
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        self.input.handle(event, &self.menu);
    }

    /// Run one tick with the input gathered since the last frame
    pub fn frame(&mut self) -> Result<FrameOutcome, StoreError> {
        if self.input.quit_requested() {
            log::info!("Quit requested");
            return Ok(FrameOutcome::Quit);
        }

        let mut input = self.input.take_tick_input();
        if self.autopilot && self.state.is_active() {
            let auto = autopilot_input(&self.state);
            input.move_up = auto.move_up;
            input.move_down = auto.move_down;
            input.fire |= auto.fire;
        }

        self.events = tick(&mut self.state, &mut self.scoreboard, &input)?;

        if self.state.phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }
        Ok(FrameOutcome::Continue)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn view(&self) -> Frame<'_> {
        Frame::capture(&self.state, &self.scoreboard, &self.menu)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FileScoreStore, MemoryScoreStore};
    use crate::platform::Key;
    use crate::settings::Difficulty;
    use proptest::prelude::*;

    fn click_button(game: &mut Game, index: usize) {
        let center = game.menu().buttons[index].bounds.center();
        game.handle_event(InputEvent::MouseDown {
            x: center.x,
            y: center.y,
        });
    }

    #[test]
    fn test_click_starts_session() {
        let mut game = Game::new(GameMode::Fleet, Settings::default(), Box::new(MemoryScoreStore::new()));
        click_button(&mut game, 1);
        assert_eq!(game.frame().unwrap(), FrameOutcome::Continue);
        assert_eq!(game.state().phase, GamePhase::Active);
        assert_eq!(game.state().profile.difficulty, Difficulty::Normal);
        assert_eq!(
            game.events(),
            &[GameEvent::SessionStarted {
                difficulty: Difficulty::Normal
            }]
        );
        assert!(game.view().buttons.is_empty());
    }

    #[test]
    fn test_practice_p_key_starts() {
        let mut game = Game::new(
            GameMode::TargetPractice,
            Settings::default(),
            Box::new(MemoryScoreStore::new()),
        );
        game.handle_event(InputEvent::KeyUp(Key::P));
        game.frame().unwrap();
        assert_eq!(game.state().phase, GamePhase::Active);
        assert_eq!(game.state().profile.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_quit_stops_before_tick() {
        let mut game = Game::new(GameMode::Fleet, Settings::default(), Box::new(MemoryScoreStore::new()));
        click_button(&mut game, 0);
        game.handle_event(InputEvent::Quit);
        assert_eq!(game.frame().unwrap(), FrameOutcome::Quit);
        assert_eq!(game.state().phase, GamePhase::Inactive);
    }

    #[test]
    fn test_space_fires() {
        let mut game = Game::new(GameMode::Fleet, Settings::default(), Box::new(MemoryScoreStore::new()));
        click_button(&mut game, 0);
        game.frame().unwrap();

        game.handle_event(InputEvent::KeyDown(Key::Space));
        game.frame().unwrap();
        assert_eq!(game.state().projectiles.len(), 1);
        assert!(game.events().contains(&GameEvent::Fired));
    }

    #[test]
    fn test_autopilot_session_persists_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");

        let mut game = Game::new(
            GameMode::TargetPractice,
            Settings::default(),
            Box::new(FileScoreStore::new(&path)),
        );
        game.set_autopilot(true);
        click_button(&mut game, 0);

        for _ in 0..20_000 {
            game.frame().unwrap();
            if game.state().phase == GamePhase::GameOver {
                break;
            }
        }

        let best = game.state().stats.high_score;
        assert!(best > 0);
        assert_eq!(game.scoreboard().record(), best);
        assert_eq!(FileScoreStore::new(&path).load(), best);
    }

    fn arb_event() -> impl Strategy<Value = InputEvent> {
        let key = prop_oneof![
            Just(Key::Up),
            Just(Key::Down),
            Just(Key::Space),
            Just(Key::P),
            Just(Key::Other),
        ];
        prop_oneof![
            key.clone().prop_map(InputEvent::KeyDown),
            key.prop_map(InputEvent::KeyUp),
            (0.0f32..1200.0, 0.0f32..800.0).prop_map(|(x, y)| InputEvent::MouseDown { x, y }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_session_stays_consistent(
            mode in prop_oneof![Just(GameMode::Fleet), Just(GameMode::TargetPractice)],
            frames in prop::collection::vec(prop::collection::vec(arb_event(), 0..3), 1..400),
        ) {
            let settings = Settings::default();
            let mut game = Game::new(mode, settings.clone(), Box::new(MemoryScoreStore::new()));
            game.set_autopilot(true);

            let mut last_score = 0;
            let mut last_lives = settings.ship_limit;
            for events in frames {
                for event in events {
                    game.handle_event(event);
                }
                let started = game.state().phase.is_menu();
                game.frame().unwrap();
                let state = game.state();

                if started && !state.phase.is_menu() {
                    last_score = 0;
                    last_lives = settings.ship_limit;
                }

                let ship = state.ship.bounds();
                prop_assert!(ship.top() >= 0.0);
                prop_assert!(ship.bottom() <= settings.screen_height);
                prop_assert!(state.projectiles.len() <= settings.bullets_allowed);
                prop_assert!(state.stats.score >= last_score);
                prop_assert!(state.stats.high_score >= state.stats.score);
                prop_assert!(state.stats.lives <= last_lives);
                for projectile in &state.projectiles {
                    prop_assert!(projectile.pos.x < settings.screen_width);
                }

                last_score = state.stats.score;
                last_lives = state.stats.lives;
            }
        }
    }
}
