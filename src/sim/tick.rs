//! Per-frame simulation tick
//!
//! Drives the session state machine and, while active, advances the ship,
//! projectiles and formation and resolves their interactions.

use super::collision::{remove_exited, resolve_hits};
use super::state::{GameEvent, GamePhase, GameState, Projectile};
use crate::highscores::Scoreboard;
use crate::persistence::StoreError;
use crate::settings::Difficulty;

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held movement intent
    pub move_up: bool,
    pub move_down: bool,
    /// Fire one projectile (one-shot)
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Start a session from the menu (one-shot)
    pub start: Option<Difficulty>,
}

/// Advance the game by one frame.
///
/// The only error is a failed write of a new all-time record.
pub fn tick(
    state: &mut GameState,
    scoreboard: &mut Scoreboard,
    input: &TickInput,
) -> Result<Vec<GameEvent>, StoreError> {
    let mut events = Vec::new();

    // The starting tick only sets the board up; play begins on the next one
    if let Some(difficulty) = input.start {
        if state.phase.is_menu() {
            start_session(state, difficulty);
            events.push(GameEvent::SessionStarted { difficulty });
            return Ok(events);
        }
    }

    state.ship.moving_up = input.move_up;
    state.ship.moving_down = input.move_down;

    match state.phase {
        GamePhase::Inactive | GamePhase::GameOver => return Ok(events),
        GamePhase::SettlingAfterHit { ticks_left } => {
            state.phase = if ticks_left <= 1 {
                GamePhase::Active
            } else {
                GamePhase::SettlingAfterHit {
                    ticks_left: ticks_left - 1,
                }
            };
            return Ok(events);
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Active;
                log::info!("Resumed");
                events.push(GameEvent::Resumed);
            }
            return Ok(events);
        }
        GamePhase::Active => {
            if input.pause && state.mode.allows_pause() {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                events.push(GameEvent::Paused);
                return Ok(events);
            }
        }
    }

    state.time_ticks += 1;

    if input.fire {
        fire_projectile(state, &mut events);
    }

    // Ship
    state.ship.update(state.profile.ship_speed);

    // Projectiles
    for projectile in &mut state.projectiles {
        projectile.update(state.profile.bullet_speed);
    }
    let exited = remove_exited(&mut state.projectiles, state.settings.screen_width);
    if exited > 0 && state.mode.misses_cost_life() {
        log::info!("Target missed");
        events.push(GameEvent::TargetMissed);
        lose_life(state, scoreboard, &mut events)?;
        return Ok(events);
    }

    // Projectile/hostile hits
    let hits = resolve_hits(&mut state.projectiles, &mut state.formation.hostiles);
    if !hits.is_empty() {
        let points = state.profile.points_per_hit;
        state.stats.score += points * hits.len() as u64;
        events.extend(hits.iter().map(|hit| GameEvent::HostileDestroyed { at: hit.at, points }));
        check_scores(state, scoreboard, &mut events)?;
    }

    if state.formation.is_cleared() {
        advance_level(state, &mut events);
    }

    // Formation
    if state.formation.advance(state.profile.hostile_speed, &state.settings) {
        log::debug!("Formation turned, heading {}", state.formation.direction);
    }

    if state.formation.breached(&state.ship.bounds()) {
        log::info!("Ship hit");
        events.push(GameEvent::ShipHit);
        lose_life(state, scoreboard, &mut events)?;
    }

    Ok(events)
}

/// Reset stats and entities and begin play at `difficulty`
pub fn start_session(state: &mut GameState, difficulty: Difficulty) {
    let base_speed = state.mode.hostile_base_speed(&state.settings);
    state.stats.reset(state.settings.ship_limit);
    state.profile.initialize(&state.settings, difficulty, base_speed);

    state.projectiles.clear();
    state.formation.reset_direction();
    state.formation.rebuild(&state.settings, state.ship.size.x);
    state.ship.center();

    state.phase = GamePhase::Active;
    log::info!("{} session started on {}", state.mode.as_str(), difficulty.as_str());
}

fn fire_projectile(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.projectiles.len() >= state.settings.bullets_allowed {
        return;
    }
    let size = glam::Vec2::new(state.settings.bullet_width, state.settings.bullet_height);
    state.projectiles.push(Projectile::fired_from(state.ship.muzzle(), size));
    debug_assert!(state.projectiles.len() <= state.settings.bullets_allowed);
    events.push(GameEvent::Fired);
}

/// Update the session high score and, if beaten, the stored record
fn check_scores(
    state: &mut GameState,
    scoreboard: &mut Scoreboard,
    events: &mut Vec<GameEvent>,
) -> Result<(), StoreError> {
    if scoreboard.check_high_score(&mut state.stats) {
        events.push(GameEvent::NewHighScore(state.stats.high_score));
    }
    if scoreboard.check_all_time_high_score(&state.stats)? {
        events.push(GameEvent::NewRecord(state.stats.high_score));
    }
    Ok(())
}

/// Formation cleared: fresh formation, faster game, next level
fn advance_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.projectiles.clear();
    state.formation.rebuild(&state.settings, state.ship.size.x);
    state.profile.speed_up();
    state.stats.level += 1;

    log::info!("Level {} reached", state.stats.level);
    events.push(GameEvent::LevelCleared {
        level: state.stats.level,
    });
}

fn lose_life(
    state: &mut GameState,
    scoreboard: &mut Scoreboard,
    events: &mut Vec<GameEvent>,
) -> Result<(), StoreError> {
    debug_assert!(state.stats.lives > 0, "life lost with no ships left");
    state.stats.lives = state.stats.lives.saturating_sub(1);

    if state.stats.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.ship.moving_up = false;
        state.ship.moving_down = false;
        check_scores(state, scoreboard, events)?;

        log::info!("Game over with score {}", state.stats.score);
        events.push(GameEvent::GameOver {
            score: state.stats.score,
        });
        return Ok(());
    }

    state.projectiles.clear();
    state.formation.rebuild(&state.settings, state.ship.size.x);
    state.ship.center();
    state.phase = match state.settings.settle_ticks {
        0 => GamePhase::Active,
        ticks_left => GamePhase::SettlingAfterHit { ticks_left },
    };

    log::info!("Ship lost, {} left", state.stats.lives);
    events.push(GameEvent::LifeLost {
        lives_left: state.stats.lives,
    });
    Ok(())
}
