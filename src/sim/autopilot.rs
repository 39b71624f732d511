//! Demo autopilot
//!
//! Produces the input a simple player would: line up with the nearest
//! hostile, leading it by the projectile's flight time, and fire when
//! lined up. Deterministic given the state.

use super::state::GameState;
use super::tick::TickInput;

/// Input for the next tick while a session is running
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if !state.is_active() {
        return input;
    }

    let ship = state.ship.bounds();
    let ship_y = ship.center().y;

    // Nearest column first, then the row closest to the ship
    let Some(target) = state.formation.hostiles.iter().min_by(|a, b| {
        a.pos
            .x
            .total_cmp(&b.pos.x)
            .then((a.bounds().center().y - ship_y).abs().total_cmp(&(b.bounds().center().y - ship_y).abs()))
    }) else {
        return input;
    };

    let target = target.bounds();
    let flight_ticks = (target.left() - ship.right()).max(0.0) / state.profile.bullet_speed.max(f32::EPSILON);
    let lead = state.formation.direction * state.profile.hostile_speed * flight_ticks;
    let half = target.size.y / 2.0;
    let aim_y = reflect_into(target.center().y + lead, half, state.settings.screen_height - half);

    let dy = aim_y - ship_y;
    let deadband = state.profile.ship_speed;
    input.move_down = dy > deadband;
    input.move_up = dy < -deadband;

    let window = (target.size.y - state.settings.bullet_height) / 2.0 * 0.8;
    input.fire = dy.abs() < window;
    input
}

/// Fold `y` back into `[lo, hi]` as if it bounced off both ends
fn reflect_into(y: f32, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if span <= 0.0 {
        return lo;
    }
    let m = (y - lo).rem_euclid(2.0 * span);
    if m <= span { lo + m } else { lo + 2.0 * span - m }
}
