//! Rendering module
//!
//! The simulation hands a `Frame` to whatever implements `Renderer`. The
//! headless build ships `LogRenderer`, which summarises frames to the log.

pub mod frame;

pub use frame::Frame;

use crate::sim::GamePhase;

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Logs a one-line summary every `every` frames and on phase changes
#[derive(Debug)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
    last_phase: Option<GamePhase>,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            last_phase: None,
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        let phase_changed = self.last_phase != Some(frame.phase);
        if phase_changed || self.frames % self.every == 0 {
            log::info!(
                "[{:>6}] {:?} score {} high {} record {} level {} ships {} hostiles {} shots {}",
                self.frames,
                frame.phase,
                frame.hud.score,
                frame.hud.high_score,
                frame.hud.record,
                frame.hud.level,
                frame.hud.ships,
                frame.hostiles.len(),
                frame.projectiles.len(),
            );
            for button in frame.buttons {
                log::debug!("button {:?} at {:?}", button.label, button.bounds.center());
            }
        }
        self.last_phase = Some(frame.phase);
        self.frames += 1;
    }
}
