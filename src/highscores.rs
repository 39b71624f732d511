//! Scoreboard: session high score, all-time record and HUD text
//!
//! The all-time record lives in a `ScoreStore`; the scoreboard caches it and
//! re-reads the store before confirming a new record.

use serde::{Deserialize, Serialize};

use crate::persistence::{ScoreStore, StoreError};
use crate::sim::SessionStats;

/// Prepared HUD strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudText {
    pub score: String,
    pub high_score: String,
    pub record: String,
    pub level: String,
    /// Ship icons to draw
    pub ships: u32,
}

pub struct Scoreboard {
    record: u64,
    store: Box<dyn ScoreStore>,
}

impl std::fmt::Debug for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoreboard").field("record", &self.record).finish_non_exhaustive()
    }
}

impl Scoreboard {
    /// Load the record from `store`
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let record = store.load();
        log::info!("All-time record: {}", record);
        Self { record, store }
    }

    /// Last known all-time record
    pub fn record(&self) -> u64 {
        self.record
    }

    /// Raise the session high score to the current score if it beats it
    pub fn check_high_score(&self, stats: &mut SessionStats) -> bool {
        if stats.score > stats.high_score {
            stats.high_score = stats.score;
            true
        } else {
            false
        }
    }

    /// Persist the session high score if it beats the stored record.
    ///
    /// Returns true when a new record was written.
    pub fn check_all_time_high_score(&mut self, stats: &SessionStats) -> Result<bool, StoreError> {
        if stats.high_score <= self.record {
            return Ok(false);
        }

        // Another run may have raised the record since we loaded it
        let stored = self.store.load();
        if stats.high_score <= stored {
            self.record = stored;
            return Ok(false);
        }

        self.store.save(stats.high_score)?;
        self.record = stats.high_score;
        log::info!("New all-time record: {}", self.record);
        Ok(true)
    }

    pub fn hud(&self, stats: &SessionStats) -> HudText {
        HudText {
            score: format_score(stats.score),
            high_score: format_score(stats.high_score),
            record: format_score(self.record),
            level: stats.level.to_string(),
            ships: stats.lives,
        }
    }
}

/// Round to the nearest ten (halves to even) and group thousands:
/// 12345 -> "12,340", 12355 -> "12,360"
pub fn format_score(score: u64) -> String {
    let (tens, ones) = (score / 10, score % 10);
    let tens = match ones {
        0..=4 => tens,
        5 if tens % 2 == 0 => tens,
        _ => tens + 1,
    };
    let rounded = tens.saturating_mul(10);
    let digits = rounded.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
