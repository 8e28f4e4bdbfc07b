//! Player progression: score, levels and end-of-run bookkeeping
//!
//! `score` is experience toward the next level and keeps its remainder across
//! level-ups; `cumulative_score` is the run total and only resets on death.

use crate::highscores::HighScores;
use crate::persistence::{ScoreStore, StoreError};

use super::events::{ObserverId, Observers, ProgressionEvent};
use super::spawner::LevelSource;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 9;

/// Experience needed to leave each level (index = level - 1)
pub const EXP_TABLE: [u32; MAX_LEVEL as usize] = [
    1000, 2000, 4000, 7000, 10000, 15000, 20000, 27000, 35000,
];

/// Threshold reported for levels outside the table
pub const UNREACHABLE_EXP: u32 = u32::MAX;

/// Default movement speed at level 1
pub const BASE_SPEED: f32 = 4.0;

/// Movement speed gained per level-up
pub const SPEED_PER_LEVEL: f32 = 0.5;

/// Experience needed to advance from `level` to `level + 1`
pub fn threshold_for(level: u32) -> u32 {
    if (1..=MAX_LEVEL).contains(&level) {
        EXP_TABLE[(level - 1) as usize]
    } else {
        UNREACHABLE_EXP
    }
}

/// Score/level state for one player session
#[derive(Debug)]
pub struct Player {
    score: u32,
    cumulative_score: u32,
    level: u32,
    score_for_level: u32,
    base_speed: f32,
    speed: f32,
    invincible: bool,
    observers: Observers,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Fresh level-1 player
    pub fn new() -> Self {
        Self::with_state(0, 1)
    }

    /// Player starting at `level` with `score` experience.
    ///
    /// The level is clamped into `1..=MAX_LEVEL`. Experience at or past the
    /// threshold is levelled through without raising events, so a freshly
    /// built player always has `score < max_exp()` below the top level.
    pub fn with_state(score: u32, level: u32) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let mut player = Self {
            score,
            cumulative_score: 0,
            level,
            score_for_level: threshold_for(level),
            base_speed: BASE_SPEED,
            speed: BASE_SPEED,
            invincible: false,
            observers: Observers::new(),
        };
        while player.level < MAX_LEVEL && player.score >= player.score_for_level {
            player.level_up();
        }
        player
    }

    /// Override the starting speed
    pub fn with_base_speed(mut self, speed: f32) -> Self {
        self.speed += speed - self.base_speed;
        self.base_speed = speed;
        self
    }

    /// Register a callback for progression events
    pub fn subscribe(&mut self, callback: impl FnMut(&ProgressionEvent) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Add earned score; may cross several levels in one call
    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
        self.cumulative_score = self.cumulative_score.saturating_add(amount);
        self.observers
            .emit(ProgressionEvent::ScoreChanged(self.cumulative_score));

        while self.level < MAX_LEVEL && self.score >= self.score_for_level {
            if self.level_up() {
                self.observers.emit(ProgressionEvent::LevelUp);
            }
        }
    }

    fn level_up(&mut self) -> bool {
        if self.level >= MAX_LEVEL {
            return false;
        }

        self.score -= self.score_for_level;
        self.level += 1;
        self.score_for_level = threshold_for(self.level);
        self.speed += SPEED_PER_LEVEL;

        log::info!("Player level up! level={}, score={}", self.level, self.score);
        true
    }

    /// End the run.
    ///
    /// Merges the run into the high score board and flushes it, notifies
    /// observers, then resets score, level and invincibility (speed is kept).
    /// The reset happens even
    /// when persisting fails; the error is returned afterwards.
    pub fn die(&mut self, store: &mut dyn ScoreStore) -> Result<HighScores, StoreError> {
        let final_score = self.cumulative_score;

        let saved = HighScores::record_run(store, final_score);
        if let Err(e) = &saved {
            log::error!("Failed to save run score {final_score}: {e}");
        }

        self.observers.emit(ProgressionEvent::Died(final_score));
        self.reset();
        saved
    }

    fn reset(&mut self) {
        self.invincible = false;
        self.score = 0;
        self.cumulative_score = 0;
        self.level = 1;
        self.score_for_level = threshold_for(self.level);
    }

    /// Flag only; timing the window is the caller's job
    pub fn set_invincible(&mut self) {
        self.invincible = true;
    }

    pub fn clear_invincible(&mut self) {
        self.invincible = false;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn cumulative_score(&self) -> u32 {
        self.cumulative_score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Experience collected toward the next level
    pub fn current_exp(&self) -> u32 {
        self.score
    }

    /// Experience needed to leave the current level
    pub fn max_exp(&self) -> u32 {
        self.score_for_level
    }

    /// Progress toward the next level in `[0, 1]`; saturated at max level
    pub fn exp_progress(&self) -> f32 {
        if self.level >= MAX_LEVEL || self.score_for_level == 0 {
            return 1.0;
        }
        (self.score as f32 / self.score_for_level as f32).clamp(0.0, 1.0)
    }
}

impl LevelSource for Player {
    fn level(&self) -> u32 {
        self.level
    }
}
