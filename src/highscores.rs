//! High score leaderboard system
//!
//! Tracks the top 3 cumulative run scores plus the score of the most recent
//! run. Backed by a [`ScoreStore`] and re-read on every update so the stored
//! board is always the source of truth.

use serde::{Deserialize, Serialize};

use crate::persistence::{LAST_SCORE_KEY, ScoreStore, StoreError, high_score_key};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 3;

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// Best scores, descending
    pub entries: Vec<u32>,
    /// Cumulative score of the run that ended last
    pub last_score: u32,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            last_score: 0,
        }
    }

    /// Merge a finished run into the board.
    ///
    /// Appends, sorts descending and keeps the best [`MAX_HIGH_SCORES`].
    /// Returns the rank achieved (1-indexed) or None if the score fell off.
    pub fn insert(&mut self, score: u32) -> Option<usize> {
        self.last_score = score;
        self.entries.push(score);
        self.entries.sort_unstable_by(|a, b| b.cmp(a));
        self.entries.truncate(MAX_HIGH_SCORES);

        self.entries.iter().position(|&e| e == score).map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().copied()
    }

    /// Read the board from a store; absent slots read as 0
    pub fn load(store: &dyn ScoreStore) -> Self {
        let entries = (0..MAX_HIGH_SCORES)
            .map(|i| store.get_int(&high_score_key(i), 0))
            .collect();
        Self {
            entries,
            last_score: store.get_int(LAST_SCORE_KEY, 0),
        }
    }

    /// Write every slot and the last score, then flush
    pub fn save(&self, store: &mut dyn ScoreStore) -> Result<(), StoreError> {
        store.set_int(LAST_SCORE_KEY, self.last_score);
        for i in 0..MAX_HIGH_SCORES {
            store.set_int(&high_score_key(i), self.entries.get(i).copied().unwrap_or(0));
        }
        store.flush()?;
        log::info!("High scores saved (best {:?})", self.top_score());
        Ok(())
    }

    /// Load, merge `score` and persist durably. Returns the updated board.
    pub fn record_run(store: &mut dyn ScoreStore, score: u32) -> Result<Self, StoreError> {
        let mut board = Self::load(store);
        if let Some(rank) = board.insert(score) {
            log::info!("Run score {score} placed #{rank}");
        }
        board.save(store)?;
        Ok(board)
    }
}
