//! Persistent key-value storage for run results
//!
//! Features:
//! - Integer-valued keys with a default for absent entries
//! - Explicit flush: a successful `flush` means the values survive a crash
//! - JSON file backend with temp-file + rename replacement (native)
//! - String item backend store, LocalStorage flavour on wasm32

pub mod store;

pub use store::{FileStore, ItemStorage, ItemStore, MemoryStore, ScoreStore, StoreError};

#[cfg(target_arch = "wasm32")]
pub use store::{BrowserStorage, LocalStorageStore};

/// Key holding the cumulative score of the most recent run
pub const LAST_SCORE_KEY: &str = "LastScore";

/// Key for the high score slot `index` (0 = best)
pub fn high_score_key(index: usize) -> String {
    format!("HighScore{index}")
}
