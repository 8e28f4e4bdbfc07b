//! Crayonfish - an underwater score-chasing arcade game core
//!
//! Core modules:
//! - `sim`: Level-gated hindrance spawning and player progression
//! - `hindrance`: Hindrance kinds and their creatable assets
//! - `tuning`: Data-driven game balance (per-level spawn tables)
//! - `highscores`: Top-3 leaderboard persisted across runs
//! - `persistence`: Durable key-value storage backends
//! - `platform`: Camera collaborator and logger setup
//! - `session`: Explicit context object wiring it all together

pub mod highscores;
pub mod hindrance;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use hindrance::{HindranceKind, PrefabRegistry};
pub use session::GameSession;
pub use settings::Settings;
pub use tuning::{ConfigError, LevelConfig, LevelConfigTable, SpawnChance, Tuning};

/// Game loop constants
pub mod consts {
    /// Fixed frame step for headless runs (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta fed to the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;
}
