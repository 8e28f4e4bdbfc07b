//! Simulation module
//!
//! All gameplay logic lives here. Advanced only by the host's per-frame tick:
//! - No threads, no blocking, no deferred dispatch
//! - Events delivered synchronously at the call site
//! - Engine collaborators (camera, entity creation, storage) behind traits

pub mod events;
pub mod placement;
pub mod progression;
pub mod spawner;
pub mod weighted;

pub use events::{ObserverId, Observers, ProgressionEvent};
pub use placement::{SPAWN_PADDING, spawn_position, viewport_point};
pub use progression::{
    BASE_SPEED, EXP_TABLE, MAX_LEVEL, Player, SPEED_PER_LEVEL, UNREACHABLE_EXP, threshold_for,
};
pub use spawner::{
    FALLBACK_INTERVAL, HindranceFactory, LevelSource, SpawnOutcome, SpawnScheduler, SpawnTimer,
};
pub use weighted::{pick_weighted, roll_weighted, total_weight};
