//! Level-gated hindrance spawning
//!
//! Each tick advances a timer. When it expires the timer resets, the next
//! interval is drawn from the current level's range and one weighted spawn
//! attempt is made. Levels with no tuning entry wait a fixed fallback interval
//! and spawn nothing.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::hindrance::{HindranceKind, PrefabRegistry};
use crate::platform::CameraView;
use crate::tuning::LevelConfigTable;

use super::placement::{SPAWN_PADDING, spawn_position};
use super::weighted::roll_weighted;

/// Interval used before the first resample and for unconfigured levels (seconds)
pub const FALLBACK_INTERVAL: f32 = 5.0;

/// Read-only view of the player's current level
pub trait LevelSource {
    fn level(&self) -> u32;
}

impl LevelSource for u32 {
    fn level(&self) -> u32 {
        *self
    }
}

/// Creates hindrance entities in the host world
pub trait HindranceFactory {
    fn instantiate(&mut self, kind: HindranceKind, asset: &str, position: Vec2);
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnOutcome {
    /// Timer still running
    Waiting,
    /// Timer expired but the level has no tuning entry
    NoConfig { level: u32 },
    /// Weight table selected nothing (empty or all-zero)
    NothingSelected,
    /// A kind was selected but no asset is registered for it
    MissingPrefab(HindranceKind),
    /// One entity was created
    Spawned { kind: HindranceKind, position: Vec2 },
}

impl SpawnOutcome {
    pub fn is_spawn(&self) -> bool {
        matches!(self, SpawnOutcome::Spawned { .. })
    }
}

/// Elapsed time against the current spawn interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    pub elapsed: f32,
    pub current_interval: f32,
}

impl Default for SpawnTimer {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            current_interval: FALLBACK_INTERVAL,
        }
    }
}

/// Periodic weighted spawner
#[derive(Debug)]
pub struct SpawnScheduler<R: Rng = Pcg32> {
    levels: LevelConfigTable,
    prefabs: PrefabRegistry,
    timer: SpawnTimer,
    padding: f32,
    fallback_interval: f32,
    rng: R,
}

impl SpawnScheduler<Pcg32> {
    /// Scheduler seeded from the thread RNG
    pub fn new(levels: LevelConfigTable, prefabs: PrefabRegistry) -> Self {
        Self::with_rng(levels, prefabs, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Scheduler with a reproducible seed
    pub fn seeded(levels: LevelConfigTable, prefabs: PrefabRegistry, seed: u64) -> Self {
        Self::with_rng(levels, prefabs, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> SpawnScheduler<R> {
    pub fn with_rng(levels: LevelConfigTable, prefabs: PrefabRegistry, rng: R) -> Self {
        Self {
            levels,
            prefabs,
            timer: SpawnTimer::default(),
            padding: SPAWN_PADDING,
            fallback_interval: FALLBACK_INTERVAL,
            rng,
        }
    }

    /// Override the view-edge padding (fraction of the view, clamped to `[0, 0.5]`)
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.clamp(0.0, 0.5);
        self
    }

    /// Override the fallback interval; also applied to a not-yet-started timer
    pub fn with_fallback_interval(mut self, seconds: f32) -> Self {
        if self.timer.current_interval == self.fallback_interval {
            self.timer.current_interval = seconds;
        }
        self.fallback_interval = seconds;
        self
    }

    /// Draw the first interval for the starting level
    pub fn start(&mut self, levels: &dyn LevelSource) {
        self.timer.elapsed = 0.0;
        self.resample_interval(levels.level());
    }

    /// Advance by `dt` seconds; at most one spawn attempt per call
    pub fn tick(
        &mut self,
        dt: f32,
        levels: &dyn LevelSource,
        camera: &dyn CameraView,
        factory: &mut dyn HindranceFactory,
    ) -> SpawnOutcome {
        if dt.is_finite() && dt > 0.0 {
            self.timer.elapsed += dt;
        }
        if self.timer.elapsed < self.timer.current_interval {
            return SpawnOutcome::Waiting;
        }

        self.timer.elapsed = 0.0;
        let level = levels.level();
        self.resample_interval(level);
        self.try_spawn(level, camera, factory)
    }

    fn resample_interval(&mut self, level: u32) {
        self.timer.current_interval = match self.levels.get(level) {
            Some(data) if !(data.min_interval.is_finite() && data.max_interval.is_finite()) => {
                log::warn!(
                    "Non-finite spawn interval for level {level} ({}..{}); waiting {}s",
                    data.min_interval,
                    data.max_interval,
                    self.fallback_interval
                );
                self.fallback_interval
            }
            Some(data) => {
                let (lo, hi) = if data.min_interval <= data.max_interval {
                    (data.min_interval, data.max_interval)
                } else {
                    (data.max_interval, data.min_interval)
                };
                self.rng.random_range(lo..=hi)
            }
            None => {
                log::warn!("No spawn data for level {level}; waiting {}s", self.fallback_interval);
                self.fallback_interval
            }
        };
    }

    fn try_spawn(
        &mut self,
        level: u32,
        camera: &dyn CameraView,
        factory: &mut dyn HindranceFactory,
    ) -> SpawnOutcome {
        let Some(data) = self.levels.get(level) else {
            return SpawnOutcome::NoConfig { level };
        };

        let Some(kind) = roll_weighted(&data.spawn_chances, &mut self.rng) else {
            return SpawnOutcome::NothingSelected;
        };

        let Some(asset) = self.prefabs.get(kind) else {
            log::warn!("No prefab registered for {kind}");
            return SpawnOutcome::MissingPrefab(kind);
        };

        let position = spawn_position(kind, self.padding, camera, &mut self.rng);
        factory.instantiate(kind, asset, position);
        log::debug!("Spawned {kind} at ({:.2}, {:.2})", position.x, position.y);
        SpawnOutcome::Spawned { kind, position }
    }

    pub fn timer(&self) -> SpawnTimer {
        self.timer
    }

    pub fn levels(&self) -> &LevelConfigTable {
        &self.levels
    }

    /// Replace the level table (e.g. after hot-reloading tuning)
    pub fn set_levels(&mut self, levels: LevelConfigTable) {
        self.levels = levels;
    }

    pub fn prefabs_mut(&mut self) -> &mut PrefabRegistry {
        &mut self.prefabs
    }
}
