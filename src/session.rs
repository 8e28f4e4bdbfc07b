//! Game session context
//!
//! One value owning everything the per-frame loop touches. The host creates
//! it once and passes it around explicitly; nothing here is global.

use crate::highscores::HighScores;
use crate::persistence::{ScoreStore, StoreError};
use crate::platform::CameraView;
use crate::settings::Settings;
use crate::sim::{HindranceFactory, ObserverId, Player, ProgressionEvent, SpawnOutcome, SpawnScheduler};
use crate::tuning::Tuning;

/// Player, spawner and their collaborators for one play session
pub struct GameSession {
    player: Player,
    spawner: SpawnScheduler,
    camera: Box<dyn CameraView>,
    store: Box<dyn ScoreStore>,
}

impl GameSession {
    pub fn new(
        settings: &Settings,
        tuning: Tuning,
        camera: Box<dyn CameraView>,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let player = Player::with_state(0, settings.effective_starting_level())
            .with_base_speed(settings.starting_speed);

        let spawner = match settings.seed {
            Some(seed) => SpawnScheduler::seeded(tuning.levels, tuning.prefabs, seed),
            None => SpawnScheduler::new(tuning.levels, tuning.prefabs),
        };
        let mut spawner = spawner
            .with_padding(settings.effective_spawn_padding())
            .with_fallback_interval(settings.effective_fallback_interval());
        spawner.start(&player);

        log::info!(
            "Session started at level {} (first spawn in {:.2}s)",
            player.level(),
            spawner.timer().current_interval
        );

        Self {
            player,
            spawner,
            camera,
            store,
        }
    }

    /// Advance the spawner by one frame
    pub fn tick(&mut self, dt: f32, factory: &mut dyn HindranceFactory) -> SpawnOutcome {
        self.spawner
            .tick(dt, &self.player, &*self.camera, factory)
    }

    pub fn add_score(&mut self, amount: u32) {
        self.player.add_score(amount);
    }

    pub fn set_invincible(&mut self) {
        self.player.set_invincible();
    }

    /// End the current run; the player is reset even if saving fails
    pub fn die(&mut self) -> Result<HighScores, StoreError> {
        self.player.die(&mut *self.store)
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ProgressionEvent) + 'static) -> ObserverId {
        self.player.subscribe(callback)
    }

    /// Current persisted board
    pub fn high_scores(&self) -> HighScores {
        HighScores::load(&*self.store)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn spawner(&self) -> &SpawnScheduler {
        &self.spawner
    }

    /// Swap the camera (e.g. after a viewport resize)
    pub fn set_camera(&mut self, camera: Box<dyn CameraView>) {
        self.camera = camera;
    }
}
