//! Crayonfish entry point
//!
//! Headless native run: loads settings and tuning, drives a session at a fixed
//! frame rate with scripted scoring, and logs spawns and the final board.
//!
//! Usage: `crayonfish [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use crayonfish::consts::*;
    use crayonfish::persistence::FileStore;
    use crayonfish::platform::{OrthographicCamera, init_logging};
    use crayonfish::sim::{HindranceFactory, ProgressionEvent};
    use crayonfish::{GameSession, HindranceKind, Settings, Tuning};
    use glam::Vec2;

    /// Logs every created hindrance instead of instantiating it
    struct LogFactory {
        spawned: usize,
    }

    impl HindranceFactory for LogFactory {
        fn instantiate(&mut self, kind: HindranceKind, asset: &str, position: Vec2) {
            self.spawned += 1;
            log::info!("Spawn {kind} [{asset}] at ({:.2}, {:.2})", position.x, position.y);
        }
    }

    init_logging();
    log::info!("Crayonfish (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let settings = Settings::load(settings_path.as_deref());
    let tuning = Tuning::load_or_default(settings.tuning_path.as_deref());
    let store = FileStore::open(&settings.save_path);

    let mut session = GameSession::new(
        &settings,
        tuning,
        Box::new(OrthographicCamera::default()),
        Box::new(store),
    );
    session.subscribe(|event| {
        if let ProgressionEvent::Died(score) = event {
            log::info!("Run over with {score} points");
        }
    });

    let mut factory = LogFactory { spawned: 0 };
    let frames = (seconds / FRAME_DT).ceil() as u32;
    let mut accumulator = 0.0;

    for _ in 0..frames {
        let outcome = session.tick(FRAME_DT.min(MAX_FRAME_DT), &mut factory);
        if outcome.is_spawn() {
            // Scripted scoring: each dodge is worth a flat amount
            session.add_score(250);
        }

        accumulator += FRAME_DT;
        if accumulator >= 1.0 {
            accumulator -= 1.0;
            session.add_score(100);
        }
    }

    let player = session.player();
    log::info!(
        "Reached level {} with {} points ({:.0}% to next)",
        player.level(),
        player.cumulative_score(),
        player.exp_progress() * 100.0
    );

    match session.die() {
        Ok(board) => {
            println!("\nHigh scores:");
            for (i, score) in board.entries.iter().enumerate() {
                println!("  {}. {}", i + 1, score);
            }
            println!("Last run: {} ({} hindrances spawned)", board.last_score, factory.spawned);
        }
        Err(e) => log::error!("Could not save high scores: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host embeds the library directly
}
