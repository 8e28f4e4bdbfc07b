use std::cell::RefCell;
use std::rc::Rc;

use crayonfish::persistence::{FileStore, MemoryStore, ScoreStore};
use crayonfish::platform::OrthographicCamera;
use crayonfish::sim::{HindranceFactory, ProgressionEvent, SpawnOutcome};
use crayonfish::{
    GameSession, HighScores, HindranceKind, LevelConfig, LevelConfigTable, PrefabRegistry,
    Settings, SpawnChance, Tuning,
};
use glam::Vec2;

#[derive(Default)]
struct World {
    spawned: Vec<(HindranceKind, Vec2)>,
}

impl HindranceFactory for World {
    fn instantiate(&mut self, kind: HindranceKind, _asset: &str, position: Vec2) {
        self.spawned.push((kind, position));
    }
}

fn seeded_settings() -> Settings {
    Settings {
        seed: Some(2024),
        ..Default::default()
    }
}

fn blowfish_level_one(min: f32, max: f32) -> Tuning {
    Tuning {
        levels: LevelConfigTable::new(vec![LevelConfig::new(
            1,
            min,
            max,
            vec![SpawnChance::new(HindranceKind::Blowfish, 1.0)],
        )]),
        prefabs: PrefabRegistry::with_defaults(),
    }
}

#[test]
fn level_one_blowfish_spawns_once_after_max_interval() {
    let mut session = GameSession::new(
        &seeded_settings(),
        blowfish_level_one(4.0, 4.0),
        Box::new(OrthographicCamera::default()),
        Box::new(MemoryStore::new()),
    );
    let mut world = World::default();

    let mut attempts = 0;
    for _ in 0..8 {
        let outcome = session.tick(0.5, &mut world);
        if outcome != SpawnOutcome::Waiting {
            attempts += 1;
        }
    }

    assert_eq!(attempts, 1);
    assert_eq!(world.spawned.len(), 1);
    assert_eq!(world.spawned[0].0, HindranceKind::Blowfish);
}

#[test]
fn variable_interval_never_fires_before_minimum() {
    let mut session = GameSession::new(
        &seeded_settings(),
        blowfish_level_one(2.0, 4.0),
        Box::new(OrthographicCamera::default()),
        Box::new(MemoryStore::new()),
    );
    let mut world = World::default();

    // 1.9 seconds of frames: below the shortest interval
    for _ in 0..19 {
        assert_eq!(session.tick(0.1, &mut world), SpawnOutcome::Waiting);
    }
    // By 4 seconds the first attempt has fired
    for _ in 0..22 {
        session.tick(0.1, &mut world);
    }
    assert!(!world.spawned.is_empty());
}

#[test]
fn events_observed_through_session() {
    let mut session = GameSession::new(
        &seeded_settings(),
        Tuning::default(),
        Box::new(OrthographicCamera::default()),
        Box::new(MemoryStore::new()),
    );
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.subscribe(move |e| sink.borrow_mut().push(*e));

    session.add_score(1200);
    session.die().unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            ProgressionEvent::ScoreChanged(1200),
            ProgressionEvent::LevelUp,
            ProgressionEvent::Died(1200),
        ]
    );
}

#[test]
fn high_scores_persist_across_sessions_on_disk() {
    let path = std::env::temp_dir().join(format!("crayonfish-it-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    for run in [4000u32, 15000, 700, 9000] {
        let mut session = GameSession::new(
            &seeded_settings(),
            Tuning::default(),
            Box::new(OrthographicCamera::default()),
            Box::new(FileStore::open(&path)),
        );
        session.add_score(run);
        session.die().unwrap();
    }

    let store = FileStore::open(&path);
    let board = HighScores::load(&store);
    assert_eq!(board.entries, vec![15000, 9000, 4000]);
    assert_eq!(store.get_int("LastScore", 0), 9000);

    let _ = std::fs::remove_file(&path);
}
