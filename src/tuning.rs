//! Data-driven game balance
//!
//! Per-level spawn cadence and hindrance weights, authored as JSON and loaded
//! before the first tick. Levels missing from the table are legal: the spawner
//! falls back to a fixed interval and spawns nothing for them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hindrance::{HindranceKind, PrefabRegistry};

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level {level}: {kind} has negative weight {weight}")]
    NegativeWeight {
        level: u32,
        kind: HindranceKind,
        weight: f32,
    },
    #[error("level {level}: invalid interval range [{min}, {max}]")]
    InvalidInterval { level: u32, min: f32, max: f32 },
}

/// Relative likelihood of one kind within a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnChance {
    #[serde(alias = "type")]
    pub kind: HindranceKind,
    #[serde(alias = "spawnChance", alias = "spawn_chance")]
    pub weight: f32,
}

impl SpawnChance {
    pub const fn new(kind: HindranceKind, weight: f32) -> Self {
        Self { kind, weight }
    }
}

/// Spawn settings for a single player level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    /// Shortest delay between spawn attempts (seconds)
    #[serde(alias = "minInterval")]
    pub min_interval: f32,
    /// Longest delay between spawn attempts (seconds)
    #[serde(alias = "maxInterval")]
    pub max_interval: f32,
    /// Weighted kinds; table order breaks ties on boundary draws
    #[serde(alias = "spawnChances", default)]
    pub spawn_chances: Vec<SpawnChance>,
}

impl LevelConfig {
    pub fn new(level: u32, min_interval: f32, max_interval: f32, spawn_chances: Vec<SpawnChance>) -> Self {
        Self {
            level,
            min_interval,
            max_interval,
            spawn_chances,
        }
    }

    /// Sum of all weights in the table
    pub fn total_weight(&self) -> f32 {
        self.spawn_chances.iter().map(|c| c.weight).sum()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let min = self.min_interval;
        let max = self.max_interval;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidInterval {
                level: self.level,
                min,
                max,
            });
        }
        if let Some(bad) = self
            .spawn_chances
            .iter()
            .find(|c| !(c.weight.is_finite() && c.weight >= 0.0))
        {
            return Err(ConfigError::NegativeWeight {
                level: self.level,
                kind: bad.kind,
                weight: bad.weight,
            });
        }
        Ok(())
    }
}

/// Level -> spawn settings lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelConfigTable {
    levels: Vec<LevelConfig>,
}

impl Default for LevelConfigTable {
    fn default() -> Self {
        use HindranceKind::*;

        let c = SpawnChance::new;
        Self {
            levels: vec![
                LevelConfig::new(1, 3.0, 5.0, vec![c(Blowfish, 1.0)]),
                LevelConfig::new(2, 2.5, 4.5, vec![c(Blowfish, 3.0), c(Seahorse, 1.0)]),
                LevelConfig::new(3, 2.5, 4.0, vec![c(Blowfish, 3.0), c(Seahorse, 2.0)]),
                LevelConfig::new(
                    4,
                    2.0,
                    4.0,
                    vec![c(Blowfish, 3.0), c(Seahorse, 2.0), c(Octopus, 1.0)],
                ),
                LevelConfig::new(
                    5,
                    2.0,
                    3.5,
                    vec![c(Blowfish, 2.0), c(Seahorse, 2.0), c(Octopus, 2.0)],
                ),
                LevelConfig::new(
                    6,
                    1.8,
                    3.2,
                    vec![c(Blowfish, 2.0), c(Seahorse, 2.0), c(Octopus, 2.0), c(Fisher, 1.0)],
                ),
                LevelConfig::new(
                    7,
                    1.5,
                    3.0,
                    vec![c(Blowfish, 2.0), c(Seahorse, 2.0), c(Octopus, 2.0), c(Fisher, 2.0)],
                ),
                LevelConfig::new(
                    8,
                    1.2,
                    2.6,
                    vec![c(Blowfish, 2.0), c(Seahorse, 3.0), c(Octopus, 3.0), c(Fisher, 2.0)],
                ),
                LevelConfig::new(
                    9,
                    1.0,
                    2.2,
                    vec![c(Blowfish, 2.0), c(Seahorse, 3.0), c(Octopus, 3.0), c(Fisher, 3.0)],
                ),
            ],
        }
    }
}

impl LevelConfigTable {
    /// Build a table from explicit entries (not validated)
    pub fn new(levels: Vec<LevelConfig>) -> Self {
        Self { levels }
    }

    /// Table with no levels: every tick uses the fallback interval
    pub fn empty() -> Self {
        Self { levels: Vec::new() }
    }

    /// Exact-match lookup; the first entry for a level wins
    pub fn get(&self, level: u32) -> Option<&LevelConfig> {
        self.levels.iter().find(|d| d.level == level)
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Reject negative weights and malformed interval ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.levels.iter().try_for_each(LevelConfig::validate)
    }

    /// Parse and validate a JSON level list
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }
}

/// Complete balance document: level table plus prefab assignments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    #[serde(default)]
    pub levels: LevelConfigTable,
    #[serde(default = "PrefabRegistry::with_defaults")]
    pub prefabs: PrefabRegistry,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            levels: LevelConfigTable::default(),
            prefabs: PrefabRegistry::with_defaults(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.levels.validate()?;
        Ok(tuning)
    }

    /// Load a tuning document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded tuning from {} ({} levels)",
            path.display(),
            tuning.levels.len()
        );
        Ok(tuning)
    }

    /// Load from disk, falling back to the built-in table on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path.map(Self::load) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("{e}; using built-in tuning");
                Self::default()
            }
            None => {
                log::info!("Using built-in tuning");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_every_level() {
        let table = LevelConfigTable::default();
        for level in 1..=crate::sim::MAX_LEVEL {
            let data = table.get(level).expect("level present");
            assert!(data.min_interval <= data.max_interval);
            assert!(data.total_weight() > 0.0);
        }
        assert!(table.validate().is_ok());
        assert!(table.get(0).is_none());
        assert!(table.get(10).is_none());
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let table = LevelConfigTable::new(vec![
            LevelConfig::new(2, 1.0, 2.0, vec![]),
            LevelConfig::new(2, 9.0, 9.0, vec![]),
        ]);
        assert_eq!(table.get(2).map(|d| d.min_interval), Some(1.0));
    }

    #[test]
    fn test_from_json_accepts_authored_field_names() {
        let json = r#"[
            {"level": 1, "minInterval": 2.0, "maxInterval": 4.0,
             "spawnChances": [{"type": "Blowfish", "spawnChance": 1.0}]}
        ]"#;
        let table = LevelConfigTable::from_json(json).unwrap();
        let data = table.get(1).unwrap();
        assert_eq!(data.max_interval, 4.0);
        assert_eq!(data.spawn_chances[0].kind, HindranceKind::Blowfish);
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let table = LevelConfigTable::new(vec![LevelConfig::new(
            3,
            1.0,
            2.0,
            vec![SpawnChance::new(HindranceKind::Octopus, -1.0)],
        )]);
        assert!(matches!(
            table.validate(),
            Err(ConfigError::NegativeWeight { level: 3, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_interval() {
        let table = LevelConfigTable::new(vec![LevelConfig::new(1, 4.0, 2.0, vec![])]);
        assert!(matches!(
            table.validate(),
            Err(ConfigError::InvalidInterval { level: 1, .. })
        ));
    }

    #[test]
    fn test_empty_weights_are_valid() {
        let table = LevelConfigTable::new(vec![LevelConfig::new(1, 1.0, 1.0, vec![])]);
        assert!(table.validate().is_ok());
        assert_eq!(table.get(1).unwrap().total_weight(), 0.0);
    }

    #[test]
    fn test_tuning_missing_sections_use_defaults() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_tuning_load_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        let fallback = Tuning::load_or_default(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(fallback.levels.len(), 9);
    }
}
