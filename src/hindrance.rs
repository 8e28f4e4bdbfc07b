//! Hindrance kinds and their creatable assets
//!
//! Every kind maps to one placement rule (see `sim::placement`) and, through
//! the [`PrefabRegistry`], to at most one asset the host knows how to create.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Obstacle types that can be spawned into the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HindranceKind {
    /// Floats anywhere inside the view
    Blowfish,
    /// Enters from the left or right edge
    Seahorse,
    /// Rises from the bottom edge
    Octopus,
    /// Drops a line from the top edge
    Fisher,
}

impl HindranceKind {
    /// All kinds, in declaration order
    pub const ALL: [HindranceKind; 4] = [
        HindranceKind::Blowfish,
        HindranceKind::Seahorse,
        HindranceKind::Octopus,
        HindranceKind::Fisher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HindranceKind::Blowfish => "Blowfish",
            HindranceKind::Seahorse => "Seahorse",
            HindranceKind::Octopus => "Octopus",
            HindranceKind::Fisher => "Fisher",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blowfish" => Some(HindranceKind::Blowfish),
            "seahorse" => Some(HindranceKind::Seahorse),
            "octopus" => Some(HindranceKind::Octopus),
            "fisher" | "fisherman" => Some(HindranceKind::Fisher),
            _ => None,
        }
    }
}

impl std::fmt::Display for HindranceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to a creatable asset (prefab name, sprite sheet id, ...)
pub type AssetRef = String;

/// Kind -> asset lookup used when a spawn decision has been made
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefabRegistry {
    prefabs: BTreeMap<HindranceKind, AssetRef>,
}

impl PrefabRegistry {
    /// Create an empty registry (every spawn aborts until kinds are registered)
    pub fn new() -> Self {
        Self {
            prefabs: BTreeMap::new(),
        }
    }

    /// Registry with one lowercase asset name per kind
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in HindranceKind::ALL {
            registry.register(kind, kind.as_str().to_lowercase());
        }
        registry
    }

    /// Register (or replace) the asset for a kind
    pub fn register(&mut self, kind: HindranceKind, asset: impl Into<AssetRef>) {
        self.prefabs.insert(kind, asset.into());
    }

    /// Remove the asset for a kind, returning it if one was registered
    pub fn unregister(&mut self, kind: HindranceKind) -> Option<AssetRef> {
        self.prefabs.remove(&kind)
    }

    pub fn get(&self, kind: HindranceKind) -> Option<&AssetRef> {
        self.prefabs.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }
}
