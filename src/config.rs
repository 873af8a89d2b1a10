//! Scene configuration.
//!
//! A `SceneConfig` is the full snapshot the configuration source hands to
//! the core: which shape, its parameters, how many particles and how big.
//! It round-trips through JSON:
//!
//! ```json
//! {
//!   "name": "Tilted galaxy",
//!   "shape": { "kind": "SpiralGalaxy", "arms": 4, "inclinationDeg": -20.0 },
//!   "particle_count": 20000,
//!   "size_min": 1.0,
//!   "size_max": 3.0,
//!   "seed": 7
//! }
//! ```

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::NebulaError;
use crate::shapes::{Shape, ShapeKind};
use crate::store::SizeRange;

fn default_count() -> u32 {
    10_000
}

fn default_size_min() -> f32 {
    1.0
}

fn default_size_max() -> f32 {
    3.0
}

/// Complete field configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default = "default_count")]
    pub particle_count: u32,
    #[serde(default = "default_size_min")]
    pub size_min: f32,
    #[serde(default = "default_size_max")]
    pub size_max: f32,
    /// Seed for the random source. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".into(),
            shape: Shape::default(),
            particle_count: default_count(),
            size_min: default_size_min(),
            size_max: default_size_max(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// A scene showing the display preset of `kind`.
    pub fn preset(kind: ShapeKind) -> Self {
        Self {
            name: kind.name().to_string(),
            shape: Shape::preset(kind),
            ..Default::default()
        }
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NebulaError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NebulaError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, NebulaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn size_range(&self) -> SizeRange {
        SizeRange::new(self.size_min, self.size_max)
    }

    /// Random source for a regeneration of this scene.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}
