//! Authored foliage data: assets, spawn rules, noise and biomes.

pub mod asset;
pub mod biome;
pub mod modulator;
pub mod rules;

pub use asset::{DetailPrototype, FoliageAsset};
pub use biome::Biome;
pub use modulator::{NoiseModulator, NoiseSampler};
pub use rules::{RuleKind, SpawnRules, TextureRule};

use serde::{Deserialize, Serialize};

/// One foliage type as placed by a biome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Foliage {
    pub asset: FoliageAsset,
    #[serde(default)]
    pub disabled: bool,
    /// Base density multiplier.
    #[serde(default = "default_density")]
    pub density: f32,
    #[serde(default)]
    pub spawn_rules: SpawnRules,
}

fn default_density() -> f32 {
    1.0
}

impl Foliage {
    pub fn new(asset: FoliageAsset) -> Self {
        Self { asset, disabled: false, density: 1.0, spawn_rules: SpawnRules::default() }
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_rules(mut self, rules: SpawnRules) -> Self {
        self.spawn_rules = rules;
        self
    }

    pub fn prototype(&self) -> DetailPrototype {
        self.asset.prototype()
    }
}
