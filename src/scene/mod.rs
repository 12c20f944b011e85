//! Demo scenes: a terrain host plus its foliage owner, built from JSON.

pub mod config;

pub use config::{BrushConfig, LayerConfig, RectConfig, SceneConfig};

use crate::refresh::FoliageTerrain;
use crate::terrain::MemoryTerrain;

/// A built scene, ready to refresh.
pub struct Scene {
    pub host: MemoryTerrain,
    pub terrain: FoliageTerrain,
}
