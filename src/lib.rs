//! Flora - rule- and brush-driven foliage density rasters for terrain
//! detail maps.
//!
//! A `FoliageTerrain` owns a base biome and a set of brushes for one
//! terrain. Refreshing a region evaluates every foliage type's spawn rules
//! per detail cell, blends brush biomes over the result, cuts density around
//! trees and writes integer density layers back through `TerrainHost`.

pub mod core;
pub mod math;
pub mod terrain;
pub mod mask;
pub mod foliage;
pub mod brush;
pub mod density;
pub mod refresh;
pub mod scene;

pub use brush::{AreaBrush, BlendMode, Brush, SceneBrush};
pub use foliage::{Biome, DetailPrototype, Foliage, FoliageAsset, SpawnRules};
pub use refresh::{FoliageTerrain, RefreshSettings};
pub use terrain::{MemoryTerrain, TerrainDimensions, TerrainHost, TerrainRegion};
