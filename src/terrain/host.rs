//! Interface to the host's terrain storage.
//!
//! The pipeline never owns terrain rasters. It reads alphamaps, heights,
//! steepness and tree instances through `TerrainHost`, and writes finished
//! detail-density grids back through it.

use glam::{IVec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::foliage::DetailPrototype;
use crate::mask::Grid;
use crate::math::{Aabb, Rect, RectInt};

/// How the host turns per-cell density into instances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailScatterMode {
    /// Cell value is an instance count.
    #[default]
    InstanceCount,
    /// Cell value is scaled by a per-prototype coverage factor.
    Coverage,
}

/// Raster resolutions and world placement of one terrain tile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainDimensions {
    /// World-space position of the terrain's min corner.
    pub position: Vec3,
    /// World-space size (x, max height, z).
    pub size: Vec3,
    /// Detail (density) raster resolution, pixels per side.
    pub detail_resolution: u32,
    /// Detail patch resolution; scales every foliage's base density.
    pub detail_resolution_per_patch: u32,
    /// Surface alphamap resolution, pixels per side.
    pub alphamap_resolution: u32,
    /// Heightmap resolution, samples per side.
    pub heightmap_resolution: u32,
    #[serde(default)]
    pub scatter_mode: DetailScatterMode,
}

impl TerrainDimensions {
    /// World-space bounds of the terrain volume.
    pub fn world_bounds(&self) -> Aabb {
        Aabb::new(self.position, self.position + self.size)
    }
}

impl Default for TerrainDimensions {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            size: Vec3::new(1000.0, 600.0, 1000.0),
            detail_resolution: 1024,
            detail_resolution_per_patch: 32,
            alphamap_resolution: 512,
            heightmap_resolution: 513,
            scatter_mode: DetailScatterMode::InstanceCount,
        }
    }
}

/// Reference to a paintable surface layer ("grass", "rock", ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceLayer(pub String);

impl SurfaceLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// One tree placed on the terrain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeInstance {
    /// Position normalized to the terrain volume: x, z in [0, 1], y in [0, 1]
    /// of the terrain height.
    pub position: Vec3,
    pub width_scale: f32,
    pub height_scale: f32,
}

/// Alphamap samples for a pixel rectangle, indexed `[row, column, layer]`
/// with rows along world Z and columns along world X.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlphaSamples {
    rows: usize,
    cols: usize,
    layers: usize,
    data: Vec<f32>,
}

impl AlphaSamples {
    pub fn new(rows: usize, cols: usize, layers: usize) -> Self {
        Self { rows, cols, layers, data: vec![0.0; rows * cols * layers] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample with the pixel coordinate clamped into range. Returns 0 when
    /// there is nothing to sample or the layer does not exist.
    pub fn sample_clamped(&self, pixel: IVec2, layer: usize) -> f32 {
        if self.is_empty() || layer >= self.layers {
            return 0.0;
        }
        let col = pixel.x.clamp(0, self.cols as i32 - 1) as usize;
        let row = pixel.y.clamp(0, self.rows as i32 - 1) as usize;
        self.data[self.index(row, col, layer)]
    }

    pub fn set(&mut self, row: usize, col: usize, layer: usize, value: f32) {
        let idx = self.index(row, col, layer);
        self.data[idx] = value;
    }

    fn index(&self, row: usize, col: usize, layer: usize) -> usize {
        (row * self.cols + col) * self.layers + layer
    }
}

/// Host-side terrain storage consumed by the refresh pipeline.
///
/// Normalized coordinates are `(x, z)` in [0, 1]² over the terrain.
pub trait TerrainHost {
    fn dimensions(&self) -> TerrainDimensions;

    /// Surface layers in alphamap channel order.
    fn layers(&self) -> &[SurfaceLayer];

    /// Alphamap channel of a layer, or `None` if the terrain lacks it.
    fn layer_index(&self, layer: &SurfaceLayer) -> Option<usize> {
        self.layers().iter().position(|l| l == layer)
    }

    /// Alphamap samples covering `rect` (alphamap pixels, x = column).
    fn alphamaps(&self, rect: RectInt) -> AlphaSamples;

    /// Interpolated world height at a normalized point.
    fn interpolated_height(&self, x: f32, z: f32) -> f32;

    /// Surface steepness in degrees at a normalized point.
    fn steepness(&self, x: f32, z: f32) -> f32;

    /// Trees whose normalized XZ position lies inside `rect`.
    fn tree_instances(&self, rect: Rect) -> Vec<TreeInstance>;

    /// Coverage factor for a detail prototype in coverage scatter mode.
    fn detail_coverage(&self, _prototype_index: usize) -> f32 {
        1.0
    }

    fn detail_prototypes(&self) -> &[DetailPrototype];

    /// Replace the registered prototypes. Density layers of prototypes that
    /// survive are kept; removed ones are dropped.
    fn set_detail_prototypes(&mut self, prototypes: Vec<DetailPrototype>);

    /// Write a density grid for one prototype. `origin` is in detail pixels
    /// (x = column); the grid is indexed `(row, column)` with rows along Z.
    fn set_detail_layer(&mut self, origin: IVec2, prototype_index: usize, grid: &Grid<i32>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_samples_clamp() {
        let mut samples = AlphaSamples::new(2, 3, 2);
        samples.set(0, 0, 1, 0.25);
        samples.set(1, 2, 0, 0.75);

        assert_eq!(samples.sample_clamped(IVec2::new(0, 0), 1), 0.25);
        assert_eq!(samples.sample_clamped(IVec2::new(-4, -9), 1), 0.25);
        assert_eq!(samples.sample_clamped(IVec2::new(2, 1), 0), 0.75);
        assert_eq!(samples.sample_clamped(IVec2::new(50, 50), 0), 0.75);
        assert_eq!(samples.sample_clamped(IVec2::ZERO, 7), 0.0);
        assert_eq!(AlphaSamples::default().sample_clamped(IVec2::ZERO, 0), 0.0);
    }

    #[test]
    fn test_world_bounds() {
        let dims = TerrainDimensions {
            position: Vec3::new(-100.0, 5.0, 50.0),
            ..Default::default()
        };
        let b = dims.world_bounds();
        assert_eq!(b.min, Vec3::new(-100.0, 5.0, 50.0));
        assert_eq!(b.max, Vec3::new(900.0, 605.0, 1050.0));
    }
}
