//! Scene brushes that override biome foliage inside an area.
//!
//! A brush covers part of the terrain with its own biome. During
//! compositing each brush contributes a per-cell mask in [0, opacity] and
//! its blend mode decides how the brush biome's density combines with the
//! density already in the cell.

pub mod area;
pub mod mask;

pub use area::{AreaBrush, DEFAULT_CURVE_RESOLUTION, FALLOFF_EPSILON};
pub use mask::build_mask;

use serde::{Deserialize, Serialize};

use crate::foliage::Biome;
use crate::mask::Grid;
use crate::math::Aabb;
use crate::terrain::{TerrainDimensions, TerrainRegion};

/// How a brush's density combines with the density already composited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    Blend,    // Interpolate towards the brush density by the mask
    Add,      // Add masked brush density
    Subtract, // Remove masked brush density, never below zero
}

impl BlendMode {
    /// Combine `current` with the brush `candidate` density at mask weight
    /// `mask`. The result is not floored.
    pub fn apply(self, current: f32, candidate: f32, mask: f32) -> f32 {
        match self {
            BlendMode::Blend => current + (candidate - current) * mask,
            BlendMode::Add => current + candidate * mask,
            BlendMode::Subtract => (current - candidate * mask).clamp(0.0, current.max(0.0)),
        }
    }
}

/// Common brush behaviour used by the compositor.
pub trait Brush {
    /// Lower draws first.
    fn draw_order(&self) -> i32;

    fn blend_mode(&self) -> BlendMode;

    fn is_enabled(&self) -> bool;

    /// World-space bounds of the brush's influence.
    fn bounds(&self) -> Aabb;

    /// Outer bounds shrunk by the falloff fraction on X and Z.
    fn inner_bounds(&self) -> Aabb;

    /// Biome painted by this brush, if any.
    fn biome(&self) -> Option<&Biome>;

    /// Per-cell mask in [0, opacity] over the region's detail rectangle.
    fn build_mask(&self, region: &TerrainRegion, apply_falloff: bool) -> Grid<f32>;

    fn intersects_terrain(&self, dims: &TerrainDimensions) -> bool {
        self.bounds().intersects(&dims.world_bounds())
    }
}

/// Every brush variant a scene can hold.
#[derive(Clone, Debug)]
pub enum SceneBrush {
    Area(AreaBrush),
}

impl SceneBrush {
    fn inner(&self) -> &dyn Brush {
        match self {
            SceneBrush::Area(b) => b,
        }
    }
}

impl From<AreaBrush> for SceneBrush {
    fn from(brush: AreaBrush) -> Self {
        SceneBrush::Area(brush)
    }
}

impl Brush for SceneBrush {
    fn draw_order(&self) -> i32 {
        self.inner().draw_order()
    }

    fn blend_mode(&self) -> BlendMode {
        self.inner().blend_mode()
    }

    fn is_enabled(&self) -> bool {
        self.inner().is_enabled()
    }

    fn bounds(&self) -> Aabb {
        self.inner().bounds()
    }

    fn inner_bounds(&self) -> Aabb {
        self.inner().inner_bounds()
    }

    fn biome(&self) -> Option<&Biome> {
        self.inner().biome()
    }

    fn build_mask(&self, region: &TerrainRegion, apply_falloff: bool) -> Grid<f32> {
        self.inner().build_mask(region, apply_falloff)
    }
}
