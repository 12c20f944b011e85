//! Normalized terrain sub-rectangles and their raster-space projections.

use glam::Vec2;

use super::TerrainDimensions;
use crate::math::{Aabb, Rect, RectInt};

/// Default margin added around brush bounds before clipping to the terrain.
pub const DEFAULT_BOUNDS_PADDING: f32 = 10.0;

/// A rectangle of one terrain, in normalized coordinates plus every raster
/// space derived from it.
///
/// All derived rectangles describe the same normalized area. The detail
/// rectangle can be flipped (x/y swapped) for the per-cell loop; everything
/// else is fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainRegion {
    dims: TerrainDimensions,
    region: Rect,
    local: Rect,
    world: Rect,
    alpha: RectInt,
    detail: RectInt,
    height: RectInt,
    flipped: bool,
}

impl TerrainRegion {
    /// Build from a normalized rectangle. Parts outside [0, 1]² are clipped.
    pub fn new(dims: &TerrainDimensions, rect: Rect) -> Self {
        let region = rect.saturated();
        let terrain_size = Vec2::new(dims.size.x, dims.size.z);
        let terrain_origin = Vec2::new(dims.position.x, dims.position.z);
        let local = region.scaled(terrain_size);
        let world = Rect::new(local.min + terrain_origin, local.max + terrain_origin);

        Self {
            dims: *dims,
            region,
            local,
            world,
            alpha: region.to_pixels(Vec2::splat(dims.alphamap_resolution as f32)),
            detail: region.to_pixels(Vec2::splat(dims.detail_resolution as f32)),
            height: region.to_pixels(Vec2::splat(dims.heightmap_resolution as f32)),
            flipped: false,
        }
    }

    /// The whole terrain.
    pub fn full(dims: &TerrainDimensions) -> Self {
        Self::new(dims, Rect::UNIT)
    }

    /// Region covered by a world-space volume.
    ///
    /// The volume's size grows by `padding` (half per side) and is clipped to
    /// the terrain's world bounds. A volume that misses the terrain yields a
    /// zero-area region at the origin; check `is_empty()`.
    pub fn from_bounds(dims: &TerrainDimensions, bounds: &Aabb, padding: f32) -> Self {
        let terrain = dims.world_bounds();
        let clipped = bounds.grown(padding).clipped(&terrain);

        let mut rect = Rect::default();
        if clipped.min.x < clipped.max.x && clipped.min.z < clipped.max.z {
            let size = terrain.size();
            rect = Rect::new(
                Vec2::new(
                    (clipped.min.x - terrain.min.x) / size.x,
                    (clipped.min.z - terrain.min.z) / size.z,
                ),
                Vec2::new(
                    (clipped.max.x - terrain.min.x) / size.x,
                    (clipped.max.z - terrain.min.z) / size.z,
                ),
            );
        }

        Self::new(dims, rect)
    }

    pub fn dimensions(&self) -> &TerrainDimensions {
        &self.dims
    }

    /// Normalized rectangle in [0, 1]².
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Terrain-local rectangle in meters (no world offset).
    pub fn local_rect(&self) -> Rect {
        self.local
    }

    /// World-space rectangle in meters (x, z).
    pub fn world_rect(&self) -> Rect {
        self.world
    }

    pub fn alpha_rect(&self) -> RectInt {
        self.alpha
    }

    /// Detail rectangle in its current orientation.
    pub fn detail_rect(&self) -> RectInt {
        self.detail
    }

    pub fn height_rect(&self) -> RectInt {
        self.height
    }

    /// Swap the detail rectangle's axes. Used around the per-cell loop, since
    /// detail storage is indexed (z, x).
    pub fn flip_xy(&mut self) {
        self.detail = self.detail.flipped();
        self.flipped = !self.flipped;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// True when the region covers no detail cells.
    pub fn is_empty(&self) -> bool {
        self.region.is_empty() || self.detail.is_empty()
    }
}

impl std::fmt::Display for TerrainRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "region [{:.3}, {:.3}]..[{:.3}, {:.3}] detail {:?}+{:?}{}",
            self.region.min.x,
            self.region.min.y,
            self.region.max.x,
            self.region.max.y,
            self.detail.position,
            self.detail.size,
            if self.flipped { " (flipped)" } else { "" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, Vec3};

    fn dims() -> TerrainDimensions {
        TerrainDimensions {
            position: Vec3::new(100.0, 0.0, -200.0),
            size: Vec3::new(500.0, 100.0, 500.0),
            detail_resolution: 1000,
            detail_resolution_per_patch: 16,
            alphamap_resolution: 256,
            heightmap_resolution: 257,
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_rects_follow_resolution() {
        let d = dims();
        let rect = Rect::from_position_size(Vec2::new(0.1, 0.2), Vec2::new(0.3, 0.45));
        let region = TerrainRegion::new(&d, rect);

        for (px, res) in [
            (region.detail_rect(), d.detail_resolution),
            (region.alpha_rect(), d.alphamap_resolution),
            (region.height_rect(), d.heightmap_resolution),
        ] {
            let size = region.region().size() * res as f32;
            assert_eq!(px.width(), size.x.round_ties_even() as i32);
            assert_eq!(px.height(), size.y.round_ties_even() as i32);
        }
        assert_eq!(region.detail_rect(), RectInt::new(100, 200, 300, 450));
    }

    #[test]
    fn test_world_and_local_rects() {
        let d = dims();
        let rect = Rect::from_position_size(Vec2::new(0.5, 0.25), Vec2::splat(0.5));
        let region = TerrainRegion::new(&d, rect);
        assert_eq!(region.local_rect().min, Vec2::new(250.0, 125.0));
        assert_eq!(region.world_rect().min, Vec2::new(350.0, -75.0));
        assert_eq!(region.world_rect().size(), Vec2::splat(250.0));
    }

    #[test]
    fn test_out_of_range_is_clipped() {
        let d = dims();
        let region = TerrainRegion::new(&d, Rect::new(Vec2::splat(-0.5), Vec2::splat(0.5)));
        assert_eq!(region.region(), Rect::new(Vec2::ZERO, Vec2::splat(0.5)));
        assert_eq!(region.detail_rect(), RectInt::new(0, 0, 500, 500));
    }

    #[test]
    fn test_flip_round_trip() {
        let d = dims();
        let mut region = TerrainRegion::new(
            &d,
            Rect::from_position_size(Vec2::new(0.1, 0.5), Vec2::new(0.2, 0.4)),
        );
        let original = region.detail_rect();
        region.flip_xy();
        assert!(region.is_flipped());
        assert_eq!(region.detail_rect().position, IVec2::new(500, 100));
        assert_eq!(region.detail_rect().size, IVec2::new(400, 200));
        region.flip_xy();
        assert!(!region.is_flipped());
        assert_eq!(region.detail_rect(), original);
    }

    #[test]
    fn test_from_bounds_inside() {
        let d = dims();
        // 100x100 m box in the middle of the terrain, padded by 10 m total
        let bounds = Aabb::new(Vec3::new(300.0, -10.0, 0.0), Vec3::new(400.0, 10.0, 100.0));
        let region = TerrainRegion::from_bounds(&d, &bounds, 10.0);
        let r = region.region();
        assert!((r.min.x - 195.0 / 500.0).abs() < 1e-6);
        assert!((r.max.x - 305.0 / 500.0).abs() < 1e-6);
        assert!((r.min.y - 195.0 / 500.0).abs() < 1e-6);
        assert!((r.max.y - 305.0 / 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_bounds_clipped_to_terrain() {
        let d = dims();
        let bounds = Aabb::new(Vec3::new(0.0, 0.0, -300.0), Vec3::new(200.0, 10.0, -100.0));
        let region = TerrainRegion::from_bounds(&d, &bounds, 0.0);
        let r = region.region();
        assert_eq!(r.min, Vec2::ZERO);
        assert!((r.max.x - 0.2).abs() < 1e-6);
        assert!((r.max.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_from_bounds_outside_is_empty() {
        let d = dims();
        let bounds = Aabb::new(Vec3::new(-1000.0, 0.0, -1000.0), Vec3::new(-900.0, 10.0, -900.0));
        let region = TerrainRegion::from_bounds(&d, &bounds, DEFAULT_BOUNDS_PADDING);
        assert!(region.is_empty());
        assert_eq!(region.region(), Rect::default());
        assert_eq!(region.detail_rect().size, IVec2::ZERO);
    }
}
