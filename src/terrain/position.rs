//! Per-cell coordinate resolution inside a `TerrainRegion`.

use glam::{IVec2, Vec2, Vec3};

use super::TerrainRegion;

/// One detail cell of a region, resolved into every coordinate space.
///
/// `(x, y)` index the region's detail rectangle in its current orientation.
/// When the region is flipped, `x` runs along world Z and `y` along world X;
/// the normalized/world/raster fields below are always in terrain (X, Z)
/// order regardless of orientation, except the ones documented otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainPosition {
    /// Cell index within the region's detail rectangle (current orientation).
    pub detail: IVec2,
    /// Cell offset from the region origin, normalized by the detail
    /// resolution (current orientation).
    pub region_position: Vec2,
    /// Normalized terrain position of the cell (current orientation).
    pub terrain_position: Vec2,
    /// Normalized terrain position in (x, z) order.
    pub normalized: Vec2,
    /// World position as (z, x).
    pub world_zx: Vec2,
    /// World position on the terrain's base plane.
    pub world: Vec3,
    /// Alphamap pixel relative to the region's alpha rectangle (x = column).
    pub alpha: IVec2,
    /// Heightmap sample relative to the region's height rectangle.
    pub height: IVec2,
}

impl TerrainPosition {
    pub fn new(region: &TerrainRegion, x: i32, y: i32) -> Self {
        let dims = region.dimensions();
        let detail_res = dims.detail_resolution.max(1) as f32;

        let cell = Vec2::new(x as f32, y as f32);
        let region_position = cell / detail_res;
        let terrain_position = (region.detail_rect().position.as_vec2() + cell) / detail_res;

        let (normalized, offset) = if region.is_flipped() {
            (swap(terrain_position), swap(region_position))
        } else {
            (terrain_position, region_position)
        };

        let world = dims.position + Vec3::new(normalized.x * dims.size.x, 0.0, normalized.y * dims.size.z);

        Self {
            detail: IVec2::new(x, y),
            region_position,
            terrain_position,
            normalized,
            world_zx: Vec2::new(world.z, world.x),
            world,
            alpha: (offset * dims.alphamap_resolution as f32).floor().as_ivec2(),
            height: (offset * dims.heightmap_resolution as f32).floor().as_ivec2(),
        }
    }

    /// World position in (x, z) order.
    pub fn world_xz(&self) -> Vec2 {
        Vec2::new(self.world.x, self.world.z)
    }
}

fn swap(v: Vec2) -> Vec2 {
    Vec2::new(v.y, v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rect;
    use crate::terrain::TerrainDimensions;

    fn dims() -> TerrainDimensions {
        TerrainDimensions {
            position: Vec3::new(1000.0, 20.0, 2000.0),
            size: Vec3::new(400.0, 100.0, 200.0),
            detail_resolution: 400,
            detail_resolution_per_patch: 8,
            alphamap_resolution: 200,
            heightmap_resolution: 101,
            ..Default::default()
        }
    }

    #[test]
    fn test_unflipped_position() {
        let d = dims();
        let region = TerrainRegion::new(&d, Rect::new(Vec2::new(0.5, 0.25), Vec2::ONE));
        let pos = TerrainPosition::new(&region, 20, 40);

        assert_eq!(pos.detail, IVec2::new(20, 40));
        assert_eq!(pos.region_position, Vec2::new(0.05, 0.1));
        assert_eq!(pos.normalized, Vec2::new(0.55, 0.35));
        assert!((pos.world - Vec3::new(1220.0, 20.0, 2070.0)).length() < 1e-3);
        assert_eq!(pos.world_zx, Vec2::new(pos.world.z, pos.world.x));
        assert_eq!(pos.alpha, IVec2::new(10, 20));
        assert_eq!(pos.height, IVec2::new(5, 10));
    }

    #[test]
    fn test_flipped_position_resolves_same_point() {
        let d = dims();
        let rect = Rect::new(Vec2::new(0.5, 0.25), Vec2::ONE);
        let region = TerrainRegion::new(&d, rect);
        let mut flipped = region;
        flipped.flip_xy();

        let a = TerrainPosition::new(&region, 20, 40);
        let b = TerrainPosition::new(&flipped, 40, 20);
        assert_eq!(a.normalized, b.normalized);
        assert_eq!(a.world, b.world);
        assert_eq!(a.alpha, b.alpha);
        assert_eq!(a.height, b.height);
        assert_eq!(b.terrain_position, Vec2::new(a.terrain_position.y, a.terrain_position.x));
    }

    #[test]
    fn test_origin_cell() {
        let d = dims();
        let pos = TerrainPosition::new(&TerrainRegion::full(&d), 0, 0);
        assert_eq!(pos.normalized, Vec2::ZERO);
        assert_eq!(pos.world, d.position);
        assert_eq!(pos.world_xz(), Vec2::new(1000.0, 2000.0));
    }
}
