//! Rasterizes an area brush onto a region's detail cells.

use super::{AreaBrush, Brush};
use crate::mask::Grid;
use crate::math::lerp;
use crate::terrain::{TerrainPosition, TerrainRegion, DEFAULT_BOUNDS_PADDING};

/// Per-cell brush weight in [0, opacity] over `region`'s detail rectangle, in
/// the region's current orientation.
///
/// Cells outside the polygon are 0. Inside, the weight is the opacity scaled
/// by the falloff factor when `apply_falloff` is set. A disabled brush, or one
/// whose padded bounds miss the region, yields an all-zero grid without
/// visiting any cell.
pub fn build_mask(brush: &AreaBrush, region: &TerrainRegion, apply_falloff: bool) -> Grid<f32> {
    let mut mask = Grid::for_rect(region.detail_rect());
    if mask.is_empty() || !brush.is_enabled() || brush.polygon().is_empty() {
        return mask;
    }

    let dims = region.dimensions();
    if !brush.intersects_terrain(dims) {
        return mask;
    }
    let footprint = TerrainRegion::from_bounds(dims, &brush.bounds(), DEFAULT_BOUNDS_PADDING);
    if !footprint.region().overlaps(&region.region()) {
        log::trace!("brush outside {}, mask skipped", region);
        return mask;
    }

    let polygon = brush.polygon();
    for x in 0..mask.width() {
        for y in 0..mask.height() {
            let point = TerrainPosition::new(region, x as i32, y as i32).world;
            if !polygon.contains(point) {
                continue;
            }
            let factor = if apply_falloff { brush.falloff_factor(point) } else { 1.0 };
            mask.set(x, y, lerp(0.0, brush.opacity, factor));
        }
    }
    mask
}
