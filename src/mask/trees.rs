//! Exclusion mask around tree trunks.

use glam::Vec2;

use super::Grid;
use crate::math::{lerp, saturate, smoothstep, FloatRange};
use crate::terrain::{TerrainPosition, TerrainRegion, TreeInstance};

/// Default smoothstep range over the normalized distance to the trunk edge.
pub const DEFAULT_TREE_BLEND_RANGE: FloatRange = FloatRange::new(0.25, 0.5);
/// Default exclusion radius per unit of tree width scale.
pub const DEFAULT_TREE_PADDING: f32 = 4.0;

#[derive(Clone, Copy, Debug)]
struct Footprint {
    center: Vec2,
    radius: f32,
}

/// Build a per-cell exclusion mask in [0, 1] for the region's detail
/// rectangle, in the region's current orientation.
///
/// 1 means fully excluded. Only trees whose normalized position lies inside
/// the region contribute. Each tree excludes a disc of radius
/// `ceil(width_scale * padding)` around its floored world position.
pub fn build_tree_mask(
    region: &TerrainRegion,
    trees: &[TreeInstance],
    blend_range: FloatRange,
    padding: f32,
) -> Grid<f32> {
    let rect = region.detail_rect();
    let mut mask = Grid::for_rect(rect);
    if mask.is_empty() {
        return mask;
    }

    let dims = region.dimensions();
    let bounds = region.region();
    let footprints: Vec<Footprint> = trees
        .iter()
        .filter(|t| bounds.contains(Vec2::new(t.position.x, t.position.z)))
        .filter_map(|t| {
            let radius = (t.width_scale * padding).ceil();
            if radius <= 0.0 {
                return None;
            }
            let world = dims.position + t.position * dims.size;
            Some(Footprint { center: Vec2::new(world.x, world.z).floor(), radius })
        })
        .collect();

    if footprints.is_empty() {
        return mask;
    }

    // Cells farther than every radius are untouched, so skip them wholesale.
    let (lo, hi) = footprints.iter().fold(
        (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
        |(lo, hi), f| (lo.min(f.center - f.radius), hi.max(f.center + f.radius)),
    );

    for x in 0..mask.width() {
        for y in 0..mask.height() {
            let p = TerrainPosition::new(region, x as i32, y as i32).world_xz();
            if p.cmplt(lo).any() || p.cmpgt(hi).any() {
                continue;
            }

            let mut cell = 0.0;
            for f in &footprints {
                let dist = f.radius - p.distance(f.center);
                let step = smoothstep(blend_range.min, blend_range.max, saturate(dist / f.radius));
                cell = lerp(cell, 1.0, saturate(step));
            }
            mask.set(x, y, cell);
        }
    }

    log::trace!("tree mask: {} trees over {}", footprints.len(), region);
    mask
}
