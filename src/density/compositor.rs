//! Three-pass density compositing over one region.
//!
//! For every registered detail prototype:
//!
//! 1. **Base** - the terrain biome's foliage for the prototype fills the grid.
//! 2. **Brushes** - enabled brushes intersecting the terrain are applied in
//!    ascending draw order, each blending its own biome's density through
//!    its mask. The result is floored after each brush.
//! 3. **Trees** - the tree exclusion mask pulls density towards zero.
//!
//! All passes run with the region's detail axes swapped so grids come out
//! indexed (row, column), the layout the host stores. Grids for every
//! prototype are computed before any of them is written back.

use std::time::Instant;

use super::evaluator::FoliageEvaluator;
use crate::brush::{Brush, SceneBrush};
use crate::foliage::{Biome, DetailPrototype};
use crate::mask::{build_tree_mask, Grid};
use crate::math::lerp;
use crate::refresh::RefreshSettings;
use crate::terrain::{DetailScatterMode, TerrainHost, TerrainPosition, TerrainRegion};

/// Inputs shared by every pass of one composite.
pub struct CompositeInput<'a> {
    pub biome: Option<&'a Biome>,
    pub brushes: &'a [SceneBrush],
    pub settings: &'a RefreshSettings,
}

/// Composite every prototype over `region` and write the results to the host.
///
/// Returns the number of detail layers written.
pub fn composite<H: TerrainHost + ?Sized>(host: &mut H, region: &TerrainRegion, input: &CompositeInput<'_>) -> usize {
    if region.is_empty() || host.detail_prototypes().is_empty() {
        return 0;
    }

    let mut region = *region;
    region.flip_xy();
    let grids = compute_layers(&*host, &region, input);
    region.flip_xy();

    let origin = region.detail_rect().position;
    for (index, grid) in grids.iter().enumerate() {
        host.set_detail_layer(origin, index, grid);
    }
    grids.len()
}

/// Density grids for every prototype over a flipped region, in prototype
/// order. Nothing is written.
pub fn compute_layers<H: TerrainHost + ?Sized>(
    host: &H,
    region: &TerrainRegion,
    input: &CompositeInput<'_>,
) -> Vec<Grid<i32>> {
    let start = Instant::now();
    let dims = host.dimensions();
    let alpha = host.alphamaps(region.alpha_rect());
    let detail_scale = dims.detail_resolution_per_patch as f32;

    let brushes = brush_masks(host, region, input);
    let trees = if input.settings.evaluate_trees {
        let instances = host.tree_instances(region.region());
        Some(build_tree_mask(region, &instances, input.settings.tree_blend_range, input.settings.tree_padding))
    } else {
        None
    };

    let layers: Vec<Grid<i32>> = host
        .detail_prototypes()
        .iter()
        .enumerate()
        .map(|(index, prototype)| {
            let coverage = match dims.scatter_mode {
                DetailScatterMode::Coverage => host.detail_coverage(index),
                DetailScatterMode::InstanceCount => 1.0,
            };
            let mut grid = Grid::<f32>::for_rect(region.detail_rect());

            // Pass A: base biome
            if let Some(eval) = evaluator(input.biome, prototype, host, coverage) {
                for x in 0..grid.width() {
                    for y in 0..grid.height() {
                        let p = TerrainPosition::new(region, x as i32, y as i32);
                        grid.set(x, y, eval.evaluate(host, &alpha, detail_scale, &p) as f32);
                    }
                }
            }

            // Pass B: brushes
            for (brush, mask) in &brushes {
                let eval = evaluator(brush.biome(), prototype, host, coverage);
                let blend = brush.blend_mode();
                for x in 0..grid.width() {
                    for y in 0..grid.height() {
                        let m = mask.get(x, y);
                        if m <= 0.0 {
                            continue;
                        }
                        let candidate = eval.as_ref().map_or(0, |e| {
                            let p = TerrainPosition::new(region, x as i32, y as i32);
                            e.evaluate(host, &alpha, detail_scale, &p)
                        }) as f32;
                        let cell = grid.get_mut(x, y);
                        *cell = blend.apply(*cell, candidate, m).floor();
                    }
                }
            }

            // Pass C: tree exclusion
            if let Some(trees) = &trees {
                for x in 0..grid.width() {
                    for y in 0..grid.height() {
                        let cell = grid.get_mut(x, y);
                        *cell = lerp(*cell, 0.0, trees.get(x, y)).floor();
                    }
                }
            }

            grid.map(|v| v.max(0.0) as i32)
        })
        .collect();

    log::debug!(
        "Composited {} layers over {} ({} brushes) in {:.2?}",
        layers.len(),
        region,
        brushes.len(),
        start.elapsed()
    );
    layers
}

/// Masks of the brushes that take part, sorted by draw order (stable).
fn brush_masks<'b, H: TerrainHost + ?Sized>(
    host: &H,
    region: &TerrainRegion,
    input: &CompositeInput<'b>,
) -> Vec<(&'b SceneBrush, Grid<f32>)> {
    if !input.settings.evaluate_brushes {
        return Vec::new();
    }
    let dims = host.dimensions();
    let mut brushes: Vec<&SceneBrush> = input.brushes.iter().filter(|b| b.intersects_terrain(&dims)).collect();
    brushes.sort_by_key(|b| b.draw_order());

    brushes
        .into_iter()
        .filter_map(|b| {
            let mask = b.build_mask(region, input.settings.evaluate_brush_falloff);
            if mask.is_zero() {
                log::trace!("brush (order {}) has no cells in {}", b.draw_order(), region);
                None
            } else {
                Some((b, mask))
            }
        })
        .collect()
}

fn evaluator<'a, H: TerrainHost + ?Sized>(
    biome: Option<&'a Biome>,
    prototype: &DetailPrototype,
    host: &H,
    coverage: f32,
) -> Option<FoliageEvaluator<'a>> {
    biome
        .and_then(|b| b.foliage_for(prototype))
        .filter(|f| !f.disabled)
        .map(|f| FoliageEvaluator::new(f, host.layers(), coverage))
}
