//! In-memory terrain host.

use glam::{IVec2, Vec2, Vec3};

use super::host::{AlphaSamples, SurfaceLayer, TerrainDimensions, TerrainHost, TreeInstance};
use crate::foliage::DetailPrototype;
use crate::mask::Grid;
use crate::math::{Rect, RectInt};

/// Raster-backed `TerrainHost` for tools, tests and benchmarks.
///
/// Heights are stored relative to the terrain origin. Detail layers are
/// `Grid<i32>` indexed `(row, column)` with rows along Z.
#[derive(Clone, Debug)]
pub struct MemoryTerrain {
    dims: TerrainDimensions,
    layers: Vec<SurfaceLayer>,
    heights: Vec<f32>,
    alphamaps: AlphaSamples,
    trees: Vec<TreeInstance>,
    prototypes: Vec<DetailPrototype>,
    detail_layers: Vec<Grid<i32>>,
    coverage: Vec<f32>,
    detail_writes: usize,
}

impl MemoryTerrain {
    /// Flat terrain with no layers, trees or prototypes.
    pub fn new(dims: TerrainDimensions) -> Self {
        let hres = dims.heightmap_resolution.max(2) as usize;
        Self {
            dims,
            layers: Vec::new(),
            heights: vec![0.0; hres * hres],
            alphamaps: AlphaSamples::default(),
            trees: Vec::new(),
            prototypes: Vec::new(),
            detail_layers: Vec::new(),
            coverage: Vec::new(),
            detail_writes: 0,
        }
    }

    /// Replace the surface layers. Alphamaps are reset to zero.
    pub fn with_layers<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.layers = names.into_iter().map(SurfaceLayer::new).collect();
        let res = self.dims.alphamap_resolution as usize;
        self.alphamaps = AlphaSamples::new(res, res, self.layers.len());
        self
    }

    pub fn heightmap_resolution(&self) -> usize {
        self.dims.heightmap_resolution.max(2) as usize
    }

    /// Set one heightmap sample (meters above the terrain origin).
    pub fn set_height(&mut self, x: usize, z: usize, height: f32) {
        let res = self.heightmap_resolution();
        if x < res && z < res {
            self.heights[z * res + x] = height;
        }
    }

    /// Fill every heightmap sample from a function of normalized (x, z).
    pub fn fill_heights(&mut self, f: impl Fn(f32, f32) -> f32) {
        let res = self.heightmap_resolution();
        let step = 1.0 / (res - 1) as f32;
        for z in 0..res {
            for x in 0..res {
                self.heights[z * res + x] = f(x as f32 * step, z as f32 * step);
            }
        }
    }

    /// Paint a layer's alpha over an alphamap pixel rectangle (x = column).
    pub fn paint_alpha(&mut self, layer: usize, rect: RectInt, value: f32) {
        if layer >= self.alphamaps.layers() {
            return;
        }
        let (rows, cols) = (self.alphamaps.rows() as i32, self.alphamaps.cols() as i32);
        for row in rect.position.y.max(0)..(rect.position.y + rect.height()).min(rows) {
            for col in rect.position.x.max(0)..(rect.position.x + rect.width()).min(cols) {
                self.alphamaps.set(row as usize, col as usize, layer, value);
            }
        }
    }

    /// Paint a layer's alpha over the whole terrain.
    pub fn fill_alpha(&mut self, layer: usize, value: f32) {
        let res = self.dims.alphamap_resolution as i32;
        self.paint_alpha(layer, RectInt::new(0, 0, res, res), value);
    }

    pub fn add_tree(&mut self, tree: TreeInstance) {
        self.trees.push(tree);
    }

    pub fn set_detail_coverage(&mut self, prototype_index: usize, coverage: f32) {
        if prototype_index >= self.coverage.len() {
            self.coverage.resize(prototype_index + 1, 1.0);
        }
        self.coverage[prototype_index] = coverage;
    }

    /// Density layer of one prototype.
    pub fn detail_layer(&self, prototype_index: usize) -> Option<&Grid<i32>> {
        self.detail_layers.get(prototype_index)
    }

    /// Density at a detail pixel (x = column, y = row).
    pub fn detail_at(&self, prototype_index: usize, pixel: IVec2) -> i32 {
        self.detail_layer(prototype_index)
            .filter(|g| pixel.x >= 0 && pixel.y >= 0 && (pixel.y as usize) < g.width() && (pixel.x as usize) < g.height())
            .map_or(0, |g| g.get(pixel.y as usize, pixel.x as usize))
    }

    /// Total of one prototype's density layer.
    pub fn detail_total(&self, prototype_index: usize) -> i64 {
        self.detail_layer(prototype_index).map_or(0, |g| g.total())
    }

    /// Number of `set_detail_layer` calls so far.
    pub fn detail_writes(&self) -> usize {
        self.detail_writes
    }

    fn height_sample(&self, x: usize, z: usize) -> f32 {
        let res = self.heightmap_resolution();
        self.heights[z.min(res - 1) * res + x.min(res - 1)]
    }

    fn empty_layer(&self) -> Grid<i32> {
        let res = self.dims.detail_resolution as usize;
        Grid::new(res, res)
    }
}

impl TerrainHost for MemoryTerrain {
    fn dimensions(&self) -> TerrainDimensions {
        self.dims
    }

    fn layers(&self) -> &[SurfaceLayer] {
        &self.layers
    }

    fn alphamaps(&self, rect: RectInt) -> AlphaSamples {
        let rows = rect.height().max(0) as usize;
        let cols = rect.width().max(0) as usize;
        let layers = self.layers.len();
        let mut out = AlphaSamples::new(rows, cols, layers);
        if self.alphamaps.is_empty() {
            return out;
        }
        for row in 0..rows {
            for col in 0..cols {
                let pixel = rect.position + IVec2::new(col as i32, row as i32);
                for layer in 0..layers {
                    out.set(row, col, layer, self.alphamaps.sample_clamped(pixel, layer));
                }
            }
        }
        out
    }

    fn interpolated_height(&self, x: f32, z: f32) -> f32 {
        let res = self.heightmap_resolution();
        let max = (res - 1) as f32;
        let p = Vec2::new(x, z).clamp(Vec2::ZERO, Vec2::ONE) * max;
        let (x0, z0) = (p.x.floor() as usize, p.y.floor() as usize);
        let (tx, tz) = (p.x.fract(), p.y.fract());

        let h00 = self.height_sample(x0, z0);
        let h10 = self.height_sample(x0 + 1, z0);
        let h01 = self.height_sample(x0, z0 + 1);
        let h11 = self.height_sample(x0 + 1, z0 + 1);

        let a = h00 + (h10 - h00) * tx;
        let b = h01 + (h11 - h01) * tx;
        a + (b - a) * tz
    }

    fn steepness(&self, x: f32, z: f32) -> f32 {
        let res = self.heightmap_resolution();
        let step = 1.0 / (res - 1) as f32;
        let cell = Vec2::new(self.dims.size.x, self.dims.size.z) * step;

        let dx = (self.interpolated_height(x + step, z) - self.interpolated_height(x - step, z)) / (2.0 * cell.x);
        let dz = (self.interpolated_height(x, z + step) - self.interpolated_height(x, z - step)) / (2.0 * cell.y);
        let normal = Vec3::new(-dx, 1.0, -dz).normalize();
        normal.y.clamp(-1.0, 1.0).acos().to_degrees()
    }

    fn tree_instances(&self, rect: Rect) -> Vec<TreeInstance> {
        self.trees
            .iter()
            .filter(|t| rect.contains(Vec2::new(t.position.x, t.position.z)))
            .copied()
            .collect()
    }

    fn detail_coverage(&self, prototype_index: usize) -> f32 {
        self.coverage.get(prototype_index).copied().unwrap_or(1.0)
    }

    fn detail_prototypes(&self) -> &[DetailPrototype] {
        &self.prototypes
    }

    fn set_detail_prototypes(&mut self, prototypes: Vec<DetailPrototype>) {
        let mut old_layers = std::mem::take(&mut self.detail_layers);
        let old_prototypes = std::mem::take(&mut self.prototypes);

        self.detail_layers = prototypes
            .iter()
            .map(|p| match old_prototypes.iter().position(|o| o == p) {
                Some(i) => std::mem::take(&mut old_layers[i]),
                None => self.empty_layer(),
            })
            .collect();
        self.prototypes = prototypes;
    }

    fn set_detail_layer(&mut self, origin: IVec2, prototype_index: usize, grid: &Grid<i32>) {
        let Some(layer) = self.detail_layers.get_mut(prototype_index) else {
            log::warn!("detail layer {} does not exist, write ignored", prototype_index);
            return;
        };
        let res = layer.width() as i32;
        for row in 0..grid.width() {
            for col in 0..grid.height() {
                let (r, c) = (origin.y + row as i32, origin.x + col as i32);
                if (0..res).contains(&r) && (0..res).contains(&c) {
                    layer.set(r as usize, c as usize, grid.get(row, col));
                }
            }
        }
        self.detail_writes += 1;
    }
}
