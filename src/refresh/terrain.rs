//! Foliage state of one terrain and its refresh entry points.

use std::sync::Arc;
use std::time::Instant;

use super::{ChunkedRefresh, DirtyRegions, RefreshSettings};
use crate::brush::{Brush, SceneBrush};
use crate::density::{composite, CompositeInput};
use crate::foliage::{Biome, DetailPrototype};
use crate::mask::Grid;
use crate::math::{Aabb, RectInt};
use crate::terrain::{TerrainHost, TerrainRegion, DEFAULT_BOUNDS_PADDING};

/// Foliage owner for one terrain: its base biome, the brushes painted over
/// it, refresh settings and pending change requests.
///
/// The host's rasters are never stored here; every operation takes the host
/// explicitly.
#[derive(Clone, Debug, Default)]
pub struct FoliageTerrain {
    settings: RefreshSettings,
    biome: Option<Arc<Biome>>,
    brushes: Vec<SceneBrush>,
    dirty: DirtyRegions,
    prototypes_dirty: bool,
}

impl FoliageTerrain {
    pub fn new(settings: RefreshSettings) -> Self {
        Self { settings, ..Default::default() }
    }

    pub fn with_biome(mut self, biome: Arc<Biome>) -> Self {
        self.biome = Some(biome);
        self
    }

    pub fn with_brush(mut self, brush: impl Into<SceneBrush>) -> Self {
        self.brushes.push(brush.into());
        self
    }

    pub fn settings(&self) -> &RefreshSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RefreshSettings) {
        self.settings = settings;
    }

    pub fn biome(&self) -> Option<&Biome> {
        self.biome.as_deref()
    }

    pub fn set_biome(&mut self, biome: Option<Arc<Biome>>) {
        self.biome = biome;
        self.on_biome_edited();
    }

    pub fn brushes(&self) -> &[SceneBrush] {
        &self.brushes
    }

    pub fn brushes_mut(&mut self) -> &mut Vec<SceneBrush> {
        &mut self.brushes
    }

    /// Add a brush. Its prototypes are registered on the next flush; report
    /// its footprint with `on_curve_changed` to have it refreshed.
    pub fn add_brush(&mut self, brush: impl Into<SceneBrush>) {
        self.brushes.push(brush.into());
        self.prototypes_dirty = true;
    }

    fn input(&self) -> CompositeInput<'_> {
        CompositeInput { biome: self.biome(), brushes: &self.brushes, settings: &self.settings }
    }

    /// Recompute and write density for every prototype over `region`, in one
    /// pass. Prototypes are registered with the host first. Returns the number
    /// of layers written.
    pub fn refresh<H: TerrainHost + ?Sized>(&mut self, host: &mut H, region: &TerrainRegion) -> usize {
        self.sync_prototypes(host);
        self.composite(host, region)
    }

    /// Composite and write back without touching the prototype set.
    pub(crate) fn composite<H: TerrainHost + ?Sized>(&self, host: &mut H, region: &TerrainRegion) -> usize {
        let start = Instant::now();
        let written = composite(host, region, &self.input());
        log::debug!("Refreshed {} ({} layers) in {:.2?}", region, written, start.elapsed());
        written
    }

    /// Refresh the whole terrain in one pass.
    pub fn refresh_all<H: TerrainHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let region = TerrainRegion::full(&host.dimensions());
        self.refresh(host, &region)
    }

    /// Cursor that refreshes `region` chunk by chunk. Prototypes are
    /// registered before the first chunk.
    pub fn chunked<'a, H: TerrainHost + ?Sized>(
        &'a mut self,
        host: &'a mut H,
        region: &TerrainRegion,
    ) -> ChunkedRefresh<'a, H> {
        self.sync_prototypes(host);
        ChunkedRefresh::new(self, host, region)
    }

    /// Refresh `region` chunk by chunk to completion. Returns the number of
    /// chunks processed.
    pub fn refresh_chunked<H: TerrainHost + ?Sized>(&mut self, host: &mut H, region: &TerrainRegion) -> usize {
        let start = Instant::now();
        let chunks = self.chunked(host, region).finish();
        log::debug!("Chunked refresh of {} done: {} chunks in {:.2?}", region, chunks, start.elapsed());
        chunks
    }

    /// Zero every prototype's density over `region`.
    pub fn clear<H: TerrainHost + ?Sized>(&mut self, host: &mut H, region: &TerrainRegion) {
        if region.is_empty() {
            return;
        }
        self.sync_prototypes(host);

        // Detail layers are stored (row = z, column = x).
        let detail = region.detail_rect();
        let empty = Grid::for_rect(detail.flipped());
        for index in 0..host.detail_prototypes().len() {
            host.set_detail_layer(detail.position, index, &empty);
        }
        log::debug!("Cleared {}", region);
    }

    /// Mask of the brush at `index` over `region`, using the current falloff
    /// setting. `None` for an unknown index.
    pub fn build_mask(&self, index: usize, region: &TerrainRegion) -> Option<Grid<f32>> {
        self.brushes
            .get(index)
            .map(|b| b.build_mask(region, self.settings.evaluate_brush_falloff))
    }

    /// Every prototype used by the base biome and the brush biomes, in
    /// first-seen order.
    pub fn prototypes(&self) -> Vec<DetailPrototype> {
        let mut out: Vec<DetailPrototype> = Vec::new();
        let biomes = self.biome().into_iter().chain(self.brushes.iter().filter_map(|b| b.biome()));
        for biome in biomes {
            for proto in biome.prototypes() {
                if !out.contains(&proto) {
                    out.push(proto);
                }
            }
        }
        out
    }

    /// Register the current prototype set with the host. Returns false when
    /// the host already had exactly this set.
    pub fn sync_prototypes<H: TerrainHost + ?Sized>(&mut self, host: &mut H) -> bool {
        self.prototypes_dirty = false;
        let prototypes = self.prototypes();
        if host.detail_prototypes() == prototypes.as_slice() {
            return false;
        }
        log::debug!("Registering {} detail prototypes", prototypes.len());
        host.set_detail_prototypes(prototypes);
        true
    }

    /// Surface layers were repainted over an alphamap pixel rectangle.
    pub fn on_surface_changed<H: TerrainHost + ?Sized>(&mut self, host: &H, alpha_rect: RectInt) {
        let res = host.dimensions().alphamap_resolution;
        self.dirty.mark(alpha_rect.normalized(res));
    }

    /// Heights changed over a heightmap pixel rectangle. Edits whose
    /// diagonal reaches a quarter of the chunk resolution are ignored.
    pub fn on_height_changed<H: TerrainHost + ?Sized>(&mut self, host: &H, height_rect: RectInt) {
        let limit = self.settings.chunked_refresh_resolution as f32 / 4.0;
        if height_rect.diagonal() >= limit {
            log::trace!("height change {:?} too large, ignored", height_rect);
            return;
        }
        let res = host.dimensions().heightmap_resolution;
        self.dirty.mark(height_rect.normalized(res));
    }

    /// A brush outline moved or changed. Pass the bounds before and after the
    /// edit as two calls.
    pub fn on_curve_changed<H: TerrainHost + ?Sized>(&mut self, host: &H, bounds: Aabb) {
        let region = TerrainRegion::from_bounds(&host.dimensions(), &bounds, DEFAULT_BOUNDS_PADDING);
        if !region.is_empty() {
            self.dirty.mark(region.region());
        }
    }

    /// A biome's foliage list changed: prototypes are re-registered and the
    /// whole terrain refreshed on the next flush.
    pub fn on_biome_edited(&mut self) {
        self.prototypes_dirty = true;
        self.dirty.mark_all();
    }

    /// Requests waiting for `flush()`.
    pub fn dirty(&self) -> &DirtyRegions {
        &self.dirty
    }

    /// Drain pending changes and refresh their union, chunked when it is
    /// larger than the chunk resolution. Returns the number of refresh
    /// passes run (0 when nothing was pending).
    pub fn flush<H: TerrainHost + ?Sized>(&mut self, host: &mut H) -> usize {
        if self.prototypes_dirty {
            self.sync_prototypes(host);
        }
        let Some(rect) = self.dirty.take() else {
            return 0;
        };

        let region = TerrainRegion::new(&host.dimensions(), rect);
        let detail = region.detail_rect();
        let limit = self.settings.chunked_refresh_resolution as i32;
        if detail.width() > limit || detail.height() > limit {
            self.refresh_chunked(host, &region)
        } else {
            self.refresh(host, &region);
            1
        }
    }
}
