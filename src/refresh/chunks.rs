//! Splitting large refreshes into chunks and stepping through them.

use glam::Vec2;

use super::FoliageTerrain;
use crate::math::Rect;
use crate::terrain::{TerrainHost, TerrainRegion};

/// Upper bound on chunks along each axis.
pub const MAX_CHUNKS_PER_AXIS: u32 = 16;

/// Split `region` into a row-major grid of sub-regions whose detail extent is
/// at most `max_resolution` pixels per side, with at most 16 chunks per axis.
///
/// Interior chunk edges sit on whole detail pixels, so the chunks' detail
/// rectangles tile the region's detail rectangle with no gaps or overlaps and
/// neighbours share their normalized edges bit-for-bit. The outer edges are
/// the region's own.
pub fn split(region: &TerrainRegion, max_resolution: u32) -> Vec<TerrainRegion> {
    if region.is_empty() {
        return Vec::new();
    }

    let detail = if region.is_flipped() {
        region.detail_rect().flipped()
    } else {
        region.detail_rect()
    };
    let max = max_resolution.max(1);
    let nx = chunk_count(detail.width(), max);
    let ny = chunk_count(detail.height(), max);

    let dims = region.dimensions();
    let res = dims.detail_resolution.max(1) as f32;
    let rect = region.region();
    let xs = edges(rect.min.x, rect.max.x, detail.position.x, detail.width(), nx, res);
    let ys = edges(rect.min.y, rect.max.y, detail.position.y, detail.height(), ny, res);

    let mut chunks = Vec::with_capacity((nx * ny) as usize);
    for j in 0..ny as usize {
        for i in 0..nx as usize {
            let sub = Rect::new(Vec2::new(xs[i], ys[j]), Vec2::new(xs[i + 1], ys[j + 1]));
            chunks.push(TerrainRegion::new(dims, sub));
        }
    }
    chunks
}

fn chunk_count(extent: i32, max: u32) -> u32 {
    (extent.max(0) as u32).div_ceil(max).clamp(1, MAX_CHUNKS_PER_AXIS)
}

/// `n + 1` normalized edges from `min` to `max`. Interior edges are placed on
/// the pixel boundaries splitting `start..start + extent` into `n` parts.
fn edges(min: f32, max: f32, start: i32, extent: i32, n: u32, res: f32) -> Vec<f32> {
    let n = n as i32;
    (0..=n)
        .map(|i| match i {
            0 => min,
            i if i == n => max,
            i => (start + extent * i / n) as f32 / res,
        })
        .collect()
}

/// Progress report after one chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkProgress {
    /// Zero-based index of the chunk just refreshed.
    pub index: usize,
    pub total: usize,
    pub region: TerrainRegion,
}

impl ChunkProgress {
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Resumable chunked refresh.
///
/// Each `step()` composites and writes back one chunk. Dropping the cursor
/// between steps cancels the rest; chunks already written stay written.
pub struct ChunkedRefresh<'a, H: TerrainHost + ?Sized> {
    terrain: &'a FoliageTerrain,
    host: &'a mut H,
    chunks: Vec<TerrainRegion>,
    next: usize,
}

impl<'a, H: TerrainHost + ?Sized> ChunkedRefresh<'a, H> {
    pub(crate) fn new(terrain: &'a FoliageTerrain, host: &'a mut H, region: &TerrainRegion) -> Self {
        let chunks = split(region, terrain.settings().chunked_refresh_resolution);
        log::debug!("Chunked refresh of {} in {} chunks", region, chunks.len());
        Self { terrain, host, chunks, next: 0 }
    }

    pub fn total(&self) -> usize {
        self.chunks.len()
    }

    pub fn remaining(&self) -> usize {
        self.chunks.len() - self.next
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.chunks.len()
    }

    /// Refresh the next chunk. `None` once every chunk is done.
    pub fn step(&mut self) -> Option<ChunkProgress> {
        let region = *self.chunks.get(self.next)?;
        self.terrain.composite(&mut *self.host, &region);
        let progress = ChunkProgress { index: self.next, total: self.chunks.len(), region };
        self.next += 1;
        log::trace!("chunk {}/{} done", progress.index + 1, progress.total);
        Some(progress)
    }

    /// Refresh every remaining chunk; returns how many were processed.
    pub fn finish(mut self) -> usize {
        let mut count = 0;
        while self.step().is_some() {
            count += 1;
        }
        count
    }
}

impl<H: TerrainHost + ?Sized> Iterator for ChunkedRefresh<'_, H> {
    type Item = ChunkProgress;

    fn next(&mut self) -> Option<ChunkProgress> {
        self.step()
    }
}
