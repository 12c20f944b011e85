//! Brush shaped by a closed curve.

use std::sync::Arc;

use glam::{Vec2, Vec3};

use super::{BlendMode, Brush};
use crate::foliage::Biome;
use crate::mask::Grid;
use crate::math::{saturate, Aabb, ClosedCurve, Polygon};
use crate::terrain::TerrainRegion;

pub const DEFAULT_CURVE_RESOLUTION: usize = 16;
pub const MIN_CURVE_RESOLUTION: usize = 3;
pub const MAX_CURVE_RESOLUTION: usize = 128;

/// Falloff below this behaves as no falloff.
pub const FALLOFF_EPSILON: f32 = 0.001;

/// Vertical reach added above and below the curve so the brush covers any
/// terrain height.
const VERTICAL_REACH: f32 = 5000.0;

/// Area brush: a polygon sampled from a closed curve, with opacity and a
/// fractional falloff towards the outline.
#[derive(Clone, Debug)]
pub struct AreaBrush {
    curve: ClosedCurve,
    resolution: usize,
    polygon: Polygon,
    revision: u64,
    /// Fraction of the outer bounds used as the falloff band, in [0, 1].
    pub falloff: f32,
    /// Maximum mask value, in [0, 1].
    pub opacity: f32,
    pub draw_order: i32,
    pub blend_mode: BlendMode,
    pub enabled: bool,
    pub biome: Option<Arc<Biome>>,
}

impl AreaBrush {
    pub fn new(curve: ClosedCurve) -> Self {
        let polygon = Polygon::new(curve.sample(DEFAULT_CURVE_RESOLUTION));
        Self {
            curve,
            resolution: DEFAULT_CURVE_RESOLUTION,
            polygon,
            revision: 0,
            falloff: 0.0,
            opacity: 1.0,
            draw_order: 0,
            blend_mode: BlendMode::Blend,
            enabled: true,
            biome: None,
        }
    }

    pub fn with_biome(mut self, biome: Arc<Biome>) -> Self {
        self.biome = Some(biome);
        self
    }

    pub fn with_falloff(mut self, falloff: f32) -> Self {
        self.falloff = falloff.clamp(0.0, 1.0);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_draw_order(mut self, draw_order: i32) -> Self {
        self.draw_order = draw_order;
        self
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.set_resolution(resolution);
        self
    }

    pub fn curve(&self) -> &ClosedCurve {
        &self.curve
    }

    /// Replace the outline; the polygon is resampled.
    pub fn set_curve(&mut self, curve: ClosedCurve) {
        self.curve = curve;
        self.rebuild();
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Set the curve sample count, clamped to [3, 128].
    pub fn set_resolution(&mut self, resolution: usize) {
        let resolution = resolution.clamp(MIN_CURVE_RESOLUTION, MAX_CURVE_RESOLUTION);
        if resolution != self.resolution {
            self.resolution = resolution;
            self.rebuild();
        }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Bumped whenever the polygon is rebuilt.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Falloff multiplier in [0, 1] for a world point inside the polygon.
    ///
    /// Distance from the point to its nearest polygon vertex, measured with
    /// each axis normalized by the width of the falloff band, saturated and
    /// scaled by `1 - falloff`.
    pub fn falloff_factor(&self, point: Vec3) -> f32 {
        if self.falloff < FALLOFF_EPSILON {
            return 1.0;
        }

        let band = self.bounds().size() - self.inner_bounds().size();
        if band.x.abs() < f32::EPSILON || band.z.abs() < f32::EPSILON {
            return 1.0;
        }

        let vertex = self.polygon.closest_vertex(point);
        let a = Vec2::new(vertex.x / band.x, vertex.z / band.z);
        let b = Vec2::new(point.x / band.x, point.z / band.z);
        saturate(a.distance(b)) * (1.0 - self.falloff)
    }

    fn rebuild(&mut self) {
        self.polygon = Polygon::new(self.curve.sample(self.resolution));
        self.revision += 1;
    }
}

impl Brush for AreaBrush {
    fn draw_order(&self) -> i32 {
        self.draw_order
    }

    fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn bounds(&self) -> Aabb {
        let b = self.polygon.bounds();
        let reach = Vec3::new(0.0, VERTICAL_REACH, 0.0);
        Aabb::new(b.min - reach, b.max + reach)
    }

    fn inner_bounds(&self) -> Aabb {
        let outer = self.bounds();
        let shrink = 1.0 - self.falloff;
        outer.with_size(outer.size() * Vec3::new(shrink, 1.0, shrink))
    }

    fn biome(&self) -> Option<&Biome> {
        self.biome.as_deref()
    }

    fn build_mask(&self, region: &TerrainRegion, apply_falloff: bool) -> Grid<f32> {
        super::build_mask(self, region, apply_falloff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(half: f32) -> ClosedCurve {
        ClosedCurve::new(vec![
            Vec3::new(-half, 0.0, -half),
            Vec3::new(half, 0.0, -half),
            Vec3::new(half, 0.0, half),
            Vec3::new(-half, 0.0, half),
        ])
    }

    #[test]
    fn test_defaults() {
        let brush = AreaBrush::new(square(10.0));
        assert_eq!(brush.resolution(), DEFAULT_CURVE_RESOLUTION);
        assert_eq!(brush.polygon().len(), DEFAULT_CURVE_RESOLUTION);
        assert!(brush.is_enabled());
        assert_eq!(brush.blend_mode(), BlendMode::Blend);
        assert!(brush.biome().is_none());
    }

    #[test]
    fn test_resolution_clamped_and_rebuilds() {
        let mut brush = AreaBrush::new(square(10.0));
        brush.set_resolution(1);
        assert_eq!(brush.polygon().len(), MIN_CURVE_RESOLUTION);
        brush.set_resolution(1000);
        assert_eq!(brush.polygon().len(), MAX_CURVE_RESOLUTION);
        assert_eq!(brush.revision(), 2);
    }

    #[test]
    fn test_set_curve_rebuilds_polygon() {
        let mut brush = AreaBrush::new(square(10.0));
        brush.set_curve(square(20.0));
        assert_eq!(brush.revision(), 1);
        assert!(brush.polygon().contains(Vec3::new(15.0, 0.0, 0.0)));
    }

    #[test]
    fn test_bounds_reach_vertically() {
        let brush = AreaBrush::new(square(10.0));
        let b = brush.bounds();
        assert_eq!(b.min.y, -VERTICAL_REACH);
        assert_eq!(b.max.y, VERTICAL_REACH);
        assert_eq!(b.min.x, -10.0);
        assert_eq!(b.max.z, 10.0);
    }

    #[test]
    fn test_inner_bounds_shrink_xz_only() {
        let brush = AreaBrush::new(square(10.0)).with_falloff(0.25);
        let outer = brush.bounds();
        let inner = brush.inner_bounds();
        assert_eq!(inner.center(), outer.center());
        assert!((inner.size().x - 15.0).abs() < 1e-4);
        assert!((inner.size().z - 15.0).abs() < 1e-4);
        assert_eq!(inner.size().y, outer.size().y);
    }

    #[test]
    fn test_falloff_factor() {
        let brush = AreaBrush::new(square(10.0)).with_falloff(0.5);
        // On a polygon vertex the band starts at zero.
        assert_eq!(brush.falloff_factor(Vec3::new(-10.0, 0.0, -10.0)), 0.0);
        let center = brush.falloff_factor(Vec3::ZERO);
        assert!(center > 0.0 && center <= 0.5);

        let hard = AreaBrush::new(square(10.0));
        assert_eq!(hard.falloff_factor(Vec3::new(-10.0, 0.0, -10.0)), 1.0);
    }

    #[test]
    fn test_full_falloff_has_no_band_width_issue() {
        // falloff 1 collapses the inner box; band equals the outer size.
        let brush = AreaBrush::new(square(10.0)).with_falloff(1.0);
        assert_eq!(brush.falloff_factor(Vec3::ZERO), 0.0);
    }
}
