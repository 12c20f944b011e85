//! Per-cell density of one foliage type under its spawn rules.

use crate::foliage::{Foliage, NoiseSampler, RuleKind, TextureRule};
use crate::terrain::{AlphaSamples, SurfaceLayer, TerrainHost, TerrainPosition};

/// Density evaluator prepared for one foliage type.
///
/// Layer references are resolved and the noise sampler is seeded once, so a
/// single evaluator is reused for every cell of a region.
pub struct FoliageEvaluator<'a> {
    foliage: &'a Foliage,
    rules: Vec<(Option<usize>, &'a TextureRule)>,
    noise: NoiseSampler,
    coverage: f32,
}

impl<'a> FoliageEvaluator<'a> {
    /// `coverage` multiplies the base density; pass 1.0 in instance-count
    /// scatter mode.
    pub fn new(foliage: &'a Foliage, layers: &[SurfaceLayer], coverage: f32) -> Self {
        let rules = foliage
            .spawn_rules
            .active_rules()
            .map(|rule| (layers.iter().position(|l| *l == rule.layer), rule))
            .collect();
        Self { foliage, rules, noise: foliage.spawn_rules.noise.sampler(), coverage }
    }

    pub fn foliage(&self) -> &Foliage {
        self.foliage
    }

    /// Floored density at one cell.
    ///
    /// `alpha` holds the samples of the region's alphamap rectangle and is
    /// indexed with the position's region-relative alpha pixel.
    pub fn evaluate<H: TerrainHost + ?Sized>(
        &self,
        host: &H,
        alpha: &AlphaSamples,
        detail_scale: f32,
        position: &TerrainPosition,
    ) -> u32 {
        let rules = &self.foliage.spawn_rules;
        let n = position.normalized;
        if !rules.steepness.contains(host.steepness(n.x, n.y))
            || !rules.height.contains(host.interpolated_height(n.x, n.y))
        {
            return 0;
        }

        let base = self.foliage.density * detail_scale * self.coverage;
        let density = self.apply_texture_rules(base, alpha, position);
        let density = self.noise.apply(density, position.world_zx.x, position.world_zx.y);

        density.max(0.0).floor() as u32
    }

    fn apply_texture_rules(&self, density: f32, alpha: &AlphaSamples, position: &TerrainPosition) -> f32 {
        if self.rules.is_empty() {
            return density;
        }

        let mut sum = 0.0;
        for (layer, rule) in &self.rules {
            let Some(layer) = *layer else {
                continue;
            };
            let a = alpha.sample_clamped(position.alpha, layer);
            if a < rule.threshold {
                continue;
            }
            match rule.kind {
                RuleKind::Include => sum += a * density,
                RuleKind::Exclude => sum -= a * density,
            }
        }
        sum.clamp(0.0, density.max(0.0))
    }
}

/// Floored density of `foliage` at one cell. Convenience wrapper that
/// prepares a one-off `FoliageEvaluator`.
pub fn evaluate_density<H: TerrainHost + ?Sized>(
    foliage: &Foliage,
    host: &H,
    position: &TerrainPosition,
    alpha: &AlphaSamples,
    detail_scale: f32,
    coverage: f32,
) -> u32 {
    FoliageEvaluator::new(foliage, host.layers(), coverage).evaluate(host, alpha, detail_scale, position)
}
