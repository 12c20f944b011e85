//! Layered Perlin modulation of foliage density.

use glam::Vec2;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::math::{inverse_lerp, lerp, saturate, FloatRange};

pub const DEFAULT_NOISE_SEED: u32 = 1337;

/// Authored noise parameters. `alpha` blends between no modulation (0) and
/// full modulation (1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseModulator {
    pub offset: Vec2,
    /// Feature size per axis in world units; frequency is `1 / scale`.
    pub scale: Vec2,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
    /// Raw noise range mapped onto [0, 1].
    pub remap: FloatRange,
    pub invert: bool,
    pub alpha: f32,
    pub seed: u32,
}

impl Default for NoiseModulator {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
            octaves: 1,
            persistence: 0.25,
            lacunarity: 5.0,
            remap: FloatRange::new(0.0, 1.0),
            invert: false,
            alpha: 1.0,
            seed: DEFAULT_NOISE_SEED,
        }
    }
}

impl NoiseModulator {
    /// Modulator with no effect on density.
    pub fn disabled() -> Self {
        Self { alpha: 0.0, ..Default::default() }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Build the sampler. The permutation table is seeded once here, so
    /// callers hold on to the sampler across cells.
    pub fn sampler(&self) -> NoiseSampler {
        NoiseSampler { params: self.clone(), perlin: Perlin::new(self.seed) }
    }
}

/// Seeded evaluator for one `NoiseModulator`.
#[derive(Clone, Debug)]
pub struct NoiseSampler {
    params: NoiseModulator,
    perlin: Perlin,
}

impl NoiseSampler {
    /// Modulation factor in [0, 1] at a 2D position.
    pub fn factor(&self, x: f32, y: f32) -> f32 {
        let p = &self.params;
        let mut frequency = Vec2::new(1.0 / p.scale.x.max(1e-4), 1.0 / p.scale.y.max(1e-4));
        let mut amplitude = 1.0;
        let mut value = 1.0;

        for _ in 0..p.octaves {
            let sample = self.sample((x + p.offset.x) * frequency.x, (y + p.offset.y) * frequency.y);
            value = lerp(value, sample, amplitude);
            amplitude *= p.persistence;
            frequency *= p.lacunarity;
        }

        let mut v = saturate(inverse_lerp(p.remap.min, p.remap.max, value));
        if p.invert {
            v = 1.0 - v;
        }
        saturate(lerp(1.0, v, p.alpha))
    }

    /// Modulate a density value at a 2D position.
    pub fn apply(&self, density: f32, x: f32, y: f32) -> f32 {
        if self.params.alpha <= 0.0 {
            return density;
        }
        let v = self.factor(x, y);
        lerp(density, density * v, self.params.alpha)
    }

    /// Single Perlin sample mapped to [0, 1].
    fn sample(&self, x: f32, y: f32) -> f32 {
        let n = self.perlin.get([x as f64, y as f64]) as f32;
        saturate(n * 0.5 + 0.5)
    }
}
