//! Noise-based procedural heightfields

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::memory::MemoryTerrain;
use super::host::TerrainHost;

/// Parameters controlling heightfield generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightParams {
    pub seed: u32,
    pub scale: f32,        // Horizontal scale in meters (larger = smoother)
    pub height_scale: f32, // Vertical scale (max height)
    pub octaves: u32,      // FBM octaves (detail levels)
    pub persistence: f32,  // FBM persistence (0.5 typical)
    pub lacunarity: f32,   // FBM lacunarity (2.0 typical)
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 200.0,
            height_scale: 64.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Procedural heightfield generator using fractal Brownian motion (FBM)
pub struct HeightGenerator {
    params: HeightParams,
    noise: Fbm<Perlin>,
}

impl HeightGenerator {
    pub fn new(params: HeightParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        Self { params, noise }
    }

    pub fn params(&self) -> &HeightParams {
        &self.params
    }

    /// Height in [0, height_scale] at a world-space (x, z).
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let nx = (x / self.params.scale) as f64;
        let nz = (z / self.params.scale) as f64;

        // [-1, 1] -> [0, height_scale]
        let normalized = ((self.noise.get([nx, nz]) + 1.0) / 2.0).clamp(0.0, 1.0);
        (normalized * self.params.height_scale as f64) as f32
    }

    /// Fill every heightmap sample of `terrain` from world coordinates.
    pub fn fill(&self, terrain: &mut MemoryTerrain) {
        let dims = terrain.dimensions();
        terrain.fill_heights(|x, z| {
            self.height_at(dims.position.x + x * dims.size.x, dims.position.z + z * dims.size.z)
        });
        log::debug!(
            "Generated {}² heightfield (seed {}, {} octaves)",
            terrain.heightmap_resolution(),
            self.params.seed,
            self.params.octaves
        );
    }
}
