//! Scene configuration for demo and benchmark scenes

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::Scene;
use crate::brush::{AreaBrush, BlendMode, DEFAULT_CURVE_RESOLUTION};
use crate::core::{Error, Result};
use crate::foliage::{Biome, Foliage, FoliageAsset, NoiseModulator, SpawnRules, TextureRule};
use crate::math::{ClosedCurve, RectInt};
use crate::refresh::{FoliageTerrain, RefreshSettings};
use crate::terrain::{HeightGenerator, HeightParams, MemoryTerrain, TerrainDimensions, TreeInstance};

/// Surface layer with an alpha painted over part of the terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub name: String,
    /// Alpha painted over `area`.
    pub weight: f32,
    /// Alphamap pixel rectangle; the whole terrain when absent.
    #[serde(default)]
    pub area: Option<RectConfig>,
}

/// Serialized pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectConfig {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<RectConfig> for RectInt {
    fn from(r: RectConfig) -> Self {
        RectInt::new(r.x, r.y, r.width, r.height)
    }
}

/// Area brush as stored in a scene file. The biome is referenced by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    pub curve: ClosedCurve,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default)]
    pub falloff: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub draw_order: i32,
    #[serde(default)]
    pub blend_mode: BlendMode,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub biome: Option<String>,
}

fn default_resolution() -> usize {
    DEFAULT_CURVE_RESOLUTION
}

fn default_opacity() -> f32 {
    1.0
}

fn default_enabled() -> bool {
    true
}

/// Everything needed to build a terrain host and its foliage owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub terrain: TerrainDimensions,
    /// Procedural heights; flat terrain when absent.
    pub heights: Option<HeightParams>,
    pub layers: Vec<LayerConfig>,
    pub biomes: Vec<Biome>,
    /// Name of the terrain's base biome.
    pub terrain_biome: Option<String>,
    pub brushes: Vec<BrushConfig>,
    pub trees: Vec<TreeInstance>,
    pub settings: RefreshSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let meadow = Biome::new("meadow")
            .with_foliage(
                Foliage::new(FoliageAsset::new("grass")).with_rules(
                    SpawnRules::default()
                        .with_rule(TextureRule::include("grass"))
                        .with_noise(NoiseModulator::default().with_scale(glam::Vec2::splat(24.0)).with_octaves(2)),
                ),
            )
            .with_foliage(
                Foliage::new(FoliageAsset::new("flowers"))
                    .with_density(0.25)
                    .with_rules(SpawnRules::default().with_rule(TextureRule::exclude("rock"))),
            );
        let ferns = Biome::new("fern_grove")
            .with_foliage(Foliage::new(FoliageAsset::new("fern")).with_density(0.5));

        Self {
            terrain: TerrainDimensions {
                size: Vec3::new(512.0, 80.0, 512.0),
                detail_resolution: 512,
                detail_resolution_per_patch: 16,
                alphamap_resolution: 256,
                heightmap_resolution: 257,
                ..Default::default()
            },
            heights: Some(HeightParams { height_scale: 40.0, ..Default::default() }),
            layers: vec![
                LayerConfig { name: "grass".into(), weight: 0.9, area: None },
                LayerConfig {
                    name: "rock".into(),
                    weight: 1.0,
                    area: Some(RectConfig { x: 160, y: 32, width: 64, height: 48 }),
                },
            ],
            biomes: vec![meadow, ferns],
            terrain_biome: Some("meadow".into()),
            brushes: vec![BrushConfig {
                curve: ClosedCurve::new(vec![
                    Vec3::new(120.0, 0.0, 300.0),
                    Vec3::new(220.0, 0.0, 280.0),
                    Vec3::new(240.0, 0.0, 390.0),
                    Vec3::new(140.0, 0.0, 420.0),
                ]),
                resolution: 32,
                falloff: 0.3,
                opacity: 1.0,
                draw_order: 0,
                blend_mode: BlendMode::Blend,
                enabled: true,
                biome: Some("fern_grove".into()),
            }],
            trees: vec![
                TreeInstance { position: Vec3::new(0.3, 0.0, 0.3), width_scale: 1.0, height_scale: 1.0 },
                TreeInstance { position: Vec3::new(0.7, 0.0, 0.6), width_scale: 1.5, height_scale: 1.2 },
            ],
            settings: RefreshSettings::default(),
        }
    }
}

impl SceneConfig {
    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Build the host rasters and the foliage owner. Prototypes are
    /// registered; nothing is refreshed yet.
    pub fn build(&self) -> Result<Scene> {
        self.settings.validate()?;

        let mut host = MemoryTerrain::new(self.terrain).with_layers(self.layers.iter().map(|l| l.name.clone()));
        if let Some(params) = &self.heights {
            HeightGenerator::new(params.clone()).fill(&mut host);
        }
        for (index, layer) in self.layers.iter().enumerate() {
            match layer.area {
                Some(area) => host.paint_alpha(index, area.into(), layer.weight),
                None => host.fill_alpha(index, layer.weight),
            }
        }
        for tree in &self.trees {
            host.add_tree(*tree);
        }

        let biomes: HashMap<&str, Arc<Biome>> =
            self.biomes.iter().map(|b| (b.name.as_str(), Arc::new(b.clone()))).collect();
        if biomes.len() != self.biomes.len() {
            return Err(Error::Scene("duplicate biome names".into()));
        }
        let lookup = |name: &str| {
            biomes.get(name).cloned().ok_or_else(|| Error::Scene(format!("unknown biome '{}'", name)))
        };

        let mut terrain = FoliageTerrain::new(self.settings.clone());
        if let Some(name) = &self.terrain_biome {
            terrain = terrain.with_biome(lookup(name)?);
        }
        for config in &self.brushes {
            let mut brush = AreaBrush::new(config.curve.clone())
                .with_resolution(config.resolution)
                .with_falloff(config.falloff)
                .with_opacity(config.opacity)
                .with_draw_order(config.draw_order)
                .with_blend_mode(config.blend_mode);
            brush.enabled = config.enabled;
            if let Some(name) = &config.biome {
                brush = brush.with_biome(lookup(name)?);
            }
            terrain = terrain.with_brush(brush);
        }

        terrain.sync_prototypes(&mut host);
        log::info!(
            "Built scene: {} layers, {} biomes, {} brushes, {} trees",
            self.layers.len(),
            self.biomes.len(),
            self.brushes.len(),
            self.trees.len()
        );
        Ok(Scene { host, terrain })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainHost;

    fn small() -> SceneConfig {
        SceneConfig {
            terrain: TerrainDimensions {
                size: Vec3::new(128.0, 40.0, 128.0),
                detail_resolution: 64,
                detail_resolution_per_patch: 8,
                alphamap_resolution: 32,
                heightmap_resolution: 33,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_default_scene_builds() {
        let scene = small().build().unwrap();
        let names: Vec<_> = scene.host.detail_prototypes().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["grass", "flowers", "fern"]);
        assert_eq!(scene.terrain.brushes().len(), 1);
        assert_eq!(scene.host.layers().len(), 2);
    }

    #[test]
    fn test_unknown_biome_is_error() {
        let config = SceneConfig { terrain_biome: Some("desert".into()), ..small() };
        assert!(matches!(config.build(), Err(Error::Scene(_))));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = small();
        config.settings.chunked_refresh_resolution = 0;
        assert!(matches!(config.build(), Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let config = small();
        config.save_sync(&path).unwrap();

        let loaded = SceneConfig::load_sync(&path).unwrap();
        assert_eq!(loaded.terrain, config.terrain);
        assert_eq!(loaded.brushes, config.brushes);
        assert_eq!(loaded.biomes.len(), 2);
        assert_eq!(loaded.biomes[0].foliage(), config.biomes[0].foliage());
    }

    #[test]
    fn test_minimal_json() {
        let json = r#"{
            "terrain": {
                "position": [0.0, 0.0, 0.0],
                "size": [64.0, 10.0, 64.0],
                "detail_resolution": 32,
                "detail_resolution_per_patch": 4,
                "alphamap_resolution": 16,
                "heightmap_resolution": 17
            },
            "heights": null,
            "layers": [],
            "biomes": [{ "name": "plain", "foliage": [{ "asset": { "prefab": "grass" } }] }],
            "terrain_biome": "plain",
            "brushes": [],
            "trees": []
        }"#;
        let config: SceneConfig = serde_json::from_str(json).unwrap();
        let mut scene = config.build().unwrap();
        scene.terrain.refresh_all(&mut scene.host);
        assert!(scene.host.detail_total(0) > 0);
    }
}
