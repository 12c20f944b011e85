//! Placement asset descriptors and the host-facing detail prototype.

use serde::{Deserialize, Serialize};

use crate::math::FloatRange;

/// Host-facing detail prototype. Two prototypes are the same placeable type
/// when every field matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailPrototype {
    /// Identity of the placed mesh/prefab.
    pub name: String,
    pub width: FloatRange,
    pub height: FloatRange,
    pub align_to_ground: f32,
    pub position_jitter: f32,
    pub noise_seed: i32,
    pub noise_spread: f32,
    /// Per-prototype density the host applies on top of cell values.
    pub density: f32,
    pub use_density_scaling: bool,
    pub hole_edge_padding: f32,
}

/// Authored placement parameters for one foliage type.
///
/// Only `prototype()` matters to the density pipeline; the remaining fields
/// are forwarded to the host untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliageAsset {
    /// The placed mesh/prefab.
    pub prefab: String,
    /// Align to the ground normal (0 = upright, 1 = fully aligned).
    pub align_to_ground: f32,
    /// 0 keeps instances ordered, 1 scatters them randomly.
    pub position_jitter: f32,
    pub width: FloatRange,
    pub height: FloatRange,
    pub noise_seed: i32,
    /// Spatial frequency of the scale/color variation noise.
    pub noise_spread: f32,
    pub foliage_density: f32,
    pub use_terrain_density: bool,
    pub hole_edge_padding: f32,
}

impl FoliageAsset {
    pub fn new(prefab: impl Into<String>) -> Self {
        Self { prefab: prefab.into(), ..Default::default() }
    }

    pub fn prototype(&self) -> DetailPrototype {
        DetailPrototype {
            name: self.prefab.clone(),
            width: self.width,
            height: self.height,
            align_to_ground: self.align_to_ground,
            position_jitter: self.position_jitter,
            noise_seed: self.noise_seed,
            noise_spread: self.noise_spread,
            density: self.foliage_density,
            use_density_scaling: self.use_terrain_density,
            hole_edge_padding: self.hole_edge_padding,
        }
    }
}

impl Default for FoliageAsset {
    fn default() -> Self {
        Self {
            prefab: String::new(),
            align_to_ground: 0.0,
            position_jitter: 0.0,
            width: FloatRange::new(1.0, 2.0),
            height: FloatRange::new(1.0, 2.0),
            noise_seed: -1,
            noise_spread: 0.1,
            foliage_density: 1.0,
            use_terrain_density: true,
            hole_edge_padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prototype_identity() {
        let a = FoliageAsset::new("fern");
        let b = FoliageAsset::new("fern");
        let c = FoliageAsset { noise_seed: 42, ..FoliageAsset::new("fern") };
        assert_eq!(a.prototype(), b.prototype());
        assert_ne!(a.prototype(), c.prototype());
        assert_ne!(a.prototype(), FoliageAsset::new("grass").prototype());
    }

    #[test]
    fn test_prototype_forwards_fields() {
        let asset = FoliageAsset {
            prefab: "tall_grass".into(),
            width: FloatRange::new(0.5, 0.75),
            use_terrain_density: false,
            ..Default::default()
        };
        let proto = asset.prototype();
        assert_eq!(proto.name, "tall_grass");
        assert_eq!(proto.width, FloatRange::new(0.5, 0.75));
        assert!(!proto.use_density_scaling);
        assert_eq!(proto.density, 1.0);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let asset: FoliageAsset = serde_json::from_str(r#"{ "prefab": "moss", "position_jitter": 0.5 }"#).unwrap();
        assert_eq!(asset.prefab, "moss");
        assert_eq!(asset.position_jitter, 0.5);
        assert_eq!(asset.noise_seed, -1);
    }
}
