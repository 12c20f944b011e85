//! Spawn rules: where a foliage type may grow.

use serde::{Deserialize, Serialize};

use super::modulator::NoiseModulator;
use crate::math::FloatRange;
use crate::terrain::SurfaceLayer;

/// Whether a texture rule adds or removes density.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    #[default]
    Include,
    Exclude,
}

/// Density contribution from one painted surface layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureRule {
    pub layer: SurfaceLayer,
    #[serde(default)]
    pub kind: RuleKind,
    /// Minimum layer alpha for the rule to apply.
    #[serde(default)]
    pub threshold: f32,
    /// Bypassed rules are ignored entirely.
    #[serde(default)]
    pub bypass: bool,
}

impl TextureRule {
    pub fn include(layer: impl Into<String>) -> Self {
        Self { layer: SurfaceLayer::new(layer), kind: RuleKind::Include, threshold: 0.0, bypass: false }
    }

    pub fn exclude(layer: impl Into<String>) -> Self {
        Self { kind: RuleKind::Exclude, ..Self::include(layer) }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn bypassed(mut self) -> Self {
        self.bypass = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRules {
    /// Allowed surface steepness in degrees.
    pub steepness: FloatRange,
    /// Allowed world height.
    pub height: FloatRange,
    pub texture_rules: Vec<TextureRule>,
    pub noise: NoiseModulator,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            steepness: FloatRange::new(0.0, 45.0),
            height: FloatRange::new(-10000.0, 10000.0),
            texture_rules: Vec::new(),
            noise: NoiseModulator::default(),
        }
    }
}

impl SpawnRules {
    /// Rules that never reduce density: any slope, any height, no noise.
    pub fn unrestricted() -> Self {
        Self {
            steepness: FloatRange::new(0.0, 90.0),
            noise: NoiseModulator::disabled(),
            ..Default::default()
        }
    }

    pub fn with_rule(mut self, rule: TextureRule) -> Self {
        self.texture_rules.push(rule);
        self
    }

    pub fn with_noise(mut self, noise: NoiseModulator) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_steepness(mut self, min: f32, max: f32) -> Self {
        self.steepness = FloatRange::new(min, max);
        self
    }

    pub fn with_height(mut self, min: f32, max: f32) -> Self {
        self.height = FloatRange::new(min, max);
        self
    }

    /// Rules that take part in evaluation, in authored order.
    pub fn active_rules(&self) -> impl Iterator<Item = &TextureRule> {
        self.texture_rules.iter().filter(|r| !r.bypass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_rules_skip_bypassed() {
        let rules = SpawnRules::default()
            .with_rule(TextureRule::include("grass"))
            .with_rule(TextureRule::exclude("rock").bypassed())
            .with_rule(TextureRule::exclude("sand").with_threshold(0.5));
        let names: Vec<_> = rules.active_rules().map(|r| r.layer.0.as_str()).collect();
        assert_eq!(names, ["grass", "sand"]);
    }

    #[test]
    fn test_defaults() {
        let rules = SpawnRules::default();
        assert_eq!(rules.steepness, FloatRange::new(0.0, 45.0));
        assert!(rules.height.contains(-9999.0));
        assert_eq!(rules.noise.alpha, 1.0);
        assert_eq!(SpawnRules::unrestricted().noise.alpha, 0.0);
    }

    #[test]
    fn test_rule_from_json() {
        let rule: TextureRule = serde_json::from_str(r#"{ "layer": "dirt", "kind": "Exclude" }"#).unwrap();
        assert_eq!(rule.layer, SurfaceLayer::new("dirt"));
        assert_eq!(rule.kind, RuleKind::Exclude);
        assert_eq!(rule.threshold, 0.0);
        assert!(!rule.bypass);
    }
}
