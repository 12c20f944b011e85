//! Refresh settings (user-facing, persisted as JSON).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::mask::{DEFAULT_TREE_BLEND_RANGE, DEFAULT_TREE_PADDING};
use crate::math::FloatRange;

/// Largest tree padding accepted by `validate()`.
pub const MAX_TREE_PADDING: f32 = 16.0;

/// Switches and limits for one foliage terrain's refreshes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Run the brush pass.
    pub evaluate_brushes: bool,
    /// Apply brush falloff; off gives every brush a hard edge.
    pub evaluate_brush_falloff: bool,
    /// Run the tree exclusion pass.
    pub evaluate_trees: bool,
    pub tree_blend_range: FloatRange,
    /// Exclusion radius per unit of tree width scale, in [0, 16].
    pub tree_padding: f32,
    /// Largest chunk edge in detail pixels when refreshing chunked.
    pub chunked_refresh_resolution: u32,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            evaluate_brushes: true,
            evaluate_brush_falloff: true,
            evaluate_trees: true,
            tree_blend_range: DEFAULT_TREE_BLEND_RANGE,
            tree_padding: DEFAULT_TREE_PADDING,
            chunked_refresh_resolution: 256,
        }
    }
}

impl RefreshSettings {
    pub fn validate(&self) -> Result<()> {
        if self.chunked_refresh_resolution == 0 {
            return Err(Error::InvalidSettings("chunked_refresh_resolution must be positive".into()));
        }
        if self.tree_blend_range.is_inverted() {
            return Err(Error::InvalidSettings(format!(
                "tree_blend_range is inverted ({} > {})",
                self.tree_blend_range.min, self.tree_blend_range.max
            )));
        }
        if !(0.0..=MAX_TREE_PADDING).contains(&self.tree_padding) {
            return Err(Error::InvalidSettings(format!(
                "tree_padding {} outside [0, {}]",
                self.tree_padding, MAX_TREE_PADDING
            )));
        }
        Ok(())
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync) and validate
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let s = RefreshSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.tree_blend_range, FloatRange::new(0.25, 0.5));
        assert_eq!(s.tree_padding, 4.0);
        assert_eq!(s.chunked_refresh_resolution, 256);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = RefreshSettings { chunked_refresh_resolution: 0, ..Default::default() };
        assert!(matches!(zero.validate(), Err(Error::InvalidSettings(_))));

        let inverted = RefreshSettings { tree_blend_range: FloatRange::new(0.6, 0.2), ..Default::default() };
        assert!(inverted.validate().is_err());

        let padding = RefreshSettings { tree_padding: 20.0, ..Default::default() };
        assert!(padding.validate().is_err());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("refresh.json");
        let settings = RefreshSettings { evaluate_trees: false, chunked_refresh_resolution: 128, ..Default::default() };

        settings.save_sync(&path).unwrap();
        let loaded = RefreshSettings::load_sync(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "evaluate_brushes": false }"#).unwrap();

        let loaded = RefreshSettings::load_sync(&path).unwrap();
        assert!(!loaded.evaluate_brushes);
        assert!(loaded.evaluate_trees);
        assert_eq!(loaded.chunked_refresh_resolution, 256);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(RefreshSettings::load_sync(&dir.path().join("missing.json")), Err(Error::Io(_))));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(RefreshSettings::load_sync(&bad), Err(Error::Json(_))));

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, r#"{ "chunked_refresh_resolution": 0 }"#).unwrap();
        assert!(matches!(RefreshSettings::load_sync(&invalid), Err(Error::InvalidSettings(_))));
    }
}
