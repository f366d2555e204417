use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::scatter::TreeShape;
use super::layers::{
    palette, parse_hex_color, DecorKind, DecorSpec, FoliageSpec, PolaroidSpec,
};

/// Scene-wide dimensions and tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSettings {
    #[serde(default = "default_tree_height")]
    pub tree_height: f32,
    #[serde(default = "default_base_radius")]
    pub base_radius: f32,
    #[serde(default = "default_chaos_radius")]
    pub chaos_radius: f32,
    /// Vertical shift applied to every formed endpoint
    #[serde(default = "default_vertical_bias")]
    pub vertical_bias: f32,
    /// Fraction of the remaining distance progress covers per tick
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
    #[serde(default = "default_seed")]
    pub seed: u32,
    #[serde(default = "default_camera")]
    pub camera: [f32; 3],
    /// Where the ensemble sits relative to the camera's look target
    #[serde(default = "default_world_offset")]
    pub world_offset: [f32; 3],
}

fn default_tree_height() -> f32 {
    14.0
}

fn default_base_radius() -> f32 {
    5.0
}

fn default_chaos_radius() -> f32 {
    25.0
}

fn default_vertical_bias() -> f32 {
    2.0
}

fn default_smoothing() -> f32 {
    0.05
}

fn default_seed() -> u32 {
    42
}

fn default_camera() -> [f32; 3] {
    [0.0, 4.0, 20.0]
}

fn default_world_offset() -> [f32; 3] {
    [0.0, -2.0, 0.0]
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            tree_height: default_tree_height(),
            base_radius: default_base_radius(),
            chaos_radius: default_chaos_radius(),
            vertical_bias: default_vertical_bias(),
            smoothing: default_smoothing(),
            seed: default_seed(),
            camera: default_camera(),
            world_offset: default_world_offset(),
        }
    }
}

/// Whole scene document: dimensions plus every layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub scene: SceneSettings,
    #[serde(default)]
    pub foliage: FoliageSpec,
    #[serde(default)]
    pub decor: Vec<DecorSpec>,
    #[serde(default)]
    pub polaroids: Option<PolaroidSpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::grand_default()
    }
}

impl SceneConfig {
    /// Parse and validate a YAML scene document
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let config: SceneConfig = serde_yaml::from_str(yaml)
            .map_err(|e| format!("YAML parse error: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in grand tree: emerald foliage, gold and velvet gifts,
    /// baubles, fairy lights, and a spiral of photo frames.
    pub fn grand_default() -> Self {
        Self {
            scene: SceneSettings::default(),
            foliage: FoliageSpec::default(),
            decor: vec![
                DecorSpec::new("gold-gifts", 40, palette::GOLD_ANTIQUE, 0.6, DecorKind::Box),
                DecorSpec::new("red-gifts", 40, palette::RED_VELVET, 0.7, DecorKind::Box),
                DecorSpec::new("gold-baubles", 150, palette::GOLD_HIGH, 0.25, DecorKind::Sphere),
                DecorSpec::new("silver-baubles", 150, palette::SILVER, 0.2, DecorKind::Sphere),
                DecorSpec::new("fairy-lights", 500, palette::WARM_WHITE, 0.08, DecorKind::Light),
            ],
            polaroids: Some(PolaroidSpec::default()),
        }
    }

    /// Reject anything generation or rendering cannot take at face
    /// value. Validation never clamps; a bad document is refused whole.
    pub fn validate(&self) -> Result<(), String> {
        let s = &self.scene;
        if s.tree_height <= 0.0 {
            return Err(format!("scene.tree_height must be positive, got {}", s.tree_height));
        }
        if s.base_radius <= 0.0 {
            return Err(format!("scene.base_radius must be positive, got {}", s.base_radius));
        }
        if s.chaos_radius <= 0.0 {
            return Err(format!("scene.chaos_radius must be positive, got {}", s.chaos_radius));
        }
        if !(s.smoothing > 0.0 && s.smoothing <= 1.0) {
            return Err(format!("scene.smoothing must be in (0, 1], got {}", s.smoothing));
        }

        if self.foliage.count == 0 {
            return Err("foliage.count must be at least 1".to_string());
        }

        let mut labels = HashSet::new();
        for spec in &self.decor {
            if spec.label.is_empty() {
                return Err("decor layer label must not be empty".to_string());
            }
            if !labels.insert(spec.label.as_str()) {
                return Err(format!("duplicate decor label '{}'", spec.label));
            }
            if spec.count == 0 {
                return Err(format!("decor '{}' count must be at least 1", spec.label));
            }
            if spec.size <= 0.0 {
                return Err(format!("decor '{}' size must be positive, got {}", spec.label, spec.size));
            }
            if spec.chaos_margin < 0.0 {
                return Err(format!("decor '{}' chaos_margin must not be negative", spec.label));
            }
            if spec.surface_offset < 0.0 {
                return Err(format!("decor '{}' surface_offset must not be negative", spec.label));
            }
            parse_hex_color(&spec.color)
                .map_err(|e| format!("decor '{}': {}", spec.label, e))?;
        }

        if let Some(p) = &self.polaroids {
            if p.count == 0 {
                return Err("polaroids.count must be at least 1".to_string());
            }
            if p.wind_turns <= 0.0 {
                return Err(format!("polaroids.wind_turns must be positive, got {}", p.wind_turns));
            }
            if !(p.height_fraction > 0.0 && p.height_fraction <= 1.0) {
                return Err(format!(
                    "polaroids.height_fraction must be in (0, 1], got {}",
                    p.height_fraction
                ));
            }
            if p.radial_offset < 0.0 {
                return Err("polaroids.radial_offset must not be negative".to_string());
            }
        }

        Ok(())
    }

    pub fn tree_shape(&self) -> TreeShape {
        TreeShape {
            height: self.scene.tree_height,
            base_radius: self.scene.base_radius,
            chaos_radius: self.scene.chaos_radius,
            vertical_bias: self.scene.vertical_bias,
        }
    }

    /// Total entities across every layer
    pub fn entity_count(&self) -> usize {
        self.foliage.count
            + self.decor.iter().map(|d| d.count).sum::<usize>()
            + self.polaroids.as_ref().map(|p| p.count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;

    const SAMPLE_YAML: &str = r##"
scene:
  tree_height: 10.0
  base_radius: 4.0
  chaos_radius: 20.0
  seed: 7
  camera: [0.0, 3.0, 18.0]

foliage:
  count: 2000
  easing: cubic-in-out

decor:
  - label: baubles
    count: 24
    color: "#FFD700"
    size: 0.3
    kind: sphere
  - label: lanterns
    count: 8
    color: "#FFFDD0"
    size: 0.1
    kind: light
    motion:
      spin: [0.5, 0.2, 0.1]
      float_amplitude: 1.0
      easing: linear

polaroids:
  count: 3
  wind_turns: 1.5
"##;

    #[test]
    fn test_parse_yaml() {
        let config = SceneConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(config.scene.tree_height, 10.0);
        assert_eq!(config.scene.seed, 7);
        assert_eq!(config.foliage.count, 2000);
        assert_eq!(config.decor.len(), 2);
        assert_eq!(config.decor[1].motion.float_amplitude, 1.0);
        assert_eq!(config.decor[1].motion.easing, Easing::Linear);
        assert_eq!(config.polaroids.as_ref().unwrap().count, 3);
    }

    #[test]
    fn test_omitted_fields_fall_back() {
        let config = SceneConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(config.scene.vertical_bias, 2.0);
        assert_eq!(config.scene.smoothing, 0.05);
        assert_eq!(config.scene.world_offset, [0.0, -2.0, 0.0]);
        assert_eq!(config.polaroids.as_ref().unwrap().height_fraction, 0.8);
    }

    #[test]
    fn test_empty_document_is_default_scene() {
        let config = SceneConfig::from_yaml("{}").unwrap();
        assert_eq!(config.scene.tree_height, 14.0);
        assert_eq!(config.foliage.count, 15000);
        assert!(config.decor.is_empty());
        assert!(config.polaroids.is_none());
    }

    #[test]
    fn test_grand_default_validates() {
        let config = SceneConfig::grand_default();
        assert!(config.validate().is_ok());
        assert_eq!(config.decor.len(), 5);
        assert_eq!(config.foliage.count, 15000);
        assert_eq!(config.entity_count(), 15000 + 880 + 5);
    }

    #[test]
    fn test_rejects_zero_foliage() {
        let yaml = "foliage:\n  count: 0\n";
        let err = SceneConfig::from_yaml(yaml).unwrap_err();
        assert!(err.contains("foliage"));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let err = SceneConfig::from_yaml("scene:\n  tree_height: 0.0\n").unwrap_err();
        assert!(err.contains("tree_height"));

        let err = SceneConfig::from_yaml("scene:\n  base_radius: -2.0\n").unwrap_err();
        assert!(err.contains("base_radius"));

        let err = SceneConfig::from_yaml("scene:\n  chaos_radius: 0.0\n").unwrap_err();
        assert!(err.contains("chaos_radius"));
    }

    #[test]
    fn test_rejects_bad_smoothing() {
        assert!(SceneConfig::from_yaml("scene:\n  smoothing: 0.0\n").is_err());
        assert!(SceneConfig::from_yaml("scene:\n  smoothing: 1.5\n").is_err());
        assert!(SceneConfig::from_yaml("scene:\n  smoothing: 1.0\n").is_ok());
    }

    #[test]
    fn test_rejects_bad_decor() {
        let zero_count = r##"
decor:
  - label: gifts
    count: 0
    color: "#D4AF37"
    size: 0.5
    kind: box
"##;
        assert!(SceneConfig::from_yaml(zero_count).unwrap_err().contains("gifts"));

        let bad_color = r#"
decor:
  - label: gifts
    count: 4
    color: "gold"
    size: 0.5
    kind: box
"#;
        assert!(SceneConfig::from_yaml(bad_color).unwrap_err().contains("gold"));

        let duplicate = r##"
decor:
  - label: gifts
    count: 4
    color: "#D4AF37"
    size: 0.5
    kind: box
  - label: gifts
    count: 4
    color: "#800020"
    size: 0.5
    kind: box
"##;
        assert!(SceneConfig::from_yaml(duplicate).unwrap_err().contains("duplicate"));
    }

    #[test]
    fn test_rejects_bad_polaroids() {
        let err = SceneConfig::from_yaml("polaroids:\n  count: 0\n").unwrap_err();
        assert!(err.contains("polaroids"));

        let err = SceneConfig::from_yaml("polaroids:\n  count: 3\n  height_fraction: 1.2\n")
            .unwrap_err();
        assert!(err.contains("height_fraction"));

        let err = SceneConfig::from_yaml("polaroids:\n  count: 3\n  wind_turns: 0.0\n")
            .unwrap_err();
        assert!(err.contains("wind_turns"));
    }

    #[test]
    fn test_tree_shape() {
        let config = SceneConfig::from_yaml(SAMPLE_YAML).unwrap();
        let shape = config.tree_shape();
        assert_eq!(shape.height, 10.0);
        assert_eq!(shape.base_radius, 4.0);
        assert_eq!(shape.chaos_radius, 20.0);
        assert_eq!(shape.vertical_bias, 2.0);
    }
}
