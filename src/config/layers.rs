use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::math::Vec3;

/// Luxury palette the default scene leans on
pub mod palette {
    pub const EMERALD_DEEP: &str = "#013220";
    pub const EMERALD_LIGHT: &str = "#0B6623";
    pub const GOLD_HIGH: &str = "#FFD700";
    pub const GOLD_ANTIQUE: &str = "#D4AF37";
    pub const GOLD_ROSE: &str = "#B76E79";
    pub const RED_VELVET: &str = "#800020";
    pub const WARM_WHITE: &str = "#FFFDD0";
    pub const SILVER: &str = "#C0C0C0";
}

/// Parse "#RRGGBB" into RGB components in [0, 1]
pub fn parse_hex_color(hex: &str) -> Result<Vec3, String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return Err(format!("Color '{}' must be #RRGGBB", hex));
    }
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| format!("Color '{}' has invalid hex digits", hex))?;
    Ok(Vec3::new(
        ((value >> 16) & 0xFF) as f32 / 255.0,
        ((value >> 8) & 0xFF) as f32 / 255.0,
        (value & 0xFF) as f32 / 255.0,
    ))
}

/// Geometry drawn for each instance of a decor layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorKind {
    Box,
    Sphere,
    Light,
}

/// Per-layer motion shaping consumed by the morph evaluator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Per-axis tumble rate multipliers
    #[serde(default = "default_spin")]
    pub spin: [f32; 3],
    /// Peak vertical bob while scattered
    #[serde(default = "default_float_amplitude")]
    pub float_amplitude: f32,
    /// Blend curve for this layer
    #[serde(default)]
    pub easing: Easing,
}

fn default_spin() -> [f32; 3] {
    [1.0, 0.5, 0.2]
}

fn default_float_amplitude() -> f32 {
    2.0
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            spin: default_spin(),
            float_amplitude: default_float_amplitude(),
            easing: Easing::default(),
        }
    }
}

impl MotionProfile {
    /// Profile for spiral frames: slower tumble, no bob, raw blend.
    pub fn spiral() -> Self {
        Self {
            spin: [1.0, 0.7, 0.3],
            float_amplitude: 0.0,
            easing: Easing::Linear,
        }
    }
}

/// One ornament layer: N instances of a single shape and color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecorSpec {
    pub label: String,
    pub count: usize,
    pub color: String,
    pub size: f32,
    pub kind: DecorKind,
    /// Extra scatter radius beyond the foliage cloud
    #[serde(default = "default_chaos_margin")]
    pub chaos_margin: f32,
    /// How far outside the cone shell instances settle
    #[serde(default = "default_surface_offset")]
    pub surface_offset: f32,
    #[serde(default)]
    pub motion: MotionProfile,
}

fn default_chaos_margin() -> f32 {
    5.0
}

fn default_surface_offset() -> f32 {
    0.2
}

impl DecorSpec {
    pub fn new(label: &str, count: usize, color: &str, size: f32, kind: DecorKind) -> Self {
        Self {
            label: label.to_string(),
            count,
            color: color.to_string(),
            size,
            kind,
            chaos_margin: default_chaos_margin(),
            surface_offset: default_surface_offset(),
            motion: MotionProfile::default(),
        }
    }

    /// Instance color for rendering. Light strings burn brighter than
    /// their paint color so the bloom pass picks them up.
    pub fn display_color(&self) -> Result<Vec3, String> {
        let color = parse_hex_color(&self.color)?;
        Ok(match self.kind {
            DecorKind::Light => color * 2.0,
            _ => color,
        })
    }

    /// Self-illumination strength fed to the shader
    pub fn emissive(&self) -> f32 {
        match self.kind {
            DecorKind::Light => 2.0,
            _ => 0.0,
        }
    }
}

/// Photo frames winding down the formed tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolaroidSpec {
    pub count: usize,
    /// Full turns of the spiral from base to top
    #[serde(default = "default_wind_turns")]
    pub wind_turns: f32,
    /// How much of the tree height the spiral climbs
    #[serde(default = "default_height_fraction")]
    pub height_fraction: f32,
    /// Clearance between the spiral and the foliage shell
    #[serde(default = "default_radial_offset")]
    pub radial_offset: f32,
    #[serde(default = "MotionProfile::spiral")]
    pub motion: MotionProfile,
}

fn default_wind_turns() -> f32 {
    2.0
}

fn default_height_fraction() -> f32 {
    0.8
}

fn default_radial_offset() -> f32 {
    1.5
}

impl Default for PolaroidSpec {
    fn default() -> Self {
        Self {
            count: 5,
            wind_turns: default_wind_turns(),
            height_fraction: default_height_fraction(),
            radial_offset: default_radial_offset(),
            motion: MotionProfile::spiral(),
        }
    }
}

/// The point cloud that forms the body of the tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoliageSpec {
    #[serde(default = "default_foliage_count")]
    pub count: usize,
    #[serde(default)]
    pub easing: Easing,
}

fn default_foliage_count() -> usize {
    15000
}

impl Default for FoliageSpec {
    fn default() -> Self {
        Self {
            count: default_foliage_count(),
            easing: Easing::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let gold = parse_hex_color("#FFD700").unwrap();
        assert!((gold.x - 1.0).abs() < 0.001);
        assert!((gold.y - 215.0 / 255.0).abs() < 0.001);
        assert!((gold.z).abs() < 0.001);

        let black = parse_hex_color("#000000").unwrap();
        assert_eq!(black, Vec3::ZERO);

        let white = parse_hex_color("FFFFFF").unwrap();
        assert!((white.x - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_hex_color_rejects_bad_input() {
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("#GGHHII").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_palette_parses() {
        for hex in [
            palette::EMERALD_DEEP,
            palette::EMERALD_LIGHT,
            palette::GOLD_HIGH,
            palette::GOLD_ANTIQUE,
            palette::GOLD_ROSE,
            palette::RED_VELVET,
            palette::WARM_WHITE,
            palette::SILVER,
        ] {
            assert!(parse_hex_color(hex).is_ok(), "palette color {} must parse", hex);
        }
    }

    #[test]
    fn test_motion_profile_defaults() {
        let profile = MotionProfile::default();
        assert_eq!(profile.spin, [1.0, 0.5, 0.2]);
        assert_eq!(profile.float_amplitude, 2.0);
        assert_eq!(profile.easing, Easing::CubicInOut);
    }

    #[test]
    fn test_spiral_profile() {
        let profile = MotionProfile::spiral();
        assert_eq!(profile.spin, [1.0, 0.7, 0.3]);
        assert_eq!(profile.float_amplitude, 0.0);
        assert_eq!(profile.easing, Easing::Linear);
    }

    #[test]
    fn test_decor_kind_yaml_names() {
        assert_eq!(serde_yaml::from_str::<DecorKind>("box").unwrap(), DecorKind::Box);
        assert_eq!(serde_yaml::from_str::<DecorKind>("sphere").unwrap(), DecorKind::Sphere);
        assert_eq!(serde_yaml::from_str::<DecorKind>("light").unwrap(), DecorKind::Light);
    }

    #[test]
    fn test_light_color_boost() {
        let lights = DecorSpec::new("lights", 500, palette::WARM_WHITE, 0.08, DecorKind::Light);
        let color = lights.display_color().unwrap();
        assert!(color.x > 1.5, "light color should be boosted past 1.0");
        assert_eq!(lights.emissive(), 2.0);

        let baubles = DecorSpec::new("baubles", 150, palette::GOLD_HIGH, 0.25, DecorKind::Sphere);
        let plain = baubles.display_color().unwrap();
        assert!(plain.x <= 1.0);
        assert_eq!(baubles.emissive(), 0.0);
    }

    #[test]
    fn test_decor_spec_from_yaml() {
        let yaml = r##"
label: test-gifts
count: 12
color: "#800020"
size: 0.7
kind: box
"##;
        let spec: DecorSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.label, "test-gifts");
        assert_eq!(spec.count, 12);
        assert_eq!(spec.chaos_margin, 5.0);
        assert_eq!(spec.surface_offset, 0.2);
        assert_eq!(spec.motion.easing, Easing::CubicInOut);
    }

    #[test]
    fn test_polaroid_spec_defaults() {
        let spec = PolaroidSpec::default();
        assert_eq!(spec.count, 5);
        assert_eq!(spec.wind_turns, 2.0);
        assert_eq!(spec.height_fraction, 0.8);
        assert_eq!(spec.radial_offset, 1.5);
        assert_eq!(spec.motion.easing, Easing::Linear);
    }
}
