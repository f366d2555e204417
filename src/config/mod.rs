pub mod layers;
pub mod scene;

pub use layers::{palette, parse_hex_color, DecorKind, DecorSpec, FoliageSpec, MotionProfile, PolaroidSpec};
pub use scene::{SceneConfig, SceneSettings};
