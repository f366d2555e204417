//! Easing curves for the morph blend

use serde::{Serialize, Deserialize};

/// Easing function types, selectable per layer profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Raw progress, no shaping
    Linear,
    /// Slow start, accelerate
    EaseIn,
    /// Fast start, decelerate
    EaseOut,
    /// Cubic ease-in-out (default for the chaos/formed blend)
    #[default]
    CubicInOut,
}

/// Apply easing to a value t in range [0, 1].
/// Input is clamped; output is exactly 0 at 0 and exactly 1 at 1.
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t * t,
        Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
    }
}
