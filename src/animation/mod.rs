//! Morph animation core
//!
//! Drives the glide between the scattered cloud and the formed tree:
//! one smoothed progress scalar, easing curves, and the pure per-entity
//! pose evaluation layers run every tick.

mod easing;
mod evaluator;
mod progress;

pub use easing::{ease, Easing};
pub use evaluator::{
    chaos_jitter, evaluate_decor, evaluate_foliage, evaluate_polaroid, float_offset, pop_scale,
    spin, wind_sway, MorphEntity, Transform, FACING_THRESHOLD, WIND_THRESHOLD,
};
pub use progress::{MorphProgress, TreeMode};
