//! Per-entity transform evaluation
//!
//! Pure functions from (endpoints, eased progress, elapsed time) to a
//! pose. Layers call these every tick; nothing here holds state, so the
//! same inputs always produce the same pose.

use crate::config::MotionProfile;
use crate::math::Vec3;

/// Endpoint data fixed at generation time for one entity
#[derive(Debug, Clone, Copy)]
pub struct MorphEntity {
    pub chaos: Vec3,
    pub target: Vec3,
    /// Uniform draw in [0, 1), fixed at generation
    pub seed: f32,
    /// Motion rate draw; each layer decides the range (spiral frames
    /// draw a signed rate, so this can be negative)
    pub speed: f32,
}

/// Pose for one entity for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// XYZ Euler angles in radians (see Mat4::compose for the order)
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Eased progress above which settled foliage starts to sway.
pub const WIND_THRESHOLD: f32 = 0.8;

/// Eased progress at which spiral frames stop tumbling and face outward.
pub const FACING_THRESHOLD: f32 = 0.5;

/// Bounded noise riding on a scattered endpoint so the cloud drifts
/// instead of freezing. Each component stays within +-0.5.
pub fn chaos_jitter(time: f32, seed: f32) -> Vec3 {
    Vec3::new(
        (time + seed * 10.0).sin(),
        (time * 0.5 + seed).cos(),
        (time * 0.8).sin(),
    ) * 0.5
}

/// Horizontal sway for settled foliage, stronger toward the tip.
pub fn wind_sway(time: f32, y: f32) -> f32 {
    (time * 2.0 + y * 0.5).sin() * 0.1 * (y / 10.0)
}

/// Vertical bob for drifting items, dying out as the shape forms.
pub fn float_offset(time: f32, speed: f32, index: usize, t: f32, amplitude: f32) -> f32 {
    (time * speed + index as f32).sin() * (1.0 - t) * amplitude
}

/// Tumble angles damped by formation progress: full tumble while
/// scattered, zero residual rotation once formed.
pub fn spin(time: f32, speed: f32, t: f32, weights: [f32; 3]) -> Vec3 {
    let base = time * speed * (1.0 - t);
    Vec3::new(base * weights[0], base * weights[1], base * weights[2])
}

/// Pop-in scale: half size fully scattered, full size fully formed.
pub fn pop_scale(base: f32, t: f32) -> f32 {
    base * (0.5 + 0.5 * t)
}

/// Full pose for a hanging item at eased progress `t`.
pub fn evaluate_decor(
    entity: &MorphEntity,
    index: usize,
    base_size: f32,
    t: f32,
    time: f32,
    profile: &MotionProfile,
) -> Transform {
    let mut position = entity.chaos.lerp(&entity.target, t);
    position.y += float_offset(time, entity.speed, index, t, profile.float_amplitude);

    Transform {
        position,
        rotation: spin(time, entity.speed, t, profile.spin),
        scale: pop_scale(base_size, t),
    }
}

/// Full pose for a spiral frame at eased progress `t`. Below the facing
/// threshold the frame tumbles freely at its own signed rate; past it,
/// the frame yaws to face outward from the trunk axis with a slight
/// roll sway.
pub fn evaluate_polaroid(
    entity: &MorphEntity,
    index: usize,
    t: f32,
    time: f32,
    profile: &MotionProfile,
) -> Transform {
    let position = entity.chaos.lerp(&entity.target, t);

    let rotation = if t < FACING_THRESHOLD {
        spin(time, entity.speed, 0.0, profile.spin)
    } else {
        Vec3::new(
            0.0,
            position.x.atan2(position.z),
            (time + index as f32).sin() * 0.1,
        )
    };

    Transform {
        position,
        rotation,
        scale: pop_scale(1.0, t),
    }
}

/// Current position for one foliage point. The jitter rides on the
/// scattered endpoint, so the lerp fades it out as the tree forms; wind
/// only cuts in near the formed end.
pub fn evaluate_foliage(chaos: Vec3, target: Vec3, seed: f32, t: f32, time: f32) -> Vec3 {
    let drifted = chaos + chaos_jitter(time, seed);
    let mut position = drifted.lerp(&target, t);

    if t > WIND_THRESHOLD {
        let sway = wind_sway(time, position.y);
        position.x += sway;
        position.z += sway;
    }

    position
}
