use std::f32::consts::{PI, TAU};

use crate::math::Vec3;
use super::SeededRng;

/// Shared dimensions every sampler works against. Built from a validated
/// scene config, so height is always positive here.
#[derive(Debug, Clone, Copy)]
pub struct TreeShape {
    pub height: f32,
    pub base_radius: f32,
    pub chaos_radius: f32,
    pub vertical_bias: f32,
}

impl TreeShape {
    /// Vertical world position for a height measured from the cone base.
    fn lift(&self, h: f32) -> f32 {
        h - self.height * 0.5 + self.vertical_bias
    }
}

/// Radius of the cone shell at height `h` above the base. Linear taper:
/// full base radius at 0, zero at the tip.
pub fn cone_radius_at(shape: &TreeShape, h: f32) -> f32 {
    shape.base_radius * (1.0 - h / shape.height)
}

/// Scattered endpoint inside a sphere of the given radius.
///
/// The direction is uniform over the solid angle, but the radial draw is
/// linear in the unit sample, which piles points toward the center. The
/// cloud is meant to read as a loose cluster, not a uniformly filled ball,
/// so the linear draw is kept deliberately.
pub fn chaos_point(rng: &mut SeededRng, radius: f32) -> Vec3 {
    let theta = rng.angle();
    let phi = (2.0 * rng.next_f32() - 1.0).acos();
    let r = rng.next_f32() * radius;
    Vec3::from_spherical(theta, phi, r)
}

/// Formed endpoint inside the cone volume. The radius draw uses a square
/// root so points land with uniform density across each horizontal disc.
pub fn cone_volume_point(rng: &mut SeededRng, shape: &TreeShape) -> Vec3 {
    let h = rng.next_f32() * shape.height;
    let rim = cone_radius_at(shape, h);
    let angle = rng.angle();
    let radius = rng.next_f32().sqrt() * rim;
    Vec3::from_cylindrical(radius, angle, shape.lift(h))
}

/// Formed endpoint pushed just outside the cone shell, where hanging
/// items sit on top of the foliage.
pub fn cone_surface_point(rng: &mut SeededRng, shape: &TreeShape, surface_offset: f32) -> Vec3 {
    let h = rng.next_f32() * shape.height;
    let radius = cone_radius_at(shape, h) + surface_offset;
    let angle = rng.angle();
    Vec3::from_cylindrical(radius, angle, shape.lift(h))
}

/// Formed endpoint on a spiral winding down the cone. Fully determined by
/// the entity index, so it needs no draws at all.
pub fn spiral_point(
    shape: &TreeShape,
    index: usize,
    total: usize,
    height_fraction: f32,
    wind_turns: f32,
    radial_offset: f32,
) -> Vec3 {
    let f = index as f32 / total as f32;
    let y = f * shape.height * height_fraction - shape.height * 0.5 + shape.vertical_bias;
    let radius = shape.base_radius * (1.0 - (y + shape.height * 0.5) / shape.height) + radial_offset;
    let angle = f * TAU * wind_turns;
    Vec3::from_cylindrical(radius, angle, y)
}

/// Scattered endpoint on a fixed shell, evenly spaced around the axis with
/// only the polar angle drawn. Spiral entities start from here so they
/// never bunch up on one side of the cloud.
pub fn shell_point(rng: &mut SeededRng, index: usize, total: usize, radius: f32) -> Vec3 {
    let theta = index as f32 / total as f32 * TAU;
    let phi = rng.next_f32() * PI;
    Vec3::from_spherical(theta, phi, radius)
}
