use crate::animation::{ease, evaluate_polaroid, MorphEntity, Transform};
use crate::config::PolaroidSpec;
use crate::math::Vec3;
use crate::scatter::{sampler, SeededRng, TreeShape};

/// Frames start on a shell at this fraction of the cloud radius, well
/// inside the foliage scatter so they read against it.
const SHELL_FRACTION: f32 = 0.8;

/// Keepsake frames that wind down the cone on a spiral. Few in number,
/// rendered per item rather than instanced.
pub struct PolaroidLayer {
    spec: PolaroidSpec,
    entities: Vec<MorphEntity>,
    transforms: Vec<Transform>,
    skipped: usize,
}

impl PolaroidLayer {
    pub fn generate(spec: PolaroidSpec, shape: &TreeShape, rng: &mut SeededRng) -> Self {
        let shell_radius = shape.chaos_radius * SHELL_FRACTION;

        let mut entities = Vec::with_capacity(spec.count);
        for i in 0..spec.count {
            let chaos = sampler::shell_point(rng, i, spec.count, shell_radius);
            let target = sampler::spiral_point(
                shape,
                i,
                spec.count,
                spec.height_fraction,
                spec.wind_turns,
                spec.radial_offset,
            );
            let seed = rng.next_f32();
            entities.push(MorphEntity {
                chaos,
                target,
                seed,
                // Signed rate, so half the frames tumble the other way.
                speed: (seed - 0.5) * 0.5,
            });
        }

        let transforms = vec![
            Transform {
                position: Vec3::ZERO,
                rotation: Vec3::ZERO,
                scale: 1.0,
            };
            spec.count
        ];
        let mut layer = Self {
            spec,
            entities,
            transforms,
            skipped: 0,
        };
        layer.update(1.0, 0.0);
        layer
    }

    /// Advance every frame to the current progress. Frames whose pose
    /// comes back non-finite keep their previous transform.
    pub fn update(&mut self, progress: f32, time: f32) {
        let t = ease(progress, self.spec.motion.easing);
        self.skipped = 0;
        for (i, entity) in self.entities.iter().enumerate() {
            let pose = evaluate_polaroid(entity, i, t, time, &self.spec.motion);
            if pose.is_finite() {
                self.transforms[i] = pose;
            } else {
                self.skipped += 1;
            }
        }
    }

    pub fn label(&self) -> &'static str {
        "polaroids"
    }

    pub fn count(&self) -> usize {
        self.entities.len()
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn skipped_last_tick(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn test_shape() -> TreeShape {
        TreeShape {
            height: 14.0,
            base_radius: 5.0,
            chaos_radius: 25.0,
            vertical_bias: 2.0,
        }
    }

    #[test]
    fn test_population_size() {
        let mut rng = SeededRng::new(42);
        let layer = PolaroidLayer::generate(PolaroidSpec::default(), &test_shape(), &mut rng);
        assert_eq!(layer.count(), 5);
        assert_eq!(layer.transforms().len(), 5);
    }

    #[test]
    fn test_chaos_sits_on_inner_shell() {
        let shape = test_shape();
        let mut rng = SeededRng::new(42);
        let layer = PolaroidLayer::generate(PolaroidSpec::default(), &shape, &mut rng);
        for entity in &layer.entities {
            assert!((entity.chaos.length() - 20.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_chaos_azimuths_evenly_spaced() {
        let mut rng = SeededRng::new(42);
        let layer = PolaroidLayer::generate(PolaroidSpec::default(), &test_shape(), &mut rng);
        for (i, entity) in layer.entities.iter().enumerate() {
            let azimuth = entity.chaos.y.atan2(entity.chaos.x).rem_euclid(TAU);
            let expected = i as f32 / 5.0 * TAU;
            assert!(
                (azimuth - expected).abs() < 0.01 || (azimuth - expected).abs() > TAU - 0.01,
                "frame {} azimuth {} expected {}",
                i,
                azimuth,
                expected
            );
        }
    }

    #[test]
    fn test_targets_follow_the_spiral() {
        let shape = test_shape();
        let spec = PolaroidSpec::default();
        let mut rng = SeededRng::new(42);
        let layer = PolaroidLayer::generate(spec.clone(), &shape, &mut rng);
        for (i, entity) in layer.entities.iter().enumerate() {
            let expected = sampler::spiral_point(
                &shape,
                i,
                spec.count,
                spec.height_fraction,
                spec.wind_turns,
                spec.radial_offset,
            );
            assert_eq!(entity.target, expected);
        }
    }

    #[test]
    fn test_speed_is_signed() {
        let mut rng = SeededRng::new(42);
        let mut spec = PolaroidSpec::default();
        spec.count = 64;
        let layer = PolaroidLayer::generate(spec, &test_shape(), &mut rng);
        let mut negatives = 0;
        for entity in &layer.entities {
            assert!(entity.speed >= -0.25 && entity.speed < 0.25);
            if entity.speed < 0.0 {
                negatives += 1;
            }
        }
        assert!(negatives > 0, "expected some frames to tumble backwards");
    }

    #[test]
    fn test_formed_frames_face_outward() {
        let mut rng = SeededRng::new(42);
        let mut layer = PolaroidLayer::generate(PolaroidSpec::default(), &test_shape(), &mut rng);
        layer.update(1.0, 2.0);

        for (i, pose) in layer.transforms().iter().enumerate() {
            assert_eq!(pose.position, layer.entities[i].target);
            let expected_yaw = pose.position.x.atan2(pose.position.z);
            assert!((pose.rotation.y - expected_yaw).abs() < 0.0001);
            assert_eq!(pose.rotation.x, 0.0);
            assert!(pose.rotation.z.abs() <= 0.1 + 0.0001);
            assert!((pose.scale - 1.0).abs() < 0.0001);
        }
    }

    #[test]
    fn test_scattered_frames_tumble() {
        let mut rng = SeededRng::new(42);
        let mut layer = PolaroidLayer::generate(PolaroidSpec::default(), &test_shape(), &mut rng);
        layer.update(0.0, 4.0);

        for (i, pose) in layer.transforms().iter().enumerate() {
            assert_eq!(pose.position, layer.entities[i].chaos);
            let speed = layer.entities[i].speed;
            assert!((pose.rotation.x - 4.0 * speed).abs() < 0.0001);
            assert!((pose.rotation.y - 4.0 * speed * 0.7).abs() < 0.0001);
            assert!((pose.rotation.z - 4.0 * speed * 0.3).abs() < 0.0001);
            assert!((pose.scale - 0.5).abs() < 0.0001);
        }
    }

    #[test]
    fn test_poisoned_frame_is_skipped() {
        let mut rng = SeededRng::new(42);
        let mut layer = PolaroidLayer::generate(PolaroidSpec::default(), &test_shape(), &mut rng);
        layer.update(1.0, 0.0);
        let before = layer.transforms()[1];

        layer.entities[1].chaos.z = f32::NAN;
        layer.update(0.3, 1.0);

        assert_eq!(layer.skipped_last_tick(), 1);
        assert_eq!(layer.transforms()[1], before);
    }
}
