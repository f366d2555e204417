use crate::animation::{ease, evaluate_decor, MorphEntity, Transform};
use crate::config::{DecorKind, DecorSpec};
use crate::math::{Mat4, Vec3};
use crate::scatter::{sampler, SeededRng, TreeShape};

/// One family of ornaments: gifts, baubles or fairy lights. Every
/// instance shares a mesh, a color and a motion profile; only the
/// per-entity endpoints and rates differ.
pub struct DecorLayer {
    spec: DecorSpec,
    color: Vec3,
    entities: Vec<MorphEntity>,
    transforms: Vec<Transform>,
    skipped: usize,
}

impl DecorLayer {
    pub fn generate(spec: DecorSpec, shape: &TreeShape, rng: &mut SeededRng) -> Result<Self, String> {
        let color = spec.display_color()?;
        let scatter_radius = shape.chaos_radius + spec.chaos_margin;

        let mut entities = Vec::with_capacity(spec.count);
        for _ in 0..spec.count {
            let chaos = sampler::chaos_point(rng, scatter_radius);
            let target = sampler::cone_surface_point(rng, shape, spec.surface_offset);
            let seed = rng.next_f32();
            entities.push(MorphEntity {
                chaos,
                target,
                seed,
                speed: 0.5 + 0.5 * seed,
            });
        }

        let transforms = vec![
            Transform {
                position: Vec3::ZERO,
                rotation: Vec3::ZERO,
                scale: spec.size,
            };
            spec.count
        ];
        let mut layer = Self {
            spec,
            color,
            entities,
            transforms,
            skipped: 0,
        };
        layer.update(1.0, 0.0);
        Ok(layer)
    }

    /// Advance every instance to the current progress. Instances whose
    /// pose comes back non-finite keep their previous transform.
    pub fn update(&mut self, progress: f32, time: f32) {
        let t = ease(progress, self.spec.motion.easing);
        self.skipped = 0;
        for (i, entity) in self.entities.iter().enumerate() {
            let pose = evaluate_decor(entity, i, self.spec.size, t, time, &self.spec.motion);
            if pose.is_finite() {
                self.transforms[i] = pose;
            } else {
                self.skipped += 1;
            }
        }
    }

    /// Per-frame model matrices for instanced drawing, 16 floats per
    /// instance in column-major order.
    pub fn instance_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.transforms.len() * 16);
        for pose in &self.transforms {
            let model = Mat4::compose(pose.position, pose.rotation, pose.scale);
            data.extend_from_slice(model.as_slice());
        }
        data
    }

    /// Static per-instance colors, 3 floats per instance. Uploaded once.
    pub fn color_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.entities.len() * 3);
        for _ in 0..self.entities.len() {
            data.push(self.color.x);
            data.push(self.color.y);
            data.push(self.color.z);
        }
        data
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn kind(&self) -> DecorKind {
        self.spec.kind
    }

    pub fn emissive(&self) -> f32 {
        self.spec.emissive()
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
