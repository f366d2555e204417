use crate::animation::{ease, evaluate_foliage, Easing, Transform};
use crate::config::FoliageSpec;
use crate::math::Vec3;
use crate::scatter::{sampler, SeededRng, TreeShape};

/// Sprite color ramp from shadowed to lit needles
const NEEDLE_DARK: Vec3 = Vec3::new(0.0, 0.2, 0.1);
const NEEDLE_LIT: Vec3 = Vec3::new(0.05, 0.4, 0.15);

/// The body of the tree: thousands of point sprites morphing between
/// the scattered cloud and the cone volume. Endpoint data is stored as
/// parallel arrays because the whole layer streams to the GPU each
/// frame.
pub struct FoliageLayer {
    chaos: Vec<Vec3>,
    targets: Vec<Vec3>,
    seeds: Vec<f32>,
    colors: Vec<Vec3>,
    sizes: Vec<f32>,
    /// Current positions, rewritten every tick
    positions: Vec<Vec3>,
    easing: Easing,
    skipped: usize,
}

impl FoliageLayer {
    pub fn generate(spec: &FoliageSpec, shape: &TreeShape, rng: &mut SeededRng) -> Self {
        let count = spec.count;
        let mut chaos = Vec::with_capacity(count);
        let mut targets = Vec::with_capacity(count);
        let mut seeds = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);

        for _ in 0..count {
            let scattered = sampler::chaos_point(rng, shape.chaos_radius);
            let formed = sampler::cone_volume_point(rng, shape);
            let seed = rng.next_f32();

            chaos.push(scattered);
            targets.push(formed);
            seeds.push(seed);
            colors.push(NEEDLE_DARK.lerp(&NEEDLE_LIT, seed));
            sizes.push(0.5 + seed * 0.5);
        }

        let positions = chaos.clone();
        let mut layer = Self {
            chaos,
            targets,
            seeds,
            colors,
            sizes,
            positions,
            easing: spec.easing,
            skipped: 0,
        };
        // Scenes open fully formed.
        layer.update(1.0, 0.0);
        layer
    }

    /// Advance every point to the current progress. A point whose pose
    /// comes back non-finite keeps its previous position; the tick
    /// never aborts for the rest of the layer.
    pub fn update(&mut self, progress: f32, time: f32) {
        let t = ease(progress, self.easing);
        self.skipped = 0;
        for i in 0..self.positions.len() {
            let p = evaluate_foliage(self.chaos[i], self.targets[i], self.seeds[i], t, time);
            if p.is_finite() {
                self.positions[i] = p;
            } else {
                self.skipped += 1;
            }
        }
    }

    /// Point sprite data for GPU upload.
    /// Format: position(3) + size(1) + alpha(1) + color(3) = 8 floats per point
    pub fn point_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.positions.len() * 8);
        for i in 0..self.positions.len() {
            let p = self.positions[i];
            let c = self.colors[i];
            data.push(p.x);
            data.push(p.y);
            data.push(p.z);
            data.push(self.sizes[i]);
            data.push(1.0);
            data.push(c.x);
            data.push(c.y);
            data.push(c.z);
        }
        data
    }

    pub fn label(&self) -> &'static str {
        "foliage"
    }

    pub fn count(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    pub fn skipped_last_tick(&self) -> usize {
        self.skipped
    }

    /// Uniform pose view for the per-frame transform contract. Points
    /// carry no rotation; scale is the static sprite size.
    pub fn transforms(&self) -> Vec<Transform> {
        self.positions
            .iter()
            .zip(&self.sizes)
            .map(|(p, s)| Transform {
                position: *p,
                rotation: Vec3::ZERO,
                scale: *s,
            })
            .collect()
    }
}
