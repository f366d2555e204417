use crate::animation::Transform;
use crate::config::SceneConfig;
use crate::layers::{DecorLayer, FoliageLayer, PolaroidLayer};
use crate::scatter::SeededRng;

/// One layer's poses for one frame, keyed by the layer label.
#[derive(Debug, Clone)]
pub struct LayerTransforms {
    pub label: String,
    pub transforms: Vec<Transform>,
}

/// Every layer of the scene, generated from a single validated config
/// and a single seeded stream so the whole ensemble is reproducible.
pub struct TreeEnsemble {
    foliage: FoliageLayer,
    decor: Vec<DecorLayer>,
    polaroids: Option<PolaroidLayer>,
}

impl TreeEnsemble {
    pub fn generate(config: &SceneConfig) -> Result<Self, String> {
        let shape = config.tree_shape();
        let mut rng = SeededRng::new(config.scene.seed);

        let foliage = FoliageLayer::generate(&config.foliage, &shape, &mut rng);
        let mut decor = Vec::with_capacity(config.decor.len());
        for spec in &config.decor {
            decor.push(DecorLayer::generate(spec.clone(), &shape, &mut rng)?);
        }
        let polaroids = config
            .polaroids
            .as_ref()
            .map(|spec| PolaroidLayer::generate(spec.clone(), &shape, &mut rng));

        Ok(Self {
            foliage,
            decor,
            polaroids,
        })
    }

    /// Advance every layer to the shared progress. Layers ease the raw
    /// value through their own curves.
    pub fn update(&mut self, progress: f32, time: f32) {
        self.foliage.update(progress, time);
        for layer in &mut self.decor {
            layer.update(progress, time);
        }
        if let Some(polaroids) = &mut self.polaroids {
            polaroids.update(progress, time);
        }
    }

    pub fn foliage(&self) -> &FoliageLayer {
        &self.foliage
    }

    pub fn decor(&self) -> &[DecorLayer] {
        &self.decor
    }

    pub fn polaroids(&self) -> Option<&PolaroidLayer> {
        self.polaroids.as_ref()
    }

    pub fn entity_count(&self) -> usize {
        let decor: usize = self.decor.iter().map(|l| l.count()).sum();
        let polaroids = self.polaroids.as_ref().map_or(0, |l| l.count());
        self.foliage.count() + decor + polaroids
    }

    /// Entities whose pose came back non-finite on the last tick and
    /// kept their previous transform instead.
    pub fn skipped_last_tick(&self) -> usize {
        let decor: usize = self.decor.iter().map(|l| l.skipped_last_tick()).sum();
        let polaroids = self.polaroids.as_ref().map_or(0, |l| l.skipped_last_tick());
        self.foliage.skipped_last_tick() + decor + polaroids
    }

    /// Every pose this frame, one entry per layer in draw order.
    pub fn transform_snapshot(&self) -> Vec<LayerTransforms> {
        let mut snapshot = Vec::with_capacity(self.decor.len() + 2);
        snapshot.push(LayerTransforms {
            label: self.foliage.label().to_string(),
            transforms: self.foliage.transforms(),
        });
        for layer in &self.decor {
            snapshot.push(LayerTransforms {
                label: layer.label().to_string(),
                transforms: layer.transforms().to_vec(),
            });
        }
        if let Some(polaroids) = &self.polaroids {
            snapshot.push(LayerTransforms {
                label: polaroids.label().to_string(),
                transforms: polaroids.transforms().to_vec(),
            });
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    fn small_config() -> SceneConfig {
        let yaml = r##"
scene:
  seed: 42
foliage:
  count: 400
decor:
  - label: gold-baubles
    count: 30
    color: "#FFD700"
    size: 0.25
    kind: sphere
  - label: fairy-lights
    count: 50
    color: "#FFFDD0"
    size: 0.08
    kind: light
polaroids:
  count: 5
"##;
        SceneConfig::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_entity_count_sums_layers() {
        let ensemble = TreeEnsemble::generate(&small_config()).unwrap();
        assert_eq!(ensemble.entity_count(), 400 + 30 + 50 + 5);
    }

    #[test]
    fn test_generation_is_reproducible() {
        let config = small_config();
        let mut a = TreeEnsemble::generate(&config).unwrap();
        let mut b = TreeEnsemble::generate(&config).unwrap();
        a.update(0.4, 2.5);
        b.update(0.4, 2.5);

        let sa = a.transform_snapshot();
        let sb = b.transform_snapshot();
        assert_eq!(sa.len(), sb.len());
        for (la, lb) in sa.iter().zip(&sb) {
            assert_eq!(la.label, lb.label);
            assert_eq!(la.transforms, lb.transforms);
        }
    }

    #[test]
    fn test_snapshot_keys_follow_draw_order() {
        let mut ensemble = TreeEnsemble::generate(&small_config()).unwrap();
        ensemble.update(1.0, 0.0);
        let snapshot = ensemble.transform_snapshot();

        let labels: Vec<&str> = snapshot.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["foliage", "gold-baubles", "fairy-lights", "polaroids"]);
        assert_eq!(snapshot[0].transforms.len(), 400);
        assert_eq!(snapshot[3].transforms.len(), 5);
    }

    #[test]
    fn test_update_touches_every_layer() {
        let mut ensemble = TreeEnsemble::generate(&small_config()).unwrap();
        ensemble.update(1.0, 0.0);
        let formed = ensemble.transform_snapshot();
        ensemble.update(0.0, 0.0);
        let scattered = ensemble.transform_snapshot();

        for (f, s) in formed.iter().zip(&scattered) {
            let moved = f
                .transforms
                .iter()
                .zip(&s.transforms)
                .any(|(a, b)| a.position.distance(&b.position) > 1.0);
            assert!(moved, "layer {} never moved", f.label);
        }
    }

    #[test]
    fn test_healthy_scene_skips_nothing() {
        let mut ensemble = TreeEnsemble::generate(&small_config()).unwrap();
        ensemble.update(0.5, 3.0);
        assert_eq!(ensemble.skipped_last_tick(), 0);
    }

    #[test]
    fn test_scene_without_polaroids() {
        let yaml = r##"
foliage:
  count: 100
decor:
  - label: gold-baubles
    count: 10
    color: "#FFD700"
    size: 0.25
    kind: sphere
"##;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        let mut ensemble = TreeEnsemble::generate(&config).unwrap();
        ensemble.update(0.7, 1.0);

        assert!(ensemble.polaroids().is_none());
        assert_eq!(ensemble.entity_count(), 110);
        assert_eq!(ensemble.transform_snapshot().len(), 2);
    }
}
