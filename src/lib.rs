use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

pub mod animation;
pub mod config;
pub mod interaction;
pub mod layers;
pub mod math;
pub mod mesh;
pub mod render;
pub mod scatter;
pub mod visual;

// Re-exports for JavaScript
pub use animation::TreeMode;
pub use visual::metrics::FrameAnalyzer;

use animation::{MorphProgress, Transform};
use config::{DecorKind, SceneConfig};
use interaction::{GestureInterpreter, HandSignal};
use layers::TreeEnsemble;
use math::{Mat4, Vec3};
use mesh::{polaroid_frame, polaroid_photo, unit_box, unit_sphere, Mesh};
use render::RenderPipeline;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Fraction of the remaining distance the eye covers per frame
const CAMERA_SMOOTHING: f32 = 0.05;

/// Every scene looks at the middle of the tree
const LOOK_TARGET: Vec3 = Vec3::new(0.0, 4.0, 0.0);

/// Smooth-damped camera eye that drifts with hand or pointer input.
///
/// The eye chases `base + influence`. Clearing the influence lets it
/// glide back to the configured rest position on its own; nothing ever
/// snaps.
struct CameraRig {
    base: Vec3,
    eye: Vec3,
    influence: Vec3,
}

impl CameraRig {
    fn new(base: Vec3) -> Self {
        Self {
            base,
            eye: base,
            influence: Vec3::ZERO,
        }
    }

    /// Tracked hand in normalized [-1, 1] screen coordinates. Screen-up
    /// pulls the eye down, so the view tilts to follow the hand.
    fn follow_hand(&mut self, x: f32, y: f32) {
        self.influence = Vec3::new(x * 10.0, -y * 5.0, 0.0);
    }

    /// Pointer fallback, gentler than the hand mapping
    fn follow_pointer(&mut self, x: f32, y: f32) {
        self.influence = Vec3::new(x * 5.0, y * 2.0, 0.0);
    }

    fn release(&mut self) {
        self.influence = Vec3::ZERO;
    }

    fn tick(&mut self) {
        let target = self.base + self.influence;
        self.eye = self.eye.lerp(&target, CAMERA_SMOOTHING);
    }

    fn eye(&self) -> Vec3 {
        self.eye
    }
}

fn decor_mesh(kind: DecorKind) -> Mesh {
    match kind {
        DecorKind::Box => unit_box(),
        DecorKind::Sphere | DecorKind::Light => unit_sphere(),
    }
}

#[cfg(target_arch = "wasm32")]
fn warn_degraded(count: usize) {
    web_sys::console::warn_1(
        &format!("{} entity poses were non-finite this frame; kept previous poses", count).into(),
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn warn_degraded(count: usize) {
    eprintln!("{} entity poses were non-finite this frame; kept previous poses", count);
}

fn card_matrices(transforms: &[Transform]) -> Vec<Mat4> {
    transforms
        .iter()
        .map(|t| Mat4::compose(t.position, t.rotation, t.scale))
        .collect()
}

/// Main engine state exposed to JavaScript
#[wasm_bindgen]
pub struct GrandTree {
    pipeline: RenderPipeline,
    ensemble: Option<TreeEnsemble>,
    progress: MorphProgress,
    interpreter: GestureInterpreter,
    rig: CameraRig,
    time: f32,
    /// Poses skipped as non-finite since the scene loaded
    degraded: usize,
}

#[wasm_bindgen]
impl GrandTree {
    /// Create a new engine instance
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<GrandTree, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let pipeline = RenderPipeline::new(gl, width, height)
            .map_err(|e| JsValue::from_str(&e))?;

        Ok(Self {
            pipeline,
            ensemble: None,
            progress: MorphProgress::new(0.05),
            interpreter: GestureInterpreter::new(),
            rig: CameraRig::new(Vec3::new(0.0, 4.0, 20.0)),
            time: 0.0,
            degraded: 0,
        })
    }

    /// Load a scene from a YAML document
    #[wasm_bindgen]
    pub fn load_scene(&mut self, yaml: &str) -> Result<(), JsValue> {
        let config = SceneConfig::from_yaml(yaml)
            .map_err(|e| JsValue::from_str(&e))?;
        self.load_config(config)
    }

    /// Load the built-in grand tree scene
    #[wasm_bindgen]
    pub fn load_default_scene(&mut self) -> Result<(), JsValue> {
        self.load_config(SceneConfig::grand_default())
    }

    fn load_config(&mut self, config: SceneConfig) -> Result<(), JsValue> {
        let ensemble = TreeEnsemble::generate(&config)
            .map_err(|e| JsValue::from_str(&e))?;

        // Layers come out of generation fully formed, so the first
        // uploads already hold a presentable frame.
        self.pipeline.clear_layers();
        self.pipeline
            .upload_foliage(&ensemble.foliage().point_data())
            .map_err(|e| JsValue::from_str(&e))?;

        for layer in ensemble.decor() {
            let mesh = decor_mesh(layer.kind());
            self.pipeline
                .upload_decor_layer(
                    &mesh,
                    &layer.color_data(),
                    &layer.instance_data(),
                    layer.emissive(),
                )
                .map_err(|e| JsValue::from_str(&e))?;
        }

        if let Some(polaroids) = ensemble.polaroids() {
            self.pipeline
                .upload_card_meshes(&polaroid_frame(), &polaroid_photo())
                .map_err(|e| JsValue::from_str(&e))?;
            self.pipeline
                .set_card_transforms(card_matrices(polaroids.transforms()));
        }

        let [ox, oy, oz] = config.scene.world_offset;
        self.pipeline.set_world_offset(Vec3::new(ox, oy, oz));

        let [cx, cy, cz] = config.scene.camera;
        self.rig = CameraRig::new(Vec3::new(cx, cy, cz));

        self.progress = MorphProgress::new(config.scene.smoothing);
        self.degraded = 0;
        self.ensemble = Some(ensemble);

        Ok(())
    }

    /// Advance the morph and draw one frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.time += dt;
        self.progress.tick();

        if let Some(ensemble) = self.ensemble.as_mut() {
            ensemble.update(self.progress.value(), self.time);

            let skipped = ensemble.skipped_last_tick();
            if skipped > 0 {
                self.degraded += skipped;
                warn_degraded(skipped);
            }

            self.pipeline.update_foliage(&ensemble.foliage().point_data());
            for (index, layer) in ensemble.decor().iter().enumerate() {
                self.pipeline.update_decor_instances(index, &layer.instance_data());
            }
            if let Some(polaroids) = ensemble.polaroids() {
                self.pipeline
                    .set_card_transforms(card_matrices(polaroids.transforms()));
            }
        }

        self.rig.tick();
        self.pipeline.camera_position = self.rig.eye();
        self.pipeline.camera_target = LOOK_TARGET;

        self.pipeline.render(self.time);
    }

    /// Resize the canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), JsValue> {
        self.pipeline
            .resize(width, height)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Choose the target configuration; the morph glides there
    #[wasm_bindgen]
    pub fn set_mode(&mut self, mode: TreeMode) {
        self.progress.set_mode(mode);
    }

    /// Current target configuration
    #[wasm_bindgen]
    pub fn get_mode(&self) -> TreeMode {
        self.progress.mode()
    }

    /// Current morph progress (0 scattered, 1 formed)
    #[wasm_bindgen]
    pub fn get_progress(&self) -> f32 {
        self.progress.value()
    }

    /// True once the morph sits exactly on its target
    #[wasm_bindgen]
    pub fn is_settled(&self) -> bool {
        self.progress.is_settled()
    }

    /// Feed one tracked-hand observation. `label` is the classifier's
    /// gesture name; labels it does not know leave the mode alone.
    #[wasm_bindgen]
    pub fn on_hand_signal(&mut self, x: f32, y: f32, label: &str) {
        let signal = HandSignal::new(x, y, label);
        if let Some(mode) = self.interpreter.interpret(&signal) {
            self.progress.set_mode(mode);
        }
        if let Some([hx, hy]) = self.interpreter.last_position() {
            self.rig.follow_hand(hx, hy);
        }
    }

    /// The tracker lost the hand. The camera drifts home; the mode
    /// stays where the last gesture put it.
    #[wasm_bindgen]
    pub fn on_hand_lost(&mut self) {
        self.interpreter.hand_lost();
        self.rig.release();
    }

    /// Pointer fallback for hosts without a hand tracker. Ignored
    /// while a hand is being followed.
    #[wasm_bindgen]
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.interpreter.last_position().is_none() {
            self.rig.follow_pointer(x, y);
        }
    }

    /// Total entities in the loaded scene
    #[wasm_bindgen]
    pub fn entity_count(&self) -> usize {
        self.ensemble.as_ref().map(|e| e.entity_count()).unwrap_or(0)
    }

    /// Poses skipped as non-finite since the scene loaded
    #[wasm_bindgen]
    pub fn degraded_count(&self) -> usize {
        self.degraded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_rests_without_influence() {
        let base = Vec3::new(0.0, 4.0, 20.0);
        let mut rig = CameraRig::new(base);
        for _ in 0..10 {
            rig.tick();
        }
        assert_eq!(rig.eye(), base);
    }

    #[test]
    fn test_rig_chases_hand() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 4.0, 20.0));
        rig.follow_hand(0.5, 0.2);
        rig.tick();
        // One step covers 5% of the way to (5, 3, 20).
        assert!((rig.eye().x - 0.25).abs() < 1e-6);
        assert!((rig.eye().y - 3.95).abs() < 1e-6);
        assert_eq!(rig.eye().z, 20.0);
    }

    #[test]
    fn test_rig_converges_on_pointer_target() {
        let mut rig = CameraRig::new(Vec3::ZERO);
        rig.follow_pointer(1.0, 1.0);
        for _ in 0..400 {
            rig.tick();
        }
        assert!((rig.eye().x - 5.0).abs() < 0.01);
        assert!((rig.eye().y - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_rig_release_drifts_home() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 4.0, 20.0));
        rig.follow_hand(1.0, 0.0);
        for _ in 0..100 {
            rig.tick();
        }
        assert!(rig.eye().x > 5.0);

        rig.release();
        for _ in 0..400 {
            rig.tick();
        }
        assert!(rig.eye().x.abs() < 0.05);
        assert!((rig.eye().z - 20.0).abs() < 0.05);
    }

    #[test]
    fn test_hand_mapping_stronger_than_pointer() {
        let mut hand = CameraRig::new(Vec3::ZERO);
        let mut pointer = CameraRig::new(Vec3::ZERO);
        hand.follow_hand(1.0, 1.0);
        pointer.follow_pointer(1.0, 1.0);
        for _ in 0..50 {
            hand.tick();
            pointer.tick();
        }
        assert!(hand.eye().x.abs() > pointer.eye().x.abs());
    }

    #[test]
    fn test_decor_mesh_kinds() {
        assert_eq!(decor_mesh(DecorKind::Box).triangle_count(), 12);
        assert!(decor_mesh(DecorKind::Sphere).triangle_count() > 12);
        assert_eq!(
            decor_mesh(DecorKind::Light).triangle_count(),
            decor_mesh(DecorKind::Sphere).triangle_count()
        );
    }

    #[test]
    fn test_card_matrices_carry_positions() {
        let transforms = vec![Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::ZERO,
            scale: 1.0,
        }];
        let mats = card_matrices(&transforms);
        assert_eq!(mats.len(), 1);
        assert_eq!(mats[0].data[12], 1.0);
        assert_eq!(mats[0].data[13], 2.0);
        assert_eq!(mats[0].data[14], 3.0);
    }
}
