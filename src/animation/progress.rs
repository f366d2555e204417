//! Global morph progress
//!
//! One scalar in [0, 1] drives the whole ensemble: 0 is the scattered
//! cloud, 1 is the formed tree. The externally chosen mode only moves
//! the target; the scalar itself glides toward it a fraction per tick
//! and snaps once it is close enough to be done.

use wasm_bindgen::prelude::*;

/// The two stable configurations the ensemble morphs between
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMode {
    Chaos,
    Formed,
}

impl TreeMode {
    pub fn target(&self) -> f32 {
        match self {
            TreeMode::Chaos => 0.0,
            TreeMode::Formed => 1.0,
        }
    }
}

/// Distance to target below which progress snaps to it exactly.
/// Without the snap the exponential approach never terminates and the
/// settled checks in the renderer would keep missing.
const SNAP_EPSILON: f32 = 0.001;

/// Scalar morph state, smoothed toward the mode target each tick
#[derive(Debug, Clone)]
pub struct MorphProgress {
    progress: f32,
    mode: TreeMode,
    smoothing: f32,
}

impl MorphProgress {
    /// Starts fully formed, which is the scene's opening state.
    pub fn new(smoothing: f32) -> Self {
        Self {
            progress: 1.0,
            mode: TreeMode::Formed,
            smoothing,
        }
    }

    /// Retarget the morph. Progress is never reset here, so switching
    /// modes mid-flight redirects the glide smoothly. Calling with the
    /// current mode changes nothing.
    pub fn set_mode(&mut self, mode: TreeMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> TreeMode {
        self.mode
    }

    /// Advance one frame. Per tick rather than per second: the glide
    /// tracks the host's frame cadence.
    pub fn tick(&mut self) {
        let target = self.mode.target();
        let delta = target - self.progress;
        if delta.abs() < SNAP_EPSILON {
            self.progress = target;
        } else {
            self.progress += delta * self.smoothing;
        }
    }

    pub fn value(&self) -> f32 {
        self.progress
    }

    /// True once progress sits exactly on the mode target.
    pub fn is_settled(&self) -> bool {
        self.progress == self.mode.target()
    }
}
