use std::f32::consts::TAU;

/// Small deterministic generator for endpoint scattering.
///
/// Every random draw in the crate flows through an instance of this,
/// constructed from the scene seed, so a scene regenerates bit-identically.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next_state(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform draw in [0, 1). Uses the high bits; the low bits of an
    /// LCG cycle too quickly to be usable.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_state() >> 8) as f32 / 16_777_216.0
    }

    /// Uniform draw in [min, max).
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Uniform angle in [0, TAU).
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * TAU
    }
}
