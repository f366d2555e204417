pub mod rng;
pub mod sampler;

pub use rng::SeededRng;
pub use sampler::TreeShape;
