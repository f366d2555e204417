//! Scene layers: the foliage cloud, ornament families and keepsake
//! frames, plus the ensemble that generates and ticks them together.

mod decor;
mod ensemble;
mod foliage;
mod polaroids;

pub use decor::DecorLayer;
pub use ensemble::{LayerTransforms, TreeEnsemble};
pub use foliage::FoliageLayer;
pub use polaroids::PolaroidLayer;
