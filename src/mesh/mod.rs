pub mod primitives;

pub use primitives::{
    box_mesh, polaroid_frame, polaroid_photo, quad_mesh, sphere_mesh, unit_box, unit_sphere,
    Mesh, Vertex,
};
