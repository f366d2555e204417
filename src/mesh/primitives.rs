use crate::math::Vec3;

/// A vertex with position, normal and UV
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: [0.0, 0.0],
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = [u, v];
        self
    }

    /// Convert to flat array for WebGL buffer
    /// Layout: position(3) + normal(3) + uv(2) = 8 floats
    pub fn to_array(&self) -> [f32; 8] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
            self.uv[0], self.uv[1],
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    /// Add a triangle (indices are relative to the mesh's vertex buffer)
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.push(a);
        self.indices.push(b);
        self.indices.push(c);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Merge another mesh into this one
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend(other.vertices.iter().cloned());
        for idx in &other.indices {
            self.indices.push(idx + offset);
        }
    }

    /// Shift every vertex by a fixed offset
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = v.position + offset;
        }
    }

    /// Get vertex buffer data as flat f32 array
    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    /// Get index data
    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Axis-aligned box centered on the origin, four vertices per face so
/// the normals stay flat.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> Mesh {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut mesh = Mesh::new();

    // (normal, two in-plane axes scaled to the half extents)
    let faces = [
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(hw, 0.0, 0.0), Vec3::new(0.0, hh, 0.0)),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-hw, 0.0, 0.0), Vec3::new(0.0, hh, 0.0)),
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -hd), Vec3::new(0.0, hh, 0.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, hd), Vec3::new(0.0, hh, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(hw, 0.0, 0.0), Vec3::new(0.0, 0.0, -hd)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(hw, 0.0, 0.0), Vec3::new(0.0, 0.0, hd)),
    ];

    for (normal, right, up) in faces {
        let center = Vec3::new(normal.x * hw, normal.y * hh, normal.z * hd);
        let start = mesh.add_vertices([
            Vertex::new(center - right - up, normal).with_uv(0.0, 0.0),
            Vertex::new(center + right - up, normal).with_uv(1.0, 0.0),
            Vertex::new(center + right + up, normal).with_uv(1.0, 1.0),
            Vertex::new(center - right + up, normal).with_uv(0.0, 1.0),
        ]);
        mesh.add_quad(start, start + 1, start + 2, start + 3);
    }

    mesh
}

/// Unit cube, scaled per instance by the model matrix.
pub fn unit_box() -> Mesh {
    box_mesh(1.0, 1.0, 1.0)
}

/// Latitude ring of a sphere at the given polar angle.
fn sphere_ring(radius: f32, polar: f32, segments: usize, v_coord: f32) -> Vec<Vertex> {
    let y = radius * polar.cos();
    let ring_radius = radius * polar.sin();

    (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            let position = Vec3::new(
                ring_radius * angle.cos(),
                y,
                ring_radius * angle.sin(),
            );
            Vertex::new(position, position.normalize()).with_uv(i as f32 / segments as f32, v_coord)
        })
        .collect()
}

/// Connect two equal-length rings with a band of quads.
fn connect_rings(mesh: &mut Mesh, ring1_start: u32, ring2_start: u32, segments: usize) {
    for i in 0..segments {
        let i_next = (i + 1) % segments;

        let a = ring1_start + i as u32;
        let b = ring1_start + i_next as u32;
        let c = ring2_start + i_next as u32;
        let d = ring2_start + i as u32;

        mesh.add_quad(a, d, c, b);
    }
}

/// Sphere built from latitude rings connected pole to pole.
pub fn sphere_mesh(radius: f32, segments: usize, rings: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let mut ring_starts = Vec::with_capacity(rings + 1);

    for r in 0..=rings {
        let polar = r as f32 / rings as f32 * std::f32::consts::PI;
        let v_coord = r as f32 / rings as f32;
        let ring = sphere_ring(radius, polar, segments, v_coord);
        ring_starts.push(mesh.add_vertices(ring));
    }

    for r in 0..rings {
        connect_rings(&mut mesh, ring_starts[r], ring_starts[r + 1], segments);
    }

    mesh
}

/// Unit sphere, scaled per instance by the model matrix.
pub fn unit_sphere() -> Mesh {
    sphere_mesh(1.0, 12, 8)
}

/// Flat rectangle in the XY plane facing +Z.
pub fn quad_mesh(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let normal = Vec3::new(0.0, 0.0, 1.0);
    let mut mesh = Mesh::new();
    let start = mesh.add_vertices([
        Vertex::new(Vec3::new(-hw, -hh, 0.0), normal).with_uv(0.0, 0.0),
        Vertex::new(Vec3::new(hw, -hh, 0.0), normal).with_uv(1.0, 0.0),
        Vertex::new(Vec3::new(hw, hh, 0.0), normal).with_uv(1.0, 1.0),
        Vertex::new(Vec3::new(-hw, hh, 0.0), normal).with_uv(0.0, 1.0),
    ]);
    mesh.add_quad(start, start + 1, start + 2, start + 3);
    mesh
}

/// Ivory polaroid frame: a thin box with the classic wide bottom margin
/// left for the caption.
pub fn polaroid_frame() -> Mesh {
    box_mesh(2.2, 2.6, 0.05)
}

/// The photo inset, floated just off the front face and raised above
/// the caption margin.
pub fn polaroid_photo() -> Mesh {
    let mut photo = quad_mesh(1.8, 1.8);
    photo.translate(Vec3::new(0.0, 0.2, 0.031));
    photo
}
