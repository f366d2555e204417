use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Model matrix from position, XYZ Euler rotation, and uniform scale.
    /// Rotation order matches T * Rx * Ry * Rz * S, so the Z rotation
    /// is applied first in local space.
    pub fn compose(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        let t = Self::translation(position.x, position.y, position.z);
        let rx = Self::rotation_x(rotation.x);
        let ry = Self::rotation_y(rotation.y);
        let rz = Self::rotation_z(rotation.z);
        let s = Self::scale(scale, scale, scale);
        t.mul(&rx).mul(&ry).mul(&rz).mul(&s)
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// Matrix multiplication
    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let m = Mat4::identity();
        assert_eq!(m.data[0], 1.0);
        assert_eq!(m.data[5], 1.0);
        assert_eq!(m.data[10], 1.0);
        assert_eq!(m.data[15], 1.0);
    }

    #[test]
    fn test_translation() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        let p = Vec3::ZERO;
        let result = m.transform_point(p);
        assert!((result.x - 1.0).abs() < 0.0001);
        assert!((result.y - 2.0).abs() < 0.0001);
        assert!((result.z - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_scale() {
        let m = Mat4::scale(2.0, 3.0, 4.0);
        let p = Vec3::new(1.0, 1.0, 1.0);
        let result = m.transform_point(p);
        assert!((result.x - 2.0).abs() < 0.0001);
        assert!((result.y - 3.0).abs() < 0.0001);
        assert!((result.z - 4.0).abs() < 0.0001);
    }

    #[test]
    fn test_rotation_z() {
        let m = Mat4::rotation_z(FRAC_PI_2);
        let p = Vec3::new(1.0, 0.0, 0.0);
        let result = m.transform_point(p);
        assert!((result.x).abs() < 0.0001);
        assert!((result.y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_matrix_mul() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scale(2.0, 2.0, 2.0);
        let combined = t.mul(&s);
        let p = Vec3::new(1.0, 0.0, 0.0);
        let result = combined.transform_point(p);
        assert!((result.x - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_compose_translate_scale() {
        let m = Mat4::compose(Vec3::new(5.0, -1.0, 2.0), Vec3::ZERO, 2.0);
        let p = m.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert!((p.x - 7.0).abs() < 0.0001);
        assert!((p.y - 1.0).abs() < 0.0001);
        assert!((p.z - 4.0).abs() < 0.0001);
    }

    #[test]
    fn test_compose_yaw_faces_forward() {
        // A yaw of PI/2 carries local +Z onto world +X.
        let m = Mat4::compose(Vec3::ZERO, Vec3::new(0.0, FRAC_PI_2, 0.0), 1.0);
        let p = m.transform_point(Vec3::FORWARD);
        assert!((p.x - 1.0).abs() < 0.0001);
        assert!((p.z).abs() < 0.0001);
    }

    #[test]
    fn test_compose_matches_chained_rotations() {
        let rot = Vec3::new(0.3, -1.1, 0.7);
        let m = Mat4::compose(Vec3::ZERO, rot, 1.0);
        let chained = Mat4::rotation_x(rot.x)
            .mul(&Mat4::rotation_y(rot.y))
            .mul(&Mat4::rotation_z(rot.z));
        let p = Vec3::new(0.4, 2.0, -1.3);
        let a = m.transform_point(p);
        let b = chained.transform_point(p);
        assert!(a.distance(&b) < 0.0001);
    }
}
