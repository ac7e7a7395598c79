use crate::matrix::Matrix4x4;
use crate::transform::Transform;

/// Rotation quaternion, `w` scalar part. Unit length when built from a
/// rotation matrix; composition is the Hamilton product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn dot(self, rhs: Quaternion) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Quaternion {
        let len = self.length();
        Quaternion::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Extracts the quaternion of the rotation in the upper-left 3x3 block,
    /// branching on the trace (Shoemake's method). The block must be a
    /// proper rotation for the result to be meaningful.
    pub fn from_matrix(m: &Matrix4x4) -> Self {
        let m = &m.m;
        let trace = m[0][0] + m[1][1] + m[2][2];
        if trace > 0.0 {
            let mut s = (trace + 1.0).sqrt();
            let w = s * 0.5;
            s = 0.5 / s;
            Quaternion::new(
                (m[2][1] - m[1][2]) * s,
                (m[0][2] - m[2][0]) * s,
                (m[1][0] - m[0][1]) * s,
                w,
            )
        } else {
            // pick the largest diagonal entry to keep the divisor away from
            // zero near 180-degree rotations
            const NXT: [usize; 3] = [1, 2, 0];
            let i = if m[1][1] > m[0][0] {
                if m[2][2] > m[1][1] { 2 } else { 1 }
            } else if m[2][2] > m[0][0] {
                2
            } else {
                0
            };
            let j = NXT[i];
            let k = NXT[j];
            let mut s = ((m[i][i] - (m[j][j] + m[k][k])) + 1.0).sqrt();
            let mut q = [0.0f32; 3];
            q[i] = s * 0.5;
            if s != 0.0 {
                s = 0.5 / s;
            }
            let w = (m[k][j] - m[j][k]) * s;
            q[j] = (m[j][i] + m[i][j]) * s;
            q[k] = (m[k][i] + m[i][k]) * s;
            Quaternion::new(q[0], q[1], q[2], w)
        }
    }

    pub fn from_transform(t: &Transform) -> Self {
        Self::from_matrix(t.matrix())
    }

    /// The pure-rotation transform of this quaternion. The matrix is
    /// orthonormal, so the carried inverse is its transpose.
    pub fn to_transform(self) -> Transform {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let m = Matrix4x4::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - z * w),
            2.0 * (x * z + y * w),
            0.0,
            2.0 * (x * y + z * w),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - x * w),
            0.0,
            2.0 * (x * z - y * w),
            2.0 * (y * z + x * w),
            1.0 - 2.0 * (x * x + y * y),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        );
        Transform::from_matrices(m, m.transpose())
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product; `a * b` rotates by `b` first.
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, -self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector3;

    fn assert_transform_near(a: &Transform, b: &Transform, eps: f32) {
        assert!(
            a.matrix().abs_diff_eq(b.matrix(), eps),
            "matrices differ:\n{:?}\n{:?}",
            a.matrix(),
            b.matrix()
        );
    }

    #[test]
    fn identity_round_trip() {
        let q = Quaternion::from_matrix(&Matrix4x4::IDENTITY);
        assert!((q.w - 1.0).abs() < 1e-6);
        assert!(q.x.abs() < 1e-6 && q.y.abs() < 1e-6 && q.z.abs() < 1e-6);
        assert_transform_near(&q.to_transform(), &Transform::IDENTITY, 1e-6);
    }

    #[test]
    fn cardinal_rotation_round_trip() {
        for angle in [30.0, 90.0, -45.0, 120.0] {
            let t = Transform::rotate_y(angle);
            let q = Quaternion::from_transform(&t);
            assert!((q.length() - 1.0).abs() < 1e-5);
            assert_transform_near(&q.to_transform(), &t, 1e-5);
        }
    }

    #[test]
    fn near_half_turn_takes_trace_branch() {
        // trace is close to -1 here, exercising the largest-diagonal branch
        let t = Transform::rotate(180.0, Vector3::new(0.0, 0.0, 1.0)).unwrap();
        let q = Quaternion::from_transform(&t);
        assert!((q.length() - 1.0).abs() < 1e-5);
        assert_transform_near(&q.to_transform(), &t, 1e-5);

        let t = Transform::rotate(179.0, Vector3::new(1.0, 1.0, 0.0)).unwrap();
        let q = Quaternion::from_transform(&t);
        assert_transform_near(&q.to_transform(), &t, 1e-5);
    }

    #[test]
    fn hamilton_product_composes_rotations() {
        let qa = Quaternion::from_transform(&Transform::rotate_x(90.0));
        let qb = Quaternion::from_transform(&Transform::rotate_x(45.0));
        assert_transform_near(&(qa * qb).to_transform(), &Transform::rotate_x(135.0), 1e-5);

        // mixed axes, applied right to left like transform composition
        let qy = Quaternion::from_transform(&Transform::rotate_y(90.0));
        let qz = Quaternion::from_transform(&Transform::rotate_z(90.0));
        let composed = Transform::rotate_y(90.0) * Transform::rotate_z(90.0);
        assert_transform_near(&(qy * qz).to_transform(), &composed, 1e-5);
    }
}
