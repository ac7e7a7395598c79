use crate::bbox::Bbox;
use crate::error::TransformError;
use crate::geometry::{Normal3, Point3, Vector3};
use crate::matrix::Matrix4x4;
use crate::ray::{AuxiliaryRay, Ray};

/// Default tolerance band for [`Transform::has_scale`]; kept as a named
/// constant so callers can tune it through [`Transform::has_scale_eps`].
pub const HAS_SCALE_EPS: f32 = 1e-3;

/// Scale factors below this magnitude are rejected as degenerate.
const MIN_SCALE: f32 = 1e-8;

/// Squared lengths below this are treated as zero-length directions.
const DEGENERATE_EPS: f32 = 1e-10;

/// An affine transform as a matched pair of forward and inverse matrices.
///
/// The inverse is carried, never recomputed: composition multiplies the
/// inverses in reverse order and [`Transform::inverse`] just swaps the pair,
/// so no numerical error compounds beyond the original construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: Matrix4x4,
    m_inv: Matrix4x4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m: Matrix4x4::IDENTITY,
        m_inv: Matrix4x4::IDENTITY,
    };

    /// Wraps a matrix pair the caller guarantees to be mutual inverses.
    ///
    /// This is a trust boundary: verifying the pair would cost a full
    /// inversion, which is exactly what carrying the inverse avoids.
    pub fn from_matrices(m: Matrix4x4, m_inv: Matrix4x4) -> Self {
        Self { m, m_inv }
    }

    /// Wraps a forward matrix, computing the inverse by general elimination.
    pub fn from_matrix(m: Matrix4x4) -> Result<Self, TransformError> {
        let m_inv = m.inverse()?;
        Ok(Self { m, m_inv })
    }

    pub fn matrix(&self) -> &Matrix4x4 {
        &self.m
    }

    pub fn inverse_matrix(&self) -> &Matrix4x4 {
        &self.m_inv
    }

    pub fn translate(delta: Vector3) -> Self {
        let m = Matrix4x4::new(
            1.0, 0.0, 0.0, delta.x,
            0.0, 1.0, 0.0, delta.y,
            0.0, 0.0, 1.0, delta.z,
            0.0, 0.0, 0.0, 1.0,
        );
        let m_inv = Matrix4x4::new(
            1.0, 0.0, 0.0, -delta.x,
            0.0, 1.0, 0.0, -delta.y,
            0.0, 0.0, 1.0, -delta.z,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { m, m_inv }
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Result<Self, TransformError> {
        if x.abs() < MIN_SCALE || y.abs() < MIN_SCALE || z.abs() < MIN_SCALE {
            return Err(TransformError::DegenerateScale);
        }
        let m = Matrix4x4::new(
            x, 0.0, 0.0, 0.0,
            0.0, y, 0.0, 0.0,
            0.0, 0.0, z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let m_inv = Matrix4x4::new(
            1.0 / x, 0.0, 0.0, 0.0,
            0.0, 1.0 / y, 0.0, 0.0,
            0.0, 0.0, 1.0 / z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Ok(Self { m, m_inv })
    }

    pub fn rotate_x(angle_deg: f32) -> Self {
        let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();
        let m = Matrix4x4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, cos_t, -sin_t, 0.0,
            0.0, sin_t, cos_t, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { m_inv: m.transpose(), m }
    }

    pub fn rotate_y(angle_deg: f32) -> Self {
        let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();
        let m = Matrix4x4::new(
            cos_t, 0.0, sin_t, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -sin_t, 0.0, cos_t, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { m_inv: m.transpose(), m }
    }

    pub fn rotate_z(angle_deg: f32) -> Self {
        let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();
        let m = Matrix4x4::new(
            cos_t, -sin_t, 0.0, 0.0,
            sin_t, cos_t, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { m_inv: m.transpose(), m }
    }

    /// Rotation about an arbitrary axis (Rodrigues' formula). The axis is
    /// normalized here; a zero-length axis is rejected.
    pub fn rotate(angle_deg: f32, axis: Vector3) -> Result<Self, TransformError> {
        if axis.length_squared() < DEGENERATE_EPS {
            return Err(TransformError::DegenerateAxis);
        }
        let a = axis.normalize();
        let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();
        let m = Matrix4x4::new(
            a.x * a.x + (1.0 - a.x * a.x) * cos_t,
            a.x * a.y * (1.0 - cos_t) - a.z * sin_t,
            a.x * a.z * (1.0 - cos_t) + a.y * sin_t,
            0.0,
            a.x * a.y * (1.0 - cos_t) + a.z * sin_t,
            a.y * a.y + (1.0 - a.y * a.y) * cos_t,
            a.y * a.z * (1.0 - cos_t) - a.x * sin_t,
            0.0,
            a.x * a.z * (1.0 - cos_t) - a.y * sin_t,
            a.y * a.z * (1.0 - cos_t) + a.x * sin_t,
            a.z * a.z + (1.0 - a.z * a.z) * cos_t,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        );
        Ok(Self { m_inv: m.transpose(), m })
    }

    /// World-to-camera transform for a viewpoint at `eye` looking at
    /// `target`. The inverse is the camera-to-world matrix whose columns are
    /// the orthonormal basis (left, up, dir) and `eye`.
    ///
    /// The supplied `up` only fixes the roll; it is re-orthogonalized against
    /// the view direction.
    pub fn look_at(eye: Point3, target: Point3, up: Vector3) -> Result<Self, TransformError> {
        let to_target = target - eye;
        if to_target.length_squared() < DEGENERATE_EPS {
            return Err(TransformError::DegenerateViewDirection);
        }
        if up.length_squared() < DEGENERATE_EPS {
            return Err(TransformError::DegenerateUpVector);
        }
        let dir = to_target.normalize();
        let left = up.normalize().cross(dir);
        if left.length_squared() < DEGENERATE_EPS {
            return Err(TransformError::DegenerateUpVector);
        }
        let left = left.normalize();
        let new_up = dir.cross(left);

        let cam_to_world = Matrix4x4::new(
            left.x, new_up.x, dir.x, eye.x,
            left.y, new_up.y, dir.y, eye.y,
            left.z, new_up.z, dir.z, eye.z,
            0.0, 0.0, 0.0, 1.0,
        );
        // orthonormal basis, so the inverse is the transposed basis with the
        // eye projected onto it
        let eye_v = Vector3::new(eye.x, eye.y, eye.z);
        let world_to_cam = Matrix4x4::new(
            left.x, left.y, left.z, -left.dot(eye_v),
            new_up.x, new_up.y, new_up.z, -new_up.dot(eye_v),
            dir.x, dir.y, dir.z, -dir.dot(eye_v),
            0.0, 0.0, 0.0, 1.0,
        );
        Ok(Self {
            m: world_to_cam,
            m_inv: cam_to_world,
        })
    }

    /// O(1): the carried pair is swapped, never recomputed.
    pub fn inverse(&self) -> Transform {
        Transform {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.m == Matrix4x4::IDENTITY
    }

    pub fn has_scale(&self) -> bool {
        self.has_scale_eps(HAS_SCALE_EPS)
    }

    /// Transforms the three basis vectors and checks their squared lengths
    /// against 1 +/- eps. Cheaper than decomposing.
    pub fn has_scale_eps(&self, eps: f32) -> bool {
        let la2 = self.transform_vector(Vector3::new(1.0, 0.0, 0.0)).length_squared();
        let lb2 = self.transform_vector(Vector3::new(0.0, 1.0, 0.0)).length_squared();
        let lc2 = self.transform_vector(Vector3::new(0.0, 0.0, 1.0)).length_squared();
        (la2 - 1.0).abs() > eps || (lb2 - 1.0).abs() > eps || (lc2 - 1.0).abs() > eps
    }

    /// True when the transform flips orientation (odd number of mirror
    /// factors). Downstream code uses this to flip normals and winding.
    pub fn swap_handedness(&self) -> bool {
        self.m.determinant3() < 0.0
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        let m = &self.m.m;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3];
        let z = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3];
        let w = m[3][0] * p.x + m[3][1] * p.y + m[3][2] * p.z + m[3][3];
        if w == 1.0 {
            Point3::new(x, y, z)
        } else {
            Point3::new(x, y, z) / w
        }
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let m = &self.m.m;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Normals transform by the transpose of the inverse, which keeps them
    /// perpendicular to the transformed surface under non-uniform scale.
    /// The transpose is folded into the indexing.
    pub fn transform_normal(&self, n: Normal3) -> Normal3 {
        let m = &self.m_inv.m;
        Normal3::new(
            m[0][0] * n.x + m[1][0] * n.y + m[2][0] * n.z,
            m[0][1] * n.x + m[1][1] * n.y + m[2][1] * n.z,
            m[0][2] * n.x + m[1][2] * n.y + m[2][2] * n.z,
        )
    }

    /// Point rule on the origin, vector rule on the direction; the
    /// parametric range is preserved. Auxiliary rays transform independently
    /// when present.
    pub fn transform_ray(&self, ray: &Ray) -> Ray {
        Ray {
            origin: self.transform_point(ray.origin),
            direction: self.transform_vector(ray.direction),
            aux: ray.aux.map(|aux| AuxiliaryRay {
                x_origin: self.transform_point(aux.x_origin),
                x_direction: self.transform_vector(aux.x_direction),
                y_origin: self.transform_point(aux.y_origin),
                y_direction: self.transform_vector(aux.y_direction),
            }),
            ..*ray
        }
    }

    /// Transforms all 8 corners and re-wraps them; an axis-aligned box is
    /// not preserved under rotation, so this is the tightest enclosure.
    pub fn transform_bbox(&self, bbox: &Bbox) -> Bbox {
        Bbox::from_points(&bbox.corners().map(|p| self.transform_point(p)))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;

    /// `t1 * t2` applies `t2` first. The inverse multiplies in reverse
    /// order (inverse-of-product identity), preserving the carried pair
    /// exactly instead of re-inverting the composed matrix.
    fn mul(self, rhs: Self) -> Self::Output {
        Transform {
            m: self.m * rhs.m,
            m_inv: rhs.m_inv * self.m_inv,
        }
    }
}
