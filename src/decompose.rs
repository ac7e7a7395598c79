use log::debug;

use crate::error::TransformError;
use crate::geometry::Vector3;
use crate::matrix::Matrix4x4;
use crate::quat::Quaternion;

/// Convergence threshold for the polar iteration, max element change
/// between successive rotation estimates.
const CONVERGENCE_EPS: f32 = 1e-5;
const MAX_ITERATIONS: u32 = 100;

/// A transform's matrix factored as translate * rotate * scale.
///
/// `scale` is the full symmetric positive-definite factor; with shear-free
/// input its off-diagonal entries are near zero and the diagonal carries the
/// per-axis factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translation: Vector3,
    pub rotation: Quaternion,
    pub scale: Matrix4x4,
}

/// Factors `m` into translation, rotation and scale by polar decomposition.
///
/// The translation is read off column 3. The remaining linear part is
/// iterated to its nearest orthonormal matrix by averaging with its
/// inverse transpose; no closed form exists for general matrices. The
/// scale is whatever the rotation leaves behind, `R^-1 * M`.
pub fn decompose(m: &Matrix4x4) -> Result<Decomposed, TransformError> {
    let translation = Vector3::new(m.m[0][3], m.m[1][3], m.m[2][3]);

    // linear part only, translation zeroed
    let mut linear = *m;
    for i in 0..3 {
        linear.m[i][3] = 0.0;
    }
    linear.m[3] = [0.0, 0.0, 0.0, 1.0];

    let mut r = linear;
    let mut iterations = 0;
    loop {
        let r_inv_t = r
            .inverse()
            .map_err(|_| TransformError::NonInvertibleTransform)?
            .transpose();
        let mut r_next = r;
        let mut norm: f32 = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                r_next.m[i][j] = 0.5 * (r.m[i][j] + r_inv_t.m[i][j]);
                norm = norm.max((r_next.m[i][j] - r.m[i][j]).abs());
            }
        }
        r = r_next;
        iterations += 1;
        if norm < CONVERGENCE_EPS || iterations >= MAX_ITERATIONS {
            break;
        }
    }
    debug!("polar decomposition converged after {} iterations", iterations);

    // a mirroring input converges to an improper rotation; negate it so the
    // rotation is always proper and the flip lands in the scale factor
    if r.determinant3() < 0.0 {
        for i in 0..3 {
            for j in 0..3 {
                r.m[i][j] = -r.m[i][j];
            }
        }
    }

    let rotation = Quaternion::from_matrix(&r);
    let scale = r
        .inverse()
        .map_err(|_| TransformError::NonInvertibleTransform)?
        * linear;

    Ok(Decomposed {
        translation,
        rotation,
        scale,
    })
}
