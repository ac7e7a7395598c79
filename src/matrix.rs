use crate::error::TransformError;

/// Pivots smaller than this are treated as zero during elimination.
const SINGULAR_EPS: f32 = 1e-8;

/// Row-major 4x4 matrix, `m[row][col]`. Any 16 values are valid; no
/// structural invariant is enforced.
///
/// `PartialEq` is element-wise and exact. Values derived through
/// floating-point composition should be compared with [`Matrix4x4::abs_diff_eq`]
/// instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4 {
    pub m: [[f32; 4]; 4],
}

impl Matrix4x4 {
    pub const IDENTITY: Matrix4x4 = Matrix4x4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        t00: f32, t01: f32, t02: f32, t03: f32,
        t10: f32, t11: f32, t12: f32, t13: f32,
        t20: f32, t21: f32, t22: f32, t23: f32,
        t30: f32, t31: f32, t32: f32, t33: f32,
    ) -> Self {
        Self {
            m: [
                [t00, t01, t02, t03],
                [t10, t11, t12, t13],
                [t20, t21, t22, t23],
                [t30, t31, t32, t33],
            ],
        }
    }

    pub fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn transpose(&self) -> Matrix4x4 {
        let mut out = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                out[i][j] = self.m[j][i];
            }
        }
        Matrix4x4 { m: out }
    }

    pub fn abs_diff_eq(&self, other: &Matrix4x4, eps: f32) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if (self.m[i][j] - other.m[i][j]).abs() > eps {
                    return false;
                }
            }
        }
        true
    }

    /// Determinant of the upper-left 3x3 block. Its sign tells whether the
    /// linear part flips orientation.
    pub fn determinant3(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// General inverse by Gauss-Jordan elimination with partial pivoting.
    pub fn inverse(&self) -> Result<Matrix4x4, TransformError> {
        let mut a = self.m;
        let mut inv = Matrix4x4::IDENTITY.m;
        for col in 0..4 {
            let mut pivot = col;
            for row in col + 1..4 {
                if a[row][col].abs() > a[pivot][col].abs() {
                    pivot = row;
                }
            }
            if a[pivot][col].abs() < SINGULAR_EPS {
                return Err(TransformError::SingularMatrix);
            }
            a.swap(col, pivot);
            inv.swap(col, pivot);

            let diag = a[col][col];
            for k in 0..4 {
                a[col][k] /= diag;
                inv[col][k] /= diag;
            }
            for row in 0..4 {
                if row != col {
                    let factor = a[row][col];
                    for k in 0..4 {
                        a[row][k] -= factor * a[col][k];
                        inv[row][k] -= factor * inv[col][k];
                    }
                }
            }
        }
        Ok(Matrix4x4 { m: inv })
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: Matrix4x4) -> Matrix4x4 {
        let mut out = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                out[i][j] = self.m[i][0] * rhs.m[0][j]
                    + self.m[i][1] * rhs.m[1][j]
                    + self.m[i][2] * rhs.m[2][j]
                    + self.m[i][3] * rhs.m[3][j];
            }
        }
        Matrix4x4 { m: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_is_involutive() {
        let m = Matrix4x4::new(
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        );
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().m[0][1], 5.0);
        assert_eq!(m.transpose().m[1][0], 2.0);
    }

    #[test]
    fn multiply_by_identity() {
        let m = Matrix4x4::new(
            2.0, 0.0, 1.0, 3.0, 0.0, -1.0, 0.0, 2.0, 4.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        );
        assert_eq!(m * Matrix4x4::IDENTITY, m);
        assert_eq!(Matrix4x4::IDENTITY * m, m);
    }

    #[test]
    fn inverse_of_invertible_matrix() {
        let m = Matrix4x4::new(
            2.0, 0.0, 0.0, 5.0, 1.0, 3.0, 0.0, -2.0, 0.0, 1.0, 4.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        );
        let inv = m.inverse().unwrap();
        assert!((m * inv).abs_diff_eq(&Matrix4x4::IDENTITY, 1e-5));
        assert!((inv * m).abs_diff_eq(&Matrix4x4::IDENTITY, 1e-5));
    }

    #[test]
    fn inverse_needs_row_swaps() {
        // zero on the first diagonal entry forces pivoting
        let m = Matrix4x4::new(
            0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0,
        );
        let inv = m.inverse().unwrap();
        assert!((m * inv).abs_diff_eq(&Matrix4x4::IDENTITY, 1e-6));
    }

    #[test]
    fn inverse_of_singular_matrix_fails() {
        let mut m = Matrix4x4::IDENTITY;
        m.m[2] = [0.0, 0.0, 0.0, 0.0];
        assert_eq!(m.inverse(), Err(TransformError::SingularMatrix));

        // two linearly dependent rows
        let m = Matrix4x4::new(
            1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        );
        assert_eq!(m.inverse(), Err(TransformError::SingularMatrix));
    }

    #[test]
    fn determinant3_sign() {
        assert_eq!(Matrix4x4::IDENTITY.determinant3(), 1.0);
        let mirror = Matrix4x4::new(
            -1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        );
        assert_eq!(mirror.determinant3(), -1.0);
    }
}
