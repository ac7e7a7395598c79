use thiserror::Error;

/// Failures are value-level contract violations reported to the immediate
/// caller. There is no internal recovery; a mathematically ill-posed input
/// has no meaningful retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,
    #[error("scale factor is zero or too close to zero")]
    DegenerateScale,
    #[error("rotation axis has zero length")]
    DegenerateAxis,
    #[error("look-at eye and target coincide")]
    DegenerateViewDirection,
    #[error("look-at up vector is parallel to the view direction")]
    DegenerateUpVector,
    #[error("linear part is singular, decomposition is undefined")]
    NonInvertibleTransform,
}
