//! 3D affine transforms as 4x4 homogeneous matrices paired with their
//! inverses, applied consistently to points, vectors, normals, rays and
//! bounding boxes.
//!
//! The rules that are easy to get wrong live in one place here: vectors
//! ignore translation, normals go through the inverse-transpose, composed
//! inverses multiply in reverse order, and [`decompose`] recovers
//! translation / rotation / scale by polar decomposition.
//!
//! Everything is a plain `Copy` value; operations are pure and the types
//! are freely shareable across threads.

mod bbox;
mod decompose;
mod error;
mod geometry;
mod matrix;
mod quat;
mod ray;
mod transform;

pub use bbox::Bbox;
pub use decompose::{decompose, Decomposed};
pub use error::TransformError;
pub use geometry::{Normal3, Point3, Vector3};
pub use matrix::Matrix4x4;
pub use quat::Quaternion;
pub use ray::{AuxiliaryRay, Ray};
pub use transform::{Transform, HAS_SCALE_EPS};
