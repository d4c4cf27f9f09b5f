//! Lumen math - points, vectors, rays and affine transforms.

// Re-export glam for convenience
pub use glam::{DMat3, DMat4, DVec3};

mod interval;
mod ray;
mod transform;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::AffineTransform;
pub use vector::{Point3, Vector3};
