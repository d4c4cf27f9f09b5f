use crate::{AffineTransform, Point3, Vector3};

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length, so `t` measures distance
/// in multiples of `direction`. Mapping a ray through an affine transform keeps
/// that parametrization, which lets a hit found in object space be located on
/// the original world-space ray at the same `t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Map this ray into another coordinate frame.
    pub fn transformed(&self, transform: &AffineTransform) -> Ray {
        Ray {
            origin: transform * self.origin,
            direction: transform * self.direction,
        }
    }
}
