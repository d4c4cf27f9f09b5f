//! Geometry trait and the sphere primitive.
//!
//! Every primitive is defined once, canonically, in its own object space and
//! carries an object-to-world transform. Intersection and normals are computed
//! in object space; the scene maps rays in and normals out.

use std::fmt;

use lumen_math::{AffineTransform, Interval, Point3, Ray, Vector3};

/// The two real roots of a ray/surface quadratic, `minus_t <= plus_t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub minus_t: f64,
    pub plus_t: f64,
}

impl Intersection {
    /// The nearest root strictly inside `ray_t`, if any.
    pub fn nearest_in(&self, ray_t: Interval) -> Option<f64> {
        if ray_t.surrounds(self.minus_t) {
            Some(self.minus_t)
        } else if ray_t.surrounds(self.plus_t) {
            Some(self.plus_t)
        } else {
            None
        }
    }
}

/// A shape that can be intersected in its own object space.
pub trait Geometry: Send + Sync + fmt::Debug {
    /// Object-to-world transform.
    fn transform(&self) -> &AffineTransform;

    /// World-to-object transform.
    fn inverse(&self) -> AffineTransform {
        self.transform().inverse()
    }

    /// Intersect an object-space ray. `None` is a miss.
    fn hit(&self, ray: &Ray) -> Option<Intersection>;

    /// Unnormalized object-space surface normal at `point`.
    fn normal(&self, point: Point3) -> Vector3;
}

/// Map an object-space normal to world space.
///
/// Normals transform by the inverse-transpose of the linear block, not by the
/// transform itself, so they stay perpendicular under non-uniform scale. The
/// result is not normalized.
pub fn normal_to_world(normal: Vector3, inverse: &AffineTransform) -> Vector3 {
    let inverse_transpose = inverse.extract_linear().transpose();
    (inverse_transpose * normal.to_dvec3()).into()
}

/// The unit sphere centered at the object-space origin.
///
/// World-space position and size live entirely in the transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    transform: AffineTransform,
}

impl Sphere {
    /// A unit sphere at the world origin.
    pub fn unit() -> Self {
        Self {
            transform: AffineTransform::identity(),
        }
    }

    /// A sphere with the given center and radius: scale, then translate.
    ///
    /// `radius` must be nonzero or the inverse transform is undefined.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            transform: AffineTransform::identity()
                .scale(radius)
                .set_translation(center.x, center.y, center.z),
        }
    }

    /// Move the sphere to an absolute location.
    pub fn move_to(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transform = self.transform.set_translation(x, y, z);
        self
    }

    /// Shift the sphere by a displacement.
    pub fn translate(mut self, dx: f64, dy: f64, dz: f64) -> Self {
        self.transform = self.transform.translate(dx, dy, dz);
        self
    }

    /// Uniformly scale the sphere. `k` must be nonzero.
    pub fn scale(mut self, k: f64) -> Self {
        self.transform = self.transform.scale(k);
        self
    }

    /// Scale each axis independently, producing an ellipsoid. Factors must be nonzero.
    pub fn scale_xyz(mut self, kx: f64, ky: f64, kz: f64) -> Self {
        self.transform = self.transform.scale_xyz(kx, ky, kz);
        self
    }

    /// Re-express the sphere in another frame: `transform = m * transform`.
    pub fn set_coord_system(mut self, m: AffineTransform) -> Self {
        self.transform = m * self.transform;
        self
    }

    /// Radius along the x axis.
    pub fn radius(&self) -> f64 {
        self.transform.extract_linear().x_axis.x
    }

    /// World-space center.
    pub fn center(&self) -> Point3 {
        Point3::ORIGIN + self.transform.translation()
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::unit()
    }
}

impl Geometry for Sphere {
    fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    fn hit(&self, ray: &Ray) -> Option<Intersection> {
        let oc = ray.origin() - Point3::ORIGIN;
        let a = ray.direction().length_squared();
        let b = ray.direction().dot(oc);
        let c = oc.length_squared() - 1.0;

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some(Intersection {
            minus_t: (-b - sqrtd) / a,
            plus_t: (-b + sqrtd) / a,
        })
    }

    fn normal(&self, point: Point3) -> Vector3 {
        point - Point3::ORIGIN
    }
}
