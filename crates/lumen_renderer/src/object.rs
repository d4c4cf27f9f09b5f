//! Renderable objects and ray hits.

use std::sync::Arc;

use lumen_math::{AffineTransform, Point3, Vector3};

use crate::geometry::{normal_to_world, Geometry, Intersection};
use crate::Material;

/// A geometry paired with a material.
///
/// Both halves are shared, so one material (or one shape) can back any number
/// of objects without being copied.
#[derive(Debug, Clone)]
pub struct Object {
    pub geometry: Arc<dyn Geometry>,
    pub material: Arc<Material>,
}

impl Object {
    /// Create an object that takes ownership of its geometry.
    pub fn new(geometry: impl Geometry + 'static, material: Arc<Material>) -> Self {
        Self {
            geometry: Arc::new(geometry),
            material,
        }
    }

    /// Create an object from already shared geometry.
    pub fn shared(geometry: Arc<dyn Geometry>, material: Arc<Material>) -> Self {
        Self { geometry, material }
    }
}

/// The nearest intersection found by [`Scene::cast_ray`](crate::Scene::cast_ray).
///
/// A hit borrows the scene it was found in and is consumed by shading right
/// away; it is never stored.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// The struck object
    pub object: &'a Object,
    /// Cached world-to-object transform of `object`
    pub inverse: &'a AffineTransform,
    /// Position of `object` in the scene's object list
    pub index: usize,
    /// World-space intersection point
    pub point: Point3,
    /// Direction of the ray that produced this hit
    pub direction: Vector3,
    /// Near root of the object-space quadratic
    pub minus_t: f64,
    /// Far root of the object-space quadratic
    pub plus_t: f64,
    t: f64,
}

impl<'a> Hit<'a> {
    pub(crate) fn new(
        object: &'a Object,
        inverse: &'a AffineTransform,
        index: usize,
        roots: Intersection,
        t: f64,
        point: Point3,
        direction: Vector3,
    ) -> Self {
        Self {
            object,
            inverse,
            index,
            point,
            direction,
            minus_t: roots.minus_t,
            plus_t: roots.plus_t,
            t,
        }
    }

    /// Ray parameter of the reported root.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// True when the ray started inside the object and hit its far side.
    pub fn is_inside(&self) -> bool {
        self.minus_t <= 0.0
    }

    pub fn material(&self) -> &'a Material {
        &self.object.material
    }

    /// Outward unit surface normal in world space.
    pub fn normal(&self) -> Vector3 {
        let object_point = self.inverse * self.point;
        let object_normal = self.object.geometry.normal(object_point);
        normal_to_world(object_normal, self.inverse).normalize()
    }
}
