//! Scene container and nearest-hit ray casting.

use log::{debug, warn};
use lumen_math::{AffineTransform, Interval, Ray};

use crate::{Camera, Hit, Light, Object};

/// Everything needed to render one image.
///
/// Objects, lights and the camera are fixed at construction; casting and
/// shading only read from the scene, so one instance is shared by every
/// render thread.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<Object>,
    // World-to-object transform for each entry of `objects`, same order
    inverses: Vec<AffineTransform>,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    /// Build a scene, caching every object's inverse transform.
    pub fn new(objects: Vec<Object>, lights: Vec<Light>, camera: Camera) -> Self {
        let inverses: Vec<AffineTransform> = objects.iter().map(|o| o.geometry.inverse()).collect();

        for (i, light) in lights.iter().enumerate() {
            if light.intensity() <= 0.0 {
                warn!("Light {} at {} has no intensity and will not contribute", i, light.position());
            }
        }

        debug!(
            "Scene built: {} objects, {} lights, camera at {}",
            objects.len(),
            lights.len(),
            camera.position()
        );

        Self {
            objects,
            inverses,
            lights,
            camera,
        }
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Find the nearest object hit strictly in front of the ray origin.
    ///
    /// Each object is tested in its own space through the cached inverse. A
    /// later object only replaces the current best when strictly nearer, so
    /// exact ties go to the object listed first.
    pub fn cast_ray(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;

        for (index, (object, inverse)) in self.objects.iter().zip(&self.inverses).enumerate() {
            let local = ray.transformed(inverse);
            let Some(roots) = object.geometry.hit(&local) else {
                continue;
            };

            let closest_so_far = closest.as_ref().map_or(f64::INFINITY, |hit| hit.t());
            if let Some(t) = roots.nearest_in(Interval::new(0.0, closest_so_far)) {
                closest = Some(Hit::new(
                    object,
                    inverse,
                    index,
                    roots,
                    t,
                    ray.at(t),
                    ray.direction(),
                ));
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material, PointLight, Sphere, Viewport};
    use lumen_math::{Point3, Vector3};
    use std::sync::Arc;

    fn camera() -> Camera {
        Camera::new(Viewport::new(2.0, 2.0, 8, 8), Point3::ORIGIN, 1.0)
    }

    fn scene_of(spheres: Vec<Sphere>) -> Scene {
        let material = Arc::new(Material::default());
        let objects = spheres
            .into_iter()
            .map(|s| Object::new(s, Arc::clone(&material)))
            .collect();
        Scene::new(objects, Vec::new(), camera())
    }

    #[test]
    fn test_cast_ray_picks_nearest() {
        let scene = scene_of(vec![
            Sphere::new(Point3::new(0.0, 0.0, -10.0), 1.0),
            Sphere::new(Point3::new(0.0, 0.0, -4.0), 1.0),
        ]);
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, -1.0));

        let hit = scene.cast_ray(&ray).expect("ray should hit");
        assert_eq!(hit.index, 1);
        assert!((hit.t() - 3.0).abs() < 1e-9);
        assert!((hit.point - Point3::new(0.0, 0.0, -3.0)).length() < 1e-9);
        assert!((hit.normal() - Vector3::Z).length() < 1e-9);
    }

    #[test]
    fn test_cast_ray_miss() {
        let scene = scene_of(vec![Sphere::new(Point3::new(0.0, 0.0, -4.0), 1.0)]);
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 1.0, 0.0));
        assert!(scene.cast_ray(&ray).is_none());

        // Sphere entirely behind the origin
        let behind = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, 1.0));
        assert!(scene.cast_ray(&behind).is_none());
    }

    #[test]
    fn test_cast_ray_tie_goes_to_first() {
        let scene = scene_of(vec![
            Sphere::new(Point3::new(0.0, 0.0, -4.0), 1.0),
            Sphere::new(Point3::new(0.0, 0.0, -4.0), 1.0),
        ]);
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.cast_ray(&ray).unwrap().index, 0);
    }

    #[test]
    fn test_cast_ray_from_inside_reports_exit() {
        let scene = scene_of(vec![Sphere::new(Point3::ORIGIN, 2.0)]);
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(1.0, 0.0, 0.0));

        let hit = scene.cast_ray(&ray).unwrap();
        assert!(hit.is_inside());
        assert!((hit.t() - 2.0).abs() < 1e-9);
        // Normal still points out of the sphere
        assert!((hit.normal() - Vector3::X).length() < 1e-9);
    }

    #[test]
    fn test_scaled_sphere_world_parameter() {
        let scene = scene_of(vec![Sphere::new(Point3::new(0.0, 0.0, -6.0), 2.0)]);
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, -1.0));
        let hit = scene.cast_ray(&ray).unwrap();
        assert!((hit.t() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_accessors() {
        let light = Light::from(PointLight::new(Point3::new(0.0, 5.0, 0.0), Color::ONE, 0.0));
        let scene = Scene::new(
            vec![Object::new(Sphere::unit(), Arc::new(Material::default()))],
            vec![light],
            camera(),
        );
        assert_eq!(scene.objects().len(), 1);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.camera().focal_length(), 1.0);
    }
}
