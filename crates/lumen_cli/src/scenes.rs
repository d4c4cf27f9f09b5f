//! Hard-coded scenes selectable with `--scene`.

use std::sync::Arc;

use lumen_renderer::{
    AreaLight, Camera, Color, Light, Material, MaterialKind, Object, Point3, Scene, Sphere, Vector3, Viewport,
};

use crate::cli::SceneChoice;

const ASPECT_RATIO: f64 = 16.0 / 9.0;
const DEFAULT_WIDTH: u32 = 600;

/// Build the chosen scene at `image_width` pixels across.
pub fn build(choice: SceneChoice, image_width: Option<u32>) -> Scene {
    let viewport = Viewport::from_aspect_ratio(2.0, image_width.unwrap_or(DEFAULT_WIDTH), ASPECT_RATIO);

    match choice {
        SceneChoice::Default => default_scene(viewport),
        SceneChoice::SingleSphere => single_sphere(viewport),
        SceneChoice::Materials => materials(viewport),
    }
}

fn default_scene(viewport: Viewport) -> Scene {
    let red_mirror = Arc::new(
        Material::new(Color::new(1.0, 0.0, 0.0))
            .with_phong(0.05, 0.1, 0.8, 30.0)
            .with_reflectance(1.0),
    );
    let blue = Arc::new(Material::new(Color::new(0.0, 0.0, 1.0)).with_phong(0.05, 0.5, 0.5, 30.0));
    let olive = Arc::new(
        Material::new(Color::new(0.5, 0.5, 0.0))
            .with_phong(0.05, 0.5, 0.5, 20.0)
            .with_reflectance(0.1),
    );

    let objects = vec![
        Object::new(Sphere::new(Point3::new(0.5, 0.25, -1.3), 0.8), red_mirror),
        Object::new(Sphere::new(Point3::new(-0.5, -0.3, -0.3), 0.3), blue),
        Object::new(Sphere::new(Point3::new(0.0, -20.5, -2.0), 20.0), olive),
    ];

    let light = AreaLight::new(
        Point3::new(-2.0, 2.0, 1.0),
        Color::ONE,
        8.0,
        Vector3::new(2.0, -2.0, -1.0),
        1.0,
    );

    Scene::new(objects, vec![light.into()], Camera::new(viewport, Point3::new(0.0, 0.0, 2.0), 1.0))
}

fn single_sphere(viewport: Viewport) -> Scene {
    let sphere = Object::new(
        Sphere::new(Point3::new(0.0, 0.0, -4.0), 1.0),
        Material::preset(MaterialKind::Diffuse, Color::new(1.0, 0.0, 0.0)),
    );
    let light = AreaLight::new(
        Point3::new(-5.0, 3.0, 0.0),
        Color::ONE,
        50.0,
        Vector3::new(5.0, -3.0, -4.0),
        1.0,
    );

    Scene::new(vec![sphere], vec![light.into()], Camera::new(viewport, Point3::ORIGIN, 1.0))
}

fn materials(viewport: Viewport) -> Scene {
    let presets = [
        (MaterialKind::Matte, Color::new(0.8, 0.3, 0.2)),
        (MaterialKind::Plastic, Color::new(0.2, 0.6, 0.9)),
        (MaterialKind::PolishedMetal, Color::new(0.9, 0.8, 0.5)),
        (MaterialKind::Glass, Color::new(0.95, 0.95, 1.0)),
    ];

    let mut objects: Vec<Object> = presets
        .iter()
        .enumerate()
        .map(|(i, &(kind, color))| {
            let x = -1.5 + i as f64;
            Object::new(Sphere::new(Point3::new(x, 0.0, -3.0), 0.45), Material::preset(kind, color))
        })
        .collect();

    // Ground
    objects.push(Object::new(
        Sphere::new(Point3::new(0.0, -100.45, -3.0), 100.0),
        Material::preset(MaterialKind::Diffuse, Color::splat(0.6)),
    ));

    let lights: Vec<Light> = vec![
        AreaLight::new(Point3::new(-3.0, 4.0, 0.0), Color::ONE, 30.0, Vector3::new(3.0, -4.0, -3.0), 1.5).into(),
        AreaLight::new(Point3::new(3.0, 2.0, 1.0), Color::new(1.0, 0.9, 0.8), 10.0, Vector3::new(-3.0, -2.0, -4.0), 1.0)
            .into(),
    ];

    Scene::new(objects, lights, Camera::new(viewport, Point3::new(0.0, 0.5, 1.0), 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Ray;

    #[test]
    fn test_default_scene_layout() {
        let scene = build(SceneChoice::Default, None);
        assert_eq!(scene.objects().len(), 3);
        assert_eq!(scene.lights().len(), 1);

        let viewport = scene.camera().viewport();
        assert_eq!(viewport.image_width(), 600);
        assert_eq!(viewport.image_height(), (600.0 / ASPECT_RATIO).round() as u32);
    }

    #[test]
    fn test_width_override() {
        let scene = build(SceneChoice::SingleSphere, Some(160));
        assert_eq!(scene.camera().viewport().image_width(), 160);
        assert_eq!(scene.camera().viewport().image_height(), 90);
    }

    #[test]
    fn test_single_sphere_in_view() {
        let scene = build(SceneChoice::SingleSphere, Some(64));
        let ray = Ray::new(scene.camera().position(), Vector3::new(0.0, 0.0, -1.0));
        assert!(scene.cast_ray(&ray).is_some());
    }

    #[test]
    fn test_materials_scene_has_every_preset() {
        let scene = build(SceneChoice::Materials, Some(64));
        assert_eq!(scene.objects().len(), 5);
        assert!(scene.objects().iter().any(|o| o.material.is_transparent()));
        assert!(scene.objects().iter().any(|o| o.material.is_reflective()));
    }
}
