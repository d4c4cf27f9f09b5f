//! Whitted-style recursive shading.
//!
//! A hit is shaded as ambient plus soft-shadowed direct light from every
//! light, plus (below the depth limit) averaged reflection and transmission
//! rays that re-enter [`Scene::cast_ray`]. Secondary contributions fade by
//! `decay^depth`.

use lumen_math::{Interval, Point3, Ray, Vector3};
use rand::RngCore;

use crate::material::{refract, schlick};
use crate::sampling::random_in_unit_sphere;
use crate::{Color, Hit, Light, Material, RenderConfig, Scene};

/// Direct contribution of one light at a shading point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectLight {
    pub color: Color,
    /// Share of light samples whose shadow ray was blocked, in [0, 1]
    pub occluded_fraction: f64,
}

impl Scene {
    /// Color seen along the ray that produced `hit`, clamped to [0, 1].
    ///
    /// `depth` is the recursion level of that ray, 0 for primary rays.
    pub fn shade(&self, hit: &Hit<'_>, depth: u32, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
        let material = hit.material();
        let direction = hit.direction.normalize();
        let normal = hit.normal();
        let view = -direction;

        // Normal on the side the ray arrived from
        let entering = direction.dot(normal) < 0.0;
        let facing = if entering { normal } else { -normal };

        let mut color = material.color * material.ambient;

        for light in self.lights() {
            color += self
                .direct_lighting(hit.point, facing, view, material, light, config, rng)
                .color;
        }

        if depth < config.max_depth {
            let attenuation = config.decay.powi(depth as i32);
            let cos_theta = Interval::UNIT.clamp(view.dot(facing));
            let kr = schlick(cos_theta, material.refractive_index);

            if material.is_reflective() {
                let weight = if material.is_transparent() {
                    kr
                } else {
                    material.reflectance
                };
                let reflected = self.reflection(hit.point, direction, facing, depth, config, rng);
                color += reflected * (weight * attenuation);
            }

            if material.is_transparent() {
                let eta = if entering {
                    1.0 / material.refractive_index
                } else {
                    material.refractive_index
                };
                let transmitted = self.transmission(hit.point, direction, facing, eta, depth, config, rng);
                color += transmitted * ((1.0 - kr) * material.transparency * attenuation);
            }
        }

        color.clamp(Color::ZERO, Color::ONE)
    }

    /// Blinn-Phong light from `light` at `point`, attenuated by its shadow.
    ///
    /// One shadow ray is cast per light sample, starting `config.bias` along
    /// the light direction. A sample is occluded when anything lies strictly
    /// between the point and the sample. The result is the average over
    /// unoccluded samples scaled by the unoccluded share, which is the sum
    /// over unoccluded samples divided by the sample count.
    #[allow(clippy::too_many_arguments)]
    pub fn direct_lighting(
        &self,
        point: Point3,
        normal: Vector3,
        view: Vector3,
        material: &Material,
        light: &Light,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> DirectLight {
        let mut total = 0usize;
        let mut occluded = 0usize;
        let mut sum = Color::ZERO;

        for sample in light.samples(config.light_samples as usize, rng) {
            total += 1;

            let to_light = sample - point;
            let distance = to_light.length();
            let Some(l) = to_light.try_normalize() else {
                continue;
            };

            let shadow_ray = Ray::new(point + l * config.bias, l);
            let blocked = self
                .cast_ray(&shadow_ray)
                .is_some_and(|blocker| blocker.t() < distance - config.bias);
            if blocked {
                occluded += 1;
                continue;
            }

            sum += material.blinn_phong(light.color(), light.intensity(), distance, l, view, normal);
        }

        if total == 0 {
            return DirectLight {
                color: Color::ZERO,
                occluded_fraction: 0.0,
            };
        }

        DirectLight {
            color: sum / total as f64,
            occluded_fraction: occluded as f64 / total as f64,
        }
    }

    /// Averaged glossy mirror bounce off the side `facing` points to.
    fn reflection(
        &self,
        point: Point3,
        direction: Vector3,
        facing: Vector3,
        depth: u32,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> Color {
        let reflected = direction.reflect(facing);
        let origin = point + facing * config.bias;
        self.trace_secondary(origin, reflected, facing, depth, config, rng)
    }

    /// Averaged refracted bounce through the surface.
    ///
    /// Falls back to the mirror direction on total internal reflection.
    #[allow(clippy::too_many_arguments)]
    fn transmission(
        &self,
        point: Point3,
        direction: Vector3,
        facing: Vector3,
        eta: f64,
        depth: u32,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> Color {
        match refract(direction, facing, eta) {
            Some(refracted) => {
                let origin = point - facing * config.bias;
                self.trace_secondary(origin, refracted, -facing, depth, config, rng)
            }
            None => self.reflection(point, direction, facing, depth, config, rng),
        }
    }

    /// Cast `config.secondary_samples` jittered rays around `direction` and
    /// average what they see. Hits are shaded one level deeper.
    fn trace_secondary(
        &self,
        origin: Point3,
        direction: Vector3,
        hemisphere: Vector3,
        depth: u32,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> Color {
        let count = config.secondary_samples.max(1);
        let mut sum = Color::ZERO;

        for _ in 0..count {
            let jittered = jitter(direction, hemisphere, config.gloss, rng);
            let ray = Ray::new(origin, jittered);
            sum += match self.cast_ray(&ray) {
                Some(hit) => self.shade(&hit, depth + 1, config, rng),
                None => config.background,
            };
        }

        sum / count as f64
    }
}

/// Perturb a unit direction by up to `gloss`, keeping it on the side of the
/// plane through the origin that `hemisphere` points to.
fn jitter(direction: Vector3, hemisphere: Vector3, gloss: f64, rng: &mut dyn RngCore) -> Vector3 {
    if gloss <= 0.0 {
        return direction;
    }

    let mut perturbed = direction + random_in_unit_sphere(rng) * gloss;
    let side = perturbed.dot(hemisphere);
    if side < 0.0 {
        perturbed -= hemisphere * (2.0 * side);
    }
    perturbed.try_normalize().unwrap_or(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AreaLight, Camera, MaterialKind, Object, PointLight, Sphere, Viewport};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn camera() -> Camera {
        Camera::new(Viewport::new(2.0, 2.0, 8, 8), Point3::ORIGIN, 1.0)
    }

    fn down() -> Ray {
        Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_direct_lighting_fully_occluded() {
        let matte = Material::preset(MaterialKind::Matte, Color::ONE);
        let light = Light::from(AreaLight::new(
            Point3::new(0.0, 10.0, 0.0),
            Color::ONE,
            50.0,
            Vector3::new(0.0, -1.0, 0.0),
            0.5,
        ));
        // Blocker halfway between the point and the light
        let scene = Scene::new(
            vec![Object::new(Sphere::new(Point3::new(0.0, 5.0, 0.0), 2.0), matte.clone())],
            vec![light.clone()],
            camera(),
        );
        let mut rng = StdRng::seed_from_u64(1);

        let direct = scene.direct_lighting(
            Point3::ORIGIN,
            Vector3::Y,
            Vector3::Y,
            &matte,
            &light,
            &RenderConfig::default(),
            &mut rng,
        );
        assert_eq!(direct.occluded_fraction, 1.0);
        assert_eq!(direct.color, Color::ZERO);
    }

    #[test]
    fn test_direct_lighting_unoccluded_point_light() {
        let material = Arc::new(Material::new(Color::ONE).with_phong(0.0, 1.0, 0.0, 1.0));
        let light = Light::from(PointLight::new(Point3::new(0.0, 2.0, 0.0), Color::ONE, 4.0));
        let scene = Scene::new(Vec::new(), vec![light.clone()], camera());
        let mut rng = StdRng::seed_from_u64(1);

        let direct = scene.direct_lighting(
            Point3::ORIGIN,
            Vector3::Y,
            Vector3::Y,
            &material,
            &light,
            &RenderConfig::default(),
            &mut rng,
        );
        assert_eq!(direct.occluded_fraction, 0.0);
        // kd 1 * N.L 1 * intensity 4 / distance^2 4
        assert!((direct.color - Color::ONE).length() < 1e-9);
    }

    #[test]
    fn test_direct_lighting_partial_shadow_scales_down() {
        let material = Arc::new(Material::new(Color::ONE).with_phong(0.0, 1.0, 0.0, 1.0));
        let light = Light::from(AreaLight::new(
            Point3::new(0.0, 4.0, 0.0),
            Color::ONE,
            16.0,
            Vector3::new(0.0, -1.0, 0.0),
            4.0,
        ));
        // Small blocker covering the middle of the light as seen from the origin
        let blocker = Object::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 0.5), material.clone());
        let open = Scene::new(Vec::new(), vec![light.clone()], camera());
        let shadowed = Scene::new(vec![blocker], vec![light.clone()], camera());
        let config = RenderConfig {
            light_samples: 200,
            ..Default::default()
        };

        let a = open.direct_lighting(
            Point3::ORIGIN,
            Vector3::Y,
            Vector3::Y,
            &material,
            &light,
            &config,
            &mut StdRng::seed_from_u64(9),
        );
        let b = shadowed.direct_lighting(
            Point3::ORIGIN,
            Vector3::Y,
            Vector3::Y,
            &material,
            &light,
            &config,
            &mut StdRng::seed_from_u64(9),
        );

        assert_eq!(a.occluded_fraction, 0.0);
        assert!(b.occluded_fraction > 0.0 && b.occluded_fraction < 1.0);
        assert!(b.color.x < a.color.x);
    }

    #[test]
    fn test_shade_matte_without_lights_is_ambient() {
        let material = Material::preset(MaterialKind::Matte, Color::new(1.0, 0.0, 0.0));
        let scene = Scene::new(
            vec![Object::new(Sphere::unit(), material)],
            Vec::new(),
            camera(),
        );
        let mut rng = StdRng::seed_from_u64(1);

        let hit = scene.cast_ray(&down()).unwrap();
        let color = scene.shade(&hit, 0, &RenderConfig::default(), &mut rng);
        assert!((color - Color::new(0.05, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_shade_stays_in_unit_range() {
        // Overexposed scene with every kind of material
        let light = Light::from(AreaLight::new(
            Point3::new(0.0, 6.0, 0.0),
            Color::ONE,
            5000.0,
            Vector3::new(0.0, -1.0, 0.0),
            1.0,
        ));
        let objects = vec![
            Object::new(Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0), Material::preset(MaterialKind::Glass, Color::ONE)),
            Object::new(Sphere::new(Point3::new(2.5, 0.0, 0.0), 1.0), Material::preset(MaterialKind::PolishedMetal, Color::ONE)),
            Object::new(Sphere::new(Point3::new(-2.5, 0.0, 0.0), 1.0), Material::preset(MaterialKind::Plastic, Color::ONE)),
            Object::new(Sphere::new(Point3::new(0.0, -101.0, 0.0), 100.0), Material::preset(MaterialKind::Diffuse, Color::ONE)),
        ];
        let scene = Scene::new(objects, vec![light], camera());
        let config = RenderConfig {
            light_samples: 4,
            secondary_samples: 2,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(17);

        for x in [-2.5, -1.0, 0.0, 0.3, 2.5, 4.0] {
            let ray = Ray::new(Point3::new(x, 5.0, 3.0), Vector3::new(0.0, -1.0, -0.6));
            if let Some(hit) = scene.cast_ray(&ray) {
                let color = scene.shade(&hit, 0, &config, &mut rng);
                for channel in color.to_array() {
                    assert!((0.0..=1.0).contains(&channel), "channel {channel} out of range");
                }
            }
        }
    }

    #[test]
    fn test_mirror_sees_background() {
        // A perfect mirror under an empty sky reflects the background
        let mirror = Arc::new(
            Material::new(Color::ZERO)
                .with_phong(0.0, 0.0, 0.0, 1.0)
                .with_reflectance(1.0),
        );
        let scene = Scene::new(vec![Object::new(Sphere::unit(), mirror)], Vec::new(), camera());
        let config = RenderConfig {
            gloss: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        let hit = scene.cast_ray(&down()).unwrap();
        let color = scene.shade(&hit, 0, &config, &mut rng);
        assert!((color - config.background).length() < 1e-9);
    }

    #[test]
    fn test_no_secondary_rays_at_depth_limit() {
        let mirror = Arc::new(
            Material::new(Color::ZERO)
                .with_phong(0.0, 0.0, 0.0, 1.0)
                .with_reflectance(1.0),
        );
        let scene = Scene::new(vec![Object::new(Sphere::unit(), mirror)], Vec::new(), camera());
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        let hit = scene.cast_ray(&down()).unwrap();
        assert_eq!(scene.shade(&hit, config.max_depth, &config, &mut rng), Color::ZERO);
    }

    fn clear(ambient: f64, reflectance: f64, ior: f64) -> Arc<Material> {
        Arc::new(
            Material::new(Color::ONE)
                .with_phong(ambient, 0.0, 0.0, 1.0)
                .with_reflectance(reflectance)
                .with_transparency(1.0, ior),
        )
    }

    #[test]
    fn test_index_matched_sphere_passes_background_through() {
        // Entry at depth 0, exit at depth 1, then the background
        let scene = Scene::new(vec![Object::new(Sphere::unit(), clear(0.0, 0.0, 1.0))], Vec::new(), camera());
        let config = RenderConfig {
            gloss: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        let hit = scene.cast_ray(&down()).unwrap();
        assert!(!hit.is_inside());
        let color = scene.shade(&hit, 0, &config, &mut rng);
        assert!((color - config.background * config.decay).length() < 1e-9);
    }

    #[test]
    fn test_glass_splits_by_fresnel() {
        // Reflectance only switches the mirror bounce on; its weight is kr
        let scene = Scene::new(vec![Object::new(Sphere::unit(), clear(0.2, 0.5, 1.5))], Vec::new(), camera());
        let config = RenderConfig {
            gloss: 0.0,
            max_depth: 1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        let hit = scene.cast_ray(&down()).unwrap();
        let color = scene.shade(&hit, 0, &config, &mut rng);

        // Mirror bounce escapes to the background; the transmitted ray meets
        // the far wall at the depth limit, which shows only its ambient term
        let kr = schlick(1.0, 1.5);
        let expected = 0.2 + kr * config.background.x + (1.0 - kr) * 0.2;
        assert!((color - Color::splat(expected)).length() < 1e-9);
    }

    #[test]
    fn test_total_internal_reflection_stays_inside() {
        let scene = Scene::new(vec![Object::new(Sphere::unit(), clear(0.1, 0.0, 1.5))], Vec::new(), camera());
        let config = RenderConfig {
            gloss: 0.0,
            max_depth: 1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        // Leaves the glass about 64 degrees off the normal, past the critical angle
        let ray = Ray::new(Point3::new(0.0, 0.9, 0.0), Vector3::X);
        let hit = scene.cast_ray(&ray).unwrap();
        assert!(hit.is_inside());
        assert!((hit.t() - 0.19f64.sqrt()).abs() < 1e-9);

        let color = scene.shade(&hit, 0, &config, &mut rng);

        // The bounce lands on the inner wall again instead of reaching the background
        let kr = schlick(0.19f64.sqrt(), 1.5);
        let expected = 0.1 + (1.0 - kr) * 0.1;
        assert!((color - Color::splat(expected)).length() < 1e-9);
    }

    #[test]
    fn test_jitter_stays_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(5);
        let grazing = Vector3::new(1.0, 0.01, 0.0).normalize();
        for _ in 0..1000 {
            let d = jitter(grazing, Vector3::Y, 0.5, &mut rng);
            assert!(d.dot(Vector3::Y) >= 0.0);
            assert!((d.length() - 1.0).abs() < 1e-9);
        }
        assert_eq!(jitter(grazing, Vector3::Y, 0.0, &mut rng), grazing);
    }
}
