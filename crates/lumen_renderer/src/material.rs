//! Blinn-Phong materials and the optics helpers shading relies on.

use std::sync::Arc;

use glam::DVec3;
use lumen_math::{Interval, Vector3};

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// Surface parameters for the Blinn-Phong model plus secondary-ray weights.
///
/// `ambient`, `diffuse` and `specular` are coefficients in [0, 1]. A larger
/// `shininess` gives a tighter highlight. `reflectance` and `transparency` are
/// independent channels and are not required to sum to at most 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base (diffuse and ambient) color
    pub color: Color,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    /// Specular exponent, >= 0
    pub shininess: f64,
    /// Weight of the mirror bounce on opaque surfaces
    pub reflectance: f64,
    /// Weight of the transmitted bounce
    pub transparency: f64,
    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub refractive_index: f64,
}

/// Named material recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Flat, no highlight
    Matte,
    /// Diffuse base with a tight white highlight
    Plastic,
    /// Mostly mirror
    PolishedMetal,
    /// Transparent dielectric
    Glass,
    /// General-purpose diffuse with a faint highlight
    Diffuse,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::new(0.5, 0.5, 0.5), // Grey default
            ambient: 0.05,
            diffuse: 0.9,
            specular: 0.1,
            shininess: 30.0,
            reflectance: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// Create a default material with the given base color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Build a shared material from a recipe.
    pub fn preset(kind: MaterialKind, color: Color) -> Arc<Material> {
        let (ambient, diffuse, specular, shininess, reflectance, transparency, refractive_index) =
            match kind {
                MaterialKind::Matte => (0.05, 1.0, 0.0, 30.0, 0.0, 0.0, 1.0),
                MaterialKind::Plastic => (0.05, 0.4, 0.8, 100.0, 0.0, 0.0, 1.0),
                MaterialKind::PolishedMetal => (0.05, 0.05, 0.8, 60.0, 0.8, 0.0, 1.0),
                MaterialKind::Glass => (0.05, 0.0, 0.5, 150.0, 0.4, 0.8, 1.56),
                MaterialKind::Diffuse => (0.05, 0.9, 0.1, 30.0, 0.0, 0.0, 1.0),
            };

        Arc::new(Self {
            color,
            ambient,
            diffuse,
            specular,
            shininess,
            reflectance,
            transparency,
            refractive_index,
        })
    }

    /// Set the local lighting coefficients.
    pub fn with_phong(mut self, ambient: f64, diffuse: f64, specular: f64, shininess: f64) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Set the mirror weight.
    pub fn with_reflectance(mut self, reflectance: f64) -> Self {
        self.reflectance = reflectance;
        self
    }

    /// Set the transmission weight and index of refraction.
    pub fn with_transparency(mut self, transparency: f64, refractive_index: f64) -> Self {
        self.transparency = transparency;
        self.refractive_index = refractive_index;
        self
    }

    pub fn is_reflective(&self) -> bool {
        self.reflectance > 0.0
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }

    /// Blinn-Phong response to one light sample.
    ///
    /// `l` points from the surface to the light, `v` from the surface to the
    /// viewer, `n` is the outward surface normal; all three are unit length.
    /// The result is attenuated by the inverse square of `distance`.
    pub fn blinn_phong(
        &self,
        light_color: Color,
        light_intensity: f64,
        distance: f64,
        l: Vector3,
        v: Vector3,
        n: Vector3,
    ) -> Color {
        let n_dot_l = n.dot(l).max(0.0);

        // Light exactly behind the viewer direction has no half-vector
        let highlight = match (l + v).try_normalize() {
            Some(h) => n.dot(h).max(0.0).powf(self.shininess),
            None => 0.0,
        };

        let diffuse = self.color * (self.diffuse * n_dot_l);
        let specular = Color::splat(self.specular * highlight);
        let attenuation = light_intensity / (distance * distance);

        (diffuse + specular) * light_color * attenuation
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Schlick's approximation of Fresnel reflectance.
///
/// For `cos_theta` in [0, 1] and any positive index the result lies in [0, 1].
pub fn schlick(cos_theta: f64, ior: f64) -> f64 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    Interval::UNIT.clamp(r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5))
}

/// Refract a unit vector through a surface by Snell's law.
///
/// `n` is the unit normal on the incident side and `eta` is the ratio of the
/// incident index over the transmitted index. Returns `None` on total
/// internal reflection.
pub fn refract(uv: Vector3, n: Vector3, eta: f64) -> Option<Vector3> {
    let cos_i = (-uv).dot(n).min(1.0);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(uv * eta + n * (eta * cos_i - k.sqrt()))
}
