//! Point and area lights.
//!
//! Shading never looks at a light's shape directly; it asks for a sequence of
//! sample points and casts one shadow ray per point. A point light yields its
//! position once, an area light yields `count` random points on its square.

use lumen_math::{Point3, Vector3};
use rand::RngCore;

use crate::sampling::gen_centered;
use crate::Color;

/// An infinitely small light.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Point3,
    pub color: Color,
    pub intensity: f64,
}

impl PointLight {
    pub fn new(position: Point3, color: Color, intensity: f64) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}

/// A square emitter of side `width`, centered on `center` and facing `direction`.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLight {
    center: Point3,
    color: Color,
    intensity: f64,
    direction: Vector3,
    width: f64,
    // In-plane basis, orthonormal with `direction`
    right: Vector3,
    up: Vector3,
}

impl AreaLight {
    /// Create an area light.
    ///
    /// # Panics
    ///
    /// Panics if `direction` is the zero vector.
    pub fn new(center: Point3, color: Color, intensity: f64, direction: Vector3, width: f64) -> Self {
        let direction = direction.normalize();

        // Any helper axis not (nearly) parallel to the facing direction will do
        let helper = if Vector3::Y.dot(direction).abs() > 0.9 {
            Vector3::X
        } else {
            Vector3::Y
        };
        let right = direction.cross(helper).normalize();
        let up = right.cross(direction);

        Self {
            center,
            color,
            intensity,
            direction,
            width,
            right,
            up,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// A uniformly distributed point on the light's square.
    pub fn sample_point(&self, rng: &mut dyn RngCore) -> Point3 {
        let u = gen_centered(rng) * self.width;
        let v = gen_centered(rng) * self.width;
        self.center + self.right * u + self.up * v
    }
}

/// Any light in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Point(PointLight),
    Area(AreaLight),
}

impl Light {
    /// Scalar power, attenuated by inverse square distance during shading.
    pub fn intensity(&self) -> f64 {
        match self {
            Light::Point(light) => light.intensity,
            Light::Area(light) => light.intensity,
        }
    }

    /// World-space anchor: the position of a point light, the center of an area light.
    pub fn position(&self) -> Point3 {
        match self {
            Light::Point(light) => light.position,
            Light::Area(light) => light.center,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Point(light) => light.color,
            Light::Area(light) => light.color,
        }
    }

    /// Draw up to `count` sample points on the light.
    ///
    /// The sequence is consumed as it is iterated and cannot be restarted.
    pub fn samples<'a>(&'a self, count: usize, rng: &'a mut dyn RngCore) -> LightSamples<'a> {
        let remaining = match self {
            Light::Point(_) => count.min(1),
            Light::Area(_) => count,
        };
        LightSamples {
            light: self,
            rng,
            remaining,
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<AreaLight> for Light {
    fn from(light: AreaLight) -> Self {
        Light::Area(light)
    }
}

/// Sample points on a light, see [`Light::samples`].
pub struct LightSamples<'a> {
    light: &'a Light,
    rng: &'a mut dyn RngCore,
    remaining: usize,
}

impl Iterator for LightSamples<'_> {
    type Item = Point3;

    fn next(&mut self) -> Option<Point3> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        Some(match self.light {
            Light::Point(light) => light.position,
            Light::Area(light) => light.sample_point(self.rng),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LightSamples<'_> {}
