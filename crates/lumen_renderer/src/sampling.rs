//! Uniform sample helpers over an injected RNG.

use lumen_math::Vector3;
use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform sample in [-0.5, 0.5).
#[inline]
pub fn gen_centered(rng: &mut dyn RngCore) -> f64 {
    gen_f64(rng) - 0.5
}

/// Uniform point inside the unit sphere, by rejection.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vector3 {
    loop {
        let v = Vector3::new(
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
        );
        if v.length_squared() < 1.0 {
            return v;
        }
    }
}
