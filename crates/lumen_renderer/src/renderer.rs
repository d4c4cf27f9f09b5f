//! Render settings and the parallel render loop.

use std::time::Instant;

use log::{debug, info};
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Color, Image, RenderError, Scene};

/// Default recursion limit for secondary rays.
pub const MAX_DEPTH: u32 = 4;

/// Render configuration.
///
/// Deserializes from JSON with every field optional; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Camera rays per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Shadow rays per area light at each shading point
    pub light_samples: u32,
    /// Jittered rays per reflection or transmission bounce
    pub secondary_samples: u32,
    /// Maximum recursion depth for secondary rays
    pub max_depth: u32,
    /// Per-level falloff of secondary contributions
    pub decay: f64,
    /// Radius of the jitter applied to secondary directions
    pub gloss: f64,
    /// Offset of secondary and shadow ray origins off the surface
    pub bias: f64,
    /// Color of rays that hit nothing
    pub background: Color,
    /// Base seed for the per-bucket random streams
    pub seed: u64,
    /// Side of a square render tile in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 4,
            light_samples: 15,
            secondary_samples: 3,
            max_depth: MAX_DEPTH,
            decay: 0.8,
            gloss: 0.02,
            bias: 1e-4,
            background: Color::splat(0.5),
            seed: 5,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), RenderError> {
        let counts = [
            ("samples_per_pixel", self.samples_per_pixel),
            ("light_samples", self.light_samples),
            ("secondary_samples", self.secondary_samples),
            ("bucket_size", self.bucket_size),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(RenderError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }

        let factors = [("decay", self.decay), ("gloss", self.gloss), ("bias", self.bias)];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !self.background.is_finite() {
            return Err(RenderError::InvalidConfig("background must be finite".to_string()));
        }

        Ok(())
    }
}

/// Render a single pixel with multi-sampling.
///
/// `row` is counted from the bottom of the viewport. Misses take the
/// background color; the result is the plain average of all samples.
pub fn render_pixel(scene: &Scene, row: u32, col: u32, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
    let camera = scene.camera();
    let samples = config.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for sample in 0..samples {
        let ray = camera.sample_ray(row, col, sample, samples, rng);
        pixel_color += match scene.cast_ray(&ray) {
            Some(hit) => scene.shade(&hit, 0, config, rng),
            None => config.background,
        };
    }

    pixel_color / samples as f64
}

/// Render the scene into a new image.
///
/// Buckets are rendered in parallel, then written into the image once all
/// of them are done.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<Image, RenderError> {
    config.validate()?;

    let viewport = scene.camera().viewport();
    let (width, height) = (viewport.image_width(), viewport.image_height());
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidConfig(format!(
            "image must be at least 1x1 pixels, got {width}x{height}"
        )));
    }
    let buckets = generate_buckets(width, height, config.bucket_size);

    info!(
        "Rendering {}x{} at {} spp ({} light samples, depth {})",
        width, height, config.samples_per_pixel, config.light_samples, config.max_depth
    );
    debug!("{} buckets of {} px", buckets.len(), config.bucket_size);

    let start = Instant::now();
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, scene, config))
        .collect();

    let mut image = Image::new(width, height);
    for result in &results {
        for (row, col, color) in result.iter_pixels() {
            image.set_pixel(row, col, color);
        }
    }

    info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}
