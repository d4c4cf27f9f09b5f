//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::renderer::render_pixel;
use crate::{Color, RenderConfig, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Column of the bucket's top-left pixel
    pub x: u32,
    /// Row of the bucket's top-left pixel, counted from the top of the image
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// RNG seed for this bucket.
    ///
    /// Depends only on the base seed and the bucket's position, never on
    /// which thread renders it or when, so renders are reproducible.
    pub fn seed(&self, base: u64) -> u64 {
        base.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (((self.y as u64) << 32) | self.x as u64)
    }

    /// Squared distance from the bucket's center to (`cx`, `cy`).
    fn distance_squared_to(&self, cx: f64, cy: f64) -> f64 {
        let dx = self.x as f64 + self.width as f64 / 2.0 - cx;
        let dy = self.y as f64 + self.height as f64 / 2.0 - cy;
        dx * dx + dy * dy
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Tile a `width` x `height` image, nearest-to-center buckets first.
///
/// Edge buckets are clipped to the image. Buckets at equal distance keep
/// row-major order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let step = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(step as usize)
        .flat_map(|y| {
            (0..width)
                .step_by(step as usize)
                .map(move |x| Bucket::new(x, y, step.min(width - x), step.min(height - y)))
        })
        .collect();

    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    buckets.sort_by(|a, b| a.distance_squared_to(cx, cy).total_cmp(&b.distance_squared_to(cx, cy)));
    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket, top row first. The
/// camera counts rows from the bottom, so image rows are flipped on the way
/// in.
pub fn render_bucket(bucket: &Bucket, scene: &Scene, config: &RenderConfig) -> BucketResult {
    let image_height = scene.camera().viewport().image_height();
    let mut rng = StdRng::seed_from_u64(bucket.seed(config.seed));
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        let camera_row = image_height - 1 - (bucket.y + local_y);
        for local_x in 0..bucket.width {
            let col = bucket.x + local_x;
            pixels.push(render_pixel(scene, camera_row, col, config, &mut rng));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Image-space (row, col, color) for every pixel in the bucket.
    pub fn iter_pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let bucket = self.bucket;
        self.pixels.iter().enumerate().map(move |(i, color)| {
            let i = i as u32;
            (bucket.y + i / bucket.width, bucket.x + i % bucket.width, *color)
        })
    }
}
