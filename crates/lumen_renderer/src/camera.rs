//! Camera and viewport for ray generation.
//!
//! The camera sits at `position` looking down -Z. The viewport is a
//! rectangle of physical size `width` x `height` placed `focal_length` in
//! front of it and divided into the target image's pixel grid. Pixel rows are
//! counted from the bottom of the viewport.

use lumen_math::{Point3, Ray, Vector3};
use rand::RngCore;

use crate::sampling::gen_f64;

/// Physical viewport plus the pixel resolution it is divided into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    image_width: u32,
    image_height: u32,
}

impl Viewport {
    /// Create a viewport from explicit physical and pixel dimensions.
    pub fn new(width: f64, height: f64, image_width: u32, image_height: u32) -> Self {
        Self {
            width,
            height,
            image_width,
            image_height,
        }
    }

    /// Create a viewport whose physical and pixel aspect ratios match.
    pub fn from_aspect_ratio(width: f64, image_width: u32, aspect_ratio: f64) -> Self {
        let image_height = (image_width as f64 / aspect_ratio).round() as u32;
        Self::new(width, width / aspect_ratio, image_width, image_height)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Step between horizontally adjacent pixel centers.
    pub fn dx(&self) -> Vector3 {
        Vector3::new(self.width / self.image_width as f64, 0.0, 0.0)
    }

    /// Step between vertically adjacent pixel centers.
    pub fn dy(&self) -> Vector3 {
        Vector3::new(0.0, self.height / self.image_height as f64, 0.0)
    }

    /// World-space center of the bottom-left pixel.
    pub fn bottom_left(&self, camera_position: Point3, focal_length: f64) -> Point3 {
        camera_position
            + Vector3::new(-self.width / 2.0, -self.height / 2.0, -focal_length)
            + self.dx() / 2.0
            + self.dy() / 2.0
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    viewport: Viewport,
    position: Point3,
    focal_length: f64,

    // Cached from the viewport
    pixel00_loc: Point3,
    pixel_delta_u: Vector3,
    pixel_delta_v: Vector3,
}

impl Camera {
    /// Create a camera looking down -Z.
    pub fn new(viewport: Viewport, position: Point3, focal_length: f64) -> Self {
        Self {
            viewport,
            position,
            focal_length,
            pixel00_loc: viewport.bottom_left(position, focal_length),
            pixel_delta_u: viewport.dx(),
            pixel_delta_v: viewport.dy(),
        }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// World-space center of pixel (`row`, `col`), `row` counted from the bottom.
    pub fn pixel_center(&self, row: u32, col: u32) -> Point3 {
        self.pixel00_loc + self.pixel_delta_u * col as f64 + self.pixel_delta_v * row as f64
    }

    /// Jittered ray for sample `sample` of `samples` through pixel (`row`, `col`).
    ///
    /// The pixel footprint is split into a `k x k` grid of strata with
    /// `k = ceil(sqrt(samples))`; each sample lands uniformly inside its own
    /// stratum, so samples spread around the pixel center instead of clumping.
    pub fn sample_ray(&self, row: u32, col: u32, sample: u32, samples: u32, rng: &mut dyn RngCore) -> Ray {
        let (offset_u, offset_v) = stratified_offset(sample, samples, rng);

        let target = self.pixel00_loc
            + self.pixel_delta_u * (col as f64 + offset_u)
            + self.pixel_delta_v * (row as f64 + offset_v);

        Ray::new(self.position, (target - self.position).normalize())
    }
}

/// Offset in [-0.5, 0.5)^2 for one stratum of the pixel.
fn stratified_offset(sample: u32, samples: u32, rng: &mut dyn RngCore) -> (f64, f64) {
    let strata = (samples.max(1) as f64).sqrt().ceil() as u32;
    let cell = 1.0 / strata as f64;

    let su = sample % strata;
    let sv = (sample / strata) % strata;

    let u = (su as f64 + gen_f64(rng)) * cell - 0.5;
    let v = (sv as f64 + gen_f64(rng)) * cell - 0.5;
    (u, v)
}
