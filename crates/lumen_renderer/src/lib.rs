//! Lumen renderer - Whitted-style CPU ray tracing
//!
//! Renders scenes of transformed spheres with soft shadows from area lights,
//! glossy reflection and refraction. Images are rendered in buckets on the
//! rayon thread pool and written out as PNG.

mod bucket;
mod camera;
mod error;
mod geometry;
mod light;
mod material;
mod object;
mod output;
mod renderer;
mod sampling;
mod scene;
mod shading;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, Viewport};
pub use error::RenderError;
pub use geometry::{normal_to_world, Geometry, Intersection, Sphere};
pub use light::{AreaLight, Light, LightSamples, PointLight};
pub use material::{refract, schlick, Color, Material, MaterialKind};
pub use object::{Hit, Object};
pub use output::{color_to_rgba, Image};
pub use renderer::{render, render_pixel, RenderConfig, MAX_DEPTH};
pub use scene::Scene;
pub use shading::DirectLight;

/// Re-export common math types from lumen_math
pub use lumen_math::{AffineTransform, Interval, Point3, Ray, Vector3};
