//! Ember renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer: rays leave a thin-lens camera, bounce off
//! spheres and triangles according to their materials, and pick up the
//! background color when they escape. Buckets of pixels are traced in
//! parallel with rayon, each with its own seeded generator, so a given
//! seed always produces the same image.

mod bucket;
mod bvh;
mod camera;
mod hittable;
mod material;
mod renderer;
pub mod sampling;
pub mod scenes;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterRecord,
};
pub use renderer::{
    bucket_seed, color_to_rgb8, encode_rgb8, linear_to_gamma, ray_color, render, render_pixel,
    sky_gradient, Background, ImageBuffer, RenderConfig, SHADOW_ACNE_EPSILON,
};
pub use scenes::{build_scene, SceneError, SceneKind, SceneOptions, ScenePreset, View};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common math types from ember_math
pub use ember_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
