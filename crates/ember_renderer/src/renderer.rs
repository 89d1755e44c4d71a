//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounded-depth light paths, traced iteratively
//! - Square-root gamma correction
//! - Anti-aliasing via jittered multi-sampling

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use ember_math::{unit_vector, Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::sampling::gen_f32;
use crate::{Camera, Hittable};

/// Minimum ray parameter for a hit, keeps bounced rays from re-hitting the
/// surface they start on.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Vertical gradient, white straight up to pale blue straight down.
    Sky,
    Solid(Color),
}

impl Background {
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum number of surface interactions per path
    pub max_depth: u32,
    /// Color of rays that miss everything
    pub background: Background,
    /// Add material emission at every hit. Off reproduces the pure
    /// attenuation estimator, where lights only block paths.
    pub gather_emission: bool,
    /// Base seed, every bucket derives its own generator from it
    pub seed: u64,
    /// Edge length of the square tiles rendered in parallel
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 30,
            max_depth: 30,
            background: Background::Sky,
            gather_emission: false,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Follows one light path for at most `depth` surface interactions,
/// multiplying attenuations as it goes. A path that runs out of depth or is
/// absorbed contributes black; one that escapes picks up the background.
/// The returned pdf is not used to weight the estimate.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;
    let mut radiance = Color::ZERO;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
            return radiance + throughput * config.background.color(&ray);
        };

        if config.gather_emission {
            radiance += throughput * rec.material.emitted(&rec);
        }

        match rec.material.scatter(&ray, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.scattered;
            }
            None => return radiance,
        }
    }

    // Bounce budget exhausted
    radiance
}

/// Vertical sky gradient.
///
/// The normalized direction's y component is mapped from [-1, 1] to
/// [0, 1] and blends pale blue (straight down) into white (straight up).
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    blue * (1.0 - a) + white * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
///
/// Each channel is gamma corrected, clamped to [0, 0.999] and scaled by 256
/// so 1.0 lands on 255.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are pixel indices with row 0 at the top. Returns the mean of
/// all samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    (width, height): (u32, u32),
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // Image rows count down, the image plane's t counts up
    let s_scale = 1.0 / (width.max(2) - 1) as f32;
    let t_scale = 1.0 / (height.max(2) - 1) as f32;
    let row = (height - 1 - y) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) * s_scale;
        let t = (row + gen_f32(rng)) * t_scale;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, config, rng);
    }

    pixel_color / config.samples_per_pixel.max(1) as f32
}

/// Linear color image, row-major with the top row first.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[pixel_index(self.width, x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[pixel_index(self.width, x, y)] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let b = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % b.width;
            let local_y = i as u32 / b.width;
            self.set(b.x + local_x, b.y + local_y, *color);
        }
    }

    /// Flat `width * height * 3` byte buffer, RGB interleaved, gamma
    /// corrected.
    pub fn to_rgb8(&self) -> Vec<u8> {
        encode_rgb8(&self.pixels)
    }
}

#[inline]
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Encode linear colors as gamma corrected RGB bytes, three per pixel.
pub fn encode_rgb8(pixels: &[Color]) -> Vec<u8> {
    pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
}

/// Seed for one bucket, derived from its position so the result doesn't
/// depend on which thread renders it or in what order.
pub fn bucket_seed(seed: u64, x: u32, y: u32) -> u64 {
    let position = ((y as u64) << 32) | x as u64;
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ position
}

/// Render the entire scene.
///
/// Buckets are traced in parallel on the current rayon pool. Output is
/// identical for any number of threads.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(width, height, config.bucket_size.max(1));
    let total = buckets.len();
    let done = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} buckets",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        total
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(bucket_seed(config.seed, bucket.x, bucket.y));
            let pixels = render_bucket(bucket, camera, world, (width, height), config, &mut rng);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} done ({}/{})", bucket.index, finished, total);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
