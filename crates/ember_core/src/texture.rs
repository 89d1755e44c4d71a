//! Texture trait and variants.
//!
//! A texture maps surface coordinates `(u, v)` and a world-space point to a
//! color. Evaluation is pure and total: every input yields a color, there is
//! no error path. Loading problems are dealt with at construction time.

use std::path::Path;
use std::sync::Arc;

use ember_math::{Color, Point3};
use rand::RngCore;

use crate::image_data::{load_image, DecodedImage};
use crate::perlin::{Perlin, DEFAULT_TURBULENCE_DEPTH};

/// Color returned by an image texture that has no pixel data (cyan).
pub const MISSING_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// Trait for anything that can color a surface point.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color;
}

/// Constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        self.color
    }
}

/// Solid 3D checkerboard locked to world space.
///
/// The sign of `sin(10x)·sin(10y)·sin(10z)` picks between the two
/// sub-textures, so cells are π/10 wide and the pattern repeats every π/5
/// along each axis.
#[derive(Clone)]
pub struct CheckerTexture {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Color, odd: Color) -> Self {
        Self::new(
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// How a noise texture turns Perlin noise into a gray level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseStyle {
    /// `0.5 * (1 + noise(scale * p))`
    Smooth,
    /// Sine bands along z perturbed by turbulence.
    Marble,
}

/// Grayscale Perlin noise.
#[derive(Clone, Debug)]
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
    style: NoiseStyle,
}

impl NoiseTexture {
    /// Smooth noise at the given spatial frequency.
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
            style: NoiseStyle::Smooth,
        }
    }

    /// Marble-like veins.
    pub fn marble(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
            style: NoiseStyle::Marble,
        }
    }

    pub fn style(&self) -> NoiseStyle {
        self.style
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Point3) -> Color {
        let gray = match self.style {
            NoiseStyle::Smooth => 0.5 * (1.0 + self.noise.noise(self.scale * p)),
            NoiseStyle::Marble => {
                let turb = self.noise.turb(p, DEFAULT_TURBULENCE_DEPTH);
                0.5 * (1.0 + (self.scale * p.z + 10.0 * turb).sin())
            }
        };
        Color::splat(gray)
    }
}

/// Nearest-pixel image lookup.
///
/// `u` runs left to right and `v` bottom to top; both are clamped to [0, 1].
/// Without pixel data every lookup returns [`MISSING_IMAGE_COLOR`].
#[derive(Clone, Debug)]
pub struct ImageTexture {
    image: Option<DecodedImage>,
}

impl ImageTexture {
    pub fn new(image: DecodedImage) -> Self {
        Self { image: Some(image) }
    }

    /// Texture that always evaluates to the missing-image color.
    pub fn missing() -> Self {
        Self { image: None }
    }

    /// Load from disk. A file that can't be decoded is reported and the
    /// texture falls back to the missing-image color, it never fails.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match load_image(path) {
            Ok(image) => Self::new(image),
            Err(e) => {
                log::warn!(
                    "Could not load texture image file '{}': {}",
                    path.display(),
                    e
                );
                Self::missing()
            }
        }
    }

    pub fn has_data(&self) -> bool {
        self.image.is_some()
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Point3) -> Color {
        let Some(image) = &self.image else {
            return MISSING_IMAGE_COLOR;
        };

        let u = u.clamp(0.0, 1.0);
        // Flip V to image row order
        let v = 1.0 - v.clamp(0.0, 1.0);

        // Truncation floors here since both factors are non-negative.
        // `pixel` clamps the u = 1 / v = 0 edge onto the last column/row.
        let i = (u * image.width() as f32) as u32;
        let j = (v * image.height() as f32) as u32;

        let [r, g, b] = image.pixel(i, j);
        Color::new(r as f32, g as f32, b as f32) / 255.0
    }
}

/// Blend of three corner colors by barycentric weights.
///
/// Returns `u·a + v·b + (1 − u − v)·c`. Meant for per-vertex mesh colors
/// where `u + v ≤ 1`; that is not checked.
#[derive(Debug, Clone, Copy)]
pub struct BarycentricTexture {
    color_a: Color,
    color_b: Color,
    color_c: Color,
}

impl BarycentricTexture {
    pub fn new(color_a: Color, color_b: Color, color_c: Color) -> Self {
        Self {
            color_a,
            color_b,
            color_c,
        }
    }
}

impl Texture for BarycentricTexture {
    fn value(&self, u: f32, v: f32, _p: Point3) -> Color {
        u * self.color_a + v * self.color_b + (1.0 - u - v) * self.color_c
    }
}
