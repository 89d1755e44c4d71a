//! Ember Core - surface appearance inputs and asset loading.
//!
//! This crate provides:
//!
//! - **Textures**: the `Texture` trait and its five variants (solid, checker,
//!   noise, image, barycentric)
//! - **Perlin noise** backing the noise texture
//! - **Asset loading**: image decoding for image textures and OBJ meshes
//!
//! Every texture is immutable once built and is shared as `Arc<dyn Texture>`,
//! so any number of render threads can read it without locking.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ember_core::{CheckerTexture, Texture};
//! use ember_math::{Color, Vec3};
//!
//! let checker = CheckerTexture::from_colors(Color::new(0.2, 0.3, 0.1), Color::splat(0.9));
//! let c = checker.value(0.0, 0.0, Vec3::new(0.05, 0.07, 0.11));
//! ```

pub mod image_data;
pub mod mesh;
pub mod perlin;
pub mod texture;

pub use image_data::{load_image, DecodedImage, TextureError, TextureResult};
pub use mesh::{Mesh, MeshError, MeshResult};
pub use perlin::Perlin;
pub use texture::{
    BarycentricTexture, CheckerTexture, ImageTexture, NoiseStyle, NoiseTexture, SolidColor, Texture,
    MISSING_IMAGE_COLOR,
};
