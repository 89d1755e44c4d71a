//! Decoded pixel data for image textures.
//!
//! Images are kept as raw 8-bit bytes exactly as decoded (row-major, top row
//! first). Conversion to color happens at lookup time in `ImageTexture`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::ImageFormat;
use thiserror::Error;

/// Errors that can occur while decoding a texture image.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported pixel layout: {0}")]
    UnsupportedLayout(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Raw decoded image, `bytes_per_pixel` bytes per pixel with R, G, B first.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
}

impl DecodedImage {
    /// Wrap raw bytes. Fails if the buffer doesn't match the dimensions or
    /// a pixel has fewer than three channels.
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
    ) -> TextureResult<Self> {
        if bytes_per_pixel < 3 {
            return Err(TextureError::UnsupportedLayout(format!(
                "{} bytes per pixel, need at least 3",
                bytes_per_pixel
            )));
        }
        let expected = width as usize * height as usize * bytes_per_pixel;
        if data.len() != expected || expected == 0 {
            return Err(TextureError::UnsupportedLayout(format!(
                "{} bytes for a {}x{} image with {} bytes per pixel",
                data.len(),
                width,
                height,
                bytes_per_pixel
            )));
        }

        Ok(Self {
            data,
            width,
            height,
            bytes_per_pixel,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// RGB bytes of the pixel at column `i`, row `j` (row 0 is the top).
    ///
    /// Indices are clamped to the image so this never panics.
    pub fn pixel(&self, i: u32, j: u32) -> [u8; 3] {
        let i = i.min(self.width - 1) as usize;
        let j = j.min(self.height - 1) as usize;
        let bytes_per_scanline = self.bytes_per_pixel * self.width as usize;
        let offset = j * bytes_per_scanline + i * self.bytes_per_pixel;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }
}

/// Decode an image file into 8-bit RGB. The format follows the extension.
pub fn load_image(path: impl AsRef<Path>) -> TextureResult<DecodedImage> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let file = File::open(path)?;
    let img = image::load(BufReader::new(file), format)?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    log::debug!(
        "Decoded image: {} ({}x{}, {:.1} KB)",
        path.display(),
        width,
        height,
        (width as u64 * height as u64 * 3) as f64 / 1024.0
    );

    DecodedImage::from_raw(rgb.into_raw(), width, height, 3)
}
