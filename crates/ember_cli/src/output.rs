//! Writing rendered images to disk.
//!
//! The format follows the file extension: `.ppm` is written as binary P6,
//! anything else goes through the `image` crate (PNG, JPEG, ...).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

/// Save an interleaved RGB8 buffer, top row first.
pub fn save_image(path: &Path, bytes: &[u8], width: u32, height: u32) -> Result<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3));
    anyhow::ensure!(
        expected == Some(bytes.len()),
        "buffer holds {} bytes, expected {}x{}x3",
        bytes.len(),
        width,
        height
    );

    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        save_ppm(path, bytes, width, height)?;
    } else {
        image::save_buffer(path, bytes, width, height, image::ColorType::Rgb8)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!("Image saved to {}", path.display());
    Ok(())
}

fn save_ppm(path: &Path, bytes: &[u8], width: u32, height: u32) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write!(writer, "P6\n{} {}\n255\n", width, height)?;
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
