//! Image file I/O for the CLI.
//!
//! Converts between files on disk and the library's [`PixelBuffer`]. Images
//! are normalized to 8-bit RGB on load. Stego output must go to a lossless
//! format (PNG); saving to JPEG would destroy the embedded bits.

use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageBuffer, Rgb};

use helixhide::pixel::{PixelBuffer, Shape};

/// Loads an image file as an RGB8 pixel buffer.
pub fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    let shape = Shape::new(height as usize, width as usize, 3);
    PixelBuffer::new(img.into_raw(), shape).context("Image buffer does not match its dimensions")
}

/// Saves a pixel buffer as a PNG file.
///
/// Only 3-channel buffers are supported here; the pipeline's decrypt output
/// and stego covers are always RGB8.
pub fn save_pixels(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let shape = buffer.shape();
    anyhow::ensure!(
        shape.channels == 3,
        "Can only save 3-channel buffers, got {} channels",
        shape.channels
    );

    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_raw(
        shape.width as u32,
        shape.height as u32,
        buffer.samples().to_vec(),
    )
    .context("Pixel buffer does not match its shape")?;

    DynamicImage::ImageRgb8(img)
        .save(path)
        .with_context(|| format!("Failed to save image {}", path.display()))?;
    Ok(())
}
