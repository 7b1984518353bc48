//! Source image decoding and PNG export of the finished canvas

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::io::error::{CrystalError, Result};
use crate::spatial::{Color, PixelBuffer};

/// Convert a decoded RGBA image into a pixel buffer
///
/// # Errors
///
/// Returns an error if the pixel data does not match the image dimensions
pub fn buffer_from_rgba(image: &RgbaImage) -> Result<PixelBuffer> {
    let pixels = image.pixels().map(|pixel| Color::from(pixel.0)).collect();
    PixelBuffer::from_pixels(image.width() as usize, image.height() as usize, pixels)
}

/// Convert a pixel buffer into an RGBA image
///
/// # Errors
///
/// Returns an error if the buffer dimensions exceed what an image can hold
pub fn buffer_to_rgba(buffer: &PixelBuffer) -> Result<RgbaImage> {
    let (width, height) = buffer.bounds();
    let too_large = || CrystalError::InvalidConfig {
        parameter: "canvas",
        value: format!("{width}x{height}"),
        reason: "dimensions exceed the image size limit".to_string(),
    };
    let width = u32::try_from(width).ok().ok_or_else(too_large)?;
    let height = u32::try_from(height).ok().ok_or_else(too_large)?;
    RgbaImage::from_raw(width, height, buffer.to_rgba_bytes()).ok_or_else(too_large)
}

/// Decode an encoded image held in memory
///
/// # Errors
///
/// Returns [`CrystalError::ImageLoad`] if the bytes are not a supported image
pub fn decode_source_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory(bytes).map_err(|e| CrystalError::ImageLoad {
        path: PathBuf::from("<memory>"),
        source: e,
    })?;
    buffer_from_rgba(&img.to_rgba8())
}

/// Load and decode the source image at `path`
///
/// # Errors
///
/// Returns [`CrystalError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_source_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|e| CrystalError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let buffer = buffer_from_rgba(&img.to_rgba8())?;
    let (width, height) = buffer.bounds();
    tracing::debug!(path = %path.display(), width, height, "decoded source image");
    Ok(buffer)
}

/// Encode the canvas as PNG bytes
///
/// # Errors
///
/// Returns [`CrystalError::ImageExport`] if encoding fails
pub fn encode_canvas_png(canvas: &PixelBuffer) -> Result<Vec<u8>> {
    let img = DynamicImage::ImageRgba8(buffer_to_rgba(canvas)?);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| CrystalError::ImageExport {
            path: PathBuf::from("<memory>"),
            source: e,
        })?;
    Ok(bytes)
}

/// Save the canvas as a PNG file, creating parent directories as needed
///
/// The file is PNG-encoded regardless of its extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_canvas_as_png(canvas: &PixelBuffer, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CrystalError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    buffer_to_rgba(canvas)?
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| CrystalError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
